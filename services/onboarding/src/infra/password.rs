use anyhow::Context as _;
use bcrypt::DEFAULT_COST;

use crate::error::OnboardingServiceError;

/// Hash a plaintext password with bcrypt. Done at the HTTP boundary so the
/// onboarding workflow only ever sees the opaque hash.
pub fn hash_password(password: &str) -> Result<String, OnboardingServiceError> {
    let hashed = bcrypt::hash(password, DEFAULT_COST).context("hash password")?;
    Ok(hashed)
}
