#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{JoinCode, School, User, UserStatus};
use crate::error::OnboardingServiceError;

/// Repository for schools and their single active join code.
pub trait SchoolRepository: Send + Sync {
    async fn create(&self, school: &School) -> Result<(), OnboardingServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, OnboardingServiceError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, OnboardingServiceError>;

    async fn is_abbreviation_taken(
        &self,
        abbreviation: &str,
    ) -> Result<bool, OnboardingServiceError>;

    /// Find the school whose currently stored code equals `code`, expired or
    /// not. Expiry is the caller's concern (evaluated against an injected clock).
    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<(Uuid, JoinCode)>, OnboardingServiceError>;

    /// Whether `code` is held by any school other than `exclude_school`.
    async fn is_code_taken(
        &self,
        code: &str,
        exclude_school: Option<Uuid>,
    ) -> Result<bool, OnboardingServiceError>;

    /// Atomically replace the school's active code. Returns `false` if the
    /// school does not exist.
    async fn replace_code(
        &self,
        school_id: Uuid,
        code: &JoinCode,
    ) -> Result<bool, OnboardingServiceError>;
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), OnboardingServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, OnboardingServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, OnboardingServiceError>;

    /// All pending users of a school, oldest first.
    async fn find_pending(&self, school_id: Uuid) -> Result<Vec<User>, OnboardingServiceError>;

    /// Conditional status transition (compare-and-swap on `expected`).
    /// Returns `true` if the row transitioned; `false` means another caller
    /// got there first or the user no longer has the expected status.
    /// `updated_at` comes from the caller's clock.
    async fn update_status(
        &self,
        id: Uuid,
        expected: UserStatus,
        new: UserStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, OnboardingServiceError>;
}

/// Injectable time source so expiry logic is testable with a fixed clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Injectable join-code source so uniqueness retries are testable with a
/// scripted sequence.
pub trait CodeGenerator: Send + Sync {
    fn random_digits(&self, len: usize) -> String;
}
