use anyhow::anyhow;
use chrono::Duration;
use uuid::Uuid;

use crate::domain::repository::{Clock, CodeGenerator, SchoolRepository};
use crate::domain::types::{
    Admin, JOIN_CODE_LEN, JOIN_CODE_TTL_DAYS, JoinCode, MAX_CODE_GENERATION_ATTEMPTS,
};
use crate::error::OnboardingServiceError;

/// Generate a join code that no other school currently holds. Collisions are
/// retried silently up to `MAX_CODE_GENERATION_ATTEMPTS` times.
pub(crate) async fn generate_unique_code<S, G>(
    schools: &S,
    codegen: &G,
    exclude_school: Option<Uuid>,
) -> Result<String, OnboardingServiceError>
where
    S: SchoolRepository,
    G: CodeGenerator,
{
    for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
        let code = codegen.random_digits(JOIN_CODE_LEN);
        if !schools.is_code_taken(&code, exclude_school).await? {
            return Ok(code);
        }
    }
    Err(OnboardingServiceError::Internal(anyhow!(
        "no free join code after {MAX_CODE_GENERATION_ATTEMPTS} attempts"
    )))
}

/// Resolve an incoming join code to its school. Expired and unknown codes
/// are deliberately the same error so the caller cannot probe which one it was.
pub async fn validate_code<S, C>(
    schools: &S,
    clock: &C,
    code: &str,
) -> Result<Uuid, OnboardingServiceError>
where
    S: SchoolRepository,
    C: Clock,
{
    match schools.find_by_code(code).await? {
        Some((school_id, join_code)) if join_code.is_active(clock.now()) => Ok(school_id),
        _ => Err(OnboardingServiceError::CodeInvalid),
    }
}

async fn mint_code<S, C, G>(
    schools: &S,
    clock: &C,
    codegen: &G,
    school_id: Uuid,
) -> Result<JoinCode, OnboardingServiceError>
where
    S: SchoolRepository,
    C: Clock,
    G: CodeGenerator,
{
    let code = generate_unique_code(schools, codegen, Some(school_id)).await?;
    let now = clock.now();
    let join_code = JoinCode {
        code,
        issued_at: now,
        expires_at: now + Duration::days(JOIN_CODE_TTL_DAYS),
    };
    if !schools.replace_code(school_id, &join_code).await? {
        return Err(OnboardingServiceError::SchoolNotFound);
    }
    Ok(join_code)
}

// ── IssueJoinCode ────────────────────────────────────────────────────────────

/// Issue the school's active join code, replacing any prior one regardless
/// of its expiry state. Called once at school registration.
pub struct IssueJoinCodeUseCase<S, C, G>
where
    S: SchoolRepository,
    C: Clock,
    G: CodeGenerator,
{
    pub schools: S,
    pub clock: C,
    pub codegen: G,
}

impl<S, C, G> IssueJoinCodeUseCase<S, C, G>
where
    S: SchoolRepository,
    C: Clock,
    G: CodeGenerator,
{
    pub async fn execute(&self, school_id: Uuid) -> Result<JoinCode, OnboardingServiceError> {
        mint_code(&self.schools, &self.clock, &self.codegen, school_id).await
    }
}

// ── RegenerateJoinCode ───────────────────────────────────────────────────────

/// Admin-triggered reissue. Same behavior as issuing, plus a same-school
/// check: the previous code becomes unusable immediately, even if unexpired.
pub struct RegenerateJoinCodeUseCase<S, C, G>
where
    S: SchoolRepository,
    C: Clock,
    G: CodeGenerator,
{
    pub schools: S,
    pub clock: C,
    pub codegen: G,
}

impl<S, C, G> RegenerateJoinCodeUseCase<S, C, G>
where
    S: SchoolRepository,
    C: Clock,
    G: CodeGenerator,
{
    pub async fn execute(
        &self,
        school_id: Uuid,
        admin: &Admin,
    ) -> Result<JoinCode, OnboardingServiceError> {
        let school = self
            .schools
            .find_by_id(school_id)
            .await?
            .ok_or(OnboardingServiceError::SchoolNotFound)?;
        if school.id != admin.school_id {
            return Err(OnboardingServiceError::Forbidden);
        }
        mint_code(&self.schools, &self.clock, &self.codegen, school_id).await
    }
}
