use uuid::Uuid;

use crate::domain::repository::{Clock, SchoolRepository, UserRepository};
use crate::domain::types::{Admin, ResolveAction, User, UserRole, UserStatus};
use crate::error::OnboardingServiceError;
use crate::usecase::join_code::validate_code;

// ── SubmitJoinRequest ────────────────────────────────────────────────────────

pub struct SubmitJoinRequestInput {
    pub code: String,
    pub name: String,
    pub email: String,
    /// Already hashed at the HTTP boundary; opaque here.
    pub password_hash: String,
}

/// Staff self-registration gated by the school's active join code. Creates
/// the account in `pending` status, scoped to the resolved school.
pub struct SubmitJoinRequestUseCase<S, U, C>
where
    S: SchoolRepository,
    U: UserRepository,
    C: Clock,
{
    pub schools: S,
    pub users: U,
    pub clock: C,
}

impl<S, U, C> SubmitJoinRequestUseCase<S, U, C>
where
    S: SchoolRepository,
    U: UserRepository,
    C: Clock,
{
    pub async fn execute(
        &self,
        input: SubmitJoinRequestInput,
    ) -> Result<User, OnboardingServiceError> {
        let school_id = validate_code(&self.schools, &self.clock, &input.code).await?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(OnboardingServiceError::EmailAlreadyRegistered);
        }

        let now = self.clock.now();
        let user = User {
            id: Uuid::now_v7(),
            school_id,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            role: UserRole::Staff,
            status: UserStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── ListPendingUsers ─────────────────────────────────────────────────────────

pub struct ListPendingUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListPendingUsersUseCase<U> {
    pub async fn execute(
        &self,
        school_id: Uuid,
        admin: &Admin,
    ) -> Result<Vec<User>, OnboardingServiceError> {
        if admin.school_id != school_id {
            return Err(OnboardingServiceError::Forbidden);
        }
        self.users.find_pending(school_id).await
    }
}

// ── ResolvePendingUser ───────────────────────────────────────────────────────

/// Admin approval or rejection of a pending user. The `pending → terminal`
/// transition is a compare-and-swap; a concurrent loser sees `AlreadyResolved`.
pub struct ResolvePendingUserUseCase<U, C>
where
    U: UserRepository,
    C: Clock,
{
    pub users: U,
    pub clock: C,
}

impl<U, C> ResolvePendingUserUseCase<U, C>
where
    U: UserRepository,
    C: Clock,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        admin: &Admin,
        action: ResolveAction,
    ) -> Result<User, OnboardingServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(OnboardingServiceError::UserNotFound)?;
        if user.school_id != admin.school_id {
            return Err(OnboardingServiceError::Forbidden);
        }
        if user.status != UserStatus::Pending {
            return Err(OnboardingServiceError::AlreadyResolved);
        }

        let new_status = match action {
            ResolveAction::Approve => UserStatus::Active,
            ResolveAction::Reject => UserStatus::Rejected,
        };
        let now = self.clock.now();
        let transitioned = self
            .users
            .update_status(user_id, UserStatus::Pending, new_status, now)
            .await?;
        if !transitioned {
            return Err(OnboardingServiceError::AlreadyResolved);
        }

        Ok(User {
            status: new_status,
            updated_at: now,
            ..user
        })
    }
}
