use chrono::Duration;
use uuid::Uuid;

use crate::domain::repository::{Clock, CodeGenerator, SchoolRepository, UserRepository};
use crate::domain::types::{
    JOIN_CODE_TTL_DAYS, JoinCode, School, User, UserRole, UserStatus,
};
use crate::error::OnboardingServiceError;
use crate::usecase::join_code::generate_unique_code;

pub struct RegisterSchoolInput {
    pub school_name: String,
    pub admin_name: String,
    pub admin_email: String,
    /// Already hashed at the HTTP boundary; opaque here.
    pub admin_password_hash: String,
}

pub struct RegisteredSchool {
    pub school: School,
    pub admin: User,
}

/// Tenant bootstrap: creates the school with its first join code and the
/// school's initial admin account (already active, no approval step).
pub struct RegisterSchoolUseCase<S, U, C, G>
where
    S: SchoolRepository,
    U: UserRepository,
    C: Clock,
    G: CodeGenerator,
{
    pub schools: S,
    pub users: U,
    pub clock: C,
    pub codegen: G,
}

impl<S, U, C, G> RegisterSchoolUseCase<S, U, C, G>
where
    S: SchoolRepository,
    U: UserRepository,
    C: Clock,
    G: CodeGenerator,
{
    pub async fn execute(
        &self,
        input: RegisterSchoolInput,
    ) -> Result<RegisteredSchool, OnboardingServiceError> {
        if self
            .schools
            .find_by_name(&input.school_name)
            .await?
            .is_some()
        {
            return Err(OnboardingServiceError::SchoolNameTaken);
        }
        if self
            .users
            .find_by_email(&input.admin_email)
            .await?
            .is_some()
        {
            return Err(OnboardingServiceError::EmailAlreadyRegistered);
        }

        let abbreviation = self.derive_abbreviation(&input.school_name).await?;
        let code = generate_unique_code(&self.schools, &self.codegen, None).await?;

        let now = self.clock.now();
        let school = School {
            id: Uuid::now_v7(),
            name: input.school_name,
            abbreviation,
            join_code: JoinCode {
                code,
                issued_at: now,
                expires_at: now + Duration::days(JOIN_CODE_TTL_DAYS),
            },
            created_at: now,
            updated_at: now,
        };
        self.schools.create(&school).await?;

        let admin = User {
            id: Uuid::now_v7(),
            school_id: school.id,
            name: input.admin_name,
            email: input.admin_email,
            password_hash: input.admin_password_hash,
            role: UserRole::Admin,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&admin).await?;

        Ok(RegisteredSchool { school, admin })
    }

    /// Initials of the school name, disambiguated with a random numeric
    /// suffix when another school already claimed them.
    async fn derive_abbreviation(&self, name: &str) -> Result<String, OnboardingServiceError> {
        let mut abbreviation: String = name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if self.schools.is_abbreviation_taken(&abbreviation).await? {
            abbreviation.push_str(&self.codegen.random_digits(3));
        }
        Ok(abbreviation)
    }
}
