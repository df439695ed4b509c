use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, sea_query::Expr,
};
use uuid::Uuid;

use campus_onboarding_schema::{schools, users};

use crate::domain::repository::{SchoolRepository, UserRepository};
use crate::domain::types::{JoinCode, School, User, UserRole, UserStatus};
use crate::error::OnboardingServiceError;

// ── School repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSchoolRepository {
    pub db: DatabaseConnection,
}

impl SchoolRepository for DbSchoolRepository {
    async fn create(&self, school: &School) -> Result<(), OnboardingServiceError> {
        schools::ActiveModel {
            id: Set(school.id),
            name: Set(school.name.clone()),
            abbreviation: Set(school.abbreviation.clone()),
            join_code: Set(school.join_code.code.clone()),
            code_issued_at: Set(school.join_code.issued_at),
            code_expires_at: Set(school.join_code.expires_at),
            created_at: Set(school.created_at),
            updated_at: Set(school.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // Losing a name race against a concurrent registration must look
            // the same as failing the pre-insert check.
            Some(SqlErr::UniqueConstraintViolation(ref constraint))
                if constraint.contains("name") =>
            {
                OnboardingServiceError::SchoolNameTaken
            }
            _ => anyhow::Error::new(e).context("create school").into(),
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, OnboardingServiceError> {
        let model = schools::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find school by id")?;
        Ok(model.map(school_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, OnboardingServiceError> {
        let model = schools::Entity::find()
            .filter(schools::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find school by name")?;
        Ok(model.map(school_from_model))
    }

    async fn is_abbreviation_taken(
        &self,
        abbreviation: &str,
    ) -> Result<bool, OnboardingServiceError> {
        let model = schools::Entity::find()
            .filter(schools::Column::Abbreviation.eq(abbreviation))
            .one(&self.db)
            .await
            .context("find school by abbreviation")?;
        Ok(model.is_some())
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<(Uuid, JoinCode)>, OnboardingServiceError> {
        // No expiry filter here: expiry is evaluated against the injected
        // clock by the caller, keeping the time source out of SQL.
        let model = schools::Entity::find()
            .filter(schools::Column::JoinCode.eq(code))
            .one(&self.db)
            .await
            .context("find school by join code")?;
        Ok(model.map(|m| {
            (
                m.id,
                JoinCode {
                    code: m.join_code,
                    issued_at: m.code_issued_at,
                    expires_at: m.code_expires_at,
                },
            )
        }))
    }

    async fn is_code_taken(
        &self,
        code: &str,
        exclude_school: Option<Uuid>,
    ) -> Result<bool, OnboardingServiceError> {
        let mut query = schools::Entity::find().filter(schools::Column::JoinCode.eq(code));
        if let Some(school_id) = exclude_school {
            query = query.filter(schools::Column::Id.ne(school_id));
        }
        let model = query.one(&self.db).await.context("check join code in use")?;
        Ok(model.is_some())
    }

    async fn replace_code(
        &self,
        school_id: Uuid,
        code: &JoinCode,
    ) -> Result<bool, OnboardingServiceError> {
        // Single UPDATE: the old code stops matching `find_by_code` the
        // moment this commits, independent of its own expiry.
        let result = schools::Entity::update_many()
            .col_expr(schools::Column::JoinCode, Expr::value(code.code.clone()))
            .col_expr(schools::Column::CodeIssuedAt, Expr::value(code.issued_at))
            .col_expr(schools::Column::CodeExpiresAt, Expr::value(code.expires_at))
            .col_expr(schools::Column::UpdatedAt, Expr::value(code.issued_at))
            .filter(schools::Column::Id.eq(school_id))
            .exec(&self.db)
            .await
            .context("replace join code")?;
        Ok(result.rows_affected > 0)
    }
}

fn school_from_model(model: schools::Model) -> School {
    School {
        id: model.id,
        name: model.name,
        abbreviation: model.abbreviation,
        join_code: JoinCode {
            code: model.join_code,
            issued_at: model.code_issued_at,
            expires_at: model.code_expires_at,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &User) -> Result<(), OnboardingServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            school_id: Set(user.school_id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_i16()),
            status: Set(user.status.as_i16()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // The email column is the only unique key besides the id.
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                OnboardingServiceError::EmailAlreadyRegistered
            }
            _ => anyhow::Error::new(e).context("create user").into(),
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, OnboardingServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, OnboardingServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_pending(&self, school_id: Uuid) -> Result<Vec<User>, OnboardingServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::SchoolId.eq(school_id))
            .filter(users::Column::Status.eq(UserStatus::Pending.as_i16()))
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("find pending users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: UserStatus,
        new: UserStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, OnboardingServiceError> {
        // Compare-and-swap: the status filter makes the transition atomic,
        // so of two concurrent resolves only one affects a row.
        let result = users::Entity::update_many()
            .col_expr(users::Column::Status, Expr::value(new.as_i16()))
            .col_expr(users::Column::UpdatedAt, Expr::value(updated_at))
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::Status.eq(expected.as_i16()))
            .exec(&self.db)
            .await
            .context("update user status")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, OnboardingServiceError> {
    let role = UserRole::from_i16(model.role)
        .ok_or_else(|| anyhow!("unknown user role {}", model.role))?;
    let status = UserStatus::from_i16(model.status)
        .ok_or_else(|| anyhow!("unknown user status {}", model.status))?;
    Ok(User {
        id: model.id,
        school_id: model.school_id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
