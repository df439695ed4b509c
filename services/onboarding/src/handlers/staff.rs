use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::identity::IdentityHeaders;

use crate::domain::types::{Admin, ResolveAction, User, UserRole};
use crate::error::OnboardingServiceError;
use crate::infra::password::hash_password;
use crate::state::AppState;
use crate::usecase::onboarding::{
    ListPendingUsersUseCase, ResolvePendingUserUseCase, SubmitJoinRequestInput,
    SubmitJoinRequestUseCase,
};

#[derive(Serialize)]
pub struct PendingUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: &'static str,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for PendingUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            status: user.status.as_str(),
            created_at: user.created_at,
        }
    }
}

// ── POST /join-school ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct JoinSchoolRequest {
    pub join_code: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct JoinSchoolResponse {
    pub user_id: String,
    pub status: &'static str,
}

pub async fn join_school(
    State(state): State<AppState>,
    Json(body): Json<JoinSchoolRequest>,
) -> Result<(StatusCode, Json<JoinSchoolResponse>), OnboardingServiceError> {
    let password_hash = hash_password(&body.password)?;
    let usecase = SubmitJoinRequestUseCase {
        schools: state.school_repo(),
        users: state.user_repo(),
        clock: state.clock(),
    };
    let user = usecase
        .execute(SubmitJoinRequestInput {
            code: body.join_code,
            name: body.name,
            email: body.email,
            password_hash,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(JoinSchoolResponse {
            user_id: user.id.to_string(),
            status: user.status.as_str(),
        }),
    ))
}

// ── GET /users/pending ───────────────────────────────────────────────────────

pub async fn list_pending_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingUserResponse>>, OnboardingServiceError> {
    if identity.user_role != UserRole::Admin.as_u8() {
        return Err(OnboardingServiceError::Forbidden);
    }
    let admin = Admin {
        user_id: identity.user_id,
        school_id: identity.school_id,
    };
    let usecase = ListPendingUsersUseCase {
        users: state.user_repo(),
    };
    let pending = usecase.execute(identity.school_id, &admin).await?;
    Ok(Json(pending.into_iter().map(Into::into).collect()))
}

// ── PUT /users/{user_id}/approve ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveUserRequest {
    pub action: ResolveAction,
}

pub async fn resolve_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ResolveUserRequest>,
) -> Result<Json<PendingUserResponse>, OnboardingServiceError> {
    if identity.user_role != UserRole::Admin.as_u8() {
        return Err(OnboardingServiceError::Forbidden);
    }
    let admin = Admin {
        user_id: identity.user_id,
        school_id: identity.school_id,
    };
    let usecase = ResolvePendingUserUseCase {
        users: state.user_repo(),
        clock: state.clock(),
    };
    let user = usecase.execute(user_id, &admin, body.action).await?;
    Ok(Json(user.into()))
}
