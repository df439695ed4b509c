use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::identity::IdentityHeaders;

use crate::domain::types::{Admin, UserRole};
use crate::error::OnboardingServiceError;
use crate::infra::password::hash_password;
use crate::state::AppState;
use crate::usecase::join_code::RegenerateJoinCodeUseCase;
use crate::usecase::school::{RegisterSchoolInput, RegisterSchoolUseCase};

// ── POST /schools ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdminAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterSchoolRequest {
    pub school_name: String,
    pub admin: AdminAccountRequest,
}

#[derive(Serialize)]
pub struct RegisterSchoolResponse {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub join_code: String,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub code_expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn register_school(
    State(state): State<AppState>,
    Json(body): Json<RegisterSchoolRequest>,
) -> Result<(StatusCode, Json<RegisterSchoolResponse>), OnboardingServiceError> {
    let password_hash = hash_password(&body.admin.password)?;
    let usecase = RegisterSchoolUseCase {
        schools: state.school_repo(),
        users: state.user_repo(),
        clock: state.clock(),
        codegen: state.codegen(),
    };
    let registered = usecase
        .execute(RegisterSchoolInput {
            school_name: body.school_name,
            admin_name: body.admin.name,
            admin_email: body.admin.email,
            admin_password_hash: password_hash,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterSchoolResponse {
            id: registered.school.id.to_string(),
            name: registered.school.name,
            abbreviation: registered.school.abbreviation,
            join_code: registered.school.join_code.code,
            code_expires_at: registered.school.join_code.expires_at,
        }),
    ))
}

// ── POST /schools/{school_id}/regenerate-code ────────────────────────────────

#[derive(Serialize)]
pub struct RegenerateCodeResponse {
    pub join_code: String,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub code_expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn regenerate_code(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<RegenerateCodeResponse>, OnboardingServiceError> {
    if identity.user_role != UserRole::Admin.as_u8() {
        return Err(OnboardingServiceError::Forbidden);
    }
    let admin = Admin {
        user_id: identity.user_id,
        school_id: identity.school_id,
    };
    let usecase = RegenerateJoinCodeUseCase {
        schools: state.school_repo(),
        clock: state.clock(),
        codegen: state.codegen(),
    };
    let reissued = usecase.execute(school_id, &admin).await?;
    Ok(Json(RegenerateCodeResponse {
        join_code: reissued.code,
        code_expires_at: reissued.expires_at,
    }))
}
