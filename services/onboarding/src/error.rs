use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Onboarding service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error("invalid or expired join code")]
    CodeInvalid,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("school not found")]
    SchoolNotFound,
    #[error("user already resolved")]
    AlreadyResolved,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("school name already exists")]
    SchoolNameTaken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl OnboardingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CodeInvalid => "CODE_INVALID",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SchoolNotFound => "SCHOOL_NOT_FOUND",
            Self::AlreadyResolved => "ALREADY_RESOLVED",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::SchoolNameTaken => "SCHOOL_NAME_TAKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for OnboardingServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CodeInvalid => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::SchoolNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyResolved | Self::EmailAlreadyRegistered | Self::SchoolNameTaken => {
                StatusCode::CONFLICT
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s are logged here; TraceLayer covers the rest.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
