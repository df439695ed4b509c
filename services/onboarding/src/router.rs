use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::handlers::{
    health::{healthz, readyz},
    school::{regenerate_code, register_school},
    staff::{join_school, list_pending_users, resolve_user},
};
use crate::state::AppState;

/// Tags each request with a fresh UUID in `x-request-id`.
#[derive(Clone, Default)]
struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Schools
        .route("/schools", post(register_school))
        .route("/schools/{school_id}/regenerate-code", post(regenerate_code))
        // Staff onboarding
        .route("/join-school", post(join_school))
        .route("/users/pending", get(list_pending_users))
        .route("/users/{user_id}/approve", put(resolve_user))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
        .with_state(state)
}
