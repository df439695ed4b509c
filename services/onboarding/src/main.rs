use sea_orm::Database;
use tracing::info;

use campus_onboarding::config::OnboardingConfig;
use campus_onboarding::router::build_router;
use campus_onboarding::state::AppState;

#[tokio::main]
async fn main() {
    campus_core::tracing::init_tracing();

    let config = OnboardingConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.onboarding_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("onboarding service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
