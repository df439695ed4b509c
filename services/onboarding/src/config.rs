/// Onboarding service configuration loaded from environment variables.
#[derive(Debug)]
pub struct OnboardingConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `ONBOARDING_PORT`.
    pub onboarding_port: u16,
}

impl OnboardingConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            onboarding_port: std::env::var("ONBOARDING_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
        }
    }
}
