pub mod join_code;
pub mod onboarding;
pub mod school;
