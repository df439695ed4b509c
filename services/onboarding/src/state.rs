use sea_orm::DatabaseConnection;

use crate::infra::clock::SystemClock;
use crate::infra::codegen::RandCodeGenerator;
use crate::infra::db::{DbSchoolRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn school_repo(&self) -> DbSchoolRepository {
        DbSchoolRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }

    pub fn codegen(&self) -> RandCodeGenerator {
        RandCodeGenerator
    }
}
