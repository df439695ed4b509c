use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use campus_onboarding::domain::repository::{
    Clock, CodeGenerator, SchoolRepository, UserRepository,
};
use campus_onboarding::domain::types::{
    JOIN_CODE_TTL_DAYS, JoinCode, School, User, UserRole, UserStatus,
};
use campus_onboarding::error::OnboardingServiceError;

// ── InMemorySchoolRepo ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemorySchoolRepo {
    pub schools: Arc<Mutex<Vec<School>>>,
}

impl InMemorySchoolRepo {
    pub fn new(schools: Vec<School>) -> Self {
        Self {
            schools: Arc::new(Mutex::new(schools)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl SchoolRepository for InMemorySchoolRepo {
    async fn create(&self, school: &School) -> Result<(), OnboardingServiceError> {
        self.schools.lock().unwrap().push(school.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, OnboardingServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, OnboardingServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn is_abbreviation_taken(
        &self,
        abbreviation: &str,
    ) -> Result<bool, OnboardingServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.abbreviation == abbreviation))
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<(Uuid, JoinCode)>, OnboardingServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.join_code.code == code)
            .map(|s| (s.id, s.join_code.clone())))
    }

    async fn is_code_taken(
        &self,
        code: &str,
        exclude_school: Option<Uuid>,
    ) -> Result<bool, OnboardingServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.join_code.code == code && Some(s.id) != exclude_school))
    }

    async fn replace_code(
        &self,
        school_id: Uuid,
        code: &JoinCode,
    ) -> Result<bool, OnboardingServiceError> {
        let mut schools = self.schools.lock().unwrap();
        match schools.iter_mut().find(|s| s.id == school_id) {
            Some(school) => {
                school.join_code = code.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── InMemoryUserRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepo {
    pub fn empty() -> Self {
        Self {
            users: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl UserRepository for InMemoryUserRepo {
    async fn create(&self, user: &User) -> Result<(), OnboardingServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, OnboardingServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, OnboardingServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_pending(&self, school_id: Uuid) -> Result<Vec<User>, OnboardingServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.school_id == school_id && u.status == UserStatus::Pending)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: UserStatus,
        new: UserStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, OnboardingServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id && u.status == expected) {
            Some(user) => {
                user.status = new;
                user.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Clock and code generator doubles ─────────────────────────────────────────

/// Settable clock shared across usecases in a scenario.
#[derive(Clone)]
pub struct MutableClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MutableClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for MutableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Returns scripted codes in order; repeats the last one when exhausted.
#[derive(Clone)]
pub struct SeqCodeGenerator {
    codes: Arc<Mutex<VecDeque<String>>>,
    last: String,
}

impl SeqCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes.iter().map(|c| (*c).to_owned()).collect())),
            last: codes.last().map(|c| (*c).to_owned()).unwrap_or_default(),
        }
    }
}

impl CodeGenerator for SeqCodeGenerator {
    fn random_digits(&self, _len: usize) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.clone())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()
}

pub fn test_school(name: &str, code: &str, issued_at: DateTime<Utc>) -> School {
    School {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        abbreviation: name.to_owned(),
        join_code: JoinCode {
            code: code.to_owned(),
            issued_at,
            expires_at: issued_at + Duration::days(JOIN_CODE_TTL_DAYS),
        },
        created_at: issued_at,
        updated_at: issued_at,
    }
}

pub fn staff_user(school_id: Uuid, email: &str, status: UserStatus) -> User {
    User {
        id: Uuid::now_v7(),
        school_id,
        name: "staff member".to_owned(),
        email: email.to_owned(),
        password_hash: "$2b$12$hash".to_owned(),
        role: UserRole::Staff,
        status,
        created_at: t0(),
        updated_at: t0(),
    }
}
