use chrono::Duration;
use uuid::Uuid;

use campus_onboarding::domain::types::Admin;
use campus_onboarding::error::OnboardingServiceError;
use campus_onboarding::usecase::join_code::{
    IssueJoinCodeUseCase, RegenerateJoinCodeUseCase, validate_code,
};

use crate::helpers::{InMemorySchoolRepo, MutableClock, SeqCodeGenerator, t0, test_school};

#[tokio::test]
async fn should_leave_exactly_one_active_code_after_issue() {
    let school = test_school("North High", "00000", t0());
    let school_id = school.id;
    let schools = InMemorySchoolRepo::new(vec![school]);
    let clock = MutableClock::at(t0());

    let uc = IssueJoinCodeUseCase {
        schools: schools.clone(),
        clock: clock.clone(),
        codegen: SeqCodeGenerator::new(&["72391"]),
    };
    uc.execute(school_id).await.unwrap();

    // The new code resolves to the school; the previous one is gone.
    assert_eq!(
        validate_code(&schools, &clock, "72391").await.unwrap(),
        school_id
    );
    assert!(matches!(
        validate_code(&schools, &clock, "00000").await,
        Err(OnboardingServiceError::CodeInvalid)
    ));

    let stored = schools.schools.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].join_code.code, "72391");
    assert_eq!(stored[0].join_code.expires_at, t0() + Duration::days(3));
}

#[tokio::test]
async fn should_invalidate_each_previous_code_across_two_regenerates() {
    let school = test_school("North High", "72391", t0());
    let school_id = school.id;
    let admin = Admin {
        user_id: Uuid::now_v7(),
        school_id,
    };
    let schools = InMemorySchoolRepo::new(vec![school]);
    let clock = MutableClock::at(t0());

    let uc = RegenerateJoinCodeUseCase {
        schools: schools.clone(),
        clock: clock.clone(),
        codegen: SeqCodeGenerator::new(&["10458", "90210"]),
    };

    uc.execute(school_id, &admin).await.unwrap();
    uc.execute(school_id, &admin).await.unwrap();

    // Both superseded codes fail well within their own expiry windows.
    for stale in ["72391", "10458"] {
        assert!(matches!(
            validate_code(&schools, &clock, stale).await,
            Err(OnboardingServiceError::CodeInvalid)
        ));
    }
    assert_eq!(
        validate_code(&schools, &clock, "90210").await.unwrap(),
        school_id
    );
}

#[tokio::test]
async fn should_reject_expired_code_even_when_other_schools_hold_fresh_ones() {
    let stale = test_school("North High", "72391", t0() - Duration::days(4));
    let fresh = test_school("South High", "10458", t0());
    let fresh_id = fresh.id;
    let schools = InMemorySchoolRepo::new(vec![stale, fresh]);
    let clock = MutableClock::at(t0());

    assert!(matches!(
        validate_code(&schools, &clock, "72391").await,
        Err(OnboardingServiceError::CodeInvalid)
    ));
    assert_eq!(
        validate_code(&schools, &clock, "10458").await.unwrap(),
        fresh_id
    );
}

#[tokio::test]
async fn should_skip_codes_held_by_other_schools_when_issuing() {
    let school = test_school("North High", "00000", t0());
    let school_id = school.id;
    let other = test_school("South High", "72391", t0());
    let schools = InMemorySchoolRepo::new(vec![school, other]);
    let clock = MutableClock::at(t0());

    let uc = IssueJoinCodeUseCase {
        schools: schools.clone(),
        clock: clock.clone(),
        codegen: SeqCodeGenerator::new(&["72391", "10458"]),
    };

    let issued = uc.execute(school_id).await.unwrap();
    assert_eq!(issued.code, "10458");
}
