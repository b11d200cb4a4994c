use std::sync::Arc;

use super::common::*;
use crate::eligibility::domain::{CompanyId, NewStudent, OfferTier, StudentId};
use crate::eligibility::policy::{PolicyConfig, PolicyConfigError};
use crate::eligibility::repository::RepositoryError;
use crate::eligibility::{
    EligibilityService, EligibilityServiceError, PolicyStore, StudentValidationError,
};

fn acme() -> CompanyId {
    CompanyId("acme".to_string())
}

#[test]
fn decide_reports_unknown_student_and_company() {
    let (service, _, _) = build_service(PolicyConfig::standard());

    match service.decide(StudentId(404), &acme()) {
        Err(EligibilityServiceError::StudentNotFound(StudentId(404))) => {}
        other => panic!("expected missing student, got {other:?}"),
    }

    match service.decide(StudentId(1), &CompanyId("globex".to_string())) {
        Err(EligibilityServiceError::CompanyNotFound(id)) => assert_eq!(id.0, "globex"),
        other => panic!("expected missing company, got {other:?}"),
    }
}

#[test]
fn decide_reads_the_config_current_at_decision_time() {
    let (service, _, _) = build_service(PolicyConfig::standard());

    let before = service
        .decide(StudentId(3), &acme())
        .expect("decision succeeds");
    assert!(!before.is_eligible);
    assert!(before.reasons[0].contains("Maximum Companies"));

    let mut relaxed = PolicyConfig::standard();
    relaxed.maximum_companies.max_n = 10;
    service
        .update_policy_config(relaxed)
        .expect("valid config accepted");

    let after = service
        .decide(StudentId(3), &acme())
        .expect("decision succeeds");
    assert!(after.is_eligible);
    assert_eq!(after.student_name, "Student 3");
    assert_eq!(after.company_name, "Acme Corp");
}

#[test]
fn invalid_config_is_rejected_without_touching_the_current_one() {
    let (service, _, policies) = build_service(PolicyConfig::standard());

    let mut inverted = PolicyConfig::standard();
    inverted.offer_category.l1_threshold_amount = 500_000.0;

    match service.update_policy_config(inverted) {
        Err(EligibilityServiceError::InvalidConfig(PolicyConfigError::TierThresholdsInverted {
            ..
        })) => {}
        other => panic!("expected inverted tiers, got {other:?}"),
    }

    assert_eq!(
        policies.load().expect("config readable"),
        PolicyConfig::standard()
    );
}

#[test]
fn eligible_students_are_ordered_and_repeatable() {
    let mut config = PolicyConfig::standard();
    config.placement_percentage.enabled = true;
    config.placement_percentage.target_percentage = 50.0;
    let (service, _, _) = build_service(config);

    let first = service
        .eligible_students(&acme())
        .expect("projection succeeds");
    let second = service
        .eligible_students(&acme())
        .expect("projection succeeds");

    let ids: Vec<u64> = first.students.iter().map(|student| student.id.0).collect();
    assert_eq!(ids, vec![1, 2, 5]);
    assert_eq!(first.students, second.students);
    assert_eq!(first.placement.placed, 3);
    assert_eq!(first.placement.total, 5);
    assert_eq!(first.company.name, "Acme Corp");
}

#[test]
fn eligible_students_reads_placement_stats_once_per_batch() {
    let mut config = PolicyConfig::standard();
    config.placement_percentage.enabled = true;
    let (service, repository, _) = build_service(config);

    service
        .eligible_students(&acme())
        .expect("projection succeeds");

    assert_eq!(repository.stats_reads(), 1);
}

#[test]
fn placement_target_above_campus_rate_restricts_placed_students() {
    let mut config = PolicyConfig::standard();
    config.placement_percentage.enabled = true;
    config.placement_percentage.target_percentage = 80.0;
    let (service, _, _) = build_service(config);

    let batch = service
        .eligible_students(&acme())
        .expect("projection succeeds");

    let ids: Vec<u64> = batch.students.iter().map(|student| student.id.0).collect();
    assert_eq!(ids, vec![2, 5]);
}

#[test]
fn dream_company_lifts_an_l1_student_into_the_batch() {
    let (service, _, _) = build_service(PolicyConfig::standard());

    let batch = service
        .eligible_students(&CompanyId("initech".to_string()))
        .expect("projection succeeds");

    assert!(batch
        .students
        .iter()
        .any(|student| student.id == StudentId(4)));
}

#[test]
fn eligible_students_for_unknown_company_fails() {
    let (service, _, _) = build_service(PolicyConfig::standard());

    match service.eligible_students(&CompanyId("nope".to_string())) {
        Err(EligibilityServiceError::CompanyNotFound(_)) => {}
        other => panic!("expected missing company, got {other:?}"),
    }
}

#[test]
fn create_student_validates_and_assigns_the_next_id() {
    let (service, _, _) = build_service(PolicyConfig::standard());

    let mut candidate = NewStudent {
        name: "  ".to_string(),
        cgpa: 8.2,
        is_placed: true,
        current_salary: 1_200_000.0,
        companies_applied: 1,
        dream_offer: 0.0,
        dream_company: String::new(),
    };

    match service.create_student(candidate.clone()) {
        Err(EligibilityServiceError::InvalidStudent(StudentValidationError::MissingName)) => {}
        other => panic!("expected missing name, got {other:?}"),
    }

    candidate.name = "Priya Nair".to_string();
    let created = service.create_student(candidate).expect("student created");

    assert_eq!(created.student.id, StudentId(6));
    assert_eq!(created.current_offer_category, Some(OfferTier::L2));
    assert_eq!(service.students().expect("listing").len(), 6);
}

#[test]
fn student_view_only_reports_category_while_policy_enabled() {
    let mut config = PolicyConfig::standard();
    let (service, _, _) = build_service(config.clone());

    let view = service.student(StudentId(4)).expect("student exists");
    assert_eq!(view.current_offer_category, Some(OfferTier::L1));

    let unplaced = service.student(StudentId(2)).expect("student exists");
    assert!(unplaced.current_offer_category.is_none());

    config.offer_category.enabled = false;
    service.update_policy_config(config).expect("valid config");
    let view = service.student(StudentId(4)).expect("student exists");
    assert!(view.current_offer_category.is_none());
}

#[test]
fn repository_failures_surface_without_a_verdict() {
    let service = EligibilityService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryPolicies::new(PolicyConfig::standard())),
    );

    match service.decide(StudentId(1), &acme()) {
        Err(EligibilityServiceError::Repository(RepositoryError::Unavailable(message))) => {
            assert!(message.contains("offline"));
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
}
