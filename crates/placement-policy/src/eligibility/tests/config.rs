use crate::eligibility::policy::{PolicyConfig, PolicyConfigError};

#[test]
fn standard_config_is_valid() {
    assert!(PolicyConfig::standard().validate().is_ok());
    assert!(PolicyConfig::default().validate().is_ok());
}

#[test]
fn omitted_blocks_deserialize_as_disabled_with_zero_parameters() {
    let config: PolicyConfig = serde_json::from_str(
        r#"{"cgpaThreshold": {"enabled": true, "minimumCGPA": 7.5, "highSalaryThreshold": 1500000}}"#,
    )
    .expect("partial document parses");

    assert!(config.cgpa_threshold.enabled);
    assert_eq!(config.cgpa_threshold.minimum_cgpa, 7.5);
    assert!(!config.maximum_companies.enabled);
    assert_eq!(config.maximum_companies.max_n, 0);
    assert!(!config.offer_category.enabled);
    assert_eq!(config.offer_category.l1_threshold_amount, 0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn wire_names_match_the_policy_form() {
    let value = serde_json::to_value(PolicyConfig::standard()).expect("serializes");

    assert_eq!(value["maximumCompanies"]["maxN"], 5);
    assert_eq!(value["cgpaThreshold"]["minimumCGPA"], 7.0);
    assert_eq!(value["cgpaThreshold"]["highSalaryThreshold"], 1_200_000.0);
    assert_eq!(value["placementPercentage"]["targetPercentage"], 80.0);
    assert_eq!(value["offerCategory"]["requiredHikePercentage"], 30.0);
    assert_eq!(value["dreamCompany"]["enabled"], true);
}

#[test]
fn out_of_range_parameters_are_refused() {
    let mut config = PolicyConfig::standard();
    config.maximum_companies.max_n = -2;
    assert_eq!(
        config.validate(),
        Err(PolicyConfigError::NegativeMaxCompanies(-2))
    );

    let mut config = PolicyConfig::standard();
    config.cgpa_threshold.minimum_cgpa = 10.5;
    assert_eq!(config.validate(), Err(PolicyConfigError::CgpaOutOfRange(10.5)));

    let mut config = PolicyConfig::standard();
    config.placement_percentage.target_percentage = 120.0;
    assert_eq!(
        config.validate(),
        Err(PolicyConfigError::TargetPercentageOutOfRange(120.0))
    );

    let mut config = PolicyConfig::standard();
    config.offer_category.required_hike_percentage = -5.0;
    assert_eq!(
        config.validate(),
        Err(PolicyConfigError::NegativeHikePercentage(-5.0))
    );
}

#[test]
fn disabled_blocks_are_still_validated() {
    let mut config = PolicyConfig::standard();
    config.offer_category.enabled = false;
    config.offer_category.l1_threshold_amount = 100.0;
    config.offer_category.l2_threshold_amount = 200.0;

    assert_eq!(
        config.validate(),
        Err(PolicyConfigError::TierThresholdsInverted {
            l1: 100.0,
            l2: 200.0
        })
    );
}

#[test]
fn non_finite_parameters_are_refused() {
    let mut config = PolicyConfig::standard();
    config.cgpa_threshold.high_salary_threshold = f64::INFINITY;

    assert!(matches!(
        config.validate(),
        Err(PolicyConfigError::NonFiniteParameter { field }) if field.contains("highSalaryThreshold")
    ));
}
