use serde::{Deserialize, Serialize};

/// The six placement policy blocks. A block missing from a payload deserializes as disabled
/// with zeroed parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    #[serde(default)]
    pub maximum_companies: MaximumCompaniesPolicy,
    #[serde(default)]
    pub dream_offer: DreamOfferPolicy,
    #[serde(default)]
    pub dream_company: DreamCompanyPolicy,
    #[serde(default)]
    pub cgpa_threshold: CgpaThresholdPolicy,
    #[serde(default)]
    pub placement_percentage: PlacementPercentagePolicy,
    #[serde(default)]
    pub offer_category: OfferCategoryPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaximumCompaniesPolicy {
    pub enabled: bool,
    /// Applications allowed once placed; 0 forbids any further application.
    #[serde(rename = "maxN")]
    pub max_n: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DreamOfferPolicy {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DreamCompanyPolicy {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CgpaThresholdPolicy {
    pub enabled: bool,
    #[serde(rename = "minimumCGPA")]
    pub minimum_cgpa: f64,
    pub high_salary_threshold: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementPercentagePolicy {
    pub enabled: bool,
    pub target_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferCategoryPolicy {
    pub enabled: bool,
    pub l1_threshold_amount: f64,
    pub l2_threshold_amount: f64,
    pub required_hike_percentage: f64,
}

impl PolicyConfig {
    /// Configuration the service starts with before anyone edits it.
    pub fn standard() -> Self {
        Self {
            maximum_companies: MaximumCompaniesPolicy {
                enabled: true,
                max_n: 5,
            },
            dream_offer: DreamOfferPolicy { enabled: true },
            dream_company: DreamCompanyPolicy { enabled: true },
            cgpa_threshold: CgpaThresholdPolicy {
                enabled: true,
                minimum_cgpa: 7.0,
                high_salary_threshold: 1_200_000.0,
            },
            placement_percentage: PlacementPercentagePolicy {
                enabled: false,
                target_percentage: 80.0,
            },
            offer_category: OfferCategoryPolicy {
                enabled: true,
                l1_threshold_amount: 2_000_000.0,
                l2_threshold_amount: 1_000_000.0,
                required_hike_percentage: 30.0,
            },
        }
    }

    /// Check every block, enabled or not. The whole document is rejected on the first
    /// out-of-range parameter; nothing is clamped.
    pub fn validate(&self) -> Result<(), PolicyConfigError> {
        if self.maximum_companies.max_n < 0 {
            return Err(PolicyConfigError::NegativeMaxCompanies(
                self.maximum_companies.max_n,
            ));
        }

        let cgpa = &self.cgpa_threshold;
        finite("cgpaThreshold.minimumCGPA", cgpa.minimum_cgpa)?;
        finite(
            "cgpaThreshold.highSalaryThreshold",
            cgpa.high_salary_threshold,
        )?;
        if !(0.0..=10.0).contains(&cgpa.minimum_cgpa) {
            return Err(PolicyConfigError::CgpaOutOfRange(cgpa.minimum_cgpa));
        }
        if cgpa.high_salary_threshold < 0.0 {
            return Err(PolicyConfigError::NegativeSalaryThreshold(
                cgpa.high_salary_threshold,
            ));
        }

        let target = self.placement_percentage.target_percentage;
        finite("placementPercentage.targetPercentage", target)?;
        if !(0.0..=100.0).contains(&target) {
            return Err(PolicyConfigError::TargetPercentageOutOfRange(target));
        }

        let category = &self.offer_category;
        finite(
            "offerCategory.l1ThresholdAmount",
            category.l1_threshold_amount,
        )?;
        finite(
            "offerCategory.l2ThresholdAmount",
            category.l2_threshold_amount,
        )?;
        finite(
            "offerCategory.requiredHikePercentage",
            category.required_hike_percentage,
        )?;
        if category.l2_threshold_amount < 0.0 {
            return Err(PolicyConfigError::NegativeTierThreshold(
                category.l2_threshold_amount,
            ));
        }
        if category.l1_threshold_amount < category.l2_threshold_amount {
            return Err(PolicyConfigError::TierThresholdsInverted {
                l1: category.l1_threshold_amount,
                l2: category.l2_threshold_amount,
            });
        }
        if category.required_hike_percentage < 0.0 {
            return Err(PolicyConfigError::NegativeHikePercentage(
                category.required_hike_percentage,
            ));
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), PolicyConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PolicyConfigError::NonFiniteParameter { field })
    }
}

/// Reasons a policy document is refused at write time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("maximumCompanies.maxN must be zero or greater (found {0})")]
    NegativeMaxCompanies(i64),
    #[error("cgpaThreshold.minimumCGPA must be between 0 and 10 (found {0})")]
    CgpaOutOfRange(f64),
    #[error("cgpaThreshold.highSalaryThreshold must be zero or greater (found {0})")]
    NegativeSalaryThreshold(f64),
    #[error("placementPercentage.targetPercentage must be between 0 and 100 (found {0})")]
    TargetPercentageOutOfRange(f64),
    #[error("offerCategory thresholds must be zero or greater (found {0})")]
    NegativeTierThreshold(f64),
    #[error("offerCategory.l1ThresholdAmount ({l1}) must not be below l2ThresholdAmount ({l2})")]
    TierThresholdsInverted { l1: f64, l2: f64 },
    #[error("offerCategory.requiredHikePercentage must be zero or greater (found {0})")]
    NegativeHikePercentage(f64),
    #[error("{field} must be a finite number")]
    NonFiniteParameter { field: &'static str },
}
