mod config;
pub(crate) mod rules;

pub use config::{
    CgpaThresholdPolicy, DreamCompanyPolicy, DreamOfferPolicy, MaximumCompaniesPolicy,
    OfferCategoryPolicy, PlacementPercentagePolicy, PolicyConfig, PolicyConfigError,
};

use serde::{Deserialize, Serialize};

/// Policy kinds in catalog order. `Ord` follows that order and drives reason ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyKind {
    MaximumCompanies,
    DreamOffer,
    DreamCompany,
    CgpaThreshold,
    PlacementPercentage,
    OfferCategory,
}

impl PolicyKind {
    pub const CATALOG: [PolicyKind; 6] = [
        PolicyKind::MaximumCompanies,
        PolicyKind::DreamOffer,
        PolicyKind::DreamCompany,
        PolicyKind::CgpaThreshold,
        PolicyKind::PlacementPercentage,
        PolicyKind::OfferCategory,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PolicyKind::MaximumCompanies => "Maximum Companies",
            PolicyKind::DreamOffer => "Dream Offer",
            PolicyKind::DreamCompany => "Dream Company",
            PolicyKind::CgpaThreshold => "CGPA Threshold",
            PolicyKind::PlacementPercentage => "Placement Percentage",
            PolicyKind::OfferCategory => "Offer Category",
        }
    }
}

/// Outcome of a single policy for one student/company pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVerdict {
    pub kind: PolicyKind,
    pub applies: bool,
    pub blocks: bool,
    pub overrides: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Extra detail about the computation, e.g. the tier and hike arithmetic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifics: Option<String>,
}

impl PolicyVerdict {
    /// The policy is disabled or its preconditions are not met.
    pub fn not_applicable(kind: PolicyKind) -> Self {
        Self {
            kind,
            applies: false,
            blocks: false,
            overrides: false,
            reason: None,
            specifics: None,
        }
    }

    /// The policy was considered and neither blocks nor overrides.
    pub fn neutral(kind: PolicyKind) -> Self {
        Self {
            applies: true,
            ..Self::not_applicable(kind)
        }
    }

    pub fn block(kind: PolicyKind, reason: impl Into<String>) -> Self {
        Self {
            blocks: true,
            reason: Some(reason.into()),
            ..Self::neutral(kind)
        }
    }

    pub fn allow_override(kind: PolicyKind, reason: impl Into<String>) -> Self {
        Self {
            overrides: true,
            reason: Some(reason.into()),
            ..Self::neutral(kind)
        }
    }

    pub fn with_specifics(mut self, specifics: impl Into<String>) -> Self {
        self.specifics = Some(specifics.into());
        self
    }
}
