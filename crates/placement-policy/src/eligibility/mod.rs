//! Post-placement application eligibility.
//!
//! A decision takes one student, one company, the current policy document, and the campus
//! placement counts, runs the six catalog policies, and folds their verdicts into a single
//! eligible / not eligible answer with a reason trail. Overriding policies (dream offer, dream
//! company) win over every blocking policy; the blocks are still reported.

pub mod domain;
pub mod engine;
pub mod policy;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Company, CompanyId, NewStudent, OfferTier, PlacementStats, Student, StudentId,
    StudentValidationError, StudentView,
};
pub use engine::{DecisionFacts, EligibilityEngine, EligibilityResult};
pub use policy::{
    CgpaThresholdPolicy, DreamCompanyPolicy, DreamOfferPolicy, MaximumCompaniesPolicy,
    OfferCategoryPolicy, PlacementPercentagePolicy, PolicyConfig, PolicyConfigError, PolicyKind,
    PolicyVerdict,
};
pub use repository::{PlacementRepository, PolicyStore, RepositoryError};
pub use roster::{RosterImportError, RosterImporter};
pub use router::{eligibility_router, EligibilityCheckRequest};
pub use service::{EligibilityBatch, EligibilityService, EligibilityServiceError};
