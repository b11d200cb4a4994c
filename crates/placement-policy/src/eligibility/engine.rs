use serde::{Deserialize, Serialize};

use super::domain::{Company, CompanyId, PlacementStats, Student, StudentId};
use super::policy::rules::evaluate_all;
use super::policy::{PolicyConfig, PolicyKind, PolicyVerdict};

pub(crate) const UNPLACED_REASON: &str =
    "Student is not yet placed; no restriction policies apply.";
pub(crate) const UNRESTRICTED_REASON: &str = "No active policy restricts this application.";
const OVERRIDDEN_PREFIX: &str = "Would otherwise be blocked by: ";

/// Everything a single decision reads. Gathered up front; evaluators never fetch.
#[derive(Debug, Clone, Copy)]
pub struct DecisionFacts<'a> {
    pub student: &'a Student,
    pub company: &'a Company,
    pub placement: PlacementStats,
}

/// Stateless decision procedure over one configuration snapshot.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: PolicyConfig,
}

impl EligibilityEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn decide(&self, facts: &DecisionFacts<'_>) -> EligibilityResult {
        let mut result = EligibilityResult::for_pair(facts.student, facts.company);

        if !facts.student.is_placed {
            result.is_eligible = true;
            result.reasons.push(UNPLACED_REASON.to_string());
            return result;
        }

        let verdicts = evaluate_all(&self.config, facts);
        let decision = combine(verdicts);
        result.is_eligible = decision.is_eligible;
        result.reasons = decision.reasons;
        result.policy_specifics = decision.policy_specifics;
        result.verdicts = decision.verdicts;
        result
    }
}

pub(crate) struct CombinedDecision {
    pub(crate) is_eligible: bool,
    pub(crate) reasons: Vec<String>,
    pub(crate) policy_specifics: Option<String>,
    pub(crate) verdicts: Vec<PolicyVerdict>,
}

/// Fold per-policy verdicts into one decision. Any override wins over every block; blocking
/// reasons are kept behind the override reasons so the explanation stays complete.
pub(crate) fn combine(mut verdicts: Vec<PolicyVerdict>) -> CombinedDecision {
    verdicts.sort_by_key(|verdict| verdict.kind);

    let overriding: Vec<&PolicyVerdict> = verdicts
        .iter()
        .filter(|verdict| verdict.applies && verdict.overrides)
        .collect();
    let blocking: Vec<&PolicyVerdict> = verdicts
        .iter()
        .filter(|verdict| verdict.applies && verdict.blocks)
        .collect();

    // Specifics explain a refusal, so an override drops them.
    let policy_specifics = if overriding.is_empty() {
        blocking
            .iter()
            .find(|verdict| verdict.kind == PolicyKind::OfferCategory)
            .and_then(|verdict| verdict.specifics.clone())
    } else {
        None
    };

    let (is_eligible, reasons) = if !overriding.is_empty() {
        let reasons = overriding
            .iter()
            .filter_map(|verdict| verdict.reason.clone())
            .chain(blocking.iter().filter_map(|verdict| {
                verdict
                    .reason
                    .as_ref()
                    .map(|reason| format!("{OVERRIDDEN_PREFIX}{reason}"))
            }))
            .collect();
        (true, reasons)
    } else if !blocking.is_empty() {
        let reasons = blocking
            .iter()
            .filter_map(|verdict| verdict.reason.clone())
            .collect();
        (false, reasons)
    } else {
        (true, vec![UNRESTRICTED_REASON.to_string()])
    };

    CombinedDecision {
        is_eligible,
        reasons,
        policy_specifics,
        verdicts,
    }
}

/// Structured verdict returned to the caller for a student/company pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub student_id: StudentId,
    pub company_id: CompanyId,
    pub student_name: String,
    pub company_name: String,
    pub is_eligible: bool,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_specifics: Option<String>,
    /// Per-policy verdicts in catalog order, for audit trails.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verdicts: Vec<PolicyVerdict>,
}

impl EligibilityResult {
    fn for_pair(student: &Student, company: &Company) -> Self {
        Self {
            student_id: student.id,
            company_id: company.id.clone(),
            student_name: student.name.clone(),
            company_name: company.name.clone(),
            is_eligible: false,
            reasons: Vec::new(),
            policy_specifics: None,
            verdicts: Vec::new(),
        }
    }
}
