use super::super::domain::{hundredths, OfferTier};
use super::super::engine::DecisionFacts;
use super::config::{
    CgpaThresholdPolicy, DreamCompanyPolicy, DreamOfferPolicy, MaximumCompaniesPolicy,
    OfferCategoryPolicy, PlacementPercentagePolicy, PolicyConfig,
};
use super::{PolicyKind, PolicyVerdict};

/// Run every evaluator in catalog order.
pub(crate) fn evaluate_all(config: &PolicyConfig, facts: &DecisionFacts<'_>) -> Vec<PolicyVerdict> {
    vec![
        maximum_companies(&config.maximum_companies, facts),
        dream_offer(&config.dream_offer, facts),
        dream_company(&config.dream_company, facts),
        cgpa_threshold(&config.cgpa_threshold, facts),
        placement_percentage(&config.placement_percentage, facts),
        offer_category(&config.offer_category, facts),
    ]
}

pub(crate) fn maximum_companies(
    policy: &MaximumCompaniesPolicy,
    facts: &DecisionFacts<'_>,
) -> PolicyVerdict {
    let kind = PolicyKind::MaximumCompanies;
    if !policy.enabled {
        return PolicyVerdict::not_applicable(kind);
    }

    let applied = i64::from(facts.student.companies_applied);
    if policy.max_n == 0 {
        return PolicyVerdict::block(
            kind,
            "Blocked by Maximum Companies Policy: already placed and 0 additional applications allowed.",
        );
    }
    if applied >= policy.max_n {
        return PolicyVerdict::block(
            kind,
            format!(
                "Blocked by Maximum Companies Policy: already applied to {applied} companies, max allowed is {}.",
                policy.max_n
            ),
        );
    }

    PolicyVerdict::neutral(kind)
}

pub(crate) fn dream_offer(policy: &DreamOfferPolicy, facts: &DecisionFacts<'_>) -> PolicyVerdict {
    let kind = PolicyKind::DreamOffer;
    let dream_offer = facts.student.dream_offer;
    if !policy.enabled || dream_offer <= 0.0 {
        return PolicyVerdict::not_applicable(kind);
    }

    let offered = facts.company.offered_salary;
    if offered >= dream_offer {
        PolicyVerdict::allow_override(
            kind,
            format!(
                "Allowed by Dream Offer Policy: company salary ({offered:.2}) meets or exceeds the student's dream offer ({dream_offer:.2})."
            ),
        )
    } else {
        PolicyVerdict::neutral(kind)
    }
}

pub(crate) fn dream_company(
    policy: &DreamCompanyPolicy,
    facts: &DecisionFacts<'_>,
) -> PolicyVerdict {
    let kind = PolicyKind::DreamCompany;
    if !policy.enabled || !facts.student.has_dream_company() {
        return PolicyVerdict::not_applicable(kind);
    }

    let company_name = facts.company.name.trim();
    let dream_company = facts.student.dream_company.trim();
    if company_name.to_lowercase() == dream_company.to_lowercase() {
        PolicyVerdict::allow_override(
            kind,
            format!(
                "Allowed by Dream Company Policy: {company_name} is the student's declared dream company."
            ),
        )
    } else {
        PolicyVerdict::neutral(kind)
    }
}

pub(crate) fn cgpa_threshold(
    policy: &CgpaThresholdPolicy,
    facts: &DecisionFacts<'_>,
) -> PolicyVerdict {
    let kind = PolicyKind::CgpaThreshold;
    let offered = facts.company.offered_salary;
    if !policy.enabled || offered < policy.high_salary_threshold {
        return PolicyVerdict::not_applicable(kind);
    }

    let cgpa = facts.student.cgpa;
    if hundredths(cgpa) < hundredths(policy.minimum_cgpa) {
        PolicyVerdict::block(
            kind,
            format!(
                "Blocked by CGPA Threshold Policy: CGPA ({cgpa:.2}) is below the minimum ({:.2}) for high-paying offers ({offered:.2} at or above {:.2}).",
                policy.minimum_cgpa, policy.high_salary_threshold
            ),
        )
    } else {
        PolicyVerdict::neutral(kind)
    }
}

pub(crate) fn placement_percentage(
    policy: &PlacementPercentagePolicy,
    facts: &DecisionFacts<'_>,
) -> PolicyVerdict {
    let kind = PolicyKind::PlacementPercentage;
    if !policy.enabled {
        return PolicyVerdict::not_applicable(kind);
    }

    if facts.placement.meets_target(policy.target_percentage) {
        return PolicyVerdict::neutral(kind);
    }

    PolicyVerdict::block(
        kind,
        format!(
            "Blocked by Placement Percentage Policy: current overall placement ({:.2}%, {} of {} students) is below the target ({:.2}%).",
            facts.placement.percentage(),
            facts.placement.placed,
            facts.placement.total,
            policy.target_percentage
        ),
    )
}

pub(crate) fn offer_category(
    policy: &OfferCategoryPolicy,
    facts: &DecisionFacts<'_>,
) -> PolicyVerdict {
    let kind = PolicyKind::OfferCategory;
    if !policy.enabled {
        return PolicyVerdict::not_applicable(kind);
    }

    let current = facts.student.current_salary;
    let tier = OfferTier::classify(current, policy);
    match tier {
        OfferTier::L1 => PolicyVerdict::block(
            kind,
            format!(
                "Blocked by Offer Category Policy: {} placed students cannot apply to any other companies.",
                tier.label()
            ),
        )
        .with_specifics(format!(
            "Tier {}: current salary {current:.2} is at or above the L1 threshold {:.2}.",
            tier.label(),
            policy.l1_threshold_amount
        )),
        OfferTier::L2 => {
            let offered = facts.company.offered_salary;
            let hike = policy.required_hike_percentage;
            if offered * 100.0 >= current * (100.0 + hike) {
                return PolicyVerdict::neutral(kind);
            }

            let required = current * (100.0 + hike) / 100.0;
            let actual_hike = if current > 0.0 {
                (offered - current) * 100.0 / current
            } else {
                0.0
            };
            PolicyVerdict::block(
                kind,
                format!(
                    "Blocked by Offer Category Policy ({}): company salary ({offered:.2}) does not meet the required {hike:.2}% hike over current salary ({current:.2}).",
                    tier.label()
                ),
            )
            .with_specifics(format!(
                "Tier {}: current salary {current:.2} between {:.2} and {:.2}; offer {offered:.2} is a {actual_hike:.2}% hike, required {hike:.2}% (at least {required:.2}).",
                tier.label(),
                policy.l2_threshold_amount, policy.l1_threshold_amount
            ))
        }
        OfferTier::L3 => PolicyVerdict::neutral(kind),
    }
}
