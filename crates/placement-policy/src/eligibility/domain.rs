use std::fmt;

use serde::{Deserialize, Serialize};

use super::policy::OfferCategoryPolicy;

/// Identifier wrapper for students. Ordering follows the numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for companies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub String);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only snapshot of a student as served by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub cgpa: f64,
    pub is_placed: bool,
    #[serde(default)]
    pub current_salary: f64,
    #[serde(default)]
    pub companies_applied: u32,
    #[serde(default)]
    pub dream_offer: f64,
    #[serde(default)]
    pub dream_company: String,
}

impl Student {
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_fields(
            &self.name,
            self.cgpa,
            self.current_salary,
            self.dream_offer,
        )
    }

    /// Tier of the student's current offer, if they hold one.
    pub fn offer_tier(&self, policy: &OfferCategoryPolicy) -> Option<OfferTier> {
        self.is_placed
            .then(|| OfferTier::classify(self.current_salary, policy))
    }

    pub fn has_dream_company(&self) -> bool {
        !self.dream_company.trim().is_empty()
    }
}

/// Creation payload for a student; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub cgpa: f64,
    #[serde(default)]
    pub is_placed: bool,
    #[serde(default)]
    pub current_salary: f64,
    #[serde(default)]
    pub companies_applied: u32,
    #[serde(default)]
    pub dream_offer: f64,
    #[serde(default)]
    pub dream_company: String,
}

impl NewStudent {
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_fields(
            &self.name,
            self.cgpa,
            self.current_salary,
            self.dream_offer,
        )
    }

    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name.trim().to_string(),
            cgpa: self.cgpa,
            is_placed: self.is_placed,
            current_salary: self.current_salary,
            companies_applied: self.companies_applied,
            dream_offer: self.dream_offer,
            dream_company: self.dream_company.trim().to_string(),
        }
    }
}

fn validate_fields(
    name: &str,
    cgpa: f64,
    current_salary: f64,
    dream_offer: f64,
) -> Result<(), StudentValidationError> {
    if name.trim().is_empty() {
        return Err(StudentValidationError::MissingName);
    }
    if !cgpa.is_finite() || !(0.0..=10.0).contains(&cgpa) {
        return Err(StudentValidationError::CgpaOutOfRange(cgpa));
    }
    for (field, amount) in [
        ("currentSalary", current_salary),
        ("dreamOffer", dream_offer),
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(StudentValidationError::InvalidAmount { field, amount });
        }
    }
    Ok(())
}

/// Validation failures for student records entering the system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StudentValidationError {
    #[error("student name cannot be empty")]
    MissingName,
    #[error("cgpa {0} must be between 0.0 and 10.0")]
    CgpaOutOfRange(f64),
    #[error("{field} must be a non-negative amount (found {amount})")]
    InvalidAmount { field: &'static str, amount: f64 },
}

/// Read-only snapshot of a company offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub offered_salary: f64,
}

/// Campus-wide placement counts captured at a single moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStats {
    pub placed: usize,
    pub total: usize,
}

impl PlacementStats {
    pub fn from_students<'a>(students: impl IntoIterator<Item = &'a Student>) -> Self {
        students
            .into_iter()
            .fold(Self::default(), |mut stats, student| {
                stats.total += 1;
                if student.is_placed {
                    stats.placed += 1;
                }
                stats
            })
    }

    /// Placed share in percent; an empty population counts as 0%.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.placed as f64 * 100.0 / self.total as f64
        }
    }

    /// `percentage() >= target` evaluated without dividing, so exact boundaries hold.
    /// An empty population is 0% placed.
    pub fn meets_target(&self, target_percentage: f64) -> bool {
        if self.total == 0 {
            return target_percentage <= 0.0;
        }
        self.placed as f64 * 100.0 >= target_percentage * self.total as f64
    }
}

/// Offer category tier derived from a placed student's current salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferTier {
    L1,
    L2,
    L3,
}

impl OfferTier {
    pub fn classify(current_salary: f64, policy: &OfferCategoryPolicy) -> Self {
        if current_salary >= policy.l1_threshold_amount {
            OfferTier::L1
        } else if current_salary >= policy.l2_threshold_amount {
            OfferTier::L2
        } else {
            OfferTier::L3
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OfferTier::L1 => "L1",
            OfferTier::L2 => "L2",
            OfferTier::L3 => "L3",
        }
    }
}

/// Student record as exposed to the CRUD layer, with the derived offer category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_offer_category: Option<OfferTier>,
}

impl StudentView {
    /// The category is only reported while the offer category policy is switched on.
    pub fn new(student: Student, policy: &OfferCategoryPolicy) -> Self {
        let current_offer_category = if policy.enabled {
            student.offer_tier(policy)
        } else {
            None
        };

        Self {
            student,
            current_offer_category,
        }
    }
}

/// Round to two decimals and return hundredths; CGPA is compared at that precision.
pub(crate) fn hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
