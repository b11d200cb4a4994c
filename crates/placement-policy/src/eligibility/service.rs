use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    Company, CompanyId, NewStudent, PlacementStats, Student, StudentId,
    StudentValidationError, StudentView,
};
use super::engine::{DecisionFacts, EligibilityEngine, EligibilityResult};
use super::policy::{PolicyConfig, PolicyConfigError};
use super::repository::{PlacementRepository, PolicyStore, RepositoryError};

/// Service composing the record store, the policy store, and the decision engine.
pub struct EligibilityService<R, P> {
    repository: Arc<R>,
    policies: Arc<P>,
}

impl<R, P> EligibilityService<R, P>
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    pub fn new(repository: Arc<R>, policies: Arc<P>) -> Self {
        Self {
            repository,
            policies,
        }
    }

    /// Decide whether a student may apply to a company under the current policies.
    ///
    /// All facts are resolved before any policy runs; an unknown id yields no verdict.
    pub fn decide(
        &self,
        student_id: StudentId,
        company_id: &CompanyId,
    ) -> Result<EligibilityResult, EligibilityServiceError> {
        let config = self.policies.load()?;
        let student = self
            .repository
            .student(student_id)?
            .ok_or(EligibilityServiceError::StudentNotFound(student_id))?;
        let company = self
            .repository
            .company(company_id)?
            .ok_or_else(|| EligibilityServiceError::CompanyNotFound(company_id.clone()))?;
        let placement = self.repository.placement_stats()?;

        let engine = EligibilityEngine::new(config);
        let result = engine.decide(&DecisionFacts {
            student: &student,
            company: &company,
            placement,
        });

        debug!(
            student_id = %result.student_id,
            company_id = %result.company_id,
            eligible = result.is_eligible,
            reasons = result.reasons.len(),
            "eligibility decided"
        );

        Ok(result)
    }

    /// Every student allowed to apply to the company, in ascending id order.
    ///
    /// Config and placement counts are read once so all students share one denominator.
    pub fn eligible_students(
        &self,
        company_id: &CompanyId,
    ) -> Result<EligibilityBatch, EligibilityServiceError> {
        let company = self
            .repository
            .company(company_id)?
            .ok_or_else(|| EligibilityServiceError::CompanyNotFound(company_id.clone()))?;
        let engine = EligibilityEngine::new(self.policies.load()?);
        let placement = self.repository.placement_stats()?;
        let evaluated_at = Utc::now();

        let mut population = self.repository.students()?;
        population.sort_by_key(|student| student.id);
        let evaluated = population.len();

        let students: Vec<Student> = population
            .into_iter()
            .filter(|student| {
                engine
                    .decide(&DecisionFacts {
                        student,
                        company: &company,
                        placement,
                    })
                    .is_eligible
            })
            .collect();

        info!(
            company_id = %company.id,
            evaluated,
            eligible = students.len(),
            placed = placement.placed,
            total = placement.total,
            "eligible students projected"
        );

        Ok(EligibilityBatch {
            company,
            placement,
            evaluated_at,
            students,
        })
    }

    pub fn policy_config(&self) -> Result<PolicyConfig, EligibilityServiceError> {
        Ok(self.policies.load()?)
    }

    /// Replace the whole policy document. Invalid documents leave the current one untouched.
    pub fn update_policy_config(
        &self,
        config: PolicyConfig,
    ) -> Result<PolicyConfig, EligibilityServiceError> {
        config.validate()?;
        self.policies.replace(config.clone())?;
        info!(?config, "policy configuration updated");
        Ok(config)
    }

    pub fn students(&self) -> Result<Vec<StudentView>, EligibilityServiceError> {
        let config = self.policies.load()?;
        let mut students = self.repository.students()?;
        students.sort_by_key(|student| student.id);
        Ok(students
            .into_iter()
            .map(|student| StudentView::new(student, &config.offer_category))
            .collect())
    }

    pub fn student(&self, student_id: StudentId) -> Result<StudentView, EligibilityServiceError> {
        let config = self.policies.load()?;
        let student = self
            .repository
            .student(student_id)?
            .ok_or(EligibilityServiceError::StudentNotFound(student_id))?;
        Ok(StudentView::new(student, &config.offer_category))
    }

    pub fn create_student(
        &self,
        student: NewStudent,
    ) -> Result<StudentView, EligibilityServiceError> {
        student.validate()?;
        let config = self.policies.load()?;
        let stored = self.repository.insert_student(student)?;
        info!(student_id = %stored.id, placed = stored.is_placed, "student created");
        Ok(StudentView::new(stored, &config.offer_category))
    }

    pub fn companies(&self) -> Result<Vec<Company>, EligibilityServiceError> {
        Ok(self.repository.companies()?)
    }
}

/// Result of projecting the eligible population for one company.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityBatch {
    pub company: Company,
    pub placement: PlacementStats,
    pub evaluated_at: DateTime<Utc>,
    pub students: Vec<Student>,
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("company {0} not found")]
    CompanyNotFound(CompanyId),
    #[error("invalid policy configuration: {0}")]
    InvalidConfig(#[from] PolicyConfigError),
    #[error("invalid student: {0}")]
    InvalidStudent(#[from] StudentValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
