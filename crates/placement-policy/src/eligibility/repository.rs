use super::domain::{Company, CompanyId, NewStudent, PlacementStats, Student, StudentId};
use super::policy::PolicyConfig;

/// Read access to the student and company records owned by the CRUD layer.
///
/// `students` must return records in ascending id order; batch results inherit it.
pub trait PlacementRepository: Send + Sync {
    fn student(&self, id: StudentId) -> Result<Option<Student>, RepositoryError>;
    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError>;
    fn students(&self) -> Result<Vec<Student>, RepositoryError>;
    fn companies(&self) -> Result<Vec<Company>, RepositoryError>;
    /// Placed and total counts across the whole population, computed at call time.
    fn placement_stats(&self) -> Result<PlacementStats, RepositoryError>;
    fn insert_student(&self, student: NewStudent) -> Result<Student, RepositoryError>;
}

/// Holder of the single current policy document.
pub trait PolicyStore: Send + Sync {
    fn load(&self) -> Result<PolicyConfig, RepositoryError>;
    fn replace(&self, config: PolicyConfig) -> Result<(), RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
