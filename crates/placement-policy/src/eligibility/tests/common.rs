use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::domain::{
    Company, CompanyId, NewStudent, PlacementStats, Student, StudentId,
};
use crate::eligibility::engine::DecisionFacts;
use crate::eligibility::policy::PolicyConfig;
use crate::eligibility::repository::{PlacementRepository, PolicyStore, RepositoryError};
use crate::eligibility::{eligibility_router, EligibilityService};

pub(super) fn placed_student(id: u64, current_salary: f64) -> Student {
    Student {
        id: StudentId(id),
        name: format!("Student {id}"),
        cgpa: 8.0,
        is_placed: true,
        current_salary,
        companies_applied: 1,
        dream_offer: 0.0,
        dream_company: String::new(),
    }
}

pub(super) fn unplaced_student(id: u64) -> Student {
    Student {
        is_placed: false,
        current_salary: 0.0,
        companies_applied: 0,
        ..placed_student(id, 0.0)
    }
}

pub(super) fn company(id: &str, name: &str, offered_salary: f64) -> Company {
    Company {
        id: CompanyId(id.to_string()),
        name: name.to_string(),
        offered_salary,
    }
}

/// Every block disabled; tests switch on only what they exercise.
pub(super) fn disabled_config() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn facts<'a>(student: &'a Student, company: &'a Company) -> DecisionFacts<'a> {
    DecisionFacts {
        student,
        company,
        placement: PlacementStats {
            placed: 9,
            total: 10,
        },
    }
}

pub(super) fn roster() -> Vec<Student> {
    let mut over_limit = placed_student(3, 800_000.0);
    over_limit.companies_applied = 7;

    let mut l1 = placed_student(4, 2_400_000.0);
    l1.dream_company = "Initech".to_string();

    vec![
        unplaced_student(2),
        placed_student(1, 600_000.0),
        over_limit,
        l1,
        unplaced_student(5),
    ]
}

pub(super) fn companies() -> Vec<Company> {
    vec![
        company("acme", "Acme Corp", 900_000.0),
        company("initech", "Initech", 1_500_000.0),
    ]
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    students: Mutex<BTreeMap<StudentId, Student>>,
    companies: Mutex<BTreeMap<CompanyId, Company>>,
    stats_reads: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn seeded(students: Vec<Student>, companies: Vec<Company>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.students.lock().expect("students mutex poisoned");
            for student in students {
                guard.insert(student.id, student);
            }
        }
        {
            let mut guard = repository
                .companies
                .lock()
                .expect("companies mutex poisoned");
            for company in companies {
                guard.insert(company.id.clone(), company);
            }
        }
        repository
    }

    pub(super) fn stats_reads(&self) -> usize {
        self.stats_reads.load(Ordering::SeqCst)
    }
}

impl PlacementRepository for MemoryRepository {
    fn student(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let guard = self.students.lock().expect("students mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("companies mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        let guard = self.students.lock().expect("students mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("companies mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn placement_stats(&self) -> Result<PlacementStats, RepositoryError> {
        self.stats_reads.fetch_add(1, Ordering::SeqCst);
        let guard = self.students.lock().expect("students mutex poisoned");
        Ok(PlacementStats::from_students(guard.values()))
    }

    fn insert_student(&self, student: NewStudent) -> Result<Student, RepositoryError> {
        let mut guard = self.students.lock().expect("students mutex poisoned");
        let next = guard.keys().next_back().map(|id| id.0 + 1).unwrap_or(1);
        let student = student.into_student(StudentId(next));
        guard.insert(student.id, student.clone());
        Ok(student)
    }
}

pub(super) struct MemoryPolicies {
    current: Mutex<PolicyConfig>,
}

impl MemoryPolicies {
    pub(super) fn new(config: PolicyConfig) -> Self {
        Self {
            current: Mutex::new(config),
        }
    }
}

impl PolicyStore for MemoryPolicies {
    fn load(&self) -> Result<PolicyConfig, RepositoryError> {
        Ok(self.current.lock().expect("policy mutex poisoned").clone())
    }

    fn replace(&self, config: PolicyConfig) -> Result<(), RepositoryError> {
        *self.current.lock().expect("policy mutex poisoned") = config;
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl PlacementRepository for UnavailableRepository {
    fn student(&self, _id: StudentId) -> Result<Option<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn company(&self, _id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn placement_stats(&self) -> Result<PlacementStats, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_student(&self, _student: NewStudent) -> Result<Student, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = EligibilityService<MemoryRepository, MemoryPolicies>;

pub(super) fn build_service(
    config: PolicyConfig,
) -> (MemoryService, Arc<MemoryRepository>, Arc<MemoryPolicies>) {
    let repository = Arc::new(MemoryRepository::seeded(roster(), companies()));
    let policies = Arc::new(MemoryPolicies::new(config));
    let service = EligibilityService::new(repository.clone(), policies.clone());
    (service, repository, policies)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    eligibility_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
