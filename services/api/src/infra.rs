use metrics_exporter_prometheus::PrometheusHandle;
use placement_policy::config::RosterConfig;
use placement_policy::eligibility::{
    Company, CompanyId, EligibilityService, NewStudent, PlacementRepository, PlacementStats,
    PolicyConfig, PolicyStore, RepositoryError, RosterImporter, Student, StudentId,
};
use placement_policy::error::AppError;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::info;

pub(crate) type InMemoryEligibilityService =
    EligibilityService<InMemoryPlacementRepository, InMemoryPolicyStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPlacementRepository {
    students: Arc<Mutex<BTreeMap<StudentId, Student>>>,
    companies: Arc<Mutex<BTreeMap<CompanyId, Company>>>,
}

impl InMemoryPlacementRepository {
    pub(crate) fn seeded(students: Vec<Student>, companies: Vec<Company>) -> Self {
        let students = students
            .into_iter()
            .map(|student| (student.id, student))
            .collect();
        let companies = companies
            .into_iter()
            .map(|company| (company.id.clone(), company))
            .collect();
        Self {
            students: Arc::new(Mutex::new(students)),
            companies: Arc::new(Mutex::new(companies)),
        }
    }

    fn students_guard(
        &self,
    ) -> Result<MutexGuard<'_, BTreeMap<StudentId, Student>>, RepositoryError> {
        self.students
            .lock()
            .map_err(|_| RepositoryError::Unavailable("student store lock poisoned".to_string()))
    }

    fn companies_guard(
        &self,
    ) -> Result<MutexGuard<'_, BTreeMap<CompanyId, Company>>, RepositoryError> {
        self.companies
            .lock()
            .map_err(|_| RepositoryError::Unavailable("company store lock poisoned".to_string()))
    }
}

impl PlacementRepository for InMemoryPlacementRepository {
    fn student(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let guard = self.students_guard()?;
        Ok(guard.get(&id).cloned())
    }

    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies_guard()?;
        Ok(guard.get(id).cloned())
    }

    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        let guard = self.students_guard()?;
        Ok(guard.values().cloned().collect())
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        let guard = self.companies_guard()?;
        Ok(guard.values().cloned().collect())
    }

    fn placement_stats(&self) -> Result<PlacementStats, RepositoryError> {
        let guard = self.students_guard()?;
        Ok(PlacementStats::from_students(guard.values()))
    }

    fn insert_student(&self, student: NewStudent) -> Result<Student, RepositoryError> {
        let mut guard = self.students_guard()?;
        let next_id = guard
            .keys()
            .next_back()
            .map(|id| id.0 + 1)
            .unwrap_or(1);
        let student = student.into_student(StudentId(next_id));
        guard.insert(student.id, student.clone());
        Ok(student)
    }
}

pub(crate) struct InMemoryPolicyStore {
    current: RwLock<PolicyConfig>,
}

impl InMemoryPolicyStore {
    pub(crate) fn new(config: PolicyConfig) -> Self {
        Self {
            current: RwLock::new(config),
        }
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn load(&self) -> Result<PolicyConfig, RepositoryError> {
        let guard = self
            .current
            .read()
            .map_err(|_| RepositoryError::Unavailable("policy lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn replace(&self, config: PolicyConfig) -> Result<(), RepositoryError> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| RepositoryError::Unavailable("policy lock poisoned".to_string()))?;
        *guard = config;
        Ok(())
    }
}

/// Build the service over the configured roster files, falling back to the bundled sample
/// roster for whichever file is not configured.
pub(crate) fn build_service(
    roster: &RosterConfig,
) -> Result<Arc<InMemoryEligibilityService>, AppError> {
    let students = match &roster.students_path {
        Some(path) => {
            let students = RosterImporter::students_from_path(path)?;
            info!(path = %path.display(), count = students.len(), "student roster loaded");
            students
        }
        None => sample_students(),
    };
    let companies = match &roster.companies_path {
        Some(path) => {
            let companies = RosterImporter::companies_from_path(path)?;
            info!(path = %path.display(), count = companies.len(), "company roster loaded");
            companies
        }
        None => sample_companies(),
    };

    Ok(service_from_roster(students, companies))
}

pub(crate) fn service_from_roster(
    students: Vec<Student>,
    companies: Vec<Company>,
) -> Arc<InMemoryEligibilityService> {
    Arc::new(EligibilityService::new(
        Arc::new(InMemoryPlacementRepository::seeded(students, companies)),
        Arc::new(InMemoryPolicyStore::new(PolicyConfig::standard())),
    ))
}

pub(crate) fn sample_students() -> Vec<Student> {
    vec![
        student(101, "Ananya Iyer", 8.4, None, 0, 0.0, "Initech"),
        student(102, "Kabir Shah", 6.5, Some(800_000.0), 2, 1_500_000.0, ""),
        student(103, "Meera Pillai", 9.1, Some(1_500_000.0), 1, 0.0, ""),
        student(104, "Vikram Joshi", 7.8, Some(2_400_000.0), 3, 0.0, "Umbrella Labs"),
        student(105, "Sana Qureshi", 7.2, Some(700_000.0), 5, 0.0, ""),
        student(106, "Rohit Das", 5.9, None, 0, 0.0, ""),
    ]
}

pub(crate) fn sample_companies() -> Vec<Company> {
    vec![
        company("hooli", "Hooli", 900_000.0),
        company("initech", "Initech", 1_500_000.0),
        company("pied-piper", "Pied Piper", 1_950_000.0),
        company("umbrella", "Umbrella Labs", 3_200_000.0),
    ]
}

fn student(
    id: u64,
    name: &str,
    cgpa: f64,
    placed_salary: Option<f64>,
    companies_applied: u32,
    dream_offer: f64,
    dream_company: &str,
) -> Student {
    Student {
        id: StudentId(id),
        name: name.to_string(),
        cgpa,
        is_placed: placed_salary.is_some(),
        current_salary: placed_salary.unwrap_or(0.0),
        companies_applied,
        dream_offer,
        dream_company: dream_company.to_string(),
    }
}

fn company(id: &str, name: &str, offered_salary: f64) -> Company {
    Company {
        id: CompanyId(id.to_string()),
        name: name.to_string(),
        offered_salary,
    }
}
