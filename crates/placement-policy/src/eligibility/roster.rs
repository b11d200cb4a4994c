//! Student and company roster import.
//!
//! Rosters arrive as JSON arrays in the record store's wire format, or, for students, as a CSV
//! export with one row per student. Every record is validated before it is accepted.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{Company, CompanyId, Student, StudentId, StudentValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("student {id} rejected: {source}")]
    InvalidStudent {
        id: StudentId,
        source: StudentValidationError,
    },
    #[error("company {0} must have a name and a non-negative offered salary")]
    InvalidCompany(CompanyId),
    #[error("student id {0} appears more than once")]
    DuplicateStudent(StudentId),
    #[error("company id {0} appears more than once")]
    DuplicateCompany(CompanyId),
}

pub struct RosterImporter;

impl RosterImporter {
    /// Load students from a `.csv` export or a JSON array, chosen by file extension.
    pub fn students_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Student>, RosterImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        if is_csv(path) {
            Self::students_from_csv(file)
        } else {
            Self::students_from_json(file)
        }
    }

    pub fn companies_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Company>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::companies_from_json(file)
    }

    pub fn students_from_json<R: Read>(reader: R) -> Result<Vec<Student>, RosterImportError> {
        let students: Vec<Student> = serde_json::from_reader(reader)?;
        check_students(students)
    }

    pub fn students_from_csv<R: Read>(reader: R) -> Result<Vec<Student>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut students = Vec::new();

        for record in csv_reader.deserialize::<StudentRow>() {
            let row = record?;
            students.push(row.into_student());
        }

        check_students(students)
    }

    pub fn companies_from_json<R: Read>(reader: R) -> Result<Vec<Company>, RosterImportError> {
        let companies: Vec<Company> = serde_json::from_reader(reader)?;
        let mut seen = HashSet::new();

        for company in &companies {
            let salary = company.offered_salary;
            if company.name.trim().is_empty() || !salary.is_finite() || salary < 0.0 {
                return Err(RosterImportError::InvalidCompany(company.id.clone()));
            }
            if !seen.insert(company.id.clone()) {
                return Err(RosterImportError::DuplicateCompany(company.id.clone()));
            }
        }

        Ok(companies)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn check_students(mut students: Vec<Student>) -> Result<Vec<Student>, RosterImportError> {
    let mut seen = HashSet::new();

    for student in &students {
        student
            .validate()
            .map_err(|source| RosterImportError::InvalidStudent {
                id: student.id,
                source,
            })?;
        if !seen.insert(student.id) {
            return Err(RosterImportError::DuplicateStudent(student.id));
        }
    }

    students.sort_by_key(|student| student.id);
    Ok(students)
}

#[derive(Debug, Deserialize)]
struct StudentRow {
    id: u64,
    name: String,
    cgpa: f64,
    #[serde(rename = "isPlaced")]
    is_placed: bool,
    #[serde(
        rename = "currentSalary",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    current_salary: Option<f64>,
    #[serde(
        rename = "companiesApplied",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    companies_applied: Option<u32>,
    #[serde(
        rename = "dreamOffer",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    dream_offer: Option<f64>,
    #[serde(rename = "dreamCompany", default)]
    dream_company: String,
}

impl StudentRow {
    fn into_student(self) -> Student {
        Student {
            id: StudentId(self.id),
            name: self.name,
            cgpa: self.cgpa,
            is_placed: self.is_placed,
            current_salary: self.current_salary.unwrap_or(0.0),
            companies_applied: self.companies_applied.unwrap_or(0),
            dream_offer: self.dream_offer.unwrap_or(0.0),
            dream_company: self.dream_company,
        }
    }
}
