use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::{Application, ApplicationRecord, Company, Dataset, Internship, StudentProfile};
use crate::error::Result;
use crate::providers::ApplicantSource;

/// Read-only source over an in-memory `Dataset` (fixtures, tests)
pub struct MemorySource {
    companies: Vec<Company>,
    internships: Vec<Internship>,
    students: HashMap<String, StudentProfile>,
    applications: Vec<ApplicationRecord>,
}

impl MemorySource {
    pub fn new(dataset: Dataset) -> Self {
        let students = dataset
            .students
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        Self {
            companies: dataset.companies,
            internships: dataset.internships,
            students,
            applications: dataset.applications,
        }
    }

    fn resolve(&self, record: &ApplicationRecord) -> Application {
        record
            .clone()
            .resolve(self.students.get(&record.student_id).cloned())
    }
}

#[async_trait]
impl ApplicantSource for MemorySource {
    async fn company_exists(&self, company_id: &str) -> Result<bool> {
        Ok(self.companies.iter().any(|c| c.id == company_id))
    }

    async fn open_internships(&self, company_id: &str) -> Result<Vec<Internship>> {
        Ok(self
            .internships
            .iter()
            .filter(|i| i.company_id == company_id && i.is_open())
            .cloned()
            .collect())
    }

    async fn internship(&self, company_id: &str, internship_id: &str) -> Result<Option<Internship>> {
        Ok(self
            .internships
            .iter()
            .find(|i| i.id == internship_id && i.company_id == company_id)
            .cloned())
    }

    async fn eligible_applications(&self, internship_id: &str) -> Result<Vec<Application>> {
        let mut records: Vec<&ApplicationRecord> = self
            .applications
            .iter()
            .filter(|a| a.internship_id == internship_id && a.status.is_eligible())
            .collect();
        records.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));

        Ok(records.into_iter().map(|r| self.resolve(r)).collect())
    }

    async fn application(&self, company_id: &str, application_id: &str) -> Result<Option<Application>> {
        let Some(record) = self.applications.iter().find(|a| a.id == application_id) else {
            return Ok(None);
        };

        let owned = self
            .internships
            .iter()
            .any(|i| i.id == record.internship_id && i.company_id == company_id);

        Ok(owned.then(|| self.resolve(record)))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ApplicationStatus, InternshipStatus};
    use chrono::{Duration, Utc};

    fn record(id: &str, student_id: &str, status: ApplicationStatus, age_hours: i64) -> ApplicationRecord {
        ApplicationRecord {
            id: id.to_string(),
            internship_id: "i1".to_string(),
            student_id: student_id.to_string(),
            cover_letter: None,
            resume: None,
            status,
            applied_at: Utc::now() - Duration::hours(age_hours),
        }
    }

    fn dataset() -> Dataset {
        let mut closed = Internship::new("i2", "c1", "Closed");
        closed.status = InternshipStatus::Closed;

        Dataset {
            companies: vec![Company::new("c1", "Acme")],
            internships: vec![Internship::new("i1", "c1", "Open"), closed],
            students: vec![StudentProfile::new("s1", "s1@uni.edu")],
            applications: vec![
                record("old", "s1", ApplicationStatus::Pending, 48),
                record("new", "s1", ApplicationStatus::Shortlisted, 1),
                record("gone", "s1", ApplicationStatus::Withdrawn, 2),
                record("orphan", "missing", ApplicationStatus::Reviewed, 5),
            ],
        }
    }

    #[tokio::test]
    async fn test_eligible_newest_first() {
        let source = MemorySource::new(dataset());
        let apps = source.eligible_applications("i1").await.unwrap();

        let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "orphan", "old"]);
        assert!(apps[1].student.is_none());
        assert!(apps[0].student.is_some());
    }

    #[tokio::test]
    async fn test_open_internships_and_ownership() {
        let source = MemorySource::new(dataset());
        let open = source.open_internships("c1").await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "i1");

        assert!(source.internship("c1", "i2").await.unwrap().is_some());
        assert!(source.internship("other", "i1").await.unwrap().is_none());
        assert!(source.application("other", "old").await.unwrap().is_none());
        assert!(source.application("c1", "old").await.unwrap().is_some());
    }
}
