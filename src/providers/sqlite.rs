use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{
    Application, ApplicationRecord, ApplicationStatus, Company, Dataset, Internship,
    InternshipStatus, ResumeRef, StudentProfile, ELIGIBLE_STATUSES,
};
use crate::error::{RecommenderError, Result};
use crate::providers::ApplicantSource;

/// SQLite-backed applicant store
///
/// Schema:
/// ```sql
/// CREATE TABLE companies (id TEXT PRIMARY KEY, name TEXT NOT NULL);
/// CREATE TABLE internships (
///     id TEXT PRIMARY KEY, company_id TEXT NOT NULL, title TEXT NOT NULL,
///     description TEXT NOT NULL, requirements TEXT, skills TEXT NOT NULL,
///     status TEXT NOT NULL, is_active INTEGER NOT NULL, created_at TEXT NOT NULL
/// );
/// CREATE TABLE students (id TEXT PRIMARY KEY, email TEXT NOT NULL, profile TEXT NOT NULL);
/// CREATE TABLE applications (
///     id TEXT PRIMARY KEY, internship_id TEXT NOT NULL, student_id TEXT NOT NULL,
///     status TEXT NOT NULL, cover_letter TEXT, resume TEXT, applied_at TEXT NOT NULL
/// );
/// ```
/// `skills`, `profile` and `resume` hold JSON.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub companies: u64,
    pub internships: u64,
    pub students: u64,
    pub applications: u64,
}

const APPLICATION_COLUMNS: &str = "a.id, a.internship_id, a.student_id, a.status, a.cover_letter, \
     a.resume, a.applied_at, s.profile";

const INTERNSHIP_COLUMNS: &str =
    "id, company_id, title, description, requirements, skills, status, is_active, created_at";

fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn eligible_status_list() -> String {
    ELIGIBLE_STATUSES
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn internship_from_row(row: &Row<'_>) -> rusqlite::Result<Internship> {
    let skills_json: String = row.get(5)?;
    let skills: Vec<String> = serde_json::from_str(&skills_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    let status: String = row.get(6)?;
    let status = InternshipStatus::parse(&status)
        .ok_or_else(|| conversion_error(6, format!("unknown internship status '{}'", status)))?;

    let created_at: String = row.get(8)?;

    Ok(Internship {
        id: row.get(0)?,
        company_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        requirements: row.get(4)?,
        skills,
        status,
        is_active: row.get(7)?,
        created_at: parse_timestamp(8, &created_at)?,
    })
}

fn application_from_row(row: &Row<'_>) -> rusqlite::Result<Application> {
    let id: String = row.get(0)?;
    let student_id: String = row.get(2)?;

    let status: String = row.get(3)?;
    let status = ApplicationStatus::parse(&status)
        .ok_or_else(|| conversion_error(3, format!("unknown application status '{}'", status)))?;

    let resume: Option<ResumeRef> = match row.get::<_, Option<String>>(5)? {
        Some(json) => serde_json::from_str(&json).ok(),
        None => None,
    };

    let applied_at: String = row.get(6)?;

    // A missing or unreadable student leaves the application unresolved
    let student = match row.get::<_, Option<String>>(7)? {
        Some(json) => match serde_json::from_str::<StudentProfile>(&json) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(application_id = %id, %student_id, "unreadable student profile: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(Application {
        id,
        internship_id: row.get(1)?,
        student_id,
        student,
        cover_letter: row.get(4)?,
        resume,
        status,
        applied_at: parse_timestamp(6, &applied_at)?,
    })
}

fn insert_company(conn: &Connection, company: &Company) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO companies (id, name) VALUES (?1, ?2)",
        params![company.id, company.name],
    )?;
    Ok(())
}

fn insert_internship(conn: &Connection, internship: &Internship) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO internships
         (id, company_id, title, description, requirements, skills, status, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            internship.id,
            internship.company_id,
            internship.title,
            internship.description,
            internship.requirements,
            serde_json::to_string(&internship.skills)?,
            internship.status.as_str(),
            internship.is_active,
            timestamp(&internship.created_at),
        ],
    )?;
    Ok(())
}

fn insert_student(conn: &Connection, student: &StudentProfile) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO students (id, email, profile) VALUES (?1, ?2, ?3)",
        params![student.id, student.email, serde_json::to_string(student)?],
    )?;
    Ok(())
}

fn insert_application(conn: &Connection, application: &ApplicationRecord) -> Result<()> {
    let resume_json = match &application.resume {
        Some(resume) => Some(serde_json::to_string(resume)?),
        None => None,
    };

    conn.execute(
        "INSERT OR REPLACE INTO applications
         (id, internship_id, student_id, status, cover_letter, resume, applied_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            application.id,
            application.internship_id,
            application.student_id,
            application.status.as_str(),
            application.cover_letter,
            resume_json,
            timestamp(&application.applied_at),
        ],
    )?;
    Ok(())
}

impl SqliteStore {
    /// Open (or create) the store
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS companies (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS internships (
                id TEXT PRIMARY KEY,
                company_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                requirements TEXT,
                skills TEXT NOT NULL,
                status TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS students (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                profile TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS applications (
                id TEXT PRIMARY KEY,
                internship_id TEXT NOT NULL,
                student_id TEXT NOT NULL,
                status TEXT NOT NULL,
                cover_letter TEXT,
                resume TEXT,
                applied_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_internships_company ON internships(company_id, status);
            CREATE INDEX IF NOT EXISTS idx_applications_internship ON applications(internship_id, status);",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RecommenderError::Source {
            source_name: "sqlite".to_string(),
            message: "connection lock poisoned".to_string(),
        })
    }

    /// Insert or replace a single student profile
    pub async fn upsert_student(&self, student: &StudentProfile) -> Result<()> {
        let conn = self.lock()?;
        insert_student(&conn, student)
    }

    /// Insert or replace every record of the dataset in one transaction
    pub async fn import(&self, dataset: &Dataset) -> Result<StoreStats> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        for company in &dataset.companies {
            insert_company(&tx, company)?;
        }
        for internship in &dataset.internships {
            insert_internship(&tx, internship)?;
        }
        for student in &dataset.students {
            insert_student(&tx, student)?;
        }
        for application in &dataset.applications {
            insert_application(&tx, application)?;
        }

        tx.commit()?;

        tracing::info!(
            companies = dataset.companies.len(),
            internships = dataset.internships.len(),
            students = dataset.students.len(),
            applications = dataset.applications.len(),
            "dataset imported"
        );

        Ok(StoreStats {
            companies: dataset.companies.len() as u64,
            internships: dataset.internships.len() as u64,
            students: dataset.students.len() as u64,
            applications: dataset.applications.len() as u64,
        })
    }

    /// Get row counts
    pub async fn stats(&self) -> Result<StoreStats> {
        let conn = self.lock()?;
        let count = |table: &str| -> Result<u64> {
            let n: u64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            Ok(n)
        };

        Ok(StoreStats {
            companies: count("companies")?,
            internships: count("internships")?,
            students: count("students")?,
            applications: count("applications")?,
        })
    }
}

#[async_trait]
impl ApplicantSource for SqliteStore {
    async fn company_exists(&self, company_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM companies WHERE id = ?",
                params![company_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    async fn open_internships(&self, company_id: &str) -> Result<Vec<Internship>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM internships
             WHERE company_id = ? AND status IN ('active', 'draft') AND is_active = 1
             ORDER BY created_at, rowid",
            INTERNSHIP_COLUMNS
        ))?;

        let internships = stmt
            .query_map(params![company_id], internship_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(internships)
    }

    async fn internship(&self, company_id: &str, internship_id: &str) -> Result<Option<Internship>> {
        let conn = self.lock()?;
        let internship = conn
            .query_row(
                &format!(
                    "SELECT {} FROM internships WHERE id = ?1 AND company_id = ?2",
                    INTERNSHIP_COLUMNS
                ),
                params![internship_id, company_id],
                internship_from_row,
            )
            .optional()?;
        Ok(internship)
    }

    async fn eligible_applications(&self, internship_id: &str) -> Result<Vec<Application>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM applications a
             LEFT JOIN students s ON s.id = a.student_id
             WHERE a.internship_id = ? AND a.status IN ({})
             ORDER BY a.applied_at DESC, a.rowid",
            APPLICATION_COLUMNS,
            eligible_status_list()
        ))?;

        let applications = stmt
            .query_map(params![internship_id], application_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(applications)
    }

    async fn application(&self, company_id: &str, application_id: &str) -> Result<Option<Application>> {
        let conn = self.lock()?;
        let application = conn
            .query_row(
                &format!(
                    "SELECT {} FROM applications a
                     JOIN internships i ON i.id = a.internship_id
                     LEFT JOIN students s ON s.id = a.student_id
                     WHERE a.id = ?1 AND i.company_id = ?2",
                    APPLICATION_COLUMNS
                ),
                params![application_id, company_id],
                application_from_row,
            )
            .optional()?;
        Ok(application)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str, student_id: &str, status: ApplicationStatus, age_hours: i64) -> ApplicationRecord {
        ApplicationRecord {
            id: id.to_string(),
            internship_id: "i1".to_string(),
            student_id: student_id.to_string(),
            cover_letter: Some(format!("cover letter of {}", id)),
            resume: Some(ResumeRef {
                filename: Some(format!("{}.pdf", id)),
                path: Some(format!("uploads/{}.pdf", id)),
            }),
            status,
            applied_at: Utc::now() - Duration::hours(age_hours),
        }
    }

    async fn seeded() -> SqliteStore {
        let store = SqliteStore::new(":memory:").await.unwrap();

        let mut internship = Internship::new("i1", "c1", "Backend Intern");
        internship.skills = vec!["Rust".to_string(), "SQL".to_string()];
        internship.requirements = Some("Systems programming".to_string());

        let mut closed = Internship::new("i2", "c1", "Closed Intern");
        closed.status = InternshipStatus::Closed;

        let mut student = StudentProfile::new("s1", "s1@uni.edu");
        student.skills = vec!["rust".to_string()];

        store
            .import(&Dataset {
                companies: vec![Company::new("c1", "Acme")],
                internships: vec![internship, closed],
                students: vec![student],
                applications: vec![
                    record("a-old", "s1", ApplicationStatus::Reviewed, 72),
                    record("a-new", "s1", ApplicationStatus::Pending, 1),
                    record("a-rejected", "s1", ApplicationStatus::Rejected, 3),
                    record("a-orphan", "ghost", ApplicationStatus::Pending, 10),
                ],
            })
            .await
            .unwrap();

        store
    }

    #[tokio::test]
    async fn test_store_create() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats, StoreStats::default());
    }

    #[tokio::test]
    async fn test_import_and_stats() {
        let store = seeded().await;
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.companies, 1);
        assert_eq!(stats.internships, 2);
        assert_eq!(stats.students, 1);
        assert_eq!(stats.applications, 4);
    }

    #[tokio::test]
    async fn test_internship_round_trip() {
        let store = seeded().await;
        let internship = store.internship("c1", "i1").await.unwrap().unwrap();
        assert_eq!(internship.skills, vec!["Rust", "SQL"]);
        assert_eq!(internship.requirements.as_deref(), Some("Systems programming"));
        assert!(internship.is_open());

        assert!(store.internship("c2", "i1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_internships_excludes_closed() {
        let store = seeded().await;
        let open = store.open_internships("c1").await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "i1");
    }

    #[tokio::test]
    async fn test_eligible_applications_order_and_orphans() {
        let store = seeded().await;
        let apps = store.eligible_applications("i1").await.unwrap();

        let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a-new", "a-orphan", "a-old"]);

        let orphan = &apps[1];
        assert!(orphan.student.is_none());
        assert_eq!(orphan.student_id, "ghost");

        let resolved = &apps[0];
        assert_eq!(resolved.student.as_ref().unwrap().skills, vec!["rust"]);
        assert_eq!(resolved.resume.as_ref().unwrap().filename.as_deref(), Some("a-new.pdf"));
    }

    #[tokio::test]
    async fn test_corrupt_profile_is_unresolved() {
        let store = seeded().await;
        {
            let conn = store.lock().unwrap();
            conn.execute("UPDATE students SET profile = 'not json' WHERE id = 's1'", [])
                .unwrap();
        }

        let apps = store.eligible_applications("i1").await.unwrap();
        assert_eq!(apps.len(), 3);
        assert!(apps.iter().all(|a| a.student.is_none()));
    }

    #[tokio::test]
    async fn test_application_scoped_by_company() {
        let store = seeded().await;
        assert!(store.application("c1", "a-old").await.unwrap().is_some());
        assert!(store.application("c9", "a-old").await.unwrap().is_none());
        assert!(store.company_exists("c1").await.unwrap());
        assert!(!store.company_exists("c9").await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = seeded().await;
        let mut student = StudentProfile::new("s1", "s1@uni.edu");
        student.skills = vec!["go".to_string()];
        store.upsert_student(&student).await.unwrap();

        let apps = store.eligible_applications("i1").await.unwrap();
        assert_eq!(apps[0].student.as_ref().unwrap().skills, vec!["go"]);
        assert_eq!(store.stats().await.unwrap().students, 1);
    }
}
