pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use crate::core::{Application, Internship};
use crate::error::Result;

pub use memory::MemorySource;
pub use sqlite::SqliteStore;

/// Trait for the persistence collaborator that supplies internships and
/// applications (SQLite, in-memory fixtures, ...).
///
/// Implementations scope lookups by company; the engine performs no
/// authorization of its own.
#[async_trait]
pub trait ApplicantSource: Send + Sync {
    /// Whether the company exists
    async fn company_exists(&self, company_id: &str) -> Result<bool>;

    /// Open internships (active or draft, not deactivated) owned by the
    /// company, in a stable order
    async fn open_internships(&self, company_id: &str) -> Result<Vec<Internship>>;

    /// Internship by id, only if owned by the company
    async fn internship(&self, company_id: &str, internship_id: &str) -> Result<Option<Internship>>;

    /// Pending, reviewed and shortlisted applications, newest first.
    /// Applications whose student cannot be resolved carry `student: None`.
    async fn eligible_applications(&self, internship_id: &str) -> Result<Vec<Application>>;

    /// Application by id, only if it targets an internship of the company
    async fn application(&self, company_id: &str, application_id: &str) -> Result<Option<Application>>;

    /// Get source name for logging
    fn name(&self) -> &str;
}
