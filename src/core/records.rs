use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Accepted,
    Withdrawn,
}

/// Statuses considered for ranking; rejected, accepted and withdrawn are not
pub const ELIGIBLE_STATUSES: [ApplicationStatus; 3] = [
    ApplicationStatus::Pending,
    ApplicationStatus::Reviewed,
    ApplicationStatus::Shortlisted,
];

impl ApplicationStatus {
    /// Whether an application in this status takes part in ranking
    pub fn is_eligible(self) -> bool {
        ELIGIBLE_STATUSES.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "rejected" => Some(ApplicationStatus::Rejected),
            "accepted" => Some(ApplicationStatus::Accepted),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

/// Posting status of an internship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternshipStatus {
    Draft,
    Active,
    Closed,
    Filled,
}

impl InternshipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InternshipStatus::Draft => "draft",
            InternshipStatus::Active => "active",
            InternshipStatus::Closed => "closed",
            InternshipStatus::Filled => "filled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(InternshipStatus::Draft),
            "active" => Some(InternshipStatus::Active),
            "closed" => Some(InternshipStatus::Closed),
            "filled" => Some(InternshipStatus::Filled),
            _ => None,
        }
    }
}

impl Default for InternshipStatus {
    fn default() -> Self {
        InternshipStatus::Active
    }
}

fn default_true() -> bool {
    true
}

/// Company owning internships
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,

    #[serde(default)]
    pub name: String,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Internship posting, as supplied by the persistence collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: String,

    /// Owning company
    pub company_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Free-text requirements, compared against cover letters and education
    #[serde(default)]
    pub requirements: Option<String>,

    /// Required skill labels
    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub status: InternshipStatus,

    /// Soft-delete flag, independent of `status`
    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Internship {
    pub fn new(
        id: impl Into<String>,
        company_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            company_id: company_id.into(),
            title: title.into(),
            description: String::new(),
            requirements: None,
            skills: Vec::new(),
            status: InternshipStatus::Active,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Open postings are active or draft and not deactivated
    pub fn is_open(&self) -> bool {
        self.is_active
            && matches!(self.status, InternshipStatus::Active | InternshipStatus::Draft)
    }
}

/// One education history entry of a student
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,

    #[serde(default)]
    pub degree: Option<String>,

    #[serde(default)]
    pub field_of_study: Option<String>,

    /// Recorded grade point value (profiles accept 0-10)
    #[serde(default)]
    pub cgpa: Option<f64>,

    #[serde(default)]
    pub current: bool,
}

impl EducationEntry {
    pub fn new(degree: impl Into<String>, field_of_study: impl Into<String>) -> Self {
        Self {
            degree: Some(degree.into()),
            field_of_study: Some(field_of_study.into()),
            ..Self::default()
        }
    }

    pub fn with_cgpa(mut self, cgpa: f64) -> Self {
        self.cgpa = Some(cgpa);
        self
    }
}

/// Student profile fields resolved for an application
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub education: Vec<EducationEntry>,

    #[serde(default)]
    pub university: Option<String>,

    #[serde(default)]
    pub major: Option<String>,

    #[serde(default)]
    pub graduation_year: Option<i32>,
}

impl StudentProfile {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Stored resume reference (filename + storage path)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRef {
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub path: Option<String>,
}

/// A student's submission against one internship
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,

    pub internship_id: String,

    pub student_id: String,

    /// Resolved student record; `None` when the lookup came back empty
    #[serde(default)]
    pub student: Option<StudentProfile>,

    #[serde(default)]
    pub cover_letter: Option<String>,

    #[serde(default)]
    pub resume: Option<ResumeRef>,

    #[serde(default)]
    pub status: ApplicationStatus,

    #[serde(default = "Utc::now")]
    pub applied_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        id: impl Into<String>,
        internship_id: impl Into<String>,
        student: StudentProfile,
    ) -> Self {
        Self {
            id: id.into(),
            internship_id: internship_id.into(),
            student_id: student.id.clone(),
            student: Some(student),
            cover_letter: None,
            resume: None,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        }
    }

    pub fn with_cover_letter(mut self, text: impl Into<String>) -> Self {
        self.cover_letter = Some(text.into());
        self
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }
}

/// Application as stored, before its student is resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,

    pub internship_id: String,

    pub student_id: String,

    #[serde(default)]
    pub cover_letter: Option<String>,

    #[serde(default)]
    pub resume: Option<ResumeRef>,

    #[serde(default)]
    pub status: ApplicationStatus,

    #[serde(default = "Utc::now")]
    pub applied_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Join with the resolved student (if any) into an `Application`
    pub fn resolve(self, student: Option<StudentProfile>) -> Application {
        Application {
            id: self.id,
            internship_id: self.internship_id,
            student_id: self.student_id,
            student,
            cover_letter: self.cover_letter,
            resume: self.resume,
            status: self.status,
            applied_at: self.applied_at,
        }
    }
}

/// Bulk fixture loaded from JSON (companies, internships, students, applications)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub companies: Vec<Company>,

    #[serde(default)]
    pub internships: Vec<Internship>,

    #[serde(default)]
    pub students: Vec<StudentProfile>,

    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
}

impl Dataset {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
