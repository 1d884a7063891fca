pub mod recommendation;
pub mod records;

pub use recommendation::{
    ApplicantAnalysis, InternshipRecommendations, InternshipSummary, RankedApplicant,
};
pub use records::{
    Application, ApplicationRecord, ApplicationStatus, Company, Dataset, EducationEntry,
    Internship, InternshipStatus, ResumeRef, StudentProfile, ELIGIBLE_STATUSES,
};
