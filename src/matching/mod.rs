//! Leaf matchers: skills, free text and education.
//!
//! All functions here are pure and total; degenerate input yields a zero
//! score rather than an error.

pub mod education;
pub mod skills;
pub mod text;

pub use education::{match_education, EducationPolicy};
pub use skills::{match_skills, MatchResult};
pub use text::{extract_keywords, text_similarity, tokenize};
