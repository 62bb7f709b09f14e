//! Resume data model shared by the polishing step and every exporter.
//!
//! Field names follow the wizard's camelCase JSON. Every text field defaults to
//! an empty string so a partially filled payload still renders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileType {
    Student,
    SelfTaught,
    #[default]
    Professional,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    #[default]
    Job,
    Project,
    Volunteer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    /// Filled in by the polishing step; raw wizard state may leave it empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub profile_type: ProfileType,
}

impl PersonalInfo {
    /// The summary text, or `""` when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }
}

/// An experience entry after polishing: raw description replaced by bullet points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ExperienceType,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub bullet_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Free text, never validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    /// May contain newlines; each line renders as one bullet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

impl Skills {
    pub fn languages(&self) -> &[String] {
        self.languages.as_deref().unwrap_or_default()
    }

    pub fn certifications(&self) -> &[String] {
        self.certifications.as_deref().unwrap_or_default()
    }
}

/// The aggregate every exporter consumes. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolishedResumeData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
}

// ────────────────────────────────────────────────────────────────────────────
// Raw wizard input (before polishing)
// ────────────────────────────────────────────────────────────────────────────

/// An experience entry as typed into the wizard, with a free-text description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ExperienceType,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The wizard's payload sent to the polishing step.
///
/// `personal_info` and `experiences` are optional on the wire so the polisher
/// can reject incomplete requests with a precise message instead of a serde error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawResumeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<ExperienceBlock>>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn job(id: &str, title: &str, company: &str, bullets: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            id: id.to_string(),
            kind: ExperienceType::Job,
            title: title.to_string(),
            company: company.to_string(),
            start_date: "2021-03".to_string(),
            end_date: "2023-01".to_string(),
            current: false,
            bullet_points: bullets.iter().map(|b| b.to_string()).collect(),
            technologies: None,
            link: None,
        }
    }

    pub fn project(id: &str, title: &str, technologies: &[&str], bullets: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            kind: ExperienceType::Project,
            technologies: Some(technologies.iter().map(|t| t.to_string()).collect()),
            ..job(id, title, "Personal project", bullets)
        }
    }

    pub fn volunteer(id: &str, title: &str, bullets: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            kind: ExperienceType::Volunteer,
            ..job(id, title, "Code Club", bullets)
        }
    }

    pub fn education() -> EducationEntry {
        EducationEntry {
            id: "edu-1".to_string(),
            school: "State University".to_string(),
            degree: "BSc".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2017-09".to_string(),
            end_date: "2021-06".to_string(),
            current: false,
            gpa: Some("3.8".to_string()),
            achievements: Some("Dean's list\n  Robotics team captain  \n\n".to_string()),
        }
    }

    /// A fully populated professional resume.
    pub fn sample_resume() -> PolishedResumeData {
        PolishedResumeData {
            personal_info: PersonalInfo {
                full_name: "Jane Q. Public".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+1 555 0100".to_string(),
                location: "Berlin, Germany".to_string(),
                linkedin: Some("linkedin.com/in/jane".to_string()),
                portfolio: None,
                summary: Some("Built scalable systems. Led a team of 5.".to_string()),
                profile_type: ProfileType::Professional,
            },
            experiences: vec![
                job(
                    "exp-1",
                    "Senior Engineer",
                    "Acme Corp",
                    &["Cut deploy time by 40%", "Mentored 4 engineers"],
                ),
                project("exp-2", "Ledger", &["Rust", "Postgres"], &["Shipped an open-source ledger"]),
                volunteer("exp-3", "Mentor", &["Taught Python to 30 teens"]),
                job("exp-4", "Engineer", "Globex", &["Built billing pipeline"]),
            ],
            education: vec![education()],
            skills: Skills {
                technical: vec!["Rust".to_string(), "SQL".to_string()],
                soft: vec!["Leadership".to_string()],
                languages: Some(vec!["English".to_string(), "German".to_string()]),
                certifications: Some(vec!["AWS Solutions Architect".to_string()]),
            },
        }
    }
}
