//! Section Composer: the one place that decides which resume sections exist,
//! in what order, and under which title.
//!
//! Both exporters are projections of [`compose_sections`]; neither inspects the
//! profile type or the experience buckets on its own.

use serde::Serialize;

use crate::export::dates::format_date_range;
use crate::models::{
    EducationEntry, ExperienceEntry, ExperienceType, PersonalInfo, PolishedResumeData,
    ProfileType,
};

// ────────────────────────────────────────────────────────────────────────────
// Section descriptors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    WorkExperience,
    Projects,
    Volunteer,
    Education,
    Skills,
    Certifications,
}

impl SectionKind {
    /// Fixed, non-editable title. Projects and volunteer work are relabelled for students.
    pub fn title(self, profile: ProfileType) -> &'static str {
        let student = profile == ProfileType::Student;
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::WorkExperience => "Work Experience",
            SectionKind::Projects if student => "Academic Projects",
            SectionKind::Projects => "Projects",
            SectionKind::Volunteer if student => "Extracurricular Activities",
            SectionKind::Volunteer => "Volunteer Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Certifications => "Certifications",
        }
    }
}

/// One titled entry inside a section (a job, a project, a degree).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionEntry {
    pub title: String,
    pub date_range: String,
    pub subtitle: String,
    /// Extra single line under the subtitle (GPA for education).
    pub detail: Option<String>,
    pub bullets: Vec<String>,
}

/// A bold label followed by comma-joined values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLine {
    pub label: &'static str,
    pub values: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Entries(Vec<SectionEntry>),
    SkillLines(Vec<SkillLine>),
    Bullets(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

#[cfg(test)]
impl Section {
    /// Every bullet string in this section, in render order.
    pub fn bullets(&self) -> Vec<&str> {
        match &self.body {
            SectionBody::Entries(entries) => entries
                .iter()
                .flat_map(|e| e.bullets.iter().map(String::as_str))
                .collect(),
            SectionBody::Bullets(items) => items.iter().map(String::as_str).collect(),
            SectionBody::Paragraph(_) | SectionBody::SkillLines(_) => Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

const STUDENT_ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::Education,
    SectionKind::WorkExperience,
    SectionKind::Projects,
    SectionKind::Volunteer,
    SectionKind::Skills,
    SectionKind::Certifications,
];

const EXPERIENCED_ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::WorkExperience,
    SectionKind::Projects,
    SectionKind::Volunteer,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Certifications,
];

/// The full section order for a profile type, including sections that may end up absent.
pub fn section_plan(profile: ProfileType) -> &'static [SectionKind; 7] {
    match profile {
        ProfileType::Student => &STUDENT_ORDER,
        ProfileType::SelfTaught | ProfileType::Professional => &EXPERIENCED_ORDER,
    }
}

/// Builds the ordered list of present sections. Empty sections are omitted entirely.
pub fn compose_sections(data: &PolishedResumeData) -> Vec<Section> {
    let profile = data.personal_info.profile_type;

    section_plan(profile)
        .iter()
        .filter_map(|&kind| {
            compose_body(kind, data).map(|body| Section {
                kind,
                title: kind.title(profile),
                body,
            })
        })
        .collect()
}

fn compose_body(kind: SectionKind, data: &PolishedResumeData) -> Option<SectionBody> {
    match kind {
        SectionKind::Summary => {
            let summary = clean_text(data.personal_info.summary_text());
            (!summary.is_empty()).then_some(SectionBody::Paragraph(summary))
        }
        SectionKind::WorkExperience => experience_body(data, ExperienceType::Job),
        SectionKind::Projects => experience_body(data, ExperienceType::Project),
        SectionKind::Volunteer => experience_body(data, ExperienceType::Volunteer),
        SectionKind::Education => {
            let entries: Vec<SectionEntry> = data.education.iter().map(education_entry).collect();
            (!entries.is_empty()).then_some(SectionBody::Entries(entries))
        }
        SectionKind::Skills => {
            let lines = skill_lines(data);
            (!lines.is_empty()).then_some(SectionBody::SkillLines(lines))
        }
        SectionKind::Certifications => {
            let certs = clean_items(data.skills.certifications().iter().map(String::as_str));
            (!certs.is_empty()).then_some(SectionBody::Bullets(certs))
        }
    }
}

/// Entries of one bucket, preserving their original relative order.
fn experience_body(data: &PolishedResumeData, bucket: ExperienceType) -> Option<SectionBody> {
    let entries: Vec<SectionEntry> = data
        .experiences
        .iter()
        .filter(|e| e.kind == bucket)
        .map(experience_entry)
        .collect();
    (!entries.is_empty()).then_some(SectionBody::Entries(entries))
}

fn experience_entry(exp: &ExperienceEntry) -> SectionEntry {
    let mut subtitle = clean_text(&exp.company);
    let technologies = exp
        .technologies
        .as_deref()
        .map(|t| clean_items(t.iter().map(String::as_str)))
        .unwrap_or_default();
    if !technologies.is_empty() {
        subtitle = format!("{subtitle} • {}", technologies.join(", "));
    }

    SectionEntry {
        title: clean_text(&exp.title),
        date_range: format_date_range(&exp.start_date, &exp.end_date, exp.current),
        subtitle,
        detail: None,
        bullets: clean_items(exp.bullet_points.iter().map(String::as_str)),
    }
}

fn education_entry(edu: &EducationEntry) -> SectionEntry {
    let degree = clean_text(&edu.degree);
    let field = clean_text(&edu.field);
    let title = if field.is_empty() {
        degree
    } else {
        format!("{degree} in {field}")
    };

    let detail = edu
        .gpa
        .as_deref()
        .map(clean_text)
        .filter(|gpa| !gpa.is_empty())
        .map(|gpa| format!("GPA: {gpa}"));

    let bullets = edu
        .achievements
        .as_deref()
        .map(|text| clean_items(text.lines()))
        .unwrap_or_default();

    SectionEntry {
        title,
        date_range: format_date_range(&edu.start_date, &edu.end_date, edu.current),
        subtitle: clean_text(&edu.school),
        detail,
        bullets,
    }
}

/// Skill lines in fixed label order; certifications get their own section.
fn skill_lines(data: &PolishedResumeData) -> Vec<SkillLine> {
    let skills = &data.skills;
    [
        ("Interpersonal", skills.soft.as_slice()),
        ("Technical", skills.technical.as_slice()),
        ("Languages", skills.languages()),
    ]
    .into_iter()
    .filter_map(|(label, values)| {
        let values = clean_items(values.iter().map(String::as_str));
        (!values.is_empty()).then(|| SkillLine {
            label,
            values: values.join(", "),
        })
    })
    .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Header helpers
// ────────────────────────────────────────────────────────────────────────────

/// A contact row: label, visible value, optional link target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactEntry {
    pub label: &'static str,
    pub value: String,
    pub href: Option<String>,
}

/// Visible text and target of a web link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLink {
    pub href: String,
    pub display: String,
}

/// Adds `https://` when the stored value has no http(s) scheme; strips it for display.
pub fn normalize_link(raw: &str) -> WebLink {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    let scheme_len = ["https://", "http://"]
        .iter()
        .find(|scheme| lower.starts_with(*scheme))
        .map(|scheme| scheme.len());

    match scheme_len {
        Some(len) => WebLink {
            href: raw.to_string(),
            display: raw[len..].to_string(),
        },
        None => WebLink {
            href: format!("https://{raw}"),
            display: raw.to_string(),
        },
    }
}

/// Contact rows in fixed order. Blank values are omitted individually.
pub fn contact_entries(info: &PersonalInfo) -> Vec<ContactEntry> {
    let mut entries = Vec::new();

    let phone = clean_text(&info.phone);
    if !phone.is_empty() {
        entries.push(ContactEntry { label: "Phone", value: phone, href: None });
    }

    let email = clean_text(&info.email);
    if !email.is_empty() {
        entries.push(ContactEntry {
            label: "Email",
            href: Some(format!("mailto:{email}")),
            value: email,
        });
    }

    for (label, raw) in [("LinkedIn", &info.linkedin), ("Portfolio", &info.portfolio)] {
        let raw = clean_text(raw.as_deref().unwrap_or_default());
        if raw.is_empty() {
            continue;
        }
        let link = normalize_link(&raw);
        entries.push(ContactEntry {
            label,
            value: link.display,
            href: Some(link.href),
        });
    }

    let location = clean_text(&info.location);
    if !location.is_empty() {
        entries.push(ContactEntry { label: "Location", value: location, href: None });
    }

    entries
}

/// Summary text up to (not including) the first `.`, trimmed. `None` for a blank summary.
pub fn tagline(summary: &str) -> Option<String> {
    let first = summary.split('.').next().unwrap_or_default();
    let tagline = clean_text(first);
    (!tagline.is_empty()).then_some(tagline)
}

/// Full name as printed in the document header.
pub fn display_name(info: &PersonalInfo) -> String {
    clean_text(&info.full_name)
}

/// `"{name} Resume"`, used for the PDF info dictionary and the DOCX core properties.
pub fn document_title(info: &PersonalInfo) -> String {
    format!("{} Resume", display_name(info))
}

/// `Jane Q. Public` → `Jane_Q._Public_Resume.{extension}`.
///
/// Every whitespace run becomes one `_`, leading and trailing runs included.
pub fn resume_file_name(full_name: &str, extension: &str) -> String {
    let mut stem = String::with_capacity(full_name.len());
    let mut in_space = false;
    for c in strip_controls(full_name) {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }
    format!("{stem}_Resume.{extension}")
}

// ────────────────────────────────────────────────────────────────────────────
// Text safety
// ────────────────────────────────────────────────────────────────────────────

/// Trims and drops control characters that neither exporter can carry
/// (XML 1.0 forbids C0 controls other than tab, newline and carriage return).
pub fn clean_text(text: &str) -> String {
    strip_controls(text).collect::<String>().trim().to_string()
}

fn strip_controls(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
}

/// Cleans every item and drops the blank ones.
fn clean_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items
        .into_iter()
        .map(clean_text)
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::{education, job, project, sample_resume, volunteer};
    use crate::models::resume::Skills;
    use crate::models::PersonalInfo;

    fn titles(sections: &[Section]) -> Vec<&'static str> {
        sections.iter().map(|s| s.title).collect()
    }

    fn with_profile(profile: ProfileType) -> PolishedResumeData {
        let mut data = sample_resume();
        data.personal_info.profile_type = profile;
        data
    }

    #[test]
    fn test_student_order_and_labels() {
        let sections = compose_sections(&with_profile(ProfileType::Student));
        assert_eq!(
            titles(&sections),
            vec![
                "Summary",
                "Education",
                "Work Experience",
                "Academic Projects",
                "Extracurricular Activities",
                "Skills",
                "Certifications",
            ]
        );
    }

    #[test]
    fn test_professional_and_self_taught_order_and_labels() {
        let expected = vec![
            "Summary",
            "Work Experience",
            "Projects",
            "Volunteer Experience",
            "Education",
            "Skills",
            "Certifications",
        ];
        for profile in [ProfileType::Professional, ProfileType::SelfTaught] {
            let sections = compose_sections(&with_profile(profile));
            assert_eq!(titles(&sections), expected, "profile {profile:?}");
        }
    }

    #[test]
    fn test_student_omits_empty_buckets_but_keeps_relative_order() {
        let mut data = with_profile(ProfileType::Student);
        data.experiences.retain(|e| e.kind == ExperienceType::Volunteer);
        let kinds: Vec<SectionKind> = compose_sections(&data).iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Summary,
                SectionKind::Education,
                SectionKind::Volunteer,
                SectionKind::Skills,
                SectionKind::Certifications,
            ]
        );
    }

    #[test]
    fn test_buckets_preserve_original_relative_order() {
        let data = sample_resume();
        let sections = compose_sections(&data);
        let work = sections
            .iter()
            .find(|s| s.kind == SectionKind::WorkExperience)
            .unwrap();
        let SectionBody::Entries(entries) = &work.body else {
            panic!("work experience should hold entries");
        };
        let names: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(names, vec!["Senior Engineer", "Engineer"]);
    }

    #[test]
    fn test_summary_only_resume_has_single_section() {
        let data = PolishedResumeData {
            personal_info: PersonalInfo {
                full_name: "Solo".to_string(),
                summary: Some("Generalist.".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let sections = compose_sections(&data);
        assert_eq!(titles(&sections), vec!["Summary"]);
    }

    #[test]
    fn test_blank_summary_is_absent() {
        let mut data = sample_resume();
        data.personal_info.summary = Some("   ".to_string());
        let sections = compose_sections(&data);
        assert!(sections.iter().all(|s| s.kind != SectionKind::Summary));
    }

    #[test]
    fn test_certifications_only_skills_do_not_render_empty_skills_header() {
        let data = PolishedResumeData {
            skills: Skills {
                certifications: Some(vec!["CKA".to_string()]),
                ..Default::default()
            },
            ..Default::default()
        };
        let sections = compose_sections(&data);
        assert_eq!(titles(&sections), vec!["Certifications"]);
    }

    #[test]
    fn test_skill_lines_fixed_label_order() {
        let sections = compose_sections(&sample_resume());
        let skills = sections.iter().find(|s| s.kind == SectionKind::Skills).unwrap();
        let SectionBody::SkillLines(lines) = &skills.body else {
            panic!("skills should hold skill lines");
        };
        let labels: Vec<&str> = lines.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["Interpersonal", "Technical", "Languages"]);
        assert_eq!(lines[1].values, "Rust, SQL");
    }

    #[test]
    fn test_project_subtitle_lists_technologies() {
        let entry = experience_entry(&project("p", "Ledger", &["Rust", "Postgres"], &[]));
        assert_eq!(entry.subtitle, "Personal project • Rust, Postgres");
    }

    #[test]
    fn test_experience_bullets_trimmed_and_blank_dropped() {
        let entry = experience_entry(&job("j", "Dev", "Co", &["  Shipped it  ", "", "   "]));
        assert_eq!(entry.bullets, vec!["Shipped it"]);
    }

    #[test]
    fn test_current_entry_shows_present() {
        let mut exp = volunteer("v", "Mentor", &[]);
        exp.current = true;
        exp.end_date = "2024-02".to_string();
        assert_eq!(experience_entry(&exp).date_range, "Mar 2021 — Present");
    }

    #[test]
    fn test_education_achievements_split_per_line() {
        let entry = education_entry(&education());
        assert_eq!(entry.title, "BSc in Computer Science");
        assert_eq!(entry.detail.as_deref(), Some("GPA: 3.8"));
        assert_eq!(entry.bullets, vec!["Dean's list", "Robotics team captain"]);
    }

    #[test]
    fn test_tagline_before_first_period() {
        assert_eq!(
            tagline("Built scalable systems. Led a team of 5.").as_deref(),
            Some("Built scalable systems")
        );
    }

    #[test]
    fn test_tagline_without_period_is_whole_summary() {
        assert_eq!(
            tagline("  Backend engineer who ships  ").as_deref(),
            Some("Backend engineer who ships")
        );
        assert_eq!(tagline(""), None);
    }

    #[test]
    fn test_file_name_replaces_spaces() {
        assert_eq!(resume_file_name("Jane Q. Public", "pdf"), "Jane_Q._Public_Resume.pdf");
        assert_eq!(resume_file_name("Jane Q. Public", "docx"), "Jane_Q._Public_Resume.docx");
        assert_eq!(resume_file_name("", "pdf"), "_Resume.pdf");
    }

    #[test]
    fn test_file_name_keeps_outer_whitespace_runs() {
        assert_eq!(resume_file_name(" Jane \t Doe ", "pdf"), "_Jane_Doe__Resume.pdf");
        assert_eq!(resume_file_name("Jane\u{b}Doe", "docx"), "JaneDoe_Resume.docx");
    }

    #[test]
    fn test_display_name_and_title_are_cleaned() {
        let info = PersonalInfo {
            full_name: "  Jane\u{0}\u{b} Doe ".to_string(),
            ..PersonalInfo::default()
        };
        assert_eq!(display_name(&info), "Jane Doe");
        assert_eq!(document_title(&info), "Jane Doe Resume");
    }

    #[test]
    fn test_linkedin_normalization() {
        let link = normalize_link("linkedin.com/in/jane");
        assert_eq!(link.href, "https://linkedin.com/in/jane");
        assert_eq!(link.display, "linkedin.com/in/jane");

        let link = normalize_link("https://linkedin.com/in/jane");
        assert_eq!(link.href, "https://linkedin.com/in/jane");
        assert_eq!(link.display, "linkedin.com/in/jane");
    }

    #[test]
    fn test_contact_entries_skip_blank_values() {
        let info = PersonalInfo {
            email: "a@b.c".to_string(),
            location: "  ".to_string(),
            linkedin: Some("linkedin.com/in/a".to_string()),
            ..Default::default()
        };
        let entries = contact_entries(&info);
        let labels: Vec<&str> = entries.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Email", "LinkedIn"]);
        assert_eq!(entries[0].href.as_deref(), Some("mailto:a@b.c"));
    }

    #[test]
    fn test_clean_text_strips_illegal_controls() {
        assert_eq!(clean_text(" a\u{0}b\u{7}c\td "), "abc\td");
    }
}
