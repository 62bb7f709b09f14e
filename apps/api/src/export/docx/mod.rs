//! Word-Processor Exporter: projects the composed sections into paragraphs and
//! runs, then packages them as a `.docx` archive.

pub mod model;
pub mod package;

use crate::export::docx::model::{
    DocxPageSetup, Paragraph, ParagraphKind, Run, TabAlign, WordDocument, BULLET_PREFIX,
};
use crate::export::sections::{
    compose_sections, contact_entries, display_name, document_title, tagline, SectionBody,
    SectionEntry,
};
use crate::export::ExportError;
use crate::models::PolishedResumeData;

// Half-point run sizes.
const NAME_SIZE: u32 = 44;
const TAGLINE_SIZE: u32 = 24;
const HEADING_SIZE: u32 = 22;
const TITLE_SIZE: u32 = 22;
const TEXT_SIZE: u32 = 20;

const NAME_COLOR: &str = "1A365D";
const SUBTLE_COLOR: &str = "333333";
const ACCENT_COLOR: &str = "2D5986";

const CONTACT_LABEL_TAB: u32 = 1800;
const CONTACT_VALUE_TAB: u32 = 2100;
const BULLET_INDENT: u32 = 360;

#[derive(Debug, Clone)]
pub struct DocxExporter {
    page: DocxPageSetup,
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new(DocxPageSetup::a4())
    }
}

impl DocxExporter {
    pub fn new(page: DocxPageSetup) -> Self {
        Self { page }
    }

    pub fn render(&self, data: &PolishedResumeData) -> WordDocument {
        let info = &data.personal_info;
        let mut paragraphs = Vec::new();

        paragraphs.push(
            Paragraph::new(
                ParagraphKind::Name,
                vec![Run::new(display_name(info).to_uppercase(), NAME_SIZE)
                    .bold()
                    .color(NAME_COLOR)],
            )
            .spacing(0, 40),
        );

        if let Some(tagline) = tagline(info.summary_text()) {
            paragraphs.push(
                Paragraph::new(
                    ParagraphKind::Tagline,
                    vec![Run::new(tagline, TAGLINE_SIZE).color(SUBTLE_COLOR)],
                )
                .spacing(0, 160),
            );
        }

        for contact in contact_entries(info) {
            let mut value = Run::new(contact.value, TEXT_SIZE);
            if contact.href.is_some() {
                value = value.color(ACCENT_COLOR);
            }
            paragraphs.push(
                Paragraph::new(
                    ParagraphKind::Contact,
                    vec![
                        Run::new(contact.label, TEXT_SIZE).bold(),
                        Run::new("\t:\t", TEXT_SIZE),
                        value,
                    ],
                )
                .tab(TabAlign::Left, CONTACT_LABEL_TAB)
                .tab(TabAlign::Left, CONTACT_VALUE_TAB)
                .spacing(0, 40),
            );
        }

        for section in compose_sections(data) {
            paragraphs.push(
                Paragraph::new(
                    ParagraphKind::Heading,
                    vec![Run::new(section.title.to_uppercase(), HEADING_SIZE).bold()],
                )
                .border_bottom(12, ACCENT_COLOR)
                .spacing(240, 120),
            );

            match section.body {
                SectionBody::Paragraph(text) => paragraphs.push(
                    Paragraph::new(ParagraphKind::Body, vec![Run::new(text, TEXT_SIZE)])
                        .justified()
                        .spacing(0, 120),
                ),
                SectionBody::Entries(entries) => {
                    for entry in entries {
                        self.push_entry(&mut paragraphs, entry);
                    }
                }
                SectionBody::SkillLines(lines) => {
                    for line in lines {
                        paragraphs.push(
                            Paragraph::new(
                                ParagraphKind::SkillLine,
                                vec![
                                    Run::new(format!("{}: ", line.label), TEXT_SIZE).bold(),
                                    Run::new(line.values, TEXT_SIZE),
                                ],
                            )
                            .spacing(0, 60),
                        );
                    }
                }
                SectionBody::Bullets(items) => {
                    paragraphs.extend(items.into_iter().map(bullet));
                }
            }
        }

        WordDocument {
            title: document_title(info),
            page: self.page,
            paragraphs,
        }
    }

    pub fn to_bytes(&self, data: &PolishedResumeData) -> Result<Vec<u8>, ExportError> {
        package::write_docx(&self.render(data))
    }

    fn push_entry(&self, paragraphs: &mut Vec<Paragraph>, entry: SectionEntry) {
        paragraphs.push(
            Paragraph::new(
                ParagraphKind::EntryTitle,
                vec![
                    Run::new(entry.title, TITLE_SIZE).bold(),
                    Run::new("\t", TITLE_SIZE),
                    Run::new(entry.date_range, TEXT_SIZE),
                ],
            )
            .tab(TabAlign::Right, self.page.text_width())
            .spacing(120, 0),
        );
        if !entry.subtitle.is_empty() {
            paragraphs.push(
                Paragraph::new(
                    ParagraphKind::Subtitle,
                    vec![Run::new(entry.subtitle, TEXT_SIZE).italic().color(SUBTLE_COLOR)],
                )
                .spacing(0, 60),
            );
        }
        if let Some(detail) = entry.detail {
            paragraphs.push(
                Paragraph::new(ParagraphKind::Detail, vec![Run::new(detail, TEXT_SIZE)])
                    .spacing(0, 40),
            );
        }
        paragraphs.extend(entry.bullets.into_iter().map(bullet));
    }
}

fn bullet(text: String) -> Paragraph {
    Paragraph::new(
        ParagraphKind::Bullet,
        vec![Run::new(format!("{BULLET_PREFIX}{text}"), TEXT_SIZE)],
    )
    .indent(BULLET_INDENT)
    .spacing(0, 40)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::pdf::build_flow;
    use crate::models::resume::fixtures::sample_resume;
    use crate::models::{PersonalInfo, ProfileType};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn content_equivalent(data: &PolishedResumeData) {
        let flow = build_flow(data);
        let doc = DocxExporter::default().render(data);
        assert_eq!(doc.headings(), flow.headings());
        assert_eq!(doc.bullets(), flow.bullets());
        assert_eq!(doc.title, flow.title);
    }

    #[test]
    fn test_content_matches_pdf_for_every_profile() {
        for profile in [ProfileType::Student, ProfileType::SelfTaught, ProfileType::Professional] {
            let mut data = sample_resume();
            data.personal_info.profile_type = profile;
            content_equivalent(&data);
        }
    }

    #[test]
    fn test_content_matches_pdf_for_sparse_resume() {
        let data = PolishedResumeData {
            personal_info: PersonalInfo {
                full_name: "Solo".to_string(),
                summary: Some("Just a summary".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        content_equivalent(&data);
        assert_eq!(DocxExporter::default().render(&data).headings(), vec!["SUMMARY"]);
    }

    #[test]
    fn test_contact_rows_use_tab_stops() {
        let doc = DocxExporter::default().render(&sample_resume());
        let email = doc
            .of_kind(ParagraphKind::Contact)
            .find(|p| p.text().starts_with("Email"))
            .unwrap();
        assert_eq!(email.text(), "Email\t:\tjane@example.com");
        let positions: Vec<u32> = email.tabs.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1800, 2100]);
        assert_eq!(email.runs[2].color, Some(ACCENT_COLOR));
    }

    #[test]
    fn test_headings_have_bottom_border() {
        let doc = DocxExporter::default().render(&sample_resume());
        assert!(doc
            .of_kind(ParagraphKind::Heading)
            .all(|p| p.border_bottom.is_some()));
    }

    #[test]
    fn test_entry_title_right_tab_at_text_width() {
        let doc = DocxExporter::default().render(&sample_resume());
        let title = doc.of_kind(ParagraphKind::EntryTitle).next().unwrap();
        assert_eq!(title.tabs[0].align, TabAlign::Right);
        assert_eq!(title.tabs[0].position, DocxPageSetup::a4().text_width());
        assert!(title.text().ends_with("Mar 2021 — Jan 2023"));
    }

    #[test]
    fn test_bullets_are_indented_with_marker() {
        let doc = DocxExporter::default().render(&sample_resume());
        let bullet = doc.of_kind(ParagraphKind::Bullet).next().unwrap();
        assert!(bullet.text().starts_with("• "));
        assert_eq!(bullet.indent_left, 360);
    }

    #[test]
    fn test_to_bytes_is_valid_and_idempotent() {
        let exporter = DocxExporter::default();
        let data = sample_resume();
        let first = exporter.to_bytes(&data).unwrap();
        assert_eq!(first, exporter.to_bytes(&data).unwrap());

        let mut archive = ZipArchive::new(Cursor::new(first.as_slice())).unwrap();
        let mut xml = String::new();
        archive
            .by_name(package::DOCUMENT_PART)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("JANE Q. PUBLIC"));
        assert!(xml.contains("WORK EXPERIENCE"));
    }

    #[test]
    fn test_control_characters_in_name_never_reach_package() {
        let mut data = sample_resume();
        data.personal_info.full_name = "Jane\u{b}Doe\u{0}".to_string();
        let bytes = DocxExporter::default().to_bytes(&data).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        for part in [package::DOCUMENT_PART, "docProps/core.xml"] {
            let mut xml = String::new();
            archive.by_name(part).unwrap().read_to_string(&mut xml).unwrap();
            assert!(
                !xml.chars().any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')),
                "{part} carries a control character"
            );
            assert!(xml.to_uppercase().contains("JANEDOE"), "{part} lost the name");
        }
    }

    #[test]
    fn test_missing_name_does_not_panic() {
        let doc = DocxExporter::default().render(&PolishedResumeData::default());
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].text(), "");
    }
}
