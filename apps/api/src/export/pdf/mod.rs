//! PDF Exporter: projects the composed sections into a flow of blocks, lets the
//! page-flow engine paginate it, and serializes the pages with `lopdf`.

pub mod flow;
pub mod layout;
pub mod metrics;
pub mod writer;

use crate::export::pdf::flow::{
    Align, Block, FlowDocument, Span, Spacing, TextStyle, ACCENT, BODY, INK, MUTED, RULE,
};
use crate::export::pdf::layout::{paginate, PageSetup, PaginatedDocument};
use crate::export::pdf::metrics::FontFace;
use crate::export::sections::{
    compose_sections, contact_entries, display_name, document_title, tagline, SectionBody,
    SectionEntry,
};
use crate::export::ExportError;
use crate::models::PolishedResumeData;

const NAME_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 24.0, INK);
const TAGLINE_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 12.0, BODY);
const CONTACT_LABEL_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 9.0, MUTED);
const CONTACT_VALUE_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 9.0, MUTED);
const CONTACT_LINK_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 9.0, ACCENT);
const HEADING_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 12.0, INK);
const SUMMARY_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 10.0, BODY);
const ENTRY_TITLE_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 11.0, INK);
const ENTRY_DATE_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 9.0, MUTED);
const SUBTITLE_STYLE: TextStyle = TextStyle::new(FontFace::Italic, 10.0, BODY);
const DETAIL_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 9.0, MUTED);
const BULLET_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 9.0, BODY);
const SKILL_LABEL_STYLE: TextStyle = TextStyle::new(FontFace::Bold, 9.0, INK);
const SKILL_VALUE_STYLE: TextStyle = TextStyle::new(FontFace::Regular, 9.0, BODY);

const BULLET_INDENT: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct PdfExporter {
    setup: PageSetup,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(PageSetup::a4())
    }
}

impl PdfExporter {
    pub fn new(setup: PageSetup) -> Self {
        Self { setup }
    }

    /// Renders the resume into fixed-size pages.
    pub fn render(&self, data: &PolishedResumeData) -> PaginatedDocument {
        paginate(&build_flow(data), &self.setup)
    }

    /// Renders and serializes to PDF bytes.
    pub fn to_bytes(&self, data: &PolishedResumeData) -> Result<Vec<u8>, ExportError> {
        writer::write_pdf(&self.render(data))
    }
}

/// Builds the block flow: header, contact rows, then one group per composed section.
pub fn build_flow(data: &PolishedResumeData) -> FlowDocument {
    let info = &data.personal_info;
    let mut blocks = Vec::new();

    blocks.push(Block::Paragraph {
        spans: vec![Span::new(display_name(info).to_uppercase(), NAME_STYLE)],
        align: Align::Left,
        spacing: Spacing::new(0.0, 4.0),
    });

    if let Some(tagline) = tagline(info.summary_text()) {
        blocks.push(Block::Paragraph {
            spans: vec![Span::new(tagline, TAGLINE_STYLE)],
            align: Align::Left,
            spacing: Spacing::new(0.0, 6.0),
        });
    }

    for contact in contact_entries(info) {
        let value = match contact.href {
            Some(href) => Span::linked(format!(" {}", contact.value), CONTACT_LINK_STYLE, href),
            None => Span::new(format!(" {}", contact.value), CONTACT_VALUE_STYLE),
        };
        blocks.push(Block::Paragraph {
            spans: vec![Span::new(format!("{}:", contact.label), CONTACT_LABEL_STYLE), value],
            align: Align::Left,
            spacing: Spacing::new(0.0, 1.0),
        });
    }

    blocks.push(Block::Rule {
        thickness: 2.0,
        color: ACCENT,
        spacing: Spacing::new(6.0, 12.0),
    });

    for section in compose_sections(data) {
        blocks.push(Block::Heading {
            text: section.title.to_uppercase(),
            style: HEADING_STYLE,
            spacing: Spacing::new(10.0, 2.0),
        });
        blocks.push(Block::Rule {
            thickness: 0.75,
            color: RULE,
            spacing: Spacing::new(0.0, 6.0),
        });

        match section.body {
            SectionBody::Paragraph(text) => blocks.push(Block::Paragraph {
                spans: vec![Span::new(text, SUMMARY_STYLE)],
                align: Align::Justify,
                spacing: Spacing::new(0.0, 4.0),
            }),
            SectionBody::Entries(entries) => {
                for entry in entries {
                    push_entry(&mut blocks, entry);
                }
            }
            SectionBody::SkillLines(lines) => {
                for line in lines {
                    blocks.push(Block::Paragraph {
                        spans: vec![
                            Span::new(format!("{}:", line.label), SKILL_LABEL_STYLE),
                            Span::new(format!(" {}", line.values), SKILL_VALUE_STYLE),
                        ],
                        align: Align::Left,
                        spacing: Spacing::new(0.0, 3.0),
                    });
                }
            }
            SectionBody::Bullets(items) => {
                for item in items {
                    blocks.push(bullet(item));
                }
            }
        }
    }

    FlowDocument {
        title: document_title(info),
        blocks,
    }
}

fn push_entry(blocks: &mut Vec<Block>, entry: SectionEntry) {
    blocks.push(Block::TitleRow {
        left: vec![Span::new(entry.title, ENTRY_TITLE_STYLE)],
        right: Span::new(entry.date_range, ENTRY_DATE_STYLE),
        spacing: Spacing::new(6.0, 1.0),
    });
    if !entry.subtitle.is_empty() {
        blocks.push(Block::Paragraph {
            spans: vec![Span::new(entry.subtitle, SUBTITLE_STYLE)],
            align: Align::Left,
            spacing: Spacing::new(0.0, 2.0),
        });
    }
    if let Some(detail) = entry.detail {
        blocks.push(Block::Paragraph {
            spans: vec![Span::new(detail, DETAIL_STYLE)],
            align: Align::Left,
            spacing: Spacing::new(0.0, 2.0),
        });
    }
    for text in entry.bullets {
        blocks.push(bullet(text));
    }
}

fn bullet(text: String) -> Block {
    Block::Bullet {
        text,
        style: BULLET_STYLE,
        marker_color: ACCENT,
        indent: BULLET_INDENT,
        spacing: Spacing::new(0.0, 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::sample_resume;
    use crate::models::{PersonalInfo, PolishedResumeData, ProfileType};

    fn page_text(doc: &PaginatedDocument) -> Vec<String> {
        doc.texts().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_header_name_uppercase_and_tagline() {
        let flow = build_flow(&sample_resume());
        let Block::Paragraph { spans, .. } = &flow.blocks[0] else {
            panic!("first block should be the name");
        };
        assert_eq!(spans[0].text, "JANE Q. PUBLIC");
        assert_eq!(spans[0].style.face, FontFace::Bold);

        let Block::Paragraph { spans, .. } = &flow.blocks[1] else {
            panic!("second block should be the tagline");
        };
        assert_eq!(spans[0].text, "Built scalable systems");
    }

    #[test]
    fn test_header_and_title_drop_control_characters() {
        let mut data = sample_resume();
        data.personal_info.full_name = " Jane\u{7} Doe\u{b}".to_string();
        let flow = build_flow(&data);
        let Block::Paragraph { spans, .. } = &flow.blocks[0] else {
            panic!("first block should be the name");
        };
        assert_eq!(spans[0].text, "JANE DOE");
        assert_eq!(flow.title, "Jane Doe Resume");
    }

    #[test]
    fn test_section_headings_follow_composer_order() {
        let mut data = sample_resume();
        data.personal_info.profile_type = ProfileType::Student;
        let flow = build_flow(&data);
        assert_eq!(
            flow.headings(),
            vec![
                "SUMMARY",
                "EDUCATION",
                "WORK EXPERIENCE",
                "ACADEMIC PROJECTS",
                "EXTRACURRICULAR ACTIVITIES",
                "SKILLS",
                "CERTIFICATIONS",
            ]
        );
    }

    #[test]
    fn test_linkedin_link_rendered_with_https_href() {
        let doc = PdfExporter::default().render(&sample_resume());
        let link = doc
            .links()
            .find(|l| l.href.contains("linkedin"))
            .expect("LinkedIn link area");
        assert_eq!(link.href, "https://linkedin.com/in/jane");
        assert!(page_text(&doc).iter().any(|t| t == "linkedin.com/in/jane"));
    }

    #[test]
    fn test_email_is_mail_link() {
        let doc = PdfExporter::default().render(&sample_resume());
        assert!(doc.links().any(|l| l.href == "mailto:jane@example.com"));
    }

    #[test]
    fn test_summary_only_resume_has_only_summary_heading() {
        let data = PolishedResumeData {
            personal_info: PersonalInfo {
                full_name: "Solo Dev".to_string(),
                summary: Some("Generalist engineer".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let flow = build_flow(&data);
        assert_eq!(flow.headings(), vec!["SUMMARY"]);
        assert!(flow.bullets().is_empty());
    }

    #[test]
    fn test_missing_name_renders_without_panic() {
        let data = PolishedResumeData::default();
        let doc = PdfExporter::default().render(&data);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.title, " Resume");
    }

    #[test]
    fn test_date_range_present_on_page() {
        let mut data = sample_resume();
        data.experiences[0].current = true;
        let texts = page_text(&PdfExporter::default().render(&data));
        assert!(texts.iter().any(|t| t == "Mar 2021 — Present"));
    }

    #[test]
    fn test_to_bytes_is_idempotent() {
        let exporter = PdfExporter::default();
        let data = sample_resume();
        let first = exporter.to_bytes(&data).unwrap();
        let second = exporter.to_bytes(&data).unwrap();
        assert!(first.starts_with(b"%PDF"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_many_entries_paginate_automatically() {
        let mut data = sample_resume();
        let template = data.experiences[0].clone();
        for i in 0..40 {
            let mut exp = template.clone();
            exp.id = format!("extra-{i}");
            data.experiences.push(exp);
        }
        let doc = PdfExporter::default().render(&data);
        assert!(doc.page_count() > 1);
    }
}
