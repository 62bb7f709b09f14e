//! In-memory WordprocessingML document: paragraphs of styled runs.
//!
//! All measurements are in twentieths of a point (twips) except run sizes,
//! which WordprocessingML counts in half-points.

use serde::Serialize;

/// A4 portrait in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocxPageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl DocxPageSetup {
    pub const fn a4() -> Self {
        Self {
            width: 11906,
            height: 16838,
            margin: 720,
        }
    }

    /// Usable line width; right-aligned tab stops sit here.
    pub fn text_width(&self) -> u32 {
        self.width - 2 * self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParagraphKind {
    Name,
    Tagline,
    Contact,
    Heading,
    EntryTitle,
    Subtitle,
    Detail,
    Bullet,
    SkillLine,
    Body,
}

/// A run of text in one format. A `\t` inside `text` is written as a tab element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Half-points.
    pub size: u32,
    /// `RRGGBB`, no leading `#`.
    pub color: Option<&'static str>,
}

impl Run {
    pub fn new(text: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            size,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TabAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabStop {
    pub align: TabAlign,
    pub position: u32,
}

/// Single line under the paragraph, the DOCX stand-in for a horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BottomBorder {
    /// Eighths of a point.
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Justification {
    Left,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub runs: Vec<Run>,
    pub tabs: Vec<TabStop>,
    pub justification: Justification,
    pub indent_left: u32,
    pub spacing_before: u32,
    pub spacing_after: u32,
    pub border_bottom: Option<BottomBorder>,
}

impl Paragraph {
    pub fn new(kind: ParagraphKind, runs: Vec<Run>) -> Self {
        Self {
            kind,
            runs,
            tabs: Vec::new(),
            justification: Justification::Left,
            indent_left: 0,
            spacing_before: 0,
            spacing_after: 0,
            border_bottom: None,
        }
    }

    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.spacing_before = before;
        self.spacing_after = after;
        self
    }

    pub fn tab(mut self, align: TabAlign, position: u32) -> Self {
        self.tabs.push(TabStop { align, position });
        self
    }

    pub fn justified(mut self) -> Self {
        self.justification = Justification::Both;
        self
    }

    pub fn indent(mut self, left: u32) -> Self {
        self.indent_left = left;
        self
    }

    pub fn border_bottom(mut self, size: u32, color: &'static str) -> Self {
        self.border_bottom = Some(BottomBorder { size, color });
        self
    }
}

#[cfg(test)]
impl Paragraph {
    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The DOCX exporter's output before packaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordDocument {
    pub title: String,
    pub page: DocxPageSetup,
    pub paragraphs: Vec<Paragraph>,
}

#[cfg(test)]
impl WordDocument {
    pub fn headings(&self) -> Vec<String> {
        self.of_kind(ParagraphKind::Heading).map(Paragraph::text).collect()
    }

    /// Bullet texts without the literal marker.
    pub fn bullets(&self) -> Vec<String> {
        self.of_kind(ParagraphKind::Bullet)
            .map(|p| {
                let text = p.text();
                match text.strip_prefix(BULLET_PREFIX) {
                    Some(rest) => rest.to_string(),
                    None => text,
                }
            })
            .collect()
    }

    pub fn of_kind(&self, kind: ParagraphKind) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter().filter(move |p| p.kind == kind)
    }
}

pub const BULLET_PREFIX: &str = "• ";
