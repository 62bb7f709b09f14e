//! Flow-box description of a PDF resume.
//!
//! Blocks carry content and style only. Positions are assigned later by the
//! page-flow engine in `layout.rs`.

use serde::Serialize;

use crate::export::pdf::metrics::FontFace;

/// RGB colour, 0..=255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as PDF operands in 0.0..=1.0.
    pub fn components(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

pub const INK: Color = Color::rgb(0x0f, 0x17, 0x2a);
pub const BODY: Color = Color::rgb(0x33, 0x41, 0x55);
pub const MUTED: Color = Color::rgb(0x64, 0x74, 0x8b);
pub const ACCENT: Color = Color::rgb(0x25, 0x63, 0xeb);
pub const RULE: Color = Color::rgb(0xe2, 0xe8, 0xf0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Color) -> Self {
        Self { face, size, color }
    }
}

/// A run of text in one style, optionally clickable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
    pub link: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    pub fn linked(text: impl Into<String>, style: TextStyle, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
            link: Some(href.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Justify,
}

/// Vertical space around a block, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Spacing {
    pub before: f32,
    pub after: f32,
}

impl Spacing {
    pub const fn new(before: f32, after: f32) -> Self {
        Self { before, after }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Section title. Kept on the same page as the first line of the next block.
    Heading {
        text: String,
        style: TextStyle,
        spacing: Spacing,
    },
    Paragraph {
        spans: Vec<Span>,
        align: Align,
        spacing: Spacing,
    },
    /// Left spans that wrap, plus right-aligned text on the first line.
    TitleRow {
        left: Vec<Span>,
        right: Span,
        spacing: Spacing,
    },
    Bullet {
        text: String,
        style: TextStyle,
        marker_color: Color,
        indent: f32,
        spacing: Spacing,
    },
    Rule {
        thickness: f32,
        color: Color,
        spacing: Spacing,
    },
}

/// The flow handed to the page-flow engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

#[cfg(test)]
impl FlowDocument {
    /// Section headings in order.
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every bullet text in order.
    pub fn bullets(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bullet { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
