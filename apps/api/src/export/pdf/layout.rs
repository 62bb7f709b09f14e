//! Page-flow engine: turns a [`FlowDocument`] into positioned text runs, rules
//! and link areas, breaking pages automatically.
//!
//! Coordinates are in points with the origin at the TOP-left corner of the page;
//! the writer flips them into PDF user space.
//!
//! Line breaking is the same greedy word-wrap used for bullet simulation
//! elsewhere: a word goes on the current line if it fits, otherwise it starts
//! the next one. A single word wider than the line is left to overflow.

use serde::Serialize;

use crate::export::pdf::flow::{Align, Block, Color, FlowDocument, Span, Spacing, TextStyle};
use crate::export::pdf::metrics::get_metrics;

/// Line height as a multiple of the largest font size on the line.
const LINE_HEIGHT_FACTOR: f32 = 1.3;
/// Baseline offset from the top of a line, as a multiple of the font size.
const ASCENT_FACTOR: f32 = 0.8;
/// Horizontal gap between the bullet marker and the bullet text.
const BULLET_GAP: f32 = 12.0;
/// Minimum gap between the wrapping left column and right-aligned text.
const COLUMN_GAP: f32 = 12.0;
/// Room kept below a heading so it never ends a page alone.
const KEEP_WITH_NEXT_RESERVE: f32 = 28.0;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageSetup {
    /// A4 portrait with 40pt margins.
    pub const fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin: 40.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paginated output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedText {
    pub x: f32,
    pub baseline: f32,
    pub text: String,
    pub style: TextStyle,
    /// Extra space added to every space character (justification).
    pub word_spacing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkArea {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageItem {
    Text(PlacedText),
    Rule(PlacedRule),
    Link(LinkArea),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<PageItem>,
}

/// The PDF exporter's output: fixed-size pages of positioned primitives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pub title: String,
    pub setup: PageSetup,
    pub pages: Vec<Page>,
}

#[cfg(test)]
impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placed text runs in reading order.
    pub fn texts(&self) -> impl Iterator<Item = &PlacedText> {
        self.pages.iter().flat_map(|p| {
            p.items.iter().filter_map(|item| match item {
                PageItem::Text(text) => Some(text),
                _ => None,
            })
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkArea> {
        self.pages.iter().flat_map(|p| {
            p.items.iter().filter_map(|item| match item {
                PageItem::Link(link) => Some(link),
                _ => None,
            })
        })
    }
}

/// Lays out every block of `flow` onto as many pages as it needs.
pub fn paginate(flow: &FlowDocument, setup: &PageSetup) -> PaginatedDocument {
    let mut cursor = FlowCursor::new(*setup);

    for block in &flow.blocks {
        match block {
            Block::Heading { text, style, spacing } => {
                let span = Span::new(text.clone(), *style);
                let lines = wrap(&tokenize(std::slice::from_ref(&span)), setup.content_width());
                let height: f32 = lines.iter().map(Line::height).sum();
                cursor.begin_block(*spacing, height + KEEP_WITH_NEXT_RESERVE);
                cursor.place_lines(&lines, setup.margin, setup.content_width(), Align::Left);
                cursor.end_block(*spacing);
            }
            Block::Paragraph { spans, align, spacing } => {
                let lines = wrap(&tokenize(spans), setup.content_width());
                cursor.begin_block(*spacing, lines.first().map_or(0.0, Line::height));
                cursor.place_lines(&lines, setup.margin, setup.content_width(), *align);
                cursor.end_block(*spacing);
            }
            Block::TitleRow { left, right, spacing } => {
                cursor.place_title_row(left, right, *spacing);
            }
            Block::Bullet {
                text,
                style,
                marker_color,
                indent,
                spacing,
            } => {
                let marker_x = setup.margin + indent;
                let text_x = marker_x + BULLET_GAP;
                let width = setup.content_width() - indent - BULLET_GAP;
                let span = Span::new(text.clone(), *style);
                let lines = wrap(&tokenize(std::slice::from_ref(&span)), width);

                cursor.begin_block(*spacing, lines.first().map_or(0.0, Line::height));
                if let Some(first) = lines.first() {
                    let marker_style = TextStyle::new(style.face, style.size, *marker_color);
                    cursor.push_text(marker_x, cursor.y + first.ascent(), "•", marker_style, 0.0);
                }
                cursor.place_lines(&lines, text_x, width, Align::Left);
                cursor.end_block(*spacing);
            }
            Block::Rule {
                thickness,
                color,
                spacing,
            } => {
                cursor.begin_block(*spacing, *thickness);
                let y = cursor.y + thickness / 2.0;
                cursor.current.items.push(PageItem::Rule(PlacedRule {
                    x1: setup.margin,
                    x2: setup.margin + setup.content_width(),
                    y,
                    thickness: *thickness,
                    color: *color,
                }));
                cursor.y += thickness;
                cursor.end_block(*spacing);
            }
        }
    }

    PaginatedDocument {
        title: flow.title.clone(),
        setup: *setup,
        pages: cursor.finish(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Words and lines
// ────────────────────────────────────────────────────────────────────────────

/// A contiguous piece of one word in one style.
#[derive(Debug, Clone)]
struct Piece {
    text: String,
    style: TextStyle,
    link: Option<String>,
}

impl Piece {
    fn width(&self) -> f32 {
        get_metrics(self.style.face).measure_pt(&self.text, self.style.size)
    }
}

/// A word may mix styles when spans touch without whitespace (`"Email:"` + `" x"`).
#[derive(Debug, Clone)]
struct Word {
    pieces: Vec<Piece>,
}

impl Word {
    fn width(&self) -> f32 {
        self.pieces.iter().map(Piece::width).sum()
    }

    fn trailing_style(&self) -> TextStyle {
        self.pieces[self.pieces.len() - 1].style
    }

    fn space_width(&self) -> f32 {
        let style = self.trailing_style();
        get_metrics(style.face).space_width * style.size
    }
}

#[derive(Debug, Clone, Default)]
struct Line {
    words: Vec<Word>,
    natural_width: f32,
}

impl Line {
    fn max_size(&self) -> f32 {
        self.words
            .iter()
            .flat_map(|w| w.pieces.iter())
            .map(|p| p.style.size)
            .fold(0.0, f32::max)
    }

    fn height(&self) -> f32 {
        self.max_size() * LINE_HEIGHT_FACTOR
    }

    fn ascent(&self) -> f32 {
        self.max_size() * ASCENT_FACTOR
    }
}

fn tokenize(spans: &[Span]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut glue = false;

    for span in spans {
        if span.text.starts_with(char::is_whitespace) {
            glue = false;
        }
        let mut produced = false;
        for (i, token) in span.text.split_whitespace().enumerate() {
            let piece = Piece {
                text: token.to_string(),
                style: span.style,
                link: span.link.clone(),
            };
            match words.last_mut() {
                Some(last) if i == 0 && glue => last.pieces.push(piece),
                _ => words.push(Word { pieces: vec![piece] }),
            }
            produced = true;
        }
        glue = produced && !span.text.ends_with(char::is_whitespace);
    }

    words
}

/// Greedy word-wrap at `max_width` points.
fn wrap(words: &[Word], max_width: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current = Line::default();

    for word in words {
        let word_w = word.width();
        let space_w = current.words.last().map_or(0.0, Word::space_width);

        if !current.words.is_empty() && current.natural_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.natural_width = word_w;
        } else {
            current.natural_width += space_w + word_w;
        }
        current.words.push(word.clone());
    }

    if !current.words.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct FlowCursor {
    setup: PageSetup,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl FlowCursor {
    fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            current: Page::default(),
            y: setup.margin,
        }
    }

    fn at_page_top(&self) -> bool {
        self.current.items.is_empty()
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = self.setup.margin;
    }

    /// Breaks the page when `height` does not fit below the cursor.
    fn ensure_room(&mut self, height: f32) {
        if !self.at_page_top() && self.y + height > self.setup.content_bottom() {
            self.new_page();
        }
    }

    fn begin_block(&mut self, spacing: Spacing, first_height: f32) {
        if !self.at_page_top() {
            self.y += spacing.before;
        }
        self.ensure_room(first_height);
    }

    fn end_block(&mut self, spacing: Spacing) {
        self.y += spacing.after;
    }

    fn push_text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle, word_spacing: f32) {
        self.current.items.push(PageItem::Text(PlacedText {
            x,
            baseline,
            text: text.to_string(),
            style,
            word_spacing,
        }));
    }

    /// Places wrapped lines starting at `x`, breaking pages between lines as needed.
    fn place_lines(&mut self, lines: &[Line], x: f32, width: f32, align: Align) {
        for (i, line) in lines.iter().enumerate() {
            self.ensure_room(line.height());
            let is_last = i + 1 == lines.len();
            let gaps = line.words.len().saturating_sub(1);
            let word_spacing = if align == Align::Justify && !is_last && gaps > 0 {
                ((width - line.natural_width) / gaps as f32).max(0.0)
            } else {
                0.0
            };
            self.place_line(line, x, word_spacing);
            self.y += line.height();
        }
    }

    /// Emits one run per style change on the line, plus link areas.
    fn place_line(&mut self, line: &Line, x: f32, word_spacing: f32) {
        let top = self.y;
        let baseline = top + line.ascent();
        let height = line.height();

        let mut runs: Vec<Piece> = Vec::new();
        for (wi, word) in line.words.iter().enumerate() {
            for (pi, piece) in word.pieces.iter().enumerate() {
                let leading_space = wi > 0 && pi == 0;
                match runs.last_mut() {
                    Some(run) if run.style == piece.style && run.link == piece.link => {
                        if leading_space {
                            run.text.push(' ');
                        }
                        run.text.push_str(&piece.text);
                    }
                    Some(run) if leading_space => {
                        run.text.push(' ');
                        runs.push(piece.clone());
                    }
                    _ => runs.push(piece.clone()),
                }
            }
        }

        let mut cursor_x = x;
        for run in runs {
            let spaces = run.text.matches(' ').count() as f32;
            let width = run.width() + spaces * word_spacing;
            if let Some(href) = &run.link {
                self.current.items.push(PageItem::Link(LinkArea {
                    x: cursor_x,
                    top,
                    width,
                    height,
                    href: href.clone(),
                }));
            }
            self.push_text(cursor_x, baseline, &run.text, run.style, word_spacing);
            cursor_x += width;
        }
    }

    fn place_title_row(&mut self, left: &[Span], right: &Span, spacing: Spacing) {
        let content_width = self.setup.content_width();
        let right_width = get_metrics(right.style.face).measure_pt(&right.text, right.style.size);
        let left_width = (content_width - right_width - COLUMN_GAP).max(content_width / 2.0);
        let lines = wrap(&tokenize(left), left_width);

        let right_height = right.style.size * LINE_HEIGHT_FACTOR;
        let first_height = lines.first().map_or(0.0, Line::height).max(right_height);
        self.begin_block(spacing, first_height);

        let first_top = self.y;
        let ascent = lines
            .first()
            .map_or(0.0, Line::ascent)
            .max(right.style.size * ASCENT_FACTOR);

        if lines.is_empty() {
            self.y += right_height;
        } else {
            self.place_lines(&lines, self.setup.margin, left_width, Align::Left);
        }
        if !right.text.is_empty() {
            let x = self.setup.margin + content_width - right_width;
            self.push_text(x, first_top + ascent, &right.text, right.style, 0.0);
        }
        self.end_block(spacing);
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.items.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}
