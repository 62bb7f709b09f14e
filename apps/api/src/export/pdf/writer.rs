//! Serializes a [`PaginatedDocument`] into PDF bytes with `lopdf`.
//!
//! Fonts are the four standard Helvetica faces (no embedding), so all text is
//! transcoded to WinAnsi bytes. Nothing time-dependent is written: the same
//! document always produces the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::export::pdf::flow::Color;
use crate::export::pdf::layout::{LinkArea, Page, PageItem, PaginatedDocument, PlacedRule, PlacedText};
use crate::export::pdf::metrics::FontFace;
use crate::export::ExportError;

const PRODUCER: &str = concat!("folio ", env!("CARGO_PKG_VERSION"));

/// Builds the complete PDF file in memory.
pub fn write_pdf(doc: &PaginatedDocument) -> Result<Vec<u8>, ExportError> {
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = document.add_object(dictionary! { "Font" => fonts });

    let (page_width, page_height) = (doc.setup.width, doc.setup.height);
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(doc.pages.len());

    for page in &doc.pages {
        let content = page_content(page, page_height);
        let content_id = document.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(page_width), real(page_height)],
            "Contents" => content_id,
            "Resources" => resources_id,
        };

        let annots: Vec<Object> = page
            .items
            .iter()
            .filter_map(|item| match item {
                PageItem::Link(link) => Some(link),
                _ => None,
            })
            .map(|link| Object::Reference(document.add_object(link_annotation(link, page_height))))
            .collect();
        if !annots.is_empty() {
            page_dict.set("Annots", annots);
        }

        page_ids.push(document.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&doc.title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    document.trailer.set("Root", catalog_id);
    document.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn page_content(page: &Page, page_height: f32) -> Content {
    let mut ops = Vec::new();
    for item in &page.items {
        match item {
            PageItem::Text(text) => push_text(&mut ops, text, page_height),
            PageItem::Rule(rule) => push_rule(&mut ops, rule, page_height),
            PageItem::Link(_) => {}
        }
    }
    Content { operations: ops }
}

fn color_operands(color: Color) -> Vec<Object> {
    color.components().into_iter().map(real).collect()
}

fn push_text(ops: &mut Vec<Operation>, text: &PlacedText, page_height: f32) {
    if text.text.trim().is_empty() {
        return;
    }
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![text.style.face.resource_name().into(), real(text.style.size)],
    ));
    ops.push(Operation::new("rg", color_operands(text.style.color)));
    ops.push(Operation::new("Tw", vec![real(text.word_spacing)]));
    ops.push(Operation::new(
        "Td",
        vec![real(text.x), real(page_height - text.baseline)],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(&text.text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn push_rule(ops: &mut Vec<Operation>, rule: &PlacedRule, page_height: f32) {
    let y = page_height - rule.y;
    ops.push(Operation::new("w", vec![real(rule.thickness)]));
    ops.push(Operation::new("RG", color_operands(rule.color)));
    ops.push(Operation::new("m", vec![real(rule.x1), real(y)]));
    ops.push(Operation::new("l", vec![real(rule.x2), real(y)]));
    ops.push(Operation::new("S", vec![]));
}

fn link_annotation(link: &LinkArea, page_height: f32) -> Dictionary {
    let bottom = page_height - (link.top + link.height);
    let top = page_height - link.top;
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![real(link.x), real(bottom), real(link.x + link.width), real(top)],
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(link.href.as_bytes().to_vec()),
        },
    }
}

/// Transcodes text to WinAnsiEncoding (CP1252). Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\t' | '\n' | '\r' => b' ',
            _ => win_ansi_extra(c).unwrap_or(b'?'),
        })
        .collect()
}

/// The CP1252 code points in 0x80..=0x9F.
fn win_ansi_extra(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(byte)
}
