//! Packages a [`WordDocument`] as an Office Open XML (`.docx`) zip archive.
//!
//! Every part is generated with `quick-xml`; entries carry the fixed DOS epoch
//! timestamp and core properties carry no dates, so identical documents yield
//! identical archives.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::export::docx::model::{Justification, Paragraph, Run, TabAlign, WordDocument};
use crate::export::ExportError;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

pub const DOCUMENT_PART: &str = "word/document.xml";

/// Zips every part into one archive.
pub fn write_docx(doc: &WordDocument) -> Result<Vec<u8>, ExportError> {
    let parts: [(&str, Vec<u8>); 6] = [
        ("[Content_Types].xml", content_types()?),
        ("_rels/.rels", package_relationships()?),
        ("word/_rels/document.xml.rels", document_relationships()?),
        (DOCUMENT_PART, document_xml(doc)?),
        ("word/styles.xml", styles_xml()?),
        ("docProps/core.xml", core_properties(&doc.title)?),
    ];

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// XML helpers
// ────────────────────────────────────────────────────────────────────────────

fn xml_part(
    build: impl FnOnce(&mut XmlWriter) -> Result<(), ExportError>,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    build(&mut writer)?;
    Ok(writer.into_inner().into_inner())
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for &attr in attrs {
        elem.push_attribute(attr);
    }
    elem
}

fn start(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
    writer.write_event(Event::Start(element(name, attrs)))?;
    Ok(())
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<(), ExportError> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
    writer.write_event(Event::Empty(element(name, attrs)))?;
    Ok(())
}

fn text_element(
    writer: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<(), ExportError> {
    start(writer, name, attrs)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

// ────────────────────────────────────────────────────────────────────────────
// Package parts
// ────────────────────────────────────────────────────────────────────────────

fn content_types() -> Result<Vec<u8>, ExportError> {
    xml_part(|w| {
        start(w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
        empty(
            w,
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
            ],
        )?;
        empty(w, "Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
        for (part, content_type) in [
            (
                "/word/document.xml",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
            (
                "/word/styles.xml",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
            ),
            (
                "/docProps/core.xml",
                "application/vnd.openxmlformats-package.core-properties+xml",
            ),
        ] {
            empty(w, "Override", &[("PartName", part), ("ContentType", content_type)])?;
        }
        end(w, "Types")
    })
}

fn relationships(entries: &[(&str, &str, &str)]) -> Result<Vec<u8>, ExportError> {
    xml_part(|w| {
        start(w, "Relationships", &[("xmlns", NS_PKG_REL)])?;
        for &(id, kind, target) in entries {
            empty(w, "Relationship", &[("Id", id), ("Type", kind), ("Target", target)])?;
        }
        end(w, "Relationships")
    })
}

fn package_relationships() -> Result<Vec<u8>, ExportError> {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
    ])
}

fn document_relationships() -> Result<Vec<u8>, ExportError> {
    relationships(&[("rId1", REL_STYLES, "styles.xml")])
}

fn styles_xml() -> Result<Vec<u8>, ExportError> {
    xml_part(|w| {
        start(w, "w:styles", &[("xmlns:w", NS_MAIN)])?;
        start(w, "w:docDefaults", &[])?;
        start(w, "w:rPrDefault", &[])?;
        start(w, "w:rPr", &[])?;
        empty(
            w,
            "w:rFonts",
            &[("w:ascii", "Calibri"), ("w:hAnsi", "Calibri"), ("w:cs", "Calibri")],
        )?;
        empty(w, "w:sz", &[("w:val", "20")])?;
        empty(w, "w:szCs", &[("w:val", "20")])?;
        end(w, "w:rPr")?;
        end(w, "w:rPrDefault")?;
        start(w, "w:pPrDefault", &[])?;
        start(w, "w:pPr", &[])?;
        empty(w, "w:spacing", &[("w:after", "0"), ("w:line", "240"), ("w:lineRule", "auto")])?;
        end(w, "w:pPr")?;
        end(w, "w:pPrDefault")?;
        end(w, "w:docDefaults")?;

        start(
            w,
            "w:style",
            &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
        )?;
        empty(w, "w:name", &[("w:val", "Normal")])?;
        empty(w, "w:qFormat", &[])?;
        end(w, "w:style")?;
        end(w, "w:styles")
    })
}

/// Title only; creation and modification dates are left out.
fn core_properties(title: &str) -> Result<Vec<u8>, ExportError> {
    xml_part(|w| {
        start(
            w,
            "cp:coreProperties",
            &[
                (
                    "xmlns:cp",
                    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
                ),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ],
        )?;
        text_element(w, "dc:title", &[], title)?;
        text_element(w, "dc:creator", &[], "folio")?;
        end(w, "cp:coreProperties")
    })
}

fn document_xml(doc: &WordDocument) -> Result<Vec<u8>, ExportError> {
    xml_part(|w| {
        start(w, "w:document", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;
        start(w, "w:body", &[])?;
        for paragraph in &doc.paragraphs {
            write_paragraph(w, paragraph)?;
        }

        let (width, height, margin) = (
            doc.page.width.to_string(),
            doc.page.height.to_string(),
            doc.page.margin.to_string(),
        );
        start(w, "w:sectPr", &[])?;
        empty(w, "w:pgSz", &[("w:w", &width), ("w:h", &height)])?;
        empty(
            w,
            "w:pgMar",
            &[
                ("w:top", &margin),
                ("w:right", &margin),
                ("w:bottom", &margin),
                ("w:left", &margin),
                ("w:header", "0"),
                ("w:footer", "0"),
                ("w:gutter", "0"),
            ],
        )?;
        end(w, "w:sectPr")?;

        end(w, "w:body")?;
        end(w, "w:document")
    })
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph) -> Result<(), ExportError> {
    start(w, "w:p", &[])?;
    start(w, "w:pPr", &[])?;

    // Child order follows CT_PPr.
    if let Some(border) = paragraph.border_bottom {
        let size = border.size.to_string();
        start(w, "w:pBdr", &[])?;
        empty(
            w,
            "w:bottom",
            &[
                ("w:val", "single"),
                ("w:sz", &size),
                ("w:space", "1"),
                ("w:color", border.color),
            ],
        )?;
        end(w, "w:pBdr")?;
    }
    if !paragraph.tabs.is_empty() {
        start(w, "w:tabs", &[])?;
        for tab in &paragraph.tabs {
            let align = match tab.align {
                TabAlign::Left => "left",
                TabAlign::Right => "right",
            };
            let position = tab.position.to_string();
            empty(w, "w:tab", &[("w:val", align), ("w:pos", &position)])?;
        }
        end(w, "w:tabs")?;
    }
    let (before, after) = (
        paragraph.spacing_before.to_string(),
        paragraph.spacing_after.to_string(),
    );
    empty(w, "w:spacing", &[("w:before", &before), ("w:after", &after)])?;
    if paragraph.indent_left > 0 {
        let left = paragraph.indent_left.to_string();
        empty(w, "w:ind", &[("w:left", &left)])?;
    }
    if paragraph.justification == Justification::Both {
        empty(w, "w:jc", &[("w:val", "both")])?;
    }
    end(w, "w:pPr")?;

    for run in &paragraph.runs {
        write_run(w, run)?;
    }
    end(w, "w:p")
}

fn write_run(w: &mut XmlWriter, run: &Run) -> Result<(), ExportError> {
    start(w, "w:r", &[])?;
    start(w, "w:rPr", &[])?;
    if run.bold {
        empty(w, "w:b", &[])?;
    }
    if run.italic {
        empty(w, "w:i", &[])?;
    }
    if let Some(color) = run.color {
        empty(w, "w:color", &[("w:val", color)])?;
    }
    let size = run.size.to_string();
    empty(w, "w:sz", &[("w:val", &size)])?;
    empty(w, "w:szCs", &[("w:val", &size)])?;
    end(w, "w:rPr")?;

    for (i, segment) in run.text.split('\t').enumerate() {
        if i > 0 {
            empty(w, "w:tab", &[])?;
        }
        if !segment.is_empty() {
            text_element(w, "w:t", &[("xml:space", "preserve")], segment)?;
        }
    }
    end(w, "w:r")
}
