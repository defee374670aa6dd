//! OPC package assembly.
//!
//! A deck is written as a minimal but complete PresentationML package:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml, docProps/app.xml
//! ppt/presentation.xml (+ _rels)
//! ppt/presProps.xml
//! ppt/slideMasters/slideMaster1.xml (+ _rels)
//! ppt/slideLayouts/slideLayout1.xml (+ _rels)
//! ppt/theme/theme1.xml
//! ppt/slides/slideN.xml (+ _rels)
//! ```
//!
//! Master, layout and theme are static parts; everything else is generated.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::xml::{escape_xml, slide_xml, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU, XML_DECLARATION};
use crate::deck::Deck;
use crate::error::DeckError;

const SLIDE_MASTER_XML: &str = include_str!("../../resources/pptx/slideMaster1.xml");
const SLIDE_LAYOUT_XML: &str = include_str!("../../resources/pptx/slideLayout1.xml");
const THEME_XML: &str = include_str!("../../resources/pptx/theme1.xml");

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Notes page size used by PowerPoint for a 16:9 deck.
const NOTES_WIDTH_EMU: i64 = 6_858_000;
const NOTES_HEIGHT_EMU: i64 = 9_144_000;

/// First slide id; PowerPoint requires ids >= 256.
const FIRST_SLIDE_ID: usize = 256;
const SLIDE_MASTER_ID: u64 = 2_147_483_648;

/// Render a deck to PPTX bytes, stamped with the current time.
pub fn render_deck(deck: &Deck) -> Result<Bytes, DeckError> {
    render_deck_at(deck, Utc::now())
}

/// Render a deck to PPTX bytes with an explicit creation time.
pub fn render_deck_at(deck: &Deck, created: DateTime<Utc>) -> Result<Bytes, DeckError> {
    if deck.is_empty() {
        return Err(DeckError::EmptyDeck);
    }

    let slide_count = deck.slide_count();
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let mut add = |name: &str, content: &str| -> Result<(), DeckError> {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| DeckError::Package(e.to_string()))?;
        Ok(())
    };

    add("[Content_Types].xml", &content_types_xml(slide_count)?)?;
    add("_rels/.rels", &root_rels_xml())?;
    add("docProps/core.xml", &core_props_xml(&deck.title, created))?;
    add("docProps/app.xml", &app_props_xml(slide_count)?)?;

    add("ppt/presentation.xml", &presentation_xml(slide_count)?)?;
    add(
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels_xml(slide_count)?,
    )?;
    add("ppt/presProps.xml", &pres_props_xml())?;

    add("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML)?;
    add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &relationships_xml(&[
            ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
            ("rId2", "theme", "../theme/theme1.xml"),
        ])?,
    )?;
    add("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML)?;
    add(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &relationships_xml(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")])?,
    )?;
    add("ppt/theme/theme1.xml", THEME_XML)?;

    let slide_rels =
        relationships_xml(&[("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml")])?;
    for (index, slide) in deck.slides().iter().enumerate() {
        let number = index + 1;
        add(&format!("ppt/slides/slide{}.xml", number), &slide_xml(slide)?)?;
        add(
            &format!("ppt/slides/_rels/slide{}.xml.rels", number),
            &slide_rels,
        )?;
    }

    let cursor = zip.finish()?;
    Ok(Bytes::from(cursor.into_inner()))
}

// =============================================================================
// Package parts
// =============================================================================

fn content_types_xml(slide_count: usize) -> Result<String, DeckError> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let overrides = [
        (
            "/ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        ),
        (
            "/ppt/presProps.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        (
            "/ppt/theme/theme1.xml",
            "application/vnd.openxmlformats-officedocument.theme+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part, content_type) in overrides {
        write!(
            xml,
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        )?;
    }

    for number in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            number
        )?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

fn root_rels_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<Relationships xmlns="{}">"#,
            r#"<Relationship Id="rId1" Type="{}/officeDocument" Target="ppt/presentation.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="{}/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        ),
        XML_DECLARATION, REL_NS, REL_TYPE_BASE, REL_TYPE_BASE
    )
}

/// Relationship part from `(id, type suffix, target)` triples.
fn relationships_xml(entries: &[(&str, &str, &str)]) -> Result<String, DeckError> {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{}">"#, REL_NS)?;
    for (id, kind, target) in entries {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
            id, REL_TYPE_BASE, kind, target
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn core_props_xml(title: &str, created: DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        concat!(
            "{decl}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title>",
            "<dc:creator>{creator}</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        decl = XML_DECLARATION,
        title = escape_xml(title),
        creator = env!("CARGO_PKG_NAME"),
        stamp = stamp,
    )
}

fn app_props_xml(slide_count: usize) -> Result<String, DeckError> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    write!(
        xml,
        "<Application>{} {}</Application>",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )?;
    xml.push_str("<PresentationFormat>On-screen Show (16:9)</PresentationFormat>");
    write!(xml, "<Slides>{}</Slides>", slide_count)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

fn presentation_xml(slide_count: usize) -> Result<String, DeckError> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#
    ));
    write!(
        xml,
        r#"<p:sldMasterIdLst><p:sldMasterId id="{}" r:id="rId1"/></p:sldMasterIdLst>"#,
        SLIDE_MASTER_ID
    )?;

    // Slides take rId2..rIdN+1, right after the master
    xml.push_str("<p:sldIdLst>");
    for index in 0..slide_count {
        write!(
            xml,
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            FIRST_SLIDE_ID + index,
            index + 2
        )?;
    }
    xml.push_str("</p:sldIdLst>");

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU
    )?;
    write!(
        xml,
        r#"<p:notesSz cx="{}" cy="{}"/>"#,
        NOTES_WIDTH_EMU, NOTES_HEIGHT_EMU
    )?;
    xml.push_str("<p:defaultTextStyle/>");
    xml.push_str("</p:presentation>");
    Ok(xml)
}

fn presentation_rels_xml(slide_count: usize) -> Result<String, DeckError> {
    let slide_targets: Vec<(String, String)> = (0..slide_count)
        .map(|index| {
            (
                format!("rId{}", index + 2),
                format!("slides/slide{}.xml", index + 1),
            )
        })
        .collect();
    let theme_id = format!("rId{}", slide_count + 2);
    let props_id = format!("rId{}", slide_count + 3);

    let mut entries: Vec<(&str, &str, &str)> =
        vec![("rId1", "slideMaster", "slideMasters/slideMaster1.xml")];
    entries.extend(
        slide_targets
            .iter()
            .map(|(id, target)| (id.as_str(), "slide", target.as_str())),
    );
    entries.push((theme_id.as_str(), "theme", "theme/theme1.xml"));
    entries.push((props_id.as_str(), "presProps", "presProps.xml"));

    relationships_xml(&entries)
}

fn pres_props_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#
        ),
        XML_DECLARATION
    )
}
