//! PresentationML markup for slides and text shapes.

use std::fmt::Write as FmtWrite;

use crate::deck::{
    HAlign, Length, Slide, SlideRole, TextBlock, TextRole, VAlign, SLIDE_HEIGHT_INCHES,
    SLIDE_WIDTH_INCHES,
};
use crate::error::DeckError;

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Slide width in EMU.
pub const SLIDE_WIDTH_EMU: i64 = (SLIDE_WIDTH_INCHES * EMU_PER_INCH) as i64;

/// Slide height in EMU.
pub const SLIDE_HEIGHT_EMU: i64 = (SLIDE_HEIGHT_INCHES * EMU_PER_INCH) as i64;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const PML_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// Bullet indent in EMU (0.3125").
const BULLET_INDENT_EMU: i64 = 285_750;

/// Escape XML special characters.
///
/// Control characters outside tab, LF and CR are not allowed in XML 1.0 and
/// are dropped.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < '\u{20}' => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Convert a length to EMU along an axis of the given extent (in inches).
pub fn to_emu(length: Length, extent_inches: f64) -> i64 {
    (length.resolve_inches(extent_inches) * EMU_PER_INCH).round() as i64
}

fn slide_name(role: SlideRole) -> &'static str {
    match role {
        SlideRole::Title => "Title Slide",
        SlideRole::Content => "Content Slide",
        SlideRole::Fallback => "Response Slide",
    }
}

fn shape_name(role: TextRole) -> &'static str {
    match role {
        TextRole::Heading => "Heading",
        TextRole::Bullet => "Bullet",
        TextRole::Body => "Body",
    }
}

fn align_attr(align: HAlign) -> &'static str {
    match align {
        HAlign::Left => "l",
        HAlign::Center => "ctr",
        HAlign::Right => "r",
    }
}

fn anchor_attr(valign: VAlign) -> &'static str {
    match valign {
        VAlign::Top => "t",
        VAlign::Middle => "ctr",
        VAlign::Bottom => "b",
    }
}

/// Generate the XML part for one slide.
pub fn slide_xml(slide: &Slide) -> Result<String, DeckError> {
    let mut xml = String::with_capacity(1024 + slide.blocks.len() * 768);

    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sld {}>", PML_NAMESPACES)?;
    write!(xml, r#"<p:cSld name="{}">"#, slide_name(slide.role))?;
    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(concat!(
        "<p:grpSpPr><a:xfrm>",
        r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
        r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#,
        "</a:xfrm></p:grpSpPr>"
    ));

    // Shape id 1 is the group; text boxes start at 2
    for (index, block) in slide.blocks.iter().enumerate() {
        text_shape_xml(&mut xml, block, index as u32 + 2)?;
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    Ok(xml)
}

/// Append a text box shape for one block.
pub(crate) fn text_shape_xml(
    xml: &mut String,
    block: &TextBlock,
    shape_id: u32,
) -> Result<(), DeckError> {
    let frame = &block.frame;
    let x = to_emu(frame.x, SLIDE_WIDTH_INCHES);
    let y = to_emu(frame.y, SLIDE_HEIGHT_INCHES);
    let cx = to_emu(frame.width, SLIDE_WIDTH_INCHES);
    let cy = to_emu(frame.height, SLIDE_HEIGHT_INCHES);

    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="{} {}"/>"#,
        shape_id,
        shape_name(block.role),
        shape_id
    )?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, x, y)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, cx, cy)?;
    xml.push_str("</a:xfrm>");
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("<a:noFill/>");
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    write!(
        xml,
        r#"<a:bodyPr wrap="square" rtlCol="0" anchor="{}"><a:normAutofit/></a:bodyPr>"#,
        anchor_attr(block.style.valign)
    )?;
    xml.push_str("<a:lstStyle/>");

    // Body text keeps its line structure as separate paragraphs
    match block.role {
        TextRole::Body => {
            for line in block.text().lines() {
                paragraph_xml(xml, block, line)?;
            }
        }
        TextRole::Heading | TextRole::Bullet => paragraph_xml(xml, block, block.text())?,
    }

    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    Ok(())
}

fn paragraph_xml(xml: &mut String, block: &TextBlock, text: &str) -> Result<(), DeckError> {
    let style = &block.style;
    let align = align_attr(style.align);

    xml.push_str("<a:p>");
    match block.role {
        TextRole::Bullet => {
            write!(
                xml,
                r#"<a:pPr marL="{}" indent="-{}" algn="{}">"#,
                BULLET_INDENT_EMU, BULLET_INDENT_EMU, align
            )?;
            xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#);
            xml.push_str("</a:pPr>");
        }
        TextRole::Heading | TextRole::Body => {
            write!(xml, r#"<a:pPr algn="{}"><a:buNone/></a:pPr>"#, align)?;
        }
    }

    // Font size is stored in hundredths of a point
    let size = (style.font_size * 100.0).round() as u32;
    if text.is_empty() {
        write!(xml, r#"<a:endParaRPr lang="en-US" sz="{}" dirty="0"/>"#, size)?;
    } else {
        xml.push_str("<a:r>");
        write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, size)?;
        if style.bold {
            xml.push_str(r#" b="1""#);
        }
        xml.push_str(r#" dirty="0"/>"#);
        write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
        xml.push_str("</a:r>");
    }
    xml.push_str("</a:p>");

    Ok(())
}
