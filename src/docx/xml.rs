//! Paragraph splitting and WordprocessingML text markup.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{ArchiveError, Result};

/// Split `text` into paragraphs.
///
/// Paragraphs are separated by one or more blank lines; a line holding
/// only whitespace counts as blank. Lines inside a paragraph are kept and
/// joined with `\n`. Both `\n` and `\r\n` line endings are accepted.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Whether XML 1.0 allows `c` in character data.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Escape the XML-significant characters of `text`.
///
/// Characters XML 1.0 forbids are dropped first. Carriage returns become
/// `&#13;` so parsers do not fold them into line feeds.
pub fn escape(text: &str) -> String {
    let allowed: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    quick_xml::escape::escape(allowed.as_str()).replace('\r', "&#13;")
}

fn emit<'a>(writer: &mut Writer<&mut Vec<u8>>, event: impl Into<Event<'a>>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ArchiveError::Xml(e.to_string()))
}

/// Append one `<w:p>` fragment for `paragraph` to `out`.
///
/// Each line becomes a text element; lines are separated by `<w:br/>`.
pub fn write_paragraph(out: &mut Vec<u8>, paragraph: &str) -> Result<()> {
    let mut writer = Writer::new(out);
    emit(&mut writer, Event::Start(BytesStart::new("w:p")))?;
    emit(&mut writer, Event::Start(BytesStart::new("w:r")))?;
    for (i, line) in paragraph.split('\n').enumerate() {
        if i > 0 {
            emit(&mut writer, Event::Empty(BytesStart::new("w:br")))?;
        }
        let text = BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]);
        emit(&mut writer, Event::Start(text))?;
        emit(&mut writer, Event::Text(BytesText::from_escaped(escape(line))))?;
        emit(&mut writer, Event::End(BytesEnd::new("w:t")))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("w:r")))?;
    emit(&mut writer, Event::End(BytesEnd::new("w:p")))
}
