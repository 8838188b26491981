use tracing::debug;

use crate::error::{ArchiveError, Result};
use crate::zip::{DosDateTime, Entry, write_archive_at};

use super::xml::{split_paragraphs, write_paragraph};

/// Text used when a transcript has no paragraphs.
pub const PLACEHOLDER: &str = "(No transcript)";

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";
pub const DOCUMENT_PART: &str = "word/document.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2004/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2004/relationships"/>
"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>"#;

const DOCUMENT_TAIL: &str = "</w:body>\n</w:document>";

/// Render the `<w:body>` contents for `text`.
///
/// Returns the markup and the number of paragraphs it holds. Text without
/// any non-blank paragraph renders as a single [`PLACEHOLDER`] paragraph.
pub fn document_body(text: &str) -> Result<(String, usize)> {
    let mut paragraphs = split_paragraphs(text);
    if paragraphs.is_empty() {
        paragraphs.push(PLACEHOLDER.to_string());
    }

    let mut body = Vec::with_capacity(text.len() + paragraphs.len() * 64);
    for paragraph in &paragraphs {
        write_paragraph(&mut body, paragraph)?;
    }
    let body = String::from_utf8(body).map_err(|e| ArchiveError::Xml(e.to_string()))?;
    Ok((body, paragraphs.len()))
}

/// The complete `word/document.xml` part for `text`.
pub fn document_xml(text: &str) -> Result<String> {
    let (body, _) = document_body(text)?;
    Ok([DOCUMENT_HEAD, &body, DOCUMENT_TAIL].concat())
}

/// The four package parts, in archive order.
pub fn parts(text: &str) -> Result<Vec<Entry>> {
    Ok(vec![
        Entry::new(CONTENT_TYPES_PART, CONTENT_TYPES),
        Entry::new(PACKAGE_RELS_PART, PACKAGE_RELS),
        Entry::new(DOCUMENT_PART, document_xml(text)?),
        Entry::new(DOCUMENT_RELS_PART, DOCUMENT_RELS),
    ])
}

/// Build a `.docx` archive holding `text`, stamped with the current time.
pub fn build(text: &str) -> Result<Vec<u8>> {
    build_at(text, DosDateTime::now())
}

/// Build a `.docx` archive holding `text` with a fixed timestamp.
pub fn build_at(text: &str, modified: DosDateTime) -> Result<Vec<u8>> {
    let parts = parts(text)?;
    debug!(
        document_bytes = parts[2].data.len(),
        "assembled document parts"
    );
    write_archive_at(&parts, modified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(body: &str) -> Vec<String> {
        body.split("<w:p>")
            .skip(1)
            .map(|p| {
                p.replace("<w:r>", "")
                    .replace("</w:r></w:p>", "")
                    .replace("<w:t xml:space=\"preserve\">", "")
                    .replace("</w:t>", "")
            })
            .collect()
    }

    #[test]
    fn test_empty_uses_placeholder() {
        for input in ["", "   ", "\n\n", " \n \n "] {
            let (body, count) = document_body(input).unwrap();
            assert_eq!(count, 1, "input {input:?}");
            assert_eq!(texts(&body), vec![PLACEHOLDER]);
        }
    }

    #[test]
    fn test_two_paragraphs_in_order() {
        let (body, count) = document_body("Hello\n\nWorld").unwrap();
        assert_eq!(count, 2);
        assert_eq!(texts(&body), vec!["Hello", "World"]);
    }

    #[test]
    fn test_document_xml_wraps_body() {
        let xml = document_xml("Hi").unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<w:body><w:p><w:r><w:t xml:space=\"preserve\">Hi</w:t></w:r></w:p></w:body>"));
        assert!(xml.ends_with("</w:document>"));
    }

    #[test]
    fn test_parts_order() {
        let names: Vec<_> = parts("x").unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![
                CONTENT_TYPES_PART,
                PACKAGE_RELS_PART,
                DOCUMENT_PART,
                DOCUMENT_RELS_PART
            ]
        );
    }

    #[test]
    fn test_build_is_archive() {
        let archive = build_at("x", DosDateTime::MIN).unwrap();
        assert_eq!(&archive[0..4], b"PK\x03\x04");
        // Same input and timestamp produce identical bytes
        assert_eq!(archive, build_at("x", DosDateTime::MIN).unwrap());
    }
}
