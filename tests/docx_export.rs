//! End-to-end checks of the exported `.docx` package.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use docxport::docx::{
    self, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART, PACKAGE_RELS_PART, PLACEHOLDER,
};
use docxport::{CONTENT_TYPE, ExportReply, export, handle_request};

/// Unpack an archive into (name, text) pairs.
fn unpack(bytes: &[u8]) -> Vec<(String, String)> {
    let mut reader = zip::ZipArchive::new(Cursor::new(bytes)).expect("readable archive");
    (0..reader.len())
        .map(|i| {
            let mut file = reader.by_index(i).unwrap();
            let mut text = String::new();
            file.read_to_string(&mut text).unwrap();
            (file.name().to_string(), text)
        })
        .collect()
}

/// Parse `xml` start to end, failing on any well-formedness error.
fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0i32;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("{name} is not well-formed: {e}"),
        }
    }
    assert_eq!(depth, 0, "{name} has unclosed elements");
}

/// Unescaped text of every `<w:p>` in a document part. `<w:br/>` becomes `\n`.
fn paragraphs(document: &str) -> Vec<String> {
    let mut reader = Reader::from_str(document);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"w:p" => current.clear(),
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::End(e) if e.name().as_ref() == b"w:p" => out.push(current.clone()),
            Event::Empty(e) if e.name().as_ref() == b"w:br" => current.push('\n'),
            Event::Text(t) if in_text => current.push_str(&t.unescape().unwrap()),
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

fn document_of(archive: &[u8]) -> String {
    unpack(archive)
        .into_iter()
        .find(|(name, _)| name == DOCUMENT_PART)
        .map(|(_, text)| text)
        .expect("document part present")
}

#[test]
fn export_end_to_end() {
    let response = export(Some("Paragraph one.\n\nParagraph two."), Some("My Report")).unwrap();

    assert_eq!(response.attachment_name, "My_Report.docx");
    assert_eq!(response.content_type, CONTENT_TYPE);

    let parts = unpack(&response.bytes);
    let names: Vec<_> = parts.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        [
            CONTENT_TYPES_PART,
            PACKAGE_RELS_PART,
            DOCUMENT_PART,
            DOCUMENT_RELS_PART
        ]
    );
    for (name, xml) in &parts {
        assert_well_formed(name, xml);
    }

    assert_eq!(
        paragraphs(&parts[2].1),
        ["Paragraph one.", "Paragraph two."]
    );
    assert!(parts[0].1.contains("PartName=\"/word/document.xml\""));
    assert!(parts[1].1.contains("Target=\"word/document.xml\""));
}

#[test]
fn blank_input_yields_placeholder() {
    for text in ["", "   "] {
        let archive = docx::build(text).unwrap();
        assert_eq!(paragraphs(&document_of(&archive)), [PLACEHOLDER]);
    }
}

#[test]
fn separator_only_input_yields_placeholder() {
    // Passed straight to the builder, so only its paragraph guard applies
    let archive = docx::build("\n \n\t\n").unwrap();
    assert_eq!(paragraphs(&document_of(&archive)), [PLACEHOLDER]);

    let response = export(Some(" \n\n "), None).unwrap();
    assert_eq!(paragraphs(&document_of(&response.bytes)), [PLACEHOLDER]);
}

#[test]
fn paragraphs_split_on_blank_lines() {
    let archive = docx::build("Hello\n\nWorld").unwrap();
    assert_eq!(paragraphs(&document_of(&archive)), ["Hello", "World"]);
}

#[test]
fn escaping_round_trips() {
    let original = "a < b & c > d \"e\"";
    let archive = docx::build(original).unwrap();
    let document = document_of(&archive);

    assert!(document.contains("a &lt; b &amp; c &gt; d &quot;e&quot;"));
    assert_eq!(paragraphs(&document), [original]);
}

#[test]
fn line_breaks_within_paragraph() {
    let archive = docx::build("Speaker 1: hi\nSpeaker 2: hello\n\nlater").unwrap();
    assert_eq!(
        paragraphs(&document_of(&archive)),
        ["Speaker 1: hi\nSpeaker 2: hello", "later"]
    );
}

#[test]
fn json_request_success() {
    let reply = handle_request(br#"{"text": "Notes", "filename": "report 2024/final?"}"#);
    assert_eq!(reply.status(), 200);
    let ExportReply::Document(response) = reply else {
        panic!("expected a document");
    };
    assert_eq!(response.attachment_name, "report_2024_final_.docx");
    assert_eq!(
        response.content_disposition(),
        "attachment; filename=\"report_2024_final_.docx\""
    );
    assert_eq!(paragraphs(&document_of(&response.bytes)), ["Notes"]);
}

#[test]
fn json_request_malformed() {
    let reply = handle_request(b"text=hello");
    assert_eq!(reply.status(), 400);
    let ExportReply::Failure { body, .. } = reply else {
        panic!("expected a failure");
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({ "error": "Invalid export request" })
    );
}
