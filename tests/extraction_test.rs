// End-to-end extraction over synthetic fixtures built in-test
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use rstest::rstest;
use tempfile::TempDir;

use wordgrab::config::ExtractionConfig;
use wordgrab::types::ExtractError;
use wordgrab::word_extraction::{extract_doc, extract_docx, extract_file, StrategyId};

fn para(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(para(text))
}

fn write_docx(dir: &TempDir, name: &str, docx: Docx) -> PathBuf {
    let path = dir.path().join(name);
    let file = File::create(&path).unwrap();
    docx.build().pack(file).unwrap();
    path
}

fn write_ole_doc(dir: &TempDir, name: &str, word_stream: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    {
        let mut comp = cfb::create(&path).unwrap();
        {
            let mut stream = comp.create_stream("WordDocument").unwrap();
            stream.write_all(word_stream).unwrap();
        }
        comp.flush().unwrap();
    }
    path
}

fn raw_ole_only() -> ExtractionConfig {
    ExtractionConfig {
        strategies: vec![StrategyId::RawOle],
        ..ExtractionConfig::default()
    }
}

#[test]
fn paragraphs_join_with_blank_lines_and_blanks_still_count() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        &dir,
        "report.docx",
        Docx::new()
            .add_paragraph(para("First paragraph"))
            .add_paragraph(Paragraph::new())
            .add_paragraph(para("Second paragraph")),
    );

    let doc = extract_docx(&path).unwrap();
    assert_eq!(doc.text, "First paragraph\n\nSecond paragraph");
    assert_eq!(doc.metadata.paragraph_count, Some(3));
    assert_eq!(doc.metadata.has_tables, Some(false));
    assert_eq!(doc.metadata.page_count, 1);
    assert_eq!(
        doc.metadata.file_size,
        std::fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn table_text_is_appended_after_paragraphs() {
    let dir = TempDir::new().unwrap();
    let table = Table::new(vec![
        TableRow::new(vec![cell("a"), cell("b")]),
        TableRow::new(vec![cell(""), cell("c")]),
    ]);
    let path = write_docx(
        &dir,
        "tabular.docx",
        Docx::new().add_paragraph(para("Intro text")).add_table(table),
    );

    let doc = extract_docx(&path).unwrap();
    assert_eq!(doc.text, "Intro text\n\na | b\nc");
    assert_eq!(doc.metadata.has_tables, Some(true));
}

#[test]
fn repeated_extraction_is_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        &dir,
        "stable.docx",
        Docx::new()
            .add_paragraph(para("Same input"))
            .add_paragraph(para("same output")),
    );

    let first = extract_docx(&path).unwrap();
    let second = extract_docx(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn garbage_docx_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"this is not a zip container at all").unwrap();

    let err = extract_docx(&path).unwrap_err();
    assert!(matches!(err, ExtractError::Parse(_)));
    assert!(err.to_string().starts_with("error processing Word document"));
}

#[test]
fn doc_pipeline_scrapes_the_ole_container() {
    let dir = TempDir::new().unwrap();
    let path = write_ole_doc(
        &dir,
        "minutes.doc",
        b"\x01\x02Minutes of the annual planning meeting\x00\x00",
    );

    let doc = extract_doc(&path, &raw_ole_only()).unwrap();
    assert_eq!(doc.text, "Minutes of the annual planning meeting");
    assert_eq!(doc.metadata.page_count, 1);
    assert_eq!(doc.metadata.paragraph_count, None);
    assert_eq!(doc.metadata.has_tables, None);
    assert_eq!(
        doc.metadata.file_size,
        std::fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn doc_pipeline_idempotence() {
    let dir = TempDir::new().unwrap();
    let path = write_ole_doc(&dir, "again.doc", b"The same bytes in, the same text out");

    let config = raw_ole_only();
    let first = extract_doc(&path, &config).unwrap();
    let second = extract_doc(&path, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn doc_exhaustion_reports_the_last_cause() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.doc");
    std::fs::write(&path, b"plain bytes, not an OLE container").unwrap();

    let err = extract_doc(&path, &raw_ole_only()).unwrap_err();
    match &err {
        ExtractError::Exhausted { source } => {
            assert!(source.to_string().contains("not a valid OLE file"));
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
    assert!(err.to_string().contains("after trying all strategies"));
}

#[test]
fn doc_below_length_threshold_is_exhaustion() {
    let dir = TempDir::new().unwrap();
    // Scrapes down to "Hi team" - seven characters, under the default gate.
    let path = write_ole_doc(&dir, "stub.doc", b"\x00Hi team\x00");

    let err = extract_doc(&path, &raw_ole_only()).unwrap_err();
    match err {
        ExtractError::Exhausted { source } => {
            assert!(source.to_string().contains("produced only"));
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
}

#[test]
fn missing_doc_file_is_an_io_error() {
    let err = extract_doc(Path::new("/does/not/exist.doc"), &raw_ole_only()).unwrap_err();
    assert!(matches!(err, ExtractError::Io(_)));
}

#[rstest]
#[case("notes.txt")]
#[case("slides.pptx")]
#[case("no_extension")]
fn unsupported_extensions_are_rejected(#[case] name: &str) {
    let err = extract_file(Path::new(name), &ExtractionConfig::default()).unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedExtension(_)));
}

#[test]
fn json_output_shape_differs_per_pipeline() {
    let dir = TempDir::new().unwrap();
    let docx_path = write_docx(&dir, "shape.docx", Docx::new().add_paragraph(para("Hello")));
    let doc_path = write_ole_doc(&dir, "shape.doc", b"Legacy content long enough to pass");

    let config = raw_ole_only();
    let modern = serde_json::to_value(extract_file(&docx_path, &config).unwrap()).unwrap();
    let legacy = serde_json::to_value(extract_file(&doc_path, &config).unwrap()).unwrap();

    assert!(modern["metadata"]["paragraph_count"].is_number());
    assert!(modern["metadata"]["has_tables"].is_boolean());
    assert!(legacy["metadata"].get("paragraph_count").is_none());
    assert_eq!(legacy["metadata"]["page_count"], 1);
}
