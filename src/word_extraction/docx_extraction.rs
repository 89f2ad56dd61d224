// Modern .docx extraction - one read_docx call, then walk the body
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table,
    TableCellContent, TableChild, TableRowChild,
};

use crate::types::{DocumentMetadata, ExtractError, ExtractedDocument};

/// Extract text and metadata from a `.docx` file.
///
/// Paragraph text is collected in document order (blank paragraphs are
/// skipped in the text but still counted in the metadata); table text is
/// appended after the paragraphs, separated by a blank line. The reported
/// page count is really the document's section count - true pagination is
/// a layout-time property this crate does not compute.
pub fn extract_docx(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::Parse(e.to_string()))?;
    let docx = read_docx(&bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    let mut table_texts: Vec<String> = Vec::new();
    let mut paragraph_count = 0usize;
    let mut table_count = 0usize;

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => {
                paragraph_count += 1;
                let text = paragraph_text(p);
                if !text.trim().is_empty() {
                    paragraphs.push(text);
                }
            }
            DocumentChild::Table(table) => {
                table_count += 1;
                let rendered = render_table(table);
                if !rendered.is_empty() {
                    table_texts.push(rendered);
                }
            }
            _ => {}
        }
    }

    let mut full_text = paragraphs.join("\n\n");
    if !table_texts.is_empty() {
        if !full_text.is_empty() {
            full_text.push_str("\n\n");
        }
        full_text.push_str(&table_texts.join("\n\n"));
    }

    let metadata = DocumentMetadata {
        page_count: section_count(&bytes)?,
        file_size: fs::metadata(path)
            .map_err(|e| ExtractError::Parse(e.to_string()))?
            .len(),
        paragraph_count: Some(paragraph_count),
        has_tables: Some(table_count > 0),
    };

    tracing::debug!(
        paragraphs = paragraph_count,
        tables = table_count,
        sections = metadata.page_count,
        "docx parsed"
    );

    Ok(ExtractedDocument {
        text: full_text,
        metadata,
    })
}

/// Sections in the container, counted straight off `word/document.xml`.
/// A body always carries one trailing sectPr; extra ones mark section breaks.
fn section_count(bytes: &[u8]) -> Result<usize, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Parse(format!("malformed docx container: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Parse(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    Ok(xml.matches("<w:sectPr").count().max(1))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    collect_paragraph(paragraph, &mut text);
    text
}

fn collect_paragraph(paragraph: &Paragraph, out: &mut String) {
    for child in &paragraph.children {
        match child {
            ParagraphChild::Run(run) => collect_run(run, out),
            ParagraphChild::Hyperlink(link) => {
                for nested in &link.children {
                    if let ParagraphChild::Run(run) = nested {
                        collect_run(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn collect_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Render a table one row per line: non-empty cell texts joined with " | ",
/// empty cells dropped, rows with nothing left dropped entirely.
fn render_table(table: &Table) -> String {
    let mut rows: Vec<String> = Vec::new();
    for row in &table.rows {
        let TableChild::TableRow(tr) = row;
        let mut cells: Vec<String> = Vec::new();
        for cell in &tr.cells {
            let TableRowChild::TableCell(tc) = cell;
            let mut cell_paragraphs: Vec<String> = Vec::new();
            for content in &tc.children {
                if let TableCellContent::Paragraph(p) = content {
                    cell_paragraphs.push(paragraph_text(p));
                }
            }
            let cell_text = cell_paragraphs.join("\n").trim().to_string();
            if !cell_text.is_empty() {
                cells.push(cell_text);
            }
        }
        if !cells.is_empty() {
            rows.push(cells.join(" | "));
        }
    }
    rows.join("\n")
}
