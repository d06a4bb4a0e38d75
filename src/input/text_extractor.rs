//! Text extraction for the supported CV formats

use crate::error::{CvExtractError, Result};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(CvExtractError::Io)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            CvExtractError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(CvExtractError::Io)?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| {
            CvExtractError::DocxExtraction(format!(
                "Failed to parse DOCX '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut text = String::new();
        for child in &docx.document.children {
            collect_document_text(child, &mut text);
        }
        Ok(text)
    }
}

fn collect_document_text(element: &docx_rs::DocumentChild, output: &mut String) {
    match element {
        docx_rs::DocumentChild::Paragraph(paragraph) => {
            collect_paragraph_text(paragraph, output);
            output.push('\n');
        }
        docx_rs::DocumentChild::Table(table) => {
            for row in &table.rows {
                let docx_rs::TableChild::TableRow(row) = row;
                for cell in &row.cells {
                    let docx_rs::TableRowChild::TableCell(cell) = cell;
                    for content in &cell.children {
                        if let docx_rs::TableCellContent::Paragraph(paragraph) = content {
                            collect_paragraph_text(paragraph, output);
                            output.push(' ');
                        }
                    }
                }
                output.push('\n');
            }
        }
        _ => {}
    }
}

fn collect_paragraph_text(paragraph: &docx_rs::Paragraph, output: &mut String) {
    for child in &paragraph.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => collect_run_text(run, output),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for nested in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = nested {
                        collect_run_text(run, output);
                    }
                }
            }
            _ => {}
        }
    }
}

fn collect_run_text(run: &docx_rs::Run, output: &mut String) {
    for child in &run.children {
        if let docx_rs::RunChild::Text(text) = child {
            output.push_str(&text.text);
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(CvExtractError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(CvExtractError::Io)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(html_to_text(&html_output))
    }
}

fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let clean_text = HTML_TAG_PATTERN.replace_all(&text, "");

    let lines: Vec<String> = clean_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    #[tokio::test]
    async fn docx_extraction_collects_run_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text("Teacher, Jan 2015 - Dec 2017")),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("British nationality")))
            .build()
            .pack(file)
            .unwrap();

        let text = DocxExtractor.extract(&path).await.unwrap();
        assert!(text.contains("Teacher, Jan 2015 - Dec 2017"));
        assert!(text.contains("British nationality"));
    }

    #[tokio::test]
    async fn markdown_extraction_strips_formatting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.md");
        std::fs::write(&path, "## Experience\n\n**Teacher** at Acme\n").unwrap();

        let text = MarkdownExtractor.extract(&path).await.unwrap();
        assert!(text.contains("Experience"));
        assert!(text.contains("Teacher at Acme"));
        assert!(!text.contains("**"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn html_to_text_unescapes_entities() {
        let text = html_to_text("<p>Maths &amp; Science</p>");
        assert_eq!(text, "Maths & Science");
    }
}
