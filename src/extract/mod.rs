//! Turns an uploaded manuscript file into plain text plus an ordered
//! paragraph list for section extraction.
//!
//! DOCX files are read directly from `word/document.xml`; paragraph styles
//! named `Heading*` (or `Title`) mark section headings. PDF and TXT inputs
//! carry no style information, so their paragraphs are never flagged.

use std::{fs, io::Read, path::Path};

use anyhow::{Context, Result, anyhow};
use pdf_extract::extract_text as extract_pdf_text;
use quick_xml::{Reader as XmlReader, events::Event};
use zip::ZipArchive;

use crate::evaluator::Paragraph;

/// Extracted manuscript content: the full text and its paragraphs in
/// document order.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub paragraphs: Vec<Paragraph>,
}

/// Read a manuscript from disk, dispatching on the file extension.
pub fn read_document(path: &Path) -> Result<Document> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "docx" => extract_docx(path),
        "pdf" => {
            let text = extract_pdf_text(path)
                .with_context(|| format!("failed to extract PDF text from {}", path.display()))?;
            Ok(plain_document(&text))
        }
        "txt" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read text file {}", path.display()))?;
            Ok(plain_document(&text))
        }
        other => Err(anyhow!("Unsupported file type: {}", other)),
    }
}

fn plain_document(text: &str) -> Document {
    let paragraphs = text
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(Paragraph::body)
        .collect();

    Document {
        text: text.trim().to_string(),
        paragraphs,
    }
}

fn extract_docx(path: &Path) -> Result<Document> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open DOCX file {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("failed to open DOCX archive {}", path.display()))?;

    let mut document = archive
        .by_name("word/document.xml")
        .with_context(|| format!("missing word/document.xml in {}", path.display()))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .with_context(|| format!("failed to read DOCX XML for {}", path.display()))?;

    let paragraphs = parse_docx_paragraphs(&xml)?;
    let text = paragraphs
        .iter()
        .map(|paragraph| paragraph.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Document { text, paragraphs })
}

fn parse_docx_paragraphs(xml: &str) -> Result<Vec<Paragraph>> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut current_heading = false;
    let mut in_text_node = false;
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if in_paragraph {
                        paragraphs.push(Paragraph::new(current.trim_end(), current_heading));
                        current.clear();
                        current_heading = false;
                    }
                    in_paragraph = true;
                }
                b"w:pStyle" => {
                    if style_is_heading(e)? {
                        current_heading = true;
                    }
                }
                b"w:br" => current.push('\n'),
                b"w:tab" => current.push('\t'),
                b"w:t" => in_text_node = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if in_paragraph {
                        paragraphs.push(Paragraph::new(current.trim_end(), current_heading));
                        current.clear();
                        current_heading = false;
                    }
                    in_paragraph = true;
                }
                b"w:pStyle" => {
                    if style_is_heading(e)? {
                        current_heading = true;
                    }
                }
                b"w:br" => current.push('\n'),
                b"w:tab" => current.push('\t'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_node {
                    let value = e.unescape().map_err(|err| anyhow!(err))?.into_owned();
                    current.push_str(&value);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text_node = false;
                }
                if e.name().as_ref() == b"w:p" {
                    paragraphs.push(Paragraph::new(current.trim_end(), current_heading));
                    current.clear();
                    current_heading = false;
                    in_paragraph = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(anyhow!("failed to parse DOCX XML: {}", err)),
            _ => {}
        }
        buf.clear();
    }

    if !current.is_empty() {
        paragraphs.push(Paragraph::new(current.trim_end(), current_heading));
    }

    Ok(paragraphs)
}

fn style_is_heading(element: &quick_xml::events::BytesStart<'_>) -> Result<bool> {
    let Some(attr) = element
        .try_get_attribute("w:val")
        .map_err(|err| anyhow!(err))?
    else {
        return Ok(false);
    };
    let value = attr.unescape_value().map_err(|err| anyhow!(err))?;
    let value = value.trim();

    let heading_style = value
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("heading"));
    Ok(heading_style || value.eq_ignore_ascii_case("title"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE_DOCX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Sample Manuscript</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Abstract</w:t></w:r></w:p>
    <w:p><w:r><w:t>A short abstract about organizations.</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Keywords</w:t></w:r></w:p>
    <w:p><w:r><w:t>leadership, strategy, teams</w:t></w:r></w:p>
    <w:p><w:r><w:t>Body text after </w:t></w:r><w:r><w:t>a split run.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn write_sample_docx(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("sample.docx");
        let file = fs::File::create(&path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        archive
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        archive.write_all(SAMPLE_DOCX_XML.as_bytes()).unwrap();
        archive.finish().unwrap();
        path
    }

    #[test]
    fn docx_paragraphs_carry_heading_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_docx(dir.path());

        let document = read_document(&path).unwrap();
        let headings: Vec<(&str, bool)> = document
            .paragraphs
            .iter()
            .map(|paragraph| (paragraph.text.as_str(), paragraph.heading))
            .collect();

        assert_eq!(
            headings,
            vec![
                ("Sample Manuscript", true),
                ("Abstract", true),
                ("A short abstract about organizations.", false),
                ("Keywords", true),
                ("leadership, strategy, teams", false),
                ("Body text after a split run.", false),
            ]
        );
    }

    #[test]
    fn docx_text_joins_paragraphs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_docx(dir.path());

        let document = read_document(&path).unwrap();
        assert!(document.text.starts_with("Sample Manuscript\nAbstract\n"));
        assert!(document.text.contains("leadership, strategy, teams"));
    }

    #[test]
    fn txt_input_splits_on_blank_lines_without_headings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manuscript.txt");
        fs::write(&path, "First block line one.\nLine two.\n\nSecond block.\n").unwrap();

        let document = read_document(&path).unwrap();
        assert_eq!(document.paragraphs.len(), 2);
        assert!(document.paragraphs.iter().all(|paragraph| !paragraph.heading));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manuscript.odt");
        fs::write(&path, "irrelevant").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }
}
