//! DOCX reader.
//!
//! DOCX files are ZIP archives; body text lives in `word/document.xml`. Each
//! `w:p` paragraph becomes one line (runs concatenated), including paragraphs
//! inside table cells, in document order.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::readers::{clean_lines, DocumentReadError, DocumentReader};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_lines(&self, bytes: &[u8]) -> Result<Vec<String>, DocumentReadError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        match archive.by_name(DOCUMENT_PART) {
            Ok(mut part) => {
                part.read_to_string(&mut xml)?;
            }
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(DocumentReadError::MissingPart(DOCUMENT_PART))
            }
            Err(e) => return Err(e.into()),
        }

        let lines = paragraph_lines(&xml)?;
        debug!("DOCX produced {} lines", lines.len());
        Ok(lines)
    }
}

/// Collects paragraph text from WordprocessingML.
///
/// Nested paragraphs (text boxes) get their own buffer so their text is not
/// glued onto the enclosing paragraph.
fn paragraph_lines(xml: &str) -> Result<Vec<String>, DocumentReadError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut lines = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(ref e) => {
                if let Some(current) = paragraphs.last_mut() {
                    match e.local_name().as_ref() {
                        b"tab" => current.push('\t'),
                        b"br" | b"cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(ref e) => {
                if in_text {
                    if let Some(current) = paragraphs.last_mut() {
                        current.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(paragraph) = paragraphs.pop() {
                        lines.extend(clean_lines(&paragraph));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(lines)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    /// Wraps paragraph XML in a minimal WordprocessingML document.
    pub(crate) fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    /// Builds an in-memory DOCX with one paragraph per line.
    pub(crate) fn docx_bytes(lines: &[&str]) -> Vec<u8> {
        let body: String = lines
            .iter()
            .map(|line| format!("<w:p><w:r><w:t>{line}</w:t></w:r></w:p>"))
            .collect();
        zip_with_part(DOCUMENT_PART, &document_xml(&body))
    }

    pub(crate) fn zip_with_part(name: &str, content: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_reads_paragraphs_in_order() {
        let bytes = docx_bytes(&["张三", "电话：13912345678", "工作经历"]);
        let lines = DocxReader.read_lines(&bytes).unwrap();
        assert_eq!(lines, vec!["张三", "电话：13912345678", "工作经历"]);
    }

    #[test]
    fn test_runs_are_joined_and_blank_paragraphs_dropped() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t xml:space="preserve">Java </w:t></w:r><w:r><w:t>/ Redis</w:t></w:r></w:p>
<w:p></w:p>
<w:p><w:r><w:t>   </w:t></w:r></w:p>
<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t></w:r></w:p>"#,
        );
        let lines = paragraph_lines(&xml).unwrap();
        assert_eq!(lines, vec!["Java / Redis", "A\tB"]);
    }

    #[test]
    fn test_line_breaks_split_paragraph() {
        let xml = document_xml("<w:p><w:r><w:t>第一行</w:t><w:br/><w:t>第二行</w:t></w:r></w:p>");
        assert_eq!(paragraph_lines(&xml).unwrap(), vec!["第一行", "第二行"]);
    }

    #[test]
    fn test_table_cell_paragraphs_included() {
        let xml = document_xml(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>邮箱：a@b.com</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>教育背景</w:t></w:r></w:p>",
        );
        assert_eq!(
            paragraph_lines(&xml).unwrap(),
            vec!["邮箱：a@b.com", "教育背景"]
        );
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let xml = document_xml("<w:p><w:r><w:t>R&amp;D &lt;team&gt;</w:t></w:r></w:p>");
        assert_eq!(paragraph_lines(&xml).unwrap(), vec!["R&D <team>"]);
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = zip_with_part("word/styles.xml", "<w:styles/>");
        let result = DocxReader.read_lines(&bytes);
        assert!(matches!(result, Err(DocumentReadError::MissingPart(_))));
    }

    #[test]
    fn test_not_a_zip_archive() {
        let result = DocxReader.read_lines(b"plain text, not a zip");
        assert!(matches!(result, Err(DocumentReadError::Archive(_))));
    }
}
