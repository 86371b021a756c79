//! Document readers — turn an uploaded binary into ordered, trimmed, non-empty
//! text lines. They stop at line production; structuring belongs to
//! `crate::extraction`.

pub mod docx;
pub mod pdf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX archive has no {0}")]
    MissingPart(&'static str),
}

/// Produces document lines in reading order, each trimmed and non-empty.
pub trait DocumentReader: Send + Sync {
    fn read_lines(&self, bytes: &[u8]) -> Result<Vec<String>, DocumentReadError>;
}

/// Upload format, chosen from the file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    /// Anything else; carries the original filename for diagnostics.
    Unsupported(String),
}

impl DocumentFormat {
    /// Case-insensitive extension match on the uploaded filename.
    pub fn detect(filename: &str) -> Self {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::Unsupported(filename.to_string())
        }
    }

    /// The reader strategy for this format, or `None` when unsupported.
    pub fn reader(&self) -> Option<&'static dyn DocumentReader> {
        match self {
            DocumentFormat::Pdf => Some(&pdf::PdfReader),
            DocumentFormat::Docx => Some(&docx::DocxReader),
            DocumentFormat::Unsupported(_) => None,
        }
    }
}

/// Splits raw text on line breaks, trimming entries and dropping blank ones.
pub(crate) fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(DocumentFormat::detect("resume.PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::detect("简历.Docx"), DocumentFormat::Docx);
    }

    #[test]
    fn test_detect_unsupported() {
        assert_eq!(
            DocumentFormat::detect("resume.doc"),
            DocumentFormat::Unsupported("resume.doc".to_string())
        );
        assert!(matches!(
            DocumentFormat::detect(""),
            DocumentFormat::Unsupported(_)
        ));
        assert!(DocumentFormat::detect("notes.txt").reader().is_none());
    }

    #[test]
    fn test_supported_formats_have_readers() {
        assert!(DocumentFormat::Pdf.reader().is_some());
        assert!(DocumentFormat::Docx.reader().is_some());
    }

    #[test]
    fn test_clean_lines_trims_and_drops_blank() {
        let text = "  张三  \r\n\r\n\t\n电话：13912345678\n   ";
        assert_eq!(clean_lines(text), vec!["张三", "电话：13912345678"]);
    }
}
