use tracing::debug;

use crate::readers::{clean_lines, DocumentReadError, DocumentReader};

/// Reads PDF text through `pdf-extract`, preserving the extractor's line order.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read_lines(&self, bytes: &[u8]) -> Result<Vec<String>, DocumentReadError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentReadError::Pdf(e.to_string()))?;

        let lines = clean_lines(&text);
        debug!("PDF produced {} lines", lines.len());
        Ok(lines)
    }
}
