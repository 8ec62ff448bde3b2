//! Rendered report artifacts and their temporary-file spooling.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::slug::slugify;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A rendered invoice document ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    bytes: Vec<u8>,
    file_name: String,
}

impl ReportArtifact {
    /// Build a PDF artifact named after the invoice number. Numbers
    /// that slugify to nothing fall back to the stem `invoice`.
    pub fn pdf(number: &str, bytes: Vec<u8>) -> Self {
        let mut stem = slugify(number);
        if stem.is_empty() {
            stem = "invoice".to_string();
        }
        Self {
            bytes,
            file_name: format!("invoice-{stem}.pdf"),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }

    /// Write the document to a named temporary file. The file is
    /// deleted when the returned handle drops, success or failure.
    pub fn spool(&self) -> io::Result<SpooledReport> {
        let mut file = tempfile::Builder::new()
            .prefix("billhub-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(&self.bytes)?;
        file.flush()?;
        Ok(SpooledReport { file })
    }
}

/// Temporary on-disk copy of a report, removed on drop.
pub struct SpooledReport {
    file: NamedTempFile,
}

impl SpooledReport {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_keeps_renderer_bytes_unaltered() {
        let bytes = b"%PDF-1.4 fake".to_vec();
        let artifact = ReportArtifact::pdf("2024-001", bytes.clone());
        assert_eq!(artifact.bytes(), bytes.as_slice());
        assert_eq!(artifact.into_bytes(), bytes);
    }

    #[test]
    fn file_name_is_slugged_invoice_number() {
        let artifact = ReportArtifact::pdf("2024-00123/A", Vec::new());
        assert_eq!(artifact.file_name(), "invoice-2024-00123-a.pdf");
    }

    #[test]
    fn blank_number_falls_back_to_invoice_stem() {
        let artifact = ReportArtifact::pdf("   ", Vec::new());
        assert_eq!(artifact.file_name(), "invoice-invoice.pdf");
    }

    #[test]
    fn spooled_file_holds_the_bytes_and_is_removed_on_drop() {
        let artifact = ReportArtifact::pdf("2024-002", b"%PDF spool".to_vec());
        let spooled = artifact.spool().unwrap();
        let path = spooled.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes());
        drop(spooled);
        assert!(!path.exists());
    }
}
