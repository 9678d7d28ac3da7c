//! Plain-text extraction from PDF and text files

use std::path::Path;

use crate::error::{Error, Result};

/// How long pdf-extract may run before the lopdf fallback takes over
const PDF_EXTRACT_TIMEOUT_SECS: u64 = 60;

/// File types the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Plain text file
    Txt,
    /// Markdown file
    Markdown,
    /// Anything else
    Unknown,
}

impl FileType {
    /// Classify by lowercase extension (without the dot)
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" => Self::Txt,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    /// Classify by the extension of a file name or path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Whether text can be extracted from this type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Replace typographic characters pdf-extract commonly emits with ASCII
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace(['\u{2010}', '\u{2011}', '\u{2013}'], "-")
        .replace('\u{2014}', "--")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace('\u{2022}', "* ")
        .replace('\u{2026}', "...")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
}

/// Stateless text extractor
pub struct FileParser;

impl FileParser {
    /// Extract text from file bytes, dispatching on the file name's extension
    pub fn extract_text(filename: &str, data: &[u8]) -> Result<String> {
        let file_type = FileType::from_path(filename);

        match file_type {
            FileType::Pdf => Self::parse_pdf(filename, data),
            FileType::Txt | FileType::Markdown => Ok(Self::parse_text(data)),
            FileType::Unknown => {
                let extension = Path::new(filename)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("");
                Err(Error::UnsupportedFileType(format!(
                    "'.{}' (supported: .pdf, .txt, .md)",
                    extension
                )))
            }
        }
    }

    /// Lossy UTF-8 decode
    fn parse_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }

    /// Parse a PDF: pdf-extract first, lopdf page text as fallback
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let raw = match Self::extract_pdf_with_timeout(data) {
            Ok(text) => text,
            Err(reason) => {
                tracing::warn!("pdf-extract failed on '{}': {}, trying lopdf", filename, reason);
                Self::extract_pdf_text_fallback(filename, data)?
            }
        };

        let content = cleanup_pdf_text(&raw);
        tracing::debug!("Extracted {} characters from '{}'", content.len(), filename);
        Ok(content)
    }

    /// Run pdf-extract on its own thread so a panic or a hang on odd fonts
    /// cannot take the caller down
    fn extract_pdf_with_timeout(data: &[u8]) -> std::result::Result<String, String> {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result.map_err(|e| e.to_string()));
        });

        match rx.recv_timeout(Duration::from_secs(PDF_EXTRACT_TIMEOUT_SECS)) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(format!(
                "timed out after {}s",
                PDF_EXTRACT_TIMEOUT_SECS
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err("extraction thread crashed".to_string())
            }
        }
    }

    /// Page-by-page extraction with lopdf
    fn extract_pdf_text_fallback(filename: &str, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::extraction(filename, format!("Failed to load PDF: {}", e)))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages.push(text),
                Err(e) => tracing::debug!("No text on page {}: {}", page_number, e),
            }
        }

        Ok(pages.join("\n"))
    }
}
