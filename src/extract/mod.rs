//! Turning uploaded files into text.
//!
//! Only plain text is decoded. PDF and word-processor uploads are recognised
//! by extension and rejected as unsupported.

use std::path::Path;

use thiserror::Error;

use crate::config::ExtractionConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("Content unreadable: {0}")]
    Unreadable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    PlainText,
    Pdf,
    WordProcessor,
    Unknown,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Self {
        match extension(filename).as_deref() {
            Some("txt" | "text" | "md") => FileFormat::PlainText,
            Some("pdf") => FileFormat::Pdf,
            Some("doc" | "docx" | "odt" | "rtf") => FileFormat::WordProcessor,
            _ => FileFormat::Unknown,
        }
    }
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Text pulled out of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    /// The upload exceeded the size limit and only its prefix was decoded.
    pub truncated: bool,
}

pub trait TextExtractor {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Result<Extraction, ExtractError>;
}

#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor {
    config: ExtractionConfig,
}

impl PlainTextExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    fn is_allowed(&self, filename: &str) -> bool {
        extension(filename).is_some_and(|ext| {
            self.config
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Result<Extraction, ExtractError> {
        // Binary document formats are never decoded, whatever the allow-list says.
        let format = FileFormat::from_filename(filename);
        let binary = matches!(format, FileFormat::Pdf | FileFormat::WordProcessor);
        if binary || !self.is_allowed(filename) {
            return Err(ExtractError::UnsupportedFormat(filename.to_string()));
        }

        let truncated = bytes.len() > self.config.max_bytes;
        let bytes = if truncated {
            log::debug!(
                "{filename}: {} bytes exceeds limit {}, truncating",
                bytes.len(),
                self.config.max_bytes
            );
            &bytes[..self.config.max_bytes]
        } else {
            bytes
        };

        let text = decode_utf8(bytes, truncated)
            .map_err(|e| ExtractError::Unreadable(format!("{filename}: {e}")))?;

        Ok(Extraction {
            text: text.to_string(),
            truncated,
        })
    }
}

/// Decode UTF-8. When the input was cut short, an incomplete trailing
/// character is dropped rather than treated as corruption.
fn decode_utf8(bytes: &[u8], truncated: bool) -> Result<&str, std::str::Utf8Error> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) if truncated && e.error_len().is_none() => {
            // Prefix up to valid_up_to is valid by construction.
            std::str::from_utf8(&bytes[..e.valid_up_to()])
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_are_detected_case_insensitively() {
        assert_eq!(FileFormat::from_filename("essay.TXT"), FileFormat::PlainText);
        assert_eq!(FileFormat::from_filename("essay.pdf"), FileFormat::Pdf);
        assert_eq!(FileFormat::from_filename("essay.Docx"), FileFormat::WordProcessor);
        assert_eq!(FileFormat::from_filename("essay"), FileFormat::Unknown);
        assert_eq!(FileFormat::from_filename("archive.zip"), FileFormat::Unknown);
    }

    #[test]
    fn configured_extensions_are_decoded() {
        let extractor = PlainTextExtractor::new(ExtractionConfig {
            allowed_extensions: vec!["CSV".into()],
            ..ExtractionConfig::default()
        });

        let result = extractor.extract("grades.csv", b"name,score").unwrap();
        assert_eq!(result.text, "name,score");
        assert!(matches!(
            extractor.extract("essay.txt", b"text"),
            Err(ExtractError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn binary_formats_stay_unsupported_when_listed() {
        let extractor = PlainTextExtractor::new(ExtractionConfig {
            allowed_extensions: vec!["pdf".into(), "docx".into()],
            ..ExtractionConfig::default()
        });

        for name in ["essay.pdf", "essay.docx"] {
            assert_eq!(
                extractor.extract(name, b"%PDF"),
                Err(ExtractError::UnsupportedFormat(name.to_string()))
            );
        }
    }

    #[test]
    fn truncation_never_splits_a_character() {
        let extractor = PlainTextExtractor::new(ExtractionConfig {
            max_bytes: 2,
            ..ExtractionConfig::default()
        });
        // "é" is two bytes; the cut lands inside it.
        let result = extractor.extract("a.txt", "aé".as_bytes()).unwrap();
        assert_eq!(result.text, "a");
        assert!(result.truncated);
    }
}
