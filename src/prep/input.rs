use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

pub const MIN_PROMPT_CHARS: usize = 10;
pub const MAX_PDF_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please provide a more detailed prompt (at least 10 characters).")]
    PromptTooShort,
    #[error("File size too large. Please upload a file smaller than 10MB.")]
    FileTooLarge,
    #[error("Please upload a PDF file.")]
    NotPdf,
    #[error("Please enter a valid URL starting with http:// or https://")]
    InvalidUrl,
    #[error("could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Where the case material comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepInput {
    Manual(String),
    Pdf { name: String, bytes: Vec<u8> },
    Url(String),
}

impl PrepInput {
    /// "PDF" or "website" for derived prompts; `None` for a manual prompt.
    pub fn source_label(&self) -> Option<&'static str> {
        match self {
            PrepInput::Manual(_) => None,
            PrepInput::Pdf { .. } => Some("PDF"),
            PrepInput::Url(_) => Some("website"),
        }
    }
}

pub fn validate_prompt(prompt: &str) -> Result<PrepInput, InputError> {
    let trimmed = prompt.trim();
    if trimmed.chars().count() < MIN_PROMPT_CHARS {
        return Err(InputError::PromptTooShort);
    }
    Ok(PrepInput::Manual(prompt.to_owned()))
}

pub fn validate_pdf(name: &str, bytes: Vec<u8>) -> Result<PrepInput, InputError> {
    if bytes.len() as u64 > MAX_PDF_BYTES {
        return Err(InputError::FileTooLarge);
    }
    if !bytes.starts_with(b"%PDF-") {
        return Err(InputError::NotPdf);
    }
    Ok(PrepInput::Pdf { name: name.to_owned(), bytes })
}

/// Check size from metadata before reading the file into memory.
pub fn load_pdf(path: &Path) -> Result<PrepInput, InputError> {
    let unreadable = |e: std::io::Error| InputError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    let meta = std::fs::metadata(path).map_err(unreadable)?;
    if meta.len() > MAX_PDF_BYTES {
        return Err(InputError::FileTooLarge);
    }
    let bytes = std::fs::read(path).map_err(unreadable)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".into());
    validate_pdf(&name, bytes)
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^https?://.+").expect("static regex"))
}

pub fn validate_url(url: &str) -> Result<PrepInput, InputError> {
    if !url_pattern().is_match(url) {
        return Err(InputError::InvalidUrl);
    }
    Ok(PrepInput::Url(url.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_needs_ten_characters_after_trimming() {
        assert_eq!(validate_prompt("   short    ").unwrap_err(), InputError::PromptTooShort);
        assert!(validate_prompt("Profitability case for an e-commerce company").is_ok());
        assert!(validate_prompt("0123456789").is_ok());
        // counts characters, not bytes
        assert_eq!(validate_prompt("ééééé").unwrap_err(), InputError::PromptTooShort);
    }

    #[test]
    fn pdf_size_limit_is_ten_mebibytes() {
        let mut ok = b"%PDF-".to_vec();
        ok.resize(MAX_PDF_BYTES as usize, 0);
        assert!(validate_pdf("a.pdf", ok).is_ok());

        let mut big = b"%PDF-".to_vec();
        big.resize(MAX_PDF_BYTES as usize + 1, 0);
        assert_eq!(validate_pdf("b.pdf", big).unwrap_err(), InputError::FileTooLarge);
    }

    #[test]
    fn pdf_requires_magic_header() {
        assert_eq!(validate_pdf("c.pdf", b"hello".to_vec()).unwrap_err(), InputError::NotPdf);
    }

    #[test]
    fn load_pdf_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casebook.pdf");
        std::fs::write(&path, b"%PDF-1.4 body").unwrap();
        match load_pdf(&path).unwrap() {
            PrepInput::Pdf { name, bytes } => {
                assert_eq!(name, "casebook.pdf");
                assert_eq!(bytes, b"%PDF-1.4 body");
            }
            other => panic!("expected pdf input, got {other:?}"),
        }
        assert!(matches!(
            load_pdf(&dir.path().join("missing.pdf")),
            Err(InputError::Unreadable { .. })
        ));
    }

    #[test]
    fn url_must_start_with_http_scheme() {
        assert!(validate_url("https://example.com/cases").is_ok());
        assert!(validate_url("http://x").is_ok());
        assert_eq!(validate_url("ftp://example.com").unwrap_err(), InputError::InvalidUrl);
        assert_eq!(validate_url("https://").unwrap_err(), InputError::InvalidUrl);
        assert_eq!(validate_url("example.com").unwrap_err(), InputError::InvalidUrl);
    }

    #[test]
    fn source_labels() {
        assert_eq!(PrepInput::Manual("x".into()).source_label(), None);
        assert_eq!(PrepInput::Url("x".into()).source_label(), Some("website"));
    }
}
