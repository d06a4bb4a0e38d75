//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}

/// Extensions the pipeline accepts, for CLI validation and directory scans.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["pdf", "docx", "txt", "md", "markdown"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_extensions() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("DOCX"), FileType::Docx);
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        let file_type = FileType::from_extension("xlsx");
        assert_eq!(file_type, FileType::Unknown);
        assert!(!file_type.is_supported());
    }

    #[test]
    fn every_listed_extension_is_detected() {
        for ext in SUPPORTED_EXTENSIONS {
            assert!(FileType::from_extension(ext).is_supported(), "{}", ext);
        }
        assert!(SUPPORTED_EXTENSIONS.contains(&"markdown"));
    }
}
