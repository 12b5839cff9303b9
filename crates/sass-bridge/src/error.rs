//! Errors produced while rendering a stylesheet

use thiserror::Error;

use crate::entry::ImportEntry;

#[derive(Error, Debug)]
pub enum RenderError {
    /// grass rejected the stylesheet. Imports the host failed to resolve
    /// during the compilation are attached, they usually explain the failure.
    #[error("SASS compilation failed: {message}{}", render_failed_imports(.failed_imports))]
    Compile {
        message: String,
        failed_imports: Vec<ImportEntry>,
    },

    /// The entry stylesheet was not among the input files
    #[error("{0} not found in files")]
    MissingEntry(String),
}

/// An output style name that is neither `expanded` nor `compressed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown output style `{0}` (expected `expanded` or `compressed`)")]
pub struct UnknownStyle(pub String);

fn render_failed_imports(failed: &[ImportEntry]) -> String {
    failed
        .iter()
        .filter_map(|entry| Some(format!("\n  {}: {}", entry.url(), entry.error()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_lists_failed_imports() {
        let err = RenderError::Compile {
            message: "Can't find stylesheet to import.".to_string(),
            failed_imports: vec![ImportEntry::failed("missing.scss", "file not found: missing.scss")],
        };
        assert_eq!(
            err.to_string(),
            "SASS compilation failed: Can't find stylesheet to import.\n  missing.scss: file not found: missing.scss"
        );
    }

    #[test]
    fn test_missing_entry() {
        assert_eq!(
            RenderError::MissingEntry("main.scss".to_string()).to_string(),
            "main.scss not found in files"
        );
    }
}
