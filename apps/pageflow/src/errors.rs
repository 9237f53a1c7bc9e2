use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
///
/// Every variant except `Io`/`Json` is a configuration error: it is detected before any
/// output is written and aborts the run. A split that cannot be made is not an error;
/// the packer defers the block instead.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{} not found", path.display())]
    MissingFile { path: PathBuf },

    #[error("{} is empty", path.display())]
    EmptyFile { path: PathBuf },

    #[error("required parameter '{name}' not found in {source_file}")]
    MissingParameter { name: String, source_file: String },

    #[error("parameter '{name}' in {source_file} has invalid value '{value}'")]
    InvalidParameter {
        name: String,
        source_file: String,
        value: String,
    },

    #[error("unknown paper_size '{value}' (must be one of: {valid})")]
    UnknownPaperSize { value: String, valid: String },

    #[error("sections[{index}].column must be 'left', 'right', or 'full', got '{value}'")]
    InvalidColumn { index: usize, value: String },

    #[error("{source_file} must contain a non-empty 'sections' list")]
    NoSections { source_file: String },

    #[error("no height measurement for '{content_ref}'. Re-run the measurement pass.")]
    MissingHeight { content_ref: String },

    #[error("invalid height value for '{key}': '{value}'")]
    InvalidHeight { key: String, value: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    /// Stable machine-readable code printed next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            LayoutError::MissingFile { .. } => "MISSING_FILE",
            LayoutError::EmptyFile { .. } => "EMPTY_FILE",
            LayoutError::MissingParameter { .. } => "MISSING_PARAMETER",
            LayoutError::InvalidParameter { .. } => "INVALID_PARAMETER",
            LayoutError::UnknownPaperSize { .. } => "UNKNOWN_PAPER_SIZE",
            LayoutError::InvalidColumn { .. } => "INVALID_COLUMN",
            LayoutError::NoSections { .. } => "NO_SECTIONS",
            LayoutError::MissingHeight { .. } => "MISSING_HEIGHT",
            LayoutError::InvalidHeight { .. } => "INVALID_HEIGHT",
            LayoutError::Yaml(_) => "YAML_ERROR",
            LayoutError::Json(_) => "JSON_ERROR",
            LayoutError::Io(_) => "IO_ERROR",
        }
    }

    /// True for the misconfiguration family (everything the user must fix in their inputs).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, LayoutError::Io(_) | LayoutError::Json(_))
    }

    pub(crate) fn missing(name: impl Into<String>, source_file: impl Into<String>) -> Self {
        LayoutError::MissingParameter {
            name: name.into(),
            source_file: source_file.into(),
        }
    }

    pub(crate) fn invalid(
        name: impl Into<String>,
        source_file: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        LayoutError::InvalidParameter {
            name: name.into(),
            source_file: source_file.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_height_message_names_reference() {
        let err = LayoutError::MissingHeight {
            content_ref: "generated/skills.tex".to_string(),
        };
        assert!(err.to_string().contains("generated/skills.tex"));
        assert_eq!(err.code(), "MISSING_HEIGHT");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_parameter_message_names_field_and_file() {
        let err = LayoutError::missing("sections[2].column", "content/layout.yaml");
        assert_eq!(
            err.to_string(),
            "required parameter 'sections[2].column' not found in content/layout.yaml"
        );
    }

    #[test]
    fn test_io_error_is_not_configuration() {
        let err = LayoutError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(err.code(), "IO_ERROR");
        assert!(!err.is_configuration());
    }
}
