// ABOUTME: Error taxonomy for the Clipdrop SDK with actionable messages
// ABOUTME: Every variant names the constraint that failed so callers can react without digging

use std::fmt;
use thiserror::Error;

/// Which side of an operation a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Input,
    Output,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Input => write!(f, "Input file"),
            FileRole::Output => write!(f, "Output file"),
        }
    }
}

/// Image measurement checked against a resolution limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Megapixels,
    Width,
    Height,
}

impl Measure {
    fn label(&self) -> &'static str {
        match self {
            Measure::Megapixels => "resolution",
            Measure::Width => "width",
            Measure::Height => "height",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Measure::Megapixels => "megapixels",
            Measure::Width | Measure::Height => "pixels",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ClipdropError {
    #[error("Input must be an existing file path or a valid URL: '{0}'")]
    InvalidSource(String),

    #[error(
        "{role} must have one of the following extensions: {} (got {})",
        .allowed.join(", "),
        describe_extension(.extension)
    )]
    UnsupportedExtension {
        role: FileRole,
        extension: String,
        allowed: Vec<String>,
    },

    #[error("The parent directory of the output path does not exist: {0}")]
    InvalidOutputPath(String),

    #[error(
        "Image {} of {} {} exceeds the maximum of {} {}",
        .measure.label(),
        format_amount(.actual),
        .measure.unit(),
        format_amount(.limit),
        .measure.unit()
    )]
    ResolutionExceeded {
        measure: Measure,
        limit: f64,
        actual: f64,
    },

    #[error(
        "Image size of {} MB exceeds the maximum of {} MB",
        format_amount(.actual),
        format_amount(.limit)
    )]
    SizeExceeded { limit: f64, actual: f64 },

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to download content from URL {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("API request failed with status {status}: {message}")]
    ApiRequest { status: u16, message: String },

    #[error("The API responded with an unexpected content type: '{0}'")]
    UnexpectedContentType(String),

    #[error("Error opening file {path}: {reason}")]
    FileOpen { path: String, reason: String },

    #[error("Error writing to file {path}: {reason}")]
    FileWrite { path: String, reason: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("A Clipdrop API key must either be passed to the client or set in CLIPDROP_API_KEY")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Fieldless discriminant of [`ClipdropError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSource,
    UnsupportedExtension,
    InvalidOutputPath,
    ResolutionExceeded,
    SizeExceeded,
    DecodeFailed,
    DownloadFailed,
    RequestFailed,
    ApiRequest,
    UnexpectedContentType,
    FileOpen,
    FileWrite,
    InvalidParameter,
    MissingApiKey,
    Configuration,
}

impl ClipdropError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClipdropError::InvalidSource(_) => ErrorKind::InvalidSource,
            ClipdropError::UnsupportedExtension { .. } => ErrorKind::UnsupportedExtension,
            ClipdropError::InvalidOutputPath(_) => ErrorKind::InvalidOutputPath,
            ClipdropError::ResolutionExceeded { .. } => ErrorKind::ResolutionExceeded,
            ClipdropError::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            ClipdropError::DecodeFailed(_) => ErrorKind::DecodeFailed,
            ClipdropError::DownloadFailed { .. } => ErrorKind::DownloadFailed,
            ClipdropError::RequestFailed { .. } => ErrorKind::RequestFailed,
            ClipdropError::ApiRequest { .. } => ErrorKind::ApiRequest,
            ClipdropError::UnexpectedContentType(_) => ErrorKind::UnexpectedContentType,
            ClipdropError::FileOpen { .. } => ErrorKind::FileOpen,
            ClipdropError::FileWrite { .. } => ErrorKind::FileWrite,
            ClipdropError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            ClipdropError::MissingApiKey => ErrorKind::MissingApiKey,
            ClipdropError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            ClipdropError::MissingApiKey => {
                Some("Get an API key from: https://clipdrop.co/apis/account")
            }
            ClipdropError::InvalidSource(_) => {
                Some("Pass a path to an existing file or an http(s) URL")
            }
            ClipdropError::InvalidOutputPath(_) => {
                Some("Create the output directory first or choose another path")
            }
            ClipdropError::ResolutionExceeded { .. } | ClipdropError::SizeExceeded { .. } => {
                Some("Downscale or recompress the image before uploading it")
            }
            ClipdropError::ApiRequest { status: 401, .. }
            | ClipdropError::ApiRequest { status: 403, .. } => {
                Some("Check that your API key is valid and has remaining credits")
            }
            ClipdropError::ApiRequest { status: 429, .. } => {
                Some("Wait a moment before making another request")
            }
            ClipdropError::RequestFailed { .. } | ClipdropError::DownloadFailed { .. } => {
                Some("Check your internet connection and try again")
            }
            _ => None,
        }
    }
}

fn describe_extension(extension: &str) -> String {
    if extension.is_empty() {
        "no extension".to_string()
    } else {
        format!("'{extension}'")
    }
}

/// Formats a measurement with at most two decimals and no trailing zeros.
fn format_amount(value: &f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClipdropError::InvalidSource("nope".to_string()).to_string(),
            "Input must be an existing file path or a valid URL: 'nope'"
        );
        assert_eq!(
            ClipdropError::UnsupportedExtension {
                role: FileRole::Input,
                extension: ".gif".to_string(),
                allowed: vec![".png".to_string(), ".jpg".to_string(), ".jpeg".to_string()],
            }
            .to_string(),
            "Input file must have one of the following extensions: .png, .jpg, .jpeg (got '.gif')"
        );
        assert_eq!(
            ClipdropError::ApiRequest {
                status: 403,
                message: "quota exceeded".to_string()
            }
            .to_string(),
            "API request failed with status 403: quota exceeded"
        );
    }

    #[test]
    fn test_missing_extension_message() {
        let err = ClipdropError::UnsupportedExtension {
            role: FileRole::Output,
            extension: String::new(),
            allowed: vec![".png".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Output file must have one of the following extensions: .png (got no extension)"
        );
    }

    #[test]
    fn test_limit_messages_name_both_values() {
        let err = ClipdropError::ResolutionExceeded {
            measure: Measure::Megapixels,
            limit: 20.0,
            actual: 25.0,
        };
        assert_eq!(
            err.to_string(),
            "Image resolution of 25 megapixels exceeds the maximum of 20 megapixels"
        );

        let err = ClipdropError::ResolutionExceeded {
            measure: Measure::Width,
            limit: 1024.0,
            actual: 2048.0,
        };
        assert_eq!(
            err.to_string(),
            "Image width of 2048 pixels exceeds the maximum of 1024 pixels"
        );

        let err = ClipdropError::SizeExceeded {
            limit: 30.0,
            actual: 31.456789,
        };
        assert_eq!(
            err.to_string(),
            "Image size of 31.46 MB exceeds the maximum of 30 MB"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(ClipdropError::MissingApiKey.kind(), ErrorKind::MissingApiKey);
        assert_eq!(
            ClipdropError::FileWrite {
                path: "out.png".to_string(),
                reason: "disk full".to_string()
            }
            .kind(),
            ErrorKind::FileWrite
        );
        assert_ne!(
            ClipdropError::DecodeFailed("bad".to_string()).kind(),
            ErrorKind::ResolutionExceeded
        );
    }

    #[test]
    fn test_help_text() {
        assert!(ClipdropError::MissingApiKey
            .help_text()
            .unwrap()
            .contains("clipdrop.co"));
        assert!(ClipdropError::ApiRequest {
            status: 403,
            message: String::new()
        }
        .help_text()
        .is_some());
        assert_eq!(
            ClipdropError::ApiRequest {
                status: 500,
                message: String::new()
            }
            .help_text(),
            None
        );
        assert_eq!(ClipdropError::DecodeFailed("x".to_string()).help_text(), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(&25.0), "25");
        assert_eq!(format_amount(&0.5), "0.5");
        assert_eq!(format_amount(&16.777216), "16.78");
    }
}
