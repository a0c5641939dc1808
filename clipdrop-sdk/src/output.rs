// ABOUTME: Output path validation run before or after the API request
// ABOUTME: Checks the parent directory and maps response content types to extensions

use crate::error::{ClipdropError, FileRole};
use crate::extension;
use crate::source::extension_of;
use crate::Result;
use std::path::{Path, PathBuf};

/// Destination of an operation and the extensions it may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    path: PathBuf,
    allowed: Option<Vec<String>>,
}

impl OutputSpec {
    pub fn new(path: impl Into<PathBuf>, allowed: Option<&[&str]>) -> Self {
        Self {
            path: path.into(),
            allowed: allowed.map(|list| list.iter().map(|ext| ext.to_string()).collect()),
        }
    }

    /// Uses `output{extension}` in the working directory when no path is given.
    pub fn or_default(path: Option<&str>, extension: &str, allowed: Option<&[&str]>) -> Self {
        match path {
            Some(path) => Self::new(path, allowed),
            None => Self::new(default_output_path(extension), allowed),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }

    /// Fails when the parent directory is missing or the extension is not allowed.
    pub fn validate(&self) -> Result<()> {
        if !parent_directory(&self.path).is_dir() {
            return Err(ClipdropError::InvalidOutputPath(
                self.path.display().to_string(),
            ));
        }

        let allowed: Option<Vec<&str>> = self
            .allowed
            .as_ref()
            .map(|list| list.iter().map(String::as_str).collect());

        extension::validate_extension(&self.extension(), allowed.as_deref(), FileRole::Output)
    }
}

/// `output.png`, `output.jpg`, ... for an extension with its leading dot.
pub fn default_output_path(extension: &str) -> PathBuf {
    PathBuf::from(format!("output{extension}"))
}

/// Extension implied by a response `Content-Type`, ignoring parameters.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/png" => Some(".png"),
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/webp" => Some(".webp"),
        "video/mp4" => Some(".mp4"),
        _ => None,
    }
}

/// Builds and validates the output once the response has declared its type.
pub fn resolve_from_content_type(path: Option<&str>, content_type: &str) -> Result<OutputSpec> {
    let extension = extension_for_content_type(content_type)
        .ok_or_else(|| ClipdropError::UnexpectedContentType(content_type.to_string()))?;

    let allowed = [extension];
    let spec = OutputSpec::or_default(path, extension, Some(&allowed[..]));
    spec.validate()?;
    Ok(spec)
}

fn parent_directory(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
