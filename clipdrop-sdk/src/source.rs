// ABOUTME: Input resolution for local files and remote URLs
// ABOUTME: Classifies a designator, derives its extension, and fetches its bytes at most once

use crate::content::{self, ImageLimits};
use crate::error::{ClipdropError, FileRole};
use crate::extension;
use crate::Result;
use once_cell::unsync::OnceCell;
use reqwest::blocking::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Where an input designator points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    File,
    Url,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Url(Url),
}

/// A resolved input with a lazily fetched, memoized payload.
///
/// The first call to [`InputDescriptor::data`] reads the file or downloads the
/// URL; every later call returns the same outcome, including a failure.
pub struct InputDescriptor {
    designator: String,
    location: Location,
    extension: String,
    http: Client,
    data: OnceCell<Result<Vec<u8>>>,
}

impl InputDescriptor {
    /// Classifies `designator` as an existing path or a URL with a host.
    ///
    /// Nothing is read or downloaded here.
    pub fn resolve(designator: &str, http: &Client) -> Result<Self> {
        let location = if Path::new(designator).exists() {
            Location::File(PathBuf::from(designator))
        } else {
            match Url::parse(designator) {
                Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
                    Location::Url(url)
                }
                _ => return Err(ClipdropError::InvalidSource(designator.to_string())),
            }
        };

        let extension = match &location {
            Location::File(path) => extension_of(path),
            Location::Url(url) => extension_of(Path::new(url.path())),
        };

        log::debug!("Resolved input '{designator}' with extension '{extension}'");

        Ok(Self {
            designator: designator.to_string(),
            location,
            extension,
            http: http.clone(),
            data: OnceCell::new(),
        })
    }

    pub fn designator(&self) -> &str {
        &self.designator
    }

    pub fn origin(&self) -> Origin {
        match self.location {
            Location::File(_) => Origin::File,
            Location::Url(_) => Origin::Url,
        }
    }

    /// Lower-cased suffix of the final path segment, with its dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Final path segment, used as the multipart file name.
    pub fn file_name(&self) -> String {
        let name = match &self.location {
            Location::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Location::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        };
        name.unwrap_or_else(|| format!("image{}", self.extension))
    }

    /// Returns the payload, fetching it on first use only.
    pub fn data(&self) -> Result<&[u8]> {
        self.data
            .get_or_init(|| self.fetch())
            .as_deref()
            .map_err(ClipdropError::clone)
    }

    /// Runs the extension check, then the content limits if any are set.
    ///
    /// Content limits read the payload through [`InputDescriptor::data`], so a
    /// second validation or the later upload reuses the same bytes.
    pub fn validate(&self, allowed: Option<&[&str]>, limits: &ImageLimits) -> Result<()> {
        extension::validate_extension(&self.extension, allowed, FileRole::Input)?;

        if !limits.is_empty() {
            content::validate_image(self.data()?, limits)?;
        }

        Ok(())
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        match &self.location {
            Location::File(path) => {
                log::debug!("Reading input file {}", path.display());
                std::fs::read(path).map_err(|e| ClipdropError::FileOpen {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
            Location::Url(url) => download(&self.http, url),
        }
    }
}

impl fmt::Debug for InputDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDescriptor")
            .field("designator", &self.designator)
            .field("origin", &self.origin())
            .field("extension", &self.extension)
            .field("fetched", &self.data.get().is_some())
            .finish()
    }
}

/// Lower-cased `.ext` of the last path component, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn download(http: &Client, url: &Url) -> Result<Vec<u8>> {
    let failed = |reason: String| ClipdropError::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    log::debug!("Downloading input from {url}");

    let response = http
        .get(url.as_str())
        .send()
        .map_err(|e| failed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(failed(format!("HTTP status {status}")));
    }

    let bytes = response.bytes().map_err(|e| failed(e.to_string()))?;
    log::debug!("Downloaded {} bytes from {url}", bytes.len());

    Ok(bytes.to_vec())
}
