// ABOUTME: Clipdrop SDK library providing a blocking client for the Clipdrop image API
// ABOUTME: Resolves and validates inputs, submits multipart requests, and persists results

pub mod builder;
pub mod constants;
pub mod content;
pub mod error;
pub mod extension;
pub mod operations;
pub mod output;
pub mod persist;
pub mod source;
pub mod submit;

#[cfg(test)]
mod test_helpers;

pub use builder::ClipdropClientConfig;
pub use content::ImageLimits;
pub use error::{ClipdropError, ErrorKind, FileRole, Measure};
pub use operations::{CleanupMode, SavedOutput, UncropExtents};
pub use output::OutputSpec;
pub use source::{InputDescriptor, Origin};
pub use submit::{FilePart, MultipartRequest, SubmissionResult};

use secrecy::SecretString;

pub type Result<T> = std::result::Result<T, ClipdropError>;

/// Blocking client for the Clipdrop API.
///
/// Holds configuration only; every operation is independent and stateless.
#[derive(Debug)]
pub struct ClipdropClient {
    http: reqwest::blocking::Client,
    api_key: SecretString,
    base_url: String,
    version: String,
}

impl ClipdropClient {
    /// Creates a client with default settings. `None` reads `CLIPDROP_API_KEY`.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key.map(|key| SecretString::new(key.into_boxed_str()));
        Self::builder().api_key(api_key).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `{base_url}/{operation}/{version}[/{sub_path}]`
    pub fn endpoint_url(&self, operation: &str, sub_path: Option<&str>) -> String {
        match sub_path {
            Some(sub_path) => format!(
                "{}/{}/{}/{}",
                self.base_url, operation, self.version, sub_path
            ),
            None => format!("{}/{}/{}", self.base_url, operation, self.version),
        }
    }

    /// Resolves an input designator using this client's HTTP transport for URLs.
    pub fn resolve_input(&self, designator: &str) -> Result<InputDescriptor> {
        InputDescriptor::resolve(designator, &self.http)
    }

    /// Sends a multipart request to an endpoint and returns the raw response.
    pub fn submit(
        &self,
        operation: &str,
        sub_path: Option<&str>,
        request: MultipartRequest,
    ) -> Result<SubmissionResult> {
        let url = self.endpoint_url(operation, sub_path);
        submit::submit(&self.http, &self.api_key, &url, request)
    }
}
