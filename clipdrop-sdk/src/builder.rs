// ABOUTME: Builder pattern implementation for ClipdropClient configuration
// ABOUTME: Resolves the API key from the config or environment and validates the base URL

use crate::constants::{env, timeouts, urls};
use crate::error::ClipdropError;
use crate::ClipdropClient;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<ClipdropClient, ClipdropError>))]
pub struct ClipdropClientConfig {
    /// Falls back to `CLIPDROP_API_KEY` when unset or empty
    #[builder(default = None)]
    pub api_key: Option<SecretString>,

    #[builder(default = urls::CLIPDROP_API_BASE.to_string(), setter(into))]
    pub base_url: String,

    #[builder(default = urls::API_VERSION.to_string(), setter(into))]
    pub version: String,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,
}

impl From<ClipdropClientConfig> for Result<ClipdropClient, ClipdropError> {
    fn from(config: ClipdropClientConfig) -> Self {
        ClipdropClient::from_config(config)
    }
}

impl ClipdropClient {
    pub fn builder() -> ClipdropClientConfigBuilder<((), (), (), ())> {
        ClipdropClientConfig::builder()
    }

    pub(crate) fn from_config(config: ClipdropClientConfig) -> Result<Self, ClipdropError> {
        let api_key = resolve_api_key(config.api_key)?;
        let base_url = normalize_base_url(&config.base_url)?;

        let version = config.version.trim_matches('/').to_string();
        if version.is_empty() {
            return Err(ClipdropError::Configuration(
                "API version must not be empty".to_string(),
            ));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("clipdrop-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ClipdropError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        log::debug!("Configured Clipdrop client for {base_url} ({version})");

        Ok(Self {
            http,
            api_key,
            base_url,
            version,
        })
    }
}

fn resolve_api_key(explicit: Option<SecretString>) -> Result<SecretString, ClipdropError> {
    if let Some(key) = explicit.filter(|key| !key.expose_secret().trim().is_empty()) {
        return Ok(key);
    }

    std::env::var(env::API_KEY)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(|key| SecretString::new(key.into_boxed_str()))
        .ok_or(ClipdropError::MissingApiKey)
}

fn normalize_base_url(base_url: &str) -> Result<String, ClipdropError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| ClipdropError::Configuration(format!("Invalid base URL '{base_url}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClipdropError::Configuration(format!(
            "Unsupported base URL scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_helpers::{test_api_key, TEST_API_KEY};
    use serial_test::serial;

    #[test]
    fn test_builder_with_minimal_config() {
        let client = ClipdropClient::builder()
            .api_key(Some(test_api_key()))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), urls::CLIPDROP_API_BASE);
        assert_eq!(client.version(), urls::API_VERSION);
    }

    #[test]
    fn test_builder_with_all_options() {
        let client = ClipdropClient::builder()
            .api_key(Some(test_api_key()))
            .base_url("http://localhost:8080/")
            .version("/v2/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.version(), "v2");
    }

    #[test]
    #[serial]
    fn test_api_key_falls_back_to_environment() {
        unsafe {
            std::env::set_var(env::API_KEY, "env-key");
        }

        let result = ClipdropClient::builder().build();

        unsafe {
            std::env::remove_var(env::API_KEY);
        }
        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_missing_api_key_is_a_hard_failure() {
        unsafe {
            std::env::remove_var(env::API_KEY);
        }

        let err = ClipdropClient::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);

        let empty = SecretString::new(String::new().into_boxed_str());
        let err = ClipdropClient::builder().api_key(Some(empty)).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);
    }

    #[test]
    fn test_explicit_key_wins_over_environment() {
        let key = resolve_api_key(Some(test_api_key())).unwrap();
        assert_eq!(key.expose_secret(), TEST_API_KEY);
    }

    #[test]
    fn test_invalid_base_url() {
        for base_url in ["not-a-url", "ftp://clipdrop-api.co"] {
            let err = ClipdropClient::builder()
                .api_key(Some(test_api_key()))
                .base_url(base_url)
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{base_url}");
        }
    }

    #[test]
    fn test_empty_version_rejected() {
        let err = ClipdropClient::builder()
            .api_key(Some(test_api_key()))
            .version("")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_config_uses_secrecy_for_sensitive_data() {
        let config = ClipdropClientConfig {
            api_key: Some(test_api_key()),
            base_url: urls::CLIPDROP_API_BASE.to_string(),
            version: urls::API_VERSION.to_string(),
            timeout: timeouts::HTTP_REQUEST_TIMEOUT,
        };
        let debug_str = format!("{config:?}");
        assert!(!debug_str.contains(TEST_API_KEY));
    }
}
