// ABOUTME: Multipart request submission with API key authentication
// ABOUTME: Translates transport failures and non-success responses into typed errors

use crate::constants::{errors, headers};
use crate::error::ClipdropError;
use crate::Result;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// One file field of a multipart body.
///
/// A part without a file name is sent as a plain value with its own media
/// type, which is how the text-to-image prompt travels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl FilePart {
    pub fn image(file_name: impl Into<String>, bytes: Vec<u8>, extension: &str) -> Self {
        Self {
            file_name: Some(file_name.into()),
            bytes,
            media_type: media_type_for(extension),
        }
    }

    pub fn text(value: &str) -> Self {
        Self {
            file_name: None,
            bytes: value.as_bytes().to_vec(),
            media_type: "text/plain".to_string(),
        }
    }
}

/// Media type for an extension such as `.jpg`; unknown extensions map to octet-stream.
pub fn media_type_for(extension: &str) -> String {
    mime_guess::from_ext(extension.trim_start_matches('.'))
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// File parts and plain form fields of one API call.
#[derive(Debug, Clone, Default)]
pub struct MultipartRequest {
    files: Vec<(String, FilePart)>,
    fields: Vec<(String, String)>,
}

impl MultipartRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.files.push((name.into(), part));
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(name, _)| name.as_str())
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    fn into_form(self, url: &str) -> Result<Form> {
        let mut form = Form::new();

        for (name, file) in self.files {
            let mut part = Part::bytes(file.bytes);
            if let Some(file_name) = file.file_name {
                part = part.file_name(file_name);
            }
            let part = part
                .mime_str(&file.media_type)
                .map_err(|e| ClipdropError::RequestFailed {
                    url: url.to_string(),
                    reason: format!("invalid media type for '{name}': {e}"),
                })?;
            form = form.part(name, part);
        }

        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        Ok(form)
    }
}

/// A successful response, returned as received.
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl SubmissionResult {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header_str(CONTENT_TYPE.as_str())
    }

    pub fn remaining_credits(&self) -> Option<u64> {
        self.header_str(headers::REMAINING_CREDITS)
            .and_then(|value| value.trim().parse().ok())
    }

    pub fn credits_consumed(&self) -> Option<u64> {
        self.header_str(headers::CREDITS_CONSUMED)
            .and_then(|value| value.trim().parse().ok())
    }

    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// POSTs `request` to `url` with the API key header.
///
/// Non-success statuses become [`ClipdropError::ApiRequest`] carrying the
/// server's `error` message, or a fixed fallback when the body is unreadable.
pub fn submit(
    http: &Client,
    api_key: &SecretString,
    url: &str,
    request: MultipartRequest,
) -> Result<SubmissionResult> {
    let request_failed = |reason: String| ClipdropError::RequestFailed {
        url: url.to_string(),
        reason,
    };

    let form = request.into_form(url)?;

    log::debug!("POST {url}");
    let response = http
        .post(url)
        .header(headers::API_KEY, api_key.expose_secret())
        .multipart(form)
        .send()
        .map_err(|e| request_failed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .bytes()
            .map(|body| error_message(&body))
            .unwrap_or_else(|_| errors::UNDECODABLE_BODY.to_string());
        log::debug!("POST {url} returned {status}: {message}");
        return Err(ClipdropError::ApiRequest {
            status: status.as_u16(),
            message,
        });
    }

    let headers = response.headers().clone();
    let body = response
        .bytes()
        .map_err(|e| request_failed(e.to_string()))?;

    log::debug!("POST {url} returned {status} with {} bytes", body.len());

    Ok(SubmissionResult {
        status,
        headers,
        body: body.to_vec(),
    })
}

fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(e) => {
            log::warn!("Could not decode error response body: {e}");
            errors::UNDECODABLE_BODY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_helpers::{test_api_key, TEST_API_KEY};
    use mockito::{Matcher, Server};

    #[test]
    fn test_success_returns_raw_response() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/remove-background/v1")
            .match_header(headers::API_KEY, TEST_API_KEY)
            .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="image_file"; filename="cat.png""#.into()),
                Matcher::Regex("(?i)content-type: image/png".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_header(headers::REMAINING_CREDITS, "97")
            .with_header(headers::CREDITS_CONSUMED, "1")
            .with_body(b"result-bytes")
            .create();

        let request =
            MultipartRequest::new().file("image_file", FilePart::image("cat.png", b"png".to_vec(), ".png"));
        let url = format!("{}/remove-background/v1", server.url());
        let result = submit(&Client::new(), &test_api_key(), &url, request).unwrap();

        mock.assert();
        assert_eq!(result.status(), StatusCode::OK);
        assert_eq!(result.body(), b"result-bytes");
        assert_eq!(result.content_type(), Some("image/png"));
        assert_eq!(result.remaining_credits(), Some(97));
        assert_eq!(result.credits_consumed(), Some(1));
    }

    #[test]
    fn test_plain_fields_are_sent() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/uncrop/v1")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="extend_left"\r\n\r\n256"#.into()),
                Matcher::Regex(r#"name="prompt"\r\n(?i:content-type: text/plain\r\n)?\r\nsunset"#.into()),
            ]))
            .with_status(200)
            .with_body("ok")
            .create();

        let request = MultipartRequest::new()
            .field("extend_left", 256)
            .file("prompt", FilePart::text("sunset"));
        let url = format!("{}/uncrop/v1", server.url());
        submit(&Client::new(), &test_api_key(), &url, request).unwrap();

        mock.assert();
    }

    #[test]
    fn test_error_message_extracted_from_json() {
        let mut server = Server::new();
        server
            .mock("POST", "/text-to-image/v1")
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"quota exceeded"}"#)
            .create();

        let url = format!("{}/text-to-image/v1", server.url());
        let err = submit(&Client::new(), &test_api_key(), &url, MultipartRequest::new())
            .unwrap_err();

        match err {
            ClipdropError::ApiRequest { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("Expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_undecodable_error_body_uses_fallback() {
        let mut server = Server::new();
        server
            .mock("POST", "/cleanup/v1")
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .create();

        let url = format!("{}/cleanup/v1", server.url());
        let err = submit(&Client::new(), &test_api_key(), &url, MultipartRequest::new())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ApiRequest);
        assert_eq!(
            err.to_string(),
            format!("API request failed with status 500: {}", errors::UNDECODABLE_BODY)
        );
    }

    #[test]
    fn test_json_without_error_field_uses_fallback() {
        assert_eq!(error_message(br#"{"message":"nope"}"#), errors::UNDECODABLE_BODY);
        assert_eq!(error_message(br#"{"error":"bad mask"}"#), "bad mask");
    }

    #[test]
    fn test_transport_failure() {
        let err = submit(
            &Client::new(),
            &test_api_key(),
            "http://127.0.0.1:1/remove-background/v1",
            MultipartRequest::new(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestFailed);
    }

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for(".png"), "image/png");
        assert_eq!(media_type_for(".jpg"), "image/jpeg");
        assert_eq!(media_type_for(".jpeg"), "image/jpeg");
        assert_eq!(media_type_for(".webp"), "image/webp");
        assert_eq!(media_type_for(""), "application/octet-stream");
    }

    #[test]
    fn test_request_accessors() {
        let request = MultipartRequest::new()
            .file("image_file", FilePart::image("a.png", vec![], ".png"))
            .field("mode", "quality");
        assert_eq!(request.file_names().collect::<Vec<_>>(), vec!["image_file"]);
        assert_eq!(request.field_value("mode"), Some("quality"));
        assert_eq!(request.field_value("prompt"), None);
    }
}
