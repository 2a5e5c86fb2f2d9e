//! Response envelope parsing
//!
//! Turns one raw HTTP exchange into a [`ResponseEnvelope`] or a classified
//! [`LibreNmsError`]. Classification runs in a fixed order: headers, body
//! decoding by `Content-Type`, HTTP status, then the backend `status` field.

use crate::common::backend::RawResponse;
use crate::error::LibreNmsError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Content type of JSON bodies
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type of graph images
pub const CONTENT_TYPE_PNG: &str = "image/png";

/// Ordered response headers, name case preserved, case-insensitive lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Create an empty header list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw header block (`Name: Value` lines separated by CRLF)
    ///
    /// Lines without a colon (the status line, the blank terminator) are
    /// dropped. The name is everything before the first colon. Values are
    /// trimmed and stripped of double quotes.
    #[must_use]
    pub fn parse_block(raw: &str) -> Self {
        let mut headers = Self::new();
        for line in raw.split('\n').map(|l| l.trim_end_matches('\r')) {
            // A colon at position 0 has no name
            let Some(idx) = line.find(':').filter(|&i| i > 0) else {
                continue;
            };
            let name = line[..idx].trim();
            let value = line[idx + 1..].trim();
            headers.insert(name, value);
        }
        headers
    }

    /// Insert a header, replacing an existing entry with the same name
    pub fn insert(&mut self, name: &str, value: &str) {
        let value = value.trim().replace('"', "");
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.0.push((name.to_string(), value));
        }
    }

    /// Look up a header value, ignoring name case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Number of headers
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no headers were parsed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arrival order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Media type of the `Content-Type` header, without parameters, lowercased
    #[must_use]
    pub fn media_type(&self) -> Option<String> {
        self.get("Content-Type").map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }
}

impl From<&reqwest::header::HeaderMap> for Headers {
    fn from(map: &reqwest::header::HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in map {
            // Non-visible-ASCII values are kept lossily rather than dropped
            let value = value
                .to_str()
                .map_or_else(|_| String::from_utf8_lossy(value.as_bytes()).into_owned(), str::to_string);
            headers.insert(name.as_str(), &value);
        }
        headers
    }
}

/// Binary image payload returned by graph endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Always `image/png`
    #[serde(rename = "type")]
    pub content_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Parsed result of one successful HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub code: u16,
    /// Parsed response headers
    pub headers: Headers,
    /// Top-level keys of a JSON body; empty for non-JSON responses
    pub fields: Map<String, Value>,
    /// Image payload of an `image/png` response
    pub image: Option<Image>,
}

impl ResponseEnvelope {
    /// Classify a raw response
    ///
    /// `url` is only used to make generic failure messages actionable.
    pub fn from_raw(raw: RawResponse, url: &str) -> Result<Self, LibreNmsError> {
        let RawResponse {
            status,
            headers,
            body,
        } = raw;
        let success = (200..=299).contains(&status);

        let mut envelope = Self {
            code: status,
            headers,
            fields: Map::new(),
            image: None,
        };

        match envelope.headers.media_type().as_deref() {
            Some(CONTENT_TYPE_JSON) => match decode_object(&body) {
                Ok(fields) => envelope.fields = fields,
                Err(e) if success => return Err(e),
                // Undecodable error bodies fall back to the generic message
                Err(_) => {}
            },
            Some(CONTENT_TYPE_PNG) => {
                envelope.image = Some(Image {
                    content_type: CONTENT_TYPE_PNG.to_string(),
                    data: body,
                });
            }
            _ => {}
        }

        if !success {
            let message = envelope
                .message()
                .unwrap_or_else(|| format!("Please verify URL {url} and client settings"));
            warn!("Request to {} failed with HTTP {}: {}", url, status, message);
            return Err(LibreNmsError::Http { status, message });
        }

        if envelope.fields.get("status").and_then(Value::as_str) == Some("error") {
            let message = envelope.message().map_or_else(
                || format!("Please check your settings URL : {url}"),
                |m| format!("{m} URL : {url}"),
            );
            warn!("LibreNMS reported an error for {}: {}", url, message);
            return Err(LibreNmsError::Backend { status, message });
        }

        Ok(envelope)
    }

    /// Backend `message` field, if it is a non-empty string
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.fields
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// True when the envelope carries the named top-level key
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Decode one top-level key into a typed value
    ///
    /// A missing key or a JSON `null` yields `Ok(None)`; a present key with the
    /// wrong shape is a [`LibreNmsError::Decode`].
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LibreNmsError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| LibreNmsError::Decode(format!("field '{key}': {e}"))),
        }
    }

    /// Decode a list key, treating a missing or empty list as `None`
    pub fn non_empty_list<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Vec<T>>, LibreNmsError> {
        Ok(self.field::<Vec<T>>(key)?.filter(|items| !items.is_empty()))
    }

    /// Decode all JSON fields into one typed schema
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, LibreNmsError> {
        T::deserialize(Value::Object(self.fields.clone()))
            .map_err(|e| LibreNmsError::Decode(e.to_string()))
    }

    /// Merged view: backend keys plus the reserved `headers` and `code` keys
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut merged = self.fields.clone();
        let headers: Map<String, Value> = self
            .headers
            .iter()
            .map(|(n, v)| (n.to_string(), Value::String(v.to_string())))
            .collect();
        merged.insert("headers".to_string(), Value::Object(headers));
        merged.insert("code".to_string(), Value::from(self.code));
        if let Some(image) = &self.image {
            merged.insert(
                "image".to_string(),
                serde_json::to_value(image).unwrap_or(Value::Null),
            );
        }
        Value::Object(merged)
    }
}

fn decode_object(body: &[u8]) -> Result<Map<String, Value>, LibreNmsError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(LibreNmsError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(LibreNmsError::Decode(format!("invalid JSON body: {e}"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(status: u16, content_type: &str, body: &[u8]) -> RawResponse {
        let mut headers = Headers::new();
        headers.insert("Content-Type", content_type);
        RawResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    fn json_raw(status: u16, body: &Value) -> RawResponse {
        raw(status, CONTENT_TYPE_JSON, body.to_string().as_bytes())
    }

    const URL: &str = "https://nms.example.com/api/v0/devices";

    #[test]
    fn test_parse_block_drops_status_line_and_blank_lines() {
        let block = "HTTP/1.1 200 OK\r\n\
                     Content-Type: application/json\r\n\
                     X-Rate-Limit:  60 \r\n\
                     ETag: \"abc123\"\r\n\
                     \r\n";
        let headers = Headers::parse_block(block);

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("X-Rate-Limit"), Some("60"));
        assert_eq!(headers.get("ETag"), Some("abc123"));
        // Case preserved on the stored name
        assert_eq!(headers.iter().next().map(|(n, _)| n), Some("Content-Type"));
    }

    #[test]
    fn test_parse_block_splits_on_first_colon() {
        let headers = Headers::parse_block("HTTP/2 302\r\nLocation: https://nms:8443/login\r\n");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Location"), Some("https://nms:8443/login"));
    }

    #[test]
    fn test_parse_block_ignores_nameless_lines() {
        let headers = Headers::parse_block(": orphan\r\nServer: nginx\r\n");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Server"), Some("nginx"));
    }

    #[test]
    fn test_media_type_strips_parameters() {
        let headers = Headers::parse_block("Content-Type: Application/JSON; charset=utf-8\r\n");
        assert_eq!(headers.media_type().as_deref(), Some("application/json"));
    }

    #[test]
    fn test_success_boundaries() {
        for status in [200, 201, 299] {
            let envelope = ResponseEnvelope::from_raw(json_raw(status, &json!({"status": "ok"})), URL)
                .expect("2xx should succeed");
            assert_eq!(envelope.code, status);
        }
    }

    #[test]
    fn test_failure_boundaries_have_messages() {
        for status in [300, 404, 500] {
            let err = ResponseEnvelope::from_raw(json_raw(status, &json!({})), URL)
                .expect_err("non-2xx should fail");
            match err {
                LibreNmsError::Http { status: s, message } => {
                    assert_eq!(s, status);
                    assert!(!message.is_empty());
                }
                other => panic!("expected Http error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_http_failure_prefers_backend_message() {
        let body = json!({"status": "error", "message": "Unauthenticated."});
        let err = ResponseEnvelope::from_raw(json_raw(401, &body), URL).expect_err("401");
        assert_eq!(err.message(), "Unauthenticated.");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_http_failure_with_undecodable_body_uses_generic_message() {
        let err = ResponseEnvelope::from_raw(raw(502, CONTENT_TYPE_JSON, b"<html>bad gateway"), URL)
            .expect_err("502");
        assert!(matches!(err, LibreNmsError::Http { status: 502, .. }));
        assert!(err.message().contains(URL));
    }

    #[test]
    fn test_backend_error_status_overrides_http_success() {
        let body = json!({"status": "error", "message": "No devices found"});
        let err = ResponseEnvelope::from_raw(json_raw(200, &body), URL).expect_err("backend error");
        assert!(matches!(err, LibreNmsError::Backend { status: 200, .. }));
        assert_eq!(err.message(), format!("No devices found URL : {URL}"));

        let err = ResponseEnvelope::from_raw(json_raw(200, &json!({"status": "error"})), URL)
            .expect_err("backend error without message");
        assert!(err.message().contains("Please check your settings"));
    }

    #[test]
    fn test_json_fields_are_merged() {
        let envelope =
            ResponseEnvelope::from_raw(json_raw(200, &json!({"status": "ok", "devices": []})), URL)
                .expect("ok");
        assert_eq!(envelope.fields.get("devices"), Some(&json!([])));
        assert!(envelope.image.is_none());

        let merged = envelope.to_value();
        assert_eq!(merged["code"], json!(200));
        assert_eq!(merged["devices"], json!([]));
        assert_eq!(merged["headers"]["Content-Type"], json!("application/json"));
    }

    #[test]
    fn test_png_body_is_wrapped_as_image() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a];
        let envelope =
            ResponseEnvelope::from_raw(raw(200, CONTENT_TYPE_PNG, &bytes), URL).expect("png");
        let image = envelope.image.expect("image present");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.data, bytes.to_vec());
        assert!(envelope.fields.is_empty());
    }

    #[test]
    fn test_other_content_types_keep_only_status_and_headers() {
        let envelope =
            ResponseEnvelope::from_raw(raw(200, "text/html", b"<html></html>"), URL).expect("html");
        assert!(envelope.fields.is_empty());
        assert!(envelope.image.is_none());
        assert_eq!(envelope.headers.get("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_invalid_json_on_success_is_decode_error() {
        let err = ResponseEnvelope::from_raw(raw(200, CONTENT_TYPE_JSON, b"{not json"), URL)
            .expect_err("decode");
        assert!(matches!(err, LibreNmsError::Decode(_)));

        let err = ResponseEnvelope::from_raw(raw(200, CONTENT_TYPE_JSON, b"[1,2]"), URL)
            .expect_err("array body");
        assert!(matches!(err, LibreNmsError::Decode(_)));
    }

    #[test]
    fn test_typed_field_access() {
        let envelope = ResponseEnvelope::from_raw(
            json_raw(200, &json!({"count": 2, "names": ["a", "b"], "empty": [], "gone": null})),
            URL,
        )
        .expect("ok");

        assert_eq!(envelope.field::<u32>("count").expect("count"), Some(2));
        assert_eq!(envelope.field::<u32>("missing").expect("missing"), None);
        assert_eq!(envelope.field::<u32>("gone").expect("null"), None);
        assert!(matches!(envelope.field::<u32>("names"), Err(LibreNmsError::Decode(_))));
        assert_eq!(
            envelope.non_empty_list::<String>("names").expect("names"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(envelope.non_empty_list::<String>("empty").expect("empty"), None);
    }
}
