//! HTTP backend seam
//!
//! [`Transport`](crate::common::Transport) never talks to reqwest directly. It
//! hands a fully-built [`HttpRequest`] to an [`HttpBackend`], which performs
//! exactly one exchange. Tests substitute their own backend.

use crate::common::envelope::Headers;
use crate::config::ClientConfig;
use crate::error::{LibreNmsError, TransportErrorKind};
use std::error::Error as StdError;
use std::fmt;
use tracing::debug;

/// HTTP verbs used by the LibreNMS API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case verb
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request ready to be sent
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers, auth token included
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a request header, ignoring name case
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(n, v)| {
                if n.eq_ignore_ascii_case(crate::common::AUTH_HEADER) {
                    (n.as_str(), "<redacted>")
                } else {
                    (n.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

/// Status, headers and body of a completed exchange, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Undecoded body
    pub body: Vec<u8>,
}

/// Performs a single HTTP exchange
///
/// Implementations must not retry: one call is one attempt. Failures that
/// happen before a response exists are reported as
/// [`LibreNmsError::Transport`].
#[async_trait::async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send the request and collect the full response
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, LibreNmsError>;
}

/// reqwest-backed [`HttpBackend`]
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Build a reqwest client from the connection settings
    ///
    /// Only the connect phase is bounded; there is no overall request deadline.
    pub fn new(config: &ClientConfig) -> Result<Self, LibreNmsError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| LibreNmsError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, LibreNmsError> {
        let url = reqwest::Url::parse(&request.url).map_err(|e| {
            LibreNmsError::transport(TransportErrorKind::MalformedUrl, format!("{}: {e}", request.url))
        })?;

        let mut builder = self.client.request(request.method.into(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = Headers::from(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(classify_reqwest_error)?
            .to_vec();

        debug!("{} {} -> {} ({} bytes)", request.method, request.url, status, body.len());
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest failure onto the fixed transport error classes
pub(crate) fn classify_reqwest_error(err: reqwest::Error) -> LibreNmsError {
    let detail = error_chain(&err);
    let lowered = detail.to_ascii_lowercase();

    let kind = if err.is_builder() {
        TransportErrorKind::MalformedUrl
    } else if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if lowered.contains("dns error") || lowered.contains("failed to lookup address") {
        TransportErrorKind::ResolveHost
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };

    LibreNmsError::transport(kind, detail)
}

fn error_chain(err: &dyn StdError) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_debug_redacts_token() {
        let request = HttpRequest {
            method: Method::Get,
            url: "https://nms.example.com/api/v0/devices".to_string(),
            headers: vec![
                ("X-Auth-Token".to_string(), "very-secret".to_string()),
                ("Accept".to_string(), "*/*".to_string()),
            ],
            body: None,
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
        assert_eq!(request.header("accept"), Some("*/*"));
    }

    #[tokio::test]
    async fn test_unparseable_url_is_malformed() {
        let backend = ReqwestBackend::new(&ClientConfig::new("https://nms.example.com", "t"))
            .expect("client");
        let request = HttpRequest {
            method: Method::Get,
            url: "not a url".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = backend.execute(request).await.expect_err("malformed");
        assert!(matches!(
            err,
            LibreNmsError::Transport {
                kind: TransportErrorKind::MalformedUrl,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_failure() {
        // Port 9 (discard) on loopback is closed on test hosts
        let backend = ReqwestBackend::new(&ClientConfig::new("http://127.0.0.1:9", "t"))
            .expect("client");
        let request = HttpRequest {
            method: Method::Get,
            url: "http://127.0.0.1:9/api/v0".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = backend.execute(request).await.expect_err("refused");
        assert!(matches!(
            err,
            LibreNmsError::Transport {
                kind: TransportErrorKind::Connect,
                ..
            }
        ));
    }

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_resolve_failure() {
        // .invalid never resolves
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client");
        let backend = ReqwestBackend::with_client(client);

        let err = backend
            .execute(get("http://nms.invalid/api/v0/system"))
            .await
            .expect_err("unresolvable");
        assert!(matches!(
            err,
            LibreNmsError::Transport {
                kind: TransportErrorKind::ResolveHost,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        use std::time::Duration;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("client");
        let backend = ReqwestBackend::with_client(client);

        let err = backend
            .execute(get(&format!("{}/api/v0/system", server.uri())))
            .await
            .expect_err("timed out");
        assert!(matches!(
            err,
            LibreNmsError::Transport {
                kind: TransportErrorKind::Timeout,
                ..
            }
        ));
    }
}
