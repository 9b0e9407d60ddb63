//! services/client/src/adapters/transport.rs
//!
//! The JSON-over-HTTP transport shared by every service adapter. One
//! `ServiceClient` is built per service group; they differ only in base path.

use ai_feedback_core::domain::Envelope;
use ai_feedback_core::ports::{PortError, PortResult};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

//=========================================================================================
// Service Groups
//=========================================================================================

/// The logical API groups exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceGroup {
    Feedback,
    LearningBot,
    Hint,
    Explain,
}

impl ServiceGroup {
    pub fn base_path(self) -> &'static str {
        match self {
            ServiceGroup::Feedback => "/api/ai-feedback",
            ServiceGroup::LearningBot => "/api/ai-learning-bot",
            ServiceGroup::Hint => "/api/ai-hint",
            ServiceGroup::Explain => "/api/ai-explain",
        }
    }
}

/// Builds the HTTP client shared by all service groups.
///
/// Every request carries `Content-Type: application/json`. No timeout or retry
/// policy is configured.
pub fn build_http_client() -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Client::builder().default_headers(headers).build()
}

/// Appends percent-encoded query parameters to a path.
///
/// Values are encoded component-wise (space becomes `%20`, never `+`), so any
/// text, including `/`, `?` and non-ASCII characters, decodes back verbatim.
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

//=========================================================================================
// The Transport Struct
//=========================================================================================

/// A read-only handle on one service group. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    http: Client,
    base: String,
}

impl ServiceClient {
    /// Creates a client for `group` on the host at `base_url`.
    pub fn new(http: Client, base_url: &str, group: ServiceGroup) -> Self {
        Self {
            http,
            base: format!("{}{}", base_url.trim_end_matches('/'), group.base_path()),
        }
    }

    /// The absolute URL for a path within this group.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let request = self.http.get(self.url(path));
        self.execute(Method::GET, path, request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> PortResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(Method::POST, path, request).await
    }

    /// Sends exactly one request and unwraps the envelope of its response.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> PortResult<T> {
        debug!(%method, url = %self.url(path), "Sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                return PortError::Unexpected(e.to_string());
            }
            error!(%method, path, "Request failed before a response arrived: {}", e);
            PortError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "Service returned an error status");
            return Err(status_error(status, &body));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| PortError::Decode(e.to_string()))?;
        if !envelope.is_success() {
            warn!(
                %method,
                path,
                status = %envelope.status,
                "Service rejected the request: {}",
                envelope.message
            );
        }
        envelope.into_data()
    }
}

/// Converts a non-2xx response into a port error, preferring the server's own message.
fn status_error(status: StatusCode, body: &str) -> PortError {
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    match status {
        StatusCode::NOT_FOUND => PortError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized(message),
        _ => PortError::Status {
            code: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_paths_are_prefixed_with_the_host() {
        let http = Client::new();
        let client =
            ServiceClient::new(http.clone(), "http://localhost:8080/", ServiceGroup::Feedback);
        assert_eq!(
            client.url("/history/4"),
            "http://localhost:8080/api/ai-feedback/history/4"
        );

        let bot = ServiceClient::new(http, "http://localhost:8080", ServiceGroup::LearningBot);
        assert_eq!(bot.url("/chat"), "http://localhost:8080/api/ai-learning-bot/chat");
    }

    #[test]
    fn non_ascii_topic_is_percent_encoded() {
        assert_eq!(
            with_query("/materials/1", &[("topic", "Tổng hợp")]),
            "/materials/1?topic=T%E1%BB%95ng%20h%E1%BB%A3p"
        );
    }

    #[test]
    fn reserved_characters_round_trip() {
        let path = with_query("/materials/1", &[("topic", "A/B?c")]);
        assert_eq!(path, "/materials/1?topic=A%2FB%3Fc");

        let encoded = path.split_once("topic=").map(|(_, v)| v).unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), "A/B?c");
    }

    #[test]
    fn multiple_params_are_joined() {
        assert_eq!(
            with_query("/history", &[("studentId", "1"), ("questionId", "101")]),
            "/history?studentId=1&questionId=101"
        );
        assert_eq!(with_query("/history", &[]), "/history");
    }

    #[test]
    fn error_status_prefers_envelope_message() {
        let body = r#"{"status":"BAD_REQUEST","message":"Student ID is required","data":null}"#;
        match status_error(StatusCode::BAD_REQUEST, body) {
            PortError::Status { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Student ID is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_status_falls_back_to_reason_phrase() {
        match status_error(StatusCode::BAD_GATEWAY, "<html>upstream down</html>") {
            PortError::Status { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, ""),
            PortError::NotFound(message) if message == "Not Found"
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, ""),
            PortError::Unauthorized(message) if message == "Forbidden"
        ));
    }

    #[test]
    fn unauthorized_keeps_the_server_message() {
        let body = r#"{"status":"UNAUTHORIZED","message":"Session expired","data":null}"#;
        let error = status_error(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(&error, PortError::Unauthorized(message) if message == "Session expired"));
        assert_eq!(error.to_string(), "Unauthorized: Session expired");
    }
}
