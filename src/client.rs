//! HTTP transport for the archive REST API
//!
//! [`ApiClient`] owns the HTTP connection pool, the project credentials and
//! the endpoint base URL, and exposes one method per REST endpoint. It maps
//! service rejections onto [`ArchiveError`] but performs no input
//! validation; that belongs to the [`Archives`](crate::Archives) manager.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::{ArchiveError, ArchiveOperation, ArchiveResult};
use crate::models::{Archive, ArchiveList, ArchiveOptions};

/// Production endpoint.
const DEFAULT_BASE_URL: &str = "https://api.vidmesh.io/v2";

/// Per-request timeout applied by the transport. The manager layer never
/// configures timeouts of its own.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API credentials for a Vidmesh project.
///
/// Both values come from the project page of the Vidmesh dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Project API key.
    pub api_key: String,
    /// Project API secret.
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

/// HTTP client for the archive endpoints.
///
/// One instance is meant to be shared: managers for each resource type hold
/// it behind an `Arc` and only ever borrow it per call. The underlying
/// connection pool is safe for concurrent use.
pub struct ApiClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
}

/// Body for the start-recording endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartArchiveRequest<'a> {
    session_id: &'a str,
    name: &'a str,
}

/// Error payload the service attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ApiClient {
    /// Create a client against the production endpoint with default
    /// settings.
    pub fn new(credentials: Credentials) -> ArchiveResult<Self> {
        Self::builder().credentials(credentials).build()
    }

    /// Start building a client with a custom base URL or timeout.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Api-Key", &self.credentials.api_key)
            .header("X-Api-Secret", &self.credentials.api_secret)
    }

    /// Ask the service to start recording `session_id`.
    pub async fn start_archive(
        &self,
        session_id: &str,
        options: &ArchiveOptions,
    ) -> ArchiveResult<Archive> {
        debug!("Starting archive for session {}", session_id);

        let body = StartArchiveRequest {
            session_id,
            name: options.name.as_deref().unwrap_or(""),
        };

        let response = self
            .authed(self.http.post(self.api_url("/archives")))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(ArchiveOperation::Start, response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch a single archive by identifier.
    pub async fn get_archive(&self, archive_id: &str) -> ArchiveResult<Archive> {
        debug!("Fetching archive {}", archive_id);

        let url = self.api_url(&format!("/archives/{}", urlencoding::encode(archive_id)));
        let response = self.authed(self.http.get(url)).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(ArchiveOperation::Get, response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch one page of archives, most recent first. `None` leaves the
    /// corresponding parameter to the service default and omits it from the
    /// query string.
    pub async fn list_archives(
        &self,
        offset: Option<u32>,
        count: Option<u32>,
    ) -> ArchiveResult<ArchiveList> {
        debug!("Listing archives (offset {:?}, count {:?})", offset, count);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(count) = count {
            query.push(("count", count.to_string()));
        }

        let response = self
            .authed(self.http.get(self.api_url("/archives")).query(&query))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(ArchiveOperation::List, response).await);
        }

        Ok(response.json().await?)
    }

    /// Ask the service to stop an in-progress recording. Returns the
    /// archive as it stands after the stop.
    pub async fn stop_archive(&self, archive_id: &str) -> ArchiveResult<Archive> {
        debug!("Stopping archive {}", archive_id);

        let url = self.api_url(&format!(
            "/archives/{}/stop",
            urlencoding::encode(archive_id)
        ));
        let response = self.authed(self.http.post(url)).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(ArchiveOperation::Stop, response).await);
        }

        Ok(response.json().await?)
    }

    /// Delete an archive. Returns the raw response status; the manager
    /// derives the success boolean from it.
    pub async fn delete_archive(&self, archive_id: &str) -> ArchiveResult<StatusCode> {
        debug!("Deleting archive {}", archive_id);

        let url = self.api_url(&format!("/archives/{}", urlencoding::encode(archive_id)));
        let response = self.authed(self.http.delete(url)).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(ArchiveOperation::Delete, response).await);
        }

        Ok(response.status())
    }
}

/// Turn a non-success response into the matching error kind: 401/403 become
/// [`ArchiveError::Authentication`], everything else an
/// [`ArchiveError::Operation`] carrying the service's message.
async fn error_from_response(operation: ArchiveOperation, response: Response) -> ArchiveError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.is_empty() => format!("service returned status {}", status),
        Err(_) => body,
    };

    error!("Archive {} request failed ({}): {}", operation, status, message);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ArchiveError::Authentication(message)
    } else {
        ArchiveError::Operation {
            operation,
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    credentials: Option<Credentials>,
    base_url: String,
    timeout: Duration,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Project credentials. Required.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Point the client at a different endpoint (regional deployment,
    /// self-hosted install, test stub). A trailing slash is trimmed.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> ArchiveResult<ApiClient> {
        let credentials = self.credentials.ok_or_else(|| {
            ArchiveError::InvalidArgument("credentials are required".to_string())
        })?;

        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(ApiClient {
            http,
            credentials,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(mock_server: &MockServer) -> ApiClient {
        ApiClient::builder()
            .credentials(Credentials::new("test-key", "test-secret"))
            .base_url(mock_server.uri())
            .build()
            .unwrap()
    }

    fn archive_json(id: &str, status: &str) -> serde_json::Value {
        json!({"id": id, "status": status, "sessionId": "sess1"})
    }

    #[tokio::test]
    async fn test_credential_headers_sent_on_every_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives/a1"))
            .and(header("X-Api-Key", "test-key"))
            .and(header("X-Api-Secret", "test-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("a1", "available")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let archive = client_for(&mock_server).get_archive("a1").await.unwrap();
        assert_eq!(archive.id, "a1");
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_authentication() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives/a1"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "Invalid API key"})),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_archive("a1").await.unwrap_err();
        match err {
            ArchiveError::Authentication(message) => assert_eq!(message, "Invalid API key"),
            e => panic!("Expected Authentication error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/archives"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Missing credentials"})),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .start_archive("sess1", &ArchiveOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_conflict_carries_operation_and_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/archives"))
            .respond_with(ResponseTemplate::new(409).set_body_json(
                json!({"message": "An archive is already recording for session sess1"}),
            ))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .start_archive("sess1", &ArchiveOptions::default())
            .await
            .unwrap_err();
        match err {
            ArchiveError::Operation {
                operation,
                status,
                message,
            } => {
                assert_eq!(operation, ArchiveOperation::Start);
                assert_eq!(status, Some(409));
                assert!(message.contains("already recording"));
            }
            e => panic!("Expected Operation error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_kept_verbatim() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives/a1"))
            .respond_with(ResponseTemplate::new(400).set_body_string("malformed archive id"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_archive("a1").await.unwrap_err();
        match err {
            ArchiveError::Operation { message, .. } => {
                assert_eq!(message, "malformed archive id");
            }
            e => panic!("Expected Operation error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_gets_fallback_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives/a1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get_archive("a1").await.unwrap_err();
        match err {
            ArchiveError::Operation {
                status, message, ..
            } => {
                assert_eq!(status, Some(404));
                assert!(message.contains("404"));
            }
            e => panic!("Expected Operation error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_list_sends_explicit_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives"))
            .and(query_param("offset", "0"))
            .and(query_param("count", "5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "items": []})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let list = client_for(&mock_server)
            .list_archives(Some(0), Some(5))
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_list_omits_unset_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives"))
            .and(query_param_is_missing("offset"))
            .and(query_param_is_missing("count"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 3, "items": []})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let list = client_for(&mock_server)
            .list_archives(None, None)
            .await
            .unwrap();
        assert_eq!(list.total_count(), 3);
    }

    #[tokio::test]
    async fn test_archive_id_is_percent_encoded_in_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/archives/a%201"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("a 1", "stopped")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let archive = client_for(&mock_server).get_archive("a 1").await.unwrap();
        assert_eq!(archive.id, "a 1");
    }

    #[tokio::test]
    async fn test_delete_returns_raw_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/archives/a1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let status = client_for(&mock_server).delete_archive("a1").await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
