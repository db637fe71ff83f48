//! HTTP client for the ASA team API.
//!
//! [`AsaClient`] is a thin wrapper over `reqwest` that addresses
//! project resources under `/teams/{team}/projects` and attaches the
//! bearer token to every request. It returns raw status/body pairs and
//! leaves payload interpretation to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::{AsaConfig, Credentials};
use crate::error::ApiError;

/// A raw API response: HTTP status plus unparsed body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as received.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
struct ServiceToken {
    bearer_token: String,
}

/// Bearer-token HTTP client for project resources.
#[derive(Debug)]
pub struct AsaClient {
    http: reqwest::Client,
    config: AsaConfig,
}

impl AsaClient {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: AsaConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::request(config.base_url.as_str(), e))?;
        Ok(Self { http, config })
    }

    /// Exchanges an API key for a bearer token and returns a ready client.
    ///
    /// Issues `POST {base}/teams/{team}/service_token` with the key id
    /// and secret as the body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRejected`] when the service refuses the
    /// exchange and [`ApiError::MalformedAuthResponse`] when the
    /// response lacks a bearer token.
    pub async fn login(
        base_url: Url,
        team: impl Into<String>,
        credentials: &Credentials,
    ) -> Result<Self, ApiError> {
        let team = team.into();
        let url = format!(
            "{}/teams/{}/service_token",
            base_url.as_str().trim_end_matches('/'),
            team
        );
        let http = reqwest::Client::new();
        let response = http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request(&url, e))?;
        if !(200..300).contains(&status) {
            tracing::warn!(team = %team, status, "service token exchange rejected");
            return Err(ApiError::auth_rejected(status, body));
        }

        let token: ServiceToken = serde_json::from_str(&body)
            .map_err(|e| ApiError::MalformedAuthResponse(e.to_string()))?;
        Self::new(AsaConfig::new(base_url, team, token.bearer_token))
    }

    /// The team this client addresses.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.config.team
    }

    fn projects_url(&self) -> String {
        format!(
            "{}/teams/{}/projects",
            self.config.base_url.as_str().trim_end_matches('/'),
            self.config.team
        )
    }

    fn project_url(&self, name: &str) -> String {
        format!("{}/{}", self.projects_url(), name)
    }

    async fn execute(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.config.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, url, error = %e, "request failed");
            ApiError::request(url, e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::request(url, e))?;
        tracing::debug!(%method, url, status, "request completed");
        Ok(ApiResponse { status, body })
    }

    /// Fetches a project by name.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures; any HTTP status is
    /// reported through the response.
    pub async fn get_project(&self, name: &str) -> Result<ApiResponse, ApiError> {
        self.execute(reqwest::Method::GET, &self.project_url(name), None)
            .await
    }

    /// Creates a project from a serialized payload.
    pub async fn create_project<T: Serialize>(&self, payload: &T) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.execute(reqwest::Method::POST, &self.projects_url(), Some(&body))
            .await
    }

    /// Applies a partial update to a project.
    pub async fn update_project<T: Serialize>(
        &self,
        name: &str,
        payload: &T,
    ) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.execute(reqwest::Method::PUT, &self.project_url(name), Some(&body))
            .await
    }

    /// Deletes a project by name.
    pub async fn delete_project(&self, name: &str) -> Result<ApiResponse, ApiError> {
        self.execute(reqwest::Method::DELETE, &self.project_url(name), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AsaClient {
        let config = AsaConfig::new(Url::parse(&server.uri()).unwrap(), "acme", "sekrit");
        AsaClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn get_sends_bearer_token_to_project_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/acme/projects/web"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "web"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).get_project("web").await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn create_posts_to_collection_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teams/acme/projects"))
            .and(body_json(json!({"name": "web"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "web"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .create_project(&json!({"name": "web"}))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn non_success_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/teams/acme/projects/web"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = client_for(&server).delete_project("web").await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn login_exchanges_key_for_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teams/acme/service_token"))
            .and(body_json(json!({"key_id": "id", "key_secret": "secret"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"bearer_token": "issued"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/teams/acme/projects/web"))
            .and(header("authorization", "Bearer issued"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "web"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AsaClient::login(
            Url::parse(&server.uri()).unwrap(),
            "acme",
            &Credentials::new("id", "secret"),
        )
        .await
        .unwrap();
        let response = client.get_project("web").await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn login_rejection_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teams/acme/service_token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = AsaClient::login(
            Url::parse(&server.uri()).unwrap(),
            "acme",
            &Credentials::new("id", "wrong"),
        )
        .await
        .unwrap_err();
        match err {
            ApiError::AuthRejected { status, detail } => {
                assert_eq!(status, 401);
                assert_eq!(detail, "bad key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
