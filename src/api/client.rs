//! HTTP client for the Perfect Research REST API

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::errors::ApiError;
use super::resource::{AdminResource, ResourcePayload};
use super::session::Session;
use crate::config::Config;
use crate::models::Document;

/// List endpoints answer either with a bare array or with an envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
    },
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped { data } => data,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "token")]
    access_token: String,
    #[serde(default)]
    username: Option<String>,
}

/// Thin wrapper around `reqwest::Client` carrying the base URL and session
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Result<Self, ApiError> {
        Url::parse(&config.api_url).map_err(|_| ApiError::InvalidUrl(config.api_url.clone()))?;

        let client = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Absolute URL for a path below the API base
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    /// URL of one record; the id is percent-encoded as a single segment
    pub fn record_url(&self, resource: AdminResource, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(resource.path())?;
        let raw = url.to_string();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(raw))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self.session.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(request.bearer_auth(token)),
            _ => Err(ApiError::MissingToken),
        }
    }

    /// Send a request and check the status, returning the body text
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!("{} -> {} ({} bytes)", endpoint, status, body.len());
            return Ok(body);
        }

        let message = error_message(&body, status.canonical_reason().unwrap_or("request failed"));
        warn!("{} -> {}: {}", endpoint, status, message);
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            Err(ApiError::Unauthorized {
                status: status.as_u16(),
                message,
            })
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = self.endpoint("auth/login")?;
        info!("Logging in as {}", email);

        let request = self.client.post(url).json(&LoginRequest { email, password });
        let body = self.send(request, "auth/login").await?;
        let response: LoginResponse = parse_body(&body, "auth/login")?;

        Ok(Session {
            token: Some(response.access_token),
            username: response.username.or_else(|| Some(email.to_string())),
        })
    }

    /// Fetch every record of a collection endpoint
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.authorized(self.client.get(url))?;
        let body = self.send(request, path).await?;
        let payload: ListPayload<T> = parse_body(&body, path)?;
        Ok(payload.into_vec())
    }

    /// Fetch one admin resource into its typed payload
    pub async fn fetch_resource(&self, resource: AdminResource) -> Result<ResourcePayload, ApiError> {
        let path = resource.path();
        let payload = match resource {
            AdminResource::Years => ResourcePayload::Years(self.list(path).await?),
            AdminResource::Universities => ResourcePayload::Universities(self.list(path).await?),
            AdminResource::Countries => ResourcePayload::Countries(self.list(path).await?),
            AdminResource::Disciplines => ResourcePayload::Disciplines(self.list(path).await?),
            AdminResource::Users => ResourcePayload::Users(self.list(path).await?),
        };
        info!("Fetched {} {}", payload.len(), resource);
        Ok(payload)
    }

    pub async fn delete(&self, resource: AdminResource, id: &str) -> Result<(), ApiError> {
        let url = self.record_url(resource, id)?;
        let path = url.path().to_string();
        let request = self.authorized(self.client.delete(url))?;
        self.send(request, &path).await?;
        info!("Deleted {} {}", resource, id);
        Ok(())
    }

    pub async fn search_documents(&self, query: &str) -> Result<Vec<Document>, ApiError> {
        let mut url = self.endpoint("documents/search")?;
        url.query_pairs_mut().append_pair("q", query);
        let request = self.authorized(self.client.get(url))?;
        let body = self.send(request, "documents/search").await?;
        let payload: ListPayload<Document> = parse_body(&body, "documents/search")?;
        Ok(payload.into_vec())
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::InvalidResponse {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Error text from a failed response: the `detail` or `message` field of a
/// JSON body, else the raw body, else the status reason.
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Year;

    fn client(session: Session) -> ApiClient {
        let config = Config::default().with_api_url("http://localhost:8000/api/");
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let api = client(Session::anonymous());
        assert_eq!(
            api.endpoint("admin/years").unwrap().as_str(),
            "http://localhost:8000/api/admin/years"
        );
        assert_eq!(
            api.endpoint("/auth/login").unwrap().as_str(),
            "http://localhost:8000/api/auth/login"
        );
    }

    #[test]
    fn test_record_url_encodes_id() {
        let api = client(Session::anonymous());
        assert_eq!(
            api.record_url(AdminResource::Years, "42").unwrap().as_str(),
            "http://localhost:8000/api/admin/years/42"
        );
        assert_eq!(
            api.record_url(AdminResource::Users, "a/b?c#d").unwrap().as_str(),
            "http://localhost:8000/api/admin/users/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config::default().with_api_url("::nope");
        assert!(matches!(
            ApiClient::new(&config, Session::anonymous()),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_requests_without_token_fail_early() {
        let api = client(Session::anonymous());
        let result = api.fetch_resource(AdminResource::Years).await;
        assert!(matches!(result, Err(ApiError::MissingToken)));
        assert!(result.unwrap_err().is_auth_failure());

        let result = api.delete(AdminResource::Users, "3").await;
        assert!(matches!(result, Err(ApiError::MissingToken)));
    }

    #[test]
    fn test_bearer_header() {
        let api = client(Session::with_token("secret"));
        let request = api
            .authorized(api.client.get("http://localhost/x"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer secret"
        );
    }

    #[test]
    fn test_list_payload_shapes() {
        let bare: ListPayload<Year> =
            serde_json::from_str(r#"[{"id": 1, "year": 2020}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: ListPayload<Year> =
            serde_json::from_str(r#"{"items": [{"id": 1, "year": 2020}, {"id": 2, "year": 2021}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_vec().len(), 2);
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"detail": "Token expired"}"#, "x"), "Token expired");
        assert_eq!(error_message(r#"{"message": "Not found"}"#, "x"), "Not found");
        assert_eq!(error_message("  plain failure ", "x"), "plain failure");
        assert_eq!(error_message("", "Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_login_response_aliases() {
        let response: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(response.access_token, "abc");
        assert!(response.username.is_none());
    }
}
