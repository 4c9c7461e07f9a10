//! Token-bearing JSON client for the task board REST API.

use crate::session::Session;
use crate::task::{
    domain::TaskId,
    ports::{TaskRepositoryError, TaskRepositoryResult},
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building the API client.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The base URL cannot carry path segments.
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Server failure carried inside [`TaskRepositoryError::Network`].
#[derive(Debug, Error)]
#[error("server responded with {status}: {body}")]
pub struct ServerFailure {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

/// Shared HTTP client for task and employee endpoints.
///
/// Every request carries `Authorization: Bearer <token>` when the session is
/// authenticated.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Creates a client for `base_url`, for example
    /// `http://localhost:5000/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError`] when the URL is not a hierarchical
    /// `http(s)` URL or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, ApiClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|_| ApiClientError::InvalidBaseUrl(base_url.to_owned()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiClientError::InvalidBaseUrl(base_url.to_owned()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parsed,
            session,
        })
    }

    /// Returns the session attached to requests.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Builds the URL for a path below the base URL. Segments are
    /// percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> TaskRepositoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TaskRepositoryError::InvalidResponse(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request without a body and returns the successful response.
    pub(super) async fn send(
        &self,
        method: Method,
        segments: &[&str],
        subject: Option<&TaskId>,
    ) -> TaskRepositoryResult<Response> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending request");
        let response = self
            .request(method, url)
            .send()
            .await
            .map_err(TaskRepositoryError::network)?;
        ensure_success(response, subject).await
    }

    /// Sends a request with a JSON body and returns the successful response.
    pub(super) async fn send_json<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        subject: Option<&TaskId>,
    ) -> TaskRepositoryResult<Response>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending request with body");
        let response = self
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(TaskRepositoryError::network)?;
        ensure_success(response, subject).await
    }
}

/// Reads a response body as text.
pub(super) async fn read_body(response: Response) -> TaskRepositoryResult<String> {
    response.text().await.map_err(TaskRepositoryError::network)
}

async fn ensure_success(
    response: Response,
    subject: Option<&TaskId>,
) -> TaskRepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_failure(status, body, subject))
}

/// Maps an unsuccessful HTTP status onto the repository error taxonomy.
fn classify_failure(
    status: StatusCode,
    body: String,
    subject: Option<&TaskId>,
) -> TaskRepositoryError {
    match status {
        StatusCode::UNAUTHORIZED => TaskRepositoryError::Unauthenticated,
        StatusCode::FORBIDDEN => TaskRepositoryError::PermissionDenied(body),
        StatusCode::NOT_FOUND => match subject {
            Some(id) => TaskRepositoryError::NotFound(id.clone()),
            None => TaskRepositoryError::Rejected {
                status: status.as_u16(),
                message: body,
            },
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            TaskRepositoryError::network(ServerFailure {
                status: status.as_u16(),
                body,
            })
        }
        _ if status.is_server_error() => TaskRepositoryError::network(ServerFailure {
            status: status.as_u16(),
            body,
        }),
        _ => TaskRepositoryError::Rejected {
            status: status.as_u16(),
            message: body,
        },
    }
}
