//! HTTP client for the tracker REST API.
//!
//! One method per endpoint. Session credentials are cookie-based and
//! carried automatically by the client's cookie store, so a successful
//! login makes every subsequent call authenticated without further
//! plumbing.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use punchcard_proto::auth::{ErrorBody, LoginRequest, LoginResponse, RegisterRequest};
use punchcard_proto::task::{NewTask, Task, TaskId};

/// How a task-endpoint response status is handled at the call site.
///
/// Consulted uniformly by every task call so the implicit-logout rule
/// (401/403 anywhere means the session is gone) lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx.
    Success,
    /// 401/403: the session is no longer valid.
    AuthExpired,
    /// Other 4xx: the server refused this particular request.
    Rejected,
    /// 5xx: transient server-side failure.
    Transient,
}

/// Classifies an HTTP status for uniform error handling.
#[must_use]
pub fn classify(status: StatusCode) -> Outcome {
    if status.is_success() {
        Outcome::Success
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Outcome::AuthExpired
    } else if status.is_client_error() {
        Outcome::Rejected
    } else {
        Outcome::Transient
    }
}

/// Errors from the tracker API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL does not parse.
    #[error("invalid server URL {url}: {source}")]
    InvalidBaseUrl {
        /// The offending URL string.
        url: String,
        /// Underlying parse error.
        source: url::ParseError,
    },

    /// Connection, timeout, or body decode failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the session (401/403 on a task endpoint).
    #[error("session expired or unauthorized")]
    AuthExpired,

    /// The server refused the request; `message` is user-presentable.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided error text, or a generic fallback.
        message: String,
    },

    /// The server failed (5xx).
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided error text, or a generic fallback.
        message: String,
    },
}

/// Tracker API client over a fixed base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Builds a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ApiError::Transport`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}", self.base, suffix)
    }

    /// `POST {base}/auth/login/`.
    ///
    /// # Errors
    ///
    /// Any non-2xx status becomes [`ApiError::Rejected`] carrying the
    /// server's `error` text (bad credentials are not a session expiry).
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login/"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(auth_failure(response, "Invalid username or password.").await)
        }
    }

    /// `POST {base}/auth/register/`. Does not authenticate the session.
    ///
    /// # Errors
    ///
    /// Any non-2xx status becomes [`ApiError::Rejected`] carrying the
    /// server's `error` text.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/register/"))
            .json(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(auth_failure(response, "Registration failed. The user may already exist.").await)
        }
    }

    /// `POST {base}/auth/logout/`.
    ///
    /// # Errors
    ///
    /// See [`classify`] for the status mapping.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.http.post(self.url("/auth/logout/")).send().await?;
        expect_ok(response).await
    }

    /// `GET {base}/tasks/` — the full task collection, in server order.
    ///
    /// # Errors
    ///
    /// See [`classify`] for the status mapping.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.http.get(self.url("/tasks/")).send().await?;
        expect_json(response).await
    }

    /// `POST {base}/tasks/` — creates a task, returns the server record.
    ///
    /// # Errors
    ///
    /// See [`classify`] for the status mapping.
    pub async fn create_task(&self, name: &str) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.url("/tasks/"))
            .json(&NewTask {
                name: name.to_string(),
            })
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST {base}/tasks/{id}/toggle/` — starts or pauses the timer.
    ///
    /// # Errors
    ///
    /// See [`classify`] for the status mapping.
    pub async fn toggle_task(&self, id: TaskId) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/tasks/{id}/toggle/")))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST {base}/tasks/{id}/complete/` — finalizes the task.
    ///
    /// # Errors
    ///
    /// See [`classify`] for the status mapping.
    pub async fn complete_task(&self, id: TaskId) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/tasks/{id}/complete/")))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `DELETE {base}/tasks/{id}/delete/`. Any 2xx is success; the body,
    /// if present, is ignored.
    ///
    /// # Errors
    ///
    /// See [`classify`] for the status mapping.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{id}/delete/")))
            .send()
            .await?;
        expect_ok(response).await
    }
}

/// Decodes a 2xx body as JSON; maps everything else through [`classify`].
async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    match classify(status) {
        Outcome::Success => Ok(response.json().await?),
        Outcome::AuthExpired => Err(ApiError::AuthExpired),
        Outcome::Rejected => Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(response).await,
        }),
        Outcome::Transient => Err(ApiError::Server {
            status: status.as_u16(),
            message: error_message(response).await,
        }),
    }
}

/// Like [`expect_json`] but discards the success body.
async fn expect_ok(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    match classify(status) {
        Outcome::Success => Ok(()),
        Outcome::AuthExpired => Err(ApiError::AuthExpired),
        Outcome::Rejected => Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(response).await,
        }),
        Outcome::Transient => Err(ApiError::Server {
            status: status.as_u16(),
            message: error_message(response).await,
        }),
    }
}

/// Builds the rejection error for a failed auth request, preferring the
/// server's `error` text over `fallback`.
async fn auth_failure(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let message = extract_error(response)
        .await
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Rejected { status, message }
}

async fn error_message(response: Response) -> String {
    extract_error(response)
        .await
        .unwrap_or_else(|| "request failed".to_string())
}

async fn extract_error(response: Response) -> Option<String> {
    response.json::<ErrorBody>().await.ok().and_then(|b| b.error)
}
