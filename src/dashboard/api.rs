use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::RequestRow;

#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    /// The server rejected the admin key. The session must lock.
    Unauthorized(String),
    Server { status: u16, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "network error: {e}"),
            ApiError::Unauthorized(msg) => write!(f, "unauthorized: {msg}"),
            ApiError::Server { status, message } => {
                write!(f, "server returned {status}: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

#[derive(Deserialize)]
struct ListBody {
    requests: Vec<RequestRow>,
}

#[derive(Deserialize)]
struct SubmitBody {
    request: RequestRow,
}

/// HTTP client for the requestbox API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn error_from(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_default();
        if status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Server { status, message }
        }
    }

    pub async fn submit(&self, name: &str, song: &str) -> Result<RequestRow, ApiError> {
        let url = format!("{}/requests", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "name": name, "song": song }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json::<SubmitBody>().await?.request)
    }

    pub async fn list(&self, key: &str) -> Result<Vec<RequestRow>, ApiError> {
        let url = format!("{}/requests", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("x-admin-key", key)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json::<ListBody>().await?.requests)
    }

    pub async fn delete(&self, key: &str, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/requests/{id}", self.base_url);
        let resp = self
            .client
            .delete(&url)
            .header("x-admin-key", key)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(())
    }
}
