//! Terminal client for the notes API.
//!
//! [`NotesClient`] speaks HTTP. [`NoteBoard`] holds what the user sees and
//! [`NotesApp`] drives the board through the API.
//!
//! The base URL is resolved by [`crate::config::ClientConfig`].

mod app;
mod board;
mod pagination;
mod render;

pub use app::NotesApp;
pub use board::*;
pub use pagination::*;
pub use render::*;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::*;

/// Default URL for a locally running server.
pub const DEFAULT_URL: &str = "http://localhost:8002";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Operations the board needs from the backend.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, ClientError>;
    async fn create_note(&self, input: &NoteInput) -> Result<(), ClientError>;
    async fn update_note(&self, id: &str, input: &NoteInput) -> Result<(), ClientError>;
    async fn delete_note(&self, id: &str) -> Result<(), ClientError>;
    async fn set_pinned(&self, id: &str, pinned: bool) -> Result<(), ClientError>;
}

/// HTTP client for the notes API.
#[derive(Debug, Clone)]
pub struct NotesClient {
    base_url: String,
    client: Client,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Handle response, converting non-2xx statuses to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Handle response that may return empty body (204 No Content).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(ClientError::Status { status, message })
    }
}

#[async_trait]
impl NotesApi for NotesClient {
    async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/notes").send().await?;
        self.handle_response(response).await
    }

    async fn create_note(&self, input: &NoteInput) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/notes")
            .json(input)
            .send()
            .await?;
        self.handle_response::<MessageResponse>(response)
            .await
            .map(|_| ())
    }

    async fn update_note(&self, id: &str, input: &NoteInput) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/notes/{}", id))
            .json(input)
            .send()
            .await?;
        self.handle_response::<MessageResponse>(response)
            .await
            .map(|_| ())
    }

    async fn delete_note(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/notes/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    async fn set_pinned(&self, id: &str, pinned: bool) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/notes/{}/pin", id))
            .json(&PinInput { pinned })
            .send()
            .await?;
        self.handle_response::<MessageResponse>(response)
            .await
            .map(|_| ())
    }
}
