//! HTTP client for the external library API.
//!
//! A single [`LibraryClient`] is built at startup from the environment and shared
//! through [`AppState`](crate::types::AppState). Reads are retried with backoff on
//! transient failures; writes are sent exactly once.

use std::env;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared_utils::{RetryConfig, retry_async_when};
use thiserror::Error;
use tracing::debug;

use crate::types::{
    Author, AuthorInput, Book, BookFormOptions, BookInput, BorrowOptions, BorrowRequest,
    BorrowedBook, Category, CategoryInput, DashboardData, DashboardOverview, Member, MemberInput,
    PopularBook, RecordId, TopBorrower,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Upstream error bodies longer than this are cut before reaching a toast.
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("library API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid library API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Whether repeating the same read could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(err) => err.is_timeout() || err.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            Self::InvalidBaseUrl(_) => false,
        }
    }

    /// Message suitable for showing to staff.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Connection settings for the library API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Reads `LIBRARY_API_URL`, `LIBRARY_API_TIMEOUT_SECS` and
    /// `LIBRARY_API_MAX_RETRIES`, falling back to defaults for missing or
    /// unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("LIBRARY_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = env::var("LIBRARY_API_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.trim().parse().ok())
            .map_or(defaults.timeout, Duration::from_secs);
        let retry = env::var("LIBRARY_API_MAX_RETRIES")
            .ok()
            .and_then(|n| n.trim().parse().ok())
            .map_or(defaults.retry, |n| defaults.retry.with_max_retries(n));

        Self {
            base_url,
            timeout,
            retry,
        }
    }
}

/// Checks that `raw` is an absolute http(s) URL and strips trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let uri: http::Uri = trimmed
        .parse()
        .map_err(|_| ApiError::InvalidBaseUrl(raw.to_owned()))?;
    match (uri.scheme_str(), uri.host()) {
        (Some("http" | "https"), Some(host)) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ApiError::InvalidBaseUrl(raw.to_owned())),
    }
}

/// Pulls a readable message out of an upstream error body.
fn error_message(body: &str, status: StatusCode) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error", "detail"]
                .iter()
                .find_map(|key| value.get(*key)?.as_str().map(str::to_owned))
        });
    let message = from_json.unwrap_or_else(|| body.trim().to_owned());
    if message.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned();
    }
    message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect()
}

#[derive(Debug, Clone)]
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl LibraryClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            retry: config.retry,
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = method.as_str(), path, "library API request");
        self.http
            .request(method, format!("{}{path}", self.base_url))
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body, status),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        retry_async_when(
            path,
            self.retry,
            || async move {
                let response = self.request(Method::GET, path).send().await?;
                let body = Self::check(response).await?.json::<T>().await?;
                Ok::<T, ApiError>(body)
            },
            ApiError::is_transient,
        )
        .await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    /// Sends a request whose response body is ignored.
    async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), ApiError> {
        let response = self.request(method, path).query(query).send().await?;
        Self::check(response).await.map(drop)
    }

    pub async fn authors(&self) -> Result<Vec<Author>, ApiError> {
        self.get("/authors").await
    }

    pub async fn create_author(&self, input: &AuthorInput) -> Result<Author, ApiError> {
        self.send_json(Method::POST, "/authors", input).await
    }

    pub async fn update_author(&self, id: RecordId, input: &AuthorInput) -> Result<Author, ApiError> {
        self.send_json(Method::PUT, &format!("/authors/{id}"), input)
            .await
    }

    pub async fn delete_author(&self, id: RecordId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/authors/{id}"), &[])
            .await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories").await
    }

    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        self.send_json(Method::POST, "/categories", input).await
    }

    pub async fn update_category(
        &self,
        id: RecordId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        self.send_json(Method::PUT, &format!("/categories/{id}"), input)
            .await
    }

    pub async fn delete_category(&self, id: RecordId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/categories/{id}"), &[])
            .await
    }

    pub async fn books(&self) -> Result<Vec<Book>, ApiError> {
        self.get("/books").await
    }

    /// Books that can currently be lent out.
    pub async fn active_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get("/books/active").await
    }

    pub async fn create_book(&self, input: &BookInput) -> Result<Book, ApiError> {
        self.send_json(Method::POST, "/books", input).await
    }

    pub async fn update_book(&self, id: RecordId, input: &BookInput) -> Result<Book, ApiError> {
        self.send_json(Method::PUT, &format!("/books/{id}"), input)
            .await
    }

    pub async fn delete_book(&self, id: RecordId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/books/{id}"), &[])
            .await
    }

    pub async fn members(&self) -> Result<Vec<Member>, ApiError> {
        self.get("/members").await
    }

    pub async fn create_member(&self, input: &MemberInput) -> Result<Member, ApiError> {
        self.send_json(Method::POST, "/members", input).await
    }

    pub async fn update_member(&self, id: RecordId, input: &MemberInput) -> Result<Member, ApiError> {
        self.send_json(Method::PUT, &format!("/members/{id}"), input)
            .await
    }

    pub async fn delete_member(&self, id: RecordId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/members/{id}"), &[])
            .await
    }

    /// Fetches the four dashboard feeds concurrently; any failure fails the lot.
    pub async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        let (overview, borrowed_books, top_borrowers, popular_books) = tokio::try_join!(
            self.get::<DashboardOverview>("/dashboard/overview"),
            self.get::<Vec<BorrowedBook>>("/borrowed-books?status=BORROWED"),
            self.get::<Vec<TopBorrower>>("/dashboard/members/top-borrowers"),
            self.get::<Vec<PopularBook>>("/dashboard/books/popular"),
        )?;
        Ok(DashboardData {
            overview,
            borrowed_books,
            top_borrowers,
            popular_books,
        })
    }

    pub async fn borrow_options(&self) -> Result<BorrowOptions, ApiError> {
        let (books, members) = tokio::try_join!(self.active_books(), self.members())?;
        Ok(BorrowOptions { books, members })
    }

    pub async fn book_form_options(&self) -> Result<BookFormOptions, ApiError> {
        let (authors, categories) = tokio::try_join!(self.authors(), self.categories())?;
        Ok(BookFormOptions {
            authors,
            categories,
        })
    }

    pub async fn borrow_book(&self, request: &BorrowRequest) -> Result<(), ApiError> {
        self.send_empty(
            Method::POST,
            "/borrowed-books/borrow",
            &[
                ("bookId", request.book_id.to_string()),
                ("memberId", request.member_id.to_string()),
                ("durationInDays", request.duration_in_days.to_string()),
            ],
        )
        .await
    }

    pub async fn return_book(&self, loan_id: RecordId) -> Result<(), ApiError> {
        self.send_empty(
            Method::POST,
            &format!("/borrowed-books/{loan_id}/return"),
            &[],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/api/").unwrap(),
            "http://localhost:8080/api"
        );
        assert_eq!(
            normalize_base_url(" https://library.example ").unwrap(),
            "https://library.example"
        );
        assert_matches!(normalize_base_url("localhost:8080"), Err(ApiError::InvalidBaseUrl(_)));
        assert_matches!(normalize_base_url("/api"), Err(ApiError::InvalidBaseUrl(_)));
        assert_matches!(normalize_base_url("ftp://files"), Err(ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let body = r#"{"status":404,"message":"Author not found"}"#;
        assert_eq!(error_message(body, StatusCode::NOT_FOUND), "Author not found");
    }

    #[test]
    fn test_error_message_falls_back_to_text() {
        assert_eq!(
            error_message("  database down ", StatusCode::INTERNAL_SERVER_ERROR),
            "database down"
        );
        assert_eq!(error_message("", StatusCode::BAD_GATEWAY), "Bad Gateway");
        assert_eq!(
            error_message(&"x".repeat(500), StatusCode::BAD_REQUEST).len(),
            MAX_ERROR_MESSAGE_CHARS
        );
    }

    #[test]
    fn test_status_errors_transient_only_on_5xx() {
        let server = ApiError::Status {
            status: 503,
            message: String::new(),
        };
        let client = ApiError::Status {
            status: 409,
            message: "Book is already borrowed".into(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert_eq!(client.user_message(), "Book is already borrowed");
        assert_eq!(server.user_message(), "library API returned 503: ");
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        };
        assert_matches!(LibraryClient::new(config), Err(ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry, RetryConfig::default());
    }
}
