// src/api/client.rs
//! Pure HTTP client wrapper for the feedback endpoint.
//!
//! This module provides a thin wrapper around reqwest. It sets the
//! user-agent and timeout once, issues GET requests, and hands back the
//! raw body with its status. Interpreting the status is left to callers.

use super::{FeedbackSource, PageDiscovery, PageFetch};
use crate::error::AppError;
use crate::types::{PageSize, PublicationId, ValidatedUrl};
use reqwest::{header, Client, Response};
use std::time::Duration;

/// Connection settings shared by every request of a run.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: ValidatedUrl,
    pub user_agent: String,
    pub timeout: Duration,
}

/// A thin wrapper around reqwest Client for the feedback API.
#[derive(Clone)]
pub struct FeedbackHttpClient {
    client: Client,
    endpoint: ValidatedUrl,
}

impl FeedbackHttpClient {
    /// Creates a new HTTP client with the run's user agent and timeout.
    pub fn new(settings: &ClientSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(&settings.user_agent)?)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// Creates the default headers sent with every request.
    fn create_headers(user_agent: &str) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(user_agent).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid user agent: {}", e))
            })?,
        );

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the endpoint with the given query.
    pub async fn get(&self, query: &[(&str, String)]) -> Result<ApiResponse<String>, AppError> {
        log::debug!("GET {} {:?}", self.endpoint, query);

        let response = self
            .client
            .get(self.endpoint.as_url().clone())
            .query(query)
            .send()
            .await?;

        extract_response_text(response).await
    }
}

/// Query parameters for the listing. `page` is omitted for the count request.
pub fn feedback_query(
    publication: PublicationId,
    size: PageSize,
    page: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("publicationId", publication.to_string()),
        ("size", size.to_string()),
    ];
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    query
}

#[async_trait::async_trait]
impl FeedbackSource for FeedbackHttpClient {
    async fn discover_pages(
        &self,
        publication: PublicationId,
        size: PageSize,
    ) -> Result<PageDiscovery, AppError> {
        let result = self.get(&feedback_query(publication, size, None)).await?;

        if !result.status.is_success() {
            log::warn!(
                "Page count request for publication {} returned HTTP {}",
                publication,
                result.status
            );
            return Ok(PageDiscovery::Unavailable {
                status: result.status,
            });
        }

        let envelope = super::parser::parse_page_envelope(&result)?;
        Ok(PageDiscovery::Available(envelope.page.total_pages))
    }

    async fn fetch_page(
        &self,
        publication: PublicationId,
        size: PageSize,
        page: u32,
    ) -> Result<PageFetch, AppError> {
        let result = self
            .get(&feedback_query(publication, size, Some(page)))
            .await?;

        if !result.status.is_success() {
            return Ok(PageFetch::Unavailable {
                status: result.status,
            });
        }

        let envelope = super::parser::parse_page_envelope(&result)?;
        Ok(PageFetch::Records(envelope.into_records()))
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
