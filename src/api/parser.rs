// src/api/parser.rs
//! Parsing of successful responses. Status handling lives with the caller.

use super::client::ApiResponse;
use super::responses::PageEnvelope;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;

/// Parses a response body into the page envelope.
pub fn parse_page_envelope(result: &ApiResponse<String>) -> Result<PageEnvelope, AppError> {
    parse_body(&result.data, &result.url)
}

fn parse_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        AppError::MalformedResponse {
            url: url.to_string(),
            reason: e.to_string(),
            preview: preview(body),
        }
    })
}

/// Truncates a body for error display without splitting a character.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
