use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Identifier of a publication (consultation document) on the feedback portal.
///
/// Accepts the bare number, an API URL carrying `publicationId=`, or a
/// portal URL whose last all-digit path segment is the publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationId(u64);

impl PublicationId {
    /// Parses a publication ID from user input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyField("publication_id"));
        }

        let candidate = if input.starts_with("http://") || input.starts_with("https://") {
            extract_from_url(input)
                .ok_or_else(|| ValidationError::InvalidPublicationId(input.to_string()))?
        } else {
            input.to_string()
        };

        match candidate.parse::<u64>() {
            Ok(0) | Err(_) => Err(ValidationError::InvalidPublicationId(input.to_string())),
            Ok(value) => Ok(Self(value)),
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finds a `publicationId` query value, or the last all-digit path segment.
fn extract_from_url(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;

    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "publicationId") {
        return Some(value.into_owned());
    }

    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}
