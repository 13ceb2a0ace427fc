// src/api/responses.rs
//! Response envelope of the feedback endpoint (Spring HATEOAS paging).

use crate::model::RawFeedback;
use serde::{Deserialize, Serialize};

/// One page of the feedback listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub page: PageMetadata,
    /// Omitted by the API when a page holds no records.
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedFeedback>,
}

/// Pagination block of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub total_pages: u32,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddedFeedback {
    #[serde(rename = "feedbackV1", default)]
    pub feedback: Vec<RawFeedback>,
}

impl PageEnvelope {
    /// Consumes the envelope, yielding its records in response order.
    pub fn into_records(self) -> Vec<RawFeedback> {
        self.embedded.map(|e| e.feedback).unwrap_or_default()
    }
}
