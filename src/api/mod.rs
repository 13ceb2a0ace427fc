// src/api/mod.rs
//! Feedback API interaction: discovering how many pages exist and fetching them.
//!
//! Business logic depends on `FeedbackSource`, never on HTTP details, so the
//! harvest loop can be driven by the real client or by a test double.

pub mod client;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::model::RawFeedback;
use crate::types::{PageSize, PublicationId};
use reqwest::StatusCode;

/// Outcome of the page-count request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDiscovery {
    /// The API answered; it holds this many pages.
    Available(u32),
    /// The API answered with a non-success status.
    Unavailable { status: StatusCode },
}

impl PageDiscovery {
    /// Pages to fetch. An unavailable API means there is no work.
    pub fn total_pages(&self) -> u32 {
        match self {
            Self::Available(pages) => *pages,
            Self::Unavailable { .. } => 0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Outcome of one page request.
#[derive(Debug, Clone, PartialEq)]
pub enum PageFetch {
    Records(Vec<RawFeedback>),
    /// Non-success status; the page is skipped.
    Unavailable { status: StatusCode },
}

/// The ability to read a publication's feedback listing page by page.
#[async_trait::async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn discover_pages(
        &self,
        publication: PublicationId,
        size: PageSize,
    ) -> Result<PageDiscovery, AppError>;

    async fn fetch_page(
        &self,
        publication: PublicationId,
        size: PageSize,
        page: u32,
    ) -> Result<PageFetch, AppError>;
}

pub use client::{ClientSettings, FeedbackHttpClient};
