// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! These are defaults only. Every component receives its values through
//! `HarvestConfig`, so tests and the CLI can override any of them.

// ---------------------------------------------------------------------------
// Feedback portal API
// ---------------------------------------------------------------------------

/// The undocumented JSON endpoint listing all feedback for a publication.
pub const FEEDBACK_API_URL: &str =
    "https://ec.europa.eu/info/law/better-regulation/brpapi/allFeedback";

/// Attachment download URLs are this prefix followed by the document ID.
pub const ATTACHMENT_DOWNLOAD_BASE: &str =
    "https://ec.europa.eu/info/law/better-regulation/api/download/";

/// Key under `_embedded` holding the records of one page.
pub const EMBEDDED_FEEDBACK_KEY: &str = "feedbackV1";

/// Records per page. The API defaults to 20 when `size` is omitted.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// The portal rejects requests without a browser-like user agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:83.0) Gecko/20100101 Firefox/83.0";

/// Upper bound on a single request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Politeness
// ---------------------------------------------------------------------------

/// Pause after every this many harvested records.
pub const DEFAULT_PAUSE_BATCH: u32 = 400;

/// Bounds of the randomized pause, in milliseconds.
pub const DEFAULT_PAUSE_MIN_MS: u64 = 1_000;
pub const DEFAULT_PAUSE_MAX_MS: u64 = 3_000;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

pub const DEFAULT_TABLE_NAME: &str = "feedback";

pub const DEFAULT_SKIP_LOG: &str = "skipped_pages.txt";

/// Maximum characters shown when previewing a malformed response body.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

pub const ENV_API_URL: &str = "BRP_FEEDBACK_API_URL";
pub const ENV_DOWNLOAD_BASE: &str = "BRP_FEEDBACK_DOWNLOAD_BASE";
