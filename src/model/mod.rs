// src/model/mod.rs
//! Feedback records as returned by the portal and as stored locally.

mod feedback;
mod normalization;

pub use feedback::{FeedbackRecord, RawFeedback};
pub use normalization::{is_truthy, normalize};

/// Attachment list on a raw record. Never stored.
pub const ATTACHMENTS_FIELD: &str = "attachments";

/// Hypermedia navigation blocks on a raw record. Never stored.
pub const NAVIGATION_FIELDS: &[&str] = &["_links"];

/// Derived download URL of the first attachment.
pub const ATTACHMENT_URL_FIELD: &str = "attachmentUrl";

/// Derived stored filename of the first attachment.
pub const ERS_FILE_NAME_FIELD: &str = "ersFileName";

/// Fixed column order of the database table.
pub const FEEDBACK_COLUMNS: [&str; 14] = [
    "id",
    "publicationId",
    "referenceInitiative",
    "dateFeedback",
    "language",
    "country",
    "organization",
    "firstName",
    "surname",
    "userType",
    "companySize",
    "feedback",
    ATTACHMENT_URL_FIELD,
    ERS_FILE_NAME_FIELD,
];
