//! Common types and traits for feedback records

pub mod record;
pub mod record_id;
pub mod status;

// Re-exports
pub use record::FeedbackRecord;
pub use record_id::RecordId;
pub use status::{deserialize_lenient_status, normalize_status_token, UnknownStatus};
