pub mod badge;
pub mod field;

pub use badge::{severity_badge, status_tone, BadgeTone, ToneBadge};
pub use field::{TextAreaField, TextField};
