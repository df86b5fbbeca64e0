//! Due-date extraction and the decisions made from it.

pub mod decision;
pub mod header;
pub mod notify;
pub mod reminder;
pub mod temporal;
pub mod urgency;

pub use decision::{Decision, DuePolicy};
pub use header::{format_utc_offset, parse_header, parse_utc_offset, DueSpec, HeaderFields};
pub use reminder::Offset;
pub use urgency::{BucketLabels, LabelChange, UrgencyBucket};
