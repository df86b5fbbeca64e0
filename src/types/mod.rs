mod issue;
mod label;
mod user;

pub use issue::{IssueRecord, IssueState};
pub use label::Label;
pub use user::User;
