//! Content filtering
//!
//! The configurable predicate referenced by spec §4.1 steps 1 and 5: applied to
//! every inbound message before a vendor call, and to every completion choice or
//! streamed delta afterward.

mod filter;
mod patterns;
mod types;

pub use filter::ContentFilter;
pub use types::{ContentIssue, FilterResult, ModerationSeverity, PIIPattern, PIIReplacement};
