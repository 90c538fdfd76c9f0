//! Content filter types
//!
//! Core types used by the pre/post content filter (spec §4.1 step 1 and step 5).

use regex::Regex;

/// A single detectable pattern and what to do when it matches.
#[derive(Debug, Clone)]
pub struct PIIPattern {
    /// Pattern name, used in `ContentIssue::issue_type`.
    pub name: String,
    /// Regex pattern.
    pub pattern: Regex,
    /// Replacement strategy applied when building the post-filter's modified content.
    pub replacement: PIIReplacement,
    /// Confidence level reported on the resulting issue.
    pub confidence: f64,
}

/// Replacement strategies for a matched pattern.
#[derive(Debug, Clone)]
pub enum PIIReplacement {
    /// Replace with a fixed placeholder string.
    Placeholder(String),
    /// Remove entirely.
    Remove,
    /// Mask partially, keeping the first/last N characters.
    PartialMask { keep_start: usize, keep_end: usize },
}

/// Severity of a detected issue.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum ModerationSeverity {
    Low,
    Medium,
    High,
}

/// Result of running the filter over one piece of text.
#[derive(Debug, Clone)]
pub struct FilterResult {
    /// True if the content must be rejected outright (pre-filter) or truncated (post-filter).
    pub blocked: bool,
    /// Detected issues, if any.
    pub issues: Vec<ContentIssue>,
    /// Replacement content, present only when `blocked` is false but the text was modified.
    pub modified_content: Option<String>,
}

/// One detected issue within a piece of text.
#[derive(Debug, Clone)]
pub struct ContentIssue {
    pub issue_type: String,
    pub description: String,
    pub severity: ModerationSeverity,
    pub confidence: f64,
}
