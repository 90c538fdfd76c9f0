//! Content filter
//!
//! The pre/post content filter from spec §4.1: a configurable predicate applied to
//! every message before a vendor call, and to every completion choice or streamed
//! delta afterward. Pre-filter rejection fails the request with `ContentFiltered`
//! without calling the vendor; post-filter rejection truncates with
//! `finishReason = content_filter` rather than failing the whole response.

use super::patterns::*;
use super::types::*;
use crate::core::types::MessageContent;

/// Content filter for detecting and handling sensitive or disallowed content.
pub struct ContentFilter {
    patterns: Vec<PIIPattern>,
}

impl ContentFilter {
    pub fn new() -> Self {
        Self {
            patterns: Self::default_patterns(),
        }
    }

    fn default_patterns() -> Vec<PIIPattern> {
        vec![
            PIIPattern {
                name: "SSN".to_string(),
                pattern: SSN_PATTERN.clone(),
                replacement: PIIReplacement::Placeholder("XXX-XX-XXXX".to_string()),
                confidence: 0.95,
            },
            PIIPattern {
                name: "Email".to_string(),
                pattern: EMAIL_PATTERN.clone(),
                replacement: PIIReplacement::PartialMask {
                    keep_start: 2,
                    keep_end: 0,
                },
                confidence: 0.9,
            },
            PIIPattern {
                name: "Phone".to_string(),
                pattern: PHONE_PATTERN.clone(),
                replacement: PIIReplacement::Placeholder("XXX-XXX-XXXX".to_string()),
                confidence: 0.85,
            },
            PIIPattern {
                name: "CreditCard".to_string(),
                pattern: CREDIT_CARD_PATTERN.clone(),
                replacement: PIIReplacement::Placeholder("XXXX-XXXX-XXXX-XXXX".to_string()),
                confidence: 0.9,
            },
        ]
    }

    /// Pre-filter: run over every message of a request. Any match blocks the whole
    /// request — the gateway never reaches the vendor call (spec §4.1 step 1).
    pub fn filter_messages(&self, messages: &[MessageContent]) -> FilterResult {
        for content in messages {
            let text = content.to_string();
            let result = self.filter_text(&text);
            if result.blocked {
                return result;
            }
        }
        FilterResult {
            blocked: false,
            issues: Vec::new(),
            modified_content: None,
        }
    }

    /// Post-filter: run over one completion choice or streamed delta (spec §4.1
    /// step 5). A match truncates rather than failing the whole response.
    pub fn filter_text(&self, text: &str) -> FilterResult {
        let mut issues = Vec::new();
        let mut modified = text.to_string();

        for pattern in &self.patterns {
            if pattern.pattern.is_match(&modified) {
                issues.push(ContentIssue {
                    issue_type: format!("PII_{}", pattern.name),
                    description: format!("detected {} in content", pattern.name),
                    severity: ModerationSeverity::High,
                    confidence: pattern.confidence,
                });
                modified = self.apply_replacement(&modified, pattern);
            }
        }

        let blocked = issues
            .iter()
            .any(|i| i.severity == ModerationSeverity::High);

        FilterResult {
            blocked,
            issues,
            modified_content: if !blocked && modified != text {
                Some(modified)
            } else {
                None
            },
        }
    }

    fn apply_replacement(&self, text: &str, pattern: &PIIPattern) -> String {
        match &pattern.replacement {
            PIIReplacement::Placeholder(placeholder) => {
                pattern.pattern.replace_all(text, placeholder.as_str()).to_string()
            }
            PIIReplacement::Remove => pattern.pattern.replace_all(text, "").to_string(),
            PIIReplacement::PartialMask { keep_start, keep_end } => pattern
                .pattern
                .replace_all(text, |caps: &regex::Captures| {
                    let matched = match caps.get(0) {
                        Some(m) => m.as_str(),
                        None => return String::new(),
                    };
                    let len = matched.len();
                    if len <= keep_start + keep_end {
                        "*".repeat(len)
                    } else {
                        let start = &matched[..*keep_start];
                        let end = if *keep_end > 0 { &matched[len - keep_end..] } else { "" };
                        let middle = "*".repeat(len - keep_start - keep_end);
                        format!("{}{}{}", start, middle, end)
                    }
                })
                .to_string(),
        }
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_on_ssn() {
        let filter = ContentFilter::new();
        let result = filter.filter_text("My SSN is 123-45-6789");
        assert!(result.blocked);
        assert!(!result.issues.is_empty());
    }

    #[test]
    fn passes_clean_text() {
        let filter = ContentFilter::new();
        let result = filter.filter_text("hello, how are you?");
        assert!(!result.blocked);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn pre_filter_rejects_if_any_message_matches() {
        let filter = ContentFilter::new();
        let messages = vec![
            MessageContent::Text("hi there".to_string()),
            MessageContent::Text("card: 1234-5678-9012-3456".to_string()),
        ];
        let result = filter.filter_messages(&messages);
        assert!(result.blocked);
    }
}
