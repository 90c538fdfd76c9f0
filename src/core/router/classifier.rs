//! Content Classifier (part of the Model Router, spec component C5)
//!
//! Pure, side-effect-free analysis of a user message used by `ContentBased`
//! routing to pick a specialty model list.

use serde::{Deserialize, Serialize};

/// Complexity bucket derived from sentence length and overall text length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Specialty categories used to key the `ContentBased` preferred-model map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
    Code,
    Math,
    Creative,
}

/// Result of classifying a single piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentClassification {
    pub contains_code: bool,
    pub code_languages: Vec<String>,
    pub contains_math: bool,
    pub is_creative_request: bool,
    pub primary_language: String,
    pub complexity: Complexity,
}

impl ContentClassification {
    /// The specialty categories this classification matches, in priority order
    /// (code first, then math, then creative) — used to probe the
    /// `ContentBased` preferred-model map.
    pub fn categories(&self) -> Vec<ContentCategory> {
        let mut out = Vec::new();
        if self.contains_code {
            out.push(ContentCategory::Code);
        }
        if self.contains_math {
            out.push(ContentCategory::Math);
        }
        if self.is_creative_request {
            out.push(ContentCategory::Creative);
        }
        out
    }
}

const CODE_KEYWORDS: &[&str] = &[
    "def ", "function ", "class ", "import ", "public ", "if (", "for (",
];
const CODE_TOKENS: &[&str] = &["let ", "const ", "var "];

fn contains_token(haystack: &str, token: &str) -> bool {
    haystack.contains(token)
}

fn contains_code(text: &str) -> bool {
    if text.contains("```") {
        return true;
    }
    CODE_KEYWORDS.iter().any(|kw| contains_token(text, kw))
        || CODE_TOKENS.iter().any(|tok| contains_token(text, tok))
}

fn code_languages(text: &str) -> Vec<String> {
    let mut langs = Vec::new();
    if text.contains("def ") && text.contains("print(") {
        langs.push("python".to_string());
    }
    if text.contains("func ") && text.contains("package ") {
        langs.push("go".to_string());
    }
    if text.contains("fn ") && text.contains("impl ") {
        langs.push("rust".to_string());
    }
    langs
}

fn contains_math(text: &str) -> bool {
    const MATH_MARKERS: &[&str] = &[
        "\\frac", "\\sum", "\\int", "\\lim", "\\mathbb", "\\sqrt",
    ];
    let lower = text.to_lowercase();
    MATH_MARKERS.iter().any(|m| text.contains(m))
        || lower.contains("calcul")
        || lower.contains("equation")
}

fn is_creative_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    const PHRASES: &[&str] = &[
        "write a story",
        "write a poem",
        "creative writing",
        "fictional",
        "narrative",
    ];
    PHRASES.iter().any(|p| lower.contains(p)) || (lower.contains("write") && lower.contains("essay"))
}

fn primary_language(text: &str) -> String {
    let lower = text.to_lowercase();
    let count = |words: &[&str]| -> usize {
        words
            .iter()
            .filter(|w| lower.split_whitespace().any(|word| word.trim_matches(|c: char| !c.is_alphanumeric()) == **w))
            .count()
    };

    let scores = [
        ("english", count(&["the", "and", "for"])),
        ("spanish", count(&["el", "la", "que"])),
        ("french", count(&["le", "la", "est"])),
        ("german", count(&["der", "die", "und"])),
    ];

    scores
        .iter()
        .filter(|(_, score)| *score > 0)
        .max_by_key(|(_, score)| *score)
        .map(|(lang, _)| lang.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn complexity(text: &str) -> Complexity {
    let sentence_count = text
        .split(|c| c == '.' || c == '!' || c == '?')
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let word_count = text.split_whitespace().count();
    let avg_words_per_sentence = word_count as f64 / sentence_count as f64;
    let len = text.len();

    if avg_words_per_sentence > 25.0 || len > 1000 {
        Complexity::High
    } else if avg_words_per_sentence > 15.0 || len > 500 {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}

/// Classify a piece of text (typically the last user message in a request).
pub fn classify(text: &str) -> ContentClassification {
    ContentClassification {
        contains_code: contains_code(text),
        code_languages: code_languages(text),
        contains_math: contains_math(text),
        is_creative_request: is_creative_request(text),
        primary_language: primary_language(text),
        complexity: complexity(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_python_code() {
        let c = classify("def add(a, b):\n    print(a + b)\n    return a + b");
        assert!(c.contains_code);
        assert!(c.code_languages.contains(&"python".to_string()));
    }

    #[test]
    fn detects_rust_code() {
        let c = classify("fn main() { impl Foo for Bar {} }");
        assert!(c.contains_code);
        assert!(c.code_languages.contains(&"rust".to_string()));
    }

    #[test]
    fn detects_math() {
        let c = classify("Please solve this equation: \\frac{1}{2} + \\sqrt{4}");
        assert!(c.contains_math);
    }

    #[test]
    fn detects_creative_request() {
        let c = classify("Can you write a story about a dragon?");
        assert!(c.is_creative_request);
    }

    #[test]
    fn detects_primary_language_english() {
        let c = classify("The quick brown fox jumps over the lazy dog and runs for miles");
        assert_eq!(c.primary_language, "english");
    }

    #[test]
    fn falls_back_to_unknown_language() {
        let c = classify("1234567890");
        assert_eq!(c.primary_language, "unknown");
    }

    #[test]
    fn classifies_complexity_by_length() {
        let long_text = "word ".repeat(300);
        let c = classify(&long_text);
        assert_eq!(c.complexity, Complexity::High);
    }

    #[test]
    fn classifies_low_complexity_for_short_text() {
        let c = classify("Hi there.");
        assert_eq!(c.complexity, Complexity::Low);
    }
}
