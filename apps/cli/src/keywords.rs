//! Keyword extraction: free text in, a deduplicated ordered token list out.
//!
//! This is the vocabulary both sides of the match are reduced to. The same
//! filters run over the resume text and the job text so that the comparison
//! in `matcher` is token-for-token.

use std::collections::HashSet;

/// Hard cap on the number of keywords kept per text. Bounds downstream work.
pub const MAX_KEYWORDS: usize = 60;

/// Filler words that carry no signal for matching: articles, auxiliaries,
/// and boilerplate nouns that appear in virtually every resume and posting.
const STOP_WORDS: &[&str] = &[
    "with", "from", "that", "this", "have", "has", "had", "will", "your", "you", "the", "and",
    "for", "are", "was", "were", "but", "not", "into", "over", "than", "then", "also", "only",
    "able", "using", "use", "job", "role", "resume", "work", "experience", "skills", "education",
];

/// Extracts the keyword list from `text`.
///
/// Normalization: lowercase, every character outside `[a-z0-9]` becomes a
/// space (punctuation never glues two words together), split on whitespace.
/// Tokens shorter than 3 characters and stop words are dropped. The result
/// is deduplicated in first-seen order and truncated to [`MAX_KEYWORDS`].
///
/// Total and deterministic: no input fails, the worst case is an empty list.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut keywords = Vec::new();

    for token in normalized.split_whitespace() {
        if token.len() < 3 || STOP_WORDS.contains(&token) {
            continue;
        }
        if seen.insert(token) {
            keywords.push(token.to_string());
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t  ").is_empty());
    }

    #[test]
    fn test_lowercases_and_dedupes_in_first_seen_order() {
        let keywords = extract_keywords("React REACT react Kubernetes react kubernetes");
        assert_eq!(keywords, vec!["react", "kubernetes"]);
    }

    #[test]
    fn test_punctuation_never_glues_words_together() {
        let keywords = extract_keywords("react,javascript;typescript/node.js");
        assert_eq!(keywords, vec!["react", "javascript", "typescript", "node"]);
    }

    #[test]
    fn test_short_tokens_dropped() {
        let keywords = extract_keywords("go c r api ml ab xyz");
        assert_eq!(keywords, vec!["api", "xyz"]);
    }

    #[test]
    fn test_stop_words_excluded_regardless_of_case_and_punctuation() {
        let keywords = extract_keywords("Experience with THE Skills, and your resume!");
        assert!(keywords.is_empty(), "got {keywords:?}");
    }

    #[test]
    fn test_cap_enforced_at_60_in_first_seen_order() {
        let text: String = (0..200)
            .map(|i| format!("keyword{i:03}"))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = extract_keywords(&text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "keyword000");
        assert_eq!(keywords[59], "keyword059");
    }

    #[test]
    fn test_idempotent_on_identical_input() {
        let text = "Rust, Tokio & Axum: distributed systems (5+ years)";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }

    #[test]
    fn test_digits_survive_normalization() {
        let keywords = extract_keywords("oauth2 http3 s3");
        assert_eq!(keywords, vec!["oauth2", "http3"]);
    }
}
