//! src/normalizer.rs

/// Lowercases `content` and splits it on every run of characters outside
/// `a-z`. Digits, punctuation, accented letters and control characters all
/// act as separators. Tokens come back in their original order.
pub fn normalize(content: &str) -> Vec<String> {
    content
        .to_lowercase()
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
