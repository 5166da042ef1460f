//! Resume text normalization and whole-word phrase matching.

/// Lowercases and replaces every punctuation character with a space, then
/// collapses runs of whitespace. Word characters are alphanumerics and `_`.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();
    collapse_whitespace(&replaced)
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resume text prepared once per scoring run.
#[derive(Debug, Clone)]
pub struct ResumeText {
    /// Lowercased, whitespace collapsed, punctuation kept.
    lowered: String,
    /// Words of the normalized form.
    tokens: Vec<String>,
}

impl ResumeText {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let tokens = normalized.split(' ').filter(|t| !t.is_empty()).map(String::from).collect();
        Self {
            lowered: collapse_whitespace(&raw.to_lowercase()),
            tokens,
        }
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Number of whole-word occurrences of `phrase` (normalized before matching).
    pub fn count_phrase(&self, phrase: &str) -> usize {
        let needle = phrase_tokens(phrase);
        if needle.is_empty() || needle.len() > self.tokens.len() {
            return 0;
        }
        self.tokens
            .windows(needle.len())
            .filter(|window| window.iter().zip(&needle).all(|(a, b)| a == b))
            .count()
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.count_phrase(phrase) > 0
    }

    /// Case-insensitive substring search over the lowercased text.
    pub fn contains_substring(&self, needle: &str) -> bool {
        let needle = collapse_whitespace(&needle.to_lowercase());
        !needle.is_empty() && self.lowered.contains(&needle)
    }
}

fn phrase_tokens(phrase: &str) -> Vec<String> {
    normalize(phrase).split(' ').filter(|t| !t.is_empty()).map(String::from).collect()
}
