use std::collections::{HashMap, HashSet};

/// Tokens of this length or shorter are discarded before comparison
pub const MIN_TOKEN_LEN: usize = 3;

/// Number of keywords returned by [`extract_keywords`]
pub const MAX_KEYWORDS: usize = 20;

const STOPWORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "and", "or", "but", "in", "with", "for",
    "to", "of", "a", "an", "as", "by", "from", "this", "that", "these", "those",
    "are", "was", "were", "been", "have", "has", "had", "will", "would", "can",
    "could", "should",
];

/// Lowercase, turn every non-word character into a space and keep tokens
/// longer than [`MIN_TOKEN_LEN`]. Word characters are ASCII letters, digits
/// and underscore.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() > MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity (0-100) over the unique qualifying tokens of two texts.
///
/// Returns 0 when either text is empty or has no qualifying tokens.
pub fn text_similarity(text_a: &str, text_b: &str) -> u8 {
    if text_a.is_empty() || text_b.is_empty() {
        return 0;
    }

    let tokens_a: HashSet<String> = tokenize(text_a).into_iter().collect();
    let tokens_b: HashSet<String> = tokenize(text_b).into_iter().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    (intersection as f64 / union as f64 * 100.0).round() as u8
}

/// Most frequent non-stopword tokens of `text`, at most [`MAX_KEYWORDS`].
///
/// Ties keep the order of first occurrence.
pub fn extract_keywords(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<String> = Vec::new();
    let mut frequency: HashMap<String, usize> = HashMap::new();

    for word in tokenize(text) {
        if STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        let count = frequency.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // stable: equal counts stay in first-seen order
    order.sort_by(|a, b| frequency[b].cmp(&frequency[a]));
    order.truncate(MAX_KEYWORDS);
    order
}
