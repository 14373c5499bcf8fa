//! Question tokenization for the FAQ index
//!
//! Lower-cases, splits on non-alphanumeric runs, drops single-character
//! tokens and stop-words, then emits unigrams plus bigrams over the
//! surviving sequence. Queries and documents go through the same path so
//! their vectors live in the same space.

/// Common English stop-words. Matched after lower-casing.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further", "had",
    "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "you", "your",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Produce unigram and bigram terms for one piece of text.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let unigrams: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 2)
        .filter(|token| !is_stop_word(token))
        .collect();

    let mut terms: Vec<String> = Vec::with_capacity(unigrams.len() * 2);
    terms.extend(unigrams.iter().map(|token| token.to_string()));
    // Bigrams span the stop-word-filtered sequence, not the raw text
    terms.extend(
        unigrams
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1])),
    );
    terms
}
