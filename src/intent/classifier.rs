//! Keyword-weighted intent scoring
//!
//! A whole pattern phrase found inside the input scores 2.0; otherwise
//! each pattern word found anywhere in the input scores 0.5. The best
//! intent wins, earliest-registered first on ties. Both the weights and
//! the score/10 confidence normalization are observable contract, not
//! tunables.

use super::definition::IntentDefinition;

/// Outcome of classifying one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub tag: String,
    /// In [0, 1]; exactly 0.3 for the fallback intent
    pub confidence: f32,
}

struct CompiledPattern {
    phrase: String,
    words: Vec<String>,
}

struct CompiledIntent {
    tag: String,
    patterns: Vec<CompiledPattern>,
}

/// Rule-based classifier over a fixed, ordered intent set.
///
/// Total function: `classify` always produces a result, falling back to
/// [`IntentClassifier::FALLBACK_INTENT`] when nothing matches.
pub struct IntentClassifier {
    intents: Vec<CompiledIntent>,
}

impl IntentClassifier {
    /// Returned with confidence 0.3 when no pattern matches at all.
    pub const FALLBACK_INTENT: &'static str = "greeting";

    pub fn new(definitions: Vec<IntentDefinition>) -> Self {
        let intents = definitions
            .into_iter()
            .map(|definition| CompiledIntent {
                tag: definition.tag,
                patterns: definition
                    .patterns
                    .iter()
                    .map(|pattern| pattern.to_lowercase())
                    // An empty phrase would substring-match every input
                    .filter(|phrase| !phrase.is_empty())
                    .map(|phrase| CompiledPattern {
                        words: phrase.split_whitespace().map(str::to_string).collect(),
                        phrase,
                    })
                    .collect(),
            })
            .collect();
        Self { intents }
    }

    /// Score the input against every intent and pick the best.
    pub fn classify(&self, input: &str) -> Classification {
        let input = input.to_lowercase();

        let mut best_tag: Option<&str> = None;
        let mut best_score = 0.0_f32;
        for intent in &self.intents {
            let score = score_intent(intent, &input);
            // Strictly greater, so the earliest-registered intent keeps ties
            if score > best_score {
                best_score = score;
                best_tag = Some(&intent.tag);
            }
        }

        match best_tag {
            Some(tag) => Classification {
                tag: tag.to_string(),
                confidence: (best_score / 10.0).min(1.0),
            },
            None => Classification {
                tag: Self::FALLBACK_INTENT.to_string(),
                confidence: 0.3,
            },
        }
    }
}

fn score_intent(intent: &CompiledIntent, input: &str) -> f32 {
    let mut score = 0.0;
    for pattern in &intent.patterns {
        if input.contains(pattern.phrase.as_str()) {
            score += 2.0;
        } else {
            // Fractional credit per word, substring match like the phrase
            let matched = pattern
                .words
                .iter()
                .filter(|word| input.contains(word.as_str()))
                .count();
            score += 0.5 * matched as f32;
        }
    }
    score
}
