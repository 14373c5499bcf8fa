//! Term weighting and sparse vector arithmetic
//!
//! Classic tf-idf with smoothed idf (`ln((1+n)/(1+df)) + 1`) and
//! L2-normalised vectors, so cosine similarity reduces to a sparse dot
//! product.

use std::collections::{HashMap, HashSet};

/// Term index plus per-term idf weight, fixed at index build.
pub struct Vocabulary {
    index: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// Build from per-document term lists, keeping at most `max_terms`
    /// terms ranked by aggregate corpus count (ties lexicographic, so the
    /// selection is deterministic).
    pub fn build(doc_terms: &[Vec<String>], max_terms: usize) -> Self {
        let doc_count = doc_terms.len();
        let mut corpus_count: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in doc_terms {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                *corpus_count.entry(term).or_default() += 1;
                if seen.insert(term) {
                    *doc_freq.entry(term).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = corpus_count.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_terms);
        // Alphabetical index assignment keeps term ids stable across builds
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let mut index = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (i, (term, _)) in ranked.iter().enumerate() {
            index.insert((*term).to_string(), i);
            let df = doc_freq.get(term).copied().unwrap_or(0);
            idf.push(((1 + doc_count) as f32 / (1 + df) as f32).ln() + 1.0);
        }

        Self { index, idf }
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// Weight a term list into an L2-normalised sparse vector.
    /// Out-of-vocabulary terms contribute nothing.
    pub fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in terms {
            if let Some(&i) = self.index.get(term.as_str()) {
                *counts.entry(i).or_default() += 1.0;
            }
        }
        let mut components: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();
        components.sort_by_key(|&(i, _)| i);
        SparseVector::normalized(components)
    }
}

/// Sparse vector over vocabulary indices, unit length (or empty).
#[derive(Debug, Clone, Default)]
pub struct SparseVector {
    components: Vec<(usize, f32)>,
}

impl SparseVector {
    fn normalized(mut components: Vec<(usize, f32)>) -> Self {
        let norm: f32 = components
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f32>()
            .sqrt();
        if norm > 0.0 {
            for component in &mut components {
                component.1 /= norm;
            }
        } else {
            components.clear();
        }
        Self { components }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Dot product of two sorted sparse vectors. With unit-length inputs
    /// this is cosine similarity.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let (mut a, mut b) = (0, 0);
        while a < self.components.len() && b < other.components.len() {
            let (ai, aw) = self.components[a];
            let (bi, bw) = other.components[b];
            match ai.cmp(&bi) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += aw * bw;
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }
}
