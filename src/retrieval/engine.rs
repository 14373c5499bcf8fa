//! Retriever - tf-idf index over the FAQ corpus, cosine-ranked queries

use anyhow::{bail, Result};
use rayon::prelude::*;
use serde::Deserialize;
use tracing::warn;

use super::tokenizer::tokenize;
use super::vector::{SparseVector, Vocabulary};
use crate::cache::{memo_key, CacheStats, ResultCache};
use crate::config::RetrievalConfig;

/// One question/answer pair from the knowledge base.
#[derive(Debug, Clone, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A scored match against the corpus.
///
/// Ordering across a result set: descending score, ties keep corpus
/// insertion order.
#[derive(Debug, Clone)]
pub struct RetrievalHit {
    /// Position of the document in the corpus
    pub index: usize,
    pub question: String,
    pub answer: String,
    /// Cosine similarity in [0, 1]
    pub score: f32,
}

/// Vector-space retriever over a fixed corpus.
///
/// The index is built once at construction and read-only afterwards, so
/// concurrent queries need no synchronization. The query-result cache is
/// internally locked.
pub struct Retriever {
    entries: Vec<FaqEntry>,
    vocabulary: Vocabulary,
    vectors: Vec<SparseVector>,
    config: RetrievalConfig,
    cache: ResultCache<Vec<RetrievalHit>>,
}

impl Retriever {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self::with_config(entries, RetrievalConfig::default())
    }

    pub fn with_config(entries: Vec<FaqEntry>, config: RetrievalConfig) -> Self {
        let doc_terms: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| tokenize(&entry.question))
            .collect();
        let vocabulary = Vocabulary::build(&doc_terms, config.max_vocabulary);
        let vectors = doc_terms
            .iter()
            .map(|terms| vocabulary.weigh(terms))
            .collect();
        let cache = ResultCache::new(config.cache.clone());
        Self {
            entries,
            vocabulary,
            vectors,
            config,
            cache,
        }
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank the corpus against a query. Never fails: an unexpected
    /// internal error is logged and reported as no hits, the same shape
    /// as a query that simply matches nothing.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<RetrievalHit> {
        match self.try_query(text, top_k) {
            Ok(hits) => hits,
            Err(err) => {
                warn!(%err, "retrieval failed, returning no hits");
                Vec::new()
            }
        }
    }

    /// Cache-aside wrapper around [`Retriever::query`]: check the result
    /// cache, compute on miss, store.
    pub fn query_cached(&self, text: &str, top_k: usize) -> Vec<RetrievalHit> {
        let key = memo_key("retriever.query", &[text, &top_k.to_string()]);
        if let Some(hits) = self.cache.get(&key) {
            return hits;
        }
        let hits = self.query(text, top_k);
        self.cache.put(key, hits.clone());
        hits
    }

    /// Hit/miss counters of the query-result cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn try_query(&self, text: &str, top_k: usize) -> Result<Vec<RetrievalHit>> {
        if self.vocabulary.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.vocabulary.weigh(&tokenize(text));
        if query_vector.is_empty() {
            // Nothing the index knows about - expected empty, not a failure
            return Ok(Vec::new());
        }

        let scores: Vec<f32> = self
            .vectors
            .par_iter()
            .map(|vector| vector.dot(&query_vector))
            .collect();
        if scores.iter().any(|score| !score.is_finite()) {
            bail!("non-finite similarity while scoring {text:?}");
        }

        let mut hits: Vec<RetrievalHit> = scores
            .iter()
            .enumerate()
            .filter(|(_, &score)| score > self.config.min_similarity)
            .map(|(index, &score)| RetrievalHit {
                index,
                question: self.entries[index].question.clone(),
                answer: self.entries[index].answer.clone(),
                score,
            })
            .collect();

        // Stable sort keeps corpus order for equal scores
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}
