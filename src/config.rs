use std::time::Duration;

/// Sizing and expiry for a [`ResultCache`](crate::cache::ResultCache) instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of live entries (default: 1000)
    pub capacity: usize,
    /// Time-to-live per entry; expiry is enforced lazily at read time (default: 1h)
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// Retrieval tuning for the FAQ index.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Vocabulary cap - top terms by aggregate corpus count (default: 1000)
    pub max_vocabulary: usize,
    /// Similarity cutoff: hits scoring at or below are discarded, strictly
    /// greater qualifies (default: 0.1)
    pub min_similarity: f32,
    /// Sizing for the retriever's query-result cache
    pub cache: CacheConfig,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_vocabulary: 1000,
            min_similarity: 0.1,
            cache: CacheConfig::default(),
        }
    }
}
