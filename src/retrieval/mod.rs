//! Retrieval module - vector-space FAQ lookup
//!
//! Public interface:
//! - `Retriever` for tf-idf indexing and cosine-ranked queries
//! - `FaqEntry` for corpus documents (question/answer pairs)
//! - `RetrievalHit` for scored query results
//!
//! Internal (not exported):
//! - tokenization (unigrams + bigrams, stop-word filtered)
//! - term weighting and sparse vector arithmetic

mod engine;
mod tokenizer;
mod vector;

pub use engine::{FaqEntry, RetrievalHit, Retriever};
