//! Intent detection for customer-support messages
//!
//! Public interface:
//! - `IntentClassifier` for keyword-weighted scoring over a fixed intent set
//! - `IntentDefinition` as loaded from the intent catalog
//! - `Classification` for the (tag, confidence) outcome

mod classifier;
mod definition;

pub use classifier::{Classification, IntentClassifier};
pub use definition::IntentDefinition;
