//! Bundled catalog data - intent definitions, FAQ corpus, demo orders
//!
//! The core takes already-parsed structures; this module is the loading
//! collaborator that provides them. Applications with their own data can
//! skip it entirely and construct the same types from any source.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::intent::IntentDefinition;
use crate::orders::Order;
use crate::retrieval::FaqEntry;

const INTENTS_JSON: &str = include_str!("../data/intents.json");
const FAQ_JSON: &str = include_str!("../data/faq.json");
const ORDERS_JSON: &str = include_str!("../data/orders.json");

#[derive(Deserialize)]
struct IntentFile {
    intents: Vec<IntentDefinition>,
}

#[derive(Deserialize)]
struct FaqFile {
    faqs: Vec<FaqEntry>,
}

#[derive(Deserialize)]
struct OrderFile {
    orders: Vec<Order>,
}

/// The bundled intent set, in registration (tie-break) order.
pub fn intents() -> Result<Vec<IntentDefinition>> {
    let file: IntentFile =
        serde_json::from_str(INTENTS_JSON).context("Failed to parse bundled intents.json")?;
    Ok(file.intents)
}

/// The bundled FAQ corpus.
pub fn faqs() -> Result<Vec<FaqEntry>> {
    let file: FaqFile =
        serde_json::from_str(FAQ_JSON).context("Failed to parse bundled faq.json")?;
    Ok(file.faqs)
}

/// Sample orders for the demo store backing the CLI.
pub fn demo_orders() -> Result<Vec<Order>> {
    let file: OrderFile =
        serde_json::from_str(ORDERS_JSON).context("Failed to parse bundled orders.json")?;
    Ok(file.orders)
}
