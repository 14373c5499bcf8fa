//! DialogueOrchestrator - stateless per-call routing over session state
//!
//! Each message is classified, then dispatched to an order action, a
//! templated reply, or the FAQ retrieval fallback. Every call appends
//! exactly two turns (user, assistant) to the session's history.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use super::session::{ConversationTurn, SessionRegistry};
use crate::cache::{memo_key, ResultCache};
use crate::config::CacheConfig;
use crate::intent::{Classification, IntentClassifier};
use crate::orders::OrderTracker;
use crate::respond::ResponseGenerator;
use crate::retrieval::Retriever;

const TRACK_ORDER: &str = "track_order";
const CANCEL_ITEM: &str = "cancel_item";
const DEFAULT_TEMPLATE: &str = "default";

/// Compiled order-id pattern: the word "order", optionally "id", an
/// optional colon, then a run of letters/digits.
fn order_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)order\s*(?:id)?:?\s*([a-z0-9]+)").expect("Invalid order id regex")
    })
}

/// Pull an order id out of free text, e.g. "ORD001" from
/// "Track my order ORD001" or "abc123" from "order id: abc123".
pub fn extract_order_id(text: &str) -> Option<String> {
    order_id_regex()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Routes messages to handlers and owns the per-session state registry.
///
/// The classifier and retriever indices are immutable; the only mutable
/// pieces are the session registry and the internally-locked caches.
pub struct DialogueOrchestrator {
    classifier: IntentClassifier,
    retriever: Retriever,
    responder: Box<dyn ResponseGenerator>,
    orders: Box<dyn OrderTracker>,
    classify_cache: ResultCache<Classification>,
    sessions: SessionRegistry,
}

impl DialogueOrchestrator {
    pub fn new(
        classifier: IntentClassifier,
        retriever: Retriever,
        responder: Box<dyn ResponseGenerator>,
        orders: Box<dyn OrderTracker>,
    ) -> Self {
        Self {
            classifier,
            retriever,
            responder,
            orders,
            classify_cache: ResultCache::new(CacheConfig::default()),
            sessions: SessionRegistry::new(),
        }
    }

    /// Process one message for one session and return the reply.
    pub fn process_input(&mut self, session_id: &str, text: &str) -> String {
        self.sessions.session_mut(session_id).push_user(text);

        let classification = self.classify_cached(text);
        debug!(
            session = session_id,
            intent = %classification.tag,
            confidence = classification.confidence,
            "routing input"
        );

        let response = match classification.tag.as_str() {
            TRACK_ORDER => self.handle_track_order(text),
            CANCEL_ITEM => self.handle_cancel_item(text),
            tag if self.responder.has_templates(tag) => {
                self.responder.render(tag, &HashMap::new())
            }
            _ => self.answer_from_corpus(text),
        };

        self.sessions
            .session_mut(session_id)
            .push_assistant(&response, &classification);
        response
    }

    /// Full history for a session; empty for an unknown session id.
    pub fn history(&self, session_id: &str) -> &[ConversationTurn] {
        self.sessions
            .session(session_id)
            .map(|session| session.history())
            .unwrap_or(&[])
    }

    /// Reset a session's history. A no-op on empty or unknown sessions.
    pub fn clear_history(&mut self, session_id: &str) {
        self.sessions.session_mut(session_id).clear_history();
    }

    pub fn context(&self, session_id: &str) -> Option<&HashMap<String, String>> {
        self.sessions
            .session(session_id)
            .map(|session| session.context())
    }

    pub fn set_context(&mut self, session_id: &str, key: &str, value: &str) {
        self.sessions.session_mut(session_id).set_context(key, value);
    }

    /// Cache-aside memoization of classification: check, compute on miss,
    /// store. The key is derived from the operation plus the raw input.
    fn classify_cached(&self, text: &str) -> Classification {
        let key = memo_key("classifier.classify", &[text]);
        if let Some(cached) = self.classify_cache.get(&key) {
            return cached;
        }
        let classification = self.classifier.classify(text);
        self.classify_cache.put(key, classification.clone());
        classification
    }

    fn handle_track_order(&self, text: &str) -> String {
        match extract_order_id(text) {
            Some(order_id) => match self.orders.lookup(&order_id) {
                Some(order) => format!(
                    "Your order {} is {}. Expected delivery: {}",
                    order_id, order.status, order.delivery_date
                ),
                None => {
                    "I couldn't find that order. Please double-check your order ID.".to_string()
                }
            },
            None => "I couldn't find your order. Please provide your order ID.".to_string(),
        }
    }

    fn handle_cancel_item(&self, text: &str) -> String {
        if let Some(order_id) = extract_order_id(text) {
            // cancel() enforces the pending/processing rule
            if self.orders.cancel(&order_id) {
                return format!("Order {} has been cancelled successfully.", order_id);
            }
        }
        "Unable to cancel this order. It may have already shipped.".to_string()
    }

    fn answer_from_corpus(&self, text: &str) -> String {
        let hits = self.retriever.query_cached(text, 1);
        match hits.first() {
            Some(hit) => hit.answer.clone(),
            None => self.responder.render(DEFAULT_TEMPLATE, &HashMap::new()),
        }
    }
}
