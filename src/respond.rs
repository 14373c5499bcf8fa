//! Templated reply rendering
//!
//! The orchestrator asks a [`ResponseGenerator`] for replies to intents
//! that resolve to canned text. [`TemplateResponder`] is the bundled
//! implementation: uniform random choice among an intent's templates with
//! `{key}` placeholder substitution.

use std::collections::HashMap;

use crate::intent::IntentDefinition;

/// Returned for tags with no registered templates.
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I didn't understand that. Can you please rephrase?";

/// External collaborator that renders user-facing reply text.
pub trait ResponseGenerator: Send + Sync {
    /// Whether this tag has at least one registered template.
    fn has_templates(&self, tag: &str) -> bool;

    /// Render a reply for the tag, substituting `{key}` placeholders with
    /// the supplied entity values. Unknown tags get a fixed fallback.
    fn render(&self, tag: &str, entities: &HashMap<String, String>) -> String;
}

/// Template store built from the loaded intent definitions.
pub struct TemplateResponder {
    templates: HashMap<String, Vec<String>>,
}

impl TemplateResponder {
    /// Intents without responses are simply not registered, so empty
    /// template sets can never be drawn from.
    pub fn new(intents: &[IntentDefinition]) -> Self {
        let templates = intents
            .iter()
            .filter(|intent| !intent.responses.is_empty())
            .map(|intent| (intent.tag.clone(), intent.responses.clone()))
            .collect();
        Self { templates }
    }
}

impl ResponseGenerator for TemplateResponder {
    fn has_templates(&self, tag: &str) -> bool {
        self.templates.contains_key(tag)
    }

    fn render(&self, tag: &str, entities: &HashMap<String, String>) -> String {
        let templates = match self.templates.get(tag) {
            Some(templates) => templates,
            None => return FALLBACK_RESPONSE.to_string(),
        };
        let mut response = templates[fastrand::usize(..templates.len())].clone();
        for (key, value) in entities {
            response = response.replace(&format!("{{{key}}}"), value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> TemplateResponder {
        TemplateResponder::new(&[
            IntentDefinition {
                tag: "greeting".to_string(),
                patterns: vec!["hello".to_string()],
                responses: vec![
                    "Hello! How can I help you today?".to_string(),
                    "Hi! What can I do for you?".to_string(),
                ],
            },
            IntentDefinition {
                tag: "order_update".to_string(),
                patterns: Vec::new(),
                responses: vec!["Order {order_id} is {status}.".to_string()],
            },
            IntentDefinition {
                tag: "track_order".to_string(),
                patterns: vec!["track my order".to_string()],
                responses: Vec::new(),
            },
        ])
    }

    #[test]
    fn test_renders_one_of_the_registered_templates() {
        let responder = responder();
        for _ in 0..20 {
            let reply = responder.render("greeting", &HashMap::new());
            assert!(
                reply == "Hello! How can I help you today?"
                    || reply == "Hi! What can I do for you?"
            );
        }
    }

    #[test]
    fn test_unknown_tag_gets_fixed_fallback() {
        let reply = responder().render("no_such_intent", &HashMap::new());
        assert_eq!(reply, FALLBACK_RESPONSE);
    }

    #[test]
    fn test_empty_template_set_counts_as_unregistered() {
        let responder = responder();
        assert!(!responder.has_templates("track_order"));
        assert_eq!(
            responder.render("track_order", &HashMap::new()),
            FALLBACK_RESPONSE
        );
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let entities = HashMap::from([
            ("order_id".to_string(), "ORD001".to_string()),
            ("status".to_string(), "pending".to_string()),
        ]);
        let reply = responder().render("order_update", &entities);
        assert_eq!(reply, "Order ORD001 is pending.");
    }

    #[test]
    fn test_unmatched_placeholders_are_left_in_place() {
        let reply = responder().render("order_update", &HashMap::new());
        assert_eq!(reply, "Order {order_id} is {status}.");
    }
}
