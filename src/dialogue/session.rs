//! Per-session conversation history and key/value context

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::intent::Classification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One history entry. Assistant turns carry the intent and confidence
/// that produced them.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub timestamp: DateTime<Utc>,
    pub speaker: Speaker,
    pub text: String,
    pub intent: Option<String>,
    pub confidence: Option<f32>,
}

/// History plus context for one session. Append-only history; cleared
/// only by an explicit reset.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<ConversationTurn>,
    context: HashMap<String, String>,
}

impl Session {
    pub fn push_user(&mut self, text: &str) {
        self.history.push(ConversationTurn {
            timestamp: Utc::now(),
            speaker: Speaker::User,
            text: text.to_string(),
            intent: None,
            confidence: None,
        });
    }

    pub fn push_assistant(&mut self, text: &str, classification: &Classification) {
        self.history.push(ConversationTurn {
            timestamp: Utc::now(),
            speaker: Speaker::Assistant,
            text: text.to_string(),
            intent: Some(classification.tag.clone()),
            confidence: Some(classification.confidence),
        });
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn context(&self) -> &HashMap<String, String> {
        &self.context
    }

    pub fn set_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }
}

/// Sessions keyed by caller-supplied id, created on first use.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_mut(&mut self, session_id: &str) -> &mut Session {
        self.sessions.entry(session_id.to_string()).or_default()
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_append_in_order() {
        let mut session = Session::default();
        session.push_user("hello");
        session.push_assistant(
            "Hi!",
            &Classification {
                tag: "greeting".to_string(),
                confidence: 0.3,
            },
        );

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].speaker, Speaker::User);
        assert!(history[0].intent.is_none());
        assert_eq!(history[1].speaker, Speaker::Assistant);
        assert_eq!(history[1].intent.as_deref(), Some("greeting"));
    }

    #[test]
    fn test_clear_history_is_idempotent() {
        let mut session = Session::default();
        session.push_user("hello");
        session.clear_history();
        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_clear_history_keeps_context() {
        let mut session = Session::default();
        session.set_context("customer_id", "CUST100");
        session.push_user("hello");
        session.clear_history();
        assert_eq!(
            session.context().get("customer_id").map(String::as_str),
            Some("CUST100")
        );
    }

    #[test]
    fn test_registry_isolates_sessions() {
        let mut registry = SessionRegistry::new();
        registry.session_mut("a").push_user("from a");
        registry.session_mut("b").push_user("from b");

        assert_eq!(registry.session("a").unwrap().history().len(), 1);
        assert_eq!(registry.session("b").unwrap().history().len(), 1);
        assert_eq!(
            registry.session("a").unwrap().history()[0].text,
            "from a"
        );
        assert!(registry.session("unknown").is_none());
    }
}
