//! Event Registry
//!
//! Tracks every shared event type identifier across the manifest and the one
//! wire name it may denote. Built in a single pass before any emission and
//! only read afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{GenError, Result};
use crate::manifest::Manifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredEvent {
    pub event_name: String,
    pub wire_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    /// First-seen order, observable in the hoisted events module.
    entries: Vec<RegisteredEvent>,
    index: HashMap<String, usize>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk every custom element of the manifest and register its events.
    pub fn collect(manifest: &Manifest) -> Result<Self> {
        let mut registry = Self::new();
        for element in manifest.custom_elements() {
            for event in element.events() {
                registry.register(&event.event_name, &event.name)?;
            }
        }
        debug!("Registered {} distinct event types", registry.len());
        Ok(registry)
    }

    pub fn register(&mut self, event_name: &str, wire_name: &str) -> Result<()> {
        if let Some(&idx) = self.index.get(event_name) {
            let seen = &self.entries[idx];
            if seen.wire_name != wire_name {
                return Err(GenError::EventNameMismatch {
                    event_name: event_name.to_string(),
                    expected: seen.wire_name.clone(),
                    found: wire_name.to_string(),
                });
            }
            return Ok(());
        }

        self.index.insert(event_name.to_string(), self.entries.len());
        self.entries.push(RegisteredEvent {
            event_name: event_name.to_string(),
            wire_name: wire_name.to_string(),
        });
        Ok(())
    }

    pub fn wire_name(&self, event_name: &str) -> Option<&str> {
        self.index
            .get(event_name)
            .map(|&idx| self.entries[idx].wire_name.as_str())
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.index.contains_key(event_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_new_and_repeat() {
        let mut registry = EventRegistry::new();
        registry.register("SlClickEvent", "sl-click").unwrap();
        registry.register("SlClickEvent", "sl-click").unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.wire_name("SlClickEvent"), Some("sl-click"));
    }

    #[test]
    fn test_register_mismatch_is_fatal() {
        let mut registry = EventRegistry::new();
        registry.register("SlClickEvent", "sl-click").unwrap();

        let err = registry.register("SlClickEvent", "sl-press").unwrap_err();
        match err {
            GenError::EventNameMismatch {
                event_name,
                expected,
                found,
            } => {
                assert_eq!(event_name, "SlClickEvent");
                assert_eq!(expected, "sl-click");
                assert_eq!(found, "sl-press");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(registry.wire_name("SlClickEvent"), Some("sl-click"));
    }

    #[test]
    fn test_first_seen_order() {
        let mut registry = EventRegistry::new();
        registry.register("SlFocusEvent", "sl-focus").unwrap();
        registry.register("SlBlurEvent", "sl-blur").unwrap();
        registry.register("SlFocusEvent", "sl-focus").unwrap();

        let names: Vec<&str> = registry.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["SlFocusEvent", "SlBlurEvent"]);
    }

    #[test]
    fn test_collect_across_components() {
        let text = r#"{ "modules": [
            { "path": "a.js", "declarations": [ { "name": "A", "customElement": true, "tagName": "sl-a",
                "events": [ { "name": "sl-show", "eventName": "SlShowEvent", "reactName": "onSlShow" } ] } ] },
            { "path": "b.js", "declarations": [ { "name": "B", "customElement": true, "tagName": "sl-b",
                "events": [ { "name": "sl-hide", "eventName": "SlShowEvent", "reactName": "onSlHide" } ] } ] }
        ] }"#;
        let manifest = Manifest::parse(text).unwrap();

        let err = EventRegistry::collect(&manifest).unwrap_err();
        assert_eq!(err.code(), crate::error::ERR_EVENT_MISMATCH);
    }

    #[test]
    fn test_collect_ignores_plain_declarations() {
        let text = r#"{ "modules": [
            { "path": "a.js", "declarations": [ { "name": "Mixin",
                "events": [ { "name": "sl-x", "eventName": "SlXEvent", "reactName": "onSlX" } ] } ] }
        ] }"#;
        let manifest = Manifest::parse(text).unwrap();

        let registry = EventRegistry::collect(&manifest).unwrap();
        assert!(registry.is_empty());
        assert!(!registry.contains("SlXEvent"));
    }
}
