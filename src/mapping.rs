//! Mapping Resolver
//!
//! Derives, for one custom element, the tables the runtime adapter dispatches
//! on (renamed props, defaults, event bindings) together with the resolved
//! attribute and event surfaces the type declaration is rendered from.

use std::collections::HashSet;

use crate::error::{GenError, Result};
use crate::manifest::{Attribute, ElementRef, Event};

/// Suffix marking the capturing variant of an event handler prop.
pub const CAPTURE_SUFFIX: &str = "Capture";

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVED TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    pub field_name: String,
    pub wire_name: String,
    pub type_text: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    pub react_name: String,
    pub wire_name: String,
    /// Shared event type identifier from the registry.
    pub event_name: String,
    /// Component-specific alias of the shared event type.
    pub alias: String,
    pub detail_type: Option<String>,
    pub description: Option<String>,
}

impl ResolvedEvent {
    pub fn capture_name(&self) -> String {
        format!("{}{}", self.react_name, CAPTURE_SUFFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub binding: String,
    pub wire_name: String,
    pub capture: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMapping {
    /// field name -> wire attribute name, renamed attributes only
    pub prop_map: Vec<(String, String)>,
    /// field name -> default literal, truthy defaults only
    pub prop_defaults: Vec<(String, String)>,
    pub event_bindings: Vec<EventBinding>,
    pub attributes: Vec<ResolvedAttribute>,
    pub events: Vec<ResolvedEvent>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAME TRANSFORMS
// ═══════════════════════════════════════════════════════════════════════════════

/// `is-loading` -> `isLoading`. The first segment is kept as is.
pub fn kebab_to_field(name: &str) -> String {
    name.split('-')
        .enumerate()
        .map(|(idx, part)| {
            if idx == 0 {
                part.to_string()
            } else {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect()
}

/// Defaults equal to the empty string or `false` are dropped: the element
/// already treats an absent attribute as its falsy state.
pub fn retained_default(default: Option<&str>) -> Option<&str> {
    match default.map(str::trim) {
        None | Some("") | Some("''") | Some("\"\"") | Some("false") => None,
        Some(literal) => Some(literal),
    }
}

/// Per-component alias of a shared event type: `SlButton` + `SlClickEvent`
/// with prefix `Sl` gives `SlButtonClickEvent`.
pub fn event_alias(component: &str, event_name: &str, event_prefix: &str) -> String {
    let stem = event_name.strip_prefix(event_prefix).unwrap_or(event_name);
    format!("{}{}", component, stem)
}

fn field_name(attr: &Attribute) -> String {
    match attr.field_name.as_deref() {
        Some(field) if !field.is_empty() => field.to_string(),
        _ => kebab_to_field(&attr.name),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

pub fn resolve(element: &ElementRef<'_>, event_prefix: &str) -> Result<ComponentMapping> {
    let mut mapping = ComponentMapping::default();

    for attr in element.attributes() {
        resolve_attribute(attr, &mut mapping);
    }

    let mut used_events: HashSet<&str> = HashSet::new();
    let mut used_bindings: HashSet<String> = HashSet::new();
    let mut used_aliases: HashSet<String> = HashSet::new();

    for event in element.events() {
        if !used_events.insert(event.event_name.as_str()) {
            return Err(GenError::DuplicateEvent {
                component: element.name().to_string(),
                event_name: event.event_name.clone(),
            });
        }

        let resolved = resolve_event(element.name(), event, event_prefix);

        // `SlShowEvent` and `ShowEvent` both alias to `<Component>ShowEvent`.
        if !used_aliases.insert(resolved.alias.clone()) {
            return Err(GenError::DuplicateEvent {
                component: element.name().to_string(),
                event_name: resolved.alias,
            });
        }

        for (binding, capture) in [
            (resolved.react_name.clone(), false),
            (resolved.capture_name(), true),
        ] {
            if !used_bindings.insert(binding.clone()) {
                return Err(GenError::DuplicateEvent {
                    component: element.name().to_string(),
                    event_name: binding,
                });
            }
            mapping.event_bindings.push(EventBinding {
                binding,
                wire_name: resolved.wire_name.clone(),
                capture,
            });
        }

        mapping.events.push(resolved);
    }

    Ok(mapping)
}

fn resolve_attribute(attr: &Attribute, mapping: &mut ComponentMapping) {
    let field = field_name(attr);

    if let Some(literal) = retained_default(attr.default.as_deref()) {
        mapping
            .prop_defaults
            .push((field.clone(), literal.to_string()));
    }

    if field != attr.name {
        mapping.prop_map.push((field.clone(), attr.name.clone()));
    }

    mapping.attributes.push(ResolvedAttribute {
        field_name: field,
        wire_name: attr.name.clone(),
        type_text: attr.type_text().to_string(),
        description: attr.description.clone(),
    });
}

fn resolve_event(component: &str, event: &Event, event_prefix: &str) -> ResolvedEvent {
    ResolvedEvent {
        react_name: event.react_name.clone(),
        wire_name: event.name.clone(),
        event_name: event.event_name.clone(),
        alias: event_alias(component, &event.event_name, event_prefix),
        detail_type: event.detail_type().map(str::to_string),
        description: event.description.clone(),
    }
}
