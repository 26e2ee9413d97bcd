//! Manifest Module
//!
//! Loads the custom elements manifest into a typed tree and walks it for the
//! declarations flagged as custom elements.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// MANIFEST TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub path: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub name: String,
    #[serde(default)]
    pub custom_element: bool,
    pub tag_name: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// `{ "text": "..." }` wrapper the manifest uses for type expressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeText {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    pub field_name: Option<String>,
    #[serde(rename = "type")]
    pub type_text: Option<TypeText>,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl Attribute {
    /// Type expression of the attribute, `any` when the manifest has none.
    pub fn type_text(&self) -> &str {
        self.type_text
            .as_ref()
            .map(|t| t.text.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or("any")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    /// Shared event type identifier. Only custom elements must carry it.
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub react_name: String,
    #[serde(rename = "type")]
    pub detail_type: Option<TypeText>,
    pub description: Option<String>,
}

impl Event {
    pub fn detail_type(&self) -> Option<&str> {
        self.detail_type
            .as_ref()
            .map(|t| t.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════════

impl Manifest {
    /// Parse manifest text.
    ///
    /// Absent optional fields stay absent. Beyond the structural check, every
    /// custom element must name its tag and give each event an `eventName`
    /// and a `reactName`. Other declarations are not inspected.
    pub fn parse(text: &str) -> Result<Manifest> {
        let manifest: Manifest = serde_json::from_str(text)?;

        for module in &manifest.modules {
            for decl in &module.declarations {
                if !decl.custom_element {
                    continue;
                }
                if decl.tag_name.as_deref().unwrap_or("").is_empty() {
                    return Err(shape_error(format!(
                        "custom element {} in {} has no tagName",
                        decl.name, module.path
                    )));
                }
                for event in &decl.events {
                    if event.event_name.is_empty() || event.react_name.is_empty() {
                        return Err(shape_error(format!(
                            "event {} of custom element {} needs both eventName and reactName",
                            event.name, decl.name
                        )));
                    }
                }
            }
        }

        Ok(manifest)
    }

    /// Custom element declarations in traversal order, paired with the owning
    /// module's path. Each call starts a fresh walk.
    pub fn custom_elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.modules.iter().flat_map(|module| {
            module
                .declarations
                .iter()
                .filter(|decl| decl.custom_element)
                .map(move |decl| ElementRef {
                    module_path: &module.path,
                    tag_name: decl.tag_name.as_deref().unwrap_or_default(),
                    declaration: decl,
                })
        })
    }
}

fn shape_error(message: String) -> GenError {
    GenError::ManifestParse(serde::de::Error::custom(message))
}

/// A custom element declaration as seen by the downstream stages.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    pub module_path: &'a str,
    pub tag_name: &'a str,
    pub declaration: &'a Declaration,
}

impl<'a> ElementRef<'a> {
    pub fn name(&self) -> &'a str {
        &self.declaration.name
    }

    pub fn summary(&self) -> Option<&'a str> {
        self.declaration.summary.as_deref()
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        &self.declaration.attributes
    }

    pub fn events(&self) -> &'a [Event] {
        &self.declaration.events
    }

    /// Tag name with `prefix` removed, used as the artifact file stem.
    pub fn file_stem(&self, prefix: &str) -> &'a str {
        self.tag_name.strip_prefix(prefix).unwrap_or(self.tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "schemaVersion": "1.0.0",
        "modules": [
            {
                "kind": "javascript-module",
                "path": "components/button/button.js",
                "declarations": [
                    {
                        "kind": "class",
                        "name": "SlButton",
                        "customElement": true,
                        "tagName": "sl-button",
                        "summary": "Buttons represent actions.",
                        "attributes": [
                            { "name": "variant", "type": { "text": "'default' | 'primary'" }, "default": "'default'", "fieldName": "variant" }
                        ],
                        "events": [
                            { "name": "sl-blur", "reactName": "onSlBlur", "eventName": "SlBlurEvent" }
                        ]
                    },
                    { "kind": "variable", "name": "helper" }
                ]
            },
            {
                "kind": "javascript-module",
                "path": "utilities/base-path.js",
                "declarations": [ { "kind": "function", "name": "setBasePath" } ]
            },
            {
                "kind": "javascript-module",
                "path": "components/alert/alert.js",
                "declarations": [
                    { "kind": "class", "name": "SlAlert", "customElement": true, "tagName": "sl-alert" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_keeps_absent_fields_absent() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let alert = &manifest.modules[2].declarations[0];
        assert!(alert.summary.is_none());
        assert!(alert.attributes.is_empty());

        let attr = &manifest.modules[0].declarations[0].attributes[0];
        assert!(attr.description.is_none());
        assert_eq!(attr.default.as_deref(), Some("'default'"));
    }

    #[test]
    fn test_custom_elements_in_traversal_order() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let found: Vec<(&str, &str)> = manifest
            .custom_elements()
            .map(|el| (el.module_path, el.name()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("components/button/button.js", "SlButton"),
                ("components/alert/alert.js", "SlAlert"),
            ]
        );
    }

    #[test]
    fn test_custom_elements_is_restartable() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let first: Vec<&str> = manifest.custom_elements().map(|el| el.tag_name).collect();
        let second: Vec<&str> = manifest.custom_elements().map(|el| el.tag_name).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_manifest_is_parse_error() {
        let err = Manifest::parse("{ \"modules\": [ ").unwrap_err();
        assert!(matches!(err, GenError::ManifestParse(_)));
    }

    #[test]
    fn test_custom_element_without_tag_is_rejected() {
        let text = r#"{ "modules": [ { "path": "x.js", "declarations": [
            { "name": "XThing", "customElement": true }
        ] } ] }"#;
        let err = Manifest::parse(text).unwrap_err();
        assert_eq!(err.code(), crate::error::ERR_MANIFEST_PARSE);
        assert!(err.to_string().contains("XThing"));
    }

    #[test]
    fn test_plain_events_on_other_declarations_are_accepted() {
        let text = r#"{ "modules": [ { "path": "internal/form.js", "declarations": [
            { "kind": "mixin", "name": "FormControlMixin",
              "events": [ { "name": "change", "type": { "text": "Event" } } ] },
            { "name": "SlCheckbox", "customElement": true, "tagName": "sl-checkbox" }
        ] } ] }"#;
        let manifest = Manifest::parse(text).unwrap();
        let names: Vec<&str> = manifest.custom_elements().map(|el| el.name()).collect();
        assert_eq!(names, vec!["SlCheckbox"]);
    }

    #[test]
    fn test_custom_element_event_without_react_name_is_rejected() {
        let text = r#"{ "modules": [ { "path": "x.js", "declarations": [
            { "name": "SlSwitch", "customElement": true, "tagName": "sl-switch",
              "events": [ { "name": "sl-change", "eventName": "SlChangeEvent" } ] }
        ] } ] }"#;
        let err = Manifest::parse(text).unwrap_err();
        assert_eq!(err.code(), crate::error::ERR_MANIFEST_PARSE);
        assert!(err.to_string().contains("SlSwitch"));
    }

    #[test]
    fn test_type_text_defaults_to_any() {
        let attr = Attribute {
            name: "label".to_string(),
            field_name: None,
            type_text: None,
            default: None,
            description: None,
        };
        assert_eq!(attr.type_text(), "any");
    }

    #[test]
    fn test_file_stem_strips_prefix() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let button = manifest.custom_elements().next().unwrap();
        assert_eq!(button.file_stem("sl-"), "button");
        assert_eq!(button.file_stem("ui-"), "sl-button");
    }
}
