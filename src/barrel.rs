//! Barrel Emitter
//!
//! Aggregate entry points re-exporting every generated component. Entries
//! follow manifest traversal order.

use std::path::PathBuf;

use crate::builder::SourceBuilder;
use crate::config::GeneratorConfig;
use crate::emit::{element_type_name, js_string, Artifact, EVENTS_MODULE};
use crate::format::Language;
use crate::manifest::ElementRef;

pub const INDEX_JS: &str = "index.js";
pub const INDEX_DTS: &str = "index.d.ts";

fn component_module(element: &ElementRef<'_>, config: &GeneratorConfig) -> String {
    js_string(&format!(
        "./{}/{}.js",
        config.components_dir.trim_end_matches('/'),
        element.file_stem(&config.tag_prefix)
    ))
}

pub fn render_runtime_index(elements: &[ElementRef<'_>], config: &GeneratorConfig) -> Artifact {
    let mut b = SourceBuilder::new();
    for element in elements {
        b.line(format!(
            "export {{ default as {} }} from {};",
            element.name(),
            component_module(element, config)
        ));
    }

    Artifact {
        path: PathBuf::from(INDEX_JS),
        language: Language::JavaScript,
        source: b.finish(),
    }
}

/// Type index: events, per-component exports, then the global tag map.
pub fn render_type_index(elements: &[ElementRef<'_>], config: &GeneratorConfig) -> Artifact {
    let mut b = SourceBuilder::new();
    b.line(format!("export * from \"./{}\";", EVENTS_MODULE));
    b.blank();

    for element in elements {
        let module = component_module(element, config);
        b.line(format!(
            "import type {{ {} }} from {};",
            element_type_name(element.name()),
            module
        ));
        b.line(format!(
            "export {{ default as {} }} from {};",
            element.name(),
            module
        ));
        b.line(format!("export * from {};", module));
    }
    b.blank();

    b.open("declare global {");
    b.open("interface HTMLElementTagNameMap {");
    for element in elements {
        b.line(format!(
            "{}: {};",
            js_string(element.tag_name),
            element_type_name(element.name())
        ));
    }
    b.close("}");
    b.close("}");

    Artifact {
        path: PathBuf::from(INDEX_DTS),
        language: Language::TypeScriptDeclaration,
        source: b.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;

    fn sample() -> Manifest {
        Manifest::parse(
            r#"{ "modules": [
                { "path": "components/tooltip/tooltip.js", "declarations": [
                    { "name": "SlTooltip", "customElement": true, "tagName": "sl-tooltip" } ] },
                { "path": "components/alert/alert.js", "declarations": [
                    { "name": "SlAlert", "customElement": true, "tagName": "sl-alert" } ] }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_runtime_index() {
        let manifest = sample();
        let elements: Vec<_> = manifest.custom_elements().collect();
        let artifact = render_runtime_index(&elements, &GeneratorConfig::default());

        assert_eq!(
            artifact.source,
            "export { default as SlTooltip } from \"./components/tooltip.js\";\n\
             export { default as SlAlert } from \"./components/alert.js\";\n"
        );
    }

    #[test]
    fn test_type_index_keeps_traversal_order() {
        let manifest = sample();
        let elements: Vec<_> = manifest.custom_elements().collect();
        let source = render_type_index(&elements, &GeneratorConfig::default()).source;

        assert!(source.starts_with("export * from \"./events\";\n"));
        let tooltip = source.find("\"sl-tooltip\": SlTooltipElement;").unwrap();
        let alert = source.find("\"sl-alert\": SlAlertElement;").unwrap();
        assert!(tooltip < alert);
        assert!(source.contains("import type { SlAlertElement } from \"./components/alert.js\";"));
        assert!(source.contains("export * from \"./components/tooltip.js\";"));
    }

    #[test]
    fn test_empty_manifest_still_renders() {
        let artifact = render_type_index(&[], &GeneratorConfig::default());
        assert!(artifact.source.contains("interface HTMLElementTagNameMap {"));
    }
}
