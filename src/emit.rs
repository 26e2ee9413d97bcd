//! Template Emitter
//!
//! Renders the per-component artifacts (runtime adapter and type declaration),
//! the hoisted events module and the support runtime every adapter imports.
//! All renderers are pure: same inputs, same text.

use std::path::PathBuf;

use crate::builder::SourceBuilder;
use crate::config::GeneratorConfig;
use crate::docs::doc_block;
use crate::events::EventRegistry;
use crate::format::Language;
use crate::manifest::ElementRef;
use crate::mapping::ComponentMapping;

pub const SUPPORT_MODULE: &str = "util";
pub const EVENTS_MODULE: &str = "events";

/// A rendered file, relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub language: Language,
    pub source: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAMING
// ═══════════════════════════════════════════════════════════════════════════════

pub fn element_type_name(component: &str) -> String {
    format!("{}Element", component)
}

pub fn props_interface_name(component: &str) -> String {
    format!("{}Props", component)
}

/// JavaScript string literal for `value`.
pub fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// Relative path from the components directory back to the base directory.
fn up_to_base(components_dir: &str) -> String {
    let depth = components_dir
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .count();
    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

fn emit_object<I>(b: &mut SourceBuilder, name: &str, entries: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    let entries: Vec<(String, String)> = entries.into_iter().collect();
    if entries.is_empty() {
        b.line(format!("const {} = {{}};", name));
        return;
    }
    b.open(format!("const {} = {{", name));
    for (key, value) in entries {
        b.line(format!("{}: {},", js_string(&key), value));
    }
    b.close("};");
}

// ═══════════════════════════════════════════════════════════════════════════════
// RUNTIME ADAPTER
// ═══════════════════════════════════════════════════════════════════════════════

pub fn render_runtime_adapter(
    element: &ElementRef<'_>,
    mapping: &ComponentMapping,
    config: &GeneratorConfig,
) -> Artifact {
    let name = element.name();
    let props_iface = props_interface_name(name);
    let up = up_to_base(&config.components_dir);

    let mut b = SourceBuilder::new();
    b.line("/* eslint-disable react/prop-types */");
    b.line("import { memo, forwardRef, createElement } from \"react\";");
    b.line(format!(
        "import {{ useComponentProps, useComponentRef }} from \"{}{}.js\";",
        up, SUPPORT_MODULE
    ));
    b.blank();

    emit_object(
        &mut b,
        "PROP_MAP",
        mapping
            .prop_map
            .iter()
            .map(|(field, wire)| (field.clone(), js_string(wire))),
    );
    b.blank();

    emit_object(&mut b, "PROP_DEFAULTS", mapping.prop_defaults.iter().cloned());
    b.blank();

    emit_object(
        &mut b,
        "EVENT_DEFINITIONS",
        mapping.event_bindings.iter().map(|binding| {
            (
                binding.binding.clone(),
                format!("[{}, {}]", js_string(&binding.wire_name), binding.capture),
            )
        }),
    );
    b.blank();

    b.lines(doc_block(
        element.summary(),
        &[
            format!("@param {{{}}} props", props_iface),
            format!(
                "@returns {{ReactElement<{}, {}>}}",
                props_iface,
                js_string(element.tag_name)
            ),
        ],
    ));
    b.open("export default memo(");
    b.open(format!(
        "forwardRef(function {}(props, outerRef) {{",
        name
    ));
    b.line("const [componentProps, events, children] = useComponentProps(");
    b.line("  props,");
    b.line("  PROP_MAP,");
    b.line("  PROP_DEFAULTS,");
    b.line("  EVENT_DEFINITIONS,");
    b.line(");");
    b.line("const componentRef = useComponentRef(outerRef, events, EVENT_DEFINITIONS);");
    b.blank();
    b.open("return createElement(");
    b.line(format!("{},", js_string(element.tag_name)));
    b.open("{");
    b.line("...componentProps,");
    b.line("ref: componentRef,");
    b.line("suppressHydrationWarning: true,");
    b.close("},");
    b.line("children,");
    b.close(");");
    b.close("}),");
    b.close(");");

    Artifact {
        path: PathBuf::from(&config.components_dir)
            .join(format!("{}.js", element.file_stem(&config.tag_prefix))),
        language: Language::JavaScript,
        source: b.finish(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE DECLARATION
// ═══════════════════════════════════════════════════════════════════════════════

pub fn render_type_declaration(
    element: &ElementRef<'_>,
    mapping: &ComponentMapping,
    config: &GeneratorConfig,
) -> Artifact {
    let name = element.name();
    let element_type = element_type_name(name);
    let props_iface = props_interface_name(name);
    let up = up_to_base(&config.components_dir);

    let mut b = SourceBuilder::new();
    b.line("import type { ReactElement, HTMLAttributes, Ref } from \"react\";");
    b.line(format!(
        "import type {} from {};",
        element_type,
        js_string(&format!(
            "{}/{}",
            config.element_package.trim_end_matches('/'),
            element.module_path
        ))
    ));
    if !mapping.events.is_empty() {
        let shared: Vec<&str> = mapping
            .events
            .iter()
            .map(|e| e.event_name.as_str())
            .collect();
        b.line(format!(
            "import type {{ {} }} from \"{}{}\";",
            shared.join(", "),
            up,
            EVENTS_MODULE
        ));
    }
    b.blank();
    b.line(format!("export type {{ {} }};", element_type));
    b.blank();

    for event in &mapping.events {
        match &event.detail_type {
            Some(detail) => {
                b.line(format!("export type {}Detail = {};", event.alias, detail));
                b.line(format!(
                    "export type {} = {}<{}, {}Detail>;",
                    event.alias, event.event_name, element_type, event.alias
                ));
            }
            None => {
                b.line(format!(
                    "export type {} = {}<{}>;",
                    event.alias, event.event_name, element_type
                ));
            }
        }
    }
    b.blank();

    b.open(format!(
        "export interface {} extends HTMLAttributes<{}> {{",
        props_iface, element_type
    ));
    b.line(format!("ref?: Ref<{}>;", element_type));
    for attr in &mapping.attributes {
        b.lines(doc_block(attr.description.as_deref(), &[]));
        b.line(format!("{}?: {};", attr.field_name, attr.type_text));
    }
    for event in &mapping.events {
        for prop in [event.react_name.clone(), event.capture_name()] {
            b.lines(doc_block(event.description.as_deref(), &[]));
            b.line(format!("{}?: (event: {}) => void;", prop, event.alias));
        }
    }
    b.close("}");
    b.blank();

    b.lines(doc_block(element.summary(), &[]));
    b.line(format!(
        "export default function {}(props: {}): ReactElement<{}, {}>;",
        name,
        props_iface,
        props_iface,
        js_string(element.tag_name)
    ));

    Artifact {
        path: PathBuf::from(&config.components_dir)
            .join(format!("{}.d.ts", element.file_stem(&config.tag_prefix))),
        language: Language::TypeScriptDeclaration,
        source: b.finish(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENTS MODULE
// ═══════════════════════════════════════════════════════════════════════════════

/// One generic alias per shared event identifier, in first-seen order.
pub fn render_events_module(registry: &EventRegistry, config: &GeneratorConfig) -> Artifact {
    let mut b = SourceBuilder::new();
    b.line(format!(
        "import type {{ {} }} from \"./{}\";",
        config.event_base_type, SUPPORT_MODULE
    ));
    b.blank();
    for event in registry.iter() {
        b.line(format!(
            "export type {}<T = HTMLElement, D = any> = {}<T, {}, D>;",
            event.event_name,
            config.event_base_type,
            js_string(&event.wire_name)
        ));
    }

    Artifact {
        path: PathBuf::from(format!("{}.d.ts", EVENTS_MODULE)),
        language: Language::TypeScriptDeclaration,
        source: b.finish(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SUPPORT RUNTIME
// ═══════════════════════════════════════════════════════════════════════════════

const SUPPORT_JS: &str = r#"import { useCallback, useEffect, useMemo, useRef, useState } from "react";

const REACT_PROPS = {
  className: "class",
  htmlFor: "for",
};

/**
 * Split a property bag into element attributes, event handlers and children.
 * Falsy values are dropped so the element sees them as absent.
 */
export function useComponentProps(props, propMap, propDefaults, eventDefs) {
  return useMemo(() => {
    const attributes = {};
    const events = {};
    let children = null;

    for (const [name, value] of Object.entries({ ...propDefaults, ...props })) {
      if (value === false || value === undefined || value === null) {
        continue;
      }

      if (name === "children") {
        children = value;
      } else if (name in eventDefs) {
        events[name] = value;
      } else if (name in propMap) {
        attributes[propMap[name]] = value;
      } else if (name in REACT_PROPS) {
        attributes[REACT_PROPS[name]] = value;
      } else {
        attributes[name] = value;
      }
    }

    return [attributes, events, children];
  }, [props, propMap, propDefaults, eventDefs]);
}

/**
 * Ref callback forwarding the element to `outerRef`. Each binding owns one
 * dispatcher, attached when its handler prop becomes present and detached
 * when it becomes absent. Other bindings are left in place.
 */
export function useComponentRef(outerRef, events, eventDefs) {
  const [element, setElement] = useState(null);
  const handlers = useRef(events);
  handlers.current = events;
  const attached = useRef(new Map());

  const updateElement = useCallback(
    (node) => {
      setElement(node);

      if (typeof outerRef === "function") {
        outerRef(node);
      } else if (outerRef) {
        outerRef.current = node;
      }
    },
    [outerRef],
  );

  useEffect(() => {
    if (!element) {
      return undefined;
    }

    const listeners = attached.current;
    return () => {
      for (const [prop, dispatch] of listeners) {
        const [type, capture] = eventDefs[prop];
        element.removeEventListener(type, dispatch, capture);
      }
      listeners.clear();
    };
  }, [element, eventDefs]);

  useEffect(() => {
    if (!element) {
      return;
    }

    const listeners = attached.current;
    for (const prop of Object.keys(eventDefs)) {
      const [type, capture] = eventDefs[prop];
      const present = Boolean(events[prop]);
      const dispatch = listeners.get(prop);

      if (present && !dispatch) {
        const next = (event) => handlers.current[prop]?.(event);
        element.addEventListener(type, next, capture);
        listeners.set(prop, next);
      } else if (!present && dispatch) {
        element.removeEventListener(type, dispatch, capture);
        listeners.delete(prop);
      }
    }
  }, [element, events, eventDefs]);

  return updateElement;
}
"#;

/// `util.js` and `util.d.ts`.
pub fn render_support(config: &GeneratorConfig) -> Vec<Artifact> {
    let mut b = SourceBuilder::new();
    b.open(format!(
        "export type {}<T = HTMLElement, N extends string = string, D = any> = CustomEvent<D> & {{",
        config.event_base_type
    ));
    b.line("type: N;");
    b.line("currentTarget: T;");
    b.line("target: T;");
    b.close("};");
    b.blank();
    b.line("export function useComponentProps(");
    b.line("  props: Record<string, unknown>,");
    b.line("  propMap: Record<string, string>,");
    b.line("  propDefaults: Record<string, unknown>,");
    b.line("  eventDefs: Record<string, [string, boolean]>,");
    b.line("): [Record<string, unknown>, Record<string, (event: Event) => void>, unknown];");
    b.blank();
    b.line("export function useComponentRef<T extends HTMLElement>(");
    b.line("  outerRef: ((node: T | null) => void) | { current: T | null } | null | undefined,");
    b.line("  events: Record<string, (event: Event) => void>,");
    b.line("  eventDefs: Record<string, [string, boolean]>,");
    b.line("): (node: T | null) => void;");

    vec![
        Artifact {
            path: PathBuf::from(format!("{}.js", SUPPORT_MODULE)),
            language: Language::JavaScript,
            source: SUPPORT_JS.to_string(),
        },
        Artifact {
            path: PathBuf::from(format!("{}.d.ts", SUPPORT_MODULE)),
            language: Language::TypeScriptDeclaration,
            source: b.finish(),
        },
    ]
}
