//! # Custom Element Binding Generator
//!
//! Reads a custom elements manifest and writes, for every custom element, a
//! React runtime adapter (`components/<tag>.js`) and its type declaration
//! (`components/<tag>.d.ts`), plus the aggregate `index.js` / `index.d.ts`,
//! the hoisted `events.d.ts` and the `util` support module they import.
//!
//! ## Pipeline
//!
//! 1. **Load**: the manifest text becomes a typed [`Manifest`] tree.
//! 2. **Register**: every event type identifier is checked against the one
//!    wire name it may denote, across all components ([`EventRegistry`]).
//! 3. **Resolve**: per component, the renamed-prop table, the default table
//!    and the event binding table ([`ComponentMapping`]).
//! 4. **Emit**: adapter and declaration text, then the barrels.
//! 5. **Format & write**: each text is checked and canonicalized, the old
//!    output is removed, the new output written.
//!
//! ## Invariants
//!
//! - Two events sharing an event type identifier must share a wire name,
//!   anywhere in the manifest. A violation aborts the run.
//! - An event type identifier appears at most once per component.
//! - Every declared event yields exactly two bindings: `<reactName>` and
//!   `<reactName>Capture`.
//! - Output order follows manifest traversal order, and a rerun over an
//!   unchanged manifest is byte-identical.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod barrel;
mod builder;
mod config;
mod docs;
mod emit;
mod error;
mod events;
mod format;
mod manifest;
mod mapping;
mod output;
mod pipeline;


pub use barrel::{render_runtime_index, render_type_index};
pub use config::{GeneratorConfig, CONFIG_FILE};
pub use docs::linewrap_comment;
pub use emit::{render_runtime_adapter, render_type_declaration, Artifact};
pub use error::{GenError, Result};
pub use events::{EventRegistry, RegisteredEvent};
pub use format::{canonicalize, Formatter, Language, OxcFormatter};
pub use manifest::{Attribute, Declaration, ElementRef, Event, Manifest, Module};
pub use mapping::{kebab_to_field, resolve, ComponentMapping, EventBinding};
pub use pipeline::{build_artifacts, clean, generate, generate_with, GenerationReport};

#[cfg(feature = "napi")]
#[napi]
pub fn generate_components_native(base_dir: String) -> napi::Result<serde_json::Value> {
    let report = generate(std::path::Path::new(&base_dir))
        .map_err(|e| napi::Error::from_reason(format!("[{}] {}", e.code(), e)))?;
    serde_json::to_value(report).map_err(|e| napi::Error::from_reason(e.to_string()))
}
