//! Pipeline
//!
//! Top-level orchestration: load, register events, resolve and render every
//! component, format, then replace the previous output wholesale.
//!
//! All derivation happens before the first file system mutation, so a bad
//! manifest is reported without touching the output directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::barrel::{render_runtime_index, render_type_index, INDEX_DTS, INDEX_JS};
use crate::config::{GeneratorConfig, CONFIG_FILE};
use crate::emit::{
    render_events_module, render_runtime_adapter, render_support, render_type_declaration,
    Artifact, EVENTS_MODULE, SUPPORT_MODULE,
};
use crate::error::{GenError, Result};
use crate::events::EventRegistry;
use crate::format::{Formatter, OxcFormatter};
use crate::manifest::{ElementRef, Manifest};
use crate::mapping::{self, ComponentMapping};
use crate::output::OutputDir;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Component names in manifest traversal order.
    pub components: Vec<String>,
    /// Written files, relative to the base directory, in write order.
    pub files: Vec<PathBuf>,
}

/// Generate everything under `base_dir` using `elements-codegen.toml` (if any)
/// and the default formatter.
pub fn generate(base_dir: &Path) -> Result<GenerationReport> {
    let config = GeneratorConfig::load(base_dir)?;
    generate_with(base_dir, &config, &OxcFormatter)
}

pub fn generate_with(
    base_dir: &Path,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> Result<GenerationReport> {
    let out = OutputDir::new(base_dir);

    let manifest_path = config.manifest_path(base_dir);
    info!("Reading manifest from {}", manifest_path.display());
    let manifest = Manifest::parse(&out.read_to_string(&config.manifest)?)?;

    let artifacts = build_artifacts(&manifest, config, formatter)?;

    clean(base_dir, config)?;
    out.create_dir(Path::new(&config.components_dir))?;

    let mut report = GenerationReport {
        components: manifest
            .custom_elements()
            .map(|el| el.name().to_string())
            .collect(),
        files: Vec::with_capacity(artifacts.len()),
    };
    for artifact in &artifacts {
        out.write(&artifact.path, &artifact.source)?;
        report.files.push(artifact.path.clone());
    }

    info!(
        "Generated {} components ({} files) in {}",
        report.components.len(),
        report.files.len(),
        out.root().display()
    );
    Ok(report)
}

/// Render and format every artifact of a run, in write order: support
/// runtime, events module, component pairs, barrels.
pub fn build_artifacts(
    manifest: &Manifest,
    config: &GeneratorConfig,
    formatter: &dyn Formatter,
) -> Result<Vec<Artifact>> {
    // Frozen before anything that references its type names is rendered.
    let registry = EventRegistry::collect(manifest)?;

    let elements: Vec<ElementRef<'_>> = manifest.custom_elements().collect();
    check_file_stems(&elements, config)?;

    let mut mappings: Vec<ComponentMapping> = Vec::with_capacity(elements.len());
    for element in &elements {
        if !element.tag_name.starts_with(&config.tag_prefix) {
            warn!(
                "{} does not start with prefix {}, file name keeps the full tag",
                element.tag_name, config.tag_prefix
            );
        }
        let mapping = mapping::resolve(element, &config.event_prefix)?;
        debug!(
            "Resolved {}: {} renamed props, {} defaults, {} event bindings",
            element.name(),
            mapping.prop_map.len(),
            mapping.prop_defaults.len(),
            mapping.event_bindings.len()
        );
        mappings.push(mapping);
    }

    let mut artifacts = render_support(config);
    artifacts.push(render_events_module(&registry, config));

    let components: Vec<Artifact> = elements
        .par_iter()
        .zip(mappings.par_iter())
        .flat_map_iter(|(element, mapping)| {
            [
                render_runtime_adapter(element, mapping, config),
                render_type_declaration(element, mapping, config),
            ]
        })
        .collect();
    artifacts.extend(components);

    artifacts.push(render_runtime_index(&elements, config));
    artifacts.push(render_type_index(&elements, config));

    let formatted: Vec<Result<Artifact>> = artifacts
        .into_par_iter()
        .map(|artifact| {
            let source = formatter.format(&artifact.path, &artifact.source, artifact.language)?;
            Ok(Artifact { source, ..artifact })
        })
        .collect();

    // First failure in write order, independent of scheduling.
    formatted.into_iter().collect()
}

/// Every component needs its own artifact pair; two tags that reduce to the
/// same file stem would overwrite each other.
fn check_file_stems(elements: &[ElementRef<'_>], config: &GeneratorConfig) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::with_capacity(elements.len());
    for element in elements {
        let stem = element.file_stem(&config.tag_prefix);
        if let Some(first) = owners.insert(stem, element.name()) {
            return Err(GenError::OutputCollision {
                path: PathBuf::from(&config.components_dir).join(stem),
                first: first.to_string(),
                second: element.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Remove every path a run owns.
pub fn clean(base_dir: &Path, config: &GeneratorConfig) -> Result<()> {
    let dir = config.components_dir.trim_matches('/');
    if dir.is_empty() || dir == "." || dir.split('/').any(|seg| seg == "..") {
        return Err(GenError::Config {
            path: base_dir.join(CONFIG_FILE),
            message: format!(
                "components-dir must be a subdirectory of the base directory, got {:?}",
                config.components_dir
            ),
        });
    }

    let out = OutputDir::new(base_dir);
    out.remove_dir(Path::new(&config.components_dir))?;
    for file in [
        INDEX_JS.to_string(),
        INDEX_DTS.to_string(),
        format!("{}.d.ts", EVENTS_MODULE),
        format!("{}.js", SUPPORT_MODULE),
        format!("{}.d.ts", SUPPORT_MODULE),
    ] {
        out.remove_file(Path::new(&file))?;
    }
    Ok(())
}
