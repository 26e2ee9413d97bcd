//! Error kinds for the generator.
//!
//! Every variant is fatal: the pipeline has no recovery path and a run either
//! completes or aborts on the first error it meets.

use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_MANIFEST_PARSE: &str = "E-MANIFEST-PARSE";
pub const ERR_EVENT_MISMATCH: &str = "E-EVENT-MISMATCH";
pub const ERR_EVENT_DUPLICATE: &str = "E-EVENT-DUPLICATE";
pub const ERR_FILE_SYSTEM: &str = "E-FS";
pub const ERR_FORMAT: &str = "E-FORMAT";
pub const ERR_CONFIG: &str = "E-CONFIG";
pub const ERR_OUTPUT_COLLISION: &str = "E-OUTPUT-COLLISION";

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR ERROR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("Failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Two events share an event type identifier but dispatch different wire names.
    #[error("Name mismatch for {event_name} event: \"{expected}\" vs \"{found}\"")]
    EventNameMismatch {
        event_name: String,
        expected: String,
        found: String,
    },

    #[error("Component {component} uses {event_name} multiple times")]
    DuplicateEvent {
        component: String,
        event_name: String,
    },

    #[error("File system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format {}: {message}", path.display())]
    Formatter { path: PathBuf, message: String },

    /// Two components would write the same artifact files.
    #[error("Components {first} and {second} both map to {}", path.display())]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl GenError {
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Stable code identifying the failing condition.
    pub fn code(&self) -> &'static str {
        match self {
            GenError::ManifestParse(_) => ERR_MANIFEST_PARSE,
            GenError::EventNameMismatch { .. } => ERR_EVENT_MISMATCH,
            GenError::DuplicateEvent { .. } => ERR_EVENT_DUPLICATE,
            GenError::FileSystem { .. } => ERR_FILE_SYSTEM,
            GenError::Formatter { .. } => ERR_FORMAT,
            GenError::Config { .. } => ERR_CONFIG,
            GenError::OutputCollision { .. } => ERR_OUTPUT_COLLISION,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
