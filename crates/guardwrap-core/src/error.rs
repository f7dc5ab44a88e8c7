//! Error types for guardwrap.

use std::path::PathBuf;

use crate::mapping::Module;

/// Errors raised while building the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Entry key does not follow `<module>.<component>`.
    #[error("mapping key mismatch for {module}.{component}: got {key}")]
    KeyMismatch {
        module: Module,
        component: String,
        key: String,
    },

    /// Same component declared twice under one module.
    #[error("duplicate component in mapping: {module}.{component}")]
    DuplicateComponent { module: Module, component: String },

    /// Component name is empty or not `[a-z0-9_]`.
    #[error("invalid component name under {module}: {component:?}")]
    InvalidComponent { module: Module, component: String },
}

/// Errors raised by a single wrap attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WrapError {
    /// (module, component) pair absent from the mapping table.
    #[error("unknown mapping: {module}.{component}")]
    UnknownMapping { module: Module, component: String },

    /// No start/end marker pair matched.
    #[error("region not found for {key}: start /{start}/, end /{end}/")]
    RegionNotFound {
        key: String,
        start: String,
        end: String,
    },
}

/// File-level errors. Abort the file, never the batch.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading the optional settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl WrapError {
    /// Whether the failure is a marker miss (policy-dependent) rather than a
    /// configuration error.
    pub fn is_region_miss(&self) -> bool {
        matches!(self, Self::RegionNotFound { .. })
    }
}
