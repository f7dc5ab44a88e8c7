//! Run settings.
//!
//! Defaults reproduce the page layout guardwrap was written for. An optional
//! YAML file may override any field:
//!
//! ```yaml
//! guard:
//!   indent: "    "
//! driver:
//!   base_dir: web/src/app
//!   modules: [accounting]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::mapping::Module;

/// How the guard element and its import are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardSettings {
    /// Element name, e.g. `PermissionGuard`.
    pub tag: String,
    /// Attribute carrying the permission key.
    pub key_attr: String,
    /// Import statement inserted after the anchor.
    pub import_line: String,
    /// Existing import line the guard import is anchored to.
    pub anchor: String,
    /// Prefix for the inserted opening and closing tags.
    pub indent: String,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            tag: "PermissionGuard".to_string(),
            key_attr: "componentKey".to_string(),
            import_line: "import { PermissionGuard } from '@/components/PermissionGuard';"
                .to_string(),
            anchor: "import { KPICardSkeleton, ChartSkeleton, TableSkeleton } from '@/components/LoadingSkeleton';"
                .to_string(),
            indent: " ".repeat(6),
        }
    }
}

impl GuardSettings {
    pub fn open_tag_prefix(&self) -> String {
        format!("<{}", self.tag)
    }

    pub fn open_tag(&self, key: &str) -> String {
        format!("<{} {}=\"{}\">", self.tag, self.key_attr, key)
    }

    pub fn close_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Which documents the driver visits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverSettings {
    /// Directory holding one sub-directory per module, relative to the root.
    pub base_dir: PathBuf,
    /// File name of each module's page.
    pub page_file: String,
    pub modules: Vec<Module>,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("src").join("app"),
            page_file: "page.tsx".to_string(),
            modules: Module::ALL.to_vec(),
        }
    }
}

impl DriverSettings {
    /// `<root>/<base_dir>/<module>/<page_file>`
    pub fn page_path(&self, root: &Path, module: Module) -> PathBuf {
        root.join(&self.base_dir)
            .join(module.as_str())
            .join(&self.page_file)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub guard: GuardSettings,
    pub driver: DriverSettings,
}

impl Settings {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("guard.tag", &self.guard.tag),
            ("guard.key_attr", &self.guard.key_attr),
            ("guard.import_line", &self.guard.import_line),
            ("guard.anchor", &self.guard.anchor),
            ("driver.page_file", &self.driver.page_file),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("{} must not be empty", field),
                });
            }
        }
        if !crate::import::has_import(&self.guard.import_line, &self.guard.tag) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "guard.import_line does not import {}: {}",
                    self.guard.tag, self.guard.import_line
                ),
            });
        }
        Ok(())
    }
}
