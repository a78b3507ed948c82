//! Generator configuration.
//!
//! # File format
//!
//! ```yaml
//! markers:
//!   start: START INJECTION
//!   end: END INJECTION
//! template_dir: templates
//! types: [bool, byte]
//! targets:
//!   - path: mds/core/api_primitives.pxd
//!     template: primitive
//! ```
//!
//! Every field is optional. An absent file, or an empty one, yields
//! [`GeneratorConfig::default`], which reproduces the built-in target list.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RegistryError};
use crate::registry::TypeRegistry;
use crate::types::TemplateKind;

/// File name looked up under the root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "wrapgen.yaml";

/// Sentinel substrings that delimit the generated region of a target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "START INJECTION".to_string(),
            end: "END INJECTION".to_string(),
        }
    }
}

/// One target file and the wrapper flavour injected into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionTarget {
    /// Path relative to the generator root (absolute paths are kept as-is).
    pub path: PathBuf,
    pub template: TemplateKind,
}

impl InjectionTarget {
    pub fn new(path: impl Into<PathBuf>, template: TemplateKind) -> Self {
        Self { path: path.into(), template }
    }
}

/// Built-in target list, in processing order.
pub fn default_targets() -> Vec<InjectionTarget> {
    vec![
        InjectionTarget::new("mds/core/api_primitives.pxd", TemplateKind::Primitive),
        InjectionTarget::new("mds/core/api_arrays.pxd", TemplateKind::Array),
        InjectionTarget::new("mds/core/api_namespaces.pxd", TemplateKind::Namespace),
        InjectionTarget::new("mds/core/api_records.pxd", TemplateKind::RecordField),
        InjectionTarget::new("mds/managed.pyx", TemplateKind::ConcreteType),
    ]
}

/// Root of the YAML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub markers: Markers,
    /// Directory of `.tera` overrides, relative to the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Restrict generation to these type names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    pub targets: Vec<InjectionTarget>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            template_dir: None,
            types: None,
            targets: default_targets(),
        }
    }
}

impl GeneratorConfig {
    /// Load an explicit config file.
    ///
    /// Returns [`ConfigError::NotFound`] if absent and
    /// [`ConfigError::Parse`] (with path + line context) if malformed.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.to_path_buf() });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `<root>/wrapgen.yaml` if it exists, otherwise the defaults.
    pub fn discover(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_at(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve a target path against `root`.
    pub fn resolve(&self, root: &Path, target: &InjectionTarget) -> PathBuf {
        root.join(&target.path)
    }

    /// Built-in registry narrowed to `types`, or all of it when unset.
    pub fn registry(&self) -> Result<TypeRegistry, RegistryError> {
        let builtin = TypeRegistry::builtin()?;
        match &self.types {
            Some(names) => builtin.select(names),
            None => Ok(builtin),
        }
    }

    /// Resolved template override directory, if configured.
    pub fn template_dir_at(&self, root: &Path) -> Option<PathBuf> {
        self.template_dir.as_ref().map(|dir| root.join(dir))
    }
}
