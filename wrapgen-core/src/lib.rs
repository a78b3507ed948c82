//! wrapgen core library: type taxonomy, bounds, registry, configuration.
//!
//! - [`types`]: categories, declarations and derived descriptors
//! - [`bounds`]: compile-time integral bounds table
//! - [`registry`]: the ordered set of supported types
//! - [`config`]: YAML generator configuration
//! - [`error`]: [`RegistryError`], [`ConfigError`]

pub mod bounds;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use bounds::Bounds;
pub use config::{GeneratorConfig, InjectionTarget, Markers};
pub use error::{ConfigError, RegistryError};
pub use registry::TypeRegistry;
pub use types::{Category, TemplateKind, TypeDecl, TypeDescriptor};
