//! # wrapgen-renderer
//!
//! Tera-based template engine that renders per-type wrapper blocks from
//! wrapgen type descriptors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wrapgen_core::{TemplateKind, TypeRegistry};
//! use wrapgen_renderer::Renderer;
//!
//! fn render_arrays() -> Option<String> {
//!     let registry = TypeRegistry::builtin().ok()?;
//!     let renderer = Renderer::new().ok()?;
//!     renderer.render_all(&registry, TemplateKind::Array).ok()
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::{template_name, Renderer, TemplateEngine, TRAILING_SENTINEL};
pub use error::RenderError;
