//! Tera rendering engine: template lookup per [`TemplateKind`] and [`Renderer`].
//!
//! # Template mapping
//!
//! | Kind           | Template                  | Default target                 |
//! |----------------|---------------------------|--------------------------------|
//! | Primitive      | `primitive.pxd.tera`      | `mds/core/api_primitives.pxd`  |
//! | Array          | `array.pxd.tera`          | `mds/core/api_arrays.pxd`      |
//! | Namespace      | `namespace.pxd.tera`      | `mds/core/api_namespaces.pxd`  |
//! | RecordField    | `record_field.pxd.tera`   | `mds/core/api_records.pxd`     |
//! | ConcreteType   | `concrete_type.pyx.tera`  | `mds/managed.pyx`              |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use wrapgen_core::registry::TypeRegistry;
use wrapgen_core::types::{TemplateKind, TypeDescriptor};

use crate::context::TemplateContext;
use crate::error::RenderError;

/// Appended once after the full per-descriptor sequence.
///
/// Kept for file-format compatibility with files produced by earlier tooling.
pub const TRAILING_SENTINEL: &str = "\n";

// ---------------------------------------------------------------------------
// Embedded templates, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("primitive.pxd.tera", include_str!("templates/primitive.pxd.tera")),
    ("array.pxd.tera", include_str!("templates/array.pxd.tera")),
    ("namespace.pxd.tera", include_str!("templates/namespace.pxd.tera")),
    ("record_field.pxd.tera", include_str!("templates/record_field.pxd.tera")),
    ("concrete_type.pyx.tera", include_str!("templates/concrete_type.pyx.tera")),
];

/// Template name rendered for a given kind.
pub fn template_name(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Primitive => "primitive.pxd.tera",
        TemplateKind::Array => "array.pxd.tera",
        TemplateKind::Namespace => "namespace.pxd.tera",
        TemplateKind::RecordField => "record_field.pxd.tera",
        TemplateKind::ConcreteType => "concrete_type.pyx.tera",
    }
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    // Stable registration order regardless of directory iteration order.
    files.sort();
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents.replace("\r\n", "\n")));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded defaults
/// by name (e.g. `array.pxd.tera`). Template names are normalised to lowercase
/// relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render one block for `kind` using the supplied context.
    pub fn render(&self, ctx: &TemplateContext, kind: TemplateKind) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let content = self.tera.render(template_name(kind), &tera_ctx)?;
        Ok(content.replace("\r\n", "\n"))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders per-descriptor blocks and whole injected regions.
///
/// Create once with [`Renderer::new`] and reuse across targets.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_overrides(None)
    }

    /// Construct a [`Renderer`] whose templates may be overridden from `dir`.
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(dir)? })
    }

    /// Render the block for a single descriptor.
    pub fn render(&self, descriptor: &TypeDescriptor, kind: TemplateKind) -> Result<String, RenderError> {
        let ctx = TemplateContext::from_descriptor(descriptor);
        self.engine.render(&ctx, kind)
    }

    /// Render the full injected region: one block per descriptor in registry
    /// order, followed by [`TRAILING_SENTINEL`].
    pub fn render_all(&self, registry: &TypeRegistry, kind: TemplateKind) -> Result<String, RenderError> {
        let mut out = String::new();
        for descriptor in registry {
            out.push_str(&self.render(descriptor, kind)?);
        }
        out.push_str(TRAILING_SENTINEL);
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
