//! Run orchestration shared by the CLI commands.
//!
//! A run renders every configured target in order and injects the result.
//! Runs are fail-fast and **not** transactional: if target *k* fails, targets
//! `1..k-1` have already been rewritten (commit mode) and stay that way. Fix
//! the offending file and re-run; regeneration is idempotent, so the second
//! run converges.

use std::path::{Path, PathBuf};

use wrapgen_core::{GeneratorConfig, InjectionTarget, TypeRegistry};
use wrapgen_renderer::Renderer;

use crate::error::InjectError;
use crate::inject::{inject, InjectionOutcome};

/// Registry, renderer and configuration resolved once per run.
pub struct Generator {
    root: PathBuf,
    config: GeneratorConfig,
    registry: TypeRegistry,
    renderer: Renderer,
}

impl Generator {
    /// Resolve the registry (narrowed by `config.types`) and load templates.
    ///
    /// Fails with [`InjectError::Registry`] if a configured type is unknown,
    /// before any file is touched.
    pub fn new(root: &Path, config: GeneratorConfig) -> Result<Self, InjectError> {
        let registry = config.registry()?;
        let template_dir = config.template_dir_at(root);
        let renderer = Renderer::with_overrides(template_dir.as_deref())?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
            registry,
            renderer,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Absolute path of a target.
    pub fn target_path(&self, target: &InjectionTarget) -> PathBuf {
        self.config.resolve(&self.root, target)
    }

    /// Rendered region for a target: all blocks plus the trailing sentinel.
    pub fn render_target(&self, target: &InjectionTarget) -> Result<String, InjectError> {
        Ok(self.renderer.render_all(&self.registry, target.template)?)
    }

    /// Render and inject every target in order, stopping at the first error.
    pub fn run(&self, dry_run: bool) -> Result<Vec<InjectionOutcome>, InjectError> {
        let mut outcomes = Vec::with_capacity(self.config.targets.len());
        for target in &self.config.targets {
            let path = self.target_path(target);
            tracing::debug!("rendering {} into {}", target.template, path.display());
            let rendered = self.render_target(target)?;
            let outcome = inject(&path, &rendered, &self.config.markers, dry_run)?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

/// Build a [`Generator`] for `root` and run it.
///
/// This is the canonical entrypoint for both commit and dry runs.
pub fn run(
    root: &Path,
    config: GeneratorConfig,
    dry_run: bool,
) -> Result<Vec<InjectionOutcome>, InjectError> {
    Generator::new(root, config)?.run(dry_run)
}
