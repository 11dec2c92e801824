//! Route segment configuration stored in `route.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{DynamicMode, RenderContext};

/// Default location of the route config, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "route.toml";

/// Per-route rendering options (TOML).
///
/// Intended to be edited by humans. Missing fields fall back to `auto`
/// rendering with no revalidation interval and postponing disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteConfig {
    /// How the route reacts to dynamic usage.
    pub dynamic: DynamicMode,

    /// Revalidation interval in seconds. Omitted means cache indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidate: Option<u64>,

    pub experimental: ExperimentalConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExperimentalConfig {
    /// Partial prerendering: postpone dynamic parts instead of bailing out.
    pub ppr: bool,
}

impl RouteConfig {
    pub fn validate(&self) -> Result<()> {
        match (self.dynamic, self.revalidate) {
            (DynamicMode::ForceStatic, Some(0)) => Err(anyhow!(
                "revalidate = 0 conflicts with dynamic = \"force-static\""
            )),
            (DynamicMode::ForceDynamic, Some(secs)) if secs > 0 => Err(anyhow!(
                "revalidate = {} conflicts with dynamic = \"force-dynamic\"",
                secs
            )),
            _ => Ok(()),
        }
    }

    /// Build the render context for one render of this route.
    pub fn render_context(&self, static_generation: bool) -> RenderContext {
        let mut context = RenderContext {
            is_static_generation: static_generation,
            use_unstable_postpone: self.experimental.ppr,
            revalidate: self.revalidate,
            ..RenderContext::default()
        };
        match self.dynamic {
            DynamicMode::Auto => {}
            DynamicMode::ForceDynamic => context.revalidate = Some(0),
            DynamicMode::Error => context.dynamic_should_error = true,
            DynamicMode::ForceStatic => context.force_static = true,
        }
        context
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RouteConfig::default()`.
pub fn load_config(path: &Path) -> Result<RouteConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "route config missing, using defaults");
        return Ok(RouteConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RouteConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), dynamic = %cfg.dynamic, "route config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RouteConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize route config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
