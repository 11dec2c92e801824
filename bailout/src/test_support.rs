//! Test-only helpers for render contexts, route configs, and postpone doubles.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::types::{DynamicMode, RenderContext};
use crate::io::config::{RouteConfig, write_config};
use crate::postpone::{Postpone, Suspension};

/// Build a default context and adjust it with `edit`.
pub fn context_with(edit: impl FnOnce(&mut RenderContext)) -> RenderContext {
    let mut context = RenderContext::default();
    edit(&mut context);
    context
}

/// Route config with explicit `dynamic` and `revalidate`, postponing disabled.
pub fn route_config(dynamic: DynamicMode, revalidate: Option<u64>) -> RouteConfig {
    RouteConfig {
        dynamic,
        revalidate,
        ..RouteConfig::default()
    }
}

/// Postpone double that records every reason it was asked to postpone.
#[derive(Debug)]
pub struct RecordingPostpone {
    outcome: Suspension,
    calls: RefCell<Vec<String>>,
}

impl RecordingPostpone {
    pub fn suspending() -> Self {
        Self::new(Suspension::Suspended)
    }

    pub fn unsupported() -> Self {
        Self::new(Suspension::Unsupported)
    }

    fn new(outcome: Suspension) -> Self {
        Self {
            outcome,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Postpone for RecordingPostpone {
    fn postpone(&self, reason: &str) -> Suspension {
        self.calls.borrow_mut().push(reason.to_string());
        self.outcome
    }
}

/// Temporary directory holding a `route.toml`.
pub struct TestRoute {
    temp: tempfile::TempDir,
}

impl TestRoute {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("route.toml")
    }

    pub fn write_config(&self, cfg: &RouteConfig) -> Result<PathBuf> {
        let path = self.config_path();
        write_config(&path, cfg)?;
        Ok(path)
    }
}
