//! Shared deterministic types for bailout decisions.
//!
//! These types define stable contracts between the decision, the render
//! scheduler, and route configuration. They must not depend on I/O.

use serde::{Deserialize, Serialize};

/// Per-render state consulted and updated by the bailout decision.
///
/// Owned by the render scheduler for exactly one logical render and handed to
/// the decision by exclusive reference. Dropped when the render finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Produce static output regardless of dynamic usage. Highest precedence.
    pub force_static: bool,
    /// Any dynamic usage is a configuration violation.
    pub dynamic_should_error: bool,
    /// The renderer is producing output ahead of a request.
    pub is_static_generation: bool,
    /// The renderer can postpone the dynamic part instead of failing.
    pub use_unstable_postpone: bool,
    /// Cache-freshness hint in seconds. `None` caches indefinitely.
    pub revalidate: Option<u64>,
    /// Reason of the last dynamic-usage abort.
    pub dynamic_usage_description: Option<String>,
    /// Stack text captured alongside `dynamic_usage_description`.
    pub dynamic_usage_stack: Option<String>,
}

impl RenderContext {
    /// Context for an attempt to render ahead of any request.
    pub fn static_generation() -> Self {
        Self {
            is_static_generation: true,
            ..Self::default()
        }
    }
}

/// Caller-supplied diagnostics for a bailout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BailoutOptions {
    /// Rendering mode to name in diagnostics.
    pub dynamic: Option<String>,
    /// Documentation URL appended to raised messages.
    pub link: Option<String>,
}

impl BailoutOptions {
    pub fn with_dynamic(mut self, dynamic: impl Into<String>) -> Self {
        self.dynamic = Some(dynamic.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Route-level `dynamic` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DynamicMode {
    /// Render statically when possible, fall back to dynamic on bailout.
    #[default]
    Auto,
    /// Always render per request.
    ForceDynamic,
    /// Treat any dynamic usage as an error.
    Error,
    /// Always render statically and ignore dynamic usage.
    ForceStatic,
}

impl DynamicMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DynamicMode::Auto => "auto",
            DynamicMode::ForceDynamic => "force-dynamic",
            DynamicMode::Error => "error",
            DynamicMode::ForceStatic => "force-static",
        }
    }
}

impl std::fmt::Display for DynamicMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DynamicMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(DynamicMode::Auto),
            "force-dynamic" => Ok(DynamicMode::ForceDynamic),
            "error" => Ok(DynamicMode::Error),
            "force-static" => Ok(DynamicMode::ForceStatic),
            other => Err(format!(
                "unknown dynamic mode '{}' (expected auto, force-dynamic, error, force-static)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_mode_parses_its_own_labels() {
        for mode in [
            DynamicMode::Auto,
            DynamicMode::ForceDynamic,
            DynamicMode::Error,
            DynamicMode::ForceStatic,
        ] {
            assert_eq!(mode.as_str().parse::<DynamicMode>(), Ok(mode));
        }
    }

    #[test]
    fn dynamic_mode_rejects_unknown_label() {
        let err = "sometimes".parse::<DynamicMode>().unwrap_err();
        assert!(err.contains("sometimes"));
    }

    #[test]
    fn static_generation_context_only_sets_static_flag() {
        let context = RenderContext::static_generation();
        assert!(context.is_static_generation);
        assert!(!context.force_static);
        assert!(!context.dynamic_should_error);
        assert_eq!(context.revalidate, None);
    }
}
