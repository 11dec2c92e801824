//! Render scheduler: static attempt first, per-request render on bailout.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::decision::static_generation_bailout;
use crate::core::features::DynamicFeature;
use crate::core::types::{BailoutOptions, DynamicMode, RenderContext};
use crate::io::config::RouteConfig;
use crate::postpone::Postpone;
use crate::signal::BailoutSignal;

/// Handle given to render code for the duration of one render.
///
/// Owns nothing: the context belongs to the scheduler and is dropped when the
/// render ends.
pub struct RenderScope<'a> {
    context: &'a mut RenderContext,
    postpone: &'a dyn Postpone,
}

impl<'a> RenderScope<'a> {
    pub fn new(context: &'a mut RenderContext, postpone: &'a dyn Postpone) -> Self {
        Self { context, postpone }
    }

    /// Report use of a dynamic feature by reason string.
    ///
    /// `Ok(true)` means the route is forced static and the caller should
    /// render without request data.
    pub fn bailout(&mut self, reason: &str, opts: &BailoutOptions) -> Result<bool, BailoutSignal> {
        static_generation_bailout(Some(&mut *self.context), reason, opts, self.postpone)
    }

    /// Report use of a catalogued dynamic feature.
    pub fn use_feature(&mut self, feature: &DynamicFeature) -> Result<bool, BailoutSignal> {
        self.bailout(&feature.reason(), &feature.options())
    }

    pub fn context(&self) -> &RenderContext {
        &*self.context
    }
}

/// A unit of page output the scheduler can render repeatedly.
pub trait RenderUnit {
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<String, BailoutSignal>;
}

impl<F> RenderUnit for F
where
    F: Fn(&mut RenderScope<'_>) -> Result<String, BailoutSignal>,
{
    fn render(&self, scope: &mut RenderScope<'_>) -> Result<String, BailoutSignal> {
        self(scope)
    }
}

/// How the final output of a route was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Rendered once ahead of any request.
    Static,
    /// Rendered per request after a bailout or by configuration.
    Dynamic,
    /// Static shell with the dynamic part deferred to request time.
    Postponed,
}

/// Result of rendering one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutcome {
    pub mode: RenderMode,
    pub html: String,
    /// Revalidation interval of the final render.
    pub revalidate: Option<u64>,
    /// Reason that aborted the static attempt, if any.
    pub dynamic_usage_description: Option<String>,
    /// Stack captured when the static attempt aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_usage_stack: Option<String>,
    /// Reason the static attempt postponed, if any.
    pub postponed_reason: Option<String>,
}

/// Render `unit` for `route` according to its segment config.
///
/// Static generation is attempted first unless the route is force-dynamic.
/// A dynamic-usage abort or a postpone discards the static output and renders
/// again at request time. A configuration violation is returned as an error
/// and terminates the route; the [`BailoutSignal`] stays reachable through
/// `downcast_ref`.
pub fn render_route<U: RenderUnit + ?Sized>(
    route: &str,
    unit: &U,
    config: &RouteConfig,
    postpone: &dyn Postpone,
) -> Result<RenderOutcome> {
    if config.dynamic == DynamicMode::ForceDynamic {
        debug!(route, "force-dynamic route, skipping static generation");
        return render_request_time(route, unit, config, postpone, RenderMode::Dynamic);
    }

    let mut context = config.render_context(true);
    let attempt = {
        let mut scope = RenderScope::new(&mut context, postpone);
        unit.render(&mut scope)
    };

    match attempt {
        Ok(html) => {
            debug!(route, revalidate = ?context.revalidate, "rendered statically");
            Ok(RenderOutcome {
                mode: RenderMode::Static,
                html,
                revalidate: context.revalidate,
                dynamic_usage_description: None,
                dynamic_usage_stack: None,
                postponed_reason: None,
            })
        }
        Err(BailoutSignal::DynamicUsage { message, .. }) => {
            info!(
                route,
                reason = context.dynamic_usage_description.as_deref().unwrap_or_default(),
                "static generation bailed out, rendering per request"
            );
            debug!(route, %message, "dynamic usage");
            let mut outcome =
                render_request_time(route, unit, config, postpone, RenderMode::Dynamic)?;
            outcome.dynamic_usage_description = context.dynamic_usage_description.take();
            outcome.dynamic_usage_stack = context.dynamic_usage_stack.take();
            Ok(outcome)
        }
        Err(BailoutSignal::Postponed { reason }) => {
            info!(route, %reason, "static generation postponed dynamic content");
            let mut outcome =
                render_request_time(route, unit, config, postpone, RenderMode::Postponed)?;
            outcome.postponed_reason = Some(reason);
            Ok(outcome)
        }
        Err(signal @ BailoutSignal::ConfigurationViolation { .. }) => {
            warn!(route, code = signal.code(), "configuration violation");
            Err(anyhow::Error::new(signal).context(format!("render route {}", route)))
        }
    }
}

fn render_request_time<U: RenderUnit + ?Sized>(
    route: &str,
    unit: &U,
    config: &RouteConfig,
    postpone: &dyn Postpone,
    mode: RenderMode,
) -> Result<RenderOutcome> {
    let mut context = config.render_context(false);
    let html = {
        let mut scope = RenderScope::new(&mut context, postpone);
        unit.render(&mut scope)
    }
    .with_context(|| format!("render route {} per request", route))?;
    debug!(route, ?mode, revalidate = ?context.revalidate, "rendered per request");
    Ok(RenderOutcome {
        mode,
        html,
        revalidate: context.revalidate,
        dynamic_usage_description: None,
        dynamic_usage_stack: None,
        postponed_reason: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postpone::{PostponeUnsupported, SuspendRender};
    use crate::test_support::route_config;

    fn greeting(scope: &mut RenderScope<'_>) -> Result<String, BailoutSignal> {
        if scope.use_feature(&DynamicFeature::Headers)? {
            return Ok("<p>hello, guest</p>".to_string());
        }
        Ok("<p>hello, visitor</p>".to_string())
    }

    #[test]
    fn static_page_without_dynamic_usage_stays_static() {
        let unit = |_: &mut RenderScope<'_>| -> Result<String, BailoutSignal> {
            Ok("<p>about</p>".to_string())
        };
        let config = route_config(DynamicMode::Auto, Some(60));

        let outcome =
            render_route("/about", &unit, &config, &PostponeUnsupported).expect("render");

        assert_eq!(outcome.mode, RenderMode::Static);
        assert_eq!(outcome.html, "<p>about</p>");
        assert_eq!(outcome.revalidate, Some(60));
    }

    #[test]
    fn dynamic_usage_rerenders_per_request() {
        let config = route_config(DynamicMode::Auto, Some(60));

        let outcome =
            render_route("/greet", &greeting, &config, &PostponeUnsupported).expect("render");

        assert_eq!(outcome.mode, RenderMode::Dynamic);
        assert_eq!(outcome.html, "<p>hello, visitor</p>");
        assert_eq!(outcome.revalidate, Some(0));
        assert_eq!(outcome.dynamic_usage_description.as_deref(), Some("headers"));
        assert!(outcome.dynamic_usage_stack.is_some());
    }

    #[test]
    fn force_static_ignores_dynamic_usage() {
        let config = route_config(DynamicMode::ForceStatic, None);

        let outcome =
            render_route("/greet", &greeting, &config, &PostponeUnsupported).expect("render");

        assert_eq!(outcome.mode, RenderMode::Static);
        assert_eq!(outcome.html, "<p>hello, guest</p>");
        assert_eq!(outcome.revalidate, None);
    }

    #[test]
    fn error_mode_fails_with_configuration_violation() {
        let config = route_config(DynamicMode::Error, None);

        let err = render_route("/greet", &greeting, &config, &PostponeUnsupported).unwrap_err();

        let signal = err.downcast_ref::<BailoutSignal>().expect("bailout signal");
        assert!(signal.is_fatal());
        assert!(format!("{:#}", err).contains("render route /greet"));
        assert!(format!("{:#}", err).contains("dynamic = \"error\""));
    }

    #[test]
    fn postpone_defers_dynamic_part() {
        let mut config = route_config(DynamicMode::Auto, None);
        config.experimental.ppr = true;

        let outcome = render_route("/greet", &greeting, &config, &SuspendRender).expect("render");

        assert_eq!(outcome.mode, RenderMode::Postponed);
        assert_eq!(outcome.postponed_reason.as_deref(), Some("headers"));
        assert_eq!(outcome.dynamic_usage_description, None);
        assert_eq!(outcome.html, "<p>hello, visitor</p>");
    }

    #[test]
    fn force_dynamic_skips_static_attempt() {
        let config = route_config(DynamicMode::ForceDynamic, None);

        let outcome =
            render_route("/greet", &greeting, &config, &PostponeUnsupported).expect("render");

        assert_eq!(outcome.mode, RenderMode::Dynamic);
        assert_eq!(outcome.revalidate, Some(0));
        assert_eq!(outcome.dynamic_usage_description, None);
    }
}
