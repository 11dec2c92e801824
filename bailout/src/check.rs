//! Evaluate a single bailout decision against a route config.

use serde::Serialize;
use tracing::debug;

use crate::core::decision::static_generation_bailout;
use crate::core::types::BailoutOptions;
use crate::exit_codes;
use crate::io::config::RouteConfig;
use crate::postpone::SuspendRender;
use crate::signal::BailoutSignal;

/// One simulated use of a dynamic feature.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub reason: String,
    pub opts: BailoutOptions,
    /// Evaluate during static generation (`true`) or at request time.
    pub static_generation: bool,
}

/// What the decision did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Dynamic usage is fine; render continues.
    Allowed,
    /// Route is forced static; dynamic usage ignored.
    ForcedStatic,
    /// Route forbids dynamic usage.
    ConfigurationViolation,
    /// Static generation abandoned; render per request.
    DynamicUsage,
    /// Dynamic part deferred to request time.
    Postponed,
}

/// JSON report printed by `bailout check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub outcome: CheckOutcome,
    pub code: Option<&'static str>,
    pub message: Option<String>,
    pub revalidate: Option<u64>,
    pub dynamic_usage_description: Option<String>,
}

impl CheckReport {
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            CheckOutcome::Allowed | CheckOutcome::ForcedStatic => exit_codes::OK,
            CheckOutcome::ConfigurationViolation => exit_codes::VIOLATION,
            CheckOutcome::DynamicUsage | CheckOutcome::Postponed => exit_codes::BAILOUT,
        }
    }
}

/// Run the bailout decision for `request` on a fresh context built from `cfg`.
///
/// Postponing is honoured whenever the route enables it.
pub fn run_check(cfg: &RouteConfig, request: &CheckRequest) -> CheckReport {
    let mut context = cfg.render_context(request.static_generation);
    let decision = static_generation_bailout(
        Some(&mut context),
        &request.reason,
        &request.opts,
        &SuspendRender,
    );
    debug!(reason = %request.reason, ?decision, "bailout decision");

    let (outcome, code, message) = match decision {
        Ok(true) => (CheckOutcome::ForcedStatic, None, None),
        Ok(false) => (CheckOutcome::Allowed, None, None),
        Err(signal) => {
            let outcome = match signal {
                BailoutSignal::ConfigurationViolation { .. } => {
                    CheckOutcome::ConfigurationViolation
                }
                BailoutSignal::DynamicUsage { .. } => CheckOutcome::DynamicUsage,
                BailoutSignal::Postponed { .. } => CheckOutcome::Postponed,
            };
            (outcome, Some(signal.code()), Some(signal.to_string()))
        }
    };

    CheckReport {
        outcome,
        code,
        message,
        revalidate: context.revalidate,
        dynamic_usage_description: context.dynamic_usage_description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DynamicMode;
    use crate::signal::{DYNAMIC_SERVER_USAGE_CODE, STATIC_GEN_BAILOUT_CODE};
    use crate::test_support::route_config;

    fn request(reason: &str, static_generation: bool) -> CheckRequest {
        CheckRequest {
            reason: reason.to_string(),
            opts: BailoutOptions::default(),
            static_generation,
        }
    }

    #[test]
    fn auto_route_bails_out_during_static_generation() {
        let report = run_check(
            &route_config(DynamicMode::Auto, Some(60)),
            &request("headers", true),
        );
        assert_eq!(report.outcome, CheckOutcome::DynamicUsage);
        assert_eq!(report.code, Some(DYNAMIC_SERVER_USAGE_CODE));
        assert_eq!(report.revalidate, Some(0));
        assert_eq!(report.dynamic_usage_description.as_deref(), Some("headers"));
        assert_eq!(report.exit_code(), exit_codes::BAILOUT);
    }

    #[test]
    fn auto_route_allows_request_time_usage() {
        let report = run_check(
            &route_config(DynamicMode::Auto, Some(60)),
            &request("cookies", false),
        );
        assert_eq!(report.outcome, CheckOutcome::Allowed);
        assert_eq!(report.revalidate, Some(0));
        assert_eq!(report.message, None);
        assert_eq!(report.exit_code(), exit_codes::OK);
    }

    #[test]
    fn error_route_reports_violation() {
        let report = run_check(
            &route_config(DynamicMode::Error, None),
            &request("headers", true),
        );
        assert_eq!(report.outcome, CheckOutcome::ConfigurationViolation);
        assert_eq!(report.code, Some(STATIC_GEN_BAILOUT_CODE));
        assert!(
            report
                .message
                .as_deref()
                .is_some_and(|message| message.contains("dynamic = \"error\""))
        );
        assert_eq!(report.exit_code(), exit_codes::VIOLATION);
    }

    #[test]
    fn force_static_route_keeps_revalidate() {
        let report = run_check(
            &route_config(DynamicMode::ForceStatic, Some(600)),
            &request("headers", true),
        );
        assert_eq!(report.outcome, CheckOutcome::ForcedStatic);
        assert_eq!(report.revalidate, Some(600));
    }

    #[test]
    fn ppr_route_postpones() {
        let mut cfg = route_config(DynamicMode::Auto, None);
        cfg.experimental.ppr = true;
        let report = run_check(&cfg, &request("headers", true));
        assert_eq!(report.outcome, CheckOutcome::Postponed);
        assert_eq!(report.revalidate, None);
        assert_eq!(report.exit_code(), exit_codes::BAILOUT);
    }
}
