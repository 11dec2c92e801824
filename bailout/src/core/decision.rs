//! Decide how a render reacts to a dynamic feature.

use std::backtrace::Backtrace;

use crate::core::message::format_error_message;
use crate::core::types::{BailoutOptions, RenderContext};
use crate::postpone::{Postpone, Suspension};
use crate::signal::BailoutSignal;

/// Link attached to every dynamic-usage abort.
pub const DYNAMIC_SERVER_ERROR_LINK: &str = "https://nextjs.org/docs/messages/dynamic-server-error";

/// Mode named in configuration violations when the caller supplies none.
const DEFAULT_VIOLATION_MODE: &str = "error";

/// Decide what happens when the current render uses the dynamic feature `reason`.
///
/// Precedence, first match wins:
/// - no context: `Ok(false)`, nothing to protect.
/// - `force_static`: `Ok(true)`, dynamic usage is ignored and nothing is touched.
/// - `dynamic_should_error`: [`BailoutSignal::ConfigurationViolation`].
/// - static generation with postpone support: ask `postpone`; a suspension
///   returns [`BailoutSignal::Postponed`] before anything is mutated.
/// - otherwise `revalidate` drops to `0`, and during static generation the
///   reason and a stack are stamped on the context before returning
///   [`BailoutSignal::DynamicUsage`].
/// - outside static generation: `Ok(false)`.
///
/// Callers must propagate any `Err` with `?`.
pub fn static_generation_bailout<P: Postpone + ?Sized>(
    context: Option<&mut RenderContext>,
    reason: &str,
    opts: &BailoutOptions,
    postpone: &P,
) -> Result<bool, BailoutSignal> {
    let Some(context) = context else {
        return Ok(false);
    };

    if context.force_static {
        return Ok(true);
    }

    if context.dynamic_should_error {
        let dynamic = opts.dynamic.as_deref().unwrap_or(DEFAULT_VIOLATION_MODE);
        return Err(BailoutSignal::ConfigurationViolation {
            message: format_error_message(reason, Some(dynamic), opts.link.as_deref()),
        });
    }

    if context.is_static_generation
        && context.use_unstable_postpone
        && postpone.postpone(reason) == Suspension::Suspended
    {
        return Err(BailoutSignal::Postponed {
            reason: reason.to_string(),
        });
    }

    context.revalidate = Some(0);

    if context.is_static_generation {
        let link = opts.link.as_deref().unwrap_or(DYNAMIC_SERVER_ERROR_LINK);
        let message = format_error_message(reason, opts.dynamic.as_deref(), Some(link));
        let stack = capture_stack(&message);
        context.dynamic_usage_description = Some(reason.to_string());
        context.dynamic_usage_stack = Some(stack.clone());
        return Err(BailoutSignal::DynamicUsage { message, stack });
    }

    Ok(false)
}

/// Stack text in the `<message>\n<frames>` shape renderers print for aborts.
fn capture_stack(message: &str) -> String {
    format!("Error: {}\n{}", message, Backtrace::force_capture())
}
