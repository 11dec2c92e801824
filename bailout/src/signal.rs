//! Non-local exits raised by the bailout decision.

use thiserror::Error;

/// Code carried by [`BailoutSignal::ConfigurationViolation`].
pub const STATIC_GEN_BAILOUT_CODE: &str = "NEXT_STATIC_GEN_BAILOUT";
/// Code carried by [`BailoutSignal::DynamicUsage`].
pub const DYNAMIC_SERVER_USAGE_CODE: &str = "DYNAMIC_SERVER_USAGE";
/// Code carried by [`BailoutSignal::Postponed`].
pub const POSTPONE_CODE: &str = "NEXT_POSTPONE";

/// A decision that must unwind the render call stack.
///
/// Render code propagates these with `?`; only the render scheduler inspects
/// them. `DynamicUsage` and `Postponed` are ordinary control flow for the
/// scheduler, `ConfigurationViolation` terminates the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BailoutSignal {
    /// Dynamic usage from a route configured to forbid it.
    #[error("{message}")]
    ConfigurationViolation { message: String },
    /// Dynamic usage during static generation; re-render per request.
    #[error("{message}")]
    DynamicUsage { message: String, stack: String },
    /// The renderer suspended the dynamic part until request time.
    #[error("rendering postponed because it used `{reason}`")]
    Postponed { reason: String },
}

impl BailoutSignal {
    /// Stable discriminator for renderers and build reporters.
    pub fn code(&self) -> &'static str {
        match self {
            BailoutSignal::ConfigurationViolation { .. } => STATIC_GEN_BAILOUT_CODE,
            BailoutSignal::DynamicUsage { .. } => DYNAMIC_SERVER_USAGE_CODE,
            BailoutSignal::Postponed { .. } => POSTPONE_CODE,
        }
    }

    /// True when the build must stop instead of retrying dynamically.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BailoutSignal::ConfigurationViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_variant() {
        let violation = BailoutSignal::ConfigurationViolation {
            message: "m".to_string(),
        };
        let usage = BailoutSignal::DynamicUsage {
            message: "m".to_string(),
            stack: "s".to_string(),
        };
        let postponed = BailoutSignal::Postponed {
            reason: "headers".to_string(),
        };
        assert_eq!(violation.code(), STATIC_GEN_BAILOUT_CODE);
        assert_eq!(usage.code(), DYNAMIC_SERVER_USAGE_CODE);
        assert_eq!(postponed.code(), POSTPONE_CODE);
    }

    #[test]
    fn only_configuration_violation_is_fatal() {
        assert!(
            BailoutSignal::ConfigurationViolation {
                message: String::new()
            }
            .is_fatal()
        );
        assert!(
            !BailoutSignal::DynamicUsage {
                message: String::new(),
                stack: String::new()
            }
            .is_fatal()
        );
        assert!(
            !BailoutSignal::Postponed {
                reason: String::new()
            }
            .is_fatal()
        );
    }

    #[test]
    fn display_is_the_message() {
        let usage = BailoutSignal::DynamicUsage {
            message: "Page couldn't be rendered statically".to_string(),
            stack: "trace".to_string(),
        };
        assert_eq!(usage.to_string(), "Page couldn't be rendered statically");
    }
}
