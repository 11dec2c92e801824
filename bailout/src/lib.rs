//! Static-generation bailout decisions for page rendering.
//!
//! When code being rendered touches a dynamic feature (request headers,
//! cookies, search params, uncached fetches), the renderer has to decide
//! whether to carry on, ignore it, postpone the dynamic part, or abandon the
//! static attempt. The crate keeps a strict split:
//!
//! - **[`core`]**: Pure, deterministic decision logic and message formatting.
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Route configuration loaded from disk.
//!
//! Orchestration modules ([`render`], [`check`]) drive the decision from a
//! render scheduler and from the CLI. [`signal`] and [`postpone`] define the
//! non-local exits and the suspension primitive the decision talks to.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod postpone;
pub mod render;
pub mod signal;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
