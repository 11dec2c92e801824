//! Stable exit codes for bailout CLI commands.

/// Command succeeded; `check` allowed the dynamic usage or forced static output.
pub const OK: i32 = 0;
/// Command failed due to invalid arguments, config, or other errors.
pub const INVALID: i32 = 1;
/// `bailout check` hit a configuration violation (terminates a build).
pub const VIOLATION: i32 = 2;
/// `bailout check` bailed out of static generation (dynamic usage or postpone).
pub const BAILOUT: i32 = 3;
