//! I/O helpers for bailout commands.

pub mod config;
