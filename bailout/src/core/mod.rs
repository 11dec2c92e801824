//! Deterministic, pure logic for bailout decisions.
//!
//! Core modules must be free of I/O side effects. They operate on the render
//! context handed to them and return deterministic outputs suitable for tests.

pub mod decision;
pub mod features;
pub mod message;
pub mod types;
