//! The renderer's suspension primitive.

/// What happened when the renderer was asked to postpone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// Control transfers to the scheduler; the caller must not continue.
    Suspended,
    /// The renderer build cannot postpone; the caller continues.
    Unsupported,
}

/// Defers the dynamic part of a render until request time.
pub trait Postpone {
    fn postpone(&self, reason: &str) -> Suspension;
}

/// Renderer that always honours a postpone request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspendRender;

impl Postpone for SuspendRender {
    fn postpone(&self, _reason: &str) -> Suspension {
        Suspension::Suspended
    }
}

/// Renderer build without postpone support.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostponeUnsupported;

impl Postpone for PostponeUnsupported {
    fn postpone(&self, _reason: &str) -> Suspension {
        Suspension::Unsupported
    }
}
