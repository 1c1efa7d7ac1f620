//! Adapters and the cleanup they hand back.

use crate::payload::MountContext;
use std::fmt;

/// The release action returned by a mount. Runs at most once: `run`
/// consumes it.
pub struct Cleanup(Box<dyn FnOnce() + Send>);

impl Cleanup {
    /// Wrap a release action.
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Run the release action.
    pub fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cleanup")
    }
}

/// The implementation registered behind a primitive name.
///
/// `mount` wires listeners onto the payload's element, emits whatever
/// initial state it wants, and returns the cleanup that undoes all of it.
/// Listener registration must happen before the first emission so no
/// observer sees a rendered but unwired island.
///
/// Plain functions and closures with the right signature are adapters too.
pub trait Adapter: Send + Sync {
    /// Mount onto the element described by `ctx.payload`.
    fn mount(&self, ctx: MountContext) -> Option<Cleanup>;
}

impl<F> Adapter for F
where
    F: Fn(MountContext) -> Option<Cleanup> + Send + Sync,
{
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        self(ctx)
    }
}
