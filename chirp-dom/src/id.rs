//! Process-unique numeric handles for elements, listeners, and timers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Typed handles keep element, listener, and timer ids from being mixed up.
/// Each type draws from its own monotonically increasing counter, so a
/// handle is never reused within a process.
macro_rules! counter_id {
    ($name:ident, $counter:ident, $prefix:expr, $doc:expr) => {
        static $counter: AtomicU64 = AtomicU64::new(1);

        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
        pub struct $name(u64);

        impl $name {
            /// Allocate the next unused id.
            pub fn next() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }

            /// The raw numeric value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }
    };
}

counter_id!(
    ElementId,
    NEXT_ELEMENT,
    "el",
    "Stable identity of an element, assigned once at creation."
);
counter_id!(
    ListenerId,
    NEXT_LISTENER,
    "listener",
    "Handle returned by `add_event_listener`, used to remove the listener."
);
counter_id!(
    TimerId,
    NEXT_TIMER,
    "timer",
    "Handle returned by `set_timeout` / `set_interval`."
);
