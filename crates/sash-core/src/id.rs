#![forbid(unsafe_code)]

//! Opaque identifier newtypes and monotonic allocation.
//!
//! All three id kinds wrap a non-zero `u64`; `0` is reserved so ids are
//! always truthy on the wire. Identifiers are allocated monotonically per
//! engine instance and never reused, which keeps them safe to hold across
//! mutations: a stale id simply stops resolving.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Lowest valid id.
            pub const MIN: Self = Self(1);

            /// Create an id, rejecting the reserved value `0`.
            #[must_use]
            pub fn new(raw: u64) -> Option<Self> {
                if raw == 0 { None } else { Some(Self(raw)) }
            }

            /// Get the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Stable identifier for a tab.
    TabId,
    "tab"
);
define_id!(
    /// Stable identifier for a pane (a tree leaf).
    PaneId,
    "pane"
);
define_id!(
    /// Stable identifier for a split (an interior tree node).
    SplitId,
    "split"
);

/// Monotonic id source. Starts at 1 and never hands out the same value
/// twice; saturates at `u64::MAX` rather than wrapping back into the
/// already-issued range.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Create an allocator whose first id follows `highest_in_use`.
    #[must_use]
    pub const fn starting_after(highest_in_use: u64) -> Self {
        Self {
            next: highest_in_use.saturating_add(1),
        }
    }

    /// Hand out the next raw id value.
    pub fn allocate(&mut self) -> u64 {
        let raw = self.next;
        self.next = self.next.saturating_add(1);
        raw
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
