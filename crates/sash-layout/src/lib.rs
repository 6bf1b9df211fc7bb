#![forbid(unsafe_code)]

//! Recursive split-pane layout with policy-governed tab ownership.
//!
//! The tree alternates [`tree::Pane`] leaves (ordered tab lists with a
//! selection) and binary [`tree::Split`] nodes (orientation plus a clamped
//! divider fraction). A [`PaneEngine`] exclusively owns one such tree and
//! exposes every mutation as a synchronous operation running the two-phase
//! delegate protocol; consumers observe the result through snapshots, never
//! through live node references.

pub mod clock;
pub mod controller;
pub mod delegate;
pub mod layout;
pub mod navigate;
pub mod snapshot;
pub mod tab;
pub mod tree;

pub use clock::{ManualClock, MonotonicClock, NotificationClock};
pub use controller::{PaneEngine, SplitInfo, EXTERNAL_UPDATE_WINDOW, GEOMETRY_DEBOUNCE};
pub use delegate::{ContextMenuItem, EngineDelegate, NoopDelegate};
pub use layout::{solve, LayoutSolution};
pub use navigate::FocusDirection;
pub use snapshot::{ExternalTab, ExternalTreeNode, LayoutSnapshot, PaneGeometry};
pub use tab::{Tab, TabPatch, TabSpec};
pub use tree::{Orientation, TreeInvariantViolation, DIVIDER_MAX, DIVIDER_MIN};
