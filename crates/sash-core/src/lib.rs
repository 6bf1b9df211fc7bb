#![forbid(unsafe_code)]

//! Shared value types for the sash split-pane engine.
//!
//! This crate holds the primitives the engine crate (`sash-layout`) builds
//! on: normalized/pixel geometry, opaque identifier newtypes with monotonic
//! allocation, and the engine configuration record. Nothing here owns tree
//! state or performs callbacks.

pub mod config;
pub mod geometry;
pub mod id;

pub use config::{Appearance, ContentViewLifecycle, EngineConfig, NewTabPosition};
pub use geometry::{NormRect, PixelRect, Point, Size};
pub use id::{IdAllocator, PaneId, SplitId, TabId};
