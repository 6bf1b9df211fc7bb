#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Supplied at controller construction and mutable thereafter. The engine
//! enforces the permission flags and the new-tab insertion mode itself;
//! [`ContentViewLifecycle`] and [`Appearance`] are policy knobs surfaced to
//! rendering collaborators without being interpreted here.

use serde::{Deserialize, Serialize};

/// Where a newly created non-pinned tab lands in its pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewTabPosition {
    /// Immediately after the currently selected tab (never past the first
    /// pinned tab).
    #[default]
    Current,
    /// Just before the first pinned tab, or at the very end if none.
    End,
}

/// Whether inactive pane content views are kept alive or torn down.
///
/// The engine exposes this policy; hosting collaborators implement it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentViewLifecycle {
    /// Keep inactive content views alive.
    #[default]
    Retain,
    /// Tear down inactive content views and rebuild on activation.
    TearDown,
}

/// Appearance knobs consumed by tab-bar rendering collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Tab bar height in pixels.
    pub tab_bar_height: f64,
    /// Minimum rendered tab width in pixels.
    pub tab_min_width: f64,
    /// Maximum rendered tab width in pixels.
    pub tab_max_width: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            tab_bar_height: 28.0,
            tab_min_width: 100.0,
            tab_max_width: 220.0,
        }
    }
}

/// Engine configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Allow panes to be split.
    #[serde(default = "default_true")]
    pub allow_splits: bool,
    /// Allow closing the last remaining pane (the tree still retains one
    /// empty pane).
    #[serde(default)]
    pub allow_close_last_pane: bool,
    /// Allow reordering tabs within a pane.
    #[serde(default = "default_true")]
    pub allow_tab_reordering: bool,
    /// Allow moving tabs between panes.
    #[serde(default = "default_true")]
    pub allow_cross_pane_tab_move: bool,
    /// Insertion mode for newly created non-pinned tabs.
    #[serde(default)]
    pub new_tab_position: NewTabPosition,
    /// Lifecycle policy for inactive pane content.
    #[serde(default)]
    pub content_view_lifecycle: ContentViewLifecycle,
    /// Appearance knobs for rendering collaborators.
    #[serde(default)]
    pub appearance: Appearance,
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_splits: true,
            allow_close_last_pane: false,
            allow_tab_reordering: true,
            allow_cross_pane_tab_move: true,
            new_tab_position: NewTabPosition::Current,
            content_view_lifecycle: ContentViewLifecycle::Retain,
            appearance: Appearance::default(),
        }
    }
}

impl EngineConfig {
    /// Set whether splitting is allowed.
    #[must_use]
    pub fn with_allow_splits(mut self, allow: bool) -> Self {
        self.allow_splits = allow;
        self
    }

    /// Set whether closing the last pane is allowed.
    #[must_use]
    pub fn with_allow_close_last_pane(mut self, allow: bool) -> Self {
        self.allow_close_last_pane = allow;
        self
    }

    /// Set whether in-pane tab reordering is allowed.
    #[must_use]
    pub fn with_allow_tab_reordering(mut self, allow: bool) -> Self {
        self.allow_tab_reordering = allow;
        self
    }

    /// Set whether cross-pane tab moves are allowed.
    #[must_use]
    pub fn with_allow_cross_pane_tab_move(mut self, allow: bool) -> Self {
        self.allow_cross_pane_tab_move = allow;
        self
    }

    /// Set the new-tab insertion mode.
    #[must_use]
    pub fn with_new_tab_position(mut self, position: NewTabPosition) -> Self {
        self.new_tab_position = position;
        self
    }

    /// Set the content view lifecycle policy.
    #[must_use]
    pub fn with_content_view_lifecycle(mut self, lifecycle: ContentViewLifecycle) -> Self {
        self.content_view_lifecycle = lifecycle;
        self
    }
}
