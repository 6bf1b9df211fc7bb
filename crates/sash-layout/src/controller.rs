#![forbid(unsafe_code)]

//! The engine controller.
//!
//! [`PaneEngine`] exclusively owns the split tree and is the only way to
//! mutate it. Every structural operation runs the two-phase delegate
//! protocol (veto → mutate → notify) synchronously on the calling thread,
//! and every operation either applies fully or not at all: a failed
//! precondition or a veto leaves the tree untouched. Stale identifiers are
//! never an error — they degrade to a `false`/`None` no-op.

use std::time::Duration;

use web_time::Instant;

use sash_core::{EngineConfig, IdAllocator, NormRect, PaneId, PixelRect, SplitId, TabId};

use crate::clock::{MonotonicClock, NotificationClock};
use crate::delegate::{ContextMenuItem, EngineDelegate, NoopDelegate};
use crate::layout::{self, LayoutSolution};
use crate::navigate::{self, FocusDirection};
use crate::snapshot::{self, ExternalTreeNode, LayoutSnapshot};
use crate::tab::{Tab, TabPatch, TabSpec};
use crate::tree::{Orientation, SplitNode, TreeInvariantViolation};

/// Minimum interval between geometry notifications.
pub const GEOMETRY_DEBOUNCE: Duration = Duration::from_millis(50);

/// How long an externally pushed geometry update suppresses outgoing
/// notifications, so the change does not echo back to its source.
pub const EXTERNAL_UPDATE_WINDOW: Duration = Duration::from_millis(50);

/// Read-only description of a split node.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplitInfo {
    pub id: SplitId,
    pub orientation: Orientation,
    pub divider_position: f64,
}

/// The split-pane / tab-ownership engine.
///
/// Generic over the delegate (so hosts keep typed access to their sink)
/// and the clock (so tests drive the debounce windows deterministically).
#[derive(Debug)]
pub struct PaneEngine<D = NoopDelegate, C = MonotonicClock> {
    config: EngineConfig,
    delegate: D,
    clock: C,
    root: SplitNode,
    focused: PaneId,
    container_frame: PixelRect,
    tab_ids: IdAllocator,
    pane_ids: IdAllocator,
    split_ids: IdAllocator,
    epoch: Instant,
    last_notification: Option<Instant>,
    external_update_until: Option<Instant>,
}

impl<D: EngineDelegate> PaneEngine<D, MonotonicClock> {
    /// Create an engine holding one empty pane, on the real clock.
    pub fn new(config: EngineConfig, delegate: D) -> Self {
        Self::with_clock(config, delegate, MonotonicClock)
    }
}

impl<D: EngineDelegate, C: NotificationClock> PaneEngine<D, C> {
    /// Create an engine holding one empty pane, on the given clock.
    pub fn with_clock(config: EngineConfig, delegate: D, clock: C) -> Self {
        let first = PaneId::MIN;
        let epoch = clock.now();
        Self {
            config,
            delegate,
            clock,
            root: SplitNode::single_pane(first),
            focused: first,
            container_frame: PixelRect::default(),
            tab_ids: IdAllocator::new(),
            pane_ids: IdAllocator::starting_after(first.get()),
            split_ids: IdAllocator::new(),
            epoch,
            last_notification: None,
            external_update_until: None,
        }
    }

    // ---- Accessors ----

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// The delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Mutable access to the delegate.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// The focused pane. Always resolves to an existing pane.
    #[must_use]
    pub fn focused_pane(&self) -> PaneId {
        self.focused
    }

    /// The pixel rect of the hosting surface.
    #[must_use]
    pub fn container_frame(&self) -> PixelRect {
        self.container_frame
    }

    /// Number of panes in the tree. Always at least one.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.root.pane_count()
    }

    /// Pane ids in tree order.
    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.root.pane_ids()
    }

    /// Split ids in tree order.
    #[must_use]
    pub fn split_ids(&self) -> Vec<SplitId> {
        self.root.split_ids()
    }

    /// Copy of a tab record.
    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<Tab> {
        let pane = self.root.find_tab(id)?;
        self.root.pane(pane)?.tab(id).cloned()
    }

    /// Copies of a pane's tabs in display order.
    #[must_use]
    pub fn tabs_in(&self, pane: PaneId) -> Option<Vec<Tab>> {
        Some(self.root.pane(pane)?.tabs().to_vec())
    }

    /// The selected tab of a pane, if the pane exists and is non-empty.
    #[must_use]
    pub fn selected_tab_in(&self, pane: PaneId) -> Option<TabId> {
        self.root.pane(pane)?.selected_tab()
    }

    /// The pane owning a tab.
    #[must_use]
    pub fn pane_of_tab(&self, id: TabId) -> Option<PaneId> {
        self.root.find_tab(id)
    }

    /// Whether an externally pushed update is currently suppressing
    /// outgoing geometry notifications.
    #[must_use]
    pub fn is_external_update_in_progress(&self) -> bool {
        self.external_update_until
            .is_some_and(|until| self.clock.now() < until)
    }

    /// Check the tree's structural invariants.
    pub fn validate(&self) -> Result<(), TreeInvariantViolation> {
        self.root.validate()
    }

    // ---- Tab mutation ----

    /// Create a tab in `target` (default: the focused pane) and select it.
    ///
    /// Insertion follows the configured policy: pinned tabs append at the
    /// end of the pinned run, non-pinned tabs land after the selection
    /// (`Current`) or before the pinned run (`End`). Returns `None` on a
    /// stale pane id or delegate veto.
    pub fn create_tab(&mut self, spec: TabSpec, target: Option<PaneId>) -> Option<TabId> {
        let pane_id = target.unwrap_or(self.focused);
        if !self.root.contains_pane(pane_id) {
            return None;
        }
        if !self.delegate.should_create_tab(pane_id, &spec) {
            tracing::trace!(pane = %pane_id, "tab creation vetoed");
            return None;
        }
        let id = TabId::new(self.tab_ids.allocate())?;
        let position = self.config.new_tab_position;
        let tab = spec.into_tab(id);
        let index = self.root.pane_mut(pane_id)?.insert_new_tab(tab, position);
        tracing::debug!(pane = %pane_id, tab = %id, index, "created tab");
        if let Some(tab) = self.root.pane(pane_id).and_then(|pane| pane.tab(id)) {
            self.delegate.did_create_tab(pane_id, tab);
        }
        Some(id)
    }

    /// Apply a partial update to a tab. Only supplied fields are touched,
    /// and only when they differ; a pin/closable change relocates the tab
    /// into its new ordering zone. Returns `false` on a stale id.
    pub fn update_tab(&mut self, id: TabId, patch: TabPatch) -> bool {
        let Some(pane_id) = self.root.find_tab(id) else {
            return false;
        };
        let Some(changed) = self
            .root
            .pane_mut(pane_id)
            .and_then(|pane| pane.apply_patch(id, patch))
        else {
            return false;
        };
        if changed {
            tracing::debug!(pane = %pane_id, tab = %id, "updated tab");
        }
        true
    }

    /// Close a tab. When `pane` is given it must own the tab; otherwise the
    /// owning pane is found by linear scan. The delegate may veto; on
    /// success the pane's selection is repaired to a neighbor.
    pub fn close_tab(&mut self, id: TabId, pane: Option<PaneId>) -> bool {
        let pane_id = match pane {
            Some(pane_id) => pane_id,
            None => match self.root.find_tab(id) {
                Some(pane_id) => pane_id,
                None => return false,
            },
        };
        let Some(tab) = self.root.pane(pane_id).and_then(|pane| pane.tab(id)) else {
            return false;
        };
        if !self.delegate.should_close_tab(pane_id, tab) {
            tracing::trace!(pane = %pane_id, tab = %id, "tab close vetoed");
            return false;
        }
        let Some(removed) = self
            .root
            .pane_mut(pane_id)
            .and_then(|pane| pane.remove_tab(id))
        else {
            return false;
        };
        tracing::debug!(pane = %pane_id, tab = %id, "closed tab");
        self.delegate.did_close_tab(pane_id, &removed);
        true
    }

    /// Select a tab, focusing its owning pane.
    pub fn select_tab(&mut self, id: TabId) -> bool {
        let Some(pane_id) = self.root.find_tab(id) else {
            return false;
        };
        let Some(changed) = self
            .root
            .pane_mut(pane_id)
            .and_then(|pane| pane.select(id))
        else {
            return false;
        };
        self.focus_pane_internal(pane_id);
        if changed {
            self.delegate.did_select_tab(pane_id, id);
        }
        true
    }

    /// Select the next tab in the focused pane, wrapping cyclically.
    pub fn select_next_tab(&mut self) -> Option<TabId> {
        self.cycle_tab(1)
    }

    /// Select the previous tab in the focused pane, wrapping cyclically.
    pub fn select_previous_tab(&mut self) -> Option<TabId> {
        self.cycle_tab(-1)
    }

    fn cycle_tab(&mut self, step: isize) -> Option<TabId> {
        let pane_id = self.focused;
        let id = self.root.pane_mut(pane_id)?.cycle_selection(step)?;
        self.delegate.did_select_tab(pane_id, id);
        Some(id)
    }

    /// Move a tab to `index` in `to_pane` (which may be its current pane),
    /// subject to the reorder/cross-pane configuration flags. The index is
    /// clamped into the ordering zone the tab's flags demand. The moved tab
    /// becomes the destination pane's selection.
    pub fn move_tab(&mut self, id: TabId, to_pane: PaneId, index: usize) -> bool {
        let Some(from_pane) = self.root.find_tab(id) else {
            return false;
        };
        if !self.root.contains_pane(to_pane) {
            return false;
        }
        let within_pane = from_pane == to_pane;
        if within_pane && !self.config.allow_tab_reordering {
            return false;
        }
        if !within_pane && !self.config.allow_cross_pane_tab_move {
            return false;
        }
        let Some(tab) = self
            .root
            .pane_mut(from_pane)
            .and_then(|pane| pane.remove_tab(id))
        else {
            return false;
        };
        // The destination was checked above and tab removal cannot change
        // the tree shape, so this lookup always succeeds.
        let Some(dest) = self.root.pane_mut(to_pane) else {
            return false;
        };
        let landed = dest.insert_tab_at(tab, index);
        tracing::debug!(tab = %id, from = %from_pane, to = %to_pane, index = landed, "moved tab");
        self.delegate.did_move_tab(id, from_pane, to_pane, landed);
        true
    }

    // ---- Pane mutation ----

    /// Split a pane in place. The original pane keeps its identity and tabs
    /// as the split's first child; the new pane (optionally seeded with one
    /// tab) is the second child and takes focus. The divider starts at 0.5.
    ///
    /// Requires `allow_splits`; the delegate may veto.
    pub fn split_pane(
        &mut self,
        target: Option<PaneId>,
        orientation: Orientation,
        with_tab: Option<TabSpec>,
    ) -> Option<PaneId> {
        if !self.config.allow_splits {
            return None;
        }
        let pane_id = target.unwrap_or(self.focused);
        if !self.root.contains_pane(pane_id) {
            return None;
        }
        if !self.delegate.should_split_pane(pane_id, orientation) {
            tracing::trace!(pane = %pane_id, "pane split vetoed");
            return None;
        }
        let split_id = SplitId::new(self.split_ids.allocate())?;
        let new_pane_id = PaneId::new(self.pane_ids.allocate())?;
        if !self.root.split_leaf(pane_id, split_id, new_pane_id, orientation) {
            return None;
        }
        tracing::debug!(
            pane = %pane_id,
            new_pane = %new_pane_id,
            split = %split_id,
            ?orientation,
            "split pane"
        );
        if let Some(spec) = with_tab
            && let Some(tab_id) = TabId::new(self.tab_ids.allocate())
        {
            let position = self.config.new_tab_position;
            let tab = spec.into_tab(tab_id);
            if let Some(pane) = self.root.pane_mut(new_pane_id) {
                let _ = pane.insert_new_tab(tab, position);
            }
            if let Some(tab) = self.root.pane(new_pane_id).and_then(|pane| pane.tab(tab_id)) {
                self.delegate.did_create_tab(new_pane_id, tab);
            }
        }
        self.focus_pane_internal(new_pane_id);
        self.delegate.did_split_pane(pane_id, new_pane_id, orientation);
        let _ = self.notify_geometry_change(false);
        Some(new_pane_id)
    }

    /// Close a pane; its parent split collapses and the sibling subtree is
    /// promoted. Focus moves to the sibling subtree's first pane when the
    /// focused pane goes away. Closing the last pane is refused unless
    /// configured, and even then the tree keeps one (emptied) pane.
    pub fn close_pane(&mut self, id: PaneId) -> bool {
        if !self.root.contains_pane(id) {
            return false;
        }
        let last = self.root.pane_count() == 1;
        if last && !self.config.allow_close_last_pane {
            return false;
        }
        if !self.delegate.should_close_pane(id) {
            tracing::trace!(pane = %id, "pane close vetoed");
            return false;
        }
        if last {
            // The tree never goes empty: the pane object survives, its
            // tabs do not.
            if let Some(pane) = self.root.pane_mut(id) {
                let _ = pane.clear_tabs();
            }
            tracing::debug!(pane = %id, "closed last pane, kept empty");
            self.delegate.did_close_pane(id);
            return true;
        }
        let fallback = self.root.sibling_first_pane(id);
        if !self.root.remove_pane(id) {
            return false;
        }
        if !self.root.contains_pane(self.focused) {
            let next = fallback
                .filter(|pane| self.root.contains_pane(*pane))
                .unwrap_or_else(|| self.root.first_pane().id());
            self.focused = next;
            self.delegate.did_focus_pane(next);
        }
        tracing::debug!(pane = %id, "closed pane");
        self.delegate.did_close_pane(id);
        let _ = self.notify_geometry_change(false);
        true
    }

    /// Focus a pane. Re-focusing the already focused pane succeeds without
    /// a notification.
    pub fn focus_pane(&mut self, id: PaneId) -> bool {
        if !self.root.contains_pane(id) {
            return false;
        }
        self.focus_pane_internal(id);
        true
    }

    fn focus_pane_internal(&mut self, id: PaneId) {
        if self.focused != id {
            self.focused = id;
            self.delegate.did_focus_pane(id);
        }
    }

    /// Move focus to the pane geometrically adjacent in `direction`.
    /// No-op (returns `false`) when nothing lies that way.
    pub fn navigate_focus(&mut self, direction: FocusDirection) -> bool {
        let layout = layout::solve(&self.root, NormRect::UNIT);
        let Some(next) = navigate::adjacent_pane(&layout, self.focused, direction) else {
            return false;
        };
        self.focus_pane_internal(next);
        true
    }

    // ---- Geometry ----

    /// Normalized bounds of every pane.
    #[must_use]
    pub fn pane_layout(&self) -> LayoutSolution {
        layout::solve(&self.root, NormRect::UNIT)
    }

    /// Store a divider position, clamped to `[0.1, 0.9]`.
    ///
    /// `from_external` marks the change as pushed in from an external
    /// mirror: the engine suppresses its own geometry notifications for a
    /// short window so the change does not echo back.
    pub fn set_divider_position(&mut self, split: SplitId, value: f64, from_external: bool) -> bool {
        let Some(node) = self.root.split_mut(split) else {
            return false;
        };
        let old = node.divider_position();
        let stored = node.set_divider_position(value);
        if from_external {
            self.external_update_until = Some(self.clock.now() + EXTERNAL_UPDATE_WINDOW);
        }
        if (stored - old).abs() > f64::EPSILON {
            tracing::debug!(split = %split, position = stored, "moved divider");
            let _ = self.notify_geometry_change(false);
        }
        true
    }

    /// Set the pixel rect of the hosting surface.
    pub fn set_container_frame(&mut self, frame: PixelRect) {
        if self.container_frame != frame {
            self.container_frame = frame;
            let _ = self.notify_geometry_change(false);
        }
    }

    /// Emit a geometry snapshot to the delegate, unless suppressed.
    ///
    /// Suppression, in order: an external update window is open; the change
    /// comes from an active drag and the delegate has not opted in; less
    /// than [`GEOMETRY_DEBOUNCE`] has elapsed since the last notification.
    /// Returns whether a notification was emitted.
    pub fn notify_geometry_change(&mut self, is_dragging: bool) -> bool {
        let now = self.clock.now();
        if let Some(until) = self.external_update_until {
            if now < until {
                tracing::trace!("geometry notification suppressed by external update");
                return false;
            }
            self.external_update_until = None;
        }
        if is_dragging && !self.delegate.should_notify_during_drag() {
            return false;
        }
        if let Some(last) = self.last_notification
            && now.duration_since(last) < GEOMETRY_DEBOUNCE
        {
            tracing::trace!("geometry notification debounced");
            return false;
        }
        self.last_notification = Some(now);
        let snapshot = self.layout_snapshot();
        self.delegate.did_change_geometry(&snapshot);
        true
    }

    // ---- Queries / export ----

    /// Pixel-mapped projection of the current layout.
    #[must_use]
    pub fn layout_snapshot(&self) -> LayoutSnapshot {
        let layout = layout::solve(&self.root, NormRect::UNIT);
        snapshot::build_layout_snapshot(
            &self.root,
            &layout,
            self.container_frame,
            self.focused,
            self.timestamp_ms(),
        )
    }

    /// Recursive mirror of the tree with string ids and pixel frames.
    #[must_use]
    pub fn tree_snapshot(&self) -> ExternalTreeNode {
        snapshot::build_external_tree(&self.root, NormRect::UNIT, self.container_frame)
    }

    /// Describe a split node.
    #[must_use]
    pub fn find_split(&self, id: SplitId) -> Option<SplitInfo> {
        let split = self.root.split(id)?;
        Some(SplitInfo {
            id: split.id(),
            orientation: split.orientation(),
            divider_position: split.divider_position(),
        })
    }

    /// Forward a tab-bar double-click gesture the engine does not
    /// interpret itself.
    pub fn handle_tab_bar_double_click(&mut self, pane: PaneId) -> bool {
        if !self.root.contains_pane(pane) {
            return false;
        }
        self.delegate.did_double_click_tab_bar(pane);
        true
    }

    /// Context menu entries for a tab, queried from the delegate.
    pub fn context_menu_for_tab(&mut self, id: TabId) -> Vec<ContextMenuItem> {
        let Some(pane_id) = self.root.find_tab(id) else {
            return Vec::new();
        };
        let Some(tab) = self.root.pane(pane_id).and_then(|pane| pane.tab(id)) else {
            return Vec::new();
        };
        self.delegate.context_menu_items(tab)
    }

    fn timestamp_ms(&self) -> u64 {
        self.clock.now().duration_since(self.epoch).as_millis() as u64
    }
}
