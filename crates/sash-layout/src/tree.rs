#![forbid(unsafe_code)]

//! The split-tree model: panes, splits, and structural mutation.
//!
//! The whole layout is one owned [`SplitNode`] — a tagged union of a leaf
//! [`Pane`] or an interior [`Split`] with two boxed children. Nodes are
//! reached by id through recursive traversal; nothing outside the tree holds
//! references into it. Structural mutation happens in place: splitting
//! replaces a leaf with a split whose first child is the original pane, and
//! closing a pane promotes its sibling subtree into the parent slot.

use std::fmt;

use sash_core::{NewTabPosition, PaneId, SplitId, TabId};

use crate::tab::{Tab, TabPatch};

/// Orientation of a split node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Children sit side by side; the divider partitions width.
    Horizontal,
    /// Children are stacked; the divider partitions height.
    Vertical,
}

/// Lowest storable divider position.
pub const DIVIDER_MIN: f64 = 0.1;
/// Highest storable divider position.
pub const DIVIDER_MAX: f64 = 0.9;

/// Clamp a requested divider position into the storable range.
#[must_use]
pub fn clamp_divider(value: f64) -> f64 {
    if value.is_nan() {
        return DIVIDER_MIN;
    }
    value.clamp(DIVIDER_MIN, DIVIDER_MAX)
}

/// A tree leaf: an ordered tab list plus a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    id: PaneId,
    tabs: Vec<Tab>,
    selected: Option<TabId>,
}

impl Pane {
    pub(crate) fn new(id: PaneId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            selected: None,
        }
    }

    /// Detached placeholder, immediately overwritten wherever it is used.
    fn detached() -> Self {
        Self::new(PaneId::MIN)
    }

    /// The pane's id.
    #[must_use]
    pub fn id(&self) -> PaneId {
        self.id
    }

    /// Tabs in display order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// The selected tab, if any. Non-empty panes always have one.
    #[must_use]
    pub fn selected_tab(&self) -> Option<TabId> {
        self.selected
    }

    /// Look up a tab by id.
    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Display-order index of a tab.
    #[must_use]
    pub fn tab_index(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Index of the first pinned tab, or `len` when none is pinned.
    fn first_pinned_index(&self) -> usize {
        self.tabs
            .iter()
            .position(|tab| tab.is_pinned)
            .unwrap_or(self.tabs.len())
    }

    /// Index of the first non-closable pinned anchor, or `len`.
    fn first_anchor_index(&self) -> usize {
        self.tabs
            .iter()
            .position(|tab| tab.is_pinned && !tab.is_closable)
            .unwrap_or(self.tabs.len())
    }

    /// Policy insertion index for a new tab.
    ///
    /// Pinned closable tabs append at the end of the pinned run (before the
    /// non-closable anchors); non-closable pinned tabs anchor at the very
    /// end. Non-pinned tabs follow the configured mode: `Current` lands
    /// right after the selection but never past the first pinned tab, `End`
    /// lands just before the first pinned tab.
    fn insertion_index(&self, tab: &Tab, position: NewTabPosition) -> usize {
        match tab.zone() {
            2 => self.tabs.len(),
            1 => self.first_anchor_index(),
            _ => match position {
                NewTabPosition::Current => match self.selected.and_then(|id| self.tab_index(id)) {
                    Some(selected) => (selected + 1).min(self.first_pinned_index()),
                    None => 0,
                },
                NewTabPosition::End => self.first_pinned_index(),
            },
        }
    }

    /// Insert a freshly created tab by policy and select it.
    pub(crate) fn insert_new_tab(&mut self, tab: Tab, position: NewTabPosition) -> usize {
        let index = self.insertion_index(&tab, position);
        self.selected = Some(tab.id);
        self.tabs.insert(index, tab);
        index
    }

    /// Insert an existing tab near `requested`, clamped into the zone its
    /// flags demand, and select it. Used for tab moves.
    pub(crate) fn insert_tab_at(&mut self, tab: Tab, requested: usize) -> usize {
        let (zone_start, zone_end) = match tab.zone() {
            0 => (0, self.first_pinned_index()),
            1 => (self.first_pinned_index(), self.first_anchor_index()),
            _ => (self.first_anchor_index(), self.tabs.len()),
        };
        let index = requested.clamp(zone_start, zone_end);
        self.selected = Some(tab.id);
        self.tabs.insert(index, tab);
        index
    }

    /// Remove a tab, repairing the selection to a neighbor when the removed
    /// tab was selected.
    pub(crate) fn remove_tab(&mut self, id: TabId) -> Option<Tab> {
        let index = self.tab_index(id)?;
        let tab = self.tabs.remove(index);
        if self.selected == Some(id) {
            self.selected = if self.tabs.is_empty() {
                None
            } else {
                Some(self.tabs[index.min(self.tabs.len() - 1)].id)
            };
        }
        Some(tab)
    }

    /// Take every tab out of the pane, clearing the selection.
    pub(crate) fn clear_tabs(&mut self) -> Vec<Tab> {
        self.selected = None;
        std::mem::take(&mut self.tabs)
    }

    /// Select a tab by id. Returns whether the selection changed.
    pub(crate) fn select(&mut self, id: TabId) -> Option<bool> {
        let _ = self.tab_index(id)?;
        let changed = self.selected != Some(id);
        self.selected = Some(id);
        Some(changed)
    }

    /// Move the selection by `step` positions, wrapping cyclically.
    pub(crate) fn cycle_selection(&mut self, step: isize) -> Option<TabId> {
        if self.tabs.len() < 2 {
            return None;
        }
        let current = self.selected.and_then(|id| self.tab_index(id))? as isize;
        let len = self.tabs.len() as isize;
        let next = (current + step).rem_euclid(len) as usize;
        let id = self.tabs[next].id;
        self.selected = Some(id);
        Some(id)
    }

    /// Apply a partial update. Returns `None` when the tab is not here,
    /// otherwise whether anything actually changed. A pin or closable flag
    /// change relocates the tab into the zone its new flags demand.
    pub(crate) fn apply_patch(&mut self, id: TabId, patch: TabPatch) -> Option<bool> {
        let index = self.tab_index(id)?;
        let mut changed = false;
        {
            let tab = &mut self.tabs[index];
            if let Some(title) = patch.title
                && tab.title != title
            {
                tab.title = title;
                changed = true;
            }
            if let Some(icon) = patch.icon
                && tab.icon != icon
            {
                tab.icon = icon;
                changed = true;
            }
            if let Some(is_dirty) = patch.is_dirty
                && tab.is_dirty != is_dirty
            {
                tab.is_dirty = is_dirty;
                changed = true;
            }
        }
        let old_zone = self.tabs[index].zone();
        {
            let tab = &mut self.tabs[index];
            if let Some(is_closable) = patch.is_closable
                && tab.is_closable != is_closable
            {
                tab.is_closable = is_closable;
                changed = true;
            }
            if let Some(is_pinned) = patch.is_pinned
                && tab.is_pinned != is_pinned
            {
                tab.is_pinned = is_pinned;
                changed = true;
            }
        }
        if self.tabs[index].zone() != old_zone {
            let tab = self.tabs.remove(index);
            let target = match tab.zone() {
                0 => self.first_pinned_index(),
                1 => self.first_anchor_index(),
                _ => self.tabs.len(),
            };
            self.tabs.insert(target, tab);
        }
        Some(changed)
    }

    fn check_invariants(&self) -> Result<(), TreeInvariantViolation> {
        if let Some(selected) = self.selected {
            if self.tab_index(selected).is_none() {
                return Err(TreeInvariantViolation::SelectionMissing {
                    pane: self.id,
                    tab: selected,
                });
            }
        } else if !self.tabs.is_empty() {
            return Err(TreeInvariantViolation::SelectionAbsent { pane: self.id });
        }
        let mut last_zone = 0;
        for tab in &self.tabs {
            let zone = tab.zone();
            if zone < last_zone {
                return Err(TreeInvariantViolation::PinnedOrderBroken {
                    pane: self.id,
                    tab: tab.id,
                });
            }
            last_zone = zone;
        }
        Ok(())
    }
}

/// An interior tree node: orientation, divider, and two owned children.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    id: SplitId,
    orientation: Orientation,
    divider: f64,
    pub(crate) first: Box<SplitNode>,
    pub(crate) second: Box<SplitNode>,
}

impl Split {
    /// The split's id.
    #[must_use]
    pub fn id(&self) -> SplitId {
        self.id
    }

    /// The split's orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The stored divider position, always within `[0.1, 0.9]`.
    #[must_use]
    pub fn divider_position(&self) -> f64 {
        self.divider
    }

    /// Store a divider position, clamping into range. Returns the stored
    /// value.
    pub(crate) fn set_divider_position(&mut self, value: f64) -> f64 {
        self.divider = clamp_divider(value);
        self.divider
    }

    /// First (left/top) child.
    #[must_use]
    pub fn first(&self) -> &SplitNode {
        &self.first
    }

    /// Second (right/bottom) child.
    #[must_use]
    pub fn second(&self) -> &SplitNode {
        &self.second
    }
}

/// A node of the layout tree: a leaf pane or a binary split.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitNode {
    Pane(Pane),
    Split(Split),
}

impl SplitNode {
    /// A tree holding one empty pane.
    pub(crate) fn single_pane(id: PaneId) -> Self {
        SplitNode::Pane(Pane::new(id))
    }

    /// Find a pane by id.
    #[must_use]
    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        match self {
            SplitNode::Pane(pane) => (pane.id == id).then_some(pane),
            SplitNode::Split(split) => split.first.pane(id).or_else(|| split.second.pane(id)),
        }
    }

    pub(crate) fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        match self {
            SplitNode::Pane(pane) => (pane.id == id).then_some(pane),
            SplitNode::Split(split) => {
                let Split { first, second, .. } = split;
                first.pane_mut(id).or_else(|| second.pane_mut(id))
            }
        }
    }

    /// Find a split by id.
    #[must_use]
    pub fn split(&self, id: SplitId) -> Option<&Split> {
        match self {
            SplitNode::Pane(_) => None,
            SplitNode::Split(split) => {
                if split.id == id {
                    Some(split)
                } else {
                    split.first.split(id).or_else(|| split.second.split(id))
                }
            }
        }
    }

    pub(crate) fn split_mut(&mut self, id: SplitId) -> Option<&mut Split> {
        match self {
            SplitNode::Pane(_) => None,
            SplitNode::Split(split) => {
                if split.id == id {
                    Some(split)
                } else {
                    let Split { first, second, .. } = split;
                    first.split_mut(id).or_else(|| second.split_mut(id))
                }
            }
        }
    }

    /// Visit every pane in tree order (first child before second).
    pub fn for_each_pane<'a>(&'a self, visit: &mut dyn FnMut(&'a Pane)) {
        match self {
            SplitNode::Pane(pane) => visit(pane),
            SplitNode::Split(split) => {
                split.first.for_each_pane(visit);
                split.second.for_each_pane(visit);
            }
        }
    }

    /// The first pane in tree order.
    #[must_use]
    pub fn first_pane(&self) -> &Pane {
        match self {
            SplitNode::Pane(pane) => pane,
            SplitNode::Split(split) => split.first.first_pane(),
        }
    }

    /// Pane ids in tree order.
    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.for_each_pane(&mut |pane| ids.push(pane.id));
        ids
    }

    /// Split ids in tree order (parent before children).
    #[must_use]
    pub fn split_ids(&self) -> Vec<SplitId> {
        fn collect(node: &SplitNode, ids: &mut Vec<SplitId>) {
            if let SplitNode::Split(split) = node {
                ids.push(split.id);
                collect(&split.first, ids);
                collect(&split.second, ids);
            }
        }
        let mut ids = Vec::new();
        collect(self, &mut ids);
        ids
    }

    /// Number of panes in the tree. Always at least one.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        match self {
            SplitNode::Pane(_) => 1,
            SplitNode::Split(split) => split.first.pane_count() + split.second.pane_count(),
        }
    }

    /// Whether a pane with this id exists.
    #[must_use]
    pub fn contains_pane(&self, id: PaneId) -> bool {
        self.pane(id).is_some()
    }

    /// Locate the pane owning a tab (linear scan in tree order).
    #[must_use]
    pub fn find_tab(&self, id: TabId) -> Option<PaneId> {
        match self {
            SplitNode::Pane(pane) => pane.tab(id).map(|_| pane.id),
            SplitNode::Split(split) => {
                split.first.find_tab(id).or_else(|| split.second.find_tab(id))
            }
        }
    }

    /// First pane (in tree order) of the sibling subtree of `target`.
    ///
    /// This is the deterministic focus-reassignment choice when `target`
    /// closes. `None` when `target` is the root or absent.
    #[must_use]
    pub(crate) fn sibling_first_pane(&self, target: PaneId) -> Option<PaneId> {
        let SplitNode::Split(split) = self else {
            return None;
        };
        let first_is_target = matches!(&*split.first, SplitNode::Pane(p) if p.id == target);
        if first_is_target {
            return Some(split.second.first_pane().id);
        }
        let second_is_target = matches!(&*split.second, SplitNode::Pane(p) if p.id == target);
        if second_is_target {
            return Some(split.first.first_pane().id);
        }
        split
            .first
            .sibling_first_pane(target)
            .or_else(|| split.second.sibling_first_pane(target))
    }

    /// Replace the leaf `target` in place with a split whose first child is
    /// the original pane (tabs and identity preserved) and whose second
    /// child is a new empty pane. Divider starts at 0.5.
    pub(crate) fn split_leaf(
        &mut self,
        target: PaneId,
        split_id: SplitId,
        new_pane_id: PaneId,
        orientation: Orientation,
    ) -> bool {
        match self {
            SplitNode::Pane(pane) if pane.id == target => {
                let original = Pane {
                    id: pane.id,
                    tabs: std::mem::take(&mut pane.tabs),
                    selected: pane.selected.take(),
                };
                *self = SplitNode::Split(Split {
                    id: split_id,
                    orientation,
                    divider: 0.5,
                    first: Box::new(SplitNode::Pane(original)),
                    second: Box::new(SplitNode::Pane(Pane::new(new_pane_id))),
                });
                true
            }
            SplitNode::Pane(_) => false,
            SplitNode::Split(split) => {
                split.first.split_leaf(target, split_id, new_pane_id, orientation)
                    || split.second.split_leaf(target, split_id, new_pane_id, orientation)
            }
        }
    }

    /// Remove the leaf `target` by promoting its sibling subtree into the
    /// parent slot. The root pane cannot be removed this way.
    pub(crate) fn remove_pane(&mut self, target: PaneId) -> bool {
        let SplitNode::Split(split) = self else {
            return false;
        };

        let doomed_first = matches!(&*split.first, SplitNode::Pane(p) if p.id == target);
        let doomed_second = matches!(&*split.second, SplitNode::Pane(p) if p.id == target);
        if doomed_first || doomed_second {
            let slot = if doomed_first {
                &mut split.second
            } else {
                &mut split.first
            };
            let survivor = std::mem::replace(slot, Box::new(SplitNode::Pane(Pane::detached())));
            *self = *survivor;
            return true;
        }

        split.first.remove_pane(target) || split.second.remove_pane(target)
    }

    /// Check the structural invariants of the whole tree.
    ///
    /// Every pane's selection must resolve into its own tab list, non-empty
    /// panes must have a selection, pinned runs must be contiguous and
    /// trailing, and all divider positions must sit inside the clamp range.
    pub fn validate(&self) -> Result<(), TreeInvariantViolation> {
        match self {
            SplitNode::Pane(pane) => pane.check_invariants(),
            SplitNode::Split(split) => {
                if !(DIVIDER_MIN..=DIVIDER_MAX).contains(&split.divider) {
                    return Err(TreeInvariantViolation::DividerOutOfRange {
                        split: split.id,
                        value: split.divider,
                    });
                }
                split.first.validate()?;
                split.second.validate()
            }
        }
    }
}

/// A structural invariant violation found by [`SplitNode::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeInvariantViolation {
    /// A pane's selection points at a tab it does not own.
    SelectionMissing { pane: PaneId, tab: TabId },
    /// A non-empty pane has no selection.
    SelectionAbsent { pane: PaneId },
    /// A pinned tab precedes a non-pinned one, or an anchor precedes a
    /// closable pinned tab.
    PinnedOrderBroken { pane: PaneId, tab: TabId },
    /// A stored divider position escaped the clamp range.
    DividerOutOfRange { split: SplitId, value: f64 },
}

impl fmt::Display for TreeInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionMissing { pane, tab } => {
                write!(f, "{pane} selects {tab}, which it does not own")
            }
            Self::SelectionAbsent { pane } => {
                write!(f, "{pane} holds tabs but selects nothing")
            }
            Self::PinnedOrderBroken { pane, tab } => {
                write!(f, "{pane} breaks the pinned-run order at {tab}")
            }
            Self::DividerOutOfRange { split, value } => {
                write!(f, "{split} stores divider {value} outside [0.1, 0.9]")
            }
        }
    }
}

impl std::error::Error for TreeInvariantViolation {}
