#![forbid(unsafe_code)]

//! On-demand geometry derivation.
//!
//! The tree carries no pixel data. [`solve`] partitions the normalized
//! `[0,1]×[0,1]` region recursively along each split's orientation and
//! divider, producing one [`NormRect`] per leaf pane. Pixel mapping is a
//! separate pure transform applied at the snapshot boundary.

use std::collections::BTreeMap;

use sash_core::{NormRect, PaneId};

use crate::tree::{Orientation, SplitNode};

/// The normalized rectangle of every leaf pane, keyed by pane id.
///
/// Leaf regions exactly tile the root region: no gaps, no overlap, up to
/// floating-point tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSolution {
    region: NormRect,
    rects: BTreeMap<PaneId, NormRect>,
}

impl LayoutSolution {
    /// The region the tree was solved against.
    #[must_use]
    pub fn region(&self) -> NormRect {
        self.region
    }

    /// The solved rectangle of a pane.
    #[must_use]
    pub fn rect(&self, pane: PaneId) -> Option<NormRect> {
        self.rects.get(&pane).copied()
    }

    /// Iterate solved rectangles in pane-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PaneId, NormRect)> + '_ {
        self.rects.iter().map(|(id, rect)| (*id, *rect))
    }

    /// Number of solved panes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether the solution is empty. Never true for a real tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Derive the bounds of every pane within `region`.
#[must_use]
pub fn solve(root: &SplitNode, region: NormRect) -> LayoutSolution {
    let mut rects = BTreeMap::new();
    solve_node(root, region, &mut rects);
    LayoutSolution { region, rects }
}

fn solve_node(node: &SplitNode, region: NormRect, rects: &mut BTreeMap<PaneId, NormRect>) {
    match node {
        SplitNode::Pane(pane) => {
            let _ = rects.insert(pane.id(), region);
        }
        SplitNode::Split(split) => {
            let (first, second) = match split.orientation() {
                Orientation::Horizontal => region.split_horizontal(split.divider_position()),
                Orientation::Vertical => region.split_vertical(split.divider_position()),
            };
            solve_node(split.first(), first, rects);
            solve_node(split.second(), second, rects);
        }
    }
}
