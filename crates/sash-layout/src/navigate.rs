#![forbid(unsafe_code)]

//! Directional focus navigation over solved pane geometry.
//!
//! Navigation is purely geometric: candidates are the panes lying strictly
//! in the requested direction of the source pane's bounds. The nearest
//! candidate along the travel axis wins; ties are broken by the greatest
//! edge overlap with the source on the perpendicular axis.

use sash_core::{NormRect, PaneId};

use crate::layout::LayoutSolution;

const EPS: f64 = 1e-9;

/// A direction for focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Distance from `source` to `candidate` along the travel axis, or `None`
/// when the candidate does not lie in that direction.
fn travel_distance(direction: FocusDirection, source: NormRect, candidate: NormRect) -> Option<f64> {
    let gap = match direction {
        FocusDirection::Left => source.x - candidate.right(),
        FocusDirection::Right => candidate.x - source.right(),
        FocusDirection::Up => source.y - candidate.bottom(),
        FocusDirection::Down => candidate.y - source.bottom(),
    };
    (gap >= -EPS).then_some(gap.max(0.0))
}

/// Edge overlap between `source` and `candidate` on the perpendicular axis.
fn perpendicular_overlap(
    direction: FocusDirection,
    source: NormRect,
    candidate: NormRect,
) -> f64 {
    match direction {
        FocusDirection::Left | FocusDirection::Right => {
            NormRect::overlap(source.y, source.bottom(), candidate.y, candidate.bottom())
        }
        FocusDirection::Up | FocusDirection::Down => {
            NormRect::overlap(source.x, source.right(), candidate.x, candidate.right())
        }
    }
}

/// Find the pane geometrically adjacent to `from` in `direction`.
///
/// Returns `None` when no pane lies that way — including the degenerate
/// single-pane tree.
#[must_use]
pub fn adjacent_pane(
    layout: &LayoutSolution,
    from: PaneId,
    direction: FocusDirection,
) -> Option<PaneId> {
    let source = layout.rect(from)?;
    let mut best: Option<(PaneId, f64, f64)> = None;

    for (id, rect) in layout.iter() {
        if id == from {
            continue;
        }
        let Some(distance) = travel_distance(direction, source, rect) else {
            continue;
        };
        let overlap = perpendicular_overlap(direction, source, rect);
        let better = match best {
            None => true,
            Some((_, best_distance, best_overlap)) => {
                if distance + EPS < best_distance {
                    true
                } else if distance < best_distance + EPS {
                    overlap > best_overlap + EPS
                } else {
                    false
                }
            }
        };
        if better {
            best = Some((id, distance, overlap));
        }
    }

    best.map(|(id, _, _)| id)
}

#[cfg(test)]
mod tests {
    use super::{adjacent_pane, FocusDirection};
    use crate::layout::solve;
    use crate::tree::{Orientation, SplitNode};
    use sash_core::{NormRect, PaneId, SplitId};

    fn pid(raw: u64) -> PaneId {
        PaneId::new(raw).unwrap()
    }

    fn sid(raw: u64) -> SplitId {
        SplitId::new(raw).unwrap()
    }

    /// Build a 2×2 grid:
    /// ```text
    /// ┌───┬───┐
    /// │ 1 │ 2 │
    /// ├───┼───┤
    /// │ 3 │ 4 │
    /// └───┴───┘
    /// ```
    fn grid() -> SplitNode {
        let mut root = SplitNode::single_pane(pid(1));
        assert!(root.split_leaf(pid(1), sid(1), pid(3), Orientation::Vertical));
        assert!(root.split_leaf(pid(1), sid(2), pid(2), Orientation::Horizontal));
        assert!(root.split_leaf(pid(3), sid(3), pid(4), Orientation::Horizontal));
        root
    }

    #[test]
    fn grid_navigation_in_all_directions() {
        let layout = solve(&grid(), NormRect::UNIT);
        assert_eq!(adjacent_pane(&layout, pid(1), FocusDirection::Right), Some(pid(2)));
        assert_eq!(adjacent_pane(&layout, pid(1), FocusDirection::Down), Some(pid(3)));
        assert_eq!(adjacent_pane(&layout, pid(4), FocusDirection::Left), Some(pid(3)));
        assert_eq!(adjacent_pane(&layout, pid(4), FocusDirection::Up), Some(pid(2)));
    }

    #[test]
    fn edge_of_layout_has_no_neighbor() {
        let layout = solve(&grid(), NormRect::UNIT);
        assert_eq!(adjacent_pane(&layout, pid(1), FocusDirection::Left), None);
        assert_eq!(adjacent_pane(&layout, pid(1), FocusDirection::Up), None);
        assert_eq!(adjacent_pane(&layout, pid(4), FocusDirection::Right), None);
        assert_eq!(adjacent_pane(&layout, pid(4), FocusDirection::Down), None);
    }

    #[test]
    fn single_pane_is_a_noop() {
        let root = SplitNode::single_pane(pid(1));
        let layout = solve(&root, NormRect::UNIT);
        for direction in [
            FocusDirection::Up,
            FocusDirection::Down,
            FocusDirection::Left,
            FocusDirection::Right,
        ] {
            assert_eq!(adjacent_pane(&layout, pid(1), direction), None);
        }
    }

    #[test]
    fn tie_break_prefers_greatest_overlap() {
        // Left column is one tall pane; right column is split unevenly so
        // that pane 2 overlaps most of pane 1's vertical extent.
        let mut root = SplitNode::single_pane(pid(1));
        assert!(root.split_leaf(pid(1), sid(1), pid(2), Orientation::Horizontal));
        assert!(root.split_leaf(pid(2), sid(2), pid(3), Orientation::Vertical));
        root.split_mut(sid(2)).unwrap().set_divider_position(0.8);

        let layout = solve(&root, NormRect::UNIT);
        // Both 2 and 3 touch pane 1's right edge; 2 covers 80% of it.
        assert_eq!(adjacent_pane(&layout, pid(1), FocusDirection::Right), Some(pid(2)));
    }

    #[test]
    fn stale_pane_yields_none() {
        let layout = solve(&grid(), NormRect::UNIT);
        assert_eq!(adjacent_pane(&layout, pid(99), FocusDirection::Left), None);
    }
}
