#![forbid(unsafe_code)]

//! Read-only projections of the live tree for external consumers.
//!
//! Consumers (persistence, remote mirroring) never see live nodes. They get
//! either a flat [`LayoutSnapshot`] with pixel-mapped pane geometry, or an
//! [`ExternalTreeNode`], a recursive mirror of the tree carrying only
//! string ids and pixel frames.

use serde::{Deserialize, Serialize};

use sash_core::{NormRect, PaneId, PixelRect, TabId};

use crate::layout::LayoutSolution;
use crate::tree::{Orientation, SplitNode};

/// Pixel geometry and tab listing of one pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneGeometry {
    pub pane_id: PaneId,
    pub frame: PixelRect,
    #[serde(default)]
    pub selected_tab: Option<TabId>,
    pub tab_ids: Vec<TabId>,
}

/// A flat, pixel-mapped projection of the whole layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub container_frame: PixelRect,
    /// Pane geometry in pane-id order.
    pub panes: Vec<PaneGeometry>,
    pub focused_pane: PaneId,
    /// Milliseconds since engine construction, on the engine's clock.
    pub timestamp_ms: u64,
}

impl LayoutSnapshot {
    /// Geometry of one pane.
    #[must_use]
    pub fn pane(&self, id: PaneId) -> Option<&PaneGeometry> {
        self.panes.iter().find(|pane| pane.pane_id == id)
    }
}

pub(crate) fn build_layout_snapshot(
    root: &SplitNode,
    layout: &LayoutSolution,
    container_frame: PixelRect,
    focused_pane: PaneId,
    timestamp_ms: u64,
) -> LayoutSnapshot {
    let panes = layout
        .iter()
        .filter_map(|(id, rect)| {
            let pane = root.pane(id)?;
            Some(PaneGeometry {
                pane_id: id,
                frame: rect.to_pixels(container_frame),
                selected_tab: pane.selected_tab(),
                tab_ids: pane.tabs().iter().map(|tab| tab.id).collect(),
            })
        })
        .collect();
    LayoutSnapshot {
        container_frame,
        panes,
        focused_pane,
        timestamp_ms,
    }
}

/// A tab as seen by external mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTab {
    pub id: String,
    pub title: String,
}

/// A recursive mirror of the tree using only string ids and pixel frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExternalTreeNode {
    Pane {
        id: String,
        frame: PixelRect,
        tabs: Vec<ExternalTab>,
        #[serde(default)]
        selected_tab: Option<String>,
    },
    Split {
        id: String,
        orientation: Orientation,
        divider_position: f64,
        first: Box<ExternalTreeNode>,
        second: Box<ExternalTreeNode>,
    },
}

pub(crate) fn build_external_tree(
    node: &SplitNode,
    region: NormRect,
    container_frame: PixelRect,
) -> ExternalTreeNode {
    match node {
        SplitNode::Pane(pane) => ExternalTreeNode::Pane {
            id: pane.id().to_string(),
            frame: region.to_pixels(container_frame),
            tabs: pane
                .tabs()
                .iter()
                .map(|tab| ExternalTab {
                    id: tab.id.to_string(),
                    title: tab.title.clone(),
                })
                .collect(),
            selected_tab: pane.selected_tab().map(|id| id.to_string()),
        },
        SplitNode::Split(split) => {
            let (first, second) = match split.orientation() {
                Orientation::Horizontal => region.split_horizontal(split.divider_position()),
                Orientation::Vertical => region.split_vertical(split.divider_position()),
            };
            ExternalTreeNode::Split {
                id: split.id().to_string(),
                orientation: split.orientation(),
                divider_position: split.divider_position(),
                first: Box::new(build_external_tree(split.first(), first, container_frame)),
                second: Box::new(build_external_tree(split.second(), second, container_frame)),
            }
        }
    }
}
