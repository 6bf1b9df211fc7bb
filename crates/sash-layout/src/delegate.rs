#![forbid(unsafe_code)]

//! The delegate protocol: veto, notification, and query hooks.
//!
//! Every structural mutation runs a two-phase protocol on the calling
//! thread: `should_*` (veto, returns `bool`) → mutation → `did_*`
//! (notification). A veto leaves the tree untouched and suppresses the
//! matching `did_*`. All methods have safe defaults, so a delegate
//! implements only what it cares about.

use sash_core::{PaneId, TabId};

use crate::snapshot::LayoutSnapshot;
use crate::tab::{Tab, TabSpec};
use crate::tree::Orientation;

/// An entry of the context menu a collaborator shows for a tab.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContextMenuItem {
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub is_enabled: bool,
    /// Opaque command id dispatched back to the collaborator.
    pub action: String,
}

impl ContextMenuItem {
    /// Create an enabled item with no icon.
    #[must_use]
    pub fn new(title: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            is_enabled: true,
            action: action.into(),
        }
    }

    /// Set the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set whether the item is enabled.
    #[must_use]
    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }
}

/// External veto/notification sink for the engine.
#[allow(unused_variables)]
pub trait EngineDelegate {
    // ---- Veto phase ----

    /// Veto creating a tab in `pane`. Default: allow.
    fn should_create_tab(&mut self, pane: PaneId, spec: &TabSpec) -> bool {
        true
    }

    /// Veto closing a tab. Default: allow.
    fn should_close_tab(&mut self, pane: PaneId, tab: &Tab) -> bool {
        true
    }

    /// Veto splitting a pane. Default: allow.
    fn should_split_pane(&mut self, pane: PaneId, orientation: Orientation) -> bool {
        true
    }

    /// Veto closing a pane. Default: allow.
    fn should_close_pane(&mut self, pane: PaneId) -> bool {
        true
    }

    /// Opt in to high-frequency geometry notifications while a divider
    /// drag is active. Default: suppressed.
    fn should_notify_during_drag(&mut self) -> bool {
        false
    }

    // ---- Notification phase ----

    fn did_create_tab(&mut self, pane: PaneId, tab: &Tab) {}

    fn did_close_tab(&mut self, pane: PaneId, tab: &Tab) {}

    fn did_select_tab(&mut self, pane: PaneId, tab: TabId) {}

    fn did_move_tab(&mut self, tab: TabId, from: PaneId, to: PaneId, index: usize) {}

    fn did_split_pane(&mut self, old: PaneId, new: PaneId, orientation: Orientation) {}

    fn did_close_pane(&mut self, pane: PaneId) {}

    fn did_focus_pane(&mut self, pane: PaneId) {}

    fn did_double_click_tab_bar(&mut self, pane: PaneId) {}

    fn did_change_geometry(&mut self, snapshot: &LayoutSnapshot) {}

    // ---- Query phase ----

    /// Context menu entries for a tab, in display order. Default: none.
    fn context_menu_items(&mut self, tab: &Tab) -> Vec<ContextMenuItem> {
        Vec::new()
    }
}

/// A delegate that allows everything and observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelegate;

impl EngineDelegate for NoopDelegate {}

#[cfg(test)]
mod tests {
    use super::{ContextMenuItem, EngineDelegate, NoopDelegate};
    use crate::tab::TabSpec;
    use crate::tree::Orientation;
    use sash_core::{PaneId, TabId};

    #[test]
    fn defaults_allow_mutation_and_suppress_drag() {
        let mut delegate = NoopDelegate;
        let pane = PaneId::new(1).unwrap();
        let tab = TabSpec::new("t").into_tab(TabId::new(1).unwrap());
        assert!(delegate.should_create_tab(pane, &TabSpec::new("t")));
        assert!(delegate.should_close_tab(pane, &tab));
        assert!(delegate.should_split_pane(pane, Orientation::Horizontal));
        assert!(delegate.should_close_pane(pane));
        assert!(!delegate.should_notify_during_drag());
        assert!(delegate.context_menu_items(&tab).is_empty());
    }

    #[test]
    fn context_menu_item_builders() {
        let item = ContextMenuItem::new("Close Tab", "tab.close")
            .with_icon("xmark")
            .enabled(false);
        assert_eq!(item.title, "Close Tab");
        assert_eq!(item.icon.as_deref(), Some("xmark"));
        assert!(!item.is_enabled);
        assert_eq!(item.action, "tab.close");
    }
}
