#![forbid(unsafe_code)]

//! Tab metadata records.
//!
//! A [`Tab`] is owned by exactly one pane at a time; moving a tab transfers
//! the record, never duplicates it. Display order inside a pane follows the
//! pinned-run invariant: non-pinned tabs first, then pinned closable tabs,
//! then non-closable pinned tabs anchored at the very end.

use serde::{Deserialize, Serialize};

use sash_core::TabId;

/// Tab metadata owned by a pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub icon: Option<String>,
    pub is_dirty: bool,
    pub is_closable: bool,
    pub is_pinned: bool,
}

impl Tab {
    /// Ordering zone of this tab within its pane.
    ///
    /// 0 = non-pinned, 1 = pinned closable, 2 = pinned non-closable anchor.
    /// A pane's tabs must carry non-decreasing zones.
    pub(crate) fn zone(&self) -> u8 {
        match (self.is_pinned, self.is_closable) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => 2,
        }
    }
}

/// Everything needed to create a tab, minus the engine-allocated id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabSpec {
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_dirty: bool,
    #[serde(default = "default_closable")]
    pub is_closable: bool,
    #[serde(default)]
    pub is_pinned: bool,
}

fn default_closable() -> bool {
    true
}

impl TabSpec {
    /// Create a spec for a closable, non-pinned, clean tab.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            is_dirty: false,
            is_closable: true,
            is_pinned: false,
        }
    }

    /// Set the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the dirty flag.
    #[must_use]
    pub fn dirty(mut self, is_dirty: bool) -> Self {
        self.is_dirty = is_dirty;
        self
    }

    /// Set the closable flag.
    #[must_use]
    pub fn closable(mut self, is_closable: bool) -> Self {
        self.is_closable = is_closable;
        self
    }

    /// Set the pinned flag.
    #[must_use]
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    /// Bind the spec to an engine-allocated id.
    pub(crate) fn into_tab(self, id: TabId) -> Tab {
        Tab {
            id,
            title: self.title,
            icon: self.icon,
            is_dirty: self.is_dirty,
            is_closable: self.is_closable,
            is_pinned: self.is_pinned,
        }
    }
}

/// A partial update to a tab. Only supplied fields are touched, and only
/// when the new value differs from the old (change suppression).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the icon; `None` leaves it alone.
    pub icon: Option<Option<String>>,
    pub is_dirty: Option<bool>,
    pub is_closable: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl TabPatch {
    /// An empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Update the icon.
    #[must_use]
    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Update the dirty flag.
    #[must_use]
    pub fn dirty(mut self, is_dirty: bool) -> Self {
        self.is_dirty = Some(is_dirty);
        self
    }

    /// Update the closable flag.
    #[must_use]
    pub fn closable(mut self, is_closable: bool) -> Self {
        self.is_closable = Some(is_closable);
        self
    }

    /// Update the pinned flag.
    #[must_use]
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = Some(is_pinned);
        self
    }

    /// True when no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.icon.is_none()
            && self.is_dirty.is_none()
            && self.is_closable.is_none()
            && self.is_pinned.is_none()
    }
}
