//! Navigation tree state.
//!
//! Each group is either collapsed or expanded. A fresh tree opens only the
//! first group. "Toggle all" is all-or-nothing: if any group is collapsed
//! everything expands, otherwise everything collapses. When the panel is
//! minimized, hovering a group opens a single flyout listing its items.

use driverconnect_types::{GroupedMenu, Icon, MenuItem, Permissions};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Collapsed,
    Expanded,
}

impl GroupState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// A group as it should be drawn: non-empty, with render-time filtered items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleGroup<'a> {
    pub type_name: &'a str,
    pub icon: Icon,
    pub state: GroupState,
    pub items: Vec<&'a MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    states: IndexMap<String, GroupState>,
    minimized: bool,
    flyout: Option<String>,
}

impl NavTree {
    /// A tree for a freshly built menu: the first group expanded, the rest
    /// collapsed.
    pub fn fresh(menu: &GroupedMenu) -> Self {
        let states = menu
            .group_order
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let state = if index == 0 { GroupState::Expanded } else { GroupState::Collapsed };
                (name.clone(), state)
            })
            .collect();
        Self {
            states,
            minimized: false,
            flyout: None,
        }
    }

    /// A tree for a rebuilt menu that keeps what the user already chose.
    ///
    /// Groups that survive the rebuild keep their state, new groups start
    /// collapsed. If no group survives this is the same as [`NavTree::fresh`].
    /// The minimized flag carries over; an open flyout survives only if its
    /// group still has items.
    pub fn rebuilt(&self, menu: &GroupedMenu) -> Self {
        let survivors = menu.group_order.iter().any(|name| self.states.contains_key(name));
        let mut tree = if survivors {
            let states = menu
                .group_order
                .iter()
                .map(|name| (name.clone(), self.states.get(name).copied().unwrap_or(GroupState::Collapsed)))
                .collect();
            Self {
                states,
                minimized: false,
                flyout: None,
            }
        } else {
            Self::fresh(menu)
        };
        tree.minimized = self.minimized;
        tree.flyout = self
            .flyout
            .clone()
            .filter(|name| self.minimized && !menu.items(name).is_empty());
        tree
    }

    pub fn state(&self, type_name: &str) -> Option<GroupState> {
        self.states.get(type_name).copied()
    }

    pub fn is_expanded(&self, type_name: &str) -> bool {
        self.state(type_name) == Some(GroupState::Expanded)
    }

    /// Flips one group. Returns the new state, or `None` for an unknown group.
    pub fn toggle(&mut self, type_name: &str) -> Option<GroupState> {
        let state = self.states.get_mut(type_name)?;
        *state = state.toggled();
        Some(*state)
    }

    /// Expands everything if any drawn group is collapsed, otherwise
    /// collapses everything. Groups hidden for lack of visible items do not
    /// take part in the decision but still receive the result. Returns the
    /// state every group ended in.
    pub fn toggle_all(&mut self, menu: &GroupedMenu, permissions: &Permissions) -> GroupState {
        let any_collapsed = self
            .visible_groups(menu, permissions)
            .iter()
            .any(|group| group.state == GroupState::Collapsed);
        let target = if any_collapsed {
            GroupState::Expanded
        } else {
            GroupState::Collapsed
        };
        self.states.values_mut().for_each(|state| *state = target);
        target
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
        if !minimized {
            self.flyout = None;
        }
    }

    /// Hovering a group icon while minimized opens its flyout, replacing any
    /// flyout already open. Ignored when the panel is not minimized.
    pub fn hover(&mut self, type_name: &str) -> bool {
        if !self.minimized || !self.states.contains_key(type_name) {
            return false;
        }
        self.flyout = Some(type_name.to_string());
        true
    }

    /// Leaving the flyout area closes it.
    pub fn leave_flyout(&mut self) {
        self.flyout = None;
    }

    pub fn flyout(&self) -> Option<&str> {
        self.flyout.as_deref()
    }

    /// The groups to draw, in order, skipping any group with no visible
    /// items. Items are filtered against `permissions` again here, since
    /// visibility can change between build and render.
    pub fn visible_groups<'a>(&self, menu: &'a GroupedMenu, permissions: &Permissions) -> Vec<VisibleGroup<'a>> {
        menu.group_order
            .iter()
            .filter_map(|name| {
                let items: Vec<&MenuItem> = menu.items(name).iter().filter(|item| permissions.can_see(item)).collect();
                if items.is_empty() {
                    return None;
                }
                Some(VisibleGroup {
                    type_name: name.as_str(),
                    icon: menu.group(name).map(|group| group.icon()).unwrap_or(Icon::Folder),
                    state: self.state(name).unwrap_or(GroupState::Collapsed),
                    items,
                })
            })
            .collect()
    }
}

/// Whether `item` is the current location: `current_url` starts with the
/// item's url. Items without a url are never selected.
pub fn is_item_selected(item: &MenuItem, current_url: &str) -> bool {
    item.url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .is_some_and(|url| current_url.starts_with(url))
}
