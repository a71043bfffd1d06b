use driverconnect_engine::{GroupState, NavTree, is_item_selected};
use driverconnect_types::{GroupedMenu, Icon, Permissions};
use ratatui::layout::Rect;

/// One drawable line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRow {
    Group {
        type_name: String,
        icon: Icon,
        state: GroupState,
    },
    Item {
        type_name: String,
        title: String,
        url: Option<String>,
        icon: Icon,
        selected: bool,
    },
}

impl NavRow {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Group { type_name, .. } | Self::Item { type_name, .. } => type_name,
        }
    }
}

/// Rows of the tree as currently drawn. Minimized trees show group rows only.
pub fn nav_rows(nav: &NavTree, menu: &GroupedMenu, permissions: &Permissions, current_url: &str) -> Vec<NavRow> {
    let mut rows = Vec::new();
    for group in nav.visible_groups(menu, permissions) {
        rows.push(NavRow::Group {
            type_name: group.type_name.to_string(),
            icon: group.icon,
            state: group.state,
        });
        if nav.is_minimized() || group.state == GroupState::Collapsed {
            continue;
        }
        rows.extend(group.items.iter().map(|item| NavRow::Item {
            type_name: group.type_name.to_string(),
            title: item.title.clone(),
            url: item.url.clone(),
            icon: item.icon(),
            selected: is_item_selected(item, current_url),
        }));
    }
    rows
}

/// Item rows of the open flyout, or nothing when no flyout is open.
pub fn flyout_rows(nav: &NavTree, menu: &GroupedMenu, permissions: &Permissions, current_url: &str) -> Vec<NavRow> {
    let Some(open) = nav.flyout() else {
        return Vec::new();
    };
    nav.visible_groups(menu, permissions)
        .into_iter()
        .filter(|group| group.type_name == open)
        .flat_map(|group| {
            group.items.into_iter().map(|item| NavRow::Item {
                type_name: open.to_string(),
                title: item.title.clone(),
                url: item.url.clone(),
                icon: item.icon(),
                selected: is_item_selected(item, current_url),
            })
        })
        .collect()
}

/// Cursor and layout bookkeeping for the tree component.
#[derive(Debug, Clone, Default)]
pub struct NavTreeState {
    pub cursor: usize,
    pub flyout_cursor: usize,
    pub last_area: Rect,
    pub row_areas: Vec<Rect>,
    pub flyout_area: Option<Rect>,
    pub flyout_row_areas: Vec<Rect>,
}

impl NavTreeState {
    /// Moves the cursor one row, wrapping at either end.
    pub fn move_cursor(&mut self, len: usize, forward: bool) {
        self.cursor = step(self.cursor, len, forward);
    }

    pub fn move_flyout_cursor(&mut self, len: usize, forward: bool) {
        self.flyout_cursor = step(self.flyout_cursor, len, forward);
    }

    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward { (current + 1) % len } else { (current + len - 1) % len }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driverconnect_engine::rebuild_menu;
    use driverconnect_types::{MenuGroup, MenuItem};
    use std::collections::BTreeSet;

    fn menu() -> GroupedMenu {
        let groups = ["Ops", "Admin", "Empty"]
            .iter()
            .enumerate()
            .map(|(order, name)| MenuGroup {
                id: name.to_lowercase(),
                type_name: name.to_string(),
                order: order as i64,
                icon: None,
            })
            .collect::<Vec<_>>();
        let items = [("tows", "ops"), ("drivers", "ops"), ("users", "admin")]
            .iter()
            .map(|(id, kind)| MenuItem {
                id: id.to_string(),
                title: id.to_string(),
                kind: kind.to_string(),
                order: 0,
                url: Some(format!("/{id}")),
                icon: None,
                page_name: None,
            })
            .collect::<Vec<_>>();
        rebuild_menu(&groups, &items, &BTreeSet::new())
    }

    #[test]
    fn expanded_groups_list_their_items_and_empty_groups_vanish() {
        let menu = menu();
        let nav = NavTree::fresh(&menu);
        let rows = nav_rows(&nav, &menu, &Permissions::default(), "/drivers/7");
        assert_eq!(rows.len(), 4);
        assert!(matches!(&rows[2], NavRow::Item { title, selected: true, .. } if title == "drivers"));
        assert!(matches!(&rows[3], NavRow::Group { type_name, state: GroupState::Collapsed, .. } if type_name == "Admin"));
    }

    #[test]
    fn minimized_trees_show_groups_and_flyout_items() {
        let menu = menu();
        let mut nav = NavTree::fresh(&menu);
        nav.set_minimized(true);
        let rows = nav_rows(&nav, &menu, &Permissions::default(), "/");
        assert_eq!(rows.len(), 2);
        assert!(flyout_rows(&nav, &menu, &Permissions::default(), "/").is_empty());

        nav.hover("Admin");
        let flyout = flyout_rows(&nav, &menu, &Permissions::default(), "/");
        assert_eq!(flyout.len(), 1);
        assert_eq!(flyout[0].type_name(), "Admin");
    }

    #[test]
    fn cursor_wraps() {
        let mut state = NavTreeState::default();
        state.move_cursor(3, false);
        assert_eq!(state.cursor, 2);
        state.move_cursor(3, true);
        assert_eq!(state.cursor, 0);
        state.move_cursor(0, true);
        assert_eq!(state.cursor, 0);
    }
}
