use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Icon;

/// A named bucket of menu items; `type_name` joins to [`MenuItem::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuGroup {
    pub id: String,
    pub type_name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub icon: Option<String>,
}

impl MenuGroup {
    pub fn icon(&self) -> Icon {
        self.icon.as_deref().map(Icon::from_name).unwrap_or(Icon::Folder)
    }
}

/// A single navigable entry in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    /// Group type this item belongs to (compared case-insensitively).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Page identifier gating visibility. `None` or blank means visible to all.
    #[serde(default)]
    pub page_name: Option<String>,
}

impl MenuItem {
    /// The page a viewer must hold to see this item, if any.
    pub fn required_page(&self) -> Option<&str> {
        self.page_name.as_deref().map(str::trim).filter(|page| !page.is_empty())
    }

    pub fn belongs_to(&self, group: &MenuGroup) -> bool {
        self.kind.eq_ignore_ascii_case(&group.type_name)
    }

    pub fn icon(&self) -> Icon {
        self.icon.as_deref().map(Icon::from_name).unwrap_or(Icon::Unknown)
    }
}

/// Menu items bucketed by group, in display order.
///
/// Every group appears in `group_order` even when its filtered item list is
/// empty; suppressing empty groups is the renderer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedMenu {
    pub group_order: Vec<String>,
    pub group_map: HashMap<String, Vec<MenuItem>>,
    #[serde(skip)]
    pub groups: HashMap<String, MenuGroup>,
}

impl GroupedMenu {
    pub fn items(&self, type_name: &str) -> &[MenuItem] {
        self.group_map.get(type_name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn group(&self, type_name: &str) -> Option<&MenuGroup> {
        self.groups.get(type_name)
    }

    /// Groups that have at least one item, in display order.
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &str> {
        self.group_order
            .iter()
            .map(String::as_str)
            .filter(|type_name| !self.items(type_name).is_empty())
    }
}
