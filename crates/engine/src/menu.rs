//! Menu construction.
//!
//! [`rebuild_menu`] is a pure function of (groups, items, permitted pages).
//! [`MenuController`] owns the latest inputs, memoizes the built menu on a
//! hash of those inputs, and drops results from superseded async loads.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use driverconnect_store::{Direction, Document, DocumentStore, Query, StoreError};
use driverconnect_types::{GroupedMenu, MenuGroup, MenuItem, Permissions, collections};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Buckets `items` under `groups` and filters them by `pages`.
///
/// Groups and items are stably sorted by `order`, so ties keep input order.
/// Items join groups on a case-insensitive match of `type` against the group
/// `typeName`; an item with a non-blank `pageName` survives only when `pages`
/// contains it. Every group lands in `group_order`, empty or not.
pub fn rebuild_menu(groups: &[MenuGroup], items: &[MenuItem], pages: &BTreeSet<String>) -> GroupedMenu {
    let mut ordered_groups: Vec<&MenuGroup> = groups.iter().collect();
    ordered_groups.sort_by_key(|group| group.order);
    let mut ordered_items: Vec<&MenuItem> = items.iter().collect();
    ordered_items.sort_by_key(|item| item.order);

    let mut menu = GroupedMenu::default();
    let mut seen = HashSet::new();
    for group in ordered_groups {
        if !seen.insert(group.type_name.as_str()) {
            debug!(type_name = %group.type_name, "Skipping duplicate menu group");
            continue;
        }
        let visible: Vec<MenuItem> = ordered_items
            .iter()
            .filter(|item| item.belongs_to(group))
            .filter(|item| item.required_page().is_none_or(|page| pages.contains(page)))
            .map(|item| (*item).clone())
            .collect();
        menu.group_order.push(group.type_name.clone());
        menu.group_map.insert(group.type_name.clone(), visible);
        menu.groups.insert(group.type_name.clone(), group.clone());
    }
    menu
}

/// Fetches menu groups and items, each ordered by `order` ascending.
///
/// Documents that fail to decode are logged and skipped.
pub async fn load_menu_sources<S>(store: &S) -> Result<(Vec<MenuGroup>, Vec<MenuItem>), StoreError>
where
    S: DocumentStore + ?Sized,
{
    let groups = store
        .query(&Query::collection(collections::MENU_GROUPS).order_by("order", Direction::Ascending))
        .await?;
    let items = store
        .query(&Query::collection(collections::MENU).order_by("order", Direction::Ascending))
        .await?;
    Ok((decode_all(&groups), decode_all(&items)))
}

fn decode_all<T: DeserializeOwned>(documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match document.decode() {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(id = %document.id, error = %error, "Skipping undecodable menu document");
                None
            }
        })
        .collect()
}

/// Owns menu inputs and the memoized [`GroupedMenu`] built from them.
#[derive(Debug, Default)]
pub struct MenuController {
    groups: Vec<MenuGroup>,
    items: Vec<MenuItem>,
    pages: BTreeSet<String>,
    load_generation: u64,
    permission_generation: u64,
    cache: Option<(u64, Arc<GroupedMenu>)>,
    rebuilds: usize,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a menu data load and returns its generation.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Applies the result of the load tagged `generation`. Results from any
    /// load other than the most recently started one are discarded.
    pub fn apply_load(&mut self, generation: u64, groups: Vec<MenuGroup>, items: Vec<MenuItem>) -> bool {
        if generation != self.load_generation {
            debug!(generation, current = self.load_generation, "Discarding stale menu load");
            return false;
        }
        self.groups = groups;
        self.items = items;
        true
    }

    /// Starts a permission resolution and returns its generation.
    pub fn begin_permissions(&mut self) -> u64 {
        self.permission_generation += 1;
        self.permission_generation
    }

    pub fn apply_permissions(&mut self, generation: u64, permissions: &Permissions) -> bool {
        if generation != self.permission_generation {
            debug!(
                generation,
                current = self.permission_generation,
                "Discarding stale permission resolution"
            );
            return false;
        }
        self.pages = permissions.pages.clone();
        true
    }

    /// The menu for the current inputs, rebuilt only when they changed.
    pub fn menu(&mut self) -> Arc<GroupedMenu> {
        let key = self.input_hash();
        if let Some((cached_key, menu)) = &self.cache
            && *cached_key == key
        {
            return Arc::clone(menu);
        }
        let menu = Arc::new(rebuild_menu(&self.groups, &self.items, &self.pages));
        self.rebuilds += 1;
        self.cache = Some((key, Arc::clone(&menu)));
        menu
    }

    /// Number of times the menu has actually been rebuilt.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    fn input_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.groups.hash(&mut hasher);
        self.items.hash(&mut hasher);
        self.pages.hash(&mut hasher);
        hasher.finish()
    }
}

/// Item counts per group, handy for logging a rebuilt menu.
pub fn summarize(menu: &GroupedMenu) -> HashMap<&str, usize> {
    menu.group_order
        .iter()
        .map(|name| (name.as_str(), menu.items(name).len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(type_name: &str, order: i64) -> MenuGroup {
        MenuGroup {
            id: format!("g-{type_name}"),
            type_name: type_name.into(),
            order,
            icon: None,
        }
    }

    fn item(id: &str, kind: &str, order: i64, page: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.into(),
            title: format!("Item {id}"),
            kind: kind.into(),
            order,
            url: Some(format!("/{id}")),
            icon: None,
            page_name: page.map(str::to_string),
        }
    }

    fn pages(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn ids(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn groups_and_filters_the_ops_admin_scenario() {
        let groups = vec![group("Ops", 1), group("Admin", 2)];
        let items = vec![
            item("1", "ops", 1, Some("dashboard")),
            item("2", "admin", 1, Some("user-manager")),
        ];
        let menu = rebuild_menu(&groups, &items, &pages(&["dashboard"]));
        assert_eq!(menu.group_order, vec!["Ops", "Admin"]);
        assert_eq!(ids(menu.items("Ops")), vec!["1"]);
        assert!(menu.items("Admin").is_empty());
        assert_eq!(menu.non_empty_groups().collect::<Vec<_>>(), vec!["Ops"]);
    }

    #[test]
    fn never_includes_items_with_unpermitted_pages() {
        let groups = vec![group("Ops", 1)];
        let items = vec![
            item("open", "ops", 1, None),
            item("blank", "ops", 2, Some("")),
            item("allowed", "ops", 3, Some("tows")),
            item("denied", "ops", 4, Some("payments")),
        ];
        let menu = rebuild_menu(&groups, &items, &pages(&["tows"]));
        assert_eq!(ids(menu.items("Ops")), vec!["open", "blank", "allowed"]);

        let menu = rebuild_menu(&groups, &items, &BTreeSet::new());
        assert_eq!(ids(menu.items("Ops")), vec!["open", "blank"]);
    }

    #[test]
    fn ordering_is_a_stable_sort_on_order() {
        let groups = vec![group("B", 2), group("A1", 1), group("A2", 1)];
        let items = vec![
            item("late", "a1", 5, None),
            item("tie-first", "a1", 1, None),
            item("tie-second", "A1", 1, None),
        ];
        let menu = rebuild_menu(&groups, &items, &BTreeSet::new());
        assert_eq!(menu.group_order, vec!["A1", "A2", "B"]);
        assert_eq!(ids(menu.items("A1")), vec!["tie-first", "tie-second", "late"]);
    }

    #[test]
    fn duplicate_group_names_keep_the_first() {
        let groups = vec![group("Ops", 1), group("Ops", 2)];
        let menu = rebuild_menu(&groups, &[], &BTreeSet::new());
        assert_eq!(menu.group_order, vec!["Ops"]);
    }

    #[test]
    fn controller_memoizes_until_inputs_change() {
        let mut controller = MenuController::new();
        let generation = controller.begin_load();
        assert!(controller.apply_load(generation, vec![group("Ops", 1)], vec![item("1", "ops", 1, Some("tows"))]));

        let first = controller.menu();
        let second = controller.menu();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(controller.rebuild_count(), 1);
        assert!(first.items("Ops").is_empty());

        let generation = controller.begin_permissions();
        let permissions = Permissions {
            pages: pages(&["tows"]),
            ..Permissions::default()
        };
        assert!(controller.apply_permissions(generation, &permissions));
        let third = controller.menu();
        assert_eq!(controller.rebuild_count(), 2);
        assert_eq!(ids(third.items("Ops")), vec!["1"]);
    }

    #[test]
    fn controller_discards_superseded_loads() {
        let mut controller = MenuController::new();
        let stale = controller.begin_load();
        let fresh = controller.begin_load();
        assert!(controller.apply_load(fresh, vec![group("Fresh", 1)], Vec::new()));
        assert!(!controller.apply_load(stale, vec![group("Stale", 1)], Vec::new()));
        assert_eq!(controller.menu().group_order, vec!["Fresh"]);

        let stale = controller.begin_permissions();
        let _fresh = controller.begin_permissions();
        assert!(!controller.apply_permissions(stale, &Permissions::default()));
    }
}
