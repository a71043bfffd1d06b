use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MenuItem;

/// An action a user may perform on a table (entity type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableAction {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTableActionError(pub String);

impl fmt::Display for ParseTableActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table action '{}'", self.0)
    }
}

impl std::error::Error for ParseTableActionError {}

impl FromStr for TableAction {
    type Err = ParseTableActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(ParseTableActionError(s.to_string())),
        }
    }
}

/// Raw role document as stored in the `roles` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<String>>,
}

/// What a user may see and do for the length of a session.
///
/// The default value grants nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Permissions {
    pub pages: BTreeSet<String>,
    pub tables: BTreeMap<String, BTreeSet<TableAction>>,
}

impl Permissions {
    pub fn allows_page(&self, page: &str) -> bool {
        self.pages.contains(page)
    }

    pub fn can(&self, table: &str, action: TableAction) -> bool {
        self.tables.get(table).is_some_and(|actions| actions.contains(&action))
    }

    /// Whether a menu item passes this permission set.
    pub fn can_see(&self, item: &MenuItem) -> bool {
        item.required_page().is_none_or(|page| self.allows_page(page))
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.tables.values().all(BTreeSet::is_empty)
    }
}
