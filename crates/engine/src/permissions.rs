//! Role claim → permission set resolution.
//!
//! Resolution never fails outward. A missing role, a missing role record, an
//! undecodable record, or a store error all produce `Permissions::default()`,
//! which shows nothing.

use driverconnect_store::DocumentStore;
use driverconnect_types::{Permissions, RoleRecord, Session, TableAction, collections};
use tracing::{debug, error, warn};

/// Resolves the permissions for `session`.
///
/// The role comes from the session's claim; when the auth provider supplied
/// none, the `role` field of `users/{uid}` is used instead.
pub async fn resolve_permissions<S>(store: &S, session: &Session) -> Permissions
where
    S: DocumentStore + ?Sized,
{
    let role = match session.role_claim.clone() {
        Some(role) => Some(role),
        None => role_from_user_record(store, &session.uid).await,
    };
    let Some(role) = role else {
        debug!(uid = %session.uid, "Session has no role; granting no permissions");
        return Permissions::default();
    };

    match store.get(collections::ROLES, &role).await {
        Ok(Some(document)) => match document.decode::<RoleRecord>() {
            Ok(record) => permissions_from_role(record),
            Err(error) => {
                warn!(role = %role, error = %error, "Role record is malformed; granting no permissions");
                Permissions::default()
            }
        },
        Ok(None) => {
            warn!(role = %role, "Role record not found; granting no permissions");
            Permissions::default()
        }
        Err(error) => {
            error!(role = %role, error = %error, "Role lookup failed; granting no permissions");
            Permissions::default()
        }
    }
}

async fn role_from_user_record<S>(store: &S, uid: &str) -> Option<String>
where
    S: DocumentStore + ?Sized,
{
    match store.get(collections::USERS, uid).await {
        Ok(Some(document)) => document
            .get("role")
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string),
        Ok(None) => None,
        Err(error) => {
            error!(uid = %uid, error = %error, "User lookup failed while resolving role");
            None
        }
    }
}

/// Converts a stored role record into a permission set, dropping blank page
/// names and actions it does not recognise.
pub fn permissions_from_role(record: RoleRecord) -> Permissions {
    let pages = record
        .pages
        .into_iter()
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty())
        .collect();

    let tables = record
        .tables
        .into_iter()
        .map(|(table, actions)| {
            let actions = actions
                .iter()
                .filter_map(|action| match action.parse::<TableAction>() {
                    Ok(action) => Some(action),
                    Err(error) => {
                        warn!(table = %table, error = %error, "Ignoring unknown table action");
                        None
                    }
                })
                .collect();
            (table, actions)
        })
        .collect();

    Permissions { pages, tables }
}
