use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{ScimError, ScimResult};
use crate::models::{
    eq_filter, Email, Group, GroupPayload, Member, Meta, Name, PatchRequest, User, UserPayload,
    GROUP_SCHEMA, SCIM_BASE_PATH, USER_SCHEMA,
};

/// Records keyed by sequential numeric ids, served as strings.
struct Collection<T> {
    next_id: u64,
    items: BTreeMap<u64, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: BTreeMap::new(),
        }
    }
}

impl<T> Collection<T> {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn get(&self, id: &str) -> Option<&T> {
        id.parse().ok().and_then(|key: u64| self.items.get(&key))
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        id.parse().ok().and_then(|key: u64| self.items.get_mut(&key))
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        id.parse().ok().and_then(|key: u64| self.items.remove(&key))
    }
}

/// In-memory SCIM users and groups
#[derive(Default)]
pub struct ScimStore {
    users: RwLock<Collection<User>>,
    groups: RwLock<Collection<Group>>,
}

fn required(value: Option<String>, attribute: &str) -> ScimResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ScimError::BadRequest(format!("Missing {attribute}")))
}

fn members_from(value: Option<Value>) -> ScimResult<Vec<Member>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|e| ScimError::BadRequest(format!("Invalid members value: {e}"))),
        Some(item) => serde_json::from_value(item)
            .map(|member| vec![member])
            .map_err(|e| ScimError::BadRequest(format!("Invalid members value: {e}"))),
    }
}

/// `members[value eq "42"]` → `42`
fn member_filter(path: &str) -> Option<&str> {
    let inner = path.strip_prefix("members[")?.strip_suffix(']')?;
    eq_filter(inner, "value")
}

impl ScimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_users(&self, filter: Option<&str>) -> Vec<User> {
        let users = self.users.read().await;
        let user_name = filter.and_then(|f| eq_filter(f, "userName"));

        users
            .items
            .values()
            .filter(|u| user_name.is_none_or(|name| u.user_name == name))
            .cloned()
            .collect()
    }

    pub async fn get_user(&self, id: &str) -> ScimResult<User> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(ScimError::NotFound("User"))
    }

    pub async fn create_user(&self, payload: UserPayload) -> ScimResult<User> {
        let user_name = required(payload.user_name, "userName")?;
        let mut users = self.users.write().await;

        if users.items.values().any(|u| u.user_name == user_name) {
            return Err(ScimError::Uniqueness(
                "User with this userName already exists".to_string(),
            ));
        }

        let key = users.allocate_id();
        let id = key.to_string();
        let user = User {
            schemas: vec![USER_SCHEMA.to_string()],
            name: payload.name.unwrap_or_default(),
            emails: payload
                .emails
                .unwrap_or_else(|| vec![Email::placeholder(&user_name)]),
            active: payload.active.unwrap_or(true),
            meta: Meta::new("User", format!("{SCIM_BASE_PATH}/Users/{id}"), Utc::now()),
            user_name,
            id,
        };
        users.items.insert(key, user.clone());

        info!(user_id = %user.id, user_name = %user.user_name, "SCIM user created");
        Ok(user)
    }

    pub async fn replace_user(&self, id: &str, payload: UserPayload) -> ScimResult<User> {
        let mut users = self.users.write().await;

        if let Some(name) = payload.user_name.as_deref() {
            if users.items.values().any(|u| u.user_name == name && u.id != id) {
                return Err(ScimError::Uniqueness(
                    "User with this userName already exists".to_string(),
                ));
            }
        }

        let user = users.get_mut(id).ok_or(ScimError::NotFound("User"))?;
        if let Some(user_name) = payload.user_name {
            user.user_name = user_name;
        }
        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(emails) = payload.emails {
            user.emails = emails;
        }
        if let Some(active) = payload.active {
            user.active = active;
        }
        user.meta.last_modified = Utc::now();

        info!(user_id = %id, "SCIM user replaced");
        Ok(user.clone())
    }

    /// Supports `add`/`replace` of `active`, either by path or as `{"active": bool}`.
    pub async fn patch_user(&self, id: &str, request: PatchRequest) -> ScimResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(ScimError::NotFound("User"))?;

        for operation in &request.operations {
            let op = operation.op();
            let active = match (operation.path.as_deref(), operation.value.as_ref()) {
                (Some("active"), Some(value)) => value.as_bool(),
                (None, Some(value)) => value.get("active").and_then(Value::as_bool),
                _ => None,
            };

            match (op.as_str(), active) {
                ("add" | "replace", Some(active)) => user.active = active,
                _ => debug!(op = %op, path = ?operation.path, "Ignoring unsupported user patch operation"),
            }
        }
        user.meta.last_modified = Utc::now();

        info!(user_id = %id, active = user.active, "SCIM user patched");
        Ok(user.clone())
    }

    pub async fn delete_user(&self, id: &str) -> ScimResult<()> {
        let mut users = self.users.write().await;
        users.remove(id).ok_or(ScimError::NotFound("User"))?;

        info!(user_id = %id, "SCIM user deleted");
        Ok(())
    }

    pub async fn list_groups(&self, filter: Option<&str>) -> Vec<Group> {
        let groups = self.groups.read().await;
        let display_name = filter.and_then(|f| eq_filter(f, "displayName"));

        groups
            .items
            .values()
            .filter(|g| display_name.is_none_or(|name| g.display_name == name))
            .cloned()
            .collect()
    }

    pub async fn get_group(&self, id: &str) -> ScimResult<Group> {
        let groups = self.groups.read().await;
        groups.get(id).cloned().ok_or(ScimError::NotFound("Group"))
    }

    pub async fn create_group(&self, payload: GroupPayload) -> ScimResult<Group> {
        let display_name = required(payload.display_name, "displayName")?;
        let mut groups = self.groups.write().await;

        if groups.items.values().any(|g| g.display_name == display_name) {
            return Err(ScimError::Uniqueness(
                "Group with this displayName already exists".to_string(),
            ));
        }

        let key = groups.allocate_id();
        let id = key.to_string();
        let group = Group {
            schemas: vec![GROUP_SCHEMA.to_string()],
            members: payload.members.unwrap_or_default(),
            meta: Meta::new("Group", format!("{SCIM_BASE_PATH}/Groups/{id}"), Utc::now()),
            display_name,
            id,
        };
        groups.items.insert(key, group.clone());

        info!(group_id = %group.id, display_name = %group.display_name, "SCIM group created");
        Ok(group)
    }

    pub async fn replace_group(&self, id: &str, payload: GroupPayload) -> ScimResult<Group> {
        let mut groups = self.groups.write().await;

        if let Some(name) = payload.display_name.as_deref() {
            if groups.items.values().any(|g| g.display_name == name && g.id != id) {
                return Err(ScimError::Uniqueness(
                    "Group with this displayName already exists".to_string(),
                ));
            }
        }

        let group = groups.get_mut(id).ok_or(ScimError::NotFound("Group"))?;
        if let Some(display_name) = payload.display_name {
            group.display_name = display_name;
        }
        if let Some(members) = payload.members {
            group.members = members;
        }
        group.meta.last_modified = Utc::now();

        info!(group_id = %id, "SCIM group replaced");
        Ok(group.clone())
    }

    /// Membership and `displayName` changes.
    ///
    /// - `add` on `members` appends one member or a list
    /// - `remove` on `members[value eq "x"]` drops that member; on `members` drops all
    /// - `replace` on `members` swaps the whole list
    /// - `add`/`replace` on `displayName` renames the group
    pub async fn patch_group(&self, id: &str, request: PatchRequest) -> ScimResult<Group> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(id).ok_or(ScimError::NotFound("Group"))?;

        for operation in request.operations {
            let op = operation.op();
            let path = operation.path.as_deref().unwrap_or_default();

            match (op.as_str(), path) {
                ("add", "members") => {
                    group.members.extend(members_from(operation.value)?);
                }
                ("remove", "members") => group.members.clear(),
                ("remove", path) if path.starts_with("members[") => {
                    if let Some(member_id) = member_filter(path) {
                        group.members.retain(|m| m.value != member_id);
                    }
                }
                ("replace", "members") => {
                    group.members = members_from(operation.value)?;
                }
                ("add" | "replace", "displayName") => {
                    match operation.value.as_ref().and_then(Value::as_str) {
                        Some(name) => group.display_name = name.to_string(),
                        None => {
                            return Err(ScimError::BadRequest(
                                "displayName must be a string".to_string(),
                            ));
                        }
                    }
                }
                _ => debug!(op = %op, path, "Ignoring unsupported group patch operation"),
            }
        }
        group.meta.last_modified = Utc::now();

        info!(group_id = %id, members = group.members.len(), "SCIM group patched");
        Ok(group.clone())
    }

    pub async fn delete_group(&self, id: &str) -> ScimResult<()> {
        let mut groups = self.groups.write().await;
        groups.remove(id).ok_or(ScimError::NotFound("Group"))?;

        info!(group_id = %id, "SCIM group deleted");
        Ok(())
    }
}
