use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Mount point of the SCIM routes; resource locations are built from it
pub const SCIM_BASE_PATH: &str = "/scim/v2";

pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
pub const GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub resource_type: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub location: String,
}

impl Meta {
    pub fn new(resource_type: &str, location: String, now: DateTime<Utc>) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            created: now,
            last_modified: now,
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

impl Default for Name {
    fn default() -> Self {
        Self {
            given_name: Some("Test".to_string()),
            family_name: Some("User".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Email {
    pub value: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Email {
    /// `<userName>@example.com`, used when a new user carries no emails
    pub fn placeholder(user_name: &str) -> Self {
        Self {
            value: format!("{user_name}@example.com"),
            primary: true,
            kind: Some("work".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub schemas: Vec<String>,
    pub id: String,
    pub user_name: String,
    pub name: Name,
    pub emails: Vec<Email>,
    pub active: bool,
    pub meta: Meta,
}

/// Body of `POST /Users` and `PUT /Users/{id}`
///
/// On PUT, only the attributes present replace the stored ones.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub user_name: Option<String>,
    pub name: Option<Name>,
    pub emails: Option<Vec<Email>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub schemas: Vec<String>,
    pub id: String,
    pub display_name: String,
    pub members: Vec<Member>,
    pub meta: Meta,
}

/// Body of `POST /Groups` and `PUT /Groups/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    pub display_name: Option<String>,
    pub members: Option<Vec<Member>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PatchRequest {
    #[serde(default)]
    pub schemas: Vec<String>,
    #[serde(rename = "Operations")]
    pub operations: Vec<PatchOperation>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PatchOperation {
    /// `add`, `remove` or `replace`, case-insensitive
    pub op: String,
    pub path: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
}

impl PatchOperation {
    pub fn op(&self) -> String {
        self.op.to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub schemas: Vec<String>,
    pub total_results: usize,
    pub start_index: usize,
    pub items_per_page: usize,
    #[serde(rename = "Resources")]
    pub resources: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(resources: Vec<T>) -> Self {
        Self {
            schemas: vec![LIST_RESPONSE_SCHEMA.to_string()],
            total_results: resources.len(),
            start_index: 1,
            items_per_page: resources.len(),
            resources,
        }
    }
}

/// Value of a simple `<attribute> eq "<value>"` filter, if `filter` is one.
pub fn eq_filter<'a>(filter: &'a str, attribute: &str) -> Option<&'a str> {
    let (lhs, rhs) = filter.split_once(" eq ")?;
    if !lhs.trim().eq_ignore_ascii_case(attribute) {
        return None;
    }
    rhs.trim().strip_prefix('"')?.strip_suffix('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq_filter(r#"userName eq "alice""#, "userName"), Some("alice"));
        assert_eq!(eq_filter(r#"displayName eq "Ops Team""#, "displayName"), Some("Ops Team"));
        assert_eq!(eq_filter(r#"userName eq "alice""#, "displayName"), None);
        assert_eq!(eq_filter("userName sw \"a\"", "userName"), None);
    }

    #[test]
    fn test_list_response_envelope() {
        let json = serde_json::to_value(ListResponse::new(vec![1, 2])).unwrap();
        assert_eq!(json["schemas"][0], LIST_RESPONSE_SCHEMA);
        assert_eq!(json["totalResults"], 2);
        assert_eq!(json["startIndex"], 1);
        assert_eq!(json["Resources"], serde_json::json!([1, 2]));
    }
}
