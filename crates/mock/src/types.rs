//! Wire types shared by the mock routes and their callers.

use serde::{Deserialize, Serialize};

/// Fixed placeholder token returned by the auth and update routes. The UI
/// under test only checks that a token is present, never its contents.
pub const MOCK_TOKEN: &str = "abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Diner,
    Franchisee,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Diner => "diner",
            Role::Franchisee => "franchisee",
            Role::Admin => "admin",
        }
    }
}

/// Wire form of a role: `{"role": "diner"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: Role,
}

impl From<Role> for RoleEntry {
    fn from(role: Role) -> Self {
        Self { role }
    }
}

/// A full directory record. `password` is plaintext because this is test
/// fixture data, never a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<RoleEntry>,
}

impl User {
    /// Password-free projection used by the listing route.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: u32,
    pub name: String,
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial update keyed by `id`. Omitted fields keep their prior values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body of a successful login or update: `{user, token}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub more: bool,
}

/// Franchise listing body. The catalog-filtering route omits `more`, the
/// always-empty variant sends `more: false`; both shapes share this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseListResponse {
    pub franchises: Vec<Franchise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_form_is_lowercase() {
        let entry: RoleEntry = Role::Franchisee.into();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json, serde_json::json!({"role": "franchisee"}));
    }

    #[test]
    fn update_request_tolerates_missing_fields() {
        let req: UpdateUserRequest =
            serde_json::from_value(serde_json::json!({"id": "1", "name": "dinerUser2"})).unwrap();
        assert_eq!(req.name.as_deref(), Some("dinerUser2"));
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn summary_drops_password() {
        let user = User {
            id: "1".into(),
            name: "dinerUser".into(),
            email: "d@jwt.com".into(),
            password: "diner".into(),
            roles: vec![Role::Diner.into()],
        };
        let json = serde_json::to_value(user.summary()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "d@jwt.com");
    }
}
