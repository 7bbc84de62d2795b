//! The email-keyed user directory backing the auth and update routes.

use std::collections::HashMap;

use crate::types::{Role, UpdateUserRequest, User, UserSummary};

/// In-memory user store for one test session.
///
/// Records are keyed by their current email, but the update path looks
/// records up by `id`, so a record stays addressable across email changes.
/// The two-key scheme is deliberate and load-bearing for the profile-edit
/// flows; do not collapse it into a single key.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three-persona fixture every test session starts from.
    pub fn seeded() -> Self {
        let mut dir = Self::new();
        dir.insert(User {
            id: "1".into(),
            name: "dinerUser".into(),
            email: "d@jwt.com".into(),
            password: "diner".into(),
            roles: vec![Role::Diner.into()],
        });
        dir.insert(User {
            id: "2".into(),
            name: "franchiseeUser".into(),
            email: "f@jwt.com".into(),
            password: "franchisee".into(),
            roles: vec![Role::Franchisee.into()],
        });
        dir.insert(User {
            id: "3".into(),
            name: "adminUser".into(),
            email: "a@jwt.com".into(),
            password: "admin".into(),
            roles: vec![Role::Admin.into()],
        });
        dir
    }

    pub fn insert(&mut self, user: User) {
        self.users.insert(user.email.clone(), user);
    }

    pub fn get(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Credential check for the login route. Never touches session state.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&User> {
        self.users.get(email).filter(|u| u.password == password)
    }

    /// Apply a partial update to the record whose `id` matches.
    ///
    /// The overlay lands on a copy first and only then is the old entry
    /// swapped out for the new one, so a failure part-way can never leave
    /// the directory half updated. Returns the new record, or `None` when
    /// no record has the requested id.
    pub fn update(&mut self, req: &UpdateUserRequest) -> Option<User> {
        let old = self.users.values().find(|u| u.id == req.id)?.clone();

        let mut updated = old.clone();
        if let Some(name) = supplied(req.name.as_deref()) {
            updated.name = name.to_string();
        }
        if let Some(email) = supplied(req.email.as_deref()) {
            updated.email = email.to_string();
        }
        if let Some(password) = supplied(req.password.as_deref()) {
            updated.password = password.to_string();
        }

        self.users.remove(&old.email);
        self.users.insert(updated.email.clone(), updated.clone());
        Some(updated)
    }

    /// Password-free projection of every record, ordered by id.
    pub fn summaries(&self) -> Vec<UserSummary> {
        let mut users: Vec<UserSummary> = self.users.values().map(User::summary).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }
}

/// The fixture this mock reproduces treats an empty string the same as an
/// omitted field, so the overlay does too.
fn supplied(field: Option<&str>) -> Option<&str> {
    field.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_req(id: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn seeded_directory_keys_match_emails() {
        let dir = UserDirectory::seeded();
        assert_eq!(dir.len(), 3);
        for email in ["d@jwt.com", "f@jwt.com", "a@jwt.com"] {
            assert_eq!(dir.get(email).unwrap().email, email);
        }
    }

    #[test]
    fn authenticate_checks_both_email_and_password() {
        let dir = UserDirectory::seeded();
        assert!(dir.authenticate("d@jwt.com", "diner").is_some());
        assert!(dir.authenticate("d@jwt.com", "wrong").is_none());
        assert!(dir.authenticate("nobody@jwt.com", "diner").is_none());
    }

    #[test]
    fn update_name_only_keeps_other_fields() {
        let mut dir = UserDirectory::seeded();
        let mut req = update_req("1");
        req.name = Some("dinerUser2".into());
        let updated = dir.update(&req).unwrap();

        assert_eq!(updated.name, "dinerUser2");
        assert_eq!(updated.email, "d@jwt.com");
        assert_eq!(updated.password, "diner");
        assert_eq!(updated.id, "1");
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn update_email_rekeys_the_record() {
        let mut dir = UserDirectory::seeded();
        let mut req = update_req("1");
        req.email = Some("d2@jwt.com".into());
        dir.update(&req).unwrap();

        assert!(dir.get("d@jwt.com").is_none(), "stale key must be gone");
        let moved = dir.get("d2@jwt.com").unwrap();
        assert_eq!(moved.id, "1", "id survives the email change");
        assert_eq!(moved.name, "dinerUser");
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn update_remains_addressable_by_id_after_email_change() {
        let mut dir = UserDirectory::seeded();
        let mut req = update_req("1");
        req.email = Some("d2@jwt.com".into());
        dir.update(&req).unwrap();

        // Second update targets the same id at its new email.
        let mut req = update_req("1");
        req.password = Some("diner2".into());
        let updated = dir.update(&req).unwrap();
        assert_eq!(updated.email, "d2@jwt.com");
        assert_eq!(updated.password, "diner2");
        assert!(dir.authenticate("d2@jwt.com", "diner2").is_some());
    }

    #[test]
    fn update_unknown_id_changes_nothing() {
        let mut dir = UserDirectory::seeded();
        let mut req = update_req("99");
        req.name = Some("ghost".into());
        assert!(dir.update(&req).is_none());
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.get("d@jwt.com").unwrap().name, "dinerUser");
    }

    #[test]
    fn empty_string_field_keeps_prior_value() {
        let mut dir = UserDirectory::seeded();
        let mut req = update_req("1");
        req.name = Some(String::new());
        req.password = Some("diner2".into());
        let updated = dir.update(&req).unwrap();
        assert_eq!(updated.name, "dinerUser");
        assert_eq!(updated.password, "diner2");
    }

    #[test]
    fn summaries_are_ordered_and_password_free() {
        let dir = UserDirectory::seeded();
        let summaries = dir.summaries();
        let ids: Vec<&str> = summaries.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(summaries[2].name, "adminUser");
    }
}
