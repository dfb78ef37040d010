use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EntityKind;
use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Property ids, each present at most once
    #[serde(default)]
    pub saved_properties: Vec<String>,
    /// Property ids owned by this user
    #[serde(default)]
    pub listings: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Returns false when the property was already saved.
    pub fn save(&mut self, property_id: &str) -> bool {
        if self.saved_properties.iter().any(|id| id == property_id) {
            return false;
        }
        self.saved_properties.push(property_id.to_string());
        true
    }

    /// Returns false when the property was not saved.
    pub fn unsave(&mut self, property_id: &str) -> bool {
        let before = self.saved_properties.len();
        self.saved_properties.retain(|id| id != property_id);
        self.saved_properties.len() != before
    }

    /// Drop every reference this user holds to `property_id`.
    pub fn forget(&mut self, property_id: &str) -> bool {
        let unsaved = self.unsave(property_id);
        let before = self.listings.len();
        self.listings.retain(|id| id != property_id);
        unsaved || self.listings.len() != before
    }
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl NewUser {
    /// Accounts always start with nothing saved and nothing listed.
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            saved_properties: Vec::new(),
            listings: Vec::new(),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub saved_properties: Option<Vec<String>>,
    pub listings: Option<Vec<String>>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(mut saved) = self.saved_properties {
            dedup_in_order(&mut saved);
            user.saved_properties = saved;
        }
        if let Some(listings) = self.listings {
            user.listings = listings;
        }
    }
}

fn dedup_in_order(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        NewUser {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            phone: String::new(),
        }
        .into_record("u-1".into(), Utc::now())
    }

    #[test]
    fn save_is_idempotent() {
        let mut user = user();
        assert!(user.save("p-1"));
        assert!(!user.save("p-1"));
        assert_eq!(user.saved_properties, vec!["p-1".to_string()]);
    }

    #[test]
    fn unsave_missing_id_is_a_no_op() {
        let mut user = user();
        user.save("p-1");
        assert!(!user.unsave("p-2"));
        assert_eq!(user.saved_properties.len(), 1);
    }

    #[test]
    fn forget_clears_saved_and_listed() {
        let mut user = user();
        user.save("p-1");
        user.listings.push("p-1".into());
        assert!(user.forget("p-1"));
        assert!(user.saved_properties.is_empty());
        assert!(user.listings.is_empty());
        assert!(!user.forget("p-1"));
    }

    #[test]
    fn patch_keeps_saved_properties_a_set() {
        let mut user = user();
        UserPatch {
            saved_properties: Some(vec!["a".into(), "b".into(), "a".into()]),
            ..UserPatch::default()
        }
        .apply(&mut user);
        assert_eq!(user.saved_properties, vec!["a".to_string(), "b".to_string()]);
    }
}
