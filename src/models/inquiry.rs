use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EntityKind;
use crate::store::Record;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    Pending,
    Responded,
    Closed,
}

/// A prospective buyer or tenant asking about a listing.
///
/// `property_id` is a weak reference: nothing checks that the property
/// exists, see `Services::delete_property_cascade` for cleanup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: InquiryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Inquiry {
    const KIND: EntityKind = EntityKind::Inquiry;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    pub property_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl NewInquiry {
    /// New inquiries always start out pending, stamped with `now`.
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> Inquiry {
        Inquiry {
            id,
            property_id: self.property_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            timestamp: now,
            status: InquiryStatus::Pending,
            user_id: self.user_id,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryPatch {
    pub property_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: Option<InquiryStatus>,
    /// `None` keeps the stored user, `Some(None)` (JSON `null`) clears it.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<Option<String>>,
}

/// Distinguish an explicit `null` from a missing key. A missing key takes
/// the field default and never reaches this function.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl InquiryPatch {
    pub fn apply(self, inquiry: &mut Inquiry) {
        if let Some(property_id) = self.property_id {
            inquiry.property_id = property_id;
        }
        if let Some(name) = self.name {
            inquiry.name = name;
        }
        if let Some(email) = self.email {
            inquiry.email = email;
        }
        if let Some(phone) = self.phone {
            inquiry.phone = phone;
        }
        if let Some(message) = self.message {
            inquiry.message = message;
        }
        if let Some(status) = self.status {
            inquiry.status = status;
        }
        if let Some(user_id) = self.user_id {
            inquiry.user_id = user_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_inquiries_start_pending() {
        let now = Utc::now();
        let inquiry = NewInquiry {
            property_id: "p-1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            message: "Is it still available?".into(),
            user_id: None,
        }
        .into_record("i-1".into(), now);

        assert_eq!(inquiry.status, InquiryStatus::Pending);
        assert_eq!(inquiry.timestamp, now);
        assert!(inquiry.updated_at.is_none());
    }

    fn seeded(user_id: Option<&str>) -> Inquiry {
        NewInquiry {
            property_id: "p-1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            message: "Hello".into(),
            user_id: user_id.map(str::to_string),
        }
        .into_record("i-1".into(), Utc::now())
    }

    #[test]
    fn patch_with_null_user_id_clears_it() {
        let mut inquiry = seeded(Some("u-1"));
        let patch: InquiryPatch = serde_json::from_str(r#"{ "userId": null }"#).unwrap();
        assert_eq!(patch.user_id, Some(None));

        patch.apply(&mut inquiry);
        assert_eq!(inquiry.user_id, None);
    }

    #[test]
    fn patch_without_user_id_keeps_it() {
        let mut inquiry = seeded(Some("u-1"));
        let patch: InquiryPatch =
            serde_json::from_str(r#"{ "message": "Still there?" }"#).unwrap();
        assert_eq!(patch.user_id, None);

        patch.apply(&mut inquiry);
        assert_eq!(inquiry.user_id.as_deref(), Some("u-1"));
        assert_eq!(inquiry.message, "Still there?");
    }

    #[test]
    fn patch_can_assign_a_user() {
        let mut inquiry = seeded(None);
        InquiryPatch {
            user_id: Some(Some("u-2".into())),
            ..Default::default()
        }
        .apply(&mut inquiry);
        assert_eq!(inquiry.user_id.as_deref(), Some("u-2"));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&InquiryStatus::Responded).unwrap();
        assert_eq!(json, "\"responded\"");
    }
}
