use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::common::CheckedPayload;
use crate::models::contact::Contact;
use crate::models::translation::Language;

pub const CONTACT_ACCEPTED: &str = "Murojaatingiz qabul qilindi. Tez orada aloqaga chiqamiz.";
pub const CONTACT_MARKED_READ: &str = "Murojaat o'qilgan deb belgilandi";

/// Missing fields deserialize as empty strings so they surface as field
/// errors instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactPayload {
    #[validate(length(min = 1, max = 255, message = "This field is required."))]
    pub full_name: String,
    #[validate(length(min = 1, max = 30, message = "This field is required."))]
    pub phone_number: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub message: String,
}

impl ContactPayload {
    pub fn trimmed(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

impl CheckedPayload for ContactPayload {
    fn check(&self, _primary: Language) -> Result<(), ValidationErrors> {
        self.validate()
    }
}

/// Staff PUT body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactUpdate {
    #[serde(flatten)]
    pub payload: ContactPayload,
    #[serde(default)]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

/// Stored state of a contact as written back by updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactFields {
    pub payload: ContactPayload,
    pub is_read: bool,
}

impl ContactPatch {
    pub fn apply(self, fields: &mut ContactFields) {
        if let Some(v) = self.full_name {
            fields.payload.full_name = v;
        }
        if let Some(v) = self.phone_number {
            fields.payload.phone_number = v;
        }
        if let Some(v) = self.email {
            fields.payload.email = v;
        }
        if let Some(v) = self.message {
            fields.payload.message = v;
        }
        if let Some(v) = self.is_read {
            fields.is_read = v;
        }
    }
}

impl From<&Contact> for ContactFields {
    fn from(value: &Contact) -> Self {
        Self {
            payload: ContactPayload {
                full_name: value.full_name.clone(),
                phone_number: value.phone_number.clone(),
                email: value.email.clone(),
                message: value.message.clone(),
            },
            is_read: value.is_read,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            phone_number: value.phone_number,
            email: value.email,
            message: value.message,
            is_read: value.is_read,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_become_field_errors() {
        let payload: ContactPayload = serde_json::from_value(json!({"full_name": "Ali"})).unwrap();
        let err = payload.check(Language::UzLatn).unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("phone_number"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("full_name"));
    }

    #[test]
    fn rejects_malformed_email() {
        let payload = ContactPayload {
            full_name: "Ali".into(),
            phone_number: "+998901234567".into(),
            email: "not-an-email".into(),
            message: "Salom".into(),
        };
        let err = payload.check(Language::UzLatn).unwrap_err();
        assert!(err.field_errors().contains_key("email"));
    }

    #[test]
    fn whitespace_only_name_is_empty_after_trim() {
        let payload = ContactPayload {
            full_name: "   ".into(),
            phone_number: "+998901234567".into(),
            email: "ali@example.com".into(),
            message: "Salom".into(),
        }
        .trimmed();
        assert!(payload.check(Language::UzLatn).is_err());
    }

    #[test]
    fn patch_can_toggle_read_flag() {
        let mut fields = ContactFields::default();
        ContactPatch {
            is_read: Some(true),
            ..Default::default()
        }
        .apply(&mut fields);
        assert!(fields.is_read);
    }
}
