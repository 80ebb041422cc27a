//! Wire types for the admin backend

use serde::{Deserialize, Serialize};

/// Wrapper around every backend payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a failed response; only the message is of interest
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshData {
    #[serde(default)]
    pub new_access_token: Option<String>,
}

/// Console user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,
}

/// Writable user fields for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub birthday: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub biography: Option<String>,
}

/// Workshop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 date-time
    #[serde(default)]
    pub date: Option<String>,
}

/// Writable workshop fields for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopInput {
    pub name: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

/// Writable skill fields for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInput {
    pub name: String,
}

/// Dashboard totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub user_count: u64,
    pub workshop_count: u64,
    pub skill_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_envelope_uses_camel_case() {
        let body = json!({
            "data": {
                "id": 3,
                "name": "Hanako",
                "email": "hanako@example.com",
                "phoneNumber": "090-0000-0000",
                "profileImageUrl": "https://cdn.example.com/h.png"
            },
            "message": "ok"
        });

        let envelope: Envelope<User> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.data.id, 3);
        assert_eq!(envelope.data.phone_number.as_deref(), Some("090-0000-0000"));
        assert_eq!(envelope.data.role, None);
        assert_eq!(envelope.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_refresh_payload_without_token() {
        let data: Envelope<RefreshData> = serde_json::from_value(json!({ "data": {} })).unwrap();
        assert!(data.data.new_access_token.is_none());
    }
}
