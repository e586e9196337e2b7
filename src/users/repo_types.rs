use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::password::verify_password;
use crate::store::FieldValue;

pub const USERS_TABLE: &str = "users_table";
pub const USER_KEY: &str = "user_id";

/// User record in the database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub user_email: String,
    #[serde(skip_serializing)]
    pub user_password: String, // Argon2 hash, not exposed in JSON
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("user_email", &self.user_email)
            .field("user_password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl User {
    /// False for a wrong password or an unreadable stored hash.
    pub fn password_matches(&self, plain: &str) -> bool {
        verify_password(plain, &self.user_password).unwrap_or(false)
    }
}

/// Columns a caller may filter users by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Email,
    Password,
}

impl UserField {
    pub fn column(self) -> &'static str {
        match self {
            UserField::Id => USER_KEY,
            UserField::Email => "user_email",
            UserField::Password => "user_password",
        }
    }
}

impl std::fmt::Display for UserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Equality filter on one user column, with the value typed to match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(i64),
    Email(String),
    Password(String),
}

impl UserFilter {
    pub fn field(&self) -> UserField {
        match self {
            UserFilter::Id(_) => UserField::Id,
            UserFilter::Email(_) => UserField::Email,
            UserFilter::Password(_) => UserField::Password,
        }
    }

    pub fn into_value(self) -> FieldValue {
        match self {
            UserFilter::Id(id) => FieldValue::Int(id),
            UserFilter::Email(v) | UserFilter::Password(v) => FieldValue::Text(v),
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        UserFilter::Email(email.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_postgres_row_json() {
        let user: User = serde_json::from_value(json!({
            "user_id": 7,
            "user_email": "a@x.com",
            "user_password": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
            "created_at": "2024-05-01T12:34:56.789012+00:00"
        }))
        .unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.created_at.map(|t| t.year()), Some(2024));
    }

    #[test]
    fn created_at_is_optional() {
        let user: User = serde_json::from_value(json!({
            "user_id": 1,
            "user_email": "a@x.com",
            "user_password": "h"
        }))
        .unwrap();
        assert!(user.created_at.is_none());
    }

    #[test]
    fn password_hash_is_hidden() {
        let user = User {
            user_id: 1,
            user_email: "a@x.com".into(),
            user_password: "secret-hash".into(),
            created_at: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("secret-hash"));
        assert!(!format!("{:?}", user).contains("secret-hash"));
    }

    #[test]
    fn filter_values_follow_column_type() {
        let id = UserFilter::Id(7);
        assert_eq!(id.field(), UserField::Id);
        assert_eq!(id.into_value(), FieldValue::Int(7));

        let email = UserFilter::email("a@x.com");
        assert_eq!(email.field().column(), "user_email");
        assert_eq!(email.into_value(), FieldValue::Text("a@x.com".into()));
    }

    #[test]
    fn field_columns() {
        assert_eq!(UserField::Id.column(), "user_id");
        assert_eq!(UserField::Email.to_string(), "user_email");
        assert_eq!(UserField::Password.column(), "user_password");
    }
}
