use std::convert::Infallible;

use bookhouse_db::{Document, Stored};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

pub type User = Stored<UserDocument>;

/// Registration form as posted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRegistration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl UserRegistration {
    /// True when any field is blank.
    pub fn has_blank_field(&self) -> bool {
        [&self.name, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|value| value.trim().is_empty())
    }
}

/// Persisted user. The password is only kept as a SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub name: String,
    pub email: String,
    pub password_digest: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl UserDocument {
    pub fn from_registration(registration: &UserRegistration, created_at: OffsetDateTime) -> Self {
        Self {
            name: registration.name.trim().to_string(),
            email: normalize_email(&registration.email),
            password_digest: password_digest(&registration.password),
            created_at,
        }
    }
}

/// Users are never edited after registration.
impl Document for UserDocument {
    type Patch = Infallible;

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            password_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn document_never_holds_plain_password() {
        let registration = UserRegistration {
            name: " Ada ".to_string(),
            email: "Ada@Example.com ".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };
        let document = UserDocument::from_registration(&registration, OffsetDateTime::UNIX_EPOCH);

        assert_eq!(document.name, "Ada");
        assert_eq!(document.email, "ada@example.com");
        assert_ne!(document.password_digest, "hunter22");
        assert_eq!(document.password_digest.len(), 64);
    }

    #[test]
    fn blank_fields_are_detected() {
        assert!(UserRegistration::default().has_blank_field());
    }
}
