use serde::Serialize;
use sqlx::FromRow;

/// Account record. Serializes to the public profile shape; unset contact
/// fields are empty strings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
}

/// Contact fields to overwrite; `None` keeps the stored value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactChanges<'a> {
    pub firstname: Option<&'a str>,
    pub lastname: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl ContactChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}
