use serde::Deserialize;

use crate::error::ApiError;

/// Request body for signup and signin.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

impl AuthRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() {
            return Err(ApiError::invalid_request("username is required"));
        }
        if self.password.is_empty() {
            return Err(ApiError::invalid_request("password is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        let req: AuthRequest =
            serde_json::from_str(r#"{"username":"","password":"pw"}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "Invalid request: username is required."
        );

        let req: AuthRequest =
            serde_json::from_str(r#"{"username":"alice","password":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        assert!(serde_json::from_str::<AuthRequest>(r#"{"username":"alice"}"#).is_err());
    }
}
