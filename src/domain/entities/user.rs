//! Marketplace user identity.

use serde::{Deserialize, Serialize};

/// Name and email of the signed-in account.
///
/// The default value is the anonymous identity: both fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Account email.
    #[serde(default)]
    pub email: String,
}

impl UserProfile {
    /// Creates a profile.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the anonymous identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns whether this is the anonymous identity.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    /// Name to greet the user with, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity() {
        let user = UserProfile::anonymous();
        assert!(user.is_anonymous());
        assert_eq!(user.display_name(), "");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserProfile::new("", "ana@example.com");
        assert!(!user.is_anonymous());
        assert_eq!(user.display_name(), "ana@example.com");
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let user: UserProfile =
            serde_json::from_str(r#"{"_id":"1","name":"Ana","email":"ana@example.com"}"#).unwrap();
        assert_eq!(user, UserProfile::new("Ana", "ana@example.com"));
    }
}
