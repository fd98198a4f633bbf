use serde::{Deserialize, Serialize};

/// Account profile as returned by `GET /user/profile`.
///
/// Replaced wholesale on every successful fetch; never mutated field-wise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl UserProfile {
    /// Display name for the profile menu: "First Last", falling back to
    /// the username when no name parts are set.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let full = format!("{} {}", first, last);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let json = r#"{"id":"1","username":"jdoe","email":"j@x.com","firstName":"Jane","lastName":"Doe","createdAt":"2024-01-01T00:00:00Z"}"#;
        let profile: UserProfile = serde_json::from_str(json).expect("Failed to parse profile JSON");
        assert_eq!(profile.id, "1");
        assert_eq!(profile.username, "jdoe");
        assert_eq!(profile.display_name(), "Jane Doe");
    }

    #[test]
    fn test_parse_profile_minimal() {
        // firstName/lastName are optional, createdAt may be absent
        let json = r#"{"id":"2","username":"ab","email":"a@b.com"}"#;
        let profile: UserProfile = serde_json::from_str(json).expect("Failed to parse minimal profile");
        assert!(profile.first_name.is_none());
        assert_eq!(profile.display_name(), "ab");
        assert_eq!(profile.created_at, "");
    }
}
