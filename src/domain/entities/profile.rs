//! Account profile and the locally cached subset of it.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Account role; decides which front end (listener, artist dashboard, admin panel) applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Listener,
    Artist,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listener => "listener",
            Self::Artist => "artist",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn can_publish(self) -> bool {
        matches!(self, Self::Artist | Self::Admin)
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    id: UserId,
    name: String,
    email: String,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    role: Role,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar_url: None,
            role: Role::Listener,
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Display name, email and avatar kept on the device between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedProfile {
    name: String,
    email: String,
    avatar_url: Option<String>,
}

impl CachedProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, avatar_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar_url,
        }
    }

    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name().to_string(),
            email: profile.email().to_string(),
            avatar_url: profile.avatar_url().map(String::from),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Initials shown when the avatar is missing or fails to load.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_role() {
        let json = r#"{"id": 1, "name": "Ada", "email": "ada@example.com", "role": "artist"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.role(), Role::Artist);
        assert!(profile.role().can_publish());
        assert!(profile.avatar_url().is_none());
    }

    #[test]
    fn test_cached_profile_from_profile() {
        let profile = UserProfile::new("1", "Ada Lovelace", "ada@example.com")
            .with_avatar("https://cdn/ada.png");
        let cached = CachedProfile::from_profile(&profile);

        assert_eq!(cached.name(), "Ada Lovelace");
        assert_eq!(cached.avatar_url(), Some("https://cdn/ada.png"));
        assert_eq!(cached.initials(), "AL");
    }

    #[test]
    fn test_initials_placeholder() {
        let cached = CachedProfile::new("  ", "x@example.com", None);
        assert_eq!(cached.initials(), "?");
    }
}
