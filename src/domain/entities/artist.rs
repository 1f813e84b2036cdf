//! Artist records and artist applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApplicationId, ArtistId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub follower_count: u64,
}

/// Review state of an application to become an artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether an admin decision has been made.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown application status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistApplication {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub stage_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_note: Option<String>,
}

/// Listener's request to be promoted to an artist account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtistApplication {
    pub stage_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Admin verdict on a pending application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReview {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
}

impl ApplicationReview {
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            status: ApplicationStatus::Approved,
            review_note: None,
        }
    }

    #[must_use]
    pub fn reject(note: impl Into<String>) -> Self {
        Self {
            status: ApplicationStatus::Rejected,
            review_note: Some(note.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_parsing() {
        assert_eq!("Approved".parse(), Ok(ApplicationStatus::Approved));
        assert!("maybe".parse::<ApplicationStatus>().is_err());
        assert!(!ApplicationStatus::Pending.is_decided());
    }

    #[test]
    fn test_application_defaults_to_pending() {
        let json = r#"{"id": 5, "userId": 9, "stageName": "Lumen"}"#;
        let app: ArtistApplication = serde_json::from_str(json).unwrap();

        assert_eq!(app.status, ApplicationStatus::Pending);
        assert!(app.submitted_at.is_none());
    }

    #[test]
    fn test_reject_review_carries_note() {
        let body = serde_json::to_value(ApplicationReview::reject("demo too short")).unwrap();
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["reviewNote"], "demo too short");
    }
}
