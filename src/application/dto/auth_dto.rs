//! Authentication DTOs.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::entities::UserProfile;

/// Source of the bearer token used for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token saved by a previous login.
    Stored,
    /// Token passed on the command line or via `MELODECK_TOKEN`.
    CommandLine,
    /// Token obtained from a fresh login.
    Login,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Stored => "saved session",
            Self::CommandLine => "command line / environment",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Login request data.
#[derive(Clone)]
pub struct LoginRequest {
    /// Email as typed by the user.
    pub email: String,
    /// Plain password, wiped from memory on drop.
    pub password: Zeroizing<String>,
    /// Whether to keep the session on this device.
    pub remember: bool,
}

impl LoginRequest {
    /// Creates new login request that remembers the session.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            remember: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.remember = false;
        self
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember", &self.remember)
            .finish()
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Authenticated profile.
    pub profile: UserProfile,
    /// Whether token and profile cache were written to local storage.
    pub session_persisted: bool,
}

impl LoginResponse {
    #[must_use]
    pub const fn new(profile: UserProfile, session_persisted: bool) -> Self {
        Self {
            profile,
            session_persisted,
        }
    }
}

/// Account registration form.
#[derive(Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    /// Repeated password; checked only when present.
    pub confirmation: Option<Zeroizing<String>>,
}

impl RegisterRequest {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
            confirmation: None,
        }
    }

    #[must_use]
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = Some(Zeroizing::new(confirmation.into()));
        self
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirmation", &self.confirmation.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
