//! Pure domain rules with no I/O.

pub mod duration;
pub mod email;
pub mod password_policy;

pub use duration::{format_duration, format_duration_ms};
pub use email::{looks_like_email, normalize_email};
pub use password_policy::{
    PasswordPolicyError, PasswordStrength, password_score, password_strength, validate_password,
};
