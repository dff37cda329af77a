//! # Login Gate
//!
//! A single store-wide credential pair. Both user and password compare
//! case-insensitively; there are no accounts, roles or sessions.

use crate::error::{CoreError, CoreResult};

/// Default store user.
pub const DEFAULT_USER: &str = "CATANDUVA";

/// Default store password.
pub const DEFAULT_PASSWORD: &str = "LOJA 04";

/// The expected credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Case-insensitive comparison of both fields.
    pub fn matches(&self, user: &str, password: &str) -> bool {
        self.user.to_uppercase() == user.to_uppercase()
            && self.password.to_uppercase() == password.to_uppercase()
    }

    /// Like [`Credentials::matches`], as a `Result`.
    pub fn verify(&self, user: &str, password: &str) -> CoreResult<()> {
        if self.matches(user, password) {
            Ok(())
        } else {
            Err(CoreError::InvalidCredentials)
        }
    }
}
