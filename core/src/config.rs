//! Connection options for the Transifex API.

use std::fmt;

use serde::Deserialize;

use crate::error::TransifexError;

pub const DEFAULT_BASE_URI: &str = "https://www.transifex.com";

/// Immutable connection parameters shared by every connector built from them.
///
/// Deserializes from both the short keys (`username`) and the dotted keys
/// used by older configuration files (`api.username`).
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Options {
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
    #[serde(default, alias = "api.username")]
    pub username: Option<String>,
    #[serde(default, alias = "api.password")]
    pub password: Option<String>,
}

fn default_base_uri() -> String {
    DEFAULT_BASE_URI.to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            username: None,
            password: None,
        }
    }
}

impl Options {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Load options from `TRANSIFEX_USERNAME`, `TRANSIFEX_PASSWORD` and
    /// `TRANSIFEX_BASE_URI`. Missing credentials are left as `None` and
    /// reported when a connector is created.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `from_env` over an arbitrary variable source. Set-but-empty values
    /// count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            base_uri: var("TRANSIFEX_BASE_URI").unwrap_or_else(default_base_uri),
            username: var("TRANSIFEX_USERNAME"),
            password: var("TRANSIFEX_PASSWORD"),
        }
    }

    /// Both credentials, or `MissingCredentials`. Empty strings count as absent.
    pub fn credentials(&self) -> Result<(&str, &str), TransifexError> {
        let username = self.username.as_deref().filter(|u| !u.is_empty());
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(TransifexError::MissingCredentials(
                "a Transifex username and password are required".to_string(),
            )),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("base_uri", &self.base_uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
