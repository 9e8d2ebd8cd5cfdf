//! Shared request construction for every connector.
//!
//! # Design
//! `RequestBuilder` is a small value owned by each connector: it knows the
//! base URI and the `Authorization` header derived from the credentials, and
//! nothing else. Connectors compose a `Uri`, optionally decorate it with bare
//! query flags, and turn it into an `HttpRequest`.

use std::borrow::Cow;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;

use crate::config::Options;
use crate::error::TransifexError;
use crate::http::{HttpMethod, HttpRequest, AUTHORIZATION};

/// Query flag asking the API for extended details.
pub const DETAILS: &str = "details";
/// Query flag telling the API to drop unknown usernames instead of failing.
pub const SKIP_INVALID_USERNAME: &str = "skip_invalid_username";

/// An absolute URI with zero or more valueless query flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    location: String,
    flags: Vec<String>,
}

impl Uri {
    /// Append a bare query flag. Flags accumulate; repeating one is a no-op.
    pub fn with_query(mut self, flag: &str) -> Self {
        if !self.flags.iter().any(|existing| existing == flag) {
            self.flags.push(flag.to_string());
        }
        self
    }

    /// Append `flag` only when `enabled` is set.
    pub fn with_query_if(self, enabled: bool, flag: &str) -> Self {
        if enabled {
            self.with_query(flag)
        } else {
            self
        }
    }

    /// The URI without its query string.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn query(&self) -> Option<String> {
        if self.flags.is_empty() {
            None
        } else {
            Some(self.flags.join("&"))
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)?;
        if let Some(query) = self.query() {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

/// Percent-encode a caller-supplied path segment (project slug, language
/// code, resource slug).
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

#[derive(Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    base_uri: String,
    authorization: String,
}

impl RequestBuilder {
    /// Build from options, failing with `MissingCredentials` when either
    /// credential is absent and `InvalidConfiguration` when the base URI is
    /// blank.
    pub fn new(options: &Options) -> Result<Self, TransifexError> {
        let (username, password) = options.credentials()?;
        let base_uri = options.base_uri.trim().trim_end_matches('/');
        if base_uri.is_empty() {
            warn!("empty Transifex base URI");
            return Err(TransifexError::InvalidConfiguration(
                "a Transifex base URI is required".to_string(),
            ));
        }
        let token = STANDARD.encode(format!("{username}:{password}"));
        Ok(Self {
            base_uri: base_uri.to_string(),
            authorization: format!("Basic {token}"),
        })
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Join the base URI with an API path such as `/api/2/formats`. The
    /// path's trailing slash, if any, is preserved.
    pub fn create_uri(&self, path: &str) -> Uri {
        let location = if path.starts_with('/') {
            format!("{}{path}", self.base_uri)
        } else {
            format!("{}/{path}", self.base_uri)
        };
        Uri {
            location,
            flags: Vec::new(),
        }
    }

    /// A bodiless request carrying only the `Authorization` header.
    pub fn create_request(&self, method: HttpMethod, uri: &Uri) -> HttpRequest {
        HttpRequest {
            method,
            uri: uri.to_string(),
            headers: vec![(AUTHORIZATION.to_string(), self.authorization.clone())],
            body: None,
        }
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_uri", &self.base_uri)
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}
