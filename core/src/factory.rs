//! Resolve a connector name to a constructed connector.
//!
//! # Design
//! The set of connectors is closed and known at compile time, so the
//! registry is the `ConnectorKind` enum rather than a runtime map. String
//! names are parsed into a kind first; unknown names fail there, before the
//! options are looked at.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Options;
use crate::connector::{Formats, Languages, Resources};
use crate::error::TransifexError;
use crate::http::Transport;

/// Every connector the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Formats,
    Languages,
    Resources,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 3] = [ConnectorKind::Formats, ConnectorKind::Languages, ConnectorKind::Resources];

    pub fn name(self) -> &'static str {
        match self {
            ConnectorKind::Formats => "formats",
            ConnectorKind::Languages => "languages",
            ConnectorKind::Resources => "resources",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConnectorKind {
    type Err = TransifexError;

    /// Names are matched case-insensitively (`"Languages"` and `"languages"`
    /// are the same connector).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ConnectorKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| TransifexError::UnknownApiConnector(name.to_string()))
    }
}

/// A constructed connector of any kind.
#[derive(Debug, Clone)]
pub enum ApiConnector {
    Formats(Formats),
    Languages(Languages),
    Resources(Resources),
}

impl ApiConnector {
    pub fn kind(&self) -> ConnectorKind {
        match self {
            ApiConnector::Formats(_) => ConnectorKind::Formats,
            ApiConnector::Languages(_) => ConnectorKind::Languages,
            ApiConnector::Resources(_) => ConnectorKind::Resources,
        }
    }

    pub fn as_formats(&self) -> Option<&Formats> {
        match self {
            ApiConnector::Formats(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_languages(&self) -> Option<&Languages> {
        match self {
            ApiConnector::Languages(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_resources(&self) -> Option<&Resources> {
        match self {
            ApiConnector::Resources(c) => Some(c),
            _ => None,
        }
    }
}

/// Creates API connectors by name.
pub trait ConnectorFactory {
    fn create_api_connector(&self, name: &str, options: &Options) -> Result<ApiConnector, TransifexError>;
}

/// Builds connectors that share one transport.
#[derive(Clone)]
pub struct ApiFactory {
    transport: Arc<dyn Transport>,
}

impl ApiFactory {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn create(&self, kind: ConnectorKind, options: &Options) -> Result<ApiConnector, TransifexError> {
        debug!(connector = %kind, base_uri = %options.base_uri, "creating API connector");
        let transport = self.transport.clone();
        Ok(match kind {
            ConnectorKind::Formats => ApiConnector::Formats(Formats::new(transport, options)?),
            ConnectorKind::Languages => ApiConnector::Languages(Languages::new(transport, options)?),
            ConnectorKind::Resources => ApiConnector::Resources(Resources::new(transport, options)?),
        })
    }

    pub fn formats(&self, options: &Options) -> Result<Formats, TransifexError> {
        Formats::new(self.transport.clone(), options)
    }

    pub fn languages(&self, options: &Options) -> Result<Languages, TransifexError> {
        Languages::new(self.transport.clone(), options)
    }

    pub fn resources(&self, options: &Options) -> Result<Resources, TransifexError> {
        Resources::new(self.transport.clone(), options)
    }
}

impl ConnectorFactory for ApiFactory {
    fn create_api_connector(&self, name: &str, options: &Options) -> Result<ApiConnector, TransifexError> {
        let kind = name.parse::<ConnectorKind>().inspect_err(|_| {
            warn!(connector = name, "unknown API connector requested");
        })?;
        self.create(kind, options)
    }
}

impl fmt::Debug for ApiFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFactory").finish_non_exhaustive()
    }
}
