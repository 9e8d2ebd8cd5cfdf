//! Supported file formats.
//!
//! See <https://docs.transifex.com/api/formats>.

use std::sync::Arc;

use crate::config::Options;
use crate::error::{ApiError, TransifexError};
use crate::http::{HttpResponse, Transport};

use super::ConnectorCore;

#[derive(Debug, Clone)]
pub struct Formats {
    core: ConnectorCore,
}

impl Formats {
    pub fn new(transport: Arc<dyn Transport>, options: &Options) -> Result<Self, TransifexError> {
        Ok(Self {
            core: ConnectorCore::new(transport, options)?,
        })
    }

    pub fn get_formats(&self) -> Result<HttpResponse, ApiError> {
        self.core.get(&self.core.uri("/api/2/formats"))
    }
}
