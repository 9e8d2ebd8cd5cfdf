//! Connectors group the API operations of one Transifex resource area.
//!
//! # Design
//! Every connector wraps a `ConnectorCore`: a shared `Transport` handle plus
//! the `RequestBuilder` derived from the options it was created with. Each
//! public method validates its arguments, builds exactly one request, sends
//! it, and returns the raw response. Nothing is cached between calls.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Options;
use crate::error::{ApiError, TransifexError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::request::{RequestBuilder, Uri};

pub mod formats;
pub mod languages;
pub mod resources;

pub use formats::Formats;
pub use languages::Languages;
pub use resources::Resources;

/// Transport handle and request builder shared by a connector's methods.
#[derive(Clone)]
pub struct ConnectorCore {
    transport: Arc<dyn Transport>,
    requests: RequestBuilder,
}

impl ConnectorCore {
    pub fn new(transport: Arc<dyn Transport>, options: &Options) -> Result<Self, TransifexError> {
        Ok(Self {
            transport,
            requests: RequestBuilder::new(options)?,
        })
    }

    pub(crate) fn uri(&self, path: &str) -> Uri {
        self.requests.create_uri(path)
    }

    pub(crate) fn request(&self, method: HttpMethod, uri: &Uri) -> HttpRequest {
        self.requests.create_request(method, uri)
    }

    pub(crate) fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let uri = request.uri.clone();
        debug!(%method, %uri, "sending Transifex API request");
        let response = self.transport.send(request)?;
        debug!(%method, %uri, status = response.status, "received Transifex API response");
        Ok(response)
    }

    /// GET `uri` with no body.
    pub(crate) fn get(&self, uri: &Uri) -> Result<HttpResponse, ApiError> {
        self.send(self.request(HttpMethod::Get, uri))
    }
}

impl fmt::Debug for ConnectorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorCore")
            .field("base_uri", &self.requests.base_uri())
            .finish_non_exhaustive()
    }
}

/// Reject an empty member list before anything is built.
pub(crate) fn require_members(members: &[String], message: &str) -> Result<(), TransifexError> {
    if members.is_empty() {
        warn!("{message}");
        return Err(TransifexError::InvalidConfiguration(message.to_string()));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::http::TransportError;

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new("connection refused"))
        }
    }

    #[test]
    fn transport_errors_pass_through_unchanged() {
        let core = ConnectorCore::new(Arc::new(FailingTransport), &Options::new("a", "b")).unwrap();
        let err = core.get(&core.uri("/api/2/formats")).unwrap_err();
        match err {
            ApiError::Transport(e) => assert_eq!(e, TransportError::new("connection refused")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn response_is_returned_verbatim() {
        let (transport, core) = core();
        let response = core.get(&core.uri("/api/2/formats")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{}");
        assert_eq!(transport.taken().len(), 1);
    }

    #[test]
    fn empty_members_are_rejected() {
        let err = require_members(&[], "need one").unwrap_err();
        assert_eq!(err, TransifexError::InvalidConfiguration("need one".to_string()));
        assert!(require_members(&["a".to_string()], "need one").is_ok());
    }
}
