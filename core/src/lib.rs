//! Client core for the Transifex translation-management API (v2).
//!
//! # Overview
//! Connectors map each SDK method to one HTTP verb, path and optional JSON
//! body. They validate arguments, build an `HttpRequest`, hand it to a
//! host-supplied `Transport`, and return the raw `HttpResponse` unmodified.
//!
//! # Design
//! - `ApiFactory` resolves a connector name (`"languages"`, `"formats"`,
//!   `"resources"`) to a connector sharing one transport.
//! - Connectors hold only the transport handle and a `RequestBuilder`; no
//!   state survives between calls.
//! - Client-side misuse is reported as `TransifexError` before any request
//!   is built. Transport failures pass through untouched.
//! - Responses are never parsed; status handling is the caller's business.

pub mod config;
pub mod connector;
pub mod error;
pub mod factory;
pub mod http;
pub mod request;
pub mod types;

pub use config::Options;
pub use connector::{Formats, Languages, Resources};
pub use error::{ApiError, TransifexError};
pub use factory::{ApiConnector, ApiFactory, ConnectorFactory, ConnectorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use request::{RequestBuilder, Uri};
pub use types::{
    ContentSource, LanguageOptions, NewResource, ResourceOptions, ResourceUpdate, TeamRole, UpdateLanguageOptions,
};
