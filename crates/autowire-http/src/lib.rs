//! # Autowire HTTP
//!
//! The request-handler contract shared by the container and the dispatch
//! layer.
//!
//! A handler receives the incoming [`Request`] and, when it is part of a
//! middleware chain, the [`Next`] continuation for the remainder of that
//! chain. Chaining itself lives outside this crate: every handler simply
//! decides whether to call `next` or to answer on its own.
//!
//! ## Examples
//!
//! ```rust
//! use autowire_http::{Handler, Next, Request, Response, Result, text_response};
//! use async_trait::async_trait;
//! use http::StatusCode;
//!
//! struct HelloHandler;
//!
//! #[async_trait]
//! impl Handler for HelloHandler {
//!     async fn handle(&self, _request: Request, _next: Option<Next>) -> Result<Response> {
//!         text_response(StatusCode::OK, "Hello, World!")
//!     }
//! }
//! ```

use bytes::Bytes;
use http::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// Incoming request as seen by handlers.
pub type Request = http::Request<Bytes>;

/// Response produced by handlers.
pub type Response = http::Response<Bytes>;

/// Continuation invoking the remainder of a middleware chain.
pub type Next = Arc<dyn Handler>;

/// Boxed error used to carry resolution failures across crate boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for request handlers
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while handling a request
#[derive(Debug, Error)]
pub enum Error {
	/// The request handler could not be loaded from its container
	#[error("Cannot resolve request handler `{identifier}`: {source}")]
	Load {
		/// Identifier the handler was requested under
		identifier: String,
		/// Underlying resolution failure
		#[source]
		source: BoxError,
	},

	/// Internal error raised by a handler
	#[error("Internal error: {0}")]
	Internal(String),

	/// Response could not be built
	#[error("HTTP error: {0}")]
	Http(#[from] http::Error),
}

/// A request handler.
///
/// `next` is `Some` when the handler is invoked as a middleware; a final
/// controller receives `None` and must answer by itself.
#[async_trait::async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request, next: Option<Next>) -> Result<Response>;
}

/// Builds a plain-text response with the given status.
pub fn text_response(status: StatusCode, body: impl Into<Bytes>) -> Result<Response> {
	let response = http::Response::builder()
		.status(status)
		.header(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")
		.body(body.into())?;
	Ok(response)
}
