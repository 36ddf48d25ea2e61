//! Error rendering middleware

use async_trait::async_trait;
use autowire_di::{Arguments, Component, DiResult};
use autowire_http::{Handler, Next, Request, Response, Result, text_response};
use http::StatusCode;
use std::sync::Arc;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Turns any failure further down the chain into a plain 500 response.
///
/// The error itself is only logged, never rendered to the client.
#[derive(Debug, Default)]
pub struct ErrorHandler;

impl Component for ErrorHandler {
	const NAME: &'static str = "ErrorHandler";

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(ErrorHandler)
	}

	fn handler(this: Arc<Self>) -> Option<Arc<dyn Handler>> {
		Some(this)
	}
}

#[async_trait]
impl Handler for ErrorHandler {
	async fn handle(&self, request: Request, next: Option<Next>) -> Result<Response> {
		let Some(next) = next else {
			return text_response(StatusCode::NOT_FOUND, "Not Found");
		};

		match next.handle(request, None).await {
			Ok(response) => Ok(response),
			Err(error) => {
				tracing::error!(error = %error, "request failed");
				text_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
			}
		}
	}
}
