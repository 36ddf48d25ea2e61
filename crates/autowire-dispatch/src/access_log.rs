//! Access logging middleware

use async_trait::async_trait;
use autowire_di::{Arguments, Component, DiResult};
use autowire_http::{Handler, Next, Request, Response, Result, text_response};
use http::StatusCode;
use std::sync::Arc;
use std::time::Instant;

/// Emits one `autowire::access` event per request.
///
/// Recorded fields are `method`, `path`, `status` and `elapsed_ms`. A
/// failure further down the chain is logged with status 500 and passed on
/// unchanged.
#[derive(Debug, Default)]
pub struct AccessLogHandler;

impl Component for AccessLogHandler {
	const NAME: &'static str = "AccessLogHandler";

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(AccessLogHandler)
	}

	fn handler(this: Arc<Self>) -> Option<Arc<dyn Handler>> {
		Some(this)
	}
}

#[async_trait]
impl Handler for AccessLogHandler {
	async fn handle(&self, request: Request, next: Option<Next>) -> Result<Response> {
		let method = request.method().clone();
		let path = request.uri().path().to_string();
		let start = Instant::now();

		let result = match next {
			Some(next) => next.handle(request, None).await,
			None => text_response(StatusCode::NOT_FOUND, "Not Found"),
		};

		let status = match &result {
			Ok(response) => response.status(),
			Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		tracing::info!(
			target: "autowire::access",
			method = %method,
			path = %path,
			status = status.as_u16(),
			elapsed_ms = start.elapsed().as_millis() as u64,
			"request handled"
		);

		result
	}
}
