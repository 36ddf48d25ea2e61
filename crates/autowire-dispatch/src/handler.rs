//! Lazily resolved request handlers

use async_trait::async_trait;
use autowire_di::{Container, DiError, DiResult};
use autowire_http::{Error, Handler, Next, Request, Response, Result};
use std::sync::Arc;

/// A request handler that lives in a container under `identifier`.
///
/// Nothing is resolved until the first request arrives; after that the
/// container's memoized instance is reused.
#[derive(Debug, Clone)]
pub struct ContainerHandler {
	container: Container,
	identifier: String,
}

impl ContainerHandler {
	pub fn new(container: Container, identifier: impl Into<String>) -> Self {
		Self {
			container,
			identifier: identifier.into(),
		}
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	/// Resolves the component and returns its handler view.
	pub fn load(&self) -> DiResult<Arc<dyn Handler>> {
		let instance = self.container.resolve(&self.identifier)?;
		instance
			.handler()
			.ok_or_else(|| DiError::HandlerNotCallable(self.identifier.clone()))
	}
}

#[async_trait]
impl Handler for ContainerHandler {
	async fn handle(&self, request: Request, next: Option<Next>) -> Result<Response> {
		let handler = self.load().map_err(|source| {
			tracing::debug!(identifier = %self.identifier, error = %source, "handler failed to load");
			Error::Load {
				identifier: self.identifier.clone(),
				source: Box::new(source),
			}
		})?;
		handler.handle(request, next).await
	}
}
