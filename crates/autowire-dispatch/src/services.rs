//! Well-known optional services
//!
//! Both services can be replaced by binding their identifier, e.g. an alias
//! from `AccessLogHandler` to a component that declares `AccessLogHandler`
//! as a supertype. Without a binding the default implementation is built.

use crate::access_log::AccessLogHandler;
use crate::error_handler::ErrorHandler;
use autowire_di::{Component, Container, DiError, DiResult};
use autowire_http::Handler;
use std::sync::Arc;

pub trait ContainerServices {
	fn access_log_handler(&self) -> DiResult<Arc<dyn Handler>>;

	fn error_handler(&self) -> DiResult<Arc<dyn Handler>>;
}

impl ContainerServices for Container {
	fn access_log_handler(&self) -> DiResult<Arc<dyn Handler>> {
		service_handler::<AccessLogHandler>(self)
	}

	fn error_handler(&self) -> DiResult<Arc<dyn Handler>> {
		service_handler::<ErrorHandler>(self)
	}
}

fn service_handler<T: Component>(container: &Container) -> DiResult<Arc<dyn Handler>> {
	container
		.optional_service::<T>()?
		.handler()
		.ok_or_else(|| DiError::HandlerNotCallable(T::NAME.to_string()))
}
