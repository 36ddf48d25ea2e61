//! # Autowire Dispatch
//!
//! Request handlers resolved out of an [`autowire_di::Container`].
//!
//! ## Overview
//!
//! - [`ContainerHandler`] turns a type identifier into a callable handler,
//!   resolving the component on first use
//! - [`AccessLogHandler`] and [`ErrorHandler`] are the two well-known
//!   optional services, fetched through [`ContainerServices`]
//!
//! ```text
//! Request → AccessLogHandler → ErrorHandler → ContainerHandler("Controller")
//!                 ↓                  ↓
//!        autowire::access     500 on failure
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use autowire_di::{Arguments, Component, Container, DiResult};
//! use autowire_dispatch::{ContainerHandler, ContainerServices};
//! use autowire_http::{Handler, Next, Request, Response, Result, text_response};
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use http::StatusCode;
//! use std::sync::Arc;
//!
//! struct HelloController;
//!
//! impl Component for HelloController {
//!     const NAME: &'static str = "HelloController";
//!
//!     fn construct(_args: Arguments) -> DiResult<Self> {
//!         Ok(HelloController)
//!     }
//!
//!     fn handler(this: Arc<Self>) -> Option<Arc<dyn Handler>> {
//!         Some(this)
//!     }
//! }
//!
//! #[async_trait]
//! impl Handler for HelloController {
//!     async fn handle(&self, _request: Request, _next: Option<Next>) -> Result<Response> {
//!         text_response(StatusCode::OK, "Hello, World!")
//!     }
//! }
//!
//! # let runtime = tokio::runtime::Runtime::new().unwrap();
//! # runtime.block_on(async {
//! let container = Container::builder()
//!     .register::<HelloController>()
//!     .build()
//!     .unwrap();
//!
//! let controller: Arc<dyn Handler> =
//!     Arc::new(ContainerHandler::new(container.clone(), "HelloController"));
//! let errors = container.error_handler().unwrap();
//!
//! let request = http::Request::new(Bytes::new());
//! let response = errors.handle(request, Some(controller)).await.unwrap();
//! assert_eq!(response.status(), StatusCode::OK);
//! # });
//! ```

pub mod access_log;
pub mod error_handler;
pub mod handler;
pub mod services;

pub use access_log::AccessLogHandler;
pub use error_handler::ErrorHandler;
pub use handler::ContainerHandler;
pub use services::ContainerServices;
