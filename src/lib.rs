//! # Autowire
//!
//! Reflective dependency resolution for request handlers.
//!
//! Autowire builds a request handler and its whole dependency graph from a
//! type identifier. Components declare their constructor parameters, and the
//! container decides what to inject from the declared types. Any node of the
//! graph can be overridden with a literal, a lazily evaluated factory, or an
//! alias to another node.
//!
//! ## Crates
//!
//! - [`di`] - the resolution engine: container, binding store, coercion policy
//! - [`http`] - the request-handler contract
//! - [`dispatch`] - container-backed handlers and the optional services
//!
//! ## Feature Flags
//!
//! - `dispatch` (default) - [`ContainerHandler`], [`AccessLogHandler`], [`ErrorHandler`]
//!
//! ## Quick Example
//!
//! ```rust
//! use autowire::prelude::*;
//! use std::sync::Arc;
//!
//! struct Database;
//!
//! impl Component for Database {
//!     const NAME: &'static str = "Database";
//!
//!     fn construct(_args: Arguments) -> DiResult<Self> {
//!         Ok(Database)
//!     }
//! }
//!
//! struct UserRepository {
//!     db: Arc<Database>,
//! }
//!
//! impl Component for UserRepository {
//!     const NAME: &'static str = "UserRepository";
//!
//!     fn parameters() -> Vec<Parameter> {
//!         vec![Parameter::of::<Database>("db")]
//!     }
//!
//!     fn construct(args: Arguments) -> DiResult<Self> {
//!         Ok(UserRepository { db: args.instance::<Database>(0)? })
//!     }
//! }
//!
//! let container = Container::builder()
//!     .register::<Database>()
//!     .register::<UserRepository>()
//!     .build()
//!     .unwrap();
//!
//! let repository = container.get::<UserRepository>().unwrap();
//! assert!(Arc::ptr_eq(&repository.db, &container.get::<Database>().unwrap()));
//! ```

pub use autowire_di as di;
#[cfg(feature = "dispatch")]
pub use autowire_dispatch as dispatch;
pub use autowire_http as http;

pub use autowire_di::{
	Argument, Arguments, BindingStore, Component, Container, ContainerBuilder, ContainerSettings,
	DEFAULT_DEPTH_BUDGET, DiError, DiResult, Entry, Factory, Instance, Locator, LocatorError,
	MAX_DEPTH_BUDGET, Parameter, Produced, Scalar, ScalarKind, SettingsError, StaticLocator,
	TypeDescriptor, TypeInfo, TypeKind, TypeRegistry, Value,
};
pub use autowire_http::{Handler, Next, Request, Response, text_response};

#[cfg(feature = "dispatch")]
pub use autowire_dispatch::{AccessLogHandler, ContainerHandler, ContainerServices, ErrorHandler};

pub mod prelude {
	// Core types - always available
	pub use crate::{
		Arguments, Component, Container, ContainerSettings, DiError, DiResult, Entry, Factory,
		Instance, Parameter, Produced, Scalar, ScalarKind, TypeDescriptor, TypeInfo, TypeKind,
	};

	// Request handling
	pub use crate::{Handler, Next, Request, Response, text_response};

	// External
	pub use async_trait::async_trait;

	// Dispatch feature
	#[cfg(feature = "dispatch")]
	pub use crate::{ContainerHandler, ContainerServices};
}
