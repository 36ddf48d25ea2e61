//! # Autowire Dependency Injection
//!
//! Reflective dependency resolution for request handlers.
//!
//! ## Features
//!
//! - **Autowiring**: constructors declare their parameters, the container builds the graph
//! - **Overrides**: any node can be bound to a literal, a factory, or an alias
//! - **Variables**: named scalars injected into factories under a strict coercion policy
//! - **Singletons**: every resolved node is memoized in the binding store
//! - **Cycle Detection**: in-flight identifiers are tracked, with a depth budget as backstop
//! - **Locator Mode**: lookups can be delegated to an external service locator
//!
//! ## Example
//!
//! ```rust
//! use autowire_di::{
//!     Arguments, Component, Container, DiResult, Factory, Parameter, Produced,
//! };
//!
//! struct Greeter {
//!     name: String,
//! }
//!
//! impl Component for Greeter {
//!     const NAME: &'static str = "Greeter";
//!
//!     fn construct(_args: Arguments) -> DiResult<Self> {
//!         Ok(Greeter { name: "world".to_string() })
//!     }
//! }
//!
//! let container = Container::builder()
//!     .register::<Greeter>()
//!     .factory(
//!         "Greeter",
//!         Factory::new(vec![Parameter::string("name")], |args| {
//!             Ok(Produced::instance(Greeter { name: args.string(0)? }))
//!         }),
//!     )
//!     .value("name", "Alice")
//!     .build()
//!     .unwrap();
//!
//! let greeter = container.get::<Greeter>().unwrap();
//! assert_eq!(greeter.name, "Alice");
//! ```

pub mod arguments;
pub mod coercion;
pub mod container;
pub mod cycle_detection;
pub mod entry;
pub mod error;
pub mod locator;
pub mod reflection;
pub mod resolver;
pub mod settings;
pub mod store;
pub mod value;

pub use arguments::{Argument, Arguments};
pub use container::{Container, ContainerBuilder};
pub use entry::{Entry, Factory, Produced};
pub use error::{DiError, DiResult, LocatorError};
pub use locator::{Locator, StaticLocator};
pub use reflection::{Component, Parameter, TypeDescriptor, TypeInfo, TypeKind, TypeRegistry};
pub use settings::{ContainerSettings, DEFAULT_DEPTH_BUDGET, MAX_DEPTH_BUDGET, SettingsError};
pub use store::BindingStore;
pub use value::{Instance, Scalar, ScalarKind, Value};
