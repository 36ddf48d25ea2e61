//! Container: shared front end over a binding store or an external locator
//!
//! A [`Container`] is cheap to clone; every clone shares the same store,
//! so an identifier memoized through one handle is visible through all.
//!
//! A walk holds the store for its whole duration. Other threads wait for it;
//! a constructor or factory that calls back into its own container on the
//! same thread fails [`DiError::ReentrantAccess`] instead of blocking.

use crate::arguments::Arguments;
use crate::entry::{Entry, Factory};
use crate::error::{DiError, DiResult};
use crate::locator::Locator;
use crate::reflection::{Component, TypeInfo, TypeRegistry};
use crate::resolver::Resolver;
use crate::settings::{ContainerSettings, MAX_DEPTH_BUDGET};
use crate::store::BindingStore;
use crate::value::{Instance, Scalar, ScalarKind, Value};
use parking_lot::ReentrantMutex;
use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, LazyLock};

static ENV_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Z][A-Z0-9_]+$").expect("ENV_NAME_REGEX: invalid regex pattern")
});

struct State {
	store: BindingStore,
	registry: TypeRegistry,
}

/// Store and registry behind a lock that the owning thread may re-acquire.
///
/// Re-acquiring only succeeds at the lock level; the inner borrow is what
/// rejects a nested walk.
struct SharedState(ReentrantMutex<RefCell<State>>);

impl SharedState {
	fn new(state: State) -> Self {
		Self(ReentrantMutex::new(RefCell::new(state)))
	}

	/// Runs `f` with exclusive access to the state.
	///
	/// `identifier` names the nested request in the error raised when this
	/// thread is already inside a walk.
	fn with<R>(&self, identifier: &str, f: impl FnOnce(&mut State) -> DiResult<R>) -> DiResult<R> {
		let guard = self.0.lock();
		let mut state = guard.try_borrow_mut().map_err(|_| {
			tracing::warn!(identifier, "re-entrant container access rejected");
			DiError::ReentrantAccess(identifier.to_string())
		})?;
		f(&mut state)
	}
}

enum Backend {
	Bindings(SharedState),
	Locator(Arc<dyn Locator>),
}

struct Inner {
	backend: Backend,
	depth_budget: usize,
	detect_cycles: bool,
}

#[derive(Clone)]
pub struct Container {
	inner: Arc<Inner>,
}

impl Container {
	pub fn builder() -> ContainerBuilder {
		ContainerBuilder::new()
	}

	/// Creates a container that delegates every type lookup to `locator`.
	///
	/// Nothing is validated up front; legality is left to the locator.
	pub fn from_locator(locator: Arc<dyn Locator>) -> Self {
		Self {
			inner: Arc::new(Inner {
				backend: Backend::Locator(locator),
				depth_budget: crate::settings::DEFAULT_DEPTH_BUDGET,
				detect_cycles: true,
			}),
		}
	}

	pub fn is_locator_backed(&self) -> bool {
		matches!(self.inner.backend, Backend::Locator(_))
	}

	pub fn depth_budget(&self) -> usize {
		self.inner.depth_budget
	}

	/// Resolves a type identifier to an instance.
	///
	/// # Examples
	///
	/// ```
	/// use autowire_di::{Arguments, Component, Container, DiResult};
	///
	/// struct Clock;
	///
	/// impl Component for Clock {
	///     const NAME: &'static str = "Clock";
	///
	///     fn construct(_args: Arguments) -> DiResult<Self> {
	///         Ok(Clock)
	///     }
	/// }
	///
	/// let container = Container::builder().register::<Clock>().build().unwrap();
	/// let first = container.resolve("Clock").unwrap();
	/// let second = container.resolve("Clock").unwrap();
	/// assert!(first.ptr_eq(&second));
	/// ```
	pub fn resolve(&self, identifier: &str) -> DiResult<Instance> {
		match &self.inner.backend {
			Backend::Locator(locator) => {
				tracing::debug!(identifier, "delegating to locator");
				locator
					.get(identifier)
					.map_err(|source| DiError::HandlerLoadFailed {
						identifier: identifier.to_string(),
						source,
					})
			}
			Backend::Bindings(shared) => shared.with(identifier, |state| {
				let State { store, registry } = state;
				Resolver::new(store, registry, self.inner.detect_cycles)
					.resolve(identifier, self.inner.depth_budget)
			}),
		}
	}

	/// Resolves `T::NAME` and recovers the concrete type.
	pub fn get<T: Component>(&self) -> DiResult<Arc<T>> {
		let instance = self.resolve(T::NAME)?;
		instance
			.downcast::<T>()
			.ok_or_else(|| DiError::UnexpectedFactoryResult {
				identifier: T::NAME.to_string(),
				kind: instance.describe(),
			})
	}

	/// Loads a container variable coerced to `kind`.
	///
	/// A locator-backed container holds no variables.
	pub fn variable(&self, name: &str, kind: ScalarKind) -> DiResult<Scalar> {
		match &self.inner.backend {
			Backend::Locator(_) => Err(DiError::UndefinedVariable(name.to_string())),
			Backend::Bindings(shared) => shared.with(name, |state| {
				let State { store, registry } = state;
				Resolver::new(store, registry, self.inner.detect_cycles).load_variable(
					name,
					kind,
					self.inner.depth_budget,
				)
			}),
		}
	}

	/// Reads an environment value, preferring a same-named container variable.
	pub fn env(&self, name: &str) -> DiResult<Option<String>> {
		if !ENV_NAME_REGEX.is_match(name) {
			return Err(DiError::InvalidEnvironmentName(name.to_string()));
		}

		if let Backend::Bindings(shared) = &self.inner.backend {
			let bound = shared.with(name, |state| {
				let State { store, registry } = state;
				if !store.contains(name) {
					return Ok(None);
				}
				Resolver::new(store, registry, self.inner.detect_cycles)
					.load_variable(name, ScalarKind::String, self.inner.depth_budget)
					.map(Some)
			})?;
			if let Some(value) = bound {
				return Ok(value.as_str().map(str::to_string));
			}
		}

		Ok(std::env::var(name).ok())
	}

	/// Adds or replaces a binding. Illegal literals fail on first access.
	pub fn bind(&self, identifier: impl Into<String>, entry: impl Into<Entry>) -> DiResult<()> {
		let identifier = identifier.into();
		match &self.inner.backend {
			Backend::Locator(_) => Err(DiError::ImmutableLocator(identifier)),
			Backend::Bindings(shared) => shared.with(&identifier, |state| {
				tracing::debug!(identifier = %identifier, "binding added");
				state.store.insert(identifier.clone(), entry.into());
				Ok(())
			}),
		}
	}

	/// Registers `T` unless a definition already exists under its name.
	///
	/// Has no effect on a locator-backed container.
	pub fn register<T: Component>(&self) -> DiResult<()> {
		match &self.inner.backend {
			Backend::Locator(_) => Ok(()),
			Backend::Bindings(shared) => shared.with(T::NAME, |state| {
				state.registry.register_if_absent::<T>();
				Ok(())
			}),
		}
	}

	pub fn has(&self, identifier: &str) -> DiResult<bool> {
		match &self.inner.backend {
			Backend::Locator(locator) => Ok(locator.has(identifier)),
			Backend::Bindings(shared) => {
				shared.with(identifier, |state| Ok(state.store.contains(identifier)))
			}
		}
	}

	/// Fetches a well-known service, constructing `T` when nothing overrides it.
	///
	/// An explicit binding (or locator entry) under `T::NAME` wins; its
	/// result must still satisfy `T::NAME`.
	pub fn optional_service<T: Component>(&self) -> DiResult<Instance> {
		let instance = match &self.inner.backend {
			Backend::Locator(locator) => {
				if locator.has(T::NAME) {
					locator
						.get(T::NAME)
						.map_err(|source| DiError::HandlerLoadFailed {
							identifier: T::NAME.to_string(),
							source,
						})?
				} else {
					tracing::debug!(identifier = T::NAME, "constructing default service");
					let owner = format!("{}::new", T::NAME);
					Instance::new(T::construct(Arguments::new(owner, Vec::new()))?)
				}
			}
			Backend::Bindings(_) => {
				self.register::<T>()?;
				self.resolve(T::NAME)?
			}
		};

		if instance.satisfies(T::NAME) || self.is_instance_of(&instance, T::NAME)? {
			Ok(instance)
		} else {
			Err(DiError::UnexpectedFactoryResult {
				identifier: T::NAME.to_string(),
				kind: instance.describe(),
			})
		}
	}

	fn is_instance_of(&self, instance: &Instance, identifier: &str) -> DiResult<bool> {
		match &self.inner.backend {
			Backend::Locator(_) => Ok(instance.satisfies(identifier)),
			Backend::Bindings(shared) => shared.with(identifier, |state| {
				Ok(state.registry.is_instance_of(instance, identifier))
			}),
		}
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let backend = match &self.inner.backend {
			Backend::Locator(_) => "locator",
			Backend::Bindings(_) => "bindings",
		};
		f.debug_struct("Container")
			.field("backend", &backend)
			.field("depth_budget", &self.inner.depth_budget)
			.field("detect_cycles", &self.inner.detect_cycles)
			.finish()
	}
}

/// Collects registrations and bindings, then validates them all at once.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
	registry: TypeRegistry,
	entries: Vec<(String, Entry)>,
	settings: ContainerSettings,
}

impl ContainerBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register<T: Component>(mut self) -> Self {
		self.registry.register::<T>();
		self
	}

	/// Registers a definition that has no Rust type, such as an interface.
	pub fn define(mut self, info: TypeInfo) -> Self {
		self.registry.insert(info);
		self
	}

	/// Replaces the whole registration table.
	pub fn registry(mut self, registry: TypeRegistry) -> Self {
		self.registry = registry;
		self
	}

	pub fn settings(mut self, settings: ContainerSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn bind(mut self, identifier: impl Into<String>, entry: impl Into<Entry>) -> Self {
		self.entries.push((identifier.into(), entry.into()));
		self
	}

	pub fn value(self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
		self.bind(name, Entry::Literal(Value::Scalar(value.into())))
	}

	pub fn alias(self, identifier: impl Into<String>, target: impl Into<String>) -> Self {
		self.bind(identifier, Entry::alias(target))
	}

	pub fn factory(self, identifier: impl Into<String>, factory: Factory) -> Self {
		self.bind(identifier, Entry::Factory(factory))
	}

	/// Binds a prebuilt component under its own identifier.
	pub fn instance<T: Component>(self, value: T) -> Self {
		self.bind(T::NAME, Entry::instance(value))
	}

	/// Validates every binding and produces the container.
	///
	/// Settings variables are seeded first; explicit bindings of the same
	/// name replace them. The depth budget is capped at [`MAX_DEPTH_BUDGET`].
	pub fn build(self) -> DiResult<Container> {
		let Self {
			registry,
			entries,
			settings,
		} = self;

		let seeded = settings
			.variables
			.into_iter()
			.map(|(name, value)| (name, Entry::Literal(Value::from(value))));
		let store = BindingStore::from_entries(seeded.chain(entries), &registry)?;

		let depth_budget = settings.depth_budget.min(MAX_DEPTH_BUDGET);
		if depth_budget < settings.depth_budget {
			tracing::warn!(
				requested = settings.depth_budget,
				depth_budget,
				"depth budget capped"
			);
		}

		tracing::debug!(
			bindings = store.len(),
			types = registry.len(),
			depth_budget,
			"container built"
		);

		Ok(Container {
			inner: Arc::new(Inner {
				backend: Backend::Bindings(SharedState::new(State { store, registry })),
				depth_budget,
				detect_cycles: settings.detect_cycles,
			}),
		})
	}
}
