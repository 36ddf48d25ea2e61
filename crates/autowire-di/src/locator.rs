//! External service locator seam
//!
//! A container can be backed by a caller-supplied locator instead of its
//! own binding store. In that mode the container never constructs anything
//! itself: every type lookup is delegated.

use crate::error::LocatorError;
use crate::reflection::Component;
use crate::value::Instance;
use std::collections::HashMap;

pub trait Locator: Send + Sync {
	fn has(&self, identifier: &str) -> bool;

	/// Returns the instance for `identifier`, or [`LocatorError::NotFound`].
	fn get(&self, identifier: &str) -> Result<Instance, LocatorError>;
}

/// Locator over a fixed set of prebuilt instances.
///
/// # Examples
///
/// ```
/// use autowire_di::{Arguments, Component, DiResult, Locator, StaticLocator};
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
/// let locator = StaticLocator::new().with(Clock);
/// assert!(locator.has("Clock"));
/// assert!(locator.get("Calendar").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
	instances: HashMap<String, Instance>,
}

impl StaticLocator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a component under its own identifier.
	pub fn with<T: Component>(mut self, value: T) -> Self {
		self.instances
			.insert(T::NAME.to_string(), Instance::new(value));
		self
	}

	/// Adds an instance under an arbitrary identifier.
	pub fn insert(&mut self, identifier: impl Into<String>, instance: Instance) {
		self.instances.insert(identifier.into(), instance);
	}
}

impl Locator for StaticLocator {
	fn has(&self, identifier: &str) -> bool {
		self.instances.contains_key(identifier)
	}

	fn get(&self, identifier: &str) -> Result<Instance, LocatorError> {
		self.instances
			.get(identifier)
			.cloned()
			.ok_or_else(|| LocatorError::NotFound(identifier.to_string()))
	}
}
