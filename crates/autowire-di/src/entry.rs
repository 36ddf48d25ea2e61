//! Bindings stored under an identifier

use crate::arguments::Arguments;
use crate::error::DiResult;
use crate::reflection::{Component, Parameter};
use crate::value::{Instance, Scalar, Value};
use std::fmt;
use std::sync::Arc;

/// What a factory produced.
///
/// A factory either hands back a value or asks the container to resolve
/// another identifier in its place. Keeping the two apart means a factory
/// for a string variable can return any string without it being mistaken
/// for a type name.
#[derive(Debug, Clone)]
pub enum Produced {
	Value(Value),
	Redirect(String),
}

impl Produced {
	pub fn redirect(identifier: impl Into<String>) -> Self {
		Produced::Redirect(identifier.into())
	}

	pub fn instance<T: Component>(value: T) -> Self {
		Produced::Value(Value::Instance(Instance::new(value)))
	}

	pub fn scalar(value: impl Into<Scalar>) -> Self {
		Produced::Value(Value::Scalar(value.into()))
	}
}

impl From<Value> for Produced {
	fn from(value: Value) -> Self {
		Produced::Value(value)
	}
}

impl From<Instance> for Produced {
	fn from(value: Instance) -> Self {
		Produced::Value(Value::Instance(value))
	}
}

impl From<Scalar> for Produced {
	fn from(value: Scalar) -> Self {
		Produced::Value(Value::Scalar(value))
	}
}

type FactoryFn = Arc<dyn Fn(Arguments) -> DiResult<Produced> + Send + Sync>;

/// A lazily evaluated binding.
///
/// The declared parameters are loaded exactly like constructor parameters,
/// except that scalar parameters are filled from same-named variables.
///
/// # Examples
///
/// ```
/// use autowire_di::{Factory, Parameter, Produced};
///
/// let factory = Factory::new(vec![Parameter::string("name")], |args| {
///     Ok(Produced::scalar(format!("Hello {}!", args.string(0)?)))
/// });
/// assert_eq!(factory.parameters().len(), 1);
/// ```
#[derive(Clone)]
pub struct Factory {
	parameters: Vec<Parameter>,
	call: FactoryFn,
}

impl Factory {
	pub fn new<F>(parameters: Vec<Parameter>, call: F) -> Self
	where
		F: Fn(Arguments) -> DiResult<Produced> + Send + Sync + 'static,
	{
		Self {
			parameters,
			call: Arc::new(call),
		}
	}

	/// Factory without parameters.
	pub fn from_fn<F>(call: F) -> Self
	where
		F: Fn() -> DiResult<Produced> + Send + Sync + 'static,
	{
		Self::new(Vec::new(), move |_| call())
	}

	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	pub fn invoke(&self, args: Arguments) -> DiResult<Produced> {
		(self.call)(args)
	}
}

impl fmt::Debug for Factory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Factory")
			.field("parameters", &self.parameters)
			.finish_non_exhaustive()
	}
}

/// The value bound to an identifier.
#[derive(Debug, Clone)]
pub enum Entry {
	/// An already constructed instance or a scalar variable
	Literal(Value),
	/// Resolve another identifier in place of this one
	Alias(String),
	Factory(Factory),
}

impl Entry {
	pub fn alias(target: impl Into<String>) -> Self {
		Entry::Alias(target.into())
	}

	pub fn scalar(value: impl Into<Scalar>) -> Self {
		Entry::Literal(Value::Scalar(value.into()))
	}

	pub fn instance<T: Component>(value: T) -> Self {
		Entry::Literal(Value::Instance(Instance::new(value)))
	}

	pub fn describe(&self) -> String {
		match self {
			Entry::Literal(value) => value.describe(),
			Entry::Alias(_) => "alias".to_string(),
			Entry::Factory(_) => "factory".to_string(),
		}
	}
}

impl From<Value> for Entry {
	fn from(value: Value) -> Self {
		Entry::Literal(value)
	}
}

impl From<Instance> for Entry {
	fn from(value: Instance) -> Self {
		Entry::Literal(Value::Instance(value))
	}
}

impl From<Scalar> for Entry {
	fn from(value: Scalar) -> Self {
		Entry::Literal(Value::Scalar(value))
	}
}

impl From<Factory> for Entry {
	fn from(value: Factory) -> Self {
		Entry::Factory(value)
	}
}
