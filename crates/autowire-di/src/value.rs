//! Values held by the binding store
//!
//! Scalars back container variables, [`Instance`]s back type identifiers.
//! The remaining shapes (`Null`, `Array`, `Map`) exist so that configuration
//! loaded from disk can be represented faithfully and rejected with a
//! precise error instead of being dropped.

use crate::reflection::Component;
use autowire_http::Handler;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The four primitive kinds a variable may be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	String,
	Int,
	Float,
	Bool,
}

impl ScalarKind {
	pub fn as_str(self) -> &'static str {
		match self {
			ScalarKind::String => "string",
			ScalarKind::Int => "int",
			ScalarKind::Float => "float",
			ScalarKind::Bool => "bool",
		}
	}
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	String(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl Scalar {
	pub fn kind(&self) -> ScalarKind {
		match self {
			Scalar::String(_) => ScalarKind::String,
			Scalar::Int(_) => ScalarKind::Int,
			Scalar::Float(_) => ScalarKind::Float,
			Scalar::Bool(_) => ScalarKind::Bool,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Scalar::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Scalar::Int(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Scalar::Float(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Scalar::Bool(value) => Some(*value),
			_ => None,
		}
	}
}

impl From<&str> for Scalar {
	fn from(value: &str) -> Self {
		Scalar::String(value.to_string())
	}
}

impl From<String> for Scalar {
	fn from(value: String) -> Self {
		Scalar::String(value)
	}
}

impl From<i64> for Scalar {
	fn from(value: i64) -> Self {
		Scalar::Int(value)
	}
}

impl From<i32> for Scalar {
	fn from(value: i32) -> Self {
		Scalar::Int(i64::from(value))
	}
}

impl From<f64> for Scalar {
	fn from(value: f64) -> Self {
		Scalar::Float(value)
	}
}

impl From<bool> for Scalar {
	fn from(value: bool) -> Self {
		Scalar::Bool(value)
	}
}

/// A constructed object, type-erased and shared.
///
/// Cloning an `Instance` clones the handle, never the object: two clones
/// always point at the same allocation, which is what makes memoized
/// resolutions observable as singletons.
#[derive(Clone)]
pub struct Instance {
	identifier: &'static str,
	supertypes: &'static [&'static str],
	value: Arc<dyn Any + Send + Sync>,
	handler: Option<Arc<dyn Handler>>,
}

impl Instance {
	/// Wraps a freshly built component.
	///
	/// # Examples
	///
	/// ```
	/// use autowire_di::{Arguments, Component, DiResult, Instance};
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
	/// let instance = Instance::new(Clock);
	/// assert_eq!(instance.identifier(), "Clock");
	/// assert!(instance.downcast::<Clock>().is_some());
	/// ```
	pub fn new<T: Component>(value: T) -> Self {
		Self::from_arc(Arc::new(value))
	}

	/// Wraps an already shared component without re-allocating it.
	pub fn from_arc<T: Component>(value: Arc<T>) -> Self {
		let handler = T::handler(Arc::clone(&value));
		Self {
			identifier: T::NAME,
			supertypes: T::supertypes(),
			value,
			handler,
		}
	}

	/// Identifier of the concrete type this instance was built as.
	pub fn identifier(&self) -> &'static str {
		self.identifier
	}

	/// Identifiers this instance declares to satisfy, besides its own.
	pub fn supertypes(&self) -> &'static [&'static str] {
		self.supertypes
	}

	/// Whether this instance is `identifier` or declares it as a supertype.
	pub fn satisfies(&self, identifier: &str) -> bool {
		self.identifier == identifier || self.supertypes.contains(&identifier)
	}

	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		Arc::clone(&self.value).downcast::<T>().ok()
	}

	/// The request-handler view, if the component exposes one.
	pub fn handler(&self) -> Option<Arc<dyn Handler>> {
		self.handler.clone()
	}

	/// Whether both handles point at the same object.
	pub fn ptr_eq(&self, other: &Instance) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(&self.value), Arc::as_ptr(&other.value))
	}

	pub fn describe(&self) -> String {
		format!("instance of {}", self.identifier)
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("identifier", &self.identifier)
			.field("supertypes", &self.supertypes)
			.field("handler", &self.handler.is_some())
			.finish()
	}
}

#[derive(Debug, Clone)]
pub enum Value {
	Null,
	Scalar(Scalar),
	Array(Vec<Value>),
	Map(BTreeMap<String, Value>),
	Instance(Instance),
}

impl Value {
	/// Human readable kind used in error messages.
	pub fn describe(&self) -> String {
		match self {
			Value::Null => "null".to_string(),
			Value::Scalar(scalar) => scalar.kind().to_string(),
			Value::Array(_) => "array".to_string(),
			Value::Map(_) => "map".to_string(),
			Value::Instance(instance) => instance.describe(),
		}
	}

	pub fn as_scalar(&self) -> Option<&Scalar> {
		match self {
			Value::Scalar(scalar) => Some(scalar),
			_ => None,
		}
	}

	pub fn as_instance(&self) -> Option<&Instance> {
		match self {
			Value::Instance(instance) => Some(instance),
			_ => None,
		}
	}
}

impl From<Scalar> for Value {
	fn from(value: Scalar) -> Self {
		Value::Scalar(value)
	}
}

impl From<Instance> for Value {
	fn from(value: Instance) -> Self {
		Value::Instance(value)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(flag) => Value::Scalar(Scalar::Bool(flag)),
			serde_json::Value::Number(number) => match number.as_i64() {
				Some(int) => Value::Scalar(Scalar::Int(int)),
				// u64 beyond i64::MAX and real numbers both land here
				None => Value::Scalar(Scalar::Float(number.as_f64().unwrap_or(f64::NAN))),
			},
			serde_json::Value::String(text) => Value::Scalar(Scalar::String(text)),
			serde_json::Value::Array(items) => {
				Value::Array(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(fields) => Value::Map(
				fields
					.into_iter()
					.map(|(key, value)| (key, Value::from(value)))
					.collect(),
			),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Arguments, DiResult};
	use rstest::rstest;
	use serde_json::json;

	struct Probe;

	impl Component for Probe {
		const NAME: &'static str = "Probe";

		fn supertypes() -> &'static [&'static str] {
			&["ProbeInterface"]
		}

		fn construct(_args: Arguments) -> DiResult<Self> {
			Ok(Probe)
		}
	}

	#[rstest]
	fn test_instance_clones_share_allocation() {
		// Arrange
		let instance = Instance::new(Probe);

		// Act
		let clone = instance.clone();

		// Assert
		assert!(instance.ptr_eq(&clone));
		assert!(!instance.ptr_eq(&Instance::new(Probe)));
	}

	#[rstest]
	fn test_instance_carries_component_metadata() {
		// Act
		let instance = Instance::new(Probe);

		// Assert
		assert_eq!(instance.identifier(), "Probe");
		assert_eq!(instance.supertypes(), &["ProbeInterface"]);
		assert!(instance.handler().is_none());
		assert_eq!(instance.describe(), "instance of Probe");
	}

	#[rstest]
	#[case(json!(null), "null")]
	#[case(json!("text"), "string")]
	#[case(json!(42), "int")]
	#[case(json!(1.5), "float")]
	#[case(json!(true), "bool")]
	#[case(json!([1, 2]), "array")]
	#[case(json!({"a": 1}), "map")]
	fn test_value_from_json_describes_kind(
		#[case] input: serde_json::Value,
		#[case] expected: &str,
	) {
		// Act
		let value = Value::from(input);

		// Assert
		assert_eq!(value.describe(), expected);
	}

	#[rstest]
	fn test_whole_json_float_stays_float() {
		// Act
		let value = Value::from(json!(1.0));

		// Assert
		assert_eq!(value.as_scalar(), Some(&Scalar::Float(1.0)));
	}
}
