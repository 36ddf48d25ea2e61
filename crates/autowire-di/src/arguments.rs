//! Argument lists produced by the parameter loader

use crate::error::{DiError, DiResult};
use crate::reflection::Component;
use crate::value::{Instance, Scalar, ScalarKind};
use std::sync::Arc;

/// One resolved argument.
#[derive(Debug, Clone)]
pub enum Argument {
	/// Supplied for nullable parameters
	Null,
	Scalar(Scalar),
	Instance(Instance),
}

impl Argument {
	fn describe(&self) -> String {
		match self {
			Argument::Null => "null".to_string(),
			Argument::Scalar(scalar) => scalar.kind().to_string(),
			Argument::Instance(instance) => instance.describe(),
		}
	}
}

/// Ordered arguments handed to a constructor or factory.
///
/// Parameters following the first defaulted one are never supplied, so
/// [`Arguments::len`] may be shorter than the declared signature; callers
/// apply their own defaults for missing positions.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
	owner: String,
	values: Vec<Argument>,
}

impl Arguments {
	pub fn new(owner: impl Into<String>, values: Vec<Argument>) -> Self {
		Self {
			owner: owner.into(),
			values,
		}
	}

	pub fn owner(&self) -> &str {
		&self.owner
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Argument> {
		self.values.get(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Argument> {
		self.values.iter()
	}

	/// Component argument at `index`.
	pub fn instance<T: Component>(&self, index: usize) -> DiResult<Arc<T>> {
		match self.values.get(index) {
			Some(Argument::Instance(instance)) => instance
				.downcast::<T>()
				.ok_or_else(|| self.mismatch(index, T::NAME)),
			_ => Err(self.mismatch(index, T::NAME)),
		}
	}

	/// Component argument at `index` for a nullable parameter.
	pub fn optional<T: Component>(&self, index: usize) -> DiResult<Option<Arc<T>>> {
		match self.values.get(index) {
			Some(Argument::Null) => Ok(None),
			_ => self.instance::<T>(index).map(Some),
		}
	}

	/// Type-erased instance at `index`, for parameters typed as an interface.
	pub fn erased(&self, index: usize) -> DiResult<Instance> {
		match self.values.get(index) {
			Some(Argument::Instance(instance)) => Ok(instance.clone()),
			_ => Err(self.mismatch(index, "object")),
		}
	}

	pub fn string(&self, index: usize) -> DiResult<String> {
		self.scalar(index, ScalarKind::String)
			.map(|scalar| scalar.as_str().unwrap_or_default().to_string())
	}

	pub fn int(&self, index: usize) -> DiResult<i64> {
		self.scalar(index, ScalarKind::Int)
			.map(|scalar| scalar.as_int().unwrap_or_default())
	}

	pub fn float(&self, index: usize) -> DiResult<f64> {
		self.scalar(index, ScalarKind::Float)
			.map(|scalar| scalar.as_float().unwrap_or_default())
	}

	pub fn bool(&self, index: usize) -> DiResult<bool> {
		self.scalar(index, ScalarKind::Bool)
			.map(|scalar| scalar.as_bool().unwrap_or_default())
	}

	fn scalar(&self, index: usize, kind: ScalarKind) -> DiResult<&Scalar> {
		match self.values.get(index) {
			Some(Argument::Scalar(scalar)) if scalar.kind() == kind => Ok(scalar),
			_ => Err(self.mismatch(index, kind.as_str())),
		}
	}

	fn mismatch(&self, index: usize, expected: &str) -> DiError {
		DiError::ArgumentMismatch {
			position: index + 1,
			owner: self.owner.clone(),
			expected: expected.to_string(),
			actual: self
				.values
				.get(index)
				.map(Argument::describe)
				.unwrap_or_else(|| "nothing".to_string()),
		}
	}
}
