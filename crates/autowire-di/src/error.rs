//! Error taxonomy for dependency resolution

use crate::reflection::TypeKind;
use crate::value::ScalarKind;
use thiserror::Error;

pub type DiResult<T> = Result<T, DiError>;

/// Failure reported by an external [`Locator`](crate::Locator).
#[derive(Debug, Clone, Error)]
pub enum LocatorError {
	/// The locator has no entry for the identifier
	#[error("No entry found for `{0}`")]
	NotFound(String),

	/// The locator knows the identifier but failed to produce it
	#[error("Failed to retrieve `{identifier}`: {message}")]
	Failed { identifier: String, message: String },
}

#[derive(Debug, Error)]
pub enum DiError {
	/// A bound value is neither scalar, factory, alias nor a matching instance
	#[error("Map for `{identifier}` contains unexpected {kind}")]
	InvalidBindingKind { identifier: String, kind: String },

	#[error("Class `{0}` not found")]
	TypeNotFound(String),

	#[error("Cannot instantiate {kind} `{identifier}`")]
	NotInstantiable { identifier: String, kind: TypeKind },

	#[error("Argument #{position} (`{name}`) of {owner} has no type")]
	UntypedParameter {
		position: usize,
		name: String,
		owner: String,
	},

	#[error("Argument #{position} (`{name}`) of {owner} expects unsupported type {ty}")]
	UnsupportedParameterType {
		position: usize,
		name: String,
		owner: String,
		ty: String,
	},

	#[error("Argument #{position} (`{name}`) of {owner} is recursive\n  Path: {path}")]
	RecursiveParameter {
		position: usize,
		name: String,
		owner: String,
		path: String,
	},

	#[error("Factory for `{identifier}` is recursive\n  Path: {path}")]
	RecursiveFactory { identifier: String, path: String },

	#[error("Factory for variable `{name}` is recursive\n  Path: {path}")]
	RecursiveVariable { name: String, path: String },

	#[error("Factory for `{identifier}` returned unexpected {kind}")]
	UnexpectedFactoryResult { identifier: String, kind: String },

	#[error("Container variable `{0}` is not defined")]
	UndefinedVariable(String),

	#[error("Container variable `{name}` expected scalar value, but got {kind}")]
	ScalarExpected { name: String, kind: String },

	#[error("Container variable `{name}` expected scalar value from factory, but got {kind}")]
	FactoryScalarExpected { name: String, kind: String },

	#[error("Container variable `{name}` expected type {expected}, but got {actual}")]
	TypeMismatch {
		name: String,
		expected: ScalarKind,
		actual: String,
	},

	/// Lookup through an external locator failed
	#[error("Request handler `{identifier}` failed to load: {source}")]
	HandlerLoadFailed {
		identifier: String,
		#[source]
		source: LocatorError,
	},

	#[error("Request handler `{0}` does not expose a handler")]
	HandlerNotCallable(String),

	/// A constructor or factory read an argument with the wrong accessor
	#[error("Argument #{position} of {owner} expected {expected}, but got {actual}")]
	ArgumentMismatch {
		position: usize,
		owner: String,
		expected: String,
		actual: String,
	},

	#[error("Invalid environment variable name `{0}`")]
	InvalidEnvironmentName(String),

	/// Bindings cannot be added to a container backed by a locator
	#[error("Cannot bind `{0}`: container is backed by an external locator")]
	ImmutableLocator(String),

	/// A constructor or factory called back into the container it is being
	/// resolved by
	#[error("Cannot access `{0}`: the container is already resolving on this thread")]
	ReentrantAccess(String),

	/// Failure raised by user-supplied constructors and factories
	#[error("Internal error: {0}")]
	Internal(String),
}
