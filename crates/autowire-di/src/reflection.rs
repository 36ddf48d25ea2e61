//! Type metadata the resolver walks instead of runtime reflection
//!
//! Every constructible type is registered once with its identifier, the
//! identifiers it satisfies and its constructor signature. The resolver
//! never needs anything else to build a graph: parameter names select
//! variables, parameter types select further components.

use crate::arguments::Arguments;
use crate::error::DiResult;
use crate::value::{Instance, ScalarKind};
use autowire_http::Handler;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// What kind of definition an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	Class,
	Interface,
	Abstract,
	Trait,
}

impl TypeKind {
	pub fn is_instantiable(self) -> bool {
		self == TypeKind::Class
	}
}

impl fmt::Display for TypeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			TypeKind::Class => "class",
			TypeKind::Interface => "interface",
			TypeKind::Abstract => "abstract class",
			TypeKind::Trait => "trait",
		})
	}
}

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
	Scalar(ScalarKind),
	/// Any other built-in type (`array`, `iterable`, `callable`, `mixed`, `null`, ...)
	Builtin(String),
	Object(String),
	Nullable(Box<TypeDescriptor>),
	Union(Vec<TypeDescriptor>),
	Intersection(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
	pub fn object(identifier: impl Into<String>) -> Self {
		TypeDescriptor::Object(identifier.into())
	}

	pub fn builtin(name: impl Into<String>) -> Self {
		TypeDescriptor::Builtin(name.into())
	}

	pub fn nullable(self) -> Self {
		match self {
			already @ TypeDescriptor::Nullable(_) => already,
			inner => TypeDescriptor::Nullable(Box::new(inner)),
		}
	}

	/// Whether `null` is an acceptable value for this type.
	pub fn allows_null(&self) -> bool {
		match self {
			TypeDescriptor::Nullable(_) => true,
			TypeDescriptor::Builtin(name) => name == "null" || name == "mixed",
			TypeDescriptor::Union(parts) => parts.iter().any(TypeDescriptor::allows_null),
			_ => false,
		}
	}

	pub fn is_composite(&self) -> bool {
		matches!(
			self,
			TypeDescriptor::Union(_) | TypeDescriptor::Intersection(_)
		)
	}
}

impl fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn join(f: &mut fmt::Formatter<'_>, parts: &[TypeDescriptor], sep: &str) -> fmt::Result {
			for (index, part) in parts.iter().enumerate() {
				if index > 0 {
					f.write_str(sep)?;
				}
				write!(f, "{}", part)?;
			}
			Ok(())
		}

		match self {
			TypeDescriptor::Scalar(kind) => write!(f, "{}", kind),
			TypeDescriptor::Builtin(name) | TypeDescriptor::Object(name) => f.write_str(name),
			TypeDescriptor::Nullable(inner) => write!(f, "?{}", inner),
			TypeDescriptor::Union(parts) => join(f, parts, "|"),
			TypeDescriptor::Intersection(parts) => join(f, parts, "&"),
		}
	}
}

/// One declared constructor or factory parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
	pub name: String,
	pub ty: Option<TypeDescriptor>,
	pub has_default: bool,
}

impl Parameter {
	pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
		Self {
			name: name.into(),
			ty: Some(ty),
			has_default: false,
		}
	}

	pub fn untyped(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			ty: None,
			has_default: false,
		}
	}

	pub fn string(name: impl Into<String>) -> Self {
		Self::new(name, TypeDescriptor::Scalar(ScalarKind::String))
	}

	pub fn int(name: impl Into<String>) -> Self {
		Self::new(name, TypeDescriptor::Scalar(ScalarKind::Int))
	}

	pub fn float(name: impl Into<String>) -> Self {
		Self::new(name, TypeDescriptor::Scalar(ScalarKind::Float))
	}

	pub fn bool(name: impl Into<String>) -> Self {
		Self::new(name, TypeDescriptor::Scalar(ScalarKind::Bool))
	}

	pub fn object(name: impl Into<String>, identifier: impl Into<String>) -> Self {
		Self::new(name, TypeDescriptor::object(identifier))
	}

	/// Parameter typed as the given component.
	pub fn of<T: Component>(name: impl Into<String>) -> Self {
		Self::object(name, T::NAME)
	}

	pub fn nullable(mut self) -> Self {
		self.ty = self.ty.map(TypeDescriptor::nullable);
		self
	}

	pub fn with_default(mut self) -> Self {
		self.has_default = true;
		self
	}
}

/// A type the container can construct.
///
/// # Examples
///
/// ```
/// use autowire_di::{Arguments, Component, DiResult, Parameter};
/// use std::sync::Arc;
///
/// struct Database;
///
/// impl Component for Database {
///     const NAME: &'static str = "Database";
///
///     fn construct(_args: Arguments) -> DiResult<Self> {
///         Ok(Database)
///     }
/// }
///
/// struct UserRepository {
///     db: Arc<Database>,
/// }
///
/// impl Component for UserRepository {
///     const NAME: &'static str = "UserRepository";
///
///     fn parameters() -> Vec<Parameter> {
///         vec![Parameter::of::<Database>("db")]
///     }
///
///     fn construct(args: Arguments) -> DiResult<Self> {
///         Ok(UserRepository { db: args.instance::<Database>(0)? })
///     }
/// }
/// ```
pub trait Component: Send + Sync + Sized + 'static {
	/// Identifier this type is resolved under.
	const NAME: &'static str;

	/// Interfaces and abstract types this component satisfies.
	fn supertypes() -> &'static [&'static str] {
		&[]
	}

	/// Constructor signature, in declaration order.
	fn parameters() -> Vec<Parameter> {
		Vec::new()
	}

	fn construct(args: Arguments) -> DiResult<Self>;

	/// Request-handler view of this component, if it is one.
	fn handler(_this: Arc<Self>) -> Option<Arc<dyn Handler>> {
		None
	}
}

type Constructor = Arc<dyn Fn(Arguments) -> DiResult<Instance> + Send + Sync>;

/// Registered metadata for one identifier.
#[derive(Clone)]
pub struct TypeInfo {
	name: String,
	kind: TypeKind,
	supertypes: Vec<String>,
	parameters: Vec<Parameter>,
	constructor: Option<Constructor>,
}

impl TypeInfo {
	pub fn of<T: Component>() -> Self {
		Self {
			name: T::NAME.to_string(),
			kind: TypeKind::Class,
			supertypes: T::supertypes().iter().map(|s| s.to_string()).collect(),
			parameters: T::parameters(),
			constructor: Some(Arc::new(|args| T::construct(args).map(Instance::new))),
		}
	}

	/// A definition that can be named and implemented but never constructed.
	pub fn abstract_type(name: impl Into<String>, kind: TypeKind) -> Self {
		Self {
			name: name.into(),
			kind,
			supertypes: Vec::new(),
			parameters: Vec::new(),
			constructor: None,
		}
	}

	pub fn interface(name: impl Into<String>) -> Self {
		Self::abstract_type(name, TypeKind::Interface)
	}

	/// Declares a parent interface or abstract type.
	pub fn extends(mut self, parent: impl Into<String>) -> Self {
		self.supertypes.push(parent.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> TypeKind {
		self.kind
	}

	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	pub(crate) fn constructor(&self) -> Option<Constructor> {
		self.constructor.clone()
	}
}

impl fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeInfo")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("supertypes", &self.supertypes)
			.field("parameters", &self.parameters)
			.finish()
	}
}

/// Registration table standing in for runtime reflection.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
	types: HashMap<String, TypeInfo>,
}

impl TypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers (or replaces) a type.
	pub fn insert(&mut self, info: TypeInfo) -> &mut Self {
		self.types.insert(info.name.clone(), info);
		self
	}

	pub fn register<T: Component>(&mut self) -> &mut Self {
		self.insert(TypeInfo::of::<T>())
	}

	/// Registers `T` unless something is already registered under its name.
	pub fn register_if_absent<T: Component>(&mut self) -> &mut Self {
		if !self.types.contains_key(T::NAME) {
			self.register::<T>();
		}
		self
	}

	pub fn get(&self, identifier: &str) -> Option<&TypeInfo> {
		self.types.get(identifier)
	}

	pub fn contains(&self, identifier: &str) -> bool {
		self.types.contains_key(identifier)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Whether `instance` satisfies `identifier`, following declared
	/// supertypes transitively through registered definitions.
	pub fn is_instance_of(&self, instance: &Instance, identifier: &str) -> bool {
		if instance.identifier() == identifier {
			return true;
		}

		let mut pending: Vec<&str> = instance.supertypes().to_vec();
		if let Some(info) = self.types.get(instance.identifier()) {
			pending.extend(info.supertypes.iter().map(String::as_str));
		}

		let mut visited = HashSet::new();
		while let Some(current) = pending.pop() {
			if current == identifier {
				return true;
			}
			if !visited.insert(current) {
				continue;
			}
			if let Some(info) = self.types.get(current) {
				pending.extend(info.supertypes.iter().map(String::as_str));
			}
		}
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct FileLogger;

	impl Component for FileLogger {
		const NAME: &'static str = "FileLogger";

		fn supertypes() -> &'static [&'static str] {
			&["Logger"]
		}

		fn construct(_args: Arguments) -> DiResult<Self> {
			Ok(FileLogger)
		}
	}

	#[rstest]
	fn test_instance_of_follows_interface_parents() {
		// Arrange
		let mut registry = TypeRegistry::new();
		registry
			.register::<FileLogger>()
			.insert(TypeInfo::interface("Logger").extends("Writer"))
			.insert(TypeInfo::interface("Writer"));
		let instance = Instance::new(FileLogger);

		// Act & Assert
		assert!(registry.is_instance_of(&instance, "FileLogger"));
		assert!(registry.is_instance_of(&instance, "Logger"));
		assert!(registry.is_instance_of(&instance, "Writer"));
		assert!(!registry.is_instance_of(&instance, "Reader"));
	}

	#[rstest]
	fn test_instance_of_survives_cyclic_declarations() {
		// Arrange
		let mut registry = TypeRegistry::new();
		registry
			.insert(TypeInfo::interface("Logger").extends("Writer"))
			.insert(TypeInfo::interface("Writer").extends("Logger"));

		// Act & Assert
		assert!(!registry.is_instance_of(&Instance::new(FileLogger), "Reader"));
	}

	#[rstest]
	#[case(TypeDescriptor::Scalar(ScalarKind::Int), "int")]
	#[case(TypeDescriptor::object("Logger").nullable(), "?Logger")]
	#[case(
		TypeDescriptor::Union(vec![TypeDescriptor::Scalar(ScalarKind::Int), TypeDescriptor::Scalar(ScalarKind::String)]),
		"int|string"
	)]
	#[case(
		TypeDescriptor::Intersection(vec![TypeDescriptor::object("A"), TypeDescriptor::object("B")]),
		"A&B"
	)]
	fn test_descriptor_display(#[case] descriptor: TypeDescriptor, #[case] expected: &str) {
		assert_eq!(descriptor.to_string(), expected);
	}

	#[rstest]
	fn test_union_with_null_allows_null() {
		// Arrange
		let descriptor = TypeDescriptor::Union(vec![
			TypeDescriptor::object("Logger"),
			TypeDescriptor::builtin("null"),
		]);

		// Act & Assert
		assert!(descriptor.allows_null());
		assert!(descriptor.is_composite());
		assert!(!TypeDescriptor::object("Logger").allows_null());
	}

	#[rstest]
	fn test_nullable_is_not_wrapped_twice() {
		assert_eq!(
			TypeDescriptor::object("Logger").nullable().nullable(),
			TypeDescriptor::object("Logger").nullable()
		);
	}

	#[rstest]
	fn test_register_if_absent_keeps_existing_definition() {
		// Arrange
		let mut registry = TypeRegistry::new();
		registry.insert(TypeInfo::abstract_type("FileLogger", TypeKind::Abstract));

		// Act
		registry.register_if_absent::<FileLogger>();

		// Assert
		assert_eq!(registry.get("FileLogger").unwrap().kind(), TypeKind::Abstract);
		assert_eq!(registry.len(), 1);
	}
}
