//! Depth-first resolution over a binding store
//!
//! A [`Resolver`] borrows the store mutably for one walk: every node it
//! resolves is written back, so each identifier is built or invoked at most
//! once for the lifetime of the store.
//!
//! The depth budget is decremented on every component-to-component or
//! alias-to-alias hop; reaching zero before a hop is reported as recursion.

use crate::arguments::{Argument, Arguments};
use crate::coercion::coerce_variable;
use crate::cycle_detection::ResolutionStack;
use crate::entry::{Entry, Factory, Produced};
use crate::error::{DiError, DiResult};
use crate::reflection::{Parameter, TypeDescriptor, TypeRegistry};
use crate::store::BindingStore;
use crate::value::{Instance, Scalar, ScalarKind, Value};

pub struct Resolver<'a> {
	store: &'a mut BindingStore,
	registry: &'a TypeRegistry,
	stack: ResolutionStack,
}

impl<'a> Resolver<'a> {
	pub fn new(store: &'a mut BindingStore, registry: &'a TypeRegistry, detect_cycles: bool) -> Self {
		Self {
			store,
			registry,
			stack: ResolutionStack::new(detect_cycles),
		}
	}

	/// Resolves a type identifier to an instance.
	pub fn resolve(&mut self, identifier: &str, depth: usize) -> DiResult<Instance> {
		let entry = self.store.get(identifier).cloned();
		match entry {
			Some(Entry::Literal(Value::Instance(instance))) => {
				if self.registry.is_instance_of(&instance, identifier) {
					tracing::trace!(identifier, "resolved from store");
					Ok(instance)
				} else {
					Err(DiError::InvalidBindingKind {
						identifier: identifier.to_string(),
						kind: instance.describe(),
					})
				}
			}
			Some(Entry::Literal(value)) => Err(DiError::InvalidBindingKind {
				identifier: identifier.to_string(),
				kind: value.describe(),
			}),
			Some(Entry::Alias(target)) => {
				self.tracked(identifier, |this| this.follow(identifier, &target, depth))
			}
			Some(Entry::Factory(factory)) => self.tracked(identifier, |this| {
				this.invoke_type_factory(identifier, &factory, depth)
			}),
			None => self.tracked(identifier, |this| this.construct(identifier, depth)),
		}
	}

	/// Loads a scalar variable and coerces it to `kind`.
	pub fn load_variable(&mut self, name: &str, kind: ScalarKind, depth: usize) -> DiResult<Scalar> {
		let value = match self.store.get(name).cloned() {
			None => return Err(DiError::UndefinedVariable(name.to_string())),
			Some(Entry::Factory(factory)) => {
				if depth < 1 || self.stack.closes_cycle(name) {
					return Err(DiError::RecursiveVariable {
						name: name.to_string(),
						path: self.stack.path_to(name),
					});
				}
				let produced = {
					let _guard = self.stack.enter(name);
					self.invoke_variable_factory(name, &factory, depth - 1)
				};
				let scalar = produced?;
				self.store.put(name, Value::Scalar(scalar.clone()));
				Value::Scalar(scalar)
			}
			Some(Entry::Alias(_)) => {
				return Err(DiError::ScalarExpected {
					name: name.to_string(),
					kind: "alias".to_string(),
				});
			}
			Some(Entry::Literal(value)) => value,
		};

		match value {
			Value::Scalar(scalar) => {
				let coerced = coerce_variable(name, scalar, kind)?;
				tracing::debug!(variable = name, %kind, "loaded variable");
				Ok(coerced)
			}
			other => Err(DiError::ScalarExpected {
				name: name.to_string(),
				kind: other.describe(),
			}),
		}
	}

	/// Produces the argument list for a constructor or factory signature.
	///
	/// Collection stops at the first defaulted parameter. Scalars are only
	/// injected when `allow_scalars` is set, i.e. for factories.
	pub fn load_params(
		&mut self,
		parameters: &[Parameter],
		owner: &str,
		depth: usize,
		allow_scalars: bool,
	) -> DiResult<Arguments> {
		let mut values = Vec::with_capacity(parameters.len());

		for (index, parameter) in parameters.iter().enumerate() {
			if parameter.has_default {
				break;
			}
			let position = index + 1;

			let Some(ty) = &parameter.ty else {
				return Err(DiError::UntypedParameter {
					position,
					name: parameter.name.clone(),
					owner: owner.to_string(),
				});
			};

			let argument = match ty {
				_ if ty.allows_null() => Argument::Null,
				TypeDescriptor::Scalar(kind) if allow_scalars => {
					Argument::Scalar(self.load_variable(&parameter.name, *kind, depth)?)
				}
				TypeDescriptor::Object(target) => {
					if depth < 1 || self.stack.closes_cycle(target) {
						return Err(DiError::RecursiveParameter {
							position,
							name: parameter.name.clone(),
							owner: owner.to_string(),
							path: self.stack.path_to(target),
						});
					}
					Argument::Instance(self.resolve(target, depth - 1)?)
				}
				_ => {
					return Err(DiError::UnsupportedParameterType {
						position,
						name: parameter.name.clone(),
						owner: owner.to_string(),
						ty: ty.to_string(),
					});
				}
			};
			values.push(argument);
		}

		Ok(Arguments::new(owner, values))
	}

	/// Runs `f` with `identifier` marked in flight and memoizes its result.
	fn tracked<F>(&mut self, identifier: &str, f: F) -> DiResult<Instance>
	where
		F: FnOnce(&mut Self) -> DiResult<Instance>,
	{
		let guard = self.stack.enter(identifier);
		let result = f(self);
		drop(guard);

		let instance = result?;
		self.store.put(identifier, Value::Instance(instance.clone()));
		Ok(instance)
	}

	/// Alias hop from `identifier` to `target`.
	fn follow(&mut self, identifier: &str, target: &str, depth: usize) -> DiResult<Instance> {
		if depth < 1 || self.stack.closes_cycle(target) {
			return Err(DiError::RecursiveFactory {
				identifier: identifier.to_string(),
				path: self.stack.path_to(target),
			});
		}

		tracing::debug!(identifier, target, "following alias");
		let instance = self.resolve(target, depth - 1)?;
		self.expect_instance_of(identifier, instance)
	}

	fn invoke_type_factory(
		&mut self,
		identifier: &str,
		factory: &Factory,
		depth: usize,
	) -> DiResult<Instance> {
		let owner = format!("factory for `{}`", identifier);
		let args = self.load_params(factory.parameters(), &owner, depth, true)?;

		tracing::debug!(identifier, "invoking factory");
		match factory.invoke(args)? {
			Produced::Redirect(target) => self.follow(identifier, &target, depth),
			Produced::Value(Value::Instance(instance)) => self.expect_instance_of(identifier, instance),
			Produced::Value(other) => Err(DiError::UnexpectedFactoryResult {
				identifier: identifier.to_string(),
				kind: other.describe(),
			}),
		}
	}

	fn invoke_variable_factory(
		&mut self,
		name: &str,
		factory: &Factory,
		depth: usize,
	) -> DiResult<Scalar> {
		let owner = format!("factory for variable `{}`", name);
		let args = self.load_params(factory.parameters(), &owner, depth, true)?;

		tracing::debug!(variable = name, "invoking variable factory");
		match factory.invoke(args)? {
			Produced::Value(Value::Scalar(scalar)) => Ok(scalar),
			Produced::Value(other) => Err(DiError::FactoryScalarExpected {
				name: name.to_string(),
				kind: other.describe(),
			}),
			Produced::Redirect(_) => Err(DiError::FactoryScalarExpected {
				name: name.to_string(),
				kind: "alias".to_string(),
			}),
		}
	}

	fn construct(&mut self, identifier: &str, depth: usize) -> DiResult<Instance> {
		let registry = self.registry;
		let info = registry
			.get(identifier)
			.ok_or_else(|| DiError::TypeNotFound(identifier.to_string()))?;

		let constructor = match info.constructor() {
			Some(constructor) if info.kind().is_instantiable() => constructor,
			_ => {
				return Err(DiError::NotInstantiable {
					identifier: identifier.to_string(),
					kind: info.kind(),
				});
			}
		};

		let owner = format!("{}::new", identifier);
		let args = self.load_params(info.parameters(), &owner, depth, false)?;

		tracing::debug!(identifier, "constructing component");
		constructor(args)
	}

	fn expect_instance_of(&self, identifier: &str, instance: Instance) -> DiResult<Instance> {
		if self.registry.is_instance_of(&instance, identifier) {
			Ok(instance)
		} else {
			Err(DiError::UnexpectedFactoryResult {
				identifier: identifier.to_string(),
				kind: instance.describe(),
			})
		}
	}
}
