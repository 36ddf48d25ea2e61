//! Binding store: identifier to entry map doubling as the singleton cache

use crate::entry::Entry;
use crate::error::{DiError, DiResult};
use crate::reflection::TypeRegistry;
use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct BindingStore {
	entries: HashMap<String, Entry>,
}

impl BindingStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store from a plain map, validating every binding up front.
	///
	/// Each value must be a scalar, an alias, a factory, or an instance of
	/// the type named by its own key. Anything else fails with
	/// [`DiError::InvalidBindingKind`] before any resolution happens.
	pub fn from_entries<I, K>(entries: I, registry: &TypeRegistry) -> DiResult<Self>
	where
		I: IntoIterator<Item = (K, Entry)>,
		K: Into<String>,
	{
		let store = Self {
			entries: entries
				.into_iter()
				.map(|(identifier, entry)| (identifier.into(), entry))
				.collect(),
		};
		store.validate(registry)?;
		Ok(store)
	}

	pub fn validate(&self, registry: &TypeRegistry) -> DiResult<()> {
		let mut identifiers: Vec<&String> = self.entries.keys().collect();
		identifiers.sort();
		for identifier in identifiers {
			validate_entry(identifier, &self.entries[identifier], registry)?;
		}
		Ok(())
	}

	pub fn get(&self, identifier: &str) -> Option<&Entry> {
		self.entries.get(identifier)
	}

	pub fn contains(&self, identifier: &str) -> bool {
		self.entries.contains_key(identifier)
	}

	/// Adds or replaces a binding without validating it.
	///
	/// Illegal literals surface on first access instead.
	pub fn insert(&mut self, identifier: impl Into<String>, entry: Entry) -> Option<Entry> {
		self.entries.insert(identifier.into(), entry)
	}

	/// Memoizes a resolved value in place of whatever was bound before.
	pub fn put(&mut self, identifier: impl Into<String>, value: Value) {
		self.entries.insert(identifier.into(), Entry::Literal(value));
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

fn validate_entry(identifier: &str, entry: &Entry, registry: &TypeRegistry) -> DiResult<()> {
	match entry {
		Entry::Alias(_) | Entry::Factory(_) | Entry::Literal(Value::Scalar(_)) => Ok(()),
		Entry::Literal(Value::Instance(instance))
			if registry.is_instance_of(instance, identifier) =>
		{
			Ok(())
		}
		Entry::Literal(value) => Err(DiError::InvalidBindingKind {
			identifier: identifier.to_string(),
			kind: value.describe(),
		}),
	}
}
