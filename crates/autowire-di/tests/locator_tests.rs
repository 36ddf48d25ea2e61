//! Containers backed by an external service locator

mod common;

use autowire_di::{
	Container, DiError, Instance, Locator, LocatorError, ScalarKind, StaticLocator,
};
use common::*;
use rstest::*;
use std::sync::Arc;

/// Locator that knows every identifier but can build none of them.
struct BrokenLocator;

impl Locator for BrokenLocator {
	fn has(&self, _identifier: &str) -> bool {
		true
	}

	fn get(&self, identifier: &str) -> Result<Instance, LocatorError> {
		Err(LocatorError::Failed {
			identifier: identifier.to_string(),
			message: "connection refused".to_string(),
		})
	}
}

#[fixture]
fn locator() -> Arc<StaticLocator> {
	Arc::new(StaticLocator::new().with(Database).with(MemoryCache))
}

#[rstest]
fn test_lookup_is_delegated(locator: Arc<StaticLocator>) {
	// Arrange
	let container = Container::from_locator(locator.clone());

	// Act
	let database = container.resolve("Database").unwrap();

	// Assert
	assert!(database.ptr_eq(&locator.get("Database").unwrap()));
	assert!(container.get::<Database>().is_ok());
}

#[rstest]
fn test_locator_never_constructs_locally(locator: Arc<StaticLocator>) {
	// Arrange
	let container = Container::from_locator(locator);
	container.register::<UserRepository>().unwrap();

	// Act
	let result = container.resolve("UserRepository");

	// Assert
	match result {
		Err(DiError::HandlerLoadFailed { identifier, source }) => {
			assert_eq!(identifier, "UserRepository");
			assert!(matches!(source, LocatorError::NotFound(ref id) if id == "UserRepository"));
		}
		other => panic!("unexpected result: {other:?}"),
	}
}

#[rstest]
fn test_locator_failure_is_wrapped_as_source() {
	// Arrange
	let container = Container::from_locator(Arc::new(BrokenLocator));

	// Act
	let error = container.resolve("Database").unwrap_err();

	// Assert
	assert_eq!(
		error.to_string(),
		"Request handler `Database` failed to load: Failed to retrieve `Database`: connection refused"
	);
	assert!(std::error::Error::source(&error).is_some());
}

#[rstest]
fn test_has_delegates_to_locator(locator: Arc<StaticLocator>) {
	// Arrange
	let container = Container::from_locator(locator);

	// Act & Assert
	assert!(container.has("MemoryCache").unwrap());
	assert!(!container.has("UserRepository").unwrap());
}

#[rstest]
fn test_locator_entries_are_not_validated(locator: Arc<StaticLocator>) {
	// Arrange
	let mut mismatched = (*locator).clone();
	mismatched.insert("Repository", Instance::new(Database));
	let container = Container::from_locator(Arc::new(mismatched));

	// Act
	let repository = container.resolve("Repository").unwrap();

	// Assert
	assert_eq!(repository.identifier(), "Database");
}

#[rstest]
fn test_locator_holds_no_variables(locator: Arc<StaticLocator>) {
	// Arrange
	let container = Container::from_locator(locator);

	// Act
	let result = container.variable("name", ScalarKind::String);

	// Assert
	assert!(matches!(result, Err(DiError::UndefinedVariable(ref n)) if n == "name"));
}

#[rstest]
fn test_optional_service_prefers_locator_entry(locator: Arc<StaticLocator>) {
	// Arrange
	let container = Container::from_locator(locator.clone());

	// Act
	let cache = container.optional_service::<MemoryCache>().unwrap();

	// Assert
	assert!(cache.ptr_eq(&locator.get("MemoryCache").unwrap()));
}

#[rstest]
fn test_optional_service_rejects_unrelated_locator_entry() {
	// Arrange
	let mut locator = StaticLocator::new();
	locator.insert("MemoryCache", Instance::new(Database));
	let container = Container::from_locator(Arc::new(locator));

	// Act
	let result = container.optional_service::<MemoryCache>();

	// Assert
	assert!(matches!(
		result,
		Err(DiError::UnexpectedFactoryResult { ref identifier, ref kind })
			if identifier == "MemoryCache" && kind == "instance of Database"
	));
}

#[rstest]
fn test_optional_service_propagates_locator_failure() {
	// Arrange
	let container = Container::from_locator(Arc::new(BrokenLocator));

	// Act
	let result = container.optional_service::<MemoryCache>();

	// Assert
	assert!(matches!(result, Err(DiError::HandlerLoadFailed { .. })));
}
