//! Shared containers under concurrent first resolution

mod common;

use autowire_di::{
	Container, ContainerSettings, DiError, Entry, Factory, Instance, Produced, ScalarKind,
	TypeInfo,
};
use common::*;
use proptest::prelude::*;
use rstest::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;

fn counting_container(calls: Arc<AtomicUsize>) -> Container {
	Container::builder()
		.register::<Database>()
		.register::<UserRepository>()
		.factory(
			"Database",
			Factory::from_fn(move || {
				calls.fetch_add(1, Ordering::SeqCst);
				Ok(Produced::instance(Database))
			}),
		)
		.build()
		.unwrap()
}

#[rstest]
fn test_concurrent_first_resolution_constructs_once() {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let container = counting_container(Arc::clone(&calls));

	// Act
	let instances: Vec<Instance> = thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let container = container.clone();
				scope.spawn(move || container.resolve("UserRepository").unwrap())
			})
			.collect();
		handles
			.into_iter()
			.map(|handle| handle.join().unwrap())
			.collect()
	});

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(instances.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
}

#[tokio::test]
async fn test_container_is_shareable_across_tasks() {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let container = counting_container(Arc::clone(&calls));

	// Act
	let mut handles = Vec::new();
	for _ in 0..4 {
		let container = container.clone();
		handles.push(tokio::spawn(async move {
			container.resolve("Database").map(|_| ())
		}));
	}
	for handle in handles {
		handle.await.unwrap().unwrap();
	}

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Builds a container whose `Database` factory runs `call_back` against the
/// container itself.
fn self_referencing_container<F>(call_back: F) -> Container
where
	F: Fn(&Container) -> autowire_di::DiResult<()> + Send + Sync + 'static,
{
	let cell: Arc<OnceLock<Container>> = Arc::new(OnceLock::new());
	let handle = Arc::clone(&cell);
	let container = Container::builder()
		.register::<InMemoryDatabase>()
		.factory(
			"Database",
			Factory::from_fn(move || {
				let container = handle
					.get()
					.ok_or_else(|| DiError::Internal("container not set".to_string()))?;
				call_back(container)?;
				Ok(Produced::instance(InMemoryDatabase))
			}),
		)
		.build()
		.unwrap();
	cell.set(container.clone()).unwrap();
	container
}

#[rstest]
fn test_factory_resolving_through_own_container_fails_fast() {
	// Arrange
	let container = self_referencing_container(|container| {
		container.resolve("InMemoryDatabase").map(|_| ())
	});

	// Act
	let result = container.resolve("Database");

	// Assert
	assert!(matches!(
		result,
		Err(DiError::ReentrantAccess(ref identifier)) if identifier == "InMemoryDatabase"
	));
}

#[rstest]
#[case::variable(|c: &Container| c.variable("name", ScalarKind::String).map(|_| ()))]
#[case::bind(|c: &Container| c.bind("name", Entry::alias("Database")))]
#[case::has(|c: &Container| c.has("Database").map(|_| ()))]
#[case::register(|c: &Container| c.register::<Database>())]
fn test_every_store_access_from_a_factory_fails_fast(
	#[case] call_back: fn(&Container) -> autowire_di::DiResult<()>,
) {
	// Arrange
	let container = self_referencing_container(call_back);

	// Act
	let result = container.resolve("Database");

	// Assert
	assert!(matches!(result, Err(DiError::ReentrantAccess(_))));
}

#[rstest]
fn test_container_stays_usable_after_rejected_reentry() {
	// Arrange
	let container = self_referencing_container(|container| {
		container.resolve("InMemoryDatabase").map(|_| ())
	});
	assert!(container.resolve("Database").is_err());

	// Act
	let from_other_thread = thread::scope(|scope| {
		let container = container.clone();
		scope
			.spawn(move || container.resolve("InMemoryDatabase"))
			.join()
			.unwrap()
	});

	// Assert
	assert!(from_other_thread.is_ok());
	assert!(matches!(
		container.resolve("Database"),
		Err(DiError::ReentrantAccess(_))
	));
}

proptest! {
	#[test]
	fn prop_factory_invoked_at_most_once(lookups in 1usize..32) {
		let calls = Arc::new(AtomicUsize::new(0));
		let container = counting_container(Arc::clone(&calls));

		let first = container.resolve("Database").unwrap();
		for _ in 1..lookups {
			let again = container.resolve("Database").unwrap();
			prop_assert!(again.ptr_eq(&first));
		}

		prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn prop_depth_budget_bounds_alias_chain(hops in 0usize..20, budget in 1usize..20) {
		let mut local_cache = TypeInfo::interface("LocalCache");
		let mut builder = Container::builder()
			.settings(ContainerSettings::new().with_depth_budget(budget))
			.register::<MemoryCache>();
		for index in 0..hops {
			local_cache = local_cache.extends(format!("Cache{index}"));
			builder = builder.alias(format!("Cache{index}"), format!("Cache{}", index + 1));
		}
		local_cache = local_cache.extends(format!("Cache{hops}"));
		let container = builder
			.alias(format!("Cache{hops}"), "MemoryCache")
			.define(local_cache)
			.build()
			.unwrap();

		let result = container.resolve("Cache0");

		prop_assert_eq!(result.is_ok(), hops < budget);
	}
}
