//! Components shared by the integration tests
#![allow(dead_code)]

use autowire_di::{Arguments, Component, DiResult, Parameter};
use std::sync::Arc;

pub struct Database;

impl Component for Database {
	const NAME: &'static str = "Database";

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(Database)
	}
}

/// Satisfies `Database` without being one.
pub struct InMemoryDatabase;

impl Component for InMemoryDatabase {
	const NAME: &'static str = "InMemoryDatabase";

	fn supertypes() -> &'static [&'static str] {
		&["Database"]
	}

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(InMemoryDatabase)
	}
}

pub struct UserRepository {
	pub db: Arc<Database>,
}

impl Component for UserRepository {
	const NAME: &'static str = "UserRepository";

	fn supertypes() -> &'static [&'static str] {
		&["Repository"]
	}

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::of::<Database>("db")]
	}

	fn construct(args: Arguments) -> DiResult<Self> {
		Ok(UserRepository {
			db: args.instance::<Database>(0)?,
		})
	}
}

pub struct UserService {
	pub repository: Arc<UserRepository>,
}

impl Component for UserService {
	const NAME: &'static str = "UserService";

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::of::<UserRepository>("repository")]
	}

	fn construct(args: Arguments) -> DiResult<Self> {
		Ok(UserService {
			repository: args.instance::<UserRepository>(0)?,
		})
	}
}

pub struct Greeter {
	pub name: String,
}

impl Component for Greeter {
	const NAME: &'static str = "Greeter";

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(Greeter {
			name: "world".to_string(),
		})
	}
}

pub struct Widget {
	pub count: i64,
}

impl Component for Widget {
	const NAME: &'static str = "Widget";

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(Widget { count: 0 })
	}
}

/// Asks for a scalar through its constructor.
pub struct Mailer {
	pub sender: String,
}

impl Component for Mailer {
	const NAME: &'static str = "Mailer";

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::string("sender")]
	}

	fn construct(args: Arguments) -> DiResult<Self> {
		Ok(Mailer {
			sender: args.string(0)?,
		})
	}
}

pub struct Notifier {
	pub mailer: Option<Arc<Mailer>>,
}

impl Component for Notifier {
	const NAME: &'static str = "Notifier";

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::of::<Mailer>("mailer").nullable()]
	}

	fn construct(args: Arguments) -> DiResult<Self> {
		Ok(Notifier {
			mailer: args.optional::<Mailer>(0)?,
		})
	}
}

pub struct Chicken;

impl Component for Chicken {
	const NAME: &'static str = "Chicken";

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::object("egg", "Egg")]
	}

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(Chicken)
	}
}

pub struct Egg;

impl Component for Egg {
	const NAME: &'static str = "Egg";

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::object("chicken", "Chicken")]
	}

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(Egg)
	}
}

pub struct MemoryCache;

impl Component for MemoryCache {
	const NAME: &'static str = "MemoryCache";

	fn supertypes() -> &'static [&'static str] {
		&["Cache", "LocalCache"]
	}

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(MemoryCache)
	}
}
