//! End-to-end: a controller wired through the facade crate

use autowire::prelude::*;
use bytes::Bytes;
use http::StatusCode;
use rstest::*;
use std::sync::Arc;

struct Greeter {
	name: String,
}

impl Component for Greeter {
	const NAME: &'static str = "Greeter";

	fn construct(_args: Arguments) -> DiResult<Self> {
		Ok(Greeter {
			name: "world".to_string(),
		})
	}
}

struct GreetingController {
	greeter: Arc<Greeter>,
}

impl Component for GreetingController {
	const NAME: &'static str = "GreetingController";

	fn parameters() -> Vec<Parameter> {
		vec![Parameter::of::<Greeter>("greeter")]
	}

	fn construct(args: Arguments) -> DiResult<Self> {
		Ok(GreetingController {
			greeter: args.instance::<Greeter>(0)?,
		})
	}

	fn handler(this: Arc<Self>) -> Option<Arc<dyn Handler>> {
		Some(this)
	}
}

#[async_trait]
impl Handler for GreetingController {
	async fn handle(&self, _request: Request, _next: Option<Next>) -> autowire::http::Result<Response> {
		text_response(StatusCode::OK, format!("Hello {}!", self.greeter.name))
	}
}

fn container(settings: ContainerSettings) -> Container {
	Container::builder()
		.settings(settings)
		.register::<Greeter>()
		.register::<GreetingController>()
		.factory(
			"Greeter",
			Factory::new(vec![Parameter::string("name")], |args| {
				Ok(Produced::instance(Greeter {
					name: args.string(0)?,
				}))
			}),
		)
		.build()
		.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_controller_greets_configured_name() {
	// Arrange
	let settings = ContainerSettings::from_toml_str("[variables]\nname = \"Alice\"").unwrap();
	let container = container(settings);
	let controller: Arc<dyn Handler> =
		Arc::new(ContainerHandler::new(container.clone(), "GreetingController"));
	let errors = container.error_handler().unwrap();

	// Act
	let response = errors
		.handle(http::Request::new(Bytes::new()), Some(controller))
		.await
		.unwrap();

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.body(), &Bytes::from_static(b"Hello Alice!"));
}

#[rstest]
#[tokio::test]
async fn test_missing_variable_is_rendered_as_500() {
	// Arrange
	let container = container(ContainerSettings::default());
	let controller: Arc<dyn Handler> =
		Arc::new(ContainerHandler::new(container.clone(), "GreetingController"));
	let errors = container.error_handler().unwrap();

	// Act
	let response = errors
		.handle(http::Request::new(Bytes::new()), Some(controller))
		.await
		.unwrap();

	// Assert
	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert!(matches!(
		container.resolve("GreetingController"),
		Err(DiError::UndefinedVariable(ref name)) if name == "name"
	));
}
