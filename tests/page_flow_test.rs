//! Requests served end to end through mapped pages

use clickwork::prelude::*;
use http::Method;
use rstest::{fixture, rstest};

fn login_page(path: &str) -> Page {
	let mut page = Page::new(path);
	let mut form = Form::new("login");
	form.add(TextField::new("username").required()).unwrap();
	form.add(Button::submit("ok")).unwrap();
	page.add_control(form).unwrap();
	page.set_on_post(|page, ctx| {
		let valid = page.form("login").is_some_and(|form| form.is_valid());
		if valid {
			ctx.set_redirect("/home.htm");
		}
	});
	page
}

#[fixture]
fn registry() -> PageRegistry {
	let catalog = PageCatalog::new()
		.with_page("app.Login", login_page)
		.with_page("app.Home", |path| Page::new(path));
	let settings = ClickSettings::from_toml_str("[pages]\npackage = \"app\"\n").unwrap();
	PageRegistry::build(&settings, catalog, &["/login.htm", "/home.htm"]).unwrap()
}

fn post(params: &[(&str, &str)]) -> Context {
	params
		.iter()
		.fold(
			Context::builder().method(Method::POST).path("/login.htm"),
			|builder, (name, value)| builder.param(*name, *value),
		)
		.build()
		.unwrap()
}

#[rstest]
fn test_get_renders_empty_form(registry: PageRegistry) {
	// Arrange
	let mut page = registry.create_page("/login.htm").unwrap();
	let mut ctx = Context::builder().path("/login.htm").build().unwrap();

	// Act
	let response = page.process(&mut ctx);

	// Assert
	let PageResponse::Html(html) = response else {
		panic!("expected html, got {response:?}");
	};
	assert!(html.contains(r#"<form method="post" name="login" id="login">"#));
	assert!(!html.contains("login-errors"));
}

#[rstest]
fn test_invalid_post_renders_errors(registry: PageRegistry) {
	// Arrange
	let mut page = registry.create_page("/login.htm").unwrap();
	let mut ctx = post(&[(FORM_NAME, "login")]);

	// Act
	let response = page.process(&mut ctx);

	// Assert
	let PageResponse::Html(html) = response else {
		panic!("expected html, got {response:?}");
	};
	assert!(html.contains("You must enter a value for Username"));
}

#[rstest]
fn test_valid_post_redirects(registry: PageRegistry) {
	// Arrange
	let mut page = registry.create_page("/login.htm").unwrap();
	let mut ctx = post(&[(FORM_NAME, "login"), ("username", "ann")]);

	// Act
	let response = page.process(&mut ctx);

	// Assert
	assert_eq!(response, PageResponse::Redirect("/home.htm".to_string()));
}

#[rstest]
fn test_each_request_gets_a_fresh_page(registry: PageRegistry) {
	// Arrange
	let mut first = registry.create_page("/login.htm").unwrap();
	first.process(&mut post(&[(FORM_NAME, "login"), ("username", "ann")]));

	// Act
	let second = registry.create_page("/login.htm").unwrap();

	// Assert
	assert_eq!(second.form("login").unwrap().field_value("username"), Some(""));
}
