//! # Clickwork
//!
//! A page and component oriented web framework.
//!
//! A request is served by a [`Page`](forms::Page): a tree of controls that
//! each take part in the same lifecycle. Forms bind request parameters to
//! their fields, validate them, guard against replayed submissions and
//! copy values to and from maps or beans. Tables render rows through
//! columns and, as form tables, edit them in place. Page mappings and
//! static resources come from a TOML settings file.
//!
//! ## Feature Flags
//!
//! - `minimal` - Request context, messages and the component model
//! - `full` (default) - Everything below
//! - `forms` - Controls, fields, forms, pages and binding
//! - `tables` - Tables and form tables
//! - `conf` - Settings, page mappings and resource deployment
//!
//! ## Example
//!
//! ```rust
//! use clickwork::prelude::*;
//! use http::Method;
//!
//! let mut catalog = PageCatalog::new();
//! catalog.register("Login", |path| {
//! 	let mut page = Page::new(path);
//! 	let mut form = Form::new("login");
//! 	form.add(TextField::new("username").required()).unwrap();
//! 	form.add(Button::submit("ok")).unwrap();
//! 	page.add_control(form).unwrap();
//! 	page
//! });
//! let registry = PageRegistry::build(&ClickSettings::default(), catalog, &["/login.htm"]).unwrap();
//!
//! let mut page = registry.create_page("/login.htm").unwrap();
//! let mut ctx = Context::builder()
//! 	.method(Method::POST)
//! 	.path("/login.htm")
//! 	.param(FORM_NAME, "login")
//! 	.build()
//! 	.unwrap();
//!
//! let PageResponse::Html(html) = page.process(&mut ctx) else {
//! 	panic!("expected html");
//! };
//! assert!(html.contains("You must enter a value for Username"));
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod http;
pub mod i18n;

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "tables")]
pub mod tables;

pub mod prelude;
