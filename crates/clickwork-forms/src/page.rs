//! Pages: the request-scoped root of a control tree

use clickwork_http::Context;
use std::fmt;

use crate::container::ControlList;
use crate::control::{Control, ControlId};
use crate::error::ControlResult;
use crate::form::Form;
use crate::html::HtmlBuffer;

type PageHook = Box<dyn FnMut(&mut Page, &mut Context) -> bool + Send>;
type PageAction = Box<dyn FnMut(&mut Page, &mut Context) + Send>;

/// What a processed page asks the server to send back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
	Html(String),
	Redirect(String),
}

/// A page and its top-level controls.
///
/// [`Page::process`] drives one request through the lifecycle:
///
/// 1. `on_init` on every control
/// 2. the security check hook; `false` skips processing
/// 3. `on_process` on every control in order, stopping at the first `false`
///    or when a listener cancels processing (skipped for forwarded requests)
/// 4. the `on_get`/`on_post` action
/// 5. a redirect, or `on_render` followed by rendering
/// 6. `on_destroy` on every control, always
pub struct Page {
	id: ControlId,
	path: String,
	controls: ControlList,
	security_check: Option<PageHook>,
	on_get: Option<PageAction>,
	on_post: Option<PageAction>,
}

impl Page {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Form, Page};
	///
	/// let mut page = Page::new("/login.htm");
	/// page.add_control(Form::new("login")).unwrap();
	/// assert!(page.form("login").is_some());
	/// ```
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			id: ControlId::next(),
			path: path.into(),
			controls: ControlList::new(),
			security_check: None,
			on_get: None,
			on_post: None,
		}
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn add_control<C: Control>(&mut self, control: C) -> ControlResult<ControlId> {
		let id = control.id();
		let index = self.controls.len();
		self.controls.insert(self.id, Box::new(control), index)?;
		Ok(id)
	}

	pub fn controls(&self) -> &ControlList {
		&self.controls
	}

	pub fn control(&self, name: &str) -> Option<&dyn Control> {
		self.controls.get(name)
	}

	pub fn control_mut(&mut self, name: &str) -> Option<&mut dyn Control> {
		self.controls.get_mut(name)
	}

	pub fn form(&self, name: &str) -> Option<&Form> {
		self.control(name)?.downcast_ref::<Form>()
	}

	pub fn form_mut(&mut self, name: &str) -> Option<&mut Form> {
		self.control_mut(name)?.downcast_mut::<Form>()
	}

	/// Register the hook run before any control is processed
	pub fn set_security_check<F>(&mut self, check: F)
	where
		F: FnMut(&mut Page, &mut Context) -> bool + Send + 'static,
	{
		self.security_check = Some(Box::new(check));
	}

	pub fn set_on_get<F>(&mut self, action: F)
	where
		F: FnMut(&mut Page, &mut Context) + Send + 'static,
	{
		self.on_get = Some(Box::new(action));
	}

	pub fn set_on_post<F>(&mut self, action: F)
	where
		F: FnMut(&mut Page, &mut Context) + Send + 'static,
	{
		self.on_post = Some(Box::new(action));
	}

	fn run_security_check(&mut self, ctx: &mut Context) -> bool {
		let Some(mut check) = self.security_check.take() else {
			return true;
		};
		let proceed = check(self, ctx);
		self.security_check = Some(check);
		proceed
	}

	fn run_action(&mut self, ctx: &mut Context) {
		let slot = if ctx.is_post() { &mut self.on_post } else { &mut self.on_get };
		let Some(mut action) = slot.take() else {
			return;
		};
		action(self, ctx);
		if ctx.is_post() {
			self.on_post = Some(action);
		} else {
			self.on_get = Some(action);
		}
	}

	fn process_controls(&mut self, ctx: &mut Context) -> bool {
		for control in self.controls.controls_mut() {
			tracing::trace!(page = %self.path, control = %control.core().describe(), "onProcess");
			if !control.on_process(ctx) || ctx.is_processing_cancelled() {
				tracing::debug!(page = %self.path, control = %control.core().describe(), "processing stopped");
				return false;
			}
		}
		true
	}

	/// Run the full lifecycle for one request
	pub fn process(&mut self, ctx: &mut Context) -> PageResponse {
		tracing::debug!(page = %self.path, method = %ctx.method(), "processing page");
		self.controls.init_all(ctx);

		let mut proceed = self.run_security_check(ctx);
		if proceed && !ctx.is_forward() {
			proceed = self.process_controls(ctx);
		}
		if proceed {
			self.run_action(ctx);
		}

		let response = match ctx.redirect() {
			Some(location) => {
				tracing::debug!(page = %self.path, redirect = location, "redirecting");
				PageResponse::Redirect(location.to_string())
			}
			None => {
				self.controls.render_all(ctx);
				PageResponse::Html(self.render())
			}
		};

		self.controls.destroy_all(ctx);
		response
	}

	/// Render every top-level control
	pub fn render(&self) -> String {
		let mut buffer = HtmlBuffer::with_capacity(1024);
		for control in self.controls.iter() {
			control.render(&mut buffer);
			buffer.append("\n");
		}
		buffer.into_string()
	}
}

impl fmt::Debug for Page {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Page")
			.field("path", &self.path)
			.field("controls", &self.controls)
			.field("security_check", &self.security_check.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::container::Container;
	use crate::fields::{ActionLink, TextField};
	use crate::listener::ActionListener;
	use http::Method;
	use rstest::rstest;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn login_page() -> Page {
		let mut form = Form::new("login");
		form.add(TextField::new("username").required()).unwrap();
		let mut page = Page::new("/login.htm");
		page.add_control(form).unwrap();
		page
	}

	#[rstest]
	fn test_get_renders_form() {
		// Arrange
		let mut page = login_page();
		let mut ctx = Context::builder().path("/login.htm").build().unwrap();

		// Act
		let response = page.process(&mut ctx);

		// Assert
		let PageResponse::Html(html) = response else {
			panic!("expected html");
		};
		assert!(html.contains(r#"<form method="post" name="login" id="login">"#));
		assert!(html.contains(r#"id="login_username""#));
	}

	#[rstest]
	fn test_security_check_skips_processing() {
		// Arrange
		let mut page = login_page();
		page.set_security_check(|_page, _ctx| false);
		let mut ctx = Context::builder()
			.method(Method::POST)
			.param("form_name", "login")
			.build()
			.unwrap();

		// Act
		page.process(&mut ctx);

		// Assert
		let form = page.form("login").unwrap();
		assert!(form.field("username").unwrap().error().is_none());
	}

	#[rstest]
	fn test_failed_submit_check_redirects() {
		// Arrange
		let mut page = login_page();
		page.set_security_check(|page, ctx| {
			page.form_mut("login")
				.map(|form| form.on_submit_check(ctx, "/invalid-submit.htm").unwrap_or(false))
				.unwrap_or(false)
		});
		let session = clickwork_http::Session::new();
		session.set_value("SUBMIT_CHECK_login_login.htm", serde_json::json!(42));
		let mut ctx = Context::builder()
			.method(Method::POST)
			.path("/login.htm")
			.param("form_name", "login")
			.session(session)
			.build()
			.unwrap();

		// Act
		let response = page.process(&mut ctx);

		// Assert
		assert_eq!(response, PageResponse::Redirect("/invalid-submit.htm".to_string()));
	}

	#[rstest]
	fn test_forwarded_request_skips_control_processing() {
		// Arrange
		let mut page = login_page();
		let mut ctx = Context::builder()
			.method(Method::POST)
			.path("/login.htm")
			.param("form_name", "login")
			.param("username", "ann")
			.forward(true)
			.build()
			.unwrap();

		// Act
		let response = page.process(&mut ctx);

		// Assert
		assert!(matches!(response, PageResponse::Html(_)));
		let form = page.form("login").unwrap();
		assert_eq!(form.field_value("username"), Some(""));
		assert!(form.field("username").unwrap().error().is_none());
	}

	#[rstest]
	fn test_action_link_listener_redirects_and_stops_processing() {
		// Arrange
		let later = Arc::new(AtomicUsize::new(0));
		let seen = Arc::clone(&later);
		let mut page = Page::new("/customers.htm");
		page.add_control(ActionLink::new("delete").with_listener(ActionListener::new(|event, ctx| {
			let id = event.value.as_str().unwrap_or_default();
			ctx.set_redirect(format!("/customers.htm?deleted={id}"));
			false
		})))
		.unwrap();
		page.add_control(ActionLink::new("archive").with_listener(ActionListener::new(move |_event, _ctx| {
			seen.fetch_add(1, Ordering::SeqCst);
			true
		})))
		.unwrap();
		let mut ctx = Context::builder()
			.path("/customers.htm")
			.query("actionLink=delete&value=7")
			.build()
			.unwrap();

		// Act
		let response = page.process(&mut ctx);

		// Assert
		assert_eq!(response, PageResponse::Redirect("/customers.htm?deleted=7".to_string()));
		assert_eq!(later.load(Ordering::SeqCst), 0);
	}

	#[rstest]
	fn test_action_link_renders_page_relative_href() {
		// Arrange
		let mut page = Page::new("/customers.htm");
		page.add_control(ActionLink::new("delete").with_value("7")).unwrap();
		let mut ctx = Context::builder().path("/customers.htm").build().unwrap();

		// Act
		let response = page.process(&mut ctx);

		// Assert
		let PageResponse::Html(html) = response else {
			panic!("expected html");
		};
		assert!(html.contains(r#"<a href="/customers.htm?actionLink=delete&amp;value=7" id="delete">Delete</a>"#));
	}

	#[rstest]
	fn test_post_action_runs_after_processing() {
		// Arrange
		let mut page = login_page();
		page.set_on_post(|page, ctx| {
			let valid = page.form("login").is_some_and(Form::is_valid);
			if !valid {
				ctx.set_redirect("/retry.htm");
			}
		});
		let mut ctx = Context::builder()
			.method(Method::POST)
			.param("form_name", "login")
			.build()
			.unwrap();

		// Act
		let response = page.process(&mut ctx);

		// Assert
		assert_eq!(response, PageResponse::Redirect("/retry.htm".to_string()));
	}
}
