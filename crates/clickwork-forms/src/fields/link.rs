//! Links and buttons that act outside of a form
//!
//! An [`ActionLink`] or [`ActionButton`] is clicked when the request names it
//! in its `actionLink` or `actionButton` parameter; the optional `value`
//! parameter travels with the click. A [`PageLink`] only renders a URL.

use clickwork_http::Context;
use serde_json::Value;
use std::any::Any;

use crate::control::{Control, ControlCore};
use crate::error::ControlResult;
use crate::field::label_from_name;
use crate::html::HtmlBuffer;
use crate::listener::{ActionEvent, ActionListener};

/// Request parameter naming the clicked action link
pub const ACTION_LINK: &str = "actionLink";
/// Request parameter naming the clicked action button
pub const ACTION_BUTTON: &str = "actionButton";
/// Request parameter carrying the value of a clicked link or button
pub const VALUE: &str = "value";

fn query_string(pairs: &[(&str, &str)]) -> String {
	serde_urlencoded::to_string(pairs).unwrap_or_default()
}

fn join_href(path: &str, query: &str) -> String {
	if query.is_empty() {
		path.to_string()
	} else {
		format!("{path}?{query}")
	}
}

/// Click state shared by action links and buttons
#[derive(Debug)]
struct ActionTarget {
	core: ControlCore,
	parameter: &'static str,
	label: Option<String>,
	value: Option<String>,
	path: String,
	clicked: bool,
	listener: Option<ActionListener>,
}

impl ActionTarget {
	fn new(name: &str, parameter: &'static str) -> Self {
		Self {
			core: ControlCore::new(Some(name)),
			parameter,
			label: None,
			value: None,
			path: String::new(),
			clicked: false,
			listener: None,
		}
	}

	fn name(&self) -> &str {
		self.core.name().unwrap_or_default()
	}

	fn label(&self) -> String {
		match &self.label {
			Some(label) => label.clone(),
			None => label_from_name(self.name()),
		}
	}

	fn href(&self, value: Option<&str>) -> String {
		let mut pairs = vec![(self.parameter, self.name())];
		if let Some(value) = value.or(self.value.as_deref()) {
			pairs.push((VALUE, value));
		}
		join_href(&self.path, &query_string(&pairs))
	}

	fn process(&mut self, ctx: &mut Context) -> bool {
		self.clicked = ctx.request_parameter(self.parameter) == Some(self.name());
		if !self.clicked {
			return true;
		}
		self.value = ctx.request_parameter(VALUE).map(str::to_string);
		tracing::debug!(control = %self.core.describe(), value = ?self.value, "action clicked");

		let event = ActionEvent {
			source: self.core.id(),
			name: self.core.name().map(str::to_string),
			value: self.value.clone().map_or(Value::Null, Value::String),
			valid: true,
		};
		match self.listener.as_mut() {
			Some(listener) => listener.fire(&event, ctx),
			None => true,
		}
	}
}

/// A hyperlink back to the current page which fires its listener when
/// followed.
///
/// # Examples
///
/// ```
/// use clickwork_forms::{ActionLink, Control, HtmlBuffer};
///
/// let link = ActionLink::new("delete").with_label("Delete").with_value("42");
/// assert_eq!(link.href(None), "?actionLink=delete&value=42");
///
/// let mut buffer = HtmlBuffer::new();
/// link.render(&mut buffer);
/// assert_eq!(
///     buffer.as_str(),
///     r#"<a href="?actionLink=delete&amp;value=42" id="delete">Delete</a>"#
/// );
/// ```
#[derive(Debug)]
pub struct ActionLink {
	target: ActionTarget,
}

impl ActionLink {
	pub fn new(name: &str) -> Self {
		Self {
			target: ActionTarget::new(name, ACTION_LINK),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.target.label = Some(label.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.target.value = Some(value.into());
		self
	}

	pub fn with_listener(mut self, listener: ActionListener) -> Self {
		self.target.listener = Some(listener);
		self
	}

	pub fn set_listener(&mut self, listener: ActionListener) {
		self.target.listener = Some(listener);
	}

	pub fn label(&self) -> String {
		self.target.label()
	}

	/// The value carried by the link, or the one submitted when clicked
	pub fn value(&self) -> Option<&str> {
		self.target.value.as_deref()
	}

	pub fn is_clicked(&self) -> bool {
		self.target.clicked
	}

	/// URL of the link, carrying `value` in place of the link's own value
	pub fn href(&self, value: Option<&str>) -> String {
		self.target.href(value)
	}
}

impl Control for ActionLink {
	fn core(&self) -> &ControlCore {
		&self.target.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.target.core
	}

	fn on_init(&mut self, ctx: &mut Context) {
		self.target.path = ctx.resource_path().to_string();
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		self.target.process(ctx)
	}

	fn on_destroy(&mut self, _ctx: &mut Context) -> ControlResult<()> {
		self.target.clicked = false;
		Ok(())
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		buffer.elem("a");
		buffer.attr("href", &self.href(None));
		buffer.attr("id", self.target.name());
		buffer.close_tag();
		buffer.append_escaped(&self.label());
		buffer.end_elem("a");
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// A push button that navigates to the current page and fires its listener
#[derive(Debug)]
pub struct ActionButton {
	target: ActionTarget,
}

impl ActionButton {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::ActionButton;
	///
	/// let refresh = ActionButton::new("refresh");
	/// assert_eq!(refresh.label(), "Refresh");
	/// assert_eq!(refresh.href(Some("all")), "?actionButton=refresh&value=all");
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			target: ActionTarget::new(name, ACTION_BUTTON),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.target.label = Some(label.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.target.value = Some(value.into());
		self
	}

	pub fn with_listener(mut self, listener: ActionListener) -> Self {
		self.target.listener = Some(listener);
		self
	}

	pub fn label(&self) -> String {
		self.target.label()
	}

	pub fn value(&self) -> Option<&str> {
		self.target.value.as_deref()
	}

	pub fn is_clicked(&self) -> bool {
		self.target.clicked
	}

	pub fn href(&self, value: Option<&str>) -> String {
		self.target.href(value)
	}
}

impl Control for ActionButton {
	fn core(&self) -> &ControlCore {
		&self.target.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.target.core
	}

	fn on_init(&mut self, ctx: &mut Context) {
		self.target.path = ctx.resource_path().to_string();
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		self.target.process(ctx)
	}

	fn on_destroy(&mut self, _ctx: &mut Context) -> ControlResult<()> {
		self.target.clicked = false;
		Ok(())
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		let onclick = format!("javascript:document.location.href='{}';", self.href(None));
		buffer.elem("input");
		buffer.attr("type", "button");
		buffer.attr("name", self.target.name());
		buffer.attr("id", self.target.name());
		buffer.attr("value", &self.label());
		buffer.attr("onclick", &onclick);
		buffer.elem_end();
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// A plain hyperlink to another page
#[derive(Debug)]
pub struct PageLink {
	core: ControlCore,
	target: String,
	label: Option<String>,
	parameters: Vec<(String, String)>,
}

impl PageLink {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::PageLink;
	///
	/// let edit = PageLink::new("edit", "/customer/edit.htm").with_parameter("id", "7");
	/// assert_eq!(edit.href(), "/customer/edit.htm?id=7");
	/// ```
	pub fn new(name: &str, target: impl Into<String>) -> Self {
		Self {
			core: ControlCore::new(Some(name)),
			target: target.into(),
			label: None,
			parameters: Vec::new(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.push((name.into(), value.into()));
		self
	}

	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn label(&self) -> String {
		match &self.label {
			Some(label) => label.clone(),
			None => label_from_name(self.core.name().unwrap_or_default()),
		}
	}

	pub fn href(&self) -> String {
		let pairs: Vec<(&str, &str)> = self
			.parameters
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
			.collect();
		join_href(&self.target, &query_string(&pairs))
	}
}

impl Control for PageLink {
	fn core(&self) -> &ControlCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.core
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		buffer.elem("a");
		buffer.attr("href", &self.href());
		if let Some(name) = self.core.name() {
			buffer.attr("id", name);
		}
		buffer.close_tag();
		buffer.append_escaped(&self.label());
		buffer.end_elem("a");
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::{Arc, Mutex};

	#[rstest]
	#[case("actionLink=delete&value=42", true, Some("42"))]
	#[case("actionLink=delete", true, None)]
	#[case("actionLink=edit&value=42", false, None)]
	#[case("", false, None)]
	fn test_link_fires_only_when_named(
		#[case] query: &str,
		#[case] clicked: bool,
		#[case] seen_value: Option<&str>,
	) {
		// Arrange
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = Arc::clone(&seen);
		let mut link = ActionLink::new("delete").with_listener(ActionListener::new(move |event, _ctx| {
			sink.lock().unwrap().push(event.value.clone());
			true
		}));
		let mut ctx = Context::builder().query(query).build().unwrap();

		// Act
		let proceed = link.on_process(&mut ctx);

		// Assert
		assert!(proceed);
		assert_eq!(link.is_clicked(), clicked);
		let events = seen.lock().unwrap();
		assert_eq!(events.len(), usize::from(clicked));
		if clicked {
			let expected = seen_value.map_or(Value::Null, |value| Value::String(value.to_string()));
			assert_eq!(events[0], expected);
		}
	}

	#[rstest]
	fn test_listener_can_cancel_processing() {
		// Arrange
		let mut link = ActionLink::new("logout")
			.with_listener(ActionListener::new(|_event, ctx| {
				ctx.set_redirect("/login.htm");
				false
			}));
		let mut ctx = Context::builder().query("actionLink=logout").build().unwrap();

		// Act
		let proceed = link.on_process(&mut ctx);

		// Assert
		assert!(!proceed);
		assert!(ctx.is_processing_cancelled());
		assert_eq!(ctx.redirect(), Some("/login.htm"));
	}

	#[rstest]
	fn test_href_uses_resource_path_and_encodes_value() {
		// Arrange
		let mut link = ActionLink::new("search");
		let mut ctx = Context::builder().path("/customers.htm").build().unwrap();

		// Act
		link.on_init(&mut ctx);

		// Assert
		assert_eq!(
			link.href(Some("a&b c")),
			"/customers.htm?actionLink=search&value=a%26b+c"
		);
	}

	#[rstest]
	fn test_destroy_resets_clicked() {
		// Arrange
		let mut link = ActionLink::new("next");
		let mut ctx = Context::builder().query("actionLink=next").build().unwrap();
		link.on_process(&mut ctx);

		// Act
		link.on_destroy(&mut ctx).unwrap();

		// Assert
		assert!(!link.is_clicked());
	}

	#[rstest]
	fn test_action_button_reads_its_own_parameter() {
		// Arrange
		let mut button = ActionButton::new("refresh");
		let mut link_ctx = Context::builder().query("actionLink=refresh").build().unwrap();
		let mut button_ctx = Context::builder().query("actionButton=refresh").build().unwrap();

		// Act
		button.on_process(&mut link_ctx);
		let ignored = button.is_clicked();
		button.on_process(&mut button_ctx);

		// Assert
		assert!(!ignored);
		assert!(button.is_clicked());
	}

	#[rstest]
	fn test_action_button_renders_navigation() {
		// Arrange
		let mut button = ActionButton::new("refresh").with_label("Reload");
		let mut ctx = Context::builder().path("/list.htm").build().unwrap();
		button.on_init(&mut ctx);
		let mut buffer = HtmlBuffer::new();

		// Act
		button.render(&mut buffer);

		// Assert
		assert_eq!(
			buffer.as_str(),
			r#"<input type="button" name="refresh" id="refresh" value="Reload" onclick="javascript:document.location.href=&#x27;/list.htm?actionButton=refresh&#x27;;"/>"#
		);
	}

	#[rstest]
	#[case(PageLink::new("home", "/index.htm"), r#"<a href="/index.htm" id="home">Home</a>"#)]
	#[case(
		PageLink::new("edit", "/edit.htm").with_label("Edit <me>").with_parameter("id", "7").with_parameter("tab", "notes"),
		r#"<a href="/edit.htm?id=7&amp;tab=notes" id="edit">Edit &lt;me&gt;</a>"#
	)]
	fn test_page_link_render(#[case] link: PageLink, #[case] expected: &str) {
		// Arrange
		let mut buffer = HtmlBuffer::new();

		// Act
		link.render(&mut buffer);

		// Assert
		assert_eq!(buffer.as_str(), expected);
	}
}
