//! Buttons

use clickwork_http::Context;
use serde_json::Value;
use std::any::Any;

use crate::control::{Control, ControlCore};
use crate::field::{Field, FieldCore, effective_disabled, write_common_attributes};
use crate::html::HtmlBuffer;

/// The `type` of a button element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonKind {
	#[default]
	Button,
	Submit,
	Reset,
}

impl ButtonKind {
	fn as_str(self) -> &'static str {
		match self {
			ButtonKind::Button => "button",
			ButtonKind::Submit => "submit",
			ButtonKind::Reset => "reset",
		}
	}
}

/// A push, submit or reset button.
///
/// A button is clicked when the request carries its name; its listener only
/// fires then.
#[derive(Debug)]
pub struct Button {
	field: FieldCore,
	kind: ButtonKind,
	clicked: bool,
}

impl Button {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Button, ButtonKind};
	///
	/// let cancel = Button::new("cancel");
	/// assert_eq!(cancel.kind(), ButtonKind::Button);
	/// assert!(!cancel.is_clicked());
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			kind: ButtonKind::Button,
			clicked: false,
		}
	}

	pub fn submit(name: &str) -> Self {
		Self {
			kind: ButtonKind::Submit,
			..Self::new(name)
		}
	}

	pub fn reset(name: &str) -> Self {
		Self {
			kind: ButtonKind::Reset,
			..Self::new(name)
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.field.set_label(label);
		self
	}

	pub fn with_listener(mut self, listener: crate::listener::ActionListener) -> Self {
		self.field.set_listener(listener);
		self
	}

	pub fn kind(&self) -> ButtonKind {
		self.kind
	}

	pub fn is_clicked(&self) -> bool {
		self.clicked
	}
}

impl Control for Button {
	fn core(&self) -> &ControlCore {
		self.field.control()
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		self.field.control_mut()
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		if effective_disabled(self, ctx) {
			return true;
		}
		self.clicked = ctx.has_request_parameter(self.field.name());
		if self.clicked {
			let value = Value::String(self.field.label());
			return self.field.dispatch(value, ctx);
		}
		true
	}

	fn on_destroy(&mut self, _ctx: &mut Context) -> crate::error::ControlResult<()> {
		self.clicked = false;
		Ok(())
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		self.render_element(buffer, None);
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn as_field(&self) -> Option<&dyn Field> {
		Some(self)
	}

	fn as_field_mut(&mut self) -> Option<&mut dyn Field> {
		Some(self)
	}
}

impl Field for Button {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn value_object(&self) -> Value {
		Value::Null
	}

	fn validate(&mut self, _ctx: &Context) {}

	fn is_input(&self) -> bool {
		false
	}

	fn is_button(&self) -> bool {
		true
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("input");
		buffer.attr("type", self.kind.as_str());
		write_common_attributes(&self.field, buffer, form_id);
		buffer.attr("value", &self.field.label());
		buffer.elem_end();
	}
}
