//! Boolean checkbox field

use clickwork_http::Context;
use serde_json::Value;

use super::script::{js_string, validation_function};
use crate::error::{ControlError, ControlResult};
use crate::field::{Field, FieldCore, field_html_id, impl_field_control, value_kind, write_common_attributes};
use crate::html::HtmlBuffer;

/// A checkbox; checked when its parameter is present in the request
#[derive(Debug)]
pub struct Checkbox {
	field: FieldCore,
	checked: bool,
}

impl Checkbox {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Checkbox, Field};
	///
	/// let terms = Checkbox::new("terms").required();
	/// assert!(!terms.is_checked());
	/// assert_eq!(terms.value(), "false");
	/// ```
	pub fn new(name: &str) -> Self {
		let mut field = FieldCore::new(name);
		field.set_value("false");
		Self {
			field,
			checked: false,
		}
	}

	pub fn required(mut self) -> Self {
		self.field.set_required(true);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.field.set_label(label);
		self
	}

	pub fn is_checked(&self) -> bool {
		self.checked
	}

	pub fn set_checked(&mut self, checked: bool) {
		self.checked = checked;
		self.field.set_value(checked.to_string());
	}
}

impl_field_control!(Checkbox);

impl Field for Checkbox {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn set_value(&mut self, value: &str) {
		let checked = matches!(value.to_ascii_lowercase().as_str(), "true" | "on" | "yes" | "1");
		self.set_checked(checked);
	}

	fn value_object(&self) -> Value {
		Value::Bool(self.checked)
	}

	fn set_value_object(&mut self, value: &Value) -> ControlResult<()> {
		match value {
			Value::Null => self.set_checked(false),
			Value::Bool(checked) => self.set_checked(*checked),
			Value::String(text) => self.set_value(text),
			other => {
				return Err(ControlError::ValueType {
					name: self.field.name().to_string(),
					expected: "boolean",
					found: value_kind(other).to_string(),
				});
			}
		}
		Ok(())
	}

	fn bind_request_value(&mut self, ctx: &Context) {
		let checked = ctx.has_request_parameter(self.field.name());
		self.set_checked(checked);
	}

	fn validate(&mut self, ctx: &Context) {
		let error = (self.field.is_required() && !self.checked)
			.then(|| ctx.message("not-checked-error", &[&self.field.label()]));
		self.field.set_error(error);
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		let message = js_string(&ctx.message("not-checked-error", &[&self.field.label()]));
		let call = format!(
			"validateCheckbox('{id}', {}, [{message}])",
			self.field.is_required()
		);
		Some(validation_function(&id, &call))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("input");
		buffer.attr("type", "checkbox");
		write_common_attributes(&self.field, buffer, form_id);
		if self.checked {
			buffer.flag("checked");
		}
		buffer.elem_end();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::control::Control;
	use http::Method;
	use rstest::rstest;

	#[rstest]
	fn test_parameter_presence_checks_box() {
		// Arrange
		let mut checkbox = Checkbox::new("subscribe");
		let mut ctx = Context::builder()
			.method(Method::POST)
			.param("subscribe", "on")
			.build()
			.unwrap();

		// Act
		checkbox.on_process(&mut ctx);

		// Assert
		assert!(checkbox.is_checked());
		assert_eq!(checkbox.value_object(), Value::Bool(true));
	}

	#[rstest]
	fn test_required_unchecked_is_invalid() {
		// Arrange
		let mut checkbox = Checkbox::new("terms").with_label("the terms");
		checkbox.field_mut().set_required(true);
		let mut ctx = Context::builder().method(Method::POST).build().unwrap();

		// Act
		checkbox.on_process(&mut ctx);

		// Assert
		assert_eq!(checkbox.error(), Some("You must select the terms"));
	}
}
