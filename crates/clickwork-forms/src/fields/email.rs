//! Email address field

use clickwork_http::Context;
use regex::Regex;
use std::sync::LazyLock;

use super::script::text_field_script;
use crate::field::{Field, FieldCore, field_html_id, impl_field_control, length_error, write_common_attributes};
use crate::html::HtmlBuffer;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Text field accepting a single email address
#[derive(Debug)]
pub struct EmailField {
	field: FieldCore,
	max_length: Option<usize>,
	size: usize,
}

impl EmailField {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{EmailField, Field};
	///
	/// let email = EmailField::new("email").required();
	/// assert_eq!(email.label(), "Email");
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			max_length: None,
			size: 30,
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

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}
}

impl_field_control!(EmailField);

impl Field for EmailField {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn validate(&mut self, ctx: &Context) {
		let error = length_error(&self.field, None, self.max_length, ctx).or_else(|| {
			let value = self.field.value();
			(!value.is_empty() && !EMAIL_REGEX.is_match(value))
				.then(|| ctx.message("email-format-error", &[&self.field.label()]))
		});
		self.field.set_error(error);
	}

	fn set_size(&mut self, size: usize) -> bool {
		self.size = size;
		true
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		Some(text_field_script(&id, &self.field, None, self.max_length, ctx))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("input");
		buffer.attr("type", "email");
		write_common_attributes(&self.field, buffer, form_id);
		buffer.attr("value", self.field.value());
		buffer.attr("size", &self.size.to_string());
		buffer.elem_end();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("ann@example.com", None)]
	#[case("o'neil@mail.example.org", None)]
	#[case("ann@", Some("Email must be a valid email address"))]
	#[case("ann.example.com", Some("Email must be a valid email address"))]
	#[case("", Some("You must enter a value for Email"))]
	fn test_email_validation(#[case] value: &str, #[case] expected: Option<&str>) {
		// Arrange
		let mut field = EmailField::new("email").required();
		field.set_value(value);
		let ctx = Context::builder().build().unwrap();

		// Act
		field.validate(&ctx);

		// Assert
		assert_eq!(field.error(), expected);
	}
}
