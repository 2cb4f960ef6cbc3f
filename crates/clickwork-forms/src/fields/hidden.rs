//! Typed hidden fields

use chrono::NaiveDate;
use clickwork_http::Context;
use serde_json::{Number, Value};

use crate::control::{Control, ControlCore};
use crate::error::{ControlError, ControlResult};
use crate::field::{Field, FieldCore, process_input, value_kind, write_common_attributes};
use crate::html::HtmlBuffer;
use std::any::Any;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The type a [`HiddenField`] value object must have
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
	#[default]
	String,
	Integer,
	Boolean,
	Double,
	/// ISO-8601 calendar date
	Date,
}

impl ValueKind {
	fn name(self) -> &'static str {
		match self {
			ValueKind::String => "string",
			ValueKind::Integer => "integer",
			ValueKind::Boolean => "boolean",
			ValueKind::Double => "double",
			ValueKind::Date => "date",
		}
	}

	/// Parse `text` into a value object of this kind
	fn parse(self, text: &str) -> Option<Value> {
		if text.is_empty() {
			return Some(Value::Null);
		}
		match self {
			ValueKind::String => Some(Value::String(text.to_string())),
			ValueKind::Integer => text.parse::<i64>().ok().map(Value::from),
			ValueKind::Boolean => text.parse::<bool>().ok().map(Value::Bool),
			ValueKind::Double => text
				.parse::<f64>()
				.ok()
				.and_then(Number::from_f64)
				.map(Value::Number),
			ValueKind::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
				.ok()
				.map(|date| Value::String(date.format(DATE_FORMAT).to_string())),
		}
	}

	/// Text form of `value`, if it has this kind
	fn format(self, value: &Value) -> Option<String> {
		match (self, value) {
			(_, Value::Null) => Some(String::new()),
			(ValueKind::String, Value::String(text)) => Some(text.clone()),
			(ValueKind::Integer, Value::Number(number)) => number.as_i64().map(|n| n.to_string()),
			(ValueKind::Double, Value::Number(number)) => Some(number.to_string()),
			(ValueKind::Boolean, Value::Bool(flag)) => Some(flag.to_string()),
			(ValueKind::Date, Value::String(text)) => NaiveDate::parse_from_str(text, DATE_FORMAT)
				.ok()
				.map(|date| date.format(DATE_FORMAT).to_string()),
			_ => None,
		}
	}
}

/// A hidden input carrying a typed value.
///
/// Hidden fields are never validated and never shown as errors.
#[derive(Debug)]
pub struct HiddenField {
	field: FieldCore,
	kind: ValueKind,
	fixed_name: bool,
}

impl HiddenField {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Field, HiddenField, ValueKind};
	/// use serde_json::json;
	///
	/// let mut id = HiddenField::new("id", ValueKind::Integer);
	/// id.set_value_object(&json!(7)).unwrap();
	/// assert_eq!(id.value(), "7");
	/// assert!(id.set_value_object(&json!("seven")).is_err());
	/// ```
	pub fn new(name: &str, kind: ValueKind) -> Self {
		Self {
			field: FieldCore::new(name),
			kind,
			fixed_name: false,
		}
	}

	/// A hidden field whose name can never change
	pub fn fixed(name: &str, kind: ValueKind) -> Self {
		let mut field = Self::new(name, kind);
		field.fixed_name = true;
		field
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.field.set_value(value);
		self
	}

	pub fn kind(&self) -> ValueKind {
		self.kind
	}

	pub fn has_fixed_name(&self) -> bool {
		self.fixed_name
	}
}

impl Control for HiddenField {
	fn core(&self) -> &ControlCore {
		self.field.control()
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		self.field.control_mut()
	}

	fn set_name(&mut self, name: &str) -> ControlResult<()> {
		check_rename(self, name)?;
		self.field.control_mut().set_name(name);
		Ok(())
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		process_input(self, ctx)
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

impl Field for HiddenField {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn value_object(&self) -> Value {
		self.kind.parse(self.field.value()).unwrap_or(Value::Null)
	}

	fn set_value_object(&mut self, value: &Value) -> ControlResult<()> {
		let text = self.kind.format(value).ok_or_else(|| ControlError::ValueType {
			name: self.field.name().to_string(),
			expected: self.kind.name(),
			found: value_kind(value).to_string(),
		})?;
		self.field.set_value(text);
		Ok(())
	}

	fn validate(&mut self, _ctx: &Context) {}

	fn is_hidden(&self) -> bool {
		true
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("input");
		buffer.attr("type", "hidden");
		write_common_attributes(&self.field, buffer, form_id);
		buffer.attr("value", self.field.value());
		buffer.elem_end();
	}
}

fn check_rename(field: &HiddenField, name: &str) -> ControlResult<()> {
	if field.fixed_name && field.field.name() != name {
		return Err(ControlError::IllegalState(format!(
			"the name of hidden field '{}' cannot be changed",
			field.field.name()
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(ValueKind::Integer, "42", json!(42))]
	#[case(ValueKind::Boolean, "true", json!(true))]
	#[case(ValueKind::Double, "1.5", json!(1.5))]
	#[case(ValueKind::Date, "2024-02-29", json!("2024-02-29"))]
	#[case(ValueKind::String, "", Value::Null)]
	fn test_value_object_by_kind(#[case] kind: ValueKind, #[case] text: &str, #[case] expected: Value) {
		// Arrange
		let field = HiddenField::new("h", kind).with_value(text);

		// Assert
		assert_eq!(field.value_object(), expected);
	}

	#[rstest]
	fn test_set_value_object_rejects_other_kind() {
		// Arrange
		let mut field = HiddenField::new("flag", ValueKind::Boolean);

		// Act
		let result = field.set_value_object(&json!(1));

		// Assert
		assert_eq!(
			result,
			Err(ControlError::ValueType {
				name: "flag".to_string(),
				expected: "boolean",
				found: "number".to_string(),
			})
		);
	}

	#[rstest]
	fn test_fixed_name_rejects_rename() {
		// Arrange
		let mut field = HiddenField::fixed("form_name", ValueKind::String);

		// Act
		let same = field.set_name("form_name");
		let other = field.set_name("other");

		// Assert
		assert!(same.is_ok());
		assert!(matches!(other, Err(ControlError::IllegalState(_))));
		assert_eq!(field.name(), Some("form_name"));
	}
}
