//! Numeric fields

use clickwork_http::Context;
use serde_json::{Number, Value};

use super::script::{js_string, validation_function};
use crate::error::{ControlError, ControlResult};
use crate::field::{
	Field, FieldCore, field_html_id, impl_field_control, range_error, required_error,
	value_kind, write_common_attributes,
};
use crate::html::HtmlBuffer;

fn number_script(
	id: &str,
	field: &FieldCore,
	min: Option<String>,
	max: Option<String>,
	format_key: &str,
	ctx: &Context,
) -> String {
	let label = field.label();
	let min = min.unwrap_or_else(|| "null".to_string());
	let max = max.unwrap_or_else(|| "null".to_string());
	let messages = [
		ctx.message("field-required-error", &[&label]),
		ctx.message(format_key, &[&label]),
		ctx.message("number-minvalue-error", &[&label, &min]),
		ctx.message("number-maxvalue-error", &[&label, &max]),
	]
	.iter()
	.map(|message| js_string(message))
	.collect::<Vec<_>>()
	.join(",");
	let call = format!(
		"validateNumberField('{id}', {}, {min}, {max}, [{messages}])",
		field.is_required()
	);
	validation_function(id, &call)
}

fn render_number(field: &FieldCore, size: usize, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
	buffer.elem("input");
	buffer.attr("type", "text");
	write_common_attributes(field, buffer, form_id);
	buffer.attr("value", field.value());
	buffer.attr("size", &size.to_string());
	buffer.elem_end();
}

/// Whole number input backed by an `i64`
#[derive(Debug)]
pub struct IntegerField {
	field: FieldCore,
	min_value: Option<i64>,
	max_value: Option<i64>,
	size: usize,
}

impl IntegerField {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Field, IntegerField};
	///
	/// let mut age = IntegerField::new("age").with_range(0, 150);
	/// age.set_value("42");
	/// assert_eq!(age.integer(), Some(42));
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			min_value: None,
			max_value: None,
			size: 20,
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

	pub fn with_range(mut self, min: i64, max: i64) -> Self {
		self.min_value = Some(min);
		self.max_value = Some(max);
		self
	}

	pub fn with_min_value(mut self, min: i64) -> Self {
		self.min_value = Some(min);
		self
	}

	pub fn with_max_value(mut self, max: i64) -> Self {
		self.max_value = Some(max);
		self
	}

	/// The parsed value, `None` when empty or not a whole number
	pub fn integer(&self) -> Option<i64> {
		self.field.value().parse().ok()
	}

	pub fn set_integer(&mut self, value: Option<i64>) {
		self.field
			.set_value(value.map(|v| v.to_string()).unwrap_or_default());
	}
}

impl_field_control!(IntegerField);

impl Field for IntegerField {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn value_object(&self) -> Value {
		self.integer().map(Value::from).unwrap_or(Value::Null)
	}

	fn set_value_object(&mut self, value: &Value) -> ControlResult<()> {
		let parsed = match value {
			Value::Null => None,
			Value::Number(number) => number.as_i64(),
			Value::String(text) if text.is_empty() => None,
			Value::String(text) => text.parse().ok(),
			_ => None,
		};
		match (value, parsed) {
			(Value::Null, _) => self.set_integer(None),
			(Value::String(text), None) if text.is_empty() => self.set_integer(None),
			(_, Some(number)) => self.set_integer(Some(number)),
			(other, None) => {
				return Err(ControlError::ValueType {
					name: self.field.name().to_string(),
					expected: "integer",
					found: value_kind(other).to_string(),
				});
			}
		}
		Ok(())
	}

	fn validate(&mut self, ctx: &Context) {
		let error = if self.field.value().is_empty() {
			required_error(&self.field, ctx)
		} else {
			match self.field.value().parse::<i64>() {
				Ok(number) => range_error(
					&self.field.label(),
					number,
					self.min_value,
					self.max_value,
					ctx,
				),
				Err(_) => Some(ctx.message("integer-format-error", &[&self.field.label()])),
			}
		};
		self.field.set_error(error);
	}

	fn set_size(&mut self, size: usize) -> bool {
		self.size = size;
		true
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		Some(number_script(
			&id,
			&self.field,
			self.min_value.map(|v| v.to_string()),
			self.max_value.map(|v| v.to_string()),
			"integer-format-error",
			ctx,
		))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		render_number(&self.field, self.size, buffer, form_id);
	}
}

/// Decimal number input backed by an `f64`
#[derive(Debug)]
pub struct DoubleField {
	field: FieldCore,
	min_value: Option<f64>,
	max_value: Option<f64>,
	size: usize,
}

impl DoubleField {
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			min_value: None,
			max_value: None,
			size: 20,
		}
	}

	pub fn required(mut self) -> Self {
		self.field.set_required(true);
		self
	}

	pub fn with_range(mut self, min: f64, max: f64) -> Self {
		self.min_value = Some(min);
		self.max_value = Some(max);
		self
	}

	pub fn double(&self) -> Option<f64> {
		self.field
			.value()
			.parse::<f64>()
			.ok()
			.filter(|value| value.is_finite())
	}
}

impl_field_control!(DoubleField);

impl Field for DoubleField {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn value_object(&self) -> Value {
		self.double()
			.and_then(Number::from_f64)
			.map(Value::Number)
			.unwrap_or(Value::Null)
	}

	fn set_value_object(&mut self, value: &Value) -> ControlResult<()> {
		match value {
			Value::Null => self.field.set_value(""),
			Value::Number(number) => self.field.set_value(number.to_string()),
			Value::String(text) if text.is_empty() || text.parse::<f64>().is_ok() => {
				self.field.set_value(text.clone())
			}
			other => {
				return Err(ControlError::ValueType {
					name: self.field.name().to_string(),
					expected: "number",
					found: value_kind(other).to_string(),
				});
			}
		}
		Ok(())
	}

	fn validate(&mut self, ctx: &Context) {
		let error = if self.field.value().is_empty() {
			required_error(&self.field, ctx)
		} else {
			match self.double() {
				Some(number) => range_error(
					&self.field.label(),
					number,
					self.min_value,
					self.max_value,
					ctx,
				),
				None => Some(ctx.message("number-format-error", &[&self.field.label()])),
			}
		};
		self.field.set_error(error);
	}

	fn set_size(&mut self, size: usize) -> bool {
		self.size = size;
		true
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		Some(number_script(
			&id,
			&self.field,
			self.min_value.map(|v| v.to_string()),
			self.max_value.map(|v| v.to_string()),
			"number-format-error",
			ctx,
		))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		render_number(&self.field, self.size, buffer, form_id);
	}
}
