//! Single and multiple selection lists

use clickwork_http::Context;
use serde_json::Value;

use super::script::{js_string, validation_function};
use crate::error::{ControlError, ControlResult};
use crate::field::{
	Field, FieldCore, field_html_id, impl_field_control, scalar_text, value_kind,
	write_common_attributes,
};
use crate::html::HtmlBuffer;
use crate::option::ControlOption;

/// Selection list over shared [`ControlOption`]s.
///
/// A required single select is invalid while its value is empty or equal to
/// the first option, which conventionally is a "please choose" entry.
#[derive(Debug)]
pub struct Select {
	field: FieldCore,
	options: Vec<ControlOption>,
	multiple: bool,
	selected: Vec<String>,
	size: usize,
}

impl Select {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{ControlOption, Field, Select};
	///
	/// let mut country = Select::new("country")
	///     .with_options([("", "-- choose --"), ("NZ", "New Zealand")]);
	/// country.set_value("NZ");
	/// assert_eq!(country.options().len(), 2);
	/// assert_eq!(country.selected_option().map(ControlOption::label), Some("New Zealand"));
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			options: Vec::new(),
			multiple: false,
			selected: Vec::new(),
			size: 1,
		}
	}

	/// A list allowing several selected values
	pub fn multiple(name: &str) -> Self {
		let mut select = Self::new(name);
		select.multiple = true;
		select
	}

	pub fn required(mut self) -> Self {
		self.field.set_required(true);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.field.set_label(label);
		self
	}

	pub fn with_options<I, O>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = O>,
		O: Into<ControlOption>,
	{
		self.options.extend(options.into_iter().map(Into::into));
		self
	}

	pub fn add_option(&mut self, option: ControlOption) {
		self.options.push(option);
	}

	pub fn options(&self) -> &[ControlOption] {
		&self.options
	}

	pub fn is_multiple(&self) -> bool {
		self.multiple
	}

	/// Selected values of a multiple select
	pub fn selected_values(&self) -> &[String] {
		&self.selected
	}

	pub fn set_selected_values(&mut self, values: Vec<String>) {
		self.field
			.set_value(values.first().cloned().unwrap_or_default());
		self.selected = values;
	}

	pub fn selected_option(&self) -> Option<&ControlOption> {
		let value = self.field.value();
		self.options.iter().find(|option| option.value() == value)
	}

	fn is_selected(&self, option: &ControlOption) -> bool {
		if self.multiple {
			self.selected.iter().any(|value| value == option.value())
		} else {
			self.field.value() == option.value()
		}
	}
}

impl_field_control!(Select);

impl Field for Select {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn set_value(&mut self, value: &str) {
		self.field.set_value(value);
		if self.multiple {
			self.selected = if value.is_empty() {
				Vec::new()
			} else {
				vec![value.to_string()]
			};
		}
	}

	fn value_object(&self) -> Value {
		if self.multiple {
			return Value::Array(self.selected.iter().cloned().map(Value::String).collect());
		}
		match self.field.value() {
			"" => Value::Null,
			value => Value::String(value.to_string()),
		}
	}

	fn set_value_object(&mut self, value: &Value) -> ControlResult<()> {
		match (self.multiple, value) {
			(true, Value::Array(items)) => {
				let values = items
					.iter()
					.map(|item| scalar_text(self.field.name(), item))
					.collect::<ControlResult<Vec<_>>>()?;
				self.set_selected_values(values);
				Ok(())
			}
			(true, Value::Null) => {
				self.set_selected_values(Vec::new());
				Ok(())
			}
			(false, Value::Array(_) | Value::Object(_)) | (true, _) => Err(ControlError::ValueType {
				name: self.field.name().to_string(),
				expected: if self.multiple { "array" } else { "scalar" },
				found: value_kind(value).to_string(),
			}),
			(false, scalar) => {
				let text = scalar_text(self.field.name(), scalar)?;
				self.set_value(&text);
				Ok(())
			}
		}
	}

	fn bind_request_value(&mut self, ctx: &Context) {
		let name = self.field.name().to_string();
		if self.multiple {
			let values = ctx
				.request_parameter_values(&name)
				.iter()
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty())
				.collect();
			self.set_selected_values(values);
		} else {
			let value = ctx
				.request_parameter(&name)
				.map(|value| value.trim().to_string())
				.unwrap_or_default();
			self.field.set_value(value);
		}
	}

	fn validate(&mut self, ctx: &Context) {
		let missing = if self.multiple {
			self.selected.is_empty()
		} else {
			let value = self.field.value();
			value.is_empty()
				|| self
					.options
					.first()
					.is_some_and(|first| first.value() == value)
		};
		let error = (self.field.is_required() && missing)
			.then(|| ctx.message("select-error", &[&self.field.label()]));
		self.field.set_error(error);
	}

	fn set_size(&mut self, _size: usize) -> bool {
		false
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		let default_value = self
			.options
			.first()
			.map(|option| js_string(option.value()))
			.unwrap_or_else(|| "''".to_string());
		let message = js_string(&ctx.message("select-error", &[&self.field.label()]));
		let call = format!(
			"validateSelect('{id}', {default_value}, {}, [{message}])",
			self.field.is_required()
		);
		Some(validation_function(&id, &call))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("select");
		write_common_attributes(&self.field, buffer, form_id);
		buffer.attr("size", &self.size.to_string());
		if self.multiple {
			buffer.flag("multiple");
		}
		buffer.close_tag();
		for option in &self.options {
			buffer.elem("option");
			buffer.attr("value", option.value());
			if self.is_selected(option) {
				buffer.flag("selected");
			}
			buffer.close_tag();
			buffer.append_escaped(option.label());
			buffer.end_elem("option");
		}
		buffer.end_elem("select");
	}
}
