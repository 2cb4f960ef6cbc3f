//! Radio button groups

use clickwork_http::Context;

use super::script::{js_string, validation_function};
use crate::field::{Field, FieldCore, field_html_id, impl_field_control};
use crate::html::HtmlBuffer;

/// One choice of a [`RadioGroup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Radio {
	value: String,
	label: String,
}

impl Radio {
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn label(&self) -> &str {
		&self.label
	}
}

impl From<(&str, &str)> for Radio {
	fn from((value, label): (&str, &str)) -> Self {
		Self::new(value, label)
	}
}

/// A set of radio buttons sharing one name; the value is the checked
/// radio's value.
#[derive(Debug)]
pub struct RadioGroup {
	field: FieldCore,
	radios: Vec<Radio>,
	vertical: bool,
}

impl RadioGroup {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Field, RadioGroup};
	///
	/// let mut size = RadioGroup::new("size").with_radios([("S", "Small"), ("L", "Large")]);
	/// size.set_value("L");
	/// assert_eq!(size.checked_radio().map(|radio| radio.label()), Some("Large"));
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			radios: Vec::new(),
			vertical: false,
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

	pub fn with_radios<I, R>(mut self, radios: I) -> Self
	where
		I: IntoIterator<Item = R>,
		R: Into<Radio>,
	{
		self.radios.extend(radios.into_iter().map(Into::into));
		self
	}

	/// Lay the radios out one per line
	pub fn vertical(mut self) -> Self {
		self.vertical = true;
		self
	}

	pub fn add_radio(&mut self, radio: Radio) {
		self.radios.push(radio);
	}

	pub fn radios(&self) -> &[Radio] {
		&self.radios
	}

	pub fn checked_radio(&self) -> Option<&Radio> {
		let value = self.field.value();
		self.radios.iter().find(|radio| radio.value() == value)
	}
}

impl_field_control!(RadioGroup);

impl Field for RadioGroup {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn validate(&mut self, ctx: &Context) {
		let error = (self.field.is_required() && self.checked_radio().is_none())
			.then(|| ctx.message("select-error", &[&self.field.label()]));
		self.field.set_error(error);
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		let message = js_string(&ctx.message("select-error", &[&self.field.label()]));
		let call = format!(
			"validateRadioGroup('{}', '{form_id}', {}, [{message}])",
			self.field.name(),
			self.field.is_required()
		);
		Some(validation_function(&id, &call))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		let group_id = field_html_id(form_id, self.field.name());
		let separator = if self.vertical { "<br/>" } else { " " };
		for (index, radio) in self.radios.iter().enumerate() {
			if index > 0 {
				buffer.append(separator);
			}
			let id = format!("{group_id}_{}", radio.value());
			buffer.elem("input");
			buffer.attr("type", "radio");
			buffer.attr("name", self.field.name());
			buffer.attr("id", &id);
			buffer.attr("value", radio.value());
			if radio.value() == self.field.value() {
				buffer.flag("checked");
			}
			if self.field.is_disabled() {
				buffer.flag("disabled");
			}
			buffer.elem_end();
			buffer.elem("label");
			buffer.attr("for", &id);
			buffer.close_tag();
			buffer.append_escaped(radio.label());
			buffer.end_elem("label");
		}
	}
}
