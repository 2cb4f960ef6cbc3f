//! Single-line text, password and text area fields

use clickwork_http::Context;

use super::script::text_field_script;
use crate::field::{Field, FieldCore, field_html_id, impl_field_control, length_error, write_common_attributes};
use crate::html::HtmlBuffer;
use crate::listener::ActionListener;

/// Widget used to render a [`TextField`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextKind {
	#[default]
	Text,
	Password,
	TextArea {
		cols: usize,
		rows: usize,
	},
}

/// Free text input with optional length limits
#[derive(Debug)]
pub struct TextField {
	field: FieldCore,
	kind: TextKind,
	min_length: Option<usize>,
	max_length: Option<usize>,
	size: usize,
}

impl TextField {
	/// Create a text field named `name`
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Field, TextField};
	///
	/// let field = TextField::new("username").required().with_max_length(20);
	/// assert!(field.is_required());
	/// assert_eq!(field.max_length(), Some(20));
	/// assert_eq!(field.label(), "Username");
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			kind: TextKind::Text,
			min_length: None,
			max_length: None,
			size: 20,
		}
	}

	/// A text field rendered as a password input
	pub fn password(name: &str) -> Self {
		Self::new(name).with_kind(TextKind::Password)
	}

	/// A multi-line text area
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{TextField, TextKind};
	///
	/// let notes = TextField::text_area("notes", 40, 5);
	/// assert_eq!(notes.kind(), TextKind::TextArea { cols: 40, rows: 5 });
	/// ```
	pub fn text_area(name: &str, cols: usize, rows: usize) -> Self {
		Self::new(name).with_kind(TextKind::TextArea { cols, rows })
	}

	pub fn with_kind(mut self, kind: TextKind) -> Self {
		self.kind = kind;
		self
	}

	pub fn required(mut self) -> Self {
		self.field.set_required(true);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.field.set_label(label);
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.field.set_value(value);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_size(mut self, size: usize) -> Self {
		self.size = size;
		self
	}

	pub fn with_listener(mut self, listener: ActionListener) -> Self {
		self.field.set_listener(listener);
		self
	}

	pub fn kind(&self) -> TextKind {
		self.kind
	}

	pub fn min_length(&self) -> Option<usize> {
		self.min_length
	}

	pub fn max_length(&self) -> Option<usize> {
		self.max_length
	}

	pub fn size(&self) -> usize {
		self.size
	}
}

impl_field_control!(TextField);

impl Field for TextField {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn validate(&mut self, ctx: &Context) {
		let error = length_error(&self.field, self.min_length, self.max_length, ctx);
		self.field.set_error(error);
	}

	fn set_size(&mut self, size: usize) -> bool {
		self.size = size;
		true
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		Some(text_field_script(
			&id,
			&self.field,
			self.min_length,
			self.max_length,
			ctx,
		))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		match self.kind {
			TextKind::TextArea { cols, rows } => {
				buffer.elem("textarea");
				write_common_attributes(&self.field, buffer, form_id);
				buffer.attr("cols", &cols.to_string());
				buffer.attr("rows", &rows.to_string());
				buffer.close_tag();
				buffer.append_escaped(self.field.value());
				buffer.end_elem("textarea");
			}
			kind => {
				let input_type = if kind == TextKind::Password { "password" } else { "text" };
				buffer.elem("input");
				buffer.attr("type", input_type);
				write_common_attributes(&self.field, buffer, form_id);
				if kind == TextKind::Text {
					buffer.attr("value", self.field.value());
				}
				buffer.attr("size", &self.size.to_string());
				if let Some(max) = self.max_length {
					buffer.attr("maxlength", &max.to_string());
				}
				buffer.elem_end();
			}
		}
	}
}
