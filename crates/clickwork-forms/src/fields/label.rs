//! Static text inside a form

use std::any::Any;

use crate::control::{Control, ControlCore};
use crate::html::HtmlBuffer;

/// A non-input control displaying a line of text.
///
/// Labels take no part in binding or validation.
#[derive(Debug)]
pub struct Label {
	core: ControlCore,
	text: String,
	raw: bool,
}

impl Label {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Control, HtmlBuffer, Label};
	///
	/// let note = Label::new("note", "Fields marked * are required");
	/// let mut buffer = HtmlBuffer::new();
	/// note.render(&mut buffer);
	/// assert_eq!(buffer.as_str(), "Fields marked * are required");
	/// ```
	pub fn new(name: &str, text: impl Into<String>) -> Self {
		Self {
			core: ControlCore::new(Some(name)),
			text: text.into(),
			raw: false,
		}
	}

	/// A label whose text is trusted markup and written unescaped
	pub fn raw(name: &str, markup: impl Into<String>) -> Self {
		Self {
			raw: true,
			..Self::new(name, markup)
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn set_text(&mut self, text: impl Into<String>) {
		self.text = text.into();
	}
}

impl Control for Label {
	fn core(&self) -> &ControlCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.core
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		if self.raw {
			buffer.append(&self.text);
		} else {
			buffer.append_escaped(&self.text);
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
