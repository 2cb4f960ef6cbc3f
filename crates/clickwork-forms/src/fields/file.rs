//! File upload field

use clickwork_http::{Context, FileItem};
use serde_json::Value;

use super::script::{js_string, validation_function};
use crate::field::{Field, FieldCore, field_html_id, impl_field_control, required_error, write_common_attributes};
use crate::html::HtmlBuffer;

/// A file input bound to the uploaded [`FileItem`] of the same name
#[derive(Debug)]
pub struct FileField {
	field: FieldCore,
	item: Option<FileItem>,
	size: usize,
}

impl FileField {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::FileField;
	///
	/// let upload = FileField::new("resume").required();
	/// assert!(upload.file_item().is_none());
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			item: None,
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

	/// The uploaded file bound during processing
	pub fn file_item(&self) -> Option<&FileItem> {
		self.item.as_ref()
	}

	pub fn size(&self) -> usize {
		self.size
	}
}

impl_field_control!(FileField);

impl Field for FileField {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	fn value_object(&self) -> Value {
		match &self.item {
			Some(item) => Value::String(item.file_name().to_string()),
			None => Value::Null,
		}
	}

	fn bind_request_value(&mut self, ctx: &Context) {
		self.item = ctx.file_item(self.field.name()).cloned();
		let file_name = self
			.item
			.as_ref()
			.map(|item| item.file_name().to_string())
			.unwrap_or_default();
		self.field.set_value(file_name);
	}

	fn validate(&mut self, ctx: &Context) {
		let error = required_error(&self.field, ctx);
		self.field.set_error(error);
	}

	fn set_size(&mut self, size: usize) -> bool {
		self.size = size;
		true
	}

	fn validation_javascript(&self, form_id: &str, ctx: &Context) -> Option<String> {
		let id = field_html_id(Some(form_id), self.field.name());
		let message = js_string(&ctx.message("field-required-error", &[&self.field.label()]));
		let call = format!(
			"validateFileField('{id}', {}, [{message}])",
			self.field.is_required()
		);
		Some(validation_function(&id, &call))
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("input");
		buffer.attr("type", "file");
		write_common_attributes(&self.field, buffer, form_id);
		buffer.attr("size", &self.size.to_string());
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
	fn test_binds_uploaded_item() {
		// Arrange
		let mut upload = FileField::new("resume").required();
		let mut ctx = Context::builder()
			.method(Method::POST)
			.file(FileItem::new("resume", "C:\\docs\\cv.pdf", vec![1, 2, 3]))
			.build()
			.unwrap();

		// Act
		upload.on_process(&mut ctx);

		// Assert
		assert_eq!(upload.value(), "cv.pdf");
		assert_eq!(upload.file_item().map(FileItem::size), Some(3));
		assert!(upload.is_valid());
	}

	#[rstest]
	fn test_missing_required_upload() {
		// Arrange
		let mut upload = FileField::new("resume").required();
		let mut ctx = Context::builder().method(Method::POST).build().unwrap();

		// Act
		upload.on_process(&mut ctx);

		// Assert
		assert_eq!(upload.error(), Some("You must enter a value for Resume"));
		assert_eq!(upload.value_object(), Value::Null);
	}
}
