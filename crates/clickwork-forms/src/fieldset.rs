//! Field sets: fields that group other fields

use clickwork_http::Context;
use serde_json::{Map, Value};
use std::any::Any;

use crate::container::{Container, ControlList};
use crate::control::{Control, ControlCore};
use crate::error::ControlResult;
use crate::field::{Field, FieldCore, effective_disabled, field_html_id};
use crate::html::HtmlBuffer;

/// A titled group of fields rendered as a `<fieldset>`.
///
/// A field set is processed as one field: it processes its children in order
/// and fails when any of them fails.
#[derive(Debug)]
pub struct FieldSet {
	field: FieldCore,
	legend: Option<String>,
	children: ControlList,
}

impl FieldSet {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Container, FieldSet, TextField};
	///
	/// let mut address = FieldSet::new("address").with_legend("Postal address");
	/// address.add(TextField::new("street")).unwrap();
	/// assert_eq!(address.legend(), "Postal address");
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			field: FieldCore::new(name),
			legend: None,
			children: ControlList::new(),
		}
	}

	pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
		self.legend = Some(legend.into());
		self
	}

	/// The legend, defaulting to the field label
	pub fn legend(&self) -> String {
		self.legend.clone().unwrap_or_else(|| self.field.label())
	}
}

impl Control for FieldSet {
	fn core(&self) -> &ControlCore {
		self.field.control()
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		self.field.control_mut()
	}

	fn on_init(&mut self, ctx: &mut Context) {
		self.children.init_all(ctx);
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		if effective_disabled(self, ctx) {
			return true;
		}
		self.children.process_all(ctx)
	}

	fn on_render(&mut self, ctx: &mut Context) {
		self.children.render_all(ctx);
	}

	fn on_destroy(&mut self, ctx: &mut Context) -> ControlResult<()> {
		self.children.destroy_all(ctx);
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

	fn as_container(&self) -> Option<&dyn Container> {
		Some(self)
	}

	fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
		Some(self)
	}
}

impl Container for FieldSet {
	fn control_list(&self) -> &ControlList {
		&self.children
	}

	fn control_list_mut(&mut self) -> &mut ControlList {
		&mut self.children
	}
}

impl Field for FieldSet {
	fn field(&self) -> &FieldCore {
		&self.field
	}

	fn field_mut(&mut self) -> &mut FieldCore {
		&mut self.field
	}

	/// An object of the child field values
	fn value_object(&self) -> Value {
		let mut values = Map::new();
		for child in self.children.iter() {
			if let (Some(name), Some(field)) = (child.name(), child.as_field()) {
				if field.is_input() {
					values.insert(name.to_string(), field.value_object());
				}
			}
		}
		Value::Object(values)
	}

	fn validate(&mut self, _ctx: &Context) {}

	fn is_valid(&self) -> bool {
		self.children
			.iter()
			.filter_map(|child| child.as_field())
			.all(|field| field.is_hidden() || field.is_valid())
	}

	fn is_input(&self) -> bool {
		false
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>) {
		buffer.elem("fieldset");
		buffer.attr("id", &field_html_id(form_id, self.field.name()));
		buffer.close_tag();
		buffer.elem("legend").close_tag();
		buffer.append_escaped(&self.legend());
		buffer.end_elem("legend");
		for child in self.children.iter() {
			match child.as_field() {
				Some(field) => field.render_element(buffer, form_id),
				None => child.render(buffer),
			}
		}
		buffer.end_elem("fieldset");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{IntegerField, TextField};
	use http::Method;
	use rstest::rstest;

	#[rstest]
	fn test_processes_children_and_reports_validity() {
		// Arrange
		let mut set = FieldSet::new("person");
		set.add(TextField::new("name").required()).unwrap();
		set.add(IntegerField::new("age")).unwrap();
		let mut ctx = Context::builder()
			.method(Method::POST)
			.param("age", "41")
			.build()
			.unwrap();

		// Act
		let proceed = set.on_process(&mut ctx);

		// Assert
		assert!(proceed);
		assert!(!set.is_valid());
		assert_eq!(set.value_object()["age"], serde_json::json!(41));
	}

	#[rstest]
	fn test_render_uses_legend() {
		// Arrange
		let set = FieldSet::new("billingAddress");
		let mut buffer = HtmlBuffer::new();

		// Act
		set.render(&mut buffer);

		// Assert
		assert_eq!(
			buffer.as_str(),
			r#"<fieldset id="billingAddress"><legend>Billing Address</legend></fieldset>"#
		);
	}
}
