//! Input fields: shared state, default processing and validation helpers

use clickwork_http::Context;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::control::{Control, ControlCore};
use crate::error::{ControlError, ControlResult};
use crate::html::HtmlBuffer;
use crate::listener::{ActionEvent, ActionListener};

/// Form-wide settings visible to fields while their form processes them.
///
/// A form stores its scope as a request attribute for the duration of its
/// `on_process` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormScope {
	pub form_id: String,
	pub validate: bool,
	pub disabled: bool,
	pub readonly: bool,
}

impl FormScope {
	pub fn current(ctx: &Context) -> Option<&FormScope> {
		ctx.attributes().get::<FormScope>()
	}
}

/// Turn a property-style name into a display label.
///
/// # Examples
///
/// ```
/// use clickwork_forms::field::label_from_name;
///
/// assert_eq!(label_from_name("firstName"), "First Name");
/// assert_eq!(label_from_name("postal_code"), "Postal Code");
/// assert_eq!(label_from_name("address.street"), "Address Street");
/// ```
pub fn label_from_name(name: &str) -> String {
	let mut label = String::with_capacity(name.len() + 4);
	let mut previous: Option<char> = None;
	for ch in name.chars() {
		match ch {
			'_' | '.' | '-' => {
				if !label.is_empty() && !label.ends_with(' ') {
					label.push(' ');
				}
			}
			_ => {
				let word_start = label.is_empty() || label.ends_with(' ');
				if word_start {
					label.extend(ch.to_uppercase());
				} else {
					if ch.is_uppercase() && previous.is_some_and(|p| p.is_lowercase()) {
						label.push(' ');
					}
					label.push(ch);
				}
			}
		}
		previous = Some(ch);
	}
	label.trim_end().to_string()
}

/// State shared by every field kind
#[derive(Debug)]
pub struct FieldCore {
	control: ControlCore,
	value: String,
	label: Option<String>,
	title: Option<String>,
	required: bool,
	disabled: bool,
	readonly: bool,
	validate: Option<bool>,
	error: Option<String>,
	attributes: BTreeMap<String, String>,
	listener: Option<ActionListener>,
}

impl FieldCore {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::FieldCore;
	///
	/// let core = FieldCore::new("emailAddress");
	/// assert_eq!(core.label(), "Email Address");
	/// assert_eq!(core.value(), "");
	/// assert!(core.error().is_none());
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			control: ControlCore::new(Some(name)),
			value: String::new(),
			label: None,
			title: None,
			required: false,
			disabled: false,
			readonly: false,
			validate: None,
			error: None,
			attributes: BTreeMap::new(),
			listener: None,
		}
	}

	pub fn control(&self) -> &ControlCore {
		&self.control
	}

	pub fn control_mut(&mut self) -> &mut ControlCore {
		&mut self.control
	}

	pub fn name(&self) -> &str {
		self.control.name().unwrap_or_default()
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn set_value(&mut self, value: impl Into<String>) {
		self.value = value.into();
	}

	/// The explicit label, or one derived from the field name
	pub fn label(&self) -> String {
		match &self.label {
			Some(label) => label.clone(),
			None => label_from_name(self.name()),
		}
	}

	pub fn set_label(&mut self, label: impl Into<String>) {
		self.label = Some(label.into());
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn set_title(&mut self, title: impl Into<String>) {
		self.title = Some(title.into());
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn set_required(&mut self, required: bool) {
		self.required = required;
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	pub fn set_disabled(&mut self, disabled: bool) {
		self.disabled = disabled;
	}

	pub fn is_readonly(&self) -> bool {
		self.readonly
	}

	pub fn set_readonly(&mut self, readonly: bool) {
		self.readonly = readonly;
	}

	/// Per-field validation override; `None` follows the form
	pub fn validate_flag(&self) -> Option<bool> {
		self.validate
	}

	pub fn set_validate(&mut self, validate: bool) {
		self.validate = Some(validate);
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn set_error(&mut self, error: Option<String>) {
		self.error = error;
	}

	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}

	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.attributes.insert(name.into(), value.into());
	}

	pub fn attributes(&self) -> &BTreeMap<String, String> {
		&self.attributes
	}

	pub fn set_listener(&mut self, listener: ActionListener) {
		self.listener = Some(listener);
	}

	pub fn has_listener(&self) -> bool {
		self.listener.is_some()
	}

	/// Fire the registered listener, if any
	pub fn dispatch(&mut self, value: Value, ctx: &mut Context) -> bool {
		let valid = self.error.is_none();
		let event = ActionEvent {
			source: self.control.id(),
			name: self.control.name().map(str::to_string),
			value,
			valid,
		};
		match self.listener.as_mut() {
			Some(listener) => listener.fire(&event, ctx),
			None => true,
		}
	}
}

/// A control holding one user-input value
pub trait Field: Control {
	fn field(&self) -> &FieldCore;

	fn field_mut(&mut self) -> &mut FieldCore;

	fn value(&self) -> &str {
		self.field().value()
	}

	fn set_value(&mut self, value: &str) {
		self.field_mut().set_value(value);
	}

	/// Typed representation of the value; `Null` when the value is empty
	fn value_object(&self) -> Value {
		match self.value() {
			"" => Value::Null,
			value => Value::String(value.to_string()),
		}
	}

	/// Assign the value from a typed representation
	fn set_value_object(&mut self, value: &Value) -> ControlResult<()> {
		let text = scalar_text(self.field().name(), value)?;
		self.set_value(&text);
		Ok(())
	}

	/// Read this field's value from the request
	fn bind_request_value(&mut self, ctx: &Context) {
		let value = request_value(self.field().name(), ctx);
		self.set_value(&value);
	}

	/// Check the value against the field's constraints, storing any error
	fn validate(&mut self, ctx: &Context) {
		let error = required_error(self.field(), ctx);
		self.field_mut().set_error(error);
	}

	fn is_valid(&self) -> bool {
		self.field().error().is_none()
	}

	fn error(&self) -> Option<&str> {
		self.field().error()
	}

	fn set_error(&mut self, error: Option<String>) {
		self.field_mut().set_error(error);
	}

	fn label(&self) -> String {
		self.field().label()
	}

	fn is_required(&self) -> bool {
		self.field().is_required()
	}

	fn is_disabled(&self) -> bool {
		self.field().is_disabled()
	}

	fn set_disabled(&mut self, disabled: bool) {
		self.field_mut().set_disabled(disabled);
	}

	fn is_readonly(&self) -> bool {
		self.field().is_readonly()
	}

	fn is_hidden(&self) -> bool {
		false
	}

	/// Whether the field submits a value (buttons and labels do not)
	fn is_input(&self) -> bool {
		true
	}

	fn is_button(&self) -> bool {
		false
	}

	/// Apply a display size; returns whether this kind of field has one
	fn set_size(&mut self, _size: usize) -> bool {
		false
	}

	/// The `validate_<id>()` client-side function body, if the field has one
	fn validation_javascript(&self, _form_id: &str, _ctx: &Context) -> Option<String> {
		None
	}

	fn render_element(&self, buffer: &mut HtmlBuffer, form_id: Option<&str>);
}

/// HTML id of a field rendered inside the form `form_id`
pub fn field_html_id(form_id: Option<&str>, name: &str) -> String {
	match form_id {
		Some(form_id) => format!("{form_id}_{name}"),
		None => name.to_string(),
	}
}

/// The trimmed request value of `name`, or an empty string
pub fn request_value(name: &str, ctx: &Context) -> String {
	ctx.request_parameter(name)
		.map(|value| value.trim().to_string())
		.unwrap_or_default()
}

/// Whether `field` is disabled directly or through its form
pub fn effective_disabled<F: Field + ?Sized>(field: &F, ctx: &Context) -> bool {
	field.is_disabled() || FormScope::current(ctx).is_some_and(|scope| scope.disabled)
}

pub fn effective_readonly<F: Field + ?Sized>(field: &F, ctx: &Context) -> bool {
	field.is_readonly() || FormScope::current(ctx).is_some_and(|scope| scope.readonly)
}

/// Whether `field` validates itself during processing
pub fn should_validate<F: Field + ?Sized>(field: &F, ctx: &Context) -> bool {
	field
		.field()
		.validate_flag()
		.or_else(|| FormScope::current(ctx).map(|scope| scope.validate))
		.unwrap_or(true)
}

/// Default field processing.
///
/// A disabled field is skipped unless the request carries its parameter, in
/// which case it is re-enabled first. The value is then bound, validated when
/// validation is on, and the listener fired. Always continues.
pub fn process_input<F: Field + ?Sized>(field: &mut F, ctx: &mut Context) -> bool {
	if effective_disabled(field, ctx) {
		if !ctx.has_request_parameter(field.field().name()) {
			return true;
		}
		field.set_disabled(false);
	}

	field.bind_request_value(ctx);
	if should_validate(field, ctx) {
		field.validate(ctx);
	}

	let value = field.value_object();
	field.field_mut().dispatch(value, ctx);
	true
}

/// Text form of a scalar value object
pub fn scalar_text(name: &str, value: &Value) -> ControlResult<String> {
	match value {
		Value::Null => Ok(String::new()),
		Value::String(text) => Ok(text.clone()),
		Value::Bool(flag) => Ok(flag.to_string()),
		Value::Number(number) => Ok(number.to_string()),
		other => Err(ControlError::ValueType {
			name: name.to_string(),
			expected: "scalar",
			found: value_kind(other).to_string(),
		}),
	}
}

/// JSON type name of `value`, for error messages
pub fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn message(ctx: &Context, key: &str, args: &[&dyn Display]) -> String {
	ctx.message(key, args)
}

/// `field-required-error` when a required field is empty
pub fn required_error(field: &FieldCore, ctx: &Context) -> Option<String> {
	(field.is_required() && field.value().is_empty())
		.then(|| message(ctx, "field-required-error", &[&field.label()]))
}

/// Length constraint check; an empty value only fails when required
pub fn length_error(
	field: &FieldCore,
	min_length: Option<usize>,
	max_length: Option<usize>,
	ctx: &Context,
) -> Option<String> {
	let length = field.value().chars().count();
	if length == 0 {
		return required_error(field, ctx);
	}
	if let Some(min) = min_length.filter(|&min| length < min) {
		return Some(message(ctx, "field-minlength-error", &[&field.label(), &min]));
	}
	if let Some(max) = max_length.filter(|&max| length > max) {
		return Some(message(ctx, "field-maxlength-error", &[&field.label(), &max]));
	}
	None
}

/// Numeric range check
pub fn range_error<T>(label: &str, value: T, min: Option<T>, max: Option<T>, ctx: &Context) -> Option<String>
where
	T: PartialOrd + Display + Copy,
{
	if let Some(min) = min.filter(|&min| value < min) {
		return Some(message(ctx, "number-minvalue-error", &[&label, &min]));
	}
	if let Some(max) = max.filter(|&max| value > max) {
		return Some(message(ctx, "number-maxvalue-error", &[&label, &max]));
	}
	None
}

/// Write the attributes common to input elements
pub(crate) fn write_common_attributes(
	field: &FieldCore,
	buffer: &mut HtmlBuffer,
	form_id: Option<&str>,
) {
	buffer.attr("name", field.name());
	buffer.attr("id", &field_html_id(form_id, field.name()));
	if let Some(title) = field.title() {
		buffer.attr("title", title);
	}
	if field.is_disabled() {
		buffer.flag("disabled");
	}
	if field.is_readonly() {
		buffer.flag("readonly");
	}
	if field.error().is_some() {
		buffer.attr("class", "error");
	}
	for (name, value) in field.attributes() {
		buffer.attr(name, value);
	}
}

/// Implement [`Control`] for a field kind with a `field: FieldCore` member
macro_rules! impl_field_control {
	($ty:ty) => {
		impl $crate::control::Control for $ty {
			fn core(&self) -> &$crate::control::ControlCore {
				self.field.control()
			}

			fn core_mut(&mut self) -> &mut $crate::control::ControlCore {
				self.field.control_mut()
			}

			fn on_process(&mut self, ctx: &mut ::clickwork_http::Context) -> bool {
				$crate::field::process_input(self, ctx)
			}

			fn render(&self, buffer: &mut $crate::html::HtmlBuffer) {
				$crate::field::Field::render_element(self, buffer, None);
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}

			fn as_field(&self) -> Option<&dyn $crate::field::Field> {
				Some(self)
			}

			fn as_field_mut(&mut self) -> Option<&mut dyn $crate::field::Field> {
				Some(self)
			}
		}
	};
}

pub(crate) use impl_field_control;
