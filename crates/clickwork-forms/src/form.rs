//! Forms: the unit of submission, validation and binding

use clickwork_http::{Context, UploadError};
use http::Method;
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;

use crate::binding::{self, PropertyTarget};
use crate::container::{Container, ControlList};
use crate::container_utils::{self, for_each_input_field_mut, input_fields};
use crate::control::{Control, ControlCore, ControlId};
use crate::error::{BindingResult, ControlError, ControlResult};
use crate::field::{Field, FormScope, field_html_id, label_from_name};
use crate::fields::{HiddenField, ValueKind};
use crate::html::HtmlBuffer;
use crate::listener::{ActionEvent, ActionListener};

/// Name of the hidden field carrying the submitted form's name
pub const FORM_NAME: &str = "form_name";

/// Prefix of submit-check token names
pub const SUBMIT_CHECK: &str = "SUBMIT_CHECK_";

/// Whether `name` belongs to a field the form manages itself
pub(crate) fn is_housekeeping_field(name: &str) -> bool {
	name == FORM_NAME || name.starts_with(SUBMIT_CHECK)
}

/// Session key and field name of the submit-check token for a form on a page.
///
/// # Examples
///
/// ```
/// use clickwork_forms::form::submit_token_name;
///
/// assert_eq!(submit_token_name("order", "/order.htm"), "SUBMIT_CHECK_order_order.htm");
/// assert_eq!(submit_token_name("order", "shop/order.htm"), "SUBMIT_CHECK_order_shop_order.htm");
/// ```
pub fn submit_token_name(form_name: &str, resource_path: &str) -> String {
	let path = resource_path.replace('/', "_");
	if path.starts_with('_') {
		format!("{SUBMIT_CHECK}{form_name}{path}")
	} else {
		format!("{SUBMIT_CHECK}{form_name}_{path}")
	}
}

/// An HTML form.
///
/// A form processes its fields only when the request is its own submission:
/// the method matches and the `form_name` parameter equals the form's name.
/// Framework-managed hidden fields always stay at the end of the child list.
#[derive(Debug)]
pub struct Form {
	core: ControlCore,
	children: ControlList,
	/// Housekeeping fields at the tail of `children`
	reserved: usize,
	method: Method,
	error: Option<String>,
	validate: bool,
	javascript_validation: bool,
	disabled: bool,
	readonly: bool,
	columns: usize,
	default_field_size: Option<usize>,
	errors_align: String,
	errors_style: Option<String>,
	field_widths: HashMap<String, usize>,
	listener: Option<ActionListener>,
	submitted: bool,
	script: Option<String>,
}

impl Form {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Container, Form, TextField};
	///
	/// let mut form = Form::new("login");
	/// form.add(TextField::new("username").required()).unwrap();
	/// assert_eq!(form.field_value("form_name"), Some("login"));
	/// assert_eq!(form.field_list().len(), 2);
	/// ```
	pub fn new(name: &str) -> Self {
		let mut form = Self {
			core: ControlCore::new(Some(name)),
			children: ControlList::new(),
			reserved: 0,
			method: Method::POST,
			error: None,
			validate: true,
			javascript_validation: false,
			disabled: false,
			readonly: false,
			columns: 1,
			default_field_size: None,
			errors_align: "left".to_string(),
			errors_style: None,
			field_widths: HashMap::new(),
			listener: None,
			submitted: false,
			script: None,
		};
		let marker = HiddenField::fixed(FORM_NAME, ValueKind::String).with_value(name);
		if let Err(error) = form.install_housekeeping(Box::new(marker)) {
			tracing::error!(form = name, %error, "cannot install form name field");
		}
		form
	}

	fn install_housekeeping(&mut self, field: Box<dyn Control>) -> ControlResult<()> {
		let owner = self.core.id();
		let index = self.children.len();
		self.children.insert(owner, field, index)?;
		self.reserved += 1;
		Ok(())
	}

	fn form_name(&self) -> &str {
		self.core.name().unwrap_or_default()
	}

	fn form_id(&self) -> String {
		self.html_id().unwrap_or_default()
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn set_method(&mut self, method: Method) {
		self.method = method;
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn set_error(&mut self, error: Option<String>) {
		self.error = error;
	}

	/// Whether fields validate themselves during processing
	pub fn validation_enabled(&self) -> bool {
		self.validate
	}

	pub fn set_validate(&mut self, validate: bool) {
		self.validate = validate;
	}

	pub fn javascript_validation(&self) -> bool {
		self.javascript_validation
	}

	pub fn set_javascript_validation(&mut self, enabled: bool) {
		self.javascript_validation = enabled;
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	/// Disable every field of the form while it processes
	pub fn set_disabled(&mut self, disabled: bool) {
		self.disabled = disabled;
	}

	pub fn is_readonly(&self) -> bool {
		self.readonly
	}

	pub fn set_readonly(&mut self, readonly: bool) {
		self.readonly = readonly;
	}

	pub fn columns(&self) -> usize {
		self.columns
	}

	pub fn set_columns(&mut self, columns: usize) {
		self.columns = columns.max(1);
	}

	pub fn default_field_size(&self) -> Option<usize> {
		self.default_field_size
	}

	/// Display size applied to sized fields as they are added
	pub fn set_default_field_size(&mut self, size: usize) {
		self.default_field_size = Some(size);
	}

	pub fn errors_align(&self) -> &str {
		&self.errors_align
	}

	pub fn set_errors_align(&mut self, align: impl Into<String>) {
		self.errors_align = align.into();
	}

	pub fn errors_style(&self) -> Option<&str> {
		self.errors_style.as_deref()
	}

	pub fn set_errors_style(&mut self, style: impl Into<String>) {
		self.errors_style = Some(style.into());
	}

	/// Layout column spans by field name
	pub fn field_widths(&self) -> &HashMap<String, usize> {
		&self.field_widths
	}

	pub fn set_listener(&mut self, listener: ActionListener) {
		self.listener = Some(listener);
	}

	/// Add a field spanning `width` layout columns
	pub fn add_with_width<C: Control>(&mut self, control: C, width: usize) -> ControlResult<ControlId> {
		let name = control.name().unwrap_or_default().to_string();
		if let Some(field) = control.as_field() {
			if field.is_button() || field.is_hidden() {
				return Err(ControlError::InvalidFieldType {
					name,
					reason: "buttons and hidden fields have no layout width".to_string(),
				});
			}
		}
		if width < 1 {
			return Err(ControlError::InvalidWidth { name, width });
		}
		let id = self.add(control)?;
		if !name.is_empty() {
			self.field_widths.insert(name, width);
		}
		Ok(id)
	}

	/// The field named `name`, searching nested containers
	pub fn field(&self, name: &str) -> Option<&dyn Field> {
		container_utils::find_field(self, name)
	}

	pub fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field> {
		container_utils::find_field_mut(self, name)
	}

	pub fn field_value(&self, name: &str) -> Option<&str> {
		self.field(name).map(|field| field.value())
	}

	/// Remove the direct child named `name`; returns whether it was present
	pub fn remove_field(&mut self, name: &str) -> bool {
		match self.children.get(name).map(|control| control.id()) {
			Some(id) => Container::remove(self, id).is_some(),
			None => false,
		}
	}

	pub fn remove_fields<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
		for name in names {
			self.remove_field(name);
		}
	}

	/// Direct child fields other than buttons, in order
	pub fn field_list(&self) -> Vec<&dyn Field> {
		self.children
			.iter()
			.filter_map(|control| control.as_field())
			.filter(|field| !field.is_button())
			.collect()
	}

	/// Direct child buttons, in order
	pub fn button_list(&self) -> Vec<&dyn Field> {
		self.children
			.iter()
			.filter_map(|control| control.as_field())
			.filter(|field| field.is_button())
			.collect()
	}

	/// Visible input fields holding an error
	pub fn error_fields(&self) -> Vec<&dyn Field> {
		container_utils::error_fields(self)
	}

	/// Valid when there is no form error and every visible input field is valid
	pub fn is_valid(&self) -> bool {
		self.error.is_none()
			&& input_fields(self)
				.iter()
				.all(|field| field.is_hidden() || field.is_valid())
	}

	pub fn clear_errors(&mut self) {
		self.error = None;
		for_each_input_field_mut(self, &mut |field| field.set_error(None));
	}

	/// Empty every field value except the housekeeping fields
	pub fn clear_values(&mut self) {
		for_each_input_field_mut(self, &mut |field| {
			if !is_housekeeping_field(field.field().name()) {
				field.set_value("");
			}
		});
	}

	/// The value objects of the input fields, keyed by field name
	pub fn values(&self) -> Map<String, Value> {
		input_fields(self)
			.into_iter()
			.filter(|field| !is_housekeeping_field(field.field().name()))
			.map(|field| (field.field().name().to_string(), field.value_object()))
			.collect()
	}

	fn method_matches(&self, ctx: &Context) -> bool {
		ctx.method().as_str().eq_ignore_ascii_case(self.method.as_str())
	}

	/// Whether the request is a submission of this form
	pub fn is_form_submission(&self, ctx: &Context) -> bool {
		self.method_matches(ctx) && ctx.request_parameter(FORM_NAME) == Some(self.form_name())
	}

	/// Whether the upload collaborator flagged the request as oversized
	pub fn has_post_error(&self, ctx: &Context) -> bool {
		ctx.attributes().contains::<UploadError>()
	}

	/// Turn an upload size violation into a form error.
	///
	/// Field values are validated by the fields themselves.
	pub fn validate(&mut self, ctx: &Context) {
		self.error = None;
		let Some(upload_error) = ctx.attributes().get::<UploadError>() else {
			return;
		};
		let message = match upload_error {
			UploadError::SizeLimitExceeded { permitted, actual } => {
				ctx.message("post-size-limit-exceeded-error", &[permitted, actual])
			}
			UploadError::FileSizeLimitExceeded {
				field,
				permitted,
				actual,
			} => {
				let label = self
					.field(field)
					.map(|field| field.label())
					.unwrap_or_else(|| label_from_name(field));
				ctx.message("file-size-limit-exceeded-error", &[&label, permitted, actual])
			}
			other => ctx.message("upload-error", &[&other.to_string()]),
		};
		self.error = Some(message);
	}

	/// Check the submit token and issue a fresh one.
	///
	/// Returns `false` when the request replays an earlier submission: the
	/// session holds a token for this form and page but the request carries
	/// no token or a stale one. A new token is stored in the session and in
	/// a hidden field on every call except for ajax requests.
	pub fn perform_submit_check(&mut self, ctx: &Context) -> ControlResult<bool> {
		let name = self.form_name().to_string();
		if name.trim().is_empty() {
			return Err(ControlError::IllegalState("form name is not defined".to_string()));
		}
		if ctx.is_ajax_request() {
			return Ok(true);
		}

		let token_name = submit_token_name(&name, ctx.resource_path());
		let stored = ctx.session().get::<i64>(&token_name);

		let mut valid = true;
		if !ctx.is_forward() && self.is_form_submission(ctx) {
			if let Some(stored) = stored {
				match ctx.request_parameter(&token_name).filter(|value| !value.is_empty()) {
					Some(value) => valid = value.parse::<i64>().is_ok_and(|time| time == stored),
					None => {
						tracing::warn!(
							token = %token_name,
							form = %name,
							"submit token registered in the session but missing from the request; treating as duplicate post"
						);
						valid = false;
					}
				}
			}
		}

		if self.children.get(&token_name).is_none() {
			let token = HiddenField::fixed(&token_name, ValueKind::Integer);
			self.install_housekeeping(Box::new(token))?;
		}

		let now = chrono::Utc::now().timestamp_millis();
		let time = stored.map_or(now, |previous| now.max(previous + 1));
		if let Some(field) = self
			.children
			.get_mut(&token_name)
			.and_then(|control| control.as_field_mut())
		{
			field.set_value(&time.to_string());
		}
		ctx.session().set_value(&token_name, Value::from(time));

		Ok(valid)
	}

	/// Run the submit check, redirecting to `redirect_path` when it fails
	pub fn on_submit_check(&mut self, ctx: &mut Context, redirect_path: &str) -> ControlResult<bool> {
		if self.perform_submit_check(ctx)? {
			return Ok(true);
		}
		ctx.set_redirect(redirect_path);
		Ok(false)
	}

	/// Copy field values into a map or bean, see [`binding::copy_to`]
	pub fn copy_to<T: PropertyTarget + ?Sized>(&self, target: &mut T) -> BindingResult<()> {
		binding::copy_to(self, self.form_name(), target)
	}

	/// Populate fields from a map or bean, see [`binding::copy_from`]
	pub fn copy_from<T: PropertyTarget + ?Sized>(&mut self, target: &T) -> BindingResult<()> {
		let name = self.form_name().to_string();
		binding::copy_from(self, &name, target)
	}

	/// The client-side validation script for the current field set.
	///
	/// Empty when validation or script validation is off.
	pub fn validation_script(&self, ctx: &Context) -> String {
		if !(self.validate && self.javascript_validation) {
			return String::new();
		}
		let id = self.form_id();
		let bodies: Vec<String> = input_fields(self)
			.iter()
			.filter_map(|field| field.validation_javascript(&id, ctx))
			.filter(|body| !body.is_empty())
			.collect();

		let mut script = String::from("<script type=\"text/javascript\"><!--\n");
		let mut functions = Vec::with_capacity(bodies.len());
		for body in &bodies {
			script.push_str(body);
			if let Some(function) = body.split_whitespace().nth(1) {
				functions.push(function);
			}
		}

		if functions.is_empty() {
			script.push_str(&format!("function on_{id}_submit() {{ return true; }}\n"));
		} else {
			script.push_str(&format!("function on_{id}_submit() {{\n"));
			script.push_str(&format!("   var msgs = new Array({});\n", functions.len()));
			for (index, function) in functions.iter().enumerate() {
				script.push_str(&format!("   msgs[{index}] = {function};\n"));
			}
			let style = match &self.errors_style {
				Some(style) => format!("'{style}'"),
				None => "null".to_string(),
			};
			script.push_str(&format!(
				"   return validateForm(msgs, '{id}', '{}', {style});\n}}\n",
				self.errors_align
			));
		}
		script.push_str("//--></script>\n");
		script
	}

	/// Write the opening `<form>` tag followed by the hidden fields
	pub fn render_start_tag(&self, buffer: &mut HtmlBuffer) {
		let id = self.form_id();
		buffer.elem("form");
		buffer.attr("method", &self.method.as_str().to_ascii_lowercase());
		buffer.attr("name", self.form_name());
		buffer.attr("id", &id);
		if self.validate && self.javascript_validation {
			buffer.attr("onsubmit", &format!("return on_{id}_submit();"));
		}
		buffer.close_tag();
		buffer.append("\n");

		for field in container_utils::hidden_fields(self) {
			field.render_element(buffer, Some(&id));
			buffer.append("\n");
		}
	}

	/// Write the closing `</form>` tag and the validation script
	pub fn render_end_tag(&self, buffer: &mut HtmlBuffer) {
		buffer.end_elem("form");
		buffer.append("\n");
		if let Some(script) = &self.script {
			buffer.append(script);
		}
	}

	fn render_fields(&self, buffer: &mut HtmlBuffer, id: &str) {
		let visible: Vec<&dyn Control> = self
			.children
			.iter()
			.filter(|control| {
				control
					.as_field()
					.is_none_or(|field| !field.is_hidden() && !field.is_button())
			})
			.collect();
		if visible.is_empty() {
			return;
		}

		buffer.append("<tr><td>\n");
		buffer.append("<table class=\"fields\" id=\"");
		buffer.append(id);
		buffer.append("-fields\"><tbody>\n<tr class=\"fields\">");
		let mut column = 0;
		for control in visible {
			let width = control
				.name()
				.and_then(|name| self.field_widths.get(name).copied())
				.unwrap_or(1)
				.min(self.columns);
			if column > 0 && column + width > self.columns {
				buffer.append("</tr>\n<tr class=\"fields\">");
				column = 0;
			}
			match control.as_field().filter(|_| control.as_container().is_none()) {
				Some(field) => {
					let field_id = field_html_id(Some(id), field.field().name());
					buffer.elem("td").attr("class", "fields").close_tag();
					buffer.elem("label").attr("for", &field_id);
					if field.is_required() {
						buffer.attr("class", "required");
					}
					buffer.close_tag();
					buffer.append_escaped(&field.label());
					buffer.end_elem("label").end_elem("td");
					buffer.elem("td");
					if width > 1 {
						buffer.attr("colspan", &(width * 2 - 1).to_string());
					}
					buffer.close_tag();
					field.render_element(buffer, Some(id));
					buffer.end_elem("td");
				}
				None => {
					buffer.elem("td").attr("colspan", &(width * 2).to_string()).close_tag();
					match control.as_field() {
						Some(field) => field.render_element(buffer, Some(id)),
						None => control.render(buffer),
					}
					buffer.end_elem("td");
				}
			}
			column += width;
		}
		buffer.append("</tr>\n</tbody></table>\n</td></tr>\n");
	}

	fn render_errors(&self, buffer: &mut HtmlBuffer, id: &str) {
		if !self.submitted || self.is_valid() {
			return;
		}
		let colspan = (self.columns * 2).to_string();
		buffer.elem("tr").close_tag();
		buffer.elem("td").attr("align", &self.errors_align).close_tag();
		buffer.append("\n<table class=\"errors\" id=\"");
		buffer.append(id);
		buffer.append("-errors\"><tbody>\n");

		let error_row = |buffer: &mut HtmlBuffer| {
			buffer.elem("tr").attr("class", "errors").close_tag();
			buffer.elem("td").attr("class", "errors").attr("align", &self.errors_align);
			buffer.attr("colspan", &colspan);
			if let Some(style) = &self.errors_style {
				buffer.attr("style", style);
			}
			buffer.close_tag();
		};

		if let Some(error) = &self.error {
			error_row(buffer);
			buffer.append("<span class=\"error\">");
			buffer.append_escaped(error);
			buffer.append("</span></td></tr>\n");
		}
		for field in self.error_fields() {
			let Some(error) = field.error() else {
				continue;
			};
			error_row(buffer);
			let focus = format!("javascript:setFocus('{}');", field_html_id(Some(id), field.field().name()));
			buffer.elem("a").attr("class", "error").attr("href", &focus).close_tag();
			buffer.append_escaped(error);
			buffer.append("</a></td></tr>\n");
		}
		buffer.append("</tbody></table>\n</td></tr>\n");
	}

	fn render_buttons(&self, buffer: &mut HtmlBuffer, id: &str) {
		let buttons = self.button_list();
		if buttons.is_empty() {
			return;
		}
		buffer.append("<tr><td>\n<table class=\"buttons\" id=\"");
		buffer.append(id);
		buffer.append("-buttons\"><tbody>\n<tr class=\"buttons\">");
		for button in buttons {
			buffer.elem("td").attr("class", "buttons").close_tag();
			button.render_element(buffer, Some(id));
			buffer.end_elem("td");
		}
		buffer.append("</tr>\n</tbody></table>\n</td></tr>\n");
	}
}

impl Control for Form {
	fn core(&self) -> &ControlCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.core
	}

	/// Rename the form, keeping the `form_name` field in step
	fn set_name(&mut self, name: &str) -> ControlResult<()> {
		self.core.set_name(name);
		if let Some(marker) = self
			.children
			.get_mut(FORM_NAME)
			.and_then(|control| control.as_field_mut())
		{
			marker.set_value(name);
		}
		Ok(())
	}

	fn on_init(&mut self, ctx: &mut Context) {
		self.children.init_all(ctx);
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		if self.validate {
			self.validate(ctx);
			if self.has_post_error(ctx) {
				// Other forms on the page must not report the same error.
				ctx.attributes_mut().remove::<UploadError>();
				return true;
			}
		}

		if !self.is_form_submission(ctx) {
			tracing::trace!(form = %self.core.describe(), "not a submission of this form");
			return true;
		}

		let scope = FormScope {
			form_id: self.form_id(),
			validate: self.validate,
			disabled: self.disabled,
			readonly: self.readonly,
		};
		let previous = ctx.attributes_mut().insert(scope);

		let mut proceed = true;
		for control in self.children.controls_mut() {
			if control.name().is_some_and(|name| name.starts_with(SUBMIT_CHECK)) {
				continue;
			}
			tracing::trace!(control = %control.core().describe(), "onProcess");
			if !control.on_process(ctx) {
				proceed = false;
			}
		}

		match previous {
			Some(previous) => {
				ctx.attributes_mut().insert(previous);
			}
			None => {
				ctx.attributes_mut().remove::<FormScope>();
			}
		}

		let event = ActionEvent {
			source: self.core.id(),
			name: self.core.name().map(str::to_string),
			value: Value::Object(self.values()),
			valid: self.is_valid(),
		};
		if let Some(listener) = self.listener.as_mut() {
			listener.fire(&event, ctx);
		}
		proceed
	}

	fn on_render(&mut self, ctx: &mut Context) {
		self.children.render_all(ctx);
		self.submitted = self.method_matches(ctx);
		let script = self.validation_script(ctx);
		self.script = (!script.is_empty()).then_some(script);
	}

	fn on_destroy(&mut self, ctx: &mut Context) -> ControlResult<()> {
		self.children.destroy_all(ctx);
		self.error = None;
		Ok(())
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		let id = self.form_id();
		self.render_start_tag(buffer);
		buffer.append("<table class=\"form\" id=\"");
		buffer.append(&id);
		buffer.append("-form\"><tbody>\n");
		self.render_errors(buffer, &id);
		self.render_fields(buffer, &id);
		self.render_buttons(buffer, &id);
		buffer.append("</tbody></table>\n");
		self.render_end_tag(buffer);
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn as_container(&self) -> Option<&dyn Container> {
		Some(self)
	}

	fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
		Some(self)
	}
}

impl Container for Form {
	fn control_list(&self) -> &ControlList {
		&self.children
	}

	fn control_list_mut(&mut self) -> &mut ControlList {
		&mut self.children
	}

	/// Insert before the housekeeping fields; `index` is clamped to the user
	/// part of the child list.
	fn insert_boxed(&mut self, mut control: Box<dyn Control>, index: usize) -> ControlResult<ControlId> {
		if let Some(name) = control.name().filter(|name| is_housekeeping_field(name)) {
			return Err(ControlError::InvalidArgument(format!(
				"the name '{name}' is reserved by the form"
			)));
		}
		if let Some(size) = self.default_field_size {
			if let Some(field) = control.as_field_mut() {
				field.set_size(size);
			}
		}
		let owner = self.core.id();
		let id = control.id();
		let index = index.min(self.children.len().saturating_sub(self.reserved));
		self.children.insert(owner, control, index)?;
		Ok(id)
	}

	fn remove(&mut self, id: ControlId) -> Option<Box<dyn Control>> {
		let removed = self.children.remove(id)?;
		if let Some(name) = removed.name() {
			self.field_widths.remove(name);
			if is_housekeeping_field(name) {
				self.reserved -= 1;
			}
		}
		Some(removed)
	}

	fn remove_by_name(&mut self, name: &str) -> Option<Box<dyn Control>> {
		let id = self.children.get(name)?.id();
		Container::remove(self, id)
	}

	/// Housekeeping fields can neither be replaced nor be used as a replacement
	fn replace(
		&mut self,
		current: ControlId,
		replacement: Box<dyn Control>,
	) -> ControlResult<Box<dyn Control>> {
		let target = self
			.children
			.get_by_id(current)
			.and_then(|control| control.name())
			.filter(|name| is_housekeeping_field(name));
		if let Some(name) = target.or_else(|| replacement.name().filter(|name| is_housekeeping_field(name))) {
			return Err(ControlError::InvalidArgument(format!(
				"the name '{name}' is reserved by the form"
			)));
		}
		let owner = self.core.id();
		let previous = self.children.replace(owner, current, replacement)?;
		if let Some(name) = previous.name() {
			self.field_widths.remove(name);
		}
		Ok(previous)
	}
}
