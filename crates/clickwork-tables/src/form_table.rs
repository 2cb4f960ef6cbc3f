//! Tables editing their rows through an embedded form

use clickwork_forms::{
	Button, Container, Control, ControlCore, Form, HiddenField, HtmlBuffer, ValueKind,
};
use clickwork_http::Context;
use std::any::Any;

use crate::column::{Column, Row, row_value, set_row_value};
use crate::error::Result;
use crate::table::{ASCENDING, COLUMN, PAGE, Table};

/// A table whose [`FieldColumn`](crate::FieldColumn)s are edited in place.
///
/// The table owns a form named `<table>_form`. For each displayed row and
/// field column the form holds a field named `<column>_<row index>`,
/// loaded from the row. When the form is submitted, valid field values are
/// written back into the rows; an invalid value leaves its row untouched
/// and sets a form error. The current page and sort order travel in hidden
/// fields so a submission addresses the rows that were displayed.
///
/// # Examples
///
/// ```
/// use clickwork_forms::{Control, IntegerField};
/// use clickwork_tables::{BaseColumn, FieldColumn, FormTable};
/// use serde_json::json;
///
/// let mut table = FormTable::new("orders");
/// table.add_column(BaseColumn::new("item")).unwrap();
/// table.add_column(FieldColumn::new("qty", IntegerField::new)).unwrap();
/// table
/// 	.set_rows(vec![json!({ "item": "pen", "qty": 2 }).as_object().cloned().unwrap()])
/// 	.unwrap();
///
/// assert_eq!(table.form().field_value("qty_0"), Some("2"));
/// ```
#[derive(Debug)]
pub struct FormTable {
	table: Table,
	form: Form,
	row_fields: Vec<String>,
	render_submitted_values: bool,
}

impl FormTable {
	pub fn new(name: &str) -> Self {
		let mut form = Form::new(&format!("{name}_form"));
		for state in [PAGE, COLUMN, ASCENDING] {
			if let Err(error) = form.add(HiddenField::new(state, ValueKind::String)) {
				tracing::error!(table = name, %error, "cannot add table state field");
			}
		}
		Self {
			table: Table::new(name),
			form,
			row_fields: Vec::new(),
			render_submitted_values: true,
		}
	}

	pub fn table(&self) -> &Table {
		&self.table
	}

	pub fn form(&self) -> &Form {
		&self.form
	}

	pub fn form_mut(&mut self) -> &mut Form {
		&mut self.form
	}

	pub fn rows(&self) -> &[Row] {
		self.table.rows()
	}

	/// Adds a column; field columns get a field for every displayed row
	pub fn add_column<C: Column + 'static>(&mut self, column: C) -> Result<()> {
		let editable = column.as_field_column().is_some();
		self.table.add_column(column)?;
		if editable {
			self.rebuild_fields()?;
		}
		Ok(())
	}

	pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<()> {
		self.table.set_rows(rows);
		self.rebuild_fields()
	}

	pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
		self.table.set_page_size(page_size);
		self.rebuild_fields()
	}

	pub fn set_page_number(&mut self, page_number: usize) -> Result<()> {
		self.table.set_page_number(page_number);
		self.rebuild_fields()
	}

	pub fn sort_by(&mut self, column: &str, ascending: bool) -> Result<()> {
		self.table.sort_by(column, ascending)?;
		self.rebuild_fields()
	}

	/// Adds a button below the table
	pub fn add_button(&mut self, button: Button) -> Result<()> {
		self.form.add(button)?;
		Ok(())
	}

	pub fn render_submitted_values(&self) -> bool {
		self.render_submitted_values
	}

	/// When false, fields are reloaded from the rows before rendering
	pub fn set_render_submitted_values(&mut self, render: bool) {
		self.render_submitted_values = render;
	}

	/// (field name, row index, property path) of every row field
	fn row_bindings(&self) -> Vec<(String, usize, String)> {
		let mut bindings = Vec::new();
		for index in self.table.first_row()..self.table.last_row() {
			for column in self.table.columns() {
				if let Some(field_column) = column.as_field_column() {
					bindings.push((
						field_column.field_name(index),
						index,
						column.property().to_string(),
					));
				}
			}
		}
		bindings
	}

	/// Replace the row fields with fresh ones for the displayed rows
	fn rebuild_fields(&mut self) -> Result<()> {
		for name in self.row_fields.drain(..) {
			self.form.remove_field(&name);
		}
		for index in self.table.first_row()..self.table.last_row() {
			for column in self.table.columns() {
				let Some(field_column) = column.as_field_column() else {
					continue;
				};
				let mut control = field_column.create_field(index);
				let name = field_column.field_name(index);
				if let Some(field) = control.as_field_mut() {
					let value = column.value(&self.table.rows()[index]);
					if let Err(error) = field.set_value_object(&value) {
						tracing::debug!(field = %name, %error, "row value not shown");
					}
				}
				self.form.add_boxed(control)?;
				self.row_fields.push(name);
			}
		}
		Ok(())
	}

	/// Reset every row field to its row's current value
	fn reload_values(&mut self) {
		for (name, index, property) in self.row_bindings() {
			let value = row_value(&self.table.rows()[index], &property);
			if let Some(field) = self.form.field_mut(&name) {
				if let Err(error) = field.set_value_object(&value) {
					tracing::debug!(field = %name, %error, "row value not shown");
				}
			}
		}
	}

	fn sync_state_fields(&mut self) {
		let page = self.table.page_number().to_string();
		let (column, ascending) = match self.table.sort_config() {
			Some(sort) => (sort.column.clone(), sort.ascending.to_string()),
			None => (String::new(), String::new()),
		};
		for (name, value) in [(PAGE, page), (COLUMN, column), (ASCENDING, ascending)] {
			if let Some(field) = self.form.field_mut(name) {
				field.set_value(&value);
			}
		}
	}

	/// Write valid row field values back into the rows
	fn copy_back(&mut self, ctx: &Context) {
		let mut invalid = false;
		for (name, index, property) in self.row_bindings() {
			let Some(field) = self.form.field(&name) else {
				continue;
			};
			if !field.is_valid() {
				invalid = true;
				continue;
			}
			let value = field.value_object();
			tracing::debug!("{} -> row {index}.{property} : {value}", self.form.name().unwrap_or_default());
			set_row_value(&mut self.table.rows_mut()[index], &property, value);
		}
		if invalid {
			self.form.set_error(Some(ctx.message("formtable-error", &[])));
		}
	}

	fn render_errors(&self, buffer: &mut HtmlBuffer) {
		let Some(error) = self.form.error() else {
			return;
		};
		buffer.append("<div class=\"errors\"><span class=\"error\">");
		buffer.append_escaped(error);
		buffer.append("</span></div>\n");
	}

	fn render_buttons(&self, buffer: &mut HtmlBuffer, form_id: &str) {
		let buttons = self.form.button_list();
		if buttons.is_empty() {
			return;
		}
		buffer.append("<table class=\"buttons\" id=\"");
		buffer.append(self.name().unwrap_or_default());
		buffer.append("-buttons\"><tbody>\n<tr class=\"buttons\">");
		for button in buttons {
			buffer.elem("td").attr("class", "buttons").close_tag();
			button.render_element(buffer, Some(form_id));
			buffer.end_elem("td");
		}
		buffer.append("</tr>\n</tbody></table>\n");
	}
}

impl Control for FormTable {
	fn core(&self) -> &ControlCore {
		self.table.core()
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		self.table.core_mut()
	}

	/// Rename the table and its form
	fn set_name(&mut self, name: &str) -> clickwork_forms::ControlResult<()> {
		self.table.set_name(name)?;
		self.form.set_name(&format!("{name}_form"))
	}

	fn on_init(&mut self, ctx: &mut Context) {
		self.form.on_init(ctx);
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		let submitted = self.form.is_form_submission(ctx);
		if submitted {
			let page = ctx.request_parameter(PAGE).map(str::to_string);
			let column = ctx.request_parameter(COLUMN).map(str::to_string);
			let ascending = ctx.request_parameter(ASCENDING).map(str::to_string);
			self.table
				.apply_request(page.as_deref(), column.as_deref(), ascending.as_deref());
			if let Err(error) = self.rebuild_fields() {
				tracing::error!(table = %self.table.core().describe(), %error, "cannot rebuild row fields");
			}
		}

		let proceed = self.form.on_process(ctx);
		if submitted && self.form.error().is_none() {
			self.copy_back(ctx);
		}
		proceed
	}

	fn on_render(&mut self, ctx: &mut Context) {
		if !self.render_submitted_values {
			self.reload_values();
		}
		self.sync_state_fields();
		self.form.on_render(ctx);
		self.table.load_empty_message(ctx);
	}

	fn on_destroy(&mut self, ctx: &mut Context) -> clickwork_forms::ControlResult<()> {
		self.form.on_destroy(ctx)
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		let form_id = self.form.html_id().unwrap_or_default();
		self.form.render_start_tag(buffer);
		self.render_errors(buffer);
		self.table.render_with(buffer, &|column, row, index, buffer| {
			let field = column
				.as_field_column()
				.and_then(|field_column| self.form.field(&field_column.field_name(index)));
			match field {
				Some(field) => field.render_element(buffer, Some(form_id.as_str())),
				None => column.render_cell(row, index, buffer),
			}
		});
		self.render_buttons(buffer, &form_id);
		self.form.render_end_tag(buffer);
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
