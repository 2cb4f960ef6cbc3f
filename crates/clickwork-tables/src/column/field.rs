//! Columns editing their values through form fields

use clickwork_forms::{Control, Field, HtmlBuffer};
use serde_json::Value;
use std::fmt;

use super::{BaseColumn, Column, Row};

type FieldFactory = Box<dyn Fn(&str) -> Box<dyn Control> + Send + Sync>;

/// A column whose cells are input fields.
///
/// The column creates one field per displayed row, named
/// `<column>_<row index>`. Outside a [`FormTable`](crate::FormTable) it
/// renders like a [`BaseColumn`].
///
/// # Examples
///
/// ```
/// use clickwork_forms::{Control, TextField};
/// use clickwork_tables::FieldColumn;
///
/// let column = FieldColumn::new("email", |name| TextField::new(name).required());
/// let field = column.create_field(4);
/// assert_eq!(field.name(), Some("email_4"));
/// ```
pub struct FieldColumn {
	column: BaseColumn,
	factory: FieldFactory,
}

impl FieldColumn {
	pub fn new<F, C>(name: impl Into<String>, factory: F) -> Self
	where
		F: Fn(&str) -> C + Send + Sync + 'static,
		C: Field,
	{
		Self {
			column: BaseColumn::new(name),
			factory: Box::new(move |name: &str| -> Box<dyn Control> { Box::new(factory(name)) }),
		}
	}

	pub fn with_header(mut self, header: impl Into<String>) -> Self {
		self.column = self.column.with_header(header);
		self
	}

	/// Edit the row property `property` instead of the column name
	pub fn with_property(mut self, property: impl Into<String>) -> Self {
		self.column = self.column.with_property(property);
		self
	}

	/// Name of the field editing the row at `row_index`
	pub fn field_name(&self, row_index: usize) -> String {
		format!("{}_{row_index}", self.column.name())
	}

	/// A new field for the row at `row_index`
	pub fn create_field(&self, row_index: usize) -> Box<dyn Control> {
		(self.factory)(&self.field_name(row_index))
	}
}

impl fmt::Debug for FieldColumn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldColumn")
			.field("column", &self.column)
			.finish_non_exhaustive()
	}
}

impl Column for FieldColumn {
	fn name(&self) -> &str {
		self.column.name()
	}

	fn header(&self) -> String {
		self.column.header()
	}

	fn property(&self) -> &str {
		self.column.property()
	}

	fn value(&self, row: &Row) -> Value {
		self.column.value(row)
	}

	fn render_cell(&self, row: &Row, index: usize, buffer: &mut HtmlBuffer) {
		self.column.render_cell(row, index, buffer);
	}

	fn as_field_column(&self) -> Option<&FieldColumn> {
		Some(self)
	}
}
