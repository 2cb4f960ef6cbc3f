//! The table control

use clickwork_forms::{Control, ControlCore, HtmlBuffer};
use clickwork_http::Context;
use std::any::Any;

use crate::column::{Column, Row, compare_values};
use crate::error::{Result, TableError};

/// Request parameter naming the table a paging or sorting request targets
pub const TABLE: &str = "table";

/// Request parameter carrying the page number
pub const PAGE: &str = "page";

/// Request parameter carrying the sorted column name
pub const COLUMN: &str = "column";

/// Request parameter carrying the sort direction
pub const ASCENDING: &str = "ascending";

/// Sorting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
	/// Column name to sort by
	pub column: String,
	/// Sort direction
	pub ascending: bool,
}

/// A control rendering rows of data as an HTML table.
///
/// Rows are JSON objects. With a page size set, only the rows of the
/// current page are rendered.
///
/// # Examples
///
/// ```
/// use clickwork_forms::{Control, HtmlBuffer};
/// use clickwork_tables::{BaseColumn, Table};
/// use serde_json::json;
///
/// let mut table = Table::new("customers");
/// table.add_column(BaseColumn::new("name")).unwrap();
/// table.add_row(json!({ "name": "Ann" }).as_object().cloned().unwrap());
///
/// let mut buffer = HtmlBuffer::new();
/// table.render(&mut buffer);
/// assert!(buffer.as_str().contains("<td>Ann</td>"));
/// ```
#[derive(Debug)]
pub struct Table {
	core: ControlCore,
	columns: Vec<Box<dyn Column>>,
	rows: Vec<Row>,
	page_size: usize,
	page_number: usize,
	sort: Option<SortConfig>,
	class: Option<String>,
	empty_message: String,
}

impl Table {
	pub fn new(name: &str) -> Self {
		Self {
			core: ControlCore::new(Some(name)),
			columns: Vec::new(),
			rows: Vec::new(),
			page_size: 0,
			page_number: 0,
			sort: None,
			class: None,
			empty_message: "No records found.".to_string(),
		}
	}

	/// Adds a column, rejecting a second column with the same name
	pub fn add_column<C: Column + 'static>(&mut self, column: C) -> Result<()> {
		if self.column(column.name()).is_some() {
			return Err(TableError::DuplicateColumn(column.name().to_string()));
		}
		self.columns.push(Box::new(column));
		Ok(())
	}

	pub fn remove_column(&mut self, name: &str) -> Option<Box<dyn Column>> {
		let position = self.columns.iter().position(|column| column.name() == name)?;
		Some(self.columns.remove(position))
	}

	pub fn column(&self, name: &str) -> Option<&dyn Column> {
		self.columns
			.iter()
			.find(|column| column.name() == name)
			.map(|column| column.as_ref())
	}

	pub fn columns(&self) -> &[Box<dyn Column>] {
		&self.columns
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	pub fn rows_mut(&mut self) -> &mut [Row] {
		&mut self.rows
	}

	/// Replace the rows, applying the current sort order
	pub fn set_rows(&mut self, rows: Vec<Row>) {
		self.rows = rows;
		self.sort_rows();
		self.clamp_page();
	}

	pub fn add_row(&mut self, row: Row) {
		self.rows.push(row);
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// Rows per page; zero shows every row
	pub fn set_page_size(&mut self, page_size: usize) {
		self.page_size = page_size;
		self.clamp_page();
	}

	pub fn page_number(&self) -> usize {
		self.page_number
	}

	/// Select the zero-based page, clamped to the last page
	pub fn set_page_number(&mut self, page_number: usize) {
		self.page_number = page_number;
		self.clamp_page();
	}

	pub fn page_count(&self) -> usize {
		if self.page_size == 0 || self.rows.is_empty() {
			return 1;
		}
		self.rows.len().div_ceil(self.page_size)
	}

	fn clamp_page(&mut self) {
		self.page_number = self.page_number.min(self.page_count() - 1);
	}

	/// Index of the first displayed row
	pub fn first_row(&self) -> usize {
		(self.page_number * self.page_size).min(self.rows.len())
	}

	/// Index one past the last displayed row
	pub fn last_row(&self) -> usize {
		if self.page_size == 0 {
			return self.rows.len();
		}
		(self.first_row() + self.page_size).min(self.rows.len())
	}

	pub fn sort_config(&self) -> Option<&SortConfig> {
		self.sort.as_ref()
	}

	/// Sort the rows by `column`
	pub fn sort_by(&mut self, column: &str, ascending: bool) -> Result<()> {
		let target = self
			.column(column)
			.ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
		if !target.sortable() {
			return Err(TableError::NotSortable(column.to_string()));
		}
		self.sort = Some(SortConfig {
			column: column.to_string(),
			ascending,
		});
		self.sort_rows();
		Ok(())
	}

	fn sort_rows(&mut self) {
		let Some(sort) = &self.sort else {
			return;
		};
		let Some(column) = self.columns.iter().find(|column| column.name() == sort.column) else {
			return;
		};
		self.rows.sort_by(|left, right| {
			let ordering = compare_values(&column.value(left), &column.value(right));
			if sort.ascending { ordering } else { ordering.reverse() }
		});
	}

	pub fn set_class(&mut self, class: impl Into<String>) {
		self.class = Some(class.into());
	}

	/// Apply paging and sorting parameters addressed to this table
	pub(crate) fn apply_request(&mut self, page: Option<&str>, column: Option<&str>, ascending: Option<&str>) {
		if let Some(column) = column.filter(|column| !column.is_empty()) {
			let ascending = ascending.is_none_or(|value| value == "true");
			if let Err(error) = self.sort_by(column, ascending) {
				tracing::debug!(table = %self.core.describe(), %error, "ignoring sort request");
			}
		}
		if let Some(page) = page.and_then(|page| page.parse::<usize>().ok()) {
			self.set_page_number(page);
		}
	}

	pub(crate) fn load_empty_message(&mut self, ctx: &Context) {
		self.empty_message = ctx.message("table-no-rows-found", &[]);
	}

	/// Render the table, writing each cell with `cell`
	pub(crate) fn render_with(
		&self,
		buffer: &mut HtmlBuffer,
		cell: &dyn Fn(&dyn Column, &Row, usize, &mut HtmlBuffer),
	) {
		let id = self.html_id().unwrap_or_default();
		buffer.elem("table");
		if let Some(class) = &self.class {
			buffer.attr("class", class);
		}
		buffer.attr("id", &id);
		buffer.close_tag();
		buffer.append("\n<thead>\n<tr>");
		for column in &self.columns {
			buffer.elem("th");
			if !column.css_classes().is_empty() {
				buffer.attr("class", column.css_classes());
			}
			buffer.close_tag();
			buffer.append_escaped(&column.header());
			buffer.end_elem("th");
		}
		buffer.append("</tr>\n</thead>\n<tbody>\n");

		if self.rows.is_empty() {
			buffer.elem("tr").attr("class", "odd").close_tag();
			buffer.elem("td").attr("colspan", &self.columns.len().to_string());
			buffer.attr("class", "error").close_tag();
			buffer.append_escaped(&self.empty_message);
			buffer.append("</td></tr>\n");
		}
		for index in self.first_row()..self.last_row() {
			let row = &self.rows[index];
			let parity = if (index - self.first_row()) % 2 == 0 { "odd" } else { "even" };
			buffer.elem("tr").attr("class", parity).close_tag();
			for column in &self.columns {
				buffer.elem("td");
				if !column.css_classes().is_empty() {
					buffer.attr("class", column.css_classes());
				}
				buffer.close_tag();
				cell(column.as_ref(), row, index, buffer);
				buffer.end_elem("td");
			}
			buffer.append("</tr>\n");
		}
		buffer.append("</tbody>\n</table>\n");
	}
}

impl Control for Table {
	fn core(&self) -> &ControlCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.core
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		if ctx.request_parameter(TABLE).is_none_or(|name| Some(name) != self.name()) {
			return true;
		}
		let page = ctx.request_parameter(PAGE).map(str::to_string);
		let column = ctx.request_parameter(COLUMN).map(str::to_string);
		let ascending = ctx.request_parameter(ASCENDING).map(str::to_string);
		self.apply_request(page.as_deref(), column.as_deref(), ascending.as_deref());
		true
	}

	fn on_render(&mut self, ctx: &mut Context) {
		self.load_empty_message(ctx);
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		self.render_with(buffer, &|column, row, index, buffer| {
			column.render_cell(row, index, buffer)
		});
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::BaseColumn;
	use http::Method;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn people() -> Table {
		let mut table = Table::new("people");
		table.add_column(BaseColumn::new("name")).unwrap();
		table.add_column(BaseColumn::new("age")).unwrap();
		table.set_rows(
			[("Cy", 40), ("Ann", 31), ("Bob", 25)]
				.into_iter()
				.map(|(name, age)| json!({ "name": name, "age": age }).as_object().cloned().unwrap())
				.collect(),
		);
		table
	}

	fn names(table: &Table) -> Vec<String> {
		table.rows().iter().map(|row| row["name"].as_str().unwrap().to_string()).collect()
	}

	#[rstest]
	fn test_duplicate_column_is_rejected(mut people: Table) {
		// Act
		let result = people.add_column(BaseColumn::new("name"));

		// Assert
		assert_eq!(result, Err(TableError::DuplicateColumn("name".to_string())));
		assert_eq!(people.columns().len(), 2);
	}

	#[rstest]
	#[case("name", true, vec!["Ann", "Bob", "Cy"])]
	#[case("age", false, vec!["Cy", "Ann", "Bob"])]
	fn test_sort_by(mut people: Table, #[case] column: &str, #[case] ascending: bool, #[case] expected: Vec<&str>) {
		// Act
		people.sort_by(column, ascending).unwrap();

		// Assert
		assert_eq!(names(&people), expected);
		assert_eq!(people.sort_config().unwrap().column, column);
	}

	#[rstest]
	fn test_sort_by_unknown_column(mut people: Table) {
		assert_eq!(
			people.sort_by("email", true),
			Err(TableError::UnknownColumn("email".to_string()))
		);
	}

	#[rstest]
	fn test_paging_bounds(mut people: Table) {
		// Act
		people.set_page_size(2);
		people.set_page_number(5);

		// Assert
		assert_eq!(people.page_count(), 2);
		assert_eq!(people.page_number(), 1);
		assert_eq!((people.first_row(), people.last_row()), (2, 3));
	}

	#[rstest]
	fn test_request_parameters_apply_to_named_table(mut people: Table) {
		// Arrange
		people.set_page_size(1);
		let mut ctx = Context::builder()
			.method(Method::GET)
			.param(TABLE, "people")
			.param(COLUMN, "age")
			.param(ASCENDING, "true")
			.param(PAGE, "2")
			.build()
			.unwrap();

		// Act
		people.on_process(&mut ctx);

		// Assert
		assert_eq!(names(&people), vec!["Bob", "Ann", "Cy"]);
		assert_eq!(people.page_number(), 2);
	}

	#[rstest]
	fn test_request_for_other_table_is_ignored(mut people: Table) {
		// Arrange
		let mut ctx = Context::builder().param(TABLE, "orders").param(COLUMN, "age").build().unwrap();

		// Act
		people.on_process(&mut ctx);

		// Assert
		assert!(people.sort_config().is_none());
	}

	#[rstest]
	fn test_render_empty_table() {
		// Arrange
		let mut table = Table::new("empty");
		table.add_column(BaseColumn::new("name")).unwrap();
		let mut ctx = Context::builder().build().unwrap();
		table.on_render(&mut ctx);

		// Act
		let mut buffer = HtmlBuffer::new();
		table.render(&mut buffer);

		// Assert
		assert!(buffer.as_str().contains(r#"<td colspan="1" class="error">No records found.</td>"#));
	}

	#[rstest]
	fn test_render_marks_row_parity(mut people: Table) {
		// Arrange
		let mut buffer = HtmlBuffer::new();

		// Act
		people.render(&mut buffer);

		// Assert
		let html = buffer.as_str();
		assert!(html.starts_with(r#"<table id="people">"#));
		assert!(html.contains("<th>Name</th><th>Age</th>"));
		assert!(html.contains(r#"<tr class="odd"><td>Cy</td><td>40</td></tr>"#));
		assert!(html.contains(r#"<tr class="even"><td>Ann</td><td>31</td></tr>"#));
	}
}
