//! Base column implementation

use clickwork_forms::HtmlBuffer;
use serde_json::Value;
use std::fmt::Debug;

use super::{Column, Row, row_value};

type Decorator = Box<dyn Fn(&Row, usize) -> String + Send + Sync>;

/// A column displaying one row property
///
/// # Example
///
/// ```rust
/// use clickwork_tables::column::{BaseColumn, Column};
/// use serde_json::json;
///
/// let city = BaseColumn::new("city")
///     .with_header("Home town")
///     .with_property("address.city");
///
/// let row = json!({ "address": { "city": "Oslo" } });
/// assert_eq!(city.header(), "Home town");
/// assert_eq!(city.value(row.as_object().unwrap()), json!("Oslo"));
/// ```
pub struct BaseColumn {
	name: String,
	header: Option<String>,
	property: Option<String>,
	decorator: Option<Decorator>,
	sortable: bool,
	css_classes: String,
}

impl BaseColumn {
	/// Creates a column showing the row property named `name`
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			header: None,
			property: None,
			decorator: None,
			sortable: true,
			css_classes: String::new(),
		}
	}

	/// Sets the header text; defaults to a label derived from the name
	pub fn with_header(mut self, header: impl Into<String>) -> Self {
		self.header = Some(header.into());
		self
	}

	/// Reads the value from `property` instead of the column name
	pub fn with_property(mut self, property: impl Into<String>) -> Self {
		self.property = Some(property.into());
		self
	}

	/// Renders cells with `decorator`, whose output is written unescaped
	pub fn with_decorator<F>(mut self, decorator: F) -> Self
	where
		F: Fn(&Row, usize) -> String + Send + Sync + 'static,
	{
		self.decorator = Some(Box::new(decorator));
		self
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets CSS classes for this column
	pub fn css_classes(mut self, css_classes: impl Into<String>) -> Self {
		self.css_classes = css_classes.into();
		self
	}
}

impl Debug for BaseColumn {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BaseColumn")
			.field("name", &self.name)
			.field("header", &self.header)
			.field("property", &self.property)
			.field("decorator", &self.decorator.is_some())
			.field("sortable", &self.sortable)
			.field("css_classes", &self.css_classes)
			.finish()
	}
}

impl Column for BaseColumn {
	fn name(&self) -> &str {
		&self.name
	}

	fn header(&self) -> String {
		match &self.header {
			Some(header) => header.clone(),
			None => clickwork_forms::field::label_from_name(&self.name),
		}
	}

	fn property(&self) -> &str {
		self.property.as_deref().unwrap_or(&self.name)
	}

	fn value(&self, row: &Row) -> Value {
		row_value(row, self.property())
	}

	fn render_cell(&self, row: &Row, index: usize, buffer: &mut HtmlBuffer) {
		match &self.decorator {
			Some(decorator) => {
				buffer.append(&decorator(row, index));
			}
			None => {
				buffer.append_escaped(&super::display_text(&self.value(row)));
			}
		}
	}

	fn sortable(&self) -> bool {
		self.sortable
	}

	fn css_classes(&self) -> &str {
		&self.css_classes
	}
}
