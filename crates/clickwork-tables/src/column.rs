//! Table columns

mod base;
mod field;

pub use base::BaseColumn;
pub use field::FieldColumn;

use clickwork_forms::HtmlBuffer;
use clickwork_forms::field::label_from_name;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt::Debug;

/// A table row: property names to values
pub type Row = Map<String, Value>;

/// Trait for table column definitions
///
/// A column reads one property of each row and renders it as a cell.
pub trait Column: Debug + Send {
	/// Returns the name of this column
	///
	/// This is used as the identifier for sorting
	fn name(&self) -> &str;

	/// Returns the header text for this column
	fn header(&self) -> String {
		label_from_name(self.name())
	}

	/// Path of the row property displayed by this column
	fn property(&self) -> &str {
		self.name()
	}

	/// The row value shown in this column
	fn value(&self, row: &Row) -> Value {
		row_value(row, self.property())
	}

	/// Renders the cell content for the row at `index`
	fn render_cell(&self, row: &Row, _index: usize, buffer: &mut HtmlBuffer) {
		buffer.append_escaped(&display_text(&self.value(row)));
	}

	/// Returns whether this column can be sorted
	///
	/// Default: true
	fn sortable(&self) -> bool {
		true
	}

	/// Returns CSS classes to apply to cells in this column
	///
	/// Default: empty string
	fn css_classes(&self) -> &str {
		""
	}

	/// The column as a field column, when it edits its values
	fn as_field_column(&self) -> Option<&FieldColumn> {
		None
	}
}

/// Read `path` from `row`.
///
/// A key equal to the whole path wins; otherwise the segments are followed
/// through nested objects. Missing values read as `Null`.
///
/// # Examples
///
/// ```
/// use clickwork_tables::column::row_value;
/// use serde_json::json;
///
/// let row = json!({ "address": { "city": "Oslo" } });
/// let row = row.as_object().unwrap();
/// assert_eq!(row_value(row, "address.city"), json!("Oslo"));
/// assert_eq!(row_value(row, "address.zip"), json!(null));
/// ```
pub fn row_value(row: &Row, path: &str) -> Value {
	if let Some(value) = row.get(path) {
		return value.clone();
	}
	let mut segments = path.split('.');
	let Some(first) = segments.next() else {
		return Value::Null;
	};
	let mut current = row.get(first);
	for segment in segments {
		current = current.and_then(|value| value.get(segment));
	}
	current.cloned().unwrap_or(Value::Null)
}

/// Write `value` to `path` in `row`, the way [`row_value`] reads it.
///
/// An existing key equal to the whole path, or a path without segments, is
/// written directly. Otherwise the segments are followed through nested
/// objects, creating any that are missing.
///
/// # Examples
///
/// ```
/// use clickwork_tables::column::{row_value, set_row_value};
/// use serde_json::json;
///
/// let mut row = json!({ "address": { "city": "Oslo" } }).as_object().cloned().unwrap();
/// set_row_value(&mut row, "address.city", json!("Bergen"));
/// assert_eq!(row_value(&row, "address.city"), json!("Bergen"));
/// assert!(!row.contains_key("address.city"));
/// ```
pub fn set_row_value(row: &mut Row, path: &str, value: Value) {
	if row.contains_key(path) {
		row.insert(path.to_string(), value);
		return;
	}
	let Some((parents, last)) = path.rsplit_once('.') else {
		row.insert(path.to_string(), value);
		return;
	};
	let mut current = row;
	for segment in parents.split('.') {
		let slot = current
			.entry(segment)
			.or_insert_with(|| Value::Object(Map::new()));
		if !slot.is_object() {
			*slot = Value::Object(Map::new());
		}
		let Value::Object(nested) = slot else {
			return;
		};
		current = nested;
	}
	current.insert(last.to_string(), value);
}

/// Text shown for a cell value
pub fn display_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

/// Ordering used when sorting rows by a column
pub(crate) fn compare_values(left: &Value, right: &Value) -> Ordering {
	match (left, right) {
		(Value::Null, Value::Null) => Ordering::Equal,
		(Value::Null, _) => Ordering::Less,
		(_, Value::Null) => Ordering::Greater,
		(Value::Number(a), Value::Number(b)) => a
			.as_f64()
			.zip(b.as_f64())
			.and_then(|(a, b)| a.partial_cmp(&b))
			.unwrap_or(Ordering::Equal),
		(Value::String(a), Value::String(b)) => a.cmp(b),
		(Value::Bool(a), Value::Bool(b)) => a.cmp(b),
		(a, b) => a.to_string().cmp(&b.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), json!(1), Ordering::Less)]
	#[case(json!(2), json!(10), Ordering::Less)]
	#[case(json!(2.5), json!(2), Ordering::Greater)]
	#[case(json!("b"), json!("a"), Ordering::Greater)]
	#[case(json!(true), json!(true), Ordering::Equal)]
	fn test_compare_values(#[case] left: Value, #[case] right: Value, #[case] expected: Ordering) {
		assert_eq!(compare_values(&left, &right), expected);
	}

	#[rstest]
	fn test_flat_key_wins_over_nested_path() {
		// Arrange
		let row = json!({ "a.b": 1, "a": { "b": 2 } });

		// Act
		let value = row_value(row.as_object().unwrap(), "a.b");

		// Assert
		assert_eq!(value, json!(1));
	}

	#[rstest]
	#[case(json!({ "a": { "b": 2, "c": 3 } }), json!({ "a": { "b": 9, "c": 3 } }))]
	#[case(json!({ "a.b": 1, "a": { "b": 2 } }), json!({ "a.b": 9, "a": { "b": 2 } }))]
	#[case(json!({}), json!({ "a": { "b": 9 } }))]
	#[case(json!({ "a": null }), json!({ "a": { "b": 9 } }))]
	fn test_set_row_value_follows_read_path(#[case] row: Value, #[case] expected: Value) {
		// Arrange
		let mut row = row.as_object().cloned().unwrap();

		// Act
		set_row_value(&mut row, "a.b", json!(9));

		// Assert
		assert_eq!(Value::Object(row.clone()), expected);
		assert_eq!(row_value(&row, "a.b"), json!(9));
	}

	#[rstest]
	#[case(json!(null), "")]
	#[case(json!("x"), "x")]
	#[case(json!(3), "3")]
	#[case(json!(false), "false")]
	fn test_display_text(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(display_text(&value), expected);
	}
}
