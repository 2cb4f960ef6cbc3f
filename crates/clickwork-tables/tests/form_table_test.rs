//! FormTable editing scenarios

use clickwork_forms::{Button, Control, FORM_NAME, HtmlBuffer, IntegerField, TextField};
use clickwork_http::Context;
use clickwork_tables::{BaseColumn, FieldColumn, FormTable, Row};
use http::Method;
use rstest::{fixture, rstest};
use serde_json::json;

fn row(item: &str, qty: i64) -> Row {
	json!({ "item": item, "qty": qty }).as_object().cloned().unwrap()
}

#[fixture]
fn orders() -> FormTable {
	let mut table = FormTable::new("orders");
	table.add_column(BaseColumn::new("item")).unwrap();
	table
		.add_column(FieldColumn::new("qty", |name| IntegerField::new(name).required()))
		.unwrap();
	table.set_rows(vec![row("pen", 1), row("ink", 2)]).unwrap();
	table
}

fn submit(params: &[(&str, &str)]) -> Context {
	params
		.iter()
		.fold(
			Context::builder()
				.method(Method::POST)
				.param(FORM_NAME, "orders_form"),
			|builder, (name, value)| builder.param(*name, *value),
		)
		.build()
		.unwrap()
}

#[rstest]
fn test_fields_are_loaded_from_rows(orders: FormTable) {
	// Assert
	assert_eq!(orders.form().field_value("qty_0"), Some("1"));
	assert_eq!(orders.form().field_value("qty_1"), Some("2"));
	assert!(orders.form().field("item_0").is_none());
}

#[rstest]
fn test_submission_updates_rows(mut orders: FormTable) {
	// Arrange
	let mut ctx = submit(&[("qty_0", "5"), ("qty_1", "7")]);

	// Act
	let proceed = orders.on_process(&mut ctx);

	// Assert
	assert!(proceed);
	assert_eq!(orders.rows(), &[row("pen", 5), row("ink", 7)]);
	assert!(orders.form().error().is_none());
}

#[rstest]
fn test_invalid_value_leaves_row_untouched(mut orders: FormTable) {
	// Arrange
	let mut ctx = submit(&[("qty_0", "3"), ("qty_1", "many")]);

	// Act
	orders.on_process(&mut ctx);

	// Assert
	assert_eq!(orders.rows(), &[row("pen", 3), row("ink", 2)]);
	assert_eq!(orders.form().error(), Some("Invalid values found in the table"));
	assert_eq!(
		orders.form().field("qty_1").unwrap().error(),
		Some("Qty 1 must be a whole number")
	);
}

#[rstest]
fn test_nested_property_is_written_where_it_is_read() {
	// Arrange
	let mut customers = FormTable::new("customers");
	customers
		.add_column(FieldColumn::new("city", TextField::new).with_property("address.city"))
		.unwrap();
	let customer = json!({ "name": "Ann", "address": { "city": "Oslo", "zip": "0150" } });
	customers
		.set_rows(vec![customer.as_object().cloned().unwrap()])
		.unwrap();
	let loaded = customers.form().field_value("city_0").map(str::to_string);
	let mut ctx = Context::builder()
		.method(Method::POST)
		.param(FORM_NAME, "customers_form")
		.param("city_0", "Bergen")
		.build()
		.unwrap();

	// Act
	customers.on_process(&mut ctx);

	// Assert
	assert_eq!(loaded.as_deref(), Some("Oslo"));
	let expected = json!({ "name": "Ann", "address": { "city": "Bergen", "zip": "0150" } });
	assert_eq!(customers.rows(), &[expected.as_object().cloned().unwrap()]);
}

#[rstest]
fn test_other_requests_do_not_touch_rows(mut orders: FormTable) {
	// Arrange
	let mut ctx = Context::builder().param("qty_0", "9").build().unwrap();

	// Act
	orders.on_process(&mut ctx);

	// Assert
	assert_eq!(orders.rows(), &[row("pen", 1), row("ink", 2)]);
}

#[rstest]
fn test_paging_limits_row_fields(mut orders: FormTable) {
	// Act
	orders.set_page_size(1).unwrap();
	let first_page = orders.form().field("qty_1").is_none();
	orders.set_page_number(1).unwrap();

	// Assert
	assert!(first_page);
	assert!(orders.form().field("qty_0").is_none());
	assert_eq!(orders.form().field_value("qty_1"), Some("2"));
}

#[rstest]
fn test_submitted_sort_order_addresses_displayed_rows(mut orders: FormTable) {
	// Arrange
	let mut ctx = submit(&[("column", "item"), ("ascending", "true"), ("qty_0", "4"), ("qty_1", "1")]);

	// Act
	orders.on_process(&mut ctx);

	// Assert
	assert_eq!(orders.rows(), &[row("ink", 4), row("pen", 1)]);
}

#[rstest]
fn test_render_wraps_table_in_form(mut orders: FormTable) {
	// Arrange
	orders.add_button(Button::submit("save")).unwrap();
	let mut ctx = Context::builder().build().unwrap();
	orders.on_init(&mut ctx);
	orders.on_render(&mut ctx);

	// Act
	let mut buffer = HtmlBuffer::new();
	orders.render(&mut buffer);
	let html = buffer.into_string();

	// Assert
	assert!(html.starts_with(r#"<form method="post" name="orders_form" id="orders_form">"#));
	assert!(html.contains(r#"<input type="hidden" name="page" id="orders_form_page" value="0"/>"#));
	assert!(html.contains(r#"<td>pen</td>"#));
	assert!(html.contains(r#"name="qty_0" id="orders_form_qty_0""#));
	assert!(html.contains(r#"<table class="buttons" id="orders-buttons">"#));
	assert!(html.trim_end().ends_with("</form>"));
}

#[rstest]
fn test_render_can_reload_row_values(mut orders: FormTable) {
	// Arrange
	orders.set_render_submitted_values(false);
	let mut ctx = submit(&[("qty_0", "8"), ("qty_1", "oops")]);
	orders.on_process(&mut ctx);

	// Act
	orders.on_render(&mut ctx);

	// Assert
	assert_eq!(orders.form().field_value("qty_0"), Some("8"));
	assert_eq!(orders.form().field_value("qty_1"), Some("2"));
}
