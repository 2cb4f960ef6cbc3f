//! Copying form values to and from maps and beans

use clickwork_forms::{
	BindingError, Checkbox, Container, FieldSet, Form, IntegerField, PropertyError, TextField, impl_bean,
};
use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};

#[derive(Debug, Default, PartialEq)]
struct Address {
	street: String,
	city: String,
}

#[derive(Debug, Default, PartialEq)]
struct Customer {
	name: String,
	age: Option<i64>,
	active: bool,
	address: Option<Address>,
}

impl_bean!(Address { value street, value city });
impl_bean!(Customer {
	value name,
	value age,
	value active,
	nested address,
});

#[fixture]
fn customer_form() -> Form {
	let mut form = Form::new("customer");
	form.add(TextField::new("name")).unwrap();
	form.add(IntegerField::new("age")).unwrap();
	form.add(Checkbox::new("active")).unwrap();
	let mut address = FieldSet::new("address_set");
	address.add(TextField::new("address.street")).unwrap();
	address.add(TextField::new("address.city")).unwrap();
	form.add(address).unwrap();
	form
}

#[rstest]
fn test_copy_to_map_skips_unseeded_paths() {
	// Arrange
	let mut form = Form::new("customer");
	form.add(TextField::new("name").with_value("Ann")).unwrap();
	form.add(TextField::new("address.street").with_value("Main St")).unwrap();
	let mut target = Map::new();

	// Act
	form.copy_to(&mut target).unwrap();

	// Assert
	assert_eq!(target.get("name"), Some(&json!("Ann")));
	assert!(!target.contains_key("address.street"));
	assert!(!target.contains_key("form_name"));
}

#[rstest]
fn test_copy_to_map_writes_seeded_paths() {
	// Arrange
	let mut form = Form::new("customer");
	form.add(TextField::new("address.street").with_value("Main St")).unwrap();
	let mut target = Map::new();
	target.insert("address.street".to_string(), Value::Null);

	// Act
	form.copy_to(&mut target).unwrap();

	// Assert
	assert_eq!(target.get("address.street"), Some(&json!("Main St")));
}

#[rstest]
fn test_copy_from_map_leaves_missing_keys(mut customer_form: Form) {
	// Arrange
	customer_form.field_mut("address.city").unwrap().set_value("Oslo");
	let source: Map<String, Value> = json!({ "name": "Bob", "age": 41 })
		.as_object()
		.cloned()
		.unwrap();

	// Act
	customer_form.copy_from(&source).unwrap();

	// Assert
	assert_eq!(customer_form.field_value("name"), Some("Bob"));
	assert_eq!(customer_form.field_value("age"), Some("41"));
	assert_eq!(customer_form.field_value("address.city"), Some("Oslo"));
}

#[rstest]
fn test_copy_to_bean_creates_nested_address(mut customer_form: Form) {
	// Arrange
	customer_form.field_mut("name").unwrap().set_value("Ann");
	customer_form.field_mut("age").unwrap().set_value("33");
	customer_form.field_mut("active").unwrap().set_value("true");
	customer_form.field_mut("address.city").unwrap().set_value("Oslo");
	let mut customer = Customer::default();

	// Act
	customer_form.copy_to(&mut customer).unwrap();

	// Assert
	assert_eq!(
		customer,
		Customer {
			name: "Ann".to_string(),
			age: Some(33),
			active: true,
			address: Some(Address {
				street: String::new(),
				city: "Oslo".to_string(),
			}),
		}
	);
}

#[rstest]
fn test_copy_from_bean_reads_nested_paths(mut customer_form: Form) {
	// Arrange
	let customer = Customer {
		name: "Eve".to_string(),
		age: None,
		active: true,
		address: Some(Address {
			street: "High St".to_string(),
			city: "Bergen".to_string(),
		}),
	};

	// Act
	customer_form.copy_from(&customer).unwrap();

	// Assert
	assert_eq!(customer_form.field_value("name"), Some("Eve"));
	assert_eq!(customer_form.field_value("age"), Some(""));
	assert_eq!(customer_form.field_value("address.street"), Some("High St"));
	assert_eq!(customer_form.field_value("address.city"), Some("Bergen"));
}

#[rstest]
fn test_copy_from_bean_without_nested_value_clears_fields(mut customer_form: Form) {
	// Arrange
	customer_form.field_mut("address.city").unwrap().set_value("Oslo");
	let customer = Customer::default();

	// Act
	customer_form.copy_from(&customer).unwrap();

	// Assert
	assert_eq!(customer_form.field_value("address.city"), Some(""));
}

#[rstest]
fn test_copy_to_bean_skips_unknown_properties() {
	// Arrange
	let mut form = Form::new("customer");
	form.add(TextField::new("nickname").with_value("annie")).unwrap();
	form.add(TextField::new("name").with_value("Ann")).unwrap();
	let mut customer = Customer::default();

	// Act
	form.copy_to(&mut customer).unwrap();

	// Assert
	assert_eq!(customer.name, "Ann");
}

#[rstest]
fn test_copy_to_bean_reports_every_failure() {
	// Arrange
	let mut form = Form::new("customer");
	form.add(TextField::new("age").with_value("old")).unwrap();
	form.add(TextField::new("active").with_value("maybe")).unwrap();
	form.add(TextField::new("name").with_value("Ann")).unwrap();
	let mut customer = Customer::default();

	// Act
	let result = form.copy_to(&mut customer);

	// Assert
	let Err(BindingError::Failed(errors)) = result else {
		panic!("expected collected failures, got {result:?}");
	};
	assert_eq!(errors.len(), 2);
	assert!(errors.iter().all(|error| matches!(
		error,
		BindingError::Property {
			source: PropertyError::TypeMismatch { .. },
			..
		}
	)));
	assert_eq!(customer.name, "Ann");
}

#[rstest]
fn test_single_failure_is_returned_directly() {
	// Arrange
	let mut form = Form::new("customer");
	form.add(TextField::new("age").with_value("old")).unwrap();
	let mut customer = Customer::default();

	// Act
	let result = form.copy_to(&mut customer);

	// Assert
	assert!(matches!(result, Err(BindingError::Property { ref field, .. }) if field == "age"));
}
