//! Property paths over bean object graphs.
//!
//! A [`Bean`] publishes a static [`BeanDescriptor`] listing its properties
//! and how to reach them. Descriptors are normally generated with
//! [`impl_bean!`](crate::impl_bean). [`PropertyAccessor`] walks dot-separated
//! paths such as `address.city` through those descriptors.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::error::{PropertyError, PropertyResult};

/// An object whose properties can be reached by name
pub trait Bean: Any {
	fn descriptor(&self) -> &'static BeanDescriptor;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub type ValueGetter = fn(&dyn Bean) -> PropertyResult<Value>;
pub type ValueSetter = fn(&mut dyn Bean, Value) -> PropertyResult<()>;
pub type NestedGetter = fn(&dyn Bean) -> PropertyResult<Option<&dyn Bean>>;
/// Mutable access to a nested bean; `true` asks for a missing one to be created
pub type NestedGetterMut = fn(&mut dyn Bean, bool) -> PropertyResult<Option<&mut dyn Bean>>;

/// How a property is read and written
#[derive(Clone, Copy)]
pub enum PropertyKind {
	/// A serializable value
	Value { get: ValueGetter, set: ValueSetter },
	/// Another bean, navigated into by the remaining path
	Nested {
		get: NestedGetter,
		get_mut: NestedGetterMut,
	},
}

/// One named property of a bean type
#[derive(Clone, Copy)]
pub struct PropertyDescriptor {
	name: &'static str,
	kind: PropertyKind,
}

impl PropertyDescriptor {
	pub fn value(name: &'static str, get: ValueGetter, set: ValueSetter) -> Self {
		Self {
			name,
			kind: PropertyKind::Value { get, set },
		}
	}

	pub fn nested(name: &'static str, get: NestedGetter, get_mut: NestedGetterMut) -> Self {
		Self {
			name,
			kind: PropertyKind::Nested { get, get_mut },
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn kind(&self) -> &PropertyKind {
		&self.kind
	}

	pub fn is_nested(&self) -> bool {
		matches!(self.kind, PropertyKind::Nested { .. })
	}
}

impl fmt::Debug for PropertyDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyDescriptor")
			.field("name", &self.name)
			.field("nested", &self.is_nested())
			.finish()
	}
}

/// The properties of one bean type
#[derive(Debug)]
pub struct BeanDescriptor {
	type_name: &'static str,
	properties: Vec<PropertyDescriptor>,
}

impl BeanDescriptor {
	pub fn new(type_name: &'static str, properties: Vec<PropertyDescriptor>) -> Self {
		Self {
			type_name,
			properties,
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn properties(&self) -> &[PropertyDescriptor] {
		&self.properties
	}

	pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
		self.properties.iter().find(|property| property.name == name)
	}
}

#[doc(hidden)]
pub fn downcast_bean<B: Bean>(bean: &dyn Bean) -> PropertyResult<&B> {
	let type_name = bean.descriptor().type_name();
	bean.as_any()
		.downcast_ref::<B>()
		.ok_or_else(|| foreign_descriptor(type_name))
}

#[doc(hidden)]
pub fn downcast_bean_mut<B: Bean>(bean: &mut dyn Bean) -> PropertyResult<&mut B> {
	let type_name = bean.descriptor().type_name();
	bean.as_any_mut()
		.downcast_mut::<B>()
		.ok_or_else(|| foreign_descriptor(type_name))
}

fn foreign_descriptor(type_name: &str) -> PropertyError {
	PropertyError::TypeMismatch {
		property: type_name.to_string(),
		reason: "descriptor belongs to another bean type".to_string(),
	}
}

#[doc(hidden)]
pub fn to_value<T: Serialize>(property: &str, value: &T) -> PropertyResult<Value> {
	serde_json::to_value(value).map_err(|error| PropertyError::TypeMismatch {
		property: property.to_string(),
		reason: error.to_string(),
	})
}

#[doc(hidden)]
pub fn from_value<T: DeserializeOwned>(property: &str, value: Value) -> PropertyResult<T> {
	// An empty field reads as null; text properties take it as "".
	let result = match value {
		Value::Null => serde_json::from_value(Value::Null)
			.or_else(|_| serde_json::from_value(Value::String(String::new()))),
		value => serde_json::from_value(value),
	};
	result.map_err(|error| PropertyError::TypeMismatch {
		property: property.to_string(),
		reason: error.to_string(),
	})
}

/// Implement [`Bean`](crate::property::Bean) for a struct.
///
/// Each property is declared with its kind:
///
/// - `value name`: a field of any serde-serializable type
/// - `nested name`: an `Option<T>` of another bean, created with
///   `T::default()` when a path is written through it
/// - `embedded name`: a field holding another bean directly
///
/// # Examples
///
/// ```
/// use clickwork_forms::{impl_bean, PropertyAccessor};
/// use serde_json::json;
///
/// #[derive(Default)]
/// struct Address {
/// 	city: String,
/// }
///
/// #[derive(Default)]
/// struct Customer {
/// 	name: String,
/// 	address: Option<Address>,
/// }
///
/// impl_bean!(Address { value city });
/// impl_bean!(Customer { value name, nested address });
///
/// let mut customer = Customer::default();
/// let mut accessor = PropertyAccessor::new();
/// accessor.set(&mut customer, "address.city", json!("Oslo")).unwrap();
/// assert_eq!(customer.address.unwrap().city, "Oslo");
/// ```
#[macro_export]
macro_rules! impl_bean {
	($ty:ty { $($kind:ident $prop:ident),* $(,)? }) => {
		impl $crate::property::Bean for $ty {
			fn descriptor(&self) -> &'static $crate::property::BeanDescriptor {
				static DESCRIPTOR: ::std::sync::LazyLock<$crate::property::BeanDescriptor> =
					::std::sync::LazyLock::new(|| {
						$crate::property::BeanDescriptor::new(
							stringify!($ty),
							vec![$($crate::impl_bean!(@property $ty, $kind $prop)),*],
						)
					});
				&DESCRIPTOR
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}
		}
	};
	(@property $ty:ty, value $prop:ident) => {
		$crate::property::PropertyDescriptor::value(
			stringify!($prop),
			|bean| {
				let this = $crate::property::downcast_bean::<$ty>(bean)?;
				$crate::property::to_value(stringify!($prop), &this.$prop)
			},
			|bean, value| {
				let this = $crate::property::downcast_bean_mut::<$ty>(bean)?;
				this.$prop = $crate::property::from_value(stringify!($prop), value)?;
				Ok(())
			},
		)
	};
	(@property $ty:ty, nested $prop:ident) => {
		$crate::property::PropertyDescriptor::nested(
			stringify!($prop),
			|bean| {
				let this = $crate::property::downcast_bean::<$ty>(bean)?;
				Ok(this
					.$prop
					.as_ref()
					.map(|inner| inner as &dyn $crate::property::Bean))
			},
			|bean, create| {
				let this = $crate::property::downcast_bean_mut::<$ty>(bean)?;
				if create && this.$prop.is_none() {
					this.$prop = Some(::std::default::Default::default());
				}
				Ok(this
					.$prop
					.as_mut()
					.map(|inner| inner as &mut dyn $crate::property::Bean))
			},
		)
	};
	(@property $ty:ty, embedded $prop:ident) => {
		$crate::property::PropertyDescriptor::nested(
			stringify!($prop),
			|bean| {
				let this = $crate::property::downcast_bean::<$ty>(bean)?;
				Ok(Some(&this.$prop as &dyn $crate::property::Bean))
			},
			|bean, _create| {
				let this = $crate::property::downcast_bean_mut::<$ty>(bean)?;
				Ok(Some(&mut this.$prop as &mut dyn $crate::property::Bean))
			},
		)
	};
}

fn split_path(path: &str) -> (&str, Option<&str>) {
	match path.split_once('.') {
		Some((head, rest)) => (head, Some(rest)),
		None => (path, None),
	}
}

/// Reads and writes property paths, memoizing resolved properties.
///
/// An accessor is meant to live for one binding operation.
#[derive(Debug, Default)]
pub struct PropertyAccessor {
	cache: HashMap<TypeId, HashMap<String, &'static PropertyDescriptor>>,
}

impl PropertyAccessor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of memoized `(type, property)` resolutions
	pub fn cached(&self) -> usize {
		self.cache.values().map(HashMap::len).sum()
	}

	fn resolve(&mut self, bean: &dyn Bean, name: &str) -> PropertyResult<&'static PropertyDescriptor> {
		let descriptor = bean.descriptor();
		let type_id = bean.as_any().type_id();
		if let Some(property) = self.cache.get(&type_id).and_then(|names| names.get(name).copied()) {
			return Ok(property);
		}
		let property = descriptor
			.property(name)
			.ok_or_else(|| PropertyError::NoAccessor {
				type_name: descriptor.type_name(),
				property: name.to_string(),
			})?;
		self.cache
			.entry(type_id)
			.or_default()
			.insert(name.to_string(), property);
		Ok(property)
	}

	/// Whether the first segment of `path` names a property of `target`
	pub fn has_property(&mut self, target: &dyn Bean, path: &str) -> bool {
		let (head, _) = split_path(path);
		self.resolve(target, head).is_ok()
	}

	/// Read the value at `path`.
	///
	/// An unset nested bean along the path reads as `Null`.
	pub fn get(&mut self, target: &dyn Bean, path: &str) -> PropertyResult<Value> {
		let (head, rest) = split_path(path);
		let property = self.resolve(target, head)?;
		match (property.kind(), rest) {
			(PropertyKind::Value { get, .. }, None) => get(target),
			(PropertyKind::Value { get, .. }, Some(rest)) => match get(target)? {
				Value::Object(map) => Ok(map.get(rest).cloned().unwrap_or(Value::Null)),
				Value::Null => Ok(Value::Null),
				_ => Err(PropertyError::NotNested {
					type_name: target.descriptor().type_name(),
					property: head.to_string(),
					remaining: rest.to_string(),
				}),
			},
			(PropertyKind::Nested { get, .. }, Some(rest)) => match get(target)? {
				Some(inner) => self.get(inner, rest),
				None => Ok(Value::Null),
			},
			(PropertyKind::Nested { .. }, None) => Err(whole_bean(head)),
		}
	}

	/// Write `value` at `path`.
	///
	/// Unset nested beans along the path are created first. A map-valued
	/// property takes the rest of the path as a single key.
	pub fn set(&mut self, target: &mut dyn Bean, path: &str, value: Value) -> PropertyResult<()> {
		let (head, rest) = split_path(path);
		let property = self.resolve(target, head)?;
		match (property.kind(), rest) {
			(PropertyKind::Value { set, .. }, None) => set(target, value),
			(PropertyKind::Value { get, set }, Some(rest)) => {
				let mut current = get(&*target)?;
				if current.is_null() {
					current = Value::Object(Map::new());
				}
				match &mut current {
					Value::Object(map) => {
						map.insert(rest.to_string(), value);
					}
					_ => {
						return Err(PropertyError::NotNested {
							type_name: target.descriptor().type_name(),
							property: head.to_string(),
							remaining: rest.to_string(),
						});
					}
				}
				set(target, current)
			}
			(PropertyKind::Nested { get, get_mut }, Some(rest)) => {
				let type_name = target.descriptor().type_name();
				if get(&*target)?.is_none() {
					tracing::debug!(bean = type_name, property = head, "instantiating null intermediate");
				}
				match get_mut(target, true)? {
					Some(inner) => self.set(inner, rest, value),
					None => Err(PropertyError::NullIntermediate {
						type_name,
						property: head.to_string(),
					}),
				}
			}
			(PropertyKind::Nested { .. }, None) => Err(whole_bean(head)),
		}
	}

	/// Read `path` from a map target, using the whole path as the key
	pub fn map_get(map: &Map<String, Value>, path: &str) -> Value {
		map.get(path).cloned().unwrap_or(Value::Null)
	}

	/// Write `path` into a map target; no intermediate maps are created
	pub fn map_set(map: &mut Map<String, Value>, path: &str, value: Value) {
		map.insert(path.to_string(), value);
	}
}

fn whole_bean(property: &str) -> PropertyError {
	PropertyError::TypeMismatch {
		property: property.to_string(),
		reason: "a nested bean cannot be read or written as a single value".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[derive(Debug, Default, PartialEq)]
	struct Address {
		street: String,
		city: String,
	}

	#[derive(Debug, Default)]
	struct Audit {
		revision: u32,
	}

	#[derive(Debug, Default)]
	struct Customer {
		name: String,
		age: Option<u32>,
		active: bool,
		address: Option<Address>,
		audit: Audit,
		extra: Value,
	}

	impl_bean!(Address { value street, value city });
	impl_bean!(Audit { value revision });
	impl_bean!(Customer {
		value name,
		value age,
		value active,
		nested address,
		embedded audit,
		value extra,
	});

	mod billing {
		#[derive(Debug, Default)]
		pub struct Address {
			pub street: String,
		}

		impl_bean!(Address { value street });
	}

	mod shipping {
		#[derive(Debug, Default)]
		pub struct Address {
			pub street: String,
			pub dock: u32,
		}

		impl_bean!(Address { value street, value dock });
	}

	#[derive(Debug, Default)]
	struct Order {
		billing: Option<billing::Address>,
		shipping: Option<shipping::Address>,
	}

	impl_bean!(Order { nested billing, nested shipping });

	#[fixture]
	fn customer() -> Customer {
		Customer {
			name: "Ann".to_string(),
			age: Some(31),
			..Customer::default()
		}
	}

	#[rstest]
	#[case("name", json!("Ann"))]
	#[case("age", json!(31))]
	#[case("active", json!(false))]
	#[case("address.city", Value::Null)]
	#[case("audit.revision", json!(0))]
	#[case("extra.note", Value::Null)]
	fn test_get(customer: Customer, #[case] path: &str, #[case] expected: Value) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		let value = accessor.get(&customer, path).unwrap();

		// Assert
		assert_eq!(value, expected);
	}

	#[rstest]
	fn test_set_vivifies_nested_bean(mut customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		accessor.set(&mut customer, "address.street", json!("1 Main St")).unwrap();
		accessor.set(&mut customer, "address.city", json!("Oslo")).unwrap();

		// Assert
		assert_eq!(
			customer.address,
			Some(Address {
				street: "1 Main St".to_string(),
				city: "Oslo".to_string(),
			})
		);
	}

	#[rstest]
	fn test_set_map_valued_property_uses_rest_as_key(mut customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		accessor.set(&mut customer, "extra.note.text", json!("vip")).unwrap();

		// Assert
		assert_eq!(customer.extra, json!({ "note.text": "vip" }));
		assert_eq!(accessor.get(&customer, "extra.note.text").unwrap(), json!("vip"));
	}

	#[rstest]
	fn test_unknown_property(customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		let result = accessor.get(&customer, "email");

		// Assert
		assert_eq!(
			result,
			Err(PropertyError::NoAccessor {
				type_name: "Customer",
				property: "email".to_string(),
			})
		);
	}

	#[rstest]
	fn test_plain_value_is_not_nested(mut customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		let result = accessor.set(&mut customer, "name.first", json!("A"));

		// Assert
		assert!(matches!(result, Err(PropertyError::NotNested { .. })));
		assert_eq!(customer.name, "Ann");
	}

	#[rstest]
	fn test_type_mismatch(mut customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		let wrong_type = accessor.set(&mut customer, "age", json!("old"));
		let whole_bean = accessor.get(&customer, "address");

		// Assert
		assert!(matches!(wrong_type, Err(PropertyError::TypeMismatch { .. })));
		assert!(matches!(whole_bean, Err(PropertyError::TypeMismatch { .. })));
	}

	#[rstest]
	fn test_null_clears_text_and_optional_values(mut customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		accessor.set(&mut customer, "name", Value::Null).unwrap();
		accessor.set(&mut customer, "age", Value::Null).unwrap();
		let flag = accessor.set(&mut customer, "active", Value::Null);

		// Assert
		assert_eq!(customer.name, "");
		assert_eq!(customer.age, None);
		assert!(matches!(flag, Err(PropertyError::TypeMismatch { .. })));
	}

	#[rstest]
	fn test_same_named_beans_resolve_separately() {
		// Arrange
		let mut order = Order::default();
		let mut accessor = PropertyAccessor::new();

		// Act
		accessor.set(&mut order, "billing.street", json!("1 Main St")).unwrap();
		accessor.set(&mut order, "shipping.street", json!("2 Quay Rd")).unwrap();
		accessor.set(&mut order, "shipping.dock", json!(4)).unwrap();

		// Assert
		assert_eq!(order.billing.unwrap().street, "1 Main St");
		let shipping = order.shipping.unwrap();
		assert_eq!(shipping.street, "2 Quay Rd");
		assert_eq!(shipping.dock, 4);
		assert_eq!(accessor.cached(), 5);
	}

	#[rstest]
	fn test_resolutions_are_memoized(customer: Customer) {
		// Arrange
		let mut accessor = PropertyAccessor::new();

		// Act
		accessor.get(&customer, "name").unwrap();
		accessor.get(&customer, "name").unwrap();
		accessor.get(&customer, "audit.revision").unwrap();

		// Assert
		assert_eq!(accessor.cached(), 3);
	}

	#[rstest]
	fn test_map_target_uses_whole_path() {
		// Arrange
		let mut map = Map::new();

		// Act
		PropertyAccessor::map_set(&mut map, "address.city", json!("Oslo"));

		// Assert
		assert_eq!(map.get("address.city"), Some(&json!("Oslo")));
		assert!(map.get("address").is_none());
		assert_eq!(PropertyAccessor::map_get(&map, "address.city"), json!("Oslo"));
	}
}
