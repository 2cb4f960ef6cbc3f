//! Copying field values to and from maps and beans

use serde_json::{Map, Value};

use crate::container::Container;
use crate::container_utils::{for_each_input_field_mut, input_fields};
use crate::error::{BindingError, BindingResult, PropertyResult};
use crate::form::is_housekeeping_field;
use crate::property::{Bean, PropertyAccessor};

/// Something field values can be copied to and from by property path
pub trait PropertyTarget {
	/// Name used in log messages
	fn target_name(&self) -> &'static str;

	fn can_read(&self, accessor: &mut PropertyAccessor, path: &str) -> bool;

	fn can_write(&self, accessor: &mut PropertyAccessor, path: &str) -> bool;

	fn read(&self, accessor: &mut PropertyAccessor, path: &str) -> PropertyResult<Value>;

	fn write(&mut self, accessor: &mut PropertyAccessor, path: &str, value: Value) -> PropertyResult<()>;
}

/// Maps are flat: a path is one key, and dotted paths are only written to
/// keys that already exist.
impl PropertyTarget for Map<String, Value> {
	fn target_name(&self) -> &'static str {
		"Map"
	}

	fn can_read(&self, _accessor: &mut PropertyAccessor, path: &str) -> bool {
		self.contains_key(path)
	}

	fn can_write(&self, _accessor: &mut PropertyAccessor, path: &str) -> bool {
		!path.contains('.') || self.contains_key(path)
	}

	fn read(&self, _accessor: &mut PropertyAccessor, path: &str) -> PropertyResult<Value> {
		Ok(PropertyAccessor::map_get(self, path))
	}

	fn write(&mut self, _accessor: &mut PropertyAccessor, path: &str, value: Value) -> PropertyResult<()> {
		PropertyAccessor::map_set(self, path, value);
		Ok(())
	}
}

impl<T: Bean> PropertyTarget for T {
	fn target_name(&self) -> &'static str {
		self.descriptor().type_name()
	}

	fn can_read(&self, accessor: &mut PropertyAccessor, path: &str) -> bool {
		accessor.has_property(self, path)
	}

	fn can_write(&self, accessor: &mut PropertyAccessor, path: &str) -> bool {
		accessor.has_property(self, path)
	}

	fn read(&self, accessor: &mut PropertyAccessor, path: &str) -> PropertyResult<Value> {
		accessor.get(self, path)
	}

	fn write(&mut self, accessor: &mut PropertyAccessor, path: &str, value: Value) -> PropertyResult<()> {
		accessor.set(self, path, value)
	}
}

/// Copy the value objects of the input fields below `container` into `target`.
///
/// Fields whose name is not a writable path of the target are skipped.
/// Every field is attempted; failures are returned together.
pub fn copy_to<T: PropertyTarget + ?Sized>(
	container: &dyn Container,
	source: &str,
	target: &mut T,
) -> BindingResult<()> {
	let mut accessor = PropertyAccessor::new();
	let mut errors = Vec::new();
	for field in input_fields(container) {
		let path = field.field().name();
		if is_housekeeping_field(path) {
			continue;
		}
		if !target.can_write(&mut accessor, path) {
			tracing::debug!(source, target = target.target_name(), path, "no writable property, skipped");
			continue;
		}
		let value = field.value_object();
		tracing::debug!("{source} -> {}.{path} : {value}", target.target_name());
		if let Err(error) = target.write(&mut accessor, path, value) {
			tracing::debug!(path, %error, "copy to target failed");
			errors.push(BindingError::Property {
				field: path.to_string(),
				source: error,
			});
		}
	}
	BindingError::collect(errors)
}

/// Populate the input fields below `container` from `target`.
///
/// Fields without a readable path in the target keep their value.
pub fn copy_from<T: PropertyTarget + ?Sized>(
	container: &mut dyn Container,
	source: &str,
	target: &T,
) -> BindingResult<()> {
	let mut accessor = PropertyAccessor::new();
	let mut errors = Vec::new();
	for_each_input_field_mut(container, &mut |field| {
		let path = field.field().name().to_string();
		if is_housekeeping_field(&path) || !target.can_read(&mut accessor, &path) {
			return;
		}
		let value = match target.read(&mut accessor, &path) {
			Ok(value) => value,
			Err(error) => {
				tracing::debug!(path, %error, "read from target failed");
				errors.push(BindingError::Property {
					field: path,
					source: error,
				});
				return;
			}
		};
		tracing::debug!("{source} <- {}.{path} : {value}", target.target_name());
		if let Err(error) = field.set_value_object(&value) {
			tracing::debug!(path, %error, "field rejected value");
			errors.push(BindingError::Field {
				field: path,
				source: error,
			});
		}
	});
	BindingError::collect(errors)
}
