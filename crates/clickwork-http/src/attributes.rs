//! Typed request attributes
//!
//! Attributes live exactly as long as one [`Context`](crate::Context). They
//! are keyed by type, so collaborators agree on a value by sharing its type
//! (the upload error marker is stored as [`UploadError`](crate::UploadError)).

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Type-keyed storage for request-scoped values
#[derive(Default)]
pub struct Attributes {
	map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Attributes {
	/// Create an empty attribute set
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_http::Attributes;
	///
	/// let attributes = Attributes::new();
	/// assert!(!attributes.contains::<String>());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `value`, returning the previous value of the same type
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_http::Attributes;
	///
	/// let mut attributes = Attributes::new();
	/// assert_eq!(attributes.insert(1u32), None);
	/// assert_eq!(attributes.insert(2u32), Some(1));
	/// assert_eq!(attributes.get::<u32>(), Some(&2));
	/// ```
	pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
		self.map
			.insert(TypeId::of::<T>(), Box::new(value))
			.and_then(|previous| previous.downcast::<T>().ok())
			.map(|previous| *previous)
	}

	pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
		self.map
			.get(&TypeId::of::<T>())
			.and_then(|boxed| boxed.downcast_ref::<T>())
	}

	pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
		self.map
			.get_mut(&TypeId::of::<T>())
			.and_then(|boxed| boxed.downcast_mut::<T>())
	}

	pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
		self.map.contains_key(&TypeId::of::<T>())
	}

	/// Remove and return the value of type `T`
	pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
		self.map
			.remove(&TypeId::of::<T>())
			.and_then(|boxed| boxed.downcast::<T>().ok())
			.map(|value| *value)
	}

	pub fn clear(&mut self) {
		self.map.clear();
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

impl fmt::Debug for Attributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Attributes")
			.field("len", &self.map.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, Clone, PartialEq)]
	struct Marker(&'static str);

	#[rstest]
	fn test_remove_returns_value_once() {
		// Arrange
		let mut attributes = Attributes::new();
		attributes.insert(Marker("upload"));

		// Act
		let first = attributes.remove::<Marker>();
		let second = attributes.remove::<Marker>();

		// Assert
		assert_eq!(first, Some(Marker("upload")));
		assert_eq!(second, None);
		assert!(attributes.is_empty());
	}

	#[rstest]
	fn test_values_are_keyed_by_type() {
		// Arrange
		let mut attributes = Attributes::new();

		// Act
		attributes.insert(7i64);
		attributes.insert(String::from("seven"));
		if let Some(value) = attributes.get_mut::<i64>() {
			*value += 1;
		}

		// Assert
		assert_eq!(attributes.get::<i64>(), Some(&8));
		assert_eq!(attributes.get::<String>().map(String::as_str), Some("seven"));
		assert_eq!(attributes.len(), 2);
	}
}
