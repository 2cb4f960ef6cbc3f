//! Per-user session store
//!
//! A [`Session`] is a cheap handle; clones share the same attribute map, so a
//! session can outlive the request that created it and be handed to the next
//! one. Concurrent writers see last-write-wins semantics.

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{ContextError, ContextResult};

/// Shared handle to the attribute map of one user session
#[derive(Debug, Clone, Default)]
pub struct Session {
	attributes: Arc<Mutex<HashMap<String, Value>>>,
}

impl Session {
	/// Create an empty session
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_http::Session;
	///
	/// let session = Session::new();
	/// session.set("visits", &3).unwrap();
	///
	/// let shared = session.clone();
	/// assert_eq!(shared.get::<u32>("visits"), Some(3));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Deserialize the attribute stored under `name`
	///
	/// Returns `None` when the attribute is missing or has another shape.
	pub fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
		let value = self.attributes.lock().get(name).cloned()?;
		serde_json::from_value(value).ok()
	}

	pub fn get_value(&self, name: &str) -> Option<Value> {
		self.attributes.lock().get(name).cloned()
	}

	/// Serialize `value` and store it under `name`
	pub fn set<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> ContextResult<()> {
		let value = serde_json::to_value(value).map_err(|source| ContextError::SessionValue {
			name: name.to_string(),
			source,
		})?;
		self.attributes.lock().insert(name.to_string(), value);
		Ok(())
	}

	pub fn set_value(&self, name: &str, value: Value) {
		self.attributes.lock().insert(name.to_string(), value);
	}

	pub fn remove(&self, name: &str) -> Option<Value> {
		self.attributes.lock().remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.attributes.lock().contains_key(name)
	}

	pub fn clear(&self) {
		self.attributes.lock().clear();
	}

	pub fn len(&self) -> usize {
		self.attributes.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.attributes.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_clones_share_attributes() {
		// Arrange
		let session = Session::new();
		let other = session.clone();

		// Act
		other.set("token", &1_700_000_000_000i64).unwrap();

		// Assert
		assert_eq!(session.get::<i64>("token"), Some(1_700_000_000_000));
		assert!(session.contains("token"));
	}

	#[rstest]
	fn test_get_with_wrong_shape_is_none() {
		// Arrange
		let session = Session::new();
		session.set_value("name", json!("ann"));

		// Act
		let as_number = session.get::<i64>("name");

		// Assert
		assert_eq!(as_number, None);
		assert_eq!(session.get_value("name"), Some(json!("ann")));
	}

	#[rstest]
	fn test_remove_and_clear() {
		// Arrange
		let session = Session::new();
		session.set("a", "x").unwrap();
		session.set("b", "y").unwrap();

		// Act
		let removed = session.remove("a");
		session.clear();

		// Assert
		assert_eq!(removed, Some(json!("x")));
		assert!(session.is_empty());
	}
}
