//! Immutable select options

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A `(value, label)` pair offered by selection controls.
///
/// Options are immutable and cheap to clone, so option lists can be built
/// once and shared between requests and threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OptionRepr", into = "OptionRepr")]
pub struct ControlOption {
	value: Arc<str>,
	label: Arc<str>,
}

#[derive(Serialize, Deserialize)]
struct OptionRepr {
	value: String,
	label: String,
}

impl From<OptionRepr> for ControlOption {
	fn from(repr: OptionRepr) -> Self {
		Self::new(&repr.value, &repr.label)
	}
}

impl From<ControlOption> for OptionRepr {
	fn from(option: ControlOption) -> Self {
		Self {
			value: option.value.to_string(),
			label: option.label.to_string(),
		}
	}
}

impl ControlOption {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::ControlOption;
	///
	/// let option = ControlOption::new("NZ", "New Zealand");
	/// assert_eq!(option.value(), "NZ");
	/// assert_eq!(option.label(), "New Zealand");
	/// ```
	pub fn new(value: &str, label: &str) -> Self {
		Self {
			value: Arc::from(value),
			label: Arc::from(label),
		}
	}

	/// An option whose label equals its value
	pub fn simple(value: &str) -> Self {
		Self::new(value, value)
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn label(&self) -> &str {
		&self.label
	}
}

impl From<(&str, &str)> for ControlOption {
	fn from((value, label): (&str, &str)) -> Self {
		Self::new(value, label)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn assert_send_sync<T: Send + Sync>() {}

	#[rstest]
	fn test_serializes_as_value_and_label() {
		// Arrange
		let option = ControlOption::new("NZ", "New Zealand");

		// Act
		let json = serde_json::to_value(&option).unwrap();
		let restored: ControlOption = serde_json::from_value(json.clone()).unwrap();

		// Assert
		assert_eq!(json, serde_json::json!({ "value": "NZ", "label": "New Zealand" }));
		assert_eq!(restored, option);
	}

	#[rstest]
	fn test_options_are_shareable() {
		// Arrange
		assert_send_sync::<ControlOption>();
		let shared: Arc<[ControlOption]> = Arc::from(vec![ControlOption::simple("a")]);

		// Act
		let handle = std::thread::spawn({
			let shared = Arc::clone(&shared);
			move || shared[0].label().to_string()
		});

		// Assert
		assert_eq!(handle.join().unwrap(), "a");
	}
}
