use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::source::format_message;

/// Message patterns for a single locale.
///
/// Patterns use positional `{0}`, `{1}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	/// Create an empty catalog for `locale`
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_i18n::MessageCatalog;
	///
	/// let catalog = MessageCatalog::new("fr");
	/// assert_eq!(catalog.locale(), "fr");
	/// assert!(catalog.is_empty());
	/// ```
	pub fn new(locale: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
			messages: HashMap::new(),
		}
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Add or overwrite the pattern for `key`
	pub fn add(&mut self, key: impl Into<String>, pattern: impl Into<String>) {
		self.messages.insert(key.into(), pattern.into());
	}

	/// Builder form of [`MessageCatalog::add`]
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_i18n::MessageCatalog;
	///
	/// let catalog = MessageCatalog::new("de")
	///     .with_message("field-required-error", "{0} ist erforderlich");
	/// assert_eq!(catalog.get("field-required-error"), Some("{0} ist erforderlich"));
	/// ```
	pub fn with_message(mut self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.add(key, pattern);
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.messages.get(key).map(String::as_str)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.messages.contains_key(key)
	}

	/// Format the pattern stored under `key`, or `None` when the key is unknown
	pub fn format(&self, key: &str, args: &[&dyn std::fmt::Display]) -> Option<String> {
		self.get(key).map(|pattern| format_message(pattern, args))
	}

	/// Copy every message of `other` into this catalog, overwriting duplicates
	pub fn merge(&mut self, other: &MessageCatalog) {
		for (key, pattern) in &other.messages {
			self.messages.insert(key.clone(), pattern.clone());
		}
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}
}
