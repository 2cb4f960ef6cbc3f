use regex::Regex;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::LazyLock;

use crate::catalog::MessageCatalog;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{(\d+)\}").expect("PLACEHOLDER: invalid regex pattern")
});

/// Localized message lookup used by controls for all error text
pub trait MessageSource: Send + Sync + fmt::Debug {
	/// Resolve `key` for `locale` and substitute `args`.
	///
	/// Implementations return the key itself when no pattern is known.
	fn get_message(&self, locale: &str, key: &str, args: &[&dyn Display]) -> String;
}

/// Replace `{n}` placeholders in `pattern` with the matching argument.
///
/// Placeholders without an argument are left untouched.
///
/// # Examples
///
/// ```
/// use clickwork_i18n::format_message;
///
/// assert_eq!(format_message("{0} of {1}", &[&3, &"5"]), "3 of 5");
/// assert_eq!(format_message("{0} and {2}", &[&"a"]), "a and {2}");
/// ```
pub fn format_message(pattern: &str, args: &[&dyn Display]) -> String {
	PLACEHOLDER
		.replace_all(pattern, |caps: &regex::Captures<'_>| {
			caps[1]
				.parse::<usize>()
				.ok()
				.and_then(|index| args.get(index))
				.map(|arg| arg.to_string())
				.unwrap_or_else(|| caps[0].to_string())
		})
		.into_owned()
}

/// A bundle of catalogs keyed by locale, with a fallback locale.
///
/// Lookups try the exact locale, then its language part (`fr` for
/// `fr-CA`), then the fallback locale.
#[derive(Debug, Clone, Default)]
pub struct Messages {
	fallback: String,
	catalogs: HashMap<String, MessageCatalog>,
}

impl Messages {
	/// # Examples
	///
	/// ```
	/// use clickwork_i18n::{MessageCatalog, MessageSource, Messages};
	///
	/// let messages = Messages::new("en")
	///     .with_catalog(MessageCatalog::new("en").with_message("hi", "Hello {0}"))
	///     .with_catalog(MessageCatalog::new("fr").with_message("hi", "Bonjour {0}"));
	///
	/// assert_eq!(messages.get_message("fr-CA", "hi", &[&"Zoe"]), "Bonjour Zoe");
	/// assert_eq!(messages.get_message("ja", "hi", &[&"Zoe"]), "Hello Zoe");
	/// ```
	pub fn new(fallback: impl Into<String>) -> Self {
		Self {
			fallback: fallback.into(),
			catalogs: HashMap::new(),
		}
	}

	/// Add a catalog; a catalog for an already present locale is merged into it
	pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
		self.add_catalog(catalog);
		self
	}

	pub fn add_catalog(&mut self, catalog: MessageCatalog) {
		match self.catalogs.get_mut(catalog.locale()) {
			Some(existing) => existing.merge(&catalog),
			None => {
				self.catalogs.insert(catalog.locale().to_string(), catalog);
			}
		}
	}

	pub fn fallback_locale(&self) -> &str {
		&self.fallback
	}

	pub fn catalog(&self, locale: &str) -> Option<&MessageCatalog> {
		self.catalogs.get(locale)
	}

	fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
		let language = locale.split(['-', '_']).next().unwrap_or(locale);
		[locale, language, self.fallback.as_str()]
			.into_iter()
			.filter_map(|candidate| self.catalogs.get(candidate))
			.find_map(|catalog| catalog.get(key))
	}
}

impl MessageSource for Messages {
	fn get_message(&self, locale: &str, key: &str, args: &[&dyn Display]) -> String {
		match self.lookup(locale, key) {
			Some(pattern) => format_message(pattern, args),
			None => {
				tracing::debug!(locale, key, "no message pattern found");
				key.to_string()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("{0} must be at least {1} characters", "Name must be at least 3 characters")]
	#[case("{1}/{0}", "3/Name")]
	#[case("no placeholders", "no placeholders")]
	fn test_format_message(#[case] pattern: &str, #[case] expected: &str) {
		// Act
		let text = format_message(pattern, &[&"Name", &3]);

		// Assert
		assert_eq!(text, expected);
	}

	#[rstest]
	fn test_unknown_key_returns_key() {
		// Arrange
		let messages = Messages::new("en");

		// Act
		let text = messages.get_message("en", "missing-key", &[]);

		// Assert
		assert_eq!(text, "missing-key");
	}

	#[rstest]
	fn test_catalogs_for_same_locale_merge() {
		// Arrange
		let messages = Messages::new("en")
			.with_catalog(MessageCatalog::new("en").with_message("a", "A"))
			.with_catalog(MessageCatalog::new("en").with_message("b", "B"));

		// Act
		let a = messages.get_message("en", "a", &[]);
		let b = messages.get_message("en", "b", &[]);

		// Assert
		assert_eq!(a, "A");
		assert_eq!(b, "B");
	}
}
