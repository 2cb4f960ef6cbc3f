//! Append-only HTML output buffer

use std::fmt;

/// Escape the HTML special characters of `input`
pub fn escape_html(input: &str) -> String {
	let mut escaped = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(ch),
		}
	}
	escaped
}

/// Rendering sink controls write their markup into.
///
/// # Examples
///
/// ```
/// use clickwork_forms::HtmlBuffer;
///
/// let mut buffer = HtmlBuffer::new();
/// buffer.elem("input");
/// buffer.attr("name", "q");
/// buffer.attr("value", "a<b");
/// buffer.elem_end();
/// assert_eq!(buffer.as_str(), r#"<input name="q" value="a&lt;b"/>"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlBuffer {
	out: String,
}

impl HtmlBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			out: String::with_capacity(capacity),
		}
	}

	/// Append raw markup
	pub fn append(&mut self, text: &str) -> &mut Self {
		self.out.push_str(text);
		self
	}

	pub fn append_escaped(&mut self, text: &str) -> &mut Self {
		self.out.push_str(&escape_html(text));
		self
	}

	/// Open a start tag, leaving it ready for attributes
	pub fn elem(&mut self, tag: &str) -> &mut Self {
		self.out.push('<');
		self.out.push_str(tag);
		self
	}

	/// Append an escaped attribute to the open start tag
	pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
		self.out.push(' ');
		self.out.push_str(name);
		self.out.push_str("=\"");
		self.out.push_str(&escape_html(value));
		self.out.push('"');
		self
	}

	/// Append a boolean attribute such as `disabled`
	pub fn flag(&mut self, name: &str) -> &mut Self {
		self.attr(name, name)
	}

	pub fn close_tag(&mut self) -> &mut Self {
		self.out.push('>');
		self
	}

	/// Close the open start tag as an empty element
	pub fn elem_end(&mut self) -> &mut Self {
		self.out.push_str("/>");
		self
	}

	pub fn end_elem(&mut self, tag: &str) -> &mut Self {
		self.out.push_str("</");
		self.out.push_str(tag);
		self.out.push('>');
		self
	}

	pub fn as_str(&self) -> &str {
		&self.out
	}

	pub fn len(&self) -> usize {
		self.out.len()
	}

	pub fn is_empty(&self) -> bool {
		self.out.is_empty()
	}

	pub fn into_string(self) -> String {
		self.out
	}
}

impl fmt::Display for HtmlBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("plain", "plain")]
	#[case("<b>&</b>", "&lt;b&gt;&amp;&lt;/b&gt;")]
	#[case(r#"say "hi" 'x'"#, "say &quot;hi&quot; &#x27;x&#x27;")]
	fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_html(input), expected);
	}

	#[rstest]
	fn test_buffer_builds_element() {
		// Arrange
		let mut buffer = HtmlBuffer::new();

		// Act
		buffer
			.elem("label")
			.attr("for", "f_name")
			.close_tag()
			.append_escaped("Name & Title")
			.end_elem("label");

		// Assert
		assert_eq!(
			buffer.into_string(),
			r#"<label for="f_name">Name &amp; Title</label>"#
		);
	}
}
