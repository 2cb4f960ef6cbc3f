//! The request context handed to every control lifecycle hook

use clickwork_i18n::{MessageSource, Messages, control_messages};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::session::Session;
use crate::upload::FileItem;
use crate::{ContextError, ContextResult};

const AJAX_HEADER: &str = "x-requested-with";
const AJAX_MARKER: &str = "XMLHttpRequest";

/// State of the request currently being processed
#[derive(Debug)]
pub struct Context {
	method: Method,
	resource_path: String,
	headers: HeaderMap,
	params: HashMap<String, Vec<String>>,
	file_items: Vec<FileItem>,
	content_length: Option<u64>,
	session: Session,
	attributes: Attributes,
	messages: Arc<dyn MessageSource>,
	locale: String,
	forward: bool,
	redirect: Option<String>,
	processing_cancelled: bool,
}

impl Context {
	/// Start building a context; defaults to `GET /` with an empty session
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_http::Context;
	/// use http::Method;
	///
	/// let ctx = Context::builder()
	///     .path("/customer/edit.htm")
	///     .query("id=7&tag=a&tag=b")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(ctx.method(), &Method::GET);
	/// assert_eq!(ctx.request_parameter("id"), Some("7"));
	/// assert_eq!(ctx.request_parameter_values("tag"), ["a", "b"]);
	/// ```
	pub fn builder() -> ContextBuilder {
		ContextBuilder::default()
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn is_post(&self) -> bool {
		self.method == Method::POST
	}

	/// Stable identifier of the requested resource, e.g. `/customer/edit.htm`
	pub fn resource_path(&self) -> &str {
		&self.resource_path
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// First value of the request parameter `name`
	pub fn request_parameter(&self, name: &str) -> Option<&str> {
		self.params
			.get(name)
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// All values of the request parameter `name`, in submission order
	pub fn request_parameter_values(&self, name: &str) -> &[String] {
		self.params.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn has_request_parameter(&self, name: &str) -> bool {
		self.params.contains_key(name)
	}

	pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
		self.params.keys().map(String::as_str)
	}

	/// The uploaded file submitted under the field `name`
	pub fn file_item(&self, name: &str) -> Option<&FileItem> {
		self.file_items.iter().find(|item| item.field_name() == name)
	}

	pub fn file_items(&self) -> &[FileItem] {
		&self.file_items
	}

	/// Declared request size, or the total size of the uploaded files
	pub fn content_length(&self) -> u64 {
		self.content_length
			.unwrap_or_else(|| self.file_items.iter().map(FileItem::size).sum())
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Whether this is an asynchronous partial-page request.
	///
	/// Detected from the `X-Requested-With: XMLHttpRequest` header or a
	/// request parameter of the same name.
	pub fn is_ajax_request(&self) -> bool {
		let header = self
			.headers
			.get(AJAX_HEADER)
			.and_then(|value| value.to_str().ok())
			.is_some_and(|value| value.eq_ignore_ascii_case(AJAX_MARKER));
		header || self.has_request_parameter("X-Requested-With")
	}

	/// Whether this request is an internal forward of another request
	pub fn is_forward(&self) -> bool {
		self.forward
	}

	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	pub fn attributes_mut(&mut self) -> &mut Attributes {
		&mut self.attributes
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	pub fn set_locale(&mut self, locale: impl Into<String>) {
		self.locale = locale.into();
	}

	pub fn messages(&self) -> &Arc<dyn MessageSource> {
		&self.messages
	}

	/// Resolve a message for the request locale
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_http::Context;
	///
	/// let ctx = Context::builder().build().unwrap();
	/// assert_eq!(
	///     ctx.message("field-required-error", &[&"Email"]),
	///     "You must enter a value for Email"
	/// );
	/// ```
	pub fn message(&self, key: &str, args: &[&dyn Display]) -> String {
		self.messages.get_message(&self.locale, key, args)
	}

	/// Ask the page to redirect to `location` once processing ends
	pub fn set_redirect(&mut self, location: impl Into<String>) {
		self.redirect = Some(location.into());
	}

	pub fn redirect(&self) -> Option<&str> {
		self.redirect.as_deref()
	}

	/// Mark page processing as cancelled, typically by an action listener
	pub fn cancel_processing(&mut self) {
		self.processing_cancelled = true;
	}

	pub fn is_processing_cancelled(&self) -> bool {
		self.processing_cancelled
	}
}

/// Builder for [`Context`]
#[derive(Debug)]
pub struct ContextBuilder {
	method: Method,
	path: String,
	query: Option<String>,
	headers: HeaderMap,
	params: Vec<(String, String)>,
	file_items: Vec<FileItem>,
	content_length: Option<u64>,
	session: Session,
	messages: Option<Arc<dyn MessageSource>>,
	locale: String,
	forward: bool,
}

impl Default for ContextBuilder {
	fn default() -> Self {
		Self {
			method: Method::GET,
			path: "/".to_string(),
			query: None,
			headers: HeaderMap::new(),
			params: Vec::new(),
			file_items: Vec::new(),
			content_length: None,
			session: Session::new(),
			messages: None,
			locale: "en".to_string(),
			forward: false,
		}
	}
}

impl ContextBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// URL-encoded parameters, parsed when the context is built
	pub fn query(mut self, query: impl Into<String>) -> Self {
		self.query = Some(query.into());
		self
	}

	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((name.into(), value.into()));
		self
	}

	/// Append a header; invalid names or values are ignored
	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.append(name, value);
			}
			_ => tracing::warn!(name, "ignoring invalid request header"),
		}
		self
	}

	/// Mark the request as an asynchronous partial-page request
	pub fn ajax(self) -> Self {
		self.header(AJAX_HEADER, AJAX_MARKER)
	}

	pub fn file(mut self, item: FileItem) -> Self {
		self.file_items.push(item);
		self
	}

	pub fn content_length(mut self, length: u64) -> Self {
		self.content_length = Some(length);
		self
	}

	/// Use an existing session, e.g. the one of the previous request
	pub fn session(mut self, session: Session) -> Self {
		self.session = session;
		self
	}

	pub fn messages(mut self, messages: Arc<dyn MessageSource>) -> Self {
		self.messages = Some(messages);
		self
	}

	pub fn locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = locale.into();
		self
	}

	pub fn forward(mut self, forward: bool) -> Self {
		self.forward = forward;
		self
	}

	pub fn build(self) -> ContextResult<Context> {
		let mut params: HashMap<String, Vec<String>> = HashMap::new();
		let parsed: Vec<(String, String)> = match &self.query {
			Some(query) => serde_urlencoded::from_str(query).map_err(ContextError::from)?,
			None => Vec::new(),
		};
		for (name, value) in parsed.into_iter().chain(self.params) {
			params.entry(name).or_default().push(value);
		}

		let messages = self.messages.unwrap_or_else(|| {
			Arc::new(Messages::new("en").with_catalog(control_messages())) as Arc<dyn MessageSource>
		});

		Ok(Context {
			method: self.method,
			resource_path: self.path,
			headers: self.headers,
			params,
			file_items: self.file_items,
			content_length: self.content_length,
			session: self.session,
			attributes: Attributes::new(),
			messages,
			locale: self.locale,
			forward: self.forward,
			redirect: None,
			processing_cancelled: false,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_query_and_params_are_merged() {
		// Arrange
		let ctx = Context::builder()
			.query("color=red&name=Ann%20Lee")
			.param("color", "blue")
			.build()
			.unwrap();

		// Assert
		assert_eq!(ctx.request_parameter("name"), Some("Ann Lee"));
		assert_eq!(ctx.request_parameter_values("color"), ["red", "blue"]);
		assert!(ctx.request_parameter_values("missing").is_empty());
	}

	#[rstest]
	#[case(Context::builder().ajax(), true)]
	#[case(Context::builder().param("X-Requested-With", "1"), true)]
	#[case(Context::builder().header("X-Requested-With", "xmlhttprequest"), true)]
	#[case(Context::builder(), false)]
	fn test_ajax_detection(#[case] builder: ContextBuilder, #[case] expected: bool) {
		// Act
		let ctx = builder.build().unwrap();

		// Assert
		assert_eq!(ctx.is_ajax_request(), expected);
	}

	#[rstest]
	fn test_content_length_defaults_to_file_sizes() {
		// Arrange
		let ctx = Context::builder()
			.file(FileItem::new("a", "a.txt", vec![0; 10]))
			.file(FileItem::new("b", "b.txt", vec![0; 5]))
			.build()
			.unwrap();

		// Assert
		assert_eq!(ctx.content_length(), 15);
		assert_eq!(ctx.file_item("b").map(FileItem::size), Some(5));
	}

	#[rstest]
	fn test_redirect_and_cancel() {
		// Arrange
		let mut ctx = Context::builder().build().unwrap();

		// Act
		ctx.set_redirect("/invalid-submit.htm");
		ctx.cancel_processing();

		// Assert
		assert_eq!(ctx.redirect(), Some("/invalid-submit.htm"));
		assert!(ctx.is_processing_cancelled());
	}
}
