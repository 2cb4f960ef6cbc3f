//! Request-scoped collaborators used by clickwork controls.
//!
//! A [`Context`] carries everything a control needs while a request is
//! processed: the request method and parameters, uploaded file items, the
//! per-user [`Session`], typed request [`Attributes`] and the message source
//! used for error text.
//!
//! ## Example
//!
//! ```
//! use clickwork_http::Context;
//! use http::Method;
//!
//! let ctx = Context::builder()
//!     .method(Method::POST)
//!     .path("/login.htm")
//!     .param("form_name", "login")
//!     .param("username", "  ann ")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(ctx.request_parameter("form_name"), Some("login"));
//! assert!(ctx.has_request_parameter("username"));
//! ```

pub mod attributes;
pub mod context;
pub mod session;
pub mod upload;

pub use attributes::Attributes;
pub use context::{Context, ContextBuilder};
pub use session::Session;
pub use upload::{FileItem, UploadError, UploadPolicy};

/// Errors raised by the request context
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
	#[error("Invalid query string: {0}")]
	InvalidQuery(#[from] serde_urlencoded::de::Error),
	#[error("Session attribute {name} could not be serialized: {source}")]
	SessionValue {
		name: String,
		#[source]
		source: serde_json::Error,
	},
}

/// Result type for request context operations
pub type ContextResult<T> = Result<T, ContextError>;
