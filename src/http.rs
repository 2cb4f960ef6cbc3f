//! Request context, session, attributes and uploads
//!
//! See [`clickwork_http`].

pub use clickwork_http::*;
