//! Controls, containers, fields, forms and pages
//!
//! ## Example
//!
//! ```rust
//! use clickwork::forms::{Container, Form, TextField};
//!
//! let mut form = Form::new("search");
//! form.add(TextField::new("query")).unwrap();
//! assert_eq!(form.field_value("query"), Some(""));
//! ```

pub use clickwork_forms::*;
