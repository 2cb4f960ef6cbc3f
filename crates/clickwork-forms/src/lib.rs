//! Controls, containers, fields and forms for clickwork
//!
//! This crate provides the component model pages are built from:
//! - A control lifecycle (`on_init`, `on_process`, `on_render`, `on_destroy`)
//! - Ordered, name-indexed containers with replace-by-name semantics
//! - Input fields that bind, validate and emit client-side checks
//! - Forms with submission detection, upload error reporting and a
//!   submit-replay guard
//! - Binding of field values to maps and beans by property path
//! - Page-level action links and buttons that fire listeners outside a form
//!
//! ## Example
//!
//! ```
//! use clickwork_forms::{Button, Container, Control, Form, TextField};
//! use clickwork_http::Context;
//! use http::Method;
//!
//! let mut form = Form::new("login");
//! form.add(TextField::new("username").required()).unwrap();
//! form.add(TextField::password("password").required()).unwrap();
//! form.add(Button::submit("ok")).unwrap();
//!
//! let mut ctx = Context::builder()
//! 	.method(Method::POST)
//! 	.param("form_name", "login")
//! 	.param("password", "secret")
//! 	.build()
//! 	.unwrap();
//!
//! assert!(form.on_process(&mut ctx));
//! assert!(!form.is_valid());
//! assert!(form.field("username").unwrap().error().is_some());
//! ```

pub mod binding;
pub mod container;
pub mod container_utils;
pub mod control;
pub mod error;
pub mod field;
pub mod fields;
pub mod fieldset;
pub mod form;
pub mod html;
pub mod listener;
pub mod option;
pub mod page;
pub mod panel;
pub mod property;

pub use binding::PropertyTarget;
pub use container::{Container, ControlList};
pub use control::{Control, ControlCore, ControlId};
pub use error::{
	BindingError, BindingResult, ControlError, ControlResult, PropertyError, PropertyResult,
};
pub use field::{Field, FieldCore, FormScope};
pub use fields::{
	ActionButton, ActionLink, Button, ButtonKind, Checkbox, DoubleField, EmailField, FileField,
	HiddenField, IntegerField, Label, PageLink, Radio, RadioGroup, Select, TextField, TextKind,
	ValueKind,
};
pub use fieldset::FieldSet;
pub use form::{FORM_NAME, Form, SUBMIT_CHECK};
pub use html::{HtmlBuffer, escape_html};
pub use listener::{ActionEvent, ActionListener};
pub use option::ControlOption;
pub use page::{Page, PageResponse};
pub use panel::Panel;
pub use property::{Bean, BeanDescriptor, PropertyAccessor, PropertyDescriptor, PropertyKind};
