//! Message catalogs for clickwork controls.
//!
//! Every user-facing string a control produces goes through a
//! [`MessageSource`]. The built-in English catalog returned by
//! [`control_messages`] covers the keys used by the form fields.
//!
//! ## Example
//!
//! ```
//! use clickwork_i18n::{MessageSource, Messages, control_messages};
//!
//! let messages = Messages::new("en").with_catalog(control_messages());
//! let text = messages.get_message("en", "field-required-error", &[&"Username"]);
//! assert_eq!(text, "You must enter a value for Username");
//! ```

mod catalog;
mod control;
mod source;

pub use catalog::MessageCatalog;
pub use control::{CONTROL_MESSAGE_KEYS, control_messages};
pub use source::{MessageSource, Messages, format_message};

