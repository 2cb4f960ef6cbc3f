//! Field kinds
//!
//! Each kind composes [`FieldCore`](crate::FieldCore) with its own parsing
//! and constraint checks, built from the helpers in [`crate::field`].

mod button;
mod checkbox;
mod email;
mod file;
mod hidden;
mod label;
mod link;
mod number;
mod radio;
mod script;
mod select;
mod text;

pub use button::{Button, ButtonKind};
pub use checkbox::Checkbox;
pub use email::EmailField;
pub use file::FileField;
pub use hidden::{HiddenField, ValueKind};
pub use label::Label;
pub use link::{ACTION_BUTTON, ACTION_LINK, ActionButton, ActionLink, PageLink, VALUE};
pub use number::{DoubleField, IntegerField};
pub use radio::{Radio, RadioGroup};
pub use select::Select;
pub use text::{TextField, TextKind};
