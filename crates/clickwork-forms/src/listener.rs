//! Action listeners fired by controls after processing

use clickwork_http::Context;
use serde_json::Value;
use std::fmt;

use crate::control::ControlId;

/// Describes the control that fired a listener
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
	pub source: ControlId,
	pub name: Option<String>,
	/// The bound value object; for a form, an object of its field values
	pub value: Value,
	pub valid: bool,
}

type ListenerFn = dyn FnMut(&ActionEvent, &mut Context) -> bool + Send;

/// Callback registered on a control.
///
/// Returning `false` cancels further page processing.
pub struct ActionListener(Box<ListenerFn>);

impl ActionListener {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::ActionListener;
	///
	/// let listener = ActionListener::new(|event, _ctx| event.valid);
	/// ```
	pub fn new<F>(callback: F) -> Self
	where
		F: FnMut(&ActionEvent, &mut Context) -> bool + Send + 'static,
	{
		Self(Box::new(callback))
	}

	/// Invoke the callback, cancelling processing when it returns `false`
	pub fn fire(&mut self, event: &ActionEvent, ctx: &mut Context) -> bool {
		let proceed = (self.0)(event, ctx);
		if !proceed {
			tracing::debug!(source = %event.source, name = ?event.name, "listener cancelled processing");
			ctx.cancel_processing();
		}
		proceed
	}
}

impl fmt::Debug for ActionListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ActionListener")
	}
}
