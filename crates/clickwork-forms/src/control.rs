//! The control capability shared by every component of a page

use clickwork_http::Context;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::container::Container;
use crate::error::{ControlError, ControlResult};
use crate::field::Field;
use crate::html::HtmlBuffer;

/// Process-unique identity of a control instance.
///
/// Children refer to their parent by id; they never own it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
	/// Allocate a fresh id
	pub fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for ControlId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Identity, name and parent link embedded in every control
#[derive(Debug)]
pub struct ControlCore {
	id: ControlId,
	name: Option<String>,
	parent: Option<ControlId>,
}

impl ControlCore {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::ControlCore;
	///
	/// let core = ControlCore::new(Some("email"));
	/// assert_eq!(core.name(), Some("email"));
	/// assert_eq!(core.parent(), None);
	/// ```
	pub fn new(name: Option<&str>) -> Self {
		Self {
			id: ControlId::next(),
			name: name.map(str::to_string),
			parent: None,
		}
	}

	pub fn id(&self) -> ControlId {
		self.id
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn set_name(&mut self, name: &str) {
		self.name = Some(name.to_string());
	}

	pub fn parent(&self) -> Option<ControlId> {
		self.parent
	}

	/// Link this control to `parent`, rejecting a link to itself
	pub fn set_parent(&mut self, parent: Option<ControlId>) -> ControlResult<()> {
		if parent == Some(self.id) {
			return Err(ControlError::InvalidArgument(format!(
				"control {} cannot be its own parent",
				self.describe()
			)));
		}
		self.parent = parent;
		Ok(())
	}

	/// Name for log and error messages
	pub fn describe(&self) -> String {
		match &self.name {
			Some(name) => format!("'{name}'"),
			None => self.id.to_string(),
		}
	}
}

impl Default for ControlCore {
	fn default() -> Self {
		Self::new(None)
	}
}

/// A component taking part in the page lifecycle.
///
/// The lifecycle runs `on_init`, `on_process`, `on_render` and finally
/// `on_destroy` once per request. Hooks default to no-ops.
pub trait Control: Any + fmt::Debug + Send {
	fn core(&self) -> &ControlCore;

	fn core_mut(&mut self) -> &mut ControlCore;

	fn id(&self) -> ControlId {
		self.core().id()
	}

	fn name(&self) -> Option<&str> {
		self.core().name()
	}

	/// Rename the control; controls with a fixed name return an error
	fn set_name(&mut self, name: &str) -> ControlResult<()> {
		self.core_mut().set_name(name);
		Ok(())
	}

	fn parent(&self) -> Option<ControlId> {
		self.core().parent()
	}

	fn set_parent(&mut self, parent: Option<ControlId>) -> ControlResult<()> {
		self.core_mut().set_parent(parent)
	}

	/// The HTML id attribute of the rendered control
	fn html_id(&self) -> Option<String> {
		self.name().map(str::to_string)
	}

	fn on_init(&mut self, _ctx: &mut Context) {}

	/// Process the request; `false` asks the page to stop processing
	fn on_process(&mut self, _ctx: &mut Context) -> bool {
		true
	}

	fn on_render(&mut self, _ctx: &mut Context) {}

	/// Release per-request state
	fn on_destroy(&mut self, _ctx: &mut Context) -> ControlResult<()> {
		Ok(())
	}

	fn render(&self, buffer: &mut HtmlBuffer);

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	fn as_field(&self) -> Option<&dyn Field> {
		None
	}

	fn as_field_mut(&mut self) -> Option<&mut dyn Field> {
		None
	}

	fn as_container(&self) -> Option<&dyn Container> {
		None
	}

	fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
		None
	}
}

impl dyn Control {
	/// Downcast to a concrete control type
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Control, TextField};
	///
	/// let boxed: Box<dyn Control> = Box::new(TextField::new("city"));
	/// assert!(boxed.downcast_ref::<TextField>().is_some());
	/// ```
	pub fn downcast_ref<T: Control>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	pub fn downcast_mut<T: Control>(&mut self) -> Option<&mut T> {
		self.as_any_mut().downcast_mut::<T>()
	}

	pub fn is<T: Control>(&self) -> bool {
		self.as_any().is::<T>()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_ids_are_unique() {
		// Act
		let a = ControlCore::new(Some("a"));
		let b = ControlCore::new(Some("a"));

		// Assert
		assert_ne!(a.id(), b.id());
	}

	#[rstest]
	fn test_self_parent_is_rejected() {
		// Arrange
		let mut core = ControlCore::new(Some("panel"));
		let own_id = core.id();

		// Act
		let result = core.set_parent(Some(own_id));

		// Assert
		assert!(matches!(result, Err(ControlError::InvalidArgument(_))));
		assert_eq!(core.parent(), None);
	}

	#[rstest]
	fn test_parent_can_be_cleared() {
		// Arrange
		let mut core = ControlCore::new(None);
		core.set_parent(Some(ControlId::next())).unwrap();

		// Act
		core.set_parent(None).unwrap();

		// Assert
		assert_eq!(core.parent(), None);
		assert_eq!(core.describe(), core.id().to_string());
	}
}
