//! Ordered, name-indexed child collections

use clickwork_http::Context;
use std::collections::HashMap;

use crate::control::{Control, ControlId};
use crate::error::{ControlError, ControlResult};
use crate::html::HtmlBuffer;

/// The children of a container, in insertion order.
///
/// Named children are indexed for constant-time lookup. Names are unique
/// among siblings; unnamed children may repeat.
#[derive(Debug, Default)]
pub struct ControlList {
	controls: Vec<Box<dyn Control>>,
	positions: HashMap<String, usize>,
}

impl ControlList {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `control` at `index` on behalf of the container `owner`.
	///
	/// A control whose name is already taken replaces that sibling in place
	/// and `index` is ignored. Returns the position the control ended up at.
	pub fn insert(
		&mut self,
		owner: ControlId,
		mut control: Box<dyn Control>,
		index: usize,
	) -> ControlResult<usize> {
		if control.id() == owner {
			return Err(ControlError::InvalidArgument(
				"a container cannot contain itself".to_string(),
			));
		}

		if let Some(position) = control.name().and_then(|name| self.positions.get(name).copied()) {
			control.set_parent(Some(owner))?;
			let mut replaced = std::mem::replace(&mut self.controls[position], control);
			replaced.set_parent(None)?;
			tracing::trace!(position, "replaced control with the same name");
			return Ok(position);
		}

		if index > self.controls.len() {
			return Err(ControlError::IndexOutOfBounds {
				index,
				len: self.controls.len(),
			});
		}

		control.set_parent(Some(owner))?;
		self.controls.insert(index, control);
		self.reindex();
		Ok(index)
	}

	/// Remove the child with id `id`, detaching it from its parent
	pub fn remove(&mut self, id: ControlId) -> Option<Box<dyn Control>> {
		let position = self.position_of(id)?;
		let mut removed = self.controls.remove(position);
		self.reindex();
		// Clearing a parent link cannot fail.
		let _ = removed.set_parent(None);
		Some(removed)
	}

	pub fn remove_by_name(&mut self, name: &str) -> Option<Box<dyn Control>> {
		let id = self.get(name)?.id();
		self.remove(id)
	}

	/// Substitute the child `current` with `replacement` at the same position
	pub fn replace(
		&mut self,
		owner: ControlId,
		current: ControlId,
		mut replacement: Box<dyn Control>,
	) -> ControlResult<Box<dyn Control>> {
		if replacement.id() == owner {
			return Err(ControlError::InvalidArgument(
				"a container cannot contain itself".to_string(),
			));
		}
		let position = self
			.position_of(current)
			.ok_or_else(|| ControlError::NotFound(format!("control {current} is not a child")))?;
		if let Some(name) = replacement.name() {
			if self.positions.get(name).is_some_and(|&other| other != position) {
				return Err(ControlError::InvalidArgument(format!(
					"a sibling named '{name}' already exists"
				)));
			}
		}

		replacement.set_parent(Some(owner))?;
		let mut previous = std::mem::replace(&mut self.controls[position], replacement);
		self.reindex();
		previous.set_parent(None)?;
		Ok(previous)
	}

	pub fn get(&self, name: &str) -> Option<&dyn Control> {
		let position = *self.positions.get(name)?;
		Some(self.controls[position].as_ref())
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Control> {
		let position = *self.positions.get(name)?;
		Some(self.controls[position].as_mut())
	}

	pub fn get_by_id(&self, id: ControlId) -> Option<&dyn Control> {
		let position = self.position_of(id)?;
		Some(self.controls[position].as_ref())
	}

	pub fn get_by_id_mut(&mut self, id: ControlId) -> Option<&mut dyn Control> {
		let position = self.position_of(id)?;
		Some(self.controls[position].as_mut())
	}

	/// Position of the child named `name`
	pub fn position(&self, name: &str) -> Option<usize> {
		self.positions.get(name).copied()
	}

	pub fn position_of(&self, id: ControlId) -> Option<usize> {
		self.controls.iter().position(|control| control.id() == id)
	}

	pub fn contains(&self, id: ControlId) -> bool {
		self.position_of(id).is_some()
	}

	pub fn controls(&self) -> &[Box<dyn Control>] {
		&self.controls
	}

	pub fn controls_mut(&mut self) -> &mut [Box<dyn Control>] {
		&mut self.controls
	}

	pub fn iter(&self) -> impl Iterator<Item = &dyn Control> {
		self.controls.iter().map(|control| control.as_ref())
	}

	pub fn len(&self) -> usize {
		self.controls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.controls.is_empty()
	}

	fn reindex(&mut self) {
		self.positions.clear();
		for (position, control) in self.controls.iter().enumerate() {
			if let Some(name) = control.name() {
				self.positions.insert(name.to_string(), position);
			}
		}
	}

	/// Run `on_init` on every child in order
	pub fn init_all(&mut self, ctx: &mut Context) {
		for control in &mut self.controls {
			tracing::trace!(control = %control.core().describe(), "onInit");
			control.on_init(ctx);
		}
	}

	/// Run `on_process` on every child, returning whether all of them continue
	pub fn process_all(&mut self, ctx: &mut Context) -> bool {
		let mut proceed = true;
		for control in &mut self.controls {
			tracing::trace!(control = %control.core().describe(), "onProcess");
			if !control.on_process(ctx) {
				proceed = false;
			}
		}
		proceed
	}

	pub fn render_all(&mut self, ctx: &mut Context) {
		for control in &mut self.controls {
			tracing::trace!(control = %control.core().describe(), "onRender");
			control.on_render(ctx);
		}
	}

	/// Run `on_destroy` on every child; failures are logged and never stop siblings
	pub fn destroy_all(&mut self, ctx: &mut Context) {
		for control in &mut self.controls {
			tracing::trace!(control = %control.core().describe(), "onDestroy");
			if let Err(error) = control.on_destroy(ctx) {
				tracing::error!(control = %control.core().describe(), %error, "onDestroy failed");
			}
		}
	}

	pub fn write_all(&self, buffer: &mut HtmlBuffer) {
		for control in &self.controls {
			control.render(buffer);
		}
	}
}

/// A control that owns an ordered list of child controls
pub trait Container: Control {
	fn control_list(&self) -> &ControlList;

	/// Direct access to the children; prefer the insert and remove methods
	fn control_list_mut(&mut self) -> &mut ControlList;

	/// Insert a boxed control at `index`, see [`ControlList::insert`]
	fn insert_boxed(&mut self, control: Box<dyn Control>, index: usize) -> ControlResult<ControlId> {
		let owner = self.id();
		let id = control.id();
		self.control_list_mut().insert(owner, control, index)?;
		Ok(id)
	}

	fn add_boxed(&mut self, control: Box<dyn Control>) -> ControlResult<ControlId> {
		let index = self.control_list().len();
		self.insert_boxed(control, index)
	}

	/// Insert `control` at `index` and return its id
	fn insert<C: Control>(&mut self, control: C, index: usize) -> ControlResult<ControlId>
	where
		Self: Sized,
	{
		self.insert_boxed(Box::new(control), index)
	}

	/// Append `control` and return its id
	fn add<C: Control>(&mut self, control: C) -> ControlResult<ControlId>
	where
		Self: Sized,
	{
		self.add_boxed(Box::new(control))
	}

	/// Remove the child `id`; `None` when it is not a child
	fn remove(&mut self, id: ControlId) -> Option<Box<dyn Control>> {
		self.control_list_mut().remove(id)
	}

	fn remove_by_name(&mut self, name: &str) -> Option<Box<dyn Control>> {
		self.control_list_mut().remove_by_name(name)
	}

	/// Swap the child `current` for `replacement`, returning the old child
	fn replace(
		&mut self,
		current: ControlId,
		replacement: Box<dyn Control>,
	) -> ControlResult<Box<dyn Control>> {
		let owner = self.id();
		self.control_list_mut().replace(owner, current, replacement)
	}

	fn get_control(&self, name: &str) -> Option<&dyn Control> {
		self.control_list().get(name)
	}

	fn get_control_mut(&mut self, name: &str) -> Option<&mut dyn Control> {
		self.control_list_mut().get_mut(name)
	}

	fn contains(&self, id: ControlId) -> bool {
		self.control_list().contains(id)
	}

	fn has_controls(&self) -> bool {
		!self.control_list().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::TextField;
	use crate::panel::Panel;
	use rstest::rstest;

	fn names(list: &ControlList) -> Vec<Option<&str>> {
		list.iter().map(|control| control.name()).collect()
	}

	#[rstest]
	fn test_insert_at_index_registers_name() {
		// Arrange
		let owner = ControlId::next();
		let mut list = ControlList::new();
		list.insert(owner, Box::new(TextField::new("a")), 0).unwrap();
		list.insert(owner, Box::new(TextField::new("c")), 1).unwrap();

		// Act
		let position = list.insert(owner, Box::new(TextField::new("b")), 1).unwrap();

		// Assert
		assert_eq!(position, 1);
		assert_eq!(names(&list), vec![Some("a"), Some("b"), Some("c")]);
		assert_eq!(list.position("c"), Some(2));
		assert_eq!(list.get("b").and_then(|c| c.parent()), Some(owner));
	}

	#[rstest]
	fn test_insert_out_of_bounds() {
		// Arrange
		let mut list = ControlList::new();

		// Act
		let result = list.insert(ControlId::next(), Box::new(TextField::new("a")), 3);

		// Assert
		assert_eq!(
			result,
			Err(ControlError::IndexOutOfBounds { index: 3, len: 0 })
		);
	}

	#[rstest]
	fn test_replace_requires_child() {
		// Arrange
		let owner = ControlId::next();
		let mut list = ControlList::new();
		let stranger = TextField::new("x");
		let stranger_id = stranger.id();

		// Act
		let result = list.replace(owner, stranger_id, Box::new(TextField::new("y")));

		// Assert
		assert!(matches!(result, Err(ControlError::NotFound(_))));
	}

	#[rstest]
	fn test_replace_keeps_position_and_detaches_old() {
		// Arrange
		let owner = ControlId::next();
		let mut list = ControlList::new();
		list.insert(owner, Box::new(TextField::new("a")), 0).unwrap();
		let b = TextField::new("b");
		let b_id = b.id();
		list.insert(owner, Box::new(b), 1).unwrap();
		list.insert(owner, Box::new(TextField::new("c")), 2).unwrap();

		// Act
		let old = list
			.replace(owner, b_id, Box::new(TextField::new("z")))
			.unwrap();

		// Assert
		assert_eq!(old.parent(), None);
		assert_eq!(names(&list), vec![Some("a"), Some("z"), Some("c")]);
		assert!(list.get("b").is_none());
		assert_eq!(list.position("z"), Some(1));
	}

	#[rstest]
	fn test_unnamed_controls_may_repeat() {
		// Arrange
		let owner = ControlId::next();
		let mut list = ControlList::new();

		// Act
		list.insert(owner, Box::new(Panel::unnamed()), 0).unwrap();
		list.insert(owner, Box::new(Panel::unnamed()), 1).unwrap();

		// Assert
		assert_eq!(list.len(), 2);
	}
}
