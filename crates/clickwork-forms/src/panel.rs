//! Generic grouping container

use clickwork_http::Context;
use std::any::Any;

use crate::container::{Container, ControlList};
use crate::control::{Control, ControlCore};
use crate::error::ControlResult;
use crate::html::HtmlBuffer;

/// A container that groups controls and renders them in order.
///
/// With a tag, children are wrapped in that element.
#[derive(Debug, Default)]
pub struct Panel {
	core: ControlCore,
	tag: Option<String>,
	children: ControlList,
}

impl Panel {
	/// # Examples
	///
	/// ```
	/// use clickwork_forms::{Container, Label, Panel};
	///
	/// let mut panel = Panel::new("sidebar").with_tag("div");
	/// panel.add(Label::new("hint", "Hello")).unwrap();
	/// assert!(panel.has_controls());
	/// assert!(panel.get_control("hint").is_some());
	/// ```
	pub fn new(name: &str) -> Self {
		Self {
			core: ControlCore::new(Some(name)),
			..Self::default()
		}
	}

	pub fn unnamed() -> Self {
		Self::default()
	}

	pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
		self.tag = Some(tag.into());
		self
	}

	pub fn tag(&self) -> Option<&str> {
		self.tag.as_deref()
	}
}

impl Control for Panel {
	fn core(&self) -> &ControlCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut ControlCore {
		&mut self.core
	}

	fn on_init(&mut self, ctx: &mut Context) {
		self.children.init_all(ctx);
	}

	fn on_process(&mut self, ctx: &mut Context) -> bool {
		self.children.process_all(ctx)
	}

	fn on_render(&mut self, ctx: &mut Context) {
		self.children.render_all(ctx);
	}

	fn on_destroy(&mut self, ctx: &mut Context) -> ControlResult<()> {
		self.children.destroy_all(ctx);
		Ok(())
	}

	fn render(&self, buffer: &mut HtmlBuffer) {
		match &self.tag {
			Some(tag) => {
				buffer.elem(tag);
				if let Some(id) = self.html_id() {
					buffer.attr("id", &id);
				}
				buffer.close_tag();
				self.children.write_all(buffer);
				buffer.end_elem(tag);
			}
			None => self.children.write_all(buffer),
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn as_container(&self) -> Option<&dyn Container> {
		Some(self)
	}

	fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
		Some(self)
	}
}

impl Container for Panel {
	fn control_list(&self) -> &ControlList {
		&self.children
	}

	fn control_list_mut(&mut self) -> &mut ControlList {
		&mut self.children
	}
}
