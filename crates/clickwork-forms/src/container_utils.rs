//! Recursive queries over container trees

use crate::container::Container;
use crate::control::Control;
use crate::field::Field;

/// Find the control named `name` in `container` or any nested container.
///
/// Direct children are searched before descending.
///
/// # Examples
///
/// ```
/// use clickwork_forms::container_utils::find_control_by_name;
/// use clickwork_forms::{Container, FieldSet, Panel, TextField};
///
/// let mut address = FieldSet::new("address");
/// address.add(TextField::new("city")).unwrap();
/// let mut panel = Panel::new("panel");
/// panel.add(address).unwrap();
///
/// assert!(find_control_by_name(&panel, "city").is_some());
/// assert!(find_control_by_name(&panel, "country").is_none());
/// ```
pub fn find_control_by_name<'a>(container: &'a dyn Container, name: &str) -> Option<&'a dyn Control> {
	if let Some(control) = container.get_control(name) {
		return Some(control);
	}
	container
		.control_list()
		.iter()
		.filter_map(|child| child.as_container())
		.find_map(|inner| find_control_by_name(inner, name))
}

pub fn find_control_by_name_mut<'a>(
	container: &'a mut dyn Container,
	name: &str,
) -> Option<&'a mut dyn Control> {
	if container.control_list().position(name).is_some() {
		return container.get_control_mut(name);
	}
	for child in container.control_list_mut().controls_mut() {
		if let Some(inner) = child.as_container_mut() {
			if let Some(found) = find_control_by_name_mut(inner, name) {
				return Some(found);
			}
		}
	}
	None
}

/// Find the field named `name` anywhere below `container`
pub fn find_field<'a>(container: &'a dyn Container, name: &str) -> Option<&'a dyn Field> {
	find_control_by_name(container, name).and_then(|control| control.as_field())
}

pub fn find_field_mut<'a>(container: &'a mut dyn Container, name: &str) -> Option<&'a mut dyn Field> {
	find_control_by_name_mut(container, name).and_then(|control| control.as_field_mut())
}

fn collect_fields<'a>(
	container: &'a dyn Container,
	keep: &dyn Fn(&dyn Field) -> bool,
	out: &mut Vec<&'a dyn Field>,
) {
	for child in container.control_list().iter() {
		if let Some(inner) = child.as_container() {
			collect_fields(inner, keep, out);
		} else if let Some(field) = child.as_field() {
			if keep(field) {
				out.push(field);
			}
		}
	}
}

/// Every field below `container`, buttons included, in tree order.
///
/// Field sets are descended into rather than listed.
pub fn fields(container: &dyn Container) -> Vec<&dyn Field> {
	let mut out = Vec::new();
	collect_fields(container, &|_| true, &mut out);
	out
}

/// Fields that submit a value, hidden fields included
pub fn input_fields(container: &dyn Container) -> Vec<&dyn Field> {
	let mut out = Vec::new();
	collect_fields(container, &|field| field.is_input(), &mut out);
	out
}

pub fn hidden_fields(container: &dyn Container) -> Vec<&dyn Field> {
	let mut out = Vec::new();
	collect_fields(container, &|field| field.is_hidden(), &mut out);
	out
}

/// Visible input fields currently holding an error
pub fn error_fields(container: &dyn Container) -> Vec<&dyn Field> {
	let mut out = Vec::new();
	collect_fields(
		container,
		&|field| field.is_input() && !field.is_hidden() && !field.is_valid(),
		&mut out,
	);
	out
}

pub fn buttons(container: &dyn Container) -> Vec<&dyn Field> {
	let mut out = Vec::new();
	collect_fields(container, &|field| field.is_button(), &mut out);
	out
}

/// Call `visit` on every input field below `container`
pub fn for_each_input_field_mut(container: &mut dyn Container, visit: &mut dyn FnMut(&mut dyn Field)) {
	for child in container.control_list_mut().controls_mut() {
		if child.as_container().is_some() {
			if let Some(inner) = child.as_container_mut() {
				for_each_input_field_mut(inner, visit);
			}
		} else if let Some(field) = child.as_field_mut() {
			if field.is_input() {
				visit(field);
			}
		}
	}
}
