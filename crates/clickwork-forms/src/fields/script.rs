//! Client-side validation function templates

use clickwork_http::Context;

use crate::field::FieldCore;

/// Quote `text` as a single-quoted JavaScript string literal
pub(crate) fn js_string(text: &str) -> String {
	let mut quoted = String::with_capacity(text.len() + 2);
	quoted.push('\'');
	for ch in text.chars() {
		match ch {
			'\'' => quoted.push_str("\\'"),
			'\\' => quoted.push_str("\\\\"),
			'\n' => quoted.push_str("\\n"),
			'<' => quoted.push_str("\\x3C"),
			_ => quoted.push(ch),
		}
	}
	quoted.push('\'');
	quoted
}

/// Wrap a `validateXxx(...)` call into a `validate_<id>()` function
pub(crate) fn validation_function(id: &str, call: &str) -> String {
	format!(
		"function validate_{id}() {{\n   var msg = {call};\n   if (msg) {{\n      return msg + '|{id}';\n   }} else {{\n      return null;\n   }}\n}}\n"
	)
}

/// Script for text-like fields checked by `validateTextField`
pub(crate) fn text_field_script(
	id: &str,
	field: &FieldCore,
	min_length: Option<usize>,
	max_length: Option<usize>,
	ctx: &Context,
) -> String {
	let label = field.label();
	let min = min_length.unwrap_or(0);
	let max = max_length.unwrap_or(0);
	let messages = [
		ctx.message("field-required-error", &[&label]),
		ctx.message("field-minlength-error", &[&label, &min]),
		ctx.message("field-maxlength-error", &[&label, &max]),
	]
	.iter()
	.map(|message| js_string(message))
	.collect::<Vec<_>>()
	.join(",");
	let call = format!(
		"validateTextField('{id}', {}, {min}, {max}, [{messages}])",
		field.is_required()
	);
	validation_function(id, &call)
}
