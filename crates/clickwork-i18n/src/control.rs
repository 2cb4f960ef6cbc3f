use crate::catalog::MessageCatalog;

/// Keys of the messages produced by the built-in controls
pub const CONTROL_MESSAGE_KEYS: &[&str] = &[
	"field-required-error",
	"field-minlength-error",
	"field-maxlength-error",
	"number-minvalue-error",
	"number-maxvalue-error",
	"integer-format-error",
	"number-format-error",
	"email-format-error",
	"not-checked-error",
	"select-error",
	"post-size-limit-exceeded-error",
	"file-size-limit-exceeded-error",
	"upload-error",
	"table-no-rows-found",
	"formtable-error",
];

/// The English control message catalog.
///
/// `{0}` is always the field label; size errors receive
/// `(permitted, actual)` and `(label, permitted, actual)`.
pub fn control_messages() -> MessageCatalog {
	MessageCatalog::new("en")
		.with_message("field-required-error", "You must enter a value for {0}")
		.with_message("field-minlength-error", "{0} must be at least {1} characters")
		.with_message("field-maxlength-error", "{0} must be no longer than {1} characters")
		.with_message("number-minvalue-error", "{0} must be greater than or equal to {1}")
		.with_message("number-maxvalue-error", "{0} must be less than or equal to {1}")
		.with_message("integer-format-error", "{0} must be a whole number")
		.with_message("number-format-error", "{0} must be a number")
		.with_message("email-format-error", "{0} must be a valid email address")
		.with_message("not-checked-error", "You must select {0}")
		.with_message("select-error", "You must select a value for {0}")
		.with_message(
			"post-size-limit-exceeded-error",
			"The request size of {1} bytes exceeds the permitted maximum of {0} bytes",
		)
		.with_message(
			"file-size-limit-exceeded-error",
			"The {0} file size of {2} bytes exceeds the permitted maximum of {1} bytes",
		)
		.with_message("upload-error", "The request could not be processed: {0}")
		.with_message("table-no-rows-found", "No records found.")
		.with_message("formtable-error", "Invalid values found in the table")
}
