use thiserror::Error;

/// Structural errors raised by controls and containers.
///
/// These signal defects in calling code and are never swallowed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Control not found: {0}")]
	NotFound(String),
	#[error("Index {index} out of bounds for container of size {len}")]
	IndexOutOfBounds { index: usize, len: usize },
	#[error("Invalid field type for {name}: {reason}")]
	InvalidFieldType { name: String, reason: String },
	#[error("Invalid width {width} for field {name}: width must be at least 1")]
	InvalidWidth { name: String, width: usize },
	#[error("Field {name} expects a {expected} value, got {found}")]
	ValueType {
		name: String,
		expected: &'static str,
		found: String,
	},
	#[error("Illegal state: {0}")]
	IllegalState(String),
}

pub type ControlResult<T> = Result<T, ControlError>;

/// Failures resolving a property path against a bean or map
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
	#[error("No property {property} on {type_name}")]
	NoAccessor {
		type_name: &'static str,
		property: String,
	},
	#[error("Property {property} of {type_name} holds a plain value, cannot resolve {remaining}")]
	NotNested {
		type_name: &'static str,
		property: String,
		remaining: String,
	},
	#[error("Type mismatch on {property}: {reason}")]
	TypeMismatch { property: String, reason: String },
	#[error("Cannot instantiate null intermediate property {property} of {type_name}")]
	NullIntermediate {
		type_name: &'static str,
		property: String,
	},
}

pub type PropertyResult<T> = Result<T, PropertyError>;

/// Failures while copying values between fields and an object graph.
///
/// Binding never stops at the first failing field. A single failure is
/// reported as-is; several are reported together as [`BindingError::Failed`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
	#[error("Cannot bind field {field}: {source}")]
	Property {
		field: String,
		#[source]
		source: PropertyError,
	},
	#[error("Cannot assign value to field {field}: {source}")]
	Field {
		field: String,
		#[source]
		source: ControlError,
	},
	#[error("{} fields failed to bind", .0.len())]
	Failed(Vec<BindingError>),
}

impl BindingError {
	/// Collapse collected failures into a result
	pub(crate) fn collect(mut errors: Vec<BindingError>) -> Result<(), BindingError> {
		match errors.len() {
			0 => Ok(()),
			1 => Err(errors.remove(0)),
			_ => Err(BindingError::Failed(errors)),
		}
	}

	/// Names of every field that failed to bind
	pub fn fields(&self) -> Vec<&str> {
		match self {
			BindingError::Property { field, .. } | BindingError::Field { field, .. } => {
				vec![field.as_str()]
			}
			BindingError::Failed(errors) => errors.iter().flat_map(BindingError::fields).collect(),
		}
	}
}

pub type BindingResult<T> = Result<T, BindingError>;
