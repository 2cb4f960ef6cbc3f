//! Table errors

use clickwork_forms::ControlError;
use thiserror::Error;

/// Errors raised while configuring a table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
	/// No column with this name
	#[error("unknown column: {0}")]
	UnknownColumn(String),

	/// A column with this name is already registered
	#[error("duplicate column: {0}")]
	DuplicateColumn(String),

	/// The column cannot be sorted
	#[error("column '{0}' is not sortable")]
	NotSortable(String),

	/// A per-row field could not be added to the table's form
	#[error(transparent)]
	Control(#[from] ControlError),
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;
