//! Configuration errors

use std::path::PathBuf;

/// Error type for settings, page mappings and resource deployment
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Directory walk error: {0}")]
	Walk(#[from] walkdir::Error),

	#[error("Path {0} is mapped more than once")]
	DuplicatePath(String),

	#[error("Page {page} mapped to {path} is not registered")]
	UnknownPage { path: String, page: String },

	#[error("No page is mapped to {0}")]
	UnmappedPath(String),

	#[error("Invalid resource directory: {}", .0.display())]
	InvalidDirectory(PathBuf),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
