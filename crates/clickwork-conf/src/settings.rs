//! Application settings loaded from TOML
//!
//! ```toml
//! mode = "development"
//! charset = "UTF-8"
//! locale = "en"
//!
//! [pages]
//! package = "shop"
//! automapping = true
//! excludes = ["/static/*"]
//!
//! [[pages.page]]
//! path = "/index.htm"
//! page = "shop.Home"
//!
//! [upload]
//! size_max = 10485760
//! file_size_max = 2097152
//!
//! [resources]
//! source = "resources"
//! target = "public"
//! ```

use clickwork_http::UploadPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigResult;

/// Application mode, controlling caching and log verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Production,
	Profile,
	Development,
	Debug,
	Trace,
}

impl Mode {
	/// Log level matching the mode
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_conf::Mode;
	///
	/// assert_eq!(Mode::Debug.log_level(), tracing::Level::DEBUG);
	/// ```
	pub fn log_level(self) -> tracing::Level {
		match self {
			Mode::Production => tracing::Level::WARN,
			Mode::Profile | Mode::Development => tracing::Level::INFO,
			Mode::Debug => tracing::Level::DEBUG,
			Mode::Trace => tracing::Level::TRACE,
		}
	}

	/// Production and profile modes cache pages and templates
	pub fn is_production(self) -> bool {
		matches!(self, Mode::Production | Mode::Profile)
	}
}

/// An explicit path to page mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMapping {
	pub path: String,
	pub page: String,
}

/// The `[pages]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesSettings {
	/// Prefix of automapped page names
	pub package: String,
	/// Derive page names from template paths
	pub automapping: bool,
	/// Template paths never automapped; a trailing `*` matches a prefix
	pub excludes: Vec<String>,
	#[serde(rename = "page")]
	pub mappings: Vec<PageMapping>,
}

impl Default for PagesSettings {
	fn default() -> Self {
		Self {
			package: String::new(),
			automapping: true,
			excludes: Vec::new(),
			mappings: Vec::new(),
		}
	}
}

/// The `[resources]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
	pub source: Option<PathBuf>,
	pub target: Option<PathBuf>,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickSettings {
	pub mode: Mode,
	pub charset: String,
	pub locale: Option<String>,
	pub pages: PagesSettings,
	pub upload: UploadPolicy,
	pub resources: ResourceSettings,
}

impl Default for ClickSettings {
	fn default() -> Self {
		Self {
			mode: Mode::default(),
			charset: "UTF-8".to_string(),
			locale: None,
			pages: PagesSettings::default(),
			upload: UploadPolicy::default(),
			resources: ResourceSettings::default(),
		}
	}
}

impl ClickSettings {
	/// Parse settings from TOML text
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_conf::{ClickSettings, Mode};
	///
	/// let settings = ClickSettings::from_toml_str("mode = \"debug\"").unwrap();
	/// assert_eq!(settings.mode, Mode::Debug);
	/// assert!(settings.pages.automapping);
	/// ```
	pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Load settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), mode = ?settings.mode, "loaded settings");
		Ok(settings)
	}
}
