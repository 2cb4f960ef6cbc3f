//! Static resource deployment

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ConfigError, ConfigResult};
use crate::settings::ClickSettings;

/// Files copied and files left alone by a deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
	/// Target paths written
	pub deployed: Vec<PathBuf>,
	/// Target paths that already existed
	pub skipped: Vec<PathBuf>,
}

impl DeployReport {
	pub fn total(&self) -> usize {
		self.deployed.len() + self.skipped.len()
	}
}

/// Copies static resources into a web root
///
/// Existing target files are never overwritten, so an application can
/// override any deployed resource by shipping its own copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceDeployer;

impl ResourceDeployer {
	pub fn new() -> Self {
		Self
	}

	/// Copy every file under `source` that is missing below `target`
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_conf::ResourceDeployer;
	///
	/// let source = tempfile::tempdir().unwrap();
	/// let target = tempfile::tempdir().unwrap();
	/// std::fs::write(source.path().join("style.css"), "body {}").unwrap();
	///
	/// let report = ResourceDeployer::new().deploy(source.path(), target.path()).unwrap();
	/// assert_eq!(report.deployed.len(), 1);
	/// assert!(target.path().join("style.css").exists());
	/// ```
	pub fn deploy(
		&self,
		source: impl AsRef<Path>,
		target: impl AsRef<Path>,
	) -> ConfigResult<DeployReport> {
		let source = source.as_ref();
		let target = target.as_ref();
		if !source.is_dir() {
			return Err(ConfigError::InvalidDirectory(source.to_path_buf()));
		}

		let mut report = DeployReport::default();
		for entry in WalkDir::new(source).sort_by_file_name() {
			let entry = entry?;
			if !entry.file_type().is_file() {
				continue;
			}
			let Ok(relative) = entry.path().strip_prefix(source) else {
				continue;
			};
			let destination = target.join(relative);
			if destination.exists() {
				tracing::debug!(path = %destination.display(), "resource exists, skipped");
				report.skipped.push(destination);
				continue;
			}
			if let Some(parent) = destination.parent() {
				fs::create_dir_all(parent)?;
			}
			fs::copy(entry.path(), &destination)?;
			tracing::info!(path = %destination.display(), "deployed resource");
			report.deployed.push(destination);
		}
		Ok(report)
	}

	/// Deploy using the `[resources]` settings
	///
	/// Returns an empty report when either directory is not configured.
	pub fn deploy_settings(&self, settings: &ClickSettings) -> ConfigResult<DeployReport> {
		match (&settings.resources.source, &settings.resources.target) {
			(Some(source), Some(target)) => self.deploy(source, target),
			_ => {
				tracing::debug!("resource deployment not configured");
				Ok(DeployReport::default())
			}
		}
	}
}
