//! Path to page mappings
//!
//! Pages are registered by name in a [`PageCatalog`]. A [`PageRegistry`]
//! binds request paths to those names, first from the explicit
//! `[[pages.page]]` entries and then by deriving a name from each template
//! path when automapping is enabled.

use clickwork_forms::Page;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

use crate::error::{ConfigError, ConfigResult};
use crate::settings::{ClickSettings, PagesSettings};

type PageFactory = Arc<dyn Fn(&str) -> Page + Send + Sync>;

/// Page factories registered by page name
#[derive(Clone, Default)]
pub struct PageCatalog {
	factories: HashMap<String, PageFactory>,
}

impl PageCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a factory under `name`, replacing any previous one
	///
	/// The factory receives the request path the page is created for.
	///
	/// # Examples
	///
	/// ```
	/// use clickwork_conf::PageCatalog;
	/// use clickwork_forms::Page;
	///
	/// let mut catalog = PageCatalog::new();
	/// catalog.register("shop.Home", |path| Page::new(path));
	/// assert!(catalog.contains("shop.Home"));
	/// ```
	pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
	where
		F: Fn(&str) -> Page + Send + Sync + 'static,
	{
		self.factories.insert(name.into(), Arc::new(factory));
	}

	/// Builder form of [`PageCatalog::register`]
	pub fn with_page<F>(mut self, name: impl Into<String>, factory: F) -> Self
	where
		F: Fn(&str) -> Page + Send + Sync + 'static,
	{
		self.register(name, factory);
		self
	}

	pub fn contains(&self, name: &str) -> bool {
		self.factories.contains_key(name)
	}

	pub fn create(&self, name: &str, path: &str) -> Option<Page> {
		self.factories.get(name).map(|factory| factory(path))
	}

	pub fn len(&self) -> usize {
		self.factories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.factories.is_empty()
	}
}

impl fmt::Debug for PageCatalog {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<_> = self.factories.keys().collect();
		names.sort();
		f.debug_struct("PageCatalog").field("pages", &names).finish()
	}
}

/// Resolved path to page name mappings
///
/// Built once at startup and replaced wholesale by [`PageRegistry::invalidate`];
/// lookups never see a partially built table.
#[derive(Debug, Clone)]
pub struct PageRegistry {
	pages: PagesSettings,
	catalog: PageCatalog,
	by_path: HashMap<String, String>,
	by_page: HashMap<String, String>,
}

impl PageRegistry {
	/// Build the mappings from settings and the given template paths
	///
	/// Explicit mappings must name registered pages and may not repeat a
	/// path. Automapped templates that resolve to no registered page are
	/// skipped.
	pub fn build<S: AsRef<str>>(
		settings: &ClickSettings,
		catalog: PageCatalog,
		templates: &[S],
	) -> ConfigResult<Self> {
		let mut registry = Self {
			pages: settings.pages.clone(),
			catalog,
			by_path: HashMap::new(),
			by_page: HashMap::new(),
		};
		registry.load(templates)?;
		Ok(registry)
	}

	fn load<S: AsRef<str>>(&mut self, templates: &[S]) -> ConfigResult<()> {
		let mut by_path = HashMap::new();
		let mut by_page = HashMap::new();

		for mapping in &self.pages.mappings {
			let path = normalize_path(&mapping.path);
			if by_path.contains_key(&path) {
				return Err(ConfigError::DuplicatePath(path));
			}
			if !self.catalog.contains(&mapping.page) {
				return Err(ConfigError::UnknownPage {
					path,
					page: mapping.page.clone(),
				});
			}
			by_page
				.entry(mapping.page.clone())
				.or_insert_with(|| path.clone());
			by_path.insert(path, mapping.page.clone());
		}

		if self.pages.automapping {
			for template in templates {
				let path = normalize_path(template.as_ref());
				if by_path.contains_key(&path) || self.is_excluded(&path) {
					continue;
				}
				match self.resolve_page_name(&path) {
					Some(page) => {
						tracing::debug!(path = %path, page = %page, "automapped page");
						by_page.entry(page.clone()).or_insert_with(|| path.clone());
						by_path.insert(path, page);
					}
					None => {
						tracing::debug!(path = %path, "no page registered for template");
					}
				}
			}
		}

		tracing::info!(count = by_path.len(), "page mappings loaded");
		self.by_path = by_path;
		self.by_page = by_page;
		Ok(())
	}

	fn is_excluded(&self, path: &str) -> bool {
		self.pages.excludes.iter().any(|exclude| {
			let exclude = normalize_path(exclude);
			match exclude.strip_suffix('*') {
				Some(prefix) => path.starts_with(prefix),
				None => path == exclude,
			}
		})
	}

	fn resolve_page_name(&self, path: &str) -> Option<String> {
		let name = page_name_for_path(&self.pages.package, path);
		if self.catalog.contains(&name) {
			return Some(name);
		}
		let suffixed = format!("{name}Page");
		self.catalog.contains(&suffixed).then_some(suffixed)
	}

	/// Page name mapped to `path`
	pub fn page_for_path(&self, path: &str) -> Option<&str> {
		self.by_path.get(&normalize_path(path)).map(String::as_str)
	}

	/// First path mapped to `page`
	pub fn path_for_page(&self, page: &str) -> Option<&str> {
		self.by_page.get(page).map(String::as_str)
	}

	/// Create a fresh page instance for a request path
	pub fn create_page(&self, path: &str) -> ConfigResult<Page> {
		let path = normalize_path(path);
		self.by_path
			.get(&path)
			.and_then(|page| self.catalog.create(page, &path))
			.ok_or(ConfigError::UnmappedPath(path))
	}

	/// Rebuild every mapping from a new set of templates
	///
	/// On error the previous mappings stay in place.
	pub fn invalidate<S: AsRef<str>>(&mut self, templates: &[S]) -> ConfigResult<()> {
		let mut rebuilt = self.clone();
		rebuilt.load(templates)?;
		*self = rebuilt;
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.by_path.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_path.is_empty()
	}
}

fn normalize_path(path: &str) -> String {
	let path = path.replace('\\', "/");
	if path.starts_with('/') {
		path
	} else {
		format!("/{path}")
	}
}

/// Derive a page name from a template path
///
/// Directories become dot separated segments and the file stem is
/// camel cased on `-` and `_`.
///
/// # Examples
///
/// ```
/// use clickwork_conf::registry::page_name_for_path;
///
/// assert_eq!(page_name_for_path("shop", "/customer/edit-customer.htm"), "shop.customer.EditCustomer");
/// assert_eq!(page_name_for_path("", "home.htm"), "Home");
/// ```
pub fn page_name_for_path(package: &str, path: &str) -> String {
	let path = path.trim_start_matches('/');
	let stem = match path.rsplit_once('.') {
		Some((stem, _)) if !stem.is_empty() => stem,
		_ => path,
	};

	let mut segments: Vec<String> = Vec::new();
	if !package.is_empty() {
		segments.push(package.to_string());
	}
	let mut parts = stem.split('/').filter(|part| !part.is_empty()).peekable();
	while let Some(part) = parts.next() {
		if parts.peek().is_some() {
			segments.push(part.to_string());
		} else {
			segments.push(camel_case(part));
		}
	}
	segments.join(".")
}

fn camel_case(name: &str) -> String {
	name.split(['-', '_'])
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect()
}

/// Collect `.htm` template paths below `root`, relative and `/` separated
pub fn scan_templates(root: impl AsRef<Path>) -> ConfigResult<Vec<String>> {
	let root = root.as_ref();
	if !root.is_dir() {
		return Err(ConfigError::InvalidDirectory(root.to_path_buf()));
	}

	let mut templates = Vec::new();
	for entry in WalkDir::new(root).sort_by_file_name() {
		let entry = entry?;
		if !entry.file_type().is_file() {
			continue;
		}
		let path = entry.path();
		if path.extension().and_then(|ext| ext.to_str()) != Some("htm") {
			continue;
		}
		if let Ok(relative) = path.strip_prefix(root) {
			let relative = relative
				.components()
				.map(|component| component.as_os_str().to_string_lossy())
				.collect::<Vec<_>>()
				.join("/");
			templates.push(format!("/{relative}"));
		}
	}
	Ok(templates)
}
