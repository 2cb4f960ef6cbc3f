//! Page mapping scenarios

use clickwork_conf::{
	ClickSettings, ConfigError, PageCatalog, PageMapping, PageRegistry, scan_templates,
};
use clickwork_forms::Page;
use rstest::{fixture, rstest};
use std::fs;

#[fixture]
fn catalog() -> PageCatalog {
	PageCatalog::new()
		.with_page("shop.Home", |path| Page::new(path))
		.with_page("shop.customer.EditCustomer", |path| Page::new(path))
		.with_page("shop.LoginPage", |path| Page::new(path))
}

#[fixture]
fn settings() -> ClickSettings {
	let mut settings = ClickSettings::default();
	settings.pages.package = "shop".to_string();
	settings
}

#[rstest]
fn test_automapping_resolves_templates(settings: ClickSettings, catalog: PageCatalog) {
	// Act
	let registry = PageRegistry::build(
		&settings,
		catalog,
		&["/home.htm", "customer/edit-customer.htm", "/login.htm", "/orphan.htm"],
	)
	.unwrap();

	// Assert
	assert_eq!(registry.len(), 3);
	assert_eq!(registry.page_for_path("home.htm"), Some("shop.Home"));
	assert_eq!(
		registry.page_for_path("/customer/edit-customer.htm"),
		Some("shop.customer.EditCustomer")
	);
	assert_eq!(registry.page_for_path("/login.htm"), Some("shop.LoginPage"));
	assert_eq!(registry.page_for_path("/orphan.htm"), None);
	assert_eq!(registry.path_for_page("shop.Home"), Some("/home.htm"));
}

#[rstest]
fn test_explicit_mapping_wins_over_automapping(
	mut settings: ClickSettings,
	catalog: PageCatalog,
) {
	// Arrange
	settings.pages.mappings.push(PageMapping {
		path: "home.htm".to_string(),
		page: "shop.LoginPage".to_string(),
	});

	// Act
	let registry = PageRegistry::build(&settings, catalog, &["/home.htm"]).unwrap();

	// Assert
	assert_eq!(registry.page_for_path("/home.htm"), Some("shop.LoginPage"));
	assert_eq!(registry.path_for_page("shop.Home"), None);
}

#[rstest]
fn test_duplicate_explicit_path_is_rejected(mut settings: ClickSettings, catalog: PageCatalog) {
	// Arrange
	for page in ["shop.Home", "shop.LoginPage"] {
		settings.pages.mappings.push(PageMapping {
			path: "/home.htm".to_string(),
			page: page.to_string(),
		});
	}

	// Act
	let result = PageRegistry::build(&settings, catalog, &[] as &[&str]);

	// Assert
	assert!(matches!(result, Err(ConfigError::DuplicatePath(path)) if path == "/home.htm"));
}

#[rstest]
fn test_unknown_explicit_page_is_rejected(mut settings: ClickSettings, catalog: PageCatalog) {
	// Arrange
	settings.pages.mappings.push(PageMapping {
		path: "/admin.htm".to_string(),
		page: "shop.Admin".to_string(),
	});

	// Act
	let result = PageRegistry::build(&settings, catalog, &[] as &[&str]);

	// Assert
	assert!(matches!(
		result,
		Err(ConfigError::UnknownPage { path, page }) if path == "/admin.htm" && page == "shop.Admin"
	));
}

#[rstest]
fn test_excludes_skip_templates(mut settings: ClickSettings, catalog: PageCatalog) {
	// Arrange
	settings.pages.excludes = vec!["/customer/*".to_string(), "home.htm".to_string()];

	// Act
	let registry = PageRegistry::build(
		&settings,
		catalog,
		&["/home.htm", "/customer/edit-customer.htm", "/login.htm"],
	)
	.unwrap();

	// Assert
	assert_eq!(registry.len(), 1);
	assert_eq!(registry.page_for_path("/login.htm"), Some("shop.LoginPage"));
}

#[rstest]
fn test_automapping_can_be_disabled(mut settings: ClickSettings, catalog: PageCatalog) {
	// Arrange
	settings.pages.automapping = false;

	// Act
	let registry = PageRegistry::build(&settings, catalog, &["/home.htm"]).unwrap();

	// Assert
	assert!(registry.is_empty());
}

#[rstest]
fn test_create_page_for_mapped_path(settings: ClickSettings, catalog: PageCatalog) {
	// Arrange
	let registry = PageRegistry::build(&settings, catalog, &["/home.htm"]).unwrap();

	// Act
	let page = registry.create_page("home.htm").unwrap();
	let missing = registry.create_page("/missing.htm");

	// Assert
	assert_eq!(page.path(), "/home.htm");
	assert!(matches!(missing, Err(ConfigError::UnmappedPath(path)) if path == "/missing.htm"));
}

#[rstest]
fn test_invalidate_rebuilds_mappings(settings: ClickSettings, catalog: PageCatalog) {
	// Arrange
	let mut registry = PageRegistry::build(&settings, catalog, &["/home.htm"]).unwrap();

	// Act
	registry.invalidate(&["/login.htm"]).unwrap();

	// Assert
	assert_eq!(registry.page_for_path("/home.htm"), None);
	assert_eq!(registry.page_for_path("/login.htm"), Some("shop.LoginPage"));
}

#[rstest]
fn test_scan_templates_finds_htm_files() {
	// Arrange
	let root = tempfile::tempdir().unwrap();
	fs::create_dir_all(root.path().join("customer")).unwrap();
	fs::write(root.path().join("home.htm"), "").unwrap();
	fs::write(root.path().join("customer/edit-customer.htm"), "").unwrap();
	fs::write(root.path().join("style.css"), "").unwrap();

	// Act
	let templates = scan_templates(root.path()).unwrap();

	// Assert
	assert_eq!(templates, vec!["/customer/edit-customer.htm", "/home.htm"]);
}

#[rstest]
fn test_scan_templates_requires_directory() {
	// Arrange
	let file = tempfile::NamedTempFile::new().unwrap();

	// Act
	let result = scan_templates(file.path());

	// Assert
	assert!(matches!(result, Err(ConfigError::InvalidDirectory(_))));
}
