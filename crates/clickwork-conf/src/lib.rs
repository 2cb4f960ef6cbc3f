//! Settings, page mappings and resource deployment for clickwork
//!
//! - [`ClickSettings`] is read from a TOML file
//! - [`PageRegistry`] maps request paths to pages registered in a [`PageCatalog`]
//! - [`ResourceDeployer`] copies static resources into the web root
//!
//! ## Example
//!
//! ```
//! use clickwork_conf::{ClickSettings, PageCatalog, PageRegistry};
//! use clickwork_forms::Page;
//!
//! let settings = ClickSettings::from_toml_str(r#"
//! [pages]
//! package = "shop"
//! "#).unwrap();
//! let catalog = PageCatalog::new()
//! 	.with_page("shop.customer.EditCustomer", |path| Page::new(path));
//!
//! let registry = PageRegistry::build(&settings, catalog, &["/customer/edit-customer.htm"]).unwrap();
//! assert_eq!(registry.page_for_path("/customer/edit-customer.htm"), Some("shop.customer.EditCustomer"));
//! ```

pub mod deploy;
pub mod error;
pub mod registry;
pub mod settings;

pub use deploy::{DeployReport, ResourceDeployer};
pub use error::{ConfigError, ConfigResult};
pub use registry::{PageCatalog, PageRegistry, scan_templates};
pub use settings::{ClickSettings, Mode, PageMapping, PagesSettings, ResourceSettings};
