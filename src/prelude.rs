//! Commonly used types
//!
//! ```rust
//! use clickwork::prelude::*;
//! ```

pub use clickwork_http::{Context, FileItem, Session, UploadPolicy};
pub use clickwork_i18n::{MessageCatalog, MessageSource};

#[cfg(feature = "forms")]
pub use clickwork_forms::{
	ActionLink, Button, Checkbox, Container, Control, FORM_NAME, Field, FieldSet, Form,
	HiddenField, HtmlBuffer, IntegerField, Page, PageLink, PageResponse, Panel, RadioGroup,
	Select, TextField,
};

#[cfg(feature = "tables")]
pub use clickwork_tables::{BaseColumn, Column, FieldColumn, FormTable, Table};

#[cfg(feature = "conf")]
pub use clickwork_conf::{ClickSettings, PageCatalog, PageRegistry, ResourceDeployer};
