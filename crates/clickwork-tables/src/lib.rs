//! Data tables for clickwork pages
//!
//! A [`Table`] renders rows of JSON objects through a list of [`Column`]s,
//! with optional paging and sorting driven by request parameters. A
//! [`FormTable`] adds an embedded form: its [`FieldColumn`]s render one
//! input field per row and write submitted values back into the rows.
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[FormTable] --> B[Table]
//!     A --> C[Form]
//!     B --> D[Columns]
//!     B --> E[Rows]
//!     D --> F[BaseColumn]
//!     D --> G[FieldColumn]
//!     G -->|per row field| C
//! ```
//!
//! # Example
//!
//! ```rust
//! use clickwork_forms::{Control, HtmlBuffer, TextField};
//! use clickwork_tables::{BaseColumn, FieldColumn, FormTable};
//! use serde_json::json;
//!
//! let mut table = FormTable::new("contacts");
//! table.add_column(BaseColumn::new("name")).unwrap();
//! table.add_column(FieldColumn::new("email", TextField::new)).unwrap();
//! table
//!     .set_rows(vec![json!({ "name": "Ann", "email": "ann@example.com" }).as_object().cloned().unwrap()])
//!     .unwrap();
//!
//! let mut buffer = HtmlBuffer::new();
//! table.render(&mut buffer);
//! assert!(buffer.as_str().contains(r#"name="email_0""#));
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod form_table;
pub mod table;

// Re-exports for convenience
pub use column::{BaseColumn, Column, FieldColumn, Row};
pub use error::{Result, TableError};
pub use form_table::FormTable;
pub use table::{SortConfig, Table};
