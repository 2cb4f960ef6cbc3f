//! Tables and form tables

pub use clickwork_tables::*;
