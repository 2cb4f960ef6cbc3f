//! Message catalogs and control messages

pub use clickwork_i18n::*;
