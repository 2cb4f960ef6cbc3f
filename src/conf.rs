//! Settings, page mappings and resource deployment

pub use clickwork_conf::*;
