//! Settings module.
//!
//! Table defaults loaded from code, environment variables or TOML/JSON files.
//!
//! # Examples
//!
//! ```rust
//! use tablekit::conf::TableSettings;
//!
//! let settings = TableSettings::default();
//! assert_eq!(settings.pagination.default_per_page, 15);
//! assert_eq!(settings.state_key("users"), "tables.users");
//! ```

pub use tablekit_conf::*;
