//! # Tablekit Conf
//!
//! Settings shared by every table of an application. Settings can be loaded
//! from environment variables, configuration files, or code.
//!
//! ## Example
//!
//! ```rust
//! use tablekit_conf::{StateDriver, TableSettings};
//!
//! let settings = TableSettings::from_vars([
//!     ("TABLEKIT_PER_PAGE", "25"),
//!     ("TABLEKIT_PRESERVE_STATE", "true"),
//! ])
//! .unwrap();
//!
//! assert_eq!(settings.pagination.default_per_page, 25);
//! assert!(settings.preserve_state);
//! assert_eq!(settings.state_store.driver, StateDriver::Session);
//! assert_eq!(settings.state_key("users"), "tables.users");
//! ```

pub mod settings;

pub use settings::{
	PaginationSettings, SettingsError, StateDriver, StateStoreSettings, TableSettings,
};
