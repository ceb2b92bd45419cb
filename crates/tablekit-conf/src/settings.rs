//! Table settings loaded from defaults, environment variables, or files

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Settings applied to every table unless overridden per table
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
	/// Pagination defaults
	#[serde(default)]
	pub pagination: PaginationSettings,

	/// Persist table state across requests by default
	#[serde(default)]
	pub preserve_state: bool,

	/// Prefix of the key table state is persisted under
	#[serde(default = "default_session_key_prefix")]
	pub session_key_prefix: String,

	/// Where persisted state lives
	#[serde(default)]
	pub state_store: StateStoreSettings,
}

fn default_session_key_prefix() -> String {
	"tables.".to_string()
}

impl Default for TableSettings {
	fn default() -> Self {
		Self {
			pagination: PaginationSettings::default(),
			preserve_state: false,
			session_key_prefix: default_session_key_prefix(),
			state_store: StateStoreSettings::default(),
		}
	}
}

impl TableSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Key the state of `table` is persisted under
	pub fn state_key(&self, table: &str) -> String {
		format!("{}{}", self.session_key_prefix, table)
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.pagination.default_per_page == 0 {
			return Err(SettingsError::ValidationError(
				"pagination.default_per_page must be at least 1".to_string(),
			));
		}

		if self.pagination.page_name.trim().is_empty() {
			return Err(SettingsError::ValidationError(
				"pagination.page_name must not be empty".to_string(),
			));
		}

		if self.state_store.driver == StateDriver::Database
			&& self.state_store.database_path.is_none()
		{
			return Err(SettingsError::ValidationError(
				"state_store.database_path is required for the database driver".to_string(),
			));
		}

		Ok(())
	}

	/// Load settings from the process environment
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_vars(std::env::vars())
	}

	/// Load settings from `TABLEKIT_*` variables
	///
	/// Unknown variables are ignored; unset variables keep their defaults.
	pub fn from_vars<I, K, V>(vars: I) -> Result<Self, SettingsError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut settings = Self::default();

		for (key, value) in vars {
			let value = value.as_ref();
			match key.as_ref() {
				"TABLEKIT_PER_PAGE" => {
					settings.pagination.default_per_page = value.trim().parse().map_err(|e| {
						SettingsError::ParseError(format!("TABLEKIT_PER_PAGE: {}", e))
					})?;
				}
				"TABLEKIT_PAGE_NAME" => {
					settings.pagination.page_name = value.to_string();
				}
				"TABLEKIT_PRESERVE_STATE" => {
					settings.preserve_state = value.to_lowercase() == "true" || value == "1";
				}
				"TABLEKIT_SESSION_KEY_PREFIX" => {
					settings.session_key_prefix = value.to_string();
				}
				"TABLEKIT_STATE_DRIVER" => {
					settings.state_store.driver = value.parse()?;
				}
				"TABLEKIT_STATE_DATABASE" => {
					settings.state_store.database_path = Some(PathBuf::from(value));
				}
				_ => {}
			}
		}

		Ok(settings)
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings: TableSettings = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		tracing::debug!(path = %path.display(), "Loaded table settings");
		Ok(settings)
	}

	/// Render the settings as TOML
	pub fn to_toml(&self) -> Result<String, SettingsError> {
		toml::to_string(self).map_err(|e| SettingsError::SerializationError(e.to_string()))
	}
}

/// Pagination defaults
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
	pub default_per_page: u64,
	pub page_name: String,
}

impl Default for PaginationSettings {
	fn default() -> Self {
		Self {
			default_per_page: 15,
			page_name: "page".to_string(),
		}
	}
}

/// Backend that persisted table state is written to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateDriver {
	/// Session-scoped in-memory store
	#[default]
	Session,
	/// Durable `table_state` table
	Database,
}

impl fmt::Display for StateDriver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Session => write!(f, "session"),
			Self::Database => write!(f, "database"),
		}
	}
}

impl FromStr for StateDriver {
	type Err = SettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"session" => Ok(Self::Session),
			"database" => Ok(Self::Database),
			other => Err(SettingsError::ParseError(format!(
				"Unknown state driver: {}",
				other
			))),
		}
	}
}

/// State store selection
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateStoreSettings {
	pub driver: StateDriver,
	/// SQLite database file used by the database driver
	pub database_path: Option<PathBuf>,
}

/// Settings error
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	#[error("Serialization error: {0}")]
	SerializationError(String),
}
