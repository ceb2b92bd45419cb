use thiserror::Error;

/// State store errors
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateStoreError {
	#[error("State store unavailable: {0}")]
	Unavailable(String),
	#[error("Backend error: {0}")]
	Backend(String),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
	#[cfg(feature = "sqlite")]
	#[error("Database error: {0}")]
	Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StateStoreError>;
