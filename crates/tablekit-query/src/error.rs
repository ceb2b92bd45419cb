//! Query execution errors

use thiserror::Error;

/// Errors raised while executing or paginating a query
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum QueryError {
	#[error("Invalid pagination: {0}")]
	InvalidPagination(String),
	#[error("Invalid record: {0}")]
	InvalidRecord(String),
	#[cfg(feature = "sqlite")]
	#[error("Database error: {0}")]
	Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;
