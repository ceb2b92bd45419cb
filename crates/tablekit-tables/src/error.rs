use tablekit_query::QueryError;
use thiserror::Error;

/// Errors surfaced while rendering a table
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TableError {
	/// The table was rendered before a query was supplied
	#[error("Query must be set before rendering the table `{0}`")]
	MissingQuery(String),
	#[error("Query error: {0}")]
	Query(#[from] QueryError),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
