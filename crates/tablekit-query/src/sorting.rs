//! Sort direction parsing

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[serde(rename = "asc")]
	Ascending,
	/// Descending order
	#[serde(rename = "desc")]
	Descending,
}

impl SortDirection {
	/// Parses a sort direction from a query parameter
	///
	/// Returns `Ascending` for plain field names and `Descending` for names
	/// prefixed with `-` (e.g., "name" -> Ascending, "-name" -> Descending).
	/// Only the first `-` is stripped.
	pub fn parse_from_query(s: &str) -> (Self, &str) {
		if let Some(field) = s.strip_prefix('-') {
			(Self::Descending, field)
		} else {
			(Self::Ascending, s)
		}
	}
}
