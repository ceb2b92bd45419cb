//! Column definitions
//!
//! A column describes one attribute of the records a table lists: how it is
//! labelled, whether the table may be sorted by it, whether search terms are
//! matched against it, and type-specific presentation hints for the client.

pub mod badge;
pub mod base;
pub mod date;
pub mod text;

pub use badge::{BadgeColumn, BadgeStyle};
pub use base::{ColumnBase, ColumnBuilder};
pub use date::DateColumn;
pub use text::TextColumn;

use serde::Serialize;

/// A column of one of the supported types
///
/// Serializes to the flat descriptor the client renders from:
/// `{type, name, label, sortable, searchable, ...type-specific fields}`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Column {
	Text(TextColumn),
	Badge(BadgeColumn),
	Date(DateColumn),
}

impl Column {
	pub fn base(&self) -> &ColumnBase {
		match self {
			Self::Text(column) => column.base(),
			Self::Badge(column) => column.base(),
			Self::Date(column) => column.base(),
		}
	}

	pub fn name(&self) -> &str {
		self.base().name()
	}

	pub fn label(&self) -> &str {
		self.base().label()
	}

	pub fn is_sortable(&self) -> bool {
		self.base().is_sortable()
	}

	pub fn is_searchable(&self) -> bool {
		self.base().is_searchable()
	}

	/// Type tag sent to the client
	pub fn column_type(&self) -> &'static str {
		match self {
			Self::Text(_) => "text",
			Self::Badge(_) => "badge",
			Self::Date(_) => "date",
		}
	}
}

impl From<TextColumn> for Column {
	fn from(column: TextColumn) -> Self {
		Self::Text(column)
	}
}

impl From<BadgeColumn> for Column {
	fn from(column: BadgeColumn) -> Self {
		Self::Badge(column)
	}
}

impl From<DateColumn> for Column {
	fn from(column: DateColumn) -> Self {
		Self::Date(column)
	}
}
