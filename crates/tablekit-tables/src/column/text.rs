//! Text column type

use super::base::{ColumnBase, ColumnBuilder};
use serde::Serialize;

/// Column for plain text values
///
/// # Examples
///
/// ```
/// use tablekit_tables::column::{ColumnBuilder, TextColumn};
///
/// let column = TextColumn::make("bio").default("N/A").truncate(40).searchable(true);
/// assert_eq!(column.base().label(), "Bio");
/// assert!(column.base().is_searchable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextColumn {
	#[serde(flatten)]
	base: ColumnBase,
	default: Option<String>,
	truncate: Option<usize>,
}

impl TextColumn {
	pub fn make(name: impl Into<String>) -> Self {
		Self {
			base: ColumnBase::new(name),
			default: None,
			truncate: None,
		}
	}

	/// Text shown when the value is missing
	pub fn default(mut self, value: impl Into<String>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Maximum number of characters shown
	pub fn truncate(mut self, length: usize) -> Self {
		self.truncate = Some(length);
		self
	}

	pub fn default_value(&self) -> Option<&str> {
		self.default.as_deref()
	}

	pub fn truncate_length(&self) -> Option<usize> {
		self.truncate
	}
}

impl ColumnBuilder for TextColumn {
	fn base(&self) -> &ColumnBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut ColumnBase {
		&mut self.base
	}
}
