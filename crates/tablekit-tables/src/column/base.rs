//! Fields and builder methods shared by every column type

use crate::utils::headline;
use serde::Serialize;

/// Shared column fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBase {
	name: String,
	label: String,
	sortable: bool,
	searchable: bool,
}

impl ColumnBase {
	/// Creates the base of a column named `name`, labelled after it
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			label: headline(&name),
			name,
			sortable: false,
			searchable: false,
		}
	}

	/// Record attribute this column displays
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	pub fn is_searchable(&self) -> bool {
		self.searchable
	}
}

/// Builder methods available on every column type
pub trait ColumnBuilder: Sized {
	fn base(&self) -> &ColumnBase;

	fn base_mut(&mut self) -> &mut ColumnBase;

	/// Overrides the label derived from the name
	fn label(mut self, label: impl Into<String>) -> Self {
		self.base_mut().label = label.into();
		self
	}

	/// Sets whether the table may be sorted by this column
	fn sortable(mut self, sortable: bool) -> Self {
		self.base_mut().sortable = sortable;
		self
	}

	/// Sets whether search terms are matched against this column
	fn searchable(mut self, searchable: bool) -> Self {
		self.base_mut().searchable = searchable;
		self
	}
}
