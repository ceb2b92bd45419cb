//! Date column type

use super::base::{ColumnBase, ColumnBuilder};
use serde::Serialize;

/// Column for date values
///
/// `format` holds date tokens (`d/m/Y` by default) interpreted by the
/// client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateColumn {
	#[serde(flatten)]
	base: ColumnBase,
	default: Option<String>,
	format: String,
	timezone: Option<String>,
}

impl DateColumn {
	pub fn make(name: impl Into<String>) -> Self {
		Self {
			base: ColumnBase::new(name),
			default: None,
			format: "d/m/Y".to_string(),
			timezone: None,
		}
	}

	/// Text shown when the value is missing
	pub fn default(mut self, value: impl Into<String>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
		self.timezone = Some(timezone.into());
		self
	}

	pub fn date_format(&self) -> &str {
		&self.format
	}
}

impl ColumnBuilder for DateColumn {
	fn base(&self) -> &ColumnBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut ColumnBase {
		&mut self.base
	}
}
