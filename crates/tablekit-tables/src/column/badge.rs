//! Badge column type

use super::base::{ColumnBase, ColumnBuilder};
use indexmap::IndexMap;
use serde::Serialize;

/// Presentation of one badge value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeStyle {
	color: Option<String>,
	icon: Option<String>,
}

impl BadgeStyle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn color(mut self, color: impl Into<String>) -> Self {
		self.color = Some(color.into());
		self
	}

	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}
}

/// Column rendering its value as a badge
///
/// Values listed in `states` get their own color and icon; other values use
/// the column-wide ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeColumn {
	#[serde(flatten)]
	base: ColumnBase,
	color: Option<String>,
	icon: Option<String>,
	states: IndexMap<String, BadgeStyle>,
}

impl BadgeColumn {
	pub fn make(name: impl Into<String>) -> Self {
		Self {
			base: ColumnBase::new(name),
			color: None,
			icon: None,
			states: IndexMap::new(),
		}
	}

	pub fn color(mut self, color: impl Into<String>) -> Self {
		self.color = Some(color.into());
		self
	}

	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Replaces the per-value styles
	pub fn states<I, K>(mut self, states: I) -> Self
	where
		I: IntoIterator<Item = (K, BadgeStyle)>,
		K: Into<String>,
	{
		self.states = states
			.into_iter()
			.map(|(value, style)| (value.into(), style))
			.collect();
		self
	}

	/// Adds or replaces the style of one value
	pub fn state(mut self, value: impl Into<String>, style: BadgeStyle) -> Self {
		self.states.insert(value.into(), style);
		self
	}

	/// Style for `value`, if one is declared
	pub fn style_for(&self, value: &str) -> Option<&BadgeStyle> {
		self.states.get(value)
	}
}

impl ColumnBuilder for BadgeColumn {
	fn base(&self) -> &ColumnBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut ColumnBase {
		&mut self.base
	}
}
