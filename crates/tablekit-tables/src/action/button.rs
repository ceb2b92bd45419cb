//! Button action type

use super::base::{ActionBase, ActionBuilder};
use serde::Serialize;

/// Action rendered as a button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonAction {
	#[serde(flatten)]
	base: ActionBase,
	color: String,
	size: String,
}

impl ButtonAction {
	pub fn make(name: impl Into<String>) -> Self {
		Self {
			base: ActionBase::new(name),
			color: "primary".to_string(),
			size: "md".to_string(),
		}
	}

	pub fn color(mut self, color: impl Into<String>) -> Self {
		self.color = color.into();
		self
	}

	pub fn size(mut self, size: impl Into<String>) -> Self {
		self.size = size.into();
		self
	}
}

impl ActionBuilder for ButtonAction {
	fn base(&self) -> &ActionBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut ActionBase {
		&mut self.base
	}
}
