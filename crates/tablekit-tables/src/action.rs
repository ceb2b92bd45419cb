//! Action definitions
//!
//! Actions describe operations offered on rows or on the whole table. They
//! never touch the query or the records.

pub mod base;
pub mod button;

pub use base::{ActionBase, ActionBuilder};
pub use button::ButtonAction;

use serde::Serialize;

/// An action of one of the supported types
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
	Button(ButtonAction),
}

impl Action {
	pub fn base(&self) -> &ActionBase {
		match self {
			Self::Button(action) => action.base(),
		}
	}

	pub fn name(&self) -> &str {
		self.base().name()
	}

	pub fn action_type(&self) -> &'static str {
		match self {
			Self::Button(_) => "button",
		}
	}
}

impl From<ButtonAction> for Action {
	fn from(action: ButtonAction) -> Self {
		Self::Button(action)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_button_descriptor() {
		let action = Action::from(ButtonAction::make("edit").url("/users/:id/edit"));

		assert_eq!(action.name(), "edit");
		assert_eq!(action.action_type(), "button");
		assert_eq!(
			serde_json::to_value(&action).unwrap(),
			json!({
				"type": "button",
				"name": "edit",
				"label": "Edit",
				"icon": null,
				"url": "/users/:id/edit",
				"requiresConfirmation": false,
				"color": "primary",
				"size": "md",
			})
		);
	}

	#[test]
	fn test_requires_confirmation() {
		let action = Action::from(
			ButtonAction::make("delete_all")
				.requires_confirmation(true)
				.color("danger")
				.icon("trash"),
		);
		let value = serde_json::to_value(&action).unwrap();

		assert!(action.base().requires_confirmation());
		assert_eq!(value["label"], "Delete All");
		assert_eq!(value["requiresConfirmation"], true);
		assert_eq!(value["color"], "danger");
		assert_eq!(value["icon"], "trash");
	}
}
