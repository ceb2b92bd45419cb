use crate::utils::headline;
use serde::Serialize;

/// Shared action fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBase {
	name: String,
	label: String,
	icon: Option<String>,
	url: Option<String>,
	requires_confirmation: bool,
}

impl ActionBase {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			label: headline(&name),
			name,
			icon: None,
			url: None,
			requires_confirmation: false,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn url(&self) -> Option<&str> {
		self.url.as_deref()
	}

	pub fn requires_confirmation(&self) -> bool {
		self.requires_confirmation
	}
}

/// Builder methods available on every action type
pub trait ActionBuilder: Sized {
	fn base(&self) -> &ActionBase;

	fn base_mut(&mut self) -> &mut ActionBase;

	fn label(mut self, label: impl Into<String>) -> Self {
		self.base_mut().label = label.into();
		self
	}

	fn icon(mut self, icon: impl Into<String>) -> Self {
		self.base_mut().icon = Some(icon.into());
		self
	}

	/// Target URL; `:id`-style placeholders are resolved by the client
	fn url(mut self, url: impl Into<String>) -> Self {
		self.base_mut().url = Some(url.into());
		self
	}

	/// Asks the user to confirm before running the action
	fn requires_confirmation(mut self, confirmation: bool) -> Self {
		self.base_mut().requires_confirmation = confirmation;
		self
	}
}
