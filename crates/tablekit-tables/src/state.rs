//! The effective state driving one render

use crate::utils::scalar_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tablekit_state::StateMap;

/// Sort, filter, search and page values resolved for one render
///
/// Either the raw request parameters or persisted state merged with them.
/// Unknown keys are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableState(StateMap);

impl TableState {
	pub fn new(values: StateMap) -> Self {
		Self(values)
	}

	/// Filter values keyed by filter name, in request order
	pub fn filters(&self) -> Option<&Map<String, Value>> {
		self.0.get("filters").and_then(Value::as_object)
	}

	/// Raw sort specification, e.g. `name` or `-name`
	pub fn sort(&self) -> Option<String> {
		self.0.get("sort").and_then(scalar_string)
	}

	pub fn search(&self) -> Option<String> {
		self.0.get("search").and_then(scalar_string)
	}

	/// Requested page under `page_name`; anything but an integer >= 1 is page 1
	pub fn page(&self, page_name: &str) -> u64 {
		let page = match self.0.get(page_name) {
			Some(Value::Number(number)) => number.as_u64(),
			Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
			_ => None,
		};
		page.filter(|page| *page >= 1).unwrap_or(1)
	}

	pub fn as_map(&self) -> &StateMap {
		&self.0
	}

	pub fn into_inner(self) -> StateMap {
		self.0
	}
}

impl From<StateMap> for TableState {
	fn from(values: StateMap) -> Self {
		Self(values)
	}
}
