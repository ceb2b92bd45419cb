//! Incoming request parameters

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Parameters of the request a table is rendered for
///
/// Holds the decoded query string as a JSON map. Bracketed keys nest:
/// `filters[status]=active` becomes `{"filters": {"status": "active"}}` and
/// `filters[tags][]=a` appends to a list.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tablekit_tables::RequestParams;
///
/// let request = RequestParams::from_query("/users?sort=-name&filters[status]=active&page=2");
///
/// assert_eq!(request.path(), "/users");
/// assert_eq!(request.get("sort"), Some(&json!("-name")));
/// assert_eq!(request.get("filters"), Some(&json!({"status": "active"})));
/// assert!(request.has("page"));
/// assert!(!request.has("search"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
	path: String,
	params: Map<String, Value>,
}

impl RequestParams {
	pub fn new() -> Self {
		Self {
			path: "/".to_string(),
			params: Map::new(),
		}
	}

	pub fn from_map(params: Map<String, Value>) -> Self {
		Self {
			params,
			..Self::new()
		}
	}

	/// Uses the entries of a JSON object; other values give no parameters
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::Object(params) => Self::from_map(params),
			_ => Self::new(),
		}
	}

	/// Parses a request target (`/path?query`) or a bare query string
	pub fn from_query(target: &str) -> Self {
		let (path, query) = match target.split_once('?') {
			Some((path, query)) => (path, query),
			None if target.starts_with('/') => (target, ""),
			None => ("", target),
		};

		let mut params = Map::new();
		for (key, value) in form_urlencoded::parse(query.as_bytes()) {
			insert_param(&mut params, &key, Value::String(value.into_owned()));
		}

		let mut request = Self::from_map(params);
		if !path.is_empty() {
			request.path = path.to_string();
		}
		request
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	/// Whether `key` was supplied, even with an empty value
	pub fn has(&self, key: &str) -> bool {
		self.params.contains_key(key)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.params.get(key)
	}

	pub fn all(&self) -> &Map<String, Value> {
		&self.params
	}

	/// Flattens the parameters back into query-string pairs
	///
	/// Objects become `key[sub]` pairs and lists `key[]` pairs; `null`
	/// values are dropped and booleans become `1`/`0`.
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		for (key, value) in &self.params {
			flatten_into(&mut pairs, key.clone(), value);
		}
		pairs
	}
}

impl Default for RequestParams {
	fn default() -> Self {
		Self::new()
	}
}

fn insert_param(params: &mut Map<String, Value>, key: &str, value: Value) {
	let Some((name, path)) = split_key(key) else {
		params.insert(key.to_string(), value);
		return;
	};
	insert_nested(params, name, &path, value);
}

/// Splits `a[b][]` into `("a", ["b", ""])`; keys without brackets give `None`
fn split_key(key: &str) -> Option<(&str, Vec<&str>)> {
	let open = key.find('[')?;
	if open == 0 {
		return None;
	}
	let (name, mut rest) = key.split_at(open);
	let mut segments = Vec::new();
	while let Some(inner) = rest.strip_prefix('[') {
		let close = inner.find(']')?;
		segments.push(&inner[..close]);
		rest = &inner[close + 1..];
	}
	Some((name, segments))
}

fn insert_nested(map: &mut Map<String, Value>, name: &str, path: &[&str], value: Value) {
	match path.split_first() {
		None => {
			map.insert(name.to_string(), value);
		}
		Some((segment, rest)) => {
			let slot = map.entry(name.to_string()).or_insert(Value::Null);
			insert_into(slot, segment, rest, value);
		}
	}
}

fn insert_into(slot: &mut Value, segment: &str, rest: &[&str], value: Value) {
	if segment.is_empty() {
		if !slot.is_array() {
			*slot = Value::Array(Vec::new());
		}
		if let Value::Array(items) = slot {
			match rest.split_first() {
				None => items.push(value),
				Some((next, tail)) => {
					let mut child = Value::Null;
					insert_into(&mut child, next, tail, value);
					items.push(child);
				}
			}
		}
		return;
	}

	if !slot.is_object() {
		*slot = Value::Object(Map::new());
	}
	if let Value::Object(map) = slot {
		insert_nested(map, segment, rest, value);
	}
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
	match value {
		Value::Null => {}
		Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
		Value::Number(number) => pairs.push((key, number.to_string())),
		Value::String(text) => pairs.push((key, text.clone())),
		Value::Array(items) => {
			for item in items {
				flatten_into(pairs, format!("{}[]", key), item);
			}
		}
		Value::Object(map) => {
			for (sub, item) in map {
				flatten_into(pairs, format!("{}[{}]", key, sub), item);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("", "/", json!({}))]
	#[case("/users", "/users", json!({}))]
	#[case("search=jane", "/", json!({"search": "jane"}))]
	#[case("/users?search=o%27neil+x", "/users", json!({"search": "o'neil x"}))]
	#[case("?sort=name&sort=-name", "/", json!({"sort": "-name"}))]
	#[case("search=", "/", json!({"search": ""}))]
	#[case("filters[status]=active", "/", json!({"filters": {"status": "active"}}))]
	#[case(
		"filters[tags][]=a&filters[tags][]=b",
		"/",
		json!({"filters": {"tags": ["a", "b"]}})
	)]
	#[case("a[b][c]=1", "/", json!({"a": {"b": {"c": "1"}}}))]
	#[case("filters%5Bstatus%5D=active", "/", json!({"filters": {"status": "active"}}))]
	#[case("broken[x=1", "/", json!({"broken[x": "1"}))]
	fn test_from_query(#[case] target: &str, #[case] path: &str, #[case] expected: Value) {
		let request = RequestParams::from_query(target);
		assert_eq!(request.path(), path);
		assert_eq!(Value::Object(request.all().clone()), expected);
	}

	#[test]
	fn test_query_pairs_round_trip() {
		let request = RequestParams::from_value(json!({
			"sort": "-name",
			"filters": {"status": "active", "tags": ["a", "b"], "none": null},
			"archived": false,
			"page": 2,
		}));

		let pairs = request.query_pairs();
		assert_eq!(
			pairs,
			vec![
				("sort".to_string(), "-name".to_string()),
				("filters[status]".to_string(), "active".to_string()),
				("filters[tags][]".to_string(), "a".to_string()),
				("filters[tags][]".to_string(), "b".to_string()),
				("archived".to_string(), "0".to_string()),
				("page".to_string(), "2".to_string()),
			]
		);

		let query: String = form_urlencoded::Serializer::new(String::new())
			.extend_pairs(&pairs)
			.finish();
		let reparsed = RequestParams::from_query(&query);
		assert_eq!(
			reparsed.get("filters"),
			Some(&json!({"status": "active", "tags": ["a", "b"]}))
		);
	}

	#[test]
	fn test_from_value_ignores_non_objects() {
		assert!(RequestParams::from_value(json!(["sort"])).all().is_empty());
	}
}
