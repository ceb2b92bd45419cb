//! String and value helpers shared by the table pipeline

use convert_case::{Boundary, Case, Casing};
use serde_json::Value;

/// Converts an attribute name into a human readable label
///
/// A name containing spaces is split on spaces, underscores and dashes.
/// Any other name is additionally split before every upper-case letter, so
/// runs of capitals become single-letter words. Every word is capitalized.
///
/// # Examples
///
/// ```
/// use tablekit_tables::utils::headline;
///
/// assert_eq!(headline("created_at"), "Created At");
/// assert_eq!(headline("firstName"), "First Name");
/// assert_eq!(headline("send-email"), "Send Email");
/// ```
pub fn headline(value: &str) -> String {
	let words = if value.contains(' ') {
		value.to_string()
	} else {
		space_before_upper(value)
	};

	words
		.with_boundaries(&[Boundary::Space, Boundary::Underscore, Boundary::Hyphen])
		.to_case(Case::Title)
}

/// `userID` -> `user I D`
fn space_before_upper(value: &str) -> String {
	value
		.chars()
		.enumerate()
		.flat_map(|(index, c)| {
			let space = (index > 0 && c.is_uppercase()).then_some(' ');
			space.into_iter().chain(std::iter::once(c))
		})
		.collect()
}

/// Returns true for values that count as "not supplied"
///
/// `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}` are blank. A
/// select whose value is zero is therefore indistinguishable from no
/// selection.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64() == Some(0.0),
		Value::String(text) => text.is_empty() || text == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
	}
}

/// String form of a scalar request value
///
/// Compound values and `null` have no string form.
pub fn scalar_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(true) => Some("1".to_string()),
		Value::Bool(false) => Some(String::new()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("name", "Name")]
	#[case("created_at", "Created At")]
	#[case("email_notification_sent", "Email Notification Sent")]
	#[case("firstName", "First Name")]
	#[case("send-email", "Send Email")]
	#[case("delete all", "Delete All")]
	#[case("userID", "User I D")]
	#[case("HTMLParser", "H T M L Parser")]
	#[case("user_firstName", "User First Name")]
	#[case("Delete myItem", "Delete Myitem")]
	#[case("", "")]
	fn test_headline(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(headline(input), expected);
	}

	#[rstest]
	#[case(json!(null), true)]
	#[case(json!(false), true)]
	#[case(json!(0), true)]
	#[case(json!(0.0), true)]
	#[case(json!(""), true)]
	#[case(json!("0"), true)]
	#[case(json!([]), true)]
	#[case(json!({}), true)]
	#[case(json!("active"), false)]
	#[case(json!("0.0"), false)]
	#[case(json!(" "), false)]
	#[case(json!(true), false)]
	#[case(json!(3), false)]
	#[case(json!(["a"]), false)]
	fn test_is_blank(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_blank(&value), expected);
	}

	#[test]
	fn test_scalar_string() {
		assert_eq!(scalar_string(&json!("-name")), Some("-name".to_string()));
		assert_eq!(scalar_string(&json!(0)), Some("0".to_string()));
		assert_eq!(scalar_string(&json!(["name"])), None);
		assert_eq!(scalar_string(&json!(null)), None);
	}
}
