use crate::json::*;
use std::fmt::Debug;

/// A JSON array, backed by a `Vec<JsonValue>`.
#[derive(Clone, Default, PartialEq)]
pub struct JsonArray(pub Vec<JsonValue>);

impl JsonArray {
	#[must_use]
	pub fn stringify(&self) -> String {
		let items = self.0.iter().map(stringify).collect::<Vec<_>>();
		format!("[{}]", items.join(","))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, JsonValue> {
		self.0.iter()
	}

	pub fn push<T>(&mut self, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.push(JsonValue::from(value));
	}
}

impl Debug for JsonArray {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl<'a> IntoIterator for &'a JsonArray {
	type Item = &'a JsonValue;
	type IntoIter = std::slice::Iter<'a, JsonValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl<T> From<Vec<T>> for JsonArray
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		JsonArray(input.into_iter().map(JsonValue::from).collect())
	}
}

impl<T, const N: usize> From<[T; N]> for JsonArray
where
	JsonValue: From<T>,
{
	fn from(input: [T; N]) -> Self {
		JsonArray(input.into_iter().map(JsonValue::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stringify_mixed() {
		let array = JsonArray(vec![JsonValue::from("x"), JsonValue::from(4), JsonValue::Null]);
		assert_eq!(array.stringify(), r#"["x",4,null]"#);
		assert_eq!(JsonArray::default().stringify(), "[]");
	}

	#[test]
	fn push_and_len() {
		let mut array = JsonArray::default();
		assert!(array.is_empty());
		array.push(1);
		array.push("two");
		assert_eq!(array.len(), 2);
		assert_eq!(array.iter().map(JsonValue::type_as_str).collect::<Vec<_>>(), ["number", "string"]);
	}

	#[test]
	fn from_fixed_array() {
		assert_eq!(JsonArray::from([true, false]).stringify(), "[true,false]");
	}
}
