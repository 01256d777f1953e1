//! JSON object type, an insertion-ordered map of keys to values.
use crate::json::*;
use anyhow::Result;
use indexmap::IndexMap;
use std::fmt::{Debug, Display};

/// A JSON object backed by an `IndexMap<String, JsonValue>`, so entries keep their source order.
#[derive(Clone, Default, PartialEq)]
pub struct JsonObject(pub IndexMap<String, JsonValue>);

impl JsonObject {
	#[must_use]
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
		self.get(key).map(JsonValue::as_str).transpose()
	}

	pub fn get_object(&self, key: &str) -> Result<Option<&JsonObject>> {
		self.get(key).map(JsonValue::as_object).transpose()
	}

	pub fn get_array(&self, key: &str) -> Result<Option<&JsonArray>> {
		self.get(key).map(JsonValue::as_array).transpose()
	}

	/// Insert or replace `key`. A replaced key keeps its original position.
	pub fn set<T>(&mut self, key: &str, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.insert(key.to_owned(), JsonValue::from(value));
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Serialize this object into compact JSON without whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		let items = self
			.0
			.iter()
			.map(|(key, value)| format!("\"{}\":{}", escape_json_string(key), stringify(value)))
			.collect::<Vec<_>>();
		format!("{{{}}}", items.join(","))
	}

	/// Parse JSON text, failing if the root is not an object.
	pub fn parse_str(json: &str) -> Result<JsonObject> {
		JsonValue::parse_str(json)?.into_object()
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
		self.0.iter()
	}
}

impl Debug for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl Display for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.stringify())
	}
}

impl<'a> IntoIterator for &'a JsonObject {
	type Item = (&'a String, &'a JsonValue);
	type IntoIter = indexmap::map::Iter<'a, String, JsonValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl<T> From<Vec<(&str, T)>> for JsonValue
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonValue::Object(JsonObject::from(input))
	}
}

impl<T> From<Vec<(&str, T)>> for JsonObject
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonObject(
			input
				.into_iter()
				.map(|(key, value)| (key.to_string(), JsonValue::from(value)))
				.collect(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_insertion_order() {
		let object = JsonObject::from(vec![("zeta", 1), ("alpha", 2), ("mid", 3)]);
		assert_eq!(object.stringify(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
		assert_eq!(object.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
	}

	#[test]
	fn set_replaces_in_place() {
		let mut object = JsonObject::from(vec![("a", 1), ("b", 2)]);
		object.set("a", "x");
		object.set("c", true);
		assert_eq!(object.stringify(), r#"{"a":"x","b":2,"c":true}"#);
		assert_eq!(object.len(), 3);
	}

	#[test]
	fn typed_getters() -> Result<()> {
		let object = JsonObject::parse_str(r#"{"s":"text","o":{},"a":[1]}"#)?;
		assert_eq!(object.get_str("s")?, Some("text"));
		assert_eq!(object.get_str("missing")?, None);
		assert!(object.get_object("o")?.is_some_and(JsonObject::is_empty));
		assert_eq!(object.get_array("a")?.map(JsonArray::len), Some(1));
		assert!(object.get_str("a").is_err());
		Ok(())
	}

	#[test]
	fn escapes_keys() {
		let object = JsonObject::from(vec![("quote\"d", JsonValue::Null)]);
		assert_eq!(object.to_string(), r#"{"quote\"d":null}"#);
	}

	#[test]
	fn parse_rejects_non_objects() {
		assert!(JsonObject::parse_str("[1]").is_err());
	}
}
