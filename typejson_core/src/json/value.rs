//! The generic JSON tree produced by the parser and consumed by the converter.

use crate::json::*;
use anyhow::{Result, bail};
use std::fmt::Display;

/// Any JSON document node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum JsonValue {
	Array(JsonArray),
	Boolean(bool),
	#[default]
	Null,
	Number(JsonNumber),
	Object(JsonObject),
	String(String),
}

impl JsonValue {
	/// Parse JSON text into a tree.
	pub fn parse_str(json: &str) -> Result<JsonValue> {
		parse_json_str(json)
	}

	/// Lowercase JSON type name (`"array"`, `"object"`, ...), used in error messages.
	#[must_use]
	pub fn type_as_str(&self) -> &'static str {
		use JsonValue::*;
		match self {
			Array(_) => "array",
			Boolean(_) => "boolean",
			Null => "null",
			Number(_) => "number",
			Object(_) => "object",
			String(_) => "string",
		}
	}

	/// Compact JSON text without any whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		stringify(self)
	}

	#[must_use]
	pub fn new_array() -> JsonValue {
		JsonValue::Array(JsonArray::default())
	}

	#[must_use]
	pub fn new_object() -> JsonValue {
		JsonValue::Object(JsonObject::default())
	}

	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self, JsonValue::Null)
	}

	/// Text of a scalar node as the converter sees it.
	///
	/// Strings are returned as-is, numbers as their literal, booleans as `true`/`false`.
	/// `null`, arrays and objects have no scalar text.
	#[must_use]
	pub fn to_invariant_string(&self) -> Option<String> {
		match self {
			JsonValue::String(text) => Some(text.clone()),
			JsonValue::Number(number) => Some(number.as_str().to_owned()),
			JsonValue::Boolean(b) => Some(b.to_string()),
			JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
		}
	}

	pub fn as_array(&self) -> Result<&JsonArray> {
		match self {
			JsonValue::Array(array) => Ok(array),
			_ => bail!("expected an array, found a {}", self.type_as_str()),
		}
	}

	pub fn as_object(&self) -> Result<&JsonObject> {
		match self {
			JsonValue::Object(object) => Ok(object),
			_ => bail!("expected an object, found a {}", self.type_as_str()),
		}
	}

	pub fn into_object(self) -> Result<JsonObject> {
		match self {
			JsonValue::Object(object) => Ok(object),
			_ => bail!("expected an object, found a {}", self.type_as_str()),
		}
	}

	pub fn as_str(&self) -> Result<&str> {
		match self {
			JsonValue::String(text) => Ok(text),
			_ => bail!("expected a string, found a {}", self.type_as_str()),
		}
	}

	pub fn as_number(&self) -> Result<&JsonNumber> {
		match self {
			JsonValue::Number(number) => Ok(number),
			_ => bail!("expected a number, found a {}", self.type_as_str()),
		}
	}

	pub fn as_bool(&self) -> Result<bool> {
		match self {
			JsonValue::Boolean(b) => Ok(*b),
			_ => bail!("expected a boolean, found a {}", self.type_as_str()),
		}
	}
}

impl Display for JsonValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.stringify())
	}
}

impl From<&str> for JsonValue {
	fn from(input: &str) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<String> for JsonValue {
	fn from(input: String) -> Self {
		JsonValue::String(input)
	}
}

impl From<bool> for JsonValue {
	fn from(input: bool) -> Self {
		JsonValue::Boolean(input)
	}
}

impl From<&JsonValue> for JsonValue {
	fn from(input: &JsonValue) -> Self {
		input.clone()
	}
}

impl<I> From<I> for JsonValue
where
	JsonArray: From<I>,
{
	fn from(input: I) -> Self {
		JsonValue::Array(input.into())
	}
}

impl From<JsonObject> for JsonValue {
	fn from(input: JsonObject) -> Self {
		JsonValue::Object(input)
	}
}
