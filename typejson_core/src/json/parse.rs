use super::{JsonArray, JsonNumber, JsonObject, JsonValue};
use crate::byte_iterator::{
	ByteIterator, parse_array_entries, parse_number_as_string, parse_object_entries, parse_quoted_json_string, parse_tag,
};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::io::Read;

/// Deepest nesting of arrays and objects the parser accepts.
pub const MAX_NESTING: usize = 512;

/// Parse a complete JSON document from text.
pub fn parse_json_str(json: &str) -> Result<JsonValue> {
	let mut iter = ByteIterator::from_text(json);
	parse_json_document(&mut iter).with_context(|| format!("while parsing JSON '{}'", excerpt(json)))
}

/// Parse a complete JSON document from a reader.
pub fn parse_json_reader(reader: impl Read) -> Result<JsonValue> {
	let mut iter = ByteIterator::from_reader(reader);
	parse_json_document(&mut iter).context("while parsing JSON from reader")
}

fn parse_json_document(iter: &mut ByteIterator) -> Result<JsonValue> {
	let value = parse_json_iter(iter)?;
	iter.expect_end()?;
	Ok(value)
}

/// Parse one JSON value and leave the iterator right after it.
///
/// Documents nested deeper than [`MAX_NESTING`] are rejected.
pub fn parse_json_iter(iter: &mut ByteIterator) -> Result<JsonValue> {
	parse_nested(iter, 0)
}

fn parse_nested(iter: &mut ByteIterator, depth: usize) -> Result<JsonValue> {
	iter.skip_whitespace();
	let byte = iter.expect_peeked_byte()?;
	if matches!(byte, b'[' | b'{') && depth >= MAX_NESTING {
		return Err(iter.format_error("nesting too deep"));
	}
	match byte {
		b'[' => parse_array_entries(iter, |iter2| parse_nested(iter2, depth + 1)).map(|i| JsonValue::Array(JsonArray(i))),
		b'{' => parse_json_object(iter, depth),
		b'"' => parse_quoted_json_string(iter).map(JsonValue::String),
		d if d.is_ascii_digit() || d == b'-' => {
			parse_number_as_string(iter).map(|n| JsonValue::Number(JsonNumber::from_literal(n)))
		}
		b't' => parse_tag(iter, "true").map(|()| JsonValue::Boolean(true)),
		b'f' => parse_tag(iter, "false").map(|()| JsonValue::Boolean(false)),
		b'n' => parse_tag(iter, "null").map(|()| JsonValue::Null),
		c => Err(iter.format_error(&format!("unexpected character '{}'", c as char))),
	}
}

fn parse_json_object(iter: &mut ByteIterator, depth: usize) -> Result<JsonValue> {
	let mut map = IndexMap::new();
	parse_object_entries(iter, |key, iter2| {
		map.insert(key, parse_nested(iter2, depth + 1)?);
		Ok(())
	})?;
	Ok(JsonValue::Object(JsonObject(map)))
}

fn excerpt(json: &str) -> String {
	const LIMIT: usize = 64;
	match json.char_indices().nth(LIMIT) {
		Some((end, _)) => format!("{}...", &json[..end]),
		None => json.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn v<T>(input: T) -> JsonValue
	where
		JsonValue: From<T>,
	{
		JsonValue::from(input)
	}

	#[test]
	fn simple() -> Result<()> {
		let data = r#"{"users":{"ada":{"age":36,"langs":["en","fr"]}},"count":1,"ok":true,"none":null}"#;
		assert_eq!(
			parse_json_str(data)?,
			v(vec![
				(
					"users",
					v(vec![("ada", v(vec![("age", v(36)), ("langs", v(vec!["en", "fr"]))]))])
				),
				("count", v(1)),
				("ok", v(true)),
				("none", JsonValue::Null),
			])
		);
		Ok(())
	}

	#[test]
	fn numbers_keep_their_text() -> Result<()> {
		let value = parse_json_str("[0.1000000000000000055511, 12345678901234567890123, -1E5]")?;
		let texts = value
			.as_array()?
			.iter()
			.map(|n| n.as_number().map(|n| n.as_str().to_string()))
			.collect::<Result<Vec<_>>>()?;
		assert_eq!(texts, ["0.1000000000000000055511", "12345678901234567890123", "-1E5"]);
		Ok(())
	}

	#[test]
	fn whitespace_everywhere() -> Result<()> {
		let value = parse_json_str(" \n{ \"a\" :\t[ 1 ,\r\n 2 ] } \n")?;
		assert_eq!(value, v(vec![("a", v(vec![1, 2]))]));
		Ok(())
	}

	#[test]
	fn error_position() {
		let err = parse_json_str(r#"{"city":"Nantes","country","France"}"#).unwrap_err();
		assert_eq!(
			err.chain().last().unwrap().to_string(),
			"expected ':' at position 27: tes\",\"country\","
		);
		assert!(err.to_string().starts_with("while parsing JSON"));
	}

	#[test]
	fn trailing_content_is_rejected() {
		assert!(parse_json_str("{} {}").is_err());
		assert!(parse_json_str("1 x").is_err());
		assert!(parse_json_str("  [] \n").is_ok());
	}

	#[test]
	fn invalid_documents() {
		for text in [
			"",
			"{",
			"[1,]",
			"tru",
			"+1",
			".5",
			"{\"a\" 1}",
			"'x'",
			"01",
			"-00",
			"007",
			"[1, 02]",
			"\"a\u{1}b\"",
			"\"tab\there\"",
		] {
			assert!(parse_json_str(text).is_err(), "{text:?} should fail");
		}
	}

	#[test]
	fn nesting_limit() -> Result<()> {
		let nested = |depth: usize| "[".repeat(depth) + &"]".repeat(depth);
		assert!(parse_json_str(&nested(MAX_NESTING))?.as_array().is_ok());

		let err = parse_json_str(&nested(MAX_NESTING + 1)).unwrap_err();
		assert!(err.chain().last().unwrap().to_string().starts_with("nesting too deep"));

		assert!(parse_json_str(&nested(10_000)).is_err());
		let objects = "{\"a\":".repeat(10_000) + "1" + &"}".repeat(10_000);
		assert!(parse_json_str(&objects).is_err());
		Ok(())
	}

	#[test]
	fn zero_may_not_lead() -> Result<()> {
		assert_eq!(parse_json_str("[0, -0, 0.5, -0e1, 10]")?.stringify(), "[0,-0,0.5,-0e1,10]");
		Ok(())
	}

	#[test]
	fn from_reader() -> Result<()> {
		let value = parse_json_reader(r#"{"k":"v"}"#.as_bytes())?;
		assert_eq!(value, v(vec![("k", "v")]));
		Ok(())
	}

	#[test]
	fn reader_failures_are_not_reported_as_truncation() {
		struct Broken;
		impl Read for Broken {
			fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
				Err(std::io::Error::other("disk on fire"))
			}
		}

		let err = parse_json_reader(Broken).unwrap_err();
		let cause = err.root_cause().to_string();
		assert!(cause.starts_with("failed to read input"), "{cause}");
		assert!(cause.ends_with("disk on fire"), "{cause}");
	}
}
