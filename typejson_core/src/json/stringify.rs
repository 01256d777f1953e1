use super::JsonValue;

/// Compact JSON text for a tree.
pub fn stringify(json: &JsonValue) -> String {
	match json {
		JsonValue::String(s) => format!("\"{}\"", escape_json_string(s)),
		JsonValue::Number(n) => n.to_string(),
		JsonValue::Boolean(b) => b.to_string(),
		JsonValue::Null => String::from("null"),
		JsonValue::Array(arr) => arr.stringify(),
		JsonValue::Object(obj) => obj.stringify(),
	}
}

/// Escape a string for use between double quotes.
///
/// `\`, `"` and `/` get a backslash; backspace, tab, newline, form feed and carriage return
/// use their short escapes; any other code point below `0x20` becomes `\u00XX`.
/// Everything else, including non-ASCII text, passes through unchanged.
pub fn escape_json_string(input: &str) -> String {
	let mut output = String::with_capacity(input.len() + 2);
	for c in input.chars() {
		match c {
			'\\' => output.push_str("\\\\"),
			'"' => output.push_str("\\\""),
			'/' => output.push_str("\\/"),
			'\u{08}' => output.push_str("\\b"),
			'\t' => output.push_str("\\t"),
			'\n' => output.push_str("\\n"),
			'\u{0c}' => output.push_str("\\f"),
			'\r' => output.push_str("\\r"),
			c if (c as u32) < 0x20 => {
				output.push_str(&format!("\\u{:04x}", c as u32));
			}
			c => output.push(c),
		}
	}
	output
}

#[cfg(test)]
mod tests {
	use super::super::parse::parse_json_str;
	use super::*;
	use anyhow::Result;
	use rstest::rstest;

	#[test]
	fn primitives() -> Result<()> {
		assert_eq!(stringify(&parse_json_str("\"Hello, World!\"")?), "\"Hello, World!\"");
		assert_eq!(stringify(&parse_json_str("42")?), "42");
		assert_eq!(stringify(&parse_json_str("-0.50")?), "-0.50");
		assert_eq!(stringify(&parse_json_str("true")?), "true");
		assert_eq!(stringify(&parse_json_str("null")?), "null");
		Ok(())
	}

	#[test]
	fn nested_containers() -> Result<()> {
		let json = parse_json_str(r#" { "b" : [ 1 , { "c" : null } ] , "a" : "x" } "#)?;
		assert_eq!(stringify(&json), r#"{"b":[1,{"c":null}],"a":"x"}"#);
		Ok(())
	}

	#[rstest]
	#[case("plain", "plain")]
	#[case("back\\slash", "back\\\\slash")]
	#[case("say \"hi\"", "say \\\"hi\\\"")]
	#[case("a/b", "a\\/b")]
	#[case("\u{08}\t\n\u{0c}\r", "\\b\\t\\n\\f\\r")]
	#[case("\u{01}\u{1f}", "\\u0001\\u001f")]
	#[case("\u{7f}", "\u{7f}")]
	#[case("grüße 😊", "grüße 😊")]
	fn escaping(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_json_string(input), expected);
	}
}
