//! Token-level helpers on top of [`ByteIterator`].
//!
//! Every helper leaves the iterator on the first byte after the token it parsed.
//! Errors are annotated through [`#[context]`](typejson_derive::context) so that a
//! failure deep inside a document reads as a chain ("while parsing array entries",
//! "while parsing a quoted JSON string", ...).

use super::iterator::ByteIterator;
use anyhow::{Result, bail};
use typejson_derive::context;

/// Match a fixed ASCII tag such as `null` or `true`.
#[context("while parsing tag '{}'", tag)]
pub fn parse_tag(iter: &mut ByteIterator, tag: &str) -> Result<()> {
	for expected in tag.bytes() {
		if iter.expect_next_byte()? != expected {
			return Err(iter.format_error(&format!("unexpected character while parsing tag '{tag}'")));
		}
	}
	Ok(())
}

fn parse_hex4(iter: &mut ByteIterator) -> Result<u16> {
	let mut value: u16 = 0;
	for _ in 0..4 {
		let byte = iter.expect_next_byte()?;
		let digit = (byte as char)
			.to_digit(16)
			.ok_or_else(|| iter.format_error("invalid unicode escape"))?;
		value = (value << 4) | digit as u16;
	}
	Ok(value)
}

/// Parse a quoted string literal, resolving all JSON escapes.
///
/// `\uXXXX` escapes may form UTF-16 surrogate pairs; a lone surrogate is an error.
#[context("while parsing a quoted JSON string")]
pub fn parse_quoted_json_string(iter: &mut ByteIterator) -> Result<String> {
	iter.skip_whitespace();
	if iter.expect_next_byte()? != b'"' {
		bail!(iter.format_error("expected '\"' while parsing a string"));
	}

	let mut bytes = Vec::with_capacity(32);
	loop {
		match iter.expect_next_byte()? {
			b'"' => break,
			b'\\' => match iter.expect_next_byte()? {
				b'"' => bytes.push(b'"'),
				b'\\' => bytes.push(b'\\'),
				b'/' => bytes.push(b'/'),
				b'b' => bytes.push(0x08),
				b'f' => bytes.push(0x0C),
				b'n' => bytes.push(b'\n'),
				b'r' => bytes.push(b'\r'),
				b't' => bytes.push(b'\t'),
				b'u' => {
					let mut units = vec![parse_hex4(iter)?];
					if (0xD800..0xDC00).contains(&units[0]) {
						if iter.expect_next_byte()? != b'\\' || iter.expect_next_byte()? != b'u' {
							bail!(iter.format_error("expected low surrogate"));
						}
						units.push(parse_hex4(iter)?);
					}
					let decoded = String::from_utf16(&units).map_err(|_| iter.format_error("invalid unicode code point"))?;
					bytes.extend_from_slice(decoded.as_bytes());
				}
				_ => bail!(iter.format_error("invalid escape sequence")),
			},
			byte if byte < 0x20 => bail!(iter.format_error("unescaped control character in string")),
			byte => bytes.push(byte),
		}
	}
	String::from_utf8(bytes).map_err(|_| iter.format_error("invalid UTF-8 in string"))
}

/// Parse a number following the JSON grammar and return its literal text.
#[context("while parsing a number")]
pub fn parse_number_as_string(iter: &mut ByteIterator) -> Result<String> {
	let mut number = String::with_capacity(16);

	if let Some(b'-') = iter.peek() {
		number.push('-');
		iter.advance();
	}

	match iter.peek() {
		Some(b'0') => {
			number.push('0');
			iter.advance();
			if let Some(b'0'..=b'9') = iter.peek() {
				return Err(iter.format_error("leading zeros are not allowed"));
			}
		}
		Some(b'1'..=b'9') => {
			while let Some(byte @ b'0'..=b'9') = iter.peek() {
				number.push(byte as char);
				iter.advance();
			}
		}
		_ => return Err(iter.format_error("expected digits in number")),
	}

	if let Some(b'.') = iter.peek() {
		number.push('.');
		iter.advance();
		let mut fraction = 0;
		while let Some(byte @ b'0'..=b'9') = iter.peek() {
			number.push(byte as char);
			iter.advance();
			fraction += 1;
		}
		if fraction == 0 {
			return Err(iter.format_error("expected digits after decimal point"));
		}
	}

	if let Some(byte @ (b'e' | b'E')) = iter.peek() {
		number.push(byte as char);
		iter.advance();
		if let Some(sign @ (b'+' | b'-')) = iter.peek() {
			number.push(sign as char);
			iter.advance();
		}
		let mut exponent = 0;
		while let Some(byte @ b'0'..=b'9') = iter.peek() {
			number.push(byte as char);
			iter.advance();
			exponent += 1;
		}
		if exponent == 0 {
			return Err(iter.format_error("expected digits after exponent"));
		}
	}

	Ok(number)
}

/// Walk the entries of `{ ... }`, handing each key and the positioned iterator to `parse_value`.
#[context("while parsing object entries")]
pub fn parse_object_entries(
	iter: &mut ByteIterator,
	mut parse_value: impl FnMut(String, &mut ByteIterator) -> Result<()>,
) -> Result<()> {
	iter.skip_whitespace();
	if iter.expect_next_byte()? != b'{' {
		bail!(iter.format_error("expected '{' while parsing an object"));
	}

	iter.skip_whitespace();
	if let Some(b'}') = iter.peek() {
		iter.advance();
		return Ok(());
	}

	loop {
		iter.skip_whitespace();
		if iter.expect_peeked_byte()? != b'"' {
			return Err(iter.format_error("expected '\"' while parsing object key"));
		}
		let key = parse_quoted_json_string(iter)?;

		iter.skip_whitespace();
		if iter.expect_next_byte()? != b':' {
			return Err(iter.format_error("expected ':'"));
		}

		iter.skip_whitespace();
		parse_value(key, iter)?;

		iter.skip_whitespace();
		match iter.expect_next_byte()? {
			b',' => {}
			b'}' => return Ok(()),
			_ => return Err(iter.format_error("expected ',' or '}'")),
		}
	}
}

/// Collect the elements of `[ ... ]` using `parse_value` for each entry.
#[context("while parsing array entries")]
pub fn parse_array_entries<R>(
	iter: &mut ByteIterator,
	mut parse_value: impl FnMut(&mut ByteIterator) -> Result<R>,
) -> Result<Vec<R>> {
	iter.skip_whitespace();
	if iter.expect_next_byte()? != b'[' {
		bail!(iter.format_error("expected '[' while parsing an array"));
	}

	let mut result = Vec::new();
	iter.skip_whitespace();
	if let Some(b']') = iter.peek() {
		iter.advance();
		return Ok(result);
	}

	loop {
		iter.skip_whitespace();
		result.push(parse_value(iter)?);
		iter.skip_whitespace();
		match iter.expect_next_byte()? {
			b',' => {}
			b']' => return Ok(result),
			_ => return Err(iter.format_error("expected ',' or ']'")),
		}
	}
}
