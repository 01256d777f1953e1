//! Buffered byte cursor used by the JSON parser.
//!
//! `ByteIterator` reads from any `std::io::Read`, exposes a single byte of lookahead and
//! keeps a small ring buffer of the most recent bytes so parse errors can show where
//! they happened.

use anyhow::{Error, Result, anyhow};
use std::io::{self, ErrorKind, Read};

const RECENT_BYTES: usize = 16;
const BUFFER_SIZE: usize = 4096;

pub struct ByteIterator<'a> {
	buffer: Box<[u8; BUFFER_SIZE]>,
	buffer_len: usize,
	buffer_pos: usize,
	source: Box<dyn Read + 'a>,
	peeked: Option<u8>,
	position: usize,
	recent: [u8; RECENT_BYTES],
	read_error: Option<io::Error>,
}

impl<'a> ByteIterator<'a> {
	/// Wrap a reader and load the first byte.
	pub fn from_reader(reader: impl Read + 'a) -> Self {
		let mut iter = ByteIterator {
			buffer: Box::new([0; BUFFER_SIZE]),
			buffer_len: 0,
			buffer_pos: 0,
			source: Box::new(reader),
			peeked: None,
			position: 0,
			recent: [0; RECENT_BYTES],
			read_error: None,
		};
		iter.fill_buffer();
		iter.advance();
		iter
	}

	/// Convenience constructor for in-memory text.
	pub fn from_text(text: &'a str) -> Self {
		Self::from_reader(text.as_bytes())
	}

	/// Refill from the source. A read error ends the input and is kept for [`Self::end_error`].
	fn fill_buffer(&mut self) {
		self.buffer_pos = 0;
		self.buffer_len = loop {
			match self.source.read(&mut self.buffer[..]) {
				Ok(len) => break len,
				Err(err) if err.kind() == ErrorKind::Interrupted => {}
				Err(err) => {
					self.read_error = Some(err);
					break 0;
				}
			}
		};
	}

	#[inline]
	fn next_from_source(&mut self) -> Option<u8> {
		if self.buffer_pos >= self.buffer_len {
			if self.read_error.is_some() {
				return None;
			}
			self.fill_buffer();
			if self.buffer_len == 0 {
				return None;
			}
		}
		let byte = self.buffer[self.buffer_pos];
		self.buffer_pos += 1;
		Some(byte)
	}

	/// Build an error carrying the position and the last few bytes read.
	#[must_use]
	pub fn format_error(&self, msg: &str) -> Error {
		let consumed = self.position.saturating_sub(1);
		let (start, length) = if self.position < RECENT_BYTES {
			(0, consumed)
		} else {
			(self.position % RECENT_BYTES, RECENT_BYTES - 1)
		};

		let snapshot = self
			.recent
			.iter()
			.cycle()
			.skip(start)
			.take(length)
			.copied()
			.collect::<Vec<u8>>();

		let mut excerpt = String::from_utf8_lossy(&snapshot).into_owned();
		if self.peeked.is_none() {
			excerpt.push_str("<EOF>");
		}
		anyhow!("{msg} at position {consumed}: {excerpt}")
	}

	/// Error for running out of input: the read error if one stopped the input early.
	fn end_error(&self) -> Error {
		match &self.read_error {
			Some(err) => anyhow!("failed to read input at position {}: {err}", self.position.saturating_sub(1)),
			None => self.format_error("unexpected end"),
		}
	}

	#[inline]
	#[must_use]
	pub fn peek(&self) -> Option<u8> {
		self.peeked
	}

	/// Drop the peeked byte and load the next one.
	#[inline]
	pub fn advance(&mut self) {
		self.peeked = self.next_from_source();
		if let Some(byte) = self.peeked {
			self.recent[self.position % RECENT_BYTES] = byte;
		}
		self.position += 1;
	}

	/// Consume the peeked byte, failing at the end of input.
	#[inline]
	pub fn expect_next_byte(&mut self) -> Result<u8> {
		match self.peeked {
			Some(byte) => {
				self.advance();
				Ok(byte)
			}
			None => Err(self.end_error()),
		}
	}

	#[inline]
	pub fn expect_peeked_byte(&self) -> Result<u8> {
		self.peeked.ok_or_else(|| self.end_error())
	}

	pub fn skip_whitespace(&mut self) {
		while let Some(byte) = self.peeked {
			if !byte.is_ascii_whitespace() {
				break;
			}
			self.advance();
		}
	}

	/// Succeed only if nothing but whitespace is left.
	pub fn expect_end(&mut self) -> Result<()> {
		self.skip_whitespace();
		match self.peeked {
			None if self.read_error.is_some() => Err(self.end_error()),
			None => Ok(()),
			Some(_) => Err(self.format_error("unexpected trailing characters")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn drain(iter: &mut ByteIterator) -> usize {
		let mut count = 0;
		while iter.peek().is_some() {
			iter.advance();
			count += 1;
		}
		count
	}

	/// Yields one `Interrupted` error, then `data`, then fails with `fail` if set.
	struct Flaky {
		interrupted: bool,
		data: &'static [u8],
		fail: Option<ErrorKind>,
	}

	impl Read for Flaky {
		fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
			if !self.interrupted {
				self.interrupted = true;
				return Err(ErrorKind::Interrupted.into());
			}
			if !self.data.is_empty() {
				let len = self.data.len().min(buf.len());
				buf[..len].copy_from_slice(&self.data[..len]);
				self.data = &self.data[len..];
				return Ok(len);
			}
			match self.fail {
				Some(kind) => Err(io::Error::new(kind, "connection reset")),
				None => Ok(0),
			}
		}
	}

	#[test]
	fn peek_and_advance() {
		let mut iter = ByteIterator::from_text("ab");
		assert_eq!(iter.peek(), Some(b'a'));
		iter.advance();
		assert_eq!(iter.peek(), Some(b'b'));
		iter.advance();
		assert_eq!(iter.peek(), None);
		iter.advance();
		assert_eq!(iter.peek(), None);
	}

	#[test]
	fn expect_next_byte_fails_at_end() {
		let mut iter = ByteIterator::from_text("x");
		assert_eq!(iter.expect_next_byte().unwrap(), b'x');
		let err = iter.expect_next_byte().unwrap_err();
		assert_eq!(err.to_string(), "unexpected end at position 1: x<EOF>");
	}

	#[test]
	fn skip_whitespace_stops_at_content() {
		let mut iter = ByteIterator::from_text(" \t\r\n z");
		iter.skip_whitespace();
		assert_eq!(iter.expect_next_byte().unwrap(), b'z');
	}

	#[test]
	fn expect_end_rejects_trailing_bytes() {
		let mut iter = ByteIterator::from_text("  ");
		assert!(iter.expect_end().is_ok());

		let mut iter = ByteIterator::from_text(" 1");
		assert!(iter.expect_end().is_err());
	}

	#[test]
	fn error_excerpt_is_limited_to_recent_bytes() {
		let text = "abcdefghijklmnopqrstuvwxyz";
		let mut iter = ByteIterator::from_text(text);
		for _ in 0..20 {
			iter.advance();
		}
		let message = iter.format_error("boom").to_string();
		assert_eq!(message, "boom at position 20: fghijklmnopqrst");
	}

	#[test]
	fn reads_across_buffer_boundaries() {
		let text = "a".repeat(BUFFER_SIZE * 2 + 3);
		let mut iter = ByteIterator::from_reader(text.as_bytes());
		assert_eq!(drain(&mut iter), text.len());
	}

	#[test]
	fn interrupted_reads_are_retried() {
		let mut iter = ByteIterator::from_reader(Flaky {
			interrupted: false,
			data: b"ok",
			fail: None,
		});
		assert_eq!(drain(&mut iter), 2);
		assert!(iter.expect_end().is_ok());
	}

	#[test]
	fn read_errors_are_reported() {
		let mut iter = ByteIterator::from_reader(Flaky {
			interrupted: false,
			data: b"ab",
			fail: Some(ErrorKind::ConnectionReset),
		});
		assert_eq!(drain(&mut iter), 2);
		let err = iter.expect_next_byte().unwrap_err();
		assert_eq!(err.to_string(), "failed to read input at position 2: connection reset");
		assert!(iter.expect_end().is_err());
	}
}
