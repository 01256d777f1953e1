//! JSON numbers kept as their literal text.
//!
//! The parser never converts a number to a machine type; that happens only once the
//! converter knows the target, so `12345678901234567890123` or `0.1000000000000000055511`
//! reach an integer or float field without an intermediate `f64` rounding step.

use super::JsonValue;
use std::fmt::{Debug, Display};

#[derive(Clone)]
pub struct JsonNumber(String);

impl JsonNumber {
	/// Wrap literal number text. The text is trusted to follow the JSON number grammar.
	pub fn from_literal(text: impl Into<String>) -> Self {
		Self(text.into())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Lossy floating point view.
	#[must_use]
	pub fn as_f64(&self) -> f64 {
		self.0.parse().unwrap_or(f64::NAN)
	}
}

impl PartialEq for JsonNumber {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0 || self.as_f64() == other.as_f64()
	}
}

impl Debug for JsonNumber {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Display for JsonNumber {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

macro_rules! impl_from_number {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for JsonNumber {
				fn from(input: $t) -> Self {
					JsonNumber(input.to_string())
				}
			}

			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(JsonNumber::from(input))
				}
			}
		)+
	};
}

impl_from_number!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl From<JsonNumber> for JsonValue {
	fn from(input: JsonNumber) -> Self {
		JsonValue::Number(input)
	}
}
