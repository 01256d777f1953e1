//! Basic types: values with a canonical text form that bypass member reflection.

use super::{Reflect, ReflectMut, Shape, ShapeMut};
use crate::{
	byte_iterator::{ByteIterator, parse_number_as_string},
	json::JsonNumber,
};
use std::{
	net::{IpAddr, Ipv4Addr, Ipv6Addr},
	str::FromStr,
	time::Duration,
};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

const DATE_TIME: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_TIME_FRACTION: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

/// A type with an invariant text form.
pub trait BasicType {
	/// Canonical, culture-independent text.
	fn to_invariant_string(&self) -> String;

	fn try_parse_basic(text: &str) -> Option<Self>
	where
		Self: Sized;
}

/// Object-safe write side of [`BasicType`].
pub trait BasicSlot {
	/// Parse `text` and store the result. Leaves the slot untouched on failure.
	fn assign_text(&mut self, text: &str) -> bool;
}

impl<T: BasicType> BasicSlot for T {
	fn assign_text(&mut self, text: &str) -> bool {
		match T::try_parse_basic(text) {
			Some(value) => {
				*self = value;
				true
			}
			None => false,
		}
	}
}

/// Parse an integer, accepting integral float text such as `"30.0"` or `"1e3"`.
fn parse_integer<T: FromStr + TryFrom<i128>>(text: &str) -> Option<T> {
	let text = text.trim();
	if let Ok(value) = text.parse::<T>() {
		return Some(value);
	}
	let value = text.parse::<f64>().ok()?;
	if !value.is_finite() || value.fract() != 0.0 || value.abs() >= 1.7e38 {
		return None;
	}
	T::try_from(value as i128).ok()
}

macro_rules! impl_integer {
	($($t:ty),+ $(,)?) => {
		$(
			impl BasicType for $t {
				fn to_invariant_string(&self) -> String {
					self.to_string()
				}

				fn try_parse_basic(text: &str) -> Option<Self> {
					parse_integer(text)
				}
			}
		)+
	};
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_from_str {
	($($t:ty),+ $(,)?) => {
		$(
			impl BasicType for $t {
				fn to_invariant_string(&self) -> String {
					self.to_string()
				}

				fn try_parse_basic(text: &str) -> Option<Self> {
					text.trim().parse().ok()
				}
			}
		)+
	};
}

impl_from_str!(f32, f64, IpAddr, Ipv4Addr, Ipv6Addr);

impl BasicType for bool {
	fn to_invariant_string(&self) -> String {
		self.to_string()
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		let text = text.trim();
		if text.eq_ignore_ascii_case("true") {
			Some(true)
		} else if text.eq_ignore_ascii_case("false") {
			Some(false)
		} else {
			None
		}
	}
}

impl BasicType for char {
	fn to_invariant_string(&self) -> String {
		self.to_string()
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		let mut chars = text.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Some(c),
			_ => None,
		}
	}
}

impl BasicType for String {
	fn to_invariant_string(&self) -> String {
		self.clone()
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		Some(text.to_string())
	}
}

impl BasicType for Uuid {
	fn to_invariant_string(&self) -> String {
		self.hyphenated().to_string()
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		Uuid::parse_str(text.trim()).ok()
	}
}

const NANOS_PER_TICK: u32 = 100;
const SECONDS_PER_DAY: u64 = 86_400;

/// Time span text: `[d.]hh:mm:ss[.fffffff]`, with 100ns ticks in the fraction.
impl BasicType for Duration {
	fn to_invariant_string(&self) -> String {
		let total = self.as_secs();
		let days = total / SECONDS_PER_DAY;
		let hours = (total % SECONDS_PER_DAY) / 3600;
		let minutes = (total % 3600) / 60;
		let seconds = total % 60;
		let ticks = self.subsec_nanos() / NANOS_PER_TICK;

		let mut text = String::new();
		if days > 0 {
			text.push_str(&format!("{days}."));
		}
		text.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
		if ticks > 0 {
			text.push_str(&format!(".{ticks:07}"));
		}
		text
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		let text = text.trim();
		let Some(colon) = text.find(':') else {
			// A bare integer counts days.
			let days = text.parse::<u64>().ok()?;
			return Some(Duration::from_secs(days.checked_mul(SECONDS_PER_DAY)?));
		};

		let (days, rest) = match text[..colon].find('.') {
			Some(dot) => (text[..dot].parse::<u64>().ok()?, &text[dot + 1..]),
			None => (0, text),
		};
		let (clock, fraction) = match rest.split_once('.') {
			Some((clock, fraction)) => (clock, Some(fraction)),
			None => (rest, None),
		};

		let parts = clock
			.split(':')
			.map(|part| part.parse::<u64>().ok())
			.collect::<Option<Vec<_>>>()?;
		let (hours, minutes, seconds) = match parts.as_slice() {
			[h, m] => (*h, *m, 0),
			[h, m, s] => (*h, *m, *s),
			_ => return None,
		};
		if hours > 23 || minutes > 59 || seconds > 59 {
			return None;
		}

		let nanos = match fraction {
			None => 0,
			Some(digits) if (1..=7).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) => {
				format!("{digits:0<7}").parse::<u32>().ok()? * NANOS_PER_TICK
			}
			Some(_) => return None,
		};

		let secs = days
			.checked_mul(SECONDS_PER_DAY)?
			.checked_add(hours * 3600 + minutes * 60 + seconds)?;
		Some(Duration::new(secs, nanos))
	}
}

/// Sortable date-time text without an offset: `yyyy-MM-ddTHH:mm:ss`.
impl BasicType for PrimitiveDateTime {
	fn to_invariant_string(&self) -> String {
		self.format(DATE_TIME).unwrap_or_default()
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		let text = text.trim();
		PrimitiveDateTime::parse(text, DATE_TIME)
			.or_else(|_| PrimitiveDateTime::parse(text, DATE_TIME_FRACTION))
			.ok()
	}
}

impl BasicType for JsonNumber {
	fn to_invariant_string(&self) -> String {
		self.as_str().to_string()
	}

	fn try_parse_basic(text: &str) -> Option<Self> {
		let mut iter = ByteIterator::from_text(text.trim());
		let literal = parse_number_as_string(&mut iter).ok()?;
		iter.expect_end().ok()?;
		Some(JsonNumber::from_literal(literal))
	}
}

macro_rules! impl_reflect_basic {
	($($t:ty),+ $(,)?) => {
		$(
			impl Reflect for $t {
				fn shape(&self) -> Shape<'_> {
					Shape::Basic(self)
				}
			}

			impl ReflectMut for $t {
				fn shape_mut(&mut self) -> ShapeMut<'_> {
					ShapeMut::Basic(self)
				}
			}
		)+
	};
}

impl_reflect_basic!(
	u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, char, Uuid, Duration, IpAddr, Ipv4Addr,
	Ipv6Addr, JsonNumber,
);

impl Reflect for bool {
	fn shape(&self) -> Shape<'_> {
		Shape::Bool(*self)
	}
}

impl ReflectMut for bool {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Basic(self)
	}
}

impl Reflect for String {
	fn shape(&self) -> Shape<'_> {
		Shape::String(self)
	}
}

impl ReflectMut for String {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Basic(self)
	}
}

impl Reflect for str {
	fn shape(&self) -> Shape<'_> {
		Shape::String(self)
	}
}

impl Reflect for PrimitiveDateTime {
	fn shape(&self) -> Shape<'_> {
		Shape::DateTime(*self)
	}
}

impl ReflectMut for PrimitiveDateTime {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Basic(self)
	}
}
