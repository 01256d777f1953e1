use super::{BasicType, Reflect, ReflectMut, Shape, ShapeMut};
use std::fmt::Display;

/// One variant of a field-less enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumVariant {
	name: &'static str,
	discriminant: i64,
}

impl EnumVariant {
	pub const fn new(name: &'static str, discriminant: i64) -> Self {
		Self { name, discriminant }
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn discriminant(&self) -> i64 {
		self.discriminant
	}
}

impl Display for EnumVariant {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} = {}", self.name, self.discriminant)
	}
}

impl Reflect for EnumVariant {
	fn shape(&self) -> Shape<'_> {
		Shape::Metadata(self.to_string())
	}
}

impl ReflectMut for EnumVariant {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Unsupported
	}
}

/// A field-less enum with a static variant table.
pub trait ReflectEnum: Sized {
	const VARIANTS: &'static [EnumVariant];

	fn variant_index(&self) -> usize;

	fn from_variant_index(index: usize) -> Option<Self>;

	fn variant(&self) -> EnumVariant {
		Self::VARIANTS[self.variant_index()]
	}
}

/// Object-safe write side of an enum.
pub trait EnumSlot {
	/// Parse a discriminant such as `"1"`.
	fn parse_basic(&mut self, text: &str) -> bool;

	/// Parse a variant name.
	fn parse_name(&mut self, text: &str, case_insensitive: bool) -> bool;
}

impl<E: ReflectEnum> EnumSlot for E {
	fn parse_basic(&mut self, text: &str) -> bool {
		let Some(discriminant) = i64::try_parse_basic(text) else {
			return false;
		};
		assign_index(self, E::VARIANTS.iter().position(|v| v.discriminant == discriminant))
	}

	fn parse_name(&mut self, text: &str, case_insensitive: bool) -> bool {
		let text = text.trim();
		let index = E::VARIANTS.iter().position(|v| {
			if case_insensitive {
				v.name.eq_ignore_ascii_case(text)
			} else {
				v.name == text
			}
		});
		assign_index(self, index)
	}
}

fn assign_index<E: ReflectEnum>(target: &mut E, index: Option<usize>) -> bool {
	match index.and_then(E::from_variant_index) {
		Some(value) => {
			*target = value;
			true
		}
		None => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, PartialEq)]
	enum Rank {
		First,
		Second,
		Third = 10,
	}

	impl ReflectEnum for Rank {
		const VARIANTS: &'static [EnumVariant] = &[
			EnumVariant::new("First", 0),
			EnumVariant::new("Second", 1),
			EnumVariant::new("Third", 10),
		];

		fn variant_index(&self) -> usize {
			match self {
				Rank::First => 0,
				Rank::Second => 1,
				Rank::Third => 2,
			}
		}

		fn from_variant_index(index: usize) -> Option<Self> {
			[Rank::First, Rank::Second, Rank::Third].into_iter().nth(index)
		}
	}

	#[test]
	fn variant_lookup() {
		assert_eq!(Rank::Second.variant(), EnumVariant::new("Second", 1));
		assert_eq!(Rank::Third.variant().discriminant(), 10);
		assert_eq!(Rank::Third.variant().to_string(), "Third = 10");
	}

	#[test]
	fn parse_by_discriminant() {
		let mut rank = Rank::First;
		assert!(rank.parse_basic("10"));
		assert_eq!(rank, Rank::Third);
		assert!(!rank.parse_basic("2"));
		assert!(!rank.parse_basic("Second"));
		assert_eq!(rank, Rank::Third);
	}

	#[test]
	fn parse_by_name() {
		let mut rank = Rank::First;
		assert!(!rank.parse_name("second", false));
		assert!(rank.parse_name("second", true));
		assert_eq!(rank, Rank::Second);
		assert!(rank.parse_name("Third", false));
		assert_eq!(rank, Rank::Third);
		assert!(!rank.parse_name("Fourth", true));
	}
}
