//! Decode path: parsed JSON trees to reflected values.

mod converter;
mod options;

use crate::{
	json::{JsonValue, parse_json_str},
	reflect::ReflectMut,
};
use anyhow::Result;
pub use converter::Converter;
pub use options::ConverterOptions;

/// Convert `value` into a new `T` with a fresh [`Converter`].
pub fn from_json_value<T: ReflectMut + Default>(value: &JsonValue, options: &ConverterOptions) -> T {
	Converter::new(*options).convert(value)
}

/// Parse `json` and convert it into a new `T`.
///
/// Fails only if `json` is not valid JSON; members that do not fit are left at their defaults.
pub fn from_json_str<T: ReflectMut + Default>(json: &str, options: &ConverterOptions) -> Result<T> {
	let value = parse_json_str(json)?;
	Ok(from_json_value(&value, options))
}
