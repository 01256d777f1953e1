use super::{SerializerOptions, merge_exclusions};
use crate::{
	cache::ReflectCache,
	json::escape_json_string,
	reflect::{BasicType, Reflect, Shape, StructShape},
};
use anyhow::{Context, Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::{collections::HashSet, sync::Arc};

/// Values nested deeper than this fail to serialize.
pub const MAX_DEPTH: usize = 20;

const CIRCULAR_REFERENCE_KEY: &str = "$circref";

/// Turns reflected values into JSON text.
///
/// Serialization is strict in exactly one place: a value nested deeper than [`MAX_DEPTH`]
/// fails the whole call. Everything else has a structural fallback, and a shared value that
/// was already emitted during the same call is replaced by `{"$circref": "<address>"}`.
pub struct Serializer {
	options: SerializerOptions,
	cache: Arc<ReflectCache>,
}

impl Serializer {
	pub fn new(options: SerializerOptions) -> Self {
		Self::with_cache(options, Arc::new(ReflectCache::new()))
	}

	pub fn with_cache(options: SerializerOptions, cache: Arc<ReflectCache>) -> Self {
		Self { options, cache }
	}

	pub fn serialize(&self, value: &dyn Reflect) -> Result<String> {
		let mut walk = Walk {
			options: &self.options,
			cache: &self.cache,
			visited: HashSet::new(),
		};
		walk
			.value(value, 0)
			.with_context(|| format!("while serializing {}", value.type_name()))
	}
}

/// Serialize `value` with a fresh [`Serializer`].
pub fn to_json_string(value: &dyn Reflect, options: &SerializerOptions) -> Result<String> {
	Serializer::new(options.clone()).serialize(value)
}

/// State of one `serialize` call. `visited` holds the identities of shared values already
/// emitted, so it must never outlive the call.
struct Walk<'s> {
	options: &'s SerializerOptions,
	cache: &'s ReflectCache,
	visited: HashSet<usize>,
}

impl Walk<'_> {
	fn value(&mut self, value: &dyn Reflect, depth: usize) -> Result<String> {
		if depth > MAX_DEPTH {
			debug!("giving up on {} at depth {depth}", value.type_name());
			bail!("maximum depth of {MAX_DEPTH} exceeded at {}", value.type_name());
		}

		Ok(match value.shape() {
			Shape::Null => String::from("null"),
			Shape::String(text) => quote(text),
			Shape::Bool(b) => b.to_string(),
			Shape::Metadata(text) => quote(&text),
			Shape::DateTime(date_time) => quote(&date_time.to_invariant_string()),
			Shape::Basic(basic) => {
				let text = basic.to_invariant_string();
				if is_numeric_literal(&text) { text } else { quote(&text) }
			}
			Shape::Enum(variant) => variant.discriminant().to_string(),
			Shape::Shared { identity, target } => {
				if !self.visited.insert(identity) {
					debug!("replacing repeated reference to {} with a marker", target.type_name());
					return Ok(self.circular_reference(identity, depth));
				}
				self.value(target, depth)?
			}
			Shape::Guarded(guard) => self.value(&*guard, depth)?,
			Shape::Map(entries) => {
				let items = entries
					.into_iter()
					.filter(|(key, _)| !key.trim().is_empty())
					.map(|(key, item)| self.entry(&key, item, depth))
					.collect::<Result<Vec<_>>>()?;
				self.wrap('{', '}', &items, depth)
			}
			Shape::Sequence(items) => {
				let items = items
					.into_iter()
					.map(|item| self.value(item, depth + 1))
					.collect::<Result<Vec<_>>>()?;
				self.wrap('[', ']', &items, depth)
			}
			Shape::Bytes(bytes) if bytes.is_empty() => String::from("[]"),
			Shape::Bytes(bytes) => quote(&STANDARD.encode(bytes)),
			Shape::Struct(shape) => self.structure(value.type_name(), &shape, depth)?,
		})
	}

	/// A struct becomes an object of its readable, non-excluded members, in declaration order.
	fn structure(&mut self, type_name: &'static str, shape: &StructShape<'_>, depth: usize) -> Result<String> {
		let options = self.options;
		let ignored = self.cache.ignored_members(type_name, shape.members());
		let excluded = merge_exclusions(&ignored, &options.exclude_properties);

		let mut items = Vec::new();
		if let Some(key) = options.type_key() {
			items.push(format!("\"{}\": {}", escape_json_string(key), quote(type_name)));
		}
		for (member, value) in shape.readable(options.include_non_public) {
			let is_excluded = excluded
				.iter()
				.any(|name| *name == member.name() || Some(*name) == member.json_name());
			if !is_excluded {
				items.push(self.entry(member.output_name(), value, depth)?);
			}
		}
		Ok(self.wrap('{', '}', &items, depth))
	}

	fn entry(&mut self, key: &str, value: &dyn Reflect, depth: usize) -> Result<String> {
		let value = self.value(value, depth + 1)?;
		Ok(format!("\"{}\": {value}", escape_json_string(key)))
	}

	fn circular_reference(&self, identity: usize, depth: usize) -> String {
		let item = format!("\"{CIRCULAR_REFERENCE_KEY}\": {}", quote(&identity.to_string()));
		self.wrap('{', '}', &[item], depth)
	}

	fn wrap(&self, open: char, close: char, items: &[String], depth: usize) -> String {
		if items.is_empty() {
			return format!("{open}{close}");
		}
		if !self.options.format {
			return format!("{open}{}{close}", items.join(","));
		}
		let inner = self.cache.indent(depth + 1);
		let outer = self.cache.indent(depth);
		format!("{open}\n{inner}{}\n{outer}{close}", items.join(&format!(",\n{inner}")))
	}
}

fn quote(text: &str) -> String {
	format!("\"{}\"", escape_json_string(text))
}

/// True if `text` reads as a JSON number, so a basic value can be emitted without quotes.
fn is_numeric_literal(text: &str) -> bool {
	lazy_static! {
		static ref RE_NUMBER: Regex = Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap();
	}
	RE_NUMBER.is_match(text)
}
