use super::ConverterOptions;
use crate::{
	cache::ReflectCache,
	json::{JsonArray, JsonObject, JsonValue},
	reflect::{BasicType, ByteTarget, ListSlot, MapSlot, OptionSlot, ReflectMut, ShapeMut, StructShapeMut},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use log::trace;
use std::{fmt, sync::Arc};

/// A JSON node that could not be written into its target.
///
/// Misses never escape the converter: they are logged and the target keeps its value.
#[derive(Debug)]
struct Miss {
	source: &'static str,
	target: &'static str,
}

impl Miss {
	fn new(source: &JsonValue, target: &'static str) -> Self {
		Self {
			source: source.type_as_str(),
			target,
		}
	}
}

impl fmt::Display for Miss {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "cannot convert {} into {}", self.source, self.target)
	}
}

/// Populates reflected values from a parsed JSON tree.
///
/// Conversion is lenient: a member, element or entry that does not fit its target is
/// skipped and everything else is still filled in. Nothing here returns an error.
pub struct Converter {
	options: ConverterOptions,
	cache: Arc<ReflectCache>,
}

impl Converter {
	pub fn new(options: ConverterOptions) -> Self {
		Self::with_cache(options, Arc::new(ReflectCache::new()))
	}

	pub fn with_cache(options: ConverterOptions, cache: Arc<ReflectCache>) -> Self {
		Self { options, cache }
	}

	/// Build a `T` from `source`, starting from `T::default()`.
	pub fn convert<T: ReflectMut + Default>(&self, source: &JsonValue) -> T {
		let mut target = T::default();
		if let Err(miss) = self.node(source, &mut target, true) {
			trace!("{miss}, keeping the default");
		}
		target
	}

	/// Populate an existing value. Lists and maps directly under `target` keep their
	/// entries and get the new ones appended; nested collections are replaced.
	///
	/// Returns `false` if `source` did not fit `target` at all.
	pub fn convert_into(&self, source: &JsonValue, target: &mut dyn ReflectMut) -> bool {
		self
			.node(source, target, false)
			.inspect_err(|miss| trace!("{miss}, leaving the target unchanged"))
			.is_ok()
	}

	/// `fresh` clears collections before filling them.
	fn node(&self, source: &JsonValue, target: &mut dyn ReflectMut, fresh: bool) -> Result<(), Miss> {
		let type_name = target.type_name();
		let miss = || Miss::new(source, type_name);

		match target.shape_mut() {
			ShapeMut::Json(slot) => {
				slot.clone_from(source);
				Ok(())
			}
			ShapeMut::Guarded(mut guard) => self.node(source, &mut *guard, fresh),
			ShapeMut::Optional(slot) => self.optional(source, slot, fresh),
			ShapeMut::Bytes(bytes) => fill_bytes(source, bytes).then_some(()).ok_or_else(miss),
			ShapeMut::Struct(shape) => match source {
				JsonValue::Object(object) => {
					self.members(object, shape, type_name);
					Ok(())
				}
				_ => Err(miss()),
			},
			ShapeMut::Map(map) => match source {
				JsonValue::Object(object) => {
					self.entries(object, map, type_name, fresh);
					Ok(())
				}
				_ => Err(miss()),
			},
			ShapeMut::List(list) => match source {
				JsonValue::Array(array) => {
					self.elements(array, list, type_name, fresh);
					Ok(())
				}
				_ => Err(miss()),
			},
			ShapeMut::Array(slots) => match source {
				JsonValue::Array(array) => {
					for (index, (item, slot)) in array.iter().zip(slots).enumerate() {
						if let Err(miss) = self.node(item, slot, true) {
							trace!("leaving element {index} of {type_name} unset: {miss}");
						}
					}
					Ok(())
				}
				_ => Err(miss()),
			},
			ShapeMut::Basic(slot) => {
				let text = source.to_invariant_string().ok_or_else(miss)?;
				slot.assign_text(&text).then_some(()).ok_or_else(miss)
			}
			ShapeMut::Enum(slot) => {
				let text = source.to_invariant_string().ok_or_else(miss)?;
				(slot.parse_basic(&text) || slot.parse_name(&text, true))
					.then_some(())
					.ok_or_else(miss)
			}
			ShapeMut::Unsupported => Err(miss()),
		}
	}

	/// `null` clears the option. Anything else fills a present value, or a new default one
	/// that is dropped again if the conversion misses.
	fn optional(&self, source: &JsonValue, slot: &mut dyn OptionSlot, fresh: bool) -> Result<(), Miss> {
		if source.is_null() {
			slot.clear();
			return Ok(());
		}
		let was_none = slot.is_none();
		let result = self.node(source, slot.materialize(), fresh);
		if result.is_err() && was_none {
			slot.clear();
		}
		result
	}

	fn members(&self, object: &JsonObject, shape: StructShapeMut<'_>, type_name: &'static str) {
		let ConverterOptions {
			include_non_public,
			case_match,
		} = self.options;
		for (member, slot) in shape.writable(include_non_public) {
			let key = self.cache.json_key(type_name, member, case_match);
			let Some(item) = object.get(&key) else {
				continue;
			};
			if let Err(miss) = self.node(item, slot, true) {
				trace!("leaving {member} of {type_name} unset: {miss}");
			}
		}
	}

	fn entries(&self, object: &JsonObject, map: &mut dyn MapSlot, type_name: &'static str, fresh: bool) {
		if fresh {
			map.clear();
		}
		for (key, item) in object {
			let mut outcome = Ok(());
			let inserted = map.insert_with(key, &mut |slot: &mut dyn ReflectMut| {
				outcome = self.node(item, slot, true);
				outcome.is_ok()
			});
			match outcome {
				Err(miss) => trace!("skipping entry {key:?} of {type_name}: {miss}"),
				Ok(()) if !inserted => trace!("skipping entry {key:?} of {type_name}: key does not parse"),
				Ok(()) => {}
			}
		}
	}

	fn elements(&self, array: &JsonArray, list: &mut dyn ListSlot, type_name: &'static str, fresh: bool) {
		if fresh {
			list.clear();
		}
		for (index, item) in array.iter().enumerate() {
			let mut outcome = Ok(());
			list.push_with(&mut |slot: &mut dyn ReflectMut| {
				outcome = self.node(item, slot, true);
				outcome.is_ok()
			});
			if let Err(miss) = outcome {
				trace!("skipping element {index} of {type_name}: {miss}");
			}
		}
	}
}

/// Strings are Base64, or plain UTF-8 text if they do not decode. Arrays hold one number per
/// byte; elements that are not bytes are skipped, or left as they are in a fixed buffer.
fn fill_bytes(source: &JsonValue, target: ByteTarget<'_>) -> bool {
	match (source, target) {
		(JsonValue::String(text), target) => {
			let decoded = STANDARD.decode(text).unwrap_or_else(|_| text.as_bytes().to_vec());
			match target {
				ByteTarget::Growable(bytes) => *bytes = decoded,
				ByteTarget::Fixed(bytes) => {
					let len = bytes.len().min(decoded.len());
					bytes[..len].copy_from_slice(&decoded[..len]);
				}
			}
			true
		}
		(JsonValue::Array(array), ByteTarget::Growable(bytes)) => {
			*bytes = array.iter().filter_map(byte_of).collect();
			true
		}
		(JsonValue::Array(array), ByteTarget::Fixed(bytes)) => {
			for (slot, item) in bytes.iter_mut().zip(array) {
				if let Some(byte) = byte_of(item) {
					*slot = byte;
				}
			}
			true
		}
		_ => false,
	}
}

fn byte_of(item: &JsonValue) -> Option<u8> {
	item.to_invariant_string().and_then(|text| u8::try_parse_basic(&text))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Reflect, reflect::CaseMatch};
	use pretty_assertions::assert_eq;
	use std::collections::{BTreeMap, HashMap};

	#[derive(Reflect, Default, Debug, PartialEq)]
	struct Person {
		pub name: String,
		pub age: u32,
		pub nickname: Option<String>,
		secret: String,
	}

	#[derive(Reflect, Default, Debug, PartialEq)]
	struct Team {
		pub lead: Person,
		pub members: Vec<Person>,
		pub scores: BTreeMap<String, f64>,
	}

	#[derive(Reflect, Default, Debug, PartialEq, Clone, Copy)]
	enum Level {
		#[default]
		Low,
		High = 10,
	}

	fn json(text: &str) -> JsonValue {
		JsonValue::parse_str(text).unwrap()
	}

	fn convert<T: ReflectMut + Default>(text: &str) -> T {
		Converter::new(ConverterOptions::default()).convert(&json(text))
	}

	#[test]
	fn scalars_accept_text_and_numbers() {
		assert_eq!(convert::<u32>("\"30\""), 30);
		assert_eq!(convert::<u32>("30.0"), 30);
		assert_eq!(convert::<i8>("-3"), -3);
		assert_eq!(convert::<String>("12.50"), "12.50");
		assert!(convert::<bool>("\"TRUE\""));
		assert_eq!(convert::<f64>("1.5e2"), 150.0);
	}

	#[test]
	fn scalar_misses_keep_the_default() {
		assert_eq!(convert::<u8>("300"), 0);
		assert_eq!(convert::<u32>("\"abc\""), 0);
		assert_eq!(convert::<u32>("null"), 0);
		assert_eq!(convert::<String>("{}"), "");
	}

	#[test]
	fn enums_by_discriminant_or_name() {
		assert_eq!(convert::<Level>("10"), Level::High);
		assert_eq!(convert::<Level>("\"high\""), Level::High);
		assert_eq!(convert::<Level>("\"Medium\""), Level::Low);
		assert_eq!(convert::<Option<Level>>("\"High\""), Some(Level::High));
	}

	#[test]
	fn structs_fill_matching_members() {
		let person: Person = convert(r#"{"name":"Ada","age":"36","extra":true,"secret":"x"}"#);
		assert_eq!(
			person,
			Person {
				name: "Ada".into(),
				age: 36,
				nickname: None,
				secret: String::new(),
			}
		);
	}

	#[test]
	fn bad_member_does_not_abort_the_object() {
		let person: Person = convert(r#"{"name":"Ada","age":[1]}"#);
		assert_eq!(person.name, "Ada");
		assert_eq!(person.age, 0);
	}

	#[test]
	fn non_public_members_on_request() {
		let converter = Converter::new(ConverterOptions::new().with_non_public(true));
		let person: Person = converter.convert(&json(r#"{"secret":"x"}"#));
		assert_eq!(person.secret, "x");
	}

	#[test]
	fn case_match_maps_member_names() {
		let converter = Converter::new(ConverterOptions::new().with_case_match(CaseMatch::PascalCase));
		let person: Person = converter.convert(&json(r#"{"Name":"Ada","Age":36,"name":"ignored"}"#));
		assert_eq!(person.name, "Ada");
		assert_eq!(person.age, 36);
	}

	#[test]
	fn nested_collections_and_maps() {
		let team: Team = convert(
			r#"{
				"lead": {"name": "Grace"},
				"members": [{"name": "Ada"}, 5, {"name": "Linus"}],
				"scores": {"a": 1.5, "b": "x", "c": "2"}
			}"#,
		);
		assert_eq!(team.lead.name, "Grace");
		let names = team.members.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
		assert_eq!(names, ["Ada", "Linus"]);
		assert_eq!(team.scores, BTreeMap::from([("a".to_string(), 1.5), ("c".to_string(), 2.0)]));
	}

	#[test]
	fn map_keys_must_parse() {
		let map: HashMap<u8, bool> = convert(r#"{"1": true, "x": true, "300": false}"#);
		assert_eq!(map, HashMap::from([(1, true)]));
	}

	#[test]
	fn fixed_arrays_are_filled_by_position() {
		assert_eq!(convert::<[i32; 3]>("[1,2,3]"), [1, 2, 3]);
		assert_eq!(convert::<[i32; 2]>("[1,2,3]"), [1, 2]);
		assert_eq!(convert::<[i32; 3]>("[1,\"x\"]"), [1, 0, 0]);
	}

	#[test]
	fn bytes_from_base64_or_text() {
		assert_eq!(convert::<Vec<u8>>("\"AAEC\""), [0, 1, 2]);
		assert_eq!(convert::<Vec<u8>>("\"hi!\""), b"hi!");
		assert_eq!(convert::<Vec<u8>>("[7, 256, 8]"), [7, 8]);
		assert_eq!(convert::<[u8; 2]>("\"AAEC\""), [0, 1]);
	}

	#[test]
	fn options_revert_when_the_value_misses() {
		assert_eq!(convert::<Option<u32>>("\"x\""), None);
		assert_eq!(convert::<Option<u32>>("7"), Some(7));
		assert_eq!(convert::<Option<Person>>("null"), None);
	}

	#[test]
	fn json_targets_take_the_tree() {
		let value: JsonValue = convert(r#"{"a":[1,null]}"#);
		assert_eq!(value, json(r#"{"a":[1,null]}"#));
	}

	#[test]
	fn convert_into_appends_at_the_root() {
		let converter = Converter::new(ConverterOptions::default());
		let mut list = vec![1u16];
		assert!(converter.convert_into(&json("[2,3]"), &mut list));
		assert_eq!(list, [1, 2, 3]);

		let mut team = Team::default();
		team.members.push(Person::default());
		assert!(converter.convert_into(&json(r#"{"members":[]}"#), &mut team));
		assert!(team.members.is_empty());

		assert!(!converter.convert_into(&json("true"), &mut team));
	}

	#[test]
	fn shared_cache_is_filled() {
		let cache = Arc::new(ReflectCache::new());
		let converter = Converter::with_cache(ConverterOptions::default(), Arc::clone(&cache));
		let _: Person = converter.convert(&json(r#"{"name":"Ada"}"#));
		assert!(!cache.is_empty());
	}
}
