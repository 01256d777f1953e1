//! Reflection-style JSON for native Rust values.
//!
//! Two directions share one set of type descriptors:
//!
//! - **Serialize**: any [`Reflect`] value becomes JSON text through [`Serializer`]. Cycles
//!   through `Rc`/`Arc` are replaced by a `{"$circref": ...}` marker and nesting is capped at
//!   [`MAX_DEPTH`](serialize::MAX_DEPTH).
//! - **Convert**: a parsed [`JsonValue`] populates any [`ReflectMut`] value through
//!   [`Converter`], leniently: whatever does not fit is skipped.
//!
//! ```
//! use typejson_core::{ConverterOptions, Reflect, SerializerOptions, from_json_str, to_json_string};
//!
//! #[derive(Reflect, Default)]
//! struct Person {
//! 	pub name: String,
//! 	pub age: u32,
//! }
//!
//! let person: Person = from_json_str(r#"{"name":"Ada","age":"36"}"#, &ConverterOptions::default()).unwrap();
//! assert_eq!(person.age, 36);
//! assert_eq!(
//! 	to_json_string(&person, &SerializerOptions::default()).unwrap(),
//! 	r#"{"name": "Ada","age": 36}"#
//! );
//! ```

extern crate self as typejson_core;

pub mod byte_iterator;
pub mod cache;
pub mod convert;
pub mod json;
pub mod reflect;
pub mod serialize;

pub use cache::ReflectCache;
pub use convert::{Converter, ConverterOptions, from_json_str, from_json_value};
pub use json::{JsonArray, JsonNumber, JsonObject, JsonValue, parse_json_str};
pub use reflect::{CaseMatch, Reflect, ReflectMut};
pub use serialize::{Serializer, SerializerOptions, to_json_string};
pub use typejson_derive::Reflect;
