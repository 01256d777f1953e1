//! The `Reflect` / `ReflectMut` traits and the shapes they report.
//!
//! A `Shape` tells the serializer how to emit a value; a `ShapeMut` tells the converter how
//! a value can be written to. Both borrow from the value they describe, so no copies are
//! made while walking a graph.

use super::{BasicSlot, BasicType, EnumSlot, EnumVariant, StructShape, StructShapeMut};
use std::cell::{Ref, RefMut};
use time::PrimitiveDateTime;

/// Read access to a value's shape.
pub trait Reflect {
	/// Runtime type name, used for the type specifier and as a cache key.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	fn shape(&self) -> Shape<'_>;
}

/// Write access to a value's shape.
pub trait ReflectMut: Reflect {
	fn shape_mut(&mut self) -> ShapeMut<'_>;

	/// Write access through a shared reference.
	///
	/// Only interior-mutable types such as `RefCell` override this; it lets the converter
	/// fill a value that sits behind a shared `Rc`.
	fn shape_shared(&self) -> ShapeMut<'_> {
		ShapeMut::Unsupported
	}
}

/// How a value serializes.
pub enum Shape<'a> {
	Null,
	String(&'a str),
	Bool(bool),
	/// Reflection metadata, emitted as its quoted display string.
	Metadata(String),
	DateTime(PrimitiveDateTime),
	/// Rendered through [`BasicType::to_invariant_string`].
	Basic(&'a dyn BasicType),
	/// Emitted as the variant's discriminant.
	Enum(EnumVariant),
	/// Emitted as a Base64 string.
	Bytes(&'a [u8]),
	Sequence(Vec<&'a dyn Reflect>),
	/// Entries with their keys already rendered as text.
	Map(Vec<(String, &'a dyn Reflect)>),
	Struct(StructShape<'a>),
	/// A reference-counted value. `identity` is the address of the shared allocation.
	Shared {
		identity: usize,
		target: &'a dyn Reflect,
	},
	/// A value behind a `RefCell` borrow.
	Guarded(Ref<'a, dyn Reflect>),
}

/// How a value can be written by the converter.
pub enum ShapeMut<'a> {
	/// A `JsonValue` target takes the source tree as-is.
	Json(&'a mut crate::json::JsonValue),
	Basic(&'a mut dyn BasicSlot),
	Enum(&'a mut dyn EnumSlot),
	Bytes(ByteTarget<'a>),
	/// A pre-sized sequence, filled positionally.
	Array(Vec<&'a mut dyn ReflectMut>),
	List(&'a mut dyn ListSlot),
	Map(&'a mut dyn MapSlot),
	Struct(StructShapeMut<'a>),
	Optional(&'a mut dyn OptionSlot),
	/// A value behind a `RefCell` mutable borrow.
	Guarded(RefMut<'a, dyn ReflectMut>),
	Unsupported,
}

pub enum ByteTarget<'a> {
	Growable(&'a mut Vec<u8>),
	Fixed(&'a mut [u8]),
}

/// A growable collection that builds one element at a time.
pub trait ListSlot {
	fn clear(&mut self);

	/// Create a default element, let `fill` populate it and append it if `fill` succeeds.
	fn push_with(&mut self, fill: &mut dyn FnMut(&mut dyn ReflectMut) -> bool) -> bool;
}

/// A string-keyed collection.
pub trait MapSlot {
	fn clear(&mut self);

	/// Parse `key`, create a default value, let `fill` populate it and insert it.
	/// Returns `false` without inserting if the key does not parse or `fill` fails.
	fn insert_with(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn ReflectMut) -> bool) -> bool;
}

/// A nullable slot.
pub trait OptionSlot {
	fn is_none(&self) -> bool;

	fn clear(&mut self);

	/// Make sure a value is present, creating a default one if needed, and return it.
	fn materialize(&mut self) -> &mut dyn ReflectMut;
}
