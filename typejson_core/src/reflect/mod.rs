//! Static type descriptors.
//!
//! Rust has no runtime reflection, so every type that takes part in serialization or
//! conversion describes itself: [`Reflect::shape`] classifies a value for the serializer,
//! [`ReflectMut::shape_mut`] exposes its writable slots to the converter. Structs and
//! field-less enums get both through `#[derive(Reflect)]`; std types, `uuid`, `time` and
//! the JSON tree are covered here.

mod basic;
mod case;
mod enums;
mod impls;
mod member;
mod shape;

pub use basic::{BasicSlot, BasicType};
pub use case::CaseMatch;
pub use enums::{EnumSlot, EnumVariant, ReflectEnum};
pub use member::{MemberInfo, StructShape, StructShapeMut};
pub use shape::{ByteTarget, ListSlot, MapSlot, OptionSlot, Reflect, ReflectMut, Shape, ShapeMut};
