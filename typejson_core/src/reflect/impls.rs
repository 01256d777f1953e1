//! `Reflect` and `ReflectMut` for std containers, smart pointers and the JSON tree.

use super::{BasicType, ByteTarget, ListSlot, MapSlot, OptionSlot, Reflect, ReflectMut, Shape, ShapeMut};
use crate::json::{JsonArray, JsonObject, JsonValue};
use indexmap::IndexMap;
use std::{
	any::Any,
	cell::{Ref, RefCell, RefMut},
	collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
	hash::{BuildHasher, Hash},
	rc::Rc,
	sync::Arc,
};

type Fill<'f> = &'f mut dyn FnMut(&mut dyn ReflectMut) -> bool;

impl Reflect for () {
	fn shape(&self) -> Shape<'_> {
		Shape::Null
	}
}

impl<T: Reflect + ?Sized> Reflect for &T {
	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}

	fn shape(&self) -> Shape<'_> {
		(**self).shape()
	}
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}

	fn shape(&self) -> Shape<'_> {
		(**self).shape()
	}
}

impl<T: ReflectMut + ?Sized> ReflectMut for Box<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		(**self).shape_mut()
	}

	fn shape_shared(&self) -> ShapeMut<'_> {
		(**self).shape_shared()
	}
}

// Option

impl<T: Reflect> Reflect for Option<T> {
	fn type_name(&self) -> &'static str {
		match self {
			Some(value) => value.type_name(),
			None => std::any::type_name::<Self>(),
		}
	}

	fn shape(&self) -> Shape<'_> {
		match self {
			Some(value) => value.shape(),
			None => Shape::Null,
		}
	}
}

impl<T: ReflectMut + Default> ReflectMut for Option<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Optional(self)
	}
}

impl<T: ReflectMut + Default> OptionSlot for Option<T> {
	fn is_none(&self) -> bool {
		Option::is_none(self)
	}

	fn clear(&mut self) {
		*self = None;
	}

	fn materialize(&mut self) -> &mut dyn ReflectMut {
		self.get_or_insert_with(T::default)
	}
}

// Sequences

impl<T: Reflect + 'static> Reflect for Vec<T> {
	fn shape(&self) -> Shape<'_> {
		if let Some(bytes) = (self as &dyn Any).downcast_ref::<Vec<u8>>() {
			return Shape::Bytes(bytes);
		}
		Shape::Sequence(self.iter().map(|v| v as &dyn Reflect).collect())
	}
}

impl<T: ReflectMut + Default + 'static> ReflectMut for Vec<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		if (&*self as &dyn Any).is::<Vec<u8>>() {
			return match (self as &mut dyn Any).downcast_mut::<Vec<u8>>() {
				Some(bytes) => ShapeMut::Bytes(ByteTarget::Growable(bytes)),
				None => ShapeMut::Unsupported,
			};
		}
		ShapeMut::List(self)
	}
}

impl<T: ReflectMut + Default> ListSlot for Vec<T> {
	fn clear(&mut self) {
		Vec::clear(self);
	}

	fn push_with(&mut self, fill: Fill<'_>) -> bool {
		let mut item = T::default();
		if fill(&mut item) {
			self.push(item);
			true
		} else {
			false
		}
	}
}

impl<T: Reflect + 'static, const N: usize> Reflect for [T; N] {
	fn shape(&self) -> Shape<'_> {
		if let Some(bytes) = (self as &dyn Any).downcast_ref::<[u8; N]>() {
			return Shape::Bytes(bytes);
		}
		Shape::Sequence(self.iter().map(|v| v as &dyn Reflect).collect())
	}
}

impl<T: ReflectMut + 'static, const N: usize> ReflectMut for [T; N] {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		if (&*self as &dyn Any).is::<[u8; N]>() {
			return match (self as &mut dyn Any).downcast_mut::<[u8; N]>() {
				Some(bytes) => ShapeMut::Bytes(ByteTarget::Fixed(bytes)),
				None => ShapeMut::Unsupported,
			};
		}
		ShapeMut::Array(self.iter_mut().map(|v| v as &mut dyn ReflectMut).collect())
	}
}

impl<T: Reflect> Reflect for VecDeque<T> {
	fn shape(&self) -> Shape<'_> {
		Shape::Sequence(self.iter().map(|v| v as &dyn Reflect).collect())
	}
}

impl<T: ReflectMut + Default> ReflectMut for VecDeque<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::List(self)
	}
}

impl<T: ReflectMut + Default> ListSlot for VecDeque<T> {
	fn clear(&mut self) {
		VecDeque::clear(self);
	}

	fn push_with(&mut self, fill: Fill<'_>) -> bool {
		let mut item = T::default();
		if fill(&mut item) {
			self.push_back(item);
			true
		} else {
			false
		}
	}
}

impl<T: Reflect, S> Reflect for HashSet<T, S> {
	fn shape(&self) -> Shape<'_> {
		Shape::Sequence(self.iter().map(|v| v as &dyn Reflect).collect())
	}
}

impl<T: ReflectMut + Default + Eq + Hash, S: BuildHasher> ReflectMut for HashSet<T, S> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::List(self)
	}
}

impl<T: ReflectMut + Default + Eq + Hash, S: BuildHasher> ListSlot for HashSet<T, S> {
	fn clear(&mut self) {
		HashSet::clear(self);
	}

	fn push_with(&mut self, fill: Fill<'_>) -> bool {
		let mut item = T::default();
		fill(&mut item) && {
			self.insert(item);
			true
		}
	}
}

impl<T: Reflect> Reflect for BTreeSet<T> {
	fn shape(&self) -> Shape<'_> {
		Shape::Sequence(self.iter().map(|v| v as &dyn Reflect).collect())
	}
}

impl<T: ReflectMut + Default + Ord> ReflectMut for BTreeSet<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::List(self)
	}
}

impl<T: ReflectMut + Default + Ord> ListSlot for BTreeSet<T> {
	fn clear(&mut self) {
		BTreeSet::clear(self);
	}

	fn push_with(&mut self, fill: Fill<'_>) -> bool {
		let mut item = T::default();
		fill(&mut item) && {
			self.insert(item);
			true
		}
	}
}

// Maps

macro_rules! impl_map {
	($map:ident < K, V $(, $s:ident)? >, [$($key_bound:tt)+] $(, $s_bound:path)?) => {
		impl<K: BasicType + $($key_bound)+, V: Reflect $(, $s)?> Reflect for $map<K, V $(, $s)?> {
			fn shape(&self) -> Shape<'_> {
				Shape::Map(self.iter().map(|(k, v)| (k.to_invariant_string(), v as &dyn Reflect)).collect())
			}
		}

		impl<K: BasicType + $($key_bound)+, V: ReflectMut + Default $(, $s: $s_bound)?> ReflectMut
			for $map<K, V $(, $s)?>
		{
			fn shape_mut(&mut self) -> ShapeMut<'_> {
				ShapeMut::Map(self)
			}
		}

		impl<K: BasicType + $($key_bound)+, V: ReflectMut + Default $(, $s: $s_bound)?> MapSlot
			for $map<K, V $(, $s)?>
		{
			fn clear(&mut self) {
				$map::clear(self);
			}

			fn insert_with(&mut self, key: &str, fill: Fill<'_>) -> bool {
				let Some(key) = K::try_parse_basic(key) else {
					return false;
				};
				let mut value = V::default();
				fill(&mut value) && {
					self.insert(key, value);
					true
				}
			}
		}
	};
}

impl_map!(HashMap<K, V, S>, [Eq + Hash], BuildHasher);
impl_map!(IndexMap<K, V, S>, [Eq + Hash], BuildHasher);
impl_map!(BTreeMap<K, V>, [Ord]);

// Shared pointers

impl<T: Reflect> Reflect for Rc<T> {
	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Shared {
			identity: Rc::as_ptr(self) as usize,
			target: &**self,
		}
	}
}

impl<T: ReflectMut> ReflectMut for Rc<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		if Rc::get_mut(self).is_some() {
			return Rc::get_mut(self).map_or(ShapeMut::Unsupported, |inner| inner.shape_mut());
		}
		(**self).shape_shared()
	}
}

impl<T: Reflect> Reflect for Arc<T> {
	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Shared {
			identity: Arc::as_ptr(self) as usize,
			target: &**self,
		}
	}
}

impl<T: ReflectMut> ReflectMut for Arc<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		if Arc::get_mut(self).is_some() {
			return Arc::get_mut(self).map_or(ShapeMut::Unsupported, |inner| inner.shape_mut());
		}
		(**self).shape_shared()
	}
}

impl<T: Reflect> Reflect for RefCell<T> {
	fn type_name(&self) -> &'static str {
		self.try_borrow().map_or(std::any::type_name::<Self>(), |inner| inner.type_name())
	}

	fn shape(&self) -> Shape<'_> {
		match self.try_borrow() {
			Ok(guard) => Shape::Guarded(Ref::map(guard, |inner| inner as &dyn Reflect)),
			// Mutably borrowed elsewhere: nothing can be read.
			Err(_) => Shape::Map(Vec::new()),
		}
	}
}

impl<T: ReflectMut> ReflectMut for RefCell<T> {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		self.get_mut().shape_mut()
	}

	fn shape_shared(&self) -> ShapeMut<'_> {
		match self.try_borrow_mut() {
			Ok(guard) => ShapeMut::Guarded(RefMut::map(guard, |inner| inner as &mut dyn ReflectMut)),
			Err(_) => ShapeMut::Unsupported,
		}
	}
}

// JSON tree

impl Reflect for JsonValue {
	fn shape(&self) -> Shape<'_> {
		match self {
			JsonValue::Null => Shape::Null,
			JsonValue::Boolean(b) => Shape::Bool(*b),
			JsonValue::Number(n) => Shape::Basic(n),
			JsonValue::String(s) => Shape::String(s),
			JsonValue::Array(a) => a.shape(),
			JsonValue::Object(o) => o.shape(),
		}
	}
}

impl ReflectMut for JsonValue {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Json(self)
	}
}

impl Reflect for JsonArray {
	fn shape(&self) -> Shape<'_> {
		self.0.shape()
	}
}

impl ReflectMut for JsonArray {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		self.0.shape_mut()
	}
}

impl Reflect for JsonObject {
	fn shape(&self) -> Shape<'_> {
		self.0.shape()
	}
}

impl ReflectMut for JsonObject {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		self.0.shape_mut()
	}
}
