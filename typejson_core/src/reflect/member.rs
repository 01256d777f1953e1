use super::{Reflect, ReflectMut, Shape, ShapeMut};
use std::fmt::Display;

/// Static description of one struct member, generated by `#[derive(Reflect)]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberInfo {
	name: &'static str,
	json_name: Option<&'static str>,
	ignored: bool,
	public: bool,
}

impl MemberInfo {
	pub const fn new(name: &'static str, json_name: Option<&'static str>, ignored: bool, public: bool) -> Self {
		Self {
			name,
			json_name,
			ignored,
			public,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Explicit JSON key, if the member declares one.
	pub fn json_name(&self) -> Option<&'static str> {
		self.json_name
	}

	/// Key used when emitting this member.
	pub fn output_name(&self) -> &'static str {
		self.json_name.unwrap_or(self.name)
	}

	pub fn is_ignored(&self) -> bool {
		self.ignored
	}

	pub fn is_public(&self) -> bool {
		self.public
	}
}

impl Display for MemberInfo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.json_name {
			Some(json_name) => write!(f, "member {} as \"{json_name}\"", self.name),
			None => write!(f, "member {}", self.name),
		}
	}
}

impl Reflect for MemberInfo {
	fn shape(&self) -> Shape<'_> {
		Shape::Metadata(self.to_string())
	}
}

/// Members of a struct paired with borrowed values, in declaration order.
pub struct StructShape<'a> {
	members: &'static [MemberInfo],
	values: Vec<&'a dyn Reflect>,
}

impl<'a> StructShape<'a> {
	/// `values` must line up with `members`.
	pub fn new(members: &'static [MemberInfo], values: Vec<&'a dyn Reflect>) -> Self {
		debug_assert_eq!(members.len(), values.len());
		Self { members, values }
	}

	pub fn members(&self) -> &'static [MemberInfo] {
		self.members
	}

	/// Readable members, optionally including non-public ones.
	pub fn readable(&self, include_non_public: bool) -> impl Iterator<Item = (&'static MemberInfo, &'a dyn Reflect)> + '_ {
		self
			.members
			.iter()
			.zip(self.values.iter().copied())
			.filter(move |(member, _)| include_non_public || member.is_public())
	}
}

/// Members of a struct paired with mutable borrows, in declaration order.
pub struct StructShapeMut<'a> {
	members: &'static [MemberInfo],
	values: Vec<&'a mut dyn ReflectMut>,
}

impl<'a> StructShapeMut<'a> {
	/// `values` must line up with `members`.
	pub fn new(members: &'static [MemberInfo], values: Vec<&'a mut dyn ReflectMut>) -> Self {
		debug_assert_eq!(members.len(), values.len());
		Self { members, values }
	}

	pub fn members(&self) -> &'static [MemberInfo] {
		self.members
	}

	/// Writable members, optionally including non-public ones.
	pub fn writable(self, include_non_public: bool) -> impl Iterator<Item = (&'static MemberInfo, &'a mut dyn ReflectMut)> {
		self
			.members
			.iter()
			.zip(self.values)
			.filter(move |(member, _)| include_non_public || member.is_public())
	}
}

impl ReflectMut for MemberInfo {
	fn shape_mut(&mut self) -> ShapeMut<'_> {
		ShapeMut::Unsupported
	}
}
