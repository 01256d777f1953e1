//! Shared lookup caches for the serializer and the converter.
//!
//! `ReflectCache` memoizes the pure, per-type lookups both directions repeat for every
//! value they visit:
//! - member names a type excludes through `#[json(ignore)]`
//! - the JSON key a member resolves to under a [`CaseMatch`] policy
//! - indentation strings for pretty output
//!
//! Entries are only ever inserted, never updated or removed, because a type's shape cannot
//! change at runtime. Build one cache and share it through an `Arc` to reuse lookups across
//! serializers and converters, or let each of them create its own.

use crate::reflect::{CaseMatch, MemberInfo};
use dashmap::DashMap;
use std::sync::Arc;

const INDENT_WIDTH: usize = 4;

#[derive(Default)]
pub struct ReflectCache {
	ignored: DashMap<&'static str, Arc<[&'static str]>>,
	keys: DashMap<(&'static str, &'static str, CaseMatch), Arc<str>>,
	indents: DashMap<usize, Arc<str>>,
}

impl ReflectCache {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Names of `members` declared with `#[json(ignore)]`, including their JSON names.
	pub fn ignored_members(&self, type_name: &'static str, members: &'static [MemberInfo]) -> Arc<[&'static str]> {
		self
			.ignored
			.entry(type_name)
			.or_insert_with(|| {
				members
					.iter()
					.filter(|member| member.is_ignored())
					.flat_map(|member| std::iter::once(member.name()).chain(member.json_name()))
					.collect()
			})
			.clone()
	}

	/// The JSON key a member is looked up by: its explicit JSON name verbatim, otherwise its
	/// name passed through `case_match`.
	pub fn json_key(&self, type_name: &'static str, member: &MemberInfo, case_match: CaseMatch) -> Arc<str> {
		self
			.keys
			.entry((type_name, member.name(), case_match))
			.or_insert_with(|| match member.json_name() {
				Some(json_name) => Arc::from(json_name),
				None => Arc::from(case_match.apply(member.name())),
			})
			.clone()
	}

	/// Whitespace for `level` levels of pretty-printing.
	pub fn indent(&self, level: usize) -> Arc<str> {
		self
			.indents
			.entry(level)
			.or_insert_with(|| Arc::from(" ".repeat(level * INDENT_WIDTH)))
			.clone()
	}

	/// Number of cached entries across all lookups.
	pub fn len(&self) -> usize {
		self.ignored.len() + self.keys.len() + self.indents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
