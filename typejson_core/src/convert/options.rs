use crate::reflect::CaseMatch;

/// Settings for one conversion call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConverterOptions {
	/// Also populate non-`pub` members.
	pub include_non_public: bool,
	/// How member names without a `#[json(rename)]` map to JSON keys.
	pub case_match: CaseMatch,
}

impl ConverterOptions {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_non_public(mut self, include_non_public: bool) -> Self {
		self.include_non_public = include_non_public;
		self
	}

	#[must_use]
	pub fn with_case_match(mut self, case_match: CaseMatch) -> Self {
		self.case_match = case_match;
		self
	}
}
