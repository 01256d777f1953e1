/// Settings for one serialization call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializerOptions {
	/// Put every child on its own line, indented by four spaces per level.
	pub format: bool,
	/// Key of an extra first entry in every emitted struct object, holding the type name.
	pub type_specifier: Option<String>,
	/// Also emit non-`pub` members.
	pub include_non_public: bool,
	/// Member names to leave out, merged with `#[json(ignore)]` per type.
	pub exclude_properties: Vec<String>,
}

impl SerializerOptions {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_format(mut self, format: bool) -> Self {
		self.format = format;
		self
	}

	/// Emit the type name under `key`, e.g. `"$type"`. An empty key disables it.
	#[must_use]
	pub fn with_type_specifier(mut self, key: &str) -> Self {
		self.type_specifier = Some(key.to_string());
		self
	}

	#[must_use]
	pub fn with_non_public(mut self, include_non_public: bool) -> Self {
		self.include_non_public = include_non_public;
		self
	}

	#[must_use]
	pub fn with_excluded<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude_properties.extend(names.into_iter().map(Into::into));
		self
	}

	/// The type specifier key, if one is configured and non-empty.
	pub(crate) fn type_key(&self) -> Option<&str> {
		self.type_specifier.as_deref().filter(|key| !key.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builder_sets_fields() {
		let options = SerializerOptions::new()
			.with_format(true)
			.with_type_specifier("$type")
			.with_non_public(true)
			.with_excluded(["a", "b"]);
		assert!(options.format);
		assert!(options.include_non_public);
		assert_eq!(options.type_key(), Some("$type"));
		assert_eq!(options.exclude_properties, ["a", "b"]);
	}

	#[test]
	fn empty_type_specifier_is_ignored() {
		assert_eq!(SerializerOptions::new().with_type_specifier("").type_key(), None);
		assert_eq!(SerializerOptions::default().type_key(), None);
	}
}
