/// How a member name maps to the JSON key the converter looks up.
///
/// Only applies to members without an explicit `#[json(rename = "...")]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseMatch {
	/// Use the member name as written.
	#[default]
	None,
	/// `user_id` -> `userId`
	CamelCase,
	/// `user_id` -> `UserId`
	PascalCase,
	/// `userId` -> `user_id`
	SnakeCase,
	/// Lowercase every letter, keep separators.
	LowerCase,
	/// Uppercase every letter, keep separators.
	UpperCase,
}

impl CaseMatch {
	pub fn apply(self, name: &str) -> String {
		match self {
			CaseMatch::None => name.to_string(),
			CaseMatch::LowerCase => name.to_lowercase(),
			CaseMatch::UpperCase => name.to_uppercase(),
			CaseMatch::SnakeCase => split_words(name)
				.iter()
				.map(|word| word.to_lowercase())
				.collect::<Vec<_>>()
				.join("_"),
			CaseMatch::CamelCase => {
				let mut result = String::with_capacity(name.len());
				for (index, word) in split_words(name).iter().enumerate() {
					if index == 0 {
						result.push_str(&word.to_lowercase());
					} else {
						result.push_str(&capitalize(word));
					}
				}
				result
			}
			CaseMatch::PascalCase => split_words(name).iter().map(|word| capitalize(word)).collect(),
		}
	}
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

/// Split on underscores, hyphens and case changes. `HTTPServer2Id` -> `HTTP`, `Server2`, `Id`.
fn split_words(name: &str) -> Vec<&str> {
	let mut words = Vec::new();
	let chars = name.char_indices().collect::<Vec<_>>();
	let mut start = None;

	for (i, &(offset, c)) in chars.iter().enumerate() {
		if c == '_' || c == '-' {
			if let Some(s) = start.take() {
				words.push(&name[s..offset]);
			}
			continue;
		}
		if let Some(s) = start {
			let prev = chars[i - 1].1;
			let next = chars.get(i + 1).map(|&(_, n)| n);
			let hump = c.is_uppercase()
				&& (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
			if hump {
				words.push(&name[s..offset]);
				start = Some(offset);
			}
		} else {
			start = Some(offset);
		}
	}
	if let Some(s) = start {
		words.push(&name[s..]);
	}
	words
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(CaseMatch::None, "user_id", "user_id")]
	#[case(CaseMatch::CamelCase, "user_id", "userId")]
	#[case(CaseMatch::CamelCase, "UserId", "userId")]
	#[case(CaseMatch::PascalCase, "user_id", "UserId")]
	#[case(CaseMatch::PascalCase, "age", "Age")]
	#[case(CaseMatch::SnakeCase, "userId", "user_id")]
	#[case(CaseMatch::SnakeCase, "HTTPServer", "http_server")]
	#[case(CaseMatch::LowerCase, "User_Id", "user_id")]
	#[case(CaseMatch::UpperCase, "user_id", "USER_ID")]
	#[case(CaseMatch::PascalCase, "", "")]
	fn apply(#[case] policy: CaseMatch, #[case] name: &str, #[case] expected: &str) {
		assert_eq!(policy.apply(name), expected);
	}

	#[test]
	fn splits_on_humps_and_separators() {
		assert_eq!(split_words("HTTPServer2Id"), ["HTTP", "Server2", "Id"]);
		assert_eq!(split_words("__leading_and__double"), ["leading", "and", "double"]);
		assert_eq!(split_words("kebab-case"), ["kebab", "case"]);
	}
}
