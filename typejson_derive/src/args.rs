use proc_macro2::TokenStream as TokenStream2;
use syn::Token;
use syn::parse::{self, Parse, ParseStream};

/// Arguments of `#[context(...)]`: an optional leading `move,` followed by `format!` arguments.
#[derive(Debug)]
pub struct ContextArgs(pub Option<Token![move]>, pub TokenStream2);

impl Parse for ContextArgs {
	fn parse(input: ParseStream<'_>) -> parse::Result<Self> {
		let move_token = if input.peek(Token![move]) {
			let token = input.parse()?;
			input.parse::<Token![,]>()?;
			Some(token)
		} else {
			None
		};
		Ok(Self(move_token, input.parse()?))
	}
}

#[cfg(test)]
mod tests {
	use super::ContextArgs;
	use syn::parse_str;

	#[test]
	fn parses_plain_format_string() {
		let args: ContextArgs = parse_str("\"while parsing\"").unwrap();
		assert!(args.0.is_none());
		assert_eq!(args.1.to_string(), "\"while parsing\"");
	}

	#[test]
	fn parses_move_prefix() {
		let args: ContextArgs = parse_str("move, \"tag {}\", tag").unwrap();
		assert!(args.0.is_some());
		assert_eq!(args.1.to_string(), "\"tag {}\" , tag");
	}

	#[test]
	fn rejects_move_without_comma() {
		let err = parse_str::<ContextArgs>("move \"x\"").unwrap_err();
		assert!(err.to_string().contains(','), "expected comma error, got: {err}");
	}
}
