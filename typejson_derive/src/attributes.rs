use syn::{Attribute, LitStr};

/// Options collected from `#[json(...)]` attributes on a single field.
#[derive(Debug, Default)]
pub struct FieldAttributes {
	/// Explicit JSON key, used verbatim by the converter.
	pub rename: Option<String>,
	/// Excluded from serialization.
	pub ignore: bool,
}

impl FieldAttributes {
	pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
		let mut result = Self::default();
		for attr in attrs.iter().filter(|a| a.path().is_ident("json")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("rename") {
					let lit: LitStr = meta.value()?.parse()?;
					if lit.value().trim().is_empty() {
						return Err(meta.error("`rename` needs a non-empty key"));
					}
					result.rename = Some(lit.value());
					Ok(())
				} else if meta.path.is_ident("ignore") {
					result.ignore = true;
					Ok(())
				} else {
					Err(meta.error("unsupported json attribute, expected `rename = \"...\"` or `ignore`"))
				}
			})?;
		}
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use syn::parse_quote;

	fn field_attrs(item: syn::ItemStruct) -> syn::Result<FieldAttributes> {
		let field = item.fields.iter().next().expect("test struct has a field");
		FieldAttributes::from_attrs(&field.attrs)
	}

	#[test]
	fn no_attributes() {
		let attrs = field_attrs(parse_quote! { struct S { pub name: String } }).unwrap();
		assert_eq!(attrs.rename, None);
		assert!(!attrs.ignore);
	}

	#[test]
	fn rename_and_ignore() {
		let attrs = field_attrs(parse_quote! {
			struct S {
				#[json(rename = "full_name", ignore)]
				pub name: String,
			}
		})
		.unwrap();
		assert_eq!(attrs.rename.as_deref(), Some("full_name"));
		assert!(attrs.ignore);
	}

	#[test]
	fn foreign_attributes_are_left_alone() {
		let attrs = field_attrs(parse_quote! {
			struct S {
				#[doc = "documented"]
				#[json(ignore)]
				secret: String,
			}
		})
		.unwrap();
		assert!(attrs.ignore);
	}

	#[test]
	fn unknown_key_is_rejected() {
		let err = field_attrs(parse_quote! {
			struct S {
				#[json(flatten)]
				pub inner: String,
			}
		})
		.unwrap_err();
		assert!(err.to_string().contains("unsupported json attribute"));
	}

	#[test]
	fn blank_rename_is_rejected() {
		assert!(field_attrs(parse_quote! { struct S { #[json(rename = " ")] pub x: u8 } }).is_err());
	}
}
