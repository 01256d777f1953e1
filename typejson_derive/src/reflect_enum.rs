use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

/// Generate `ReflectEnum`, `Reflect` and `ReflectMut` for a field-less enum.
pub fn derive_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
	if data.variants.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.ident,
			"Reflect cannot be derived for an enum without variants",
		));
	}
	if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
		return Err(syn::Error::new_spanned(
			variant,
			"Reflect can only be derived for enums whose variants carry no data",
		));
	}

	let name = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	let idents = data.variants.iter().map(|v| &v.ident).collect::<Vec<_>>();
	let names = idents.iter().map(|i| i.to_string()).collect::<Vec<_>>();
	let indices = (0..idents.len()).collect::<Vec<_>>();

	Ok(quote! {
		impl #impl_generics ::typejson_core::reflect::ReflectEnum for #name #ty_generics #where_clause {
			const VARIANTS: &'static [::typejson_core::reflect::EnumVariant] = &[
				#(::typejson_core::reflect::EnumVariant::new(#names, Self::#idents as i64)),*
			];

			fn variant_index(&self) -> usize {
				match self {
					#(Self::#idents => #indices),*
				}
			}

			fn from_variant_index(index: usize) -> ::core::option::Option<Self> {
				match index {
					#(#indices => ::core::option::Option::Some(Self::#idents),)*
					_ => ::core::option::Option::None,
				}
			}
		}

		impl #impl_generics ::typejson_core::reflect::Reflect for #name #ty_generics #where_clause {
			fn type_name(&self) -> &'static str {
				::core::any::type_name::<Self>()
			}

			fn shape(&self) -> ::typejson_core::reflect::Shape<'_> {
				::typejson_core::reflect::Shape::Enum(::typejson_core::reflect::ReflectEnum::variant(self))
			}
		}

		impl #impl_generics ::typejson_core::reflect::ReflectMut for #name #ty_generics #where_clause {
			fn shape_mut(&mut self) -> ::typejson_core::reflect::ShapeMut<'_> {
				::typejson_core::reflect::ShapeMut::Enum(self)
			}
		}
	})
}
