use crate::attributes::FieldAttributes;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, Generics, Visibility, parse_quote};

/// Generate `Reflect` and `ReflectMut` for a struct with named fields.
///
/// The member table lives in a hidden associated const so both impls share it.
pub fn derive_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
	let fields = match &data.fields {
		Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
		Fields::Unit => Vec::new(),
		Fields::Unnamed(_) => {
			return Err(syn::Error::new_spanned(
				&input.ident,
				"Reflect can only be derived for structs with named fields",
			));
		}
	};

	let mut members = Vec::with_capacity(fields.len());
	let mut idents = Vec::with_capacity(fields.len());
	for field in fields {
		let ident = field
			.ident
			.clone()
			.ok_or_else(|| syn::Error::new_spanned(field, "field must have a name"))?;
		let attrs = FieldAttributes::from_attrs(&field.attrs)?;
		let name = ident.to_string();
		let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
		let json_name = match attrs.rename {
			Some(rename) => quote! { ::core::option::Option::Some(#rename) },
			None => quote! { ::core::option::Option::None },
		};
		let ignored = attrs.ignore;
		let public = matches!(field.vis, Visibility::Public(_));
		members.push(quote! {
			::typejson_core::reflect::MemberInfo::new(#name, #json_name, #ignored, #public)
		});
		idents.push(ident);
	}

	let name = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	let read_generics = bounded(&input.generics, &parse_quote!(::typejson_core::reflect::Reflect));
	let (read_impl, _, read_where) = read_generics.split_for_impl();
	let write_generics = bounded(&input.generics, &parse_quote!(::typejson_core::reflect::ReflectMut));
	let (write_impl, _, write_where) = write_generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics #name #ty_generics #where_clause {
			#[doc(hidden)]
			const __TYPEJSON_MEMBERS: &'static [::typejson_core::reflect::MemberInfo] = &[#(#members),*];
		}

		impl #read_impl ::typejson_core::reflect::Reflect for #name #ty_generics #read_where {
			fn type_name(&self) -> &'static str {
				::core::any::type_name::<Self>()
			}

			fn shape(&self) -> ::typejson_core::reflect::Shape<'_> {
				::typejson_core::reflect::Shape::Struct(::typejson_core::reflect::StructShape::new(
					Self::__TYPEJSON_MEMBERS,
					::std::vec![#(&self.#idents as &dyn ::typejson_core::reflect::Reflect),*],
				))
			}
		}

		impl #write_impl ::typejson_core::reflect::ReflectMut for #name #ty_generics #write_where {
			fn shape_mut(&mut self) -> ::typejson_core::reflect::ShapeMut<'_> {
				::typejson_core::reflect::ShapeMut::Struct(::typejson_core::reflect::StructShapeMut::new(
					Self::__TYPEJSON_MEMBERS,
					::std::vec![#(&mut self.#idents as &mut dyn ::typejson_core::reflect::ReflectMut),*],
				))
			}
		}
	})
}

/// Clone `generics`, adding `bound` to every type parameter.
pub fn bounded(generics: &Generics, bound: &syn::TypeParamBound) -> Generics {
	let mut generics = generics.clone();
	let params = generics.type_params().map(|p| p.ident.clone()).collect::<Vec<_>>();
	let where_clause = generics.make_where_clause();
	for ident in params {
		where_clause.predicates.push(parse_quote!(#ident: #bound));
	}
	generics
}
