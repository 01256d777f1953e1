//! Procedural macros for `typejson_core`.
//!
//! - `#[derive(Reflect)]` registers the members of a struct (or the variants of a
//!   field-less enum) so the serializer and converter can walk them without
//!   runtime reflection.
//! - `#[context("...")]` wraps a function returning `anyhow::Result` and attaches
//!   a formatted context message to every error it returns.

mod args;
mod attributes;
mod reflect_enum;
mod reflect_struct;

use crate::{args::ContextArgs, reflect_enum::derive_enum, reflect_struct::derive_struct};
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::parse_macro_input;

/// Derive `Reflect` + `ReflectMut` (and `ReflectEnum` for enums).
///
/// Field attributes:
/// - `#[json(rename = "key")]` uses `key` verbatim as the JSON name.
/// - `#[json(ignore)]` excludes the field from serialization.
///
/// Only `pub` fields are visible unless non-public members are requested.
#[proc_macro_derive(Reflect, attributes(json))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as syn::DeriveInput);

	let expanded = match &input.data {
		syn::Data::Struct(data) => derive_struct(&input, data),
		syn::Data::Enum(data) => derive_enum(&input, data),
		syn::Data::Union(_) => Err(syn::Error::new_spanned(
			&input.ident,
			"Reflect cannot be derived for unions",
		)),
	};

	expanded.unwrap_or_else(syn::Error::into_compile_error).into()
}

#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let ContextArgs(move_token, format_args) = parse_macro_input!(args);
	let mut input = parse_macro_input!(input as syn::ItemFn);

	let body = &input.block;
	let return_type = &input.sig.output;
	let err = Ident::new("err", Span::mixed_site());

	if matches!(return_type, syn::ReturnType::Default) {
		return syn::Error::new_spanned(input.sig, "function should return Result")
			.to_compile_error()
			.into();
	}

	let force_fn_once = Ident::new("force_fn_once", Span::mixed_site());
	let new_body = quote! {
		// Moving a non-`Copy` value into the closure makes it `FnOnce`, which keeps borrowck happy.
		let #force_fn_once = ::core::iter::empty::<()>();
		(#move_token || #return_type {
			::core::mem::drop(#force_fn_once);
			#body
		})().map_err(|#err| #err.context(format!(#format_args)).into())
	};
	input.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(new_body), None)];

	input.into_token_stream().into()
}
