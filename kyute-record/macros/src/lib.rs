//! Implementation of `#[derive(Lens)]`
extern crate proc_macro;
use proc_macro2::Span;
use quote::{ToTokens, TokenStreamExt};

mod lens;

//--------------------------------------------------------------------------------------------------
struct CrateName;
const CRATE: CrateName = CrateName;

impl ToTokens for CrateName {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        tokens.append(syn::Ident::new("kyute_record", Span::call_site()))
    }
}

//--------------------------------------------------------------------------------------------------

/// Generates one `FieldLens` associated constant per field of a struct.
///
/// # Examples
///```ignore
/// #[derive(Lens)]
/// struct Point {
///     x: f32,
///     #[lens(name = "vertical")]
///     y: f32,
///     #[lens(ignore)]
///     cache: Cache,
/// }
///
/// // `Point::x: FieldLens<Point, f32>`, `Point::vertical: FieldLens<Point, f32>`
///```
#[proc_macro_derive(Lens, attributes(lens))]
pub fn derive_lens(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    lens::derive_lens_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
