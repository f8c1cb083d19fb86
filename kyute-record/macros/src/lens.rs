use crate::CRATE;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, Error};

const LENS_ATTR_PATH: &str = "lens";
const IGNORE_ATTR_PATH: &str = "ignore";
const NAME_ATTR_PATH: &str = "name";

/// A struct field, with its `#[lens(...)]` attributes.
struct Field<'a> {
    field: &'a syn::Field,
    index: usize,
    /// `true` if no lens should be generated for this field.
    ignore: bool,
    /// Overrides the name of the generated constant.
    name: Option<syn::Ident>,
}

impl<'a> Field<'a> {
    fn parse_ast(field: &'a syn::Field, index: usize) -> Result<Self, Error> {
        let mut ignore = false;
        let mut name = None;

        for attr in field.attrs.iter() {
            if !attr.path().is_ident(LENS_ATTR_PATH) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(IGNORE_ATTR_PATH) {
                    if ignore {
                        return Err(meta.error("duplicate attribute"));
                    }
                    ignore = true;
                    Ok(())
                } else if meta.path.is_ident(NAME_ATTR_PATH) {
                    if name.is_some() {
                        return Err(meta.error("duplicate attribute"));
                    }
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    name = Some(lit.parse::<syn::Ident>()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown attribute (expected `ignore` or `name = \"...\"`)"))
                }
            })?;
        }

        Ok(Field {
            field,
            index,
            ignore,
            name,
        })
    }

    /// The name of the field as it appears in paths: the identifier, or the tuple index.
    fn key_string(&self) -> String {
        match &self.field.ident {
            Some(ident) => ident.to_string().trim_start_matches("r#").to_owned(),
            None => self.index.to_string(),
        }
    }

    /// The name of the associated constant holding the lens.
    fn const_ident(&self) -> syn::Ident {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.field.ident {
            Some(ident) => ident.clone(),
            None => syn::Ident::new(&format!("elem_{}", self.index), Span::call_site()),
        }
    }

    /// The tokens accessing the field on a value (`data.#access`).
    fn access_tokens(&self) -> TokenStream {
        match &self.field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = syn::Index::from(self.index);
                quote! { #index }
            }
        }
    }
}

pub(crate) fn derive_lens_impl(input: syn::DeriveInput) -> Result<TokenStream, Error> {
    match &input.data {
        syn::Data::Struct(s) => derive_struct(&input, s),
        syn::Data::Enum(e) => Err(Error::new(
            e.enum_token.span(),
            "Lens implementations cannot be derived from enums",
        )),
        syn::Data::Union(u) => Err(Error::new(
            u.union_token.span(),
            "Lens implementations cannot be derived from unions",
        )),
    }
}

fn derive_struct(input: &syn::DeriveInput, s: &syn::DataStruct) -> Result<TokenStream, Error> {
    let ty = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Lens implementations cannot be derived for generic types",
        ));
    }

    let fields = match &s.fields {
        syn::Fields::Named(fields_named) => &fields_named.named,
        syn::Fields::Unnamed(fields_unnamed) => &fields_unnamed.unnamed,
        syn::Fields::Unit => {
            return Err(Error::new(
                input.ident.span(),
                "Lens implementations cannot be derived from unit structs",
            ))
        }
    };

    let fields = fields
        .iter()
        .enumerate()
        .map(|(i, f)| Field::parse_ast(f, i))
        .collect::<Result<Vec<_>, _>>()?;

    let mut associated_items = Vec::new();
    for f in fields.iter().filter(|f| !f.ignore) {
        let vis = &f.field.vis;
        let name = f.const_ident();
        let key = f.key_string();
        let access = f.access_tokens();
        let lty = &f.field.ty;

        associated_items.push(quote! {
            #vis const #name: ::#CRATE::FieldLens<#ty, #lty> = {
                fn read(data: &#ty) -> &#lty {
                    &data.#access
                }
                fn write(data: &mut #ty) -> &mut #lty {
                    &mut data.#access
                }
                ::#CRATE::FieldLens::new(#key, read, write)
            };
        });
    }

    Ok(quote! {
        #[allow(non_upper_case_globals)]
        impl #ty {
            #(#associated_items)*
        }
    })
}
