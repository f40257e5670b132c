use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream}, parse_macro_input, Data, DataStruct, DeriveInput, Fields, Ident, Index, LitStr, Member, Token, Type, TypePath
};

const LINK_TYPES: [&str; 3] = ["ForwardLink", "BidirectionalLink", "TreeLink"];

struct LinkedAttribute {
    crate_path: syn::Path,
}

/// Parses the attribute in the format: `crate_path = "path::to::crate"`.
impl Parse for LinkedAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        if key != "crate_path" {
            return Err(syn::Error::new(key.span(), "expected attribute `crate_path`"));
        }

        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;
        let path: syn::Path = value.parse()?;

        Ok(LinkedAttribute { crate_path: path })
    }
}

/// Returns true if the field type names one of the link role types.
fn is_link_type(ty: &Type) -> bool {
    if let Type::Path(TypePath { path, .. }) = ty {
        path.segments
            .last()
            .map(|segment| LINK_TYPES.iter().any(|name| segment.ident == name))
            .unwrap_or(false)
    } else {
        false
    }
}

/// Derive macro implementing `Linked<L>` for every link role embedded in a struct.
///
/// A field counts as a link role when its type is `ForwardLink<_>`,
/// `BidirectionalLink<_>` or `TreeLink<_>`. Two fields of the same role type
/// produce conflicting impls, so each role must carry its own `ID`.
#[proc_macro_derive(Linked, attributes(linked))]
pub fn linked_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Find absolute crate path
    let mut crate_path = quote! { ::linkage_collections };

    for attr in &input.attrs {
        if attr.path().is_ident("linked") {
            match attr.parse_args::<LinkedAttribute>() {
                Ok(linked_attr) => {
                    let path = linked_attr.crate_path;
                    crate_path = quote! { #path };
                    break;
                }
                Err(e) => return e.to_compile_error().into(),
            }
        }
    }

    let traits_path = quote! { #crate_path::intrusive::traits };

    let fields = if let Data::Struct(DataStruct { ref fields, .. }) = input.data {
        fields
    } else {
        return syn::Error::new_spanned(
            &input,
            "Linked derive macro only supports structs",
        )
        .to_compile_error()
        .into();
    };

    let links: Vec<(Member, &Type)> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter(|field| is_link_type(&field.ty))
            .filter_map(|field| field.ident.clone().map(|ident| (Member::Named(ident), &field.ty)))
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .filter(|(_, field)| is_link_type(&field.ty))
            .map(|(i, field)| {
                let index = Index { index: i as u32, span: Span::call_site() };
                (Member::Unnamed(index), &field.ty)
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    if links.is_empty() {
        return syn::Error::new_spanned(
            struct_name,
            "Struct must embed at least one ForwardLink, BidirectionalLink or TreeLink field",
        )
        .to_compile_error()
        .into();
    }

    let impls = links.iter().map(|(member, ty)| {
        quote! {
            unsafe impl #impl_generics #traits_path::Linked<#ty> for #struct_name #ty_generics #where_clause {
                const OFFSET: usize = ::core::mem::offset_of!(Self, #member);
            }
        }
    });

    let expanded = quote! {
        #(#impls)*
    };

    TokenStream::from(expanded)
}
