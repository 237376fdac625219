use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, Data, DeriveInput, Fields};

pub fn derive_json_parameters_impl(input: TokenStream) -> syn::Result<TokenStream> {
    let input = syn::parse2::<DeriveInput>(input)?;

    let variants = match input.data {
        Data::Enum(data) => data.variants,
        _ => return Err(syn::Error::new(Span::call_site(), "Input must be an enum")),
    };

    let ident = input.ident;
    let parameters = variants
        .iter()
        .map(|variant| {
            let ident = &variant.ident;
            match &variant.fields {
                Fields::Named(fields) => {
                    let fields = fields
                        .named
                        .iter()
                        .map(|field| field.ident.as_ref())
                        .collect::<Vec<_>>();
                    quote_spanned! { variant.span() =>
                        Self::#ident {#(#fields,)*} => Some(vec![#(to_value(#fields),)*]),
                    }
                }
                Fields::Unnamed(fields) => {
                    let fields: Vec<_> = (0..fields.unnamed.len())
                        .map(|i| format_ident!("f{i}"))
                        .collect();
                    quote_spanned! { variant.span() =>
                        Self::#ident (#(#fields,)*) => Some(vec![#(to_value(#fields),)*]),
                    }
                }
                Fields::Unit => quote! { Self::#ident => None, },
            }
        })
        .collect::<Vec<_>>();

    Ok(quote! {
        impl #ident {
            /// Variant fields in declaration order, `None` for unit variants.
            /// A field that cannot be rendered as JSON shows up as `null` so
            /// positions stay aligned with the declared fields.
            pub fn parameters(&self) -> Option<Vec<serde_json::Value>> {
                fn to_value<T: poem_openapi::types::ToJSON + ?Sized>(value: &T) -> serde_json::Value {
                    value.to_json().unwrap_or(serde_json::Value::Null)
                }
                match self {
                    #(#parameters)*
                }
            }
        }
    })
}
