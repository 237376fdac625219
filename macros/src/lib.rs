extern crate proc_macro;

mod display_upper_snake;
mod json_parameters;

use display_upper_snake::derive_display_upper_snake_impl;
use json_parameters::derive_json_parameters_impl;
use proc_macro::TokenStream;

/// Implements `Display` and `code()` for an enum, rendering each variant
/// name as an UPPER_SNAKE error code.
#[proc_macro_derive(DisplayUpperSnake)]
pub fn derive_display_upper_snake(input: TokenStream) -> TokenStream {
    TokenStream::from(
        derive_display_upper_snake_impl(input.into()).unwrap_or_else(|err| err.to_compile_error()),
    )
}

/// Generates `parameters()`, the variant's fields as a JSON list.
#[proc_macro_derive(JsonParameters)]
pub fn derive_json_parameters(input: TokenStream) -> TokenStream {
    TokenStream::from(
        derive_json_parameters_impl(input.into()).unwrap_or_else(|err| err.to_compile_error()),
    )
}
