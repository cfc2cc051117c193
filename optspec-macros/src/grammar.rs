//! Grammar macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use optspec_parser::Grammar;

pub fn run(item: TokenStream) -> TokenStream {
    try_run(item).unwrap_or_else(|err| err.to_compile_error())
}

pub fn try_run(item: TokenStream) -> Result<TokenStream, syn::Error> {
    let spec: LitStr = syn::parse2(item)?;

    // Same capacity as the expanded code below.
    let compiled: Result<Grammar, _> = Grammar::compile(&spec.value());
    if let Err(err) = compiled {
        return Err(syn::Error::new(spec.span(), err));
    }

    Ok(quote! {
        match <optspec::parser::Grammar>::compile(#spec) {
            Ok(grammar) => grammar,
            Err(_) => unreachable!("grammar has been checked at build time"),
        }
    })
}
