use proc_macro::TokenStream;

mod grammar;

/// Compile a grammar string at build time.
///
/// A malformed grammar is reported as a compile error on the string literal. The expansion
/// builds the grammar with the default node capacity.
#[proc_macro]
pub fn grammar(item: TokenStream) -> TokenStream {
    grammar::run(item.into()).into()
}
