//! Core of optspec: tokenizer, grammar compiler and argument matcher.
#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod args;
pub mod grammar;
pub mod lexer;
pub mod matcher;
pub mod parser;

pub use args::ParsedArgs;
pub use grammar::Grammar;
pub use lexer::Tokens;
pub use parser::{Error, Input};
