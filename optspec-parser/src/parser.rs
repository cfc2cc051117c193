//! A parser for collecting option arguments from a token stream and validating them against a
//! grammar.

use core::fmt;

use crate::args::ParsedArgs;
use crate::grammar::Grammar;
use crate::lexer::{self, Tokens};

/// Defines the possible errors that may occur during parsing of arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error<'a> {
    /// The same option letter has been given more than once.
    #[error("option \"{0}\" was specified more than once")]
    DuplicateOption(char),

    /// An argument cannot be read as an option.
    #[error("unrecognized token \"{token}\" in arguments: {input}")]
    UnrecognizedToken {
        /// The faulty argument.
        token: &'a str,

        /// The whole command line input.
        input: Input<'a>,
    },

    /// The arguments do not satisfy the grammar, either because an option is missing or
    /// because of an unexpected option.
    #[error("failed to parse arguments: {0}")]
    InvalidArguments(Input<'a>),

    /// The option value cannot be converted to the destination type.
    #[error("invalid value for option \"{0}\"")]
    InvalidValue(char),

    /// Insufficient space for parsing arguments.
    #[error("out of parser memory space")]
    OutOfMemory,
}

/// The command line input, displayed as a sequence of quoted arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Input<'a>(pub &'a [&'a str]);

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("\"\"");
        }

        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }

            f.write_str("\"")?;
            for c in arg.chars() {
                if c == '\\' || c == '"' {
                    f.write_str("\\")?;
                }
                fmt::Write::write_char(f, c)?;
            }
            f.write_str("\"")?;
        }

        Ok(())
    }
}

impl<'a, const SIZE: usize> ParsedArgs<'a, SIZE> {
    /// Try to parse the input arguments and validate them against the grammar. On success, the
    /// result holds every given option.
    pub fn try_parse<const NODE_COUNT_MAX: usize>(
        tokens: Tokens<'a>,
        grammar: &Grammar<NODE_COUNT_MAX>,
    ) -> Result<Self, Error<'a>> {
        let input = Input(tokens.argv());

        let mut out = Self::default();

        for token in tokens {
            let token = token.map_err(|err| match err {
                lexer::Error::UnrecognizedToken(token) => Error::UnrecognizedToken { token, input },
            })?;

            out.insert(token.letter, token.value)?;
        }

        if !grammar.validate(&out) {
            debug!("arguments do not satisfy the grammar");
            return Err(Error::InvalidArguments(input));
        }

        Ok(out)
    }
}
