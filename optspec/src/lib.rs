//! optspec, a `no_std` short option parser validated against a grammar string.
//!
//! The grammar lists the accepted options: `a` is a mandatory flag, `a:` a mandatory option
//! with a value, `[...]` an optional group and `{...|...}` a choice between mutually exclusive
//! groups, tried in declaration order.
#![no_std]
#![deny(missing_docs)]

pub use optspec_macros as macros;
pub use optspec_parser as parser;

pub use macros::grammar;
pub use parser::{Grammar, ParsedArgs};

/// Defines the possible errors that may occur during usage of the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error<'a> {
    /// An error comes from the compilation of the grammar.
    #[error(transparent)]
    Grammar(parser::grammar::Error),

    /// An error comes from the parsing of arguments.
    #[error(transparent)]
    Parser(parser::Error<'a>),
}

impl From<parser::grammar::Error> for Error<'_> {
    fn from(err: parser::grammar::Error) -> Self {
        Error::Grammar(err)
    }
}

impl<'a> From<parser::Error<'a>> for Error<'a> {
    fn from(err: parser::Error<'a>) -> Self {
        Error::Parser(err)
    }
}

/// Defines a parser that owns a compiled grammar and validates any number of command lines
/// against it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parser<const NODE_COUNT_MAX: usize = 64, const ARG_COUNT_MAX: usize = 16> {
    grammar: Grammar<NODE_COUNT_MAX>,
}

impl<const NODE_COUNT_MAX: usize, const ARG_COUNT_MAX: usize>
    Parser<NODE_COUNT_MAX, ARG_COUNT_MAX>
{
    /// Create a new parser by compiling the grammar string.
    pub fn new(spec: &str) -> Result<Self, Error<'static>> {
        let grammar = Grammar::compile(spec)?;
        Ok(Parser { grammar })
    }

    /// Retrieve the compiled grammar.
    #[inline(always)]
    pub fn grammar(&self) -> &Grammar<NODE_COUNT_MAX> {
        &self.grammar
    }

    /// Parse the command line input (without the program name) and validate it against the
    /// grammar.
    pub fn parse<'a>(
        &self,
        argv: &'a [&'a str],
    ) -> Result<ParsedArgs<'a, ARG_COUNT_MAX>, Error<'a>> {
        let tokens = parser::Tokens::new(argv);
        let args = ParsedArgs::try_parse(tokens, &self.grammar)?;
        Ok(args)
    }
}

impl<const NODE_COUNT_MAX: usize, const ARG_COUNT_MAX: usize> From<Grammar<NODE_COUNT_MAX>>
    for Parser<NODE_COUNT_MAX, ARG_COUNT_MAX>
{
    fn from(grammar: Grammar<NODE_COUNT_MAX>) -> Self {
        Parser { grammar }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::{assert_that, eq};

    use crate as optspec;
    use crate::parser::Error as ParserError;
    use crate::parser::Input;
    use crate::parser::grammar::{Error as GrammarError, ErrorKind};

    use super::*;

    #[test]
    fn it_should_parse_many_times() {
        let parser: Parser = Parser::new("a:[b]").unwrap();

        let args = parser.parse(&["-a", "x"]).unwrap();
        assert_that!(args.get('a'), eq(Some("x")));
        assert_that!(args.contains('b'), eq(false));

        let args = parser.parse(&["-b", "-ay"]).unwrap();
        assert_that!(args.get('a'), eq(Some("y")));
        assert_that!(args.get('b'), eq(Some("")));

        let argv: &[&str] = &["-b"];
        assert_that!(
            parser.parse(argv).err(),
            eq(Some(Error::Parser(ParserError::InvalidArguments(Input(argv)))))
        );
    }

    #[test]
    fn it_should_report_invalid_grammar() {
        let res: Result<Parser, _> = Parser::new("{a|b");

        assert_that!(
            res.err(),
            eq(Some(Error::Grammar(GrammarError {
                position: 4,
                kind: ErrorKind::UnclosedChoice,
            })))
        );
    }

    #[test]
    fn it_should_convert_errors() {
        let argv: &[&str] = &["foo"];
        let err: Error<'_> = ParserError::InvalidArguments(Input(argv)).into();
        assert_that!(err, eq(Error::Parser(ParserError::InvalidArguments(Input(argv)))));

        let kind = ErrorKind::TrailingInput;
        let err: Error<'_> = GrammarError { position: 1, kind }.into();
        assert_that!(err, eq(Error::Grammar(GrammarError { position: 1, kind })));
    }

    #[test]
    fn it_should_report_duplicate_option() {
        let parser: Parser = Parser::new("a").unwrap();

        assert_that!(
            parser.parse(&["-a", "-a"]).err(),
            eq(Some(Error::Parser(ParserError::DuplicateOption('a'))))
        );
    }

    #[test]
    fn it_should_build_parser_from_checked_grammar() {
        let parser: Parser = Parser::from(optspec::grammar!("{v|q}[n:]"));

        let args = parser.parse(&["-q", "-n", "3"]).unwrap();
        assert_that!(args.try_get_one::<u32>('n'), eq(Ok(Some(3))));
        assert_that!(args.contains('q'), eq(true));

        assert_that!(parser.parse(&["-n", "3"]).is_err(), eq(true));
    }

    #[test]
    fn it_should_share_parser_between_threads() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<Parser>();
    }

    #[test]
    fn it_should_limit_argument_count() {
        let parser: Parser<8, 1> = Parser::new("[a][b]").unwrap();

        assert_that!(
            parser.parse(&["-a", "-b"]).err(),
            eq(Some(Error::Parser(ParserError::OutOfMemory)))
        );
    }
}
