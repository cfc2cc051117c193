//! A lexer for generating option tokens from a command line.

/// Defines the possible errors that may occur during tokenization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error<'a> {
    /// The argument is neither a short flag nor a short flag with a glued value.
    #[error("unrecognized token \"{0}\"")]
    UnrecognizedToken(&'a str),
}

/// Defines a `Token` that has been read from the command line.
///
/// An empty `value` means that the flag has been given without any value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Token<'a> {
    /// The option letter, without the hyphen.
    pub letter: char,

    /// The option value, possibly empty.
    pub value: &'a str,
}

impl<'a> Token<'a> {
    /// Evaluate if the character may be used as an option letter (i.e. a word character).
    #[inline(always)]
    pub fn is_letter(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Evaluate if the token string is a value, i.e. it does not start with a hyphen nor a
    /// whitespace.
    #[inline(always)]
    pub fn is_value(input: &str) -> bool {
        input
            .chars()
            .next()
            .is_some_and(|c| c != '-' && !c.is_whitespace())
    }

    /// Extract the letter if the token string is a lone short flag (e.g. -v).
    pub fn short_flag(input: &str) -> Option<char> {
        let mut chars = input.strip_prefix('-')?.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) if Self::is_letter(c) => Some(c),
            _ => None,
        }
    }

    /// Split the token string into a letter and a value if it is a short flag immediately
    /// followed by its value (e.g. -ofile). Whitespaces between both are skipped.
    pub fn glued(input: &'a str) -> Option<(char, &'a str)> {
        let rest = input.strip_prefix('-')?;
        let letter = rest.chars().next().filter(|c| Self::is_letter(*c))?;

        let value = rest[letter.len_utf8()..].trim_start();
        Self::is_value(value).then_some((letter, value))
    }
}

/// Defines a lexer that is responsible for streaming tokens from the command line input.
///
/// A lexer acts like a forward iterator. A flag followed by a value argument consumes both
/// arguments.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    argv: &'a [&'a str],
    cursor: usize,
}

impl<'a> Tokens<'a> {
    /// Create a new lexer from the command line input.
    pub fn new(argv: &'a [&'a str]) -> Self {
        Tokens { argv, cursor: 0 }
    }

    /// Retrieve the whole command line input, whatever the position of the cursor.
    #[inline(always)]
    pub fn argv(&self) -> &'a [&'a str] {
        self.argv
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, Error<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let arg = *self.argv.get(self.cursor)?;
        self.cursor += 1;

        // Short flag, with its value in the next argument if any.
        if let Some(letter) = Token::short_flag(arg) {
            let value = match self.argv.get(self.cursor) {
                Some(next) if Token::is_value(next) => {
                    self.cursor += 1;
                    *next
                }
                _ => "",
            };

            return Some(Ok(Token { letter, value }));
        }

        // Short flag with a glued value.
        if let Some((letter, value)) = Token::glued(arg) {
            return Some(Ok(Token { letter, value }));
        }

        Some(Err(Error::UnrecognizedToken(arg)))
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn token(letter: char, value: &str) -> core::result::Result<Token<'_>, Error<'_>> {
        Ok(Token { letter, value })
    }

    #[test]
    fn it_should_match_short_flag() {
        let mut lexer = Tokens::new(&["-f"]);

        assert_that!(lexer.next(), eq(Some(token('f', ""))));
        assert_that!(lexer.next(), eq(None));
    }

    #[test]
    fn it_should_match_short_flag_with_separate_value() {
        let mut lexer = Tokens::new(&["-o", "file", "-v"]);

        assert_that!(lexer.next(), eq(Some(token('o', "file"))));
        assert_that!(lexer.next(), eq(Some(token('v', ""))));
        assert_that!(lexer.next(), eq(None));
    }

    #[test]
    fn it_should_not_take_a_flag_as_value() {
        let mut lexer = Tokens::new(&["-a", "-b"]);

        assert_that!(lexer.next(), eq(Some(token('a', ""))));
        assert_that!(lexer.next(), eq(Some(token('b', ""))));
    }

    #[test]
    fn it_should_not_take_an_empty_argument_as_value() {
        let mut lexer = Tokens::new(&["-a", ""]);

        assert_that!(lexer.next(), eq(Some(token('a', ""))));
        assert_that!(lexer.next(), eq(Some(Err(Error::UnrecognizedToken("")))));
    }

    #[test]
    fn it_should_match_short_flag_with_glued_value() {
        let mut lexer = Tokens::new(&["-ofile", "-n 42"]);

        assert_that!(lexer.next(), eq(Some(token('o', "file"))));
        assert_that!(lexer.next(), eq(Some(token('n', "42"))));
    }

    #[test]
    fn it_should_treat_negative_numbers_as_flags() {
        let mut lexer = Tokens::new(&["-n", "-2"]);

        assert_that!(lexer.next(), eq(Some(token('n', ""))));
        assert_that!(lexer.next(), eq(Some(token('2', ""))));
    }

    #[test]
    fn it_should_reject_unrecognized_tokens() {
        for arg in ["foo", "-", "--flag", "-a-b", "-a ", "-é"] {
            let mut lexer = Tokens::new(core::slice::from_ref(&arg));
            assert_that!(lexer.next(), eq(Some(Err(Error::UnrecognizedToken(arg)))));
        }
    }

    #[test]
    fn it_should_keep_whole_argv() {
        let argv = &["-a", "x"];
        let mut lexer = Tokens::new(argv);
        lexer.next();

        assert_that!(lexer.argv(), eq(&["-a", "x"][..]));
    }
}
