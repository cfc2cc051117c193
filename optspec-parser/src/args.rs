//! A key-value store of option letters and their values.

use core::str::FromStr;

use heapless::Vec;

use crate::parser::Error;

/// Defines the result of argument parsing. This is a simple key-value store, kept in insertion
/// order, that offers a look-up over parsed arguments.
///
/// An empty value means that the option has been given without any value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParsedArgs<'a, const ARG_COUNT_MAX: usize = 16> {
    args: Vec<(char, &'a str), ARG_COUNT_MAX>,
}

impl<'a, const SIZE: usize> ParsedArgs<'a, SIZE> {
    /// Insert a new option. An option cannot be inserted twice.
    pub fn insert(&mut self, letter: char, value: &'a str) -> Result<(), Error<'a>> {
        if self.contains(letter) {
            return Err(Error::DuplicateOption(letter));
        }

        self.args
            .push((letter, value))
            .map_err(|_| Error::OutOfMemory)
    }

    /// Remove the option if it is present and its value satisfies the predicate. Return `true`
    /// if the option has been removed, otherwise the store is left untouched.
    pub fn take_if<F>(&mut self, letter: char, predicate: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        match self.args.iter().position(|x| x.0 == letter) {
            Some(index) if predicate(self.args[index].1) => {
                self.args.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Check if there exists an option with the given letter.
    #[inline(always)]
    pub fn contains(&self, letter: char) -> bool {
        self.args.iter().any(|x| x.0 == letter)
    }

    /// Get the raw value of the given option, which is empty if given without value.
    pub fn get(&self, letter: char) -> Option<&'a str> {
        self.args.iter().find(|x| x.0 == letter).map(|x| x.1)
    }

    /// Try to get and parse the option value if any.
    pub fn try_get_one<T>(&self, letter: char) -> Result<Option<T>, Error<'a>>
    where
        T: FromStr,
    {
        self.get(letter)
            .map(|value| value.parse::<T>().map_err(|_| Error::InvalidValue(letter)))
            .transpose()
    }

    /// Number of options.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there is no option at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Iterate over the options in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = (char, &'a str)> + '_ {
        self.args.iter().copied()
    }
}
