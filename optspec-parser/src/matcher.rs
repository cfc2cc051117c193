//! Matching of parsed arguments against a compiled grammar.
//!
//! Matching consumes arguments from a working copy. A node that is not satisfied leaves the
//! arguments untouched, and groups only commit their copy once all their children are
//! satisfied.

use crate::args::ParsedArgs;
use crate::grammar::{Grammar, Node, NodeId, Span};

impl<const SIZE: usize> Grammar<SIZE> {
    /// Check that the arguments satisfy the whole grammar, without any leftover option.
    pub fn validate<const ARG_COUNT_MAX: usize>(
        &self,
        args: &ParsedArgs<'_, ARG_COUNT_MAX>,
    ) -> bool {
        let mut remaining = args.clone();

        if !self.consume(&mut remaining) {
            return false;
        }

        remaining.is_empty()
    }

    /// Consume the arguments matching the top-level nodes. Return `true` if all nodes are
    /// satisfied. Unmatched options are left in the arguments.
    pub fn consume<const ARG_COUNT_MAX: usize>(
        &self,
        args: &mut ParsedArgs<'_, ARG_COUNT_MAX>,
    ) -> bool {
        self.matches_all(self.root(), args)
    }

    fn matches_all<const N: usize>(&self, ids: &[NodeId], args: &mut ParsedArgs<'_, N>) -> bool {
        ids.iter().all(|id| self.matches(*id, args))
    }

    fn matches<const N: usize>(&self, id: NodeId, args: &mut ParsedArgs<'_, N>) -> bool {
        match *self.node(id) {
            Node::Flag {
                letter,
                requires_value,
            } => {
                let taken = args.take_if(letter, |value| value.is_empty() != requires_value);
                if taken {
                    trace!("option '{}' matched", letter);
                }
                taken
            }

            Node::Optional(span) => {
                self.try_commit(span, args);
                true
            }

            Node::Choice(span) => self
                .alternatives(span)
                .iter()
                .any(|alternative| self.try_commit(*alternative, args)),
        }
    }

    /// Match a sequence on a copy of the arguments, then commit the copy if the whole sequence
    /// is satisfied.
    fn try_commit<const N: usize>(&self, span: Span, args: &mut ParsedArgs<'_, N>) -> bool {
        let mut copy = args.clone();

        if !self.matches_all(self.sequence(span), &mut copy) {
            return false;
        }

        trace!("group of {} nodes committed", self.sequence(span).len());
        *args = copy;
        true
    }
}
