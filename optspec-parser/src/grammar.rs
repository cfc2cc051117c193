//! A compiler for grammar strings describing the accepted options.
//!
//! The grammar string follows this EBNF:
//!
//! ```text
//! options        = option_block, { option_block } ;
//! option_block   = option | optional_group | choice_group ;
//! option         = letter, [ ":" ] ;
//! optional_group = "[", options, "]" ;
//! choice_group   = "{", options, { "|", options }, "}" ;
//! letter         = "A" .. "Z" | "a" .. "z" | "0" .. "9" ;
//! ```
//!
//! A trailing `:` marks an option that requires a value.

use core::ops::Range;

use heapless::Vec;

/// Identifier of a node in the grammar arena.
pub type NodeId = usize;

/// Defines the possible errors that may occur while compiling a grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum ErrorKind {
    /// No option, optional group nor choice group has been found.
    #[error("failed to parse any options")]
    ExpectedOption,

    /// A choice alternative contains no option.
    #[error("options must follow '{{' and '|'")]
    EmptyAlternative,

    /// An optional group is not closed.
    #[error("optional arguments have to be closed with ']'")]
    UnclosedOptional,

    /// A choice group is not closed.
    #[error("choice has to be closed with '}}'")]
    UnclosedChoice,

    /// The grammar is complete but some characters remain.
    #[error("unexpected trailing characters")]
    TrailingInput,

    /// Insufficient space for compiling the grammar.
    #[error("out of grammar memory space")]
    OutOfMemory,
}

/// Defines a grammar compilation error, located at a character offset of the grammar string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("invalid grammar: {kind} at position {position}")]
pub struct Error {
    /// Character offset in the grammar string.
    pub position: usize,

    /// What went wrong.
    pub kind: ErrorKind,
}

/// A contiguous range of entries in one of the grammar tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Span {
    start: usize,
    len: usize,
}

impl Span {
    #[inline(always)]
    fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// A grammar node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Node {
    /// A single option.
    Flag {
        /// The option letter.
        letter: char,

        /// Whether the option must be given a value.
        requires_value: bool,
    },

    /// A sequence of nodes that may be entirely absent.
    Optional(Span),

    /// Mutually exclusive sequences of nodes, tried in declaration order.
    Choice(Span),
}

/// Defines a compiled grammar.
///
/// Nodes are stored in an arena. Each sequence of sibling nodes is a span of the member table,
/// and each choice is a span of the alternative table whose entries are sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grammar<const NODE_COUNT_MAX: usize = 64> {
    nodes: Vec<Node, NODE_COUNT_MAX>,
    members: Vec<NodeId, NODE_COUNT_MAX>,
    alternatives: Vec<Span, NODE_COUNT_MAX>,
    root: Span,
}

impl<const SIZE: usize> Grammar<SIZE> {
    /// Compile the grammar string.
    pub fn compile(spec: &str) -> Result<Self, Error> {
        let mut compiler = Compiler::new(spec);

        let root = compiler.options()?;

        if compiler.cursor < spec.len() {
            return Err(compiler.error(ErrorKind::TrailingInput));
        }

        let mut grammar = compiler.grammar;
        grammar.root = root;

        trace!("compiled grammar with {} nodes", grammar.nodes.len());
        Ok(grammar)
    }

    pub(crate) fn empty() -> Self {
        Grammar {
            nodes: Vec::new(),
            members: Vec::new(),
            alternatives: Vec::new(),
            root: Span::default(),
        }
    }

    /// Get the top-level nodes, which all must be satisfied.
    #[inline(always)]
    pub(crate) fn root(&self) -> &[NodeId] {
        self.sequence(self.root)
    }

    /// Get a node.
    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Get the node identifiers of a sequence, as found in [`Node::Optional`].
    #[inline(always)]
    pub(crate) fn sequence(&self, span: Span) -> &[NodeId] {
        &self.members[span.range()]
    }

    /// Get the alternatives of a choice, as found in [`Node::Choice`].
    #[inline(always)]
    pub(crate) fn alternatives(&self, span: Span) -> &[Span] {
        &self.alternatives[span.range()]
    }

    /// Number of nodes in the grammar.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the grammar has no node, which never happens once compiled.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A recursive descent compiler, with a single character lookahead.
struct Compiler<'s, const SIZE: usize> {
    spec: &'s str,
    cursor: usize,
    depth: usize,
    grammar: Grammar<SIZE>,
}

impl<'s, const SIZE: usize> Compiler<'s, SIZE> {
    fn new(spec: &'s str) -> Self {
        Compiler {
            spec,
            cursor: 0,
            depth: 0,
            grammar: Grammar::empty(),
        }
    }

    #[inline(always)]
    fn peek(&self) -> Option<char> {
        self.spec[self.cursor..].chars().next()
    }

    /// Consume the next character if it is the expected one.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.cursor += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Character offset of the cursor.
    fn position(&self) -> usize {
        self.spec[..self.cursor].chars().count()
    }

    fn error(&self, kind: ErrorKind) -> Error {
        Error {
            position: self.position(),
            kind,
        }
    }

    /// Enter a group. Each nesting level needs its own node, so nesting deeper than the node
    /// capacity can never fit.
    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= SIZE {
            return Err(self.error(ErrorKind::OutOfMemory));
        }

        self.depth += 1;
        Ok(())
    }

    /// options = option_block, { option_block } ;
    fn options(&mut self) -> Result<Span, Error> {
        let mut ids: Vec<NodeId, SIZE> = Vec::new();

        while let Some(id) = self.option_block()? {
            ids.push(id)
                .map_err(|_| self.error(ErrorKind::OutOfMemory))?;
        }

        if ids.is_empty() {
            return Err(self.error(ErrorKind::ExpectedOption));
        }

        let start = self.grammar.members.len();
        self.grammar
            .members
            .extend_from_slice(&ids)
            .map_err(|_| self.error(ErrorKind::OutOfMemory))?;

        Ok(Span {
            start,
            len: ids.len(),
        })
    }

    /// option_block = option | optional_group | choice_group ;
    fn option_block(&mut self) -> Result<Option<NodeId>, Error> {
        match self.peek() {
            Some(c) if c.is_ascii_alphanumeric() => self.option(c).map(Some),
            Some('[') => self.optional_group().map(Some),
            Some('{') => self.choice_group().map(Some),
            _ => Ok(None),
        }
    }

    /// option = letter, [ ":" ] ;
    fn option(&mut self, letter: char) -> Result<NodeId, Error> {
        self.cursor += letter.len_utf8();

        let requires_value = self.eat(':');
        self.push(Node::Flag {
            letter,
            requires_value,
        })
    }

    /// optional_group = "[", options, "]" ;
    fn optional_group(&mut self) -> Result<NodeId, Error> {
        self.enter()?;
        self.eat('[');

        let span = self.options()?;

        if !self.eat(']') {
            return Err(self.error(ErrorKind::UnclosedOptional));
        }

        self.depth -= 1;

        self.push(Node::Optional(span))
    }

    /// choice_group = "{", options, { "|", options }, "}" ;
    fn choice_group(&mut self) -> Result<NodeId, Error> {
        self.enter()?;
        self.eat('{');

        let mut spans: Vec<Span, SIZE> = Vec::new();

        loop {
            // Only an error at the start of the alternative means that it is empty.
            let position = self.position();
            let span = self.options().map_err(|e| match e.kind {
                ErrorKind::ExpectedOption if e.position == position => Error {
                    kind: ErrorKind::EmptyAlternative,
                    ..e
                },
                _ => e,
            })?;

            spans
                .push(span)
                .map_err(|_| self.error(ErrorKind::OutOfMemory))?;

            if !self.eat('|') {
                break;
            }
        }

        if !self.eat('}') {
            return Err(self.error(ErrorKind::UnclosedChoice));
        }

        self.depth -= 1;

        let start = self.grammar.alternatives.len();
        self.grammar
            .alternatives
            .extend_from_slice(&spans)
            .map_err(|_| self.error(ErrorKind::OutOfMemory))?;

        self.push(Node::Choice(Span {
            start,
            len: spans.len(),
        }))
    }

    fn push(&mut self, node: Node) -> Result<NodeId, Error> {
        let id = self.grammar.nodes.len();

        self.grammar
            .nodes
            .push(node)
            .map_err(|_| self.error(ErrorKind::OutOfMemory))?;

        trace!("grammar node {} at position {}", id, self.cursor);
        Ok(id)
    }
}
