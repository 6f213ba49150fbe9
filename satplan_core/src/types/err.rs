//! Error enums, namespaced by the module they originate in.
//!
//! Intended use is `err::Parse`, `err::Encode`, etc. rather than a single
//! flat error type: the kind already tells you which subsystem failed.

use std::fmt;

/// A malformed `.dat` line, reported with its 1-indexed line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// An `A` line has no `:` separating the head from preconditions.
    MissingColon,
    /// An `A` line has no `->` separating preconditions from effects.
    MissingArrow,
    /// The line starts with a token other than `I`, `G`, or `A`.
    UnrecognisedPrefix,
    /// An atom token could not be split into a predicate and arguments.
    MalformedAtom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub text: String,
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.kind {
            ParseErrorKind::MissingColon => "action schema is missing ':'",
            ParseErrorKind::MissingArrow => "action schema is missing '->'",
            ParseErrorKind::UnrecognisedPrefix => "line does not start with I, G, or A",
            ParseErrorKind::MalformedAtom => "could not parse atom",
        };
        write!(f, "line {}: {reason}: {:?}", self.line, self.text)
    }
}

impl std::error::Error for Parse {}

/// Failure to build a CNF encoding from a grounded problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encode {
    /// A clause referenced an id absent from the variable table; this
    /// indicates an encoder bug, not a problem with the input.
    InvalidVariableReference { var: crate::types::VarId },
}

impl fmt::Display for Encode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encode::InvalidVariableReference { var } => {
                write!(f, "clause referenced variable {var} absent from the variable table")
            }
        }
    }
}

impl std::error::Error for Encode {}

/// The outer "no plan within the searched horizons" condition.
///
/// This is not fatal: a caller (e.g. the CLI's horizon-retry loop) may
/// choose to widen the search and try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonExhausted {
    pub max_horizon: u32,
}

impl fmt::Display for HorizonExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no plan found within any horizon up to {}",
            self.max_horizon
        )
    }
}

impl std::error::Error for HorizonExhausted {}
