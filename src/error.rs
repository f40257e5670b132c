//! Misuse conditions reported by the intrusive containers, and the policies
//! that decide how they are reported.
//!
//! The link algebra in [`crate::intrusive::ops`] never reports anything. The
//! containers check their preconditions and hand every violation to the
//! [`ErrorPolicy`] they were instantiated with.

use core::fmt;

/// A precondition violated by a container operation.
///
/// Every operation that returns one of these has left all links untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Popped from an empty container.
    Empty,
    /// Tried to insert a node whose link is still part of a container.
    AlreadyLinked,
    /// A position that cannot be used for the requested operation, such as
    /// inserting after `end`, or splicing into the range being moved.
    InvalidPosition,
    /// `merge` was given a list that is not sorted by its comparator.
    Unsorted,
}

impl Error {
    /// Short, static description of the condition.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::Empty => "container is empty",
            Error::AlreadyLinked => "value is already linked",
            Error::InvalidPosition => "position is not valid for this operation",
            Error::Unsorted => "list is not sorted",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for Error {}

/// Strategy deciding which preconditions a container validates and what
/// happens when one fails.
pub trait ErrorPolicy {
    /// Whether optional precondition checks run at all.
    ///
    /// Optional checks are the ones a correct caller never trips and that can
    /// be skipped without making the operation unsound: "node is already
    /// linked" and "input is sorted". Empty pops and unusable positions are
    /// always reported.
    const CHECKS: bool;

    /// Reacts to a failed precondition and returns the error to propagate.
    fn raise(error: Error) -> Error;
}

/// Checks everything and hands the error back to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Report;

impl ErrorPolicy for Report {
    const CHECKS: bool = true;

    #[inline]
    fn raise(error: Error) -> Error {
        log::debug!("intrusive container rejected operation: {error}");
        error
    }
}

/// Checks everything and panics on the first violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Abort;

impl ErrorPolicy for Abort {
    const CHECKS: bool = true;

    #[inline]
    #[track_caller]
    fn raise(error: Error) -> Error {
        log::error!("intrusive container misuse: {error}");
        panic!("intrusive container misuse: {error}");
    }
}

/// Skips the optional checks. Unavoidable errors are returned silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl ErrorPolicy for Unchecked {
    const CHECKS: bool = false;

    #[inline]
    fn raise(error: Error) -> Error {
        error
    }
}

/// Runs `check` only if the policy asks for it, raising `error` if it fails.
#[inline]
pub(crate) fn ensure<P, F>(check: F, error: Error) -> Result<(), Error>
where
    P: ErrorPolicy,
    F: FnOnce() -> bool,
{
    if !P::CHECKS || check() {
        Ok(())
    } else {
        Err(P::raise(error))
    }
}
