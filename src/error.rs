//! Error taxonomy for optimization and evaluation.

use std::io;

/// Errors that abort an evaluation run.
///
/// Every variant except [`Error::FileRead`] carries the source index it was
/// raised at, so the caller can render a caret under the offending command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Incrementing the current cell would exceed its maximum value.
    #[error("cell overflow")]
    CellOverflow { index: usize },

    /// Decrementing the current cell would drop below its minimum value.
    #[error("cell underflow")]
    CellUnderflow { index: usize },

    /// Moving the cursor right would exceed the maximum tape index.
    #[error("pointer overflow")]
    PointerOverflow { index: usize },

    /// Moving the cursor left would drop below tape index 0.
    #[error("pointer underflow")]
    PointerUnderflow { index: usize },

    /// A `[` has no matching `]`, or a back-jump was required at a `]`
    /// that no `[` ever claimed.
    #[error("can't find corresponding command")]
    UnmatchedBracket { index: usize },

    /// Encountered a byte outside the command set `><+-.,[]` (and the
    /// skipped space/newline) while `ignore_unknowns` was off.
    #[error("found an invalid command")]
    InvalidCommand { index: usize },

    /// The output or input stream failed during `.` or `,`.
    #[error("{source}")]
    Io {
        index: usize,
        #[source]
        source: io::Error,
    },

    /// The source file could not be opened or read.
    #[error("couldn't read file: {source}")]
    FileRead {
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Source index the error points at, if it has one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::CellOverflow { index }
            | Error::CellUnderflow { index }
            | Error::PointerOverflow { index }
            | Error::PointerUnderflow { index }
            | Error::UnmatchedBracket { index }
            | Error::InvalidCommand { index }
            | Error::Io { index, .. } => Some(*index),
            Error::FileRead { .. } => None,
        }
    }
}

/// Range faults raised by [`State`](crate::State), which does not know
/// source positions. The evaluation loop attaches one via [`Fault::at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("cell overflow")]
    CellOverflow,
    #[error("cell underflow")]
    CellUnderflow,
    #[error("pointer overflow")]
    PointerOverflow,
    #[error("pointer underflow")]
    PointerUnderflow,
}

impl Fault {
    /// Convert into an [`Error`] anchored at the given source index.
    pub fn at(self, index: usize) -> Error {
        match self {
            Fault::CellOverflow => Error::CellOverflow { index },
            Fault::CellUnderflow => Error::CellUnderflow { index },
            Fault::PointerOverflow => Error::PointerOverflow { index },
            Fault::PointerUnderflow => Error::PointerUnderflow { index },
        }
    }
}
