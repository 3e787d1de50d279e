//! An optimizing Brainfuck interpreter.
//!
//! This crate evaluates programs in the classic eight-command tape language
//! against an auto-growing tape of fixed-width integer cells with a single
//! data pointer.
//!
//! Features and behaviors:
//! - Tape grows transparently on access; cells initialized to 0.
//! - Checked arithmetic everywhere: cell over/underflow and pointer
//!   over/underflow are errors, never silent wraparound.
//! - A single pre-pass matches `[`/`]` pairs into a jump table, collapses
//!   runs of `>`, `<`, `+`, `-` into one batched step, and recognizes the
//!   `[-]` (cell clear) and `[->+<]` (move-add) idioms for O(1) execution.
//! - Cell width and signedness are a runtime choice (`u8`/`i8`/`u32`/`i32`,
//!   default unsigned 32-bit).
//! - Input `,` reads a single byte; at end of input the cell is unchanged.
//! - Output `.` writes the current cell narrowed to one byte and flushes.
//!
//! Quick start:
//!
//! ```
//! use bfvm::{Evaluator, Options};
//! use std::io;
//!
//! // Gather 2+3 into cell 1 and print it.
//! let evaluator = Evaluator::new("++>+++<[->+<]>.", Options::default()).unwrap();
//! let mut output = Vec::new();
//! evaluator.run(&mut io::empty(), &mut output).unwrap();
//! assert_eq!(output, [5]);
//! ```

pub mod error;
pub mod eval;
pub mod optimize;
pub mod reader;
pub mod repl;
pub mod report;
pub mod state;
pub mod tape;

pub use error::{Error, Fault};
pub use eval::{Evaluator, ExitStatus, Options, evaluate, evaluate_file};
pub use optimize::{Entry, optimize};
pub use state::{Cell, CellKind, State};
pub use tape::Tape;
