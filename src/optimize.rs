//! Bracket resolution and peephole optimization.
//!
//! A single forward pass over the source produces an annotation table
//! parallel to it: matched bracket partners for `[`/`]`, collapsed run
//! lengths for the four repeatable commands, and tags for the two
//! composite idioms the evaluator executes in O(1).

use crate::error::Error;

/// Cell-clear idiom: the loop `[-]` sets the current cell to 0.
pub const CELL_CLEAR: &[u8] = b"[-]";

/// Move-add idiom: the loop `[->+<]` adds the current cell into the next
/// cell and zeroes the current cell.
pub const MOVE_ADD: &[u8] = b"[->+<]";

/// One annotation per source index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Nothing recorded: whitespace, I/O commands, unknown bytes, and
    /// positions interior to a collapsed run or idiom.
    None,
    /// Length of the run of identical repeatable commands starting here.
    Run(usize),
    /// Index of the matching bracket partner.
    Jump(usize),
    /// This `[` opens a cell-clear idiom.
    ClearCell,
    /// This `[` opens a move-add idiom.
    MoveAdd,
}

/// Build the annotation table for `program`.
///
/// Runs in O(program length); the idiom tests at each `[` are O(1)
/// substring compares. Fails with [`Error::UnmatchedBracket`] when a `[`
/// has no matching `]` before program end.
pub fn optimize(program: &[u8]) -> Result<Vec<Entry>, Error> {
    let mut table = vec![Entry::None; program.len()];
    let mut i = 0;

    while i < program.len() {
        match program[i] {
            b' ' | b'\n' => i += 1,
            command @ (b'>' | b'<' | b'+' | b'-') => {
                let length = run_length(program, i, command);
                table[i] = Entry::Run(length);
                i += length;
            }
            b'[' => {
                if program[i..].starts_with(CELL_CLEAR) {
                    table[i] = Entry::ClearCell;
                    i += CELL_CLEAR.len();
                } else if program[i..].starts_with(MOVE_ADD) {
                    table[i] = Entry::MoveAdd;
                    i += MOVE_ADD.len();
                } else {
                    let close = matching_close(program, i)?;
                    table[i] = Entry::Jump(close);
                    table[close] = Entry::Jump(i);
                    i += 1;
                }
            }
            // ']' entries are populated by the scan from their '['; a stray
            // ']' is left for the evaluator to judge.
            _ => i += 1,
        }
    }

    Ok(table)
}

/// Length of the run of `command` bytes starting at `start`.
fn run_length(program: &[u8], start: usize, command: u8) -> usize {
    program[start..].iter().take_while(|&&b| b == command).count()
}

/// Index of the `]` matching the `[` at `open`: walk forward keeping a
/// signed depth, the match is where the depth returns to 0.
fn matching_close(program: &[u8], open: usize) -> Result<usize, Error> {
    let mut depth: i32 = 0;

    for (i, &byte) in program.iter().enumerate().skip(open) {
        match byte {
            b'[' => depth += 1,
            b']' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return Ok(i);
        }
    }

    Err(Error::UnmatchedBracket { index: open })
}
