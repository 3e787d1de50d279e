//! The fetch-decode-execute loop and the public entry points.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{Error, Fault};
use crate::optimize::{self, CELL_CLEAR, Entry, MOVE_ADD};
use crate::reader;
use crate::report;
use crate::state::{Cell, CellKind, State};

/// Success/failure discriminant of a whole evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Ok,
    Failed,
}

impl ExitStatus {
    /// Process exit code: 0 on success, 1 on failure.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::Failed => 1,
        }
    }
}

/// Evaluation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Skip bytes outside the command set instead of failing on them.
    pub ignore_unknowns: bool,
    /// Cell width and signedness.
    pub cells: CellKind,
}

/// An optimized program, ready to run.
///
/// Construction runs the optimizer pass once; each [`Evaluator::run`]
/// executes against a fresh tape and cursor.
#[derive(Debug)]
pub struct Evaluator {
    program: Vec<u8>,
    table: Vec<Entry>,
    options: Options,
}

impl Evaluator {
    pub fn new(source: impl AsRef<[u8]>, options: Options) -> Result<Self, Error> {
        let program = source.as_ref().to_vec();
        let table = optimize::optimize(&program)?;
        Ok(Self {
            program,
            table,
            options,
        })
    }

    /// Execute the program, reading `,` bytes from `input` and writing `.`
    /// bytes to `output`.
    pub fn run<R: Read, W: Write>(&self, input: &mut R, output: &mut W) -> Result<(), Error> {
        match self.options.cells {
            CellKind::U8 => self.run_cells::<u8, _, _>(input, output),
            CellKind::I8 => self.run_cells::<i8, _, _>(input, output),
            CellKind::U32 => self.run_cells::<u32, _, _>(input, output),
            CellKind::I32 => self.run_cells::<i32, _, _>(input, output),
        }
    }

    fn run_cells<C: Cell, R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), Error> {
        let mut state = State::<C>::new();
        execute(
            &self.program,
            &self.table,
            self.options.ignore_unknowns,
            &mut state,
            input,
            output,
        )
    }
}

/// Run the annotated program against `state`.
///
/// Terminates only when the command index reaches the program length; an
/// ill-formed non-terminating program runs forever, which is a property of
/// the language, not guarded against here.
fn execute<C: Cell, R: Read, W: Write>(
    program: &[u8],
    table: &[Entry],
    ignore_unknowns: bool,
    state: &mut State<C>,
    input: &mut R,
    output: &mut W,
) -> Result<(), Error> {
    let mut i = 0;

    while i < program.len() {
        match program[i] {
            b' ' | b'\n' => i += 1,
            b'>' => {
                let length = run_len(table, i);
                state.move_right(length).map_err(|fault| fault.at(i))?;
                i += length;
            }
            b'<' => {
                let length = run_len(table, i);
                state.move_left(length).map_err(|fault| fault.at(i))?;
                i += length;
            }
            b'+' => {
                let length = run_len(table, i);
                state.increment_cell(length).map_err(|fault| fault.at(i))?;
                i += length;
            }
            b'-' => {
                let length = run_len(table, i);
                state.decrement_cell(length).map_err(|fault| fault.at(i))?;
                i += length;
            }
            b'.' => {
                output
                    .write_all(&[state.cell().as_output_byte()])
                    .and_then(|()| output.flush())
                    .map_err(|source| Error::Io { index: i, source })?;
                i += 1;
            }
            b',' => {
                let mut byte = [0u8; 1];
                match input.read(&mut byte) {
                    // End of input leaves the cell unchanged.
                    Ok(0) => {}
                    Ok(_) => *state.cell_mut() = C::from_input_byte(byte[0]),
                    Err(source) => return Err(Error::Io { index: i, source }),
                }
                i += 1;
            }
            b'[' => match table[i] {
                Entry::ClearCell => {
                    *state.cell_mut() = C::ZERO;
                    i += CELL_CLEAR.len();
                }
                Entry::MoveAdd => {
                    let value = state.cell();
                    *state.cell_mut() = C::ZERO;
                    state.move_right(1).map_err(|fault| fault.at(i))?;
                    let sum = state
                        .cell()
                        .checked_add_value(value)
                        .ok_or(Fault::CellOverflow)
                        .map_err(|fault| fault.at(i))?;
                    *state.cell_mut() = sum;
                    state.move_left(1).map_err(|fault| fault.at(i))?;
                    i += MOVE_ADD.len();
                }
                Entry::Jump(close) => {
                    if state.cell() == C::ZERO {
                        i = close;
                    }
                    i += 1;
                }
                entry => unreachable!("loop open at {i} annotated {entry:?}"),
            },
            b']' => match table[i] {
                Entry::Jump(open) => {
                    if state.cell() != C::ZERO {
                        i = open;
                    }
                    i += 1;
                }
                // No '[' ever claimed this ']': a back-jump from it has no
                // target, so it is only passable with a zero cell.
                _ => {
                    if state.cell() != C::ZERO {
                        return Err(Error::UnmatchedBracket { index: i });
                    }
                    i += 1;
                }
            },
            _ if ignore_unknowns => i += 1,
            _ => return Err(Error::InvalidCommand { index: i }),
        }
    }

    Ok(())
}

/// Recorded run length at a repeatable command's starting index.
fn run_len(table: &[Entry], index: usize) -> usize {
    match table[index] {
        Entry::Run(length) => length,
        entry => unreachable!("repeatable command at {index} annotated {entry:?}"),
    }
}

/// Evaluate an in-memory program against stdin/stdout.
///
/// Any fatal error is printed in the standard report format (message,
/// source, caret) before `Failed` is returned.
pub fn evaluate(source: &str, options: Options) -> ExitStatus {
    let evaluator = match Evaluator::new(source, options) {
        Ok(evaluator) => evaluator,
        Err(err) => {
            report::print_report(Some(source), &err);
            return ExitStatus::Failed;
        }
    };

    match evaluator.run(&mut io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitStatus::Ok,
        Err(err) => {
            report::print_report(Some(source), &err);
            ExitStatus::Failed
        }
    }
}

/// Read a program from `path` (newlines stripped) and evaluate it.
///
/// A file that cannot be read is reported as a plain message, without the
/// source/caret annotation.
pub fn evaluate_file(path: impl AsRef<Path>, options: Options) -> ExitStatus {
    match reader::read_program(path.as_ref()) {
        Ok(source) => evaluate(&source, options),
        Err(err) => {
            report::print_report(None, &err);
            ExitStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_collect(source: &str) -> Result<Vec<u8>, Error> {
        run_collect_with(source, Options::default(), &[])
    }

    fn run_collect_with(source: &str, options: Options, input: &[u8]) -> Result<Vec<u8>, Error> {
        let evaluator = Evaluator::new(source, options)?;
        let mut output = Vec::new();
        let mut input = input;
        evaluator.run(&mut input, &mut output)?;
        Ok(output)
    }

    #[test]
    fn increments_are_batched() {
        assert_eq!(run_collect("++.").unwrap(), [0x02]);
    }

    #[test]
    fn clear_idiom_zeroes_the_cell() {
        assert_eq!(run_collect("+[-].").unwrap(), [0x00]);
    }

    #[test]
    fn move_add_idiom_gathers_into_the_next_cell() {
        assert_eq!(run_collect("++>+++<[->+<]>.").unwrap(), [0x05]);
    }

    #[test]
    fn move_add_leaves_cursor_and_source_cell_cleared() {
        let program = b"[->+<]";
        let table = optimize::optimize(program).unwrap();
        let mut state: State<u32> = State::new();
        *state.cell_mut() = 5;

        execute(
            program,
            &table,
            false,
            &mut state,
            &mut io::empty(),
            &mut io::sink(),
        )
        .unwrap();

        assert_eq!(state.cursor(), 0);
        assert_eq!(state.cell(), 0);
        state.move_right(1).unwrap();
        assert_eq!(state.cell(), 5);
    }

    #[test]
    fn idiom_fast_paths_match_the_loop_paths() {
        // A space inside the pattern defeats recognition without changing
        // the loop's meaning, forcing the ordinary bracket path.
        assert_eq!(run_collect("+++[-].").unwrap(), run_collect("+++[- ].").unwrap());
        assert_eq!(
            run_collect("++>+++<[->+<]>.").unwrap(),
            run_collect("++>+++<[-> +<]>.").unwrap()
        );
    }

    #[test]
    fn plain_loops_execute() {
        // Doubling loop: not a recognized idiom.
        assert_eq!(run_collect("++[->++<]>.").unwrap(), [0x04]);
    }

    #[test]
    fn nested_loops_execute() {
        assert_eq!(run_collect("++[>++[>++<-]<-]>>.").unwrap(), [0x08]);
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(run_collect("+ +\n+.").unwrap(), [0x03]);
    }

    #[test]
    fn zero_cell_skips_a_loop_entirely() {
        assert_eq!(run_collect("[>+++<].").unwrap(), [0x00]);
    }

    #[test]
    fn hello_world() {
        let program = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.\
                       >++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
        assert_eq!(run_collect(program).unwrap(), b"Hello World!\n");
    }

    #[test]
    fn input_bytes_reach_the_cell() {
        let output = run_collect_with(",+.", Options::default(), b"A").unwrap();
        assert_eq!(output, [b'B']);
    }

    #[test]
    fn input_at_end_of_stream_leaves_the_cell_unchanged() {
        let output = run_collect_with("+++,.", Options::default(), &[]).unwrap();
        assert_eq!(output, [0x03]);
    }

    #[test]
    fn unmatched_open_bracket_fails_before_execution() {
        assert!(matches!(
            run_collect("["),
            Err(Error::UnmatchedBracket { index: 0 })
        ));
    }

    #[test]
    fn stray_close_bracket_is_passable_only_with_a_zero_cell() {
        assert_eq!(run_collect("]+.").unwrap(), [0x01]);
        assert!(matches!(
            run_collect("+]"),
            Err(Error::UnmatchedBracket { index: 1 })
        ));
    }

    #[test]
    fn unknown_commands_fail_unless_ignored() {
        assert!(matches!(
            run_collect("+~+."),
            Err(Error::InvalidCommand { index: 1 })
        ));

        let ignore = Options {
            ignore_unknowns: true,
            ..Options::default()
        };
        assert_eq!(run_collect_with("+~+.", ignore, &[]).unwrap(), [0x02]);
    }

    #[test]
    fn cell_underflow_reports_the_run_start() {
        assert!(matches!(
            run_collect("+--"),
            Err(Error::CellUnderflow { index: 1 })
        ));
    }

    #[test]
    fn pointer_underflow_reports_the_run_start() {
        assert!(matches!(
            run_collect("><<"),
            Err(Error::PointerUnderflow { index: 1 })
        ));
    }

    #[test]
    fn narrow_cells_overflow_where_wide_cells_do_not() {
        let narrow = Options {
            cells: CellKind::U8,
            ..Options::default()
        };
        let program = "+".repeat(256);
        assert!(matches!(
            run_collect_with(&program, narrow, &[]),
            Err(Error::CellOverflow { index: 0 })
        ));
        assert!(run_collect_with(&program, Options::default(), &[]).is_ok());
    }

    #[test]
    fn signed_cells_permit_negative_values() {
        let signed = Options {
            cells: CellKind::I32,
            ..Options::default()
        };
        // -1 narrows to 0xFF on output.
        assert_eq!(run_collect_with("-.", signed, &[]).unwrap(), [0xFF]);
        assert!(matches!(
            run_collect("-."),
            Err(Error::CellUnderflow { index: 0 })
        ));
    }

    #[test]
    fn move_add_overflow_is_checked() {
        let narrow = Options {
            cells: CellKind::U8,
            ..Options::default()
        };
        // 200 + 100 exceeds a u8 cell.
        let program = format!("{}>{}<[->+<]", "+".repeat(100), "+".repeat(200));
        assert!(matches!(
            run_collect_with(&program, narrow, &[]),
            Err(Error::CellOverflow { .. })
        ));
    }
}
