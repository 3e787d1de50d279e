//! Program state: the tape, the cursor, and checked cell arithmetic.

use std::fmt;

use crate::error::Fault;
use crate::tape::Tape;

/// A fixed-width integer cell value.
///
/// All arithmetic is checked against the type's representable range; a batch
/// of `count` single steps is accepted or rejected as a whole.
pub trait Cell: Copy + Eq + fmt::Debug + 'static {
    const ZERO: Self;

    /// `self + count`, or `None` if the result would exceed the maximum.
    fn checked_add_count(self, count: usize) -> Option<Self>;

    /// `self - count`, or `None` if the result would drop below the minimum.
    fn checked_sub_count(self, count: usize) -> Option<Self>;

    /// `self + rhs`, or `None` on overflow. Used by the move-add fast path.
    fn checked_add_value(self, rhs: Self) -> Option<Self>;

    /// Narrow to the single output byte written by `.`.
    fn as_output_byte(self) -> u8;

    /// Widen an input byte read by `,`.
    fn from_input_byte(byte: u8) -> Self;
}

macro_rules! impl_cell {
    ($($ty:ty),* $(,)?) => {$(
        impl Cell for $ty {
            const ZERO: Self = 0;

            fn checked_add_count(self, count: usize) -> Option<Self> {
                // Widen to i64 so the range test is exact even when the
                // count alone exceeds the cell type.
                let count = i64::try_from(count).ok()?;
                <$ty>::try_from((self as i64).checked_add(count)?).ok()
            }

            fn checked_sub_count(self, count: usize) -> Option<Self> {
                let count = i64::try_from(count).ok()?;
                <$ty>::try_from((self as i64).checked_sub(count)?).ok()
            }

            fn checked_add_value(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            fn as_output_byte(self) -> u8 {
                self as u8
            }

            fn from_input_byte(byte: u8) -> Self {
                byte as $ty
            }
        }
    )*};
}

impl_cell!(u8, i8, u32, i32);

/// Runtime choice of cell width and signedness.
///
/// The engine itself is generic over [`Cell`]; this enum is the dispatch
/// point. Unsigned 32-bit is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    U8,
    I8,
    #[default]
    U32,
    I32,
}

/// The tape plus the cursor, with bounded mutations of both.
///
/// Invariant: the cursor is a valid tape index after every mutation.
/// Decrementing past 0 is an error, never wraparound, and a failed batch
/// leaves the state untouched.
#[derive(Debug)]
pub struct State<C: Cell> {
    cells: Tape<C>,
    cursor: usize,
}

impl<C: Cell> State<C> {
    pub fn new() -> Self {
        Self {
            cells: Tape::new(C::ZERO),
            cursor: 0,
        }
    }

    /// Value of the cell under the cursor.
    pub fn cell(&self) -> C {
        self.cells.get(self.cursor)
    }

    /// Writable slot for the cell under the cursor.
    pub fn cell_mut(&mut self) -> &mut C {
        self.cells.get_mut(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn increment_cell(&mut self, count: usize) -> Result<(), Fault> {
        let next = self
            .cell()
            .checked_add_count(count)
            .ok_or(Fault::CellOverflow)?;
        *self.cell_mut() = next;
        Ok(())
    }

    pub fn decrement_cell(&mut self, count: usize) -> Result<(), Fault> {
        let next = self
            .cell()
            .checked_sub_count(count)
            .ok_or(Fault::CellUnderflow)?;
        *self.cell_mut() = next;
        Ok(())
    }

    pub fn move_right(&mut self, count: usize) -> Result<(), Fault> {
        self.cursor = self
            .cursor
            .checked_add(count)
            .ok_or(Fault::PointerOverflow)?;
        Ok(())
    }

    pub fn move_left(&mut self, count: usize) -> Result<(), Fault> {
        self.cursor = self
            .cursor
            .checked_sub(count)
            .ok_or(Fault::PointerUnderflow)?;
        Ok(())
    }
}

impl<C: Cell> Default for State<C> {
    fn default() -> Self {
        Self::new()
    }
}
