//! Packed cell representation for board grids.
//!
//! A cell carries two fields in a single byte: the placement state (2 bits)
//! and the color region (5 bits), laid out as `(state << 5) | region`.
//! Regions are the letters A-Z mapped to 0-25.

use crate::error::Error;

/// Placement state of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty = 0,
    Blocked = 1,
    Queen = 2,
}

/// Number of distinct region identifiers (letters A-Z).
pub const NUM_REGIONS: usize = 26;

const REGION_MASK: u8 = 0b0001_1111;
const STATE_SHIFT: u8 = 5;

/// One board cell: placement state and region packed into a byte.
///
/// The inner byte is private, so every live `Cell` was produced by
/// [`Cell::encode`] or a state transition on an encoded cell. Decoding is
/// therefore total: the 2-bit state field only ever holds 0, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    /// Packs a placement state and a region letter into a cell.
    ///
    /// The letter is uppercase-normalized; anything outside A-Z is rejected
    /// with [`Error::InvalidRegion`].
    pub fn encode(state: CellState, token: char) -> Result<Self, Error> {
        let letter = token.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(Error::InvalidRegion { token });
        }
        let region = letter as u8 - b'A';
        Ok(Cell(((state as u8) << STATE_SHIFT) | region))
    }

    /// Unpacks the cell into its placement state and region letter.
    #[inline]
    pub fn decode(self) -> (CellState, char) {
        (self.state(), self.region_letter())
    }

    /// The placement state field.
    #[inline]
    pub fn state(self) -> CellState {
        match self.0 >> STATE_SHIFT {
            0 => CellState::Empty,
            1 => CellState::Blocked,
            _ => CellState::Queen,
        }
    }

    /// The region identifier in `0..26`.
    #[inline]
    pub fn region(self) -> u8 {
        self.0 & REGION_MASK
    }

    /// The region as its uppercase letter.
    #[inline]
    pub fn region_letter(self) -> char {
        (b'A' + self.region()) as char
    }

    /// Returns a copy of this cell with a different placement state.
    #[inline]
    pub(crate) fn with_state(self, state: CellState) -> Self {
        Cell(((state as u8) << STATE_SHIFT) | (self.0 & REGION_MASK))
    }
}
