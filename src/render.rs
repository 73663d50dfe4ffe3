//! ANSI terminal renderer for board states.
//!
//! Draws the grid with one background color per region and distinct glyphs
//! for empty, blocked and queen cells. Pure consumer of the core's
//! read-only accessors.

use coronet::{BoardState, CellState};
use owo_colors::{AnsiColors, OwoColorize};

// backgrounds only; glyphs print black, so the palette must stay light
const REGION_COLORS: [AnsiColors; 13] = [
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::BrightRed,
    AnsiColors::BrightGreen,
    AnsiColors::BrightYellow,
    AnsiColors::BrightBlue,
    AnsiColors::BrightMagenta,
    AnsiColors::BrightCyan,
    AnsiColors::White,
];

/// Prints a board with row/column headers and colored regions.
pub fn print_board(board: &BoardState) {
    print!("   ");
    for col in 0..board.size() {
        print!(" {} ", col.dimmed());
    }
    println!();

    for row in 0..board.size() {
        print!("{:2} ", row.dimmed());
        for col in 0..board.size() {
            let cell = board.cells()[board.pos_to_idx(row, col)];
            let color = REGION_COLORS[cell.region() as usize % REGION_COLORS.len()];
            match cell.state() {
                CellState::Queen => print!("{}", " ♛ ".on_color(color).black()),
                CellState::Blocked => print!("{}", " ✕ ".on_color(color).black().dimmed()),
                CellState::Empty => print!("{}", "   ".on_color(color)),
            }
        }
        println!();
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_keeps_black_glyphs_visible() {
        assert!(
            REGION_COLORS
                .iter()
                .all(|color| !matches!(color, AnsiColors::Black)),
            "black background would hide the black queen/blocked glyphs"
        );
    }
}
