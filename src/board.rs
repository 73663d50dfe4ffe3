//! Immutable board snapshots with legality checks and lookahead pruning.
//!
//! A `BoardState` is a full N×N grid of packed cells. Placing a queen never
//! mutates a state; it produces a new snapshot in which the queen's row,
//! column, eight neighbors and entire color region are blocked. Placement
//! states only ever move forward: an empty cell becomes blocked or becomes a
//! queen, and nothing ever reverts.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::cell::{Cell, CellState, NUM_REGIONS};
use crate::error::Error;
use crate::heuristic::Heuristic;
use crate::level::Level;

/// Largest supported board side length. Region letters cap the number of
/// distinct regions at 26, and a board needs one region per row to be
/// winnable at all.
pub const MAX_BOARD_SIZE: usize = 26;

/// Offsets of the eight cells at Chebyshev distance 1.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Outcome of a legality query for one candidate cell.
///
/// `remaining_regions` counts the regions other than the candidate's own
/// that would still lack a queen after the hypothetical placement. It is
/// used only to order candidates, never to reject one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Illegal,
    Legal { remaining_regions: usize },
}

/// An immutable snapshot of the full puzzle grid.
#[derive(Debug, Clone)]
pub struct BoardState {
    size: usize,
    cells: Vec<Cell>,
    region_has_queen: [bool; NUM_REGIONS],
    // region ids present on the board (ascending) with their cell indices;
    // fixed at construction and shared by every descendant snapshot
    regions: Arc<[(u8, Vec<usize>)]>,
}

impl BoardState {
    /// Builds the initial board for a level: every cell empty, regions taken
    /// from the level's letter grid.
    pub fn from_level(level: &Level) -> Result<Self, Error> {
        let size = level.size;
        if size == 0 {
            return Err(Error::InvalidLevel {
                reason: format!("level {}: board is empty", level.id),
            });
        }
        if size > MAX_BOARD_SIZE {
            return Err(Error::InvalidLevel {
                reason: format!(
                    "level {}: size {} exceeds the maximum of {}",
                    level.id, size, MAX_BOARD_SIZE
                ),
            });
        }
        if level.color_regions.len() != size {
            return Err(Error::InvalidLevel {
                reason: format!(
                    "level {}: expected {} rows, found {}",
                    level.id,
                    size,
                    level.color_regions.len()
                ),
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_number, row) in level.color_regions.iter().enumerate() {
            if row.len() != size {
                return Err(Error::InvalidLevel {
                    reason: format!(
                        "level {}: row {} has {} cells, expected {}",
                        level.id,
                        row_number,
                        row.len(),
                        size
                    ),
                });
            }
            for &token in row {
                cells.push(Cell::encode(CellState::Empty, token)?);
            }
        }

        let mut region_cells: Vec<Vec<usize>> = vec![Vec::new(); NUM_REGIONS];
        for (idx, cell) in cells.iter().enumerate() {
            region_cells[cell.region() as usize].push(idx);
        }
        let regions: Vec<(u8, Vec<usize>)> = region_cells
            .into_iter()
            .enumerate()
            .filter(|(_, indices)| !indices.is_empty())
            .map(|(id, indices)| (id as u8, indices))
            .collect();

        Ok(BoardState {
            size,
            cells,
            region_has_queen: [false; NUM_REGIONS],
            regions: regions.into(),
        })
    }

    /// Board side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The full grid in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Converts (row, col) coordinates to a linear cell index.
    #[inline]
    pub fn pos_to_idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Converts a linear cell index to (row, col) coordinates.
    #[inline]
    pub fn idx_to_pos(&self, idx: usize) -> (usize, usize) {
        (idx / self.size, idx % self.size)
    }

    /// Positions of every queen on the board, in row-major order.
    pub fn queen_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.state() == CellState::Queen)
            .map(|(idx, _)| self.idx_to_pos(idx))
            .collect()
    }

    /// In-bounds neighbor indices of a cell (Chebyshev distance 1).
    fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = usize> + '_ {
        let size = self.size as i32;
        let (row, col) = (row as i32, col as i32);
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let (nr, nc) = (row + dr, col + dc);
            (nr >= 0 && nr < size && nc >= 0 && nc < size).then(|| (nr * size + nc) as usize)
        })
    }

    fn region_cells(&self, region: u8) -> &[usize] {
        self.regions
            .iter()
            .find(|(id, _)| *id == region)
            .map(|(_, indices)| indices.as_slice())
            .unwrap_or(&[])
    }

    /// Number of empty cells left in the region containing (row, col).
    pub(crate) fn open_region_cells(&self, row: usize, col: usize) -> usize {
        let region = self.cells[self.pos_to_idx(row, col)].region();
        self.region_cells(region)
            .iter()
            .filter(|&&idx| self.cells[idx].state() == CellState::Empty)
            .count()
    }

    /// Checks whether a queen may be placed at (row, col).
    ///
    /// Coordinates outside the board are a contract violation and fail with
    /// [`Error::OutOfBounds`]; they are never a normal search outcome.
    pub fn can_place_queen(&self, row: usize, col: usize) -> Result<Legality, Error> {
        if row >= self.size || col >= self.size {
            return Err(Error::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(self.legality(row, col))
    }

    /// Legality of an in-bounds candidate, each check short-circuiting.
    fn legality(&self, row: usize, col: usize) -> Legality {
        let idx = self.pos_to_idx(row, col);

        // target must be empty
        if self.cells[idx].state() != CellState::Empty {
            return Legality::Illegal;
        }

        // no queen anywhere in the same row or column
        for i in 0..self.size {
            if self.cells[self.pos_to_idx(row, i)].state() == CellState::Queen
                || self.cells[self.pos_to_idx(i, col)].state() == CellState::Queen
            {
                return Legality::Illegal;
            }
        }

        // no adjacent queen
        for neighbor in self.neighbors(row, col) {
            if self.cells[neighbor].state() == CellState::Queen {
                return Legality::Illegal;
            }
        }

        // one-step lookahead: the placement must not strip the last open
        // cell from a region that still needs a queen
        let own_region = self.cells[idx].region();
        let mut would_block = vec![false; self.cells.len()];
        for i in 0..self.size {
            would_block[self.pos_to_idx(row, i)] = true;
            would_block[self.pos_to_idx(i, col)] = true;
        }
        for neighbor in self.neighbors(row, col) {
            would_block[neighbor] = true;
        }
        for &cell_idx in self.region_cells(own_region) {
            would_block[cell_idx] = true;
        }

        let mut remaining_regions = 0;
        for (region, indices) in self.regions.iter() {
            if *region == own_region || self.region_has_queen[*region as usize] {
                continue;
            }
            let has_open_cell = indices
                .iter()
                .any(|&i| self.cells[i].state() == CellState::Empty && !would_block[i]);
            if !has_open_cell {
                return Legality::Illegal;
            }
            remaining_regions += 1;
        }

        Legality::Legal { remaining_regions }
    }

    /// Every legal placement on this board, ordered by the given heuristic.
    ///
    /// Ties keep the row-major scan order. Pure query: repeated calls return
    /// the same sequence and never touch the state.
    pub fn valid_placements(&self, heuristic: Heuristic) -> Vec<(usize, usize)> {
        let mut candidates = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if let Legality::Legal { remaining_regions } = self.legality(row, col) {
                    candidates.push(((row, col), remaining_regions));
                }
            }
        }

        heuristic.order(self, &mut candidates);
        candidates.into_iter().map(|(pos, _)| pos).collect()
    }

    /// Places a queen at (row, col), returning the successor snapshot.
    ///
    /// The target cell must currently be legal; otherwise this fails with
    /// [`Error::IllegalPlacement`]. The receiver is left untouched.
    pub fn place_queen(&self, row: usize, col: usize) -> Result<BoardState, Error> {
        match self.can_place_queen(row, col)? {
            Legality::Illegal => Err(Error::IllegalPlacement { row, col }),
            Legality::Legal { .. } => {
                let mut next = self.clone();
                let idx = next.pos_to_idx(row, col);
                let region = next.cells[idx].region();

                for i in 0..next.size {
                    let row_idx = next.pos_to_idx(row, i);
                    let col_idx = next.pos_to_idx(i, col);
                    next.cells[row_idx] = next.cells[row_idx].with_state(CellState::Blocked);
                    next.cells[col_idx] = next.cells[col_idx].with_state(CellState::Blocked);
                }
                let neighbors: Vec<usize> = next.neighbors(row, col).collect();
                for neighbor in neighbors {
                    next.cells[neighbor] = next.cells[neighbor].with_state(CellState::Blocked);
                }
                for i in 0..next.cells.len() {
                    if next.cells[i].region() == region {
                        next.cells[i] = next.cells[i].with_state(CellState::Blocked);
                    }
                }

                next.cells[idx] = next.cells[idx].with_state(CellState::Queen);
                next.region_has_queen[region as usize] = true;
                Ok(next)
            }
        }
    }

    /// The authoritative goal predicate, independent of how the state was
    /// reached: one queen per row, column and region, none adjacent.
    ///
    /// `place_queen`'s blocking already enforces most of this along a search
    /// path, but the checks are re-verified here in full so the predicate
    /// also holds for states built by other means.
    pub fn is_goal_state(&self) -> bool {
        let queens = self.queen_positions();
        if queens.len() != self.size {
            return false;
        }

        let mut row_counts = vec![0usize; self.size];
        let mut col_counts = vec![0usize; self.size];
        let mut region_counts = [0usize; NUM_REGIONS];
        for &(row, col) in &queens {
            row_counts[row] += 1;
            col_counts[col] += 1;
            region_counts[self.cells[self.pos_to_idx(row, col)].region() as usize] += 1;
        }
        if row_counts.iter().any(|&n| n > 1) || col_counts.iter().any(|&n| n > 1) {
            return false;
        }

        for &(row, col) in &queens {
            for neighbor in self.neighbors(row, col) {
                if self.cells[neighbor].state() == CellState::Queen {
                    return false;
                }
            }
        }

        self.regions
            .iter()
            .all(|(region, _)| region_counts[*region as usize] == 1)
    }
}

/// Two board states are equal iff their full grids (placement and region
/// per cell) are identical; hashing matches, so memoized search keys on
/// content, not identity.
impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for BoardState {}

impl Hash for BoardState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

/// Formats the placement grid as one character per cell: `Q` for a queen,
/// `x` for blocked, `.` for empty.
pub fn format_board(board: &BoardState) -> String {
    let mut output = String::new();
    for row in 0..board.size() {
        for col in 0..board.size() {
            let glyph = match board.cells()[board.pos_to_idx(row, col)].state() {
                CellState::Queen => 'Q',
                CellState::Blocked => 'x',
                CellState::Empty => '.',
            };
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}

/// Formats the region grid as its letter per cell.
pub fn format_regions(board: &BoardState) -> String {
    let mut output = String::new();
    for row in 0..board.size() {
        for col in 0..board.size() {
            output.push(board.cells()[board.pos_to_idx(row, col)].region_letter());
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> BoardState {
        BoardState::from_level(&Level::from_rows(0, rows)).unwrap()
    }

    /// 8x8 board with a known solution.
    fn solvable_8x8() -> BoardState {
        board(&[
            "AABBBCCC",
            "ADBDBECC",
            "ADBDBCCC",
            "ADDDBFGC",
            "ADDDBFGG",
            "ADHDBFGG",
            "HDHDBFFG",
            "HHHHGGGG",
        ])
    }

    #[test]
    fn test_from_level_rejects_empty_board() {
        let result = BoardState::from_level(&Level::from_rows(0, &[]));
        assert!(matches!(result, Err(Error::InvalidLevel { .. })));
    }

    #[test]
    fn test_from_level_rejects_non_square_board() {
        let result = BoardState::from_level(&Level::from_rows(0, &["AAB", "AB"]));
        assert!(matches!(result, Err(Error::InvalidLevel { .. })));
    }

    #[test]
    fn test_from_level_rejects_row_count_mismatch() {
        let mut level = Level::from_rows(0, &["AB", "AB"]);
        level.size = 3;
        let result = BoardState::from_level(&level);
        assert!(matches!(result, Err(Error::InvalidLevel { .. })));
    }

    #[test]
    fn test_from_level_rejects_oversized_board() {
        let row = "A".repeat(27);
        let rows: Vec<&str> = (0..27).map(|_| row.as_str()).collect();
        let result = BoardState::from_level(&Level::from_rows(0, &rows));
        assert!(matches!(result, Err(Error::InvalidLevel { .. })));
    }

    #[test]
    fn test_from_level_rejects_invalid_region_token() {
        let result = BoardState::from_level(&Level::from_rows(0, &["A1", "AA"]));
        assert!(matches!(result, Err(Error::InvalidRegion { token: '1' })));
    }

    #[test]
    fn test_out_of_bounds_query_is_an_error() {
        let state = board(&["AB", "AB"]);
        assert!(matches!(
            state.can_place_queen(2, 0),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            state.can_place_queen(0, 9),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            state.place_queen(5, 5),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_illegal_placement_is_an_error() {
        let state = board(&["AAAAA", "BBBBB", "CCCCC", "DDDDD", "EEEEE"]);
        let next = state.place_queen(0, 0).unwrap();
        // (1, 1) is now adjacent to the queen and column-blocked
        assert!(matches!(
            next.place_queen(1, 1),
            Err(Error::IllegalPlacement { row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_can_place_queen_probes_on_8x8() {
        let state = solvable_8x8();

        // (1, 1) would block all of row 1, starving single-cell region E
        assert_eq!(state.can_place_queen(1, 1).unwrap(), Legality::Illegal);

        assert!(matches!(
            state.can_place_queen(1, 5).unwrap(),
            Legality::Legal { .. }
        ));
        assert!(matches!(
            state.can_place_queen(7, 7).unwrap(),
            Legality::Legal { .. }
        ));

        let state = state.place_queen(1, 5).unwrap();

        // region E is now satisfied; its cells are blocked
        assert_eq!(state.can_place_queen(1, 5).unwrap(), Legality::Illegal);
        // same column as the queen
        assert_eq!(state.can_place_queen(4, 5).unwrap(), Legality::Illegal);
        // adjacent to the queen
        assert_eq!(state.can_place_queen(0, 4).unwrap(), Legality::Illegal);

        assert!(matches!(
            state.can_place_queen(0, 0).unwrap(),
            Legality::Legal { .. }
        ));
        assert!(matches!(
            state.can_place_queen(6, 6).unwrap(),
            Legality::Legal { .. }
        ));
    }

    #[test]
    fn test_place_queen_blocks_row_col_neighbors_and_region() {
        // rows as regions, so region D is row 3
        let state = board(&["AAAAA", "BBBBB", "CCCCC", "DDDDD", "EEEEE"]);
        let parent_cells: Vec<_> = state.cells().to_vec();
        let next = state.place_queen(3, 1).unwrap();

        for idx in 0..next.cells().len() {
            let (row, col) = next.idx_to_pos(idx);
            let in_row = row == 3;
            let in_col = col == 1;
            let adjacent = row.abs_diff(3) <= 1 && col.abs_diff(1) <= 1;
            let expected = if row == 3 && col == 1 {
                CellState::Queen
            } else if in_row || in_col || adjacent {
                CellState::Blocked
            } else {
                // untouched cells are copied unchanged from the parent
                parent_cells[idx].state()
            };
            assert_eq!(next.cells()[idx].state(), expected, "cell ({row}, {col})");
            assert_eq!(next.cells()[idx].region(), parent_cells[idx].region());
        }

        // the parent snapshot is never mutated
        assert_eq!(state.cells(), parent_cells.as_slice());
    }

    #[test]
    fn test_single_cell_board_reaches_goal() {
        let state = board(&["A"]);
        assert!(!state.is_goal_state());
        let solved = state.place_queen(0, 0).unwrap();
        assert!(solved.is_goal_state());
    }

    #[test]
    fn test_lookahead_rejects_region_starvation() {
        // placing at (0, 0) blocks row 0 entirely, starving region B
        let state = board(&["AAB", "AAA", "AAA"]);
        assert_eq!(state.can_place_queen(0, 0).unwrap(), Legality::Illegal);
    }

    #[test]
    fn test_remaining_regions_counts_other_unsatisfied_regions() {
        let state = board(&["AAAAA", "BBBBB", "CCCCC", "DDDDD", "EEEEE"]);
        // four other regions still lack a queen
        assert_eq!(
            state.can_place_queen(0, 0).unwrap(),
            Legality::Legal {
                remaining_regions: 4
            }
        );

        let next = state.place_queen(0, 0).unwrap();
        assert_eq!(
            next.can_place_queen(1, 2).unwrap(),
            Legality::Legal {
                remaining_regions: 3
            }
        );
    }

    #[test]
    fn test_queries_are_idempotent() {
        let state = solvable_8x8();
        let before: Vec<_> = state.cells().to_vec();

        let first = state.valid_placements(Heuristic::FewestRemainingRegions);
        let second = state.valid_placements(Heuristic::FewestRemainingRegions);
        assert_eq!(first, second);

        let a = state.can_place_queen(3, 6).unwrap();
        let b = state.can_place_queen(3, 6).unwrap();
        assert_eq!(a, b);

        assert_eq!(state.cells(), before.as_slice());
    }

    #[test]
    fn test_equality_and_hash_are_content_based() {
        use std::collections::hash_map::DefaultHasher;

        let a = solvable_8x8();
        let b = solvable_8x8();
        assert_eq!(a, b);

        let hash = |state: &BoardState| {
            let mut hasher = DefaultHasher::new();
            state.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));

        let moved = a.place_queen(1, 5).unwrap();
        assert_ne!(a, moved);
    }

    #[test]
    fn test_format_board_and_regions() {
        let state = board(&["AB", "AB"]);
        assert_eq!(format_regions(&state), "AB\nAB\n");
        assert_eq!(format_board(&state), "..\n..\n");

        let rows = board(&["AAAAA", "BBBBB", "CCCCC", "DDDDD", "EEEEE"]);
        let next = rows.place_queen(0, 0).unwrap();
        assert_eq!(
            format_board(&next),
            "Qxxxx\nxx...\nx....\nx....\nx....\n"
        );
    }
}
