//! Candidate-ordering heuristics for the search engine.
//!
//! A heuristic is a strategy tag, not a trait object: it reorders the legal
//! placements a board produced and never adds or removes one. All sorts are
//! stable, so ties keep the row-major scan order.

use crate::board::BoardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Keep the row-major scan order.
    None,
    /// Most-constrained first: ascending count of other regions still
    /// lacking a queen after the hypothetical placement.
    FewestRemainingRegions,
    /// Ascending count of empty cells left in the candidate's own region.
    SmallestRegionFirst,
}

impl Heuristic {
    /// Stable file-name fragment used to partition benchmark records.
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::None => "no-heuristic",
            Heuristic::FewestRemainingRegions => "fewest-remaining-regions",
            Heuristic::SmallestRegionFirst => "smallest-region-first",
        }
    }

    pub fn all() -> [Heuristic; 3] {
        [
            Heuristic::None,
            Heuristic::FewestRemainingRegions,
            Heuristic::SmallestRegionFirst,
        ]
    }

    /// Reorders `(position, remaining_regions)` candidates in place.
    pub(crate) fn order(self, board: &BoardState, candidates: &mut [((usize, usize), usize)]) {
        match self {
            Heuristic::None => {}
            Heuristic::FewestRemainingRegions => {
                candidates.sort_by_key(|&(_, remaining)| remaining);
            }
            Heuristic::SmallestRegionFirst => {
                candidates.sort_by_key(|&((row, col), _)| board.open_region_cells(row, col));
            }
        }
    }
}
