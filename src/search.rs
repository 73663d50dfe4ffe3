//! Backtracking search over board snapshots.
//!
//! One recursive routine serves both modes: tree search passes no visited
//! set and may re-explore grids reached through different move orders, graph
//! search threads a content-keyed `FxHashSet` through the whole run and
//! prunes revisits. Exhaustion is a normal `None` result, not an error.

use rustc_hash::FxHashSet;

use crate::board::BoardState;
use crate::error::Error;
use crate::heuristic::Heuristic;

/// Search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Plain depth-first backtracking, no revisit protection.
    Tree,
    /// Depth-first backtracking with a visited-state set.
    Graph,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Tree => "tree",
            Strategy::Graph => "graph",
        }
    }
}

/// Result of one search run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The first goal state found, or `None` when the space is exhausted.
    pub solution: Option<BoardState>,
    /// Number of recursive invocations, for offline benchmark records.
    pub steps: usize,
}

/// A configured search engine: one strategy, one candidate ordering.
///
/// A solver owns no state between runs; the graph-search visited set lives
/// inside a single `solve` call, so one solver value may serve many runs
/// (and many threads) as long as each run gets its own board lineage.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    strategy: Strategy,
    heuristic: Heuristic,
}

impl Solver {
    pub fn new(strategy: Strategy, heuristic: Heuristic) -> Self {
        Solver {
            strategy,
            heuristic,
        }
    }

    /// Runs the search from an initial board.
    ///
    /// Deterministic for a fixed heuristic: the result is the first goal
    /// state in depth-first, leftmost-candidate order. Recursion depth is
    /// bounded by the board size, one queen per level.
    pub fn solve(&self, initial: BoardState) -> Result<SearchOutcome, Error> {
        let mut visited = match self.strategy {
            Strategy::Tree => None,
            Strategy::Graph => Some(FxHashSet::default()),
        };
        let mut steps = 0;
        let solution = self.explore(initial, &mut visited, &mut steps)?;
        Ok(SearchOutcome { solution, steps })
    }

    fn explore(
        &self,
        state: BoardState,
        visited: &mut Option<FxHashSet<BoardState>>,
        steps: &mut usize,
    ) -> Result<Option<BoardState>, Error> {
        *steps += 1;

        if let Some(seen) = visited.as_mut() {
            if !seen.insert(state.clone()) {
                return Ok(None);
            }
        }

        if state.is_goal_state() {
            return Ok(Some(state));
        }

        for (row, col) in state.valid_placements(self.heuristic) {
            let next = state.place_queen(row, col)?;
            if let Some(solution) = self.explore(next, visited, steps)? {
                return Ok(Some(solution));
            }
        }

        Ok(None)
    }
}
