//! Breadth-first solver for Lights Out boards.
//!
//! The solver explores the toggle-move graph layer by layer, so the first
//! solved state it discovers is reached by a provably shortest move
//! sequence. States are deduplicated through their canonical keys; the
//! reachable space is finite, so the search always terminates, either
//! with a solution, with an exhausted frontier (the board is unsolvable),
//! or with a spent time/state budget.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use crate::board::{Board, BoardKey, Move};

/// An ordered move sequence; applying it to the initial board in order
/// yields the all-off board. Empty means the board was already solved.
pub type SolutionPath = Vec<Move>;

/// Optional budgets for a solve. The defaults impose none: the search
/// runs until it finds a solution or proves there is none. The state
/// space grows as 2^(N*N), so callers handing in large boards are
/// expected to set a budget themselves.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Maximum wall-clock time to search.
    pub timeout: Option<Duration>,
    /// Maximum number of distinct states to discover.
    pub max_states: Option<usize>,
}

/// Result of a solve run.
///
/// `solution: None` has two distinct meanings, told apart by
/// `search_exhausted`: `true` means the frontier emptied and the board is
/// provably unsolvable; `false` means a budget ran out first.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Shortest move sequence, if one was found.
    pub solution: Option<SolutionPath>,
    /// Whether the whole reachable component was explored.
    pub search_exhausted: bool,
    /// Number of distinct states discovered (including the initial one).
    pub states_explored: usize,
    /// Wall-clock time spent searching.
    pub time_elapsed_ms: u64,
}

/// Back-pointer from a discovered state to the state it was first
/// reached from. Paths are reconstructed by walking these instead of
/// storing a full move list per queue entry.
#[derive(Debug, Clone, Copy)]
struct Backlink {
    parent: usize,
    mv: Move,
}

/// Find a shortest solution with no budget.
///
/// `None` means the board is provably unsolvable: the whole reachable
/// component was searched without finding the all-off state.
pub fn solve(initial: &Board) -> Option<SolutionPath> {
    solve_with_config(initial, &SolverConfig::default()).solution
}

/// Find a shortest solution within the given budgets.
///
/// Exploration is deterministic: within each BFS layer, candidate moves
/// are generated in row-major order, so ties between equally short
/// solutions always break toward the earliest row, then the earliest
/// column.
pub fn solve_with_config(initial: &Board, config: &SolverConfig) -> SolveReport {
    let start_time = Instant::now();
    let deadline = config.timeout.map(|t| start_time + t);

    if initial.is_solved() {
        return SolveReport {
            solution: Some(Vec::new()),
            search_exhausted: false,
            states_explored: 1,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
    }

    let size = initial.size();
    let mut states_explored: usize = 1;

    // One backlink per discovered state; index 0 is the initial state.
    let mut links: Vec<Option<Backlink>> = vec![None];
    let mut visited: HashSet<BoardKey> = HashSet::new();
    visited.insert(initial.key());

    // The queue holds the boards still awaiting expansion; expanded
    // boards are dropped, only their backlinks stay.
    let mut queue: VecDeque<(usize, Board)> = VecDeque::new();
    queue.push_back((0, initial.clone()));

    while let Some((index, board)) = queue.pop_front() {
        if let Some(deadline) = deadline {
            if Instant::now() > deadline {
                return SolveReport {
                    solution: None,
                    search_exhausted: false,
                    states_explored,
                    time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                };
            }
        }

        for row in 0..size {
            for col in 0..size {
                let mv = Move::new(row, col);
                let next = board.apply(mv);

                // First arrival wins: mark visited at enqueue time so the
                // same state never enters the queue twice.
                if !visited.insert(next.key()) {
                    continue;
                }
                states_explored += 1;

                if next.is_solved() {
                    return SolveReport {
                        solution: Some(reconstruct_path(&links, index, mv)),
                        search_exhausted: false,
                        states_explored,
                        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                    };
                }

                if let Some(max) = config.max_states {
                    if states_explored >= max {
                        return SolveReport {
                            solution: None,
                            search_exhausted: false,
                            states_explored,
                            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                        };
                    }
                }

                links.push(Some(Backlink { parent: index, mv }));
                queue.push_back((links.len() - 1, next));
            }
        }
    }

    // Frontier emptied: the all-off state is outside the reachable component.
    SolveReport {
        solution: None,
        search_exhausted: true,
        states_explored,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

fn reconstruct_path(links: &[Option<Backlink>], mut index: usize, last: Move) -> SolutionPath {
    let mut path = vec![last];
    while let Some(link) = links[index] {
        path.push(link.mv);
        index = link.parent;
    }
    path.reverse();
    path
}

/// Replay a move sequence and check it reaches the all-off state.
pub fn verify_solution(initial: &Board, moves: &[Move]) -> bool {
    let mut board = initial.clone();
    for &mv in moves {
        board = board.apply(mv);
    }
    board.is_solved()
}
