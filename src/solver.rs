//! An agent to choose Othello moves by game tree search

use anyhow::Result;
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::bitboard::{BitBoard, Color, Move};
use crate::NUM_CELLS;

/// Larger than the magnitude of any disk differential
pub const INF: i32 = NUM_CELLS as i32 + 1;

/// Nodes at or below this remaining depth are searched serially by default
pub const DEFAULT_SERIAL_DEPTH: u32 = 3;

/// Tuning for [`Solver`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The parallel search falls back to the serial one once the remaining
    /// depth is at most this many plies
    pub serial_depth: u32,
    /// Worker threads for the parallel search, `None` for rayon's global pool
    pub num_threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            serial_depth: DEFAULT_SERIAL_DEPTH,
            num_threads: None,
        }
    }
}

/// The result of a search
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    /// Disk differential from the mover's point of view after the searched plies
    pub value: i32,
    /// The chosen move, `None` at depth 0 or when the mover has to pass
    pub best_move: Option<Move>,
    /// Whether the mover had any legal move in the searched position
    pub has_move: bool,
}

/// A sibling's score in the parallel best-of reduction.
///
/// `combine` keeps the greater value, and the lower index on equal values,
/// so the reduction is associative and commutative and agrees with the
/// serial search's first-move-wins tie-break.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub value: i32,
}

impl Candidate {
    /// The identity of `combine`
    pub const NONE: Self = Self {
        index: usize::MAX,
        value: i32::MIN,
    };

    pub fn combine(self, other: Self) -> Self {
        if other.value > self.value || (other.value == self.value && other.index < self.index) {
            other
        } else {
            self
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SearchMode {
    Serial,
    Parallel,
    Unpruned,
}

/// An agent to pick the best move for one side of an Othello position
///
/// # Notes
/// Positions are scored by negamax: a node's value is the disk differential
/// from the point of view of the player to move there, looking a fixed
/// number of disk placements ahead. Forced passes do not use up depth.
///
/// Sibling moves are tried in enumeration order (highest row first, then
/// highest column first) and the first of several equally scored moves wins,
/// in both the serial and the parallel search.
#[derive(Clone)]
pub struct Solver {
    board: BitBoard,
    color: Color,
    config: SearchConfig,
    pool: Option<Arc<ThreadPool>>,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` for `color` to move on `board`
    pub fn new(board: BitBoard, color: Color) -> Self {
        Self {
            board,
            color,
            config: SearchConfig::default(),
            pool: None,
            node_count: 0,
        }
    }

    /// Applies a search configuration, building a dedicated thread pool
    /// when a thread count is given
    pub fn with_config(mut self, config: SearchConfig) -> Result<Self> {
        self.pool = match config.num_threads {
            Some(threads) => Some(Arc::new(
                ThreadPoolBuilder::new().num_threads(threads).build()?,
            )),
            None => None,
        };
        self.config = config;
        Ok(self)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Serial negamax with alpha-beta pruning, `depth` plies deep
    pub fn solve(&mut self, depth: u32) -> Action {
        self.run(depth, SearchMode::Serial)
    }

    /// Negamax exploring sibling moves concurrently above the configured
    /// serial depth
    pub fn solve_parallel(&mut self, depth: u32) -> Action {
        self.run(depth, SearchMode::Parallel)
    }

    /// Plain negamax without pruning, visiting the full tree
    pub fn solve_unpruned(&mut self, depth: u32) -> Action {
        self.run(depth, SearchMode::Unpruned)
    }

    fn run(&mut self, depth: u32, mode: SearchMode) -> Action {
        let start = Instant::now();
        let nodes = AtomicUsize::new(0);
        let (board, color) = (self.board, self.color);

        let (value, best_move) = match mode {
            SearchMode::Serial => negamax(board, color, depth, -INF, INF, &nodes),
            SearchMode::Unpruned => negamax_unpruned(board, color, depth, &nodes),
            SearchMode::Parallel => {
                let serial_depth = self.config.serial_depth;
                let search =
                    || parallel_negamax(board, color, depth, -INF, INF, serial_depth, &nodes);
                match &self.pool {
                    Some(pool) => pool.install(search),
                    None => search(),
                }
            }
        };
        self.node_count = nodes.into_inner();

        let elapsed = start.elapsed();
        debug!(
            "{:?} search for {} at depth {}: value {}, move {}, {} nodes in {:.3}ms ({:.0} kn/s)",
            mode,
            color,
            depth,
            value,
            best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
            self.node_count,
            elapsed.as_secs_f64() * 1000.0,
            self.node_count as f64 / (1000.0 * elapsed.as_secs_f64().max(f64::EPSILON)),
        );

        Action {
            value,
            best_move,
            has_move: board.has_legal_move(color),
        }
    }
}

/// Searches the best move for `color` on a copy of `board` with the default
/// configuration, exploring sibling moves in parallel
pub fn search(board: BitBoard, color: Color, depth: u32) -> Action {
    Solver::new(board, color).solve_parallel(depth)
}

/// Performs game tree search
///
/// Returns the value of the position for `color` and the move reaching it.
/// The value is exact inside `(alpha, beta)`, otherwise a bound on the far
/// side of the window.
fn negamax(
    board: BitBoard,
    color: Color,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    nodes: &AtomicUsize,
) -> (i32, Option<Move>) {
    nodes.fetch_add(1, Ordering::Relaxed);

    if depth == 0 {
        return (board.utility(color), None);
    }

    let moves = board.valid_positions(board.neighbor_candidates(color), color);
    if moves.is_empty() {
        if !board.has_legal_move(color.other()) {
            return (board.utility(color), None);
        }
        // forced pass, the opponent moves on the same board and depth
        let (value, _) = negamax(board, color.other(), depth, -beta, -alpha, nodes);
        return (-value, None);
    }

    let mut best_value = -INF;
    let mut best_move = None;
    for &m in moves.iter() {
        // the search window is flipped for the other player
        let (child, _) = negamax(
            board.with_move(m, color),
            color.other(),
            depth - 1,
            -beta,
            -alpha,
            nodes,
        );
        let value = -child;
        if value > best_value {
            best_value = value;
            best_move = Some(m);
        }
        alpha = alpha.max(best_value);
        // the opponent will not allow this line, stop exploring siblings
        if alpha >= beta {
            break;
        }
    }
    (best_value, best_move)
}

/// Like [`negamax`], but every sibling of a node above `serial_depth` is
/// searched concurrently with the window the node was given
fn parallel_negamax(
    board: BitBoard,
    color: Color,
    depth: u32,
    alpha: i32,
    beta: i32,
    serial_depth: u32,
    nodes: &AtomicUsize,
) -> (i32, Option<Move>) {
    if depth <= serial_depth {
        return negamax(board, color, depth, alpha, beta, nodes);
    }
    nodes.fetch_add(1, Ordering::Relaxed);

    let moves = board.valid_positions(board.neighbor_candidates(color), color);
    if moves.is_empty() {
        if !board.has_legal_move(color.other()) {
            return (board.utility(color), None);
        }
        let (value, _) =
            parallel_negamax(board, color.other(), depth, -beta, -alpha, serial_depth, nodes);
        return (-value, None);
    }

    let best = moves
        .par_iter()
        .enumerate()
        .map(|(index, &m)| {
            let (child, _) = parallel_negamax(
                board.with_move(m, color),
                color.other(),
                depth - 1,
                -beta,
                -alpha,
                serial_depth,
                nodes,
            );
            Candidate {
                index,
                value: -child,
            }
        })
        .reduce(|| Candidate::NONE, Candidate::combine);

    (best.value, Some(moves[best.index]))
}

/// Full-width negamax without a search window
fn negamax_unpruned(
    board: BitBoard,
    color: Color,
    depth: u32,
    nodes: &AtomicUsize,
) -> (i32, Option<Move>) {
    nodes.fetch_add(1, Ordering::Relaxed);

    if depth == 0 {
        return (board.utility(color), None);
    }

    let moves = board.valid_positions(board.neighbor_candidates(color), color);
    if moves.is_empty() {
        if !board.has_legal_move(color.other()) {
            return (board.utility(color), None);
        }
        let (value, _) = negamax_unpruned(board, color.other(), depth, nodes);
        return (-value, None);
    }

    moves
        .iter()
        .map(|&m| {
            let (child, _) =
                negamax_unpruned(board.with_move(m, color), color.other(), depth - 1, nodes);
            (-child, Some(m))
        })
        .fold((-INF, None), |best, next| if next.0 > best.0 { next } else { best })
}

impl std::ops::Deref for Solver {
    type Target = BitBoard;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
