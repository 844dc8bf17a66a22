use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the (square) board.
pub const SIZE: usize = 4;

pub type Tile = u32;
pub type Score = u64;
pub type Line = [Tile; SIZE];

/// Largest tile a 4x4 game can produce (2^17).
pub const MAX_TILE: Tile = 1 << 17;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in `from_u8` order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Convert a u8 to a Move (0=Up, 1=Down, 2=Left, 3=Right).
    pub fn from_u8(value: u8) -> Option<Move> {
        Move::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0:?}")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts full names (any case) plus the vi (`hjkl`) and `wasd` keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "k" | "w" => Ok(Move::Up),
            "down" | "j" | "s" => Ok(Move::Down),
            "left" | "h" | "a" => Ok(Move::Left),
            "right" | "l" | "d" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// Result of sliding a board in one direction (no random insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Sum of the values produced by merges during this move.
    pub score: Score,
    /// Number of merges performed.
    pub merges: u32,
    /// True if at least one cell changed position or value.
    pub changed: bool,
}

/// A 4x4 board of tile values in row-major order. `0` marks an empty cell.
///
/// The board is a small `Copy` value; every operation returns a new board
/// rather than mutating in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board([[Tile; SIZE]; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    #[inline]
    pub fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Self { Board(rows) }

    #[inline]
    pub fn into_rows(self) -> [[Tile; SIZE]; SIZE] { self.0 }

    #[inline]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] { &self.0 }

    /// Tile value at (`row`, `col`). Panics if either index is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile { self.0[row][col] }

    /// Return a copy of this board with (`row`, `col`) set to `value`.
    #[inline]
    pub fn with_tile(mut self, row: usize, col: usize, value: Tile) -> Self {
        self.0[row][col] = value;
        self
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use tile_merge::engine::{Board, Move};
    /// let b = Board::from_rows([[0, 0, 2, 2], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.shift(Move::Left).get(0, 0), 4);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self { apply_direction(self, dir).board }

    /// Slide/merge in `dir`, reporting the score gained and whether anything moved.
    #[inline]
    pub fn apply(self, dir: Move) -> MoveOutcome { apply_direction(self, dir) }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot, using the provided RNG.
    ///
    /// A full board is returned unchanged.
    ///
    /// ```
    /// use tile_merge::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        spawn_random_tile(self, rng)
    }

    /// Convenience: like `with_random_tile` but uses thread-local RNG.
    #[inline]
    pub fn with_random_tile_thread(self) -> Self {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Return true if no legal moves remain.
    ///
    /// ```
    /// use tile_merge::engine::Board;
    /// // Empty cells always leave a move available.
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool { is_terminal(self) }

    /// Directions that would change the board.
    pub fn legal_moves(self) -> Vec<Move> {
        Move::ALL.into_iter().filter(|&m| apply_direction(self, m).changed).collect()
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize { self.cells().filter(|&v| v == 0).count() }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.0.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v == 0 { out.push((r, c)); }
            }
        }
        out
    }

    /// Return the highest tile value (e.g., 2048) present on the board, or 0 when empty.
    #[inline]
    pub fn highest_tile(self) -> Tile { self.cells().max().unwrap_or(0) }

    /// Sum of all tile values.
    #[inline]
    pub fn tile_sum(self) -> u64 { self.cells().map(u64::from).sum() }

    /// True if every non-empty cell holds a power of two between 2 and [`MAX_TILE`].
    pub fn is_valid(self) -> bool {
        self.cells().all(|v| v == 0 || (v >= 2 && v <= MAX_TILE && v.is_power_of_two()))
    }

    fn cells(self) -> impl Iterator<Item = Tile> {
        self.0.into_iter().flatten()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (r, row) in self.0.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
            if r + 1 < SIZE {
                writeln!(f, "-------------------------------")?;
            }
        }
        Ok(())
    }
}

impl From<[[Tile; SIZE]; SIZE]> for Board { fn from(rows: [[Tile; SIZE]; SIZE]) -> Self { Board::from_rows(rows) } }
impl From<Board> for [[Tile; SIZE]; SIZE] { fn from(b: Board) -> Self { b.into_rows() } }

struct LineShift {
    line: Line,
    score: Score,
    merges: u32,
}

/// Compact `line` toward index 0, merging equal neighbours at most once each.
///
/// Returns the new line and the score gained (sum of merged values).
///
/// ```
/// use tile_merge::engine::slide_and_merge_line;
/// assert_eq!(slide_and_merge_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// ```
pub fn slide_and_merge_line(line: Line) -> (Line, Score) {
    let shifted = shift_line(line);
    (shifted.line, shifted.score)
}

fn shift_line(line: Line) -> LineShift {
    let mut result = [0; SIZE];
    let mut cursor = 0;
    let mut score = 0;
    let mut merges = 0;
    for value in line.into_iter().filter(|&v| v != 0) {
        // tiles too large to double are left unmerged
        let merged = if result[cursor] == value { value.checked_mul(2) } else { None };
        if result[cursor] == 0 {
            result[cursor] = value;
        } else if let Some(merged) = merged {
            result[cursor] = merged;
            score += Score::from(merged);
            merges += 1;
            // a merged tile must not absorb the next one
            cursor += 1;
        } else {
            cursor += 1;
            result[cursor] = value;
        }
    }
    LineShift { line: result, score, merges }
}

/// Board coordinate of position `pos` along line `idx`, counted from the
/// edge tiles slide toward.
#[inline]
fn line_coord(direction: Move, idx: usize, pos: usize) -> (usize, usize) {
    match direction {
        Move::Left => (idx, pos),
        Move::Right => (idx, SIZE - 1 - pos),
        Move::Up => (pos, idx),
        Move::Down => (SIZE - 1 - pos, idx),
    }
}

/// Slide/merge every row (left/right) or column (up/down) of `board`. No randomness.
pub fn apply_direction(board: Board, direction: Move) -> MoveOutcome {
    let mut out = board.0;
    let mut score = 0;
    let mut merges = 0;
    for idx in 0..SIZE {
        let line: Line = std::array::from_fn(|pos| {
            let (r, c) = line_coord(direction, idx, pos);
            board.0[r][c]
        });
        let shifted = shift_line(line);
        for (pos, &v) in shifted.line.iter().enumerate() {
            let (r, c) = line_coord(direction, idx, pos);
            out[r][c] = v;
        }
        score += shifted.score;
        merges += shifted.merges;
    }
    let moved = Board(out);
    MoveOutcome { board: moved, score, merges, changed: moved != board }
}

/// Slide/merge tiles in the given direction, discarding the score. No randomness.
pub fn shift(board: Board, direction: Move) -> Board { apply_direction(board, direction).board }

/// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
///
/// Returns `board` unchanged when there is no empty cell.
pub fn spawn_random_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return board;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    board.with_tile(row, col, generate_random_tile(rng))
}

/// Insert a random tile using thread-local RNG.
///
/// For reproducible behavior, prefer `Board::with_random_tile(&mut impl Rng)`.
pub fn insert_random_tile(board: Board) -> Board { board.with_random_tile_thread() }

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile { if rng.gen_range(0..10) < 9 { 2 } else { 4 } }

/// True iff the board is full and no two orthogonally adjacent cells are equal.
pub fn is_terminal(board: Board) -> bool {
    let cells = &board.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let v = cells[r][c];
            if v == 0 {
                return false;
            }
            if c + 1 < SIZE && v == cells[r][c + 1] {
                return false;
            }
            if r + 1 < SIZE && v == cells[r + 1][c] {
                return false;
            }
        }
    }
    true
}

/// Count the number of empty cells.
pub fn count_empty(board: Board) -> usize { board.count_empty() }

pub fn get_highest_tile_val(board: Board) -> Tile { board.highest_tile() }

fn format_val(val: Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}
