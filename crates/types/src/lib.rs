//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The grid is fixed for the lifetime of the engine:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Piece spawn position**: (`BOARD_WIDTH / 2 - 1`, 0) = (4, 0)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `AUTO_DROP_MS` | 1000 | Interval between automatic piece drops |
//! | `DEFAULT_FRAME_MS` | 120 | Default delay between frames of the runner |
//!
//! # Examples
//!
//! ```
//! use grid_arcade_types::{Direction, ShapeKind, SpawnRequest, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(ShapeKind::T.index(), 2);
//!
//! assert_eq!(SpawnRequest::parse("Block"), SpawnRequest::Piece(None));
//! assert_eq!(SpawnRequest::parse("Snake"), SpawnRequest::Snake);
//!
//! assert!(Direction::Right.is_horizontal());
//! assert_eq!(Direction::Up.delta(), (0, -1));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Automatic drop interval for the active piece (1000ms = 1 row per second)
pub const AUTO_DROP_MS: u32 = 1000;

/// Default frame delay of the runner in milliseconds
pub const DEFAULT_FRAME_MS: u64 = 120;

/// Default number of frames the runner executes before stopping
pub const DEFAULT_FRAMES: u32 = 1_000_000;

/// Random food positions tried before falling back to (0, 0)
pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 100;

/// Points awarded for each food eaten by the snake
pub const FOOD_SCORE: i64 = 1;

/// Line clear scoring table
///
/// Index is the number of lines cleared by a single fix:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4+ lines: 800 points
pub const LINE_SCORES: [i64; 5] = [0, 100, 300, 500, 800];

/// End-of-game reason when a new piece cannot be placed.
pub const TETRIS_GAME_OVER: &str = "Tetris: Game Over!";

/// End-of-game reason when the snake runs into its own body.
pub const SNAKE_SELF_COLLISION: &str = "Snake: Auto-colisión!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_table_matches_rules() {
        assert_eq!(LINE_SCORES[0], 0);
        assert_eq!(LINE_SCORES[1], 100);
        assert_eq!(LINE_SCORES[2], 300);
        assert_eq!(LINE_SCORES[3], 500);
        assert_eq!(LINE_SCORES[4], 800);
        assert_eq!(AUTO_DROP_MS, 1000);
        assert_eq!(FOOD_PLACEMENT_ATTEMPTS, 100);
    }

    #[test]
    fn spawn_request_aliases() {
        assert_eq!(SpawnRequest::parse("Tetris"), SpawnRequest::Piece(None));
        assert_eq!(SpawnRequest::parse("Block"), SpawnRequest::Piece(None));
        assert_eq!(
            SpawnRequest::parse("I"),
            SpawnRequest::Piece(Some(ShapeKind::I))
        );
        assert_eq!(SpawnRequest::parse("Snake"), SpawnRequest::Snake);
        assert_eq!(SpawnRequest::parse("Food"), SpawnRequest::Snake);
        assert_eq!(SpawnRequest::parse("whatever"), SpawnRequest::Snake);
    }

    #[test]
    fn direction_axes() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven piece shapes, in Shape Catalog order
///
/// The discriminant order is the catalog index; the board stores
/// `index + 1` for every settled cell so that `0` always means empty.
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **L**: Orange, L-shaped
/// - **J**: Blue, J-shaped (mirror of L)
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// All shapes in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse shape kind from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_arcade_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("Tetris"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Shape name as shown to scripts and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
        }
    }

    /// Index into the Shape Catalog
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Shape at the given catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Marker written into the board for a settled cell of this shape
    pub fn marker(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Shape recorded by a board marker (`0` is empty)
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0 => None,
            m => Self::from_index(m as usize - 1),
        }
    }
}

/// Closed set of entity kinds held by the entity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The single falling piece under player control
    ActivePiece,
    /// A piece that has been folded into the board
    Settled,
    /// First segment of the snake
    SnakeHead,
    /// Any snake segment after the head
    SnakeBody,
    /// Food eaten by the snake
    Food,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ActivePiece => "active_piece",
            EntityKind::Settled => "settled",
            EntityKind::SnakeHead => "snake_head",
            EntityKind::SnakeBody => "snake_body",
            EntityKind::Food => "food",
        }
    }
}

/// Which ruleset the session plays, chosen by the first spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Tetris,
    Snake,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Tetris => "tetris",
            GameMode::Snake => "snake",
        }
    }
}

/// What a `spawnBlock` kind string asks for
///
/// Piece names and the generic aliases `Tetris` / `Block` request a piece
/// (`None` = random shape). Every other kind string belongs to the snake
/// ruleset: the engine creates the head first and food afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRequest {
    Piece(Option<ShapeKind>),
    Snake,
}

impl SpawnRequest {
    pub fn parse(kind: &str) -> Self {
        if let Some(shape) = ShapeKind::from_str(kind) {
            return SpawnRequest::Piece(Some(shape));
        }
        match kind.to_lowercase().as_str() {
            "tetris" | "block" => SpawnRequest::Piece(None),
            _ => SpawnRequest::Snake,
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            SpawnRequest::Piece(_) => GameMode::Tetris,
            SpawnRequest::Snake => GameMode::Snake,
        }
    }
}

/// Snake heading
///
/// Screen coordinates: `y` grows downward, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step `(dx, dy)` for this heading
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Discrete commands produced by the input layer
///
/// Piece commands act on the active piece, `Steer` on the snake heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one column left
    PieceLeft,
    /// Move piece one column right
    PieceRight,
    /// Move piece one row down, fixing it when blocked
    PieceDown,
    /// Rotate piece 90° clockwise
    PieceRotate,
    /// Drop piece to its lowest legal row and fix it
    PieceHardDrop,
    /// Change the snake heading
    Steer(Direction),
    /// Leave the session
    Quit,
}
