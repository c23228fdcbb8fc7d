//! Neon Arcade - simulation cores for two canvas arcade games
//!
//! Core modules:
//! - `sim`: Shared simulation pieces (phase machine, collision, combo, clock)
//! - `slicer`: Game A, slice falling fruit while avoiding bombs
//! - `breaker`: Game B, paddle and ball brick-breaker with five levels
//! - `session`: Drives a game at a fixed cadence and tracks the high score
//! - `input`: Display to logical coordinate mapping
//! - `highscores`: Best score per game
//! - `persistence`: Key-value score storage (memory / LocalStorage)
//! - `platform`: Browser bindings (wasm32 only)
//! - `tuning`: Data-driven game balance

pub mod breaker;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod slicer;
pub mod tuning;

pub use highscores::HighScore;
pub use session::{Game, Session};
pub use sim::GamePhase;
pub use tuning::{BreakerTuning, SlicerTuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: f64 = 16.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed to the clock (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Undrained events kept per game (oldest dropped first)
    pub const EVENT_QUEUE_CAP: usize = 256;

    /// Slicer logical canvas
    pub const SLICER_WIDTH: f32 = 400.0;
    pub const SLICER_HEIGHT: f32 = 600.0;
    pub const SLICER_LIVES: u8 = 3;
    /// Ticks between spawns
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
    pub const BOMB_CHANCE: f64 = 0.15;
    /// Gravity before and after a fruit is sliced (pixels/tick²)
    pub const FRUIT_GRAVITY: f32 = 0.15;
    pub const SLICED_GRAVITY: f32 = 0.3;
    /// Horizontal velocity kept after bouncing off a side wall
    pub const WALL_DAMPING: f32 = 0.8;
    /// Ticks a sliced fruit (or slice mark) stays alive
    pub const SLICE_DURATION_TICKS: u32 = 15;
    /// Combo window (1 second of ticks)
    pub const COMBO_WINDOW_TICKS: u32 = 60;
    /// Gesture path cap (oldest points dropped beyond this)
    pub const GESTURE_PATH_CAP: usize = 10;

    /// Breaker logical canvas
    pub const BREAKER_WIDTH: f32 = 400.0;
    pub const BREAKER_HEIGHT: f32 = 420.0;
    pub const TABLE_TOP: f32 = 50.0;
    pub const TABLE_BOTTOM: f32 = BREAKER_HEIGHT - TABLE_TOP;
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_BASE_SPEED: f32 = 3.0;
    /// Extra ball speed per level beyond the first
    pub const BALL_SPEED_PER_LEVEL: f32 = 0.5;
    pub const BLOCK_WIDTH: f32 = 30.0;
    pub const BLOCK_HEIGHT: f32 = 15.0;
    pub const BLOCK_SCORE: u64 = 10;
    pub const PADDLE_SCORE: u64 = 1;
    pub const LEVEL_COUNT: u32 = 5;
}
