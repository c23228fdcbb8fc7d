//! Game B: paddle, ball, and five levels of blocks
//!
//! The ball dropping past the paddle line ends the run; clearing the last
//! level wins it.

pub mod levels;
pub mod state;
pub mod tick;

pub use levels::{Layout, generate_level};
pub use state::{Ball, Block, BreakerSnapshot, BreakerState, GameEvent, Rating};
pub use tick::{pointer_move, tick};
