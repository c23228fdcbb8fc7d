//! Shared simulation pieces
//!
//! Everything here is deterministic and free of rendering/platform concerns:
//! - Fixed timestep only
//! - Seeded RNG only (owned by each game)
//! - Stable iteration order

pub mod clock;
pub mod collision;
pub mod combo;
pub mod phase;

pub use clock::FixedClock;
pub use collision::{Rect, circle_hits_path, circle_hits_segment, point_segment_distance};
pub use combo::Combo;
pub use phase::GamePhase;

/// Drop the oldest entries so at most `cap` remain
pub fn trim_oldest<T>(queue: &mut Vec<T>, cap: usize) {
    if queue.len() > cap {
        let excess = queue.len() - cap;
        queue.drain(..excess);
    }
}
