//! Level layouts
//!
//! Each level number maps to a fixed layout algorithm. Only the scatter level
//! draws from the RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Block, BreakerState};

/// Layout algorithms, in level order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 4×8 grid
    Grid,
    /// The grid with every other block missing
    Checkerboard,
    /// Centred rows of 5, 4, 3, 2, 1
    Pyramid,
    /// Random non-overlapping scatter
    Scatter,
    /// One row of blocks patrolling sideways
    Patrol,
}

impl Layout {
    /// Layout for a 1-based level; cycles if more levels are tuned in
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 5 {
            0 => Layout::Grid,
            1 => Layout::Checkerboard,
            2 => Layout::Pyramid,
            3 => Layout::Scatter,
            _ => Layout::Patrol,
        }
    }
}

/// Replace the blocks with the layout for `state.level`
pub fn generate_level(state: &mut BreakerState) {
    let layout = Layout::for_level(state.level);
    let positions: Vec<(Vec2, Option<f32>)> = match layout {
        Layout::Grid => grid(state, false),
        Layout::Checkerboard => grid(state, true),
        Layout::Pyramid => pyramid(state),
        Layout::Scatter => scatter(state),
        Layout::Patrol => patrol(state),
    };

    let size = Vec2::new(state.tuning.block_width, state.tuning.block_height);
    state.blocks.clear();
    for (pos, vel_x) in positions {
        let id = state.next_entity_id();
        state.blocks.push(Block {
            id,
            pos,
            size,
            active: true,
            vel_x,
        });
    }
    log::info!(
        "Level {} ({:?}): {} blocks",
        state.level,
        layout,
        state.blocks.len()
    );
}

fn grid(state: &BreakerState, checkerboard: bool) -> Vec<(Vec2, Option<f32>)> {
    let t = &state.tuning;
    let (sx, sy) = (t.block_spacing_x(), t.block_spacing_y());
    let mut out = Vec::with_capacity(32);
    for row in 0..4 {
        for col in 0..8 {
            if checkerboard && (row + col) % 2 != 0 {
                continue;
            }
            let x = sx + col as f32 * (t.block_width + sx);
            let y = t.table_top + sy + row as f32 * (t.block_height + sy);
            out.push((Vec2::new(x, y), None));
        }
    }
    out
}

fn pyramid(state: &BreakerState) -> Vec<(Vec2, Option<f32>)> {
    const ROWS: u32 = 5;
    let t = &state.tuning;
    let (sx, sy) = (t.block_spacing_x(), t.block_spacing_y());
    let pitch = t.block_width + sx;
    let offset_x = (t.width - ROWS as f32 * pitch + sx) / 2.0;

    let mut out = Vec::new();
    for row in 0..ROWS {
        for col in 0..(ROWS - row) {
            let x = offset_x + row as f32 * pitch / 2.0 + col as f32 * pitch;
            let y = t.table_top + sy + row as f32 * (t.block_height + sy);
            out.push((Vec2::new(x, y), None));
        }
    }
    out
}

/// Rejection sampling with a bounded retry count. When every attempt
/// collides the last candidate is placed anyway, so the level always gets
/// its full block count.
fn scatter(state: &mut BreakerState) -> Vec<(Vec2, Option<f32>)> {
    let t = state.tuning.clone();
    let min_sep = t.scatter_min_separation();
    let top = t.table_top + t.block_spacing_y();
    let x_span = (t.width - t.block_width).max(0.0);
    let y_span = (t.scatter_band - t.block_height).max(0.0);

    let mut placed: Vec<Vec2> = Vec::with_capacity(t.scatter_blocks);
    for _ in 0..t.scatter_blocks {
        let mut candidate = Vec2::ZERO;
        for _ in 0..t.scatter_attempts.max(1) {
            candidate = Vec2::new(
                state.rng.random::<f32>() * x_span,
                top + state.rng.random::<f32>() * y_span,
            );
            if placed.iter().all(|p| p.distance(candidate) >= min_sep) {
                break;
            }
        }
        placed.push(candidate);
    }
    placed.into_iter().map(|p| (p, None)).collect()
}

fn patrol(state: &BreakerState) -> Vec<(Vec2, Option<f32>)> {
    let t = &state.tuning;
    let (sx, sy) = (t.block_spacing_x(), t.block_spacing_y());
    (0..5)
        .map(|col| {
            let x = sx + col as f32 * (t.block_width + sx * 2.0);
            (Vec2::new(x, t.table_top + sy), Some(t.moving_block_speed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::BreakerTuning;
    use proptest::prelude::*;

    fn at_level(seed: u64, level: u32) -> BreakerState {
        let mut state = BreakerState::new(seed, BreakerTuning::default());
        state.level = level;
        generate_level(&mut state);
        state
    }

    #[test]
    fn test_block_counts_per_level() {
        let counts: Vec<usize> = (1..=5).map(|l| at_level(1, l).blocks.len()).collect();
        assert_eq!(counts, vec![32, 16, 15, 15, 5]);
    }

    #[test]
    fn test_grid_fits_table() {
        let state = at_level(1, 1);
        for block in &state.blocks {
            assert!(block.pos.x >= 0.0);
            assert!(block.pos.x + block.size.x <= 400.0 + 1e-3);
            assert!(block.pos.y >= 50.0);
            assert!(block.active);
            assert!(block.vel_x.is_none());
        }
        // Top-left block sits one gap in from the corner
        assert!((state.blocks[0].pos.x - 160.0 / 9.0).abs() < 1e-4);
        assert!((state.blocks[0].pos.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let state = at_level(1, 2);
        let first_row: Vec<f32> = state
            .blocks
            .iter()
            .filter(|b| (b.pos.y - 60.0).abs() < 1e-3)
            .map(|b| b.pos.x)
            .collect();
        assert_eq!(first_row.len(), 4);
        let sx = 160.0 / 9.0;
        assert!((first_row[1] - first_row[0] - 2.0 * (30.0 + sx)).abs() < 1e-3);
    }

    #[test]
    fn test_pyramid_is_centred() {
        let state = at_level(1, 3);
        let apex = state.blocks.last().unwrap();
        let centre = apex.pos.x + apex.size.x / 2.0;
        assert!((centre - 200.0).abs() < 1e-3);
        let rows: std::collections::BTreeSet<i32> =
            state.blocks.iter().map(|b| b.pos.y as i32).collect();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_patrol_blocks_move() {
        let state = at_level(1, 5);
        assert!(state.blocks.iter().all(|b| b.vel_x == Some(2.0)));
        assert!(state.blocks.iter().all(|b| b.pos.x + b.size.x <= 400.0));
    }

    #[test]
    fn test_scatter_best_effort_when_crowded() {
        // Impossible spacing: every block still gets placed
        let tuning = BreakerTuning {
            scatter_blocks: 40,
            scatter_band: 20.0,
            scatter_attempts: 3,
            ..Default::default()
        };
        let mut state = BreakerState::new(9, tuning);
        state.level = 4;
        generate_level(&mut state);
        assert_eq!(state.blocks.len(), 40);
    }

    #[test]
    fn test_layout_cycles() {
        assert_eq!(Layout::for_level(1), Layout::Grid);
        assert_eq!(Layout::for_level(4), Layout::Scatter);
        assert_eq!(Layout::for_level(5), Layout::Patrol);
        assert_eq!(Layout::for_level(6), Layout::Grid);
    }

    proptest! {
        #[test]
        fn prop_scatter_keeps_separation(seed in any::<u64>()) {
            let state = at_level(seed, 4);
            let min_sep = state.tuning.scatter_min_separation();
            for (i, a) in state.blocks.iter().enumerate() {
                prop_assert!(a.pos.x >= 0.0 && a.pos.x + a.size.x <= 400.0);
                for b in &state.blocks[i + 1..] {
                    prop_assert!(a.pos.distance(b.pos) >= min_sep);
                }
            }
        }
    }
}
