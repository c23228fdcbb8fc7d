//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. Overrides come from JSON; any field left
//! out keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for the fruit slicer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerTuning {
    pub width: f32,
    pub height: f32,
    pub lives: u8,
    pub spawn_interval_ticks: u32,
    /// Probability that a spawn is a bomb
    pub bomb_chance: f64,
    pub gravity: f32,
    pub sliced_gravity: f32,
    pub wall_damping: f32,
    pub slice_duration_ticks: u32,
    pub combo_window_ticks: u32,
    pub gesture_path_cap: usize,
    /// Upward launch speed range (pixels/tick)
    pub launch_speed_min: f32,
    pub launch_speed_max: f32,
    /// Half-range of the horizontal launch speed
    pub launch_drift: f32,
    /// Half-range of the spin speed (radians/tick)
    pub spin: f32,
}

impl Default for SlicerTuning {
    fn default() -> Self {
        Self {
            width: SLICER_WIDTH,
            height: SLICER_HEIGHT,
            lives: SLICER_LIVES,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            bomb_chance: BOMB_CHANCE,
            gravity: FRUIT_GRAVITY,
            sliced_gravity: SLICED_GRAVITY,
            wall_damping: WALL_DAMPING,
            slice_duration_ticks: SLICE_DURATION_TICKS,
            combo_window_ticks: COMBO_WINDOW_TICKS,
            gesture_path_cap: GESTURE_PATH_CAP,
            launch_speed_min: 8.0,
            launch_speed_max: 12.0,
            launch_drift: 1.0,
            spin: 0.05,
        }
    }
}

impl SlicerTuning {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Balance knobs for the brick breaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerTuning {
    pub width: f32,
    pub height: f32,
    pub table_top: f32,
    pub table_bottom: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_speed_per_level: f32,
    pub block_width: f32,
    pub block_height: f32,
    pub block_score: u64,
    pub paddle_score: u64,
    pub level_count: u32,
    /// Patrol speed of the moving-block level
    pub moving_block_speed: f32,
    /// Blocks placed by the scatter level
    pub scatter_blocks: usize,
    /// Rejection-sampling attempts per scattered block
    pub scatter_attempts: u32,
    /// Vertical band (from the first row) the scatter level fills
    pub scatter_band: f32,
}

impl Default for BreakerTuning {
    fn default() -> Self {
        Self {
            width: BREAKER_WIDTH,
            height: BREAKER_HEIGHT,
            table_top: TABLE_TOP,
            table_bottom: TABLE_BOTTOM,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_per_level: BALL_SPEED_PER_LEVEL,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_score: BLOCK_SCORE,
            paddle_score: PADDLE_SCORE,
            level_count: LEVEL_COUNT,
            moving_block_speed: 2.0,
            scatter_blocks: 15,
            scatter_attempts: 100,
            scatter_band: 150.0,
        }
    }
}

impl BreakerTuning {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Horizontal gap that fits 8 block columns with 9 equal gaps
    pub fn block_spacing_x(&self) -> f32 {
        (self.width - 8.0 * self.block_width) / 9.0
    }

    pub fn block_spacing_y(&self) -> f32 {
        10.0
    }

    /// Minimum centre-to-centre distance between scattered blocks
    pub fn scatter_min_separation(&self) -> f32 {
        (self.block_width + self.block_spacing_x()) / 2.0
    }

    /// Ball speed for a 1-based level
    pub fn ball_speed(&self, level: u32) -> f32 {
        self.ball_base_speed + self.ball_speed_per_level * level.saturating_sub(1) as f32
    }
}
