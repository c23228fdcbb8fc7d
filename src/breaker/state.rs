//! Breaker game state and core types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels::generate_level;
use crate::sim::{GamePhase, Rect};
use crate::tuning::BreakerTuning;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

/// A breakable block (top-left anchored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Horizontal patrol speed (moving-block level only)
    pub vel_x: Option<f32>,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// End-of-run letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    C,
    D,
    F,
}

impl Rating {
    pub fn from_score(score: u64) -> Self {
        match score {
            s if s > 1000 => Rating::A,
            s if s > 500 => Rating::B,
            s if s > 200 => Rating::C,
            s if s > 100 => Rating::D,
            _ => Rating::F,
        }
    }
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameEvent {
    PaddleBounce,
    BlockDestroyed { id: u32, points: u64 },
    LevelCleared { level: u32 },
    GameOver { score: u64 },
    Win { score: u64 },
}

/// Complete breaker state
#[derive(Debug, Clone)]
pub struct BreakerState {
    pub tuning: BreakerTuning,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub ball: Ball,
    /// Left edge of the paddle
    pub paddle_x: f32,
    pub blocks: Vec<Block>,
    /// Grade fixed when the run ends
    pub rating: Option<Rating>,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    /// Pending events, drained by the presentation layer
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl BreakerState {
    pub fn new(seed: u64, tuning: BreakerTuning) -> Self {
        let mut state = Self {
            phase: GamePhase::Waiting,
            level: 1,
            score: 0,
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius: tuning.ball_radius,
            },
            paddle_x: 0.0,
            blocks: Vec::new(),
            rating: None,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };
        state.center_paddle();
        state.serve_ball();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn paddle_rect(&self) -> Rect {
        let t = &self.tuning;
        Rect::new(
            Vec2::new(self.paddle_x, t.table_bottom - t.paddle_height),
            Vec2::new(t.paddle_width, t.paddle_height),
        )
    }

    pub fn center_paddle(&mut self) {
        self.paddle_x = (self.tuning.width - self.tuning.paddle_width) / 2.0;
    }

    /// Ball back to the centre, heading up at the current level's speed
    pub fn serve_ball(&mut self) {
        let speed = self.tuning.ball_speed(self.level);
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball = Ball {
            pos: Vec2::new(self.tuning.width / 2.0, self.tuning.height / 2.0),
            vel: Vec2::new(speed * dir, -speed),
            radius: self.tuning.ball_radius,
        };
    }

    /// Begin a fresh run at level 1
    pub fn start(&mut self) {
        if !self.phase.can_start() {
            return;
        }
        self.level = 1;
        self.score = 0;
        self.rating = None;
        self.events.clear();
        self.center_paddle();
        self.serve_ball();
        generate_level(self);
        self.phase = GamePhase::Playing;
        log::info!("Breaker started ({} blocks)", self.blocks.len());
    }

    pub fn toggle_pause(&mut self) {
        self.phase = self.phase.toggled_pause();
    }

    /// Back to the waiting screen with an empty table
    pub fn reset(&mut self) {
        self.phase = GamePhase::Waiting;
        self.level = 1;
        self.score = 0;
        self.rating = None;
        self.events.clear();
        self.blocks.clear();
        self.center_paddle();
        self.serve_ball();
    }

    /// Playing → `outcome` (GameOver or Win). Returns false when already over.
    pub(crate) fn finish(&mut self, outcome: GamePhase) -> bool {
        if !self.phase.is_playing() || !outcome.is_terminal() {
            return false;
        }
        self.phase = outcome;
        self.rating = Some(Rating::from_score(self.score));
        let score = self.score;
        if outcome == GamePhase::Win {
            self.events.push(GameEvent::Win { score });
            log::info!("Breaker won, score {} ({:?})", score, self.rating);
        } else {
            self.events.push(GameEvent::GameOver { score });
            log::info!("Breaker game over at level {}, score {}", self.level, score);
        }
        true
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self, high_score: u64) -> BreakerSnapshot {
        let paddle = self.paddle_rect();
        BreakerSnapshot {
            phase: self.phase,
            score: self.score,
            high_score,
            level: self.level,
            rating: self.rating,
            ball: self.ball,
            paddle_pos: paddle.min,
            paddle_size: paddle.max - paddle.min,
            blocks: self.blocks.clone(),
        }
    }
}

/// What the renderer reads each frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakerSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub rating: Option<Rating>,
    pub ball: Ball,
    pub paddle_pos: Vec2,
    pub paddle_size: Vec2,
    pub blocks: Vec<Block>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Rating::from_score(0), Rating::F);
        assert_eq!(Rating::from_score(100), Rating::F);
        assert_eq!(Rating::from_score(101), Rating::D);
        assert_eq!(Rating::from_score(201), Rating::C);
        assert_eq!(Rating::from_score(501), Rating::B);
        assert_eq!(Rating::from_score(1001), Rating::A);
    }

    #[test]
    fn test_start_builds_level_one() {
        let mut state = BreakerState::new(5, BreakerTuning::default());
        assert_eq!(state.phase, GamePhase::Waiting);
        assert!(state.blocks.is_empty());

        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.blocks.len(), 32);
        assert!((state.ball.vel.x.abs() - 3.0).abs() < 1e-6);
        assert!((state.ball.vel.y + 3.0).abs() < 1e-6);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 210.0));
        assert!((state.paddle_x - 160.0).abs() < 1e-6);
    }

    #[test]
    fn test_finish_only_once() {
        let mut state = BreakerState::new(5, BreakerTuning::default());
        state.start();
        state.score = 250;
        assert!(state.finish(GamePhase::GameOver));
        assert!(!state.finish(GamePhase::Win));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.rating, Some(Rating::C));
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 250 }]);
    }

    #[test]
    fn test_reset_keeps_nothing() {
        let mut state = BreakerState::new(5, BreakerTuning::default());
        state.start();
        state.level = 3;
        state.score = 77;
        state.reset();
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_snapshot_paddle_geometry() {
        let state = BreakerState::new(5, BreakerTuning::default());
        let snap = state.snapshot(12);
        assert_eq!(snap.paddle_pos, Vec2::new(160.0, 360.0));
        assert_eq!(snap.paddle_size, Vec2::new(80.0, 10.0));
        assert_eq!(snap.high_score, 12);
    }
}
