//! Session driver
//!
//! Owns one game, the fixed-step clock, and the high score. The host calls
//! [`Session::frame`] from its timer and routes pointer events through
//! [`Session::input`]; both paths mutate the same state, and the renderer
//! reads a [`Session::snapshot`] afterwards.

use serde::Serialize;

use crate::breaker::{self, BreakerSnapshot, BreakerState};
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::sim::{FixedClock, GamePhase};
use crate::slicer::{self, SlicerSnapshot, SlicerState};

/// A simulation core the session can drive
pub trait Game {
    /// Storage key for this game's best score
    const SCORE_KEY: &'static str;
    type Snapshot: Serialize;

    /// One fixed tick (no-op unless playing)
    fn update(&mut self);
    fn phase(&self) -> GamePhase;
    fn score(&self) -> u64;
    fn start(&mut self);
    fn toggle_pause(&mut self);
    fn reset(&mut self);
    fn snapshot(&self, high_score: u64) -> Self::Snapshot;
}

impl Game for SlicerState {
    const SCORE_KEY: &'static str = "slicer-highScore";
    type Snapshot = SlicerSnapshot;

    fn update(&mut self) {
        slicer::tick(self);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn start(&mut self) {
        SlicerState::start(self);
    }

    fn toggle_pause(&mut self) {
        SlicerState::toggle_pause(self);
    }

    fn reset(&mut self) {
        SlicerState::reset(self);
    }

    fn snapshot(&self, high_score: u64) -> SlicerSnapshot {
        SlicerState::snapshot(self, high_score)
    }
}

impl Game for BreakerState {
    const SCORE_KEY: &'static str = "pingpong-highScore";
    type Snapshot = BreakerSnapshot;

    fn update(&mut self) {
        breaker::tick(self);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn start(&mut self) {
        BreakerState::start(self);
    }

    fn toggle_pause(&mut self) {
        BreakerState::toggle_pause(self);
    }

    fn reset(&mut self) {
        BreakerState::reset(self);
    }

    fn snapshot(&self, high_score: u64) -> BreakerSnapshot {
        BreakerState::snapshot(self, high_score)
    }
}

#[derive(Debug)]
pub struct Session<G: Game> {
    game: G,
    clock: FixedClock,
    high_score: HighScore,
    last_phase: GamePhase,
}

impl<G: Game> Session<G> {
    pub fn new(game: G, store: Box<dyn ScoreStore>) -> Self {
        let last_phase = game.phase();
        Self {
            game,
            clock: FixedClock::default(),
            high_score: HighScore::load(G::SCORE_KEY, store),
            last_phase,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Feed elapsed wall time; runs every tick that is due
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        let steps = self.clock.advance(elapsed_ms);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Feed a host timestamp instead of a delta
    pub fn frame_at(&mut self, now_ms: f64) -> u32 {
        let steps = self.clock.advance_to(now_ms);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Run exactly one tick
    pub fn step(&mut self) {
        self.game.update();
        self.observe();
    }

    /// Apply an input event between ticks
    pub fn input<R>(&mut self, f: impl FnOnce(&mut G) -> R) -> R {
        let result = f(&mut self.game);
        self.observe();
        result
    }

    pub fn start(&mut self) {
        self.game.start();
        self.clock.reset();
        self.observe();
    }

    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
        self.observe();
    }

    /// Back to waiting; the high score survives
    pub fn reset(&mut self) {
        self.game.reset();
        self.clock.reset();
        self.observe();
    }

    pub fn snapshot(&self) -> G::Snapshot {
        self.game.snapshot(self.high_score.best())
    }

    /// Submit the score once per entry into a terminal phase
    fn observe(&mut self) {
        let phase = self.game.phase();
        if phase != self.last_phase && phase.is_terminal() {
            self.high_score.submit(self.game.score());
        }
        self.last_phase = phase;
    }
}
