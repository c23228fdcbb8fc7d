//! Slicer game state and entity types
//!
//! One owned context holds everything the tick and the pointer handlers touch;
//! the renderer only ever sees a [`SlicerSnapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::{Combo, GamePhase};
use crate::tuning::SlicerTuning;

/// Fruit varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Watermelon,
    Pineapple,
    Strawberry,
}

impl FruitKind {
    pub const ALL: [Self; 5] = [
        Self::Apple,
        Self::Orange,
        Self::Watermelon,
        Self::Pineapple,
        Self::Strawberry,
    ];

    pub fn radius(self) -> f32 {
        match self {
            Self::Apple => 20.0,
            Self::Orange => 22.0,
            Self::Watermelon => 25.0,
            Self::Pineapple => 24.0,
            Self::Strawberry => 18.0,
        }
    }

    /// Base points before the combo multiplier
    pub fn points(self) -> u64 {
        match self {
            Self::Apple => 10,
            Self::Orange => 15,
            Self::Watermelon => 20,
            Self::Pineapple => 25,
            Self::Strawberry => 30,
        }
    }
}

/// What a falling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Fruit(FruitKind),
    Bomb,
}

pub const BOMB_RADIUS: f32 = 22.0;

impl EntityKind {
    pub fn radius(self) -> f32 {
        match self {
            EntityKind::Fruit(kind) => kind.radius(),
            EntityKind::Bomb => BOMB_RADIUS,
        }
    }

    pub fn is_bomb(self) -> bool {
        self == EntityKind::Bomb
    }
}

/// A fruit or bomb in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Radians per tick
    pub rotation_speed: f32,
    pub sliced: bool,
    /// Ticks since slicing (removed once past the slice duration)
    pub slice_timer: u32,
}

/// Short-lived slash drawn where a cut happened
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SliceMark {
    pub pos: Vec2,
    pub angle: f32,
    /// Ticks left before the mark disappears
    pub timer: u32,
}

/// Pointer gesture between press and release
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    pub active: bool,
    /// Recent points, oldest first, capped by tuning
    pub path: Vec<Vec2>,
    /// Point the next motion segment starts from
    pub last: Option<Vec2>,
}

impl Gesture {
    pub fn clear(&mut self) {
        self.active = false;
        self.path.clear();
        self.last = None;
    }

    /// Append a point, dropping the oldest past `cap`
    pub fn push(&mut self, point: Vec2, cap: usize) {
        self.path.push(point);
        if self.path.len() > cap.max(2) {
            self.path.remove(0);
        }
    }
}

/// Things the presentation layer may want to react to (sound, flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameEvent {
    Spawned { id: u32 },
    FruitSliced { id: u32, points: u64, combo: u32 },
    FruitMissed { id: u32, lives_left: u8 },
    BombHit { id: u32 },
    GameOver { score: u64 },
}

/// Complete slicer state
#[derive(Debug, Clone)]
pub struct SlicerState {
    pub tuning: SlicerTuning,
    pub phase: GamePhase,
    /// Live fruits and bombs (spawn order)
    pub fruits: Vec<Fruit>,
    pub marks: Vec<SliceMark>,
    pub gesture: Gesture,
    pub score: u64,
    pub lives: u8,
    pub combo: Combo,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    /// Pending events, drained by the presentation layer
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SlicerState {
    pub fn new(seed: u64, tuning: SlicerTuning) -> Self {
        Self {
            phase: GamePhase::Waiting,
            fruits: Vec::new(),
            marks: Vec::new(),
            gesture: Gesture::default(),
            score: 0,
            lives: tuning.lives,
            combo: Combo::default(),
            spawn_timer: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a specific entity to the board
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.fruits.push(Fruit {
            id,
            kind,
            pos,
            vel,
            radius: kind.radius(),
            rotation: 0.0,
            rotation_speed: 0.0,
            sliced: false,
            slice_timer: 0,
        });
        self.events.push(GameEvent::Spawned { id });
        id
    }

    fn clear_board(&mut self) {
        self.fruits.clear();
        self.marks.clear();
        self.gesture.clear();
        self.score = 0;
        self.lives = self.tuning.lives;
        self.combo.clear();
        self.spawn_timer = 0;
        self.events.clear();
    }

    /// Begin a fresh run (from waiting or a finished run)
    pub fn start(&mut self) {
        if !self.phase.can_start() {
            return;
        }
        self.clear_board();
        self.phase = GamePhase::Playing;
        log::info!("Slicer started");
    }

    pub fn toggle_pause(&mut self) {
        self.phase = self.phase.toggled_pause();
    }

    /// Back to the waiting screen with an empty board
    pub fn reset(&mut self) {
        self.clear_board();
        self.phase = GamePhase::Waiting;
    }

    /// Playing → GameOver. Returns false when the run was already over.
    pub(crate) fn end_game(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.gesture.clear();
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Slicer game over, score {}", self.score);
        true
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self, high_score: u64) -> SlicerSnapshot {
        let trail = if self.gesture.active && self.gesture.path.len() > 1 {
            self.gesture.path.clone()
        } else {
            Vec::new()
        };
        SlicerSnapshot {
            phase: self.phase,
            score: self.score,
            high_score,
            lives: self.lives,
            combo: self.combo.count,
            fruits: self.fruits.clone(),
            marks: self.marks.clone(),
            trail,
        }
    }
}

/// What the renderer reads each frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlicerSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub combo: u32,
    pub fruits: Vec<Fruit>,
    pub marks: Vec<SliceMark>,
    /// Active gesture path (empty when not slicing)
    pub trail: Vec<Vec2>,
}
