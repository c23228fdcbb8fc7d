//! Slice gestures
//!
//! Press starts a path, every motion event cuts with its newest segment right
//! away, and release sweeps the whole (capped) path once more. Both cuts go
//! through [`slice_along`] so motion and release agree on what was hit.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityKind, GameEvent, SlicerState};
use super::tick::push_mark;
use crate::sim::circle_hits_path;

/// Vertical speed kept (and turned upward) when a fruit is cut
const SLICE_BOUNCE: f32 = 0.7;
/// Half-range of the sideways kick given to cut halves
const SLICE_KICK: f32 = 2.5;

/// Outcome of cutting along a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceOutcome {
    pub sliced: u32,
    pub bomb: bool,
}

/// Pointer pressed at `point` (`None` when the event carried no position)
pub fn press_start(state: &mut SlicerState, point: Option<Vec2>) {
    if !state.phase.is_playing() {
        return;
    }
    let Some(point) = point else {
        return;
    };
    state.gesture.active = true;
    state.gesture.path.clear();
    state.gesture.path.push(point);
    state.gesture.last = Some(point);
}

/// Pointer moved while pressed; cuts with the newest segment immediately
pub fn press_move(state: &mut SlicerState, point: Option<Vec2>) -> SliceOutcome {
    if !state.phase.is_playing() || !state.gesture.active {
        return SliceOutcome::default();
    }
    let Some(point) = point else {
        return SliceOutcome::default();
    };

    let cap = state.tuning.gesture_path_cap;
    state.gesture.push(point, cap);

    let outcome = match state.gesture.last {
        Some(last) => {
            let dir = point - last;
            let angle = dir.y.atan2(dir.x);
            slice_along(state, &[last, point], Some(angle))
        }
        None => SliceOutcome::default(),
    };

    // A bomb already ended the gesture
    if state.gesture.active {
        state.gesture.last = Some(point);
    }
    outcome
}

/// Pointer released (or cancelled); sweeps the recent path, then ends the gesture
pub fn press_end(state: &mut SlicerState) -> SliceOutcome {
    let mut outcome = SliceOutcome::default();

    if state.phase.is_playing() && state.gesture.path.len() >= 2 {
        let path = std::mem::take(&mut state.gesture.path);
        let (start, end) = (path[0], path[path.len() - 1]);
        let dir = end - start;
        push_mark(state, end, dir.y.atan2(dir.x));
        outcome = slice_along(state, &path, None);
    }

    state.gesture.clear();
    outcome
}

/// Cut every unsliced entity crossed by `path`.
///
/// Entities are checked newest first. A bomb ends the run on the spot and
/// anything older than it is not evaluated. With `mark_angle` set, each cut
/// fruit also gets a mark at its centre.
pub fn slice_along(
    state: &mut SlicerState,
    path: &[Vec2],
    mark_angle: Option<f32>,
) -> SliceOutcome {
    let mut outcome = SliceOutcome::default();
    if !state.phase.is_playing() || path.len() < 2 {
        return outcome;
    }

    for i in (0..state.fruits.len()).rev() {
        let fruit = &state.fruits[i];
        if fruit.sliced || !circle_hits_path(fruit.pos, fruit.radius, path) {
            continue;
        }

        if fruit.kind.is_bomb() {
            let id = fruit.id;
            state.events.push(GameEvent::BombHit { id });
            state.end_game();
            outcome.bomb = true;
            return outcome;
        }

        let points = cut_fruit(state, i);
        outcome.sliced += 1;
        if let Some(angle) = mark_angle {
            let pos = state.fruits[i].pos;
            push_mark(state, pos, angle);
        }
        log::debug!("Sliced #{} for {} points", state.fruits[i].id, points);
    }

    outcome
}

/// Mark fruit `index` as cut, kick it, and score it. Returns points awarded.
fn cut_fruit(state: &mut SlicerState, index: usize) -> u64 {
    let kick = state.rng.random_range(-SLICE_KICK..SLICE_KICK);
    let multiplier = state.combo.multiplier();

    let fruit = &mut state.fruits[index];
    fruit.sliced = true;
    fruit.vel.x = kick;
    fruit.vel.y = -fruit.vel.y.abs() * SLICE_BOUNCE;

    let base = match fruit.kind {
        EntityKind::Fruit(kind) => kind.points(),
        EntityKind::Bomb => 0,
    };
    let id = fruit.id;
    let points = base * u64::from(multiplier);

    state.score += points;
    state.combo.register_hit(state.tuning.combo_window_ticks);
    state.events.push(GameEvent::FruitSliced {
        id,
        points,
        combo: state.combo.count,
    });
    points
}
