//! Fixed timestep slicer tick
//!
//! Spawning, motion, wall bounces, misses, and the mark/combo countdowns.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityKind, FruitKind, GameEvent, SliceMark, SlicerState};
use crate::consts::EVENT_QUEUE_CAP;
use crate::sim::trim_oldest;

/// Advance the slicer by one tick. A no-op unless playing.
pub fn tick(state: &mut SlicerState) {
    if !state.phase.is_playing() {
        return;
    }

    state.time_ticks += 1;
    trim_oldest(&mut state.events, EVENT_QUEUE_CAP);

    state.spawn_timer += 1;
    if state.spawn_timer >= state.tuning.spawn_interval_ticks {
        state.spawn_timer = 0;
        spawn_random(state);
    }

    update_fruits(state);
    if !state.phase.is_playing() {
        return;
    }

    for mark in &mut state.marks {
        mark.timer = mark.timer.saturating_sub(1);
    }
    state.marks.retain(|m| m.timer > 0);

    state.combo.tick();
}

/// Launch one random entity from below the bottom edge
pub fn spawn_random(state: &mut SlicerState) -> u32 {
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let kind = if rng.random_bool(tuning.bomb_chance.clamp(0.0, 1.0)) {
        EntityKind::Bomb
    } else {
        EntityKind::Fruit(FruitKind::ALL[rng.random_range(0..FruitKind::ALL.len())])
    };
    let radius = kind.radius();

    let span = (tuning.width - radius * 2.0).max(0.0);
    let x = rng.random::<f32>() * span + radius;
    let pos = Vec2::new(x, tuning.height + radius);

    let drift = (rng.random::<f32>() - 0.5) * 2.0 * tuning.launch_drift;
    let launch = tuning.launch_speed_min
        + rng.random::<f32>() * (tuning.launch_speed_max - tuning.launch_speed_min);
    let vel = Vec2::new(drift, -launch);

    let rotation = rng.random::<f32>() * std::f32::consts::TAU;
    let rotation_speed = (rng.random::<f32>() - 0.5) * 2.0 * tuning.spin;

    let id = state.spawn(kind, pos, vel);
    if let Some(fruit) = state.fruits.last_mut() {
        fruit.rotation = rotation;
        fruit.rotation_speed = rotation_speed;
    }
    log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
    id
}

enum Fate {
    Keep,
    Expired,
    Fell,
}

fn update_fruits(state: &mut SlicerState) {
    let width = state.tuning.width;
    let height = state.tuning.height;
    let gravity = state.tuning.gravity;
    let sliced_gravity = state.tuning.sliced_gravity;
    let damping = state.tuning.wall_damping;
    let slice_duration = state.tuning.slice_duration_ticks;

    let mut i = 0;
    while i < state.fruits.len() {
        let fruit = &mut state.fruits[i];

        // Explicit Euler: move with this tick's velocity, then accelerate
        fruit.pos += fruit.vel;
        fruit.rotation += fruit.rotation_speed;

        let fate = if fruit.sliced {
            fruit.vel.y += sliced_gravity;
            fruit.slice_timer += 1;
            if fruit.slice_timer > slice_duration {
                Fate::Expired
            } else {
                Fate::Keep
            }
        } else {
            fruit.vel.y += gravity;

            let r = fruit.radius;
            if fruit.pos.x - r < 0.0 || fruit.pos.x + r > width {
                fruit.vel.x = -fruit.vel.x * damping;
                fruit.pos.x = fruit.pos.x.clamp(r, (width - r).max(r));
            }

            if fruit.pos.y - r > height {
                Fate::Fell
            } else {
                Fate::Keep
            }
        };

        match fate {
            Fate::Keep => i += 1,
            Fate::Expired => {
                state.fruits.remove(i);
            }
            Fate::Fell => {
                let fruit = state.fruits.remove(i);
                if !fruit.kind.is_bomb() {
                    lose_life(state, fruit.id);
                    if !state.phase.is_playing() {
                        return;
                    }
                }
            }
        }
    }
}

fn lose_life(state: &mut SlicerState, id: u32) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::FruitMissed {
        id,
        lives_left: state.lives,
    });
    if state.lives == 0 {
        state.end_game();
    }
}

/// Mark left by a cut; shared by motion and release handling
pub(crate) fn push_mark(state: &mut SlicerState, pos: Vec2, angle: f32) {
    let timer = state.tuning.slice_duration_ticks;
    state.marks.push(SliceMark { pos, angle, timer });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::SlicerTuning;

    fn playing() -> SlicerState {
        let mut state = SlicerState::new(12345, SlicerTuning::default());
        state.start();
        state
    }

    #[test]
    fn test_apple_first_tick() {
        let mut state = playing();
        state.spawn(
            EntityKind::Fruit(FruitKind::Apple),
            Vec2::new(100.0, 600.0),
            Vec2::new(0.0, -10.0),
        );
        tick(&mut state);
        let apple = &state.fruits[0];
        assert!((apple.vel.y - (-9.85)).abs() < 1e-4);
        assert!((apple.pos.y - 590.0).abs() < 1e-4);
        assert_eq!(apple.pos.x, 100.0);
    }

    #[test]
    fn test_tick_is_noop_unless_playing() {
        let mut state = SlicerState::new(1, SlicerTuning::default());
        state.spawn(EntityKind::Bomb, Vec2::new(50.0, 50.0), Vec2::new(1.0, 1.0));
        for phase in [GamePhase::Waiting, GamePhase::Paused, GamePhase::GameOver] {
            state.phase = phase;
            let before = state.fruits[0].pos;
            for _ in 0..120 {
                tick(&mut state);
            }
            assert_eq!(state.fruits[0].pos, before);
            assert_eq!(state.fruits.len(), 1);
            assert_eq!(state.score, 0);
            assert_eq!(state.spawn_timer, 0);
            assert_eq!(state.time_ticks, 0);
        }
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = playing();
        for _ in 0..59 {
            tick(&mut state);
        }
        assert!(state.fruits.is_empty());
        tick(&mut state);
        assert_eq!(state.fruits.len(), 1);
        assert_eq!(state.spawn_timer, 0);

        let fruit = &state.fruits[0];
        assert!(fruit.vel.y < -7.0 && fruit.vel.y > -12.5);
        assert!(fruit.pos.x >= fruit.radius && fruit.pos.x <= 400.0 - fruit.radius);
        assert!(fruit.pos.y > 600.0);
    }

    #[test]
    fn test_bomb_chance_extremes() {
        let tuning = SlicerTuning {
            bomb_chance: 1.0,
            ..Default::default()
        };
        let mut state = SlicerState::new(3, tuning);
        for _ in 0..20 {
            spawn_random(&mut state);
        }
        assert!(state.fruits.iter().all(|f| f.kind.is_bomb()));

        let tuning = SlicerTuning {
            bomb_chance: 0.0,
            ..Default::default()
        };
        let mut state = SlicerState::new(3, tuning);
        for _ in 0..20 {
            spawn_random(&mut state);
        }
        assert!(state.fruits.iter().all(|f| !f.kind.is_bomb()));
    }

    #[test]
    fn test_wall_bounce_damps_and_clamps() {
        let mut state = playing();
        state.spawn(
            EntityKind::Fruit(FruitKind::Apple),
            Vec2::new(385.0, 300.0),
            Vec2::new(5.0, 0.0),
        );
        tick(&mut state);
        let apple = &state.fruits[0];
        assert!((apple.vel.x - (-4.0)).abs() < 1e-5);
        assert!((apple.pos.x - 380.0).abs() < 1e-5);
    }

    #[test]
    fn test_missed_fruit_costs_life_but_bomb_does_not() {
        let mut state = playing();
        state.spawn(
            EntityKind::Fruit(FruitKind::Orange),
            Vec2::new(100.0, 640.0),
            Vec2::new(0.0, 5.0),
        );
        state.spawn(EntityKind::Bomb, Vec2::new(200.0, 640.0), Vec2::new(0.0, 5.0));
        tick(&mut state);
        assert!(state.fruits.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_game_once() {
        let mut state = playing();
        state.lives = 1;
        for x in [50.0, 150.0, 250.0] {
            state.spawn(
                EntityKind::Fruit(FruitKind::Apple),
                Vec2::new(x, 640.0),
                Vec2::new(0.0, 5.0),
            );
        }
        tick(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Remaining fruits were left alone once the run ended
        assert_eq!(state.fruits.len(), 2);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);

        tick(&mut state);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_sliced_fruit_expires() {
        let mut state = playing();
        state.spawn(
            EntityKind::Fruit(FruitKind::Apple),
            Vec2::new(100.0, 300.0),
            Vec2::new(0.0, -2.0),
        );
        state.fruits[0].sliced = true;
        for _ in 0..15 {
            tick(&mut state);
        }
        assert_eq!(state.fruits.len(), 1);
        tick(&mut state);
        assert!(state.fruits.is_empty());
        // Falling sliced halves never cost a life
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_marks_count_down() {
        let mut state = playing();
        push_mark(&mut state, Vec2::new(10.0, 10.0), 0.0);
        for _ in 0..14 {
            tick(&mut state);
        }
        assert_eq!(state.marks.len(), 1);
        tick(&mut state);
        assert!(state.marks.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing();
        let mut b = playing();
        for _ in 0..600 {
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.fruits.len(), b.fruits.len());
        for (fa, fb) in a.fruits.iter().zip(&b.fruits) {
            assert_eq!(fa.kind, fb.kind);
            assert_eq!(fa.pos, fb.pos);
        }
        assert_eq!(a.lives, b.lives);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = playing();
        state.events = (0..300).map(|id| GameEvent::Spawned { id }).collect();
        tick(&mut state);
        assert_eq!(state.events.len(), crate::consts::EVENT_QUEUE_CAP);
        assert_eq!(state.events[0], GameEvent::Spawned { id: 44 });

        state.end_game();
        state.start();
        assert!(state.events.is_empty());
    }
}
