//! Neon Arcade entry point
//!
//! On the web the library's exported classes are the entry point and this
//! binary is empty. Natively it runs both games headless with scripted
//! players, which is handy for checking balance changes from a terminal.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use neon_arcade::breaker::{self, BreakerState};
    use neon_arcade::persistence::MemoryStore;
    use neon_arcade::platform::default_seed;
    use neon_arcade::session::Session;
    use neon_arcade::slicer::{self, SlicerState};
    use neon_arcade::tuning::{BreakerTuning, SlicerTuning};
    use neon_arcade::GamePhase;

    /// Ten minutes of play at 60 Hz
    const TICK_LIMIT: u32 = 60 * 60 * 10;
    /// Half-length of the bot's swipe
    const SWIPE: f32 = 30.0;

    pub fn run_breaker(store: &MemoryStore) -> (GamePhase, u64, u32) {
        let tuning = match std::env::var("BREAKER_TUNING") {
            Ok(json) => BreakerTuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Invalid BREAKER_TUNING, using defaults: {}", e);
                BreakerTuning::default()
            }),
            Err(_) => BreakerTuning::default(),
        };
        let mut session = Session::new(
            BreakerState::new(default_seed(), tuning),
            Box::new(store.clone()),
        );
        session.start();

        let mut ticks = 0;
        while session.game().phase.is_playing() && ticks < TICK_LIMIT {
            // Track the ball with a little lag so the run eventually ends
            let target = session.game().ball.pos.x + (ticks % 97) as f32 * 0.6;
            session.input(|g| breaker::pointer_move(g, Some(target)));
            session.step();
            for event in session.input(|g| g.drain_events()) {
                log::debug!("breaker: {:?}", event);
            }
            ticks += 1;
        }

        let game = session.game();
        log::info!(
            "Breaker finished: {:?} on level {} with {} points (rating {:?}) after {} ticks",
            game.phase,
            game.level,
            game.score,
            game.rating,
            ticks
        );
        (game.phase, game.score, game.level)
    }

    pub fn run_slicer(store: &MemoryStore) -> (GamePhase, u64) {
        let tuning = match std::env::var("SLICER_TUNING") {
            Ok(json) => SlicerTuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Invalid SLICER_TUNING, using defaults: {}", e);
                SlicerTuning::default()
            }),
            Err(_) => SlicerTuning::default(),
        };
        let mut session = Session::new(
            SlicerState::new(default_seed(), tuning),
            Box::new(store.clone()),
        );
        session.start();

        let mut ticks = 0;
        while session.game().phase.is_playing() && ticks < TICK_LIMIT {
            if let Some(target) = pick_target(session.game()) {
                session.input(|g| {
                    slicer::press_start(g, Some(target - Vec2::new(SWIPE, 0.0)));
                    slicer::press_move(g, Some(target + Vec2::new(SWIPE, 0.0)));
                    slicer::press_end(g)
                });
            }
            session.step();
            for event in session.input(|g| g.drain_events()) {
                log::debug!("slicer: {:?}", event);
            }
            ticks += 1;
        }

        let game = session.game();
        log::info!(
            "Slicer finished: {:?} with {} points, {} lives left after {} ticks",
            game.phase,
            game.score,
            game.lives,
            ticks
        );
        (game.phase, game.score)
    }

    /// A fruit near the top of its arc with no bomb close enough to clip
    fn pick_target(state: &SlicerState) -> Option<Vec2> {
        state
            .fruits
            .iter()
            .filter(|f| !f.sliced && !f.kind.is_bomb() && f.vel.y.abs() < 1.0)
            .map(|f| f.pos)
            .find(|&pos| {
                state.fruits.iter().filter(|b| b.kind.is_bomb()).all(|bomb| {
                    bomb.pos.distance(pos) > bomb.radius + SWIPE * 2.0
                })
            })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Arcade (native) starting...");
    log::info!("The playable version is the wasm build; running both games headless");

    let store = neon_arcade::persistence::MemoryStore::new();
    let (phase, score, level) = headless::run_breaker(&store);
    println!("Breaker: {:?}, level {}, score {}", phase, level, score);
    let (phase, score) = headless::run_slicer(&store);
    println!("Slicer: {:?}, score {}", phase, score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
