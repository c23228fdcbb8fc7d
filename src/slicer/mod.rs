//! Game A: slice fruit as it's tossed up, avoid the bombs
//!
//! Missing a fruit costs a life; cutting a bomb ends the run. Quick
//! consecutive cuts build a combo multiplier.

pub mod gesture;
pub mod state;
pub mod tick;

pub use gesture::{SliceOutcome, press_end, press_move, press_start, slice_along};
pub use state::{
    EntityKind, Fruit, FruitKind, GameEvent, Gesture, SliceMark, SlicerSnapshot, SlicerState,
};
pub use tick::{spawn_random, tick};
