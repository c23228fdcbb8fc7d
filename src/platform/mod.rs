//! Platform abstraction layer
//!
//! The simulation itself is platform-free. Browser glue lives in `web`:
//! - Fixed-interval timer driving the session
//! - Pointer translation from display to logical coordinates
//! - LocalStorage-backed high scores
//! - Snapshot JSON handed to the JS renderer

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a new run. Wall clock on the web, fixed natively so headless
/// runs repeat.
pub fn default_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5eed
    }
}
