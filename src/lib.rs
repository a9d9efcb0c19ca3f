//! Sandglass Engine - text-to-sand particle transition in WASM
//!
//! A string is rasterized into a point cloud, optionally thinned to a
//! particle budget, and a seeded engine then pours grains from a source
//! cloud through a funnel neck onto the text, one `tick` per frame.
//!
//! Architecture:
//! - core/        - Macros, logging, PRNG, geometry
//! - domain/      - Configuration and the phase schedule
//! - systems/     - Motion model, text rasterizer, pair sampler
//! - simulation/  - ParticleEngine façade (setup, tick, perf)
//! - api/         - Free JS functions

// Utils with safety/logging macros (must be first for macro scoping!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module (panic hook + banner)
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Sandglass WASM engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::geometry::Point;
pub use crate::core::random::Prng;
pub use crate::domain::config::{EngineConfig, EngineOptions, NeckMode, Viewport};
pub use crate::domain::phase::{resolve_phase, Phase, PhaseSchedule};
pub use crate::simulation::{ParticleEngine, ParticleEngineHandle, ParticleState, PerfStats, StateLayout};
pub use crate::systems::sampling::{downsample_paired_points, PairSampleRequest, PairedPoints};
pub use crate::systems::text::{
    BlockFontSurface, SampledText, TextSampleOptions, TextSampler, TextSurface,
};
