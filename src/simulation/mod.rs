//! ParticleEngine - the simulation façade
//!
//! Owns the resolved config, the particle buffers, the guide scratch and the
//! PRNG. `tick` advances time and delegates to the motion model; `reset`
//! merges a config diff and re-seeds. The façade only orchestrates: setup is
//! in init/, the per-tick flow in step/, metrics in perf/.

use crate::core::random::Prng;
use crate::domain::config::{EngineConfig, EngineOptions};
use crate::systems::motion::GuidePath;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/setup.rs"]
mod setup;
#[path = "init/reset.rs"]
mod reset;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/tick.rs"]
mod tick;
mod state;
mod facade;

pub use facade::{ParticleEngineHandle, StateLayout};
pub use perf_stats::PerfStats;
pub use setup::TargetSpan;
pub use state::ParticleState;
pub use tick::MAX_TICK_MS;

use perf_timer::PerfTimer;

pub struct ParticleEngine {
    config: EngineConfig,
    state: ParticleState,
    guide: GuidePath,
    rng: Prng,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl ParticleEngine {
    /// Resolve `options` and initialize every particle.
    pub fn new(options: &EngineOptions) -> Self {
        reset::create_engine(EngineConfig::resolve(options))
    }

    pub fn from_config(config: EngineConfig) -> Self {
        reset::create_engine(config)
    }

    /// Live view of the simulation; valid until the next `tick`/`reset`.
    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Vertical extent of the current target cloud.
    pub fn target_span(&self) -> TargetSpan {
        TargetSpan::of(&self.guide)
    }

    /// Advance by `delta_ms` (clamped to 64ms). Ignored once done or when
    /// `delta_ms` is non-finite or not positive.
    pub fn tick(&mut self, delta_ms: f64) -> &ParticleState {
        tick::tick(self, delta_ms);
        &self.state
    }

    /// Merge `diff` into the config and restart from the first frame.
    ///
    /// Buffers are reallocated only when the particle count changes; the PRNG
    /// is always re-seeded with `seed + particle_count`.
    pub fn reset(&mut self, diff: &EngineOptions) {
        reset::reset(self, diff);
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
