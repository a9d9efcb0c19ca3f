use crate::core::random::Prng;
use crate::domain::config::{EngineConfig, EngineOptions};
use crate::systems::motion::GuidePath;

use super::perf_stats::PerfStats;
use super::setup::initialize_particle_state;
use super::state::ParticleState;
use super::ParticleEngine;

/// Seed for a run: the base seed offset by the particle count, so the same
/// base seed still diverges across counts.
fn run_seed(config: &EngineConfig) -> i32 {
    config.seed.wrapping_add(config.particle_count as i32)
}

pub(super) fn create_engine(config: EngineConfig) -> ParticleEngine {
    let count = config.particle_count;
    let mut state = ParticleState::new(count);
    let mut guide = GuidePath::new(count);
    let mut rng = Prng::new(run_seed(&config));
    initialize_particle_state(&mut state, &mut guide, &config, &mut rng);

    ParticleEngine {
        config,
        state,
        guide,
        rng,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

pub(super) fn reset(engine: &mut ParticleEngine, diff: &EngineOptions) {
    engine.config = engine.config.merge(diff);

    let count = engine.config.particle_count;
    engine.state.resize(count);
    engine.guide.resize(count);

    engine.rng = Prng::new(run_seed(&engine.config));
    initialize_particle_state(
        &mut engine.state,
        &mut engine.guide,
        &engine.config,
        &mut engine.rng,
    );
    engine.perf_stats.reset();
}
