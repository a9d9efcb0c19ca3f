use crate::domain::phase::{resolve_phase, Phase};
use crate::systems::motion::{snap_to_targets, step_particles};

use super::{ParticleEngine, PerfTimer};

/// Longest step integrated in one call; a backgrounded tab can hand us
/// seconds at once, which would blow up explicit Euler.
pub const MAX_TICK_MS: f64 = 64.0;

pub(super) fn tick(engine: &mut ParticleEngine, delta_ms: f64) {
    if engine.state.phase == Phase::Done || !delta_ms.is_finite() || delta_ms <= 0.0 {
        return;
    }

    let perf_on = engine.perf_enabled;
    let tick_start = PerfTimer::start_if(perf_on);

    let delta_ms = delta_ms.min(MAX_TICK_MS);
    let state = &mut engine.state;
    state.elapsed_ms += delta_ms;
    let phase = resolve_phase(state.elapsed_ms, &engine.config.schedule);
    state.phase = phase;

    if phase == Phase::Done {
        snap_to_targets(state);
    } else if state.particle_count > 0 {
        let motion_start = PerfTimer::start_if(perf_on);
        let dt = (delta_ms / 1000.0) as f32;
        step_particles(state, &mut engine.guide, &engine.config, phase, dt);
        if let Some(t) = motion_start {
            engine.perf_stats.motion_ms = t.elapsed_ms();
        }
    }

    if let Some(t) = tick_start {
        let stats = &mut engine.perf_stats;
        stats.tick_ms = t.elapsed_ms();
        stats.active_particles = engine.state.active_count() as u32;
        stats.settled_particles = engine.state.settled_count as u32;
        stats.ticks = stats.ticks.saturating_add(1);
    }
}
