use super::perf_stats::PerfStats;
use super::ParticleEngine;

pub(super) fn enable_perf_metrics(engine: &mut ParticleEngine, enabled: bool) {
    engine.perf_enabled = enabled;
    if !enabled {
        engine.perf_stats.reset();
    }
}

pub(super) fn perf_stats(engine: &ParticleEngine) -> PerfStats {
    engine.perf_stats.clone()
}
