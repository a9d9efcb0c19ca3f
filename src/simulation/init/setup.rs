use crate::core::geometry::{Bounds, Point};
use crate::core::random::Prng;
use crate::domain::config::EngineConfig;
use crate::systems::motion::GuidePath;

use super::state::ParticleState;

/// Idle drift before activation: `vx` in [-4, 4] px/s.
const IDLE_DRIFT_X: f32 = 4.0;
/// Idle fall before activation: `vy` in [6, 12] px/s.
const IDLE_FALL_MIN: f32 = 6.0;
const IDLE_FALL_RANGE: f32 = 6.0;

/// Vertical extent of the target cloud. The guide holds the only copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSpan {
    pub min_y: f32,
    pub max_y: f32,
}

impl TargetSpan {
    pub(crate) fn of(guide: &GuidePath) -> Self {
        Self {
            min_y: guide.target_min_y,
            max_y: guide.target_max_y,
        }
    }
}

/// Release timing derived from the phase schedule.
struct ReleaseSchedule {
    staged_base: f32,
    window: f32,
    jitter_span: f32,
}

impl ReleaseSchedule {
    fn from_config(config: &EngineConfig) -> Self {
        let s = &config.schedule;
        let staged_base = (s.dissolve_end_ms * 0.08) as f32;
        let staged_limit = (staged_base + 160.0).max((s.funnel_end_ms * 0.94) as f32);
        Self {
            staged_base,
            window: (staged_limit - staged_base).max(200.0),
            jitter_span: (s.settle_end_ms * 0.016) as f32,
        }
    }

    /// Lower targets and targets farther from the neck release later.
    #[inline]
    fn release_ms(&self, normalized_y: f32, normalized_x: f32, noise: f32) -> f32 {
        self.staged_base
            + normalized_y * self.window
            + normalized_x * self.window * 0.34
            + noise * self.jitter_span
    }
}

/// Populate every per-particle buffer for a fresh run.
///
/// Source and target points are assigned by index modulo their list length,
/// so the mapping is exact and reproducible whatever the counts. Draw order
/// from `rng` is fixed per particle: jitter x, jitter y, drift x, fall y,
/// release noise, guide depth.
pub(crate) fn initialize_particle_state(
    state: &mut ParticleState,
    guide: &mut GuidePath,
    config: &EngineConfig,
    rng: &mut Prng,
) {
    let sources = &config.source_points;
    let targets = &config.target_points;

    let bounds = Bounds::from_points(targets);
    let neck_x = config.neck_x.unwrap_or_else(|| bounds.center_x());
    let span_y = bounds.height();
    let extent_x = (neck_x - bounds.min_x).max(bounds.max_x - neck_x).max(1.0);

    guide.target_min_y = bounds.min_y;
    guide.target_max_y = bounds.max_y;
    guide.configure_neck(config, neck_x);

    let release = ReleaseSchedule::from_config(config);
    let jitter = config.jitter;

    for i in 0..state.particle_count {
        let source = cycled(sources, i);
        let target = cycled(targets, i);

        state.x[i] = source.x + (rng.next_f32() - 0.5) * jitter;
        state.y[i] = source.y + (rng.next_f32() - 0.5) * jitter;
        state.vx[i] = (rng.next_f32() * 2.0 - 1.0) * IDLE_DRIFT_X;
        state.vy[i] = IDLE_FALL_MIN + rng.next_f32() * IDLE_FALL_RANGE;
        state.tx[i] = target.x;
        state.ty[i] = target.y;

        let normalized_y = if span_y > 0.0 {
            ((target.y - bounds.min_y) / span_y).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let normalized_x = ((target.x - neck_x).abs() / extent_x).clamp(0.0, 1.0);
        state.release_ms[i] = release.release_ms(normalized_y, normalized_x, rng.next_f32());

        state.active[i] = 0;
        state.settled[i] = 0;

        guide.source_start_y[i] = state.y[i];
        guide.depth_y[i] = bounds.min_y + (target.y - bounds.min_y) * (0.35 + 0.4 * rng.next_f32());
    }

    state.rewind();
}

#[inline]
fn cycled(points: &[Point], i: usize) -> Point {
    if points.is_empty() {
        Point::ORIGIN
    } else {
        points[i % points.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::EngineOptions;

    fn config(count: f64, sources: Vec<Point>, targets: Vec<Point>) -> EngineConfig {
        EngineConfig::resolve(&EngineOptions {
            particle_count: Some(count),
            source_points: Some(sources),
            target_points: Some(targets),
            seed: Some(42.0),
            ..Default::default()
        })
    }

    fn setup(config: &EngineConfig) -> (ParticleState, GuidePath) {
        let mut state = ParticleState::new(config.particle_count);
        let mut guide = GuidePath::new(config.particle_count);
        let mut rng = Prng::new(config.seed);
        initialize_particle_state(&mut state, &mut guide, config, &mut rng);
        (state, guide)
    }

    #[test]
    fn targets_cycle_by_index() {
        let targets = vec![Point::new(1.0, 10.0), Point::new(2.0, 20.0), Point::new(3.0, 30.0)];
        let cfg = config(7.0, vec![Point::ORIGIN], targets.clone());
        let (state, guide) = setup(&cfg);
        for i in 0..7 {
            assert_eq!(state.tx[i], targets[i % 3].x);
            assert_eq!(state.ty[i], targets[i % 3].y);
        }
        assert_eq!(TargetSpan::of(&guide), TargetSpan { min_y: 10.0, max_y: 30.0 });
    }

    #[test]
    fn positions_start_within_jitter_of_source() {
        let cfg = config(64.0, vec![Point::new(50.0, 60.0)], vec![Point::new(0.0, 0.0)]);
        let (state, _) = setup(&cfg);
        let half = cfg.jitter * 0.5;
        for i in 0..64 {
            assert!((state.x[i] - 50.0).abs() <= half);
            assert!((state.y[i] - 60.0).abs() <= half);
            assert!((-4.0..=4.0).contains(&state.vx[i]));
            assert!((6.0..=12.0).contains(&state.vy[i]));
            assert_eq!(state.active[i], 0);
            assert_eq!(state.settled[i], 0);
        }
    }

    #[test]
    fn deeper_targets_release_later() {
        // Same x, so only the vertical term and noise differ.
        let targets = vec![Point::new(0.0, 0.0), Point::new(0.0, 100.0)];
        let cfg = config(2.0, vec![Point::ORIGIN], targets);
        let (state, _) = setup(&cfg);

        let schedule = cfg.schedule;
        let base = (schedule.dissolve_end_ms * 0.08) as f32;
        let noise_cap = (schedule.settle_end_ms * 0.016) as f32;
        assert!(state.release_ms[0] >= base && state.release_ms[0] < base + noise_cap);
        // Window at default timing: max(64 + 160, 2068) - 64 = 2004ms.
        assert!(state.release_ms[1] >= base + 2004.0 - 0.01);
        assert!(state.release_ms[1] > state.release_ms[0]);
    }

    #[test]
    fn guide_depth_sits_inside_target_span() {
        let targets: Vec<Point> = (0..10).map(|i| Point::new(i as f32, 100.0 + i as f32 * 10.0)).collect();
        let cfg = config(10.0, vec![Point::ORIGIN], targets);
        let (state, guide) = setup(&cfg);
        for i in 0..10 {
            assert!(guide.depth_y[i] >= 100.0);
            assert!(guide.depth_y[i] <= state.ty[i]);
        }
        assert_eq!(guide.neck_x, 4.5);
    }

    #[test]
    fn same_seed_same_initial_state() {
        let cfg = config(32.0, vec![Point::new(3.0, 4.0)], vec![Point::new(9.0, 9.0), Point::new(1.0, 30.0)]);
        let (a, _) = setup(&cfg);
        let (b, _) = setup(&cfg);
        assert_eq!(a.x, b.x);
        assert_eq!(a.vy, b.vy);
        assert_eq!(a.release_ms, b.release_ms);
    }
}
