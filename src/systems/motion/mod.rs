//! Motion model - per-tick integration of active grains
//!
//! Order per grain: activation gate, gravity, phase pull (funnel/settle),
//! guide attraction, damping, explicit Euler, soft boundary clamp, settle test.
//! Nothing here allocates; all scratch lives in `GuidePath`.

mod boundary;
mod forces;
mod guide;

pub use boundary::ClampBox;
pub use forces::{damping_factor, descent_progress};
pub use guide::{ease_out, funnel_waypoint, settle_waypoint, GuidePath};

use crate::domain::config::EngineConfig;
use crate::domain::phase::Phase;
use crate::simulation::ParticleState;

use forces::{
    attract, funnel_pull, settle_pull, FUNNEL_ATTRACT_X, FUNNEL_ATTRACT_Y, SETTLE_ATTRACT_X,
    SETTLE_ATTRACT_Y,
};

/// Squared distance under which a settling grain counts as arrived (1.5px).
pub const SETTLE_RADIUS_SQ: f32 = 2.25;

/// Advance every grain by `dt` seconds in `phase`.
///
/// `phase` must not be `Done`; the terminal state is reached through
/// `snap_to_targets` instead. Recomputes `settled_count` from the flags.
pub fn step_particles(
    state: &mut ParticleState,
    guide: &mut GuidePath,
    config: &EngineConfig,
    phase: Phase,
    dt: f32,
) {
    let elapsed = state.elapsed_ms;
    let progress = match phase {
        Phase::Funneling => config.schedule.funnel_progress(elapsed),
        Phase::Settling => config.schedule.settle_progress(elapsed),
        _ => 0.0,
    };

    let gravity_dv = config.gravity * dt;
    let decay = damping_factor(config.damping, dt);
    let funnel = config.funnel_strength;
    let attractor = config.attractor_strength;
    let neck_x = guide.neck_x;
    let baseline_y = guide.baseline_y();
    let clamp = ClampBox::from_viewport(config.viewport);

    let n = state.particle_count;
    for i in 0..n {
        if *fast!(state.active, [i]) == 0 {
            if elapsed < *fast!(state.release_ms, [i]) as f64 {
                continue;
            }
            fast!(state.active, [i] = 1);
            fast!(guide.source_start_y, [i] = *fast!(state.y, [i]));
        }

        let mut x = *fast!(state.x, [i]);
        let mut y = *fast!(state.y, [i]);
        let mut vx = *fast!(state.vx, [i]);
        let mut vy = *fast!(state.vy, [i]) + gravity_dv;
        let tx = *fast!(state.tx, [i]);
        let ty = *fast!(state.ty, [i]);

        match phase {
            Phase::Funneling => {
                vx += funnel_pull(x, neck_x, funnel, dt);

                let start_y = *fast!(guide.source_start_y, [i]);
                let depth_y = *fast!(guide.depth_y, [i]);
                let (gx, gy) = funnel_waypoint(guide.lane_center(tx), start_y, depth_y, progress);
                vx += attract(x, gx, attractor, FUNNEL_ATTRACT_X, dt);
                vy += attract(y, gy, attractor, FUNNEL_ATTRACT_Y, dt);
            }
            Phase::Settling => {
                let lane_x = guide.lane_center(tx);
                let descent = descent_progress(y, baseline_y, ty);
                vx += settle_pull(x, lane_x, tx, descent, funnel, dt);

                let depth_y = *fast!(guide.depth_y, [i]);
                let (gx, gy) = settle_waypoint(lane_x, depth_y, tx, ty, progress);
                vx += attract(x, gx, attractor, SETTLE_ATTRACT_X, dt);
                vy += attract(y, gy, attractor, SETTLE_ATTRACT_Y, dt);
            }
            Phase::Dissolving | Phase::Done => {}
        }

        vx *= decay;
        vy *= decay;
        x += vx * dt;
        y += vy * dt;
        clamp.apply(&mut x, &mut y, &mut vx, &mut vy);

        fast!(state.x, [i] = x);
        fast!(state.y, [i] = y);
        fast!(state.vx, [i] = vx);
        fast!(state.vy, [i] = vy);

        if phase == Phase::Settling && *fast!(state.settled, [i]) == 0 {
            let dx = tx - x;
            let dy = ty - y;
            if dx * dx + dy * dy <= SETTLE_RADIUS_SQ {
                fast!(state.settled, [i] = 1);
            }
        }
    }

    state.recount_settled();
}

/// Terminal absorption: every grain lands exactly on its target.
pub fn snap_to_targets(state: &mut ParticleState) {
    state.x.copy_from_slice(&state.tx);
    state.y.copy_from_slice(&state.ty);
    state.vx.fill(0.0);
    state.vy.fill(0.0);
    state.active.fill(1);
    state.settled.fill(1);
    state.settled_count = state.particle_count;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::domain::config::{EngineOptions, Viewport};

    fn single(x: f32, y: f32, tx: f32, ty: f32) -> (ParticleState, GuidePath) {
        let mut state = ParticleState::new(1);
        state.x[0] = x;
        state.y[0] = y;
        state.tx[0] = tx;
        state.ty[0] = ty;
        let mut guide = GuidePath::new(1);
        guide.source_start_y[0] = y;
        guide.depth_y[0] = ty;
        (state, guide)
    }

    fn config() -> EngineConfig {
        EngineConfig::resolve(&EngineOptions {
            particle_count: Some(1.0),
            target_points: Some(vec![Point::new(0.0, 100.0)]),
            ..Default::default()
        })
    }

    #[test]
    fn dormant_grains_do_not_move() {
        let (mut state, mut guide) = single(5.0, 5.0, 0.0, 100.0);
        state.release_ms[0] = 500.0;
        state.vy[0] = 9.0;
        state.elapsed_ms = 100.0;
        step_particles(&mut state, &mut guide, &config(), Phase::Dissolving, 0.016);
        assert_eq!(state.active[0], 0);
        assert_eq!((state.x[0], state.y[0], state.vy[0]), (5.0, 5.0, 9.0));
    }

    #[test]
    fn release_activates_and_records_drop_in() {
        let (mut state, mut guide) = single(5.0, 42.0, 0.0, 100.0);
        guide.source_start_y[0] = 0.0;
        state.release_ms[0] = 50.0;
        state.elapsed_ms = 50.0;
        step_particles(&mut state, &mut guide, &config(), Phase::Dissolving, 0.016);
        assert_eq!(state.active[0], 1);
        assert_eq!(guide.source_start_y[0], 42.0);
        // Gravity pulled it down.
        assert!(state.y[0] > 42.0);
    }

    #[test]
    fn funneling_pulls_toward_neck() {
        let (mut state, mut guide) = single(0.0, 0.0, 0.0, 100.0);
        guide.neck_x = 80.0;
        state.elapsed_ms = 900.0;
        step_particles(&mut state, &mut guide, &config(), Phase::Funneling, 0.016);
        assert!(state.vx[0] > 0.0);
        assert!(state.x[0] > 0.0);
    }

    #[test]
    fn settled_flag_sticks_and_is_counted() {
        let (mut state, mut guide) = single(0.5, 100.5, 0.0, 100.0);
        state.elapsed_ms = 2500.0;
        let cfg = config();
        step_particles(&mut state, &mut guide, &cfg, Phase::Settling, 0.001);
        assert_eq!(state.settled[0], 1);
        assert_eq!(state.settled_count, 1);

        // Knock it away; it stays settled.
        state.x[0] = 300.0;
        step_particles(&mut state, &mut guide, &cfg, Phase::Settling, 0.001);
        assert_eq!(state.settled[0], 1);
        assert_eq!(state.settled_count, 1);
    }

    #[test]
    fn viewport_keeps_grains_in_bounds() {
        let cfg = EngineConfig::resolve(&EngineOptions {
            particle_count: Some(1.0),
            gravity: Some(50_000.0),
            viewport: Some(Viewport { width: 100.0, height: 100.0 }),
            ..Default::default()
        });
        let (mut state, mut guide) = single(50.0, 95.0, 50.0, 0.0);
        for _ in 0..20 {
            step_particles(&mut state, &mut guide, &cfg, Phase::Dissolving, 0.064);
            assert!(state.y[0] <= 110.0);
        }
        assert!(state.vy[0] <= 0.0 || state.y[0] < 110.0);
    }

    #[test]
    fn snap_lands_exactly_on_targets() {
        let mut state = ParticleState::new(3);
        for i in 0..3 {
            state.x[i] = i as f32 * 7.3;
            state.tx[i] = 100.0 + i as f32;
            state.ty[i] = -4.0 * i as f32;
            state.vx[i] = 3.0;
        }
        snap_to_targets(&mut state);
        assert_eq!(state.x, state.tx);
        assert_eq!(state.y, state.ty);
        assert!(state.vx.iter().all(|&v| v == 0.0));
        assert!(state.active.iter().all(|&a| a == 1));
        assert_eq!(state.settled_count, 3);
    }
}
