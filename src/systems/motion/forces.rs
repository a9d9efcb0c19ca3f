//! Velocity shaping per phase. Every function adds to velocity scaled by
//! `dt` (seconds) so results are frame-rate independent.

/// Funneling pull toward the neck.
const FUNNEL_PULL: f32 = 1.18;
/// Settling pull: `funnel_strength * (BASE + GAIN * descent) * SCALE`.
const SETTLE_PULL_BASE: f32 = 0.58;
const SETTLE_PULL_GAIN: f32 = 1.12;
const SETTLE_PULL_SCALE: f32 = 0.55;
/// Exponent of the lane weight `(1 - descent)^LANE_FALLOFF`.
const LANE_FALLOFF: f32 = 1.7;

pub const FUNNEL_ATTRACT_X: f32 = 0.62;
pub const FUNNEL_ATTRACT_Y: f32 = 0.78;
pub const SETTLE_ATTRACT_X: f32 = 0.92;
pub const SETTLE_ATTRACT_Y: f32 = 1.06;

/// Frames per second the damping factor is specified against.
const DAMPING_BASE_FPS: f32 = 60.0;

#[inline(always)]
pub fn funnel_pull(x: f32, neck_x: f32, funnel_strength: f32, dt: f32) -> f32 {
    (neck_x - x) * funnel_strength * FUNNEL_PULL * dt
}

/// Vertical progress from `baseline_y` toward `ty`, clamped to [0, 1].
#[inline(always)]
pub fn descent_progress(y: f32, baseline_y: f32, ty: f32) -> f32 {
    let span = ty - baseline_y;
    if span.abs() < 1.0 {
        return if y >= ty { 1.0 } else { 0.0 };
    }
    ((y - baseline_y) / span).clamp(0.0, 1.0)
}

/// Settling pull: toward the lane while high up, toward the target x as the
/// grain descends, getting stronger on the way down.
#[inline(always)]
pub fn settle_pull(x: f32, lane_x: f32, tx: f32, descent: f32, funnel_strength: f32, dt: f32) -> f32 {
    let lane_weight = (1.0 - descent).powf(LANE_FALLOFF);
    let blended_x = lane_x * lane_weight + tx * (1.0 - lane_weight);
    let strength = funnel_strength * (SETTLE_PULL_BASE + SETTLE_PULL_GAIN * descent) * SETTLE_PULL_SCALE;
    (blended_x - x) * strength * dt
}

/// Spring toward a guide waypoint along one axis.
#[inline(always)]
pub fn attract(pos: f32, guide: f32, attractor_strength: f32, axis_gain: f32, dt: f32) -> f32 {
    (guide - pos) * attractor_strength * axis_gain * dt
}

/// `damping^(dt * 60)`: the same wall-clock time decays velocity by the same
/// amount whatever the tick size.
#[inline]
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    damping.powf(dt * DAMPING_BASE_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_is_frame_rate_independent() {
        let one_step = damping_factor(0.975, 1.0 / 30.0);
        let two_steps = damping_factor(0.975, 1.0 / 60.0).powi(2);
        assert!((one_step - two_steps).abs() < 1e-6);
        assert!((damping_factor(0.975, 1.0 / 60.0) - 0.975).abs() < 1e-6);
    }

    #[test]
    fn descent_progress_clamps_and_handles_flat_span() {
        assert_eq!(descent_progress(-50.0, 0.0, 100.0), 0.0);
        assert_eq!(descent_progress(50.0, 0.0, 100.0), 0.5);
        assert_eq!(descent_progress(150.0, 0.0, 100.0), 1.0);
        assert_eq!(descent_progress(10.0, 10.0, 10.0), 1.0);
        assert_eq!(descent_progress(5.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn settle_pull_targets_lane_then_target() {
        // At the top the grain is pulled to the lane.
        let top = settle_pull(0.0, 10.0, 50.0, 0.0, 1.0, 1.0);
        assert!((top - 10.0 * 0.58 * 0.55).abs() < 1e-5);
        // Fully descended it is pulled to its own x.
        let bottom = settle_pull(0.0, 10.0, 50.0, 1.0, 1.0, 1.0);
        assert!((bottom - 50.0 * 1.70 * 0.55).abs() < 1e-4);
    }

    #[test]
    fn funnel_pull_points_at_neck() {
        assert!(funnel_pull(0.0, 100.0, 1.05, 0.016) > 0.0);
        assert!(funnel_pull(200.0, 100.0, 1.05, 0.016) < 0.0);
        assert_eq!(funnel_pull(100.0, 100.0, 1.05, 0.016), 0.0);
    }
}
