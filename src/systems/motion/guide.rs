//! Guide paths
//!
//! Each grain is steered through an intermediate waypoint between where it
//! dropped in and where it ends up. During funneling the waypoint slides
//! from the grain's drop-in height down to a per-grain depth inside the
//! target's vertical span; during settling it slides from there onto the
//! target itself.

use crate::domain::config::{EngineConfig, NeckMode};

/// Lane offset in split mode, as a fraction of `neck_half_width * split_lane_offset_factor`.
const SPLIT_LANE_SHARE: f32 = 0.68;

/// Per-grain guide data, sized with the particle buffers.
pub struct GuidePath {
    /// `y` recorded when the grain activated.
    pub source_start_y: Box<[f32]>,
    /// Noisy depth inside the target span the funnel guide aims for.
    pub depth_y: Box<[f32]>,
    pub target_min_y: f32,
    pub target_max_y: f32,
    pub neck_x: f32,
    lane_offset: f32,
    split: bool,
}

impl GuidePath {
    pub fn new(particle_count: usize) -> Self {
        Self {
            source_start_y: vec![0.0; particle_count].into_boxed_slice(),
            depth_y: vec![0.0; particle_count].into_boxed_slice(),
            target_min_y: 0.0,
            target_max_y: 0.0,
            neck_x: 0.0,
            lane_offset: 0.0,
            split: false,
        }
    }

    pub fn resize(&mut self, particle_count: usize) {
        if self.depth_y.len() != particle_count {
            *self = Self::new(particle_count);
        }
    }

    /// Resolve the neck for `config` once the target bounds are known.
    pub fn configure_neck(&mut self, config: &EngineConfig, neck_x: f32) {
        self.neck_x = neck_x;
        self.split = config.neck_mode == NeckMode::Split;
        self.lane_offset = config.neck_half_width * config.split_lane_offset_factor * SPLIT_LANE_SHARE;
    }

    /// Where the settle baseline sits: the top edge of the target cloud.
    #[inline]
    pub fn baseline_y(&self) -> f32 {
        self.target_min_y
    }

    /// Centre of the lane a grain bound for `tx` takes through the neck.
    #[inline]
    pub fn lane_center(&self, tx: f32) -> f32 {
        if !self.split {
            self.neck_x
        } else if tx < self.neck_x {
            self.neck_x - self.lane_offset
        } else {
            self.neck_x + self.lane_offset
        }
    }
}

/// `1 - (1 - p)^2`
#[inline]
pub fn ease_out(p: f32) -> f32 {
    let inv = 1.0 - p;
    1.0 - inv * inv
}

/// Funneling waypoint: lane centre horizontally, drop-in height easing down
/// to the grain's depth.
#[inline]
pub fn funnel_waypoint(lane_x: f32, start_y: f32, depth_y: f32, progress: f32) -> (f32, f32) {
    (lane_x, start_y + (depth_y - start_y) * ease_out(progress))
}

/// Settling waypoint: from the end of the funnel guide onto the target.
#[inline]
pub fn settle_waypoint(lane_x: f32, depth_y: f32, tx: f32, ty: f32, progress: f32) -> (f32, f32) {
    let gx = lane_x + (tx - lane_x) * progress.powf(1.38);
    let gy = depth_y + (ty - depth_y) * ease_out(progress);
    (gx, gy)
}
