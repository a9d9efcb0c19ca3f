//! Engine configuration
//!
//! `EngineOptions` is what callers hand in (JSON from the UI, or built in
//! Rust): every field optional. `EngineConfig` is the fully resolved, typed
//! form the engine runs on. `resolve` fills defaults; `merge` applies an
//! `EngineOptions` as a diff over an existing config (used by `reset`).

use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;

use super::phase::PhaseSchedule;

/// Upper bound on particles per engine; keeps a bad `particleCount` from
/// allocating gigabytes.
pub const MAX_PARTICLES: usize = 1_000_000;

pub const DEFAULT_SEED: i32 = 1;
pub const DEFAULT_JITTER: f32 = 2.0;
pub const DEFAULT_GRAVITY: f32 = 165.0;
pub const DEFAULT_DAMPING: f32 = 0.975;
pub const DEFAULT_ATTRACTOR_STRENGTH: f32 = 6.0;
pub const DEFAULT_FUNNEL_STRENGTH: f32 = 1.05;
pub const DEFAULT_NECK_HALF_WIDTH: f32 = 14.0;
pub const DEFAULT_SPLIT_LANE_OFFSET_FACTOR: f32 = 1.0;

/// Shape of the neck the grains pass through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeckMode {
    /// One lane centred on `neck_x`.
    #[default]
    Single,
    /// Two lanes either side of `neck_x`; each grain takes the side its target is on.
    Split,
}

/// Clamp region for particle positions (a 10px margin is added on every side).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Partial configuration, as supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    pub particle_count: Option<f64>,
    pub source_points: Option<Vec<Point>>,
    pub target_points: Option<Vec<Point>>,
    pub seed: Option<f64>,
    pub jitter: Option<f32>,
    pub gravity: Option<f32>,
    pub damping: Option<f32>,
    pub attractor_strength: Option<f32>,
    pub funnel_strength: Option<f32>,
    pub neck_x: Option<f32>,
    pub neck_half_width: Option<f32>,
    pub neck_mode: Option<NeckMode>,
    pub split_lane_offset_factor: Option<f32>,
    pub dissolve_end_ms: Option<f64>,
    pub funnel_end_ms: Option<f64>,
    pub settle_end_ms: Option<f64>,
    pub complete_ms: Option<f64>,
    pub viewport: Option<Viewport>,
}

impl EngineOptions {
    /// Parse camelCase JSON; an empty string means "no overrides".
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| format!("Invalid engine options: {}", e))
    }
}

/// Fully resolved configuration of one engine.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub source_points: Vec<Point>,
    pub target_points: Vec<Point>,
    pub seed: i32,
    pub jitter: f32,
    pub gravity: f32,
    pub damping: f32,
    pub attractor_strength: f32,
    pub funnel_strength: f32,
    /// `None` centres the neck on the target bounds.
    pub neck_x: Option<f32>,
    pub neck_half_width: f32,
    pub neck_mode: NeckMode,
    pub split_lane_offset_factor: f32,
    pub schedule: PhaseSchedule,
    pub viewport: Option<Viewport>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: 0,
            source_points: vec![Point::ORIGIN],
            target_points: vec![Point::ORIGIN],
            seed: DEFAULT_SEED,
            jitter: DEFAULT_JITTER,
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            attractor_strength: DEFAULT_ATTRACTOR_STRENGTH,
            funnel_strength: DEFAULT_FUNNEL_STRENGTH,
            neck_x: None,
            neck_half_width: DEFAULT_NECK_HALF_WIDTH,
            neck_mode: NeckMode::Single,
            split_lane_offset_factor: DEFAULT_SPLIT_LANE_OFFSET_FACTOR,
            schedule: PhaseSchedule::default(),
            viewport: None,
        }
    }
}

impl EngineConfig {
    /// Fill every unset field with its default and normalize the point lists.
    ///
    /// Source points fall back to the origin when nothing finite is left;
    /// target points fall back to the normalized source points. Neither list
    /// is ever empty afterwards.
    pub fn resolve(options: &EngineOptions) -> Self {
        let source_points =
            normalize_points(options.source_points.as_deref().unwrap_or(&[]), Point::ORIGIN);
        let target_points =
            normalize_targets(options.target_points.as_deref().unwrap_or(&[]), &source_points);

        let mut config = Self {
            source_points,
            target_points,
            ..Self::default()
        };
        config.apply_scalars(options);
        config
    }

    /// Apply `diff` over this config, returning the merged config.
    ///
    /// Scalars replace field by field. Point lists are re-normalized only when
    /// the diff carries them; a replacement target list that normalizes to
    /// nothing falls back to the (possibly new) source list.
    pub fn merge(&self, diff: &EngineOptions) -> Self {
        let mut merged = self.clone();
        if let Some(source) = diff.source_points.as_deref() {
            merged.source_points = normalize_points(source, Point::ORIGIN);
        }
        if let Some(target) = diff.target_points.as_deref() {
            merged.target_points = normalize_targets(target, &merged.source_points);
        }
        merged.apply_scalars(diff);
        merged
    }

    fn apply_scalars(&mut self, o: &EngineOptions) {
        if let Some(count) = o.particle_count {
            self.particle_count = coerce_particle_count(count);
        }
        if let Some(seed) = o.seed.and_then(coerce_seed) {
            self.seed = seed;
        }
        set_finite(&mut self.jitter, o.jitter);
        set_finite(&mut self.gravity, o.gravity);
        if let Some(damping) = o.damping.filter(|v| v.is_finite()) {
            self.damping = damping.clamp(0.0, 1.0);
        }
        set_finite(&mut self.attractor_strength, o.attractor_strength);
        set_finite(&mut self.funnel_strength, o.funnel_strength);
        if let Some(neck_x) = o.neck_x.filter(|v| v.is_finite()) {
            self.neck_x = Some(neck_x);
        }
        set_finite(&mut self.neck_half_width, o.neck_half_width);
        if let Some(mode) = o.neck_mode {
            self.neck_mode = mode;
        }
        set_finite(&mut self.split_lane_offset_factor, o.split_lane_offset_factor);

        let s = &mut self.schedule;
        set_finite(&mut s.dissolve_end_ms, o.dissolve_end_ms);
        set_finite(&mut s.funnel_end_ms, o.funnel_end_ms);
        set_finite(&mut s.settle_end_ms, o.settle_end_ms);
        set_finite(&mut s.complete_ms, o.complete_ms);

        if let Some(viewport) = o.viewport {
            if viewport.width.is_finite() && viewport.height.is_finite() {
                self.viewport = Some(viewport);
            }
        }
    }
}

trait Finite: Copy {
    fn finite(self) -> bool;
}

impl Finite for f32 {
    fn finite(self) -> bool {
        self.is_finite()
    }
}

impl Finite for f64 {
    fn finite(self) -> bool {
        self.is_finite()
    }
}

#[inline]
fn set_finite<T: Finite>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value.filter(|v| v.finite()) {
        *slot = v;
    }
}

/// Floor to a non-negative integer; non-finite and negative counts become 0.
pub fn coerce_particle_count(count: f64) -> usize {
    if !count.is_finite() {
        return 0;
    }
    (count.floor().max(0.0) as usize).min(MAX_PARTICLES)
}

/// Floor a JS number to a 32-bit seed (wrapping); `None` when non-finite.
pub fn coerce_seed(seed: f64) -> Option<i32> {
    seed.is_finite().then(|| seed.floor() as i64 as i32)
}

/// Drop points with a non-finite coordinate; an empty result becomes `[fallback]`.
pub fn normalize_points(points: &[Point], fallback: Point) -> Vec<Point> {
    let normalized: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    if normalized.is_empty() {
        vec![fallback]
    } else {
        normalized
    }
}

fn normalize_targets(points: &[Point], source_points: &[Point]) -> Vec<Point> {
    let normalized: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    if normalized.is_empty() {
        source_points.to_vec()
    } else {
        normalized
    }
}
