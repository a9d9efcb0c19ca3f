//! Text rasterizer
//!
//! Renders a string offscreen and samples its filled pixels into a point
//! cloud. Results are memoized per sampler on the full normalized option set;
//! a repeat call hands back the same `Arc`. Nothing here fails: degenerate
//! input or a missing drawing surface degrade to an empty result.

mod block_font;
#[cfg(target_arch = "wasm32")]
mod canvas;
mod layout;
mod scan;
mod surface;

pub use block_font::BlockFontSurface;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasTextSurface;
pub use layout::{layout_text, parse_font_px, TextLayout};
pub use scan::sample_alpha;
pub use surface::{AlphaBitmap, RenderJob, TextSurface};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::core::geometry::Point;

pub const DEFAULT_SAMPLE_STEP: u32 = 2;
pub const DEFAULT_PADDING: u32 = 8;
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 100;

/// Largest bitmap side the rasterizer will allocate.
pub const MAX_BITMAP_SIDE: u32 = 8192;
pub const MAX_BITMAP_PIXELS: u64 = 4096 * 4096;

/// Caller-facing options; every field is optional in JSON.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSampleOptions {
    pub sample_step: Option<f64>,
    pub padding: Option<f64>,
    pub alpha_threshold: Option<f64>,
    pub max_width_px: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing_px: Option<f64>,
}

impl TextSampleOptions {
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| format!("Invalid text sample options: {}", e))
    }

    pub fn normalize(&self) -> NormalizedTextOptions {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        let positive = |v: Option<f64>| finite(v).filter(|v| *v > 0.0).map(|v| v as f32);

        NormalizedTextOptions {
            sample_step: finite(self.sample_step)
                .map(|v| v.floor().clamp(1.0, MAX_BITMAP_SIDE as f64) as u32)
                .unwrap_or(DEFAULT_SAMPLE_STEP),
            padding: finite(self.padding)
                .map(|v| v.floor().clamp(0.0, MAX_BITMAP_SIDE as f64) as u32)
                .unwrap_or(DEFAULT_PADDING),
            alpha_threshold: finite(self.alpha_threshold)
                .map(|v| v.round().clamp(0.0, 255.0) as u8)
                .unwrap_or(DEFAULT_ALPHA_THRESHOLD),
            max_width_px: positive(self.max_width_px),
            line_height_px: positive(self.line_height_px),
            // `+ 0.0` folds -0.0 into 0.0 for the cache key.
            letter_spacing_px: finite(self.letter_spacing_px).map_or(0.0, |v| v as f32 + 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedTextOptions {
    pub sample_step: u32,
    pub padding: u32,
    pub alpha_threshold: u8,
    pub max_width_px: Option<f32>,
    pub line_height_px: Option<f32>,
    pub letter_spacing_px: f32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SampleKey {
    text: String,
    font: String,
    sample_step: u32,
    padding: u32,
    alpha_threshold: u8,
    max_width_bits: Option<u32>,
    line_height_bits: Option<u32>,
    letter_spacing_bits: u32,
}

impl SampleKey {
    fn new(text: &str, font: &str, o: &NormalizedTextOptions) -> Self {
        Self {
            text: text.to_string(),
            font: font.to_string(),
            sample_step: o.sample_step,
            padding: o.padding,
            alpha_threshold: o.alpha_threshold,
            max_width_bits: o.max_width_px.map(f32::to_bits),
            line_height_bits: o.line_height_px.map(f32::to_bits),
            letter_spacing_bits: o.letter_spacing_px.to_bits(),
        }
    }
}

/// Sampled filled pixels of a rendered string, in bitmap pixel coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledText {
    pub points: Vec<Point>,
    pub width: u32,
    pub height: u32,
}

impl SampledText {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub struct TextSampler<S: TextSurface> {
    surface: S,
    cache: HashMap<SampleKey, Arc<SampledText>>,
}

impl<S: TextSurface> TextSampler<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            cache: HashMap::new(),
        }
    }

    /// Number of memoized results.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn sample_text_pixels(
        &mut self,
        text: &str,
        font: &str,
        options: &TextSampleOptions,
    ) -> Arc<SampledText> {
        if text.is_empty() || font.trim().is_empty() {
            return Arc::new(SampledText::empty());
        }

        let normalized = options.normalize();
        let key = SampleKey::new(text, font, &normalized);
        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit);
        }

        match self.rasterize(text, font, &normalized) {
            Some(sampled) => {
                let sampled = Arc::new(sampled);
                self.cache.insert(key, Arc::clone(&sampled));
                sampled
            }
            None => {
                console_warn!("[text] surface unavailable for font '{}'", font);
                Arc::new(SampledText::empty())
            }
        }
    }

    fn rasterize(&mut self, text: &str, font: &str, o: &NormalizedTextOptions) -> Option<SampledText> {
        let layout = layout_text(
            &mut self.surface,
            text,
            font,
            o.max_width_px,
            o.line_height_px,
            o.letter_spacing_px,
        )?;

        let pad = o.padding as f64;
        let width = (layout.max_line_width as f64).ceil().max(0.0) + 2.0 * pad;
        let height = (layout.lines.len() as f64 * layout.line_height as f64).ceil() + 2.0 * pad;
        if !(width.is_finite() && height.is_finite())
            || width > MAX_BITMAP_SIDE as f64
            || height > MAX_BITMAP_SIDE as f64
            || width * height > MAX_BITMAP_PIXELS as f64
        {
            return None;
        }
        let (width, height) = (width as u32, height as u32);

        let bitmap = self.surface.render(&RenderJob {
            font,
            lines: &layout.lines,
            width,
            height,
            padding: o.padding as f32,
            line_height: layout.line_height,
            letter_spacing: o.letter_spacing_px,
        })?;

        Some(SampledText {
            points: sample_alpha(&bitmap, o.sample_step, o.alpha_threshold),
            width,
            height,
        })
    }
}

impl Default for TextSampler<BlockFontSurface> {
    fn default() -> Self {
        Self::new(BlockFontSurface::new())
    }
}
