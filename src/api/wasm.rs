use std::cell::RefCell;
use std::sync::Arc;

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

use crate::simulation::ParticleEngineHandle;
use crate::systems::sampling::PairSampleRequest;
#[cfg(not(target_arch = "wasm32"))]
use crate::systems::text::BlockFontSurface;
#[cfg(target_arch = "wasm32")]
use crate::systems::text::CanvasTextSurface;
use crate::systems::text::{SampledText, TextSampleOptions, TextSampler};

#[cfg(target_arch = "wasm32")]
type ThreadSurface = CanvasTextSurface;
#[cfg(not(target_arch = "wasm32"))]
type ThreadSurface = BlockFontSurface;

thread_local! {
    static TEXT_SAMPLER: RefCell<TextSampler<ThreadSurface>> =
        RefCell::new(TextSampler::new(ThreadSurface::new()));
}

/// Read-only view of one sampled text result.
#[wasm_bindgen]
pub struct SampledTextView {
    inner: Arc<SampledText>,
}

#[wasm_bindgen]
impl SampledTextView {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter, js_name = pointCount)]
    pub fn point_count(&self) -> u32 {
        self.inner.points.len() as u32
    }

    /// True when both views wrap the same memoized result. Views are fresh
    /// JS objects per call, so `===` cannot answer this.
    #[wasm_bindgen(js_name = isSameResult)]
    pub fn is_same_result(&self, other: &SampledTextView) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Interleaved `x, y` pairs, copied into a fresh `Float32Array`.
    pub fn points(&self) -> Float32Array {
        let flat: Vec<f32> = self.inner.points.iter().flat_map(|p| [p.x, p.y]).collect();
        Float32Array::from(flat.as_slice())
    }
}

impl SampledTextView {
    pub fn shared(&self) -> &Arc<SampledText> {
        &self.inner
    }
}

#[wasm_bindgen(js_name = createParticleEngine)]
pub fn create_particle_engine(options_json: &str) -> Result<ParticleEngineHandle, JsValue> {
    ParticleEngineHandle::new(options_json)
}

/// Rasterize `text` in `font` and sample its filled pixels. Never throws:
/// malformed options JSON is logged and yields an empty result.
#[wasm_bindgen(js_name = sampleTextPixels)]
pub fn sample_text_pixels(text: &str, font: &str, options_json: &str) -> SampledTextView {
    let options = match TextSampleOptions::from_json(options_json) {
        Ok(options) => options,
        Err(e) => {
            console_warn!("[text] {}", e);
            return SampledTextView {
                inner: Arc::new(SampledText::empty()),
            };
        }
    };
    let inner = TEXT_SAMPLER.with(|sampler| sampler.borrow_mut().sample_text_pixels(text, font, &options));
    SampledTextView { inner }
}

#[wasm_bindgen(js_name = clearSampleTextPixelsCache)]
pub fn clear_sample_text_pixels_cache() {
    let dropped = TEXT_SAMPLER.with(|sampler| {
        let mut sampler = sampler.borrow_mut();
        let n = sampler.cached_len();
        sampler.clear_cache();
        n
    });
    console_log!("[text] cleared {} cached samples", dropped);
}

/// `{ sourcePoints, targetPoints, count, seed }` in, `{ sourcePoints, targetPoints }` out.
#[wasm_bindgen(js_name = downsamplePairedPoints)]
pub fn downsample_paired_points(request_json: &str) -> Result<String, JsValue> {
    let request = PairSampleRequest::from_json(request_json).map_err(|e| JsValue::from_str(&e))?;
    serde_json::to_string(&request.run()).map_err(|e| JsValue::from_str(&e.to_string()))
}
