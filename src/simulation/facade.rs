use wasm_bindgen::prelude::*;

use crate::domain::config::EngineOptions;

use super::perf_stats::PerfStats;
use super::ParticleEngine;

/// Where the particle buffers live in wasm memory.
///
/// All nine arrays hold `len_elements` entries. The seven `f32` arrays span
/// `f32_len_bytes` each, `active`/`settled` span `u8_len_bytes`. Pointers stay
/// valid until the next `reset` that changes the particle count.
#[wasm_bindgen]
pub struct StateLayout {
    x_ptr: u32,
    y_ptr: u32,
    vx_ptr: u32,
    vy_ptr: u32,
    tx_ptr: u32,
    ty_ptr: u32,
    release_ms_ptr: u32,
    active_ptr: u32,
    settled_ptr: u32,
    len_elements: u32,
    f32_len_bytes: u32,
    u8_len_bytes: u32,
}

#[wasm_bindgen]
impl StateLayout {
    #[wasm_bindgen(getter)]
    pub fn x_ptr(&self) -> u32 { self.x_ptr }
    #[wasm_bindgen(getter)]
    pub fn y_ptr(&self) -> u32 { self.y_ptr }
    #[wasm_bindgen(getter)]
    pub fn vx_ptr(&self) -> u32 { self.vx_ptr }
    #[wasm_bindgen(getter)]
    pub fn vy_ptr(&self) -> u32 { self.vy_ptr }
    #[wasm_bindgen(getter)]
    pub fn tx_ptr(&self) -> u32 { self.tx_ptr }
    #[wasm_bindgen(getter)]
    pub fn ty_ptr(&self) -> u32 { self.ty_ptr }
    #[wasm_bindgen(getter)]
    pub fn release_ms_ptr(&self) -> u32 { self.release_ms_ptr }
    #[wasm_bindgen(getter)]
    pub fn active_ptr(&self) -> u32 { self.active_ptr }
    #[wasm_bindgen(getter)]
    pub fn settled_ptr(&self) -> u32 { self.settled_ptr }

    #[wasm_bindgen(getter)]
    pub fn len_elements(&self) -> u32 { self.len_elements }
    #[wasm_bindgen(getter)]
    pub fn f32_len_bytes(&self) -> u32 { self.f32_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn u8_len_bytes(&self) -> u32 { self.u8_len_bytes }
}

/// JS handle around [`ParticleEngine`].
#[wasm_bindgen(js_name = ParticleEngine)]
pub struct ParticleEngineHandle {
    core: ParticleEngine,
}

#[wasm_bindgen(js_class = ParticleEngine)]
impl ParticleEngineHandle {
    /// Build an engine from camelCase options JSON (`""` for all defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str) -> Result<ParticleEngineHandle, JsValue> {
        let options = EngineOptions::from_json(options_json).map_err(|e| JsValue::from_str(&e))?;
        let core = ParticleEngine::new(&options);
        warn_on_unordered_schedule(&core);
        console_log!(
            "[engine] init: {} particles, {} targets, seed {}",
            core.config().particle_count,
            core.config().target_points.len(),
            core.config().seed
        );
        Ok(Self { core })
    }

    /// Advance the simulation; returns the phase code after the tick.
    pub fn tick(&mut self, delta_ms: f64) -> u8 {
        self.core.tick(delta_ms).phase.code()
    }

    /// Merge a partial options JSON and restart. `undefined` keeps the config.
    pub fn reset(&mut self, partial_json: Option<String>) -> Result<(), JsValue> {
        let diff = match partial_json {
            Some(json) => EngineOptions::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
            None => EngineOptions::default(),
        };
        self.core.reset(&diff);
        warn_on_unordered_schedule(&self.core);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.core.state().phase.as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = phaseCode)]
    pub fn phase_code(&self) -> u8 {
        self.core.state().phase.code()
    }

    #[wasm_bindgen(getter, js_name = elapsedMs)]
    pub fn elapsed_ms(&self) -> f64 {
        self.core.state().elapsed_ms
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.core.state().particle_count as u32
    }

    #[wasm_bindgen(getter, js_name = settledCount)]
    pub fn settled_count(&self) -> u32 {
        self.core.state().settled_count as u32
    }

    #[wasm_bindgen(js_name = stateLayout)]
    pub fn state_layout(&self) -> StateLayout {
        let s = self.core.state();
        let len = s.particle_count;
        StateLayout {
            x_ptr: s.x.as_ptr() as u32,
            y_ptr: s.y.as_ptr() as u32,
            vx_ptr: s.vx.as_ptr() as u32,
            vy_ptr: s.vy.as_ptr() as u32,
            tx_ptr: s.tx.as_ptr() as u32,
            ty_ptr: s.ty.as_ptr() as u32,
            release_ms_ptr: s.release_ms.as_ptr() as u32,
            active_ptr: s.active.as_ptr() as u32,
            settled_ptr: s.settled.as_ptr() as u32,
            len_elements: len as u32,
            f32_len_bytes: (len * std::mem::size_of::<f32>()) as u32,
            u8_len_bytes: len as u32,
        }
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    #[wasm_bindgen(js_name = enablePerfMetrics)]
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    #[wasm_bindgen(js_name = perfStats)]
    pub fn perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }
}

impl ParticleEngineHandle {
    pub fn core(&self) -> &ParticleEngine {
        &self.core
    }
}

fn warn_on_unordered_schedule(engine: &ParticleEngine) {
    let schedule = &engine.config().schedule;
    if !schedule.is_monotonic() {
        console_warn!(
            "[engine] phase thresholds are not ascending ({} / {} / {} / {}); phases may be skipped",
            schedule.dissolve_end_ms,
            schedule.funnel_end_ms,
            schedule.settle_end_ms,
            schedule.complete_ms
        );
    }
}
