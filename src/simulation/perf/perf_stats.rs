use wasm_bindgen::prelude::*;

/// Snapshot of the most recent tick. Only filled while perf metrics are on.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) tick_ms: f64,
    pub(super) motion_ms: f64,
    pub(super) active_particles: u32,
    pub(super) settled_particles: u32,
    pub(super) ticks: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn motion_ms(&self) -> f64 { self.motion_ms }
    #[wasm_bindgen(getter)]
    pub fn active_particles(&self) -> u32 { self.active_particles }
    #[wasm_bindgen(getter)]
    pub fn settled_particles(&self) -> u32 { self.settled_particles }
    /// Ticks processed since the last reset while metrics were enabled.
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
}
