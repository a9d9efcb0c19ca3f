//! ParticleState - Structure of Arrays for the renderer
//!
//! Every per-particle buffer is a fixed-size boxed slice of exactly
//! `particle_count` elements. Buffers are allocated in `new`/`resize` (called
//! from `reset` only when the count changes) and mutated in place by every
//! tick afterwards.

use crate::domain::phase::Phase;

pub struct ParticleState {
    pub phase: Phase,
    pub elapsed_ms: f64,
    pub particle_count: usize,
    /// Always equal to the number of `settled[i] == 1`.
    pub settled_count: usize,

    pub x: Box<[f32]>,
    pub y: Box<[f32]>,
    pub vx: Box<[f32]>,          // px/s
    pub vy: Box<[f32]>,          // px/s
    pub tx: Box<[f32]>,
    pub ty: Box<[f32]>,
    pub release_ms: Box<[f32]>,  // activation time
    pub active: Box<[u8]>,       // 0 = dormant, 1 = moving
    pub settled: Box<[u8]>,      // 0 = travelling, 1 = within 1.5px of target
}

impl ParticleState {
    pub fn new(particle_count: usize) -> Self {
        Self {
            phase: Phase::Dissolving,
            elapsed_ms: 0.0,
            particle_count,
            settled_count: 0,
            x: zeroed(particle_count),
            y: zeroed(particle_count),
            vx: zeroed(particle_count),
            vy: zeroed(particle_count),
            tx: zeroed(particle_count),
            ty: zeroed(particle_count),
            release_ms: zeroed(particle_count),
            active: zeroed(particle_count),
            settled: zeroed(particle_count),
        }
    }

    /// Reallocate every buffer for `particle_count`; a no-op when unchanged.
    pub fn resize(&mut self, particle_count: usize) {
        if particle_count == self.particle_count {
            return;
        }
        *self = Self::new(particle_count);
    }

    /// Back to the start of the timeline. Buffer contents are left for
    /// `initialize_particle_state` to overwrite.
    pub(crate) fn rewind(&mut self) {
        self.phase = Phase::Dissolving;
        self.elapsed_ms = 0.0;
        self.settled_count = 0;
    }

    pub fn recount_settled(&mut self) {
        self.settled_count = self.settled.iter().map(|&s| s as usize).sum();
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().map(|&a| a as usize).sum()
    }
}

fn zeroed<T: Copy + Default>(len: usize) -> Box<[T]> {
    vec![T::default(); len].into_boxed_slice()
}
