//! Seeded xorshift32 PRNG
//!
//! Pure 32-bit integer arithmetic; output is taken modulo 1_000_000 so a seed
//! yields the same six-digit stream on every platform.

const OUTPUT_MODULUS: u32 = 1_000_000;

#[derive(Clone, Debug)]
pub struct Prng {
    state: u32,
}

impl Prng {
    /// Seed 0 would lock xorshift at zero forever, so it is coerced to 1.
    pub fn new(seed: i32) -> Self {
        let state = seed as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Float in [0, 1) with six decimal digits of entropy.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() % OUTPUT_MODULUS) as f64 / OUTPUT_MODULUS as f64
    }

    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }
}
