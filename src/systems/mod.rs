//! Systems: per-tick motion, text rasterization and pair sampling.

pub mod motion;
pub mod sampling;
pub mod text;
