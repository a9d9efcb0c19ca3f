//! Core primitives shared by every system: safety macros, logging,
//! the seeded PRNG and 2D point helpers.

#[macro_use]
pub mod utils;
pub mod geometry;
pub mod random;
