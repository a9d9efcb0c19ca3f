//! JS-facing surface: free functions around the text sampler and the pair
//! sampler, plus the engine constructor.

pub mod wasm;
