//! Zero-cost indexing for the particle hot loop
//!
//! Debug builds keep normal bounds-checked indexing (clear panics while
//! developing); release builds switch to `get_unchecked` because every
//! per-particle buffer has exactly `particle_count` elements and the motion
//! loop never indexes past it.
//!
//! Usage:
//! ```rust
//! use sandglass_engine::fast;
//!
//! let i = 1;
//! let mut vx = vec![0.0f32; 4];
//! let x = vec![1.0f32, 2.0, 3.0, 4.0];
//!
//! // Read: fast!(slice, [index])
//! let xi = *fast!(x, [i]);
//! assert_eq!(xi, 2.0);
//!
//! // Write: fast!(slice, [index] = value)
//! fast!(vx, [i] = xi * 0.5);
//! assert_eq!(vx[i], 1.0);
//!
//! // Mutable reference: fast!(slice, [index] mut)
//! *fast!(vx, [i] mut) += 1.0;
//! assert_eq!(vx[i], 2.0);
//! ```

#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] mut) => {{
        #[cfg(debug_assertions)]
        {
            &mut $slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked_mut($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn fast_reads_particle_buffer() {
        let release_ms: Box<[f32]> = vec![8.0, 40.0, 120.0].into_boxed_slice();
        assert_eq!(*fast!(release_ms, [2]), 120.0);
    }

    #[test]
    fn fast_writes_and_updates_in_place() {
        let mut settled: Box<[u8]> = vec![0u8; 3].into_boxed_slice();
        fast!(settled, [1] = 1);
        *fast!(settled, [2] mut) += 1;
        assert_eq!(&settled[..], &[0, 1, 1]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn fast_bounds_checks_in_debug() {
        let x = vec![0.0f32; 2];
        let _ = *fast!(x, [5]);
    }
}
