use crate::core::geometry::Point;

use super::surface::AlphaBitmap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn scan_row(bitmap: &AlphaBitmap, y: u32, step: usize, threshold: u8) -> Vec<Point> {
    bitmap
        .row(y)
        .iter()
        .enumerate()
        .step_by(step)
        .filter(|(_, &alpha)| alpha >= threshold)
        .map(|(x, _)| Point::new(x as f32, y as f32))
        .collect()
}

/// Every `step`-th pixel in both axes with `alpha >= threshold`, row-major.
pub fn sample_alpha(bitmap: &AlphaBitmap, step: u32, threshold: u8) -> Vec<Point> {
    let step = step.max(1) as usize;
    let rows: Vec<u32> = (0..bitmap.height).step_by(step).collect();

    // Rows are independent; collect keeps them in order.
    #[cfg(feature = "parallel")]
    let per_row: Vec<Vec<Point>> = rows
        .into_par_iter()
        .map(|y| scan_row(bitmap, y, step, threshold))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_row: Vec<Vec<Point>> = rows
        .into_iter()
        .map(|y| scan_row(bitmap, y, step, threshold))
        .collect();

    per_row.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> AlphaBitmap {
        let mut bitmap = AlphaBitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.alpha[(y * width + x) as usize] = if (x + y) % 2 == 0 { 255 } else { 40 };
            }
        }
        bitmap
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut bitmap = AlphaBitmap::new(3, 1);
        bitmap.alpha.copy_from_slice(&[99, 100, 101]);
        let points = sample_alpha(&bitmap, 1, 100);
        assert_eq!(points, vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)]);
    }

    #[test]
    fn step_walks_both_axes() {
        let points = sample_alpha(&checker(6, 6), 2, 100);
        // Even rows and even columns only; all of those are opaque.
        assert_eq!(points.len(), 9);
        assert!(points.iter().all(|p| p.x as u32 % 2 == 0 && p.y as u32 % 2 == 0));
    }

    #[test]
    fn output_is_row_major() {
        let points = sample_alpha(&checker(40, 40), 1, 100);
        assert_eq!(points.len(), 800);
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.y < b.y || (a.y == b.y && a.x < b.x));
        }
    }

    #[test]
    fn empty_bitmap_has_no_points() {
        assert!(sample_alpha(&AlphaBitmap::new(0, 0), 2, 0).is_empty());
        assert!(sample_alpha(&AlphaBitmap::new(4, 4), 1, 1).is_empty());
    }
}
