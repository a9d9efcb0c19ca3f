use crate::domain::config::Viewport;

/// Slack around the viewport before a grain is clamped.
const MARGIN: f32 = 10.0;
const SIDE_DAMP: f32 = 0.35;
const TOP_BOUNCE: f32 = 0.35;
const FLOOR_BOUNCE: f32 = 0.25;

/// Clamp box for positions; unbounded without a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl ClampBox {
    pub fn from_viewport(viewport: Option<Viewport>) -> Self {
        match viewport {
            Some(v) => Self {
                min_x: -MARGIN,
                max_x: v.width + MARGIN,
                min_y: -MARGIN,
                max_y: v.height + MARGIN,
            },
            None => Self {
                min_x: f32::NEG_INFINITY,
                max_x: f32::INFINITY,
                min_y: f32::NEG_INFINITY,
                max_y: f32::INFINITY,
            },
        }
    }

    /// Soft bounce: sides bleed speed, the top pushes back down, the floor
    /// kicks the grain back up gently.
    #[inline(always)]
    pub fn apply(&self, x: &mut f32, y: &mut f32, vx: &mut f32, vy: &mut f32) {
        if *x < self.min_x {
            *x = self.min_x;
            *vx *= SIDE_DAMP;
        } else if *x > self.max_x {
            *x = self.max_x;
            *vx *= SIDE_DAMP;
        }

        if *y < self.min_y {
            *y = self.min_y;
            *vy = vy.abs() * TOP_BOUNCE;
        } else if *y > self.max_y {
            *y = self.max_y;
            *vy = -vy.abs() * FLOOR_BOUNCE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_box() -> ClampBox {
        ClampBox::from_viewport(Some(Viewport { width: 100.0, height: 50.0 }))
    }

    #[test]
    fn floor_bounces_upward() {
        let b = viewport_box();
        let (mut x, mut y, mut vx, mut vy) = (20.0, 75.0, 4.0, 80.0);
        b.apply(&mut x, &mut y, &mut vx, &mut vy);
        assert_eq!(y, 60.0);
        assert_eq!(vy, -20.0);
        assert_eq!(vx, 4.0);
    }

    #[test]
    fn top_pushes_down() {
        let b = viewport_box();
        let (mut x, mut y, mut vx, mut vy) = (20.0, -30.0, 0.0, -40.0);
        b.apply(&mut x, &mut y, &mut vx, &mut vy);
        assert_eq!(y, -10.0);
        assert_eq!(vy, 14.0);
    }

    #[test]
    fn sides_damp_horizontal_speed() {
        let b = viewport_box();
        let (mut x, mut y, mut vx, mut vy) = (130.0, 20.0, 20.0, 0.0);
        b.apply(&mut x, &mut y, &mut vx, &mut vy);
        assert_eq!(x, 110.0);
        assert_eq!(vx, 7.0);

        let (mut x, mut vx) = (-25.0, -20.0);
        b.apply(&mut x, &mut y, &mut vx, &mut vy);
        assert_eq!(x, -10.0);
        assert_eq!(vx, -7.0);
    }

    #[test]
    fn no_viewport_never_clamps() {
        let b = ClampBox::from_viewport(None);
        let (mut x, mut y, mut vx, mut vy) = (-1e6, 1e6, -3.0, 3.0);
        b.apply(&mut x, &mut y, &mut vx, &mut vy);
        assert_eq!((x, y, vx, vy), (-1e6, 1e6, -3.0, 3.0));
    }
}
