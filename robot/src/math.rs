use std::f64::consts::{PI, TAU};

/// Planar placement of an agent: where it is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: glam::DVec2,
    /// Radians, counter-clockwise from +x.
    pub orientation: f64,
}

impl Pose {
    #[inline]
    pub const fn new(x: f64, y: f64, orientation: f64) -> Self {
        Self {
            position: glam::DVec2::new(x, y),
            orientation,
        }
    }

    /// Unit vector along the current orientation.
    #[inline]
    pub fn heading(&self) -> glam::DVec2 {
        glam::DVec2::from_angle(self.orientation)
    }
}

/// Maps an angle in radians into `(-π, π]`.
#[inline]
pub fn wrap_angle(radians: f64) -> f64 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;

    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Smallest signed difference `b - a`, in `(-π, π]`.
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    wrap_angle(b - a)
}
