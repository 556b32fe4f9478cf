// THEORY:
// The `LineFitter` reduces the dominant region to a heading: a straight line
// through its boundary points that minimizes the summed squared perpendicular
// distance (total least squares). Ordinary least squares would regress y on x
// and break down exactly when the guide line runs straight ahead (vertical in
// the image), which is the common case for a line follower.
//
// The fit is closed-form for 2D: the anchor is the centroid, the direction is
// the principal eigenvector of the 2x2 scatter matrix,
//     theta = 0.5 * atan2(2 * Sxy, Sxx - Syy),   dir = (cos theta, sin theta).
// `theta` lies in (-pi/2, pi/2], so the raw direction always has vx >= 0. The
// reported sign is then set by the configured `HeadingConvention`.
//
// Every traced boundary pixel takes part with equal weight, not just the
// corners of the boundary polygon. Long straight runs therefore pull the
// anchor toward themselves.

use crate::config::HeadingConvention;
use crate::core_modules::contour::{Contour, Point};
use serde::Serialize;

/// A straight line as a unit direction and a point on the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedLine {
    pub vx: f64,
    pub vy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl FittedLine {
    /// The two points at `length` pixels from the anchor along -dir and +dir,
    /// truncated toward zero. Presentation only.
    pub fn endpoints(&self, length: f64) -> (Point, Point) {
        let back = Point::new(
            (self.x0 - length * self.vx) as i32,
            (self.y0 - length * self.vy) as i32,
        );
        let ahead = Point::new(
            (self.x0 + length * self.vx) as i32,
            (self.y0 + length * self.vy) as i32,
        );
        (back, ahead)
    }

    pub fn direction_norm(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Heading in degrees, measured from +x toward +y (image coordinates).
    pub fn angle_degrees(&self) -> f64 {
        self.vy.atan2(self.vx).to_degrees()
    }
}

/// Fits a total-least-squares line through the contour's points.
///
/// Returns `None` when the contour has fewer than two distinct points.
pub fn fit_line(contour: &Contour, heading: HeadingConvention) -> Option<FittedLine> {
    if contour.distinct_points() < 2 {
        return None;
    }

    let n = contour.len() as f64;
    let (sum_x, sum_y) = contour
        .points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    let x0 = sum_x / n;
    let y0 = sum_y / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for p in &contour.points {
        let dx = p.x as f64 - x0;
        let dy = p.y as f64 - y0;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let theta = 0.5 * (2.0 * sxy).atan2(sxx - syy);
    let (vx, vy) = orient(theta.cos(), theta.sin(), heading);
    Some(FittedLine { vx, vy, x0, y0 })
}

fn orient(vx: f64, vy: f64, heading: HeadingConvention) -> (f64, f64) {
    match heading {
        HeadingConvention::Principal => (vx, vy),
        HeadingConvention::Negated => (-vx, -vy),
        HeadingConvention::TowardTop => {
            if vy > 0.0 || (vy == 0.0 && vx < 0.0) {
                (-vx, -vy)
            } else {
                (vx, vy)
            }
        }
    }
}
