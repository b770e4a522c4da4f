//! Cubic Bezier flattening in 10-bit fixed point.
//!
//! The curve is sampled at `steps` evenly spaced parameter values, where
//! `steps` is the Manhattan length of the control polygon. Each sample is a
//! De Casteljau evaluation done entirely in integers; the resulting points go
//! through a [`PixelStream`] so the output is a clean 8-connected pixel run.

use crate::math::{scale1024, BEZIER_SCALE, BEZIER_SCALE_SHIFT};
use crate::pixel_stream::PixelStream;
use crate::point::Point;

/// Emit the pixels of the cubic Bezier curve from `(x0, y0)` to `(x3, y3)`
/// with control points `(x1, y1)` and `(x2, y2)`.
///
/// The first pixel is the start point and the last is the end point. A curve
/// whose four points coincide emits exactly one pixel.
#[allow(clippy::too_many_arguments)]
pub fn draw_cubic_bezier(
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
    x2: i16,
    y2: i16,
    x3: i16,
    y3: i16,
    emit: &mut dyn FnMut(i16, i16),
) {
    crate::log::trace!(x0, y0, x1, y1, x2, y2, x3, y3, "draw_cubic_bezier");

    let mut stream = PixelStream::new();
    stream.propose(x0, y0, emit);
    flatten_cubic_bezier(
        [
            Point::new(x0, y0),
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x3, y3),
        ],
        &mut |x, y| stream.propose(x, y, emit),
    );
    stream.propose(x3, y3, emit);
    stream.flush(emit);
}

/// [`draw_cubic_bezier`] over four points.
#[inline]
pub fn draw_cubic_bezier_points(p: [Point; 4], emit: &mut dyn FnMut(i16, i16)) {
    draw_cubic_bezier(p[0].x, p[0].y, p[1].x, p[1].y, p[2].x, p[2].y, p[3].x, p[3].y, emit);
}

/// Raw samples for `n in 1..=steps`, without post-processing.
fn flatten_cubic_bezier(p: [Point; 4], sample: &mut dyn FnMut(i16, i16)) {
    let x = p.map(|p| p.x as i64);
    let y = p.map(|p| p.y as i64);

    let dx = [x[1] - x[0], x[2] - x[1], x[3] - x[2]];
    let dy = [y[1] - y[0], y[2] - y[1], y[3] - y[2]];

    let steps: i64 = dx.iter().chain(dy.iter()).map(|d| d.abs()).sum();

    for n in 1..=steps {
        let f = BEZIER_SCALE * n / steps;

        // first level: three points on the control polygon
        let x4 = (x[0] << BEZIER_SCALE_SHIFT) + f * dx[0];
        let y4 = (y[0] << BEZIER_SCALE_SHIFT) + f * dy[0];
        let x5 = (x[1] << BEZIER_SCALE_SHIFT) + f * dx[1];
        let y5 = (y[1] << BEZIER_SCALE_SHIFT) + f * dy[1];
        let x6 = (x[2] << BEZIER_SCALE_SHIFT) + f * dx[2];
        let y6 = (y[2] << BEZIER_SCALE_SHIFT) + f * dy[2];

        // second level: two points
        let x7 = x4 + scale1024(f * (x5 - x4));
        let y7 = y4 + scale1024(f * (y5 - y4));
        let x8 = x5 + scale1024(f * (x6 - x5));
        let y8 = y5 + scale1024(f * (y6 - y5));

        // the curve point
        let x9 = x7 + scale1024(f * (x8 - x7));
        let y9 = y7 + scale1024(f * (y8 - y7));

        sample(scale1024(x9) as i16, scale1024(y9) as i16);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(c: [(i16, i16); 4]) -> Vec<Point> {
        let mut out = Vec::new();
        draw_cubic_bezier_points(c.map(Point::from), &mut |x, y| out.push(Point::new(x, y)));
        out
    }

    fn assert_connected(pts: &[Point]) {
        for w in pts.windows(2) {
            assert_ne!(w[0], w[1]);
            assert_eq!(w[0].chebyshev(&w[1]), 1, "{:?} -> {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn test_degenerate_curve_is_one_point() {
        assert_eq!(collect([(7, 3); 4]), vec![Point::new(7, 3)]);
    }

    #[test]
    fn test_straight_curve_is_a_line() {
        let pts = collect([(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(pts, (0..=3).map(|x| Point::new(x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_endpoints_and_connectivity() {
        let pts = collect([(0, 0), (10, 20), (30, -10), (40, 10)]);
        assert_eq!(pts.first(), Some(&Point::new(0, 0)));
        assert_eq!(pts.last(), Some(&Point::new(40, 10)));
        assert_connected(&pts);
    }

    #[test]
    fn test_arch_apex() {
        // B(0.5).y = 7.5, rounded up
        let pts = collect([(0, 0), (0, 10), (10, 10), (10, 0)]);
        assert_connected(&pts);
        assert_eq!(pts.iter().map(|p| p.y).max(), Some(8));
        assert!(pts.iter().all(|p| (0..=10).contains(&p.x) && p.y >= 0));
    }

    #[test]
    fn test_large_coordinates() {
        let pts = collect([(-20_000, 0), (-20_000, 100), (20_000, 100), (20_000, 0)]);
        assert_eq!(pts.first(), Some(&Point::new(-20_000, 0)));
        assert_eq!(pts.last(), Some(&Point::new(20_000, 0)));
        assert_connected(&pts);
    }
}
