//! Pixel positions.
//!
//! A [`Point`] is a 16-bit signed pixel coordinate. Two y values are
//! reserved as stream markers and never describe a real pixel:
//! [`POINT_BREAK_Y`] ends a point stream and [`POINT_INVALID_Y`] marks an
//! empty slot in the post-processing window.

use core::cmp::Ordering;
use core::ops::{Add, Sub};

// ============================================================================
// Sentinels
// ============================================================================

/// Marks the end of a point stream when pixels are proposed one by one.
pub const POINT_BREAK_Y: i16 = i16::MAX;

/// Marks an empty slot that must be ignored for drawing.
pub const POINT_INVALID_Y: i16 = i16::MAX - 1;

// ============================================================================
// Point
// ============================================================================

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Default for Point {
    /// The default point is an empty slot, not the origin.
    fn default() -> Self {
        Self::INVALID
    }
}

impl Point {
    /// Empty window slot.
    pub const INVALID: Point = Point {
        x: 0,
        y: POINT_INVALID_Y,
    };

    /// Stream terminator.
    pub const BREAK: Point = Point {
        x: 0,
        y: POINT_BREAK_Y,
    };

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// True for a real pixel, false for either sentinel.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.y != POINT_INVALID_Y && self.y != POINT_BREAK_Y
    }

    #[inline]
    pub fn is_break(&self) -> bool {
        self.y == POINT_BREAK_Y
    }

    /// Largest per-axis distance to `other`; 1 means 8-connected neighbors.
    #[inline]
    pub fn chebyshev(&self, other: &Point) -> u16 {
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        dx.max(dy).min(u16::MAX as u32) as u16
    }

    /// Row-major ordering: by y, then by x.
    pub fn compare_rows(&self, other: &Point) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }

    // ------------------------------------------------------------------
    // Circle helpers
    //
    // Quadrants around the origin, y pointing down:
    //
    //       y
    //     2 | 3
    //   x---|--->
    //     1 | 0
    //       v
    // ------------------------------------------------------------------

    /// Quadrant of a vector relative to a circle center.
    ///
    /// Every point has exactly one quadrant: quadrant 0 owns the positive
    /// x axis, 1 the positive y axis, 2 the negative x axis and 3 the
    /// negative y axis. The origin itself is reported as quadrant 0.
    pub fn circle_quadrant(&self) -> u8 {
        let (x, y) = (self.x, self.y);
        if x > 0 && y >= 0 {
            0
        } else if x <= 0 && y > 0 {
            1
        } else if x < 0 && y <= 0 {
            2
        } else if x >= 0 && y < 0 {
            3
        } else {
            0
        }
    }

    /// Order two vectors clockwise around the origin, starting at the
    /// positive x axis.
    pub fn compare_circle(&self, other: &Point) -> Ordering {
        let q1 = self.circle_quadrant();
        let q2 = other.circle_quadrant();
        if q1 != q2 {
            return q1.cmp(&q2);
        }

        let (a, b) = (self, other);
        match q1 {
            // larger x first, then smaller y
            0 => b.x.cmp(&a.x).then(a.y.cmp(&b.y)),
            // larger x first, then larger y
            1 => b.x.cmp(&a.x).then(b.y.cmp(&a.y)),
            // smaller x first, then larger y
            2 => a.x.cmp(&b.x).then(b.y.cmp(&a.y)),
            // smaller x first, then smaller y
            _ => a.x.cmp(&b.x).then(a.y.cmp(&b.y)),
        }
    }
}

impl From<(i16, i16)> for Point {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// Vector addition; saturates at the i16 range.
impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Vector subtraction; saturates at the i16 range.
impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        let p = Point::default();
        assert!(!p.is_valid());
        assert!(!p.is_break());
        assert!(Point::BREAK.is_break());
        assert!(Point::new(0, 0).is_valid());
    }

    #[test]
    fn test_add_sub() {
        let p = Point::new(3, 4) + Point::new(-1, 2);
        assert_eq!(p, Point::new(2, 6));
        assert_eq!(p - Point::new(2, 6), Point::new(0, 0));
        assert_eq!(Point::new(i16::MAX, 0) + Point::new(5, 0), Point::new(i16::MAX, 0));
    }

    #[test]
    fn test_compare_rows() {
        let mut pts = vec![Point::new(5, 1), Point::new(0, 2), Point::new(1, 1)];
        pts.sort_by(Point::compare_rows);
        assert_eq!(pts, vec![Point::new(1, 1), Point::new(5, 1), Point::new(0, 2)]);
    }

    #[test]
    fn test_circle_quadrant_axes() {
        assert_eq!(Point::new(5, 0).circle_quadrant(), 0);
        assert_eq!(Point::new(0, 5).circle_quadrant(), 1);
        assert_eq!(Point::new(-5, 0).circle_quadrant(), 2);
        assert_eq!(Point::new(0, -5).circle_quadrant(), 3);
        assert_eq!(Point::new(0, 0).circle_quadrant(), 0);
    }

    #[test]
    fn test_circle_quadrant_is_total() {
        for x in -6i16..=6 {
            for y in -6i16..=6 {
                if x == 0 && y == 0 {
                    continue;
                }
                let p = Point::new(x, y);
                let q = p.circle_quadrant();
                let owners = [
                    x > 0 && y >= 0,
                    x <= 0 && y > 0,
                    x < 0 && y <= 0,
                    x >= 0 && y < 0,
                ];
                assert_eq!(owners.iter().filter(|o| **o).count(), 1, "{p:?}");
                assert!(owners[q as usize], "{p:?} -> {q}");
            }
        }
    }

    #[test]
    fn test_compare_circle_orders_quadrants_first() {
        let a = Point::new(1, 5); // q0
        let b = Point::new(-5, 1); // q1
        assert_eq!(a.compare_circle(&b), Ordering::Less);
        assert_eq!(b.compare_circle(&a), Ordering::Greater);
        assert_eq!(a.compare_circle(&a), Ordering::Equal);
    }

    #[test]
    fn test_compare_circle_sorts_clockwise() {
        // Points on a radius-5 circle in scrambled order.
        let mut pts = vec![
            Point::new(0, -5),
            Point::new(-3, 4),
            Point::new(5, 0),
            Point::new(4, -3),
            Point::new(-5, 0),
            Point::new(3, 4),
            Point::new(-4, -3),
            Point::new(0, 5),
        ];
        pts.sort_by(Point::compare_circle);
        assert_eq!(
            pts,
            vec![
                Point::new(5, 0),
                Point::new(3, 4),
                Point::new(0, 5),
                Point::new(-3, 4),
                Point::new(-5, 0),
                Point::new(-4, -3),
                Point::new(0, -5),
                Point::new(4, -3),
            ]
        );
    }

    #[test]
    fn test_compare_circle_sorts_whole_circle_into_loop() {
        use crate::circle::draw_circle_quadrant;

        for r in [1i16, 2, 3, 7, 13, 50, 200] {
            let mut pts = Vec::new();
            for q in 0..4u8 {
                draw_circle_quadrant(r, q, &mut |x, y| pts.push(Point::new(x, y)));
            }
            // scramble
            pts.sort_by_key(|p| (p.x as i32 * 7919 + p.y as i32 * 104_729).rem_euclid(97));
            pts.sort_by(Point::compare_circle);

            assert_eq!(pts.first(), Some(&Point::new(r, 0)), "r={r}");
            for w in pts.windows(2) {
                assert_eq!(w[0].chebyshev(&w[1]), 1, "r={r}: {:?} -> {:?}", w[0], w[1]);
            }
            let (first, last) = (pts[0], pts[pts.len() - 1]);
            assert_eq!(last.chebyshev(&first), 1, "r={r}: loop not closed");
        }
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(Point::new(0, 0).chebyshev(&Point::new(1, 1)), 1);
        assert_eq!(Point::new(0, 0).chebyshev(&Point::new(-3, 1)), 3);
    }
}
