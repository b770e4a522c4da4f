//! Pixel-stream post-processing.
//!
//! Curve and arc generators sample with coarse integer steps. Their raw
//! output contains repeated pixels, single-pixel stair corners and gaps.
//! [`PixelStream`] sits between a generator and the caller's pixel callback,
//! holds the three most recent points and repairs the stream before handing
//! pixels on:
//!
//! - a point equal to the newest held point is dropped,
//! - a one-pixel stair corner drops its corner pixel,
//! - a one-pixel gap gets the midpoint inserted,
//! - a wider gap is bridged with a straight line.
//!
//! Each render call owns its own stream, and every stream must end with
//! [`PixelStream::flush`] so the held pixels reach the callback.

use crate::line::draw_line;
use crate::point::Point;

/// Three-slot window of proposed points: `[newest, middle, oldest]`.
#[derive(Debug, Clone, Default)]
pub struct PixelStream {
    window: [Point; 3],
}

const NEWEST: usize = 0;
const MIDDLE: usize = 1;
const OLDEST: usize = 2;

impl PixelStream {
    pub fn new() -> Self {
        Self {
            window: [Point::INVALID; 3],
        }
    }

    /// True when no valid point is held.
    pub fn is_empty(&self) -> bool {
        self.window.iter().all(|p| !p.is_valid())
    }

    /// Propose the next point of the stream.
    ///
    /// A point with `y == POINT_BREAK_Y` is not a pixel; it flushes the
    /// window.
    pub fn propose(&mut self, x: i16, y: i16, emit: &mut dyn FnMut(i16, i16)) {
        let p = Point::new(x, y);
        if p == self.window[NEWEST] {
            return;
        }
        if p.is_break() {
            self.flush(emit);
            return;
        }

        let w = &mut self.window;
        if w[OLDEST].is_valid() {
            emit(w[OLDEST].x, w[OLDEST].y);
        }
        w[OLDEST] = w[MIDDLE];
        w[MIDDLE] = w[NEWEST];
        w[NEWEST] = p;

        if !w[MIDDLE].is_valid() {
            return;
        }

        let (newest, middle, oldest) = (w[NEWEST], w[MIDDLE], w[OLDEST]);
        let dx = (newest.x as i32 - middle.x as i32).abs();
        let dy = (newest.y as i32 - middle.y as i32).abs();

        // One-pixel stair corner: the middle pixel only thickens the step.
        let corner = oldest.is_valid()
            && ((dy == 0 && dx == 1 && middle.x == oldest.x)
                || (dx == 0 && dy == 1 && middle.y == oldest.y));

        if corner {
            w[MIDDLE] = oldest;
            w[OLDEST] = Point::INVALID;
        } else if dx <= 1 && dy <= 1 {
            // already connected
        } else if dx <= 2 && dy <= 2 {
            if oldest.is_valid() {
                emit(oldest.x, oldest.y);
            }
            w[OLDEST] = middle;
            w[MIDDLE] = Point::new(
                ((newest.x as i32 + middle.x as i32) / 2) as i16,
                ((newest.y as i32 + middle.y as i32) / 2) as i16,
            );
        } else {
            if oldest.is_valid() {
                emit(oldest.x, oldest.y);
            }
            // The newest point stays held, so the bridge stops short of it.
            draw_line(middle.x, middle.y, newest.x, newest.y, &mut |x, y| {
                if x != newest.x || y != newest.y {
                    emit(x, y);
                }
            });
            w[MIDDLE] = Point::INVALID;
            w[OLDEST] = Point::INVALID;
        }
    }

    /// Emit all held points, oldest first, and reset the window.
    pub fn flush(&mut self, emit: &mut dyn FnMut(i16, i16)) {
        for slot in [OLDEST, MIDDLE, NEWEST] {
            let p = self.window[slot];
            if p.is_valid() {
                emit(p.x, p.y);
            }
            self.window[slot] = Point::INVALID;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::POINT_BREAK_Y;

    fn run(points: &[(i16, i16)]) -> Vec<Point> {
        let mut out = Vec::new();
        let mut stream = PixelStream::new();
        let mut emit = |x, y| out.push(Point::new(x, y));
        for &(x, y) in points {
            stream.propose(x, y, &mut emit);
        }
        stream.propose(0, POINT_BREAK_Y, &mut emit);
        assert!(stream.is_empty());
        out
    }

    fn pts(v: &[(i16, i16)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_nothing_is_emitted_before_flush() {
        let mut out = Vec::new();
        let mut stream = PixelStream::new();
        stream.propose(1, 1, &mut |x, y| out.push(Point::new(x, y)));
        stream.propose(2, 1, &mut |x, y| out.push(Point::new(x, y)));
        assert!(out.is_empty());
        assert!(!stream.is_empty());
    }

    #[test]
    fn test_duplicate_suppression() {
        assert_eq!(run(&[(4, 4), (4, 4)]), pts(&[(4, 4)]));
    }

    #[test]
    fn test_collinear_run_is_kept() {
        assert_eq!(run(&[(0, 0), (1, 0), (2, 0)]), pts(&[(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn test_staircase_corner_is_removed() {
        // (1,0) only thickens the diagonal step from (0,0) to (1,1).
        assert_eq!(run(&[(0, 0), (1, 0), (1, 1)]), pts(&[(0, 0), (1, 1)]));
        // mirrored: vertical first, then horizontal
        assert_eq!(run(&[(0, 0), (0, 1), (1, 1)]), pts(&[(0, 0), (1, 1)]));
    }

    #[test]
    fn test_corner_not_removed_without_oldest() {
        // Only two points held: no corner can be judged.
        assert_eq!(run(&[(0, 0), (1, 0)]), pts(&[(0, 0), (1, 0)]));
        // The invalid slot has x == 0; it must not count as a match.
        assert_eq!(run(&[(0, 5), (0, 6)]), pts(&[(0, 5), (0, 6)]));
    }

    #[test]
    fn test_corner_not_removed_for_two_pixel_step() {
        // newest is 2 pixels from the middle: not a one-pixel corner
        let out = run(&[(0, 0), (1, 0), (1, 2)]);
        assert!(out.contains(&Point::new(1, 0)));
    }

    #[test]
    fn test_corner_not_removed_for_diagonal_approach() {
        // middle and oldest differ on both axes
        let out = run(&[(0, 1), (1, 0), (1, 1)]);
        assert_eq!(out, pts(&[(0, 1), (1, 0), (1, 1)]));
    }

    #[test]
    fn test_small_gap_gets_midpoint() {
        assert_eq!(run(&[(0, 0), (2, 0)]), pts(&[(0, 0), (1, 0), (2, 0)]));
        assert_eq!(run(&[(0, 0), (2, 2)]), pts(&[(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn test_large_gap_is_bridged_without_duplicates() {
        let out = run(&[(0, 0), (5, 0)]);
        assert_eq!(out, pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]));
    }

    #[test]
    fn test_output_is_connected() {
        let input = [(0, 0), (3, 1), (4, 1), (4, 2), (6, 3), (6, 3), (10, 10), (10, 11)];
        let out = run(&input);
        assert_eq!(out.first(), Some(&Point::new(0, 0)));
        assert_eq!(out.last(), Some(&Point::new(10, 11)));
        for w in out.windows(2) {
            assert!(w[0].chebyshev(&w[1]) <= 1, "{:?} -> {:?}", w[0], w[1]);
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn test_flush_isolates_streams() {
        let mut out = Vec::new();
        let mut stream = PixelStream::new();
        let mut emit = |x, y| out.push(Point::new(x, y));
        stream.propose(0, 0, &mut emit);
        stream.propose(1, 0, &mut emit);
        stream.flush(&mut emit);
        // a second, unrelated stream far away: no bridge back to the first
        stream.propose(20, 20, &mut emit);
        stream.flush(&mut emit);
        assert_eq!(out, pts(&[(0, 0), (1, 0), (20, 20)]));
    }
}
