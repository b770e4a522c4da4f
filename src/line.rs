//! Integer line rasterization.
//!
//! Bresenham line stepping with fast paths for axis-parallel lines. Both
//! endpoints are emitted exactly once and consecutive pixels are always
//! 8-connected.

use crate::point::Point;

/// Emit every pixel of the line from `(x0, y0)` to `(x1, y1)`, start first.
pub fn draw_line(x0: i16, y0: i16, x1: i16, y1: i16, emit: &mut dyn FnMut(i16, i16)) {
    crate::log::trace!(x0, y0, x1, y1, "draw_line");

    let (x0, y0, x1, y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };

    if x0 == x1 {
        // vertical, including the single-pixel line
        let mut y = y0;
        loop {
            emit(x0 as i16, y as i16);
            if y == y1 {
                break;
            }
            y += step_y;
        }
    } else if y0 == y1 {
        let mut x = x0;
        loop {
            emit(x as i16, y0 as i16);
            if x == x1 {
                break;
            }
            x += step_x;
        }
    } else {
        let delta_x = (x1 - x0).abs();
        let delta_y = (y1 - y0).abs();
        let mut err = delta_x - delta_y;
        let (mut x, mut y) = (x0, y0);

        loop {
            emit(x as i16, y as i16);
            if x == x1 && y == y1 {
                break;
            }
            let err2 = err << 1;
            if err2 > -delta_y {
                err -= delta_y;
                x += step_x;
            }
            if err2 < delta_x {
                err += delta_x;
                y += step_y;
            }
        }
    }
}

/// [`draw_line`] between two points.
#[inline]
pub fn draw_line_points(p0: Point, p1: Point, emit: &mut dyn FnMut(i16, i16)) {
    draw_line(p0.x, p0.y, p1.x, p1.y, emit);
}

// ============================================================================
// Tests
// ============================================================================
