//! Circles, circular segments and SVG arcs.
//!
//! Circles are generated one quadrant at a time with the integer midpoint
//! algorithm. Quadrant 0 is computed directly; quadrants 1 to 3 are exact
//! 90 degree rotations of it, so the four quadrants partition the circle.
//!
//! Arcs follow the SVG endpoint parameterization. The center is found in
//! 8-bit fixed point with [`arc_center`]; circular arcs then walk the circle
//! quadrants between the two endpoints, elliptical arcs step the parametric
//! angle one degree at a time.

use core::cmp::Ordering;
use core::ops::{BitOr, BitOrAssign};

use crate::math::{
    cos256, div_round, isqrt, isqrt_round, saturate_i16, scale256_wide, sin256,
};
use crate::pixel_stream::PixelStream;
use crate::point::Point;

// ============================================================================
// ArcFlags
// ============================================================================

/// Arc drawing flags.
///
/// The bit layout matches the path text: the large-arc flag is bit 0 and
/// the sweep flag is bit 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArcFlags(u16);

impl ArcFlags {
    pub const COUNTER_CLOCKWISE: ArcFlags = ArcFlags(0x00);
    pub const LONG_PATH: ArcFlags = ArcFlags(0x01);
    pub const CLOCKWISE: ArcFlags = ArcFlags(0x02);
    pub const FULL_CIRCLE: ArcFlags = ArcFlags(0x03);

    /// Build flags from raw bits; unknown bits are dropped.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & 0x03)
    }

    /// Build flags from the SVG `large-arc-flag` and `sweep-flag`.
    pub const fn from_svg(large_arc: bool, sweep: bool) -> Self {
        Self((large_arc as u16) | ((sweep as u16) << 1))
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: ArcFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_long_path(self) -> bool {
        self.contains(Self::LONG_PATH)
    }

    pub const fn is_clockwise(self) -> bool {
        self.contains(Self::CLOCKWISE)
    }
}

impl BitOr for ArcFlags {
    type Output = ArcFlags;
    fn bitor(self, rhs: ArcFlags) -> ArcFlags {
        ArcFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ArcFlags {
    fn bitor_assign(&mut self, rhs: ArcFlags) {
        self.0 |= rhs.0;
    }
}

#[inline]
fn emit_at(emit: &mut dyn FnMut(i16, i16), x: i32, y: i32) {
    emit(saturate_i16(x as i64), saturate_i16(y as i64));
}

// ============================================================================
// Circle quadrants
// ============================================================================

/// Raw midpoint points of the first quadrant, from `(r, 0)` to `(0, r)`
/// inclusive, in clockwise order (y points down).
fn quadrant_points(radius: i32, emit: &mut dyn FnMut(i32, i32)) {
    let mut x = -radius;
    let mut y = 0i32;
    let mut err = 2 - 2 * radius;

    loop {
        emit(-x, y);
        let r = err;
        if r <= y {
            y += 1;
            err += y * 2 + 1;
        }
        if r > x || err > y {
            x += 1;
            err += x * 2 + 1;
        }
        if x > 0 {
            break;
        }
    }
}

/// Emit the points of circle quadrant `q` (0..=3) around the origin in
/// clockwise order.
///
/// Only points that classify into `q` (see [`Point::circle_quadrant`]) are
/// emitted: the quadrant's start axis point is included, the next axis point
/// belongs to the following quadrant. A radius of zero or less emits
/// nothing.
pub fn draw_circle_quadrant(radius: i16, q: u8, emit: &mut dyn FnMut(i16, i16)) {
    if radius <= 0 {
        return;
    }
    quadrant_points(radius as i32, &mut |px, py| {
        if px == 0 {
            return;
        }
        let (x, y) = match q % 4 {
            0 => (px, py),
            1 => (-py, px),
            2 => (-px, -py),
            _ => (py, -px),
        };
        emit_at(emit, x, y);
    });
}

/// Draw a whole circle.
///
/// Border pixels go to `stroke`. When `fill` is given, every row is filled
/// strictly between its left and right border pixels. Pixels are not
/// emitted in traversal order. Radius 0 emits the center, a negative
/// radius emits nothing.
pub fn draw_circle(
    center: Point,
    radius: i16,
    stroke: &mut dyn FnMut(i16, i16),
    mut fill: Option<&mut dyn FnMut(i16, i16)>,
) {
    crate::log::trace!(cx = center.x, cy = center.y, radius, "draw_circle");

    if radius < 0 {
        return;
    }
    if radius == 0 {
        stroke(center.x, center.y);
        return;
    }

    let (cx, cy) = (center.x as i32, center.y as i32);

    // Row currently being collected and its innermost border x offset.
    let mut row = 0i32;
    let mut inner = radius as i32;

    let fill_row = |fill: &mut dyn FnMut(i16, i16), row: i32, inner: i32| {
        for x in (cx - inner + 1)..(cx + inner) {
            emit_at(fill, x, cy + row);
            if row != 0 {
                emit_at(fill, x, cy - row);
            }
        }
    };

    quadrant_points(radius as i32, &mut |px, py| {
        if py != row {
            if let Some(fill) = fill.as_deref_mut() {
                fill_row(fill, row, inner);
            }
            row = py;
        }
        inner = px;

        emit_at(stroke, cx + px, cy + py);
        if px != 0 {
            emit_at(stroke, cx - px, cy + py);
        }
        if py != 0 {
            emit_at(stroke, cx + px, cy - py);
            if px != 0 {
                emit_at(stroke, cx - px, cy - py);
            }
        }
    });

    if let Some(fill) = fill.as_deref_mut() {
        fill_row(fill, row, inner);
    }
}

// ============================================================================
// Circle segments
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum SegmentState {
    BeforeStart,
    Drawing,
    AfterEnd,
}

/// Draw the part of the circle around `center` from `start` to `end`.
///
/// The direction comes from [`ArcFlags::CLOCKWISE`]; counter-clockwise
/// segments are drawn as the vertically mirrored clockwise segment. With
/// `start == end` and [`ArcFlags::LONG_PATH`] the full circle is drawn.
/// `start` itself is not emitted; `end` is when it lies on the circle.
pub fn draw_circle_segment(
    center: Point,
    radius: i16,
    start: Point,
    end: Point,
    flags: ArcFlags,
    emit: &mut dyn FnMut(i16, i16),
) {
    crate::log::trace!(cx = center.x, cy = center.y, radius, flags = flags.bits(), "draw_circle_segment");

    let (cx, cy) = (center.x as i32, center.y as i32);

    if radius <= 0 {
        if radius == 0 {
            emit(center.x, center.y);
        }
        return;
    }

    if start == end && flags.is_long_path() {
        for q in 0..4 {
            draw_circle_quadrant(radius, q, &mut |x, y| {
                emit_at(emit, cx + x as i32, cy + y as i32);
            });
        }
        return;
    }

    if !flags.is_clockwise() {
        let ym2 = 2 * cy;
        let flip = |p: Point| Point::new(p.x, saturate_i16((ym2 - p.y as i32) as i64));
        draw_circle_segment(
            center,
            radius,
            flip(start),
            flip(end),
            flags | ArcFlags::CLOCKWISE,
            &mut |x, y| emit_at(emit, x as i32, ym2 - y as i32),
        );
        return;
    }

    let start = start - center;
    let end = end - center;

    let start_q = start.circle_quadrant();
    let mut end_q = end.circle_quadrant();
    if (start_q == end_q && end.compare_circle(&start) == Ordering::Less) || start_q > end_q {
        end_q += 4;
    }

    let mut state = SegmentState::BeforeStart;
    for q in start_q..=end_q {
        let last = q == end_q;
        draw_circle_quadrant(radius, q % 4, &mut |x, y| {
            let p = Point::new(x, y);
            if state == SegmentState::BeforeStart && start.compare_circle(&p) == Ordering::Less {
                state = SegmentState::Drawing;
            }
            if state == SegmentState::Drawing && last && end.compare_circle(&p) == Ordering::Less {
                state = SegmentState::AfterEnd;
            }
            if state == SegmentState::Drawing {
                emit_at(emit, cx + x as i32, cy + y as i32);
            }
        });
        if state == SegmentState::BeforeStart {
            // start lies past the last point of its quadrant
            state = SegmentState::Drawing;
        }
    }
}

// ============================================================================
// Arc center parameterization
// ============================================================================

/// Center and effective radii of an SVG arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcCenter {
    /// Center x scaled by 256.
    pub cx256: i32,
    /// Center y scaled by 256.
    pub cy256: i32,
    /// Radius after zero and too-small corrections.
    pub rx: i16,
    pub ry: i16,
}

impl ArcCenter {
    /// Center rounded to the pixel grid.
    pub fn center(&self) -> Point {
        Point::new(
            saturate_i16(scale256_wide(self.cx256 as i64)),
            saturate_i16(scale256_wide(self.cy256 as i64)),
        )
    }
}

#[inline]
fn clamp_i32(v: i128) -> i32 {
    v.clamp(i32::MIN as i128, i32::MAX as i128) as i32
}

/// Convert SVG endpoint arc parameters to a center.
///
/// Follows the SVG 1.1 arc implementation notes (F.6.5) in integer fixed
/// point:
///
/// - a zero radius becomes half the chord length (a half circle),
/// - radii too small to reach both endpoints are scaled up uniformly,
/// - the center sits on the side selected by the flags; it is negated when
///   the large-arc and sweep flags are equal.
///
/// `phi` is the ellipse rotation in degrees.
#[allow(clippy::too_many_arguments)]
pub fn arc_center(
    x1: i16,
    y1: i16,
    x2: i16,
    y2: i16,
    rx: i16,
    ry: i16,
    phi: i16,
    flags: ArcFlags,
) -> ArcCenter {
    let c = cos256(phi as i32) as i128;
    let s = sin256(phi as i32) as i128;

    let (x1, y1, x2, y2) = (x1 as i128, y1 as i128, x2 as i128, y2 as i128);
    let mut rx = (rx as i128).abs();
    let mut ry = (ry as i128).abs();

    // half chord, 256 scale
    let hx = (x1 - x2) * 128;
    let hy = (y1 - y2) * 128;

    // half chord in the ellipse's own axes, 256 scale
    let xp = div_round(c * hx + s * hy, 256);
    let yp = div_round(-s * hx + c * hy, 256);

    if rx == 0 || ry == 0 {
        let d2 = (x1 - x2) * (x1 - x2) + (y1 - y2) * (y1 - y2);
        let r = isqrt(d2 as u128) as i128 / 2;
        rx = r;
        ry = r;
    } else {
        let num = xp * xp * ry * ry + yp * yp * rx * rx;
        let unit = 256 * rx * ry;
        if num > unit * unit {
            let (old_rx, old_ry) = (rx, ry);
            rx = isqrt_round(div_round(num, 65536 * old_ry * old_ry) as u128) as i128;
            ry = isqrt_round(div_round(num, 65536 * old_rx * old_rx) as u128) as i128;
            crate::log::trace!(rx = rx as i64, ry = ry as i64, "arc radii scaled up");
        }
    }

    let (rx2, ry2) = (rx * rx, ry * ry);
    let numerator = rx2 * ry2 * 65536 - rx2 * yp * yp - ry2 * xp * xp;
    let denominator = rx2 * yp * yp + ry2 * xp * xp;

    // sqrt(numerator / denominator), 256 scale
    let mut coef = if numerator > 0 && denominator > 0 {
        isqrt_round(((numerator << 16) / denominator) as u128) as i128
    } else {
        0
    };
    if flags.is_long_path() == flags.is_clockwise() {
        coef = -coef;
    }

    let (cxp, cyp) = if rx > 0 && ry > 0 {
        (
            div_round(coef * rx * yp, 256 * ry),
            -div_round(coef * ry * xp, 256 * rx),
        )
    } else {
        (0, 0)
    };

    let cx256 = div_round(c * cxp - s * cyp, 256) + (x1 + x2) * 128;
    let cy256 = div_round(s * cxp + c * cyp, 256) + (y1 + y2) * 128;

    ArcCenter {
        cx256: clamp_i32(cx256),
        cy256: clamp_i32(cy256),
        rx: saturate_i16(rx.clamp(i64::MIN as i128, i64::MAX as i128) as i64),
        ry: saturate_i16(ry.clamp(i64::MIN as i128, i64::MAX as i128) as i64),
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Direction of the vector `(dx, dy)` in whole degrees, `[0, 360)`.
///
/// The y axis points down, so 90 degrees is `(0, 1)`. Computed by searching
/// the sine table; the zero vector maps to 0.
pub fn vector_angle(dx: i64, dy: i64) -> i16 {
    if dx == 0 && dy == 0 {
        return 0;
    }
    let ax = (dx as i128).abs();
    let ay = (dy as i128).abs();

    // f(d) = ay*cos(d) - ax*sin(d) falls from >= 0 at 0 to <= 0 at 90.
    let f = |d: i32| ay * cos256(d) as i128 - ax * sin256(d) as i128;
    let mut theta = 90;
    for d in 0..=90 {
        if f(d) <= 0 {
            theta = d;
            break;
        }
    }
    if theta > 0 && f(theta - 1).abs() < f(theta).abs() {
        theta -= 1;
    }

    let angle = match (dx >= 0, dy >= 0) {
        (true, true) => theta,
        (false, true) => 180 - theta,
        (false, false) => 180 + theta,
        (true, false) => 360 - theta,
    };
    (angle % 360) as i16
}

// ============================================================================
// Arcs
// ============================================================================

/// Draw an SVG arc from `(x1, y1)` to `(x2, y2)`.
///
/// Circular arcs (`rx == ry` after correction) walk the circle quadrants;
/// elliptical arcs step the parametric angle by one degree and rotate each
/// point by `phi` degrees. Both endpoints are emitted. Equal endpoints draw
/// nothing.
#[allow(clippy::too_many_arguments)]
pub fn draw_arc(
    x1: i16,
    y1: i16,
    x2: i16,
    y2: i16,
    rx: i16,
    ry: i16,
    phi: i16,
    flags: ArcFlags,
    emit: &mut dyn FnMut(i16, i16),
) {
    if x1 == x2 && y1 == y2 {
        return;
    }

    let arc = arc_center(x1, y1, x2, y2, rx, ry, phi, flags);
    crate::log::trace!(
        cx = arc.center().x,
        cy = arc.center().y,
        rx = arc.rx,
        ry = arc.ry,
        flags = flags.bits(),
        "draw_arc"
    );

    let mut stream = PixelStream::new();
    stream.propose(x1, y1, emit);

    if arc.rx == arc.ry {
        let mut clockwise = ArcFlags::COUNTER_CLOCKWISE;
        if flags.is_clockwise() {
            clockwise = ArcFlags::CLOCKWISE;
        }
        draw_circle_segment(
            arc.center(),
            arc.rx,
            Point::new(x1, y1),
            Point::new(x2, y2),
            clockwise,
            &mut |x, y| stream.propose(x, y, emit),
        );
    } else {
        let c = cos256(phi as i32) as i64;
        let s = sin256(phi as i32) as i64;
        let (cx, cy) = (arc.cx256 as i64, arc.cy256 as i64);
        let (rx, ry) = (arc.rx as i64, arc.ry as i64);

        // Parametric angle of an endpoint: un-rotate, then normalize the radii.
        let angle_of = |x: i16, y: i16| {
            let dx = ((x as i64) << 8) - cx;
            let dy = ((y as i64) << 8) - cy;
            let ux = (c * dx + s * dy) >> 8;
            let uy = (-s * dx + c * dy) >> 8;
            vector_angle(ux * ry, uy * rx) as i32
        };
        let start_angle = angle_of(x1, y1);
        let end_angle = angle_of(x2, y2);
        let step = if flags.is_clockwise() { 1 } else { 359 };
        let mut steps = (end_angle - start_angle) * if flags.is_clockwise() { 1 } else { -1 };
        steps = steps.rem_euclid(360);
        // Endpoints that round to the same degree still need the full turn.
        if steps == 0 && flags.is_long_path() {
            steps = 360;
        }

        let mut angle = start_angle;
        for _ in 0..steps {
            let ex = rx * cos256(angle) as i64;
            let ey = ry * sin256(angle) as i64;
            let x = cx + ((c * ex - s * ey) >> 8);
            let y = cy + ((s * ex + c * ey) >> 8);
            stream.propose(
                saturate_i16(scale256_wide(x)),
                saturate_i16(scale256_wide(y)),
                emit,
            );
            angle = (angle + step) % 360;
        }
    }

    stream.propose(x2, y2, emit);
    stream.flush(emit);
}

// ============================================================================
// Tests
// ============================================================================
