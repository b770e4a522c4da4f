//! In-place path transforms.
//!
//! Scaling uses integer "parts per base" factors (`factor / base`, base 100
//! by default), rotation uses whole degrees through the sine table, and
//! translation moves positions only. Arbitrary point transforms are
//! supported through a callback; arcs and circles then get their radii and
//! rotation from probing the callback once.

use crate::circle::vector_angle;
use crate::math::{cos256, div_round, isqrt_round, saturate_i16, scale256, sin256};
use crate::point::Point;
use crate::segment::Segment;

/// Base of the scale factors when no other base is given.
pub const DEFAULT_SCALE_BASE: i16 = 100;

/// Add two angles in degrees, result in `[0, 360)`.
#[inline]
fn add_degrees(a: i16, b: i16) -> i16 {
    (a as i32 + b as i32).rem_euclid(360) as i16
}

/// Apply `point` to every position and `radius` to every radius; arc
/// rotations turn by `turn` degrees.
fn map_segments(
    segments: &mut [Segment],
    point: &mut dyn FnMut(&mut i16, &mut i16),
    radius: &dyn Fn(i16) -> i16,
    turn: i16,
) {
    for seg in segments.iter_mut() {
        seg.for_each_point_mut(point);
        match seg {
            Segment::Arc {
                rx, ry, rotation, ..
            } => {
                *rx = radius(*rx);
                *ry = radius(*ry);
                *rotation = add_degrees(*rotation, turn);
            }
            Segment::Circle { r, .. } => *r = radius(*r),
            _ => {}
        }
    }
}

// ============================================================================
// Scale, rotate, move
// ============================================================================

/// Scale every coordinate, control point and radius by `factor / base`,
/// rounding to the nearest integer.
///
/// Does nothing when `factor == base` or `base == 0`.
pub fn scale_segments(segments: &mut [Segment], factor: i16, base: i16) {
    if factor == base || base == 0 {
        return;
    }
    crate::log::trace!(factor, base, "scale_segments");

    let scale = |v: i16| -> i16 {
        let v = div_round(v as i128 * factor as i128, base as i128);
        saturate_i16(v as i64)
    };
    map_segments(
        segments,
        &mut |x, y| {
            *x = scale(*x);
            *y = scale(*y);
        },
        &scale,
        0,
    );
}

/// Rotate every point around the origin by `angle` degrees (clockwise on a
/// y-down display). Arc rotations turn with the path; radii are unchanged.
pub fn rotate_segments(segments: &mut [Segment], angle: i16) {
    if (angle as i32).rem_euclid(360) == 0 {
        return;
    }
    crate::log::trace!(angle, "rotate_segments");

    let c = cos256(angle as i32);
    let s = sin256(angle as i32);
    map_segments(
        segments,
        &mut |x, y| {
            let (px, py) = (*x as i32, *y as i32);
            *x = saturate_i16(scale256(c * px - s * py) as i64);
            *y = saturate_i16(scale256(s * px + c * py) as i64);
        },
        &|r| r,
        angle,
    );
}

/// Translate every position by `(dx, dy)`, saturating at the coordinate
/// range. Radii are lengths and stay unchanged.
pub fn move_segments(segments: &mut [Segment], dx: i16, dy: i16) {
    if dx == 0 && dy == 0 {
        return;
    }
    map_segments(
        segments,
        &mut |x, y| {
            *x = x.saturating_add(dx);
            *y = y.saturating_add(dy);
        },
        &|r| r,
        0,
    );
}

/// [`move_segments`] by a vector.
pub fn move_segments_by(segments: &mut [Segment], offset: Point) {
    move_segments(segments, offset.x, offset.y);
}

// ============================================================================
// Arbitrary transforms
// ============================================================================

/// Uniform scale (per 1000) and rotation (degrees) of a point transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Probe {
    scale1000: i64,
    angle: i16,
}

impl Probe {
    /// Transform `(0, 0)` and `(1000, 0)` and read the result vector.
    fn measure(f: &mut dyn FnMut(&mut i16, &mut i16)) -> Self {
        let (mut x0, mut y0) = (0i16, 0i16);
        let (mut x1, mut y1) = (1000i16, 0i16);
        f(&mut x0, &mut y0);
        f(&mut x1, &mut y1);

        let dx = x1 as i64 - x0 as i64;
        let dy = y1 as i64 - y0 as i64;
        if dy == 0 {
            if dx >= 0 {
                Self { scale1000: dx, angle: 0 }
            } else {
                Self { scale1000: -dx, angle: 180 }
            }
        } else {
            Self {
                scale1000: isqrt_round((dx * dx + dy * dy) as u128) as i64,
                angle: vector_angle(dx, dy),
            }
        }
    }

    fn radius(&self, r: i16) -> i16 {
        saturate_i16(div_round(r as i128 * self.scale1000 as i128, 1000) as i64)
    }
}

/// Apply `f` to every point of the path.
///
/// Arc and circle radii cannot be passed through a point transform. For
/// them the transform is probed once, on the first arc or circle, by
/// transforming `(0, 0)` and `(1000, 0)`; the length of the result scales
/// the radii and its direction is added to the arc rotation.
pub fn transform_segments(segments: &mut [Segment], f: &mut dyn FnMut(&mut i16, &mut i16)) {
    let mut probe: Option<Probe> = None;

    for seg in segments.iter_mut() {
        if matches!(seg, Segment::Arc { .. } | Segment::Circle { .. }) && probe.is_none() {
            let measured = Probe::measure(f);
            crate::log::trace!(
                scale1000 = measured.scale1000,
                angle = measured.angle,
                "transform probe"
            );
            probe = Some(measured);
        }

        seg.for_each_point_mut(f);

        if let Some(probe) = probe {
            match seg {
                Segment::Arc {
                    rx, ry, rotation, ..
                } => {
                    *rx = probe.radius(*rx);
                    *ry = probe.radius(*ry);
                    *rotation = add_degrees(*rotation, probe.angle);
                }
                Segment::Circle { r, .. } => *r = probe.radius(*r),
                _ => {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::ArcFlags;

    fn sample() -> Vec<Segment> {
        vec![
            Segment::move_to(10, -20),
            Segment::line_to(30, 0),
            Segment::curve_to(1, 2, 3, 4, 5, 6),
            Segment::arc_to(10, 6, 30, ArcFlags::CLOCKWISE, 40, 40),
            Segment::circle(8, 8, 5),
            Segment::Close,
        ]
    }

    #[test]
    fn test_scale_all_coordinates_and_radii() {
        let mut segs = sample();
        scale_segments(&mut segs, 200, DEFAULT_SCALE_BASE);
        assert_eq!(
            segs,
            vec![
                Segment::move_to(20, -40),
                Segment::line_to(60, 0),
                Segment::curve_to(2, 4, 6, 8, 10, 12),
                Segment::arc_to(20, 12, 30, ArcFlags::CLOCKWISE, 80, 80),
                Segment::circle(16, 16, 10),
                Segment::Close,
            ]
        );
    }

    #[test]
    fn test_scale_rounds() {
        let mut segs = vec![Segment::move_to(3, -3)];
        scale_segments(&mut segs, 1, 2);
        // 1.5 and -1.5 round away from zero
        assert_eq!(segs[0], Segment::move_to(2, -2));
    }

    #[test]
    fn test_scale_no_op() {
        let mut segs = sample();
        scale_segments(&mut segs, 100, 100);
        assert_eq!(segs, sample());
        scale_segments(&mut segs, 50, 0);
        assert_eq!(segs, sample());
    }

    #[test]
    fn test_scale_and_back_within_one() {
        for v in -500i16..=500 {
            for (f, b) in [(300, 100), (7, 3), (100, 250)] {
                let mut segs = vec![Segment::move_to(v, -v)];
                scale_segments(&mut segs, f, b);
                scale_segments(&mut segs, b, f);
                let Segment::Move { x, y } = segs[0] else {
                    unreachable!()
                };
                assert!((x - v).abs() <= 1 && (y + v).abs() <= 1, "{v} {f}/{b}");
            }
        }
    }

    #[test]
    fn test_scale_saturates() {
        let mut segs = vec![Segment::line_to(20_000, -20_000)];
        scale_segments(&mut segs, 300, 100);
        assert_eq!(segs[0], Segment::line_to(i16::MAX, i16::MIN));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut segs = vec![
            Segment::move_to(10, 0),
            Segment::line_to(0, 10),
            Segment::arc_to(5, 3, 300, ArcFlags::CLOCKWISE, 10, 0),
            Segment::circle(10, 0, 4),
        ];
        rotate_segments(&mut segs, 90);
        assert_eq!(
            segs,
            vec![
                Segment::move_to(0, 10),
                Segment::line_to(-10, 0),
                Segment::arc_to(5, 3, 30, ArcFlags::CLOCKWISE, 0, 10),
                Segment::circle(0, 10, 4),
            ]
        );
    }

    #[test]
    fn test_rotate_full_turn_is_no_op() {
        let mut segs = sample();
        rotate_segments(&mut segs, 360);
        rotate_segments(&mut segs, -720);
        assert_eq!(segs, sample());
    }

    #[test]
    fn test_rotate_half_turn() {
        let mut segs = vec![Segment::move_to(7, -3)];
        rotate_segments(&mut segs, 180);
        assert_eq!(segs[0], Segment::move_to(-7, 3));
    }

    #[test]
    fn test_move_positions_only() {
        let mut segs = sample();
        move_segments(&mut segs, 5, -5);
        assert_eq!(segs[0], Segment::move_to(15, -25));
        assert_eq!(segs[2], Segment::curve_to(6, -3, 8, -1, 10, 1));
        assert_eq!(segs[3], Segment::arc_to(10, 6, 30, ArcFlags::CLOCKWISE, 45, 35));
        assert_eq!(segs[4], Segment::circle(13, 3, 5));

        move_segments_by(&mut segs, Point::new(-5, 5));
        assert_eq!(segs, sample());
    }

    #[test]
    fn test_move_saturates() {
        let mut segs = vec![Segment::move_to(i16::MAX - 2, 0)];
        move_segments(&mut segs, 10, 0);
        assert_eq!(segs[0], Segment::move_to(i16::MAX, 0));
    }

    #[test]
    fn test_transform_probes_scale() {
        let mut segs = sample();
        let mut calls = 0;
        transform_segments(&mut segs, &mut |x, y| {
            calls += 1;
            *x *= 2;
            *y *= 2;
        });
        // 1 + 1 + 3 + 1 + 1 points, plus the two probe points
        assert_eq!(calls, 9);
        assert_eq!(segs[3], Segment::arc_to(20, 12, 30, ArcFlags::CLOCKWISE, 80, 80));
        assert_eq!(segs[4], Segment::circle(16, 16, 10));
    }

    #[test]
    fn test_transform_probes_rotation() {
        let mut segs = vec![
            Segment::move_to(1, 0),
            Segment::arc_to(5, 3, 10, ArcFlags::CLOCKWISE, 4, 0),
        ];
        // quarter turn plus a translation
        transform_segments(&mut segs, &mut |x, y| {
            let (px, py) = (*x, *y);
            *x = -py + 100;
            *y = px + 100;
        });
        assert_eq!(segs[0], Segment::move_to(100, 101));
        assert_eq!(segs[1], Segment::arc_to(5, 3, 100, ArcFlags::CLOCKWISE, 100, 104));
    }

    #[test]
    fn test_transform_mirror_reads_half_turn() {
        let mut segs = vec![Segment::arc_to(4, 4, 0, ArcFlags::CLOCKWISE, 4, 0)];
        transform_segments(&mut segs, &mut |x, _| *x = -*x);
        assert_eq!(segs[0], Segment::arc_to(4, 4, 180, ArcFlags::CLOCKWISE, -4, 0));
    }

    #[test]
    fn test_transform_without_arcs_does_not_probe() {
        let mut segs = vec![Segment::move_to(1, 1), Segment::line_to(2, 2)];
        let mut calls = 0;
        transform_segments(&mut segs, &mut |_, _| calls += 1);
        assert_eq!(calls, 2);
    }
}
