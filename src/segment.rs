//! Path segments.
//!
//! A [`Segment`] is one drawing command of a path with absolute
//! coordinates. Relative commands of the path text are resolved by the
//! parser and the [`Path`](crate::path::Path) builder before a segment is
//! created.

use core::fmt;

use crate::circle::ArcFlags;
use crate::point::Point;

// ============================================================================
// SegmentKind
// ============================================================================

/// The command of a segment without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Move,
    Line,
    Curve,
    Arc,
    Circle,
    Close,
}

impl SegmentKind {
    /// Absolute command letter in path text.
    pub const fn letter(self) -> char {
        match self {
            SegmentKind::Move => 'M',
            SegmentKind::Line => 'L',
            SegmentKind::Curve => 'C',
            SegmentKind::Arc => 'A',
            SegmentKind::Circle => 'O',
            SegmentKind::Close => 'Z',
        }
    }

    /// Number of values the command takes in path text. The two arc flags
    /// count as two values.
    pub const fn arity(self) -> usize {
        match self {
            SegmentKind::Move | SegmentKind::Line => 2,
            SegmentKind::Curve => 6,
            SegmentKind::Arc => 7,
            SegmentKind::Circle => 3,
            SegmentKind::Close => 0,
        }
    }

    /// True for the kinds that need a current point to start from.
    pub const fn needs_start(self) -> bool {
        matches!(
            self,
            SegmentKind::Line | SegmentKind::Curve | SegmentKind::Arc | SegmentKind::Close
        )
    }
}

// ============================================================================
// Segment
// ============================================================================

/// One path command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Start a new subpath at `(x, y)`.
    Move { x: i16, y: i16 },
    /// Straight line to `(x, y)`.
    Line { x: i16, y: i16 },
    /// Cubic Bezier curve to `(x, y)` with control points `(x1, y1)` and
    /// `(x2, y2)`.
    Curve {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        x: i16,
        y: i16,
    },
    /// Elliptical arc to `(x, y)`. `rotation` is in degrees.
    Arc {
        rx: i16,
        ry: i16,
        rotation: i16,
        flags: ArcFlags,
        x: i16,
        y: i16,
    },
    /// Full circle around `(x, y)`; does not move the current point.
    Circle { x: i16, y: i16, r: i16 },
    /// Line back to the start of the subpath.
    Close,
}

impl Segment {
    pub const fn move_to(x: i16, y: i16) -> Self {
        Segment::Move { x, y }
    }

    pub const fn move_to_point(p: Point) -> Self {
        Segment::Move { x: p.x, y: p.y }
    }

    pub const fn line_to(x: i16, y: i16) -> Self {
        Segment::Line { x, y }
    }

    pub const fn line_to_point(p: Point) -> Self {
        Segment::Line { x: p.x, y: p.y }
    }

    pub const fn curve_to(x1: i16, y1: i16, x2: i16, y2: i16, x: i16, y: i16) -> Self {
        Segment::Curve {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        }
    }

    /// Elliptical arc with the full SVG parameter set.
    pub const fn arc_to(rx: i16, ry: i16, rotation: i16, flags: ArcFlags, x: i16, y: i16) -> Self {
        Segment::Arc {
            rx,
            ry,
            rotation,
            flags,
            x,
            y,
        }
    }

    /// Circular arc of `radius` to `(x, y)`.
    pub const fn arc(radius: i16, long_path: bool, clockwise: bool, x: i16, y: i16) -> Self {
        Segment::Arc {
            rx: radius,
            ry: radius,
            rotation: 0,
            flags: ArcFlags::from_svg(long_path, clockwise),
            x,
            y,
        }
    }

    pub const fn circle(x: i16, y: i16, r: i16) -> Self {
        Segment::Circle { x, y, r }
    }

    pub const fn close() -> Self {
        Segment::Close
    }

    pub const fn kind(&self) -> SegmentKind {
        match self {
            Segment::Move { .. } => SegmentKind::Move,
            Segment::Line { .. } => SegmentKind::Line,
            Segment::Curve { .. } => SegmentKind::Curve,
            Segment::Arc { .. } => SegmentKind::Arc,
            Segment::Circle { .. } => SegmentKind::Circle,
            Segment::Close => SegmentKind::Close,
        }
    }

    /// Where the segment leaves the current point, if it moves it.
    ///
    /// `Close` returns to the subpath start and `Circle` keeps the current
    /// point, so both return `None`.
    pub const fn end_point(&self) -> Option<Point> {
        match *self {
            Segment::Move { x, y }
            | Segment::Line { x, y }
            | Segment::Curve { x, y, .. }
            | Segment::Arc { x, y, .. } => Some(Point::new(x, y)),
            Segment::Circle { .. } | Segment::Close => None,
        }
    }

    /// Call `f` for every positional coordinate pair: end points, control
    /// points and circle centers. Radii are lengths and are not visited.
    pub fn for_each_point_mut(&mut self, f: &mut dyn FnMut(&mut i16, &mut i16)) {
        match self {
            Segment::Move { x, y } | Segment::Line { x, y } => f(x, y),
            Segment::Curve {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                f(x1, y1);
                f(x2, y2);
                f(x, y);
            }
            Segment::Arc { x, y, .. } => f(x, y),
            Segment::Circle { x, y, .. } => f(x, y),
            Segment::Close => {}
        }
    }
}

/// Absolute path text of the segment, e.g. `C1 2 3 4 5 6`.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind().letter();
        match *self {
            Segment::Move { x, y } | Segment::Line { x, y } => write!(f, "{letter}{x} {y}"),
            Segment::Curve {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => write!(f, "{letter}{x1} {y1} {x2} {y2} {x} {y}"),
            Segment::Arc {
                rx,
                ry,
                rotation,
                flags,
                x,
                y,
            } => write!(
                f,
                "{letter}{rx} {ry} {rotation} {} {} {x} {y}",
                flags.is_long_path() as u8,
                flags.is_clockwise() as u8
            ),
            Segment::Circle { x, y, r } => write!(f, "{letter}{x} {y} {r}"),
            Segment::Close => write!(f, "{letter}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_letter_and_arity() {
        let all = [
            (Segment::move_to(1, 2), 'M', 2),
            (Segment::line_to(1, 2), 'L', 2),
            (Segment::curve_to(1, 2, 3, 4, 5, 6), 'C', 6),
            (Segment::arc(5, false, true, 1, 2), 'A', 7),
            (Segment::circle(1, 2, 3), 'O', 3),
            (Segment::close(), 'Z', 0),
        ];
        for (seg, letter, arity) in all {
            assert_eq!(seg.kind().letter(), letter);
            assert_eq!(seg.kind().arity(), arity);
        }
        assert!(!SegmentKind::Move.needs_start());
        assert!(!SegmentKind::Circle.needs_start());
        assert!(SegmentKind::Close.needs_start());
    }

    #[test]
    fn test_circular_arc_factory() {
        let seg = Segment::arc(7, true, false, 10, 20);
        assert_eq!(
            seg,
            Segment::arc_to(7, 7, 0, ArcFlags::LONG_PATH, 10, 20)
        );
    }

    #[test]
    fn test_point_factories() {
        let p = Point::new(-3, 9);
        assert_eq!(Segment::move_to_point(p), Segment::move_to(-3, 9));
        assert_eq!(Segment::line_to_point(p), Segment::line_to(-3, 9));
    }

    #[test]
    fn test_end_point() {
        assert_eq!(Segment::curve_to(0, 0, 1, 1, 4, 5).end_point(), Some(Point::new(4, 5)));
        assert_eq!(Segment::circle(4, 5, 2).end_point(), None);
        assert_eq!(Segment::close().end_point(), None);
    }

    #[test]
    fn test_for_each_point_mut_skips_radii() {
        let mut seg = Segment::arc_to(5, 6, 30, ArcFlags::CLOCKWISE, 10, 20);
        seg.for_each_point_mut(&mut |x, y| {
            *x += 1;
            *y += 1;
        });
        assert_eq!(seg, Segment::arc_to(5, 6, 30, ArcFlags::CLOCKWISE, 11, 21));

        let mut circle = Segment::circle(1, 1, 9);
        circle.for_each_point_mut(&mut |x, _| *x = 0);
        assert_eq!(circle, Segment::circle(0, 1, 9));

        let mut count = 0;
        Segment::curve_to(1, 2, 3, 4, 5, 6).for_each_point_mut(&mut |_, _| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Segment::move_to(4, -8).to_string(), "M4 -8");
        assert_eq!(Segment::curve_to(1, 2, 3, 4, 5, 6).to_string(), "C1 2 3 4 5 6");
        assert_eq!(
            Segment::arc_to(10, 5, 45, ArcFlags::CLOCKWISE, 20, 0).to_string(),
            "A10 5 45 0 1 20 0"
        );
        assert_eq!(Segment::circle(1, 2, 3).to_string(), "O1 2 3");
        assert_eq!(Segment::close().to_string(), "Z");
    }
}
