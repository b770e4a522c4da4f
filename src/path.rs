//! Path container.
//!
//! A [`Path`] is an ordered list of absolute [`Segment`]s. It is built with
//! the SVG-like builder methods below, collected from segments, or parsed
//! from path text (see [`crate::parse`]). Transforms rewrite a path in
//! place; rendering only borrows it.

use core::fmt;
use core::ops::{Deref, DerefMut};
use core::str::FromStr;

use crate::circle::ArcFlags;
use crate::error::{PathError, Result};
use crate::point::Point;
use crate::segment::Segment;

/// An ordered sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Remove all segments (keeps allocated memory).
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    // ---------------------------------------------------------------
    // Current point
    // ---------------------------------------------------------------

    /// The point the next relative command starts from.
    ///
    /// This is the end of the last segment that moves the pen; after a
    /// `Close` it is the start of the closed subpath. An empty path starts
    /// at the origin.
    pub fn current_point(&self) -> Point {
        for (i, seg) in self.segments.iter().enumerate().rev() {
            if let Some(p) = seg.end_point() {
                return p;
            }
            if *seg == Segment::Close {
                return self.subpath_start_before(i);
            }
        }
        Point::new(0, 0)
    }

    /// Start of the subpath that is open at segment `index`.
    fn subpath_start_before(&self, index: usize) -> Point {
        self.segments[..index]
            .iter()
            .rev()
            .find_map(|seg| match *seg {
                Segment::Move { x, y } => Some(Point::new(x, y)),
                _ => None,
            })
            .unwrap_or(Point::new(0, 0))
    }

    fn relative(&self, dx: i16, dy: i16) -> Point {
        self.current_point() + Point::new(dx, dy)
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    /// Begin a new subpath.
    pub fn move_to(&mut self, x: i16, y: i16) {
        self.push(Segment::move_to(x, y));
    }

    pub fn move_rel(&mut self, dx: i16, dy: i16) {
        let p = self.relative(dx, dy);
        self.push(Segment::move_to_point(p));
    }

    pub fn line_to(&mut self, x: i16, y: i16) {
        self.push(Segment::line_to(x, y));
    }

    pub fn line_rel(&mut self, dx: i16, dy: i16) {
        let p = self.relative(dx, dy);
        self.push(Segment::line_to_point(p));
    }

    /// Horizontal line; stored as a [`Segment::Line`].
    pub fn hline_to(&mut self, x: i16) {
        let y = self.current_point().y;
        self.push(Segment::line_to(x, y));
    }

    pub fn hline_rel(&mut self, dx: i16) {
        let p = self.relative(dx, 0);
        self.push(Segment::line_to_point(p));
    }

    /// Vertical line; stored as a [`Segment::Line`].
    pub fn vline_to(&mut self, y: i16) {
        let x = self.current_point().x;
        self.push(Segment::line_to(x, y));
    }

    pub fn vline_rel(&mut self, dy: i16) {
        let p = self.relative(0, dy);
        self.push(Segment::line_to_point(p));
    }

    pub fn curve_to(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, x: i16, y: i16) {
        self.push(Segment::curve_to(x1, y1, x2, y2, x, y));
    }

    /// Cubic curve with all three points relative to the current point.
    pub fn curve_rel(&mut self, dx1: i16, dy1: i16, dx2: i16, dy2: i16, dx: i16, dy: i16) {
        let c1 = self.relative(dx1, dy1);
        let c2 = self.relative(dx2, dy2);
        let p = self.relative(dx, dy);
        self.push(Segment::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
    }

    pub fn arc_to(&mut self, rx: i16, ry: i16, rotation: i16, flags: ArcFlags, x: i16, y: i16) {
        self.push(Segment::arc_to(rx, ry, rotation, flags, x, y));
    }

    /// Arc whose end point is relative to the current point.
    pub fn arc_rel(&mut self, rx: i16, ry: i16, rotation: i16, flags: ArcFlags, dx: i16, dy: i16) {
        let p = self.relative(dx, dy);
        self.push(Segment::arc_to(rx, ry, rotation, flags, p.x, p.y));
    }

    /// Full circle; the current point does not change.
    pub fn circle(&mut self, x: i16, y: i16, r: i16) {
        self.push(Segment::circle(x, y, r));
    }

    pub fn close_path(&mut self) {
        self.push(Segment::Close);
    }

    // ---------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------

    /// Check that no segment draws before the first `Move`.
    ///
    /// A `Circle` carries its own center and may come first.
    pub fn validate(&self) -> Result<()> {
        let mut has_start = false;
        for (index, seg) in self.segments.iter().enumerate() {
            let kind = seg.kind();
            if kind.needs_start() && !has_start {
                return Err(PathError::MissingMove { index });
            }
            if let Segment::Move { .. } = seg {
                has_start = true;
            }
        }
        Ok(())
    }
}

impl Deref for Path {
    type Target = [Segment];
    fn deref(&self) -> &[Segment] {
        &self.segments
    }
}

impl DerefMut for Path {
    fn deref_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }
}

impl AsRef<[Segment]> for Path {
    fn as_ref(&self) -> &[Segment] {
        &self.segments
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Extend<Segment> for Path {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        self.segments.extend(iter);
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;
    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;
    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Absolute path text, segments separated by a space.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

/// Strict parse, see [`crate::parse::try_parse_path`].
impl FromStr for Path {
    type Err = PathError;
    fn from_str(text: &str) -> Result<Self> {
        crate::parse::try_parse_path(text)
    }
}

// ============================================================================
// Tests
// ============================================================================
