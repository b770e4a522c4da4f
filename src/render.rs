//! Rendering segments to pixels.
//!
//! All entry points walk the segments once, tracking the current point and
//! the start of the current subpath, and hand the pixels to a [`Tracer`].
//! Stroking passes pixels straight through; filling collects one
//! [`Outline`] per subpath and runs the scanline fill over them.

use crate::bezier::draw_cubic_bezier;
use crate::circle::{draw_arc, draw_circle, draw_circle_segment, ArcFlags};
use crate::fill::{fill_outlines, FillRule, Outline};
use crate::line::draw_line;
use crate::parse::parse_path;
use crate::point::Point;
use crate::segment::Segment;
use crate::transform::{move_segments, rotate_segments, scale_segments, DEFAULT_SCALE_BASE};

// ============================================================================
// Segment walker
// ============================================================================

/// Receiver of the pixels produced by [`walk_segments`].
trait Tracer {
    /// Next border pixel of the current subpath.
    fn pixel(&mut self, x: i16, y: i16);
    /// The current subpath is complete.
    fn end_subpath(&mut self, closed: bool);
    /// A full circle, which is a closed subpath of its own.
    fn circle(&mut self, center: Point, radius: i16);
}

/// Pixel bookkeeping of one subpath.
///
/// The newest pixel is held back until the next one arrives, so repeats at
/// segment joints are dropped and a closing pixel equal to the first one is
/// not sent twice.
struct Subpath<'a> {
    tracer: &'a mut dyn Tracer,
    first: Option<Point>,
    held: Option<Point>,
    sent: usize,
}

impl<'a> Subpath<'a> {
    fn new(tracer: &'a mut dyn Tracer) -> Self {
        Self {
            tracer,
            first: None,
            held: None,
            sent: 0,
        }
    }

    fn put(&mut self, x: i16, y: i16) {
        let p = Point::new(x, y);
        if self.held == Some(p) {
            return;
        }
        if let Some(h) = self.held.replace(p) {
            self.tracer.pixel(h.x, h.y);
            self.sent += 1;
        }
        if self.first.is_none() {
            self.first = Some(p);
        }
    }

    fn finish(&mut self, closed: bool) {
        if let Some(h) = self.held.take() {
            let repeats_first = closed && self.sent > 0 && self.first == Some(h);
            if !repeats_first {
                self.tracer.pixel(h.x, h.y);
            }
        }
        if self.first.take().is_some() {
            self.tracer.end_subpath(closed);
        }
        self.sent = 0;
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn walk_segments(segments: &[Segment], tracer: &mut dyn Tracer) {
    let mut sub = Subpath::new(tracer);
    let mut pos = Point::new(0, 0);
    let mut start = pos;
    let mut has_start = false;

    for (index, seg) in segments.iter().enumerate() {
        if seg.kind().needs_start() && !has_start {
            crate::log::warn!(index, segment = %seg, "segment before the first move, skipped");
            continue;
        }

        match *seg {
            Segment::Move { x, y } => {
                sub.finish(pos == start);
                pos = Point::new(x, y);
                start = pos;
                has_start = true;
            }
            Segment::Line { x, y } => {
                draw_line(pos.x, pos.y, x, y, &mut |x, y| sub.put(x, y));
                pos = Point::new(x, y);
            }
            Segment::Curve {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                draw_cubic_bezier(pos.x, pos.y, x1, y1, x2, y2, x, y, &mut |x, y| sub.put(x, y));
                pos = Point::new(x, y);
            }
            Segment::Arc {
                rx,
                ry,
                rotation,
                flags,
                x,
                y,
            } => {
                draw_arc(pos.x, pos.y, x, y, rx, ry, rotation, flags, &mut |x, y| {
                    sub.put(x, y)
                });
                pos = Point::new(x, y);
            }
            Segment::Circle { x, y, r } => {
                sub.tracer.circle(Point::new(x, y), r);
            }
            Segment::Close => {
                if pos != start {
                    draw_line(pos.x, pos.y, start.x, start.y, &mut |x, y| sub.put(x, y));
                }
                sub.finish(true);
                pos = start;
            }
        }
    }
    sub.finish(pos == start);
}

// ----------------------------------------------------------------------------

/// Passes every pixel to one callback.
struct StrokeTracer<'a> {
    emit: &'a mut dyn FnMut(i16, i16),
}

impl Tracer for StrokeTracer<'_> {
    fn pixel(&mut self, x: i16, y: i16) {
        (self.emit)(x, y);
    }

    fn end_subpath(&mut self, _closed: bool) {}

    fn circle(&mut self, center: Point, radius: i16) {
        draw_circle(center, radius, self.emit, None);
    }
}

/// Collects one outline per subpath.
#[derive(Default)]
struct OutlineTracer {
    outlines: Vec<Outline>,
    current: Outline,
}

impl Tracer for OutlineTracer {
    fn pixel(&mut self, x: i16, y: i16) {
        self.current.push(x, y);
    }

    fn end_subpath(&mut self, closed: bool) {
        let mut outline = std::mem::take(&mut self.current);
        outline.closed = closed;
        self.outlines.push(outline);
    }

    fn circle(&mut self, center: Point, radius: i16) {
        let mut outline = Outline::new(true);
        let start = Point::new(center.x.saturating_add(radius), center.y);
        draw_circle_segment(center, radius, start, start, ArcFlags::FULL_CIRCLE, &mut |x, y| {
            outline.push(x, y)
        });
        if outline.pixels.len() > 1 && outline.pixels.first() == outline.pixels.last() {
            outline.pixels.pop();
        }
        self.outlines.push(outline);
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Stroke the segments.
///
/// Lines are emitted as drawn; curves and arcs are post-processed into clean
/// pixel runs. Segments that need a start point but come before the first
/// `Move` are skipped.
pub fn draw_segments(segments: &[Segment], emit: &mut dyn FnMut(i16, i16)) {
    crate::log::debug!(segments = segments.len(), "draw_segments");
    walk_segments(segments, &mut StrokeTracer { emit });
}

/// Stroke and fill the segments with the even-odd rule.
///
/// Border pixels go to `stroke`, or to `fill` when no stroke callback is
/// given. Only closed subpaths are filled: those ending with `Close`, full
/// circles, and subpaths that end on their start point.
pub fn fill_segments(
    segments: &[Segment],
    stroke: Option<&mut dyn FnMut(i16, i16)>,
    fill: &mut dyn FnMut(i16, i16),
) {
    fill_segments_with(segments, FillRule::EvenOdd, stroke, fill);
}

/// [`fill_segments`] with an explicit fill rule.
pub fn fill_segments_with(
    segments: &[Segment],
    rule: FillRule,
    stroke: Option<&mut dyn FnMut(i16, i16)>,
    fill: &mut dyn FnMut(i16, i16),
) {
    crate::log::debug!(segments = segments.len(), rule = ?rule, "fill_segments");
    let mut tracer = OutlineTracer::default();
    walk_segments(segments, &mut tracer);
    fill_outlines(&tracer.outlines, rule, stroke, fill);
}

/// Parse `text`, scale it by `scale100 / 100` and move it by `(x, y)`.
///
/// With a `fill` callback the path is filled (border to `stroke`, or to
/// `fill` when `stroke` is `None`); otherwise it is stroked to `stroke`.
/// Malformed text draws the part that parsed.
pub fn path_by_text(
    text: &str,
    x: i16,
    y: i16,
    scale100: i16,
    stroke: Option<&mut dyn FnMut(i16, i16)>,
    fill: Option<&mut dyn FnMut(i16, i16)>,
) {
    let mut path = parse_path(text);
    scale_segments(&mut path, scale100, DEFAULT_SCALE_BASE);
    move_segments(&mut path, x, y);

    match (fill, stroke) {
        (Some(fill), stroke) => fill_segments(&path, stroke, fill),
        (None, Some(stroke)) => draw_segments(&path, stroke),
        (None, None) => {}
    }
}

// ============================================================================
// Scalable drawings
// ============================================================================

/// The area of path coordinates a drawing was designed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewBox {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl ViewBox {
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the box, rounded down.
    pub fn center(&self) -> Point {
        let cx = self.x as i32 + self.width as i32 / 2;
        let cy = self.y as i32 + self.height as i32 / 2;
        Point::new(
            crate::math::saturate_i16(cx as i64),
            crate::math::saturate_i16(cy as i64),
        )
    }
}

/// Fill the drawing `text` so that its view box is `width` pixels wide,
/// turned by `rotation` degrees and centered on `center`.
pub fn draw_scalable(
    text: &str,
    view_box: ViewBox,
    center: Point,
    width: i16,
    rotation: i16,
    stroke: Option<&mut dyn FnMut(i16, i16)>,
    fill: &mut dyn FnMut(i16, i16),
) {
    let mut path = parse_path(text);
    let origin = view_box.center();

    move_segments(&mut path, origin.x.saturating_neg(), origin.y.saturating_neg());
    scale_segments(&mut path, width, view_box.width);
    rotate_segments(&mut path, rotation);
    move_segments(&mut path, center.x, center.y);

    crate::log::debug!(
        segments = path.len(),
        width,
        rotation,
        "draw_scalable"
    );
    fill_segments(&path, stroke, fill);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::try_parse_path;
    use std::collections::HashSet;

    fn stroke_of(text: &str) -> Vec<Point> {
        let path = try_parse_path(text).unwrap();
        let mut pixels = Vec::new();
        draw_segments(&path, &mut |x, y| pixels.push(Point::new(x, y)));
        pixels
    }

    fn fill_of(text: &str) -> (Vec<Point>, Vec<Point>) {
        let path = try_parse_path(text).unwrap();
        let mut border = Vec::new();
        let mut inside = Vec::new();
        fill_segments(
            &path,
            Some(&mut |x, y| border.push(Point::new(x, y))),
            &mut |x, y| inside.push(Point::new(x, y)),
        );
        (border, inside)
    }

    #[test]
    fn test_stroke_square_each_pixel_once() {
        let pixels = stroke_of("M0 0H9V9H0Z");
        assert_eq!(pixels.len(), 36);
        let unique: HashSet<_> = pixels.iter().collect();
        assert_eq!(unique.len(), 36);
        assert_eq!(pixels[0], Point::new(0, 0));
    }

    #[test]
    fn test_stroke_implicitly_closed_square() {
        let pixels = stroke_of("M0 0H9V9H0V0");
        assert_eq!(pixels.len(), 36);
    }

    #[test]
    fn test_stroke_open_polyline_keeps_end() {
        let pixels = stroke_of("M0 0L4 0L4 4");
        assert_eq!(pixels.len(), 9);
        assert_eq!(pixels.last(), Some(&Point::new(4, 4)));
    }

    #[test]
    fn test_lone_move_draws_nothing() {
        assert!(stroke_of("M5 5").is_empty());
        assert!(stroke_of("M5 5 M6 6").is_empty());
    }

    #[test]
    fn test_zero_length_line_is_one_pixel() {
        assert_eq!(stroke_of("M5 5L5 5"), vec![Point::new(5, 5)]);
    }

    #[test]
    fn test_segments_before_move_are_skipped() {
        let segments = [Segment::line_to(10, 10), Segment::move_to(0, 0), Segment::line_to(2, 0)];
        let mut pixels = Vec::new();
        draw_segments(&segments, &mut |x, y| pixels.push(Point::new(x, y)));
        assert_eq!(pixels, vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]);
    }

    #[test]
    fn test_curve_joint_has_no_duplicate() {
        let pixels = stroke_of("M0 0L10 0C15 0 15 10 10 10");
        for pair in pixels.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(pixels.last(), Some(&Point::new(10, 10)));
    }

    #[test]
    fn test_fill_square() {
        let (border, inside) = fill_of("M0 0H9V9H0Z");
        assert_eq!(border.len(), 36);
        assert_eq!(inside.len(), 64);
    }

    #[test]
    fn test_fill_open_path_is_not_filled() {
        let (border, inside) = fill_of("M0 0H9V9H0");
        assert_eq!(border.len(), 28);
        assert!(inside.is_empty());
    }

    #[test]
    fn test_fill_circle_segment() {
        let (border, inside) = fill_of("O20 20 6");
        let mut stroke = Vec::new();
        let mut disc = Vec::new();
        draw_circle(
            Point::new(20, 20),
            6,
            &mut |x, y| stroke.push(Point::new(x, y)),
            Some(&mut |x, y| disc.push(Point::new(x, y))),
        );
        let border: HashSet<_> = border.into_iter().collect();
        let stroke: HashSet<_> = stroke.into_iter().collect();
        assert_eq!(border, stroke);
        assert!(inside.contains(&Point::new(20, 20)));
        assert_eq!(inside.len(), disc.len());
    }

    #[test]
    fn test_stroke_circle_segment_matches_draw_circle() {
        let pixels = stroke_of("O0 0 4");
        let mut expected = Vec::new();
        draw_circle(Point::new(0, 0), 4, &mut |x, y| expected.push(Point::new(x, y)), None);
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_path_by_text_scales_and_moves() {
        let mut pixels = Vec::new();
        path_by_text(
            "M0 0H4",
            10,
            20,
            200,
            Some(&mut |x, y| pixels.push(Point::new(x, y))),
            None,
        );
        assert_eq!(pixels.first(), Some(&Point::new(10, 20)));
        assert_eq!(pixels.last(), Some(&Point::new(18, 20)));
        assert_eq!(pixels.len(), 9);
    }

    #[test]
    fn test_path_by_text_fill_only() {
        let mut all = Vec::new();
        path_by_text("M0 0H9V9H0Z", 0, 0, 100, None, Some(&mut |x, y| all.push((x, y))));
        assert_eq!(all.len(), 100);
    }

    #[test]
    fn test_view_box_center() {
        assert_eq!(ViewBox::new(0, 0, 130, 107).center(), Point::new(65, 53));
        assert_eq!(ViewBox::new(125, 0, 395, 107).center(), Point::new(322, 53));
    }

    #[test]
    fn test_draw_scalable_centers_and_scales() {
        let mut all = Vec::new();
        draw_scalable(
            "M0 0H100V100H0Z",
            ViewBox::new(0, 0, 100, 100),
            Point::new(50, 50),
            20,
            0,
            None,
            &mut |x, y| all.push(Point::new(x, y)),
        );
        let min_x = all.iter().map(|p| p.x).min();
        let max_x = all.iter().map(|p| p.x).max();
        assert_eq!(min_x, Some(40));
        assert_eq!(max_x, Some(60));
        assert_eq!(all.len(), 21 * 21);
    }
}
