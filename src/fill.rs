//! Scanline fill over traced border pixels.
//!
//! The border of every subpath is given as its pixels in traversal order
//! (an [`Outline`]). Consecutive pixels on the same row are merged into
//! horizontal runs. A run is a *crossing* when the border arrives from one
//! side of its row and leaves to the other side; a run where the border
//! turns back (a local top or bottom) is not. Each row is then swept left to
//! right: border pixels are stroked, and the gaps between runs are filled
//! while the sweep is inside the shape according to the [`FillRule`].
//!
//! Every pixel is emitted exactly once, either as border or as fill.

use crate::point::Point;

/// How crossings decide what is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Inside after an odd number of crossings.
    #[default]
    EvenOdd,
    /// Inside while the signed crossing count is not zero. A crossing
    /// going down counts +1, going up -1.
    NonZero,
}

/// Border pixels of one subpath in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub pixels: Vec<Point>,
    /// Only closed outlines bound an area; open ones are stroked only.
    pub closed: bool,
}

impl Outline {
    pub fn new(closed: bool) -> Self {
        Self {
            pixels: Vec::new(),
            closed,
        }
    }

    /// Append a pixel, skipping a repeat of the last one.
    pub fn push(&mut self, x: i16, y: i16) {
        let p = Point::new(x, y);
        if self.pixels.last() != Some(&p) {
            self.pixels.push(p);
        }
    }
}

/// A horizontal border run `x0..=x1` on row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    y: i16,
    x0: i16,
    x1: i16,
    /// +1 crossing downwards, -1 upwards, 0 not a crossing.
    winding: i8,
}

/// Append the runs of `outline` to `runs`.
fn outline_runs(outline: &Outline, runs: &mut Vec<Run>) {
    let start = runs.len();

    for p in &outline.pixels {
        let same_row = runs.len() > start && runs.last().is_some_and(|r| r.y == p.y);
        if same_row {
            if let Some(run) = runs.last_mut() {
                run.x0 = run.x0.min(p.x);
                run.x1 = run.x1.max(p.x);
            }
        } else {
            runs.push(Run {
                y: p.y,
                x0: p.x,
                x1: p.x,
                winding: 0,
            });
        }
    }

    if !outline.closed {
        return;
    }

    // The outline is a loop: first and last run may be one run.
    if runs.len() - start > 1 && runs[start].y == runs[runs.len() - 1].y {
        if let Some(last) = runs.pop() {
            let first = &mut runs[start];
            first.x0 = first.x0.min(last.x0);
            first.x1 = first.x1.max(last.x1);
        }
    }

    let own = &mut runs[start..];
    let n = own.len();
    if n < 3 {
        return;
    }
    let rows: Vec<i16> = own.iter().map(|r| r.y).collect();
    for (i, run) in own.iter_mut().enumerate() {
        let prev = rows[(i + n - 1) % n];
        let next = rows[(i + 1) % n];
        run.winding = if prev < run.y && next > run.y {
            1
        } else if prev > run.y && next < run.y {
            -1
        } else {
            0
        };
    }
}

/// Stroke and fill a set of outlines.
///
/// Border pixels go to `stroke`, or to `fill` when no stroke callback is
/// given. Interior pixels go to `fill`.
pub fn fill_outlines(
    outlines: &[Outline],
    rule: FillRule,
    mut stroke: Option<&mut dyn FnMut(i16, i16)>,
    fill: &mut dyn FnMut(i16, i16),
) {
    let mut runs = Vec::new();
    for outline in outlines {
        outline_runs(outline, &mut runs);
    }
    runs.sort_by(|a, b| a.y.cmp(&b.y).then(a.x0.cmp(&b.x0)));

    crate::log::debug!(
        outlines = outlines.len(),
        runs = runs.len(),
        crossings = runs.iter().filter(|r| r.winding != 0).count(),
        "fill_outlines"
    );

    for row in runs.chunk_by(|a, b| a.y == b.y) {
        let y = row[0].y;
        // first x of this row not emitted yet
        let mut next_x = i32::MIN;
        let mut winding = 0i32;

        for run in row {
            let (x0, x1) = (run.x0 as i32, run.x1 as i32);
            let inside = match rule {
                FillRule::EvenOdd => winding & 1 != 0,
                FillRule::NonZero => winding != 0,
            };
            if inside {
                for x in next_x..x0 {
                    fill(x as i16, y);
                }
            }
            for x in next_x.max(x0)..=x1 {
                match stroke.as_deref_mut() {
                    Some(stroke) => stroke(x as i16, y),
                    None => fill(x as i16, y),
                }
            }
            next_x = next_x.max(x1 + 1);
            winding += run.winding as i32;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
