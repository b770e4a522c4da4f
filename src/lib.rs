//! # gfxpath
//!
//! Integer-only vector path rasterizer for small monochrome and grayscale
//! displays. Shapes are described by SVG-like path text and drawn pixel by
//! pixel through callbacks; there is no frame buffer and no floating point.
//!
//! It provides:
//!
//! - Bresenham lines and cubic Bezier curves in 10-bit fixed point
//! - Circles, circle segments and elliptical arcs from a degree sine table
//! - A three-point pixel post-processor that removes staircase corners
//! - Path text parsing (`M L H V C A Z` plus `O` for circles)
//! - Scale, rotate, move and arbitrary point transforms
//! - Stroking and scanline filling with even-odd or non-zero rules
//!
//! ## Pipeline
//!
//! 1. **Path**: segments built in code or parsed from text
//! 2. **Transform**: segments rewritten in place
//! 3. **Generators**: lines, curves, arcs and circles produce pixels
//! 4. **Fill**: border runs are swept row by row
//! 5. **Callbacks**: every pixel goes to a `FnMut(i16, i16)`
//!
//! ```
//! use gfxpath::{fill_segments, parse_path};
//!
//! let path = parse_path("M0 0H9V9H0Z");
//! let mut border = 0;
//! let mut inside = 0;
//! fill_segments(&path, Some(&mut |_, _| border += 1), &mut |_, _| inside += 1);
//! assert_eq!((border, inside), (36, 64));
//! ```

mod log;

// Foundation
pub mod error;
pub mod math;
pub mod point;

// Pixel generators
pub mod bezier;
pub mod circle;
pub mod line;
pub mod pixel_stream;

// Paths
pub mod parse;
pub mod path;
pub mod segment;
pub mod transform;

// Rendering
pub mod color;
pub mod fill;
pub mod render;

pub use circle::ArcFlags;
pub use color::Argb;
pub use error::{PathError, Result};
pub use fill::FillRule;
pub use parse::{parse_path, try_parse_path};
pub use path::Path;
pub use point::Point;
pub use render::{draw_scalable, draw_segments, fill_segments, fill_segments_with, path_by_text, ViewBox};
pub use segment::{Segment, SegmentKind};
pub use transform::{move_segments, rotate_segments, scale_segments, transform_segments};
