// Copyright 2025. Rendering helpers for inspecting gfxpath output.
//
// Provides a small color pixel buffer, BMP output, ASCII art output, and the
// bundled logo drawings.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write as IoWrite};
use std::path::Path;

use gfxpath::color::with_color;
use gfxpath::{draw_scalable, path_by_text, Argb, Point, ViewBox};

// ============================================================================
// Pixel Buffer
// ============================================================================

/// A color pixel buffer that clips drawing to its bounds.
#[derive(Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major, top-to-bottom. Length = width * height.
    pub data: Vec<Argb>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, background: Argb) -> Self {
        Self {
            width,
            height,
            data: vec![background; (width * height) as usize],
        }
    }

    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i16, y: i16) -> Option<Argb> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Set one pixel; pixels outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Argb) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color;
        }
    }

    pub fn count(&self, color: Argb) -> usize {
        self.data.iter().filter(|&&c| c == color).count()
    }

    /// One character per pixel: `#` for `stroke`, `+` for `fill`, `.`
    /// otherwise.
    pub fn to_ascii(&self, stroke: Argb, fill: Argb) -> String {
        let mut out = String::with_capacity(self.data.len() + self.height as usize);
        for row in self.data.chunks(self.width.max(1) as usize) {
            for &c in row {
                out.push(if c == stroke {
                    '#'
                } else if c == fill {
                    '+'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Colors used by the render helpers.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Argb,
    pub stroke: Argb,
    pub fill: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Argb::WHITE,
            stroke: Argb::BLACK,
            fill: Argb::GRAY,
        }
    }
}

/// Options for [`render_path`].
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub scale100: i16,
    pub offset: Point,
    pub filled: bool,
    pub palette: Palette,
}

impl RenderOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale100: 100,
            offset: Point::new(0, 0),
            filled: true,
            palette: Palette::default(),
        }
    }
}

/// Render path text into a new buffer.
pub fn render_path(text: &str, opts: &RenderOptions) -> PixelBuffer {
    let palette = opts.palette;
    let buf = RefCell::new(PixelBuffer::new(opts.width, opts.height, palette.background));

    let mut stroke = |x, y| buf.borrow_mut().set_pixel(x, y, palette.stroke);
    let mut fill = |x, y| buf.borrow_mut().set_pixel(x, y, palette.fill);
    let fill: Option<&mut dyn FnMut(i16, i16)> = if opts.filled { Some(&mut fill) } else { None };

    path_by_text(text, opts.offset.x, opts.offset.y, opts.scale100, Some(&mut stroke), fill);
    buf.into_inner()
}

// ============================================================================
// Logo drawings
// ============================================================================

/// View box shared by the logo drawings.
pub const LOGO_VIEW_HEIGHT: i16 = 107;

/// The logo mark.
pub const LOGO: &str = "M3 45l8 13L37 42L29 30L3 45Z M17 88l14 2l4-30l-14-2l-4 30Z m42 17L70 94 \
    L49 73L38 83l21 22Z M98 82L97 67L67 70l1 15l30-3Z m7-45l-13-8L76 54l12 8 \
    l17-25Z M74 4L60 9l9 28l14-4L74 4Z M29 8L23 21L52 32l5-14L29 8Z";

/// The lettering next to the mark.
pub const LOGO_TEXT: &str = "M125 37V26h64V37H163V82H151V37H125Z \
    M202 26V82H214V62H247C249 62 251 63 252 64 C 253 65 253 66 253 \
    68V82H265V67C265 63 264 60 262 59 C 261 57 259 57 258 56 C 260 55 261 54 \
    263 52 C 265 50 266 46 266 43 C 266 37 264 33 260 30 C 257 27 251 26 244 \
    26H202Z M242 52H214V36H242C246 36 249 37 251 38 C 252 39 253 41 253 44 C \
    253 47 252 49 250 50 C 249 51 246 52 242 52Z \
    M281 82V26H298L322 68 347 26H364V82H351V41L328 82H317L293 41V82H281Z \
    M397 26H380V82H393V39L432 82H448V26H436V69L397 26Z \
    M477 26H465V82H517V71H477V26Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logo {
    Mark,
    Text,
    Full,
}

impl Logo {
    pub fn view_box(self) -> ViewBox {
        match self {
            Logo::Mark => ViewBox::new(0, 0, 130, LOGO_VIEW_HEIGHT),
            Logo::Text => ViewBox::new(125, 0, 395, LOGO_VIEW_HEIGHT),
            Logo::Full => ViewBox::new(0, 0, 519, LOGO_VIEW_HEIGHT),
        }
    }

    pub fn path_text(self) -> String {
        match self {
            Logo::Mark => LOGO.to_string(),
            Logo::Text => LOGO_TEXT.to_string(),
            Logo::Full => format!("{LOGO} {LOGO_TEXT}"),
        }
    }
}

/// Render a logo centered in a new buffer, `logo_width` pixels wide.
pub fn render_logo(logo: Logo, width: u32, height: u32, logo_width: i16, rotation: i16) -> PixelBuffer {
    let palette = Palette::default();
    let mut buf = PixelBuffer::new(width, height, palette.background);
    let center = Point::new((width / 2) as i16, (height / 2) as i16);
    {
        let mut draw = |x: i16, y: i16, c: Argb| buf.set_pixel(x, y, c);
        let mut ink = with_color(&mut draw, palette.stroke);
        draw_scalable(
            &logo.path_text(),
            logo.view_box(),
            center,
            logo_width,
            rotation,
            None,
            &mut ink,
        );
    }
    buf
}

// ============================================================================
// BMP output (32-bit BGRA, top-down)
// ============================================================================

/// Save a pixel buffer as a 32-bit BMP file (top-down, BGRA).
pub fn save_bmp(path: &Path, buf: &PixelBuffer) -> io::Result<()> {
    let w = buf.width;
    let h = buf.height;
    let row_size = w * 4;
    let image_size = row_size * h;
    let file_size = 14 + 40 + image_size;

    let mut f = File::create(path)?;

    // BMP file header (14 bytes)
    f.write_all(b"BM")?;
    f.write_all(&file_size.to_le_bytes())?;
    f.write_all(&[0u8; 4])?; // reserved
    f.write_all(&(14u32 + 40).to_le_bytes())?; // pixel data offset

    // BITMAPINFOHEADER (40 bytes)
    f.write_all(&40u32.to_le_bytes())?;
    f.write_all(&w.to_le_bytes())?;
    f.write_all(&(-(h as i32)).to_le_bytes())?; // negative height = top-down
    f.write_all(&1u16.to_le_bytes())?; // planes
    f.write_all(&32u16.to_le_bytes())?; // bits per pixel
    f.write_all(&0u32.to_le_bytes())?; // BI_RGB
    f.write_all(&image_size.to_le_bytes())?;
    f.write_all(&[0u8; 8])?; // resolution
    f.write_all(&0u32.to_le_bytes())?; // colors used
    f.write_all(&0u32.to_le_bytes())?; // important colors

    let mut row = Vec::with_capacity(row_size as usize);
    for line in buf.data.chunks(w.max(1) as usize) {
        row.clear();
        for c in line {
            row.extend_from_slice(&[c.b, c.g, c.r, c.a]);
        }
        f.write_all(&row)?;
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
