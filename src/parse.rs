//! Path text parser.
//!
//! Reads the SVG path data subset `M m L l H h V v C c A a Z z` plus the
//! full-circle command `O cx cy r`. Example: `"M4 8l12-6l10 10h-8v4h-6z"`.
//!
//! - Numbers are signed decimals; a fractional part is rounded to the
//!   nearest integer, halves away from zero.
//! - Whitespace and commas separate values; a sign also starts a new value.
//! - Arc flags are a single `0` or `1` character and need no separator.
//! - Values after a complete command repeat it; after `M`/`m` the repeated
//!   command is `L`/`l`.
//!
//! Lower-case commands are relative to the current point. The parser only
//! produces absolute segments.

use crate::circle::ArcFlags;
use crate::error::{PathError, Result};
use crate::path::Path;

const COMMANDS: &[u8] = b"MmLlHhVvCcAaZzO";

/// Parse path text, stopping at the first error.
pub fn try_parse_path(text: &str) -> Result<Path> {
    let mut path = Path::new();
    parse_into(text, &mut path)?;
    Ok(path)
}

/// Parse path text leniently.
///
/// On the first error the segments read so far are returned; the
/// incomplete segment is dropped and a warning is logged.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn parse_path(text: &str) -> Path {
    let mut path = Path::new();
    if let Err(err) = parse_into(text, &mut path) {
        crate::log::warn!(error = %err, segments = path.len(), "path text parsed partially");
    }
    path
}

/// Append the segments of `text` to `path`.
///
/// Every segment is pushed only after all its values were read, so on
/// error `path` holds exactly the complete segments before it.
pub fn parse_into(text: &str, path: &mut Path) -> Result<()> {
    let mut scanner = Scanner::new(text);
    let mut repeat: Option<u8> = None;

    loop {
        scanner.skip_separators();
        let Some(b) = scanner.peek() else {
            break;
        };

        let command = if b.is_ascii_alphabetic() {
            if !COMMANDS.contains(&b) {
                return Err(scanner.unknown_command());
            }
            scanner.pos += 1;
            b
        } else {
            match repeat {
                Some(c) if c != b'Z' && c != b'z' => c,
                _ => return Err(scanner.unknown_command()),
            }
        };

        match command {
            b'M' => {
                let (x, y) = (scanner.number()?, scanner.number()?);
                path.move_to(x, y);
            }
            b'm' => {
                let (x, y) = (scanner.number()?, scanner.number()?);
                path.move_rel(x, y);
            }
            b'L' => {
                let (x, y) = (scanner.number()?, scanner.number()?);
                path.line_to(x, y);
            }
            b'l' => {
                let (x, y) = (scanner.number()?, scanner.number()?);
                path.line_rel(x, y);
            }
            b'H' => path.hline_to(scanner.number()?),
            b'h' => path.hline_rel(scanner.number()?),
            b'V' => path.vline_to(scanner.number()?),
            b'v' => path.vline_rel(scanner.number()?),
            b'C' | b'c' => {
                let mut v = [0i16; 6];
                for slot in v.iter_mut() {
                    *slot = scanner.number()?;
                }
                if command == b'C' {
                    path.curve_to(v[0], v[1], v[2], v[3], v[4], v[5]);
                } else {
                    path.curve_rel(v[0], v[1], v[2], v[3], v[4], v[5]);
                }
            }
            b'A' | b'a' => {
                let rx = scanner.number()?;
                let ry = scanner.number()?;
                let rotation = scanner.number()?;
                let large_arc = scanner.flag()?;
                let sweep = scanner.flag()?;
                let (x, y) = (scanner.number()?, scanner.number()?);
                let flags = ArcFlags::from_svg(large_arc, sweep);
                if command == b'A' {
                    path.arc_to(rx, ry, rotation, flags, x, y);
                } else {
                    path.arc_rel(rx, ry, rotation, flags, x, y);
                }
            }
            b'O' => {
                let (x, y, r) = (scanner.number()?, scanner.number()?, scanner.number()?);
                path.circle(x, y, r);
            }
            _ => path.close_path(),
        }

        repeat = Some(match command {
            b'M' => b'L',
            b'm' => b'l',
            c => c,
        });
    }

    crate::log::debug!(segments = path.len(), "parsed path text");
    Ok(())
}

// ============================================================================
// Scanner
// ============================================================================

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn unknown_command(&self) -> PathError {
        let command = self.text[self.pos..].chars().next().unwrap_or('\0');
        PathError::UnknownCommand {
            command,
            offset: self.pos,
        }
    }

    fn digits(&mut self) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.bytes[start..self.pos]
    }

    /// Read one signed number and round it to an integer.
    fn number(&mut self) -> Result<i16> {
        self.skip_separators();
        let offset = self.pos;

        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let int_part = self.digits();
        let mut frac_part: &[u8] = &[];
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_part = self.digits();
        }
        if int_part.is_empty() && frac_part.is_empty() {
            self.pos = offset;
            return Err(PathError::MissingNumber { offset });
        }

        let mut value: i64 = 0;
        for &d in int_part {
            value = value * 10 + (d - b'0') as i64;
            if value > i16::MAX as i64 + 1 {
                return Err(PathError::NumberOutOfRange { offset });
            }
        }
        if frac_part.first().is_some_and(|&d| d >= b'5') {
            value += 1;
        }
        if negative {
            value = -value;
        }

        i16::try_from(value).map_err(|_| PathError::NumberOutOfRange { offset })
    }

    /// Read an arc flag: a single `0` or `1`.
    fn flag(&mut self) -> Result<bool> {
        self.skip_separators();
        let offset = self.pos;
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(PathError::InvalidFlag { offset }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
