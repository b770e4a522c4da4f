//! Integer math utilities.
//!
//! Table-driven sine/cosine scaled by 256, fixed-point rounding helpers, an
//! integer square root, and saturating narrowing back to pixel coordinates.
//! Nothing in here touches floating point.

// ============================================================================
// Fixed-point scales
// ============================================================================

/// Shift of the 8-bit trig scale (`sin256` returns values scaled by 256).
pub const TRIG_SHIFT: u32 = 8;

/// Shift of the 10-bit scale used by the Bezier flattener.
pub const BEZIER_SCALE_SHIFT: u32 = 10;

/// `1 << BEZIER_SCALE_SHIFT`.
pub const BEZIER_SCALE: i64 = 1 << BEZIER_SCALE_SHIFT;

/// Remove the 256 scale with rounding: `(v + 128) >> 8`.
#[inline]
pub fn scale256(v: i32) -> i32 {
    (v + (1 << (TRIG_SHIFT - 1))) >> TRIG_SHIFT
}

/// 64-bit variant of [`scale256`].
#[inline]
pub fn scale256_wide(v: i64) -> i64 {
    (v + (1 << (TRIG_SHIFT - 1))) >> TRIG_SHIFT
}

/// Remove the 1024 scale with rounding: `(v + 512) >> 10`.
#[inline]
pub fn scale1024(v: i64) -> i64 {
    (v + BEZIER_SCALE / 2) >> BEZIER_SCALE_SHIFT
}

/// Signed division rounding half away from zero. `den` must not be zero.
#[inline]
pub fn div_round(num: i128, den: i128) -> i128 {
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    if num >= 0 {
        (num + den / 2) / den
    } else {
        (num - den / 2) / den
    }
}

// ============================================================================
// Sine / cosine tables
// ============================================================================

/// `256 * sin(d)` for d in 0..=90 degrees. The last entry is exact so that
/// the quarter turn reaches full scale.
const SIN256_TABLE: [i32; 91] = [
    0, 4, 9, 13, 18, 22, 27, 31, 35, 40, 44, //
    49, 53, 57, 62, 66, 70, 75, 79, 83, 87, //
    91, 96, 100, 104, 108, 112, 116, 120, 124, 128, //
    131, 135, 139, 143, 146, 150, 153, 157, 160, 164, //
    167, 171, 174, 177, 180, 183, 186, 190, 192, 195, //
    198, 201, 204, 206, 209, 211, 214, 216, 219, 221, //
    223, 225, 227, 229, 231, 233, 235, 236, 238, 240, //
    241, 243, 244, 245, 246, 247, 248, 249, 250, 251, //
    252, 253, 253, 254, 254, 254, 255, 255, 255, 256,
];

/// Approximate `256 * sin(degree)`.
///
/// Any degree value is accepted; it is folded into `[0, 360)` with a true
/// modulo before the table lookup.
pub fn sin256(degree: i32) -> i32 {
    let degree = degree.rem_euclid(360) as usize;
    if degree <= 90 {
        SIN256_TABLE[degree]
    } else if degree <= 180 {
        SIN256_TABLE[180 - degree]
    } else if degree <= 270 {
        -SIN256_TABLE[degree - 180]
    } else {
        -SIN256_TABLE[360 - degree]
    }
}

/// Approximate `256 * cos(degree)`.
#[inline]
pub fn cos256(degree: i32) -> i32 {
    // i64 fold keeps the +90 shift from overflowing at i32::MAX.
    sin256((degree as i64 + 90).rem_euclid(360) as i32)
}

// ============================================================================
// Integer square root and narrowing
// ============================================================================

/// Floor of the square root of `v`.
pub fn isqrt(v: u128) -> u128 {
    if v < 2 {
        return v;
    }
    // Newton iteration from an upper bound; converges monotonically down.
    let mut x = 1u128 << ((128 - v.leading_zeros()).div_ceil(2));
    loop {
        let y = (x + v / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Square root of `v`, rounded to the nearest integer.
pub fn isqrt_round(v: u128) -> u128 {
    let r = isqrt(v);
    // (r + 0.5)^2 = r^2 + r + 0.25; compare against v without fractions.
    if v > r * r + r {
        r + 1
    } else {
        r
    }
}

/// Clamp a widened value back into the `i16` coordinate range.
#[inline]
pub fn saturate_i16(v: i64) -> i16 {
    v.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

// ============================================================================
// Tests
// ============================================================================
