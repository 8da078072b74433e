use crate::buffer::PixelBuffer;
use crate::color::factors::ScaleFactors;

/// Scale a byte value and store it back into 8 bits:
/// round half away from zero, then clamp to [0, 255].
pub fn scale_byte(value: u8, factor: f64) -> u8 {
    (value as f64 * factor).round().clamp(0.0, 255.0) as u8
}

/// Lookup table mapping every input byte to its scaled output.
fn channel_lut(factor: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = scale_byte(v as u8, factor);
    }
    lut
}

/// Multiply R, G and B of every pixel by their factors, leaving alpha untouched.
///
/// Always returns a new buffer with the source's dimensions. Factors are
/// expected to be finite and non-negative; callers validate them first.
pub fn apply(source: &PixelBuffer, factors: ScaleFactors) -> PixelBuffer {
    debug_assert!(factors.validate().is_ok(), "unvalidated factors: {factors:?}");

    let luts = [
        channel_lut(factors.r),
        channel_lut(factors.g),
        channel_lut(factors.b),
    ];

    let mut out = Vec::with_capacity(source.as_bytes().len());
    for px in source.pixels() {
        out.push(luts[0][px[0] as usize]);
        out.push(luts[1][px[1] as usize]);
        out.push(luts[2][px[2] as usize]);
        out.push(px[3]);
    }

    source.with_data(out)
}
