use std::fmt;

use image::RgbaImage;

use crate::error::EditError;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const COLOR: &[Channel] = &[Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside an RGBA pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable RGBA8 image: row-major, interleaved, alpha last.
///
/// The byte length always equals `width * height * 4` and both dimensions
/// are non-zero. Transforms never mutate a buffer; they build a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, EditError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL));

        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(EditError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, EditError> {
        let pixels = (width as usize).saturating_mul(height as usize);
        Self::new(width, height, rgba.repeat(pixels))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate pixels as `[r, g, b, a]` slices.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(BYTES_PER_PIXEL)
    }

    /// A buffer with this buffer's dimensions and new pixel data.
    ///
    /// `data` must have the same length as `self`; transforms that map each
    /// pixel to exactly one pixel satisfy this by construction.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            self.data.len(),
            "pixel data length must match {}x{}",
            self.width,
            self.height
        );
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = EditError;

    fn try_from(img: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        PixelBuffer::new(width, height, img.into_raw())
    }
}
