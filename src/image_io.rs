use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::metadata::Orientation;
use image::{
    DynamicImage, ExtendedColorType, GenericImageView, ImageDecoder, ImageEncoder, ImageReader,
};
use std::io::Cursor;
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::config::{ExportConfig, ExportFormat, IngestConfig};
use crate::error::EditError;

/// Target size for an image under a width cap.
/// Height follows proportionally, rounded to the nearest pixel.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    let max_width = max_width.max(1);
    if width <= max_width {
        return (width, height);
    }
    let scale = max_width as f64 / width as f64;
    let new_h = ((height as f64 * scale).round() as u32).max(1);
    (max_width, new_h)
}

/// Decode with the format sniffed from content, then rotate/flip as the
/// EXIF orientation tag asks so the pixels are upright.
fn decode_upright(bytes: &[u8]) -> Result<DynamicImage, EditError> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| EditError::Decode(e.to_string()))?;

    let orientation = decoder.orientation().unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable orientation tag: {e}");
        Orientation::NoTransforms
    });
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| EditError::Decode(e.to_string()))?;

    if orientation != Orientation::NoTransforms {
        log::debug!("Applying EXIF orientation {orientation:?}");
        img.apply_orientation(orientation);
    }
    Ok(img)
}

/// Decode encoded image bytes into an upright, width-capped RGBA buffer.
pub fn decode_image(bytes: &[u8], config: &IngestConfig) -> Result<PixelBuffer, EditError> {
    let img = decode_upright(bytes)?;

    let (w, h) = img.dimensions();
    let (new_w, new_h) = scaled_dimensions(w, h, config.max_width);
    let img = if (new_w, new_h) != (w, h) {
        log::debug!("Downscaling {w}x{h} -> {new_w}x{new_h} ({:?})", config.filter);
        img.resize_exact(new_w, new_h, config.filter)
    } else {
        img
    };

    let buffer = PixelBuffer::try_from(img.to_rgba8())?;
    log::info!(
        "Decoded image: source {}x{}, loaded {}x{}",
        w,
        h,
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}

pub fn load_image(path: &Path, config: &IngestConfig) -> Result<PixelBuffer, EditError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes, config)
}

/// Encode a frame for export. JPEG drops alpha; PNG keeps it.
pub fn encode_frame(frame: &PixelBuffer, format: ExportFormat) -> Result<Vec<u8>, EditError> {
    let (w, h) = (frame.width(), frame.height());
    let mut out = Vec::new();

    let result = match format {
        ExportFormat::Jpeg { quality } => {
            let rgb: Vec<u8> = frame
                .pixels()
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .encode(&rgb, w, h, ExtendedColorType::Rgb8)
        }
        ExportFormat::Png => {
            PngEncoder::new(&mut out).write_image(frame.as_bytes(), w, h, ExtendedColorType::Rgba8)
        }
    };
    result.map_err(|e| EditError::Encode(e.to_string()))?;

    Ok(out)
}

/// Encode and write a frame. A known extension picks the format;
/// anything else falls back to the configured one.
pub fn save_frame(
    frame: &PixelBuffer,
    path: &Path,
    config: &ExportConfig,
) -> Result<(), EditError> {
    let format = config.format_for(path);
    let bytes = encode_frame(frame, format)?;
    std::fs::write(path, &bytes)?;
    log::info!(
        "Saved {}x{} {} ({} bytes) to {}",
        frame.width(),
        frame.height(),
        format.name(),
        bytes.len(),
        path.display()
    );
    Ok(())
}
