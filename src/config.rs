use std::ops::RangeInclusive;
use std::path::Path;

use image::imageops::FilterType;

/// Slider bounds for a single scale factor.
pub const FACTOR_RANGE: RangeInclusive<f64> = 0.0..=3.0;
/// Slider step for a single scale factor.
pub const FACTOR_STEP: f64 = 0.01;

/// Decode-side policy: how large a loaded image may be.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Wider images are scaled down to this width, keeping aspect ratio.
    pub max_width: u32,
    pub filter: FilterType,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            filter: FilterType::Triangle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossy, alpha dropped. Quality is 1..=100.
    Jpeg { quality: u8 },
    Png,
}

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "JPEG",
            ExportFormat::Png => "PNG",
        }
    }

    /// Format named by the path's extension, or `None` when the extension
    /// is missing or not one we encode. JPEG paths use `quality`.
    pub fn from_extension(path: &Path, quality: u8) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg { quality }),
            _ => None,
        }
    }

    pub fn quality(self) -> Option<u8> {
        match self {
            ExportFormat::Jpeg { quality } => Some(quality),
            ExportFormat::Png => None,
        }
    }
}

/// Export-side policy.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Suggested file name for the save dialog.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg { quality: 90 },
            file_name: "edited.jpg".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn jpeg_quality(&self) -> u8 {
        self.format.quality().unwrap_or(90)
    }

    /// The path's extension wins when it names a known format;
    /// otherwise the configured format is used.
    pub fn format_for(&self, path: &Path) -> ExportFormat {
        ExportFormat::from_extension(path, self.jpeg_quality()).unwrap_or(self.format)
    }
}
