//! Gray-world white balance.
//!
//! Assumes the average reflectance of a scene is neutral gray, so a
//! per-channel mean that drifts from the overall mean is a color cast.
//! Each channel gets the gain that pulls its mean onto the overall mean.

use crate::buffer::{Channel, PixelBuffer};
use crate::color::factors::ScaleFactors;
use crate::error::EditError;

/// Arithmetic mean of each color channel over all pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMeans {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ChannelMeans {
    /// Mean of the three channel means: the gray level to balance towards.
    pub fn gray_target(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }
}

/// Integer channel sums, exact for any realistic image size.
fn channel_sums(source: &PixelBuffer) -> [u64; 3] {
    let mut sums = [0u64; 3];
    for px in source.pixels() {
        for (sum, channel) in sums.iter_mut().zip(Channel::COLOR) {
            *sum += px[channel.offset()] as u64;
        }
    }
    sums
}

fn means_from_sums(sums: [u64; 3], pixel_count: usize) -> ChannelMeans {
    let n = pixel_count as f64;
    ChannelMeans {
        r: sums[0] as f64 / n,
        g: sums[1] as f64 / n,
        b: sums[2] as f64 / n,
    }
}

pub fn channel_means(source: &PixelBuffer) -> ChannelMeans {
    means_from_sums(channel_sums(source), source.pixel_count())
}

/// Estimate the scale factors that neutralize the image's average color.
///
/// Fails with [`EditError::DegenerateChannel`] when a channel is zero in
/// every pixel, since no finite gain can lift it to the target.
pub fn estimate(source: &PixelBuffer) -> Result<ScaleFactors, EditError> {
    let sums = channel_sums(source);
    for (&channel, &sum) in Channel::COLOR.iter().zip(sums.iter()) {
        if sum == 0 {
            return Err(EditError::DegenerateChannel(channel));
        }
    }

    let means = means_from_sums(sums, source.pixel_count());
    let target = means.gray_target();

    Ok(ScaleFactors {
        r: target / means.r,
        g: target / means.g,
        b: target / means.b,
    })
}
