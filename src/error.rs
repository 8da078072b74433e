use crate::buffer::Channel;

/// Every way an editing operation can fail.
///
/// All variants are recoverable: the session stays alive and the caller
/// decides how to surface the message.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("invalid buffer: {len} bytes cannot hold a {width}x{height} RGBA image")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("scale factors must be finite and non-negative (r={r}, g={g}, b={b})")]
    InvalidFactors { r: f64, g: f64, b: f64 },

    #[error("cannot auto-balance: the {0} channel is zero across the whole image")]
    DegenerateChannel(Channel),

    #[error("no image loaded")]
    NoImageLoaded,

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
