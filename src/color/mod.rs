//! Per-channel color math on RGBA8 buffers.

pub mod correction;
pub mod factors;
pub mod gray_world;

pub use correction::apply;
pub use factors::ScaleFactors;
pub use gray_world::{ChannelMeans, channel_means, estimate};
