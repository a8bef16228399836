//! Asset decoding: colors, raster/SVG images, and text rasterization.

pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod text;
