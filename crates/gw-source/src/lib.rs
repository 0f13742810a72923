/// Grid sources for glyphwave: raster images and token canvases.

pub mod dither;
pub mod image;
pub mod resize;
pub mod token;
