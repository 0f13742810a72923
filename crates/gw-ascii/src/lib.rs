/// Conversion engine for glyphwave.
///
/// Maps samples and tokens to glyphs, applies the shimmer modulation and
/// composes styled cells into terminal frames.
pub mod compose;
pub mod luminance;
pub mod raster;
pub mod shimmer;
pub mod token;

pub use compose::FrameRenderer;
pub use raster::RasterShader;
pub use token::TokenShader;
