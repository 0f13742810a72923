use gw_core::charset::{Charset, LuminanceLut};
use gw_core::Rgb;

/// Mappe un échantillon RGB vers un glyphe du charset par tranche de luma.
///
/// # Example
/// ```
/// use gw_core::{Charset, Rgb};
/// use gw_ascii::luminance::IntensityMapper;
/// let mapper = IntensityMapper::new(&Charset::new("default", "@%#*+=-:. ").unwrap());
/// assert_eq!(mapper.glyph(Rgb::new(0, 0, 0)), '@');
/// assert_eq!(mapper.glyph(Rgb::new(128, 128, 128)), '+');
/// assert_eq!(mapper.glyph(Rgb::WHITE), ' ');
/// ```
#[derive(Clone)]
pub struct IntensityMapper {
    lut: LuminanceLut,
}

impl IntensityMapper {
    /// Build the mapper (and its LUT) for a charset.
    #[must_use]
    pub fn new(charset: &Charset) -> Self {
        log::debug!("LUT construite pour le charset '{}' ({} glyphes)", charset.name(), charset.len());
        Self {
            lut: LuminanceLut::new(charset),
        }
    }

    /// Glyph for a sample.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, sample: Rgb) -> char {
        self.lut.map_rgb(sample)
    }
}
