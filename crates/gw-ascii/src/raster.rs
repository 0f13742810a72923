use gw_core::traits::Shader;
use gw_core::{Charset, Grid, Rgb, StyledCell};

use crate::luminance::IntensityMapper;
use crate::shimmer::shimmer_sample;

/// Shader des images : shimmer bleu puis glyphe par luma.
///
/// La couleur du glyphe est l'échantillon modulé. Le shimmer n'est
/// appliqué que si la sortie est colorée.
///
/// # Example
/// ```
/// use gw_core::traits::Shader;
/// use gw_core::{Charset, Grid, Rgb};
/// use gw_ascii::RasterShader;
/// let grid = Grid::from_fn(2, 1, |_, _| Rgb::new(0, 0, 0));
/// let shader = RasterShader::new(grid, &Charset::new("d", "@ ").unwrap());
/// let cells = shader.shade(0.0, false);
/// assert_eq!(cells.get(1, 0).glyph, '@');
/// ```
pub struct RasterShader {
    samples: Grid<Rgb>,
    mapper: IntensityMapper,
}

impl RasterShader {
    /// Shader over an immutable sample grid.
    #[must_use]
    pub fn new(samples: Grid<Rgb>, charset: &Charset) -> Self {
        Self {
            samples,
            mapper: IntensityMapper::new(charset),
        }
    }

    /// The source samples.
    #[must_use]
    pub fn samples(&self) -> &Grid<Rgb> {
        &self.samples
    }
}

impl Shader for RasterShader {
    fn shade(&self, phase: f64, color: bool) -> Grid<StyledCell> {
        self.samples.map_indexed(|x, y, &sample| {
            let sample = if color {
                shimmer_sample(sample, x, y, phase)
            } else {
                sample
            };
            StyledCell::with_fg(self.mapper.glyph(sample), Some(sample))
        })
    }

    fn name(&self) -> &'static str {
        "raster"
    }
}

#[cfg(test)]
mod tests {
    use gw_core::charset::CHARSET_DEFAULT;

    use super::*;

    fn default_charset() -> Charset {
        Charset::new("default", CHARSET_DEFAULT).unwrap()
    }

    #[test]
    fn glyph_follows_modulated_luma() {
        let blue = Rgb::new(0, 0, 255);
        let shader = RasterShader::new(Grid::from_fn(1, 1, |_, _| blue), &default_charset());
        let phase = std::f64::consts::FRAC_PI_2;
        let cell = *shader.shade(phase, true).get(0, 0);
        let modulated = shimmer_sample(blue, 0, 0, phase);
        assert_eq!(cell.fg, Some(modulated));
        assert_eq!(cell.glyph, IntensityMapper::new(&default_charset()).glyph(modulated));
    }

    #[test]
    fn no_shimmer_without_color() {
        let blue = Rgb::new(10, 20, 220);
        let shader = RasterShader::new(Grid::from_fn(3, 3, |_, _| blue), &default_charset());
        let a = shader.shade(0.0, false);
        let b = shader.shade(2.0, false);
        assert_eq!(a, b);
        assert!(a.rows().flatten().all(|c| c.fg == Some(blue)));
    }

    #[test]
    fn phase_changes_blue_cells_only() {
        let grid = Grid::from_fn(2, 1, |x, _| if x == 0 { Rgb::new(10, 20, 220) } else { Rgb::new(200, 50, 50) });
        let shader = RasterShader::new(grid, &default_charset());
        let a = shader.shade(0.0, true);
        let b = shader.shade(1.5, true);
        assert_ne!(a.get(0, 0).fg, b.get(0, 0).fg);
        assert_eq!(a.get(1, 0), b.get(1, 0));
    }
}
