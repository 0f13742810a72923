use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use gw_core::{Grid, Rgb};
use image::RgbImage;

/// Resizer wrappant fast_image_resize, sortie directe en grille RGB.
///
/// Filtre bicubique (Catmull-Rom).
///
/// # Example
/// ```
/// use gw_source::resize::Resizer;
/// let mut r = Resizer::new();
/// let img = image::RgbImage::from_pixel(8, 8, image::Rgb([10, 20, 30]));
/// let grid = r.resize(&img, 8, 8).unwrap();
/// assert_eq!(grid.width(), 8);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom)),
        }
    }

    /// Resize `src` to `width × height` samples.
    ///
    /// Same-size input is copied without filtering.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or the resize operation fails.
    pub fn resize(&mut self, src: &RgbImage, width: u32, height: u32) -> Result<Grid<Rgb>> {
        let (src_w, src_h) = src.dimensions();
        if (src_w, src_h) == (width, height) {
            return Ok(grid_from_rgb_bytes(width, height, src.as_raw()));
        }

        let src_image = Image::from_vec_u8(src_w, src_h, src.as_raw().clone(), PixelType::U8x3)
            .context("Dimensions source invalides")?;
        let mut dst_image = Image::new(width, height, PixelType::U8x3);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Redimensionnement échoué")?;

        Ok(grid_from_rgb_bytes(width, height, dst_image.buffer()))
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Packed RGB8 bytes, row-major, into a sample grid.
fn grid_from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Grid<Rgb> {
    let w = width as usize;
    Grid::from_fn(w, height as usize, |x, y| {
        let i = (y * w + x) * 3;
        Rgb::new(bytes[i], bytes[i + 1], bytes[i + 2])
    })
}
