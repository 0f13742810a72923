use std::path::Path;

use anyhow::{Context, Result};
use gw_core::config::{DEFAULT_ASPECT, DEFAULT_WIDTH, RenderConfig};
use gw_core::{CoreError, Grid, Rgb};
use image::DynamicImage;

use crate::dither::desaturate;
use crate::resize::Resizer;

/// Taille supposée quand le terminal ne répond pas (sortie redirigée, CI).
pub const FALLBACK_TERMINAL: (u16, u16) = (80, 24);

/// Paramètres d'échantillonnage d'une image.
///
/// # Example
/// ```
/// use gw_source::image::RasterOptions;
/// let opts = RasterOptions::default();
/// assert_eq!(opts.width, 100);
/// assert!(opts.terminal.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct RasterOptions {
    /// Largeur cible en colonnes.
    pub width: u32,
    /// Hauteur cible. `None` = dérivée de l'aspect de l'image.
    pub height: Option<u32>,
    /// Taille du terminal (colonnes, lignes) si l'ajustement est demandé.
    pub terminal: Option<(u16, u16)>,
    /// Facteur d'aspect des cellules.
    pub aspect: f64,
    /// Désaturer avant échantillonnage.
    pub dither: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: None,
            terminal: None,
            aspect: DEFAULT_ASPECT,
            dither: false,
        }
    }
}

impl RasterOptions {
    /// Options from the render config; `terminal` is only kept when
    /// `fit_terminal` is set, and falls back to [`FALLBACK_TERMINAL`]
    /// when the size is unknown.
    #[must_use]
    pub fn from_config(config: &RenderConfig, terminal: Option<(u16, u16)>) -> Self {
        let terminal = config.fit_terminal.then(|| {
            terminal.unwrap_or_else(|| {
                log::warn!(
                    "Taille du terminal inconnue, repli sur {}×{}",
                    FALLBACK_TERMINAL.0,
                    FALLBACK_TERMINAL.1
                );
                FALLBACK_TERMINAL
            })
        });
        Self {
            width: config.width,
            height: config.height,
            terminal,
            aspect: config.aspect,
            dither: config.dither,
        }
    }
}

/// Hauteur corrigée : `round(width * native_h / native_w * aspect)`, au moins 1.
///
/// # Example
/// ```
/// use gw_source::image::aspect_height;
/// assert_eq!(aspect_height((200, 100), 100, 0.55), 28);
/// assert_eq!(aspect_height((100, 1), 10, 0.55), 1);
/// ```
#[must_use]
pub fn aspect_height(native: (u32, u32), width: u32, aspect: f64) -> u32 {
    let (w, h) = native;
    if w == 0 {
        return 1;
    }
    let ratio = f64::from(h) / f64::from(w);
    ((f64::from(width) * ratio * aspect).round() as u32).max(1)
}

/// Dimensions de la grille de sortie pour une image de taille `native`.
///
/// Ajustement terminal : `(colonnes, 2 × lignes)`.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if the image or the target is empty.
///
/// # Example
/// ```
/// use gw_source::image::{target_size, RasterOptions};
/// let opts = RasterOptions { terminal: Some((80, 24)), ..RasterOptions::default() };
/// assert_eq!(target_size((640, 480), &opts).unwrap(), (80, 48));
/// ```
pub fn target_size(native: (u32, u32), opts: &RasterOptions) -> Result<(u32, u32), CoreError> {
    if native.0 == 0 || native.1 == 0 {
        return Err(CoreError::InvalidDimensions {
            width: native.0,
            height: native.1,
        });
    }
    let (width, height) = if let Some((cols, rows)) = opts.terminal {
        (u32::from(cols), u32::from(rows) * 2)
    } else {
        let height = opts
            .height
            .unwrap_or_else(|| aspect_height(native, opts.width, opts.aspect));
        (opts.width, height)
    };
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}

/// Échantillonne une image décodée en grille RGB.
///
/// # Errors
/// Returns an error if the dimensions are invalid or the resize fails.
///
/// # Example
/// ```
/// use gw_source::image::{raster_from_image, RasterOptions};
/// let img = image::DynamicImage::new_rgb8(4, 2);
/// let opts = RasterOptions { width: 4, height: Some(2), ..RasterOptions::default() };
/// let grid = raster_from_image(&img, &opts).unwrap();
/// assert_eq!((grid.width(), grid.height()), (4, 2));
/// ```
pub fn raster_from_image(img: &DynamicImage, opts: &RasterOptions) -> Result<Grid<Rgb>> {
    let rgb = img.to_rgb8();
    let (width, height) = target_size(rgb.dimensions(), opts)?;
    let grid = Resizer::new().resize(&rgb, width, height)?;
    log::info!(
        "Image {}×{} → grille {width}×{height}{}",
        rgb.width(),
        rgb.height(),
        if opts.dither { " (désaturée)" } else { "" }
    );
    Ok(if opts.dither { desaturate(&grid) } else { grid })
}

/// Charge une image depuis le disque et l'échantillonne.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded, or if sampling fails.
///
/// # Example
/// ```no_run
/// use gw_source::image::{load_raster, RasterOptions};
/// use std::path::Path;
/// let grid = load_raster(Path::new("portrait.png"), &RasterOptions::default()).unwrap();
/// ```
pub fn load_raster(path: &Path, opts: &RasterOptions) -> Result<Grid<Rgb>> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    raster_from_image(&img, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_height_wins_over_aspect() {
        let opts = RasterOptions {
            width: 10,
            height: Some(3),
            ..RasterOptions::default()
        };
        assert_eq!(target_size((1000, 1000), &opts).unwrap(), (10, 3));
    }

    #[test]
    fn aspect_height_rounds() {
        // 100 * 0.75 * 0.55 = 41.25
        assert_eq!(aspect_height((400, 300), 100, 0.55), 41);
        // 10 * 1.0 * 0.55 = 5.5
        assert_eq!(aspect_height((10, 10), 10, 0.55), 6);
    }

    #[test]
    fn zero_width_is_rejected() {
        let opts = RasterOptions {
            width: 0,
            ..RasterOptions::default()
        };
        assert_eq!(
            target_size((10, 10), &opts),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 1
            })
        );
    }

    #[test]
    fn terminal_fit_ignores_width() {
        let opts = RasterOptions {
            width: 5,
            height: Some(5),
            terminal: Some((120, 40)),
            ..RasterOptions::default()
        };
        assert_eq!(target_size((3, 3), &opts).unwrap(), (120, 80));
    }

    #[test]
    fn from_config_drops_terminal_without_fit() {
        let config = RenderConfig::default();
        let opts = RasterOptions::from_config(&config, Some((80, 24)));
        assert!(opts.terminal.is_none());
        let config = RenderConfig {
            fit_terminal: true,
            ..RenderConfig::default()
        };
        assert_eq!(RasterOptions::from_config(&config, Some((80, 24))).terminal, Some((80, 24)));
    }

    #[test]
    fn fit_without_terminal_size_uses_80x24() {
        let config = RenderConfig {
            fit_terminal: true,
            ..RenderConfig::default()
        };
        let opts = RasterOptions::from_config(&config, None);
        assert_eq!(opts.terminal, Some(FALLBACK_TERMINAL));
        assert_eq!(target_size((640, 480), &opts).unwrap(), (80, 48));
    }

    #[test]
    fn dither_desaturates() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 200])));
        let opts = RasterOptions {
            width: 2,
            height: Some(2),
            dither: true,
            ..RasterOptions::default()
        };
        let grid = raster_from_image(&img, &opts).unwrap();
        let l = Rgb::new(10, 20, 200).luma();
        assert!(grid.rows().flatten().all(|s| *s == Rgb::new(l, l, l)));
    }

    #[test]
    fn load_raster_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([128, 128, 128]))
            .save(&path)
            .unwrap();
        let opts = RasterOptions {
            width: 2,
            height: Some(2),
            ..RasterOptions::default()
        };
        let grid = load_raster(&path, &opts).unwrap();
        assert!(grid.rows().flatten().all(|s| *s == Rgb::new(128, 128, 128)));
    }

    #[test]
    fn load_raster_missing_file_is_error() {
        let err = load_raster(Path::new("/nonexistent.png"), &RasterOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Impossible de charger"));
    }
}
