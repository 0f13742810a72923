use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use gw_ascii::{FrameRenderer, RasterShader, TokenShader};
use gw_core::traits::Renderer;
use gw_core::{CharsetTable, Grid, RenderConfig, Rgb, ThemeTable};
use gw_render::animator::print_once;
use gw_render::{AnimationReport, Animator, CancelFlag, FrameCount, PhaseSchedule, Terminal};
use gw_source::image::{RasterOptions, load_raster};

/// Tables de charsets et de thèmes, validées au démarrage puis en lecture seule.
pub struct Tables {
    pub charsets: CharsetTable,
    pub themes: ThemeTable,
}

impl Tables {
    /// Built-ins plus the entries of the config file.
    ///
    /// # Errors
    /// Returns an error if a built-in or user entry is invalid.
    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        Ok(Self {
            charsets: config.charset_table().context("Charsets invalides")?,
            themes: config.theme_table().context("Thèmes invalides")?,
        })
    }

    /// Texte de `--list`.
    #[must_use]
    pub fn listing(&self) -> String {
        let mut out = String::from("Charsets :\n");
        for name in self.charsets.names() {
            if let Some(charset) = self.charsets.get(name) {
                let glyphs: String = charset.glyphs().iter().collect();
                let _ = writeln!(out, "  {name:<10} \"{glyphs}\"");
            }
        }
        out.push_str("Thèmes :\n");
        for name in self.themes.names() {
            let _ = writeln!(out, "  {name}");
        }
        out
    }
}

/// Renderer d'image : échantillons RGB → glyphes, couleur off par défaut.
#[must_use]
pub fn raster_renderer(
    samples: Grid<Rgb>,
    config: &RenderConfig,
    tables: &Tables,
) -> FrameRenderer<RasterShader> {
    let charset = tables.charsets.get_or_default(&config.charset);
    FrameRenderer::new(RasterShader::new(samples, charset), config.color_enabled(true))
}

/// Renderer du portrait intégré, couleur on par défaut.
///
/// # Errors
/// Returns an error if the built-in canvas cannot be built.
pub fn portrait_renderer(config: &RenderConfig, tables: &Tables) -> Result<FrameRenderer<TokenShader>> {
    let tokens = gw_source::token::portrait(config.scale)?;
    let palette = tables.themes.get_or_default(&config.theme).clone();
    Ok(FrameRenderer::new(
        TokenShader::new(tokens, palette, config.highlight.as_str()),
        config.color_enabled(false),
    ))
}

/// Plan d'animation, `None` pour un rendu unique.
///
/// Image : pas fixe `frame_step`. Portrait : un tour complet sur `frames`
/// (ou sur `cycle` en boucle infinie).
#[must_use]
pub fn animation_plan(config: &RenderConfig, raster: bool) -> Option<(PhaseSchedule, FrameCount)> {
    let count = if config.looping {
        FrameCount::Endless
    } else if config.frames > 0 {
        FrameCount::Finite(config.frames)
    } else {
        return None;
    };
    let schedule = if raster {
        PhaseSchedule::Step(config.frame_step)
    } else if config.looping {
        PhaseSchedule::Cycle {
            period: config.cycle,
        }
    } else {
        PhaseSchedule::Cycle {
            period: config.frames,
        }
    };
    Some((schedule, count))
}

/// Affiche le rendu : animation ou frame unique.
///
/// # Errors
/// Returns an error if writing to the terminal fails.
pub fn present(
    renderer: &dyn Renderer,
    config: &RenderConfig,
    raster: bool,
    cancel: CancelFlag,
    term: &mut dyn Terminal,
) -> Result<Option<AnimationReport>> {
    match animation_plan(config, raster) {
        Some((schedule, count)) => {
            let mut animator = Animator::new(schedule, count, config.fps, cancel);
            animator.run(renderer, term).map(Some)
        }
        None => {
            print_once(renderer, term)?;
            Ok(None)
        }
    }
}

/// Mode image complet : chargement, rendu, affichage.
///
/// Une image illisible est signalée sur stderr et dans les logs ; rien
/// n'est écrit sur `term` et la fonction retourne `Ok(None)`.
///
/// # Errors
/// Returns an error if writing to the terminal fails.
pub fn run_image(
    path: &Path,
    config: &RenderConfig,
    tables: &Tables,
    terminal: Option<(u16, u16)>,
    cancel: CancelFlag,
    term: &mut dyn Terminal,
) -> Result<Option<AnimationReport>> {
    let opts = RasterOptions::from_config(config, terminal);
    let samples = match load_raster(path, &opts) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Erreur : {e:#}");
            log::error!("Chargement de l'image échoué : {e:#}");
            return Ok(None);
        }
    };
    let renderer = raster_renderer(samples, config, tables);
    present(&renderer, config, true, cancel, term)
}

#[cfg(test)]
mod tests {
    use gw_core::ansi::{CLEAR_HOME, RESET};
    use gw_render::CaptureTerminal;

    use super::*;

    fn tables() -> Tables {
        Tables::from_config(&RenderConfig::default()).unwrap()
    }

    #[test]
    fn gray_image_single_shot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image_gray(&path);
        let config = RenderConfig {
            width: 2,
            height: Some(2),
            ..RenderConfig::default()
        };
        let samples = load_raster(&path, &RasterOptions::from_config(&config, None)).unwrap();
        let renderer = raster_renderer(samples, &config, &tables());
        let mut term = CaptureTerminal::new();
        let report = present(&renderer, &config, true, CancelFlag::new(), &mut term).unwrap();
        assert!(report.is_none());
        assert_eq!(term.output(), "++\n++\n");
    }

    #[test]
    fn missing_image_writes_nothing() {
        let config = RenderConfig {
            frames: 3,
            ..RenderConfig::default()
        };
        let mut term = CaptureTerminal::new();
        let report = run_image(
            Path::new("/nonexistent/portrait.png"),
            &config,
            &tables(),
            None,
            CancelFlag::new(),
            &mut term,
        )
        .unwrap();
        assert!(report.is_none());
        assert!(term.ops().is_empty());
    }

    #[test]
    fn corrupt_image_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"pas une image").unwrap();
        let mut term = CaptureTerminal::new();
        let report = run_image(
            &path,
            &RenderConfig::default(),
            &tables(),
            None,
            CancelFlag::new(),
            &mut term,
        )
        .unwrap();
        assert!(report.is_none());
        assert!(term.ops().is_empty());
    }

    #[test]
    fn run_image_renders_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image_gray(&path);
        let config = RenderConfig {
            width: 2,
            height: Some(2),
            ..RenderConfig::default()
        };
        let mut term = CaptureTerminal::new();
        run_image(&path, &config, &tables(), None, CancelFlag::new(), &mut term).unwrap();
        assert_eq!(term.output(), "++\n++\n");
    }

    fn image_gray(path: &Path) {
        image::RgbImage::from_pixel(2, 2, image::Rgb([128, 128, 128]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn portrait_single_shot_is_colored() {
        let config = RenderConfig::default();
        let renderer = portrait_renderer(&config, &tables()).unwrap();
        let mut term = CaptureTerminal::new();
        present(&renderer, &config, false, CancelFlag::new(), &mut term).unwrap();
        let out = term.output();
        assert!(out.contains("\x1b[38;2;"));
        assert!(out.ends_with(&format!("{RESET}\n")));
        assert_eq!(out.lines().count(), 27);
    }

    #[test]
    fn portrait_no_color_has_no_escapes() {
        let config = RenderConfig {
            color: Some(false),
            scale: 2,
            ..RenderConfig::default()
        };
        let renderer = portrait_renderer(&config, &tables()).unwrap();
        let mut term = CaptureTerminal::new();
        present(&renderer, &config, false, CancelFlag::new(), &mut term).unwrap();
        let out = term.output();
        assert!(!out.contains('\x1b'));
        assert_eq!(out.lines().count(), 54);
    }

    #[test]
    fn unknown_theme_matches_default() {
        let tables = tables();
        let render = |theme: &str| {
            let config = RenderConfig {
                theme: theme.to_string(),
                ..RenderConfig::default()
            };
            portrait_renderer(&config, &tables).unwrap().render(0.4)
        };
        assert_eq!(render("nope"), render("default"));
    }

    #[test]
    fn animated_portrait_writes_every_frame() {
        let config = RenderConfig {
            frames: 3,
            fps: 240,
            ..RenderConfig::default()
        };
        let renderer = portrait_renderer(&config, &tables()).unwrap();
        let mut term = CaptureTerminal::new();
        let report = present(&renderer, &config, false, CancelFlag::new(), &mut term)
            .unwrap()
            .unwrap();
        assert_eq!(report.frames, 3);
        assert!(!report.cancelled);
        assert_eq!(term.frames().len(), 3);
        assert_eq!(term.output().matches(CLEAR_HOME).count(), 3);
        assert!(term.output().ends_with(&format!("{RESET}\n")));
    }

    #[test]
    fn plans() {
        let mut config = RenderConfig::default();
        assert!(animation_plan(&config, false).is_none());
        assert!(animation_plan(&config, true).is_none());
        config.frames = 4;
        assert_eq!(
            animation_plan(&config, false),
            Some((PhaseSchedule::Cycle { period: 4 }, FrameCount::Finite(4)))
        );
        config.frames = 5;
        assert_eq!(
            animation_plan(&config, true),
            Some((PhaseSchedule::Step(0.3), FrameCount::Finite(5)))
        );
        config.looping = true;
        assert_eq!(
            animation_plan(&config, false),
            Some((PhaseSchedule::Cycle { period: 30 }, FrameCount::Endless))
        );
    }

    #[test]
    fn listing_names_builtins_and_user_entries() {
        let config = RenderConfig::from_toml_str("[charsets]\nramp = \"#. \"\n").unwrap();
        let listing = Tables::from_config(&config).unwrap().listing();
        for name in ["default", "blocks", "dots", "ramp", "neon", "pastel"] {
            assert!(listing.contains(name), "{name} absent");
        }
    }
}
