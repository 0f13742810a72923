use std::path::PathBuf;

use clap::Parser;
use gw_core::RenderConfig;

/// glyphwave — images et portraits en art ASCII truecolor animé.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF). Sans image : portrait intégré.
    pub image: Option<PathBuf>,

    /// Largeur de sortie en colonnes.
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur de sortie. Défaut : dérivée de l'aspect de l'image.
    #[arg(long)]
    pub height: Option<u32>,

    /// Ajuster à la taille du terminal (colonnes × 2·lignes).
    #[arg(long, default_value_t = false)]
    pub fit_term: bool,

    /// Charset nommé (voir --list).
    #[arg(long)]
    pub charset: Option<String>,

    /// Thème nommé pour le portrait (voir --list).
    #[arg(long)]
    pub theme: Option<String>,

    /// Forcer la couleur truecolor.
    #[arg(long, default_value_t = false, conflicts_with = "no_color")]
    pub color: bool,

    /// Désactiver la couleur.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Désaturer l'image avant échantillonnage.
    #[arg(long, default_value_t = false)]
    pub dither: bool,

    /// Nombre de frames à animer (0 = rendu unique).
    #[arg(long, value_name = "N")]
    pub animate: Option<u32>,

    /// Animer jusqu'à Ctrl-C.
    #[arg(long = "loop", default_value_t = false)]
    pub looping: bool,

    /// Frames par seconde.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Avance de phase par frame en mode image (radians).
    #[arg(long)]
    pub frame_step: Option<f64>,

    /// Facteur d'agrandissement du portrait.
    #[arg(short, long)]
    pub scale: Option<u32>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Lister les charsets et thèmes disponibles.
    #[arg(long, default_value_t = false)]
    pub list: bool,
}

impl Cli {
    /// Apply the command-line overrides on top of the file config.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if self.fit_term {
            config.fit_terminal = true;
        }
        if let Some(ref name) = self.charset {
            config.charset.clone_from(name);
        }
        if let Some(ref name) = self.theme {
            config.theme.clone_from(name);
        }
        if self.color {
            config.color = Some(true);
        } else if self.no_color {
            config.color = Some(false);
        }
        if self.dither {
            config.dither = true;
        }
        if let Some(frames) = self.animate {
            config.frames = frames;
        }
        if self.looping {
            config.looping = true;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(step) = self.frame_step {
            config.frame_step = step;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
    }
}
