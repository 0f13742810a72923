use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{Charset, CharsetTable, builtin_charsets};
use crate::color::Rgb;
use crate::error::CoreError;
use crate::palette::{HIGHLIGHT_KEY, Palette, ThemeTable, builtin_themes};
use crate::table::DEFAULT_NAME;

/// Largeur de sortie par défaut (colonnes).
pub const DEFAULT_WIDTH: u32 = 100;
/// Correction d'aspect des cellules terminal (hauteur ≈ 2× largeur).
pub const DEFAULT_ASPECT: f64 = 0.55;
/// FPS d'animation par défaut.
pub const DEFAULT_FPS: u32 = 10;
/// Pas de phase par frame en mode raster (radians).
pub const DEFAULT_FRAME_STEP: f64 = 0.3;
/// Longueur du cycle de phase en boucle infinie (frames).
pub const DEFAULT_CYCLE: u32 = 30;

/// Configuration complète du rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gw_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.fps, 10);
/// assert_eq!(config.charset, "default");
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    // === Tables ===
    /// Nom du charset (repli sur `default` si inconnu).
    pub charset: String,
    /// Nom du thème de palette (repli sur `default` si inconnu).
    pub theme: String,

    // === Rendu ===
    /// Couleur truecolor. `None` = défaut du mode (portrait : oui, image : non).
    pub color: Option<bool>,
    /// Désaturation de l'image avant échantillonnage.
    pub dither: bool,
    /// Largeur cible en colonnes (mode image).
    pub width: u32,
    /// Hauteur cible en lignes. `None` = dérivée de l'aspect de l'image.
    pub height: Option<u32>,
    /// Ajuster à la taille du terminal (ignore width/height).
    pub fit_terminal: bool,
    /// Facteur d'aspect appliqué à la hauteur dérivée [0.1, 2.0].
    pub aspect: f64,
    /// Facteur d'agrandissement entier du portrait [1, 16].
    pub scale: u32,

    // === Animation ===
    /// Nombre de frames animées. 0 = rendu unique.
    pub frames: u32,
    /// Boucler jusqu'à Ctrl-C.
    pub looping: bool,
    /// Frames par seconde [1, 240].
    pub fps: u32,
    /// Pas de phase par frame en mode image (radians).
    pub frame_step: f64,
    /// Clé de palette modulée en mode portrait.
    pub highlight: String,
    /// Longueur du cycle de phase en boucle infinie (mode portrait).
    pub cycle: u32,

    // === Tables utilisateur ===
    /// Charsets additionnels, par nom.
    pub charsets: BTreeMap<String, String>,
    /// Thèmes additionnels : nom → (clé → couleur).
    pub themes: BTreeMap<String, BTreeMap<String, Rgb>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_NAME.to_string(),
            theme: DEFAULT_NAME.to_string(),
            color: None,
            dither: false,
            width: DEFAULT_WIDTH,
            height: None,
            fit_terminal: false,
            aspect: DEFAULT_ASPECT,
            scale: 1,
            frames: 0,
            looping: false,
            fps: DEFAULT_FPS,
            frame_step: DEFAULT_FRAME_STEP,
            highlight: HIGHLIGHT_KEY.to_string(),
            cycle: DEFAULT_CYCLE,
            charsets: BTreeMap::new(),
            themes: BTreeMap::new(),
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        if !self.aspect.is_finite() {
            self.aspect = DEFAULT_ASPECT;
        }
        if !self.frame_step.is_finite() {
            self.frame_step = DEFAULT_FRAME_STEP;
        }
        self.aspect = self.aspect.clamp(0.1, 2.0);
        self.width = self.width.clamp(1, 4096);
        self.height = self.height.map(|h| h.clamp(1, 4096));
        self.scale = self.scale.clamp(1, 16);
        self.frames = self.frames.min(100_000);
        self.fps = self.fps.clamp(1, 240);
        self.cycle = self.cycle.clamp(1, 100_000);
    }

    /// Whether color output is on, given the source kind.
    ///
    /// # Example
    /// ```
    /// use gw_core::config::RenderConfig;
    /// let mut config = RenderConfig::default();
    /// assert!(!config.color_enabled(true));
    /// assert!(config.color_enabled(false));
    /// config.color = Some(true);
    /// assert!(config.color_enabled(true));
    /// ```
    #[must_use]
    pub fn color_enabled(&self, raster: bool) -> bool {
        self.color.unwrap_or(!raster)
    }

    /// Built-in charsets extended with the user-defined ones.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if a user charset is empty.
    pub fn charset_table(&self) -> Result<CharsetTable, CoreError> {
        let mut table = builtin_charsets()?;
        for (name, glyphs) in &self.charsets {
            table.insert(name.clone(), Charset::new(name.clone(), glyphs)?);
        }
        Ok(table)
    }

    /// Built-in themes extended with the user-defined ones.
    ///
    /// # Errors
    /// Returns an error if a built-in color is malformed.
    pub fn theme_table(&self) -> Result<ThemeTable, CoreError> {
        let mut table = builtin_themes()?;
        for (name, entries) in &self.themes {
            let palette: Palette = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
            table.insert(name.clone(), palette);
        }
        Ok(table)
    }

    /// Parse TOML content and merge it over the defaults.
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or a color is malformed.
    ///
    /// # Example
    /// ```
    /// use gw_core::config::RenderConfig;
    /// let config = RenderConfig::from_toml_str("[animation]\nfps = 24\n").unwrap();
    /// assert_eq!(config.fps, 24);
    /// assert_eq!(config.width, 100);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
        let mut config = Self::default();

        if let Some(r) = file.render {
            if let Some(v) = r.charset {
                config.charset = v;
            }
            if let Some(v) = r.theme {
                config.theme = v;
            }
            if let Some(v) = r.color {
                config.color = Some(v);
            }
            if let Some(v) = r.dither {
                config.dither = v;
            }
            if let Some(v) = r.width {
                config.width = v;
            }
            if let Some(v) = r.height {
                config.height = Some(v);
            }
            if let Some(v) = r.fit_terminal {
                config.fit_terminal = v;
            }
            if let Some(v) = r.aspect {
                config.aspect = v;
            }
            if let Some(v) = r.scale {
                config.scale = v;
            }
        }

        if let Some(a) = file.animation {
            if let Some(v) = a.frames {
                config.frames = v;
            }
            if let Some(v) = a.looping {
                config.looping = v;
            }
            if let Some(v) = a.fps {
                config.fps = v;
            }
            if let Some(v) = a.frame_step {
                config.frame_step = v;
            }
            if let Some(v) = a.highlight {
                config.highlight = v;
            }
            if let Some(v) = a.cycle {
                config.cycle = v;
            }
        }

        if let Some(v) = file.charsets {
            config.charsets = v;
        }
        if let Some(v) = file.themes {
            config.themes = v;
        }

        config.clamp_all();
        Ok(config)
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    render: Option<RenderSection>,
    animation: Option<AnimationSection>,
    charsets: Option<BTreeMap<String, String>>,
    themes: Option<BTreeMap<String, BTreeMap<String, Rgb>>>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderSection {
    charset: Option<String>,
    theme: Option<String>,
    color: Option<bool>,
    dither: Option<bool>,
    width: Option<u32>,
    height: Option<u32>,
    fit_terminal: Option<bool>,
    aspect: Option<f64>,
    scale: Option<u32>,
}

/// Animation section of the TOML config, all fields optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AnimationSection {
    frames: Option<u32>,
    #[serde(rename = "loop")]
    looping: Option<bool>,
    fps: Option<u32>,
    frame_step: Option<f64>,
    highlight: Option<String>,
    cycle: Option<u32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gw_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    RenderConfig::from_toml_str(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))
}
