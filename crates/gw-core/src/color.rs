use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Borne haute du facteur d'éclaircissement accepté par [`brighten`].
pub const MAX_BRIGHTEN: f64 = 0.25;

/// Échantillon RGB 8 bits par canal.
///
/// Sérialisé en `#rrggbb` dans les fichiers de configuration.
///
/// # Example
/// ```
/// use gw_core::Rgb;
/// let c: Rgb = "#72a6ff".parse().unwrap();
/// assert_eq!(c, Rgb::new(0x72, 0xa6, 0xff));
/// assert_eq!(c.to_string(), "#72a6ff");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Luma perceptuelle (poids 0.299 / 0.587 / 0.114), arrondie au plus proche.
    ///
    /// Calcul entier exact : le résultat est toujours dans [0, 255].
    ///
    /// # Example
    /// ```
    /// use gw_core::Rgb;
    /// assert_eq!(Rgb::new(0, 0, 0).luma(), 0);
    /// assert_eq!(Rgb::WHITE.luma(), 255);
    /// assert_eq!(Rgb::new(128, 128, 128).luma(), 128);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luma(self) -> u8 {
        let weighted =
            u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114;
        ((weighted + 500) / 1000) as u8
    }

    /// Gray sample carrying this sample's luma on all three channels.
    #[inline]
    #[must_use]
    pub fn desaturated(self) -> Self {
        let l = self.luma();
        Self::new(l, l, l)
    }

    /// `true` when blue strictly exceeds both red and green.
    #[inline(always)]
    #[must_use]
    pub fn is_blue_dominant(self) -> bool {
        self.b > self.r && self.b > self.g
    }

    /// Shortcut for [`brighten`].
    #[must_use]
    pub fn brighten(self, factor: f64) -> Self {
        brighten(self, factor)
    }
}

/// Éclaircit une couleur vers le blanc : `c + (255 - c) * f` par canal.
///
/// `factor` est borné à [0.0, 0.25] (NaN compte pour 0). Chaque canal du
/// résultat reste dans `[c, 255]`, la partie fractionnaire est tronquée.
///
/// # Example
/// ```
/// use gw_core::color::brighten;
/// use gw_core::Rgb;
/// assert_eq!(brighten(Rgb::new(0, 100, 255), 0.2), Rgb::new(51, 131, 255));
/// assert_eq!(brighten(Rgb::new(10, 20, 30), -1.0), Rgb::new(10, 20, 30));
/// ```
#[must_use]
pub fn brighten(color: Rgb, factor: f64) -> Rgb {
    let f = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, MAX_BRIGHTEN)
    };
    let lift = |c: u8| -> u8 { (f64::from(c) + f64::from(255 - c) * f) as u8 };
    Rgb::new(lift(color.r), lift(color.g), lift(color.b))
}

impl FromStr for Rgb {
    type Err = CoreError;

    /// Parse `#rrggbb` (le `#` est optionnel, casse indifférente).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidHexColor {
            value: s.to_string(),
        };
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
