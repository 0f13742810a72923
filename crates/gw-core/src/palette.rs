use std::collections::BTreeMap;

use crate::color::Rgb;
use crate::error::CoreError;
use crate::table::NamedTable;

/// Clé de palette modulée par défaut pendant l'animation.
pub const HIGHLIGHT_KEY: &str = "hair";

/// Thème `default` : bleu clair, combinaison blanche.
pub const THEME_DEFAULT: &[(&str, Option<&str>)] = &[
    ("hair", Some("#72a6ff")),
    ("hair2", Some("#3b68bf")),
    ("skin", Some("#ffd8bf")),
    ("eye", Some("#f0f6ff")),
    ("pupil", Some("#e63946")),
    ("suit", Some("#f7f7fb")),
    ("suit2", Some("#c8cbd3")),
    ("orange", Some("#ff9a3c")),
    ("line", Some("#1b1b1f")),
    ("dot", Some("#5a5a66")),
    ("bg", None),
];

/// Thème `neon` : cyan saturé, contours quasi noirs.
pub const THEME_NEON: &[(&str, Option<&str>)] = &[
    ("hair", Some("#7ce0ff")),
    ("hair2", Some("#3686a6")),
    ("skin", Some("#ffe9d9")),
    ("eye", Some("#e8ffff")),
    ("pupil", Some("#ff1e56")),
    ("suit", Some("#fefeff")),
    ("suit2", Some("#aab3c2")),
    ("orange", Some("#ffb703")),
    ("line", Some("#0b0d11")),
    ("dot", Some("#6c6f7a")),
    ("bg", None),
];

/// Thème `pastel`.
pub const THEME_PASTEL: &[(&str, Option<&str>)] = &[
    ("hair", Some("#9dc4ff")),
    ("hair2", Some("#6b8ed6")),
    ("skin", Some("#ffe6d5")),
    ("eye", Some("#ffffff")),
    ("pupil", Some("#ff6b6b")),
    ("suit", Some("#ffffff")),
    ("suit2", Some("#d9dde6")),
    ("orange", Some("#ffb48a")),
    ("line", Some("#2a2e33")),
    ("dot", Some("#7a7e88")),
    ("bg", None),
];

/// Built-in themes, by name.
pub const BUILTIN_THEMES: &[(&str, &[(&str, Option<&str>)])] = &[
    ("default", THEME_DEFAULT),
    ("neon", THEME_NEON),
    ("pastel", THEME_PASTEL),
];

/// Token → (glyphe, clé de palette).
pub const TOKEN_MAP: &[(char, char, Option<&str>)] = &[
    ('H', '█', Some("hair")),
    ('h', '▓', Some("hair2")),
    ('S', '░', Some("skin")),
    ('E', '░', Some("eye")),
    ('r', '●', Some("pupil")),
    ('P', '▒', Some("suit")),
    ('p', '░', Some("suit2")),
    ('O', '■', Some("orange")),
    ('L', '█', Some("line")),
    ('.', '.', Some("dot")),
    (' ', ' ', None),
];

/// Resolve a canvas token to its glyph and palette key.
///
/// Unknown tokens render as themselves, without color.
///
/// # Example
/// ```
/// use gw_core::palette::resolve_token;
/// assert_eq!(resolve_token('H'), ('█', Some("hair")));
/// assert_eq!(resolve_token('?'), ('?', None));
/// ```
#[must_use]
pub fn resolve_token(token: char) -> (char, Option<&'static str>) {
    TOKEN_MAP
        .iter()
        .find(|(t, _, _)| *t == token)
        .map_or((token, None), |&(_, glyph, key)| (glyph, key))
}

/// Palette : clé sémantique → couleur optionnelle.
///
/// Une clé absente signifie « pas de couleur, glyphe brut ».
///
/// # Example
/// ```
/// use gw_core::{Palette, Rgb};
/// let p = Palette::from_hex(&[("hair", Some("#72a6ff")), ("bg", None)]).unwrap();
/// assert_eq!(p.get("hair"), Some(Rgb::new(0x72, 0xa6, 0xff)));
/// assert_eq!(p.get("bg"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    entries: BTreeMap<String, Rgb>,
}

impl Palette {
    /// Parse a palette from `(key, hex)` pairs. `None` leaves the key uncolored.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidHexColor`] on the first malformed color.
    pub fn from_hex(pairs: &[(&str, Option<&str>)]) -> Result<Self, CoreError> {
        let mut entries = BTreeMap::new();
        for &(key, hex) in pairs {
            if let Some(hex) = hex {
                entries.insert(key.to_string(), hex.parse()?);
            }
        }
        Ok(Self { entries })
    }

    /// Color for a key, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Rgb> {
        self.entries.get(key).copied()
    }

    /// Copy of this palette with `key` set to `color`.
    #[must_use]
    pub fn with_entry(&self, key: &str, color: Rgb) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), color);
        Self { entries }
    }

    /// Iterate `(key, color)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Rgb)> for Palette {
    fn from_iter<I: IntoIterator<Item = (String, Rgb)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Table des thèmes : built-ins + thèmes utilisateur, repli sur `default`.
pub type ThemeTable = NamedTable<Palette>;

/// Build and validate the table of built-in themes.
///
/// # Errors
/// Returns an error if a built-in hex color is malformed (table integrity).
pub fn builtin_themes() -> Result<ThemeTable, CoreError> {
    let mut table = ThemeTable::new("thème", Palette::from_hex(THEME_DEFAULT)?);
    for &(name, pairs) in BUILTIN_THEMES {
        table.insert(name, Palette::from_hex(pairs)?);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        let table = builtin_themes().unwrap();
        assert_eq!(table.names(), ["default", "neon", "pastel"]);
        for name in table.names() {
            let p = table.get(name).unwrap();
            assert_eq!(p.iter().count(), 10, "theme {name}");
            assert_eq!(p.get("bg"), None);
        }
    }

    #[test]
    fn every_token_key_exists_in_every_theme() {
        let table = builtin_themes().unwrap();
        for &(_, _, key) in TOKEN_MAP {
            if let Some(key) = key {
                for name in table.names() {
                    assert!(table.get(name).unwrap().get(key).is_some(), "{name}.{key}");
                }
            }
        }
    }

    #[test]
    fn with_entry_leaves_base_untouched() {
        let base = Palette::from_hex(THEME_DEFAULT).unwrap();
        let modded = base.with_entry("hair", Rgb::WHITE);
        assert_eq!(modded.get("hair"), Some(Rgb::WHITE));
        assert_eq!(base.get("hair"), Some(Rgb::new(0x72, 0xa6, 0xff)));
    }

    #[test]
    fn malformed_theme_is_rejected() {
        let err = Palette::from_hex(&[("hair", Some("#72a6f"))]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidHexColor { .. }));
    }

    #[test]
    fn space_token_has_no_color() {
        assert_eq!(resolve_token(' '), (' ', None));
    }
}
