use crate::color::Rgb;
use crate::error::CoreError;
use crate::table::NamedTable;

/// 10 caractères — rampe par défaut, dense→clair.
pub const CHARSET_DEFAULT: &str = "@%#*+=-:. ";

/// Blocs Unicode — pseudo-pixels.
pub const CHARSET_BLOCKS: &str = "█▓▒░ ";

/// Points et anneaux.
pub const CHARSET_DOTS: &str = "@Øo:. ";

/// 45 caractères — résolution maximale.
pub const CHARSET_DENSE: &str = "MWN0QLCJUYXzcvunxrjft/|()1{}[]?-_+~<>i!l;:,. ";

/// Emoji — rendu fantaisie, largeur variable selon le terminal.
pub const CHARSET_EMOJI: &str = "✨⚡🔥💧🎵 ";

/// Built-in charsets, by name.
pub const BUILTIN_CHARSETS: &[(&str, &str)] = &[
    ("default", CHARSET_DEFAULT),
    ("blocks", CHARSET_BLOCKS),
    ("dots", CHARSET_DOTS),
    ("dense", CHARSET_DENSE),
    ("emoji", CHARSET_EMOJI),
];

/// Rampe ordonnée de glyphes. Jamais vide.
///
/// # Example
/// ```
/// use gw_core::Charset;
/// let cs = Charset::new("mini", " .:#@").unwrap();
/// assert_eq!(cs.len(), 5);
/// assert!(Charset::new("vide", "").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charset {
    name: String,
    glyphs: Vec<char>,
}

impl Charset {
    /// Build a charset from its glyph string.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if `glyphs` is empty.
    pub fn new(name: impl Into<String>, glyphs: &str) -> Result<Self, CoreError> {
        let name = name.into();
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(CoreError::EmptyCharset { name });
        }
        Ok(Self { name, glyphs })
    }

    /// Charset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Glyphs, in ramp order.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Number of glyphs, at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph for a luma value.
    #[must_use]
    pub fn glyph(&self, luma: u8) -> char {
        self.glyphs[glyph_index(luma, self.glyphs.len())]
    }
}

/// Index dans une rampe de `len` glyphes : `floor(luma * (len - 1) / 255)`.
///
/// Toujours dans `[0, len - 1]` ; `luma = 255` donne exactement `len - 1`.
///
/// # Example
/// ```
/// use gw_core::charset::glyph_index;
/// assert_eq!(glyph_index(0, 10), 0);
/// assert_eq!(glyph_index(128, 10), 4);
/// assert_eq!(glyph_index(255, 10), 9);
/// assert_eq!(glyph_index(255, 1), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn glyph_index(luma: u8, len: usize) -> usize {
    usize::from(luma) * len.saturating_sub(1) / 255
}

/// Lookup table mapping luminance [0..255] → character.
///
/// Pre-computed once per charset for O(1) per-sample cost.
///
/// # Example
/// ```
/// use gw_core::charset::{Charset, LuminanceLut};
/// let lut = LuminanceLut::new(&Charset::new("mini", " .:#@").unwrap());
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// ```
#[derive(Clone)]
pub struct LuminanceLut {
    lut: [char; 256],
}

impl LuminanceLut {
    /// Build a LUT from a charset in ramp order.
    #[must_use]
    pub fn new(charset: &Charset) -> Self {
        let mut lut = [' '; 256];
        for (luma, slot) in (0..=255u8).zip(lut.iter_mut()) {
            *slot = charset.glyph(luma);
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a character.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[usize::from(luminance)]
    }

    /// Map a sample through its luma.
    #[inline(always)]
    #[must_use]
    pub fn map_rgb(&self, sample: Rgb) -> char {
        self.map(sample.luma())
    }
}

/// Table des charsets : built-ins + entrées utilisateur, repli sur `default`.
pub type CharsetTable = NamedTable<Charset>;

/// Build the table of built-in charsets.
///
/// # Errors
/// Returns an error if a built-in charset is empty (table integrity).
pub fn builtin_charsets() -> Result<CharsetTable, CoreError> {
    let mut table = CharsetTable::new("charset", Charset::new("default", CHARSET_DEFAULT)?);
    for &(name, glyphs) in BUILTIN_CHARSETS {
        table.insert(name, Charset::new(name, glyphs)?);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_never_exceeds_last_glyph() {
        for len in 1..=64 {
            for luma in 0..=255u8 {
                assert!(glyph_index(luma, len) < len, "len={len} luma={luma}");
            }
            assert_eq!(glyph_index(255, len), len - 1);
        }
    }

    #[test]
    fn luminance_lut_monotonic() {
        let cs = Charset::new("mini", " .:#@").unwrap();
        let lut = LuminanceLut::new(&cs);
        let mut prev_idx = 0usize;
        for i in 0..=255u8 {
            let ch = lut.map(i);
            let idx = cs.glyphs().iter().position(|&c| c == ch).unwrap();
            assert!(idx >= prev_idx, "LUT non monotone à luminance {i}");
            prev_idx = idx;
        }
    }

    #[test]
    fn single_glyph_charset_maps_everything_to_it() {
        let lut = LuminanceLut::new(&Charset::new("one", "#").unwrap());
        assert!((0..=255u8).all(|l| lut.map(l) == '#'));
    }

    #[test]
    fn builtins_are_valid_and_complete() {
        let table = builtin_charsets().unwrap();
        assert_eq!(table.names(), ["blocks", "default", "dense", "dots", "emoji"]);
        assert_eq!(table.get("blocks").unwrap().len(), 5);
        assert_eq!(table.get("emoji").unwrap().len(), 6);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let table = builtin_charsets().unwrap();
        assert_eq!(table.get_or_default("wingdings").glyphs(), table.get("default").unwrap().glyphs());
    }
}
