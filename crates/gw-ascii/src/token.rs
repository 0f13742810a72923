use gw_core::palette::resolve_token;
use gw_core::traits::Shader;
use gw_core::{Grid, Palette, StyledCell};

use crate::shimmer::modulate_palette;

/// Shader du canevas de tokens : glyphe et couleur via la palette du thème.
///
/// Seule l'entrée `highlight` de la palette varie avec la phase ; la
/// palette de base reste intacte.
///
/// # Example
/// ```
/// use gw_core::traits::Shader;
/// use gw_core::{Grid, Palette};
/// use gw_ascii::TokenShader;
/// let shader = TokenShader::new(Grid::from_lines(&["Hx"]).unwrap(), Palette::default(), "hair");
/// let cells = shader.shade(0.0, true);
/// assert_eq!(cells.get(0, 0).glyph, '█');
/// assert_eq!(cells.get(1, 0).glyph, 'x');
/// ```
pub struct TokenShader {
    tokens: Grid<char>,
    palette: Palette,
    highlight: String,
}

impl TokenShader {
    /// Shader over a token canvas with its base palette.
    #[must_use]
    pub fn new(tokens: Grid<char>, palette: Palette, highlight: impl Into<String>) -> Self {
        Self {
            tokens,
            palette,
            highlight: highlight.into(),
        }
    }

    /// The base palette, never modified by shading.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Shader for TokenShader {
    fn shade(&self, phase: f64, color: bool) -> Grid<StyledCell> {
        if !color {
            return self.tokens.map_indexed(|_, _, &tok| StyledCell::plain(resolve_token(tok).0));
        }
        let palette = modulate_palette(&self.palette, &self.highlight, phase);
        self.tokens.map_indexed(|_, _, &tok| {
            let (glyph, key) = resolve_token(tok);
            StyledCell::with_fg(glyph, key.and_then(|k| palette.get(k)))
        })
    }

    fn name(&self) -> &'static str {
        "token"
    }
}

#[cfg(test)]
mod tests {
    use gw_core::color::brighten;
    use gw_core::palette::THEME_DEFAULT;
    use gw_core::Rgb;

    use super::*;
    use crate::shimmer::highlight_factor;

    fn shader(lines: &[&str]) -> TokenShader {
        TokenShader::new(
            Grid::from_lines(lines).unwrap(),
            Palette::from_hex(THEME_DEFAULT).unwrap(),
            "hair",
        )
    }

    #[test]
    fn highlight_is_brightened_per_phase() {
        let s = shader(&["HL"]);
        let base = Rgb::new(0x72, 0xa6, 0xff);
        for phase in [0.0, 0.4, 1.3] {
            let cells = s.shade(phase, true);
            assert_eq!(cells.get(0, 0).fg, Some(brighten(base, highlight_factor(phase))));
            assert_eq!(cells.get(1, 0).fg, Some(Rgb::new(0x1b, 0x1b, 0x1f)));
        }
        assert_eq!(s.palette().get("hair"), Some(base));
    }

    #[test]
    fn background_and_unknown_tokens_are_uncolored() {
        let cells = shader(&[" ?"]).shade(0.0, true);
        assert_eq!(*cells.get(0, 0), StyledCell::plain(' '));
        assert_eq!(*cells.get(1, 0), StyledCell::plain('?'));
    }

    #[test]
    fn colorless_shading_has_no_colors() {
        let cells = shader(&["HhSErPpOL."]).shade(0.9, false);
        let glyphs: String = cells.rows().flatten().map(|c| c.glyph).collect();
        assert_eq!(glyphs, "█▓░░●▒░■█.");
        assert!(cells.rows().flatten().all(|c| c.fg.is_none()));
    }
}
