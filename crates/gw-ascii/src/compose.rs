use gw_core::ansi::{Plane, RESET, push_color};
use gw_core::traits::{Renderer, Shader};
use gw_core::{Frame, Grid, StyledCell};

/// Écrit une cellule : glyphe brut, ou séquences fg/bg + glyphe + reset.
///
/// # Example
/// ```
/// use gw_core::{Rgb, StyledCell};
/// use gw_ascii::compose::push_cell;
/// let cell = StyledCell::with_fg('#', Some(Rgb::new(1, 2, 3)));
/// let mut out = String::new();
/// push_cell(&mut out, &cell, true);
/// assert_eq!(out, "\x1b[38;2;1;2;3m#\x1b[0m");
/// out.clear();
/// push_cell(&mut out, &cell, false);
/// assert_eq!(out, "#");
/// ```
#[inline]
pub fn push_cell(out: &mut String, cell: &StyledCell, color: bool) {
    if !color || (cell.fg.is_none() && cell.bg.is_none()) {
        out.push(cell.glyph);
        return;
    }
    if let Some(fg) = cell.fg {
        push_color(out, fg, Plane::Foreground);
    }
    if let Some(bg) = cell.bg {
        push_color(out, bg, Plane::Background);
    }
    out.push(cell.glyph);
    out.push_str(RESET);
}

/// Compose une grille : cellules concaténées, lignes séparées par `\n`.
///
/// # Example
/// ```
/// use gw_core::{Grid, StyledCell};
/// use gw_ascii::compose::compose;
/// let grid = Grid::from_fn(2, 2, |_, _| StyledCell::plain('+'));
/// assert_eq!(compose(&grid, false).as_str(), "++\n++");
/// ```
#[must_use]
pub fn compose(grid: &Grid<StyledCell>, color: bool) -> Frame {
    let per_cell = if color { 24 } else { 4 };
    let mut text = String::with_capacity(grid.height() * (grid.width() * per_cell + 1));
    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            text.push('\n');
        }
        for cell in row {
            push_cell(&mut text, cell, color);
        }
    }
    Frame::new(text)
}

/// Texte d'un rendu unique : la frame suivie d'un reset si la couleur est active.
///
/// # Example
/// ```
/// use gw_core::Frame;
/// use gw_ascii::compose::single_shot;
/// let frame = Frame::new("ab".into());
/// assert_eq!(single_shot(&frame, true), "ab\x1b[0m");
/// assert_eq!(single_shot(&frame, false), "ab");
/// ```
#[must_use]
pub fn single_shot(frame: &Frame, color: bool) -> String {
    let mut out = String::with_capacity(frame.as_str().len() + RESET.len());
    out.push_str(frame.as_str());
    if color {
        out.push_str(RESET);
    }
    out
}

/// Pipeline complet shader → cellules → frame, quel que soit le type de source.
///
/// # Example
/// ```
/// use gw_core::traits::Renderer;
/// use gw_core::{Grid, Palette};
/// use gw_ascii::{FrameRenderer, TokenShader};
/// let shader = TokenShader::new(Grid::from_lines(&["LL"]).unwrap(), Palette::default(), "hair");
/// let renderer = FrameRenderer::new(shader, false);
/// assert_eq!(renderer.render(0.0).as_str(), "██");
/// ```
pub struct FrameRenderer<S> {
    shader: S,
    color: bool,
}

impl<S: Shader> FrameRenderer<S> {
    /// Wrap a shader.
    #[must_use]
    pub fn new(shader: S, color: bool) -> Self {
        log::debug!(
            "Renderer {} (couleur : {})",
            shader.name(),
            if color { "oui" } else { "non" }
        );
        Self { shader, color }
    }

    /// The wrapped shader.
    #[must_use]
    pub fn shader(&self) -> &S {
        &self.shader
    }
}

impl<S: Shader> Renderer for FrameRenderer<S> {
    fn render(&self, phase: f64) -> Frame {
        compose(&self.shader.shade(phase, self.color), self.color)
    }

    fn color_enabled(&self) -> bool {
        self.color
    }
}
