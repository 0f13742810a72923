use crate::frame::{Frame, Grid, StyledCell};

/// Transforme une source de grille en cellules stylées pour une phase.
///
/// Implémenté par : `RasterShader` (échantillons RGB), `TokenShader`
/// (canevas de tokens sémantiques).
///
/// # Example
/// ```
/// use gw_core::traits::Shader;
/// use gw_core::{Grid, StyledCell};
///
/// struct Flat;
/// impl Shader for Flat {
///     fn shade(&self, _phase: f64, _color: bool) -> Grid<StyledCell> {
///         Grid::from_fn(2, 1, |_, _| StyledCell::plain('#'))
///     }
///     fn name(&self) -> &'static str { "flat" }
/// }
/// assert_eq!(Flat.shade(0.0, false).width(), 2);
/// ```
pub trait Shader {
    /// Produit la grille stylée de la phase donnée.
    ///
    /// `color` indique si la sortie sera colorée ; un shader peut sauter sa
    /// modulation quand elle n'a aucun effet visible.
    fn shade(&self, phase: f64, color: bool) -> Grid<StyledCell>;

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}

/// Produit une `Frame` complète pour une phase.
///
/// Seule dépendance de l'animateur vers le pipeline de rendu.
///
/// # Example
/// ```
/// use gw_core::traits::Renderer;
/// use gw_core::Frame;
///
/// struct Fixed;
/// impl Renderer for Fixed {
///     fn render(&self, _phase: f64) -> Frame { Frame::new("ok".into()) }
///     fn color_enabled(&self) -> bool { false }
/// }
/// assert_eq!(Fixed.render(1.0).as_str(), "ok");
/// ```
pub trait Renderer {
    /// Compose la frame de la phase donnée.
    fn render(&self, phase: f64) -> Frame;

    /// `true` si la sortie contient des séquences de couleur.
    fn color_enabled(&self) -> bool;
}
