//! « Dither » historique : conversion niveaux de gris puis retour en RGB.
//!
//! Ce n'est pas un tramage : chaque échantillon est remplacé par sa luma sur
//! les trois canaux. Le nom est conservé pour l'option `--dither`.

use gw_core::{Grid, Rgb};

/// Desaturate every sample to `(l, l, l)`.
///
/// # Example
/// ```
/// use gw_core::{Grid, Rgb};
/// use gw_source::dither::desaturate;
/// let grid = Grid::from_fn(1, 1, |_, _| Rgb::new(0, 0, 255));
/// assert_eq!(*desaturate(&grid).get(0, 0), Rgb::new(29, 29, 29));
/// ```
#[must_use]
pub fn desaturate(grid: &Grid<Rgb>) -> Grid<Rgb> {
    grid.map_indexed(|_, _, sample| sample.desaturated())
}
