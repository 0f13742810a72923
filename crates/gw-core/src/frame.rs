use std::fmt;

use crate::color::Rgb;
use crate::error::CoreError;

/// Grille rectangulaire de cellules, row-major. Dimensions figées.
///
/// # Example
/// ```
/// use gw_core::Grid;
/// let grid = Grid::from_lines(&["ab", "cd"]).unwrap();
/// assert_eq!((grid.width(), grid.height()), (2, 2));
/// assert_eq!(*grid.get(1, 0), 'b');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    /// Flat array of cells, row-major.
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Build a grid by calling `f(x, y)` for every cell.
    ///
    /// # Example
    /// ```
    /// use gw_core::Grid;
    /// let grid = Grid::from_fn(3, 2, |x, y| x + 10 * y);
    /// assert_eq!(*grid.get(2, 1), 12);
    /// ```
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// Build a grid from rows. Every row must have the first row's length.
    ///
    /// # Errors
    /// Returns [`CoreError::RaggedGrid`] on the first row of a different length.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, CoreError>
    where
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for (row_idx, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row);
            let found = cells.len() - before;
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(CoreError::RaggedGrid {
                    row: row_idx,
                    expected,
                    found,
                });
            }
            height += 1;
        }
        Ok(Self {
            cells,
            width: width.unwrap_or(0),
            height,
        })
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) is outside the grid.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> &T {
        assert!(x < self.width && y < self.height, "cellule hors grille");
        &self.cells[y * self.width + x]
    }

    /// Row `y` as a slice.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Map every cell with its coordinates.
    #[must_use]
    pub fn map_indexed<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        Grid::from_fn(self.width, self.height, |x, y| f(x, y, self.get(x, y)))
    }
}

impl<T: Clone> Grid<T> {
    /// Nearest-neighbor upscale by an integer factor `k`.
    ///
    /// Each cell becomes a `k × k` block: columns are repeated first, then
    /// each expanded row is repeated `k` times. `k <= 1` returns a copy.
    ///
    /// # Example
    /// ```
    /// use gw_core::Grid;
    /// let grid = Grid::from_lines(&["H "]).unwrap().scaled(2);
    /// assert_eq!(grid.to_lines(), ["HH  ", "HH  "]);
    /// ```
    #[must_use]
    pub fn scaled(&self, k: usize) -> Self {
        if k <= 1 {
            return self.clone();
        }
        let width = self.width * k;
        let mut cells = Vec::with_capacity(self.cells.len() * k * k);
        for row in self.rows() {
            let expanded: Vec<T> = row
                .iter()
                .flat_map(|cell| std::iter::repeat_n(cell.clone(), k))
                .collect();
            for _ in 0..k {
                cells.extend_from_slice(&expanded);
            }
        }
        Self {
            cells,
            width,
            height: self.height * k,
        }
    }
}

impl Grid<char> {
    /// Build a token grid from text lines.
    ///
    /// # Errors
    /// Returns [`CoreError::RaggedGrid`] if lines differ in length (in chars).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, CoreError> {
        Self::from_rows(lines.iter().map(|l| l.as_ref().chars()))
    }

    /// Rows back as strings.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }
}

/// Cellule stylée : glyphe + couleurs optionnelles.
///
/// # Example
/// ```
/// use gw_core::StyledCell;
/// let cell = StyledCell::plain('@');
/// assert!(cell.fg.is_none() && cell.bg.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledCell {
    /// Caractère à afficher.
    pub glyph: char,
    /// Couleur foreground. `None` = couleur du terminal.
    pub fg: Option<Rgb>,
    /// Couleur background. `None` = couleur du terminal.
    pub bg: Option<Rgb>,
}

impl StyledCell {
    /// Glyph without any color.
    #[must_use]
    pub const fn plain(glyph: char) -> Self {
        Self {
            glyph,
            fg: None,
            bg: None,
        }
    }

    /// Glyph with an optional foreground.
    #[must_use]
    pub const fn with_fg(glyph: char, fg: Option<Rgb>) -> Self {
        Self { glyph, fg, bg: None }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::plain(' ')
    }
}

/// Bloc de texte composé pour une phase. Immuable une fois produit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    text: String,
}

impl Frame {
    /// Wrap composed text.
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// Composed text, lines separated by `\n`, no trailing newline.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lines of the frame.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Consume into the composed text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_lines(&["abc", "ab"]).unwrap_err();
        assert_eq!(
            err,
            CoreError::RaggedGrid {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn scale_multiplies_both_dimensions() {
        let grid = Grid::from_lines(&["ab", "cd", "ef"]).unwrap();
        for k in 1..=4 {
            let s = grid.scaled(k);
            assert_eq!(s.width(), 2 * k);
            assert_eq!(s.height(), 3 * k);
        }
    }

    #[test]
    fn scale_one_is_identity() {
        let grid = Grid::from_lines(&["LLHh", " .SE"]).unwrap();
        assert_eq!(grid.scaled(1), grid);
        assert_eq!(grid.scaled(0), grid);
    }

    #[test]
    fn scale_expands_columns_then_rows() {
        let grid = Grid::from_lines(&["ab", "cd"]).unwrap().scaled(3);
        assert_eq!(
            grid.to_lines(),
            ["aaabbb", "aaabbb", "aaabbb", "cccddd", "cccddd", "cccddd"]
        );
    }

    #[test]
    fn multibyte_tokens_count_as_one_cell() {
        let grid = Grid::from_lines(&["█▓", "░ "]).unwrap();
        assert_eq!(grid.width(), 2);
    }

    #[test]
    fn empty_grid() {
        let grid = Grid::<char>::from_lines::<&str>(&[]).unwrap();
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert_eq!(grid.rows().count(), 0);
    }
}
