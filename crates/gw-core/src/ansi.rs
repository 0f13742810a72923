//! Séquences d'échappement ANSI utilisées par le rendu texte.

use std::fmt::Write;

use crate::color::Rgb;

/// Remise à zéro de tous les attributs.
pub const RESET: &str = "\x1b[0m";

/// Efface l'écran puis replace le curseur à l'origine.
pub const CLEAR_HOME: &str = "\x1b[2J\x1b[H";

/// Which color plane an escape applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Foreground, selector 38.
    Foreground,
    /// Background, selector 48.
    Background,
}

impl Plane {
    #[inline(always)]
    const fn selector(self) -> u8 {
        match self {
            Self::Foreground => 38,
            Self::Background => 48,
        }
    }
}

/// Append a 24-bit color escape to `out`.
///
/// # Example
/// ```
/// use gw_core::ansi::{push_color, Plane};
/// use gw_core::Rgb;
/// let mut s = String::new();
/// push_color(&mut s, Rgb::new(1, 2, 3), Plane::Foreground);
/// assert_eq!(s, "\x1b[38;2;1;2;3m");
/// ```
#[inline]
pub fn push_color(out: &mut String, color: Rgb, plane: Plane) {
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "\x1b[{};2;{};{};{}m",
        plane.selector(),
        color.r,
        color.g,
        color.b
    );
}

/// Escape for a truecolor foreground.
///
/// # Example
/// ```
/// use gw_core::ansi::fg;
/// use gw_core::Rgb;
/// assert_eq!(fg(Rgb::new(114, 166, 255)), "\x1b[38;2;114;166;255m");
/// ```
#[must_use]
pub fn fg(color: Rgb) -> String {
    let mut s = String::with_capacity(20);
    push_color(&mut s, color, Plane::Foreground);
    s
}

/// Escape for a truecolor background.
///
/// # Example
/// ```
/// use gw_core::ansi::bg;
/// use gw_core::Rgb;
/// assert_eq!(bg(Rgb::new(0, 0, 0)), "\x1b[48;2;0;0;0m");
/// ```
#[must_use]
pub fn bg(color: Rgb) -> String {
    let mut s = String::with_capacity(20);
    push_color(&mut s, color, Plane::Background);
    s
}
