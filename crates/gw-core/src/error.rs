use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Hex color string that is not `#rrggbb`.
    #[error("Couleur hexadécimale invalide : {value:?} (attendu #rrggbb)")]
    InvalidHexColor {
        /// The rejected input.
        value: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A row whose length differs from the first row.
    #[error("Grille irrégulière : ligne {row} a {found} cellules, {expected} attendues")]
    RaggedGrid {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// Charset without any glyph.
    #[error("Charset vide : {name}")]
    EmptyCharset {
        /// Name of the charset.
        name: String,
    },
}
