/// Tables, types, and shared structures for glyphwave.
///
/// This crate contains the color model, the charset and theme tables,
/// the grid types, the terminal escape sequences and the configuration
/// logic used across the glyphwave workspace.

pub mod ansi;
pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod palette;
pub mod table;
pub mod traits;

pub use charset::{Charset, CharsetTable, LuminanceLut};
pub use color::Rgb;
pub use config::RenderConfig;
pub use error::CoreError;
pub use frame::{Frame, Grid, StyledCell};
pub use palette::{Palette, ThemeTable};
pub use traits::{Renderer, Shader};
