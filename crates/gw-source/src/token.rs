use anyhow::Result;
use gw_core::Grid;

/// Portrait intégré : cheveux, visage, combinaison, contours.
///
/// Tokens : `H`/`h` cheveux et ombre, `S` peau, `E` blanc de l'œil,
/// `r` pupille, `P`/`p` combinaison et ombre, `O` accents orange,
/// `L` contour, `.` ombrage léger, espace = fond.
pub const PORTRAIT: &[&str] = &[
    "                    LLLLLLLLLLL                 ",
    "               LLLLHHHHHHHHHHHHHLL              ",
    "            LLHHHHHHHHHHHHHHHHHHHHLL            ",
    "          LHHHHHHHHhhhhhhHHHHHHHHHHHLL          ",
    "        LHHHHHHHhhhhhhhhhhhHHHHHHHHHHHLL        ",
    "       LHHHHHHhhhhhhhhhhhhhhHHHHHHHHHHHLL       ",
    "      LHHHHHHhhhhhhhhhhhhhLLLHHHHHHHHHHHLL      ",
    "     LHHHHHHhhhhhhHHHHHHHHLLLLLHHHHHHHHHHL      ",
    "     LHHHHHhhhhhhHSSSSSSSHLLLLLHHHHHHHHHHLL     ",
    "    LHHHHHhhhhhhHSSSEESSSHLLLLHHHHHHHHHHHLL     ",
    "    LHHHHHhhhhhHSSSErrESSHLLLHHHHHHHHHHHHLL     ",
    "    LHHHHHhhhhhHSSSSEESSShLLLHHHHHHHHHHHHLL     ",
    "    LHHHHHHhhhhHSSSSSSSSShLLLHHHHHHHHHHHHLL     ",
    "     LHHHHHHhhhHSSSSSSSSShLLLHHHHHHHHHHHLL      ",
    "      LLHHHHHhhHSSSSSSSSShLLLHHHHHHHHHHLL       ",
    "        LLHHHHhhHSSSSSSSSpLLLHHHHHHHHLL         ",
    "          LLLHHhhPPOPPPPPpLLLHHHHHLL            ",
    "             LLLLPPPPPPPPPpLLLHL                ",
    "               LLPPPPpppPPpLLLL                 ",
    "              LLPPOOOpppPPpLLLL                 ",
    "             LLPPOOOOOPPPPPpLLL                 ",
    "             LLPPOOOPPPPPPPpLLL                 ",
    "             LLLPPPpppppppppLLL                 ",
    "           LLLLLLLLppLLLLLLLLLLL                ",
    "         LLLLLLLLLLLLLLLLLLLLLLLL               ",
    "        LLLLLLLLLLLLLLLLLLLLLLLLLL              ",
    "         LLLLLLLLLLLLLLLLLLLLLLLL               ",
];

/// Build a token canvas from text lines, upscaled by `scale`.
///
/// A scale below 1 is treated as 1.
///
/// # Errors
/// Returns an error if the lines are not all the same length.
///
/// # Example
/// ```
/// use gw_source::token::token_canvas;
/// let grid = token_canvas(&["H "], 2).unwrap();
/// assert_eq!(grid.to_lines(), ["HH  ", "HH  "]);
/// ```
pub fn token_canvas<S: AsRef<str>>(lines: &[S], scale: u32) -> Result<Grid<char>> {
    let grid = Grid::from_lines(lines)?;
    let k = scale.max(1) as usize;
    log::info!(
        "Canevas {}×{} ×{k} → {}×{}",
        grid.width(),
        grid.height(),
        grid.width() * k,
        grid.height() * k
    );
    Ok(grid.scaled(k))
}

/// The built-in portrait, upscaled by `scale`.
///
/// # Errors
/// Never fails in practice: the portrait rows share one width (checked by tests).
pub fn portrait(scale: u32) -> Result<Grid<char>> {
    token_canvas(PORTRAIT, scale)
}
