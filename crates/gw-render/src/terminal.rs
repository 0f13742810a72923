use std::io::{self, Stdout, Write};

use crossterm::queue;
use crossterm::style::{Print, ResetColor};
use gw_core::ansi::{CLEAR_HOME, RESET};

/// Sortie terminal vue par l'animateur.
///
/// Toute écriture est vidée immédiatement : une frame écrite est visible.
pub trait Terminal {
    /// Efface l'écran et replace le curseur à l'origine.
    ///
    /// # Errors
    /// Propagates the underlying write error.
    fn clear(&mut self) -> io::Result<()>;

    /// Écrit le texte d'une frame puis vide la sortie.
    ///
    /// # Errors
    /// Propagates the underlying write error.
    fn write_frame(&mut self, text: &str) -> io::Result<()>;

    /// Remet les attributs à zéro (suivi d'un saut de ligne).
    ///
    /// # Errors
    /// Propagates the underlying write error.
    fn reset(&mut self) -> io::Result<()>;
}

/// Terminal réel : n'importe quel `Write`, stdout par défaut.
///
/// # Example
/// ```
/// use gw_render::terminal::{StdoutTerminal, Terminal};
/// let mut term = StdoutTerminal::new(Vec::new());
/// term.write_frame("ab").unwrap();
/// term.reset().unwrap();
/// assert_eq!(term.into_inner(), b"ab\x1b[0m\n");
/// ```
pub struct StdoutTerminal<W: Write = Stdout> {
    out: W,
}

impl StdoutTerminal<Stdout> {
    /// Terminal on the process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StdoutTerminal<W> {
    /// Terminal on an arbitrary writer.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for StdoutTerminal<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Print(CLEAR_HOME))
    }

    fn write_frame(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))?;
        self.out.flush()
    }

    fn reset(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Print('\n'))?;
        self.out.flush()
    }
}

/// Taille du terminal (colonnes, lignes), `None` si indisponible.
#[must_use]
pub fn terminal_size() -> Option<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok(size) => Some(size),
        Err(e) => {
            log::debug!("Taille du terminal indisponible : {e}");
            None
        }
    }
}

/// Opération enregistrée par [`CaptureTerminal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermOp {
    /// `clear()`.
    Clear,
    /// `write_frame(text)`.
    Frame(String),
    /// `reset()`.
    Reset,
}

/// Faux terminal qui enregistre les opérations, pour les tests.
///
/// # Example
/// ```
/// use gw_render::terminal::{CaptureTerminal, TermOp, Terminal};
/// let mut term = CaptureTerminal::new();
/// term.clear().unwrap();
/// term.write_frame("x").unwrap();
/// assert_eq!(term.ops(), [TermOp::Clear, TermOp::Frame("x".into())]);
/// assert_eq!(term.output(), "\x1b[2J\x1b[Hx");
/// ```
#[derive(Debug, Default)]
pub struct CaptureTerminal {
    ops: Vec<TermOp>,
    interrupt_after: Option<usize>,
}

impl CaptureTerminal {
    /// Empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every frame write after the first `frames` with `ErrorKind::Interrupted`.
    #[must_use]
    pub fn interrupt_after(frames: usize) -> Self {
        Self {
            ops: Vec::new(),
            interrupt_after: Some(frames),
        }
    }

    /// Recorded operations, in order.
    #[must_use]
    pub fn ops(&self) -> &[TermOp] {
        &self.ops
    }

    /// Frames written, in order.
    #[must_use]
    pub fn frames(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TermOp::Frame(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bytes a real terminal would have received.
    #[must_use]
    pub fn output(&self) -> String {
        self.ops
            .iter()
            .map(|op| match op {
                TermOp::Clear => CLEAR_HOME.to_string(),
                TermOp::Frame(text) => text.clone(),
                TermOp::Reset => format!("{RESET}\n"),
            })
            .collect()
    }
}

impl Terminal for CaptureTerminal {
    fn clear(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Clear);
        Ok(())
    }

    fn write_frame(&mut self, text: &str) -> io::Result<()> {
        if let Some(limit) = self.interrupt_after
            && self.frames().len() >= limit
        {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.ops.push(TermOp::Frame(text.to_string()));
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Reset);
        Ok(())
    }
}
