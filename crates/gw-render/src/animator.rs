use std::f64::consts::TAU;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use gw_ascii::compose::single_shot;
use gw_core::traits::Renderer;

use crate::pacer::Pacer;
use crate::terminal::Terminal;

/// Drapeau d'annulation partagé entre le handler Ctrl-C et l'animateur.
///
/// # Example
/// ```
/// use gw_render::CancelFlag;
/// let flag = CancelFlag::new();
/// let remote = flag.clone();
/// remote.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// New, not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Demande l'arrêt.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` une fois `cancel` appelé.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progression de la phase d'une frame à l'autre.
///
/// # Example
/// ```
/// use gw_render::PhaseSchedule;
/// let step = PhaseSchedule::Step(0.3);
/// assert!((step.phase(2) - 0.6).abs() < 1e-12);
/// let cycle = PhaseSchedule::Cycle { period: 4 };
/// assert!((cycle.phase(1) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseSchedule {
    /// Un tour complet (2π) tous les `period` frames ; 0 compte comme 1.
    Cycle { period: u32 },
    /// Pas fixe en radians par frame.
    Step(f64),
}

impl PhaseSchedule {
    /// Phase of frame `index`.
    #[must_use]
    pub fn phase(self, index: u32) -> f64 {
        let i = f64::from(index);
        match self {
            Self::Cycle { period } => i * (TAU / f64::from(period.max(1))),
            Self::Step(step) => i * step,
        }
    }
}

/// Nombre de frames à produire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameCount {
    /// Exactement N frames (0 : aucune).
    Finite(u32),
    /// Jusqu'à annulation.
    Endless,
}

/// Cycle de vie d'un [`Animator`] ; un animateur ne sert qu'une fois.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    /// Construit, pas encore lancé.
    Idle,
    /// Dans `run`.
    Running,
    /// `run` terminé, reset écrit.
    Stopped,
}

/// Bilan d'une animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationReport {
    /// Frames effectivement écrites.
    pub frames: u32,
    /// `true` si l'arrêt vient d'une annulation.
    pub cancelled: bool,
    /// FPS moyen mesuré.
    pub fps: f64,
    /// Intervalle entre les deux dernières frames, en ms (0 sous deux frames).
    pub last_frame_ms: f64,
}

/// Boucle d'animation : `Idle → Running → Stopped`.
///
/// Une frame `i + 1` n'est jamais composée avant que la frame `i` soit écrite.
/// Le reset final est écrit sur tous les chemins de sortie.
///
/// # Example
/// ```
/// use gw_core::traits::Renderer;
/// use gw_core::Frame;
/// use gw_render::{Animator, CancelFlag, CaptureTerminal, FrameCount, PhaseSchedule};
///
/// struct Phase;
/// impl Renderer for Phase {
///     fn render(&self, phase: f64) -> Frame { Frame::new(format!("{phase:.1}")) }
///     fn color_enabled(&self) -> bool { false }
/// }
///
/// let mut term = CaptureTerminal::new();
/// let mut animator = Animator::new(
///     PhaseSchedule::Step(0.5), FrameCount::Finite(3), 1000, CancelFlag::new(),
/// );
/// let report = animator.run(&Phase, &mut term).unwrap();
/// assert_eq!(report.frames, 3);
/// assert_eq!(term.frames(), ["0.0", "0.5", "1.0"]);
/// ```
pub struct Animator {
    schedule: PhaseSchedule,
    count: FrameCount,
    pacer: Pacer,
    cancel: CancelFlag,
    state: AnimatorState,
}

impl Animator {
    /// Animator in the `Idle` state; `fps` below 1 counts as 1.
    #[must_use]
    pub fn new(schedule: PhaseSchedule, count: FrameCount, fps: u32, cancel: CancelFlag) -> Self {
        Self {
            schedule,
            count,
            pacer: Pacer::new(fps),
            cancel,
            state: AnimatorState::Idle,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Joue l'animation sur `term`.
    ///
    /// # Errors
    /// Returns an error if the animator already ran, or if a terminal write
    /// fails with anything other than `ErrorKind::Interrupted`.
    pub fn run(&mut self, renderer: &dyn Renderer, term: &mut dyn Terminal) -> Result<AnimationReport> {
        if self.state != AnimatorState::Idle {
            bail!("Animateur déjà utilisé (état {:?})", self.state);
        }
        self.state = AnimatorState::Running;
        log::debug!(
            "Animation : {:?}, {:?}, délai {:?}",
            self.count,
            self.schedule,
            self.pacer.delay()
        );

        let mut frames = 0;
        let outcome = self.drive(renderer, term, &mut frames);
        let reset = term.reset();
        self.state = AnimatorState::Stopped;

        let cancelled = outcome.context("Écriture d'une frame impossible")?;
        reset.context("Reset du terminal impossible")?;

        let report = AnimationReport {
            frames,
            cancelled,
            fps: self.pacer.average_fps(),
            last_frame_ms: self.pacer.frame_time_ms(),
        };
        log::debug!(
            "Animation terminée : {} frames, {:.1} fps, dernière frame {:.1} ms{}",
            report.frames,
            report.fps,
            report.last_frame_ms,
            if report.cancelled { " (annulée)" } else { "" }
        );
        Ok(report)
    }

    /// Retourne `Ok(true)` si l'arrêt vient d'une annulation.
    fn drive(&mut self, renderer: &dyn Renderer, term: &mut dyn Terminal, frames: &mut u32) -> io::Result<bool> {
        let mut index: u32 = 0;
        loop {
            if let FrameCount::Finite(total) = self.count
                && index >= total
            {
                return Ok(false);
            }
            if self.cancel.is_cancelled() {
                return Ok(true);
            }

            let frame = renderer.render(self.schedule.phase(index));
            match term.clear().and_then(|()| term.write_frame(frame.as_str())) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(true),
                Err(e) => return Err(e),
            }
            *frames += 1;
            self.pacer.tick();

            if self.cancel.is_cancelled() || !self.pacer.sleep(&self.cancel) {
                return Ok(true);
            }
            index = index.wrapping_add(1);
        }
    }
}

/// Rendu unique : phase 0, reset si couleur, saut de ligne.
///
/// # Errors
/// Returns an error if the terminal write fails.
///
/// # Example
/// ```
/// use gw_core::traits::Renderer;
/// use gw_core::Frame;
/// use gw_render::CaptureTerminal;
/// use gw_render::animator::print_once;
///
/// struct Fixed;
/// impl Renderer for Fixed {
///     fn render(&self, _phase: f64) -> Frame { Frame::new("@@".into()) }
///     fn color_enabled(&self) -> bool { false }
/// }
/// let mut term = CaptureTerminal::new();
/// print_once(&Fixed, &mut term).unwrap();
/// assert_eq!(term.output(), "@@\n");
/// ```
pub fn print_once(renderer: &dyn Renderer, term: &mut dyn Terminal) -> Result<()> {
    let frame = renderer.render(0.0);
    let mut text = single_shot(&frame, renderer.color_enabled());
    text.push('\n');
    term.write_frame(&text).context("Écriture de la frame impossible")
}
