/// Terminal output for glyphwave.
///
/// Provides the terminal abstraction, frame pacing and the animation loop.
pub mod animator;
pub mod pacer;
pub mod terminal;

pub use animator::{AnimationReport, Animator, AnimatorState, CancelFlag, FrameCount, PhaseSchedule};
pub use terminal::{CaptureTerminal, StdoutTerminal, Terminal};
