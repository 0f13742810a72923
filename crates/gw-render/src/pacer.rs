use std::time::{Duration, Instant};

use crate::animator::CancelFlag;

/// Granularité du sommeil découpé.
pub const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Cadence fixe et mesure du FPS réel sur toute l'animation.
///
/// # Example
/// ```
/// use gw_render::pacer::Pacer;
/// let pacer = Pacer::new(10);
/// assert_eq!(pacer.delay().as_millis(), 100);
/// assert!(pacer.average_fps().abs() < f64::EPSILON);
/// ```
pub struct Pacer {
    delay: Duration,
    first: Option<Instant>,
    last: Option<Instant>,
    ticks: u32,
    frame_time_ms: f64,
}

impl Pacer {
    /// Pacer for `fps` frames per second; values below 1 count as 1.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            delay: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            first: None,
            last: None,
            ticks: 0,
            frame_time_ms: 0.0,
        }
    }

    /// Délai inter-frame.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Durée entre les deux derniers ticks, en ms.
    #[must_use]
    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time_ms
    }

    /// Appeler une fois par frame, APRÈS l'écriture.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            self.frame_time_ms = now.duration_since(last).as_secs_f64() * 1000.0;
        }
        self.first.get_or_insert(now);
        self.last = Some(now);
        self.ticks = self.ticks.saturating_add(1);
    }

    /// Dort `delay` par tranches de [`SLEEP_SLICE`].
    ///
    /// Retourne `false` si l'annulation a été observée pendant l'attente.
    ///
    /// # Example
    /// ```
    /// use gw_render::pacer::Pacer;
    /// use gw_render::CancelFlag;
    /// let cancel = CancelFlag::new();
    /// cancel.cancel();
    /// assert!(!Pacer::new(1).sleep(&cancel));
    /// ```
    pub fn sleep(&self, cancel: &CancelFlag) -> bool {
        let deadline = Instant::now() + self.delay;
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }

    /// FPS moyen entre la première et la dernière frame.
    #[must_use]
    pub fn average_fps(&self) -> f64 {
        match (self.first, self.last) {
            (Some(first), Some(last)) if self.ticks >= 2 => {
                let secs = last.duration_since(first).as_secs_f64();
                if secs > 0.0 {
                    f64::from(self.ticks - 1) / secs
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fps_is_one_second() {
        assert_eq!(Pacer::new(0).delay(), Duration::from_secs(1));
    }

    #[test]
    fn sleep_returns_early_on_cancel() {
        let pacer = Pacer::new(1);
        let cancel = CancelFlag::new();
        let remote = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            remote.cancel();
        });
        let start = Instant::now();
        assert!(!pacer.sleep(&cancel));
        assert!(start.elapsed() < Duration::from_millis(500));
        handle.join().unwrap();
    }

    #[test]
    fn sleep_completes_without_cancel() {
        let pacer = Pacer::new(100);
        assert!(pacer.sleep(&CancelFlag::new()));
    }

    #[test]
    fn average_fps_after_ticks() {
        let mut pacer = Pacer::new(100);
        pacer.tick();
        assert!(pacer.average_fps().abs() < f64::EPSILON);
        std::thread::sleep(Duration::from_millis(5));
        pacer.tick();
        assert!(pacer.average_fps() > 0.0);
        assert!(pacer.frame_time_ms() > 0.0);
    }
}
