//! Playback — drives a `Revealer` against a surface.
//!
//! Exactly one tick is ever pending: each tick writes the surface, then the
//! timer waits out the delay that tick asked for, then the next tick runs.

use tracing::{debug, info};

use crate::engine::{Revealer, Step};
use crate::surface::{SurfaceHost, TextSurface};
use crate::timer::{Timer, Wake};
use crate::types::{RevealConfig, Script};

/// How playback ended. Hosts are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No surface was available, so nothing ran.
    Unresolved,
    /// Every line was revealed.
    Finished { ticks: usize },
    /// The surface stopped accepting content; playback stopped quietly.
    Detached { ticks: usize },
    /// The timer reported that the host is going away.
    Interrupted { ticks: usize },
}

impl Outcome {
    pub fn ticks(self) -> usize {
        match self {
            Outcome::Unresolved => 0,
            Outcome::Finished { ticks }
            | Outcome::Detached { ticks }
            | Outcome::Interrupted { ticks } => ticks,
        }
    }
}

/// Reveal `script` into `surface`, waiting on `timer` between ticks.
///
/// A `None` surface means the host could not resolve one; that is not an
/// error and simply results in `Outcome::Unresolved`.
pub fn start<S, T>(script: Script, config: RevealConfig, surface: Option<S>, mut timer: T) -> Outcome
where
    S: TextSurface,
    T: Timer,
{
    let Some(mut surface) = surface else {
        info!(surface = %config.target, "surface not found, skipping playback");
        return Outcome::Unresolved;
    };

    let mut revealer = Revealer::new(script, config);
    let mut ticks = 0;

    while let Some(tick) = revealer.tick() {
        if let Err(e) = surface.replace(&tick.text) {
            debug!(ticks, "surface gone ({e}), stopping");
            return Outcome::Detached { ticks };
        }
        ticks += 1;

        match tick.next {
            Step::Done => break,
            Step::After(delay) => {
                if timer.wait(delay) == Wake::Interrupted {
                    debug!(ticks, "interrupted");
                    return Outcome::Interrupted { ticks };
                }
            }
        }
    }

    debug!(ticks, "playback finished");
    Outcome::Finished { ticks }
}

/// Resolve `config.target` on `host` and start playback there.
pub fn start_on<H, T>(host: &mut H, script: Script, config: RevealConfig, timer: T) -> Outcome
where
    H: SurfaceHost,
    T: Timer,
{
    let surface = host.resolve(&config.target);
    start(script, config, surface, timer)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::surface::{MemoryHost, MemorySurface};
    use crate::timer::RecordingTimer;

    #[test]
    fn reveals_single_line() {
        let mut surface = MemorySurface::new();
        let mut timer = RecordingTimer::new();
        let outcome = start(
            Script::new(["ab"]),
            RevealConfig::default(),
            Some(&mut surface),
            &mut timer,
        );
        assert_eq!(outcome, Outcome::Finished { ticks: 3 });
        assert_eq!(surface.history(), ["$ _", "$ a_", "$ ab_"]);
        assert_eq!(timer.waits(), [Duration::from_millis(5); 2]);
    }

    #[test]
    fn unresolved_surface_is_silent() {
        let mut timer = RecordingTimer::new();
        let outcome = start::<MemorySurface, _>(
            Script::new(["ab"]),
            RevealConfig::default(),
            None,
            &mut timer,
        );
        assert_eq!(outcome, Outcome::Unresolved);
        assert_eq!(outcome.ticks(), 0);
        assert!(timer.waits().is_empty());
    }

    #[test]
    fn empty_script_leaves_surface_untouched() {
        let mut surface = MemorySurface::new();
        let mut timer = RecordingTimer::new();
        let outcome = start(
            Script::default(),
            RevealConfig::default(),
            Some(&mut surface),
            &mut timer,
        );
        assert_eq!(outcome, Outcome::Finished { ticks: 0 });
        assert!(surface.history().is_empty());
        assert!(timer.waits().is_empty());
    }

    #[test]
    fn detached_surface_stops_scheduling() {
        let mut surface = MemorySurface::detach_after(2);
        let mut timer = RecordingTimer::new();
        let outcome = start(
            Script::new(["abcdef"]),
            RevealConfig::default(),
            Some(&mut surface),
            &mut timer,
        );
        assert_eq!(outcome, Outcome::Detached { ticks: 2 });
        assert_eq!(surface.history(), ["$ _", "$ a_"]);
        assert_eq!(timer.waits().len(), 2);
    }

    #[test]
    fn interrupted_timer_ends_playback() {
        let mut surface = MemorySurface::new();
        let outcome = start(
            Script::new(["abcdef"]),
            RevealConfig::default(),
            Some(&mut surface),
            RecordingTimer::interrupt_after(1),
        );
        assert_eq!(outcome, Outcome::Interrupted { ticks: 2 });
        assert_eq!(surface.content(), Some("$ a_"));
    }

    #[test]
    fn start_on_resolves_configured_target() {
        let mut host = MemoryHost::with_targets(["terminal"]);
        let config = RevealConfig {
            target: "terminal".into(),
            ..RevealConfig::default()
        };
        let outcome = start_on(&mut host, Script::new(["x"]), config, RecordingTimer::new());
        assert_eq!(outcome, Outcome::Finished { ticks: 2 });

        let outcome = start_on(
            &mut host,
            Script::new(["x"]),
            RevealConfig::default(),
            RecordingTimer::new(),
        );
        assert_eq!(outcome, Outcome::Unresolved);
    }
}
