//! Sound cues for the terminal front ends
//!
//! The game only says which cue to play. Front ends receive a
//! [`SoundEffects`] implementation when they start and drop it on exit.

use std::io::{self, Write};

/// Something worth an audible cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Tick,
    WarningTick,
    DangerTick,
    Reveal,
    Click,
    Success,
    Error,
    TimeUp,
    GameOver,
}

impl SoundCue {
    /// Clock tick matching the seconds left
    #[must_use]
    pub const fn tick_for(remaining_secs: u64) -> Self {
        match remaining_secs {
            0..=5 => Self::DangerTick,
            6..=10 => Self::WarningTick,
            _ => Self::Tick,
        }
    }
}

pub trait SoundEffects {
    fn play(&self, cue: SoundCue);
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundEffects for Silent {
    fn play(&self, _cue: SoundCue) {}
}

/// Rings the terminal bell for outcomes and the final seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl TerminalBell {
    /// Whether a cue rings the bell; routine ticks and clicks stay quiet
    #[must_use]
    pub const fn rings_for(cue: SoundCue) -> bool {
        matches!(
            cue,
            SoundCue::DangerTick
                | SoundCue::Success
                | SoundCue::Error
                | SoundCue::TimeUp
                | SoundCue::GameOver
        )
    }
}

impl SoundEffects for TerminalBell {
    fn play(&self, cue: SoundCue) {
        if !Self::rings_for(cue) {
            return;
        }
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            tracing::debug!(error = %e, "terminal bell failed");
        }
    }
}

/// Sound output chosen from the user's settings
#[must_use]
pub fn from_settings(enabled: bool) -> Box<dyn SoundEffects> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        played: RefCell<Vec<SoundCue>>,
    }

    impl SoundEffects for Recorder {
        fn play(&self, cue: SoundCue) {
            self.played.borrow_mut().push(cue);
        }
    }

    #[test]
    fn tick_escalates() {
        assert_eq!(SoundCue::tick_for(30), SoundCue::Tick);
        assert_eq!(SoundCue::tick_for(11), SoundCue::Tick);
        assert_eq!(SoundCue::tick_for(10), SoundCue::WarningTick);
        assert_eq!(SoundCue::tick_for(6), SoundCue::WarningTick);
        assert_eq!(SoundCue::tick_for(5), SoundCue::DangerTick);
        assert_eq!(SoundCue::tick_for(0), SoundCue::DangerTick);
    }

    #[test]
    fn bell_rings_only_for_outcomes() {
        assert!(TerminalBell::rings_for(SoundCue::Success));
        assert!(TerminalBell::rings_for(SoundCue::TimeUp));
        assert!(!TerminalBell::rings_for(SoundCue::Tick));
        assert!(!TerminalBell::rings_for(SoundCue::Click));
    }

    #[test]
    fn trait_objects_receive_cues() {
        let recorder = Recorder::default();
        let sounds: &dyn SoundEffects = &recorder;
        sounds.play(SoundCue::Reveal);
        sounds.play(SoundCue::GameOver);
        assert_eq!(
            *recorder.played.borrow(),
            vec![SoundCue::Reveal, SoundCue::GameOver]
        );

        // Silent accepts everything
        Silent.play(SoundCue::Error);
    }
}
