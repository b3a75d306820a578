//! Background music toggle. Independent of the progression state machine.
use crate::messages;

/// Playback backend for the background track.
pub trait Soundtrack {
    fn play_looped(&mut self);
    fn pause(&mut self);
}

#[derive(Debug)]
pub struct MusicToggle<T: Soundtrack> {
    soundtrack: T,
    playing: bool,
}

impl<T: Soundtrack> MusicToggle<T> {
    #[must_use]
    pub const fn new(soundtrack: T) -> Self {
        Self {
            soundtrack,
            playing: false,
        }
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Label for the control, describing what pressing it will do.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.playing {
            messages::MUSIC_STOP
        } else {
            messages::MUSIC_PLAY
        }
    }

    /// Flip playback and return the new control label.
    pub fn toggle(&mut self) -> &'static str {
        if self.playing {
            self.soundtrack.pause();
        } else {
            self.soundtrack.play_looped();
        }
        self.playing = !self.playing;
        self.label()
    }

    #[must_use]
    pub const fn soundtrack(&self) -> &T {
        &self.soundtrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingTrack {
        plays: u32,
        pauses: u32,
    }

    impl Soundtrack for CountingTrack {
        fn play_looped(&mut self) {
            self.plays += 1;
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }
    }

    #[test]
    fn toggle_alternates_playback() {
        let mut music = MusicToggle::new(CountingTrack::default());
        assert_eq!(music.label(), messages::MUSIC_PLAY);
        assert_eq!(music.toggle(), messages::MUSIC_STOP);
        assert!(music.is_playing());
        assert_eq!(music.toggle(), messages::MUSIC_PLAY);
        assert_eq!(music.soundtrack().plays, 1);
        assert_eq!(music.soundtrack().pauses, 1);
    }
}
