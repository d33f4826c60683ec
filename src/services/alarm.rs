//! Alarm sound playback

use std::io::Write;
use tracing::{info, warn};

/// Audio collaborator: play, pause and rewind to start
pub trait Alarm: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn rewind(&mut self);
    fn is_playing(&self) -> bool;
}

impl<A: Alarm + ?Sized> Alarm for Box<A> {
    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }
}

/// Rings the terminal bell on stderr. Stays "playing" until paused.
#[derive(Debug, Default)]
pub struct TerminalBell {
    playing: bool,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self { playing: false }
    }
}

impl Alarm for TerminalBell {
    fn play(&mut self) {
        info!("Alarm ringing");
        self.playing = true;

        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }

    fn pause(&mut self) {
        if self.playing {
            info!("Alarm silenced");
        }
        self.playing = false;
    }

    fn rewind(&mut self) {}

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Alarm that records calls without producing sound
#[derive(Debug, Default, Clone)]
pub struct SilentAlarm {
    pub playing: bool,
    pub plays: usize,
    pub rewinds: usize,
}

impl Alarm for SilentAlarm {
    fn play(&mut self) {
        self.playing = true;
        self.plays += 1;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.rewinds += 1;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
