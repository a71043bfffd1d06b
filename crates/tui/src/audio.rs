//! Terminal bell used as the notification sound.
//!
//! The console stays silent until the operator has interacted with it once.
//! An arrival before that is reported as blocked, and the alert player replays
//! it on the first keypress or click.

use std::io::{self, Write};

use driverconnect_engine::{AudioSink, PlaybackError};

const BEL: &[u8] = b"\x07";

#[derive(Debug)]
pub struct TerminalBell {
    enabled: bool,
    unlocked: bool,
    rings: usize,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            unlocked: false,
            rings: 0,
        }
    }

    /// Allows playback from now on. Called on every user gesture.
    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub fn rings(&self) -> usize {
        self.rings
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.unlocked {
            return Err(PlaybackError::Blocked);
        }
        let mut stdout = io::stdout();
        stdout
            .write_all(BEL)
            .and_then(|()| stdout.flush())
            .map_err(|error| PlaybackError::Device(error.to_string()))?;
        self.rings += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_bell_never_blocks() {
        let mut bell = TerminalBell::new(false);
        assert_eq!(bell.play(), Ok(()));
        assert_eq!(bell.rings(), 0);
    }

    #[test]
    fn locked_bell_reports_blocked() {
        let mut bell = TerminalBell::new(true);
        assert_eq!(bell.play(), Err(PlaybackError::Blocked));
    }
}
