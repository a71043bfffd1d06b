use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The environment refuses playback until the user has interacted.
    #[error("playback is blocked until the user interacts")]
    Blocked,
    #[error("audio device error: {0}")]
    Device(String),
}

/// Something that can play the notification sound.
pub trait AudioSink: Send {
    fn play(&mut self) -> Result<(), PlaybackError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertState {
    #[default]
    Idle,
    /// Playback was blocked; the next user gesture retries it once.
    PendingUserGesture,
}

/// Plays one sound per arrival batch and handles autoplay refusal.
#[derive(Debug)]
pub struct AlertPlayer<A> {
    sink: A,
    state: AlertState,
}

impl<A: AudioSink> AlertPlayer<A> {
    pub fn new(sink: A) -> Self {
        Self {
            sink,
            state: AlertState::Idle,
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Attempts playback for a batch of arrivals.
    ///
    /// A blocked attempt arms a single retry on the next user gesture; being
    /// blocked again while already armed does not arm a second one.
    pub fn alert(&mut self) -> AlertState {
        match self.sink.play() {
            Ok(()) => {
                debug!("Played notification sound");
                self.state = AlertState::Idle;
            }
            Err(PlaybackError::Blocked) => {
                if self.state == AlertState::Idle {
                    debug!("Notification sound blocked; waiting for a user gesture");
                }
                self.state = AlertState::PendingUserGesture;
            }
            Err(error) => warn!(error = %error, "Notification sound failed"),
        }
        self.state
    }

    /// Called on any user interaction. Retries a blocked sound once; a second
    /// failure is logged and the retry stays armed.
    pub fn on_user_gesture(&mut self) -> AlertState {
        if self.state != AlertState::PendingUserGesture {
            return self.state;
        }
        match self.sink.play() {
            Ok(()) => {
                debug!("Played deferred notification sound");
                self.state = AlertState::Idle;
            }
            Err(error) => warn!(error = %error, "Deferred notification sound failed"),
        }
        self.state
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted outcomes; defaults to success once the script runs out.
    #[derive(Debug, Default)]
    struct Scripted {
        outcomes: VecDeque<Result<(), PlaybackError>>,
        attempts: usize,
    }

    impl Scripted {
        fn new(outcomes: impl IntoIterator<Item = Result<(), PlaybackError>>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                attempts: 0,
            }
        }
    }

    impl AudioSink for Scripted {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.attempts += 1;
            self.outcomes.pop_front().unwrap_or(Ok(()))
        }
    }

    #[test]
    fn plays_immediately_when_allowed() {
        let mut player = AlertPlayer::new(Scripted::default());
        assert_eq!(player.alert(), AlertState::Idle);
        assert_eq!(player.sink().attempts, 1);
        assert_eq!(player.on_user_gesture(), AlertState::Idle);
        assert_eq!(player.sink().attempts, 1);
    }

    #[test]
    fn blocked_playback_retries_on_the_next_gesture_only() {
        let mut player = AlertPlayer::new(Scripted::new([Err(PlaybackError::Blocked)]));
        assert_eq!(player.alert(), AlertState::PendingUserGesture);
        assert_eq!(player.on_user_gesture(), AlertState::Idle);
        assert_eq!(player.on_user_gesture(), AlertState::Idle);
        assert_eq!(player.sink().attempts, 2);
    }

    #[test]
    fn repeated_blocking_arms_a_single_retry() {
        let mut player = AlertPlayer::new(Scripted::new([
            Err(PlaybackError::Blocked),
            Err(PlaybackError::Blocked),
            Err(PlaybackError::Blocked),
        ]));
        player.alert();
        player.alert();
        assert_eq!(player.state(), AlertState::PendingUserGesture);
        assert_eq!(player.on_user_gesture(), AlertState::PendingUserGesture);
        assert_eq!(player.on_user_gesture(), AlertState::Idle);
        assert_eq!(player.sink().attempts, 4);
    }

    #[test]
    fn device_errors_do_not_arm_a_retry() {
        let mut player = AlertPlayer::new(Scripted::new([Err(PlaybackError::Device("no output".into()))]));
        assert_eq!(player.alert(), AlertState::Idle);
        assert_eq!(player.on_user_gesture(), AlertState::Idle);
        assert_eq!(player.sink().attempts, 1);
    }
}
