//! # Tutorial Script
//!
//! Synthetic input played at the start of a session: the character looks
//! around, picks up the crystal next to the spawn beacon and brings it back,
//! which lights the first beacon.

use crate::config::{FRAMES_LATERAL, WAIT_FRAMES};
use crate::{FrameInput, InputAction};

/// A fixed sequence of frames, one consumed per tick.
#[derive(Debug, Clone)]
pub struct TutorialScript {
    frames: Vec<FrameInput>,
    cursor: usize,
}

impl TutorialScript {
    /// Builds the script for a character moving `speed` tiles per tick.
    ///
    /// # Examples
    ///
    /// ```
    /// use world_explorer::TutorialScript;
    ///
    /// let script = TutorialScript::new(0.08);
    /// // 15 idle, 5 left, 5 right, 10 down, 1 + 6 pick-up, 4 right, 1 final
    /// assert_eq!(script.len(), 47);
    /// ```
    pub fn new(speed: f64) -> Self {
        let mut frames = Vec::new();
        let mut push = |frame: FrameInput, count: u32| {
            frames.extend(std::iter::repeat(frame).take(count as usize));
        };

        let left = FrameInput::moving(&[InputAction::Left]);
        let right = FrameInput::moving(&[InputAction::Right]);
        let down = FrameInput::moving(&[InputAction::Bottom]);

        push(FrameInput::default(), WAIT_FRAMES);
        push(left, FRAMES_LATERAL);
        push(right, FRAMES_LATERAL);
        push(down, frames_to_cover(0.75, speed));
        push(down, 1);
        push(FrameInput::default().interacting(), FRAMES_LATERAL + 1);
        push(right, frames_to_cover(0.25, speed));
        push(right.interacting(), 1);

        Self { frames, cursor: 0 }
    }

    /// The next scripted frame, `None` once the script has been played.
    pub fn next_frame(&mut self) -> Option<FrameInput> {
        let frame = self.frames.get(self.cursor).copied();
        if frame.is_some() {
            self.cursor += 1;
        }
        frame
    }

    /// Total number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames left to play.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}

/// Ticks needed to travel `distance` tiles at `speed` per tick.
fn frames_to_cover(distance: f64, speed: f64) -> u32 {
    if speed <= 0.0 {
        return 0;
    }
    (distance / speed).ceil() as u32
}
