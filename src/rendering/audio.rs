//! Audio without sound assets: requests are written to the log.

use super::{AudioPlayer, SoundId};
use std::collections::HashSet;

/// Logs every sound request and tracks which loops are running.
#[derive(Debug, Default)]
pub struct LogAudio {
    looping: HashSet<SoundId>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a looping sound is currently playing.
    pub fn is_looping(&self, sound: SoundId) -> bool {
        self.looping.contains(&sound)
    }
}

impl AudioPlayer for LogAudio {
    fn play(&mut self, sound: SoundId, looping: bool) {
        if looping {
            self.looping.insert(sound);
        }
        log::debug!("play {:?}{}", sound, if looping { " (loop)" } else { "" });
    }

    fn fade_out(&mut self, sound: SoundId, seconds: f64) {
        if self.looping.remove(&sound) {
            log::debug!("fade out {:?} over {:.1}s", sound, seconds);
        }
    }
}
