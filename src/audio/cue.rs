use std::path::PathBuf;

/// One-shot audio trigger fired when the show loop (re)starts.
pub trait LoopCue {
    fn play_loop_start_sound(&mut self);
}

/// Silent cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAudio;

impl LoopCue for NoAudio {
    fn play_loop_start_sound(&mut self) {}
}

/// Cue that only announces the song it would start.
#[derive(Clone, Debug, Default)]
pub struct LoggedCue {
    pub song: Option<PathBuf>,
    pub plays: u64,
}

impl LoggedCue {
    pub fn new(song: Option<PathBuf>) -> Self {
        Self { song, plays: 0 }
    }
}

impl LoopCue for LoggedCue {
    fn play_loop_start_sound(&mut self) {
        self.plays += 1;
        match &self.song {
            Some(song) => tracing::info!(song = %song.display(), "starting song"),
            None => tracing::info!("loop start"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
