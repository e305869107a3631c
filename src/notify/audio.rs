use crate::models::{AudioCue, EventRecord};

/// One-shot unlock latch plus head-change tracking for audio cues.
///
/// A cue is requested exactly once per head change, and only after the
/// latch has been unlocked by a user interaction.
#[derive(Debug, Default)]
pub struct AudioGate {
    unlocked: bool,
    last_head: Option<u64>,
}

impl AudioGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only on the first call.
    pub fn unlock(&mut self) -> bool {
        let first = !self.unlocked;
        self.unlocked = true;
        first
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Observe the current head. Heads seen while locked are remembered, so
    /// unlocking later does not replay a cue for an unchanged head.
    pub fn observe(&mut self, head: Option<&EventRecord>) -> Option<AudioCue> {
        let head_id = head.map(|h| h.id);
        if head_id == self.last_head {
            return None;
        }
        self.last_head = head_id;

        match head {
            Some(event) if self.unlocked => Some(event.kind.audio_cue()),
            _ => None,
        }
    }
}
