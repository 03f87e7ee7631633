use serde::{Deserialize, Serialize};

use crate::env::Adherence;

/// Reward attached to each [`Adherence`] outcome.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardShaping {
    /// Reward for a tick that ends on the track.
    pub on_track: f32,
    /// Reward for leaving the track. Expected to be negative.
    pub off_track: f32,
}

impl Default for RewardShaping {
    fn default() -> Self {
        Self { on_track: 0.1, off_track: -1.0 }
    }
}

impl RewardShaping {
    #[must_use]
    pub fn reward(&self, adherence: Adherence) -> f32 {
        match adherence {
            Adherence::OnTrack => self.on_track,
            Adherence::OffTrack => self.off_track,
            Adherence::Score(score) => {
                let score = if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) };
                if score >= 0.0 {
                    score * self.on_track
                } else {
                    -score * self.off_track
                }
            }
        }
    }

    /// Leaving the track ends the run.
    #[must_use]
    pub fn requires_reset(adherence: Adherence) -> bool {
        matches!(adherence, Adherence::OffTrack)
    }
}

/// Exploration rate per tick: `start * decay^tick`, never below `min`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exploration {
    pub start: f32,
    pub min: f32,
    pub decay: f32,
}

impl Default for Exploration {
    fn default() -> Self {
        Self { start: 0.2, min: 0.0, decay: 1.0 }
    }
}

impl Exploration {
    /// Fixed rate with no decay.
    #[must_use]
    pub fn constant(rate: f32) -> Self {
        Self { start: rate, min: 0.0, decay: 1.0 }
    }

    #[must_use]
    pub fn rate_at(&self, tick: u64) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let decayed = self.start * self.decay.powf(tick as f32);
        decayed.max(self.min.min(self.start)).clamp(0.0, 1.0)
    }
}
