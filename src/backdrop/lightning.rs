use std::time::Duration;

use rand::Rng;

use super::surface::{Rgba, Surface};

pub const DEFAULT_STRIKE_CHANCE: f64 = 0.002;
pub const AFTERGLOW_DELAY: Duration = Duration::from_millis(50);

const STRIKE_COLOR: Rgba = Rgba::new(255, 255, 220, 0.25);
const AFTERGLOW_COLOR: Rgba = Rgba::new(255, 255, 220, 0.15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Strike,
    Afterglow,
}

/// Storm flash sampler. A strike paints immediately; its fainter afterglow lands
/// on the first frame at or past [`AFTERGLOW_DELAY`].
#[derive(Debug, Clone)]
pub struct Lightning {
    chance: f64,
    afterglow_due: Option<Duration>,
}

impl Lightning {
    #[must_use]
    pub fn new(chance: f64) -> Self {
        Self {
            chance: if chance.is_finite() {
                chance.clamp(0.0, 1.0)
            } else {
                0.0
            },
            afterglow_due: None,
        }
    }

    #[must_use]
    pub fn chance(&self) -> f64 {
        self.chance
    }

    pub fn reset(&mut self) {
        self.afterglow_due = None;
    }

    /// Samples and paints this frame's flash, if any. `armed` is false outside storms;
    /// a pending afterglow is dropped then.
    pub fn sample<R: Rng, S: Surface + ?Sized>(
        &mut self,
        rng: &mut R,
        surface: &mut S,
        armed: bool,
        now: Duration,
    ) -> Option<FlashPhase> {
        if !armed {
            self.afterglow_due = None;
            return None;
        }

        if let Some(due) = self.afterglow_due
            && now >= due
        {
            self.afterglow_due = None;
            surface.fill_overlay(AFTERGLOW_COLOR);
            return Some(FlashPhase::Afterglow);
        }

        if self.chance > 0.0 && rng.random_bool(self.chance) {
            surface.fill_overlay(STRIKE_COLOR);
            self.afterglow_due = Some(now + AFTERGLOW_DELAY);
            return Some(FlashPhase::Strike);
        }

        None
    }
}

impl Default for Lightning {
    fn default() -> Self {
        Self::new(DEFAULT_STRIKE_CHANCE)
    }
}
