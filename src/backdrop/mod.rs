//! Condition-aware animated background.
//!
//! A [`Backdrop`] owns a pool of particles built from the [`VisualProfile`]
//! of the active weather condition and paints one frame at a time onto a
//! [`Surface`]. [`BackdropHandle`] is what the rest of the app holds: it
//! wraps the backdrop together with the [`FrameLoop`] that drives it, or is
//! inert when no surface was available.

pub mod frame_loop;
pub mod handle;
pub mod lightning;
pub mod particle;
pub mod profile;
pub mod raster;
pub mod sky;
pub mod surface;


use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};

pub use frame_loop::FrameLoop;
pub use handle::BackdropHandle;
pub use lightning::{FlashPhase, Lightning};
pub use particle::{Body, Particle, WRAP_MARGIN};
pub use profile::{DEFAULT_CONDITION, ParticleKind, SkyTone, VisualProfile, profile_for};
pub use surface::{LinearGradient, Point, Rgba, Surface, Viewport};

/// Longest step a single frame may integrate, however long the gap since the last one.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

pub const LOW_VISIBILITY_BLUR: f32 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BackdropOptions {
    pub fps: u8,
    pub lightning: bool,
    pub strike_chance: f64,
    pub seed: Option<u64>,
}

impl Default for BackdropOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            lightning: true,
            strike_chance: lightning::DEFAULT_STRIKE_CHANCE,
            seed: None,
        }
    }
}

/// Timestamp handed to each frame: monotonic time since the loop started,
/// plus wall-clock milliseconds for the oscillating effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub since_start: Duration,
    pub wall_ms: f64,
}

impl FrameTime {
    #[must_use]
    pub const fn new(since_start: Duration, wall_ms: f64) -> Self {
        Self {
            since_start,
            wall_ms,
        }
    }
}

#[derive(Debug)]
pub struct Backdrop<S> {
    surface: S,
    condition: String,
    profile: &'static VisualProfile,
    particles: Vec<Particle>,
    last_frame: Option<Duration>,
    lightning: Lightning,
    lightning_enabled: bool,
    rng: StdRng,
    needs_rebuild: bool,
    frames_drawn: u64,
    last_flash: Option<FlashPhase>,
}

impl<S: Surface> Backdrop<S> {
    pub fn new(surface: S, initial: Option<&str>, options: &BackdropOptions) -> Self {
        let rng = options.seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );
        let condition = normalized(initial.unwrap_or(DEFAULT_CONDITION));
        let mut backdrop = Self {
            surface,
            condition: condition.to_string(),
            profile: profile_for(condition),
            particles: Vec::new(),
            last_frame: None,
            lightning: Lightning::new(options.strike_chance),
            lightning_enabled: options.lightning,
            rng,
            needs_rebuild: true,
            frames_drawn: 0,
            last_flash: None,
        };
        backdrop.rebuild();
        backdrop
    }

    #[must_use]
    pub fn condition(&self) -> &str {
        &self.condition
    }

    #[must_use]
    pub fn profile(&self) -> &'static VisualProfile {
        self.profile
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    #[must_use]
    pub fn last_flash(&self) -> Option<FlashPhase> {
        self.last_flash
    }

    /// Switches profile and rebuilds the whole pool, even for the same condition.
    /// Unknown conditions keep their name (the sky uses it) but get the Clear profile.
    pub fn set_condition(&mut self, condition: &str) {
        let condition = normalized(condition);
        if !profile::is_known_condition(condition) {
            log::debug!("no visual profile for {condition:?}, using {DEFAULT_CONDITION}");
        }
        self.condition = condition.to_string();
        self.profile = profile_for(condition);
        self.rebuild();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        if viewport.is_empty() {
            log::debug!("backdrop resized to empty viewport, deferring rebuild");
            self.needs_rebuild = true;
            return;
        }
        self.rebuild();
    }

    pub(crate) fn frame(&mut self, now: FrameTime) {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.since_start.saturating_sub(last))
            .min(MAX_FRAME_STEP);
        self.last_frame = Some(now.since_start);

        let viewport = self.surface.viewport();
        if viewport.is_empty() {
            return;
        }
        if self.needs_rebuild {
            self.rebuild();
        }

        let tone = SkyTone::for_condition(&self.condition);
        self.surface.set_blur(0.0);
        self.surface.clear();
        self.surface
            .fill_gradient(&sky::sky_gradient(tone, viewport, now.wall_ms));
        self.surface.set_blur(if tone.is_low_visibility() {
            LOW_VISIBILITY_BLUR
        } else {
            0.0
        });

        let dt_ms = elapsed.as_secs_f32() * 1000.0;
        let soft_focus = self.profile.blur;
        for particle in &mut self.particles {
            particle.step(dt_ms, now.wall_ms);
            particle.wrap(viewport);
            particle.draw(&mut self.surface, soft_focus);
        }
        self.surface.set_blur(0.0);

        let armed = self.lightning_enabled && self.profile.lightning;
        self.last_flash =
            self.lightning
                .sample(&mut self.rng, &mut self.surface, armed, now.since_start);
        self.frames_drawn = self.frames_drawn.saturating_add(1);
    }

    fn rebuild(&mut self) {
        let viewport = self.surface.viewport();
        if viewport.is_empty() {
            self.needs_rebuild = true;
            return;
        }

        let profile = self.profile;
        let rng = &mut self.rng;
        self.particles = (0..profile.count)
            .map(|_| Particle::spawn(profile, viewport, &mut *rng))
            .collect();
        self.needs_rebuild = false;
        self.lightning.reset();
        log::debug!(
            "backdrop rebuilt: {} particles for {:?} at {}x{}",
            self.particles.len(),
            self.condition,
            viewport.width,
            viewport.height
        );
    }
}

/// A blank condition means no condition at all.
fn normalized(condition: &str) -> &str {
    if condition.trim().is_empty() {
        DEFAULT_CONDITION
    } else {
        condition
    }
}
