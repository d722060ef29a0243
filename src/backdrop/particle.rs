#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use rand::{Rng, seq::IndexedRandom};

use super::{
    profile::{ParticleKind, VisualProfile},
    surface::{Point, Rgba, Surface, Viewport},
};

/// Off-screen distance a particle may travel before it reappears on the opposite edge.
pub const WRAP_MARGIN: f32 = 100.0;

const HAZE_COLOR: Rgba = Rgba::new(255, 235, 200, 0.2);
const MIN_SPARKLE_RADIUS: f32 = 0.5;
const DEFAULT_SNOW_DRIFT: f32 = 0.2;

// Motion constants are per elapsed millisecond.
const DRIFT_RATE: f32 = 0.1;
const FALL_RATE: f32 = 0.08;
const SWAY_RATE: f64 = 0.002;

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Sparkle {
        radius: f32,
        vx: f32,
        vy: f32,
        pulse: f32,
        pulse_speed: f32,
    },
    Haze {
        radius: f32,
        vx: f32,
        vy: f32,
    },
    Cloud {
        radius: f32,
        vx: f32,
        vy: f32,
        puffs: u8,
    },
    Rain {
        length: f32,
        fall: f32,
        slant: f32,
        thickness: f32,
    },
    Snow {
        radius: f32,
        vx: f32,
        vy: f32,
        sway: f32,
        phase: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub color: Rgba,
    pub body: Body,
}

impl Particle {
    pub fn spawn<R: Rng>(profile: &VisualProfile, viewport: Viewport, rng: &mut R) -> Self {
        let kind = profile
            .kinds
            .choose(rng)
            .copied()
            .unwrap_or(ParticleKind::Sparkle);
        let color = profile.colors.choose(rng).copied().unwrap_or(HAZE_COLOR);
        let x = rng.random::<f32>() * viewport.width_f32();
        let y = rng.random::<f32>() * viewport.height_f32();
        let opacity = between(rng, profile.opacity);

        let (opacity, color, body) = match kind {
            ParticleKind::Sparkle => (
                opacity,
                color,
                Body::Sparkle {
                    radius: between(rng, profile.size),
                    vx: centered(rng) * profile.speed,
                    vy: centered(rng) * profile.speed * 0.6,
                    pulse: 0.5 + rng.random::<f32>() * 0.5,
                    pulse_speed: 0.02 + rng.random::<f32>() * 0.03,
                },
            ),
            ParticleKind::Haze => (
                profile.opacity.0 * 0.5,
                HAZE_COLOR,
                Body::Haze {
                    radius: 10.0 + rng.random::<f32>() * 30.0,
                    vx: centered(rng) * 0.03,
                    vy: centered(rng) * 0.02,
                },
            ),
            ParticleKind::Cloud => (
                opacity,
                color,
                Body::Cloud {
                    radius: between(rng, profile.size),
                    vx: profile.speed + rng.random::<f32>() * 0.02,
                    vy: centered(rng) * 0.003,
                    puffs: rng.random_range(3..=5),
                },
            ),
            ParticleKind::Rain => (
                opacity,
                color,
                Body::Rain {
                    length: between(rng, profile.size),
                    fall: profile.speed + rng.random::<f32>() * 3.0,
                    slant: profile.angle.unwrap_or(0.0),
                    thickness: 1.0 + rng.random::<f32>() * 1.2,
                },
            ),
            ParticleKind::Snow => (
                opacity,
                color,
                Body::Snow {
                    radius: between(rng, profile.size),
                    vx: centered(rng) * profile.drift.unwrap_or(DEFAULT_SNOW_DRIFT),
                    vy: profile.speed * 0.5 + rng.random::<f32>() * profile.speed,
                    sway: rng.random::<f32>() * 0.5,
                    phase: rng.random::<f32>() * 100.0,
                },
            ),
        };

        Self {
            x,
            y,
            opacity,
            color,
            body,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ParticleKind {
        match self.body {
            Body::Sparkle { .. } => ParticleKind::Sparkle,
            Body::Haze { .. } => ParticleKind::Haze,
            Body::Cloud { .. } => ParticleKind::Cloud,
            Body::Rain { .. } => ParticleKind::Rain,
            Body::Snow { .. } => ParticleKind::Snow,
        }
    }

    /// Integrates one frame of motion. `dt_ms` is already clamped by the caller;
    /// `wall_ms` drives the oscillating terms.
    pub fn step(&mut self, dt_ms: f32, wall_ms: f64) {
        match &mut self.body {
            Body::Sparkle {
                radius,
                vx,
                vy,
                pulse,
                pulse_speed,
            } => {
                self.x += *vx * dt_ms * DRIFT_RATE;
                self.y += *vy * dt_ms * DRIFT_RATE;
                let wave = (wall_ms * f64::from(*pulse_speed)).sin() as f32;
                *radius = (*radius + wave * 0.05 * *pulse).max(MIN_SPARKLE_RADIUS);
            }
            Body::Haze { vx, vy, .. } | Body::Cloud { vx, vy, .. } => {
                self.x += *vx * dt_ms * DRIFT_RATE;
                self.y += *vy * dt_ms * DRIFT_RATE;
            }
            Body::Rain { fall, slant, .. } => {
                self.y += *fall * dt_ms * FALL_RATE;
                self.x += *slant * dt_ms * DRIFT_RATE;
            }
            Body::Snow {
                vx,
                vy,
                sway,
                phase,
                ..
            } => {
                let swing = (wall_ms * SWAY_RATE + f64::from(*phase)).sin() as f32;
                self.x += *vx * dt_ms * DRIFT_RATE + swing * *sway;
                self.y += *vy * dt_ms * FALL_RATE;
            }
        }
    }

    /// Toroidal wrap: leaving past the margin re-enters at the opposite margin.
    pub fn wrap(&mut self, viewport: Viewport) {
        let (w, h) = (viewport.width_f32(), viewport.height_f32());
        if self.x > w + WRAP_MARGIN {
            self.x = -WRAP_MARGIN;
        }
        if self.x < -WRAP_MARGIN {
            self.x = w + WRAP_MARGIN;
        }
        if self.y > h + WRAP_MARGIN {
            self.y = -WRAP_MARGIN;
        }
        if self.y < -WRAP_MARGIN {
            self.y = h + WRAP_MARGIN;
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, soft_focus: bool) {
        let color = self.color.with_opacity(self.opacity);
        let glow_scale = if soft_focus { 1.5 } else { 1.0 };
        let at = Point::new(self.x, self.y);

        match &self.body {
            Body::Rain {
                length,
                slant,
                thickness,
                ..
            } => {
                let tail = Point::new(self.x + slant * 5.0, self.y + length);
                surface.stroke_line(at, tail, *thickness, color);
            }
            Body::Snow { radius, .. } => {
                surface.fill_circle(at, *radius, color, 6.0 * glow_scale);
            }
            Body::Sparkle { radius, .. } | Body::Haze { radius, .. } => {
                surface.fill_circle(at, *radius, color, 10.0 * glow_scale);
            }
            Body::Cloud { radius, puffs, .. } => {
                for j in 0..*puffs {
                    let j = f32::from(j);
                    let offset = Point::new(
                        self.x + (j - 1.0) * radius * 0.4,
                        self.y + j.sin() * radius * 0.2,
                    );
                    surface.fill_circle(offset, radius * (0.7 + j * 0.2), color, 20.0 * glow_scale);
                }
            }
        }
    }
}

fn between<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

fn centered<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>() - 0.5
}
