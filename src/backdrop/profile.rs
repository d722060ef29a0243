use super::surface::Rgba;

pub const DEFAULT_CONDITION: &str = "Clear";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Sparkle,
    Haze,
    Cloud,
    Rain,
    Snow,
}

/// Immutable per-condition description of the particle pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualProfile {
    pub condition: &'static str,
    pub count: usize,
    pub kinds: &'static [ParticleKind],
    pub colors: &'static [Rgba],
    pub speed: f32,
    pub size: (f32, f32),
    pub opacity: (f32, f32),
    pub drift: Option<f32>,
    pub angle: Option<f32>,
    pub lightning: bool,
    pub blur: bool,
}

pub static PROFILES: [VisualProfile; 6] = [
    VisualProfile {
        condition: "Clear",
        count: 30,
        kinds: &[ParticleKind::Sparkle, ParticleKind::Haze],
        colors: &[Rgba::new(255, 220, 150, 0.6), Rgba::new(255, 200, 100, 0.4)],
        speed: 0.05,
        size: (2.0, 6.0),
        opacity: (0.4, 0.8),
        drift: None,
        angle: None,
        lightning: false,
        blur: false,
    },
    VisualProfile {
        condition: "Clouds",
        count: 18,
        kinds: &[ParticleKind::Cloud],
        colors: &[Rgba::new(220, 240, 255, 0.5), Rgba::new(200, 220, 240, 0.45)],
        speed: 0.02,
        size: (40.0, 90.0),
        opacity: (0.2, 0.35),
        drift: None,
        angle: None,
        lightning: false,
        blur: true,
    },
    VisualProfile {
        condition: "Rain",
        count: 85,
        kinds: &[ParticleKind::Rain],
        colors: &[Rgba::new(160, 210, 255, 0.7), Rgba::new(130, 190, 255, 0.65)],
        speed: 6.0,
        size: (12.0, 22.0),
        opacity: (0.5, 0.8),
        drift: None,
        angle: Some(-0.2),
        lightning: false,
        blur: false,
    },
    VisualProfile {
        condition: "Snow",
        count: 60,
        kinds: &[ParticleKind::Snow],
        colors: &[Rgba::new(255, 255, 255, 0.9), Rgba::new(235, 245, 255, 0.85)],
        speed: 2.0,
        size: (3.0, 8.0),
        opacity: (0.7, 1.0),
        drift: Some(0.3),
        angle: None,
        lightning: false,
        blur: true,
    },
    VisualProfile {
        condition: "Thunderstorm",
        count: 100,
        kinds: &[ParticleKind::Rain],
        colors: &[Rgba::new(100, 170, 255, 0.8), Rgba::new(70, 140, 255, 0.75)],
        speed: 10.0,
        size: (16.0, 26.0),
        opacity: (0.6, 0.9),
        drift: None,
        angle: Some(-0.3),
        lightning: true,
        blur: false,
    },
    VisualProfile {
        condition: "Mist",
        count: 15,
        kinds: &[ParticleKind::Cloud],
        colors: &[Rgba::new(210, 220, 230, 0.35), Rgba::new(190, 200, 210, 0.3)],
        speed: 0.01,
        size: (70.0, 120.0),
        opacity: (0.15, 0.25),
        drift: None,
        angle: None,
        lightning: false,
        blur: true,
    },
];

/// Case-sensitive lookup; anything unknown gets the Clear profile.
#[must_use]
pub fn profile_for(condition: &str) -> &'static VisualProfile {
    PROFILES
        .iter()
        .find(|profile| profile.condition == condition)
        .unwrap_or(&PROFILES[0])
}

#[must_use]
pub fn is_known_condition(condition: &str) -> bool {
    PROFILES.iter().any(|profile| profile.condition == condition)
}

/// Colour family of the sky gradient and the blur decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyTone {
    Clear,
    Overcast,
    Wet,
    Snow,
    Other,
}

impl SkyTone {
    #[must_use]
    pub fn for_condition(condition: &str) -> Self {
        match condition {
            "Clear" => Self::Clear,
            "Clouds" | "Mist" => Self::Overcast,
            "Rain" | "Thunderstorm" => Self::Wet,
            "Snow" => Self::Snow,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn is_low_visibility(self) -> bool {
        self == Self::Overcast
    }
}
