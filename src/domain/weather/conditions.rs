use crate::backdrop::raster::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionInfo {
    pub condition: &'static str,
    pub icon: &'static str,
    pub color: Rgb,
    pub tips: &'static [&'static str],
}

const CONDITIONS: [ConditionInfo; 7] = [
    ConditionInfo {
        condition: "Clear",
        icon: "☀",
        color: Rgb::new(255, 215, 0),
        tips: &[
            "Perfect day for outdoor activities!",
            "Wear sunscreen if going outside.",
            "Stay hydrated in the sun.",
        ],
    },
    ConditionInfo {
        condition: "Clouds",
        icon: "☁",
        color: Rgb::new(176, 176, 176),
        tips: &[
            "Good day for a walk!",
            "Carry an umbrella just in case.",
            "Light jacket recommended.",
        ],
    },
    ConditionInfo {
        condition: "Rain",
        icon: "☂",
        color: Rgb::new(70, 130, 180),
        tips: &[
            "Stay dry with an umbrella!",
            "Perfect day to stay in and read.",
            "Drive carefully on wet roads.",
        ],
    },
    ConditionInfo {
        condition: "Snow",
        icon: "❄",
        color: Rgb::new(135, 206, 235),
        tips: &[
            "Wear warm clothing!",
            "Watch for icy surfaces.",
            "Perfect for hot cocoa!",
        ],
    },
    ConditionInfo {
        condition: "Thunderstorm",
        icon: "⚡",
        color: Rgb::new(72, 61, 139),
        tips: &[
            "Stay indoors if possible!",
            "Unplug electronic devices.",
            "Avoid using landline phones.",
        ],
    },
    ConditionInfo {
        condition: "Drizzle",
        icon: "☔",
        color: Rgb::new(100, 149, 237),
        tips: &[
            "Light rain expected.",
            "Carry an umbrella.",
            "Good day for photography.",
        ],
    },
    ConditionInfo {
        condition: "Mist",
        icon: "░",
        color: Rgb::new(211, 211, 211),
        tips: &[
            "Drive carefully in fog!",
            "Use fog lights if available.",
            "Allow extra travel time.",
        ],
    },
];

const HEAT_TIPS: [&str; 3] = [
    "Stay hydrated!",
    "Avoid direct sun during peak hours.",
    "Wear light clothing.",
];
const COLD_TIPS: [&str; 3] = [
    "Wear layers to stay warm!",
    "Protect exposed skin from cold.",
    "Check heating systems.",
];
const FALLBACK_TIP: &str = "Check local weather updates.";

fn lookup(condition: &str) -> Option<&'static ConditionInfo> {
    CONDITIONS.iter().find(|info| info.condition == condition)
}

/// Display info for a condition; unknown conditions borrow Clear's.
#[must_use]
pub fn condition_info(condition: &str) -> &'static ConditionInfo {
    lookup(condition).unwrap_or(&CONDITIONS[0])
}

#[must_use]
pub fn weather_tips(condition: &str, temp_c: f32) -> Vec<String> {
    let base: &[&str] = lookup(condition).map_or(&[FALLBACK_TIP], |info| info.tips);
    let extra: &[&str] = if temp_c > 30.0 {
        &HEAT_TIPS
    } else if temp_c < 5.0 {
        &COLD_TIPS
    } else {
        &[]
    };
    base.iter().chain(extra).map(|tip| (*tip).to_string()).collect()
}

/// Full URL for an icon code; full URLs pass through.
#[must_use]
pub fn icon_url(icon: &str) -> String {
    if icon.starts_with("http") {
        icon.to_string()
    } else {
        format!("https://openweathermap.org/img/wn/{icon}@2x.png")
    }
}
