use super::zodiac::birth_score;
use crate::domain::model::BirthProfile;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dosha {
    pub name: &'static str,
    pub severity: &'static str,
    pub description: &'static str,
    pub effects: [&'static str; 3],
    pub remedies: [&'static str; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoshaReport {
    pub doshas: Vec<Dosha>,
    pub overall_health: &'static str,
    pub total_doshas: usize,
}

/// Shown instead of an empty list so the result card is never blank.
pub const NO_MAJOR_DOSHAS: Dosha = Dosha {
    name: "No Major Doshas",
    severity: "None",
    description: "Your birth chart shows no major planetary doshas",
    effects: ["Balanced life", "Good health", "Harmonious relationships"],
    remedies: ["Continue current practices", "Regular meditation", "Charitable acts"],
};

/// Candidate doshas with the score (out of 100) at or above which each is reported.
const CANDIDATES: [(u64, Dosha); 5] = [
    (70, Dosha {
        name: "Mangal Dosha",
        severity: "High",
        description: "Mars is placed in 1st, 2nd, 4th, 7th, 8th, or 12th house",
        effects: ["Delayed marriage", "Relationship challenges", "Aggressive nature"],
        remedies: ["Wear coral gemstone", "Donate red items on Tuesdays", "Perform Mangal Puja"],
    }),
    (60, Dosha {
        name: "Shani Dosha",
        severity: "Medium",
        description: "Saturn is causing malefic effects in your chart",
        effects: ["Career delays", "Financial struggles", "Health issues"],
        remedies: ["Wear blue sapphire", "Donate black items on Saturdays", "Feed black dogs"],
    }),
    (50, Dosha {
        name: "Rahu-Ketu Dosha",
        severity: "Medium",
        description: "Rahu and Ketu are causing negative effects",
        effects: ["Mental confusion", "Sudden changes", "Addiction tendencies"],
        remedies: ["Chant Rahu and Ketu mantras", "Wear hessonite and cat's eye", "Meditation"],
    }),
    (80, Dosha {
        name: "Chandra Dosha",
        severity: "Low",
        description: "Moon is weak or afflicted in your chart",
        effects: ["Emotional instability", "Sleep problems", "Mood swings"],
        remedies: ["Wear pearl", "Donate milk on Mondays", "Chant Chandra mantra"],
    }),
    (70, Dosha {
        name: "Surya Dosha",
        severity: "Low",
        description: "Sun is weak or afflicted in your chart",
        effects: ["Low confidence", "Authority issues", "Eye problems"],
        remedies: ["Wear ruby", "Donate wheat on Sundays", "Chant Surya mantra"],
    }),
];

impl DoshaReport {
    pub fn from_doshas(doshas: Vec<Dosha>) -> Self {
        let total_doshas = doshas.len();
        let overall_health = match total_doshas {
            0 => "Excellent",
            1 | 2 => "Good",
            _ => "Needs Attention",
        };

        Self {
            doshas: if doshas.is_empty() {
                vec![NO_MAJOR_DOSHAS]
            } else {
                doshas
            },
            overall_health,
            total_doshas,
        }
    }
}

pub fn estimate(profile: &BirthProfile) -> DoshaReport {
    let doshas = CANDIDATES
        .iter()
        .enumerate()
        .filter(|(salt, (threshold, _))| {
            birth_score(profile.birth_date, profile.birth_time, *salt as u64) >= *threshold
        })
        .map(|(_, (_, dosha))| dosha.clone())
        .collect();

    DoshaReport::from_doshas(doshas)
}

/// Applies the same empty-list rule to a backend payload.
pub fn ensure_doshas_present(result: &mut Value) {
    if let Some(doshas) = result.get_mut("doshas") {
        if doshas.as_array().is_some_and(|list| list.is_empty()) {
            *doshas = json!([NO_MAJOR_DOSHAS]);
        }
    }
}
