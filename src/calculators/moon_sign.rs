use super::zodiac::SIGNS;
use crate::domain::model::BirthProfile;
use chrono::Datelike;
use serde::Serialize;

const EMOTIONAL_PROFILE: [([&str; 4], &str); 12] = [
    (["Energetic", "Impulsive", "Independent", "Courageous"], "Quick to react, passionate, needs freedom"),
    (["Stable", "Practical", "Loyal", "Sensual"], "Steady, reliable, values security and comfort"),
    (["Curious", "Versatile", "Communicative", "Adaptable"], "Changeable, intellectual, needs mental stimulation"),
    (["Nurturing", "Intuitive", "Protective", "Emotional"], "Deeply emotional, caring, needs emotional security"),
    (["Dramatic", "Confident", "Generous", "Creative"], "Proud, warm, needs recognition and appreciation"),
    (["Analytical", "Practical", "Modest", "Helpful"], "Perfectionist, caring, needs to be useful"),
    (["Diplomatic", "Harmonious", "Fair", "Social"], "Balanced, romantic, needs partnership and harmony"),
    (["Intense", "Passionate", "Mysterious", "Transformative"], "Deep, intense, needs emotional intimacy"),
    (["Adventurous", "Optimistic", "Philosophical", "Free-spirited"], "Enthusiastic, independent, needs freedom and adventure"),
    (["Ambitious", "Practical", "Responsible", "Disciplined"], "Controlled, ambitious, needs achievement and respect"),
    (["Innovative", "Independent", "Humanitarian", "Unconventional"], "Detached, idealistic, needs intellectual freedom"),
    (["Compassionate", "Intuitive", "Artistic", "Spiritual"], "Sensitive, empathetic, needs spiritual connection"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonSignReading {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_place: String,
    pub moon_sign: &'static str,
    pub element: &'static str,
    pub quality: &'static str,
    pub ruler: &'static str,
    pub traits: [&'static str; 4],
    pub emotions: &'static str,
    pub compatibility: [&'static str; 4],
    pub moon_phase: &'static str,
    pub moon_degree: u32,
}

/// The moon moves through a sign roughly every 2.5 days.
pub fn moon_sign_index(profile: &BirthProfile) -> usize {
    let day_of_year = profile.birth_date.ordinal() as f64;
    ((day_of_year / 2.5) % 12.0).floor() as usize
}

pub fn estimate(profile: &BirthProfile) -> MoonSignReading {
    let index = moon_sign_index(profile);
    let sign = &SIGNS[index];
    let (traits, emotions) = EMOTIONAL_PROFILE[index];
    let wire = profile.to_wire();

    MoonSignReading {
        name: wire.name,
        birth_date: wire.birth_date,
        birth_time: wire.birth_time,
        birth_place: wire.birth_place,
        moon_sign: sign.name,
        element: sign.element,
        quality: sign.quality,
        ruler: sign.ruler,
        traits,
        emotions,
        compatibility: sign.compatibility,
        moon_phase: "Waxing Crescent",
        moon_degree: profile.birth_date.ordinal() % 30 + 1,
    }
}
