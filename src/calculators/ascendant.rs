use super::zodiac::SIGNS;
use crate::domain::model::BirthProfile;
use chrono::Timelike;
use serde::Serialize;

struct RisingProfile {
    appearance: &'static str,
    personality: &'static str,
    traits: [&'static str; 4],
    career: &'static str,
}

const RISING: [RisingProfile; 12] = [
    RisingProfile { appearance: "Strong features, athletic build, confident demeanor", personality: "Bold, energetic, pioneering, direct", traits: ["Leadership", "Courage", "Independence", "Assertiveness"], career: "Entrepreneur, athlete, military, surgeon" },
    RisingProfile { appearance: "Pleasant features, solid build, graceful movements", personality: "Stable, practical, sensual, reliable", traits: ["Patience", "Loyalty", "Determination", "Sensuality"], career: "Banking, agriculture, arts, real estate" },
    RisingProfile { appearance: "Youthful features, expressive eyes, quick movements", personality: "Curious, communicative, adaptable, witty", traits: ["Versatility", "Intelligence", "Social skills", "Adaptability"], career: "Journalism, teaching, sales, technology" },
    RisingProfile { appearance: "Round face, soft features, nurturing presence", personality: "Nurturing, intuitive, protective, emotional", traits: ["Empathy", "Intuition", "Protectiveness", "Emotional depth"], career: "Nursing, hospitality, real estate, family business" },
    RisingProfile { appearance: "Regal bearing, confident posture, magnetic presence", personality: "Dramatic, confident, generous, creative", traits: ["Charisma", "Creativity", "Generosity", "Leadership"], career: "Entertainment, politics, management, arts" },
    RisingProfile { appearance: "Refined features, neat appearance, intelligent eyes", personality: "Analytical, practical, modest, helpful", traits: ["Precision", "Service", "Modesty", "Analytical mind"], career: "Healthcare, research, accounting, administration" },
    RisingProfile { appearance: "Balanced features, graceful movements, charming smile", personality: "Diplomatic, harmonious, fair, social", traits: ["Balance", "Diplomacy", "Charm", "Fairness"], career: "Law, diplomacy, fashion, counseling" },
    RisingProfile { appearance: "Intense eyes, magnetic presence, strong features", personality: "Intense, passionate, mysterious, transformative", traits: ["Intensity", "Passion", "Transformation", "Mystery"], career: "Psychology, investigation, research, healing" },
    RisingProfile { appearance: "Optimistic expression, athletic build, adventurous look", personality: "Adventurous, optimistic, philosophical, free-spirited", traits: ["Adventure", "Optimism", "Philosophy", "Freedom"], career: "Travel, education, publishing, sports" },
    RisingProfile { appearance: "Mature features, serious expression, professional bearing", personality: "Ambitious, practical, responsible, disciplined", traits: ["Ambition", "Discipline", "Responsibility", "Achievement"], career: "Management, politics, engineering, finance" },
    RisingProfile { appearance: "Unique features, friendly expression, modern style", personality: "Innovative, independent, humanitarian, unconventional", traits: ["Innovation", "Independence", "Humanitarianism", "Uniqueness"], career: "Technology, science, social work, innovation" },
    RisingProfile { appearance: "Dreamy eyes, gentle features, artistic aura", personality: "Compassionate, intuitive, artistic, spiritual", traits: ["Compassion", "Intuition", "Artistry", "Spirituality"], career: "Arts, healing, spirituality, charity work" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscendantReading {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_place: String,
    pub ascendant: &'static str,
    pub element: &'static str,
    pub quality: &'static str,
    pub ruler: &'static str,
    pub appearance: &'static str,
    pub personality: &'static str,
    pub traits: [&'static str; 4],
    pub career: &'static str,
    pub compatibility: [&'static str; 4],
    pub degree: u32,
}

/// A new sign rises roughly every two hours of clock time.
pub fn ascendant_index(profile: &BirthProfile) -> usize {
    let minutes = profile.birth_time.hour() * 60 + profile.birth_time.minute();
    ((minutes / 120) % 12) as usize
}

pub fn estimate(profile: &BirthProfile) -> AscendantReading {
    let index = ascendant_index(profile);
    let sign = &SIGNS[index];
    let rising = &RISING[index];
    let wire = profile.to_wire();

    AscendantReading {
        name: wire.name,
        birth_date: wire.birth_date,
        birth_time: wire.birth_time,
        birth_place: wire.birth_place,
        ascendant: sign.name,
        element: sign.element,
        quality: sign.quality,
        ruler: sign.ruler,
        appearance: rising.appearance,
        personality: rising.personality,
        traits: rising.traits,
        career: rising.career,
        compatibility: sign.compatibility,
        degree: profile.birth_time.minute() % 30 + 1,
    }
}
