use crate::domain::model::BirthProfile;
use chrono::Datelike;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gemstone {
    pub name: &'static str,
    pub planet: &'static str,
    pub color: &'static str,
    pub benefits: [&'static str; 3],
    pub price: &'static str,
    pub finger: &'static str,
}

const GEMSTONES: [Gemstone; 9] = [
    Gemstone { name: "Ruby", planet: "Sun", color: "Red", benefits: ["Confidence", "Leadership", "Authority"], price: "₹5,000 - ₹50,000", finger: "Ring finger" },
    Gemstone { name: "Pearl", planet: "Moon", color: "White", benefits: ["Emotional stability", "Intuition", "Peace"], price: "₹3,000 - ₹30,000", finger: "Little finger" },
    Gemstone { name: "Red Coral", planet: "Mars", color: "Red-Orange", benefits: ["Courage", "Energy", "Leadership"], price: "₹2,000 - ₹20,000", finger: "Ring finger" },
    Gemstone { name: "Emerald", planet: "Mercury", color: "Green", benefits: ["Communication", "Intelligence", "Business"], price: "₹10,000 - ₹1,00,000", finger: "Little finger" },
    Gemstone { name: "Yellow Sapphire", planet: "Jupiter", color: "Yellow", benefits: ["Wisdom", "Prosperity", "Knowledge"], price: "₹8,000 - ₹80,000", finger: "Index finger" },
    Gemstone { name: "Diamond", planet: "Venus", color: "Colorless", benefits: ["Love", "Beauty", "Luxury"], price: "₹20,000 - ₹5,00,000", finger: "Middle finger" },
    Gemstone { name: "Blue Sapphire", planet: "Saturn", color: "Blue", benefits: ["Discipline", "Longevity", "Spirituality"], price: "₹15,000 - ₹2,00,000", finger: "Middle finger" },
    Gemstone { name: "Hessonite", planet: "Rahu", color: "Orange-Brown", benefits: ["Intuition", "Success", "Protection"], price: "₹5,000 - ₹50,000", finger: "Little finger" },
    Gemstone { name: "Cat's Eye", planet: "Ketu", color: "Yellow-Green", benefits: ["Spirituality", "Detachment", "Protection"], price: "₹8,000 - ₹80,000", finger: "Little finger" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Primary,
    Secondary,
    Complementary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub gemstone: Gemstone,
    pub priority: Priority,
    pub recommendation: &'static str,
    pub wearing_time: &'static str,
    pub metal: &'static str,
}

/// Summary shape the result card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GemstoneReading {
    pub primary_gemstone: &'static str,
    pub secondary_gemstone: &'static str,
    pub wearing_finger: &'static str,
    pub wearing_day: &'static str,
    pub benefits: String,
    pub metal: &'static str,
    pub recommendations: Vec<Recommendation>,
}

pub fn recommendations(profile: &BirthProfile) -> Vec<Recommendation> {
    let month = profile.birth_date.month0() as usize;
    let day = profile.birth_date.day() as usize;
    let count = GEMSTONES.len();

    let primary = month % count;
    let secondary = (day + 3) % count;
    let complementary = (month + day) % count;

    let mut picks = vec![Recommendation {
        gemstone: GEMSTONES[primary],
        priority: Priority::Primary,
        recommendation: "Highly recommended based on your birth chart",
        wearing_time: "6 AM - 8 AM",
        metal: "Gold or Silver",
    }];
    if secondary != primary {
        picks.push(Recommendation {
            gemstone: GEMSTONES[secondary],
            priority: Priority::Secondary,
            recommendation: "Beneficial for specific life areas",
            wearing_time: "As needed",
            metal: "Silver or Copper",
        });
    }
    if complementary != primary && complementary != secondary {
        picks.push(Recommendation {
            gemstone: GEMSTONES[complementary],
            priority: Priority::Complementary,
            recommendation: "For overall balance and harmony",
            wearing_time: "During specific planetary periods",
            metal: "Any suitable metal",
        });
    }
    picks
}

pub fn estimate(profile: &BirthProfile) -> GemstoneReading {
    let picks = recommendations(profile);
    let primary = &picks[0];
    let secondary = picks
        .iter()
        .find(|r| r.priority == Priority::Secondary)
        .map(|r| r.gemstone.name)
        .unwrap_or("Pearl");

    GemstoneReading {
        primary_gemstone: primary.gemstone.name,
        secondary_gemstone: secondary,
        wearing_finger: primary.gemstone.finger,
        wearing_day: "Sunday",
        benefits: primary.gemstone.benefits.join(", "),
        metal: primary.metal,
        recommendations: picks,
    }
}
