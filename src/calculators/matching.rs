use super::zodiac::{birth_score, sun_sign_index, SIGNS};
use crate::domain::model::BirthProfile;
use chrono::Datelike;
use serde::Serialize;

/// The eight kootas of Ashtakoota matching: name, maximum points, and the
/// scores at which a koota reads "Excellent" and "Good". Maxima sum to 36.
const KOOTAS: [(&str, u32, u32, u32); 8] = [
    ("varna", 1, 1, 1),
    ("vashya", 2, 2, 1),
    ("tara", 3, 2, 1),
    ("yoni", 4, 3, 2),
    ("graha_maitri", 5, 4, 3),
    ("gana", 6, 5, 4),
    ("bhakoot", 7, 6, 4),
    ("nadi", 8, 6, 4),
];

pub const MAX_SCORE: u32 = 36;

const STRENGTHS: [&str; 8] = [
    "Strong emotional compatibility",
    "Good communication between partners",
    "Similar life goals and values",
    "Mutual respect and understanding",
    "Compatible temperaments",
    "Shared interests and hobbies",
    "Strong physical attraction",
    "Good financial compatibility",
];

const CHALLENGES: [&str; 8] = [
    "Some differences in communication styles",
    "Minor conflicts in financial matters",
    "Different approaches to problem-solving",
    "Varied social preferences",
    "Different family expectations",
    "Conflicting career priorities",
    "Health-related concerns",
    "Cultural or religious differences",
];

const REMEDIES: [&str; 8] = [
    "Perform specific pujas for relationship harmony",
    "Wear recommended gemstones for compatibility",
    "Follow certain dietary guidelines together",
    "Practice meditation and yoga together",
    "Donate to charity for marital bliss",
    "Chant mantras for relationship strength",
    "Avoid certain activities during specific times",
    "Seek guidance from an astrologer",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KootaScore {
    pub koota: &'static str,
    pub score: u32,
    pub max_score: u32,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerSummary {
    pub name: String,
    pub zodiac_sign: &'static str,
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compatibility {
    pub score: u32,
    pub status: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingReading {
    pub male_details: PartnerSummary,
    pub female_details: PartnerSummary,
    pub compatibility: Compatibility,
    pub recommendation: &'static str,
    pub total_score: u32,
    pub max_score: u32,
    pub details: Vec<KootaScore>,
    pub strengths: Vec<&'static str>,
    pub challenges: Vec<&'static str>,
    pub remedies: Vec<&'static str>,
}

fn koota_status(score: u32, excellent_at: u32, good_at: u32) -> &'static str {
    if score >= excellent_at {
        "Excellent"
    } else if score >= good_at {
        "Good"
    } else {
        "Poor"
    }
}

fn level(percentage: u32) -> (&'static str, &'static str) {
    if percentage >= 75 {
        ("Excellent", "This is an excellent match with very high compatibility. The couple will enjoy a harmonious and prosperous relationship with strong mutual understanding and support.")
    } else if percentage >= 60 {
        ("Good", "This is a good match with strong compatibility. The couple can expect a harmonious relationship with some areas that may need attention and mutual understanding.")
    } else if percentage >= 45 {
        ("Average", "This is an average match with moderate compatibility. The couple may face some challenges but can build a successful relationship with effort and understanding.")
    } else {
        ("Poor", "This match shows lower compatibility. The couple may face significant challenges and should consider remedies or professional consultation before proceeding.")
    }
}

fn summary(profile: &BirthProfile) -> PartnerSummary {
    PartnerSummary {
        name: profile.name.clone(),
        zodiac_sign: SIGNS[sun_sign_index(profile.birth_date)].name,
        birth_date: profile.birth_date.format("%Y-%m-%d").to_string(),
    }
}

pub fn koota_scores(male: &BirthProfile, female: &BirthProfile) -> Vec<KootaScore> {
    let partner_salt = female.birth_date.num_days_from_ce() as u64;
    KOOTAS
        .iter()
        .enumerate()
        .map(|(index, &(koota, max_score, excellent_at, good_at))| {
            let salt = partner_salt.wrapping_mul(31).wrapping_add(index as u64);
            let score = (birth_score(male.birth_date, male.birth_time, salt) as u32) % (max_score + 1);
            KootaScore {
                koota,
                score,
                max_score,
                status: koota_status(score, excellent_at, good_at),
            }
        })
        .collect()
}

pub fn estimate(male: &BirthProfile, female: &BirthProfile) -> MatchingReading {
    let details = koota_scores(male, female);
    let total_score: u32 = details.iter().map(|k| k.score).sum();
    let percentage = ((total_score as f64 / MAX_SCORE as f64) * 100.0).round() as u32;
    let (status, recommendation) = level(percentage);

    let band = (percentage / 15) as usize;
    let strengths = STRENGTHS.iter().take(band + 2).copied().collect();
    let challenges = CHALLENGES
        .iter()
        .take(6usize.saturating_sub(band))
        .copied()
        .collect();
    let remedies = REMEDIES
        .iter()
        .take((percentage / 20) as usize + 2)
        .copied()
        .collect();

    MatchingReading {
        male_details: summary(male),
        female_details: summary(female),
        compatibility: Compatibility {
            score: percentage,
            status,
            description: format!("Compatibility score: {}%", percentage),
        },
        recommendation,
        total_score,
        max_score: MAX_SCORE,
        details,
        strengths,
        challenges,
        remedies,
    }
}
