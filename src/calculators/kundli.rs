use super::ascendant::ascendant_index;
use super::moon_sign::moon_sign_index;
use super::zodiac::{birth_score, sun_sign_index, SIGNS};
use crate::domain::model::BirthProfile;
use chrono::Datelike;
use serde::Serialize;

/// Sanskrit rashi names, in [`SIGNS`] order.
const RASHI_NAMES: [&str; 12] = [
    "Mesha", "Vrishabha", "Mithuna", "Karka", "Simha", "Kanya",
    "Tula", "Vrishchika", "Dhanu", "Makara", "Kumbha", "Meena",
];

const NAKSHATRAS: [&str; 27] = [
    "Ashwini", "Bharani", "Krittika", "Rohini", "Mrigashira", "Ardra",
    "Punarvasu", "Pushya", "Ashlesha", "Magha", "Purva Phalguni", "Uttara Phalguni",
    "Hasta", "Chitra", "Swati", "Vishakha", "Anuradha", "Jyeshtha",
    "Mula", "Purva Ashadha", "Uttara Ashadha", "Shravana", "Dhanishtha", "Shatabhisha",
    "Purva Bhadrapada", "Uttara Bhadrapada", "Revati",
];

const YOGAS: [&str; 8] = [
    "Gaj Kesari Yoga",
    "Chandra Mangal Yoga",
    "Hamsa Yoga",
    "Malavya Yoga",
    "Sasa Yoga",
    "Ruchaka Yoga",
    "Bhadra Yoga",
    "Sankha Yoga",
];

/// Mars in one of these signs marks the chart as manglik.
const MANGLIK_SIGNS: [&str; 4] = ["Aries", "Scorpio", "Leo", "Sagittarius"];

const GUNA_SALT: u64 = 0x6b75_6e64;
const YOGA_SALT: u64 = 0x796f_6761;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetPositions {
    pub sun: &'static str,
    pub moon: &'static str,
    pub mars: &'static str,
    pub mercury: &'static str,
    pub jupiter: &'static str,
    pub venus: &'static str,
    pub saturn: &'static str,
    pub rahu: &'static str,
    pub ketu: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KundliReading {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_place: String,
    pub sun_sign: &'static str,
    pub moon_sign: &'static str,
    pub ascendant: &'static str,
    pub rashi: &'static str,
    pub nakshatra: &'static str,
    pub guna: u32,
    pub manglik: &'static str,
    pub yogas: Vec<&'static str>,
    pub planets: PlanetPositions,
}

/// Planets sit at fixed offsets from the moon's sign.
fn planet_positions(sun: usize, moon: usize) -> PlanetPositions {
    let at = |offset: usize| SIGNS[(moon + offset) % 12].name;
    PlanetPositions {
        sun: SIGNS[sun].name,
        moon: SIGNS[moon].name,
        mars: at(2),
        mercury: at(4),
        jupiter: at(6),
        venus: at(8),
        saturn: at(10),
        rahu: at(1),
        ketu: at(7),
    }
}

pub fn estimate(profile: &BirthProfile) -> KundliReading {
    let sun = sun_sign_index(profile.birth_date);
    let moon = moon_sign_index(profile);
    let planets = planet_positions(sun, moon);

    let guna = 18 + (birth_score(profile.birth_date, profile.birth_time, GUNA_SALT) % 20) as u32;
    let yoga_count = 1 + (birth_score(profile.birth_date, profile.birth_time, YOGA_SALT) % 3) as usize;
    let manglik = if MANGLIK_SIGNS.contains(&planets.mars) { "Yes" } else { "No" };

    let wire = profile.to_wire();
    KundliReading {
        name: wire.name,
        birth_date: wire.birth_date,
        birth_time: wire.birth_time,
        birth_place: wire.birth_place,
        sun_sign: SIGNS[sun].name,
        moon_sign: SIGNS[moon].name,
        ascendant: SIGNS[ascendant_index(profile)].name,
        rashi: RASHI_NAMES[sun],
        nakshatra: NAKSHATRAS[profile.birth_date.day() as usize % NAKSHATRAS.len()],
        guna,
        manglik,
        yogas: YOGAS[..yoga_count].to_vec(),
        planets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn profile(date: &str, time: &str) -> BirthProfile {
        BirthProfile {
            name: "Asha".to_string(),
            birth_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            birth_time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            birth_place: "Kolkata".to_string(),
            gender: None,
        }
    }

    #[test]
    fn test_kundli_is_reproducible() {
        let p = profile("1990-06-15", "10:00");
        let first = estimate(&p);
        assert_eq!(estimate(&p), first);

        assert_eq!(first.sun_sign, "Gemini");
        assert_eq!(first.rashi, "Mithuna");
        assert_eq!(first.moon_sign, "Libra");
        assert_eq!(first.ascendant, "Virgo");
        assert_eq!(first.nakshatra, "Vishakha");
        assert_eq!(first.planets.moon, "Libra");
        // Libra + 2 signs
        assert_eq!(first.planets.mars, "Sagittarius");
        assert_eq!(first.manglik, "Yes");
    }

    #[test]
    fn test_guna_and_yogas_stay_in_range() {
        for day in 1..=28 {
            let reading = estimate(&profile(&format!("1985-02-{:02}", day), "06:30"));
            assert!((18..38).contains(&reading.guna));
            assert!((1..=3).contains(&reading.yogas.len()));
            assert_eq!(reading.yogas[0], "Gaj Kesari Yoga");
        }
    }

    #[test]
    fn test_manglik_follows_mars() {
        let readings: Vec<_> = (1..=28)
            .map(|day| estimate(&profile(&format!("2001-09-{:02}", day), "12:00")))
            .collect();

        for reading in &readings {
            assert_eq!(
                reading.manglik == "Yes",
                MANGLIK_SIGNS.contains(&reading.planets.mars)
            );
        }
        assert!(readings.iter().any(|r| r.manglik == "Yes"));
        assert!(readings.iter().any(|r| r.manglik == "No"));
    }
}
