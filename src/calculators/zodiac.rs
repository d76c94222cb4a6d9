use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInfo {
    pub name: &'static str,
    pub element: &'static str,
    pub quality: &'static str,
    pub ruler: &'static str,
    pub compatibility: [&'static str; 4],
}

pub const SIGNS: [SignInfo; 12] = [
    SignInfo { name: "Aries", element: "Fire", quality: "Cardinal", ruler: "Mars", compatibility: ["Leo", "Sagittarius", "Gemini", "Aquarius"] },
    SignInfo { name: "Taurus", element: "Earth", quality: "Fixed", ruler: "Venus", compatibility: ["Virgo", "Capricorn", "Cancer", "Pisces"] },
    SignInfo { name: "Gemini", element: "Air", quality: "Mutable", ruler: "Mercury", compatibility: ["Libra", "Aquarius", "Aries", "Leo"] },
    SignInfo { name: "Cancer", element: "Water", quality: "Cardinal", ruler: "Moon", compatibility: ["Scorpio", "Pisces", "Taurus", "Virgo"] },
    SignInfo { name: "Leo", element: "Fire", quality: "Fixed", ruler: "Sun", compatibility: ["Aries", "Sagittarius", "Gemini", "Libra"] },
    SignInfo { name: "Virgo", element: "Earth", quality: "Mutable", ruler: "Mercury", compatibility: ["Taurus", "Capricorn", "Cancer", "Scorpio"] },
    SignInfo { name: "Libra", element: "Air", quality: "Cardinal", ruler: "Venus", compatibility: ["Gemini", "Aquarius", "Leo", "Sagittarius"] },
    SignInfo { name: "Scorpio", element: "Water", quality: "Fixed", ruler: "Mars/Pluto", compatibility: ["Cancer", "Pisces", "Virgo", "Capricorn"] },
    SignInfo { name: "Sagittarius", element: "Fire", quality: "Mutable", ruler: "Jupiter", compatibility: ["Aries", "Leo", "Libra", "Aquarius"] },
    SignInfo { name: "Capricorn", element: "Earth", quality: "Cardinal", ruler: "Saturn", compatibility: ["Taurus", "Virgo", "Scorpio", "Pisces"] },
    SignInfo { name: "Aquarius", element: "Air", quality: "Fixed", ruler: "Saturn/Uranus", compatibility: ["Gemini", "Libra", "Aries", "Sagittarius"] },
    SignInfo { name: "Pisces", element: "Water", quality: "Mutable", ruler: "Jupiter/Neptune", compatibility: ["Cancer", "Scorpio", "Taurus", "Capricorn"] },
];

/// Tropical sun sign by calendar date. Index into [`SIGNS`].
pub fn sun_sign_index(date: NaiveDate) -> usize {
    // (month, first day) each sign starts on, Capricorn wraps the year end.
    const STARTS: [(u32, u32); 12] = [
        (3, 21), (4, 20), (5, 21), (6, 21), (7, 23), (8, 23),
        (9, 23), (10, 23), (11, 22), (12, 22), (1, 20), (2, 19),
    ];

    let md = (date.month(), date.day());
    let mut found = 9; // Capricorn: Dec 22 - Jan 19
    for (index, start) in STARTS.iter().enumerate() {
        let end = STARTS[(index + 1) % 12];
        let in_range = if start <= &end {
            md >= *start && md < end
        } else {
            md >= *start || md < end
        };
        if in_range {
            found = index;
            break;
        }
    }
    found
}

/// Stable pseudo-random score in `0..100` for a birth moment.
///
/// Same inputs always give the same score; `salt` separates independent draws.
pub fn birth_score(date: NaiveDate, time: NaiveTime, salt: u64) -> u64 {
    let minutes = date.num_days_from_ce() as i64 * 1440 + (time.hour() * 60 + time.minute()) as i64;
    let mut x = (minutes as u64) ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    x % 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sun_sign_boundaries() {
        assert_eq!(SIGNS[sun_sign_index(date(1990, 3, 21))].name, "Aries");
        assert_eq!(SIGNS[sun_sign_index(date(1990, 3, 20))].name, "Pisces");
        assert_eq!(SIGNS[sun_sign_index(date(1990, 6, 15))].name, "Gemini");
        assert_eq!(SIGNS[sun_sign_index(date(1990, 12, 25))].name, "Capricorn");
        assert_eq!(SIGNS[sun_sign_index(date(1991, 1, 5))].name, "Capricorn");
        assert_eq!(SIGNS[sun_sign_index(date(1991, 1, 20))].name, "Aquarius");
    }

    #[test]
    fn test_birth_score_is_stable_and_bounded() {
        let d = date(1990, 6, 15);
        let t = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        for salt in 0..20 {
            let first = birth_score(d, t, salt);
            assert!(first < 100);
            assert_eq!(first, birth_score(d, t, salt));
        }
    }
}
