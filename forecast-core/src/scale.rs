//! Static lookup tables that turn measurements into descriptive terms.

/// Ordered `(upper bound, label)` pairs, ascending by bound.
///
/// The last bound is always `f64::INFINITY`, so every value lands in exactly
/// one entry. Tables are only built from the constants below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    entries: &'static [(f64, &'static str)],
}

/// Wind speed in km/h to Beaufort terms.
pub const BEAUFORT: ThresholdTable = ThresholdTable {
    entries: &[
        (1.0, "calm"),
        (6.0, "light air"),
        (12.0, "light breeze"),
        (20.0, "gentle breeze"),
        (29.0, "moderate breeze"),
        (39.0, "strong breeze"),
        (50.0, "near gale"),
        (61.0, "gale"),
        (74.0, "strong gale"),
        (f64::INFINITY, "storm"),
    ],
};

/// Precipitation amount in mm to intensity terms.
pub const PRECIPITATION: ThresholdTable = ThresholdTable {
    entries: &[
        (0.0, "no precipitation"),
        (2.5, "light rain"),
        (7.6, "moderate rain"),
        (25.0, "heavy rain"),
        (50.0, "very heavy rain"),
        (f64::INFINITY, "extremely heavy rain"),
    ],
};

impl ThresholdTable {
    /// Position of the first entry whose bound is strictly greater than
    /// `value`. NaN falls through to the catch-all entry.
    pub fn rank(&self, value: f64) -> usize {
        self.entries
            .iter()
            .position(|(bound, _)| *bound > value)
            .unwrap_or(self.entries.len() - 1)
    }

    pub fn classify(&self, value: f64) -> &'static str {
        self.entries[self.rank(value)].1
    }
}

pub fn classify(table: &ThresholdTable, value: f64) -> &'static str {
    table.classify(value)
}

pub fn beaufort(speed_kmh: f64) -> &'static str {
    BEAUFORT.classify(speed_kmh)
}

pub fn precipitation_intensity(amount_mm: f64) -> &'static str {
    PRECIPITATION.classify(amount_mm)
}

pub const UNKNOWN_CODE: &str = "Unknown code";

/// WMO present-weather codes as reported by Open-Meteo.
const WEATHER_CODES: &[(i32, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog and depositing rime fog"),
    (48, "Fog and depositing rime fog"),
    (51, "Drizzle: Light intensity"),
    (53, "Drizzle: Moderate intensity"),
    (55, "Drizzle: Dense intensity"),
    (56, "Freezing Drizzle: Light intensity"),
    (57, "Freezing Drizzle: Dense intensity"),
    (61, "Rain: Slight intensity"),
    (63, "Rain: Moderate intensity"),
    (65, "Rain: Heavy intensity"),
    (66, "Freezing Rain: Light intensity"),
    (67, "Freezing Rain: Heavy intensity"),
    (71, "Snow fall: Slight intensity"),
    (73, "Snow fall: Moderate intensity"),
    (75, "Snow fall: Heavy intensity"),
    (77, "Snow grains"),
    (80, "Rain showers: Slight intensity"),
    (81, "Rain showers: Moderate intensity"),
    (82, "Rain showers: Violent intensity"),
    (85, "Snow showers: Slight intensity"),
    (86, "Snow showers: Heavy intensity"),
    (95, "Thunderstorm: Slight or moderate"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Exact-match lookup; `None` for codes outside the table.
pub fn lookup(code: i32) -> Option<&'static str> {
    WEATHER_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

pub fn describe(code: i32) -> &'static str {
    lookup(code).unwrap_or(UNKNOWN_CODE)
}

/// All known codes in ascending order.
pub fn weather_codes() -> &'static [(i32, &'static str)] {
    WEATHER_CODES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_end_with_unbounded_catch_all() {
        for table in [BEAUFORT, PRECIPITATION] {
            let bounds: Vec<f64> = table.entries.iter().map(|(bound, _)| *bound).collect();
            assert!(bounds.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(bounds.last().copied(), Some(f64::INFINITY));
        }
    }

    #[test]
    fn beaufort_bounds_are_exclusive() {
        assert_eq!(beaufort(0.0), "calm");
        assert_eq!(beaufort(0.99), "calm");
        assert_eq!(beaufort(1.0), "light air");
        assert_eq!(beaufort(14.0), "gentle breeze");
        assert_eq!(beaufort(73.9), "strong gale");
        assert_eq!(beaufort(74.0), "storm");
        assert_eq!(beaufort(250.0), "storm");
    }

    #[test]
    fn precipitation_bounds_are_exclusive() {
        assert_eq!(precipitation_intensity(-0.1), "no precipitation");
        assert_eq!(precipitation_intensity(0.0), "light rain");
        assert_eq!(precipitation_intensity(2.5), "moderate rain");
        assert_eq!(precipitation_intensity(10.0), "heavy rain");
        assert_eq!(precipitation_intensity(49.9), "very heavy rain");
        assert_eq!(precipitation_intensity(50.0), "extremely heavy rain");
    }

    #[test]
    fn classify_handles_non_finite_values() {
        assert_eq!(classify(&BEAUFORT, f64::NEG_INFINITY), "calm");
        assert_eq!(classify(&BEAUFORT, f64::INFINITY), "storm");
        assert_eq!(classify(&BEAUFORT, f64::NAN), "storm");
        assert_eq!(classify(&PRECIPITATION, f64::INFINITY), "extremely heavy rain");
    }

    #[test]
    fn beaufort_rank_is_monotonic() {
        let mut previous = 0;
        for step in 0..1000 {
            let speed = f64::from(step) * 0.1;
            let rank = BEAUFORT.rank(speed);
            assert!(rank >= previous, "rank dropped at {speed} km/h");
            previous = rank;
        }
        assert_eq!(previous, BEAUFORT.entries.len() - 1);
    }

    #[test]
    fn describe_known_and_unknown_codes() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(61), "Rain: Slight intensity");
        assert_eq!(describe(99), "Thunderstorm with heavy hail");
        assert_eq!(describe(100), "Unknown code");
        assert_eq!(describe(4), "Unknown code");
        assert_eq!(describe(-1), "Unknown code");
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let known = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81,
            82, 85, 86, 95, 96, 99,
        ];
        for code in -5..=105 {
            assert_eq!(lookup(code).is_some(), known.contains(&code), "code {code}");
        }
        assert_eq!(weather_codes().len(), known.len());
    }
}
