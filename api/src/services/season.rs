//! Season resolution for Tromsø travel dates.
//!
//! Seasons are a pure function of the calendar month:
//!
//! | Months            | Season        |
//! |-------------------|---------------|
//! | May – August      | `summer`      |
//! | November, January | `polar-night` |
//! | December, February| `winter`      |
//! | March, April, September, October | `winter` (shoulder months) |
//!
//! Shoulder months currently resolve to `winter`. Whether spring and autumn
//! deserve their own category is still open, so the mapping stays as is.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Travel-context season derived from a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Summer,
    Winter,
    PolarNight,
}

/// Static display metadata for a season, used for prompt and context building.
#[derive(Debug, Clone, Copy)]
pub struct SeasonInfo {
    pub name: &'static str,
    pub highlights: &'static [&'static str],
    pub weather: &'static str,
}

const SUMMER_INFO: SeasonInfo = SeasonInfo {
    name: "Midnight Sun Summer",
    highlights: &[
        "24-hour daylight under the midnight sun",
        "Mountain hikes above the city",
        "Fjord kayaking and island beaches",
        "Long evenings at harbourside restaurants",
    ],
    weather: "Mild and changeable, 10-20°C, frequent showers, the sun never sets until late July",
};

const WINTER_INFO: SeasonInfo = SeasonInfo {
    name: "Arctic Winter",
    highlights: &[
        "Northern lights on clear nights",
        "Husky and reindeer sledding",
        "Snow-covered fjords in blue-hour light",
        "Returning daylight after the dark period",
    ],
    weather: "Cold and snowy, -10 to 0°C, icy streets, several hours of daylight",
};

const POLAR_NIGHT_INFO: SeasonInfo = SeasonInfo {
    name: "Polar Night",
    highlights: &[
        "Peak northern lights season",
        "Whale watching in the fjords",
        "Pastel twilight instead of sunrise",
        "Cosy candlelit cafés and Christmas markets",
    ],
    weather: "Dark and cold, -8 to 2°C, the sun stays below the horizon, a few hours of twilight",
};

impl Season {
    /// Display metadata for this season.
    pub fn info(self) -> &'static SeasonInfo {
        match self {
            Season::Summer => &SUMMER_INFO,
            Season::Winter => &WINTER_INFO,
            Season::PolarNight => &POLAR_NIGHT_INFO,
        }
    }

    /// Whether the northern lights are visible (dark skies) in this season.
    pub fn has_aurora(self) -> bool {
        matches!(self, Season::Winter | Season::PolarNight)
    }

    /// Wire label, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::PolarNight => "polar-night",
        }
    }
}

/// Resolve the travel season for a calendar date. Total and side-effect free.
pub fn resolve_season(date: NaiveDate) -> Season {
    match date.month() {
        5..=8 => Season::Summer,
        11 | 1 => Season::PolarNight,
        12 | 2 => Season::Winter,
        // Shoulder months (3, 4, 9, 10)
        _ => Season::Winter,
    }
}
