//! Trip preferences submitted by the traveller, plus input validation.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Shortest supported trip length in days.
pub const MIN_DAYS: u8 = 1;
/// Longest supported trip length in days.
pub const MAX_DAYS: u8 = 14;
/// Group size assumed when the request leaves it out.
pub const DEFAULT_GROUP_SIZE: u32 = 2;

/// Reasons a preference object is rejected before generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("days must be between 1 and 14, got {0}")]
    DaysOutOfRange(u8),
    #[error("at least one interest is required")]
    NoInterests,
    #[error("groupSize must be a positive integer")]
    EmptyGroup,
    #[error("startDate {0} leaves no room for a {1}-day trip")]
    StartDateOutOfRange(NaiveDate, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    pub fn as_str(self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        }
    }

    /// Descriptive spend-per-day band in NOK.
    pub fn daily_band(self) -> &'static str {
        match self {
            Budget::Low => "budget-conscious, roughly 1,000-1,800 NOK per person per day",
            Budget::Medium => "mid-range, roughly 1,800-3,500 NOK per person per day",
            Budget::High => "premium, 3,500 NOK or more per person per day",
        }
    }
}

/// Things the traveller wants the trip to focus on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
    Aurora,
    Dining,
    Hiking,
    Photography,
    Culture,
    History,
    Wildlife,
    Fjords,
    Wellness,
    Nightlife,
}

impl Interest {
    pub fn as_str(self) -> &'static str {
        match self {
            Interest::Aurora => "aurora",
            Interest::Dining => "dining",
            Interest::Hiking => "hiking",
            Interest::Photography => "photography",
            Interest::Culture => "culture",
            Interest::History => "history",
            Interest::Wildlife => "wildlife",
            Interest::Fjords => "fjords",
            Interest::Wellness => "wellness",
            Interest::Nightlife => "nightlife",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    Car,
    NoCar,
}

impl Transport {
    pub fn describe(self) -> &'static str {
        match self {
            Transport::Car => "rental car (self-drive day trips are possible)",
            Transport::NoCar => "no car (walking, city buses and guided tours only)",
        }
    }
}

/// Physical intensity of the trip; drives the pace of each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Active,
}

impl Difficulty {
    pub fn pace_descriptor(self) -> &'static str {
        match self {
            Difficulty::Easy => "relaxed pace: 2-3 activities per day, short walks, plenty of rest",
            Difficulty::Moderate => {
                "balanced pace: 3-4 activities per day, some hiking and time on foot"
            }
            Difficulty::Active => {
                "active pace: 4-5 activities per day, longer hikes and full-day excursions"
            }
        }
    }
}

/// Preferences for one trip. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    /// Trip length in days (1-14)
    pub days: u8,
    pub budget: Budget,
    /// Non-empty set of interests
    #[schema(value_type = Vec<Interest>)]
    pub interests: BTreeSet<Interest>,
    pub transport: Transport,
    pub difficulty: Difficulty,
    /// First day of the trip; defaults to the current date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Number of travellers; defaults to 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u32>,
}

impl TripPreferences {
    /// Check the invariants generation relies on.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(PreferenceError::DaysOutOfRange(self.days));
        }
        if self.interests.is_empty() {
            return Err(PreferenceError::NoInterests);
        }
        if self.group_size == Some(0) {
            return Err(PreferenceError::EmptyGroup);
        }
        if let Some(start) = self.start_date {
            let last_offset = Days::new(u64::from(self.days) - 1);
            if start.checked_add_days(last_offset).is_none() {
                return Err(PreferenceError::StartDateOutOfRange(start, self.days));
            }
        }
        Ok(())
    }

    pub fn group_size(&self) -> u32 {
        self.group_size.unwrap_or(DEFAULT_GROUP_SIZE)
    }

    /// Start date, falling back to `today` when none was given.
    pub fn start_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.unwrap_or(today)
    }

    pub fn has_interest(&self, interest: Interest) -> bool {
        self.interests.contains(&interest)
    }

    /// Comma-separated interest labels in a stable order.
    pub fn interest_list(&self) -> String {
        self.interests
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Baseline preferences used across the crate's tests.
    pub(crate) fn sample_preferences() -> TripPreferences {
        serde_json::from_value(json!({
            "days": 3,
            "budget": "medium",
            "interests": ["aurora", "dining"],
            "transport": "car",
            "difficulty": "moderate",
            "startDate": "2026-02-01",
            "groupSize": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_sample_is_valid() {
        let prefs = sample_preferences();
        assert_eq!(prefs.validate(), Ok(()));
        assert_eq!(prefs.days, 3);
        assert_eq!(prefs.transport, Transport::Car);
        assert_eq!(
            prefs.start_date,
            Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_days_out_of_range() {
        let mut prefs = sample_preferences();
        prefs.days = 15;
        assert_eq!(prefs.validate(), Err(PreferenceError::DaysOutOfRange(15)));
        prefs.days = 0;
        assert_eq!(prefs.validate(), Err(PreferenceError::DaysOutOfRange(0)));
        prefs.days = 14;
        assert_eq!(prefs.validate(), Ok(()));
    }

    #[test]
    fn test_empty_interests_rejected() {
        let mut prefs = sample_preferences();
        prefs.days = 2;
        prefs.interests.clear();
        assert_eq!(prefs.validate(), Err(PreferenceError::NoInterests));
    }

    #[test]
    fn test_zero_group_rejected() {
        let mut prefs = sample_preferences();
        prefs.group_size = Some(0);
        assert_eq!(prefs.validate(), Err(PreferenceError::EmptyGroup));
    }

    #[test]
    fn test_start_date_must_fit_whole_trip() {
        let mut prefs = sample_preferences();
        prefs.start_date = Some(NaiveDate::MAX);
        assert_eq!(
            prefs.validate(),
            Err(PreferenceError::StartDateOutOfRange(NaiveDate::MAX, 3))
        );

        prefs.days = 1;
        assert_eq!(prefs.validate(), Ok(()));

        prefs.days = 3;
        prefs.start_date = NaiveDate::MAX.checked_sub_days(Days::new(2));
        assert_eq!(prefs.validate(), Ok(()));
    }

    #[test]
    fn test_defaults() {
        let prefs: TripPreferences = serde_json::from_value(json!({
            "days": 1,
            "budget": "low",
            "interests": ["hiking"],
            "transport": "no-car",
            "difficulty": "easy"
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert_eq!(prefs.group_size(), DEFAULT_GROUP_SIZE);
        assert_eq!(prefs.start_date_or(today), today);
        assert_eq!(prefs.transport, Transport::NoCar);
    }

    #[test]
    fn test_duplicate_interests_collapse() {
        let prefs: TripPreferences = serde_json::from_value(json!({
            "days": 2,
            "budget": "high",
            "interests": ["photography", "aurora", "photography"],
            "transport": "car",
            "difficulty": "active"
        }))
        .unwrap();
        assert_eq!(prefs.interests.len(), 2);
        assert_eq!(prefs.interest_list(), "aurora, photography");
    }

    #[test]
    fn test_unknown_interest_fails_to_decode() {
        let result = serde_json::from_value::<TripPreferences>(json!({
            "days": 2,
            "budget": "medium",
            "interests": ["skydiving"],
            "transport": "car",
            "difficulty": "easy"
        }));
        assert!(result.is_err());
    }
}
