//! Itinerary schema shared by both generators, the store and the HTTP layer.
//!
//! The same types double as the strict decode target for model output, so
//! every field is required unless it is an `Option`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Activity length, either whole minutes or free text ("2-3 hours").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ActivityDuration {
    Minutes(u32),
    Text(String),
}

/// One entry within a day, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// "HH:MM" or descriptive ("Evening")
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Cost per person in NOK
    pub cost: u32,
    pub duration: ActivityDuration,
    pub booking_required: bool,
}

/// Lunch and dinner venue suggestions for a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dining {
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
}

/// Northern lights outlook for one evening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuroraForecast {
    /// Chance of a sighting, 0-100
    pub probability: u8,
    pub best_time: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based, contiguous day number
    pub day: u32,
    pub date: NaiveDate,
    pub theme: String,
    pub activities: Vec<Activity>,
    pub dining: Dining,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aurora: Option<AuroraForecast>,
}

impl DayPlan {
    pub fn cost(&self) -> u64 {
        self.activities.iter().map(|a| u64::from(a.cost)).sum()
    }
}

/// A complete generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub summary: String,
    pub days: Vec<DayPlan>,
    /// Sum of every activity cost across all days, in NOK
    pub total_cost: u64,
    pub safety_notes: Vec<String>,
    pub packing_list: Vec<String>,
    pub recommendations: Vec<String>,
}

impl TripPlan {
    /// Arithmetic sum of all activity costs.
    pub fn activity_cost_sum(&self) -> u64 {
        self.days.iter().map(DayPlan::cost).sum()
    }

    /// Whether `days` is numbered 1..=n without gaps.
    pub fn has_contiguous_days(&self) -> bool {
        self.days
            .iter()
            .enumerate()
            .all(|(i, d)| d.day as usize == i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(cost: u32) -> Activity {
        Activity {
            time: "10:00".to_string(),
            title: "Fjellheisen".to_string(),
            description: "Cable car ride".to_string(),
            location: "Solliveien 12".to_string(),
            cost,
            duration: ActivityDuration::Minutes(90),
            booking_required: false,
        }
    }

    fn day(n: u32, costs: &[u32]) -> DayPlan {
        DayPlan {
            day: n,
            date: NaiveDate::from_ymd_opt(2026, 2, n).unwrap(),
            theme: "Arrival".to_string(),
            activities: costs.iter().map(|&c| activity(c)).collect(),
            dining: Dining::default(),
            aurora: None,
        }
    }

    #[test]
    fn test_activity_cost_sum() {
        let plan = TripPlan {
            summary: String::new(),
            days: vec![day(1, &[100, 200]), day(2, &[0, 1290])],
            total_cost: 0,
            safety_notes: vec![],
            packing_list: vec![],
            recommendations: vec![],
        };
        assert_eq!(plan.activity_cost_sum(), 1590);
        assert!(plan.has_contiguous_days());
    }

    #[test]
    fn test_gap_in_day_numbers_detected() {
        let plan = TripPlan {
            summary: String::new(),
            days: vec![day(1, &[]), day(3, &[])],
            total_cost: 0,
            safety_notes: vec![],
            packing_list: vec![],
            recommendations: vec![],
        };
        assert!(!plan.has_contiguous_days());
    }

    #[test]
    fn test_duration_accepts_minutes_or_text() {
        let m: ActivityDuration = serde_json::from_value(json!(120)).unwrap();
        assert_eq!(m, ActivityDuration::Minutes(120));
        let t: ActivityDuration = serde_json::from_value(json!("2-3 hours")).unwrap();
        assert_eq!(t, ActivityDuration::Text("2-3 hours".to_string()));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let value = serde_json::to_value(activity(50)).unwrap();
        assert_eq!(value["bookingRequired"], json!(false));
        assert!(value.get("booking_required").is_none());
    }

    #[test]
    fn test_aurora_omitted_when_absent() {
        let value = serde_json::to_value(day(1, &[10])).unwrap();
        assert!(value.get("aurora").is_none());
        assert_eq!(value["date"], json!("2026-02-01"));
    }
}
