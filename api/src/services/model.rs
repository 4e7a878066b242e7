//! Model-backed plan generator.
//!
//! Prompts the completion provider, then turns the raw text into a
//! [`TripPlan`] through three strict steps:
//!
//! 1. extract the JSON payload (tolerating a markdown code fence),
//! 2. decode it into the typed schema (any missing or mistyped field rejects
//!    the whole response, no per-field repair),
//! 3. validate structural invariants against the request.
//!
//! Accepted plans have their free-text fields clamped to fixed lengths.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::helpers::truncate_chars as clamp;

use super::completion::{CompletionProvider, CompletionRequest};
use super::plan::{ActivityDuration, TripPlan};
use super::preferences::TripPreferences;
use super::prompt::{system_instruction, user_instruction};
use super::season::Season;
use super::telemetry::{FallbackReason, GenerationObserver, UsageRecord};

/// Creativity setting for itinerary prompts.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// Field length limits (characters) applied to accepted model output.
const MAX_SUMMARY: usize = 1200;
const MAX_THEME: usize = 120;
const MAX_TITLE: usize = 120;
const MAX_DESCRIPTION: usize = 600;
const MAX_LOCATION: usize = 160;
const MAX_TIME: usize = 40;
const MAX_DURATION_TEXT: usize = 60;
const MAX_VENUE: usize = 120;
const MAX_AURORA_TIME: usize = 60;
const MAX_NOTE: usize = 300;
const MAX_LIST_ENTRIES: usize = 30;

/// Why a model response was not accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanRejection {
    #[error("response is empty")]
    Empty,
    #[error("response does not match the plan schema: {0}")]
    Schema(String),
    #[error("plan contains no days")]
    NoDays,
    #[error("plan has {actual} days, expected {expected}")]
    DayCount { expected: usize, actual: usize },
    #[error("day numbers are not contiguous from 1")]
    DayNumbering,
    #[error("aurora probability {0} is above 100")]
    AuroraProbability(u8),
    #[error("day {day} is dated {actual}, expected {expected}")]
    DayDate {
        day: u32,
        expected: NaiveDate,
        actual: NaiveDate,
    },
    #[error("day {day} aurora record does not match the {season} season")]
    AuroraSeason { day: u32, season: &'static str },
    #[error("totalCost {declared} does not equal the activity cost sum {sum}")]
    TotalCost { declared: u64, sum: u64 },
}

/// Generates plans through a [`CompletionProvider`].
pub struct ModelPlanGenerator {
    provider: Arc<dyn CompletionProvider>,
    max_output_tokens: u32,
    temperature: f32,
}

impl ModelPlanGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, max_output_tokens: u32) -> Self {
        Self {
            provider,
            max_output_tokens,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Make exactly one completion attempt and return a validated plan.
    ///
    /// Never panics on provider output; every failure is reported as a
    /// [`FallbackReason`] so the caller can switch to the rule-based path.
    pub async fn generate(
        &self,
        preferences: &TripPreferences,
        season: Season,
        start_date: NaiveDate,
        dining_suggestions: &[String],
        observer: &dyn GenerationObserver,
    ) -> Result<TripPlan, FallbackReason> {
        let request = CompletionRequest {
            system: system_instruction(),
            user: user_instruction(preferences, season, start_date, dining_suggestions),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        };

        let started = Instant::now();
        let completion = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| FallbackReason::ProviderError(e.to_string()))?;

        if let Some(usage) = completion.usage {
            observer.record_usage(&UsageRecord {
                model: self.provider.model_name().to_string(),
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                latency_ms: started.elapsed().as_millis() as u64,
            });
        }

        parse_plan(
            &completion.text,
            usize::from(preferences.days),
            start_date,
            season,
        )
        .map_err(|e| FallbackReason::Rejected(e.to_string()))
    }
}

/// Extract, decode, validate and harden a raw model response.
pub fn parse_plan(
    raw: &str,
    expected_days: usize,
    start_date: NaiveDate,
    season: Season,
) -> Result<TripPlan, PlanRejection> {
    let payload = extract_json_payload(raw);
    if payload.is_empty() {
        return Err(PlanRejection::Empty);
    }

    let mut plan: TripPlan =
        serde_json::from_str(payload).map_err(|e| PlanRejection::Schema(e.to_string()))?;

    validate_plan(&plan, expected_days, start_date, season)?;
    clamp_plan(&mut plan);

    Ok(plan)
}

/// Return the JSON inside a markdown code fence if there is one, otherwise
/// the trimmed input.
///
/// Input that already parses as JSON is returned untouched, so backticks
/// inside string values never count as a fence.
pub fn extract_json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    if serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok() {
        return trimmed;
    }
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after_fence = &trimmed[start + 3..];
    let after_tag = after_fence
        .strip_prefix("json")
        .or_else(|| after_fence.strip_prefix("JSON"))
        .unwrap_or(after_fence);
    match after_tag.find("```") {
        Some(end) => after_tag[..end].trim(),
        None => after_tag.trim(),
    }
}

fn validate_plan(
    plan: &TripPlan,
    expected_days: usize,
    start_date: NaiveDate,
    season: Season,
) -> Result<(), PlanRejection> {
    if plan.days.is_empty() {
        return Err(PlanRejection::NoDays);
    }
    if plan.days.len() != expected_days {
        return Err(PlanRejection::DayCount {
            expected: expected_days,
            actual: plan.days.len(),
        });
    }
    if !plan.has_contiguous_days() {
        return Err(PlanRejection::DayNumbering);
    }
    if let Some(aurora) = plan
        .days
        .iter()
        .filter_map(|d| d.aurora.as_ref())
        .find(|a| a.probability > 100)
    {
        return Err(PlanRejection::AuroraProbability(aurora.probability));
    }
    for (offset, day) in plan.days.iter().enumerate() {
        let expected = start_date
            .checked_add_days(Days::new(offset as u64))
            .ok_or(PlanRejection::DayNumbering)?;
        if day.date != expected {
            return Err(PlanRejection::DayDate {
                day: day.day,
                expected,
                actual: day.date,
            });
        }
        if day.aurora.is_some() != season.has_aurora() {
            return Err(PlanRejection::AuroraSeason {
                day: day.day,
                season: season.as_str(),
            });
        }
    }
    let sum = plan.activity_cost_sum();
    if plan.total_cost != sum {
        return Err(PlanRejection::TotalCost {
            declared: plan.total_cost,
            sum,
        });
    }
    Ok(())
}

fn clamp_list(values: &mut Vec<String>, max_len: usize) {
    values.truncate(MAX_LIST_ENTRIES);
    for v in values.iter_mut() {
        clamp(v, max_len);
    }
}

fn clamp_plan(plan: &mut TripPlan) {
    clamp(&mut plan.summary, MAX_SUMMARY);
    clamp_list(&mut plan.safety_notes, MAX_NOTE);
    clamp_list(&mut plan.packing_list, MAX_NOTE);
    clamp_list(&mut plan.recommendations, MAX_NOTE);

    for day in plan.days.iter_mut() {
        clamp(&mut day.theme, MAX_THEME);
        for activity in day.activities.iter_mut() {
            clamp(&mut activity.time, MAX_TIME);
            clamp(&mut activity.title, MAX_TITLE);
            clamp(&mut activity.description, MAX_DESCRIPTION);
            clamp(&mut activity.location, MAX_LOCATION);
            if let ActivityDuration::Text(text) = &mut activity.duration {
                clamp(text, MAX_DURATION_TEXT);
            }
        }
        for venue in [&mut day.dining.lunch, &mut day.dining.dinner]
            .into_iter()
            .flatten()
        {
            clamp(venue, MAX_VENUE);
        }
        if let Some(aurora) = day.aurora.as_mut() {
            clamp(&mut aurora.best_time, MAX_AURORA_TIME);
            clamp(&mut aurora.location, MAX_LOCATION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::completion::testing::{Script, ScriptedProvider};
    use crate::services::preferences::tests::sample_preferences;
    use crate::services::rules::generate_rule_based;
    use crate::services::telemetry::tests::RecordingObserver;
    use serde_json::{json, Value};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn parse(raw: &str, days: usize) -> Result<TripPlan, PlanRejection> {
        parse_plan(raw, days, start(), Season::Winter)
    }

    /// A schema-valid three-day plan as the model would return it.
    fn valid_plan_json() -> Value {
        let plan = generate_rule_based(&sample_preferences(), Season::Winter, start());
        serde_json::to_value(plan).unwrap()
    }

    #[test]
    fn test_extract_plain_payload() {
        assert_eq!(extract_json_payload("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_extract_fenced_payload() {
        let raw = "Here you go:\n```json\n{\"a\":1}\n```\nEnjoy!";
        assert_eq!(extract_json_payload(raw), "{\"a\":1}");
        assert_eq!(extract_json_payload("```\n{\"b\":2}\n```"), "{\"b\":2}");
        assert_eq!(extract_json_payload("```json{\"c\":3}"), "{\"c\":3}");
    }

    #[test]
    fn test_parse_valid_plan() {
        let raw = valid_plan_json().to_string();
        let plan = parse(&raw, 3).unwrap();
        assert_eq!(plan.days.len(), 3);
        assert_eq!(plan.total_cost, plan.activity_cost_sum());
    }

    #[test]
    fn test_parse_fenced_plan() {
        let raw = format!("```json\n{}\n```", valid_plan_json());
        assert!(parse(&raw, 3).is_ok());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = parse("{\"summary\": \"cut off", 3).unwrap_err();
        assert!(matches!(err, PlanRejection::Schema(_)));
        assert_eq!(parse("   ", 3).unwrap_err(), PlanRejection::Empty);
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut value = valid_plan_json();
        value.as_object_mut().unwrap().remove("packingList");
        let err = parse(&value.to_string(), 3).unwrap_err();
        assert!(matches!(err, PlanRejection::Schema(_)));
    }

    #[test]
    fn test_mistyped_field_rejected() {
        let mut value = valid_plan_json();
        value["totalCost"] = json!("about 5000");
        assert!(matches!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::Schema(_)
        ));

        let mut value = valid_plan_json();
        value["days"][1]["theme"] = json!(42);
        assert!(matches!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::Schema(_)
        ));
    }

    #[test]
    fn test_missing_dining_rejected() {
        let mut value = valid_plan_json();
        value["days"][0].as_object_mut().unwrap().remove("dining");
        assert!(matches!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::Schema(_)
        ));
    }

    #[test]
    fn test_empty_days_rejected() {
        let mut value = valid_plan_json();
        value["days"] = json!([]);
        assert_eq!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::NoDays
        );
    }

    #[test]
    fn test_wrong_day_count_rejected() {
        let raw = valid_plan_json().to_string();
        assert_eq!(
            parse(&raw, 4).unwrap_err(),
            PlanRejection::DayCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_non_contiguous_days_rejected() {
        let mut value = valid_plan_json();
        value["days"][2]["day"] = json!(7);
        assert_eq!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::DayNumbering
        );
    }

    #[test]
    fn test_aurora_probability_bounded() {
        let mut value = valid_plan_json();
        value["days"][0]["aurora"]["probability"] = json!(150);
        assert_eq!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::AuroraProbability(150)
        );
    }

    #[test]
    fn test_total_cost_mismatch_rejected() {
        let mut value = valid_plan_json();
        let sum = value["totalCost"].as_u64().unwrap();
        value["totalCost"] = json!(1);
        assert_eq!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::TotalCost { declared: 1, sum }
        );
    }

    #[test]
    fn test_wrong_dates_rejected() {
        let mut value = valid_plan_json();
        value["days"][1]["date"] = json!("2019-07-04");
        assert_eq!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::DayDate {
                day: 2,
                expected: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
                actual: NaiveDate::from_ymd_opt(2019, 7, 4).unwrap(),
            }
        );
    }

    #[test]
    fn test_missing_aurora_in_winter_rejected() {
        let mut value = valid_plan_json();
        value["days"][0].as_object_mut().unwrap().remove("aurora");
        assert_eq!(
            parse(&value.to_string(), 3).unwrap_err(),
            PlanRejection::AuroraSeason {
                day: 1,
                season: "winter"
            }
        );
    }

    #[test]
    fn test_aurora_in_summer_rejected() {
        let raw = valid_plan_json().to_string();
        assert!(matches!(
            parse_plan(&raw, 3, start(), Season::Summer).unwrap_err(),
            PlanRejection::AuroraSeason { day: 1, .. }
        ));
    }

    #[test]
    fn test_backticks_inside_strings_are_not_fences() {
        let mut value = valid_plan_json();
        value["summary"] = json!("Pack a ```waterproof``` jacket");
        let plan = parse(&value.to_string(), 3).unwrap();
        assert_eq!(plan.summary, "Pack a ```waterproof``` jacket");
    }

    #[test]
    fn test_long_fields_truncated_not_rejected() {
        let mut value = valid_plan_json();
        value["days"][0]["activities"][0]["title"] = json!("å".repeat(500));
        value["summary"] = json!("x".repeat(5000));
        value["safetyNotes"] = json!(vec!["note"; 100]);
        let plan = parse(&value.to_string(), 3).unwrap();
        assert_eq!(plan.days[0].activities[0].title.chars().count(), MAX_TITLE);
        assert_eq!(plan.summary.len(), MAX_SUMMARY);
        assert_eq!(plan.safety_notes.len(), MAX_LIST_ENTRIES);
    }

    #[tokio::test]
    async fn test_generate_returns_plan_and_records_usage() {
        let provider = Arc::new(ScriptedProvider::new(Script::Reply(
            valid_plan_json().to_string(),
        )));
        let generator = ModelPlanGenerator::new(provider.clone(), 4000);
        let observer = RecordingObserver::default();

        let plan = generator
            .generate(&sample_preferences(), Season::Winter, start(), &[], &observer)
            .await
            .unwrap();

        assert_eq!(plan.days.len(), 3);
        assert_eq!(provider.calls(), 1);
        let usage = observer.usage.lock().unwrap();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].model, "scripted");
        assert_eq!(usage[0].completion_tokens, 1500);
    }

    #[tokio::test]
    async fn test_generate_provider_failure() {
        let provider = Arc::new(ScriptedProvider::new(Script::Fail));
        let generator = ModelPlanGenerator::new(provider, 4000);
        let observer = RecordingObserver::default();

        let err = generator
            .generate(&sample_preferences(), Season::Winter, start(), &[], &observer)
            .await
            .unwrap_err();

        assert!(matches!(err, FallbackReason::ProviderError(_)));
        assert!(observer.usage.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_rejects_prose() {
        let provider = Arc::new(ScriptedProvider::new(Script::Reply(
            "Sorry, I can't help with that.".to_string(),
        )));
        let generator = ModelPlanGenerator::new(provider, 4000);
        let observer = RecordingObserver::default();

        let err = generator
            .generate(&sample_preferences(), Season::Winter, start(), &[], &observer)
            .await
            .unwrap_err();

        assert!(matches!(err, FallbackReason::Rejected(_)));
    }
}
