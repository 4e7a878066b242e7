//! Prompt construction for the model-backed generator.

use chrono::NaiveDate;

use super::catalog::{essential_themes, featured_landmarks};
use super::preferences::{Interest, TripPreferences};
use super::season::Season;

/// How many pilars of each kind are named in the prompt.
const PROMPT_PILAR_COUNT: usize = 5;

/// Shape the model must reproduce. Field names match the serde wire format of
/// [`super::plan::TripPlan`].
const PLAN_SCHEMA: &str = r#"{
  "summary": "string, one paragraph",
  "days": [
    {
      "day": 1,
      "date": "YYYY-MM-DD",
      "theme": "string",
      "activities": [
        {
          "time": "HH:MM",
          "title": "string",
          "description": "string",
          "location": "string",
          "cost": 0,
          "duration": "string or minutes as integer",
          "bookingRequired": false
        }
      ],
      "dining": { "lunch": "string or null", "dinner": "string or null" },
      "aurora": { "probability": 0, "bestTime": "string", "location": "string" }
    }
  ],
  "totalCost": 0,
  "safetyNotes": ["string"],
  "packingList": ["string"],
  "recommendations": ["string"]
}"#;

/// System instruction: role plus the strict JSON-only contract.
pub fn system_instruction() -> String {
    format!(
        "You are an expert local trip curator for Tromsø, Norway, with years of experience \
         planning seasonal Arctic itineraries. Respond with a single JSON object and nothing \
         else: no prose, no markdown, no code fences. The JSON must match this schema exactly, \
         using the same field names and types:\n{}\n\
         Costs are whole numbers in NOK per person. \"day\" numbers start at 1 and are \
         contiguous. Omit \"aurora\" on days without a realistic northern lights chance. \
         \"totalCost\" must equal the sum of every activity cost.",
        PLAN_SCHEMA
    )
}

/// User instruction embedding the traveller's preferences and seasonal context.
///
/// `dining_suggestions` are optional venue names from the dining directory.
pub fn user_instruction(
    preferences: &TripPreferences,
    season: Season,
    start_date: NaiveDate,
    dining_suggestions: &[String],
) -> String {
    let info = season.info();
    let interests: Vec<Interest> = preferences.interests.iter().copied().collect();

    let landmarks = featured_landmarks(season, &interests)
        .iter()
        .take(PROMPT_PILAR_COUNT)
        .map(|p| format!("- {} (importance {}/10)", p.name, p.weight))
        .collect::<Vec<_>>()
        .join("\n");
    let themes = essential_themes(season, &interests)
        .iter()
        .take(PROMPT_PILAR_COUNT)
        .map(|p| format!("- {} (importance {}/10)", p.name, p.weight))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        "Plan a {days}-day trip to Tromsø starting {start}.\n\
         \n\
         Traveller profile:\n\
         - Group size: {group}\n\
         - Budget: {budget}\n\
         - Pace: {pace}\n\
         - Transport: {transport}\n\
         - Interests: {interests}\n\
         \n\
         Season: {season_name} ({season_label})\n\
         - Weather: {weather}\n\
         - Highlights: {highlights}\n\
         \n\
         Featured landmarks to prioritise:\n{landmarks}\n\
         \n\
         Essential themes to weave in:\n{themes}\n",
        days = preferences.days,
        start = start_date.format("%Y-%m-%d"),
        group = preferences.group_size(),
        budget = preferences.budget.daily_band(),
        pace = preferences.difficulty.pace_descriptor(),
        transport = preferences.transport.describe(),
        interests = preferences.interest_list(),
        season_name = info.name,
        season_label = season.as_str(),
        weather = info.weather,
        highlights = info.highlights.join("; "),
        landmarks = landmarks,
        themes = themes,
    );

    if !dining_suggestions.is_empty() {
        prompt.push_str("\nLocal restaurants worth suggesting:\n");
        for name in dining_suggestions {
            prompt.push_str("- ");
            prompt.push_str(name);
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\nRequirements:\n\
         - Exactly one entry in \"days\" per trip day, dated consecutively from the start date.\n\
         - Account for travel time between locations and realistic opening hours.\n\
         - Balance indoor and outdoor activities for the expected weather.\n\
         - Suggest local lunch and dinner venues every day.\n",
    );
    if season.has_aurora() {
        prompt.push_str(
            "- Include an evening northern lights outing and an \"aurora\" outlook on each day.\n",
        );
    } else {
        prompt.push_str("- Do not include northern lights outings; the sky is too bright.\n");
    }
    prompt.push_str(
        "- Include practical safety notes for the season and transport mode.\n\
         - Include a packing list suited to the season and interests.\n",
    );

    prompt
}
