//! Plan orchestration: one model attempt, rule-based fallback.
//!
//! `generate_trip_plan` always returns a plan. The model path gets exactly one
//! attempt bounded by a deadline; any failure, timeout or panic in that
//! attempt is absorbed and the deterministic generator answers instead.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::FutureExt;
use serde::Serialize;
use utoipa::ToSchema;

use super::model::ModelPlanGenerator;
use super::plan::TripPlan;
use super::preferences::TripPreferences;
use super::rules::generate_rule_based;
use super::season::Season;
use super::telemetry::{FallbackReason, GenerationObserver};
use super::venues::DiningDirectory;

/// Which generator produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Model,
    Rules,
}

#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub plan: TripPlan,
    pub source: PlanSource,
}

pub struct TripPlanner {
    model: Option<ModelPlanGenerator>,
    dining: DiningDirectory,
    observer: Arc<dyn GenerationObserver>,
    timeout: Duration,
}

impl TripPlanner {
    pub fn new(
        model: Option<ModelPlanGenerator>,
        dining: DiningDirectory,
        observer: Arc<dyn GenerationObserver>,
        timeout: Duration,
    ) -> Self {
        Self {
            model,
            dining,
            observer,
            timeout,
        }
    }

    pub fn model_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Generate a plan. Never fails.
    pub async fn generate_trip_plan(
        &self,
        preferences: &TripPreferences,
        season: Season,
        start_date: NaiveDate,
    ) -> GeneratedPlan {
        match self.attempt_model(preferences, season, start_date).await {
            Ok(plan) => {
                tracing::info!("Generated {}-day plan with the model", plan.days.len());
                GeneratedPlan {
                    plan,
                    source: PlanSource::Model,
                }
            }
            Err(reason) => {
                self.observer.record_fallback(&reason);
                GeneratedPlan {
                    plan: generate_rule_based(preferences, season, start_date),
                    source: PlanSource::Rules,
                }
            }
        }
    }

    async fn attempt_model(
        &self,
        preferences: &TripPreferences,
        season: Season,
        start_date: NaiveDate,
    ) -> Result<TripPlan, FallbackReason> {
        let Some(model) = &self.model else {
            return Err(FallbackReason::NotConfigured);
        };

        let attempt = async {
            let dining = self.dining.suggestions(preferences.budget).await;
            model
                .generate(
                    preferences,
                    season,
                    start_date,
                    &dining,
                    self.observer.as_ref(),
                )
                .await
        };

        match tokio::time::timeout(self.timeout, AssertUnwindSafe(attempt).catch_unwind()).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(FallbackReason::Panicked),
            Err(_) => Err(FallbackReason::TimedOut),
        }
    }
}
