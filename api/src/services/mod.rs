pub mod catalog;
pub mod completion;
pub mod model;
pub mod plan;
pub mod planner;
pub mod preferences;
pub mod prompt;
pub mod rules;
pub mod season;
pub mod telemetry;
pub mod trips;
pub mod venues;
