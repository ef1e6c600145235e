//! Weather-trigger detection and scheduling engine.
//!
//! The engine scans the business directory once per invocation and, for each
//! opted-in business, compares a short hourly forecast against a 30-day
//! climate baseline. A sustained deviation inside the business's local
//! operating hours becomes a one-off schedule for the downstream
//! content-generation target.
//!
//! The pieces compose left to right: [`baseline`] and [`window`] prepare the
//! statistics, [`hours`] gates candidate hours, [`detector`] finds the
//! earliest sustained deviation, [`emitter`] turns a match into a named
//! schedule plus an `upcoming_posts` bookkeeping entry, and [`run`] drives
//! the whole pass with per-business failure isolation. [`time_run`] is the
//! sibling daily pass for weekend/payday triggers.

mod baseline;
mod detector;
mod directory;
mod emitter;
mod error;
mod hours;
mod run;
mod time_run;
mod window;

pub use baseline::{baseline_range, compute_baseline, ClimateBaseline};
pub use detector::{detect_trigger, TriggerCandidate};
pub use directory::{Directory, PgDirectory};
pub use emitter::{EmitOutcome, ScheduleEmitter};
pub use error::EngineError;
pub use hours::BusinessHours;
pub use run::{RunSummary, WeatherRun};
pub use time_run::TimeTriggerRun;
pub use window::{ForecastWindow, HourlySample};
