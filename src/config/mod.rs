//! Configuration for borderless-snap
//!
//! This module holds the user-facing chrome settings and the scenario file
//! format consumed by the replay binary.

pub mod chrome;
pub mod scenario;

pub use chrome::ChromeConfig;
pub use scenario::{Scenario, ScenarioError, Step, StepReport, StepTarget};
