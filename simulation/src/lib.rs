//! Compose screen simulation
//!
//! Plays launch, restore, redelivery and share scenarios against the compose
//! controller with in-memory collaborators, and reports what the
//! presentation surface and host were asked to do.

pub mod scenarios;
pub mod script;

pub use scenarios::{SCENARIOS, run_scenario, scenario};
pub use script::{Report, Script, ScriptEvent, run_script};
