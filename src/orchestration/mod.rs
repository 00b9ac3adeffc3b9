//! Wires the data sources into the reward engine.

pub mod calculator;
pub mod orchestrator;

pub use calculator::{calculate, evaluate, BootstrapPolicy};
pub use orchestrator::{OrchestrationError, Orchestrator};
