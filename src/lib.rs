//! swarmctl — control plane core for a swarm of scraper/spotting/orchestrator
//! blades: the intent-resolution loop, the weighted scraper-selection
//! chooser, intent memoization, the version store, and the blade-side intent
//! executor.

pub mod adapters;
pub mod application;
pub mod blade;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
