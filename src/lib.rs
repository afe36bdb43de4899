//! Single-predator grid simulation: a cat with directional vision, internal
//! chemical signals and a phase-driven foraging cycle hunting food and rats.

pub mod agent;
pub mod config;
pub mod server;
pub mod simulation;
pub mod stats;
pub mod world;
