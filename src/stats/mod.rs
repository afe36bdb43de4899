pub mod exploration;
pub mod metrics;

pub use exploration::ExplorationMap;
pub use metrics::SimulationMetrics;
