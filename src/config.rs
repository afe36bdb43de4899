use crate::agent::policy::WalkStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub agent: AgentConfig,
    pub rat: RatConfig,
    pub simulation: SimulationConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width; height is derived as round(grid_size * 1.3).
    pub grid_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookStrategyKind {
    PhaseBased,
    TimedRotation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub start_x: Option<usize>,
    pub start_y: Option<usize>,
    pub base_vision: i64,
    pub stress_vision: i64,
    pub forward_vision: i64,
    pub bush_radius: usize,
    pub bush_seek_probability: f64,
    pub walk_style: WalkStyle,
    pub look_strategy: LookStrategyKind,
    pub orient_interval_secs: f64,
    pub rotation_interval_secs: f64,
    pub proximity_stress_radius: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatConfig {
    pub patrol_radius: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub ticks_per_second: u64,
    pub log_interval_ticks: u64,
    pub max_ticks: Option<u64>,
    pub seed: Option<u64>,
    pub event_history: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub enabled: bool,
    pub address: String,
    pub port: u16,
    pub update_rate_hz: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start_x: None,
            start_y: None,
            base_vision: 6,
            stress_vision: 12,
            forward_vision: 10,
            bush_radius: 2,
            bush_seek_probability: 0.7,
            walk_style: WalkStyle::Cardinal,
            look_strategy: LookStrategyKind::PhaseBased,
            orient_interval_secs: 5.0,
            rotation_interval_secs: 10.0,
            proximity_stress_radius: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig { grid_size: 64 },
            agent: AgentConfig::default(),
            rat: RatConfig { patrol_radius: 4 },
            simulation: SimulationConfig {
                ticks_per_second: 5,
                log_interval_ticks: 50, // ~10 seconds at 5 TPS
                max_ticks: None,
                seed: None,
                event_history: 64,
            },
            server: ServerConfig {
                enabled: true,
                address: "0.0.0.0".to_string(),
                port: 8080,
                update_rate_hz: 5,
            },
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.world.grid_size, 64);
        assert_eq!(config.agent.bush_radius, 2);
        assert_eq!(config.agent.walk_style, WalkStyle::Cardinal);
        assert_eq!(config.simulation.ticks_per_second, 5);
        assert!(config.server.enabled);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.world.grid_size, deserialized.world.grid_size);
        assert_eq!(config.agent.look_strategy, deserialized.agent.look_strategy);
    }

    #[test]
    fn test_config_enums_as_snake_case() {
        let json = serde_json::to_string(&AgentConfig::default()).unwrap();
        assert!(json.contains(r#""walk_style":"cardinal""#));
        assert!(json.contains(r#""look_strategy":"phase_based""#));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("proto_cat_config_test.json");
        let path = path.to_string_lossy().to_string();

        let mut config = Config::default();
        config.simulation.seed = Some(42);
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.simulation.seed, Some(42));

        let _ = std::fs::remove_file(&path);
    }
}
