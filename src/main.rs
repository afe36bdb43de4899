use clap::Parser;
use proto_cat::config::Config;
use proto_cat::server;
use proto_cat::simulation::SimulationState;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};

#[derive(Parser, Debug)]
#[command(name = "proto-cat")]
#[command(about = "Predator foraging simulation", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.json")]
    config: String,

    #[arg(long)]
    no_server: bool,

    /// Overrides simulation.seed
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides simulation.max_ticks
    #[arg(long)]
    max_ticks: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        log::info!("Loading config from: {}", args.config);
        Config::load_from_file(&args.config)?
    } else {
        log::info!("Config file not found, using defaults and saving to: {}", args.config);
        let config = Config::default();
        config.save_to_file(&args.config)?;
        config
    };

    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.max_ticks.is_some() {
        config.simulation.max_ticks = args.max_ticks;
    }

    log::info!("Initializing simulation...");
    let state = Arc::new(RwLock::new(SimulationState::new(&config)));

    if !args.no_server && config.server.enabled {
        let server_state = state.clone();
        let server_config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = server::run_server(server_config, server_state).await {
                log::error!("Server error: {}", e);
            }
        });
        log::info!("WebSocket server started on {}:{}", config.server.address, config.server.port);
    }

    run_simulation(state, config).await;

    Ok(())
}

async fn run_simulation(state: Arc<RwLock<SimulationState>>, config: Config) {
    let tick_duration = Duration::from_millis(1000 / config.simulation.ticks_per_second.max(1));
    let mut tick_interval = interval(tick_duration);
    let log_every = config.simulation.log_interval_ticks.max(1);

    loop {
        tick_interval.tick().await;

        let mut sim_state = state.write().await;
        sim_state.tick();

        let metrics = sim_state.metrics();
        if metrics.tick % log_every == 0 {
            log::info!(
                "Tick: {} | Pos: ({}, {}) | Phase: {} | Stress: {:.0} | Bushes done: {}/{} | Rats: {} | Food: {} | Explored: {:.0}%",
                metrics.tick,
                metrics.agent_x,
                metrics.agent_y,
                metrics.phase,
                metrics.stress_level,
                metrics.bushes_completed,
                metrics.bushes_total,
                metrics.rats_alive,
                metrics.food_remaining,
                metrics.explored * 100.0
            );
        }

        if metrics.prey_exhausted() {
            log::warn!("No food or rats left! Simulation ended at tick {}.", metrics.tick);
            break;
        }

        if let Some(max_ticks) = config.simulation.max_ticks {
            if metrics.tick >= max_ticks {
                log::info!("Reached max ticks ({}), stopping.", max_ticks);
                break;
            }
        }
    }
}
