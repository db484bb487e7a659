use anyhow::{Context, Result};
use blob_chase::game::{BoundaryMode, CaptureMode, EnvConfig};
use blob_chase::modes::{HeadlessConfig, HumanMode, WatchMode, run_policy_loop};
use blob_chase::rl::{
    ChaseEnvironment, GreedyPolicy, InferenceBackend, NetworkPolicy, Policy, PolicyNetworkConfig,
    RandomPolicy, default_device, load_network,
};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Parser)]
#[command(name = "blob_chase")]
#[command(version, about = "Food-chasing RL environment with a terminal viewer")]
struct Cli {
    /// How to drive the environment
    #[arg(long, default_value = "headless")]
    mode: Mode,

    /// Policy that picks actions (ignored in human mode)
    #[arg(long, default_value = "greedy")]
    policy: PolicyKind,

    /// Saved network for the network policy; a fresh one is used when absent
    #[arg(long)]
    model: Option<PathBuf>,

    /// Step budget for headless mode
    #[arg(long, default_value = "1000")]
    steps: u64,

    /// Log the observation every N steps in headless mode (0 disables)
    #[arg(long, default_value = "1")]
    log_every: u64,

    /// Seed for target placement and the random policy
    #[arg(long)]
    seed: Option<u64>,

    /// Environment configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// End the episode on capture instead of resetting internally
    #[arg(long)]
    terminate_on_capture: bool,

    /// Clamp the agent to the board after every move
    #[arg(long)]
    strict_bounds: bool,

    /// Log filter, e.g. "debug" or "blob_chase=trace" (RUST_LOG wins if set)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run the policy without a UI and log every observation
    Headless,
    /// Watch the policy play in the terminal
    Watch,
    /// Play with the keyboard
    Human,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyKind {
    Random,
    Greedy,
    Network,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the terminal UI free of log lines unless asked for
    let default_level = match cli.mode {
        Mode::Headless => "info",
        Mode::Watch | Mode::Human => "warn",
    };
    let level = cli.log_level.as_deref().unwrap_or(default_level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let env = ChaseEnvironment::try_new(build_config(&cli)?)
        .context("Invalid environment configuration")?;

    if cli.mode == Mode::Human {
        let mut human_mode = HumanMode::new(env);
        return human_mode.run().await;
    }

    match cli.policy {
        PolicyKind::Random => {
            let policy = RandomPolicy::for_config(env.config());
            run_with_policy(&cli, env, policy).await
        }
        PolicyKind::Greedy => run_with_policy(&cli, env, GreedyPolicy::new()).await,
        PolicyKind::Network => {
            let policy = network_policy(cli.model.as_deref())?;
            run_with_policy(&cli, env, policy).await
        }
    }
}

fn build_config(cli: &Cli) -> Result<EnvConfig> {
    let mut config = match &cli.config {
        Some(path) => EnvConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => EnvConfig::default(),
    };

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.terminate_on_capture {
        config.capture_mode = CaptureMode::Terminate;
    }
    if cli.strict_bounds {
        config.boundary_mode = BoundaryMode::Strict;
    }

    Ok(config)
}

fn network_policy(model: Option<&Path>) -> Result<NetworkPolicy<InferenceBackend>> {
    let device = default_device();

    match model {
        Some(path) => {
            let (network, metadata) = load_network::<InferenceBackend>(path, &device)
                .with_context(|| format!("Failed to load model from {:?}", path))?;
            log::info!(
                "loaded network from {:?} (hidden {}, written by v{})",
                path,
                metadata.network.hidden_dim,
                metadata.version
            );
            Ok(NetworkPolicy::new(network, &metadata.network, device))
        }
        None => {
            log::warn!("no --model given, using an untrained network");
            let config = PolicyNetworkConfig::default();
            let network = config.init::<InferenceBackend>(&device);
            Ok(NetworkPolicy::new(network, &config, device))
        }
    }
}

async fn run_with_policy<P>(cli: &Cli, mut env: ChaseEnvironment, mut policy: P) -> Result<()>
where
    P: Policy + Send + 'static,
{
    match cli.mode {
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(env, policy);
            watch_mode.run().await
        }
        Mode::Headless | Mode::Human => {
            let config = HeadlessConfig {
                max_steps: cli.steps,
                log_every: cli.log_every,
                ..Default::default()
            };

            let stop = Arc::new(AtomicBool::new(false));
            let stop_signal = Arc::clone(&stop);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop_signal.store(true, Ordering::Relaxed);
                }
            });

            let stats = tokio::task::spawn_blocking(move || {
                run_policy_loop(&mut env, &mut policy, &config, |_| {
                    stop.load(Ordering::Relaxed)
                })
            })
            .await
            .context("Headless run panicked")?;

            println!(
                "steps: {}  captures: {}  episodes: {}  mean reward: {:.3}  high score: {}",
                stats.steps,
                stats.captures,
                stats.episodes,
                stats.mean_reward(),
                stats.high_score
            );
            Ok(())
        }
    }
}
