use clap::Parser;
use harmony::{
    evaluate,
    random::{default_rng, WyRng},
    Config, Evaluation, HarmonyError, Network, Sample, WeightHistory,
};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "harmony")]
#[command(about = "Grow a proximity graph, spread samples through it and learn Hebbian weights")]
struct Cli {
    /// JSON config file, see `harmony::Config`
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of training samples, each a number or an array of numbers
    #[arg(long)]
    samples: PathBuf,

    /// JSON array of samples to evaluate the trained network on
    #[arg(long)]
    test: Option<PathBuf>,

    /// Random seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Number of nodes, including the root
    #[arg(long)]
    nodes: Option<usize>,

    /// Degree cap while growing the network
    #[arg(long)]
    v_max: Option<usize>,

    /// Connection radius
    #[arg(long)]
    radius: Option<f64>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    /// Write the weight history and final network here as JSON
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<Config, HarmonyError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        config.seed = self.seed.or(config.seed);
        if let Some(n) = self.nodes {
            config.network.num_nodes = n;
        }
        if let Some(v) = self.v_max {
            config.network.v_max = v;
        }
        if let Some(r) = self.radius {
            config.network.r_harmony = r;
        }
        if let Some(e) = self.epochs {
            config.train.epochs = e;
        }
        if let Some(lr) = self.learning_rate {
            config.train.learning_rate = lr;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a Config,
    history: &'a WeightHistory,
    evaluation: Option<Evaluation>,
    network: &'a Network,
}

fn read_samples(path: &Path) -> Result<Vec<Sample>, HarmonyError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn main() -> Result<(), HarmonyError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let mut rng = config.seed.map_or_else(default_rng, WyRng::seeded);

    let samples = read_samples(&cli.samples)?;
    let mut network = config.network(&mut rng)?;
    info!(
        nodes = network.len(),
        connections = network.connection_count(),
        samples = samples.len(),
        "network ready"
    );

    let history = config.train.train(&mut network, &samples)?;

    let evaluation = match &cli.test {
        Some(path) => Some(evaluate(&mut network, &read_samples(path)?, config.threshold)?),
        None => None,
    };
    if let Some(eval) = evaluation {
        println!("activated: {:.2}", eval.ratio());
    }

    if let Some(out) = &cli.out {
        let report = Report {
            config: &config,
            history: &history,
            evaluation,
            network: &network,
        };
        fs::write(out, serde_json::to_string(&report)?)?;
        info!(path = %out.display(), "report written");
    }
    Ok(())
}
