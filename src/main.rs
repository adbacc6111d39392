use std::time::Duration;

use bevy::app::AppExit;
use clap::{error::ErrorKind, CommandFactory, Parser};
use kruskal_cloud::cloud::{
    self,
    config::{CloudConfig, DEFAULT_POINT_COUNT},
};

/// Animated minimum spanning tree over a random point cloud
#[derive(Parser, Debug)]
#[command(name = "kruskal-cloud", version)]
struct Cli {
    /// Number of points in the cloud
    #[arg(short, long, default_value_t = DEFAULT_POINT_COUNT)]
    points: usize,

    /// Coordinates are drawn from [-spread, spread] (defaults to points * 2)
    #[arg(short, long)]
    spread: Option<f32>,

    /// Delay between two consecutive tree edges, in milliseconds
    #[arg(long, default_value_t = 16)]
    edge_delay_ms: u64,

    /// Fixed RNG seed for a reproducible cloud
    #[arg(long)]
    seed: Option<u64>,

    /// Show the world inspector
    #[arg(long, default_value_t = false)]
    inspect: bool,
}

fn main() -> AppExit {
    let cli = Cli::parse();
    let config = match CloudConfig::new(
        cli.points,
        cli.spread,
        Duration::from_millis(cli.edge_delay_ms),
        cli.seed,
    ) {
        Ok(config) => config,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    cloud::run(config, cli.inspect)
}
