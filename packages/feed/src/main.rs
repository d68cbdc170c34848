use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Pelorus - watch vessels on a Signal K server
#[derive(Parser, Debug)]
#[command(name = "pelorus")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Discovery URL of the Signal K server
    #[arg(long, default_value = "https://cloud.signalk.org/signalk")]
    server: String,

    /// Seconds between display passes
    #[arg(long, default_value_t = 5.0)]
    interval: f64,

    /// Number of display passes before exiting
    #[arg(long, default_value_t = 3)]
    passes: u32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let interval = Duration::from_secs_f64(args.interval);

    if let Err(e) = pelorus_feed::run(&args.server, interval, args.passes).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
