use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use nimbot::api::GameController;
use nimbot::config::Config;
use nimbot::server::Server;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Nim against the computer over HTTP", long_about = None)]
struct Args {
    /// JSON config file (port, apiRoot, startSituation)
    #[arg(long, default_value = "config/default.json")]
    config: PathBuf,

    /// Listen port, overrides the config file
    #[arg(long)]
    port: Option<i64>,

    /// Path the game routes are mounted on, e.g. /api/nim
    #[arg(long)]
    api_root: Option<String>,

    /// Start situation as comma separated heap sizes, e.g. 1,3,5,7
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    heaps: Option<Vec<i64>>,

    /// Served on any GET outside the API root
    #[arg(long, default_value = "README.md")]
    readme: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config::load_or_default(&args.config)?.with_overrides(args.port, args.api_root, args.heaps)?;

    let mut controller = GameController::new(&config);
    match std::fs::read_to_string(&args.readme) {
        Ok(text) => controller = controller.with_readme(text),
        Err(e) => warn!("README {} unavailable: {}", args.readme.display(), e),
    }

    let mut server = Server::bind(("0.0.0.0", config.port), controller)?;
    info!("NIM listening on :{}{} with start situation {:?}", config.port, config.api_root, config.start_situation);
    server.run_loop();
    Ok(())
}
