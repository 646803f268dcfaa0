//! Finboard main entry point

use clap::Parser;
use finboard_advisor::{Advisor, OpenAiGenerator, TextGenerator};
use finboard_api::start_server;
use finboard_config::Config;
use finboard_store::{RestStore, TransactionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(version = "0.1.0")]
#[command(about = "A personal finance dashboard backend with AI-assisted insights", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = Config::load(args.config.clone())?;

        eprintln!(
            "[INFO] Config loaded: store={}, model={}",
            config.store.base_url, config.advisor.model
        );

        let store: Arc<dyn TransactionStore> = Arc::new(RestStore::new(&config.store)?);
        let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiGenerator::new(&config.advisor)?);
        let advisor = Arc::new(Advisor::new(store.clone(), generator, &config.advisor));

        start_server(config, store, advisor).await?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}
