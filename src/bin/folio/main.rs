use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use folio::logger::configure_logger;
use folio::server::server_run;

use crate::config::open_config;
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Writes a sample configuration to the given path and exits
    #[arg(long)]
    init: Option<String>,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(init_path) = args.init {
        let init_path = PathBuf::from(init_path);
        write_sample_cfg(&init_path)?;
        println!("Sample configuration written to {}", init_path.display());
        return Ok(());
    }

    let config_path = args.config_path.map(PathBuf::from);
    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run folio --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting Folio =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await?;
    Ok(())
}
