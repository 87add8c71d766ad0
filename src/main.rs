use anyhow::{Context, Result};
use clap::Parser;

use linkvault::cli::{Cli, Commands, ConfigCommands};
use linkvault::config::StaticConfig;
use linkvault::runtime::modes::run_server;
use linkvault::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            action: ConfigCommands::Generate { output_path },
        }) => generate_config(output_path.as_deref()),
        Some(Commands::Serve) | None => {
            let config = StaticConfig::load(cli.config.as_deref()).map_err(|e| {
                eprintln!("{}", e.format_colored());
                anyhow::anyhow!(e)
            })?;

            // guard 必须存活到进程结束，否则非阻塞日志会丢失
            let _guard = init_logging(&config.logging).context("Failed to initialize logging")?;

            run_server(config).await
        }
    }
}

fn generate_config(output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            StaticConfig::default()
                .save_to_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
            println!("Sample configuration written to {}", path);
        }
        None => print!("{}", StaticConfig::generate_sample_config()),
    }
    Ok(())
}
