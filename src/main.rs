use clap::Parser;
use colored::Colorize;

use geoip2_extras::cli::{Cli, Commands, ConfigCommands};
use geoip2_extras::config::{StaticConfig, init_config};
use geoip2_extras::runtime::modes;
use geoip2_extras::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // config generate 不需要加载配置和日志
    if let Some(Commands::Config {
        action: ConfigCommands::Generate { output_path },
    }) = cli.command
    {
        return generate_config(output_path);
    }

    let config = match init_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    let _guard = init_logging(&config.logging)?;

    match cli.command {
        Some(Commands::Lookup { ip }) => modes::run_lookup(&ip).await,
        Some(Commands::Serve) | None => modes::run_server().await,
        Some(Commands::Config { .. }) => unreachable!("handled above"),
    }
}

fn generate_config(output_path: Option<String>) -> anyhow::Result<()> {
    let Some(path) = output_path else {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    };

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| anyhow::anyhow!(e.format_simple()))?;
    println!(
        "{} {}",
        "Configuration file generated successfully:".green(),
        path.blue()
    );
    Ok(())
}
