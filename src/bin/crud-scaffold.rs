use clap::Parser;
use crud_scaffold::interface::cli::{resolve_generate_config, Cli, Commands};
use crud_scaffold::interface::config::CONFIG_FILE_NAME;
use crud_scaffold::interface::output::{print_generation_summary, print_init_info};
use crud_scaffold::{generate_from_config, init_from_config, GenerateConfig};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Generate { .. } => {
            let config = resolve_generate_config(command)?;
            let report = generate_from_config(&config)?;
            print_generation_summary(&config.source_path, &report);
        }
        Commands::Init { force, .. } => {
            let config = GenerateConfig::from(command);
            let config_path = Path::new(CONFIG_FILE_NAME);
            init_from_config(&config, config_path, *force)?;
            print_init_info(&config.template_dir, &config_path.display().to_string());
        }
    }
    Ok(())
}
