use crate::interface::config::GenerateConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crud-scaffold")]
#[command(version, about = "Generate NestJS/Mongoose CRUD modules from TypeScript interfaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate DTOs, services, schemas, controllers, barrels and the registry
    Generate {
        /// Backend source root containing the interfaces folder (default: ./src)
        #[arg(short = 's', long = "source-path", default_value = "./src")]
        source_path: PathBuf,

        /// Directory with the four *.template.md files (default: ./templates/node)
        #[arg(short = 't', long = "template-dir", default_value = "./templates/node")]
        template_dir: PathBuf,

        /// Overwrite DTOs, services, schemas and controllers that already exist
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,

        /// Verbose output
        #[arg(long, action = clap::ArgAction::SetTrue)]
        verbose: bool,

        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config_file: Option<PathBuf>,
    },
    /// Write the default templates, the output folders and a scaffold.json
    Init {
        /// Directory to write the default templates into (default: ./templates/node)
        #[arg(short = 't', long = "template-dir", default_value = "./templates/node")]
        template_dir: PathBuf,

        /// Backend source root to prepare (default: ./src)
        #[arg(short = 's', long = "source-path", default_value = "./src")]
        source_path: PathBuf,

        /// Verbose output
        #[arg(long, action = clap::ArgAction::SetTrue)]
        verbose: bool,

        /// Overwrite existing templates and configuration
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,
    },
}

impl From<&Commands> for GenerateConfig {
    fn from(cmd: &Commands) -> Self {
        match cmd {
            Commands::Generate {
                source_path,
                template_dir,
                force,
                verbose,
                ..
            } => GenerateConfig {
                source_path: source_path.to_string_lossy().to_string(),
                template_dir: template_dir.to_string_lossy().to_string(),
                force: *force,
                // None defers to the config file
                verbose: verbose.then_some(true),
                ..Default::default()
            },
            Commands::Init {
                template_dir,
                source_path,
                verbose,
                ..
            } => GenerateConfig {
                source_path: source_path.to_string_lossy().to_string(),
                template_dir: template_dir.to_string_lossy().to_string(),
                verbose: Some(*verbose),
                ..Default::default()
            },
        }
    }
}

/// Configuration for a `generate` run: the config file (explicit or discovered in the
/// working directory) overlaid with whatever was passed on the command line
pub fn resolve_generate_config(
    cmd: &Commands,
) -> Result<GenerateConfig, crate::interface::config::ConfigError> {
    let cli_config = GenerateConfig::from(cmd);
    let file_config = match cmd {
        Commands::Generate {
            config_file: Some(path),
            ..
        } => Some(GenerateConfig::from_file(path)?),
        Commands::Generate { .. } => GenerateConfig::discover(".")?,
        Commands::Init { .. } => None,
    };

    Ok(match file_config {
        Some(mut config) => {
            config.merge(&cli_config);
            config
        }
        None => cli_config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_generate_config_from_cli() {
        let cli = Cli::parse_from(["crud-scaffold", "generate"]);
        let config = GenerateConfig::from(&cli.command);
        assert_eq!(config.source_path, "./src");
        assert_eq!(config.template_dir, "./templates/node");
        assert!(!config.force);
        assert!(!config.verbose.unwrap_or(false));
    }

    #[test]
    fn test_custom_generate_config_from_cli() {
        let cmd = Commands::Generate {
            source_path: PathBuf::from("../server/src"),
            template_dir: PathBuf::from("./tpl"),
            force: true,
            verbose: true,
            config_file: None,
        };

        let config = GenerateConfig::from(&cmd);
        assert_eq!(config.source_path, "../server/src");
        assert_eq!(config.template_dir, "./tpl");
        assert!(config.force);
        assert!(config.verbose.unwrap_or(false));
    }

    #[test]
    fn test_generate_flags_parse() {
        let cli = Cli::parse_from([
            "crud-scaffold",
            "generate",
            "-s",
            "api/src",
            "-t",
            "tpl",
            "--force",
            "--verbose",
            "-c",
            "scaffold.json",
        ]);
        match cli.command {
            Commands::Generate {
                source_path,
                template_dir,
                force,
                verbose,
                config_file,
            } => {
                assert_eq!(source_path, PathBuf::from("api/src"));
                assert_eq!(template_dir, PathBuf::from("tpl"));
                assert!(force);
                assert!(verbose);
                assert_eq!(config_file, Some(PathBuf::from("scaffold.json")));
            }
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_init_config_from_cli() {
        let cmd = Commands::Init {
            template_dir: PathBuf::from("./my-templates"),
            source_path: PathBuf::from("./api"),
            verbose: true,
            force: true,
        };

        let config = GenerateConfig::from(&cmd);
        assert_eq!(config.source_path, "./api");
        assert_eq!(config.template_dir, "./my-templates");
        // init's --force is about templates, not artifacts
        assert!(!config.force);
        assert!(config.verbose.unwrap_or(false));
    }

    #[test]
    fn test_explicit_config_file_is_merged() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{ "sourcePath": "../server/src", "templateDir": "./shared" }"#,
        )
        .unwrap();

        let cmd = Commands::Generate {
            source_path: PathBuf::from("./src"),
            template_dir: PathBuf::from("./override"),
            force: false,
            verbose: false,
            config_file: Some(file.path().to_path_buf()),
        };

        let config = resolve_generate_config(&cmd).unwrap();
        assert_eq!(config.source_path, "../server/src");
        assert_eq!(config.template_dir, "./override");
    }
}
