pub mod cli;
pub mod config;
pub mod output;

use crate::generators::file_writer::FileWriter;
use crate::generators::templates::write_bundled_templates;
use crate::generators::{CodeGenerator, GenerationReport, ARTIFACT_TABLE};
use crate::Result;
use std::path::{Path, PathBuf};

pub use cli::*;
pub use config::*;
pub use output::*;

/// Run a full generation pass for `config`
pub fn generate_from_config(config: &config::GenerateConfig) -> Result<GenerationReport> {
    let logger = output::Logger::from_config(config);

    logger.verbose(&format!(
        "🔍 Scaffolding from interfaces in: {}",
        Path::new(&config.source_path)
            .join(&config.interfaces_dir)
            .display()
    ));
    logger.verbose(&format!("📝 Templates: {}", config.template_dir));
    if config.force {
        logger.verbose("⚠️  Existing artifacts will be overwritten");
    }

    let report = CodeGenerator::new(config.clone())
        .with_logger(logger.clone())
        .generate()?;

    if report.domains.is_empty() {
        logger.warning(&format!(
            "No interfaces found in {}/{}",
            config.source_path, config.interfaces_dir
        ));
    }

    Ok(report)
}

/// What `init` created
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    pub templates: Vec<PathBuf>,
    pub folders: Vec<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Prepare a project: default templates, the output folder skeleton and a config file.
///
/// Existing templates and an existing config file are kept unless `force` is set.
pub fn init_from_config(
    config: &config::GenerateConfig,
    config_path: &Path,
    force: bool,
) -> Result<InitReport> {
    let logger = output::Logger::from_config(config);
    let mut report = InitReport::default();

    report.templates = write_bundled_templates(Path::new(&config.template_dir), force)?;
    for template in &report.templates {
        logger.verbose(&format!("  📄 {}", template.display()));
    }

    let source_root = PathBuf::from(&config.source_path);
    let mut folders = vec![source_root.join(&config.interfaces_dir)];
    folders.extend(
        ARTIFACT_TABLE
            .specs()
            .iter()
            .map(|(_, spec)| source_root.join(spec.folder)),
    );
    for folder in folders {
        if !folder.exists() {
            FileWriter::ensure_directory_exists(&folder)?;
            logger.verbose(&format!("  📁 {}", folder.display()));
            report.folders.push(folder);
        }
    }

    if config_path.exists() && !force {
        logger.info(&format!(
            "Configuration already exists at {}, keeping it",
            config_path.display()
        ));
    } else {
        if let Some(parent) = config_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            FileWriter::ensure_directory_exists(parent)?;
        }
        config.save_to_file(config_path)?;
        report.config_file = Some(config_path.to_path_buf());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> GenerateConfig {
        GenerateConfig {
            source_path: dir.join("src").to_string_lossy().to_string(),
            template_dir: dir.join("templates/node").to_string_lossy().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_creates_skeleton() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let report = init_from_config(&config, &config_path, false).unwrap();

        assert_eq!(report.templates.len(), 4);
        for folder in ["interfaces", "dto", "controllers", "services", "schemas"] {
            assert!(dir.path().join("src").join(folder).is_dir(), "{}", folder);
        }
        assert_eq!(report.config_file, Some(config_path.clone()));
        let saved = GenerateConfig::from_file(&config_path).unwrap();
        assert_eq!(saved.template_dir, config.template_dir);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, r#"{ "sourcePath": "./elsewhere" }"#).unwrap();

        let report = init_from_config(&config_in(dir.path()), &config_path, false).unwrap();

        assert!(report.config_file.is_none());
        assert!(fs::read_to_string(&config_path)
            .unwrap()
            .contains("./elsewhere"));
    }

    #[test]
    fn test_init_then_generate() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        init_from_config(&config, &dir.path().join(CONFIG_FILE_NAME), false).unwrap();
        fs::write(
            dir.path().join("src/interfaces/IItem.ts"),
            "export interface IItem { title: string }",
        )
        .unwrap();

        let report = generate_from_config(&config).unwrap();
        assert_eq!(report.domains.len(), 1);
        assert!(dir.path().join("src/dto/ItemDto.ts").exists());
    }

    #[test]
    fn test_generate_with_missing_interfaces_dir() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(dir.path().join("src")).unwrap();
        write_bundled_templates(Path::new(&config.template_dir), false).unwrap();

        let err = generate_from_config(&config).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidSourcePath(_)));
    }
}
