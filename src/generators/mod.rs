pub mod emitter;
pub mod file_writer;
pub mod filters;
pub mod index_writer;
pub mod template_context;
pub mod templates;

use crate::analysis::InterfaceAnalyzer;
use crate::interface::config::GenerateConfig;
use crate::interface::output::{Logger, ProgressReporter};
use crate::models::DomainInfo;
use crate::Result;
use std::path::{Path, PathBuf};

pub use emitter::{
    ArtifactKind, ArtifactSpec, ArtifactTable, CodeEmitter, EmitOutcome, ARTIFACT_TABLE,
};
pub use file_writer::{FileWriter, WritePolicy};
pub use index_writer::IndexWriter;
pub use templates::{GlobalContext, TemplateStore};

/// What a generation run did
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub domains: Vec<DomainInfo>,
    /// Per-domain artifacts written in this run
    pub written: Vec<PathBuf>,
    /// Per-domain artifacts left untouched because they already existed
    pub skipped: Vec<PathBuf>,
    pub barrels: Vec<PathBuf>,
    pub registry: Option<PathBuf>,
}

impl GenerationReport {
    /// Every file written, barrels and registry included
    pub fn all_written(&self) -> Vec<PathBuf> {
        self.written
            .iter()
            .chain(self.barrels.iter())
            .chain(self.registry.iter())
            .cloned()
            .collect()
    }
}

/// Runs one full pass: analyze interfaces, emit artifacts, rebuild barrels and registry
pub struct CodeGenerator {
    config: GenerateConfig,
    table: &'static ArtifactTable,
    logger: Logger,
}

impl CodeGenerator {
    pub fn new(config: GenerateConfig) -> Self {
        let logger = Logger::from_config(&config);
        Self {
            config,
            table: &ARTIFACT_TABLE,
            logger,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<GenerationReport> {
        self.config.validate()?;

        let source_root = PathBuf::from(&self.config.source_path);
        let extension = self.config.file_extension.as_str();
        let mut reporter = ProgressReporter::new(self.logger.clone(), 5);

        reporter.start_step("Loading templates");
        let templates = match TemplateStore::load(Path::new(&self.config.template_dir), self.table)
        {
            Ok(templates) => templates,
            Err(e) => {
                reporter.fail_step(&e.to_string());
                return Err(e);
            }
        };
        reporter.complete_step(Some(&format!("from {}", self.config.template_dir)));

        reporter.start_step("Analyzing interfaces");
        let interfaces_root = source_root.join(&self.config.interfaces_dir);
        let analyzer = InterfaceAnalyzer::new()
            .with_extension(extension)
            .with_logger(self.logger.clone());
        let tree = match analyzer.analyze(&interfaces_root) {
            Ok(tree) => tree,
            Err(e) => {
                reporter.fail_step(&e.to_string());
                return Err(e);
            }
        };
        reporter.complete_step(Some(&format!(
            "Found {} domain{} in {} module{}",
            tree.domains.len(),
            if tree.domains.len() == 1 { "" } else { "s" },
            tree.modules.len(),
            if tree.modules.len() == 1 { "" } else { "s" }
        )));

        reporter.start_step("Emitting artifacts");
        let mut writer = FileWriter::new(&source_root, WritePolicy::from_force(self.config.force));
        let emitter = CodeEmitter::new(&templates, self.table, extension);
        let mut report = GenerationReport::default();

        for domain in &tree.domains {
            for kind in ArtifactKind::EMIT_ORDER {
                let outcome = if kind == ArtifactKind::Schema {
                    emitter.emit(&domain.without_id_field(), kind, &mut writer)?
                } else {
                    emitter.emit(domain, kind, &mut writer)?
                };
                match outcome {
                    EmitOutcome::Written(path) => {
                        reporter.update_progress(&format!("  📄 {}", path.display()));
                        report.written.push(path);
                    }
                    EmitOutcome::Skipped(path) => {
                        reporter.update_progress(&format!("  ⏭️  {} (exists)", path.display()));
                        report.skipped.push(path);
                    }
                }
            }
        }
        reporter.complete_step(Some(&format!(
            "{} written, {} skipped",
            report.written.len(),
            report.skipped.len()
        )));

        reporter.start_step("Writing barrel files");
        let index_writer = IndexWriter::new(&source_root, self.table, extension);
        let mut barrel_folders: Vec<PathBuf> = tree
            .modules
            .iter()
            .map(|module| {
                module
                    .strip_prefix(&source_root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| module.clone())
            })
            .collect();
        barrel_folders.extend(
            [
                self.table.controller.folder,
                self.table.dto.folder,
                self.table.schema.folder,
                self.table.service.folder,
                self.config.interfaces_dir.as_str(),
            ]
            .into_iter()
            .map(PathBuf::from),
        );
        for folder in &barrel_folders {
            let path = index_writer.write_barrel(folder, &mut writer)?;
            reporter.update_progress(&format!("  📄 {}", path.display()));
            report.barrels.push(path);
        }
        reporter.complete_step(Some(&format!("{} barrels", report.barrels.len())));

        reporter.start_step("Writing registry");
        let registry = index_writer.write_registry(&mut writer)?;
        reporter.complete_step(Some(&registry.display().to_string()));
        report.registry = Some(registry);

        report.domains = tree.domains;
        reporter.finish(&format!(
            "Generated {} file{} for {} domain{}",
            report.written.len(),
            if report.written.len() == 1 { "" } else { "s" },
            report.domains.len(),
            if report.domains.len() == 1 { "" } else { "s" }
        ));

        Ok(report)
    }
}
