#![allow(dead_code)]
/// Common test utilities and helpers
use crud_scaffold::generators::templates::write_bundled_templates;
use crud_scaffold::{generate_from_config, GenerateConfig, GenerationReport};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway backend project: `src/interfaces/...` plus the bundled templates
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let project = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(project.interfaces_dir()).unwrap();
        write_bundled_templates(&project.template_dir(), false).unwrap();
        project
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn interfaces_dir(&self) -> PathBuf {
        self.source_dir().join("interfaces")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root().join("templates/node")
    }

    /// Write an interface file relative to `src/interfaces`
    pub fn write_interface(&self, relative: &str, content: &str) -> &Self {
        let path = self.interfaces_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Replace one of the templates
    pub fn write_template(&self, name: &str, content: &str) -> &Self {
        fs::write(
            self.template_dir().join(format!("{}.template.md", name)),
            content,
        )
        .unwrap();
        self
    }

    pub fn config(&self) -> GenerateConfig {
        GenerateConfig {
            source_path: self.source_dir().to_string_lossy().to_string(),
            template_dir: self.template_dir().to_string_lossy().to_string(),
            ..Default::default()
        }
    }

    pub fn generate(&self) -> GenerationReport {
        generate_from_config(&self.config()).unwrap()
    }

    pub fn generate_forced(&self) -> GenerationReport {
        let config = GenerateConfig {
            force: true,
            ..self.config()
        };
        generate_from_config(&config).unwrap()
    }

    /// Content of a generated file relative to `src`
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.source_dir().join(relative))
            .unwrap_or_else(|e| panic!("cannot read {}: {}", relative, e))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.source_dir().join(relative).exists()
    }
}

/// Assert that a generated file (relative to `src`) contains every given snippet
#[macro_export]
macro_rules! assert_generated_contains {
    ($project:expr, $file:expr, $($snippet:expr),+ $(,)?) => {{
        let content = $project.read($file);
        $(
            assert!(
                content.contains($snippet),
                "{} should contain {:?}\n--- content ---\n{}",
                $file,
                $snippet,
                content
            );
        )+
    }};
}

/// Interface used by most scenarios
pub const WIDGET_INTERFACE: &str = r#"import { Tag } from '../ITag';

export interface IWidget {
  id: string;
  name: string;
  price: number;
  active?: boolean;
  tags: Tag[];
  labels: string[];
  meta: { color: string };
}
"#;
