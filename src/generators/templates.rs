use crate::generators::emitter::ArtifactTable;
use crate::generators::filters;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Suffix of template files: `dto.template.md`
pub const TEMPLATE_FILE_SUFFIX: &str = "template.md";

/// Default templates shipped with the binary, written out by `init`
pub const BUNDLED_TEMPLATES: [(&str, &str); 4] = [
    ("dto", include_str!("templates/dto.template.md")),
    ("controller", include_str!("templates/controller.template.md")),
    ("service", include_str!("templates/service.template.md")),
    ("schema", include_str!("templates/schema.template.md")),
];

/// Global context available to all templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalContext {
    pub version: String,
    pub timestamp: String,
    pub generator_name: String,
}

impl GlobalContext {
    pub fn new(generator_name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            generator_name: generator_name.to_string(),
        }
    }
}

/// `{dir}/{name}.template.md`
pub fn template_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, TEMPLATE_FILE_SUFFIX))
}

/// The artifact templates of one run, compiled once and read-only afterwards
pub struct TemplateStore {
    tera: Tera,
}

impl TemplateStore {
    /// Load every template the table names from `dir`; a missing file is fatal
    pub fn load(dir: &Path, table: &ArtifactTable) -> Result<Self> {
        let mut sources = Vec::new();
        for name in table.template_names() {
            let path = template_path(dir, name);
            if !path.is_file() {
                return Err(Error::TemplateNotFound(path));
            }
            sources.push((name.to_string(), fs::read_to_string(&path)?));
        }
        Self::from_sources(sources)
    }

    /// Store built from the templates compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_sources(
            BUNDLED_TEMPLATES
                .iter()
                .map(|(name, content)| (name.to_string(), content.to_string())),
        )
    }

    pub fn from_sources<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut tera = Tera::default();
        filters::register_filters(&mut tera);
        for (name, content) in sources {
            tera.add_raw_template(&name, &content)?;
        }
        Ok(Self { tera })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(name, context)?)
    }
}

/// Write the bundled templates into `dir`; existing files are kept unless `force`
pub fn write_bundled_templates(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (name, content) in BUNDLED_TEMPLATES {
        let path = template_path(dir, name);
        if path.exists() && !force {
            continue;
        }
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::emitter::ARTIFACT_TABLE;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_templates_compile() {
        let store = TemplateStore::bundled().unwrap();
        for name in ARTIFACT_TABLE.template_names() {
            assert!(store.has_template(name), "missing bundled template {}", name);
        }
    }

    #[test]
    fn test_template_path() {
        assert_eq!(
            template_path(Path::new("templates/node"), "dto"),
            PathBuf::from("templates/node/dto.template.md")
        );
    }

    #[test]
    fn test_load_reports_missing_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("dto.template.md"), "dto").unwrap();

        let err = TemplateStore::load(dir.path(), &ARTIFACT_TABLE)
            .err()
            .expect("load should fail");
        match err {
            Error::TemplateNotFound(path) => {
                assert_eq!(path, dir.path().join("controller.template.md"))
            }
            other => panic!("Expected TemplateNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_and_render_from_directory() {
        let dir = TempDir::new().unwrap();
        for name in ARTIFACT_TABLE.template_names() {
            fs::write(template_path(dir.path(), name), format!("{}: {{{{ Domain }}}}", name))
                .unwrap();
        }

        let store = TemplateStore::load(dir.path(), &ARTIFACT_TABLE).unwrap();
        let mut context = Context::new();
        context.insert("Domain", "Widget");
        assert_eq!(store.render("service", &context).unwrap(), "service: Widget");
    }

    #[test]
    fn test_invalid_template_syntax_is_an_error() {
        let result =
            TemplateStore::from_sources(vec![("dto".to_string(), "{% if %}".to_string())]);
        assert!(matches!(result, Err(Error::Template(_))));
    }

    #[test]
    fn test_write_bundled_templates_respects_existing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("dto.template.md"), "custom").unwrap();

        let written = write_bundled_templates(dir.path(), false).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("dto.template.md")).unwrap(),
            "custom"
        );

        let written = write_bundled_templates(dir.path(), true).unwrap();
        assert_eq!(written.len(), 4);
        assert_ne!(
            fs::read_to_string(dir.path().join("dto.template.md")).unwrap(),
            "custom"
        );
    }

    #[test]
    fn test_global_context() {
        let ctx = GlobalContext::new("crud-scaffold");
        assert_eq!(ctx.generator_name, "crud-scaffold");
        assert_eq!(ctx.version, env!("CARGO_PKG_VERSION"));
        assert!(!ctx.timestamp.is_empty());
    }
}
