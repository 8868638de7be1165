use crate::generators::emitter::ArtifactTable;
use crate::generators::file_writer::FileWriter;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the registry module at the source root
pub const REGISTRY_FILE_STEM: &str = "registry";

/// Regenerates barrel files and the registry from whatever is on disk
pub struct IndexWriter<'a> {
    root: PathBuf,
    table: &'a ArtifactTable,
    extension: String,
}

impl<'a> IndexWriter<'a> {
    pub fn new(root: impl Into<PathBuf>, table: &'a ArtifactTable, extension: &str) -> Self {
        Self {
            root: root.into(),
            table,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn barrel_file_name(&self) -> String {
        format!("index.{}", self.extension)
    }

    /// Stem of a source file, `None` for the barrel and non-source files
    fn source_stem(&self, file_name: &str) -> Option<String> {
        let stem = file_name.strip_suffix(&format!(".{}", self.extension))?;
        if stem.is_empty() || stem == "index" {
            return None;
        }
        Some(stem.to_string())
    }

    /// Sorted entries of `dir`; a missing directory has none
    fn entries(&self, dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// `export * from './X';` per source file and per sub-directory of `folder`
    pub fn barrel_lines(&self, folder: &Path) -> Result<Vec<String>> {
        let dir = self.root.join(folder);
        let mut lines = Vec::new();
        for entry in self.entries(&dir)? {
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                if !name.starts_with('.') {
                    lines.push(format!("export * from './{}';", name));
                }
            } else if let Some(stem) = self.source_stem(&name) {
                lines.push(format!("export * from './{}';", stem));
            }
        }
        Ok(lines)
    }

    /// Overwrite `{folder}/index.ts`; `folder` may be relative to the root or absolute
    pub fn write_barrel(&self, folder: &Path, writer: &mut FileWriter) -> Result<PathBuf> {
        let content = self.barrel_lines(folder)?.join("\n");
        writer.write_file(&folder.join(self.barrel_file_name()), &content)
    }

    /// Type names exported by an artifact folder: the file stems, barrel excluded
    pub fn type_names(&self, folder: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.entries(&self.root.join(folder))? {
            if entry.file_type().is_file() {
                if let Some(stem) = self.source_stem(&entry.file_name().to_string_lossy()) {
                    names.push(stem);
                }
            }
        }
        Ok(names)
    }

    pub fn registry_content(&self) -> Result<String> {
        let controllers = self.type_names(self.table.controller.folder)?;
        let services = self.type_names(self.table.service.folder)?;
        let schemas = self.type_names(self.table.schema.folder)?;

        let mut sections = Vec::new();
        for (names, folder) in [
            (&controllers, self.table.controller.folder),
            (&services, self.table.service.folder),
            (&schemas, self.table.schema.folder),
        ] {
            if !names.is_empty() {
                sections.push(format!(
                    "import {{\n  {}\n}} from './{}';",
                    names.join(",\n  "),
                    folder
                ));
            }
        }

        let suffix = self.table.schema.suffix;
        let models: Vec<String> = schemas
            .iter()
            .map(|schema| {
                let name = schema.strip_suffix(suffix).unwrap_or(schema);
                format!("{{ name: '{}', schema: {} }}", name, schema)
            })
            .collect();

        sections.push(format!(
            "export const controllers = [{}];",
            controllers.join(", ")
        ));
        sections.push(format!("export const services = [{}];", services.join(", ")));
        sections.push(if models.is_empty() {
            "export const models = [];".to_string()
        } else {
            format!("export const models = [\n  {}\n];", models.join(",\n  "))
        });

        Ok(format!("{}\n", sections.join("\n\n")))
    }

    pub fn write_registry(&self, writer: &mut FileWriter) -> Result<PathBuf> {
        let content = self.registry_content()?;
        let target = PathBuf::from(format!("{}.{}", REGISTRY_FILE_STEM, self.extension));
        writer.write_file(&target, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::emitter::ARTIFACT_TABLE;
    use crate::generators::file_writer::WritePolicy;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    mod barrels {
        use super::*;

        #[test]
        fn test_barrel_excludes_index_and_foreign_files() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "dto/WidgetDto.ts");
            touch(dir.path(), "dto/AccountDto.ts");
            touch(dir.path(), "dto/index.ts");
            touch(dir.path(), "dto/README.md");

            let writer = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts");
            assert_eq!(
                writer.barrel_lines(Path::new("dto")).unwrap(),
                vec![
                    "export * from './AccountDto';".to_string(),
                    "export * from './WidgetDto';".to_string(),
                ]
            );
        }

        #[test]
        fn test_barrel_exports_sub_directories() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "interfaces/IUser.ts");
            touch(dir.path(), "interfaces/catalog/IWidget.ts");

            let writer = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts");
            let mut files = FileWriter::new(dir.path(), WritePolicy::SkipExisting);
            let path = writer
                .write_barrel(Path::new("interfaces"), &mut files)
                .unwrap();

            assert_eq!(path, dir.path().join("interfaces/index.ts"));
            assert_eq!(
                fs::read_to_string(path).unwrap(),
                "export * from './IUser';\nexport * from './catalog';"
            );
        }

        #[test]
        fn test_barrel_is_always_overwritten() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "services/WidgetService.ts");
            fs::write(dir.path().join("services/index.ts"), "stale").unwrap();

            let writer = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts");
            let mut files = FileWriter::new(dir.path(), WritePolicy::SkipExisting);
            writer
                .write_barrel(Path::new("services"), &mut files)
                .unwrap();

            assert_eq!(
                fs::read_to_string(dir.path().join("services/index.ts")).unwrap(),
                "export * from './WidgetService';"
            );
        }

        #[test]
        fn test_barrel_for_absolute_module_folder() {
            let dir = TempDir::new().unwrap();
            touch(dir.path(), "interfaces/catalog/IWidget.ts");

            let writer = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts");
            let mut files = FileWriter::new(dir.path(), WritePolicy::SkipExisting);
            let module = dir.path().join("interfaces/catalog");
            writer.write_barrel(&module, &mut files).unwrap();

            assert_eq!(
                fs::read_to_string(module.join("index.ts")).unwrap(),
                "export * from './IWidget';"
            );
        }

        #[test]
        fn test_missing_folder_gets_empty_barrel() {
            let dir = TempDir::new().unwrap();
            let writer = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts");
            let mut files = FileWriter::new(dir.path(), WritePolicy::SkipExisting);
            let path = writer
                .write_barrel(Path::new("controllers"), &mut files)
                .unwrap();
            assert_eq!(fs::read_to_string(path).unwrap(), "");
        }
    }

    mod registry {
        use super::*;

        #[test]
        fn test_registry_lists_artifacts() {
            let dir = TempDir::new().unwrap();
            for file in [
                "controllers/WidgetController.ts",
                "controllers/AccountController.ts",
                "controllers/index.ts",
                "services/WidgetService.ts",
                "services/AccountService.ts",
                "schemas/WidgetSchema.ts",
                "schemas/AccountSchema.ts",
            ] {
                touch(dir.path(), file);
            }

            let content = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts")
                .registry_content()
                .unwrap();

            assert!(content.starts_with(
                "import {\n  AccountController,\n  WidgetController\n} from './controllers';"
            ));
            assert!(content.contains("} from './services';"));
            assert!(content.contains("} from './schemas';"));
            assert!(content
                .contains("export const controllers = [AccountController, WidgetController];"));
            assert!(content.contains("export const services = [AccountService, WidgetService];"));
            assert!(content.contains(
                "export const models = [\n  { name: 'Account', schema: AccountSchema },\n  { name: 'Widget', schema: WidgetSchema }\n];"
            ));
            assert!(!content.contains("index"));
        }

        #[test]
        fn test_registry_with_missing_folders() {
            let dir = TempDir::new().unwrap();
            let content = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts")
                .registry_content()
                .unwrap();

            assert!(!content.contains("import"));
            assert!(content.contains("export const controllers = [];"));
            assert!(content.contains("export const services = [];"));
            assert!(content.contains("export const models = [];"));
        }

        #[test]
        fn test_write_registry_overwrites() {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("registry.ts"), "stale").unwrap();
            touch(dir.path(), "schemas/WidgetSchema.ts");

            let writer = IndexWriter::new(dir.path(), &ARTIFACT_TABLE, "ts");
            let mut files = FileWriter::new(dir.path(), WritePolicy::SkipExisting);
            let path = writer.write_registry(&mut files).unwrap();

            let content = fs::read_to_string(path).unwrap();
            assert!(content.contains("{ name: 'Widget', schema: WidgetSchema }"));
        }
    }
}
