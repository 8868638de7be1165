pub mod interface_parser;
pub mod parse_error;
pub mod tokenizer;
pub mod type_resolver;

use crate::interface::output::Logger;
use crate::models::{DomainInfo, FieldInfo};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use interface_parser::{InterfaceMemberExtractor, TypeScriptInterfaceParser};
use type_resolver::TypeResolver;

/// Everything discovered under the interfaces root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceTree {
    /// One domain per interface file, in walk order
    pub domains: Vec<DomainInfo>,
    /// Module folders below the root, each needing its own barrel
    pub modules: Vec<PathBuf>,
}

impl InterfaceTree {
    fn merge(&mut self, other: InterfaceTree) {
        self.domains.extend(other.domains);
        self.modules.extend(other.modules);
    }
}

/// Builds the domain model from a directory of TypeScript interface files
pub struct InterfaceAnalyzer<E: InterfaceMemberExtractor = TypeScriptInterfaceParser> {
    extractor: E,
    type_resolver: TypeResolver,
    extension: String,
    logger: Logger,
}

impl InterfaceAnalyzer<TypeScriptInterfaceParser> {
    pub fn new() -> Self {
        Self::with_extractor(TypeScriptInterfaceParser::new())
    }
}

impl Default for InterfaceAnalyzer<TypeScriptInterfaceParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: InterfaceMemberExtractor> InterfaceAnalyzer<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self {
            extractor,
            type_resolver: TypeResolver::new(),
            extension: "ts".to_string(),
            logger: Logger::new(false, false),
        }
    }

    /// Source file extension to pick up, without the dot
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Walk the interfaces root; sub-directories become modules
    pub fn analyze(&self, interfaces_root: &Path) -> Result<InterfaceTree> {
        if !interfaces_root.is_dir() {
            return Err(Error::InvalidSourcePath(format!(
                "interfaces directory does not exist: {}",
                interfaces_root.display()
            )));
        }
        self.analyze_module(interfaces_root, None)
    }

    fn analyze_module(&self, dir: &Path, module: Option<&str>) -> Result<InterfaceTree> {
        let mut tree = InterfaceTree::default();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();

            if entry.file_type().is_dir() {
                let child = match module {
                    Some(parent) => format!("{}/{}", parent, file_name),
                    None => file_name.to_string(),
                };
                self.logger
                    .verbose(&format!("📂 Entering module: {}", child));
                tree.modules.push(path.to_path_buf());
                tree.merge(self.analyze_module(path, Some(&child))?);
            } else if self.is_interface_file(path) {
                tree.domains.push(self.analyze_file(path, module)?);
            } else {
                self.logger
                    .debug(&format!("Skipping non-interface file: {}", path.display()));
            }
        }

        Ok(tree)
    }

    /// `IWidget.ts` qualifies; `index.ts`, `types.d.ts` and `a.spec.ts` do not
    pub fn is_interface_file(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension);
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
            return false;
        };
        has_extension && stem != "index" && !stem.contains('.')
    }

    /// Parse one interface file into a domain
    pub fn analyze_file(&self, path: &Path, module: Option<&str>) -> Result<DomainInfo> {
        self.logger
            .verbose(&format!("📄 Parsing interface: {}", path.display()));

        let source = std::fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = domain_name_from_stem(&stem);
        let module = module.map(str::to_string);

        let domain = match self.parse_source(&source, path)? {
            Some((interface_name, fields)) => {
                DomainInfo::new(name, module, fields).with_interface_name(interface_name)
            }
            None => {
                self.logger.warning(&format!(
                    "No interface declared in {}, generating an empty entity",
                    path.display()
                ));
                DomainInfo::new(name, module, Vec::new()).with_interface_name(stem)
            }
        };

        self.logger.verbose(&format!(
            "  • {} with {} field{}",
            domain.name,
            domain.fields.len(),
            if domain.fields.len() == 1 { "" } else { "s" }
        ));

        Ok(domain)
    }

    /// Interface name and field list of the first interface in `source`
    pub fn parse_source(
        &self,
        source: &str,
        path: &Path,
    ) -> Result<Option<(String, Vec<FieldInfo>)>> {
        let parsed = self
            .extractor
            .parse(source)
            .map_err(|e| Error::parse(path, e.describe(source)))?;

        Ok(parsed.map(|interface| {
            let fields = interface
                .members
                .iter()
                .map(|member| self.type_resolver.resolve_member(member))
                .collect();
            (interface.name, fields)
        }))
    }
}

/// `IWidget` -> `Widget`; names without the interface prefix are kept
pub fn domain_name_from_stem(stem: &str) -> String {
    let mut chars = stem.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => stem[1..].to_string(),
        _ => stem.to_string(),
    }
}
