use crate::generators::file_writer::FileWriter;
use crate::generators::template_context::DomainContext;
use crate::generators::templates::{GlobalContext, TemplateStore};
use crate::models::DomainInfo;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The four per-domain files a generation run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Dto,
    Controller,
    Service,
    Schema,
}

impl ArtifactKind {
    /// Emission order for a single domain
    pub const EMIT_ORDER: [ArtifactKind; 4] = [
        ArtifactKind::Dto,
        ArtifactKind::Service,
        ArtifactKind::Schema,
        ArtifactKind::Controller,
    ];
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Dto => write!(f, "dto"),
            ArtifactKind::Controller => write!(f, "controller"),
            ArtifactKind::Service => write!(f, "service"),
            ArtifactKind::Schema => write!(f, "schema"),
        }
    }
}

/// Where an artifact kind comes from and where it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Template name, also the `{name}.template.md` file stem
    pub template: &'static str,
    /// Output folder below the source root
    pub folder: &'static str,
    /// Appended to the capitalized domain name: `Widget` + `Dto`
    pub suffix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactTable {
    pub dto: ArtifactSpec,
    pub controller: ArtifactSpec,
    pub service: ArtifactSpec,
    pub schema: ArtifactSpec,
}

pub static ARTIFACT_TABLE: ArtifactTable = ArtifactTable {
    dto: ArtifactSpec {
        template: "dto",
        folder: "dto",
        suffix: "Dto",
    },
    controller: ArtifactSpec {
        template: "controller",
        folder: "controllers",
        suffix: "Controller",
    },
    service: ArtifactSpec {
        template: "service",
        folder: "services",
        suffix: "Service",
    },
    schema: ArtifactSpec {
        template: "schema",
        folder: "schemas",
        suffix: "Schema",
    },
};

impl ArtifactTable {
    pub fn spec(&self, kind: ArtifactKind) -> &ArtifactSpec {
        match kind {
            ArtifactKind::Dto => &self.dto,
            ArtifactKind::Controller => &self.controller,
            ArtifactKind::Service => &self.service,
            ArtifactKind::Schema => &self.schema,
        }
    }

    pub fn specs(&self) -> [(ArtifactKind, &ArtifactSpec); 4] {
        [
            (ArtifactKind::Dto, &self.dto),
            (ArtifactKind::Controller, &self.controller),
            (ArtifactKind::Service, &self.service),
            (ArtifactKind::Schema, &self.schema),
        ]
    }

    pub fn template_names(&self) -> [&'static str; 4] {
        self.specs().map(|(_, spec)| spec.template)
    }
}

/// What happened to a single artifact file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    Written(PathBuf),
    /// The file already existed and overwriting was not requested
    Skipped(PathBuf),
}

impl EmitOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, EmitOutcome::Written(_))
    }
}

/// Renders domains through the templates and hands the text to a [`FileWriter`]
pub struct CodeEmitter<'a> {
    templates: &'a TemplateStore,
    table: &'a ArtifactTable,
    global: GlobalContext,
    extension: String,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(templates: &'a TemplateStore, table: &'a ArtifactTable, extension: &str) -> Self {
        Self {
            templates,
            table,
            global: GlobalContext::new(env!("CARGO_PKG_NAME")),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Path of the artifact relative to the source root: `dto/WidgetDto.ts`
    pub fn artifact_path(&self, domain: &DomainInfo, kind: ArtifactKind) -> PathBuf {
        let spec = self.table.spec(kind);
        PathBuf::from(spec.folder).join(format!(
            "{}{}.{}",
            domain.capitalized_name(),
            spec.suffix,
            self.extension
        ))
    }

    pub fn render(&self, domain: &DomainInfo, kind: ArtifactKind) -> Result<String> {
        let context = DomainContext::new(domain, &self.global).to_tera()?;
        let rendered = self
            .templates
            .render(self.table.spec(kind).template, &context)?;
        Ok(strip_code_fence(&rendered))
    }

    pub fn emit(
        &self,
        domain: &DomainInfo,
        kind: ArtifactKind,
        writer: &mut FileWriter,
    ) -> Result<EmitOutcome> {
        let relative = self.artifact_path(domain, kind);
        if writer.would_skip(&relative) {
            // no point rendering what will not be written
            return Ok(writer.record_skip(&relative));
        }
        let content = self.render(domain, kind)?;
        writer.write_artifact(&relative, &content)
    }
}

/// Drop the markdown fence lines templates are wrapped in
pub fn strip_code_fence(content: &str) -> String {
    let mut body = content;

    let leading = body.trim_start();
    if leading.starts_with("```") {
        body = match leading.find('\n') {
            Some(newline) => &leading[newline + 1..],
            None => "",
        };
    }

    let trailing = body.trim_end();
    let last_line_start = trailing.rfind('\n').map_or(0, |i| i + 1);
    if trailing[last_line_start..].trim() == "```" {
        return trailing[..last_line_start].to_string();
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod table {
        use super::*;

        #[test]
        fn test_folders_and_suffixes() {
            let dto = ARTIFACT_TABLE.spec(ArtifactKind::Dto);
            assert_eq!((dto.folder, dto.suffix), ("dto", "Dto"));
            let controller = ARTIFACT_TABLE.spec(ArtifactKind::Controller);
            assert_eq!((controller.folder, controller.suffix), ("controllers", "Controller"));
            let service = ARTIFACT_TABLE.spec(ArtifactKind::Service);
            assert_eq!((service.folder, service.suffix), ("services", "Service"));
            let schema = ARTIFACT_TABLE.spec(ArtifactKind::Schema);
            assert_eq!((schema.folder, schema.suffix), ("schemas", "Schema"));
        }

        #[test]
        fn test_emit_order() {
            assert_eq!(
                ArtifactKind::EMIT_ORDER,
                [
                    ArtifactKind::Dto,
                    ArtifactKind::Service,
                    ArtifactKind::Schema,
                    ArtifactKind::Controller
                ]
            );
        }

        #[test]
        fn test_template_names() {
            assert_eq!(
                ARTIFACT_TABLE.template_names(),
                ["dto", "controller", "service", "schema"]
            );
        }
    }

    mod fences {
        use super::*;

        #[test]
        fn test_strips_leading_fence() {
            let out = strip_code_fence("``` typescript\nexport class A {}\n");
            assert_eq!(out, "export class A {}\n");
        }

        #[test]
        fn test_strips_both_fences() {
            let out = strip_code_fence("```typescript\nexport class A {}\n```\n");
            assert_eq!(out, "export class A {}\n");
        }

        #[test]
        fn test_leaves_unfenced_content_alone() {
            let out = strip_code_fence("export class A {}\n");
            assert_eq!(out, "export class A {}\n");
        }

        #[test]
        fn test_inner_fences_are_kept() {
            let source = "``` typescript\n/**\n * ```ts\n * example\n * ```\n */\nconst a = 1;\n```";
            let out = strip_code_fence(source);
            assert!(out.starts_with("/**"));
            assert!(out.contains(" * ```ts"));
            assert!(out.ends_with("const a = 1;\n"));
        }
    }

    mod paths {
        use super::*;
        use crate::models::DomainInfo;

        #[test]
        fn test_artifact_path() {
            let store = TemplateStore::bundled().unwrap();
            let emitter = CodeEmitter::new(&store, &ARTIFACT_TABLE, "ts");
            let domain = DomainInfo::new("widget", Some("catalog".to_string()), vec![]);
            assert_eq!(
                emitter.artifact_path(&domain, ArtifactKind::Controller),
                PathBuf::from("controllers/WidgetController.ts")
            );
            assert_eq!(
                emitter.artifact_path(&domain, ArtifactKind::Schema),
                PathBuf::from("schemas/WidgetSchema.ts")
            );
        }
    }
}
