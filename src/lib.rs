//! # crud-scaffold
//!
//! Generate NestJS + Mongoose CRUD modules from TypeScript interfaces.
//!
//! Every file under `{source}/interfaces/` that declares an interface becomes a *domain*.
//! For each domain the generator renders four artifacts from templates: a DTO, a service,
//! a Mongoose schema and a controller. It then rebuilds the `index.ts` barrel of every
//! folder it touched and a top-level `registry.ts` listing all controllers, services and
//! models.
//!
//! ## Features
//!
//! - 🔍 **Interface Discovery**: Walks `interfaces/`; sub-directories become modules
//! - 🧩 **Typed Fields**: Maps TypeScript member types onto storage and API types
//! - 📝 **Tera Templates**: `dto`, `controller`, `service` and `schema` templates, replaceable per project
//! - ♻️ **Idempotent**: Existing artifacts are kept unless `--force` is given
//! - 📦 **Barrels & Registry**: Always regenerated from what is on disk
//!
//! ## Quick Start
//!
//! ```bash
//! # Write default templates, output folders and scaffold.json
//! crud-scaffold init
//!
//! # Generate artifacts for src/interfaces/**/*.ts
//! crud-scaffold generate
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,no_run
//! use crud_scaffold::{generate_from_config, GenerateConfig};
//!
//! let config = GenerateConfig {
//!     source_path: "../server/src".to_string(),
//!     template_dir: "./templates/node".to_string(),
//!     verbose: Some(true),
//!     ..Default::default()
//! };
//!
//! let report = generate_from_config(&config)?;
//! println!("{} domains", report.domains.len());
//! # Ok::<(), crud_scaffold::Error>(())
//! ```
//!
//! ## Example
//!
//! Given `src/interfaces/catalog/IWidget.ts`:
//!
//! ```typescript
//! export interface IWidget {
//!   name: string;
//!   price: number;
//!   tags: Tag[];
//! }
//! ```
//!
//! the generator writes `dto/WidgetDto.ts`, `services/WidgetService.ts`,
//! `schemas/WidgetSchema.ts` and `controllers/WidgetController.ts` (routed at
//! `catalog/widget`), the barrels of those folders and of `interfaces/` and
//! `interfaces/catalog/`, and `registry.ts`.
//!
//! ## Configuration
//!
//! Configure via `scaffold.json` or a `crudScaffold` section in `package.json`:
//!
//! ```json
//! {
//!   "sourcePath": "./src",
//!   "templateDir": "./templates/node",
//!   "interfacesDir": "interfaces",
//!   "fileExtension": "ts",
//!   "force": false
//! }
//! ```

pub mod analysis;
mod error;
pub mod generators;
pub mod interface;
pub mod models;

pub use error::{Error, Result};
pub use models::*;

// Convenience re-exports for common use cases
pub use analysis::{InterfaceAnalyzer, InterfaceTree};
pub use generators::{CodeGenerator, GenerationReport};
pub use interface::config::GenerateConfig;
pub use interface::output::{Logger, ProgressReporter};
pub use interface::{generate_from_config, init_from_config};
