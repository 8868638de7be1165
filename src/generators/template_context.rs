use crate::generators::templates::GlobalContext;
use crate::models::{DomainInfo, FieldInfo};
use crate::Result;
use serde::Serialize;

/// Everything a per-domain template can reference
#[derive(Debug, Clone, Serialize)]
pub struct DomainContext {
    #[serde(rename = "Domain")]
    pub capitalized_name: String,
    #[serde(rename = "domain")]
    pub lowercase_name: String,
    #[serde(rename = "ControllerPath")]
    pub controller_path: String,
    #[serde(rename = "Interface")]
    pub interface_name: String,
    pub kebab: String,
    pub module: Option<String>,
    pub fields: Vec<FieldInfo>,
    /// Whether the interface declares its own `id`
    pub has_id: bool,
    pub generator: GlobalContext,
}

impl DomainContext {
    pub fn new(domain: &DomainInfo, global: &GlobalContext) -> Self {
        Self {
            capitalized_name: domain.capitalized_name(),
            lowercase_name: domain.lowercase_name(),
            controller_path: domain.controller_path(),
            interface_name: domain.interface_name.clone(),
            kebab: domain.kebab_name(),
            module: domain.module.clone(),
            fields: domain.fields.clone(),
            has_id: domain.fields.iter().any(|field| field.name == "id"),
            generator: global.clone(),
        }
    }

    pub fn to_tera(&self) -> Result<tera::Context> {
        Ok(tera::Context::from_serialize(self)?)
    }
}
