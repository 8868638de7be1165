use heck::ToKebabCase;
use serde::{Deserialize, Serialize};

/// Rendered marker for inline object literal types
pub const OPAQUE_MAP_TYPE: &str = "{[key:string]:any}";
/// Storage type for inline object literal types
pub const OPAQUE_MAP_BASE_TYPE: &str = "Object";

/// Semantic type of an interface member, as far as the generator cares about it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Reference to a named type: `Tag`, `Types.ObjectId`, `Record<string, X>`
    Named(String),

    /// Primitive keyword, carrying its capitalized label: `String`, `Number`, `Boolean`
    Primitive(String),

    /// Array whose element is a named type or a primitive label
    ArrayOf(String),

    /// Inline object literal or anything else without a useful shape
    OpaqueMap,
}

impl FieldType {
    /// Declared type signature as rendered into templates
    pub fn type_signature(&self) -> String {
        match self {
            FieldType::Named(name) => name.clone(),
            FieldType::Primitive(label) => label.clone(),
            FieldType::ArrayOf(element) => format!("[{}]", element),
            FieldType::OpaqueMap => OPAQUE_MAP_TYPE.to_string(),
        }
    }

    /// Storage-oriented type derived from the signature
    pub fn base_type(&self) -> String {
        match self {
            FieldType::Named(name) => name.clone(),
            FieldType::Primitive(label) => label.to_lowercase(),
            // arrays keep the bracket marker for both type and baseType
            FieldType::ArrayOf(element) => format!("[{}]", element),
            FieldType::OpaqueMap => OPAQUE_MAP_BASE_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub base_type: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub readonly: bool,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, field_type: &FieldType) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.type_signature(),
            base_type: field_type.base_type(),
            optional: false,
            readonly: false,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }
}

/// One generatable entity, derived from a single interface file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainInfo {
    pub name: String,
    /// Name of the interface the domain was read from, e.g. `IWidget`
    pub interface_name: String,
    pub module: Option<String>,
    pub fields: Vec<FieldInfo>,
}

impl DomainInfo {
    pub fn new(name: impl Into<String>, module: Option<String>, fields: Vec<FieldInfo>) -> Self {
        let name = name.into();
        Self {
            interface_name: format!("I{}", name),
            name,
            module,
            fields,
        }
    }

    pub fn with_interface_name(mut self, interface_name: impl Into<String>) -> Self {
        self.interface_name = interface_name.into();
        self
    }

    /// `Widget` for `widget`, untouched otherwise
    pub fn capitalized_name(&self) -> String {
        upper_first(&self.name)
    }

    /// `widget` for `Widget`
    pub fn lowercase_name(&self) -> String {
        lower_first(&self.name)
    }

    /// `user-profile` for `UserProfile`
    pub fn kebab_name(&self) -> String {
        self.name.to_kebab_case()
    }

    /// Route prefix of the generated controller, e.g. `catalog/widget`
    pub fn controller_path(&self) -> String {
        match self.module.as_deref() {
            Some(module) if !module.is_empty() => format!("{}/{}", module, self.kebab_name()),
            _ => self.kebab_name(),
        }
    }

    /// Same domain without any field literally named `id`; the storage layer supplies it
    pub fn without_id_field(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|field| field.name != "id")
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

pub(crate) fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
