use super::interface_parser::{InterfaceMember, TypeExpr};
use crate::models::{upper_first, FieldInfo, FieldType};

/// Maps parsed member annotations onto the generator's field types
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeResolver;

impl TypeResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve_member(&self, member: &InterfaceMember) -> FieldInfo {
        let field_type = self.resolve(&member.type_signature);
        FieldInfo::new(member.name.clone(), &field_type)
            .optional(member.optional || self.is_nullable(&member.type_signature))
            .readonly(member.readonly)
    }

    pub fn resolve(&self, ty: &TypeExpr) -> FieldType {
        match ty {
            TypeExpr::Reference { name, args } => match self.array_element(name, args) {
                Some(element) => self.resolve_array(element),
                None => FieldType::Named(name.clone()),
            },
            TypeExpr::Keyword(keyword) => FieldType::Primitive(keyword_label(keyword)),
            TypeExpr::Array(element) => self.resolve_array(element),
            TypeExpr::Union(members) => {
                let mut present = members.iter().filter(|m| !is_null_like(m));
                match (present.next(), present.next()) {
                    (Some(only), None) => self.resolve(only),
                    _ => FieldType::OpaqueMap,
                }
            }
            TypeExpr::ObjectLiteral
            | TypeExpr::Intersection(_)
            | TypeExpr::Tuple
            | TypeExpr::Function
            | TypeExpr::Literal(_)
            | TypeExpr::Other => FieldType::OpaqueMap,
        }
    }

    fn resolve_array(&self, element: &TypeExpr) -> FieldType {
        match element {
            TypeExpr::Reference { name, args } if self.array_element(name, args).is_none() => {
                FieldType::ArrayOf(name.clone())
            }
            TypeExpr::Keyword(keyword) => FieldType::ArrayOf(keyword_label(keyword)),
            _ => FieldType::OpaqueMap,
        }
    }

    /// `Array<T>` and `ReadonlyArray<T>` are arrays spelled as generics
    fn array_element<'a>(&self, name: &str, args: &'a [TypeExpr]) -> Option<&'a TypeExpr> {
        match (name, args) {
            ("Array" | "ReadonlyArray", [element]) => Some(element),
            _ => None,
        }
    }

    fn is_nullable(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::Union(members) if members.iter().any(is_null_like))
    }
}

fn is_null_like(ty: &TypeExpr) -> bool {
    matches!(ty, TypeExpr::Keyword(k) if k == "null" || k == "undefined")
}

/// Label of a primitive keyword as the type checker names it: `String`, `BigInt`, ...
fn keyword_label(keyword: &str) -> String {
    match keyword {
        "bigint" => "BigInt".to_string(),
        other => upper_first(other),
    }
}
