use std::collections::HashMap;
use tera::{Tera, Value};

/// Register the field-type filters the artifact templates rely on
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("mongoose_type", mongoose_type_filter);
    tera.register_filter("swagger_type", swagger_type_filter);
    tera.register_filter("validator", validator_filter);
    tera.register_filter("ts_type", ts_type_filter);
}

fn expect_str<'v>(value: &'v Value, filter: &str) -> tera::Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| format!("{} filter expects a string", filter).into())
}

/// `[Tag]` -> `Some("Tag")`
fn array_element(base_type: &str) -> Option<&str> {
    base_type.strip_prefix('[')?.strip_suffix(']')
}

/// baseType -> member of Mongoose `SchemaTypes`
pub fn mongoose_type(base_type: &str) -> &'static str {
    if array_element(base_type).is_some() {
        return "Array";
    }
    match base_type {
        "string" => "String",
        "number" => "Number",
        "boolean" => "Boolean",
        "bigint" => "BigInt",
        "Date" => "Date",
        "Buffer" => "Buffer",
        "Map" => "Map",
        "Decimal128" | "Types.Decimal128" => "Decimal128",
        "ObjectId" | "Types.ObjectId" | "mongoose.Types.ObjectId" => "ObjectId",
        _ => "Mixed",
    }
}

/// baseType -> type expression for `@ApiProperty({ type: ... })`
pub fn swagger_type(base_type: &str) -> String {
    if let Some(element) = array_element(base_type) {
        let element = match element {
            "String" | "Number" | "Boolean" | "Date" => element,
            "BigInt" => "Number",
            _ => "Object",
        };
        return format!("[{}]", element);
    }
    match base_type {
        "string" => "String",
        "number" | "bigint" => "Number",
        "boolean" => "Boolean",
        "Date" => "Date",
        _ => "Object",
    }
    .to_string()
}

/// baseType -> class-validator decorator name; empty when nothing fits
pub fn validator(base_type: &str) -> &'static str {
    if array_element(base_type).is_some() {
        return "IsArray";
    }
    match base_type {
        "string" => "IsString",
        "number" => "IsNumber",
        "boolean" => "IsBoolean",
        "Date" => "IsDate",
        "Object" | "object" => "IsObject",
        _ => "",
    }
}

/// TypeScript annotation for a field of a class implementing the source interface.
///
/// Primitives and arrays of primitives are spelled out; anything else is taken from the
/// interface by indexed access so the generated file needs no extra imports.
pub fn ts_type(field: &Value, interface: &str) -> tera::Result<String> {
    let name = field
        .get("name")
        .and_then(Value::as_str)
        .ok_or("ts_type filter expects a field with a name")?;
    let base_type = field
        .get("baseType")
        .and_then(Value::as_str)
        .ok_or("ts_type filter expects a field with a baseType")?;

    let primitive = |label: &str| match label {
        "string" | "String" => Some("string"),
        "number" | "Number" => Some("number"),
        "boolean" | "Boolean" => Some("boolean"),
        "bigint" | "BigInt" => Some("bigint"),
        "any" | "Any" => Some("any"),
        "unknown" | "Unknown" => Some("unknown"),
        _ => None,
    };

    let spelled = match array_element(base_type) {
        Some(element) => primitive(element).map(|p| format!("{}[]", p)),
        None => primitive(base_type).map(str::to_string),
    };

    Ok(spelled.unwrap_or_else(|| format!("{}['{}']", interface, name)))
}

fn mongoose_type_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let base_type = expect_str(value, "mongoose_type")?;
    Ok(Value::String(mongoose_type(base_type).to_string()))
}

fn swagger_type_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let base_type = expect_str(value, "swagger_type")?;
    Ok(Value::String(swagger_type(base_type)))
}

fn validator_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let base_type = expect_str(value, "validator")?;
    Ok(Value::String(validator(base_type).to_string()))
}

fn ts_type_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let interface = args
        .get("interface")
        .and_then(Value::as_str)
        .ok_or("ts_type filter requires an `interface` argument")?;
    Ok(Value::String(ts_type(value, interface)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mongoose_types() {
        assert_eq!(mongoose_type("string"), "String");
        assert_eq!(mongoose_type("number"), "Number");
        assert_eq!(mongoose_type("boolean"), "Boolean");
        assert_eq!(mongoose_type("[String]"), "Array");
        assert_eq!(mongoose_type("[Tag]"), "Array");
        assert_eq!(mongoose_type("Object"), "Mixed");
        assert_eq!(mongoose_type("any"), "Mixed");
        assert_eq!(mongoose_type("Types.ObjectId"), "ObjectId");
        assert_eq!(mongoose_type("Date"), "Date");
        assert_eq!(mongoose_type("Tag"), "Mixed");
    }

    #[test]
    fn test_swagger_types() {
        assert_eq!(swagger_type("string"), "String");
        assert_eq!(swagger_type("number"), "Number");
        assert_eq!(swagger_type("[String]"), "[String]");
        assert_eq!(swagger_type("[Tag]"), "[Object]");
        assert_eq!(swagger_type("Tag"), "Object");
        assert_eq!(swagger_type("any"), "Object");
    }

    #[test]
    fn test_validators() {
        assert_eq!(validator("string"), "IsString");
        assert_eq!(validator("[Tag]"), "IsArray");
        assert_eq!(validator("Object"), "IsObject");
        assert_eq!(validator("any"), "");
        assert_eq!(validator("Tag"), "");
    }

    #[test]
    fn test_ts_type_spells_primitives() {
        let field = json!({ "name": "price", "type": "Number", "baseType": "number" });
        assert_eq!(ts_type(&field, "IWidget").unwrap(), "number");

        let field = json!({ "name": "labels", "type": "[String]", "baseType": "[String]" });
        assert_eq!(ts_type(&field, "IWidget").unwrap(), "string[]");
    }

    #[test]
    fn test_ts_type_indexes_interface_for_named_types() {
        let field = json!({ "name": "tags", "type": "[Tag]", "baseType": "[Tag]" });
        assert_eq!(ts_type(&field, "IWidget").unwrap(), "IWidget['tags']");

        let field = json!({ "name": "meta", "type": "{[key:string]:any}", "baseType": "Object" });
        assert_eq!(ts_type(&field, "IWidget").unwrap(), "IWidget['meta']");
    }

    #[test]
    fn test_filters_through_tera() {
        let mut tera = Tera::default();
        register_filters(&mut tera);
        tera.add_raw_template(
            "field",
            "{{ f.baseType | mongoose_type }} {{ f.baseType | swagger_type }} {{ f | ts_type(interface='IWidget') }}",
        )
        .unwrap();
        let mut context = tera::Context::new();
        context.insert("f", &json!({ "name": "tags", "baseType": "[Tag]" }));
        assert_eq!(
            tera.render("field", &context).unwrap(),
            "Array [Object] IWidget['tags']"
        );
    }

    #[test]
    fn test_filter_rejects_non_string() {
        let result = mongoose_type_filter(&json!(42), &HashMap::new());
        assert!(result.is_err());
    }
}
