use serde_json::Value;

use crate::error::ParseError;

/// Parses `text` as JSON and writes the parsed value to the diagnostic log.
///
/// Malformed input is returned to the caller and nothing is logged.
pub fn emit(text: &str) -> Result<Value, ParseError> {
    let value = parse(text)?;
    log::info!("{:#}", value);
    Ok(value)
}

pub fn parse(text: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emits_nested_record() {
        let value = emit(r#"{"a":1,"b":[true,null]}"#).unwrap();
        assert_eq!(value, json!({ "a": 1, "b": [true, null] }));
        assert_eq!(value["b"][1], Value::Null);
    }

    #[test]
    fn scalars_are_documents_too() {
        assert_eq!(emit("42").unwrap(), json!(42));
        assert_eq!(emit(r#""organizer""#).unwrap(), json!("organizer"));
    }

    #[test]
    fn rejects_bad_json() {
        let err = emit("{bad json").unwrap_err();
        assert_eq!(err.line(), 1);
        assert!(err.to_string().starts_with("Parse error:"));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("[1, 2] 3").is_err());
    }
}
