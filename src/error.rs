use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failure to interpret a byte buffer as packed numeric values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer length is not a whole number of elements.
    #[error("Malformed input: {len} bytes is not a multiple of the {width}-byte element width")]
    MalformedInput { len: usize, width: usize },
    /// A read ran past the end of the buffer.
    #[error("Unexpected EOF at offset {offset}")]
    UnexpectedEof { offset: usize },
}

/// Structured text that is not well-formed JSON.
#[derive(Debug, Error)]
#[error("Parse error: {0}")]
pub struct ParseError(#[from] serde_json::Error);

impl ParseError {
    pub fn line(&self) -> usize {
        self.0.line()
    }

    pub fn column(&self) -> usize {
        self.0.column()
    }
}

/// Outcome of a resource load that did not produce a handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The host reported that the resource could not be fetched or decoded.
    #[error("Failed to load resource: {locator}")]
    Failed { locator: String },
    /// The caller cancelled the request before it completed.
    #[error("Resource load cancelled")]
    Cancelled,
    /// The host refused to start the request.
    #[error("Host error: {0}")]
    Host(String),
}

/// Failure during the module's initialization phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleLoadError {
    #[error("No global `window` exists")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Canvas element not found: #{0}")]
    CanvasMissing(String),
    #[error("Element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("Unknown entry point: {0}")]
    UnknownEntryPoint(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Host error: {0}")]
    Host(String),
}

/// Any failure an entry point can surface to the host.
#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Module(#[from] ModuleLoadError),
}

/// Renders a `JsValue` thrown by the host into something loggable.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

macro_rules! into_js_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for JsValue {
                fn from(err: $ty) -> Self {
                    JsValue::from_str(&err.to_string())
                }
            }
        )*
    };
}

into_js_value!(DecodeError, ParseError, LoadError, ModuleLoadError, OrganizerError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_message_names_length_and_width() {
        let err = DecodeError::MalformedInput { len: 7, width: 4 };
        assert_eq!(
            err.to_string(),
            "Malformed input: 7 bytes is not a multiple of the 4-byte element width"
        );
    }

    #[test]
    fn parse_error_keeps_position() {
        let err: ParseError = serde_json::from_str::<serde_json::Value>("{\n  bad")
            .unwrap_err()
            .into();
        assert_eq!(err.line(), 2);
        assert!(err.column() > 0);
    }
}
