use crate::encoding::JsonDictionary;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding entities out of a spec document.
///
/// Each variant carries the offending piece of the document so the caller
/// can point at the exact entry when reporting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecParsingError {
    #[error("invalid dependency, expected one of `target`, `framework`, `carthage` or `sdk`: {}", display_document(.0))]
    InvalidDependency(JsonDictionary),
    #[error("invalid dependency entry, expected an object: {0}")]
    InvalidDependencyEntry(Value),
}

fn display_document(document: &JsonDictionary) -> String {
    serde_json::to_string(document).unwrap_or_else(|_| format!("{document:?}"))
}
