//! Path-bearing fields of spec entities.
//! - `PathContainer` declares which keys of an entity's JSON object hold paths
//! - `expand_paths` rewrites those keys relative to the spec file directory
//! - Absolute paths and paths rooted at a build variable (`$(SRCROOT)/..`)
//!   are left as written

use crate::encoding::JsonDictionary;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

lazy_static! {
    static ref BUILD_VARIABLE_RE: Regex =
        Regex::new(r"^\$(\([A-Za-z0-9_]+\)|\{[A-Za-z0-9_]+\})").expect("valid BUILD_VARIABLE_RE");
}

/// A key of a JSON object whose value is a path, or holds nested objects
/// that have path keys of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathProperty {
    String(&'static str),
    Object(&'static str, Vec<PathProperty>),
}

/// Entities with path-valued fields. Only declares the keys; rewriting is
/// done by [`expand_paths`] before the entity is decoded.
pub trait PathContainer {
    fn path_properties() -> Vec<PathProperty>;
}

fn normalize_path(path: &str) -> String {
    let p = path.replace('\\', "/");
    let p = p.trim();
    p.strip_prefix("./").unwrap_or(p).to_string()
}

/// Joins `path` onto `base_dir` unless it is absolute or starts with a build
/// variable. Returns `None` when the path must stay as written.
pub fn resolve_path(path: &str, base_dir: &Path) -> Option<String> {
    let p = normalize_path(path);
    if p.is_empty() || BUILD_VARIABLE_RE.is_match(&p) || Path::new(&p).is_absolute() {
        return None;
    }
    Some(base_dir.join(&p).to_string_lossy().into_owned())
}

/// Rewrites every path property of `dictionary` relative to `base_dir`.
/// Missing keys and values of an unexpected type are skipped.
pub fn expand_paths(dictionary: &mut JsonDictionary, properties: &[PathProperty], base_dir: &Path) {
    for property in properties {
        match property {
            PathProperty::String(key) => {
                let Some(Value::String(path)) = dictionary.get_mut(*key) else {
                    continue;
                };
                if let Some(resolved) = resolve_path(path, base_dir) {
                    debug!("Expanded path '{}': {} -> {}", key, path, resolved);
                    *path = resolved;
                }
            }
            PathProperty::Object(key, nested) => match dictionary.get_mut(*key) {
                Some(Value::Object(object)) => expand_paths(object, nested, base_dir),
                Some(Value::Array(items)) => {
                    for item in items.iter_mut() {
                        if let Value::Object(object) = item {
                            expand_paths(object, nested, base_dir);
                        }
                    }
                }
                _ => {}
            },
        }
    }
}
