//! Dependency model of a project-spec document.
//!
//! A spec declares the dependencies of a build target as plain JSON-like
//! objects. This crate decodes them into [`Dependency`] values, encodes them
//! back with economy rules, and rewrites the path-bearing fields relative to
//! the spec file before decoding.

pub mod dependency;
pub mod encoding;
pub mod error;
pub mod path;
pub mod spec;

pub use dependency::{Dependency, DependencyKind};
pub use encoding::{JsonDictionary, JsonEncodable, JsonLookup, JsonObjectConvertible};
pub use error::SpecParsingError;
pub use path::{expand_paths, PathContainer, PathProperty};
pub use spec::SpecDocument;
