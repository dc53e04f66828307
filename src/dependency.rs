//! A single dependency declared by a target in the spec.
//!
//! Decoding checks the reference keys in a fixed order (`target`,
//! `framework`, `carthage`, `sdk`) and the first string value wins. All flag
//! keys are read leniently.

use crate::{
    encoding::{JsonDictionary, JsonEncodable, JsonLookup, JsonObjectConvertible},
    error::SpecParsingError,
    path::{PathContainer, PathProperty},
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::hash::{Hash, Hasher};
use tracing::debug;

const REFERENCE_KEYS: [&str; 4] = ["target", "framework", "carthage", "sdk"];

/// Which kind of artifact a dependency points at, with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyKind {
    /// Another target of the same spec.
    Target(String),
    /// A prebuilt framework, by path.
    Framework(String),
    /// A framework resolved by Carthage. `find_frameworks` asks for nested
    /// frameworks to be discovered; `None` leaves it to the project default.
    Carthage {
        name: String,
        find_frameworks: Option<bool>,
    },
    /// A library or framework shipped with the platform SDK.
    Sdk(String),
}

impl DependencyKind {
    pub fn reference(&self) -> &str {
        match self {
            DependencyKind::Target(name)
            | DependencyKind::Framework(name)
            | DependencyKind::Carthage { name, .. }
            | DependencyKind::Sdk(name) => name,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            DependencyKind::Target(_) => "target",
            DependencyKind::Framework(_) => "framework",
            DependencyKind::Carthage { .. } => "carthage",
            DependencyKind::Sdk(_) => "sdk",
        }
    }
}

/// A declared dependency and its link/embed flags.
///
/// **Identity is the reference string alone.** `PartialEq` and `Hash` ignore
/// the kind and every flag, so two dependencies on `"Foo"` with different
/// `embed` values are equal and a `HashSet<Dependency>` keeps only one of
/// them. Use [`Dependency::is_identical_to`] to compare every field.
#[derive(Debug, Clone)]
pub struct Dependency {
    kind: DependencyKind,
    reference: String,
    pub embed: Option<bool>,
    pub code_sign: Option<bool>,
    pub remove_headers: bool,
    pub link: Option<bool>,
    pub implicit: bool,
    pub weak_link: bool,
}

impl Dependency {
    pub fn new(kind: DependencyKind) -> Self {
        let reference = kind.reference().to_string();
        Self {
            kind,
            reference,
            embed: None,
            code_sign: None,
            remove_headers: true,
            link: None,
            implicit: false,
            weak_link: false,
        }
    }

    pub fn target(name: impl Into<String>) -> Self {
        Self::new(DependencyKind::Target(name.into()))
    }

    pub fn framework(path: impl Into<String>) -> Self {
        Self::new(DependencyKind::Framework(path.into()))
    }

    pub fn carthage(name: impl Into<String>, find_frameworks: Option<bool>) -> Self {
        Self::new(DependencyKind::Carthage {
            name: name.into(),
            find_frameworks,
        })
    }

    pub fn sdk(name: impl Into<String>) -> Self {
        Self::new(DependencyKind::Sdk(name.into()))
    }

    pub fn kind(&self) -> &DependencyKind {
        &self.kind
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Field-by-field comparison, unlike `==`.
    pub fn is_identical_to(&self, other: &Dependency) -> bool {
        self.kind == other.kind
            && self.reference == other.reference
            && self.embed == other.embed
            && self.code_sign == other.code_sign
            && self.remove_headers == other.remove_headers
            && self.link == other.link
            && self.implicit == other.implicit
            && self.weak_link == other.weak_link
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

impl JsonObjectConvertible for Dependency {
    fn from_json_dictionary(dictionary: &JsonDictionary) -> Result<Self, SpecParsingError> {
        let kind = if let Some(target) = dictionary.json_str("target") {
            DependencyKind::Target(target.to_string())
        } else if let Some(framework) = dictionary.json_str("framework") {
            DependencyKind::Framework(framework.to_string())
        } else if let Some(carthage) = dictionary.json_str("carthage") {
            DependencyKind::Carthage {
                name: carthage.to_string(),
                find_frameworks: dictionary.json_bool("findFrameworks"),
            }
        } else if let Some(sdk) = dictionary.json_str("sdk") {
            DependencyKind::Sdk(sdk.to_string())
        } else {
            return Err(SpecParsingError::InvalidDependency(dictionary.clone()));
        };

        let ignored: Vec<&str> = REFERENCE_KEYS
            .iter()
            .copied()
            .filter(|key| *key != kind.key() && dictionary.contains_key(*key))
            .collect();
        if !ignored.is_empty() {
            debug!(
                "Dependency '{}' resolved as {}, ignoring keys {:?}",
                kind.reference(),
                kind.key(),
                ignored
            );
        }

        let mut dependency = Dependency::new(kind);
        dependency.embed = dictionary.json_bool("embed");
        dependency.code_sign = dictionary.json_bool("codeSign");
        dependency.link = dictionary.json_bool("link");
        if let Some(remove_headers) = dictionary.json_bool("removeHeaders") {
            dependency.remove_headers = remove_headers;
        }
        if let Some(implicit) = dictionary.json_bool("implicit") {
            dependency.implicit = implicit;
        }
        if let Some(weak) = dictionary.json_bool("weak") {
            dependency.weak_link = weak;
        }
        debug!("Decoded {} dependency: {}", dependency.kind.key(), dependency.reference);
        Ok(dependency)
    }
}

impl Dependency {
    pub fn to_json_dictionary(&self) -> JsonDictionary {
        let mut dict = JsonDictionary::new();

        if !self.remove_headers {
            dict.insert("removeHeaders".into(), Value::Bool(false));
        }
        if self.implicit {
            dict.insert("implicit".into(), Value::Bool(true));
        }
        if self.weak_link {
            dict.insert("weak".into(), Value::Bool(true));
        }
        let optionals = [
            ("embed", self.embed),
            ("codeSign", self.code_sign),
            ("link", self.link),
        ];
        for (key, value) in optionals {
            if let Some(value) = value {
                dict.insert(key.into(), Value::Bool(value));
            }
        }

        dict.insert(self.kind.key().into(), Value::String(self.reference.clone()));
        if let DependencyKind::Carthage {
            find_frameworks: Some(find_frameworks),
            ..
        } = self.kind
        {
            dict.insert("findFrameworks".into(), Value::Bool(find_frameworks));
        }
        dict
    }
}

impl JsonEncodable for Dependency {
    fn to_json_value(&self) -> Value {
        Value::Object(self.to_json_dictionary())
    }
}

impl PathContainer for Dependency {
    fn path_properties() -> Vec<PathProperty> {
        vec![PathProperty::String("framework")]
    }
}

impl Serialize for Dependency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_dictionary().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dependency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(dictionary) => {
                Dependency::from_json_dictionary(&dictionary).map_err(de::Error::custom)
            }
            other => Err(de::Error::custom(SpecParsingError::InvalidDependencyEntry(other))),
        }
    }
}
