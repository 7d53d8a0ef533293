//! The structured model identifier.

use std::collections::BTreeMap;
use std::fmt;

use nameplate_naming::{Identity, IdentityPath};
use serde::{Deserialize, Serialize};

// =============================================================================
// Fields
// =============================================================================

/// A model id field a domain pattern can capture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// `app.env`
    Env,
    /// `app.name`
    App,
    /// `app.tags.<key>`
    Tag(String),
}

impl Field {
    /// Maps an identity path onto a model id field. The namespace has no
    /// model id counterpart.
    pub fn from_identity_path(path: IdentityPath) -> Option<Self> {
        match path {
            IdentityPath::Env => Some(Field::Env),
            IdentityPath::Name => Some(Field::App),
            IdentityPath::Tag(key) => Some(Field::Tag(key)),
            IdentityPath::Namespace => None,
        }
    }

    /// This field's value in the application identity.
    pub fn value_in<'a>(&self, identity: &'a Identity) -> Option<&'a str> {
        match self {
            Field::Env => Some(identity.env()),
            Field::App => Some(identity.name()),
            Field::Tag(key) => identity.tag(key),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Env => f.write_str("app.env"),
            Field::App => f.write_str("app.name"),
            Field::Tag(key) => write!(f, "app.tags.{key}"),
        }
    }
}

// =============================================================================
// ModelId
// =============================================================================

/// A domain-qualified model identifier.
///
/// The canonical string is derived by [`ModelIdCodec`](crate::ModelIdCodec);
/// it is never stored here. Fields left unset fall back to the application
/// identity when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelId {
    /// Model name, always the final segment of the canonical string.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ModelId {
    /// Creates a model id with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    #[must_use]
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Fills every unset field from the application identity.
    ///
    /// Tags already present on the model id win over identity tags.
    #[must_use]
    pub fn pad_from(mut self, identity: &Identity) -> Self {
        self.env.get_or_insert_with(|| identity.env().to_string());
        self.app.get_or_insert_with(|| identity.name().to_string());
        for (key, value) in identity.tags() {
            self.tags
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// The value of `field`, if set on this model id.
    pub fn field(&self, field: &Field) -> Option<&str> {
        match field {
            Field::Env => self.env.as_deref(),
            Field::App => self.app.as_deref(),
            Field::Tag(key) => self.tags.get(key).map(String::as_str),
        }
    }

    pub(crate) fn set_field(&mut self, field: &Field, value: &str) {
        match field {
            Field::Env => self.env = Some(value.to_string()),
            Field::App => self.app = Some(value.to_string()),
            Field::Tag(key) => {
                self.tags.insert(key.clone(), value.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_from_identity() {
        let identity = Identity::builder("production", "orders")
            .tag("project", "logistics")
            .tag("family", "core")
            .build();

        let model = ModelId::new("shipment")
            .with_tag("project", "billing")
            .pad_from(&identity);

        assert_eq!(model.env.as_deref(), Some("production"));
        assert_eq!(model.app.as_deref(), Some("orders"));
        assert_eq!(model.tags["project"], "billing");
        assert_eq!(model.tags["family"], "core");
    }

    #[test]
    fn test_field_access() {
        let model = ModelId::new("m").with_env("dev").with_tag("project", "p");
        assert_eq!(model.field(&Field::Env), Some("dev"));
        assert_eq!(model.field(&Field::App), None);
        assert_eq!(model.field(&Field::Tag("project".into())), Some("p"));
    }

    #[test]
    fn test_json_shape() {
        let model = ModelId::new("myModel").with_tag("project", "myproject");
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "myModel", "tags": {"project": "myproject"}})
        );

        let parsed: ModelId = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, model);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Env.to_string(), "app.env");
        assert_eq!(Field::App.to_string(), "app.name");
        assert_eq!(Field::Tag("group".into()).to_string(), "app.tags.group");
    }
}
