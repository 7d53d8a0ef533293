//! The closed set of placeholder paths a pattern may reference.
//!
//! Paths come in two classes:
//!
//! - **identity-scoped** paths resolve against the process [`Identity`](crate::Identity):
//!   `app.env`, `app.name`, `app.namespace` and `app.tags.<key>`.
//! - **call-scoped** paths are supplied by the caller on every resolution
//!   (`queueId`, `topicId`, ...). Each resource kind declares which ones it accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix shared by all identity-scoped paths.
const APP_PREFIX: &str = "app.";

/// Prefix of tag paths.
const TAGS_PREFIX: &str = "app.tags.";

/// An identity-scoped placeholder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityPath {
    /// `app.env`
    Env,
    /// `app.name`
    Name,
    /// `app.namespace`, itself a pattern.
    Namespace,
    /// `app.tags.<key>`
    Tag(String),
}

/// A call-scoped placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CallPlaceholder {
    #[serde(rename = "queueId")]
    QueueId,
    #[serde(rename = "topicId")]
    TopicId,
    #[serde(rename = "modelId")]
    ModelId,
    #[serde(rename = "streamName")]
    StreamName,
    #[serde(rename = "cacheName")]
    CacheName,
}

impl CallPlaceholder {
    /// Every call-scoped placeholder.
    pub const ALL: [CallPlaceholder; 5] = [
        CallPlaceholder::QueueId,
        CallPlaceholder::TopicId,
        CallPlaceholder::ModelId,
        CallPlaceholder::StreamName,
        CallPlaceholder::CacheName,
    ];

    /// The path as written inside a pattern.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CallPlaceholder::QueueId => "queueId",
            CallPlaceholder::TopicId => "topicId",
            CallPlaceholder::ModelId => "modelId",
            CallPlaceholder::StreamName => "streamName",
            CallPlaceholder::CacheName => "cacheName",
        }
    }
}

impl fmt::Display for CallPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallPlaceholder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|placeholder| placeholder.as_str() == s)
            .ok_or(())
    }
}

/// Any placeholder path a pattern can legally contain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Identity(IdentityPath),
    Call(CallPlaceholder),
}

impl Placeholder {
    /// Classifies a token body.
    ///
    /// Returns `None` for anything outside the schema, including malformed tag
    /// paths such as `app.tags.` or `app.tags.a.b`.
    pub fn parse(path: &str) -> Option<Self> {
        if let Some(rest) = path.strip_prefix(APP_PREFIX) {
            let identity = match rest {
                "env" => IdentityPath::Env,
                "name" => IdentityPath::Name,
                "namespace" => IdentityPath::Namespace,
                _ => {
                    let key = path.strip_prefix(TAGS_PREFIX)?;
                    if !is_valid_tag_key(key) {
                        return None;
                    }
                    IdentityPath::Tag(key.to_string())
                }
            };
            return Some(Placeholder::Identity(identity));
        }

        path.parse().ok().map(Placeholder::Call)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Identity(IdentityPath::Env) => f.write_str("app.env"),
            Placeholder::Identity(IdentityPath::Name) => f.write_str("app.name"),
            Placeholder::Identity(IdentityPath::Namespace) => f.write_str("app.namespace"),
            Placeholder::Identity(IdentityPath::Tag(key)) => write!(f, "{TAGS_PREFIX}{key}"),
            Placeholder::Call(call) => f.write_str(call.as_str()),
        }
    }
}

/// Tag keys are non-empty and contain neither dots nor braces.
pub fn is_valid_tag_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '{', '}'])
}

/// Suggested replacement for a bare placeholder from the pre-namespace
/// naming scheme, if `path` is one of them.
pub fn legacy_replacement(path: &str) -> Option<&'static str> {
    match path {
        "project" => Some("app.tags.project"),
        "family" => Some("app.tags.family"),
        "group" => Some("app.tags.group"),
        "realm" => Some("app.namespace"),
        "env" | "environment" => Some("app.env"),
        "app" | "application" | "name" => Some("app.name"),
        _ => None,
    }
}

/// Suggested correction for a near miss on the tag prefix (`app.tag.x`).
pub fn tag_prefix_typo(path: &str) -> Option<String> {
    path.strip_prefix("app.tag.")
        .filter(|key| is_valid_tag_key(key))
        .map(|key| format!("{TAGS_PREFIX}{key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity_paths() {
        assert_eq!(
            Placeholder::parse("app.env"),
            Some(Placeholder::Identity(IdentityPath::Env))
        );
        assert_eq!(
            Placeholder::parse("app.name"),
            Some(Placeholder::Identity(IdentityPath::Name))
        );
        assert_eq!(
            Placeholder::parse("app.namespace"),
            Some(Placeholder::Identity(IdentityPath::Namespace))
        );
        assert_eq!(
            Placeholder::parse("app.tags.project"),
            Some(Placeholder::Identity(IdentityPath::Tag("project".into())))
        );
    }

    #[test]
    fn test_parse_call_paths() {
        for call in CallPlaceholder::ALL {
            assert_eq!(Placeholder::parse(call.as_str()), Some(Placeholder::Call(call)));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        for path in [
            "",
            "app",
            "app.",
            "app.tag.project",
            "app.tags.",
            "app.tags.a.b",
            "project",
            "queueid",
            " app.env",
        ] {
            assert_eq!(Placeholder::parse(path), None, "path {path:?}");
        }
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for path in ["app.env", "app.name", "app.namespace", "app.tags.family", "streamName"] {
            let placeholder = Placeholder::parse(path).unwrap();
            assert_eq!(placeholder.to_string(), path);
        }
    }

    #[test]
    fn test_hints() {
        assert_eq!(legacy_replacement("project"), Some("app.tags.project"));
        assert_eq!(legacy_replacement("queueId"), None);
        assert_eq!(tag_prefix_typo("app.tag.project").as_deref(), Some("app.tags.project"));
        assert_eq!(tag_prefix_typo("app.tags.project"), None);
    }
}
