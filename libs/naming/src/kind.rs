//! Resource kinds that carry a naming pattern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::placeholder::CallPlaceholder;

/// A kind of managed resource whose name is generated from a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Queue,
    Topic,
    Table,
    Stream,
    CacheNamespace,
    MetricNamespace,
    TraceService,
}

impl ResourceKind {
    /// Every resource kind, in registry order.
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Queue,
        ResourceKind::Topic,
        ResourceKind::Table,
        ResourceKind::Stream,
        ResourceKind::CacheNamespace,
        ResourceKind::MetricNamespace,
        ResourceKind::TraceService,
    ];

    /// Stable short name, used in errors and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Queue => "queue",
            ResourceKind::Topic => "topic",
            ResourceKind::Table => "table",
            ResourceKind::Stream => "stream",
            ResourceKind::CacheNamespace => "cache_namespace",
            ResourceKind::MetricNamespace => "metric_namespace",
            ResourceKind::TraceService => "trace_service",
        }
    }

    /// Top-level configuration section holding `<section>.naming.*`.
    pub const fn config_section(&self) -> &'static str {
        match self {
            ResourceKind::Queue => "queue",
            ResourceKind::Topic => "topic",
            ResourceKind::Table => "table",
            ResourceKind::Stream => "stream",
            ResourceKind::CacheNamespace => "cache",
            ResourceKind::MetricNamespace => "metric",
            ResourceKind::TraceService => "tracing",
        }
    }

    /// Key of the pattern inside `<section>.naming`.
    pub const fn pattern_key(&self) -> &'static str {
        match self {
            ResourceKind::Queue => "queue_pattern",
            ResourceKind::Topic => "topic_pattern",
            ResourceKind::Table => "table_pattern",
            ResourceKind::Stream => "stream_pattern",
            ResourceKind::CacheNamespace => "key_pattern",
            ResourceKind::MetricNamespace => "namespace_pattern",
            ResourceKind::TraceService => "service_pattern",
        }
    }

    /// Key of the delimiter inside `<section>.naming`.
    pub const fn delimiter_key(&self) -> &'static str {
        match self {
            ResourceKind::Queue => "queue_delimiter",
            ResourceKind::Topic => "topic_delimiter",
            ResourceKind::Table => "table_delimiter",
            ResourceKind::Stream => "stream_delimiter",
            ResourceKind::CacheNamespace => "key_delimiter",
            ResourceKind::MetricNamespace => "namespace_delimiter",
            ResourceKind::TraceService => "service_delimiter",
        }
    }

    /// Call-scoped placeholders this kind accepts.
    pub const fn call_scope(&self) -> &'static [CallPlaceholder] {
        match self {
            ResourceKind::Queue => &[CallPlaceholder::QueueId],
            ResourceKind::Topic => &[CallPlaceholder::TopicId],
            ResourceKind::Table => &[CallPlaceholder::ModelId],
            ResourceKind::Stream => &[CallPlaceholder::StreamName],
            ResourceKind::CacheNamespace => &[CallPlaceholder::CacheName],
            ResourceKind::MetricNamespace | ResourceKind::TraceService => &[],
        }
    }

    /// Pattern used when the configuration does not provide one.
    pub const fn default_pattern(&self) -> &'static str {
        match self {
            ResourceKind::Queue => "{app.namespace}-{queueId}",
            ResourceKind::Topic => "{app.namespace}-{topicId}",
            ResourceKind::Table => "{app.namespace}-{modelId}",
            ResourceKind::Stream => "{app.namespace}-{streamName}",
            ResourceKind::CacheNamespace => "{app.namespace}:{cacheName}",
            ResourceKind::MetricNamespace | ResourceKind::TraceService => "{app.namespace}",
        }
    }

    /// Delimiter used when the configuration does not provide one.
    pub const fn default_delimiter(&self) -> &'static str {
        match self {
            ResourceKind::CacheNamespace => ":",
            ResourceKind::MetricNamespace => "/",
            _ => "-",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind '{0}'")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.config_section() == s)
            .ok_or_else(|| UnknownResourceKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use crate::placeholder::Placeholder;

    #[test]
    fn test_parse_by_name_or_section() {
        assert_eq!("queue".parse::<ResourceKind>(), Ok(ResourceKind::Queue));
        assert_eq!("cache".parse::<ResourceKind>(), Ok(ResourceKind::CacheNamespace));
        assert_eq!(
            "metric_namespace".parse::<ResourceKind>(),
            Ok(ResourceKind::MetricNamespace)
        );
        assert!("queues".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_default_patterns_only_use_declared_call_scope() {
        for kind in ResourceKind::ALL {
            let pattern = Pattern::parse(kind.default_pattern());
            for token in pattern.tokens() {
                match token.placeholder() {
                    Some(Placeholder::Call(call)) => {
                        assert!(kind.call_scope().contains(&call), "{kind}: {call}")
                    }
                    Some(Placeholder::Identity(_)) => {}
                    None => panic!("{kind}: invalid default token {}", token.path),
                }
            }
        }
    }

    #[test]
    fn test_config_keys_unique() {
        let sections: std::collections::HashSet<_> =
            ResourceKind::ALL.iter().map(|k| k.config_section()).collect();
        assert_eq!(sections.len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&ResourceKind::TraceService).unwrap(),
            "\"trace_service\""
        );
    }
}
