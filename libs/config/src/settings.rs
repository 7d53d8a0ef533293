//! Validated naming settings.

use std::collections::BTreeMap;
use std::sync::Arc;

use config::{Config, ConfigError};
use nameplate_model_id::{DomainPattern, ModelIdCodec};
use nameplate_naming::{
    validate_all, CallValues, Identity, NamingError, NamingPattern, PatternRegistry, ResourceKind,
    ValidationReport,
};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::SettingsError;
use crate::load::LoadOptions;

#[derive(Debug, Deserialize)]
struct RawApp {
    env: String,
    name: String,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    model_id: RawModelId,
}

#[derive(Debug, Default, Deserialize)]
struct RawModelId {
    #[serde(default)]
    domain_pattern: Option<String>,
}

/// The naming runtime of one application.
///
/// Immutable once loaded; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Settings {
    identity: Arc<Identity>,
    registry: PatternRegistry,
    codec: ModelIdCodec,
}

impl Settings {
    /// Loads and validates settings from the given sources.
    pub fn load(options: &LoadOptions) -> Result<Self, SettingsError> {
        let config = options.build()?;
        Self::from_config(&config)
    }

    /// Reads and validates settings from a configuration tree.
    ///
    /// Every pattern is checked before the first error is returned, so a
    /// [`SettingsError::Validation`] lists the whole misconfiguration.
    pub fn from_config(config: &Config) -> Result<Self, SettingsError> {
        let app: RawApp = config.get("app")?;

        let mut builder = Identity::builder(app.env, app.name).tags(app.tags);
        if let Some(namespace) = app.namespace.filter(|ns| !ns.is_empty()) {
            builder = builder.namespace(namespace);
        }
        let identity = Arc::new(builder.build());

        let registry = read_registry(config, &identity)?;
        let domain = app
            .model_id
            .domain_pattern
            .filter(|pattern| !pattern.is_empty())
            .map(DomainPattern::new);

        let mut errors = validate_all(&identity, registry.iter());
        if let Some(domain) = &domain {
            errors.extend(domain.validate(&identity));
        }
        if let Err(report) = ValidationReport::check(errors) {
            for err in report.errors() {
                error!(
                    subject = %err.subject,
                    pattern = %err.pattern,
                    placeholder = %err.placeholder,
                    reason = %err.reason,
                    "invalid naming placeholder"
                );
            }
            return Err(SettingsError::Validation(report));
        }

        let codec = ModelIdCodec::new(identity.clone(), domain)?;

        info!(
            env = identity.env(),
            name = identity.name(),
            namespace = identity.namespace().unwrap_or_default(),
            kinds = registry.len(),
            model_id = codec.is_configured(),
            "naming configuration validated"
        );

        Ok(Self {
            identity,
            registry,
            codec,
        })
    }

    pub fn identity(&self) -> &Arc<Identity> {
        &self.identity
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn codec(&self) -> &ModelIdCodec {
        &self.codec
    }

    /// Resolves the name of a `kind` resource.
    pub fn resolve_name(&self, kind: ResourceKind, values: &CallValues) -> Result<String, NamingError> {
        self.registry.resolve_name(kind, values)
    }
}

fn read_registry(config: &Config, identity: &Arc<Identity>) -> Result<PatternRegistry, ConfigError> {
    let use_defaults = optional(config.get_bool("naming.defaults"))?.unwrap_or(true);
    let mut registry = PatternRegistry::new(identity.clone());

    for kind in ResourceKind::ALL {
        let section = kind.config_section();
        let pattern = optional(config.get_string(&format!("{section}.naming.{}", kind.pattern_key())))?;
        let delimiter =
            optional(config.get_string(&format!("{section}.naming.{}", kind.delimiter_key())))?
                .unwrap_or_else(|| kind.default_delimiter().to_string());

        let naming = match pattern {
            Some(pattern) => NamingPattern::new(pattern, delimiter),
            None if use_defaults => NamingPattern::new(kind.default_pattern(), delimiter),
            None => {
                debug!(kind = %kind, "no naming pattern configured");
                continue;
            }
        };

        debug!(
            kind = %kind,
            pattern = %naming.pattern(),
            delimiter = naming.delimiter(),
            "registered naming pattern"
        );
        registry.insert(kind, naming);
    }

    Ok(registry)
}

/// Maps a missing key to `None`.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use rstest::rstest;

    fn from_yaml(yaml: &str) -> Result<Settings, SettingsError> {
        let config = Config::builder()
            .add_source(config::File::from_str(yaml, FileFormat::Yaml))
            .build()?;
        Settings::from_config(&config)
    }

    #[test]
    fn test_minimal_configuration_uses_defaults() {
        let settings = from_yaml("app:\n  env: production\n  name: orders\n").unwrap();

        assert_eq!(settings.identity().namespace().unwrap(), "production.orders");
        assert_eq!(settings.registry().len(), ResourceKind::ALL.len());
        assert!(!settings.codec().is_configured());

        let trace = settings
            .resolve_name(ResourceKind::TraceService, &CallValues::new())
            .unwrap();
        assert_eq!(trace, "production-orders");
    }

    #[test]
    fn test_defaults_disabled() {
        let yaml = r#"
app:
  env: production
  name: orders
naming:
  defaults: false
queue:
  naming:
    queue_pattern: "{app.name}-{queueId}"
"#;
        let settings = from_yaml(yaml).unwrap();
        assert_eq!(settings.registry().len(), 1);
        assert!(settings.registry().contains(ResourceKind::Queue));

        let err = settings
            .resolve_name(ResourceKind::Topic, &CallValues::new())
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[rstest]
    #[case::defaults_on("", ResourceKind::TraceService, Some("production-orders"))]
    #[case::defaults_off("naming:\n  defaults: false\n", ResourceKind::TraceService, None)]
    #[case::defaults_off_from_string("naming:\n  defaults: \"false\"\n", ResourceKind::TraceService, None)]
    #[case::pattern_only(
        "tracing:\n  naming:\n    service_pattern: \"{app.name}\"\n",
        ResourceKind::TraceService,
        Some("orders")
    )]
    #[case::delimiter_only(
        "metric:\n  naming:\n    namespace_delimiter: \".\"\n",
        ResourceKind::MetricNamespace,
        Some("production.orders")
    )]
    #[case::pattern_and_delimiter(
        "metric:\n  naming:\n    namespace_pattern: \"{app.namespace}\"\n    namespace_delimiter: \"_\"\n",
        ResourceKind::MetricNamespace,
        Some("production_orders")
    )]
    fn test_registered_pattern(#[case] extra: &str, #[case] kind: ResourceKind, #[case] expected: Option<&str>) {
        let yaml = format!("app:\n  env: production\n  name: orders\n{extra}");
        let settings = from_yaml(&yaml).unwrap();

        match settings.resolve_name(kind, &CallValues::new()) {
            Ok(name) => assert_eq!(Some(name.as_str()), expected),
            Err(err) => {
                assert_eq!(expected, None, "{err}");
                assert!(err.is_config_error());
            }
        }
    }

    #[rstest]
    #[case::present(Ok(7), Some(7))]
    #[case::missing(Err(ConfigError::NotFound("queue.naming".into())), None)]
    fn test_optional_maps_not_found(#[case] input: Result<i32, ConfigError>, #[case] expected: Option<i32>) {
        assert_eq!(optional(input).unwrap(), expected);
    }

    #[test]
    fn test_optional_keeps_other_errors() {
        let err = optional::<i32>(Err(ConfigError::Message("bad".into()))).unwrap_err();
        assert!(matches!(err, ConfigError::Message(_)));
    }

    #[test]
    fn test_empty_namespace_and_domain_are_unset() {
        let yaml = r#"
app:
  env: dev
  name: orders
  namespace: ""
  model_id:
    domain_pattern: ""
"#;
        let settings = from_yaml(yaml).unwrap();
        assert_eq!(settings.identity().namespace().unwrap(), "dev.orders");
        assert!(!settings.codec().is_configured());
    }

    #[test]
    fn test_missing_app_section() {
        let err = from_yaml("queue:\n  naming:\n    queue_pattern: x\n").unwrap_err();
        assert!(matches!(err, SettingsError::Config(_)));
    }

    #[test]
    fn test_domain_pattern_errors_join_the_report() {
        let yaml = r#"
app:
  env: production
  name: orders
  namespace: "{app.namespace}"
  model_id:
    domain_pattern: "{app.tags.project}.{modelId}"
"#;
        let err = from_yaml(yaml).unwrap_err();
        let report = err.report().unwrap();
        // namespace self reference, undefined tag, modelId
        assert_eq!(report.len(), 3);
    }
}
