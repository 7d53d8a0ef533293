//! Shared fixtures for nameplate tests.
//!
//! Two applications show up across the test suites:
//!
//! - `orders-service` in the `logistics` project, whose namespace is
//!   `{app.tags.project}.{app.env}` and resolves to `logistics.production`
//! - `my-service` in the `myproject` project, used for model id round trips

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nameplate_naming::{Identity, PatternRegistry};

pub const LOGISTICS_NAMESPACE_PATTERN: &str = "{app.tags.project}.{app.env}";

pub const MYPROJECT_DOMAIN_PATTERN: &str = "{app.tags.project}.{app.env}";

/// Configuration for the logistics application, in YAML.
pub const LOGISTICS_YAML: &str = r#"
app:
  env: production
  name: orders-service
  namespace: "{app.tags.project}.{app.env}"
  tags:
    project: logistics
  model_id:
    domain_pattern: "{app.tags.project}.{app.env}"
queue:
  naming:
    queue_pattern: "{app.namespace}-{queueId}"
    queue_delimiter: "-"
topic:
  naming:
    topic_pattern: "{app.namespace}-{topicId}"
    topic_delimiter: "_"
"#;

/// Configuration that mixes a tag typo with a legacy placeholder.
pub const MISCONFIGURED_YAML: &str = r#"
app:
  env: production
  name: orders-service
  tags:
    project: logistics
queue:
  naming:
    queue_pattern: "{app.tag.project}-{queueId}"
topic:
  naming:
    topic_pattern: "{project}-{topicId}"
"#;

/// The logistics identity.
pub fn logistics_identity() -> Identity {
    Identity::builder("production", "orders-service")
        .tag("project", "logistics")
        .namespace(LOGISTICS_NAMESPACE_PATTERN)
        .build()
}

/// The myproject identity, with the default namespace pattern.
pub fn myproject_identity() -> Identity {
    Identity::builder("production", "my-service")
        .tag("project", "myproject")
        .build()
}

/// A registry over the logistics identity holding every default pattern.
pub fn logistics_registry() -> PatternRegistry {
    PatternRegistry::with_defaults(Arc::new(logistics_identity()))
}

/// Writes `contents` to `dir/file_name` and returns the path.
pub fn write_config(dir: &Path, file_name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    Ok(path)
}
