//! # nameplate-config
//!
//! Builds the naming runtime from layered configuration.
//!
//! Sources are merged in order (configuration files, then environment
//! variables) and read into an [`Identity`](nameplate_naming::Identity), a
//! [`PatternRegistry`](nameplate_naming::PatternRegistry) and an optional
//! model id domain pattern. Every pattern is validated before anything is
//! handed out: a [`Settings`] value only exists for a configuration that
//! passed startup validation.
//!
//! ## Keys
//!
//! ```yaml
//! app:
//!   env: production
//!   name: orders-service
//!   namespace: "{app.tags.project}.{app.env}"   # optional
//!   tags:
//!     project: logistics
//!   model_id:
//!     domain_pattern: "{app.tags.project}.{app.env}"   # optional
//! queue:
//!   naming:
//!     queue_pattern: "{app.namespace}-{queueId}"
//!     queue_delimiter: "-"
//! naming:
//!   defaults: true   # kinds without a pattern get their built-in default
//! ```
//!
//! Environment variables use `NAMEPLATE` as prefix and `__` as separator,
//! e.g. `NAMEPLATE__APP__ENV=staging`.

mod error;
mod load;
mod settings;

pub use error::SettingsError;
pub use load::{LoadOptions, DEFAULT_ENV_PREFIX, DEFAULT_ENV_SEPARATOR};
pub use settings::Settings;
