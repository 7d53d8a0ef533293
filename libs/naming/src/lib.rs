//! # nameplate-naming
//!
//! Resource naming from a single per-process identity.
//!
//! ## Design Principles
//!
//! - One [`Identity`] (env, name, tags, namespace) is built at startup and never mutated
//! - Every resource kind has one configured pattern and one delimiter
//! - Patterns only substitute dotted-path placeholders; there is no expression language
//! - Every configured pattern is validated before the process serves traffic
//!
//! ## Pattern Syntax
//!
//! A pattern is literal text with `{placeholder}` tokens:
//!
//! - `{app.env}`, `{app.name}`, `{app.tags.<key>}` resolve against the identity
//! - `{app.namespace}` resolves the namespace pattern, then rewrites its dots to the
//!   embedding pattern's delimiter
//! - `{queueId}`, `{topicId}`, `{modelId}`, `{streamName}`, `{cacheName}` are supplied
//!   per call, and only by the resource kinds that declare them
//!
//! Examples with namespace `{app.tags.project}.{app.env}`:
//! - queue `{app.namespace}-{queueId}`, delimiter `-` → `logistics-production-orders`
//! - metric `{app.namespace}`, delimiter `/` → `logistics/production`

mod error;
mod identity;
mod kind;
mod pattern;
mod placeholder;
mod registry;
mod resolver;
mod validate;

pub use error::NamingError;
pub use identity::{Identity, IdentityBuilder, DEFAULT_NAMESPACE_PATTERN};
pub use kind::{ResourceKind, UnknownResourceKind};
pub use pattern::{Pattern, Segment, Token};
pub use placeholder::{is_valid_tag_key, CallPlaceholder, IdentityPath, Placeholder};
pub use registry::{NamingPattern, PatternRegistry};
pub use resolver::{resolve, CallValues, ResolveContext};
pub use validate::{
    check_pattern, validate_all, InvalidReason, PatternSubject, ValidationError, ValidationReport,
};
