//! # nameplate-model-id
//!
//! Canonical string identifiers for domain models, used as message routing
//! attributes.
//!
//! ## Design Principles
//!
//! - The canonical string is derived from a [`ModelId`], never stored on it
//! - The domain pattern is validated and compiled once, then reused per message
//! - Encoding never returns a partial string: no domain pattern is an error
//! - Decoding is unambiguous: the model name is everything after the last `.`
//!
//! ## ID Format
//!
//! `<resolved domain pattern>.<model name>`
//!
//! Examples with `project = myproject`, `env = production`:
//! - `{app.tags.project}.{app.env}` → `myproject.production.myModel`
//! - `{app.tags.project}-{app.env}` → `myproject-production.myModel`

mod codec;
mod error;
mod types;

pub use codec::{DomainPattern, ModelIdCodec};
pub use error::ModelIdError;
pub use types::{Field, ModelId};
