//! Canonical string codec for [`ModelId`].
//!
//! Format: `<resolved domain pattern>.<model name>`.
//!
//! The model name is always everything after the **last** `.`, whatever
//! separators the domain pattern uses internally. The prefix before that dot
//! is matched against the domain pattern compiled once at startup: each
//! placeholder becomes a capture of one or more non-`.` characters, every other
//! character matches itself.

use std::fmt;
use std::sync::Arc;

use nameplate_naming::{
    check_pattern, Identity, Pattern, PatternSubject, Placeholder, Segment, ValidationError,
    ValidationReport,
};
use regex::Regex;

use crate::error::ModelIdError;
use crate::types::{Field, ModelId};

/// The configured `app.model_id.domain_pattern`, not yet compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPattern {
    pattern: Pattern,
}

impl DomainPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::parse(pattern),
        }
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Startup validation: identity-scoped placeholders only, no
    /// `{app.namespace}` and no `{modelId}`.
    pub fn validate(&self, identity: &Identity) -> Vec<ValidationError> {
        check_pattern(PatternSubject::DomainPattern, &self.pattern, identity)
    }
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Field(Field),
}

/// A domain pattern compiled into an encoder and an anchored matcher.
#[derive(Debug, Clone)]
struct CompiledDomain {
    source: DomainPattern,
    parts: Vec<Part>,
    matcher: Regex,
    /// `captures[i]` fills capture group `i + 1`.
    captures: Vec<Field>,
}

impl CompiledDomain {
    fn compile(source: DomainPattern) -> Result<Self, ModelIdError> {
        let compile_error = |message: &str| ModelIdError::Compile {
            pattern: source.as_str().to_string(),
            message: message.to_string(),
        };

        if source.as_str().is_empty() {
            return Err(compile_error("pattern is empty"));
        }

        let mut parts = Vec::new();
        let mut captures = Vec::new();
        let mut expr = String::from("^");

        for segment in source.pattern().segments() {
            match segment {
                Segment::Literal(text) => {
                    expr.push_str(&regex::escape(text));
                    parts.push(Part::Literal(text.clone()));
                }
                Segment::Token(token) => {
                    if matches!(parts.last(), Some(Part::Field(_))) {
                        return Err(compile_error("placeholders must be separated by literal text"));
                    }
                    let field = match token.placeholder() {
                        Some(Placeholder::Identity(path)) => Field::from_identity_path(path),
                        _ => None,
                    }
                    .ok_or_else(|| compile_error("only app.env, app.name and app.tags.* can be captured"))?;

                    expr.push_str("([^.]+)");
                    captures.push(field.clone());
                    parts.push(Part::Field(field));
                }
            }
        }
        expr.push('$');

        let matcher = Regex::new(&expr).map_err(|e| compile_error(&e.to_string()))?;

        Ok(Self {
            source,
            parts,
            matcher,
            captures,
        })
    }
}

/// Encodes and decodes canonical model id strings.
///
/// Immutable after construction and cheap to share; `encode` and `decode`
/// take `&self` and touch no shared mutable state.
#[derive(Debug, Clone)]
pub struct ModelIdCodec {
    identity: Arc<Identity>,
    domain: Option<CompiledDomain>,
}

impl ModelIdCodec {
    /// Validates and compiles the domain pattern, if one is configured.
    pub fn new(identity: Arc<Identity>, domain: Option<DomainPattern>) -> Result<Self, ModelIdError> {
        let domain = match domain {
            Some(domain) => {
                ValidationReport::check(domain.validate(&identity))
                    .map_err(ModelIdError::InvalidDomainPattern)?;
                Some(CompiledDomain::compile(domain)?)
            }
            None => None,
        };

        Ok(Self { identity, domain })
    }

    /// A codec without a domain pattern; every operation fails with
    /// [`ModelIdError::DomainPatternNotConfigured`].
    pub fn unconfigured(identity: Arc<Identity>) -> Self {
        Self {
            identity,
            domain: None,
        }
    }

    pub fn domain_pattern(&self) -> Option<&DomainPattern> {
        self.domain.as_ref().map(|domain| &domain.source)
    }

    pub fn is_configured(&self) -> bool {
        self.domain.is_some()
    }

    fn compiled(&self) -> Result<&CompiledDomain, ModelIdError> {
        self.domain
            .as_ref()
            .ok_or(ModelIdError::DomainPatternNotConfigured)
    }

    /// Encodes `model` as `<domain>.<name>`.
    ///
    /// Fields the model leaves unset are taken from the application identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use nameplate_model_id::{DomainPattern, ModelId, ModelIdCodec};
    /// use nameplate_naming::Identity;
    ///
    /// let identity = Arc::new(Identity::builder("production", "svc").tag("project", "myproject").build());
    /// let codec = ModelIdCodec::new(identity, Some(DomainPattern::new("{app.tags.project}.{app.env}")))?;
    ///
    /// assert_eq!(codec.encode(&ModelId::new("myModel"))?, "myproject.production.myModel");
    /// # Ok::<(), nameplate_model_id::ModelIdError>(())
    /// ```
    pub fn encode(&self, model: &ModelId) -> Result<String, ModelIdError> {
        let domain = self.compiled()?;
        check_segment("name", &model.name)?;

        let mut out = String::with_capacity(domain.source.as_str().len() + model.name.len() + 16);
        for part in &domain.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(field) => {
                    let value = self.field_value(model, field)?;
                    check_segment(field, value)?;
                    out.push_str(value);
                }
            }
        }

        // Values may contain the literal text around them; make sure the
        // prefix splits back into exactly the values that went in.
        if let Some(field) = self.first_mismatch(domain, model, &out)? {
            return Err(ModelIdError::Ambiguous {
                prefix: out,
                field: field.to_string(),
            });
        }

        out.push('.');
        out.push_str(&model.name);
        Ok(out)
    }

    fn first_mismatch<'d>(
        &self,
        domain: &'d CompiledDomain,
        model: &ModelId,
        prefix: &str,
    ) -> Result<Option<&'d Field>, ModelIdError> {
        let captures = domain.matcher.captures(prefix);
        for (index, field) in domain.captures.iter().enumerate() {
            let expected = self.field_value(model, field)?;
            let captured = captures
                .as_ref()
                .and_then(|captures| captures.get(index + 1))
                .map(|m| m.as_str());
            if captured != Some(expected) {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    fn field_value<'a>(&'a self, model: &'a ModelId, field: &Field) -> Result<&'a str, ModelIdError> {
        model
            .field(field)
            .or_else(|| field.value_in(&self.identity))
            .ok_or_else(|| ModelIdError::MissingField(field.to_string()))
    }

    /// Decodes a canonical string back into its structured parts.
    ///
    /// Only fields the domain pattern captures are populated.
    pub fn decode(&self, canonical: &str) -> Result<ModelId, ModelIdError> {
        let domain = self.compiled()?;

        let (prefix, name) = canonical
            .rsplit_once('.')
            .ok_or_else(|| ModelIdError::malformed(canonical, "missing '.' before the model name"))?;
        if name.is_empty() {
            return Err(ModelIdError::malformed(canonical, "empty model name"));
        }
        if prefix.is_empty() {
            return Err(ModelIdError::malformed(canonical, "empty domain prefix"));
        }

        let captures = domain
            .matcher
            .captures(prefix)
            .ok_or_else(|| ModelIdError::malformed(canonical, "prefix does not match the domain pattern"))?;

        let mut model = ModelId::new(name);
        for (index, field) in domain.captures.iter().enumerate() {
            let Some(value) = captures.get(index + 1).map(|m| m.as_str()) else {
                continue;
            };
            match model.field(field) {
                Some(existing) if existing != value => {
                    return Err(ModelIdError::malformed(
                        canonical,
                        "placeholder captured with conflicting values",
                    ));
                }
                Some(_) => {}
                None => model.set_field(field, value),
            }
        }

        Ok(model)
    }
}

fn check_segment(field: impl fmt::Display, value: &str) -> Result<(), ModelIdError> {
    if value.is_empty() || value.contains('.') {
        return Err(ModelIdError::InvalidSegment {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
