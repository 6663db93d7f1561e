#![forbid(unsafe_code)]

//! The string spec: the validation contract a session consumes.
//!
//! A [`Spec`] turns a raw value into a [`SpecOutcome`]. Sessions only ever
//! look at whether `error` is present; everything else is passed through to
//! the host untouched.

use std::fmt;

use crate::validators::{All, Validator, ValidatorBuilder};

/// What a spec reports for one raw value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecOutcome {
    /// Identifier of the spec that produced this outcome.
    pub id: String,
    /// The value as the spec saw it (after its own normalization).
    pub value: String,
    /// Human-readable error, `None` when the value passed.
    pub error: Option<String>,
    /// Numeric error code, `0` when the value passed.
    pub code: i32,
    /// The measured value that failed a check, if any.
    pub found: Option<String>,
}

impl SpecOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn ok(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// The validator contract. Must be pure and synchronous.
pub trait Spec {
    /// Identifier used when the session settings don't supply one.
    fn id(&self) -> &str;

    fn validate(&self, value: &str) -> SpecOutcome;
}

impl<S: Spec + ?Sized> Spec for &S {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn validate(&self, value: &str) -> SpecOutcome {
        (**self).validate(value)
    }
}

impl<S: Spec + ?Sized> Spec for Box<S> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn validate(&self, value: &str) -> SpecOutcome {
        (**self).validate(value)
    }
}

/// A spec built from an id, a normalization step and a validator chain.
///
/// ```rust
/// use vinput_spec::{Spec, StringSpec};
///
/// let spec = StringSpec::new("username")
///     .trim()
///     .rules(|r| r.required().min_length(3));
///
/// let outcome = spec.validate("  al ");
/// assert_eq!(outcome.value, "al");
/// assert_eq!(outcome.code, 2);
/// assert_eq!(outcome.found.as_deref(), Some("2"));
/// assert!(spec.validate("alice").is_ok());
/// ```
pub struct StringSpec {
    id: String,
    trim: bool,
    validators: All,
}

impl StringSpec {
    /// An empty spec: every value passes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trim: false,
            validators: All::default(),
        }
    }

    /// Trim surrounding whitespace before checking (builder).
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Replace the validator chain using a builder (builder).
    #[must_use]
    pub fn rules(mut self, build: impl FnOnce(ValidatorBuilder) -> ValidatorBuilder) -> Self {
        self.validators = build(ValidatorBuilder::new()).build();
        self
    }

    /// Replace the validator chain with a prebuilt one (builder).
    #[must_use]
    pub fn with_validators(mut self, validators: All) -> Self {
        self.validators = validators;
        self
    }
}

impl Spec for StringSpec {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self, value: &str) -> SpecOutcome {
        let value = if self.trim { value.trim() } else { value };
        match self.validators.validate(value) {
            Ok(()) => SpecOutcome::ok(&self.id, value),
            Err(error) => SpecOutcome {
                id: self.id.clone(),
                value: value.to_string(),
                error: Some(error.format_message()),
                code: error.code.as_i32(),
                found: error.found,
            },
        }
    }
}

impl fmt::Debug for StringSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringSpec")
            .field("id", &self.id)
            .field("trim", &self.trim)
            .field("validators", &self.validators)
            .finish()
    }
}

/// A spec backed by a closure, for hosts that already own validation logic.
pub struct FnSpec<F> {
    id: String,
    validate: F,
}

impl<F> FnSpec<F>
where
    F: Fn(&str) -> SpecOutcome,
{
    #[must_use]
    pub fn new(id: impl Into<String>, validate: F) -> Self {
        Self {
            id: id.into(),
            validate,
        }
    }
}

impl<F> Spec for FnSpec<F>
where
    F: Fn(&str) -> SpecOutcome,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self, value: &str) -> SpecOutcome {
        (self.validate)(value)
    }
}

impl<F> fmt::Debug for FnSpec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSpec").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{ErrorCode, MaxLength};

    #[test]
    fn empty_spec_passes_everything() {
        let spec = StringSpec::new("any");
        let outcome = spec.validate(" raw ");
        assert_eq!(outcome, SpecOutcome::ok("any", " raw "));
        assert_eq!(outcome.code, 0);
    }

    #[test]
    fn failure_maps_code_message_and_found() {
        let spec = StringSpec::new("name").rules(|r| r.required().max_length(3));
        let outcome = spec.validate("abcd");
        assert_eq!(outcome.id, "name");
        assert_eq!(outcome.value, "abcd");
        assert_eq!(outcome.error.as_deref(), Some("Must be at most 3 characters"));
        assert_eq!(outcome.code, ErrorCode::TooLong.as_i32());
        assert_eq!(outcome.found.as_deref(), Some("4"));
    }

    #[test]
    fn first_failure_wins() {
        let spec = StringSpec::new("name").rules(|r| r.required().min_length(3));
        assert_eq!(spec.validate("").code, ErrorCode::Required.as_i32());
        assert_eq!(spec.validate("").found, None);
    }

    #[test]
    fn trim_happens_before_checks() {
        let spec = StringSpec::new("n")
            .trim()
            .with_validators(ValidatorBuilder::new().custom(MaxLength::new(2)).build());
        let outcome = spec.validate("  ab  ");
        assert!(outcome.is_ok());
        assert_eq!(outcome.value, "ab");
    }

    #[test]
    fn fn_spec_delegates() {
        let spec = FnSpec::new("upper", |value: &str| {
            if value.chars().all(char::is_uppercase) {
                SpecOutcome::ok("upper", value)
            } else {
                SpecOutcome {
                    id: "upper".into(),
                    value: value.into(),
                    error: Some("Uppercase only".into()),
                    code: 99,
                    found: None,
                }
            }
        });
        assert_eq!(spec.id(), "upper");
        assert!(spec.validate("ABC").is_ok());
        assert_eq!(spec.validate("aBC").code, 99);
    }

    #[test]
    fn references_and_boxes_are_specs() {
        let spec = StringSpec::new("x").rules(|r| r.required());
        let by_ref: &dyn Spec = &spec;
        assert_eq!(Spec::id(&by_ref), "x");
        let boxed: Box<dyn Spec> = Box::new(StringSpec::new("y"));
        assert!(boxed.validate("").is_ok());
    }
}
