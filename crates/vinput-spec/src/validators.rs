#![forbid(unsafe_code)]

//! Composable string validators.

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Stable error kinds reported by the built-in validators.
///
/// The numeric form is what a [`SpecOutcome`](crate::SpecOutcome) carries in
/// its `code` field; `0` is reserved for "no error".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Required,
    TooShort,
    TooLong,
    Pattern,
    Email,
    Url,
    NotANumber,
    OutOfRange,
    NotAllowed,
    Negated,
    /// Application-defined code for custom validators.
    Custom(i32),
}

impl ErrorCode {
    /// Numeric code, never `0`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Required => 1,
            Self::TooShort => 2,
            Self::TooLong => 3,
            Self::Pattern => 4,
            Self::Email => 5,
            Self::Url => 6,
            Self::NotANumber => 7,
            Self::OutOfRange => 8,
            Self::NotAllowed => 9,
            Self::Negated => 10,
            Self::Custom(code) => code,
        }
    }

    /// Short identifier for i18n lookup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::Url => "url",
            Self::NotANumber => "not_a_number",
            Self::OutOfRange => "range",
            Self::NotAllowed => "not_allowed",
            Self::Negated => "not",
            Self::Custom(_) => "custom",
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A failed check: error kind, message template and interpolation params.
///
/// `found` holds the measured value that caused the failure (a length, a
/// parsed number) when the validator has one.
///
/// ```rust
/// use vinput_spec::{ErrorCode, ValidationError};
///
/// let error = ValidationError::new(ErrorCode::TooShort, "Must be at least {min} characters")
///     .with_param("min", 8)
///     .with_found(3);
///
/// assert_eq!(error.format_message(), "Must be at least 8 characters");
/// assert_eq!(error.found.as_deref(), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: ErrorCode,
    /// Message template, `{key}` placeholders are filled from `params`.
    pub message: String,
    pub params: BTreeMap<String, String>,
    pub found: Option<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: BTreeMap::new(),
            found: None,
        }
    }

    /// Add a parameter for message interpolation.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Record the offending measured value.
    #[must_use]
    pub fn with_found(mut self, found: impl ToString) -> Self {
        let found = found.to_string();
        self.params.insert("found".to_string(), found.clone());
        self.found = Some(found);
        self
    }

    /// Format the message with parameter substitution.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a single validator.
pub type ValidationResult = Result<(), ValidationError>;

// ---------------------------------------------------------------------------
// Validator trait
// ---------------------------------------------------------------------------

/// A check over a string value.
///
/// Validators are composable with [`And`], [`Or`], [`Not`] and [`All`].
///
/// ```rust
/// use vinput_spec::{ErrorCode, ValidationError, ValidationResult, Validator};
///
/// struct NoSpaces;
///
/// impl Validator for NoSpaces {
///     fn validate(&self, value: &str) -> ValidationResult {
///         if value.contains(' ') {
///             Err(ValidationError::new(ErrorCode::Custom(100), "No spaces allowed"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NoSpaces.validate("a b").is_err());
/// ```
pub trait Validator {
    fn validate(&self, value: &str) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationResult,
{
    fn validate(&self, value: &str) -> ValidationResult {
        self(value)
    }
}

// ---------------------------------------------------------------------------
// Built-in validators
// ---------------------------------------------------------------------------

/// Rejects empty values. Whitespace-only counts as empty unless allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required {
    pub allow_whitespace: bool,
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept whitespace-only values.
    #[must_use]
    pub fn allow_whitespace(mut self) -> Self {
        self.allow_whitespace = true;
        self
    }
}

impl Validator for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        let empty = if self.allow_whitespace {
            value.is_empty()
        } else {
            value.trim().is_empty()
        };
        if empty {
            Err(ValidationError::new(
                ErrorCode::Required,
                "This field is required",
            ))
        } else {
            Ok(())
        }
    }
}

/// At least `min` characters (Unicode scalar values).
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    pub min: usize,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        if len < self.min {
            Err(
                ValidationError::new(ErrorCode::TooShort, "Must be at least {min} characters")
                    .with_param("min", self.min)
                    .with_found(len),
            )
        } else {
            Ok(())
        }
    }
}

/// At most `max` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    pub max: usize,
}

impl MaxLength {
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator for MaxLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        if len > self.max {
            Err(
                ValidationError::new(ErrorCode::TooLong, "Must be at most {max} characters")
                    .with_param("max", self.max)
                    .with_found(len),
            )
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternMode {
    Contains,
    Exact,
    Prefix,
    Suffix,
}

/// Literal pattern match (no regex engine).
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    mode: PatternMode,
    message: String,
}

impl Pattern {
    fn with_mode(pattern: impl Into<String>, mode: PatternMode) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
            message: "Invalid format".to_string(),
        }
    }

    #[must_use]
    pub fn contains(pattern: impl Into<String>) -> Self {
        Self::with_mode(pattern, PatternMode::Contains)
    }

    #[must_use]
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self::with_mode(pattern, PatternMode::Exact)
    }

    #[must_use]
    pub fn prefix(pattern: impl Into<String>) -> Self {
        Self::with_mode(pattern, PatternMode::Prefix)
    }

    #[must_use]
    pub fn suffix(pattern: impl Into<String>) -> Self {
        Self::with_mode(pattern, PatternMode::Suffix)
    }

    /// Set a custom error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for Pattern {
    fn validate(&self, value: &str) -> ValidationResult {
        let matches = match self.mode {
            PatternMode::Contains => value.contains(&self.pattern),
            PatternMode::Exact => value == self.pattern,
            PatternMode::Prefix => value.starts_with(&self.pattern),
            PatternMode::Suffix => value.ends_with(&self.pattern),
        };
        if matches {
            Ok(())
        } else {
            Err(ValidationError::new(ErrorCode::Pattern, &self.message))
        }
    }
}

/// Heuristic email check: `local@domain.tld`. Empty values pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_valid(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        let mut labels = domain.split('.').peekable();
        let mut count = 0;
        let mut tld_len = 0;
        while let Some(label) = labels.next() {
            if label.is_empty() {
                return false;
            }
            count += 1;
            if labels.peek().is_none() {
                tld_len = label.chars().count();
            }
        }
        count >= 2 && tld_len >= 2
    }
}

impl Validator for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();
        if trimmed.is_empty() || Self::is_valid(trimmed) {
            Ok(())
        } else {
            Err(ValidationError::new(ErrorCode::Email, "Invalid email address"))
        }
    }
}

/// `http://` or `https://` URL with a non-empty remainder. Empty values pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Url {
    pub require_https: bool,
}

impl Url {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require HTTPS URLs only.
    #[must_use]
    pub fn require_https(mut self) -> Self {
        self.require_https = true;
        self
    }
}

impl Validator for Url {
    fn validate(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let rest = trimmed.strip_prefix("https://").or_else(|| {
            if self.require_https {
                None
            } else {
                trimmed.strip_prefix("http://")
            }
        });
        match rest {
            Some(rest) if !rest.is_empty() => Ok(()),
            _ => {
                let message = if self.require_https {
                    "Invalid URL (must use HTTPS)"
                } else {
                    "Invalid URL"
                };
                Err(ValidationError::new(ErrorCode::Url, message))
            }
        }
    }
}

/// Integer within an inclusive range. Empty values pass.
#[derive(Debug, Clone, Copy)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    #[must_use]
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Validator for IntRange {
    fn validate(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let Ok(number) = trimmed.parse::<i64>() else {
            return Err(
                ValidationError::new(ErrorCode::NotANumber, "Must be a whole number")
                    .with_found(trimmed),
            );
        };
        if (self.min..=self.max).contains(&number) {
            Ok(())
        } else {
            Err(
                ValidationError::new(ErrorCode::OutOfRange, "Must be between {min} and {max}")
                    .with_param("min", self.min)
                    .with_param("max", self.max)
                    .with_found(number),
            )
        }
    }
}

/// Value must be one of a fixed set of options.
#[derive(Debug, Clone)]
pub struct OneOf {
    options: Vec<String>,
    case_sensitive: bool,
}

impl OneOf {
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            case_sensitive: true,
        }
    }

    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.case_sensitive = false;
        self
    }
}

impl Validator for OneOf {
    fn validate(&self, value: &str) -> ValidationResult {
        let hit = self.options.iter().any(|option| {
            if self.case_sensitive {
                option == value
            } else {
                option.to_lowercase() == value.to_lowercase()
            }
        });
        if hit {
            Ok(())
        } else {
            Err(
                ValidationError::new(ErrorCode::NotAllowed, "Must be one of: {options}")
                    .with_param("options", self.options.join(", "))
                    .with_found(value),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Both validators must pass; the first failure wins.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> And<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Validator, B: Validator> Validator for And<A, B> {
    fn validate(&self, value: &str) -> ValidationResult {
        self.first.validate(value)?;
        self.second.validate(value)
    }
}

/// At least one validator must pass; reports the second failure.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Or<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Validator, B: Validator> Validator for Or<A, B> {
    fn validate(&self, value: &str) -> ValidationResult {
        self.first.validate(value).or_else(|_| self.second.validate(value))
    }
}

/// Inverts a validator.
#[derive(Debug, Clone)]
pub struct Not<V> {
    pub inner: V,
    pub message: String,
}

impl<V> Not<V> {
    #[must_use]
    pub fn new(inner: V, message: impl Into<String>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }
}

impl<V: Validator> Validator for Not<V> {
    fn validate(&self, value: &str) -> ValidationResult {
        match self.inner.validate(value) {
            Ok(()) => Err(ValidationError::new(ErrorCode::Negated, &self.message)),
            Err(_) => Ok(()),
        }
    }
}

/// Ordered chain; the first failing validator wins.
#[derive(Default)]
pub struct All {
    validators: Vec<Box<dyn Validator>>,
}

impl All {
    #[must_use]
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for All {
    fn validate(&self, value: &str) -> ValidationResult {
        self.validators.iter().try_for_each(|v| v.validate(value))
    }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field("validators", &format!("[{} validators]", self.validators.len()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ValidatorBuilder
// ---------------------------------------------------------------------------

/// Fluent builder producing an [`All`] chain.
///
/// ```rust
/// use vinput_spec::{Validator, ValidatorBuilder};
///
/// let validator = ValidatorBuilder::new()
///     .required()
///     .min_length(3)
///     .max_length(20)
///     .build();
///
/// assert!(validator.validate("alice").is_ok());
/// assert!(validator.validate("ab").is_err());
/// ```
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    chain: All,
}

impl ValidatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any validator.
    #[must_use]
    pub fn custom(mut self, validator: impl Validator + 'static) -> Self {
        self.chain.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.custom(Required::new())
    }

    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.custom(MinLength::new(min))
    }

    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.custom(MaxLength::new(max))
    }

    #[must_use]
    pub fn email(self) -> Self {
        self.custom(Email::new())
    }

    #[must_use]
    pub fn url(self) -> Self {
        self.custom(Url::new())
    }

    #[must_use]
    pub fn int_range(self, min: i64, max: i64) -> Self {
        self.custom(IntRange::new(min, max))
    }

    #[must_use]
    pub fn contains(self, pattern: impl Into<String>) -> Self {
        self.custom(Pattern::contains(pattern))
    }

    #[must_use]
    pub fn build(self) -> All {
        self.chain
    }
}
