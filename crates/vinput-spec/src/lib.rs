#![forbid(unsafe_code)]

//! String specs with composable validators.
//!
//! This crate provides the validation half of vinput:
//! - A [`Validator`] trait, with closures implementing it directly
//! - Built-in validators for common string checks (required, length, email, URL, integer range)
//! - Composition (`And`, `Or`, `Not`, `All`) and a fluent [`ValidatorBuilder`]
//! - [`StringSpec`], which packages an id and a validator chain behind the [`Spec`] contract
//!
//! # Example
//!
//! ```rust
//! use vinput_spec::{Spec, StringSpec};
//!
//! let email = StringSpec::new("email").trim().rules(|r| r.required().email());
//!
//! assert!(email.validate(" user@example.com ").is_ok());
//! assert!(!email.validate("user@").is_ok());
//! ```

pub mod spec;
mod validators;

pub use spec::{FnSpec, Spec, SpecOutcome, StringSpec};
pub use validators::{
    All, And, Email, ErrorCode, IntRange, MaxLength, MinLength, Not, OneOf, Or, Pattern,
    Required, Url, ValidationError, ValidationResult, Validator, ValidatorBuilder,
};
