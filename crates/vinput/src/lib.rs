#![forbid(unsafe_code)]

//! vinput public facade crate.
//!
//! Tracks the validation state of one text input across focus, typing,
//! commit keys and programmatic changes. This crate re-exports the stable
//! surface of the internal crates and offers a prelude.
//!
//! ```rust
//! use vinput::prelude::*;
//!
//! let spec = StringSpec::new("email").rules(|r| r.required().email());
//! let (_, attrs, control) = use_valid_input(spec, SettingsPatch::new().with_id("contact"));
//! attrs.mount(MemoryInput::new());
//!
//! let result = control.set_value("ada@example.com").unwrap_or_default();
//! assert!(result.valid);
//! assert_eq!(result.id, "contact");
//! ```

// --- Core re-exports -------------------------------------------------------

pub use vinput_core::{InputElement, KeyCode, KeyEvent, KeyEventKind, MemoryInput, Modifiers};

// --- Spec re-exports -------------------------------------------------------

pub use vinput_spec::{
    All, And, Email, ErrorCode, FnSpec, IntRange, MaxLength, MinLength, Not, OneOf, Or, Pattern,
    Required, Spec, SpecOutcome, StringSpec, Url, ValidationError, ValidationResult, Validator,
    ValidatorBuilder,
};

// --- Session re-exports ----------------------------------------------------

pub use vinput_session::{
    Attributes, Callback, Control, DefaultSettings, DefaultsPatch, EventContext, Settings,
    SettingsPatch, SettingsStore, ValidationState, derive_validation, init, init_from_env,
    resolve, use_valid_input, use_valid_input_with,
};

// --- Errors ---------------------------------------------------------------

/// Error type for fallible vinput setup.
pub use vinput_session::ConfigError as Error;

/// Standard result type for vinput APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Attributes, Control, DefaultsPatch, Error, InputElement, KeyCode, KeyEvent, MemoryInput,
        Result, SettingsPatch, Spec, StringSpec, ValidationState, Validator, init,
        use_valid_input,
    };

    pub use crate::{core, session, spec};
}

pub use vinput_core as core;
pub use vinput_session as session;
pub use vinput_spec as spec;
