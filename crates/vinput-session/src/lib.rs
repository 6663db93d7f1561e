#![forbid(unsafe_code)]

//! Validation sessions for one text input.
//!
//! A session owns a [`Spec`](vinput_spec::Spec), a bound
//! [`InputElement`](vinput_core::InputElement) and the settings resolved
//! when it was created. Host events (focus, blur, key down/up) and the
//! imperative [`Control`] each produce a fresh [`ValidationState`], which is
//! handed to the `on_done` and `on_validate` observers.
//!
//! Defaults come from a [`SettingsStore`]; the process-wide one is adjusted
//! with [`init`] or [`init_from_env`].

pub mod config;
pub mod defaults;
pub mod derive;
pub mod session;
pub mod settings;

pub use config::{ConfigError, Result, init_from_env};
pub use defaults::{DefaultSettings, DefaultsPatch, SettingsStore, global, init};
pub use derive::{EventContext, ValidationState, derive_validation};
pub use session::{Attributes, Control, use_valid_input, use_valid_input_with};
pub use settings::{Callback, Settings, SettingsPatch, resolve};
