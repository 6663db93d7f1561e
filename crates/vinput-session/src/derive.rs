#![forbid(unsafe_code)]

//! Validation derivation.
//!
//! [`derive_validation`] is the only place where the flags of a
//! [`ValidationState`] are computed. It is a pure function of its inputs:
//! the raw value, the session settings, the persisted touched flag, the
//! focus state and the [`EventContext`] of the triggering event.
//!
//! # Invariants
//!
//! 1. `valid == error.is_none()`
//! 2. `validated_value == if valid { value } else { "" }`
//! 3. `info_state == focused && !entered`
//! 4. `error_state == touched && error.is_some()`
//! 5. `entered` implies `changed`, and is false when the context never
//!    signalled entered
//! 6. With `touched_on_change`, `touched == changed`

use vinput_core::KeyCode;
use vinput_spec::Spec;

use crate::settings::Settings;

/// What the triggering event contributes to a derivation.
///
/// `entered` is three-way: `None` (the event says nothing about committing),
/// `Some(false)` and `Some(true)`. Only `Some(true)` can produce an entered
/// result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub key: Option<KeyCode>,
    pub entered: Option<bool>,
    pub touched: Option<bool>,
}

impl EventContext {
    /// Context of a programmatic change: no key, no entered signal.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            key: None,
            entered: None,
            touched: None,
        }
    }

    /// Context of a focus event.
    #[must_use]
    pub const fn focus() -> Self {
        Self::none().with_touched(true)
    }

    /// Context of a commit gesture without a key (blur).
    #[must_use]
    pub const fn commit() -> Self {
        Self::none().with_entered(true)
    }

    #[must_use]
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.key = Some(key);
        self
    }

    #[must_use]
    pub const fn with_entered(mut self, entered: bool) -> Self {
        self.entered = Some(entered);
        self
    }

    #[must_use]
    pub const fn with_touched(mut self, touched: bool) -> Self {
        self.touched = Some(touched);
        self
    }
}

/// The derived state exposed to the host. Always rebuilt whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    // From the spec.
    pub id: String,
    pub value: String,
    pub error: Option<String>,
    pub code: i32,
    pub found: Option<String>,

    // Derived.
    /// Key of the triggering event, if any.
    pub last_key: Option<KeyCode>,
    pub focused: bool,
    /// Raw value differs from the initial value.
    pub changed: bool,
    pub touched: bool,
    /// A commit gesture (blur, Tab, Enter, Escape) on a changed value.
    pub entered: bool,
    pub valid: bool,
    /// `value` when valid, otherwise empty.
    pub validated_value: String,
    /// Focused and not yet committed: show hints.
    pub info_state: bool,
    /// Touched and failing: show the error.
    pub error_state: bool,
}

/// Derive a full validation state.
///
/// `raw_value` is `None` when no element is bound yet; the initial value
/// stands in for it.
#[must_use]
pub fn derive_validation<S: Spec + ?Sized>(
    spec: &S,
    raw_value: Option<&str>,
    settings: &Settings,
    prior_touched: bool,
    is_focused: bool,
    ctx: &EventContext,
) -> ValidationState {
    let raw = raw_value.unwrap_or(settings.initial_value.as_str());
    let outcome = spec.validate(raw);

    let id = if settings.id.is_empty() {
        outcome.id
    } else {
        settings.id.clone()
    };
    let changed = raw != settings.initial_value;
    let touched = if settings.touched_on_change {
        changed
    } else {
        ctx.touched.unwrap_or(false) || prior_touched
    };
    let entered = ctx.entered.is_some_and(|entered| entered && changed);
    let valid = outcome.error.is_none();
    let validated_value = if valid {
        outcome.value.clone()
    } else {
        String::new()
    };
    let error_state = touched && !valid;

    tracing::trace!(
        id = %id,
        changed,
        touched,
        entered,
        valid,
        focused = is_focused,
        key = ?ctx.key,
        "derived validation"
    );

    ValidationState {
        id,
        value: outcome.value,
        error: outcome.error,
        code: outcome.code,
        found: outcome.found,
        last_key: ctx.key.clone(),
        focused: is_focused,
        changed,
        touched,
        entered,
        valid,
        validated_value,
        info_state: is_focused && !entered,
        error_state,
    }
}
