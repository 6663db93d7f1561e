#![forbid(unsafe_code)]

//! Default settings and the store sessions snapshot them from.
//!
//! There is one process-wide store ([`global`]), written at startup through
//! [`init`], and any number of injectable [`SettingsStore`] handles for hosts
//! that keep configuration out of globals. Either way a session copies the
//! defaults when it is created; later overrides never reach it.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Behavioral defaults shared by every session created from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSettings {
    /// Value seeded into the element at mount; also the "unchanged" baseline.
    pub initial_value: String,
    /// Focus the element at mount.
    pub focus: bool,
    /// Focus the element after a programmatic `set_value`.
    pub focus_on_set_value: bool,
    /// Derive `touched` from `changed` instead of from focus history.
    pub touched_on_change: bool,
    /// Trim the value on blur, Tab and Enter.
    pub trim_on_blur: bool,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            initial_value: String::new(),
            focus: false,
            focus_on_set_value: true,
            touched_on_change: false,
            trim_on_blur: true,
        }
    }
}

impl DefaultSettings {
    /// Overlay a patch: present fields win, absent fields keep `self`.
    #[must_use]
    pub fn merged(&self, patch: &DefaultsPatch) -> Self {
        Self {
            initial_value: patch
                .initial_value
                .clone()
                .unwrap_or_else(|| self.initial_value.clone()),
            focus: patch.focus.unwrap_or(self.focus),
            focus_on_set_value: patch.focus_on_set_value.unwrap_or(self.focus_on_set_value),
            touched_on_change: patch.touched_on_change.unwrap_or(self.touched_on_change),
            trim_on_blur: patch.trim_on_blur.unwrap_or(self.trim_on_blur),
        }
    }
}

/// A partial set of defaults. `None` means "keep what is there".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct DefaultsPatch {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub initial_value: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub focus: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub focus_on_set_value: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub touched_on_change: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub trim_on_blur: Option<bool>,
}

impl DefaultsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn focus(mut self, focus: bool) -> Self {
        self.focus = Some(focus);
        self
    }

    #[must_use]
    pub fn focus_on_set_value(mut self, enabled: bool) -> Self {
        self.focus_on_set_value = Some(enabled);
        self
    }

    #[must_use]
    pub fn touched_on_change(mut self, enabled: bool) -> Self {
        self.touched_on_change = Some(enabled);
        self
    }

    #[must_use]
    pub fn trim_on_blur(mut self, enabled: bool) -> Self {
        self.trim_on_blur = Some(enabled);
        self
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A shareable, writable home for [`DefaultSettings`].
///
/// Cloning the store clones the handle; all clones see the same defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<DefaultSettings>>,
}

impl SettingsStore {
    /// A store seeded with the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the given defaults.
    #[must_use]
    pub fn with_defaults(defaults: DefaultSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(defaults)),
        }
    }

    /// Copy of the current defaults.
    #[must_use]
    pub fn snapshot(&self) -> DefaultSettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overlay a patch onto the stored defaults.
    pub fn set_defaults(&self, patch: &DefaultsPatch) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.merged(patch);
        tracing::debug!(defaults = ?*guard, "default settings updated");
    }

    /// Restore the built-in defaults.
    pub fn reset(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = DefaultSettings::default();
    }
}

static GLOBAL_STORE: OnceLock<SettingsStore> = OnceLock::new();

/// The process-wide store used by [`use_valid_input`](crate::use_valid_input).
pub fn global() -> &'static SettingsStore {
    GLOBAL_STORE.get_or_init(SettingsStore::new)
}

/// Override process-wide defaults.
///
/// Call once at startup, before creating sessions; sessions that already
/// exist keep the defaults they were created with.
pub fn init(patch: DefaultsPatch) {
    global().set_defaults(&patch);
}
