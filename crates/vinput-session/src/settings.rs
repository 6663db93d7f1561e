#![forbid(unsafe_code)]

//! Per-session settings and their resolution against the defaults.

use std::fmt;
use std::rc::Rc;

use crate::defaults::{DefaultSettings, DefaultsPatch};
use crate::derive::ValidationState;

/// Observer invoked with each new validation state.
pub type Callback = Rc<dyn Fn(&ValidationState)>;

fn noop() -> Callback {
    Rc::new(|_: &ValidationState| {})
}

/// Fully resolved, immutable settings of one session.
#[derive(Clone)]
pub struct Settings {
    /// Overrides the spec's id in every result when non-empty.
    pub id: String,
    pub initial_value: String,
    pub focus: bool,
    pub focus_on_set_value: bool,
    pub touched_on_change: bool,
    pub trim_on_blur: bool,
    /// Called for every new result.
    pub on_validate: Callback,
    /// Called for results with `entered == true`.
    pub on_done: Callback,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("id", &self.id)
            .field("initial_value", &self.initial_value)
            .field("focus", &self.focus)
            .field("focus_on_set_value", &self.focus_on_set_value)
            .field("touched_on_change", &self.touched_on_change)
            .field("trim_on_blur", &self.trim_on_blur)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// The behavioral part of these settings.
    #[must_use]
    pub fn behavior(&self) -> DefaultSettings {
        DefaultSettings {
            initial_value: self.initial_value.clone(),
            focus: self.focus,
            focus_on_set_value: self.focus_on_set_value,
            touched_on_change: self.touched_on_change,
            trim_on_blur: self.trim_on_blur,
        }
    }
}

/// Per-instance settings as supplied by the caller. Everything is optional.
///
/// ```rust
/// use vinput_session::SettingsPatch;
///
/// let settings = SettingsPatch::new()
///     .with_id("email")
///     .with_trim_on_blur(false)
///     .on_done(|result| println!("done: {}", result.validated_value));
/// ```
#[derive(Clone, Default)]
pub struct SettingsPatch {
    pub id: Option<String>,
    pub behavior: DefaultsPatch,
    pub on_validate: Option<Callback>,
    pub on_done: Option<Callback>,
}

impl SettingsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.behavior.initial_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_focus(mut self, focus: bool) -> Self {
        self.behavior.focus = Some(focus);
        self
    }

    #[must_use]
    pub fn with_focus_on_set_value(mut self, enabled: bool) -> Self {
        self.behavior.focus_on_set_value = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_touched_on_change(mut self, enabled: bool) -> Self {
        self.behavior.touched_on_change = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_trim_on_blur(mut self, enabled: bool) -> Self {
        self.behavior.trim_on_blur = Some(enabled);
        self
    }

    /// Replace all behavioral overrides at once.
    #[must_use]
    pub fn with_behavior(mut self, behavior: DefaultsPatch) -> Self {
        self.behavior = behavior;
        self
    }

    #[must_use]
    pub fn on_validate(mut self, callback: impl Fn(&ValidationState) + 'static) -> Self {
        self.on_validate = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn on_done(mut self, callback: impl Fn(&ValidationState) + 'static) -> Self {
        self.on_done = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for SettingsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsPatch")
            .field("id", &self.id)
            .field("behavior", &self.behavior)
            .field("on_validate", &self.on_validate.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}

impl From<DefaultsPatch> for SettingsPatch {
    fn from(behavior: DefaultsPatch) -> Self {
        Self::new().with_behavior(behavior)
    }
}

/// Resolve per-instance settings against a defaults snapshot.
///
/// Instance values win; behavioral fields fall back to `defaults`, `id` falls
/// back to `spec_id`, callbacks fall back to no-ops. Never fails.
#[must_use]
pub fn resolve(patch: &SettingsPatch, spec_id: &str, defaults: &DefaultSettings) -> Settings {
    let behavior = defaults.merged(&patch.behavior);
    Settings {
        id: patch.id.clone().unwrap_or_else(|| spec_id.to_string()),
        initial_value: behavior.initial_value,
        focus: behavior.focus,
        focus_on_set_value: behavior.focus_on_set_value,
        touched_on_change: behavior.touched_on_change,
        trim_on_blur: behavior.trim_on_blur,
        on_validate: patch.on_validate.clone().unwrap_or_else(noop),
        on_done: patch.on_done.clone().unwrap_or_else(noop),
    }
}
