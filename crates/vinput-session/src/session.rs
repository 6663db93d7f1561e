#![forbid(unsafe_code)]

//! Sessions: event sequencing, lifecycle and the control surface.
//!
//! A session is created by [`use_valid_input`] and handed out as two
//! handles over the same state:
//!
//! - [`Attributes`]: what the host wires to its input element (the element
//!   binding plus the focus/blur/key handlers).
//! - [`Control`]: imperative `focus` and `set_value` for code outside the
//!   element.
//!
//! Every handler derives a fresh [`ValidationState`] and then notifies the
//! observers synchronously: `on_done` first when the result is entered,
//! then `on_validate`. No borrow of the session is held while observers
//! run, so they may drive the [`Control`] again.
//!
//! # Event table
//!
//! | Event | Before deriving | Context |
//! |-------|-----------------|---------|
//! | focus | persist touched (unless touched-on-change) | touched |
//! | blur | trim if `trim_on_blur` | entered |
//! | key down Tab | trim non-empty value if `trim_on_blur` | entered, key Tab |
//! | key up Enter | trim if `trim_on_blur` | entered, key |
//! | key up Escape | blur the element | entered, key |
//! | key up other | nothing | key |
//!
//! Hosts that never report key releases (most terminals without keyboard
//! enhancement) route keys through [`Attributes::on_key_press`] instead.
//!
//! Trimming strips Unicode whitespace and the byte order mark (U+FEFF).

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use vinput_core::{InputElement, KeyCode, KeyEvent, KeyEventKind};
use vinput_spec::Spec;

use crate::defaults::{self, SettingsStore};
use crate::derive::{EventContext, ValidationState, derive_validation};
use crate::settings::{Callback, Settings, SettingsPatch, resolve};

struct SessionState<S, E> {
    spec: S,
    settings: Settings,
    element: Option<E>,
    /// Persisted by focus events; unused in touched-on-change mode.
    touched: bool,
    validation: ValidationState,
}

impl<S: Spec, E: InputElement> SessionState<S, E> {
    fn derive(&self, ctx: &EventContext) -> ValidationState {
        let raw = self.element.as_ref().map(InputElement::value);
        let focused = self.element.as_ref().is_some_and(InputElement::is_focused);
        derive_validation(
            &self.spec,
            raw.as_deref(),
            &self.settings,
            self.touched,
            focused,
            ctx,
        )
    }

    fn trim_value(&mut self) {
        if let Some(element) = self.element.as_mut() {
            let value = element.value();
            let trimmed = trim_input(&value);
            if trimmed.len() != value.len() {
                element.set_value(trimmed);
            }
        }
    }

    fn value_is_empty(&self) -> bool {
        self.element
            .as_ref()
            .is_none_or(|element| element.value().is_empty())
    }
}

/// Strip leading and trailing whitespace, including U+FEFF, which
/// `str::trim` keeps.
fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

type Shared<S, E> = Rc<RefCell<SessionState<S, E>>>;

struct Dispatch {
    validation: ValidationState,
    on_validate: Callback,
    on_done: Callback,
}

impl Dispatch {
    fn run(self) {
        if self.validation.entered {
            (self.on_done)(&self.validation);
        }
        (self.on_validate)(&self.validation);
    }
}

/// Derive with `ctx`, store the result, and notify observers with the
/// session borrow released.
fn revalidate<S, E>(state: &Shared<S, E>, ctx: EventContext) -> ValidationState
where
    S: Spec,
    E: InputElement,
{
    let dispatch = {
        let mut s = state.borrow_mut();
        let validation = s.derive(&ctx);
        s.validation = validation.clone();
        Dispatch {
            validation,
            on_validate: Rc::clone(&s.settings.on_validate),
            on_done: Rc::clone(&s.settings.on_done),
        }
    };
    let result = dispatch.validation.clone();
    dispatch.run();
    result
}

/// Create a session using the process-wide default settings.
///
/// Returns the initial validation state together with the element-facing
/// [`Attributes`] and the imperative [`Control`].
///
/// ```rust
/// use vinput_core::{KeyCode, KeyEvent, MemoryInput};
/// use vinput_session::{SettingsPatch, use_valid_input};
/// use vinput_spec::StringSpec;
///
/// let spec = StringSpec::new("name").rules(|r| r.required());
/// let (initial, attrs, _control) = use_valid_input(spec, SettingsPatch::new());
/// assert!(!initial.valid);
///
/// attrs.mount(MemoryInput::new());
/// attrs.on_focus();
/// attrs.with_element_mut(|input| input.type_text(" Ada "));
/// let done = attrs.on_key_up(&KeyEvent::new(KeyCode::Enter));
/// assert!(done.entered);
/// assert_eq!(done.validated_value, "Ada");
/// ```
pub fn use_valid_input<S, E>(
    spec: S,
    settings: SettingsPatch,
) -> (ValidationState, Attributes<S, E>, Control<S, E>)
where
    S: Spec,
    E: InputElement,
{
    use_valid_input_with(spec, settings, defaults::global())
}

/// Create a session resolving defaults from an explicit store.
pub fn use_valid_input_with<S, E>(
    spec: S,
    settings: SettingsPatch,
    store: &SettingsStore,
) -> (ValidationState, Attributes<S, E>, Control<S, E>)
where
    S: Spec,
    E: InputElement,
{
    let settings = resolve(&settings, spec.id(), &store.snapshot());
    tracing::debug!(settings = ?settings, "session created");
    let mut state = SessionState {
        spec,
        settings,
        element: None,
        touched: false,
        validation: ValidationState::default(),
    };
    state.validation = state.derive(&EventContext::none());
    let initial = state.validation.clone();
    let shared = Rc::new(RefCell::new(state));
    (
        initial,
        Attributes {
            state: Rc::clone(&shared),
        },
        Control { state: shared },
    )
}

/// Element binding and event handlers of a session.
pub struct Attributes<S, E> {
    state: Shared<S, E>,
}

impl<S, E> Clone for Attributes<S, E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S, E> fmt::Debug for Attributes<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attributes")
            .field("settings", &self.state.borrow().settings)
            .finish_non_exhaustive()
    }
}

impl<S: Spec, E: InputElement> Attributes<S, E> {
    /// Bind the element and run the mount effect.
    ///
    /// Seeds the element with the initial value, focuses it when the
    /// settings ask for it, then notifies observers with the current result.
    /// A session mounts once; later calls are ignored and hand the element
    /// back.
    pub fn mount(&self, mut element: E) -> Option<E> {
        let dispatch = {
            let mut s = self.state.borrow_mut();
            if s.element.is_some() {
                tracing::warn!(id = %s.settings.id, "session already mounted, ignoring element");
                return Some(element);
            }
            element.set_value(&s.settings.initial_value);
            if s.settings.focus {
                element.focus();
            }
            s.element = Some(element);
            tracing::debug!(id = %s.settings.id, focus = s.settings.focus, "session mounted");
            Dispatch {
                validation: s.validation.clone(),
                on_validate: Rc::clone(&s.settings.on_validate),
                on_done: Rc::clone(&s.settings.on_done),
            }
        };
        dispatch.run();
        None
    }

    /// Whether an element is bound.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().element.is_some()
    }

    /// Borrow the bound element.
    ///
    /// Drop the returned guard before calling any handler or [`Control`]
    /// method; they borrow the session mutably and panic while it is held.
    #[must_use]
    pub fn element(&self) -> Option<Ref<'_, E>> {
        Ref::filter_map(self.state.borrow(), |s| s.element.as_ref()).ok()
    }

    /// Mutate the bound element, e.g. to apply typed text.
    ///
    /// This does not validate; the host follows up with the matching key
    /// event. The session is borrowed for the duration of `f`, so `f` must
    /// not call handlers or [`Control`] methods.
    pub fn with_element_mut<R>(&self, f: impl FnOnce(&mut E) -> R) -> Option<R> {
        self.state.borrow_mut().element.as_mut().map(f)
    }

    /// Latest validation state.
    #[must_use]
    pub fn validation(&self) -> ValidationState {
        self.state.borrow().validation.clone()
    }

    /// The element gained focus.
    pub fn on_focus(&self) -> ValidationState {
        let _span = tracing::debug_span!("input_event", event = "focus").entered();
        {
            let mut s = self.state.borrow_mut();
            if !s.settings.touched_on_change {
                s.touched = true;
            }
        }
        revalidate(&self.state, EventContext::focus())
    }

    /// The element lost focus.
    pub fn on_blur(&self) -> ValidationState {
        let _span = tracing::debug_span!("input_event", event = "blur").entered();
        {
            let mut s = self.state.borrow_mut();
            if s.settings.trim_on_blur {
                s.trim_value();
            }
        }
        revalidate(&self.state, EventContext::commit())
    }

    /// A key went down. Only Tab is handled here, since focus moves away
    /// before its key-up would arrive.
    pub fn on_key_down(&self, key: &KeyEvent) -> Option<ValidationState> {
        if !key.is_tab() {
            return None;
        }
        let _span = tracing::debug_span!("input_event", event = "key_down", key = %key.code).entered();
        {
            let mut s = self.state.borrow_mut();
            if s.settings.trim_on_blur && !s.value_is_empty() {
                s.trim_value();
            }
        }
        Some(revalidate(
            &self.state,
            EventContext::commit().with_key(KeyCode::Tab),
        ))
    }

    /// A key came up. Enter and Escape commit; Escape also gives up focus.
    pub fn on_key_up(&self, key: &KeyEvent) -> ValidationState {
        let _span = tracing::debug_span!("input_event", event = "key_up", key = %key.code).entered();
        let mut ctx = EventContext::none().with_key(key.code.clone());
        if key.is_enter() || key.is_escape() {
            ctx = ctx.with_entered(true);
        }
        {
            let mut s = self.state.borrow_mut();
            if key.is_enter() {
                if s.settings.trim_on_blur {
                    s.trim_value();
                }
            } else if key.is_escape()
                && let Some(element) = s.element.as_mut()
            {
                element.blur();
            }
        }
        revalidate(&self.state, ctx)
    }

    /// Route a key event by kind: press and repeat go to
    /// [`on_key_down`](Self::on_key_down), release to
    /// [`on_key_up`](Self::on_key_up).
    ///
    /// Only for hosts that report releases. Elsewhere Enter and Escape would
    /// never commit; use [`on_key_press`](Self::on_key_press) there.
    pub fn on_key_event(&self, key: &KeyEvent) -> Option<ValidationState> {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.on_key_down(key),
            KeyEventKind::Release => Some(self.on_key_up(key)),
        }
    }

    /// Handle a key on a host that only reports presses.
    ///
    /// Tab runs the key-down path, since focus leaves with it. Every other
    /// key runs the key-up path, so typed text re-validates and Enter and
    /// Escape commit. The event kind is ignored.
    pub fn on_key_press(&self, key: &KeyEvent) -> ValidationState {
        self.on_key_down(key).unwrap_or_else(|| self.on_key_up(key))
    }
}

/// Imperative access to a session.
pub struct Control<S, E> {
    state: Shared<S, E>,
}

impl<S, E> Clone for Control<S, E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S, E> fmt::Debug for Control<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("settings", &self.state.borrow().settings)
            .finish_non_exhaustive()
    }
}

impl<S: Spec, E: InputElement> Control<S, E> {
    /// Move focus to the element. No-op before mount.
    pub fn focus(&self) {
        match self.state.borrow_mut().element.as_mut() {
            Some(element) => element.focus(),
            None => tracing::debug!("focus requested before mount"),
        }
    }

    /// Write the raw value and re-derive without a key or entered signal.
    ///
    /// Focuses the element first when `focus_on_set_value` is set. Returns
    /// `None` before mount, when there is no element to write to.
    pub fn set_value(&self, value: &str) -> Option<ValidationState> {
        let _span = tracing::debug_span!("input_event", event = "set_value").entered();
        {
            let mut s = self.state.borrow_mut();
            let focus = s.settings.focus_on_set_value;
            let Some(element) = s.element.as_mut() else {
                tracing::debug!("set_value requested before mount");
                return None;
            };
            element.set_value(value);
            if focus {
                element.focus();
            }
        }
        Some(revalidate(&self.state, EventContext::none()))
    }

    /// Current raw value, or the initial value before mount.
    #[must_use]
    pub fn value(&self) -> String {
        let s = self.state.borrow();
        s.element
            .as_ref()
            .map_or_else(|| s.settings.initial_value.clone(), InputElement::value)
    }

    /// Latest validation state.
    #[must_use]
    pub fn validation(&self) -> ValidationState {
        self.state.borrow().validation.clone()
    }

    /// The resolved settings of this session.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.state.borrow().settings.clone()
    }
}
