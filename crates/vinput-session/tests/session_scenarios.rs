//! End-to-end session scenarios driven through `Attributes` and `Control`.
//!
//! Every test uses its own `SettingsStore` so the process-wide defaults stay
//! untouched.

use std::cell::RefCell;
use std::rc::Rc;

use vinput_core::{InputElement, KeyCode, KeyEvent, KeyEventKind, MemoryInput};
use vinput_session::{
    Attributes, Control, DefaultsPatch, SettingsPatch, SettingsStore, ValidationState,
    use_valid_input_with,
};
use vinput_spec::{FnSpec, SpecOutcome, StringSpec};

type Attrs = Attributes<StringSpec, MemoryInput>;
type Ctrl = Control<StringSpec, MemoryInput>;

fn email_spec() -> StringSpec {
    StringSpec::new("email").rules(|r| r.required().email())
}

fn mounted(patch: SettingsPatch, store: &SettingsStore) -> (Attrs, Ctrl) {
    let (_, attrs, control) = use_valid_input_with(email_spec(), patch, store);
    attrs.mount(MemoryInput::new());
    (attrs, control)
}

/// Records `(callback, entered, value)` in call order.
fn recorder(patch: SettingsPatch) -> (SettingsPatch, Rc<RefCell<Vec<(&'static str, bool, String)>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let on_validate = Rc::clone(&log);
    let on_done = Rc::clone(&log);
    let patch = patch
        .on_validate(move |v: &ValidationState| {
            on_validate
                .borrow_mut()
                .push(("validate", v.entered, v.value.clone()));
        })
        .on_done(move |v: &ValidationState| {
            on_done.borrow_mut().push(("done", v.entered, v.value.clone()));
        });
    (patch, log)
}

#[test]
fn tab_with_content_trims_and_commits() {
    let (attrs, _) = mounted(SettingsPatch::new(), &SettingsStore::new());
    attrs.on_focus();
    attrs.with_element_mut(|e| e.type_text("  ada@example.com "));

    let v = attrs.on_key_down(&KeyEvent::new(KeyCode::Tab)).unwrap();
    assert_eq!(attrs.element().unwrap().value(), "ada@example.com");
    assert!(v.entered);
    assert!(v.valid);
    assert_eq!(v.last_key, Some(KeyCode::Tab));
    assert_eq!(v.validated_value, "ada@example.com");
}

#[test]
fn tab_on_unchanged_value_is_not_entered() {
    let (attrs, _) = mounted(SettingsPatch::new(), &SettingsStore::new());
    let v = attrs.on_key_down(&KeyEvent::new(KeyCode::Tab)).unwrap();
    assert!(!v.entered);
    assert!(!v.changed);
}

#[test]
fn escape_blurs_and_commits() {
    let (attrs, _) = mounted(SettingsPatch::new().with_focus(true), &SettingsStore::new());
    assert!(attrs.element().unwrap().is_focused());
    attrs.with_element_mut(|e| e.type_text("bob@example.org"));

    let v = attrs.on_key_up(&KeyEvent::new(KeyCode::Escape));
    assert!(!attrs.element().unwrap().is_focused());
    assert!(v.entered);
    assert!(!v.focused);
    assert!(!v.info_state);
}

#[test]
fn escape_does_not_trim() {
    let (attrs, _) = mounted(SettingsPatch::new(), &SettingsStore::new());
    attrs.with_element_mut(|e| e.type_text(" x "));
    attrs.on_key_up(&KeyEvent::new(KeyCode::Escape));
    assert_eq!(attrs.element().unwrap().value(), " x ");
}

#[test]
fn browser_key_names_drive_key_up() {
    let (attrs, _) = mounted(SettingsPatch::new(), &SettingsStore::new());
    attrs.with_element_mut(|e| e.type_text("h@example.com"));
    for name in ["Shift", "Control", "CapsLock", "Dead", "Unidentified"] {
        let key = KeyEvent::from_key_name(name).unwrap();
        let v = attrs.on_key_up(&key);
        assert_eq!(v.last_key.map(|k| k.key_name()).as_deref(), Some(name));
        assert!(!v.entered);
        assert!(v.valid);
    }
}

#[test]
fn enter_trims_and_commits() {
    let (attrs, _) = mounted(SettingsPatch::new(), &SettingsStore::new());
    attrs.with_element_mut(|e| e.type_text(" cy@example.net\t"));
    let v = attrs.on_key_up(&KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release));
    assert_eq!(v.value, "cy@example.net");
    assert!(v.entered);
    assert_eq!(v.last_key, Some(KeyCode::Enter));
}

#[test]
fn programmatic_set_value() {
    let (attrs, control) = mounted(SettingsPatch::new(), &SettingsStore::new());
    let v = control.set_value("x").unwrap();
    assert_eq!(control.value(), "x");
    assert!(attrs.element().unwrap().is_focused());
    assert!(v.focused);
    assert!(!v.entered);
    assert!(v.changed);
    assert!(!v.valid);
    assert_eq!(v.last_key, None);
    assert_eq!(control.validation(), v);
}

#[test]
fn control_focus_moves_focus_only() {
    let (attrs, control) = mounted(SettingsPatch::new(), &SettingsStore::new());
    let before = attrs.validation();
    control.focus();
    assert!(attrs.element().unwrap().is_focused());
    assert_eq!(attrs.validation(), before);
}

#[test]
fn done_runs_before_validate_and_only_when_entered() {
    let (patch, log) = recorder(SettingsPatch::new());
    let (attrs, control) = mounted(patch, &SettingsStore::new());
    control.set_value("dee@example.com");
    attrs.on_blur();

    let log = log.borrow();
    assert_eq!(
        *log,
        vec![
            ("validate", false, String::new()),
            ("validate", false, "dee@example.com".to_string()),
            ("done", true, "dee@example.com".to_string()),
            ("validate", true, "dee@example.com".to_string()),
        ]
    );
}

#[test]
fn error_shows_only_once_touched() {
    let (attrs, control) = mounted(SettingsPatch::new(), &SettingsStore::new());
    let v = control.set_value("nope").unwrap();
    assert!(!v.valid);
    assert!(!v.error_state);
    assert!(v.error.is_some());
    assert_ne!(v.code, 0);

    let v = attrs.on_focus();
    assert!(v.touched);
    assert!(v.error_state);
}

#[test]
fn settings_id_overrides_spec_id() {
    let store = SettingsStore::new();
    let (initial, _, _) = use_valid_input_with::<_, MemoryInput>(
        email_spec(),
        SettingsPatch::new().with_id("contact"),
        &store,
    );
    assert_eq!(initial.id, "contact");
    let (initial, _, _) =
        use_valid_input_with::<_, MemoryInput>(email_spec(), SettingsPatch::new(), &store);
    assert_eq!(initial.id, "email");
}

#[test]
fn store_override_applies_to_new_sessions_only() {
    let store = SettingsStore::new();
    let (old, _) = mounted(SettingsPatch::new(), &store);
    store.set_defaults(&DefaultsPatch::new().trim_on_blur(false));
    let (new, _) = mounted(SettingsPatch::new(), &store);

    for attrs in [&old, &new] {
        attrs.with_element_mut(|e| e.type_text(" e@example.com "));
        attrs.on_blur();
    }
    assert_eq!(old.element().unwrap().value(), "e@example.com");
    assert_eq!(new.element().unwrap().value(), " e@example.com ");
}

#[test]
fn instance_setting_beats_store_default() {
    let store = SettingsStore::new();
    store.set_defaults(&DefaultsPatch::new().trim_on_blur(false));
    let (attrs, _) = mounted(SettingsPatch::new().with_trim_on_blur(true), &store);
    attrs.with_element_mut(|e| e.type_text(" f@example.com "));
    attrs.on_blur();
    assert_eq!(attrs.element().unwrap().value(), "f@example.com");
}

#[test]
fn initial_value_is_the_unchanged_baseline() {
    let (attrs, control) = mounted(
        SettingsPatch::new().with_initial_value("g@example.com"),
        &SettingsStore::new(),
    );
    assert_eq!(control.value(), "g@example.com");
    let v = attrs.on_blur();
    assert!(!v.changed);
    assert!(!v.entered);
    assert!(v.valid);

    attrs.with_element_mut(MemoryInput::backspace);
    let v = attrs.on_key_up(&KeyEvent::new(KeyCode::Backspace));
    assert!(v.changed);
    assert!(!v.entered);
}

#[test]
fn closure_spec_drives_a_session() {
    let spec = FnSpec::new("digits", |value: &str| {
        if value.chars().all(|c| c.is_ascii_digit()) {
            SpecOutcome::ok("digits", value)
        } else {
            SpecOutcome {
                id: "digits".into(),
                value: value.to_string(),
                error: Some("digits only".into()),
                code: 42,
                found: None,
            }
        }
    });
    let (_, attrs, control) =
        use_valid_input_with(spec, SettingsPatch::new(), &SettingsStore::new());
    attrs.mount(MemoryInput::new());
    let v = control.set_value("12a").unwrap();
    assert_eq!(v.code, 42);
    assert_eq!(v.error.as_deref(), Some("digits only"));
    assert!(control.set_value("123").unwrap().valid);
}
