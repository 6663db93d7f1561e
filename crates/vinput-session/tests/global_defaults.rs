//! Process-wide defaults.
//!
//! Kept to a single test: the global store is shared by everything in this
//! binary.

use vinput_core::{InputElement, MemoryInput};
use vinput_session::{DefaultsPatch, SettingsPatch, global, init, use_valid_input};
use vinput_spec::StringSpec;

#[test]
fn init_before_creation_changes_resolved_defaults() {
    let spec = || StringSpec::new("city").rules(|r| r.required());

    let (_, before, _) = use_valid_input::<_, MemoryInput>(spec(), SettingsPatch::new());
    init(DefaultsPatch::new().trim_on_blur(false));
    assert!(!global().snapshot().trim_on_blur);

    let (_, after, control) = use_valid_input::<_, MemoryInput>(spec(), SettingsPatch::new());
    assert!(!control.settings().trim_on_blur);

    for attrs in [&before, &after] {
        attrs.mount(MemoryInput::new());
        attrs.with_element_mut(|e| e.type_text(" Oslo "));
        attrs.on_blur();
    }
    assert_eq!(before.element().unwrap().value(), "Oslo");
    assert_eq!(after.element().unwrap().value(), " Oslo ");

    global().reset();
}
