#![forbid(unsafe_code)]

//! Canonical key event types.
//!
//! Hosts deliver key events from very different sources: browser-style
//! key names (`"Tab"`, `"Enter"`, `"a"`), legacy numeric key codes, or a
//! terminal backend. All of them are normalized into [`KeyEvent`] before
//! reaching a session.
//!
//! # Design Notes
//!
//! - Shift+Tab arrives as [`KeyCode::BackTab`] from terminals but as
//!   `"Tab"` with a shift modifier from browsers; [`KeyEvent::is_tab`]
//!   treats both as Tab.
//! - `KeyEventKind` defaults to `Press` when not available from the host.
//! - `Modifiers` use bitflags for easy combination.

use std::fmt;

use bitflags::bitflags;
#[cfg(feature = "crossterm")]
use crossterm::event as cte;

/// A keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Build a key event from a browser-style key name.
    ///
    /// Returns `None` for names that do not map to a [`KeyCode`].
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        KeyCode::from_key_name(name).map(Self::new)
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Tab or Shift+Tab.
    #[must_use]
    pub const fn is_tab(&self) -> bool {
        matches!(self.code, KeyCode::Tab | KeyCode::BackTab)
    }

    #[must_use]
    pub const fn is_enter(&self) -> bool {
        matches!(self.code, KeyCode::Enter)
    }

    #[must_use]
    pub const fn is_escape(&self) -> bool {
        matches!(self.code, KeyCode::Escape)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Convert a Crossterm key event into a vinput [`KeyEvent`].
    #[must_use]
    #[cfg(feature = "crossterm")]
    pub fn from_crossterm(event: cte::KeyEvent) -> Option<Self> {
        map_key_event(event)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Insert key.
    Insert,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),

    /// Any other key, by its browser name (`"Shift"`, `"CapsLock"`,
    /// `"Dead"`, `"Unidentified"`, ...).
    Named(Box<str>),
}

impl KeyCode {
    /// Parse a browser-style key name (`KeyboardEvent.key`).
    ///
    /// Single characters map to [`KeyCode::Char`]; `"Esc"` is accepted as
    /// an alias emitted by older engines. Names without a dedicated variant
    /// are kept as [`KeyCode::Named`]. Only the empty name is rejected.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Delete" | "Del" => Self::Delete,
            "Insert" => Self::Insert,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (None, _) => return None,
                    (Some(c), None) => Self::Char(c),
                    (Some('F'), Some(_)) => name[1..]
                        .parse()
                        .map_or_else(|_| Self::Named(name.into()), Self::F),
                    _ => Self::Named(name.into()),
                }
            }
        };
        Some(code)
    }

    /// Map a legacy `keyCode` value.
    ///
    /// Only the three codes that carry commit semantics are recognized.
    #[must_use]
    pub const fn from_legacy_code(code: u32) -> Option<Self> {
        match code {
            9 => Some(Self::Tab),
            13 => Some(Self::Enter),
            27 => Some(Self::Escape),
            _ => None,
        }
    }

    /// The browser-style name of this key.
    #[must_use]
    pub fn key_name(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Enter => "Enter".into(),
            Self::Escape => "Escape".into(),
            Self::Backspace => "Backspace".into(),
            Self::Tab | Self::BackTab => "Tab".into(),
            Self::Delete => "Delete".into(),
            Self::Insert => "Insert".into(),
            Self::Home => "Home".into(),
            Self::End => "End".into(),
            Self::PageUp => "PageUp".into(),
            Self::PageDown => "PageDown".into(),
            Self::Up => "ArrowUp".into(),
            Self::Down => "ArrowDown".into(),
            Self::Left => "ArrowLeft".into(),
            Self::Right => "ArrowRight".into(),
            Self::F(n) => format!("F{n}"),
            Self::Named(name) => name.to_string(),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_name())
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(feature = "crossterm")]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind: map_key_kind(event.kind),
    })
}

#[cfg(feature = "crossterm")]
fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

#[cfg(feature = "crossterm")]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::Insert => Some(KeyCode::Insert),
        cte::KeyCode::F(n) => Some(KeyCode::F(n)),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        cte::KeyCode::CapsLock => Some(named("CapsLock")),
        cte::KeyCode::ScrollLock => Some(named("ScrollLock")),
        cte::KeyCode::NumLock => Some(named("NumLock")),
        cte::KeyCode::PrintScreen => Some(named("PrintScreen")),
        cte::KeyCode::Pause => Some(named("Pause")),
        cte::KeyCode::Menu => Some(named("ContextMenu")),
        cte::KeyCode::Modifier(modifier) => Some(named(modifier_key_name(modifier))),
        _ => None,
    }
}

#[cfg(feature = "crossterm")]
fn named(name: &str) -> KeyCode {
    KeyCode::Named(name.into())
}

#[cfg(feature = "crossterm")]
fn modifier_key_name(modifier: cte::ModifierKeyCode) -> &'static str {
    use cte::ModifierKeyCode as M;
    match modifier {
        M::LeftShift | M::RightShift => "Shift",
        M::LeftControl | M::RightControl => "Control",
        M::LeftAlt | M::RightAlt => "Alt",
        M::LeftSuper | M::RightSuper | M::LeftMeta | M::RightMeta => "Meta",
        M::LeftHyper | M::RightHyper => "Hyper",
        M::IsoLevel3Shift => "AltGraph",
        M::IsoLevel5Shift => "Unidentified",
    }
}

#[cfg(feature = "crossterm")]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.intersects(
        cte::KeyModifiers::SUPER | cte::KeyModifiers::HYPER | cte::KeyModifiers::META,
    ) {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_kind() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert_eq!(press.kind, KeyEventKind::Press);

        let release = press.with_kind(KeyEventKind::Release);
        assert_eq!(release.kind, KeyEventKind::Release);
    }

    #[test]
    fn back_tab_counts_as_tab() {
        assert!(KeyEvent::new(KeyCode::Tab).is_tab());
        assert!(KeyEvent::new(KeyCode::BackTab).is_tab());
        assert!(!KeyEvent::new(KeyCode::Enter).is_tab());
    }

    #[test]
    fn key_names_round_trip_for_commit_keys() {
        for name in ["Tab", "Enter", "Escape"] {
            let code = KeyCode::from_key_name(name).unwrap();
            assert_eq!(code.key_name(), name);
        }
    }

    #[test]
    fn key_name_parsing() {
        assert_eq!(KeyCode::from_key_name("a"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_key_name("é"), Some(KeyCode::Char('é')));
        assert_eq!(KeyCode::from_key_name("Esc"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_key_name("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_key_name("F12"), Some(KeyCode::F(12)));
        assert_eq!(KeyCode::from_key_name("Fx"), Some(KeyCode::Named("Fx".into())));
        assert_eq!(KeyCode::from_key_name(""), None);
    }

    #[test]
    fn keys_without_a_variant_keep_their_name() {
        for name in [
            "Shift",
            "Control",
            "Alt",
            "Meta",
            "CapsLock",
            "Dead",
            "Unidentified",
            "FnLock",
        ] {
            let code = KeyCode::from_key_name(name).unwrap();
            assert_eq!(code, KeyCode::Named(name.into()));
            assert_eq!(code.to_string(), name);
            assert!(!KeyEvent::new(code).is_tab());
        }
    }

    #[test]
    fn legacy_codes() {
        assert_eq!(KeyCode::from_legacy_code(9), Some(KeyCode::Tab));
        assert_eq!(KeyCode::from_legacy_code(13), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_legacy_code(27), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_legacy_code(65), None);
    }

    #[test]
    fn display_uses_key_name() {
        assert_eq!(KeyCode::BackTab.to_string(), "Tab");
        assert_eq!(KeyCode::Char('x').to_string(), "x");
        assert_eq!(KeyCode::F(3).to_string(), "F3");
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        let event = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(event.shift());
        assert!(!event.ctrl());
    }

    #[cfg(feature = "crossterm")]
    #[test]
    fn crossterm_esc_maps_to_escape() {
        let ct = cte::KeyEvent::new(cte::KeyCode::Esc, cte::KeyModifiers::NONE);
        let mapped = KeyEvent::from_crossterm(ct).unwrap();
        assert!(mapped.is_escape());
        assert_eq!(mapped.kind, KeyEventKind::Press);
    }

    #[cfg(feature = "crossterm")]
    #[test]
    fn crossterm_modifier_keys_map_to_names() {
        let ct = cte::KeyEvent::new(
            cte::KeyCode::Modifier(cte::ModifierKeyCode::RightShift),
            cte::KeyModifiers::SHIFT,
        );
        let mapped = KeyEvent::from_crossterm(ct).unwrap();
        assert_eq!(mapped.code, KeyCode::Named("Shift".into()));
        assert!(mapped.shift());
    }
}
