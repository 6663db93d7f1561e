#![forbid(unsafe_code)]

//! Core: key events and the bound input element abstraction.

pub mod element;
pub mod event;

pub use element::{InputElement, MemoryInput};
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
