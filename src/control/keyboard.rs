// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key bindings.
//!
//! A flat table from crossterm key events to `ControlAction`s. The table is
//! small, so lookups scan it in order.

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};

use super::ControlAction;
use crate::score::NoteType;
use crate::session::PutMode;

/// A key and the modifiers held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Bare key
    pub const fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub const fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut label = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            label.push_str("Shift+");
        }
        match self.code {
            KeyCode::Char(' ') => label.push_str("Space"),
            KeyCode::Char(c) => label.extend(c.to_uppercase()),
            code => label.push_str(&format!("{:?}", code)),
        }
        f.pad(&label)
    }
}

/// Editor defaults, in the order `--keys` lists them
const DEFAULT_BINDINGS: &[(Shortcut, ControlAction, &str)] = &[
    (Shortcut::key(KeyCode::Left), ControlAction::SelectNote(NoteType::Left), "Left note"),
    (Shortcut::key(KeyCode::Up), ControlAction::SelectNote(NoteType::Up), "Up note"),
    (Shortcut::key(KeyCode::Right), ControlAction::SelectNote(NoteType::Right), "Right note"),
    (Shortcut::key(KeyCode::Char(' ')), ControlAction::TogglePlay, "Play/pause"),
    (Shortcut::key(KeyCode::Esc), ControlAction::Stop, "Stop and rewind"),
    (Shortcut::key(KeyCode::Char('m')), ControlAction::ToggleMetronome, "Metronome on/off"),
    (Shortcut::key(KeyCode::PageUp), ControlAction::ScrollBeats(1), "Forward one beat"),
    (Shortcut::key(KeyCode::PageDown), ControlAction::ScrollBeats(-1), "Back one beat"),
    (Shortcut::shift(KeyCode::PageUp), ControlAction::ScrollBeats(4), "Forward one bar"),
    (Shortcut::shift(KeyCode::PageDown), ControlAction::ScrollBeats(-4), "Back one bar"),
    (
        Shortcut::key(KeyCode::Char('s')),
        ControlAction::SetPutMode(PutMode::Section),
        "Put a section",
    ),
    (
        Shortcut::key(KeyCode::Char('a')),
        ControlAction::SetPutMode(PutMode::Appeal),
        "Put an appeal",
    ),
    (Shortcut::key(KeyCode::Char('f')), ControlAction::SetPutMode(PutMode::Fever), "Put a fever"),
    (Shortcut::ctrl(KeyCode::Char('n')), ControlAction::NormalizeNotes, "Normalize notes"),
    (Shortcut::ctrl(KeyCode::Delete), ControlAction::ClearAllNotes, "Clear all notes"),
    (Shortcut::ctrl(KeyCode::Char('d')), ControlAction::Dump, "Dump chart to the log"),
];

/// One entry of the binding table
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub shortcut: Shortcut,
    pub action: ControlAction,
    /// Shown by `--keys`
    pub description: String,
}

impl KeyBinding {
    pub fn new(shortcut: Shortcut, action: ControlAction, description: impl Into<String>) -> Self {
        Self { shortcut, action, description: description.into() }
    }
}

/// Binding table consulted by the session on each key press
#[derive(Debug, Clone, Default)]
pub struct KeyboardController {
    bindings: Vec<KeyBinding>,
}

impl KeyboardController {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the editor defaults
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        for &(shortcut, action, description) in DEFAULT_BINDINGS {
            controller.add(KeyBinding::new(shortcut, action, description));
        }
        controller
    }

    /// Bind a shortcut, replacing any binding it already had
    pub fn add(&mut self, binding: KeyBinding) {
        match self.bindings.iter_mut().find(|b| b.shortcut == binding.shortcut) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
    }

    /// Unbind a shortcut
    pub fn remove(&mut self, shortcut: &Shortcut) -> Option<KeyBinding> {
        let index = self.bindings.iter().position(|b| b.shortcut == *shortcut)?;
        Some(self.bindings.remove(index))
    }

    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<ControlAction> {
        let shortcut = Shortcut::new(code, modifiers);
        self.bindings
            .iter()
            .find(|b| b.shortcut == shortcut)
            .map(|b| b.action)
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}
